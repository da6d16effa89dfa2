//! Synchronous lifecycle event dispatcher

use parking_lot::RwLock;
use std::sync::Arc;
use txtest_spi::event::TransactionEvent;

/// Receiver function type for lifecycle events.
pub type TransactionEventReceiver = Arc<dyn Fn(&TransactionEvent) + Send + Sync>;

struct ConnectedReceiver {
	receiver: TransactionEventReceiver,
	dispatch_uid: Option<String>,
}

/// Fire-and-forget dispatcher for the four transaction lifecycle events.
///
/// Receivers run synchronously, in connection order, on the thread driving
/// the test lifecycle. Emission never influences the controller's own state
/// machine: a panicking receiver is isolated by [`send_robust`] and the
/// lifecycle proceeds.
///
/// [`send_robust`]: LifecycleDispatcher::send_robust
#[derive(Clone)]
pub struct LifecycleDispatcher {
	receivers: Arc<RwLock<Vec<ConnectedReceiver>>>,
}

impl LifecycleDispatcher {
	pub fn new() -> Self {
		Self {
			receivers: Arc::new(RwLock::new(Vec::new())),
		}
	}

	/// Connect a receiver to all lifecycle events.
	pub fn connect<F>(&self, receiver: F)
	where
		F: Fn(&TransactionEvent) + Send + Sync + 'static,
	{
		self.receivers.write().push(ConnectedReceiver {
			receiver: Arc::new(receiver),
			dispatch_uid: None,
		});
	}

	/// Connect a receiver under a dispatch uid, replacing any receiver
	/// previously connected under the same uid.
	pub fn connect_with_uid<F>(&self, dispatch_uid: impl Into<String>, receiver: F)
	where
		F: Fn(&TransactionEvent) + Send + Sync + 'static,
	{
		let dispatch_uid = dispatch_uid.into();
		let mut receivers = self.receivers.write();
		receivers.retain(|connected| connected.dispatch_uid.as_deref() != Some(&dispatch_uid));
		receivers.push(ConnectedReceiver {
			receiver: Arc::new(receiver),
			dispatch_uid: Some(dispatch_uid),
		});
	}

	/// Disconnect the receiver registered under `dispatch_uid`, or all
	/// receivers when no uid is given. Returns whether anything was removed.
	pub fn disconnect(&self, dispatch_uid: Option<&str>) -> bool {
		let mut receivers = self.receivers.write();
		let original_len = receivers.len();

		match dispatch_uid {
			Some(uid) => receivers.retain(|connected| connected.dispatch_uid.as_deref() != Some(uid)),
			None => receivers.clear(),
		}

		receivers.len() < original_len
	}

	/// Send the event to all connected receivers.
	pub fn send(&self, event: TransactionEvent) {
		let receivers = self.receivers.read();
		for connected in receivers.iter() {
			(connected.receiver)(&event);
		}
	}

	/// Send the event to all connected receivers, catching panics so one
	/// misbehaving receiver cannot stop the others or the lifecycle itself.
	pub fn send_robust(&self, event: TransactionEvent) {
		let receivers = self.receivers.read();
		for connected in receivers.iter() {
			let receiver = connected.receiver.clone();
			let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
				receiver(&event);
			}));
			if outcome.is_err() {
				tracing::warn!(event = %event, "lifecycle event receiver panicked");
			}
		}
	}

	pub fn has_listeners(&self) -> bool {
		!self.receivers.read().is_empty()
	}

	pub fn receivers_count(&self) -> usize {
		self.receivers.read().len()
	}
}

impl Default for LifecycleDispatcher {
	fn default() -> Self {
		Self::new()
	}
}
