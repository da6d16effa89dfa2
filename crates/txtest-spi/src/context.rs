//! Per-test transaction context

use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// Scoped container for the transaction-related state of a single test.
///
/// The context is created empty, activated when the before-test phase begins
/// transaction handling, populated by the provider's begin call (providers
/// stash their live transaction handle here via the typed slots), and
/// destroyed when the after-test phase completes. A context is never active
/// across two tests; under parallel execution every concurrent test owns its
/// own instance.
///
/// `destroy` is unconditional: it is safe without a prior `activate`, safe to
/// call twice, and always leaves the context empty and inactive.
pub struct TransactionContext {
	active: RwLock<bool>,
	slots: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl TransactionContext {
	pub fn new() -> Self {
		Self {
			active: RwLock::new(false),
			slots: RwLock::new(HashMap::new()),
		}
	}

	/// Prepares the context for a new transaction. Idempotent; must be called
	/// before any provider interaction.
	pub fn activate(&self) {
		*self.active.write() = true;
	}

	/// Clears all state unconditionally and deactivates the context.
	pub fn destroy(&self) {
		self.slots.write().clear();
		*self.active.write() = false;
	}

	pub fn is_active(&self) -> bool {
		*self.active.read()
	}

	/// Retrieves a slot value by type, or `None` if nothing of type `T` is stored.
	pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
		let slots = self.slots.read();
		slots
			.get(&TypeId::of::<T>())
			.and_then(|slot| slot.clone().downcast::<T>().ok())
	}

	/// Stores a value in the context, keyed by its type. Replaces any previous
	/// value of the same type.
	pub fn set<T: Any + Send + Sync>(&self, value: T) {
		self.slots.write().insert(TypeId::of::<T>(), Arc::new(value));
	}

	/// Stores a pre-wrapped `Arc<T>` without re-wrapping.
	pub fn set_arc<T: Any + Send + Sync>(&self, value: Arc<T>) {
		self.slots.write().insert(TypeId::of::<T>(), value);
	}

	/// Removes and returns the slot value of type `T`, if present.
	pub fn remove<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
		self.slots
			.write()
			.remove(&TypeId::of::<T>())
			.and_then(|slot| slot.downcast::<T>().ok())
	}
}

impl Default for TransactionContext {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn starts_inactive_and_empty() {
		let context = TransactionContext::new();
		assert!(!context.is_active());
		assert!(context.get::<u32>().is_none());
	}

	#[rstest]
	fn activate_is_idempotent() {
		let context = TransactionContext::new();
		context.activate();
		context.activate();
		assert!(context.is_active());
	}

	#[rstest]
	fn destroy_clears_slots_and_deactivates() {
		let context = TransactionContext::new();
		context.activate();
		context.set("handle".to_string());

		context.destroy();

		assert!(!context.is_active());
		assert!(context.get::<String>().is_none());
	}

	#[rstest]
	fn destroy_without_activate_does_not_fail() {
		let context = TransactionContext::new();
		context.destroy();
		context.destroy();
		assert!(!context.is_active());
	}

	#[rstest]
	fn slots_are_keyed_by_type() {
		let context = TransactionContext::new();
		context.set(7u32);
		context.set("tx-1".to_string());

		assert_eq!(*context.get::<u32>().unwrap(), 7);
		assert_eq!(*context.get::<String>().unwrap(), "tx-1");
		assert!(context.get::<i64>().is_none());
	}

	#[rstest]
	fn remove_takes_the_value_out() {
		let context = TransactionContext::new();
		context.set(42u64);

		assert_eq!(*context.remove::<u64>().unwrap(), 42);
		assert!(context.get::<u64>().is_none());
	}

	#[rstest]
	fn set_arc_stores_without_rewrapping() {
		let context = TransactionContext::new();
		let value = Arc::new(5i32);
		context.set_arc(value.clone());
		assert!(Arc::ptr_eq(&value, &context.get::<i32>().unwrap()));
	}
}
