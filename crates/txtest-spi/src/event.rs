//! Transaction lifecycle events

use std::fmt;

/// Ordered notifications emitted around an enabled test's transaction.
///
/// For every enabled test the controller emits exactly four events:
/// `BeforeTransactionStarted` and `AfterTransactionStarted` around the
/// provider's begin call, then `BeforeTransactionEnded` and
/// `AfterTransactionEnded` around commit/rollback. `AfterTransactionEnded`
/// fires on every exit path of the end phase, including provider failures.
/// Disabled or ineligible tests emit nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionEvent {
	BeforeTransactionStarted,
	AfterTransactionStarted,
	BeforeTransactionEnded,
	AfterTransactionEnded,
}

impl fmt::Display for TransactionEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TransactionEvent::BeforeTransactionStarted => write!(f, "before_transaction_started"),
			TransactionEvent::AfterTransactionStarted => write!(f, "after_transaction_started"),
			TransactionEvent::BeforeTransactionEnded => write!(f, "before_transaction_ended"),
			TransactionEvent::AfterTransactionEnded => write!(f, "after_transaction_ended"),
		}
	}
}
