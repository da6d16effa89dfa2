//! Transaction provider contract

use crate::context::TransactionContext;
use crate::test::TransactionalTest;

/// Failure raised by a provider operation. Providers report their own error
/// types; the core wraps them without interpreting them.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// Performs the actual transaction demarcation against a real transactional
/// resource.
///
/// Exactly one provider must be registered per process; the lifecycle
/// controller resolves it once per test and uses it for both the before and
/// the after phase. All three operations are blocking and are invoked
/// synchronously inside the runner's before/after notifications. None of
/// them is retried on failure.
///
/// The provider owns the physical transaction handle; `begin_transaction` is
/// expected to stash it in the supplied [`TransactionContext`] (typed slots)
/// so the end-phase call of the same test can retrieve it. The context is
/// destroyed after the test, taking the handle with it.
pub trait TransactionProvider: Send + Sync {
	/// Opens a new transaction for the given test.
	fn begin_transaction(
		&self,
		test: &TransactionalTest,
		context: &TransactionContext,
	) -> Result<(), ProviderError>;

	/// Commits the transaction opened for the given test.
	fn commit_transaction(
		&self,
		test: &TransactionalTest,
		context: &TransactionContext,
	) -> Result<(), ProviderError>;

	/// Rolls back the transaction opened for the given test.
	fn rollback_transaction(
		&self,
		test: &TransactionalTest,
		context: &TransactionContext,
	) -> Result<(), ProviderError>;
}
