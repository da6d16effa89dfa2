//! Smoke test for the facade re-exports: a full lifecycle driven purely
//! through the `txtest` crate root.

use std::sync::{Arc, Mutex};
use txtest::{
	ServiceRegistry, TestDescriptor, TestResult, TransactionContext, TransactionHandler,
	TransactionMode, TransactionProvider, Transactional, TransactionalTest,
};

#[derive(Clone, Default)]
struct LoggingProvider {
	log: Arc<Mutex<Vec<&'static str>>>,
}

impl TransactionProvider for LoggingProvider {
	fn begin_transaction(
		&self,
		_test: &TransactionalTest,
		_context: &TransactionContext,
	) -> Result<(), txtest::spi::ProviderError> {
		self.log.lock().unwrap().push("begin");
		Ok(())
	}

	fn commit_transaction(
		&self,
		_test: &TransactionalTest,
		_context: &TransactionContext,
	) -> Result<(), txtest::spi::ProviderError> {
		self.log.lock().unwrap().push("commit");
		Ok(())
	}

	fn rollback_transaction(
		&self,
		_test: &TransactionalTest,
		_context: &TransactionContext,
	) -> Result<(), txtest::spi::ProviderError> {
		self.log.lock().unwrap().push("rollback");
		Ok(())
	}
}

#[test]
fn facade_exposes_a_working_lifecycle() {
	let provider = LoggingProvider::default();
	let handler = TransactionHandler::builder()
		.services(ServiceRegistry::builder().provider(provider.clone()).build())
		.build();

	let test = TestDescriptor::new("AccountRepositoryTest", "stores_account")
		.with_method_transactional(Transactional::new().with_mode(TransactionMode::Rollback));

	handler.before_test(&test).unwrap();
	handler.after_test(&test, Some(&TestResult::passed())).unwrap();

	assert_eq!(*provider.log.lock().unwrap(), ["begin", "rollback"]);
}
