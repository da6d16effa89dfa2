//! Built-in declaration-based enabler

use txtest_spi::enabler::TransactionEnabler;
use txtest_spi::mode::TransactionMode;
use txtest_spi::test::TestDescriptor;

/// The always-present enabler reading the [`Transactional`] declarations
/// attached to the test descriptor at registration time.
///
/// It is evaluated first in every enabler chain, so explicit declarations on
/// the test beat anything an externally registered enabler would infer.
///
/// [`Transactional`]: txtest_spi::test::Transactional
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclarationBasedTransactionEnabler;

impl TransactionEnabler for DeclarationBasedTransactionEnabler {
	fn is_transaction_handling_defined_on_class_level(&self, test: &TestDescriptor) -> bool {
		test.class_transactional().is_some()
	}

	fn is_transaction_handling_defined_on_method_level(&self, test: &TestDescriptor) -> bool {
		test.method_transactional().is_some()
	}

	fn transaction_mode_from_class_level(&self, test: &TestDescriptor) -> TransactionMode {
		test.class_transactional()
			.expect("class-level mode queried without a class-level declaration")
			.mode()
	}

	fn transaction_mode_from_method_level(&self, test: &TestDescriptor) -> TransactionMode {
		test.method_transactional()
			.expect("method-level mode queried without a method-level declaration")
			.mode()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use txtest_spi::test::Transactional;

	#[rstest]
	fn reports_declarations_per_level() {
		let enabler = DeclarationBasedTransactionEnabler;
		let test = TestDescriptor::new("OrderTest", "places_order")
			.with_method_transactional(Transactional::new().with_mode(TransactionMode::Rollback));

		assert!(!enabler.is_transaction_handling_defined_on_class_level(&test));
		assert!(enabler.is_transaction_handling_defined_on_method_level(&test));
		assert_eq!(
			enabler.transaction_mode_from_method_level(&test),
			TransactionMode::Rollback
		);
	}

	#[rstest]
	#[should_panic(expected = "class-level mode queried without a class-level declaration")]
	fn mode_query_without_declaration_is_a_contract_violation() {
		let enabler = DeclarationBasedTransactionEnabler;
		let test = TestDescriptor::new("OrderTest", "places_order");
		let _ = enabler.transaction_mode_from_class_level(&test);
	}
}
