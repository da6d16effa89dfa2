//! Pluggable transaction mode resolvers

use crate::mode::TransactionMode;
use crate::test::TestDescriptor;

/// Strategy answering whether and how a transaction mode is declared for a
/// test, at class and at method level.
///
/// Several enablers may be registered; the built-in declaration-based enabler
/// is always present and always evaluated first, followed by registered
/// enablers in registration order. For each level the first enabler that
/// reports a definition wins.
///
/// # Contract
///
/// The two `transaction_mode_from_*` queries may only be called when the
/// corresponding `is_transaction_handling_defined_*` query returned true for
/// the same descriptor. Calling them otherwise is a programming error, and
/// implementations are free to panic.
pub trait TransactionEnabler: Send + Sync {
	/// Whether this enabler finds a mode declaration at class level.
	fn is_transaction_handling_defined_on_class_level(&self, test: &TestDescriptor) -> bool;

	/// Whether this enabler finds a mode declaration at method level.
	fn is_transaction_handling_defined_on_method_level(&self, test: &TestDescriptor) -> bool;

	/// The class-level mode. Only valid after the class-level query returned true.
	fn transaction_mode_from_class_level(&self, test: &TestDescriptor) -> TransactionMode;

	/// The method-level mode. Only valid after the method-level query returned true.
	fn transaction_mode_from_method_level(&self, test: &TestDescriptor) -> TransactionMode;
}
