//! Transaction mode and manager resolution

use crate::configuration::TransactionConfiguration;
use std::sync::Arc;
use txtest_spi::enabler::TransactionEnabler;
use txtest_spi::mode::TransactionMode;
use txtest_spi::test::TestDescriptor;

/// Resolves the effective transaction mode for one test.
///
/// All enablers are consulted; for each level the first enabler (in chain
/// order) reporting a definition wins. A method-level mode beats a
/// class-level mode. A winning [`TransactionMode::Default`] is substituted
/// with the configured default, so the returned mode is never `Default`.
/// `None` means no level declared anything: the test runs without a
/// transaction.
///
/// The function is pure over its inputs. It is invoked independently by the
/// before and the after phase of the same test, and because descriptor
/// contents are static per test both invocations agree.
pub fn resolve_transaction_mode(
	enablers: &[Arc<dyn TransactionEnabler>],
	configuration: &TransactionConfiguration,
	test: &TestDescriptor,
) -> Option<TransactionMode> {
	let mut method_level = None;
	let mut class_level = None;

	for enabler in enablers {
		if method_level.is_none() && enabler.is_transaction_handling_defined_on_method_level(test) {
			method_level = Some(enabler.transaction_mode_from_method_level(test));
		}
		if class_level.is_none() && enabler.is_transaction_handling_defined_on_class_level(test) {
			class_level = Some(enabler.transaction_mode_from_class_level(test));
		}
		if method_level.is_some() && class_level.is_some() {
			break;
		}
	}

	let declared = method_level.or(class_level)?;
	let effective = match declared {
		TransactionMode::Default => configuration.default_mode(),
		other => other,
	};
	Some(effective)
}

/// Resolves the transaction manager name for one test.
///
/// Precedence: method-level declaration, class-level declaration, global
/// configuration, none. Blank names count as unset at every level.
pub fn resolve_manager_name(
	configuration: &TransactionConfiguration,
	test: &TestDescriptor,
) -> Option<String> {
	let non_blank = |manager: &str| {
		let manager = manager.trim();
		(!manager.is_empty()).then(|| manager.to_string())
	};

	test.method_transactional()
		.and_then(|transactional| transactional.manager())
		.and_then(non_blank)
		.or_else(|| {
			test.class_transactional()
				.and_then(|transactional| transactional.manager())
				.and_then(non_blank)
		})
		.or_else(|| configuration.manager().and_then(non_blank))
}
