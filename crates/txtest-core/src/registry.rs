//! Provider and enabler registration

use crate::enabler::DeclarationBasedTransactionEnabler;
use crate::error::TransactionError;
use std::sync::Arc;
use txtest_spi::enabler::TransactionEnabler;
use txtest_spi::provider::TransactionProvider;

/// Compile-time registration of a [`TransactionProvider`] implementation.
///
/// Submitted through [`register_transaction_provider!`] and collected when
/// [`ServiceRegistry::discovered`] assembles the process-wide registry.
pub struct ProviderRegistration {
	pub name: &'static str,
	pub constructor: fn() -> Arc<dyn TransactionProvider>,
}

inventory::collect!(ProviderRegistration);

/// Compile-time registration of an externally supplied
/// [`TransactionEnabler`].
pub struct EnablerRegistration {
	pub name: &'static str,
	pub constructor: fn() -> Arc<dyn TransactionEnabler>,
}

inventory::collect!(EnablerRegistration);

/// Register a transaction provider for automatic discovery
///
/// # Example
///
/// ```rust,ignore
/// use txtest_core::register_transaction_provider;
///
/// #[derive(Default)]
/// struct PoolProvider;
///
/// register_transaction_provider!(PoolProvider);
/// ```
#[macro_export]
macro_rules! register_transaction_provider {
	($provider:ty) => {
		$crate::inventory::submit! {
			$crate::registry::ProviderRegistration {
				name: stringify!($provider),
				constructor: || std::sync::Arc::new(<$provider as Default>::default()),
			}
		}
	};
}

/// Register a transaction enabler for automatic discovery
///
/// Registered enablers are evaluated after the built-in declaration-based
/// enabler, in registration order.
#[macro_export]
macro_rules! register_transaction_enabler {
	($enabler:ty) => {
		$crate::inventory::submit! {
			$crate::registry::EnablerRegistration {
				name: stringify!($enabler),
				constructor: || std::sync::Arc::new(<$enabler as Default>::default()),
			}
		}
	};
}

/// Immutable set of providers and enablers available to the lifecycle
/// controller.
///
/// Built once per process, either from the compile-time registrations
/// ([`discovered`](Self::discovered)) or explicitly through the
/// [`builder`](Self::builder); read-only and shareable afterwards.
pub struct ServiceRegistry {
	providers: Vec<Arc<dyn TransactionProvider>>,
	enablers: Vec<Arc<dyn TransactionEnabler>>,
}

impl ServiceRegistry {
	/// Assembles the registry from the compile-time registrations.
	pub fn discovered() -> Self {
		let mut builder = Self::builder();
		for registration in inventory::iter::<ProviderRegistration> {
			tracing::debug!(provider = registration.name, "discovered transaction provider");
			builder = builder.provider_arc((registration.constructor)());
		}
		for registration in inventory::iter::<EnablerRegistration> {
			tracing::debug!(enabler = registration.name, "discovered transaction enabler");
			builder = builder.enabler_arc((registration.constructor)());
		}
		builder.build()
	}

	pub fn builder() -> ServiceRegistryBuilder {
		ServiceRegistryBuilder::default()
	}

	/// Resolves the single registered provider.
	///
	/// Zero registrations raise [`TransactionError::ProviderNotFound`]; an
	/// ambiguous registration raises
	/// [`TransactionError::MultipleProvidersFound`]. Provider selection is
	/// independent of any configured manager name.
	pub fn only_one_provider(&self) -> Result<Arc<dyn TransactionProvider>, TransactionError> {
		match self.providers.as_slice() {
			[] => Err(TransactionError::ProviderNotFound),
			[provider] => Ok(provider.clone()),
			_ => Err(TransactionError::MultipleProvidersFound),
		}
	}

	/// The enabler chain: the built-in declaration-based enabler first,
	/// followed by registered enablers in registration order.
	pub fn transaction_enablers(&self) -> Vec<Arc<dyn TransactionEnabler>> {
		let mut chain: Vec<Arc<dyn TransactionEnabler>> =
			Vec::with_capacity(self.enablers.len() + 1);
		chain.push(Arc::new(DeclarationBasedTransactionEnabler));
		chain.extend(self.enablers.iter().cloned());
		chain
	}
}

#[derive(Default)]
pub struct ServiceRegistryBuilder {
	providers: Vec<Arc<dyn TransactionProvider>>,
	enablers: Vec<Arc<dyn TransactionEnabler>>,
}

impl ServiceRegistryBuilder {
	pub fn provider(self, provider: impl TransactionProvider + 'static) -> Self {
		self.provider_arc(Arc::new(provider))
	}

	pub fn provider_arc(mut self, provider: Arc<dyn TransactionProvider>) -> Self {
		self.providers.push(provider);
		self
	}

	pub fn enabler(self, enabler: impl TransactionEnabler + 'static) -> Self {
		self.enabler_arc(Arc::new(enabler))
	}

	pub fn enabler_arc(mut self, enabler: Arc<dyn TransactionEnabler>) -> Self {
		self.enablers.push(enabler);
		self
	}

	pub fn build(self) -> ServiceRegistry {
		ServiceRegistry {
			providers: self.providers,
			enablers: self.enablers,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use txtest_spi::context::TransactionContext;
	use txtest_spi::mode::TransactionMode;
	use txtest_spi::provider::ProviderError;
	use txtest_spi::test::{TestDescriptor, TransactionalTest};

	struct NoopProvider;

	impl TransactionProvider for NoopProvider {
		fn begin_transaction(
			&self,
			_test: &TransactionalTest,
			_context: &TransactionContext,
		) -> Result<(), ProviderError> {
			Ok(())
		}

		fn commit_transaction(
			&self,
			_test: &TransactionalTest,
			_context: &TransactionContext,
		) -> Result<(), ProviderError> {
			Ok(())
		}

		fn rollback_transaction(
			&self,
			_test: &TransactionalTest,
			_context: &TransactionContext,
		) -> Result<(), ProviderError> {
			Ok(())
		}
	}

	struct EverythingRollsBack;

	impl TransactionEnabler for EverythingRollsBack {
		fn is_transaction_handling_defined_on_class_level(&self, _test: &TestDescriptor) -> bool {
			false
		}

		fn is_transaction_handling_defined_on_method_level(&self, _test: &TestDescriptor) -> bool {
			true
		}

		fn transaction_mode_from_class_level(&self, _test: &TestDescriptor) -> TransactionMode {
			unreachable!("class level is never defined")
		}

		fn transaction_mode_from_method_level(&self, _test: &TestDescriptor) -> TransactionMode {
			TransactionMode::Rollback
		}
	}

	#[rstest]
	fn empty_registry_has_no_provider() {
		let registry = ServiceRegistry::builder().build();
		assert!(matches!(
			registry.only_one_provider(),
			Err(TransactionError::ProviderNotFound)
		));
	}

	#[rstest]
	fn single_provider_is_resolved() {
		let registry = ServiceRegistry::builder().provider(NoopProvider).build();
		assert!(registry.only_one_provider().is_ok());
	}

	#[rstest]
	fn ambiguous_registration_is_rejected() {
		let registry = ServiceRegistry::builder()
			.provider(NoopProvider)
			.provider(NoopProvider)
			.build();
		assert!(matches!(
			registry.only_one_provider(),
			Err(TransactionError::MultipleProvidersFound)
		));
	}

	#[rstest]
	fn enabler_chain_starts_with_the_builtin_enabler() {
		let registry = ServiceRegistry::builder()
			.enabler(EverythingRollsBack)
			.build();
		let chain = registry.transaction_enablers();
		assert_eq!(chain.len(), 2);

		// The built-in enabler sees the class-level declaration the
		// registered enabler would never report.
		let test = TestDescriptor::new("InventoryTest", "reserves_stock").with_class_transactional(
			txtest_spi::test::Transactional::new().with_mode(TransactionMode::Commit),
		);
		assert!(chain[0].is_transaction_handling_defined_on_class_level(&test));
		assert!(!chain[1].is_transaction_handling_defined_on_class_level(&test));
	}
}
