//! Transaction lifecycle handler

use crate::configuration::TransactionConfiguration;
use crate::dispatch::LifecycleDispatcher;
use crate::error::{TransactionError, TransactionPhase};
use crate::registry::ServiceRegistry;
use crate::resolution;
use std::sync::Arc;
use txtest_spi::context::TransactionContext;
use txtest_spi::eligibility::{AlwaysEligible, TransactionEligibility};
use txtest_spi::enabler::TransactionEnabler;
use txtest_spi::event::TransactionEvent;
use txtest_spi::mode::TransactionMode;
use txtest_spi::provider::TransactionProvider;
use txtest_spi::test::{TestDescriptor, TestResult, TransactionalTest};

/// Context slot holding the provider resolved in the before phase, so the
/// paired after phase ends the transaction through the same instance. The
/// slot dies with the context.
struct ActiveProvider(Arc<dyn TransactionProvider>);

/// The transaction lifecycle handler: opens a transaction before an enabled
/// test and compensates it afterwards, according to the resolved
/// [`TransactionMode`] and the test outcome.
///
/// The handler is driven exclusively through the runner's two notifications,
/// [`before_test`] and [`after_test`]. Both phases recompute the enable
/// decision from the same static inputs (eligibility gate, enabler chain,
/// configuration), so they always agree; a test that was not enabled at
/// start is a no-op at the end.
///
/// A handler serves one test at a time. Runners executing tests in parallel
/// give every concurrent test its own handler; the configuration and the
/// service registry are shared read-only behind `Arc`s.
///
/// [`before_test`]: TransactionHandler::before_test
/// [`after_test`]: TransactionHandler::after_test
pub struct TransactionHandler {
	configuration: Arc<TransactionConfiguration>,
	services: Arc<ServiceRegistry>,
	enablers: Vec<Arc<dyn TransactionEnabler>>,
	lifecycle: LifecycleDispatcher,
	eligibility: Arc<dyn TransactionEligibility>,
	context: TransactionContext,
}

impl TransactionHandler {
	pub fn builder() -> TransactionHandlerBuilder {
		TransactionHandlerBuilder::default()
	}

	pub fn new(configuration: Arc<TransactionConfiguration>, services: Arc<ServiceRegistry>) -> Self {
		Self::builder()
			.configuration_arc(configuration)
			.services_arc(services)
			.build()
	}

	/// The dispatcher lifecycle events are emitted through; connect listeners
	/// here before the first test runs.
	pub fn lifecycle(&self) -> &LifecycleDispatcher {
		&self.lifecycle
	}

	/// The per-test transaction context owned by this handler.
	pub fn context(&self) -> &TransactionContext {
		&self.context
	}

	pub fn configuration(&self) -> &TransactionConfiguration {
		&self.configuration
	}

	/// Initializes a transaction before execution of the test.
	///
	/// Does nothing when transaction handling is not enabled for the test.
	/// Otherwise resolves the provider, activates the context, and runs the
	/// begin sequence between the started events. A begin failure propagates
	/// with the context left active; the runner's guaranteed after
	/// notification performs the rollback attempt and the full cleanup.
	pub fn before_test(&self, test: &TestDescriptor) -> Result<(), TransactionError> {
		let Some(mode) = self.enabled_mode(test) else {
			tracing::trace!(test = %test, "transaction handling not enabled");
			return Ok(());
		};

		let provider = self.services.only_one_provider()?;

		self.context.activate();
		self.context.set(ActiveProvider(provider.clone()));

		self.lifecycle.send_robust(TransactionEvent::BeforeTransactionStarted);

		let transactional_test =
			TransactionalTest::new(resolution::resolve_manager_name(&self.configuration, test));
		tracing::debug!(
			test = %test,
			mode = %mode,
			manager = transactional_test.manager().unwrap_or("<provider default>"),
			"beginning test transaction"
		);
		provider
			.begin_transaction(&transactional_test, &self.context)
			.map_err(|source| TransactionError::ProviderOperation {
				phase: TransactionPhase::Begin,
				source,
			})?;

		self.lifecycle.send_robust(TransactionEvent::AfterTransactionStarted);
		Ok(())
	}

	/// Compensates the transaction after execution of the test.
	///
	/// Rollback is required when the resolved mode is `Rollback`, when the
	/// outcome reports a failure, or when no outcome is available (fail-safe
	/// default); only otherwise is the transaction committed. Whatever the
	/// provider call does, the ended event fires exactly once and the context
	/// is destroyed before this method returns.
	pub fn after_test(
		&self,
		test: &TestDescriptor,
		result: Option<&TestResult>,
	) -> Result<(), TransactionError> {
		let Some(mode) = self.enabled_mode(test) else {
			return Ok(());
		};

		self.lifecycle.send_robust(TransactionEvent::BeforeTransactionEnded);

		// Cleanup runs on every exit path below, including provider errors
		// and panics.
		let _guard = EndTransactionGuard {
			lifecycle: &self.lifecycle,
			context: &self.context,
		};

		let provider = match self.context.get::<ActiveProvider>() {
			Some(active) => active.0.clone(),
			None => self.services.only_one_provider()?,
		};

		let transactional_test =
			TransactionalTest::new(resolution::resolve_manager_name(&self.configuration, test));
		let rollback_required =
			mode == TransactionMode::Rollback || result.is_none_or(TestResult::is_failed);

		if rollback_required {
			tracing::debug!(test = %test, "rolling back test transaction");
			provider
				.rollback_transaction(&transactional_test, &self.context)
				.map_err(|source| TransactionError::ProviderOperation {
					phase: TransactionPhase::Rollback,
					source,
				})
		} else {
			tracing::debug!(test = %test, "committing test transaction");
			provider
				.commit_transaction(&transactional_test, &self.context)
				.map_err(|source| TransactionError::ProviderOperation {
					phase: TransactionPhase::Commit,
					source,
				})
		}
	}

	/// The effective mode when transaction handling is enabled for the test,
	/// `None` otherwise. Both lifecycle phases go through this check.
	fn enabled_mode(&self, test: &TestDescriptor) -> Option<TransactionMode> {
		if !self.eligibility.is_transaction_supported(test) {
			return None;
		}
		let mode = resolution::resolve_transaction_mode(&self.enablers, &self.configuration, test)?;
		(mode != TransactionMode::Disabled).then_some(mode)
	}
}

/// Scoped cleanup for the end phase: fires the ended event and destroys the
/// context when dropped.
struct EndTransactionGuard<'a> {
	lifecycle: &'a LifecycleDispatcher,
	context: &'a TransactionContext,
}

impl Drop for EndTransactionGuard<'_> {
	fn drop(&mut self) {
		self.lifecycle.send_robust(TransactionEvent::AfterTransactionEnded);
		self.context.destroy();
	}
}

/// Builder assembling a [`TransactionHandler`] from its collaborators,
/// mirroring how the extension is wired into a host runner.
///
/// Unset parts fall back to an empty configuration, the discovered service
/// registry, a fresh dispatcher, and the always-eligible gate.
#[derive(Default)]
pub struct TransactionHandlerBuilder {
	configuration: Option<Arc<TransactionConfiguration>>,
	services: Option<Arc<ServiceRegistry>>,
	lifecycle: Option<LifecycleDispatcher>,
	eligibility: Option<Arc<dyn TransactionEligibility>>,
}

impl TransactionHandlerBuilder {
	pub fn configuration(self, configuration: TransactionConfiguration) -> Self {
		self.configuration_arc(Arc::new(configuration))
	}

	pub fn configuration_arc(mut self, configuration: Arc<TransactionConfiguration>) -> Self {
		self.configuration = Some(configuration);
		self
	}

	pub fn services(self, services: ServiceRegistry) -> Self {
		self.services_arc(Arc::new(services))
	}

	pub fn services_arc(mut self, services: Arc<ServiceRegistry>) -> Self {
		self.services = Some(services);
		self
	}

	pub fn lifecycle(mut self, lifecycle: LifecycleDispatcher) -> Self {
		self.lifecycle = Some(lifecycle);
		self
	}

	pub fn eligibility(self, eligibility: impl TransactionEligibility + 'static) -> Self {
		self.eligibility_arc(Arc::new(eligibility))
	}

	pub fn eligibility_arc(mut self, eligibility: Arc<dyn TransactionEligibility>) -> Self {
		self.eligibility = Some(eligibility);
		self
	}

	pub fn build(self) -> TransactionHandler {
		let services = self
			.services
			.unwrap_or_else(|| Arc::new(ServiceRegistry::discovered()));
		let enablers = services.transaction_enablers();
		TransactionHandler {
			configuration: self.configuration.unwrap_or_default(),
			services,
			enablers,
			lifecycle: self.lifecycle.unwrap_or_default(),
			eligibility: self.eligibility.unwrap_or_else(|| Arc::new(AlwaysEligible)),
			context: TransactionContext::new(),
		}
	}
}
