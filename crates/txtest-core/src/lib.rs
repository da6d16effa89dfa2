//! # txtest-core
//!
//! Transactional test lifecycle controller.
//!
//! The [`TransactionHandler`] wraps each enabled test in a transaction: it
//! resolves the effective [`TransactionMode`](txtest_spi::TransactionMode)
//! through the enabler chain and the configured default, asks the single
//! registered [`TransactionProvider`](txtest_spi::TransactionProvider) to
//! begin before the test body runs, and commits or rolls back afterwards.
//! A failed test rolls back unconditionally, as does a test whose outcome is
//! unknown. Four lifecycle events are emitted around the two provider
//! interactions of every enabled test.
//!
//! Providers and enablers plug in either through the compile-time
//! registration macros or explicitly through the
//! [`ServiceRegistry`] builder:
//!
//! ```rust,ignore
//! use txtest_core::{register_transaction_provider, TransactionHandler};
//!
//! #[derive(Default)]
//! struct PoolProvider { /* ... */ }
//!
//! register_transaction_provider!(PoolProvider);
//!
//! let handler = TransactionHandler::builder().build();
//! handler.before_test(&descriptor)?;
//! // test body runs here
//! handler.after_test(&descriptor, Some(&outcome))?;
//! ```

pub mod configuration;
pub mod dispatch;
pub mod enabler;
pub mod error;
pub mod handler;
pub mod registry;
pub mod resolution;

// Re-exported for the registration macros.
pub use inventory;

pub use configuration::{DEFAULT_MODE_PROPERTY, MANAGER_PROPERTY, TransactionConfiguration};
pub use dispatch::{LifecycleDispatcher, TransactionEventReceiver};
pub use enabler::DeclarationBasedTransactionEnabler;
pub use error::{ConfigurationError, TransactionError, TransactionPhase};
pub use handler::{TransactionHandler, TransactionHandlerBuilder};
pub use registry::{
	EnablerRegistration, ProviderRegistration, ServiceRegistry, ServiceRegistryBuilder,
};
pub use resolution::{resolve_manager_name, resolve_transaction_mode};
