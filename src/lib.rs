//! # txtest
//!
//! Transactional test lifecycle extension for Rust test harnesses.
//!
//! txtest wraps persistence-touching tests in automatically demarcated
//! transactions: a transaction is opened before each enabled test and
//! committed or rolled back afterwards, so tests run in isolation without
//! manual setup and teardown. Which tests participate, and how their
//! transaction ends, is declared per test class or test method and resolved
//! against a configurable process-wide default; a failing test always rolls
//! back, whatever was declared.
//!
//! The crate is a facade over the two workspace members:
//!
//! - [`spi`]: the seams for pluggable collaborators (transaction providers,
//!   mode enablers, the eligibility gate, the per-test context) and the
//!   value types crossing those seams.
//! - [`core`]: the lifecycle controller, mode resolution, service registry,
//!   configuration, and event dispatch.
//!
//! Host runners interact with a [`TransactionHandler`] through exactly two
//! entry points, mirroring their own before/after notifications:
//!
//! ```rust,ignore
//! use txtest::{TestDescriptor, TestResult, TransactionHandler, Transactional, TransactionMode};
//!
//! let handler = TransactionHandler::builder().build();
//!
//! let test = TestDescriptor::new("AccountRepositoryTest", "stores_account")
//!     .with_method_transactional(Transactional::new().with_mode(TransactionMode::Rollback));
//!
//! handler.before_test(&test)?;
//! // ... run the test body ...
//! handler.after_test(&test, Some(&TestResult::passed()))?;
//! ```

pub use txtest_core as core;
pub use txtest_spi as spi;

pub use txtest_core::{
	ConfigurationError, DeclarationBasedTransactionEnabler, LifecycleDispatcher, ServiceRegistry,
	TransactionConfiguration, TransactionError, TransactionHandler, TransactionPhase,
};
pub use txtest_spi::{
	AlwaysEligible, FixedEligibility, ParseTransactionModeError, TestDescriptor, TestResult,
	TestStatus, TransactionContext, TransactionEligibility, TransactionEnabler, TransactionEvent,
	TransactionMode, TransactionProvider, Transactional, TransactionalTest,
};
