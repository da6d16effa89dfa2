//! # txtest-spi
//!
//! Service provider interface for the txtest transactional test extension.
//!
//! This crate defines the seams between the lifecycle core and its pluggable
//! collaborators: the [`TransactionProvider`] performing actual transaction
//! demarcation, the [`TransactionEnabler`] chain answering how a mode is
//! declared for a test, the [`TransactionEligibility`] gate, the per-test
//! [`TransactionContext`], and the value types travelling across those seams.
//!
//! Providers and enablers implement these traits and register themselves with
//! the core's service registry; nothing in this crate performs any
//! transaction work itself.

pub mod context;
pub mod eligibility;
pub mod enabler;
pub mod event;
pub mod mode;
pub mod provider;

pub use context::TransactionContext;
pub use eligibility::{AlwaysEligible, FixedEligibility, TransactionEligibility};
pub use enabler::TransactionEnabler;
pub use event::TransactionEvent;
pub use mode::{ParseTransactionModeError, TransactionMode};
pub use provider::{ProviderError, TransactionProvider};
pub use test::{TestDescriptor, TestResult, TestStatus, Transactional, TransactionalTest};
