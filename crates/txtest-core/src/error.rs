//! Error types for the lifecycle core

use std::fmt;
use txtest_spi::mode::{ParseTransactionModeError, TransactionMode};
use txtest_spi::provider::ProviderError;

/// Provider operation a [`TransactionError::ProviderOperation`] failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionPhase {
	Begin,
	Commit,
	Rollback,
}

impl fmt::Display for TransactionPhase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TransactionPhase::Begin => write!(f, "begin"),
			TransactionPhase::Commit => write!(f, "commit"),
			TransactionPhase::Rollback => write!(f, "rollback"),
		}
	}
}

/// Fatal failure of a test's transaction phase, surfaced to the runner.
///
/// Provider lookup failures abort the phase before any provider is touched.
/// Operation failures are wrapped and returned only after the mandatory
/// cleanup of the phase has run; they are never retried.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
	#[error("transaction provider for the current test has not been found")]
	ProviderNotFound,

	#[error("more than one transaction provider has been registered")]
	MultipleProvidersFound,

	#[error("failed to {phase} the test transaction")]
	ProviderOperation {
		phase: TransactionPhase,
		#[source]
		source: ProviderError,
	},
}

/// Failure converting external configuration properties into a
/// [`TransactionConfiguration`](crate::configuration::TransactionConfiguration).
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
	#[error(transparent)]
	UnknownMode(#[from] ParseTransactionModeError),

	#[error("`{0}` is not a valid default transaction mode")]
	InvalidDefaultMode(TransactionMode),
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn provider_lookup_errors_have_distinct_messages() {
		assert_eq!(
			TransactionError::ProviderNotFound.to_string(),
			"transaction provider for the current test has not been found"
		);
		assert_eq!(
			TransactionError::MultipleProvidersFound.to_string(),
			"more than one transaction provider has been registered"
		);
	}

	#[rstest]
	fn operation_error_names_the_phase_and_keeps_the_source() {
		let error = TransactionError::ProviderOperation {
			phase: TransactionPhase::Commit,
			source: "connection lost".into(),
		};
		assert_eq!(error.to_string(), "failed to commit the test transaction");
		assert_eq!(
			std::error::Error::source(&error).unwrap().to_string(),
			"connection lost"
		);
	}
}
