//! Transaction mode declarations

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Strategy applied to the test transaction once the test body has finished.
///
/// `Default` is a placeholder meaning "use the globally configured default
/// mode"; it never survives mode resolution. `Disabled` switches transaction
/// handling off for the test and must always be declared explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionMode {
	/// Commit the transaction after the test, unless the test failed.
	Commit,
	/// Roll the transaction back after the test regardless of the outcome.
	Rollback,
	/// Do not wrap the test in a transaction.
	Disabled,
	/// Defer to the configured default mode.
	Default,
}

impl TransactionMode {
	/// Returns true for the two terminal modes a test can actually run under.
	pub fn is_effective(self) -> bool {
		matches!(self, TransactionMode::Commit | TransactionMode::Rollback)
	}
}

impl Default for TransactionMode {
	fn default() -> Self {
		TransactionMode::Default
	}
}

impl fmt::Display for TransactionMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TransactionMode::Commit => write!(f, "commit"),
			TransactionMode::Rollback => write!(f, "rollback"),
			TransactionMode::Disabled => write!(f, "disabled"),
			TransactionMode::Default => write!(f, "default"),
		}
	}
}

/// Error returned when parsing an unrecognized transaction mode string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized transaction mode `{0}`")]
pub struct ParseTransactionModeError(pub String);

impl FromStr for TransactionMode {
	type Err = ParseTransactionModeError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"commit" => Ok(TransactionMode::Commit),
			"rollback" => Ok(TransactionMode::Rollback),
			"disabled" => Ok(TransactionMode::Disabled),
			"default" => Ok(TransactionMode::Default),
			_ => Err(ParseTransactionModeError(value.to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("commit", TransactionMode::Commit)]
	#[case("ROLLBACK", TransactionMode::Rollback)]
	#[case(" disabled ", TransactionMode::Disabled)]
	#[case("default", TransactionMode::Default)]
	fn parses_known_modes(#[case] input: &str, #[case] expected: TransactionMode) {
		assert_eq!(input.parse::<TransactionMode>().unwrap(), expected);
	}

	#[rstest]
	fn rejects_unknown_mode() {
		let err = "two-phase".parse::<TransactionMode>().unwrap_err();
		assert_eq!(err, ParseTransactionModeError("two-phase".to_string()));
	}

	#[rstest]
	fn display_round_trips(
		#[values(
			TransactionMode::Commit,
			TransactionMode::Rollback,
			TransactionMode::Disabled,
			TransactionMode::Default
		)]
		mode: TransactionMode,
	) {
		assert_eq!(mode.to_string().parse::<TransactionMode>().unwrap(), mode);
	}

	#[rstest]
	fn only_terminal_modes_are_effective() {
		assert!(TransactionMode::Commit.is_effective());
		assert!(TransactionMode::Rollback.is_effective());
		assert!(!TransactionMode::Disabled.is_effective());
		assert!(!TransactionMode::Default.is_effective());
	}
}
