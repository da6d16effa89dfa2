//! Process-wide transaction configuration

use crate::error::ConfigurationError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use txtest_spi::mode::TransactionMode;

/// Property key selecting the default transaction manager.
pub const MANAGER_PROPERTY: &str = "manager";

/// Property key selecting the default transaction mode.
pub const DEFAULT_MODE_PROPERTY: &str = "transaction_default_mode";

/// Process-wide transaction settings: an optional default manager name and
/// the default mode substituted for [`TransactionMode::Default`] declarations.
///
/// Loaded once before any test runs and immutable afterwards; the lifecycle
/// controller receives it behind an `Arc` and shares it read-only across
/// concurrently executing tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionConfiguration {
	manager: Option<String>,
	transaction_default_mode: TransactionMode,
}

impl TransactionConfiguration {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_manager(mut self, manager: impl Into<String>) -> Self {
		self.manager = Some(manager.into());
		self
	}

	/// Sets the default mode substituted for `Default` declarations.
	///
	/// # Panics
	///
	/// Panics when `mode` is not `Commit` or `Rollback`; the default must
	/// always resolve to a terminal mode, and `Disabled` must be declared
	/// explicitly per test.
	pub fn with_default_mode(mut self, mode: TransactionMode) -> Self {
		assert!(
			mode.is_effective(),
			"default transaction mode must be commit or rollback, got `{mode}`"
		);
		self.transaction_default_mode = mode;
		self
	}

	pub fn manager(&self) -> Option<&str> {
		self.manager.as_deref()
	}

	pub fn default_mode(&self) -> TransactionMode {
		self.transaction_default_mode
	}

	/// Builds a configuration from string properties handed over by an
	/// external settings source.
	///
	/// Recognized keys are [`MANAGER_PROPERTY`] and [`DEFAULT_MODE_PROPERTY`];
	/// unrecognized keys are ignored. Blank manager values count as unset.
	pub fn from_properties(
		properties: &IndexMap<String, String>,
	) -> Result<Self, ConfigurationError> {
		let mut configuration = Self::new();

		for (key, value) in properties {
			match key.as_str() {
				MANAGER_PROPERTY => {
					let manager = value.trim();
					if !manager.is_empty() {
						configuration.manager = Some(manager.to_string());
					}
				}
				DEFAULT_MODE_PROPERTY => {
					let mode: TransactionMode = value.parse()?;
					if !mode.is_effective() {
						return Err(ConfigurationError::InvalidDefaultMode(mode));
					}
					configuration.transaction_default_mode = mode;
				}
				unknown => {
					tracing::debug!(
						property = unknown,
						"ignoring unrecognized transaction configuration property"
					);
				}
			}
		}

		Ok(configuration)
	}
}

impl Default for TransactionConfiguration {
	fn default() -> Self {
		Self {
			manager: None,
			transaction_default_mode: TransactionMode::Commit,
		}
	}
}
