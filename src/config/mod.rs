//! # Activator Configuration
//!
//! Settings for the activation core, loaded from YAML files with
//! environment overlays.
//!
//! ## Architecture
//!
//! - **Defaults first**: every section has working defaults, so an absent file
//!   yields a usable configuration
//! - **Environment awareness**: `activator.<environment>.yaml` overrides the
//!   base file
//! - **Explicit validation**: invalid settings fail loading instead of being
//!   silently replaced
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bus_activator::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let policy = manager.config().disposal.failure_policy;
//! # let _ = policy;
//! # Ok(())
//! # }
//! ```

pub mod loader;

pub use loader::ConfigManager;

use crate::endpoint::QueueAddress;
use crate::error::{ActivatorError, Result};
use serde::{Deserialize, Serialize};

/// Root configuration structure mirroring activator.yaml
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ActivatorConfig {
    /// Endpoint identity
    pub endpoint: EndpointConfig,

    /// Handler disposal behaviour at transaction completion
    pub disposal: DisposalConfig,

    /// Log output settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Input queue, either `queue` or `machine@queue`
    pub input_queue: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisposalConfig {
    pub failure_policy: DisposalFailurePolicy,

    /// Dispose shared instance handlers along with factory-built ones
    pub dispose_shared_instances: bool,
}

impl Default for DisposalConfig {
    fn default() -> Self {
        Self {
            failure_policy: DisposalFailurePolicy::Aggregate,
            dispose_shared_instances: true,
        }
    }
}

/// What the cleanup action reports when handlers fail to dispose
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisposalFailurePolicy {
    /// Log each failure and return them together as one error
    #[default]
    Aggregate,
    /// Log each failure and report success
    LogAndContinue,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `bus_activator=debug`
    pub level: Option<String>,
    pub json: bool,
}

impl ActivatorConfig {
    /// Validate settings that serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        self.input_queue_address()?;

        if let Some(level) = &self.logging.level {
            if level.trim().is_empty() {
                return Err(ActivatorError::configuration(
                    "logging",
                    "level must not be empty when set",
                ));
            }
        }

        Ok(())
    }

    /// Parsed input queue address, if one is configured
    pub fn input_queue_address(&self) -> Result<Option<QueueAddress>> {
        self.endpoint
            .input_queue
            .as_deref()
            .map(QueueAddress::parse)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ActivatorConfig::default();
        assert_eq!(config.disposal.failure_policy, DisposalFailurePolicy::Aggregate);
        assert!(config.disposal.dispose_shared_instances);
        assert!(config.endpoint.input_queue.is_none());
        assert!(!config.logging.json);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let config: ActivatorConfig = serde_json::from_value(serde_json::json!({
            "disposal": { "failure_policy": "log_and_continue" }
        }))
        .unwrap();

        assert_eq!(
            config.disposal.failure_policy,
            DisposalFailurePolicy::LogAndContinue
        );
        assert!(config.disposal.dispose_shared_instances);
    }

    #[test]
    fn test_input_queue_validation() {
        let mut config = ActivatorConfig::default();
        config.endpoint.input_queue = Some("billing@ledger".to_string());
        let address = config.input_queue_address().unwrap().unwrap();
        assert!(!address.is_local());

        config.endpoint.input_queue = Some("a@b@c".to_string());
        assert!(matches!(
            config.validate(),
            Err(ActivatorError::InvalidQueueAddress { .. })
        ));
    }

    #[test]
    fn test_blank_log_level_rejected() {
        let mut config = ActivatorConfig::default();
        config.logging.level = Some("  ".to_string());
        assert!(matches!(
            config.validate(),
            Err(ActivatorError::Configuration { .. })
        ));
    }
}
