//! # Activator Error Types
//!
//! Structured error handling for the activation core using thiserror.
//! User code (handlers, factories, buses) reports failures as [`BoxError`];
//! the core wraps them into [`ActivatorError`] with enough context to tell
//! which registration or which handler failed.

use std::fmt;
use thiserror::Error;

/// Error type returned by user-supplied handlers, factories and buses
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by the activation core
#[derive(Error, Debug)]
pub enum ActivatorError {
    #[error("Invalid bus binding: {message}")]
    InvalidBusBinding { message: String },

    #[error("Cannot bind bus '{attempted}' because bus '{bound}' is already bound")]
    BusAlreadyBound { bound: String, attempted: String },

    #[error(
        "Handler construction failed for {message_type}: factory #{position} ({handler_type}): {source}"
    )]
    FactoryConstruction {
        message_type: &'static str,
        handler_type: &'static str,
        position: usize,
        #[source]
        source: BoxError,
    },

    #[error("{} handler(s) failed to dispose after handling {message_type}", failures.len())]
    Disposal {
        message_type: String,
        failures: Vec<DisposalFailure>,
    },

    #[error("Bus teardown failed for '{bus}': {source}")]
    BusTeardown {
        bus: String,
        #[source]
        source: BoxError,
    },

    #[error("Transaction {transaction_id} completion failed: {} cleanup action(s) reported errors", failures.len())]
    TransactionCompletion {
        transaction_id: String,
        failures: Vec<ActivatorError>,
    },

    #[error("Configuration error: {component}: {message}")]
    Configuration { component: String, message: String },

    #[error("Invalid queue address '{address}': {reason}")]
    InvalidQueueAddress { address: String, reason: String },
}

impl ActivatorError {
    /// Create an invalid bus binding error
    pub fn invalid_bus_binding(message: impl Into<String>) -> Self {
        Self::InvalidBusBinding {
            message: message.into(),
        }
    }

    /// Create an already-bound error naming both buses
    pub fn bus_already_bound(bound: impl Into<String>, attempted: impl Into<String>) -> Self {
        Self::BusAlreadyBound {
            bound: bound.into(),
            attempted: attempted.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an invalid queue address error
    pub fn invalid_queue_address(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidQueueAddress {
            address: address.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error reports a misuse of the bus binding slot
    pub fn is_binding_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidBusBinding { .. } | Self::BusAlreadyBound { .. }
        )
    }
}

/// A single handler that failed to dispose during transaction cleanup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisposalFailure {
    /// Position of the handler in the resolved handler set
    pub position: usize,
    pub handler_name: String,
    pub reason: String,
}

impl fmt::Display for DisposalFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "handler #{} ({}): {}",
            self.position, self.handler_name, self.reason
        )
    }
}

impl From<config::ConfigError> for ActivatorError {
    fn from(err: config::ConfigError) -> Self {
        ActivatorError::configuration("config", err.to_string())
    }
}

/// Result type alias for activation operations
pub type Result<T> = std::result::Result<T, ActivatorError>;
