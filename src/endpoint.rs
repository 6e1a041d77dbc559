//! # Endpoint Addresses
//!
//! Parsing of the input queue setting into a local or remote queue address.
//!
//! A plain name (`orders.input`) refers to a private queue on the local
//! machine. A name containing `@` is split into exactly two tokens; the first
//! token is placed in the machine position and the second in the queue
//! position of the rendered path.

use crate::error::{ActivatorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const PRIVATE_QUEUE_SEGMENT: &str = r"private$";
const LOCAL_MACHINE: &str = ".";

/// Address of an endpoint's input queue
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueueAddress {
    Local { queue: String },
    Remote { machine: String, queue: String },
}

impl QueueAddress {
    /// Parse an input queue setting
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ActivatorError::invalid_queue_address(
                input,
                "queue name must not be empty",
            ));
        }

        if !trimmed.contains('@') {
            return Ok(QueueAddress::Local {
                queue: trimmed.to_string(),
            });
        }

        let tokens: Vec<&str> = trimmed.split('@').collect();
        if tokens.len() != 2 {
            return Err(ActivatorError::invalid_queue_address(
                input,
                format!("expected exactly one '@', found {}", tokens.len() - 1),
            ));
        }
        if tokens.iter().any(|token| token.trim().is_empty()) {
            return Err(ActivatorError::invalid_queue_address(
                input,
                "both sides of '@' must be non-empty",
            ));
        }

        Ok(QueueAddress::Remote {
            machine: tokens[0].trim().to_string(),
            queue: tokens[1].trim().to_string(),
        })
    }

    pub fn queue(&self) -> &str {
        match self {
            QueueAddress::Local { queue } | QueueAddress::Remote { queue, .. } => queue,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, QueueAddress::Local { .. })
    }

    /// Render the transport path of this queue
    pub fn path(&self) -> String {
        match self {
            QueueAddress::Local { queue } => {
                format!(r"{LOCAL_MACHINE}\{PRIVATE_QUEUE_SEGMENT}\{queue}")
            }
            QueueAddress::Remote { machine, queue } => {
                format!(r"{machine}\{PRIVATE_QUEUE_SEGMENT}\{queue}")
            }
        }
    }
}

impl FromStr for QueueAddress {
    type Err = ActivatorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for QueueAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
