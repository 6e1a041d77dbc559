//! # Transaction Context
//!
//! The per-delivery scope the activation core attaches cleanup to.
//!
//! ## Overview
//!
//! The core only needs one thing from a transaction: a place to register a
//! cleanup action that runs exactly once when the delivery completes,
//! whether it was committed or aborted. [`TransactionContext`] is that
//! contract; [`DeliveryTransaction`] is the in-crate implementation used by
//! delivery pipelines that do not bring their own.
//!
//! ```text
//! get_handlers() ──> on_completed(dispose resolved handlers)
//!        │
//! invoke handlers
//!        │
//! complete(Committed | Aborted) ──> run every action in registration order
//! ```

pub mod delivery;

pub use delivery::DeliveryTransaction;

use crate::error::Result;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Future produced by a completion action
pub type CompletionFuture = BoxFuture<'static, Result<()>>;

/// Cleanup action run once at transaction completion
pub type CompletionAction = Box<dyn FnOnce() -> CompletionFuture + Send>;

/// Scope that signals a single completion event per delivery
pub trait TransactionContext: Send + Sync {
    /// Register an action to run when the transaction completes
    fn on_completed(&self, action: CompletionAction);
}

/// How a delivery's transaction ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionOutcome {
    Committed,
    Aborted,
}

impl fmt::Display for TransactionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionOutcome::Committed => write!(f, "committed"),
            TransactionOutcome::Aborted => write!(f, "aborted"),
        }
    }
}
