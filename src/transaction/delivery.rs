//! # Delivery Transaction
//!
//! Ordered completion-callback list for one message delivery.

use super::{CompletionAction, TransactionContext, TransactionOutcome};
use crate::error::{ActivatorError, Result};
use parking_lot::Mutex;
use std::time::Instant;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Transaction scope for a single delivery
///
/// Completion consumes the transaction, so its actions run at most once.
pub struct DeliveryTransaction {
    id: Uuid,
    started_at: Instant,
    actions: Mutex<Vec<CompletionAction>>,
}

impl DeliveryTransaction {
    /// Create a new transaction with a fresh id
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Instant::now(),
            actions: Mutex::new(Vec::new()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Number of actions waiting for completion
    pub fn pending_actions(&self) -> usize {
        self.actions.lock().len()
    }

    /// Complete the transaction, running every registered action in order
    ///
    /// Actions run for both outcomes. A failing action does not stop the
    /// remaining ones; failures are returned after all actions have run.
    pub async fn complete(self, outcome: TransactionOutcome) -> Result<()> {
        let actions = std::mem::take(&mut *self.actions.lock());
        let action_count = actions.len();

        let mut failures = Vec::new();
        for action in actions {
            if let Err(e) = action().await {
                error!(
                    transaction_id = %self.id,
                    outcome = %outcome,
                    error = %e,
                    "Completion action failed"
                );
                failures.push(e);
            }
        }

        debug!(
            transaction_id = %self.id,
            outcome = %outcome,
            actions = action_count,
            failed = failures.len(),
            elapsed_ms = self.started_at.elapsed().as_millis() as u64,
            "Transaction completed"
        );

        match failures.len() {
            0 => Ok(()),
            1 => Err(failures.remove(0)),
            _ => Err(ActivatorError::TransactionCompletion {
                transaction_id: self.id.to_string(),
                failures,
            }),
        }
    }
}

impl Default for DeliveryTransaction {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionContext for DeliveryTransaction {
    fn on_completed(&self, action: CompletionAction) {
        self.actions.lock().push(action);
    }
}

impl Drop for DeliveryTransaction {
    fn drop(&mut self) {
        let pending = self.actions.get_mut().len();
        if pending > 0 {
            warn!(
                transaction_id = %self.id,
                pending_actions = pending,
                "Transaction dropped without completion; cleanup actions discarded"
            );
        }
    }
}

impl std::fmt::Debug for DeliveryTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryTransaction")
            .field("id", &self.id)
            .field("pending_actions", &self.pending_actions())
            .finish()
    }
}
