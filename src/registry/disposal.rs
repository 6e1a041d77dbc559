//! # Handler Disposal
//!
//! Cleanup of a resolved handler set once its delivery's transaction
//! completes. Entries are visited in resolved-set order; each one exposing
//! the disposal capability is disposed exactly once, and a failure on one
//! entry never stops the attempts on the rest.

use crate::config::DisposalFailurePolicy;
use crate::constants::components;
use crate::error::{ActivatorError, DisposalFailure, Result};
use crate::handler::{Message, SharedHandler};
use crate::logging::log_error;
use tracing::debug;

/// Dispose every disposable handler, collecting failures
pub(crate) async fn dispose_handlers<M: Message>(
    handlers: &[SharedHandler<M>],
    message_type: &str,
) -> Vec<DisposalFailure> {
    let mut failures = Vec::new();
    let mut disposed = 0usize;

    for (position, handler) in handlers.iter().enumerate() {
        let Some(disposable) = handler.as_disposable() else {
            continue;
        };

        match disposable.dispose().await {
            Ok(()) => disposed += 1,
            Err(e) => {
                let context = format!(
                    "message_type={message_type} position={position} handler={}",
                    handler.handler_name()
                );
                log_error(components::REGISTRY, "dispose", &e.to_string(), Some(&context));
                failures.push(DisposalFailure {
                    position,
                    handler_name: handler.handler_name().to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    debug!(
        message_type = %message_type,
        handlers = handlers.len(),
        disposed = disposed,
        failed = failures.len(),
        "Disposed resolved handlers"
    );

    failures
}

/// Deferred disposal of one resolved handler set
pub(crate) struct DisposalPlan<M: Message> {
    handlers: Vec<SharedHandler<M>>,
    message_type: &'static str,
    policy: DisposalFailurePolicy,
}

impl<M: Message> DisposalPlan<M> {
    pub(crate) fn new(
        handlers: Vec<SharedHandler<M>>,
        message_type: &'static str,
        policy: DisposalFailurePolicy,
    ) -> Self {
        Self {
            handlers,
            message_type,
            policy,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub(crate) async fn execute(self) -> Result<()> {
        let failures = dispose_handlers(&self.handlers, self.message_type).await;

        if failures.is_empty() || self.policy == DisposalFailurePolicy::LogAndContinue {
            return Ok(());
        }

        Err(ActivatorError::Disposal {
            message_type: self.message_type.to_string(),
            failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{Dispose, HandleMessages, HandlerResult};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone)]
    struct Tick;

    struct Probe {
        label: &'static str,
        disposable: bool,
        fail: bool,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl HandleMessages<Tick> for Probe {
        async fn handle(&self, _message: &Tick) -> HandlerResult<()> {
            Ok(())
        }

        fn handler_name(&self) -> &str {
            self.label
        }

        fn as_disposable(&self) -> Option<&dyn Dispose> {
            if self.disposable {
                Some(self)
            } else {
                None
            }
        }
    }

    #[async_trait]
    impl Dispose for Probe {
        async fn dispose(&self) -> HandlerResult<()> {
            self.log.lock().push(self.label);
            if self.fail {
                return Err(format!("{} refused", self.label).into());
            }
            Ok(())
        }
    }

    fn probe(
        log: &Arc<Mutex<Vec<&'static str>>>,
        label: &'static str,
        disposable: bool,
        fail: bool,
    ) -> SharedHandler<Tick> {
        Arc::new(Probe {
            label,
            disposable,
            fail,
            log: log.clone(),
        })
    }

    #[tokio::test]
    async fn test_disposes_in_order_and_skips_non_disposable() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let handlers = vec![
            probe(&log, "a", true, false),
            probe(&log, "b", false, false),
            probe(&log, "c", true, false),
        ];

        let failures = dispose_handlers(&handlers, "Tick").await;

        assert!(failures.is_empty());
        assert_eq!(*log.lock(), vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_remaining_disposals() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let handlers = vec![
            probe(&log, "a", true, true),
            probe(&log, "b", true, false),
            probe(&log, "c", true, true),
        ];

        let failures = dispose_handlers(&handlers, "Tick").await;

        assert_eq!(*log.lock(), vec!["a", "b", "c"]);
        let positions: Vec<usize> = failures.iter().map(|f| f.position).collect();
        assert_eq!(positions, vec![0, 2]);
        assert_eq!(failures[0].reason, "a refused");
    }

    #[tokio::test]
    async fn test_plan_aggregates_failures() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let plan = DisposalPlan::new(
            vec![probe(&log, "a", true, true), probe(&log, "b", true, true)],
            "Tick",
            DisposalFailurePolicy::Aggregate,
        );
        assert!(!plan.is_empty());

        match plan.execute().await {
            Err(ActivatorError::Disposal {
                message_type,
                failures,
            }) => {
                assert_eq!(message_type, "Tick");
                assert_eq!(failures.len(), 2);
            }
            other => panic!("expected aggregated disposal failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_plan_log_and_continue_reports_success() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let plan = DisposalPlan::new(
            vec![probe(&log, "a", true, true), probe(&log, "b", true, false)],
            "Tick",
            DisposalFailurePolicy::LogAndContinue,
        );

        plan.execute().await.unwrap();
        assert_eq!(*log.lock(), vec!["a", "b"]);
    }
}
