//! # Function Handlers
//!
//! Adapter that turns an async function into a handler object.

use super::{HandleMessages, HandlerResult, Message};
use async_trait::async_trait;
use std::future::Future;
use std::marker::PhantomData;

/// Handler backed by a single-argument async function
///
/// The function receives its own copy of the message, which keeps the
/// returned future free of borrows.
pub struct FunctionHandler<M, F> {
    handler_function: F,
    name: String,
    _message: PhantomData<fn(M)>,
}

impl<M, F, Fut> FunctionHandler<M, F>
where
    M: Message + Clone,
    F: Fn(M) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult<()>> + Send + 'static,
{
    pub fn new(handler_function: F) -> Self {
        Self {
            handler_function,
            name: format!("fn({})", std::any::type_name::<M>()),
            _message: PhantomData,
        }
    }

    /// Override the name used in logs
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[async_trait]
impl<M, F, Fut> HandleMessages<M> for FunctionHandler<M, F>
where
    M: Message + Clone,
    F: Fn(M) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult<()>> + Send + 'static,
{
    async fn handle(&self, message: &M) -> HandlerResult<()> {
        (self.handler_function)(message.clone()).await
    }

    fn handler_name(&self) -> &str {
        &self.name
    }
}

impl<M, F> std::fmt::Debug for FunctionHandler<M, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionHandler")
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[derive(Clone)]
    struct Deposit {
        amount: u64,
    }

    #[tokio::test]
    async fn test_function_is_invoked_with_message() {
        let total = Arc::new(AtomicU64::new(0));
        let seen = total.clone();
        let handler = FunctionHandler::new(move |deposit: Deposit| {
            let seen = seen.clone();
            async move {
                seen.fetch_add(deposit.amount, Ordering::SeqCst);
                Ok(())
            }
        });

        handler.handle(&Deposit { amount: 40 }).await.unwrap();
        handler.handle(&Deposit { amount: 2 }).await.unwrap();

        assert_eq!(total.load(Ordering::SeqCst), 42);
    }

    #[tokio::test]
    async fn test_function_errors_propagate() {
        let handler = FunctionHandler::new(|_deposit: Deposit| async move {
            Err::<(), BoxError>("rejected".into())
        });

        let err = handler.handle(&Deposit { amount: 1 }).await.unwrap_err();
        assert_eq!(err.to_string(), "rejected");
    }

    #[test]
    fn test_function_handler_naming() {
        let handler = FunctionHandler::new(|_deposit: Deposit| async move { Ok(()) });
        assert!(handler.handler_name().starts_with("fn("));
        assert!(handler.handler_name().contains("Deposit"));

        let handler = handler.with_name("ledger");
        assert_eq!(handler.handler_name(), "ledger");
        assert!(handler.as_disposable().is_none());
    }
}
