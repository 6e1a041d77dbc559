//! # Handler Capabilities
//!
//! Traits that describe what a message handler can do.
//!
//! ## Overview
//!
//! A handler is any object implementing [`HandleMessages<M>`] for the message
//! type `M` it can process. Shared instances and factory-constructed handlers
//! satisfy the same trait, so the delivery pipeline never needs to know how a
//! handler was produced.
//!
//! Disposal is an optional second capability: a handler that holds resources
//! implements [`Dispose`] and returns itself from
//! [`HandleMessages::as_disposable`]. Handlers that do not opt in are left
//! untouched when the delivery's transaction completes.
//!
//! ## Usage
//!
//! ```rust
//! use bus_activator::handler::{Dispose, HandleMessages, HandlerResult};
//! use async_trait::async_trait;
//!
//! #[derive(Clone)]
//! struct OrderPlaced { order_id: u64 }
//!
//! struct OrderAuditor;
//!
//! #[async_trait]
//! impl HandleMessages<OrderPlaced> for OrderAuditor {
//!     async fn handle(&self, message: &OrderPlaced) -> HandlerResult<()> {
//!         println!("auditing order {}", message.order_id);
//!         Ok(())
//!     }
//!
//!     fn as_disposable(&self) -> Option<&dyn Dispose> {
//!         Some(self)
//!     }
//! }
//!
//! #[async_trait]
//! impl Dispose for OrderAuditor {
//!     async fn dispose(&self) -> HandlerResult<()> {
//!         Ok(())
//!     }
//! }
//! ```

pub mod function;

pub use function::FunctionHandler;

use crate::error::BoxError;
use async_trait::async_trait;
use std::sync::Arc;

/// Result type returned by handlers, factories and disposal
pub type HandlerResult<T> = std::result::Result<T, BoxError>;

/// Marker for types that can travel through the activation core
///
/// Implemented for every `Send + Sync + 'static` type.
pub trait Message: Send + Sync + 'static {}

impl<T> Message for T where T: Send + Sync + 'static {}

/// Capability to process messages of type `M`
///
/// Shared instances may be invoked concurrently by overlapping deliveries, so
/// implementations must tolerate reentry.
#[async_trait]
pub trait HandleMessages<M: Message>: Send + Sync + 'static {
    /// Handle one message
    async fn handle(&self, message: &M) -> HandlerResult<()>;

    /// Name used in logs and error reports
    fn handler_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Disposal capability, if this handler has one
    fn as_disposable(&self) -> Option<&dyn Dispose> {
        None
    }
}

/// Capability to release resources once a delivery's transaction completes
#[async_trait]
pub trait Dispose: Send + Sync {
    async fn dispose(&self) -> HandlerResult<()>;
}

/// A resolved handler, shared between the caller and the cleanup action
pub type SharedHandler<M> = Arc<dyn HandleMessages<M>>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone)]
    struct Ping;

    struct PlainHandler;

    #[async_trait]
    impl HandleMessages<Ping> for PlainHandler {
        async fn handle(&self, _message: &Ping) -> HandlerResult<()> {
            Ok(())
        }
    }

    struct ClosingHandler {
        closed: AtomicUsize,
    }

    #[async_trait]
    impl HandleMessages<Ping> for ClosingHandler {
        async fn handle(&self, _message: &Ping) -> HandlerResult<()> {
            Ok(())
        }

        fn handler_name(&self) -> &str {
            "closing"
        }

        fn as_disposable(&self) -> Option<&dyn Dispose> {
            Some(self)
        }
    }

    #[async_trait]
    impl Dispose for ClosingHandler {
        async fn dispose(&self) -> HandlerResult<()> {
            self.closed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_default_capabilities() {
        let handler: SharedHandler<Ping> = Arc::new(PlainHandler);
        assert!(handler.as_disposable().is_none());
        assert!(handler.handler_name().ends_with("PlainHandler"));
    }

    #[tokio::test]
    async fn test_disposal_capability() {
        let handler = Arc::new(ClosingHandler {
            closed: AtomicUsize::new(0),
        });
        let shared: SharedHandler<Ping> = handler.clone();

        assert_eq!(shared.handler_name(), "closing");
        shared.handle(&Ping).await.unwrap();

        let disposable = shared.as_disposable().expect("handler opts into disposal");
        disposable.dispose().await.unwrap();
        assert_eq!(handler.closed.load(Ordering::SeqCst), 1);
    }
}
