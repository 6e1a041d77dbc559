//! # Handler Activation
//!
//! The public entry point a delivery pipeline talks to.
//!
//! ## Overview
//!
//! [`ContainerAdapter`] is the seam between a delivery pipeline and whatever
//! produces its handlers. [`HandlerActivator`] is the built-in adapter for
//! applications that register handlers directly instead of going through a
//! dependency-injection container.
//!
//! ## Usage
//!
//! ```rust
//! use bus_activator::activation::{ContainerAdapter, HandlerActivator};
//! use bus_activator::handler::HandleMessages;
//! use bus_activator::transaction::{DeliveryTransaction, TransactionOutcome};
//! use std::sync::Arc;
//!
//! #[derive(Clone)]
//! struct OrderPlaced { order_id: u64 }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let mut activator = HandlerActivator::new();
//! activator.handle(|order: OrderPlaced| async move {
//!     println!("order {} placed", order.order_id);
//!     Ok(())
//! });
//! let activator = Arc::new(activator);
//!
//! let message = OrderPlaced { order_id: 7 };
//! let transaction = DeliveryTransaction::new();
//! for handler in activator.get_handlers(&message, &transaction).await? {
//!     handler.handle(&message).await?;
//! }
//! transaction.complete(TransactionOutcome::Committed).await?;
//! # Ok(())
//! # }
//! ```

pub mod activator;

pub use activator::HandlerActivator;

use crate::bus::Bus;
use crate::error::Result;
use crate::handler::{Message, SharedHandler};
use crate::transaction::TransactionContext;
use async_trait::async_trait;
use std::sync::Arc;

/// Source of handlers for a delivery pipeline
#[async_trait]
pub trait ContainerAdapter: Send + Sync {
    /// Handlers that should process `message` within `transaction`
    async fn get_handlers<M: Message>(
        &self,
        message: &M,
        transaction: &dyn TransactionContext,
    ) -> Result<Vec<SharedHandler<M>>>;

    /// Bind the outbound bus; allowed exactly once
    fn set_bus(&self, bus: Option<Arc<dyn Bus>>) -> Result<()>;
}
