#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Bus Activator Core
//!
//! Handler activation core for a message bus client runtime.
//!
//! ## Overview
//!
//! Given an inbound message and the transaction it is processed in, the core
//! decides which registered handlers receive the message, builds the ones
//! that are produced per delivery, and arranges their disposal for when the
//! transaction completes. It also holds the one outbound bus facade the
//! handlers send through.
//!
//! ## Architecture
//!
//! ```text
//! HandlerActivator (ContainerAdapter)
//! ├── HandlerRegistry   instances + factories, resolve per delivery
//! └── BusBinding        set-once outbound bus slot
//!
//! delivery pipeline ──get_handlers──> [instances..., factory products...]
//!        │                                   │
//!        └──complete(transaction)──> dispose disposable handlers in order
//! ```
//!
//! ## Module Organization
//!
//! - [`activation`] - Public entry point and the container adapter seam
//! - [`registry`] - Handler producers, resolution and disposal
//! - [`handler`] - Handler and disposal capabilities
//! - [`transaction`] - Transaction context contract and delivery transaction
//! - [`bus`] - Outbound bus facade and its binding
//! - [`endpoint`] - Input queue address parsing
//! - [`config`] - Configuration loading
//! - [`logging`] - Structured logging
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust
//! use bus_activator::prelude::*;
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
//! let message = OrderPlaced { order_id: 42 };
//! let transaction = DeliveryTransaction::new();
//! for handler in activator.get_handlers(&message, &transaction).await? {
//!     handler.handle(&message).await?;
//! }
//! transaction.complete(TransactionOutcome::Committed).await?;
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod bus;
pub mod config;
pub mod constants;
pub mod endpoint;
pub mod error;
pub mod handler;
pub mod logging;
pub mod registry;
pub mod transaction;

pub use activation::{ContainerAdapter, HandlerActivator};
pub use bus::{AsAnyBus, Bus, BusBinding};
pub use config::{ActivatorConfig, ConfigManager, DisposalConfig, DisposalFailurePolicy};
pub use endpoint::QueueAddress;
pub use error::{ActivatorError, BoxError, DisposalFailure, Result};
pub use handler::{Dispose, FunctionHandler, HandleMessages, HandlerResult, Message, SharedHandler};
pub use registry::{HandlerRegistry, ProducerKind, RegistryStats};
pub use transaction::{
    CompletionAction, CompletionFuture, DeliveryTransaction, TransactionContext,
    TransactionOutcome,
};

/// Commonly used traits and types
pub mod prelude {
    pub use crate::activation::{ContainerAdapter, HandlerActivator};
    pub use crate::bus::Bus;
    pub use crate::handler::{Dispose, HandleMessages, HandlerResult, SharedHandler};
    pub use crate::transaction::{DeliveryTransaction, TransactionContext, TransactionOutcome};
}
