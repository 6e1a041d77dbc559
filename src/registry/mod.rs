//! # Registry Infrastructure
//!
//! Handler registration and per-delivery handler resolution.
//!
//! ## Architecture
//!
//! ```text
//! HandlerRegistry
//! ├── instances   (InstanceProducer, shared across deliveries)
//! ├── factories   (FactoryProducer, invoked on every resolution)
//! └── disposal    (DisposalPlan, run at transaction completion)
//! ```

mod disposal;
pub mod handler_registry;
pub mod producer;

pub use handler_registry::{HandlerRegistry, RegistryStats};
pub use producer::{FactoryFuture, FactoryProducer, HandlerFactoryFn, InstanceProducer, ProducerKind};
