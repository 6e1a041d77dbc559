//! # Handler Registry
//!
//! Registration and per-delivery resolution of message handlers.
//!
//! ## Overview
//!
//! The registry keeps two append-only sequences: shared handler instances and
//! handler factories. Resolving a message type yields the matching instances
//! in registration order followed by freshly constructed factory products in
//! registration order, and attaches their disposal to the delivery's
//! transaction context.
//!
//! ## Key Features
//!
//! - **Two registration styles** behind one handler trait
//! - **Capability matching** by message type, no common base type required
//! - **All-or-nothing construction**: a failing factory fails the resolution
//! - **Lock-free resolution**: registration needs `&mut self`, resolution only
//!   `&self`, so a registry shared after setup is read concurrently without
//!   locking
//!
//! ## Usage
//!
//! ```rust
//! use bus_activator::handler::HandleMessages;
//! use bus_activator::registry::HandlerRegistry;
//! use bus_activator::transaction::{DeliveryTransaction, TransactionOutcome};
//!
//! #[derive(Clone)]
//! struct OrderPlaced { order_id: u64 }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let mut registry = HandlerRegistry::new();
//! registry.handle(|order: OrderPlaced| async move {
//!     println!("order {} placed", order.order_id);
//!     Ok(())
//! });
//!
//! let message = OrderPlaced { order_id: 7 };
//! let transaction = DeliveryTransaction::new();
//! for handler in registry.resolve(&message, &transaction).await? {
//!     handler.handle(&message).await?;
//! }
//! transaction.complete(TransactionOutcome::Committed).await?;
//! # Ok(())
//! # }
//! ```

use super::disposal::{dispose_handlers, DisposalPlan};
use super::producer::{
    FactoryFuture, FactoryProducer, HandlerFactoryFn, InstanceProducer, ProducerKind,
};
use crate::config::DisposalConfig;
use crate::constants::components;
use crate::error::{ActivatorError, BoxError, Result};
use crate::handler::{FunctionHandler, HandleMessages, HandlerResult, Message, SharedHandler};
use crate::logging::log_registry_operation;
use crate::transaction::{CompletionFuture, TransactionContext};
use futures::FutureExt;
use std::any::type_name;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error};

/// Registry statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryStats {
    pub instance_producers: usize,
    pub factory_producers: usize,
    /// Distinct message type names with at least one producer, sorted
    pub message_types: Vec<&'static str>,
}

/// Registry of handler producers
#[derive(Default)]
pub struct HandlerRegistry {
    instances: Vec<InstanceProducer>,
    factories: Vec<FactoryProducer>,
    disposal: DisposalConfig,
}

impl HandlerRegistry {
    /// Create an empty registry with default disposal settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with explicit disposal settings
    pub fn with_disposal_config(disposal: DisposalConfig) -> Self {
        Self {
            disposal,
            ..Self::default()
        }
    }

    pub fn disposal_config(&self) -> &DisposalConfig {
        &self.disposal
    }

    /// Register a shared handler instance for `M`
    ///
    /// Duplicates are allowed; each registration is resolved separately.
    pub fn register_instance<M: Message>(&mut self, handler: SharedHandler<M>) -> &mut Self {
        let producer = InstanceProducer::new(handler);
        log_registry_operation(
            "register_instance",
            producer.message_type_name(),
            ProducerKind::Instance.as_str(),
            "registered",
            Some(producer.handler_name()),
        );
        self.instances.push(producer);
        self
    }

    /// Register an async function as a shared handler for `M`
    pub fn handle<M, F, Fut>(&mut self, handler_function: F) -> &mut Self
    where
        M: Message + Clone,
        F: Fn(M) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult<()>> + Send + 'static,
    {
        self.register_instance::<M>(Arc::new(FunctionHandler::new(handler_function)))
    }

    /// Register an infallible factory invoked on every resolution of `M`
    pub fn register<M, H, F>(&mut self, factory: F) -> &mut Self
    where
        M: Message,
        H: HandleMessages<M>,
        F: Fn() -> H + Send + Sync + 'static,
    {
        self.push_factory::<M, H>(Arc::new(move || -> FactoryFuture<M> {
            let handler: SharedHandler<M> = Arc::new(factory());
            futures::future::ready(Ok(handler)).boxed()
        }))
    }

    /// Register a fallible factory invoked on every resolution of `M`
    pub fn try_register<M, H, E, F>(&mut self, factory: F) -> &mut Self
    where
        M: Message,
        H: HandleMessages<M>,
        E: Into<BoxError> + 'static,
        F: Fn() -> std::result::Result<H, E> + Send + Sync + 'static,
    {
        self.push_factory::<M, H>(Arc::new(move || -> FactoryFuture<M> {
            let built = factory()
                .map(|handler| Arc::new(handler) as SharedHandler<M>)
                .map_err(Into::into);
            futures::future::ready(built).boxed()
        }))
    }

    /// Register an asynchronous factory invoked on every resolution of `M`
    pub fn register_async<M, H, F, Fut>(&mut self, factory: F) -> &mut Self
    where
        M: Message,
        H: HandleMessages<M>,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult<H>> + Send + 'static,
    {
        self.push_factory::<M, H>(Arc::new(move || -> FactoryFuture<M> {
            factory()
                .map(|built| built.map(|handler| Arc::new(handler) as SharedHandler<M>))
                .boxed()
        }))
    }

    fn push_factory<M: Message, H>(&mut self, factory: HandlerFactoryFn<M>) -> &mut Self {
        let producer = FactoryProducer::new::<M, H>(factory);
        log_registry_operation(
            "register_factory",
            producer.message_type_name(),
            ProducerKind::Factory.as_str(),
            "registered",
            Some(producer.handler_type_name()),
        );
        self.factories.push(producer);
        self
    }

    /// Resolve the handlers for one delivery of `M`
    ///
    /// Returns matching instances in registration order followed by freshly
    /// built factory products in registration order, and registers their
    /// disposal with `transaction`. An empty set is a valid result.
    pub async fn resolve<M: Message>(
        &self,
        _message: &M,
        transaction: &dyn TransactionContext,
    ) -> Result<Vec<SharedHandler<M>>> {
        let message_type = type_name::<M>();

        let constructed = self.construct_from_factories::<M>(message_type).await?;

        let mut handlers: Vec<SharedHandler<M>> = self
            .instances
            .iter()
            .filter_map(InstanceProducer::handler_for::<M>)
            .collect();
        let shared_count = handlers.len();
        handlers.extend(constructed);

        debug!(
            message_type = %message_type,
            instances = shared_count,
            constructed = handlers.len() - shared_count,
            "Resolved handlers"
        );

        let to_dispose = if self.disposal.dispose_shared_instances {
            handlers.clone()
        } else {
            handlers[shared_count..].to_vec()
        };
        let plan = DisposalPlan::new(to_dispose, message_type, self.disposal.failure_policy);
        if !plan.is_empty() {
            transaction.on_completed(Box::new(move || -> CompletionFuture {
                Box::pin(plan.execute())
            }));
        }

        Ok(handlers)
    }

    async fn construct_from_factories<M: Message>(
        &self,
        message_type: &'static str,
    ) -> Result<Vec<SharedHandler<M>>> {
        let mut constructed: Vec<SharedHandler<M>> = Vec::new();

        for (position, producer) in self.factories.iter().enumerate() {
            let Some(factory) = producer.factory_for::<M>() else {
                continue;
            };

            match factory().await {
                Ok(handler) => constructed.push(handler),
                Err(source) => {
                    error!(
                        component = components::REGISTRY,
                        message_type = %message_type,
                        handler_type = producer.handler_type_name(),
                        position = position,
                        error = %source,
                        "Handler factory failed; aborting resolution"
                    );
                    // Nothing built by this resolution may outlive it.
                    dispose_handlers(&constructed, message_type).await;
                    return Err(ActivatorError::FactoryConstruction {
                        message_type,
                        handler_type: producer.handler_type_name(),
                        position,
                        source,
                    });
                }
            }
        }

        Ok(constructed)
    }

    /// Number of producers of either form registered for `M`
    pub fn producer_count<M: Message>(&self) -> usize {
        let instances = self
            .instances
            .iter()
            .filter(|producer| producer.handler_for::<M>().is_some())
            .count();
        let factories = self
            .factories
            .iter()
            .filter(|producer| producer.factory_for::<M>().is_some())
            .count();
        instances + factories
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty() && self.factories.is_empty()
    }

    /// Get registry statistics
    pub fn stats(&self) -> RegistryStats {
        let mut message_types: Vec<&'static str> = self
            .instances
            .iter()
            .map(InstanceProducer::message_type_name)
            .chain(self.factories.iter().map(FactoryProducer::message_type_name))
            .collect();
        message_types.sort_unstable();
        message_types.dedup();

        RegistryStats {
            instance_producers: self.instances.len(),
            factory_producers: self.factories.len(),
            message_types,
        }
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("instances", &self.instances)
            .field("factories", &self.factories)
            .field("disposal", &self.disposal)
            .finish()
    }
}
