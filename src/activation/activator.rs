//! # Built-in Handler Activator
//!
//! Owns the handler registry and the bus binding.

use super::ContainerAdapter;
use crate::bus::{Bus, BusBinding};
use crate::config::ActivatorConfig;
use crate::constants::components;
use crate::error::{BoxError, Result};
use crate::handler::{HandleMessages, HandlerResult, Message, SharedHandler};
use crate::registry::{HandlerRegistry, RegistryStats};
use crate::transaction::TransactionContext;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use tracing::info;

/// Activator for applications that register handlers directly
///
/// Register handlers during setup (`&mut self`), then share the activator
/// (typically in an `Arc`) with the delivery pipeline. The bus can be bound
/// after sharing.
#[derive(Debug, Default)]
pub struct HandlerActivator {
    registry: HandlerRegistry,
    bus: BusBinding,
}

impl HandlerActivator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an activator using the disposal settings from `config`
    pub fn with_config(config: &ActivatorConfig) -> Self {
        Self {
            registry: HandlerRegistry::with_disposal_config(config.disposal.clone()),
            bus: BusBinding::new(),
        }
    }

    /// Register an async function as a shared handler for `M`
    pub fn handle<M, F, Fut>(&mut self, handler_function: F) -> &mut Self
    where
        M: Message + Clone,
        F: Fn(M) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult<()>> + Send + 'static,
    {
        self.registry.handle(handler_function);
        self
    }

    /// Register a shared handler instance for `M`
    pub fn register_instance<M: Message>(&mut self, handler: SharedHandler<M>) -> &mut Self {
        self.registry.register_instance(handler);
        self
    }

    /// Register a factory invoked on every resolution of `M`
    pub fn register<M, H, F>(&mut self, factory: F) -> &mut Self
    where
        M: Message,
        H: HandleMessages<M>,
        F: Fn() -> H + Send + Sync + 'static,
    {
        self.registry.register::<M, H, F>(factory);
        self
    }

    /// Register a fallible factory invoked on every resolution of `M`
    pub fn try_register<M, H, E, F>(&mut self, factory: F) -> &mut Self
    where
        M: Message,
        H: HandleMessages<M>,
        E: Into<BoxError> + 'static,
        F: Fn() -> std::result::Result<H, E> + Send + Sync + 'static,
    {
        self.registry.try_register::<M, H, E, F>(factory);
        self
    }

    /// Register an asynchronous factory invoked on every resolution of `M`
    pub fn register_async<M, H, F, Fut>(&mut self, factory: F) -> &mut Self
    where
        M: Message,
        H: HandleMessages<M>,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult<H>> + Send + 'static,
    {
        self.registry.register_async::<M, H, F, Fut>(factory);
        self
    }

    /// The bound bus, if any
    ///
    /// Handlers may run before the bus is bound and must tolerate `None`.
    pub fn bus(&self) -> Option<Arc<dyn Bus>> {
        self.bus.get()
    }

    /// The bound bus as its concrete type
    pub fn bus_as<B: Bus>(&self) -> Option<Arc<B>> {
        self.bus.get_as::<B>()
    }

    pub fn is_bus_bound(&self) -> bool {
        self.bus.is_bound()
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn stats(&self) -> RegistryStats {
        self.registry.stats()
    }

    /// Tear down the bound bus; no-op when none is bound
    ///
    /// Must be called at most once.
    pub async fn shutdown(&self) -> Result<()> {
        info!(
            component = components::ACTIVATOR,
            bus_bound = self.bus.is_bound(),
            "Shutting down handler activator"
        );
        self.bus.teardown().await
    }
}

#[async_trait]
impl ContainerAdapter for HandlerActivator {
    async fn get_handlers<M: Message>(
        &self,
        message: &M,
        transaction: &dyn TransactionContext,
    ) -> Result<Vec<SharedHandler<M>>> {
        self.registry.resolve(message, transaction).await
    }

    fn set_bus(&self, bus: Option<Arc<dyn Bus>>) -> Result<()> {
        self.bus.bind(bus)
    }
}
