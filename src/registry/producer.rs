//! # Handler Producers
//!
//! The two registration forms kept by the registry. Each producer remembers
//! the message type it was registered for and stores its handler (or its
//! constructor) type-erased; resolution recovers the `M`-typed form with a
//! downcast, which is the capability check.

use crate::handler::{HandlerResult, Message, SharedHandler};
use futures::future::BoxFuture;
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Future returned by a normalised factory
pub type FactoryFuture<M> = BoxFuture<'static, HandlerResult<SharedHandler<M>>>;

/// Constructor invoked once per resolution
pub type HandlerFactoryFn<M> = Arc<dyn Fn() -> FactoryFuture<M> + Send + Sync>;

/// Which registration form a producer uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProducerKind {
    Instance,
    Factory,
}

impl ProducerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProducerKind::Instance => "instance",
            ProducerKind::Factory => "factory",
        }
    }
}

impl fmt::Display for ProducerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single, already-constructed handler shared by every delivery
pub struct InstanceProducer {
    message_type: TypeId,
    message_type_name: &'static str,
    handler_name: String,
    handler: Box<dyn Any + Send + Sync>,
}

impl InstanceProducer {
    pub fn new<M: Message>(handler: SharedHandler<M>) -> Self {
        Self {
            message_type: TypeId::of::<M>(),
            message_type_name: type_name::<M>(),
            handler_name: handler.handler_name().to_string(),
            handler: Box::new(handler),
        }
    }

    /// The shared handler, if this producer handles `M`
    pub fn handler_for<M: Message>(&self) -> Option<SharedHandler<M>> {
        if self.message_type != TypeId::of::<M>() {
            return None;
        }
        self.handler.downcast_ref::<SharedHandler<M>>().cloned()
    }

    pub fn message_type_name(&self) -> &'static str {
        self.message_type_name
    }

    pub fn handler_name(&self) -> &str {
        &self.handler_name
    }
}

impl fmt::Debug for InstanceProducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceProducer")
            .field("message_type", &self.message_type_name)
            .field("handler", &self.handler_name)
            .finish()
    }
}

/// A constructor producing a fresh handler on every resolution
pub struct FactoryProducer {
    message_type: TypeId,
    message_type_name: &'static str,
    handler_type_name: &'static str,
    factory: Box<dyn Any + Send + Sync>,
}

impl FactoryProducer {
    /// Wrap a normalised factory; `H` is the concrete handler type it builds
    pub fn new<M: Message, H>(factory: HandlerFactoryFn<M>) -> Self {
        Self {
            message_type: TypeId::of::<M>(),
            message_type_name: type_name::<M>(),
            handler_type_name: type_name::<H>(),
            factory: Box::new(factory),
        }
    }

    /// The constructor, if this producer builds handlers for `M`
    pub fn factory_for<M: Message>(&self) -> Option<&HandlerFactoryFn<M>> {
        if self.message_type != TypeId::of::<M>() {
            return None;
        }
        self.factory.downcast_ref::<HandlerFactoryFn<M>>()
    }

    pub fn message_type_name(&self) -> &'static str {
        self.message_type_name
    }

    pub fn handler_type_name(&self) -> &'static str {
        self.handler_type_name
    }
}

impl fmt::Debug for FactoryProducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryProducer")
            .field("message_type", &self.message_type_name)
            .field("handler_type", &self.handler_type_name)
            .finish()
    }
}
