//! # Bus Facade
//!
//! The outbound sending facade is opaque to the activation core: it is held,
//! handed to whoever asks for it, and told to tear down when the activator
//! shuts down. Nothing else is ever called on it.

pub mod binding;

pub use binding::BusBinding;

use crate::handler::HandlerResult;
use async_trait::async_trait;
use std::any::Any;
use std::sync::Arc;

/// Upcast of a shared bus to `Any`, implemented for every [`Bus`]
pub trait AsAnyBus: Send + Sync + 'static {
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<B: Bus> AsAnyBus for B {
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Outbound bus facade
///
/// Stored type-erased; handlers get their concrete facade back through
/// [`BusBinding::get_as`].
#[async_trait]
pub trait Bus: AsAnyBus {
    /// Name used in diagnostics
    fn bus_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Release the bus and everything it owns
    async fn dispose(&self) -> HandlerResult<()>;
}
