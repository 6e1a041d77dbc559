//! # Bus Binding
//!
//! Set-once slot for the outbound bus facade.

use super::Bus;
use crate::constants::components;
use crate::error::{ActivatorError, Result};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// Holds the bus facade once it is bound
///
/// The slot can be filled exactly once; concurrent binds race safely and
/// only the first one wins.
#[derive(Default)]
pub struct BusBinding {
    slot: OnceLock<Arc<dyn Bus>>,
}

impl BusBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the bus facade
    ///
    /// Fails when `bus` is `None` or a bus is already bound; in both cases
    /// the currently bound bus stays in place.
    pub fn bind(&self, bus: Option<Arc<dyn Bus>>) -> Result<()> {
        let bus = bus.ok_or_else(|| {
            ActivatorError::invalid_bus_binding(
                "a bus instance must be provided in order to bind it",
            )
        })?;

        let attempted = bus.bus_name().to_string();
        match self.slot.set(bus) {
            Ok(()) => {
                info!(component = components::BUS_BINDING, bus = %attempted, "Bus bound");
                Ok(())
            }
            Err(_rejected) => {
                let bound = self
                    .slot
                    .get()
                    .map(|bound| bound.bus_name().to_string())
                    .unwrap_or_default();
                Err(ActivatorError::bus_already_bound(bound, attempted))
            }
        }
    }

    /// The bound bus, if any
    pub fn get(&self) -> Option<Arc<dyn Bus>> {
        self.slot.get().cloned()
    }

    /// The bound bus as its concrete type
    ///
    /// `None` when unbound or when the bound bus is not a `B`.
    pub fn get_as<B: Bus>(&self) -> Option<Arc<B>> {
        self.get()?.into_any().downcast::<B>().ok()
    }

    pub fn is_bound(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Forward teardown to the bound bus; no-op when unbound
    pub async fn teardown(&self) -> Result<()> {
        let Some(bus) = self.slot.get() else {
            debug!(component = components::BUS_BINDING, "No bus bound; nothing to tear down");
            return Ok(());
        };

        bus.dispose()
            .await
            .map_err(|source| ActivatorError::BusTeardown {
                bus: bus.bus_name().to_string(),
                source,
            })?;

        info!(component = components::BUS_BINDING, bus = %bus.bus_name(), "Bus disposed");
        Ok(())
    }
}

impl std::fmt::Debug for BusBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusBinding")
            .field("bus", &self.slot.get().map(|bus| bus.bus_name().to_string()))
            .finish()
    }
}
