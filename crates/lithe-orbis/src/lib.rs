pub mod events;
mod registry;

pub use registry::{Orbis, OrbisError};

use lithe_config::LitheConfig;
use lithe_events::EventDispatcher;
use std::sync::Arc;

/// Sets up logging and the shared event dispatcher for a host application.
///
/// Call once from the composition root, before any module touches [`events`].
/// A tracing subscriber installed earlier by the host is left in place.
pub fn bootstrap(config: &LitheConfig) -> anyhow::Result<Arc<EventDispatcher>> {
    if let Err(e) = lithe_telemetry::try_init_subscriber(&config.telemetry) {
        tracing::debug!("Keeping existing tracing subscriber: {}", e);
    }

    Ok(events::init(&config.events)?)
}
