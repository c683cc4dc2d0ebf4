//! The process-wide event bus.
//!
//! Every function here goes through [`dispatcher`], the single place where the
//! shared [`EventDispatcher`] is created. Without an explicit [`init`] or
//! [`install`] it is created on first use with the default failure policy.
//! After that it is never replaced, so listeners registered from one module
//! see events emitted from any other.

use crate::registry::{Orbis, OrbisError};
use lithe_config::EventsSettings;
use lithe_events::{DispatchResult, Event, EventDispatcher, Listener};
use std::sync::Arc;

/// The shared dispatcher, created with defaults if nobody initialized it yet.
pub fn dispatcher() -> Arc<EventDispatcher> {
    Orbis::global().get_or_register::<EventDispatcher>()
}

/// Creates the shared dispatcher from configuration.
///
/// Must run before the first [`on`]/[`emit`]/[`off`]; fails if the shared
/// dispatcher already exists.
pub fn init(settings: &EventsSettings) -> Result<Arc<EventDispatcher>, OrbisError> {
    install(EventDispatcher::with_policy(settings.failure_policy))
}

/// Makes `dispatcher` the shared one. Same one-time contract as [`init`].
pub fn install(dispatcher: EventDispatcher) -> Result<Arc<EventDispatcher>, OrbisError> {
    let policy = dispatcher.policy();
    let installed = Orbis::global().register_instance(dispatcher)?;
    tracing::info!(?policy, "Installed shared event dispatcher");
    Ok(installed)
}

pub fn on(event_name: impl Into<String>, listener: Listener) -> DispatchResult<()> {
    dispatcher().on(event_name, listener)
}

pub fn emit(event: &Event) -> DispatchResult<()> {
    dispatcher().emit(event)
}

pub fn off(event_name: &str, listener: &Listener) {
    dispatcher().off(event_name, listener)
}
