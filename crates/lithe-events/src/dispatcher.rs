use crate::error::{DispatchError, DispatchResult, ListenerFailure};
use crate::event::Event;
use crate::listener::Listener;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What `emit` does when a listener returns an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failing listener and return its error. Listeners
    /// after it are not invoked for that emit.
    #[default]
    Abort,
    /// Invoke every listener and report all failures together.
    Isolate,
}

/// Synchronous name-keyed event dispatcher.
///
/// Listeners for one event name are invoked on the emitting thread, in the
/// order they were registered. Panics raised by a listener are not caught.
pub struct EventDispatcher {
    listeners: RwLock<HashMap<String, Vec<Listener>>>,
    policy: FailurePolicy,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::with_policy(FailurePolicy::default())
    }

    pub fn with_policy(policy: FailurePolicy) -> Self {
        Self {
            listeners: RwLock::new(HashMap::new()),
            policy,
        }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Appends `listener` to the bucket for `event_name`.
    ///
    /// Registering the same handle twice is allowed; it is then invoked twice per emit.
    pub fn on(&self, event_name: impl Into<String>, listener: Listener) -> DispatchResult<()> {
        let event_name = event_name.into();
        if event_name.is_empty() {
            return Err(DispatchError::EmptyEventName);
        }

        let mut listeners = self.listeners.write();
        let bucket = listeners.entry(event_name.clone()).or_default();
        bucket.push(listener);
        tracing::debug!(event = %event_name, count = bucket.len(), "Registered event listener");
        Ok(())
    }

    /// Invokes every listener registered for `event`'s name with its payload.
    ///
    /// The bucket is snapshotted before the first invocation, so listeners may
    /// register or remove listeners on this dispatcher; those changes apply
    /// from the next emit on.
    pub fn emit(&self, event: &Event) -> DispatchResult<()> {
        let snapshot = match self.listeners.read().get(event.name()) {
            Some(bucket) => bucket.clone(),
            None => {
                tracing::trace!(event = event.name(), "No listeners for event");
                return Ok(());
            }
        };

        tracing::debug!(
            event = event.name(),
            listeners = snapshot.len(),
            "Dispatching event"
        );

        let mut failures = Vec::new();
        for (index, listener) in snapshot.iter().enumerate() {
            if let Err(error) = listener.call(event.payload()) {
                tracing::warn!(event = event.name(), index, "Listener failed: {:#}", error);
                match self.policy {
                    FailurePolicy::Abort => {
                        return Err(DispatchError::ListenerFailed {
                            event: event.name().to_string(),
                            index,
                            source: error,
                        });
                    }
                    FailurePolicy::Isolate => failures.push(ListenerFailure { index, error }),
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(DispatchError::ListenersFailed {
                event: event.name().to_string(),
                failures,
            })
        }
    }

    /// Removes every registration of `listener` (by identity) under `event_name`.
    pub fn off(&self, event_name: &str, listener: &Listener) {
        let mut listeners = self.listeners.write();
        let Some(bucket) = listeners.get_mut(event_name) else {
            return;
        };

        let before = bucket.len();
        bucket.retain(|registered| !registered.same_as(listener));
        let removed = before - bucket.len();

        if bucket.is_empty() {
            listeners.remove(event_name);
        }
        if removed > 0 {
            tracing::debug!(event = event_name, removed, "Removed event listener");
        }
    }

    pub fn listener_count(&self, event_name: &str) -> usize {
        self.listeners
            .read()
            .get(event_name)
            .map_or(0, |bucket| bucket.len())
    }

    pub fn has_listeners(&self, event_name: &str) -> bool {
        self.listener_count(event_name) > 0
    }

    /// Names with at least one listener, sorted.
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.listeners.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn remove_all(&self, event_name: &str) {
        self.listeners.write().remove(event_name);
    }

    pub fn clear(&self) {
        self.listeners.write().clear();
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("events", &self.event_names())
            .field("policy", &self.policy)
            .finish()
    }
}
