use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("event name must not be empty")]
    EmptyEventName,

    #[error("listener #{index} for '{event}' failed: {source}")]
    ListenerFailed {
        event: String,
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("{} of the listeners for '{event}' failed", failures.len())]
    ListenersFailed {
        event: String,
        failures: Vec<ListenerFailure>,
    },
}

/// One failed invocation collected under [`FailurePolicy::Isolate`](crate::FailurePolicy::Isolate).
#[derive(Debug)]
pub struct ListenerFailure {
    /// Position of the listener in its bucket at the time of the emit.
    pub index: usize,
    pub error: anyhow::Error,
}

impl DispatchError {
    /// Number of listeners whose failure is reported by this error.
    pub fn failure_count(&self) -> usize {
        match self {
            Self::EmptyEventName => 0,
            Self::ListenerFailed { .. } => 1,
            Self::ListenersFailed { failures, .. } => failures.len(),
        }
    }
}

pub type DispatchResult<T> = std::result::Result<T, DispatchError>;
