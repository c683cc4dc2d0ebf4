mod dispatcher;
mod error;
mod event;
mod listener;

pub use dispatcher::{EventDispatcher, FailurePolicy};
pub use error::{DispatchError, DispatchResult, ListenerFailure};
pub use event::{Event, Payload};
pub use listener::{Listener, ListenerResult};
