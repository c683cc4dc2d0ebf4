use crate::event::Payload;
use std::fmt;
use std::sync::Arc;

pub type ListenerResult = anyhow::Result<()>;

type Callback = dyn Fn(&Payload) -> ListenerResult + Send + Sync;

/// A handle to a callback registered on an [`EventDispatcher`](crate::EventDispatcher).
///
/// Handles are cheap to clone. Clones share identity, which is what
/// [`EventDispatcher::off`](crate::EventDispatcher::off) matches on: keep a clone
/// of the handle you registered to remove it later.
#[derive(Clone)]
pub struct Listener {
    callback: Arc<Callback>,
}

impl Listener {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&Payload) -> ListenerResult + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Wraps a callback that cannot fail.
    pub fn from_fn<F>(callback: F) -> Self
    where
        F: Fn(&Payload) + Send + Sync + 'static,
    {
        Self::new(move |payload| {
            callback(payload);
            Ok(())
        })
    }

    pub fn call(&self, payload: &Payload) -> ListenerResult {
        (self.callback)(payload)
    }

    /// Identity comparison. Two separately constructed listeners wrapping
    /// equivalent closures are never the same listener.
    pub fn same_as(&self, other: &Listener) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.callback) as *const (),
            Arc::as_ptr(&other.callback) as *const (),
        )
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for Listener {}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener")
            .field(&(Arc::as_ptr(&self.callback) as *const ()))
            .finish()
    }
}
