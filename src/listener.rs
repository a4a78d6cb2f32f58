use std::fmt;
use std::sync::Arc;

pub(crate) type ListenerFn<T> = dyn Fn(&T) + Send + Sync;

/// A shareable observer callback.
///
/// Closures have no identity of their own, so a `Listener` carries it: clones
/// of one `Listener` are the same observer. Subscribing the same listener twice
/// registers it once, and [`State::unsubscribe`](crate::State::unsubscribe)
/// removes it by identity.
pub struct Listener<T> {
    callback: Arc<ListenerFn<T>>,
}

impl<T> Listener<T> {
    /// Wrap `callback` in a new listener identity.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Invoke the callback directly.
    pub fn call(&self, value: &T) {
        (self.callback)(value)
    }

    pub(crate) fn callback(&self) -> &Arc<ListenerFn<T>> {
        &self.callback
    }
}

impl<T> Clone for Listener<T> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<T> fmt::Debug for Listener<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("ptr", &Arc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}
