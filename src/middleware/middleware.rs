use std::fmt;
use std::sync::Arc;

pub(crate) type MiddlewareFn<T, P> = dyn Fn(&T, &str, Option<&P>) + Send + Sync;

/// A shareable dispatch interceptor.
///
/// Called with `(candidate, action, payload)`. Like [`Listener`](crate::Listener),
/// clones share identity, so registering the same middleware twice is a no-op.
pub struct Middleware<T, P = ()> {
    callback: Arc<MiddlewareFn<T, P>>,
}

impl<T, P> Middleware<T, P> {
    /// Wrap `callback` in a new middleware identity.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&T, &str, Option<&P>) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Invoke the callback directly.
    pub fn call(&self, candidate: &T, action: &str, payload: Option<&P>) {
        (self.callback)(candidate, action, payload)
    }

    pub(crate) fn callback(&self) -> &Arc<MiddlewareFn<T, P>> {
        &self.callback
    }
}

impl<T, P> Clone for Middleware<T, P> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<T, P> fmt::Debug for Middleware<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware")
            .field("ptr", &Arc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}
