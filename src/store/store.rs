use std::fmt;
use std::sync::{Arc, RwLock};

use parking_lot::ReentrantMutex;
use tracing::{debug, error, trace};

use super::{Actions, StateBuilder};
use crate::error::StateError;
use crate::listener::{Listener, ListenerFn};
use crate::middleware::{Middleware, MiddlewareFn};
use crate::reducer::Reducers;
use crate::registry::{read_lock, write_lock, Registry, Subscription};

struct Inner<T, P> {
    name: String,
    initial: T,
    value: RwLock<T>,
    // Serializes commits across threads; re-entrant so callbacks may dispatch.
    commit: ReentrantMutex<()>,
    reducers: Reducers<T, P>,
    listeners: Arc<Registry<ListenerFn<T>>>,
    middleware: Arc<Registry<MiddlewareFn<T, P>>>,
}

/// An observable value with named transitions.
///
/// Clones are cheap and share everything: value, listeners, middleware and
/// reducers. Callbacks may read, update or dispatch on the same state; such
/// calls run immediately, nested inside the outer one.
///
/// Each update, dispatch or reset runs as one step: on another thread, a
/// second dispatch waits until the first has committed and notified, so no
/// transition is computed from a stale value. The same thread may re-enter
/// freely.
///
/// Every notification pass iterates the listeners registered when the pass
/// started. A listener subscribed during a pass is first called on the next
/// one; a listener unsubscribed during a pass is still called in that pass if
/// it had not been reached yet. Middleware follows the same rule.
///
/// # Example
///
/// ```
/// use zentropy::{Reducers, State};
///
/// let state = State::with_reducers(
///     0,
///     Reducers::new().on("add", |n: &i32, by: Option<&i32>| n + by.copied().unwrap_or(1)),
/// );
///
/// state.subscribe(|n| println!("now {n}"));
/// state.dispatch("add", Some(5));
/// assert_eq!(state.value(), 5);
///
/// state.reset();
/// assert_eq!(state.value(), 0);
/// ```
pub struct State<T, P = ()> {
    inner: Arc<Inner<T, P>>,
}

impl<T> State<T, ()>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a state with no reducers.
    pub fn new(initial: T) -> Self {
        StateBuilder::new(initial).build()
    }
}

impl<T, P> State<T, P>
where
    T: Clone + Send + Sync + 'static,
    P: 'static,
{
    /// Create a state with a fixed transition table.
    pub fn with_reducers(initial: T, reducers: Reducers<T, P>) -> Self {
        StateBuilder::new(initial).reducers(reducers).build()
    }

    /// Start configuring a state.
    pub fn builder(initial: T) -> StateBuilder<T, P> {
        StateBuilder::new(initial)
    }

    pub(crate) fn from_parts(name: String, initial: T, reducers: Reducers<T, P>) -> Self {
        Self {
            inner: Arc::new(Inner {
                name,
                value: RwLock::new(initial.clone()),
                commit: ReentrantMutex::new(()),
                initial,
                reducers,
                listeners: Registry::new(),
                middleware: Registry::new(),
            }),
        }
    }

    /// Label used in diagnostics.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Get a clone of the current value.
    pub fn value(&self) -> T {
        read_lock(&self.inner.value).clone()
    }

    /// Run `f` on a snapshot of the current value.
    ///
    /// No lock is held while `f` runs, so it may update or dispatch; it keeps
    /// seeing the value as it was when `read` was called.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let value = self.value();
        f(&value)
    }

    /// The value captured at construction, restored by [`reset`](Self::reset).
    pub fn initial(&self) -> &T {
        &self.inner.initial
    }

    /// Subscribe a closure to every committed value.
    ///
    /// Each call registers a new observer, even for identical closures. Use
    /// [`subscribe_listener`](Self::subscribe_listener) for identity-based
    /// registration.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.subscribe_listener(&Listener::new(callback))
    }

    /// Subscribe `listener` unless it is already subscribed.
    pub fn subscribe_listener(&self, listener: &Listener<T>) -> Subscription {
        let subscription = self.inner.listeners.insert(Arc::clone(listener.callback()));
        trace!(state = %self.inner.name, ?subscription, "listener subscribed");
        subscription
    }

    /// Remove `listener`. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&self, listener: &Listener<T>) -> bool {
        let removed = self.inner.listeners.remove_callback(listener.callback());
        trace!(state = %self.inner.name, removed, "listener unsubscribed");
        removed
    }

    /// Replace the value and notify every listener.
    ///
    /// There is no equality check: an identical value still notifies.
    pub fn update(&self, value: T) -> T {
        let _commit = self.inner.commit.lock();
        *write_lock(&self.inner.value) = value.clone();
        self.notify(&value);
        value
    }

    fn notify(&self, value: &T) {
        let listeners = self.inner.listeners.snapshot();
        trace!(state = %self.inner.name, listeners = listeners.len(), "notifying listeners");
        for listener in listeners {
            listener(value);
        }
    }

    /// Run the reducer for `action` and commit its result.
    ///
    /// An unknown action is logged at `error` level and leaves the state
    /// untouched: no middleware runs and no listener is notified. Returns the
    /// committed value, or `None` for an unknown action.
    pub fn dispatch(&self, action: &str, payload: Option<P>) -> Option<T> {
        match self.try_dispatch(action, payload) {
            Ok(value) => Some(value),
            Err(err) => {
                error!(state = %self.inner.name, action = err.action(), "{err}");
                None
            }
        }
    }

    /// Like [`dispatch`](Self::dispatch), but hands the unknown-action error
    /// to the caller instead of logging it.
    pub fn try_dispatch(&self, action: &str, payload: Option<P>) -> Result<T, StateError> {
        let reducer = self
            .inner
            .reducers
            .get(action)
            .ok_or_else(|| StateError::UnknownAction {
                action: action.to_string(),
            })?;

        let _commit = self.inner.commit.lock();
        debug!(state = %self.inner.name, action, "dispatch");
        let current = self.value();
        let candidate = reducer(&current, payload.as_ref());

        for middleware in self.inner.middleware.snapshot() {
            middleware(&candidate, action, payload.as_ref());
        }

        Ok(self.update(candidate))
    }

    /// Restore the construction-time value and notify every listener.
    pub fn reset(&self) -> T {
        debug!(state = %self.inner.name, "reset");
        self.update(self.inner.initial.clone())
    }

    /// Register a middleware closure.
    pub fn use_middleware<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T, &str, Option<&P>) + Send + Sync + 'static,
    {
        self.use_shared_middleware(&Middleware::new(callback))
    }

    /// Register `middleware` unless it is already registered.
    pub fn use_shared_middleware(&self, middleware: &Middleware<T, P>) -> Subscription {
        let subscription = self
            .inner
            .middleware
            .insert(Arc::clone(middleware.callback()));
        debug!(state = %self.inner.name, ?subscription, "middleware registered");
        subscription
    }

    /// Remove `middleware`. Returns `false` if it was not registered.
    pub fn remove_middleware(&self, middleware: &Middleware<T, P>) -> bool {
        self.inner.middleware.remove_callback(middleware.callback())
    }

    /// A fresh invoker for every action in the transition table.
    pub fn actions(&self) -> Actions<T, P> {
        Actions::new(self)
    }

    /// Whether the transition table has a reducer for `action`.
    pub fn has_action(&self, action: &str) -> bool {
        self.inner.reducers.contains(action)
    }

    /// Action names in sorted order.
    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.inner.reducers.names()
    }

    /// Number of subscribed listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.len()
    }

    /// Number of registered middleware.
    pub fn middleware_count(&self) -> usize {
        self.inner.middleware.len()
    }
}

impl<T, P> Clone for State<T, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, P> fmt::Debug for State<T, P>
where
    T: Clone + Send + Sync + fmt::Debug + 'static,
    P: 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.inner.name)
            .field("value", &*read_lock(&self.inner.value))
            .field("reducers", &self.inner.reducers)
            .field("listeners", &self.listener_count())
            .field("middleware", &self.middleware_count())
            .finish()
    }
}

/// Create a state with a fixed transition table.
///
/// Same as [`State::with_reducers`].
pub fn make_state<T, P>(initial: T, reducers: Reducers<T, P>) -> State<T, P>
where
    T: Clone + Send + Sync + 'static,
    P: 'static,
{
    State::with_reducers(initial, reducers)
}
