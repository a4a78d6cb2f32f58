use super::State;
use crate::listener::Listener;
use crate::middleware::Middleware;
use crate::reducer::Reducers;

const DEFAULT_NAME: &str = "state";

/// Configures a [`State`] before it is created.
///
/// The transition table can only be filled in here; [`build`](Self::build)
/// freezes it.
///
/// ```
/// use zentropy::{middleware, State};
///
/// let state = State::builder(0)
///     .name("counter")
///     .reducer("increment", |n: &i32, _: Option<&()>| n + 1)
///     .middleware(middleware::logging())
///     .build();
///
/// state.dispatch("increment", None);
/// assert_eq!(state.value(), 1);
/// ```
pub struct StateBuilder<T, P = ()> {
    initial: T,
    name: String,
    reducers: Reducers<T, P>,
    listeners: Vec<Listener<T>>,
    middleware: Vec<Middleware<T, P>>,
}

impl<T, P> StateBuilder<T, P>
where
    T: Clone + Send + Sync + 'static,
    P: 'static,
{
    /// Start from `initial` with no reducers, listeners or middleware.
    pub fn new(initial: T) -> Self {
        Self {
            initial,
            name: DEFAULT_NAME.to_string(),
            reducers: Reducers::new(),
            listeners: Vec::new(),
            middleware: Vec::new(),
        }
    }

    /// Label used in diagnostics. Defaults to `"state"`.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add one reducer.
    pub fn reducer<F>(mut self, action: impl Into<String>, reducer: F) -> Self
    where
        F: Fn(&T, Option<&P>) -> T + Send + Sync + 'static,
    {
        self.reducers = self.reducers.on(action, reducer);
        self
    }

    /// Add every reducer in `reducers`, replacing same-named ones.
    pub fn reducers(mut self, reducers: Reducers<T, P>) -> Self {
        self.reducers.merge(reducers);
        self
    }

    /// Subscribe `listener` as soon as the state exists.
    pub fn listener(mut self, listener: Listener<T>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Register `middleware` as soon as the state exists.
    pub fn middleware(mut self, middleware: Middleware<T, P>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Create the state, then register the collected listeners and middleware.
    pub fn build(self) -> State<T, P> {
        let state = State::from_parts(self.name, self.initial, self.reducers);
        for listener in &self.listeners {
            state.subscribe_listener(listener);
        }
        for middleware in &self.middleware {
            state.use_shared_middleware(middleware);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn defaults() {
        let state = StateBuilder::<i32>::new(7).build();
        assert_eq!(state.name(), "state");
        assert_eq!(state.value(), 7);
        assert_eq!(state.actions().len(), 0);
        assert_eq!(state.listener_count(), 0);
    }

    #[test]
    fn registers_listeners_and_middleware_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let listener = Listener::new(move |_: &i32| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });
        let mw = Middleware::new(|_: &i32, _: &str, _: Option<&()>| {});

        let state = StateBuilder::new(0)
            .reducer("inc", |n: &i32, _: Option<&()>| n + 1)
            .listener(listener.clone())
            .listener(listener)
            .middleware(mw.clone())
            .middleware(mw)
            .build();

        assert_eq!(state.listener_count(), 1);
        assert_eq!(state.middleware_count(), 1);

        state.dispatch("inc", None);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reducer_tables_merge() {
        let state = StateBuilder::new(2)
            .reducer("square", |n: &i32, _: Option<&()>| n * n)
            .reducers(Reducers::new().on("negate", |n: &i32, _: Option<&()>| -n))
            .build();

        assert_eq!(state.action_names().collect::<Vec<_>>(), vec!["negate", "square"]);
        state.dispatch("square", None);
        state.dispatch("negate", None);
        assert_eq!(state.value(), -4);
    }
}
