use std::fmt::Debug;

use tracing::debug;

use super::Middleware;

/// Middleware that logs each dispatched action at `debug` level.
///
/// # Example
///
/// ```
/// use zentropy::{middleware, Reducers, State};
///
/// let state = State::with_reducers(0, Reducers::new().on("increment", |n: &i32, _: Option<&()>| n + 1));
/// state.use_shared_middleware(&middleware::logging());
/// state.dispatch("increment", None);
/// assert_eq!(state.value(), 1);
/// ```
pub fn logging<T, P>() -> Middleware<T, P>
where
    T: Debug + 'static,
    P: Debug + 'static,
{
    Middleware::new(|candidate: &T, action: &str, payload: Option<&P>| {
        debug!(action, ?payload, ?candidate, "dispatching action");
    })
}
