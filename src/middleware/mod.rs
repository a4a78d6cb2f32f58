//! Dispatch interceptors.
//!
//! Middleware sees every dispatched action after its reducer has produced the
//! candidate value and before that value is committed. It cannot change the
//! value; it exists for side effects such as logging.

mod logging;
mod middleware;

pub use logging::logging;
pub use middleware::Middleware;
pub(crate) use middleware::MiddlewareFn;
