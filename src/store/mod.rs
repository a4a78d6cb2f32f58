//! The state container.
//!
//! A [`State`] owns one value, the observers of that value, the middleware
//! that intercepts dispatches, and a fixed table of reducers. Changes are made
//! either by replacing the value directly or by dispatching a named action.

mod actions;
mod builder;
mod store;

pub use actions::{ActionInvoker, Actions};
pub use builder::StateBuilder;
pub use store::{make_state, State};
