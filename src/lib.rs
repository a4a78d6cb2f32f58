//! # Zentropy
//!
//! A minimal observable state container for Rust.
//!
//! A [`State`] holds one value and tells its listeners whenever that value is
//! replaced. Changes happen in two ways:
//!
//! - [`State::update`] replaces the value directly.
//! - [`State::dispatch`] runs a named reducer from a fixed transition table
//!   and commits its result. Middleware registered with
//!   [`State::use_middleware`] sees the candidate value first.
//!
//! Everything is synchronous: a call returns only after every listener has
//! run. Callbacks may dispatch on the same state; the nested call runs
//! immediately.
//!
//! ```
//! use zentropy::{make_state, Reducers};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Session {
//!     user: String,
//!     online: bool,
//! }
//!
//! let session = make_state(
//!     Session { user: "evrick".into(), online: false },
//!     Reducers::new()
//!         .on("login", |s: &Session, _: Option<&()>| Session { online: true, ..s.clone() })
//!         .on("logout", |s: &Session, _: Option<&()>| Session { online: false, ..s.clone() }),
//! );
//!
//! let sub = session.subscribe(|s| println!("{} online: {}", s.user, s.online));
//! session.actions().get("login").unwrap().invoke();
//! assert!(session.value().online);
//!
//! sub.unsubscribe();
//! session.reset();
//! assert!(!session.value().online);
//! ```
//!
//! Unknown actions are reported through [`tracing`] at `error` level and
//! otherwise ignored. Use [`State::try_dispatch`] to get a [`StateError`]
//! instead.

pub mod error;
mod listener;
pub mod middleware;
mod reducer;
pub mod registry;
pub mod store;

// Re-export main types for convenience
pub use error::StateError;
pub use listener::Listener;
pub use middleware::Middleware;
pub use reducer::Reducers;
pub use registry::Subscription;
pub use store::{make_state, ActionInvoker, Actions, State, StateBuilder};
