//! Identity-keyed callback sets.
//!
//! Listeners and middleware are kept in a [`Registry`], which hands out a
//! [`Subscription`] for every registration so the caller can remove exactly
//! that callback later.

mod registry;

pub(crate) use registry::{read_lock, write_lock, Registry};
pub use registry::Subscription;
