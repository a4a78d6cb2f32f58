//! Error types.

use thiserror::Error;

/// Errors surfaced by [`State::try_dispatch`](crate::State::try_dispatch).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// The action name has no reducer in the transition table.
    #[error("reducer {action} not found")]
    UnknownAction { action: String },
}

impl StateError {
    /// The action name this error refers to.
    pub fn action(&self) -> &str {
        match self {
            Self::UnknownAction { action } => action,
        }
    }
}
