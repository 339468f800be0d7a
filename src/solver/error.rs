//! Solver error type

use super::engine::GameState;
use crate::core::CodeError;
use std::fmt;

/// Errors surfaced by the solving engine
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The pool was filtered to nothing: the feedback received so far is contradictory
    EmptyPool,
    /// A malformed code or index reached the engine
    Code(CodeError),
    /// The feedback collaborator could not supply a pattern
    Feedback(String),
    /// The first-guess cache could not be read or written
    Cache(String),
    /// A game operation was called in a state that does not allow it
    InvalidTransition {
        state: GameState,
        action: &'static str,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPool => write!(
                f,
                "No candidate codes remain; the feedback received is contradictory"
            ),
            Self::Code(err) => write!(f, "{err}"),
            Self::Feedback(msg) => write!(f, "Feedback unavailable: {msg}"),
            Self::Cache(msg) => write!(f, "First-guess cache error: {msg}"),
            Self::InvalidTransition { state, action } => {
                write!(f, "Cannot {action} while the game is {state:?}")
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Code(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CodeError> for SolverError {
    fn from(err: CodeError) -> Self {
        Self::Code(err)
    }
}
