//! Feedback sources
//!
//! A game asks a [`FeedbackSource`] for the pattern its guess earned. Self-play
//! evaluates the guess against a known secret; interactive play asks a person
//! (see `commands::play`); scripted feedback replays recorded patterns.

use super::engine::Game;
use super::error::SolverError;
use super::strategy::GuessResult;
use crate::core::{Code, Pattern};
use std::collections::VecDeque;

/// Supplier of feedback patterns
///
/// Implementations hand back only well-formed patterns; malformed input is
/// re-requested by the implementation itself, never passed on.
pub trait FeedbackSource {
    /// Feedback for `guess` in the current state of `game`
    ///
    /// # Errors
    /// Returns `SolverError::Feedback` if no pattern can be obtained at all.
    fn feedback(&mut self, guess: &GuessResult, game: &Game<'_>) -> Result<Pattern, SolverError>;

    /// The secret, when the source knows it
    fn secret(&self) -> Option<Code> {
        None
    }
}

/// Self-play feedback against a fixed secret
#[derive(Debug, Clone, Copy)]
pub struct SecretFeedback {
    secret: Code,
}

impl SecretFeedback {
    #[must_use]
    pub const fn new(secret: Code) -> Self {
        Self { secret }
    }
}

impl FeedbackSource for SecretFeedback {
    fn feedback(&mut self, guess: &GuessResult, _game: &Game<'_>) -> Result<Pattern, SolverError> {
        Ok(Pattern::calculate(&guess.guess, &self.secret))
    }

    fn secret(&self) -> Option<Code> {
        Some(self.secret)
    }
}

/// Replays a fixed sequence of patterns
#[derive(Debug, Clone, Default)]
pub struct ScriptedFeedback {
    patterns: VecDeque<Pattern>,
}

impl ScriptedFeedback {
    #[must_use]
    pub fn new(patterns: impl IntoIterator<Item = Pattern>) -> Self {
        Self {
            patterns: patterns.into_iter().collect(),
        }
    }
}

impl FeedbackSource for ScriptedFeedback {
    fn feedback(&mut self, _guess: &GuessResult, _game: &Game<'_>) -> Result<Pattern, SolverError> {
        self.patterns
            .pop_front()
            .ok_or_else(|| SolverError::Feedback("feedback script exhausted".to_string()))
    }
}
