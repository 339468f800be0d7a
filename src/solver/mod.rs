//! Mastermind solving algorithms
//!
//! Guess selection objectives, the first-guess cache and the game engine.

pub mod cache;
mod engine;
pub mod entropy;
mod error;
pub mod feedback;
pub mod minimax;
mod selector;
mod statistics;
pub mod strategy;

pub use cache::{CachedGuess, FirstGuessCache, FirstGuessStore, JsonFileStore, MemoryStore};
pub use engine::{
    Game, GameRecord, GameState, OpeningMode, Round, Solver, SolverConfig, fixed_opener, solve_all,
};
pub use error::SolverError;
pub use feedback::{FeedbackSource, ScriptedFeedback, SecretFeedback};
pub use selector::{GuessSelector, best_guess};
pub use statistics::SolveAllStatistics;
pub use strategy::{
    EntropyStrategy, GuessResult, MinimaxStrategy, Objective, RandomStrategy, Score, Strategy,
};
