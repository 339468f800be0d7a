//! Minimax-based Mastermind solver
//!
//! Implements worst-case minimization strategy for Mastermind solving.

mod calculator;
mod selector;

pub use calculator::{calculate_max_remaining, max_partition};
pub use selector::{pool_worst_cases, select_best_guess};
