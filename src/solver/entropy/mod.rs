//! Entropy-based Mastermind solver
//!
//! Implements Shannon entropy calculation for Mastermind pattern distributions.
//! This is the foundation of information-theoretic solving.

mod calculator;
mod selector;

pub use calculator::{
    Distribution, GuessMetrics, calculate_entropy, calculate_metrics, metrics_from_distribution,
    pattern_distribution, shannon_entropy,
};
pub use selector::{pool_entropies, select_best_guess};
