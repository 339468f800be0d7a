//! Code solving command
//!
//! Solves a given (or random) secret and returns the solution path.

use crate::core::{Code, Pattern};
use crate::solver::entropy::{GuessMetrics, calculate_metrics};
use crate::solver::{GameState, Score, Solver, SolverError};
use rand::seq::IndexedRandom;

/// Configuration for solving a code
pub struct SolveConfig {
    /// Secret to solve; a random pool member when `None`
    pub secret: Option<String>,
}

impl SolveConfig {
    #[must_use]
    pub const fn new(secret: Option<String>) -> Self {
        Self { secret }
    }
}

/// Result of solving a code
pub struct SolveResult {
    pub secret: Code,
    pub steps: Vec<GuessStep>,
    pub success: bool,
}

/// A single guess step in the solution
pub struct GuessStep {
    pub guess: Code,
    pub score: Score,
    pub pattern: Pattern,
    pub pool_before: usize,
    pub pool_after: usize,
    /// Metrics of the guess over the pool it was played against
    pub metrics: GuessMetrics,
}

/// Solve a code with the given solver
///
/// # Errors
///
/// Returns an error if:
/// - The secret is not a valid code for the solver's color count
/// - The solver cannot provide a valid guess
pub fn solve_code(config: &SolveConfig, solver: &Solver) -> Result<SolveResult, SolverError> {
    let secret = match &config.secret {
        Some(text) => solver.space().parse(text)?,
        None => *solver
            .initial_pool()
            .choose(&mut rand::rng())
            .ok_or(SolverError::EmptyPool)?,
    };

    let mut game = solver.new_game();
    let mut steps = Vec::new();

    loop {
        let guess = game.next_guess()?;
        let metrics = calculate_metrics(&guess.guess, game.pool());
        let pattern = Pattern::calculate(&guess.guess, &secret);
        let pool_before = game.pool().len();

        let state = game.submit_feedback(pattern)?;
        steps.push(GuessStep {
            guess: guess.guess,
            score: guess.score,
            pattern,
            pool_before,
            pool_after: game.pool().len(),
            metrics,
        });

        if state == GameState::Solved {
            return Ok(SolveResult {
                secret,
                steps,
                success: true,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::SolverConfig;

    fn solver(colors: u8) -> Solver {
        Solver::new(SolverConfig::new(colors)).unwrap()
    }

    #[test]
    fn solve_code_succeeds() {
        let result = solve_code(&SolveConfig::new(Some("fade".to_string())), &solver(6)).unwrap();

        assert!(result.success);
        assert_eq!(result.secret.to_string(), "FADE");
        assert_eq!(result.steps.last().map(|s| s.guess), Some(result.secret));
        assert!(result.steps.last().unwrap().pattern.is_perfect());
    }

    #[test]
    fn solve_records_history() {
        let result = solve_code(&SolveConfig::new(Some("ABBA".to_string())), &solver(4)).unwrap();

        assert_eq!(result.steps[0].pool_before, 256);
        for step in &result.steps {
            assert!(step.pool_after <= step.pool_before);
            assert!(step.metrics.max_partition >= step.pool_after);
        }
        for pair in result.steps.windows(2) {
            assert_eq!(pair[0].pool_after, pair[1].pool_before);
        }
    }

    #[test]
    fn solve_random_secret() {
        let result = solve_code(&SolveConfig::new(None), &solver(3)).unwrap();
        assert!(result.success);
        assert!(solver(3).space().contains(&result.secret));
    }

    #[test]
    fn solve_invalid_secret_returns_error() {
        assert!(solve_code(&SolveConfig::new(Some("ABCZ".to_string())), &solver(4)).is_err());
        assert!(solve_code(&SolveConfig::new(Some("ABCE".to_string())), &solver(4)).is_err());
        assert!(solve_code(&SolveConfig::new(Some("ABC".to_string())), &solver(4)).is_err());
    }
}
