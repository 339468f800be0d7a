//! Guess selection strategies
//!
//! Defines the Strategy trait and concrete implementations.

use crate::core::{Code, PatternMatrix};
use rand::Rng;
use std::fmt;

/// Score attached to a chosen guess
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    /// Expected information in bits
    Bits(f64),
    /// Worst-case remaining pool size
    WorstCase(usize),
}

impl Score {
    /// Numeric value of the score
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Bits(bits) => bits,
            Self::WorstCase(size) => size as f64,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bits(bits) => write!(f, "{bits:.3} bits"),
            Self::WorstCase(size) => write!(f, "worst case {size}"),
        }
    }
}

/// A chosen guess and its score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuessResult {
    pub guess: Code,
    pub score: Score,
}

/// A strategy for selecting the next guess from the pool of candidates
pub trait Strategy {
    /// Select the best guess from `pool`, whose all-pairs patterns are `matrix`
    ///
    /// Returns `None` if the pool is empty.
    fn select_guess(&self, pool: &[Code], matrix: &PatternMatrix) -> Option<GuessResult>;
}

/// Objective used to rank candidate guesses
///
/// Allows runtime selection of strategy while maintaining static dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Objective {
    /// Maximize expected information
    #[default]
    Entropy,
    /// Minimize the worst-case remaining pool
    Minimax,
    /// Uniformly random pool member
    Random,
}

impl Objective {
    /// Every objective, in display order
    pub const ALL: [Self; 3] = [Self::Entropy, Self::Minimax, Self::Random];

    /// Create objective from name string
    ///
    /// Supported names: "entropy" (or "entr"), "minimax", "random" (or "rand").
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "entropy" | "entr" => Some(Self::Entropy),
            "minimax" => Some(Self::Minimax),
            "random" | "rand" => Some(Self::Random),
            _ => None,
        }
    }

    /// Canonical name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Entropy => "entropy",
            Self::Minimax => "minimax",
            Self::Random => "random",
        }
    }

    /// Whether repeated selections over the same pool always agree
    #[must_use]
    pub const fn is_deterministic(self) -> bool {
        !matches!(self, Self::Random)
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Strategy for Objective {
    fn select_guess(&self, pool: &[Code], matrix: &PatternMatrix) -> Option<GuessResult> {
        match self {
            Self::Entropy => EntropyStrategy.select_guess(pool, matrix),
            Self::Minimax => MinimaxStrategy.select_guess(pool, matrix),
            Self::Random => RandomStrategy.select_guess(pool, matrix),
        }
    }
}

/// Pure entropy maximization strategy
///
/// Always selects the guess with the highest Shannon entropy.
pub struct EntropyStrategy;

impl Strategy for EntropyStrategy {
    fn select_guess(&self, pool: &[Code], matrix: &PatternMatrix) -> Option<GuessResult> {
        let (best, bits) = super::entropy::select_best_guess(matrix)?;
        Some(GuessResult {
            guess: pool[best],
            score: Score::Bits(bits),
        })
    }
}

/// Pure minimax strategy
///
/// Always selects the guess that minimizes worst-case remaining candidates.
pub struct MinimaxStrategy;

impl Strategy for MinimaxStrategy {
    fn select_guess(&self, pool: &[Code], matrix: &PatternMatrix) -> Option<GuessResult> {
        let (best, worst_case) = super::minimax::select_best_guess(matrix)?;
        Some(GuessResult {
            guess: pool[best],
            score: Score::WorstCase(worst_case),
        })
    }
}

/// Random strategy
///
/// Picks any pool member; the score is the entropy of the pick.
pub struct RandomStrategy;

impl RandomStrategy {
    /// Pick a uniformly random pool member and score it over `pool`
    ///
    /// Evaluates only the picked code's patterns, so no pool matrix is needed.
    /// Returns `None` if the pool is empty.
    #[must_use]
    pub fn pick(pool: &[Code]) -> Option<GuessResult> {
        if pool.is_empty() {
            return None;
        }
        let guess = pool[rand::rng().random_range(0..pool.len())];
        Some(GuessResult {
            guess,
            score: Score::Bits(super::entropy::calculate_entropy(&guess, pool)),
        })
    }
}

impl Strategy for RandomStrategy {
    fn select_guess(&self, pool: &[Code], _matrix: &PatternMatrix) -> Option<GuessResult> {
        Self::pick(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_pool() -> (Vec<Code>, PatternMatrix) {
        let pool: Vec<Code> = ["AAAA", "AAAB", "AABB", "ABBB", "BBBB"]
            .iter()
            .map(|s| Code::parse(s).unwrap())
            .collect();
        let matrix = PatternMatrix::evaluate(&pool);
        (pool, matrix)
    }

    #[test]
    fn entropy_strategy_selects_pool_member() {
        let (pool, matrix) = setup_pool();
        let result = EntropyStrategy.select_guess(&pool, &matrix).unwrap();
        assert!(pool.contains(&result.guess));
        assert!(matches!(result.score, Score::Bits(bits) if bits > 0.0));
    }

    #[test]
    fn minimax_strategy_selects_pool_member() {
        let (pool, matrix) = setup_pool();
        let result = MinimaxStrategy.select_guess(&pool, &matrix).unwrap();
        assert!(pool.contains(&result.guess));
        assert!(matches!(result.score, Score::WorstCase(n) if n >= 1 && n < pool.len()));
    }

    #[test]
    fn random_strategy_selects_pool_member() {
        let (pool, matrix) = setup_pool();
        for _ in 0..10 {
            let result = RandomStrategy.select_guess(&pool, &matrix).unwrap();
            assert!(pool.contains(&result.guess));
        }
    }

    #[test]
    fn strategies_return_none_on_empty_pool() {
        let matrix = PatternMatrix::evaluate(&[]);
        for objective in Objective::ALL {
            assert!(objective.select_guess(&[], &matrix).is_none());
        }
    }

    #[test]
    fn objective_from_name() {
        assert_eq!(Objective::from_name("entropy"), Some(Objective::Entropy));
        assert_eq!(Objective::from_name("ENTR"), Some(Objective::Entropy));
        assert_eq!(Objective::from_name("minimax"), Some(Objective::Minimax));
        assert_eq!(Objective::from_name("rand"), Some(Objective::Random));
        assert_eq!(Objective::from_name("adaptive"), None);
        for objective in Objective::ALL {
            assert_eq!(Objective::from_name(objective.name()), Some(objective));
        }
    }

    #[test]
    fn score_values() {
        assert!((Score::Bits(1.5).value() - 1.5).abs() < f64::EPSILON);
        assert!((Score::WorstCase(6).value() - 6.0).abs() < f64::EPSILON);
        assert_eq!(Score::WorstCase(6).to_string(), "worst case 6");
        assert_eq!(Score::Bits(1.0).to_string(), "1.000 bits");
    }
}
