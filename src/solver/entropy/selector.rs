//! Pure entropy-based guess selection
//!
//! Selects the pool member that maximizes Shannon entropy (expected information gain).

use super::calculator::{pattern_distribution, shannon_entropy};
use crate::core::PatternMatrix;
use rayon::prelude::*;

/// Entropies closer than this count as equal
const TIE_TOLERANCE: f64 = 1e-9;

/// Entropy of every pool member over the pool, in pool order
#[must_use]
pub fn pool_entropies(matrix: &PatternMatrix) -> Vec<f64> {
    matrix
        .par_rows()
        .map(|row| shannon_entropy(&pattern_distribution(row)))
        .collect()
}

/// Select best guess by maximizing entropy
///
/// Returns the pool index with the highest entropy and that entropy,
/// or `None` if the pool is empty. Ties go to the earliest pool member.
///
/// # Examples
/// ```
/// use mastermind_solver::core::{Code, PatternMatrix};
/// use mastermind_solver::solver::entropy::select_best_guess;
///
/// let pool: Vec<Code> = ["AAAA", "AAAB", "AABB", "ABBB", "BBBB"]
///     .iter()
///     .map(|s| Code::parse(s).unwrap())
///     .collect();
/// let matrix = PatternMatrix::evaluate(&pool);
///
/// let (best, entropy) = select_best_guess(&matrix).unwrap();
/// assert!(best < pool.len());
/// assert!(entropy > 0.0);
/// ```
#[must_use]
pub fn select_best_guess(matrix: &PatternMatrix) -> Option<(usize, f64)> {
    let entropies = pool_entropies(matrix);

    let mut best: Option<(usize, f64)> = None;
    for (index, entropy) in entropies.into_iter().enumerate() {
        match best {
            Some((_, top)) if entropy <= top + TIE_TOLERANCE => {}
            _ => best = Some((index, entropy)),
        }
    }
    best
}
