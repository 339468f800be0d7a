//! Minimax-based guess selection strategy
//!
//! Selects the pool member that minimizes the worst-case remaining candidates.

use super::calculator::max_partition;
use crate::core::PatternMatrix;
use crate::solver::entropy::pattern_distribution;
use rayon::prelude::*;

/// Worst-case remaining pool size of every pool member, in pool order
#[must_use]
pub fn pool_worst_cases(matrix: &PatternMatrix) -> Vec<usize> {
    matrix
        .par_rows()
        .map(|row| max_partition(&pattern_distribution(row)))
        .collect()
}

/// Select best guess by minimizing worst-case remaining candidates
///
/// Returns the pool index with the lowest maximum bucket and that bucket size,
/// or `None` if the pool is empty. Ties go to the earliest pool member.
///
/// # Examples
/// ```
/// use mastermind_solver::core::{Code, PatternMatrix};
/// use mastermind_solver::solver::minimax::select_best_guess;
///
/// let pool: Vec<Code> = ["AABB", "AAAA", "BBBB"]
///     .iter()
///     .map(|s| Code::parse(s).unwrap())
///     .collect();
/// let matrix = PatternMatrix::evaluate(&pool);
///
/// let (best, worst_case) = select_best_guess(&matrix).unwrap();
/// // AABB cannot tell AAAA from BBBB; AAAA splits all three apart
/// assert_eq!(pool[best].to_string(), "AAAA");
/// assert_eq!(worst_case, 1);
/// ```
#[must_use]
pub fn select_best_guess(matrix: &PatternMatrix) -> Option<(usize, usize)> {
    pool_worst_cases(matrix)
        .into_iter()
        .enumerate()
        .min_by_key(|&(_, worst_case)| worst_case)
}
