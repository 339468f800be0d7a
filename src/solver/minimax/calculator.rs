//! Minimax worst-case calculation for Mastermind patterns
//!
//! Given a guess and a pool of candidates, computes the maximum remaining
//! candidates for any possible pattern.

use crate::core::{Code, PATTERN_COUNT, Pattern};

/// Largest bucket of a pattern distribution
#[inline]
#[must_use]
pub fn max_partition(distribution: &[usize]) -> usize {
    distribution.iter().copied().max().unwrap_or(0)
}

/// Calculate the maximum remaining candidates for a guess
///
/// Returns the worst-case number of remaining candidates after this guess.
///
/// # Strategy
/// For each possible pattern that could result from this guess:
/// - Count how many candidates would produce that pattern
/// - Return the maximum count (worst case)
///
/// # Examples
/// ```
/// use mastermind_solver::core::Code;
/// use mastermind_solver::solver::minimax::calculate_max_remaining;
///
/// let guess = Code::parse("AABB").unwrap();
/// let candidates = vec![Code::parse("ABCD").unwrap(), Code::parse("BBAA").unwrap()];
///
/// let max_remaining = calculate_max_remaining(&guess, &candidates);
/// assert!(max_remaining <= 2); // Can't be more than total candidates
/// ```
#[must_use]
pub fn calculate_max_remaining(guess: &Code, candidates: &[Code]) -> usize {
    let mut counts = [0usize; PATTERN_COUNT];
    for candidate in candidates {
        counts[Pattern::calculate(guess, candidate).index()] += 1;
    }
    max_partition(&counts)
}
