//! Shannon entropy calculation for Mastermind patterns
//!
//! Given a guess and a pool of candidates, computes the expected information gain.

use crate::core::{Code, PATTERN_COUNT, Pattern};
use rustc_hash::FxHashMap;

/// Number of pool members producing each pattern value
pub type Distribution = [usize; PATTERN_COUNT];

/// Comprehensive metrics for evaluating a guess
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuessMetrics {
    /// Shannon entropy (expected information gain in bits)
    pub entropy: f64,
    /// Expected number of remaining candidates after this guess
    pub expected_remaining: f64,
    /// Maximum partition size (worst-case remaining candidates)
    pub max_partition: usize,
}

/// Histogram of the patterns in one matrix row
///
/// # Examples
/// ```
/// use mastermind_solver::core::Pattern;
/// use mastermind_solver::solver::entropy::pattern_distribution;
///
/// let row = [Pattern::PERFECT, Pattern::new(0), Pattern::new(0)];
/// let distribution = pattern_distribution(&row);
/// assert_eq!(distribution[20], 1);
/// assert_eq!(distribution[0], 2);
/// ```
#[must_use]
pub fn pattern_distribution(row: &[Pattern]) -> Distribution {
    let mut distribution = [0usize; PATTERN_COUNT];
    for pattern in row {
        distribution[pattern.index()] += 1;
    }
    distribution
}

/// Calculate Shannon entropy from pattern counts
///
/// H = -Σ p × log₂(p), with p = count / total over the nonzero counts.
///
/// # Properties
/// - Returns 0.0 for a certain outcome (one pattern with p=1) or no counts at all
/// - Maximized for a uniform distribution
/// - Always in range [0, log₂(n)] for n nonzero counts
///
/// # Examples
/// ```
/// use mastermind_solver::solver::entropy::shannon_entropy;
///
/// let entropy = shannon_entropy(&[25, 25, 0, 25, 25]);
/// assert!((entropy - 2.0).abs() < 0.001); // log2(4) = 2 bits
/// ```
#[must_use]
pub fn shannon_entropy(counts: &[usize]) -> f64 {
    let total = counts.iter().sum::<usize>() as f64;

    if total == 0.0 {
        return 0.0;
    }

    counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Entropy, expected remaining size and worst case of one distribution
#[must_use]
pub fn metrics_from_distribution(distribution: &[usize]) -> GuessMetrics {
    let total = distribution.iter().sum::<usize>();
    if total == 0 {
        return GuessMetrics {
            entropy: 0.0,
            expected_remaining: 0.0,
            max_partition: 0,
        };
    }

    let expected_remaining = distribution
        .iter()
        .map(|&count| count as f64 * count as f64 / total as f64)
        .sum();

    GuessMetrics {
        entropy: shannon_entropy(distribution),
        expected_remaining,
        max_partition: distribution.iter().copied().max().unwrap_or(0),
    }
}

/// Calculate Shannon entropy for a guess against candidates
///
/// Returns the expected information gain in bits. Evaluates each pair with
/// the scalar evaluator; selectors work from a precomputed matrix instead.
///
/// # Examples
/// ```
/// use mastermind_solver::core::Code;
/// use mastermind_solver::solver::entropy::calculate_entropy;
///
/// let guess = Code::parse("AABB").unwrap();
/// let candidates = vec![Code::parse("AABB").unwrap(), Code::parse("CCCC").unwrap()];
///
/// let entropy = calculate_entropy(&guess, &candidates);
/// assert!((entropy - 1.0).abs() < 1e-9); // two equally likely outcomes
/// ```
#[must_use]
pub fn calculate_entropy(guess: &Code, candidates: &[Code]) -> f64 {
    if candidates.is_empty() {
        return 0.0;
    }

    let counts: Vec<usize> = group_by_pattern(guess, candidates).into_values().collect();
    shannon_entropy(&counts)
}

/// Calculate comprehensive metrics for a guess
///
/// Returns entropy, expected remaining candidates, and max partition size.
#[must_use]
pub fn calculate_metrics(guess: &Code, candidates: &[Code]) -> GuessMetrics {
    let counts: Vec<usize> = group_by_pattern(guess, candidates).into_values().collect();
    metrics_from_distribution(&counts)
}

/// Group candidates by the pattern they produce with the guess
fn group_by_pattern(guess: &Code, candidates: &[Code]) -> FxHashMap<Pattern, usize> {
    let mut counts = FxHashMap::default();

    for candidate in candidates {
        let pattern = Pattern::calculate(guess, candidate);
        *counts.entry(pattern).or_insert(0) += 1;
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CodeSpace;

    fn codes(texts: &[&str]) -> Vec<Code> {
        texts.iter().map(|s| Code::parse(s).unwrap()).collect()
    }

    #[test]
    fn shannon_entropy_uniform_distribution() {
        let entropy = shannon_entropy(&[1, 1, 1, 1]);
        assert!((entropy - 2.0).abs() < 0.001);
    }

    #[test]
    fn shannon_entropy_certain_outcome() {
        let entropy = shannon_entropy(&[0, 10, 0]);
        assert!(entropy.abs() < 0.001);
    }

    #[test]
    fn shannon_entropy_skewed_distribution() {
        let uniform = shannon_entropy(&[25, 25, 25, 25]);
        let skewed = shannon_entropy(&[97, 1, 1, 1]);
        assert!(uniform > skewed);
    }

    #[test]
    fn shannon_entropy_bounds() {
        let counts = [10, 20, 30];
        let entropy = shannon_entropy(&counts);
        assert!(entropy >= 0.0);
        assert!(entropy <= (counts.len() as f64).log2());
    }

    #[test]
    fn shannon_entropy_empty() {
        assert!(shannon_entropy(&[]).abs() < f64::EPSILON);
        assert!(shannon_entropy(&[0, 0]).abs() < f64::EPSILON);
    }

    #[test]
    fn calculate_entropy_all_same_pattern() {
        // Guess shares nothing with any candidate: one bucket, zero bits
        let guess = Code::parse("DDDD").unwrap();
        let candidates = codes(&["AAAA", "BBBB", "CCCC"]);
        assert!(calculate_entropy(&guess, &candidates).abs() < 0.001);
    }

    #[test]
    fn calculate_entropy_empty_candidates() {
        let guess = Code::parse("ABCD").unwrap();
        assert!(calculate_entropy(&guess, &[]).abs() < f64::EPSILON);
    }

    #[test]
    fn distribution_matches_grouping() {
        let pool = CodeSpace::new(3).unwrap().all_codes();
        let guess = pool[5];
        let row: Vec<Pattern> = pool.iter().map(|c| Pattern::calculate(&guess, c)).collect();
        let distribution = pattern_distribution(&row);

        assert_eq!(distribution.iter().sum::<usize>(), pool.len());
        assert!((shannon_entropy(&distribution) - calculate_entropy(&guess, &pool)).abs() < 1e-9);
    }

    #[test]
    fn metrics_of_single_candidate() {
        let guess = Code::parse("ABCD").unwrap();
        let metrics = calculate_metrics(&guess, &codes(&["ABCD"]));
        assert!(metrics.entropy.abs() < f64::EPSILON);
        assert!((metrics.expected_remaining - 1.0).abs() < f64::EPSILON);
        assert_eq!(metrics.max_partition, 1);
    }

    #[test]
    fn metrics_expected_remaining() {
        // Buckets of 3 and 1: expected remaining = (9 + 1) / 4
        let metrics = metrics_from_distribution(&[3, 0, 1]);
        assert!((metrics.expected_remaining - 2.5).abs() < 1e-9);
        assert_eq!(metrics.max_partition, 3);
    }

    #[test]
    fn metrics_empty() {
        let metrics = calculate_metrics(&Code::parse("ABCD").unwrap(), &[]);
        assert_eq!(metrics.max_partition, 0);
        assert!(metrics.entropy.abs() < f64::EPSILON);
    }
}
