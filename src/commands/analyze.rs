//! Code analysis command
//!
//! Analyzes the information content of a specific opening code.

use crate::core::Code;
use crate::solver::entropy::{calculate_entropy, calculate_metrics};
use crate::solver::{Solver, SolverError};

/// Result of analyzing a code
pub struct AnalysisResult {
    pub code: Code,
    pub entropy: f64,
    pub expected_reduction: f64,
    pub expected_remaining: f64,
    pub worst_case: usize,
    pub total_candidates: usize,
    /// The solver's own first guess, for comparison
    pub best: Option<(Code, f64)>,
}

/// Analyze a code against the solver's initial pool
///
/// # Errors
///
/// Returns an error if the code is not valid for the solver's color count.
pub fn analyze_code(code: &str, solver: &Solver) -> Result<AnalysisResult, SolverError> {
    let code = solver.space().parse(code)?;
    let pool = solver.initial_pool();
    let metrics = calculate_metrics(&code, pool);

    let best = solver
        .first_guess()
        .ok()
        .map(|opener| (opener.guess, calculate_entropy(&opener.guess, pool)));

    Ok(AnalysisResult {
        code,
        entropy: metrics.entropy,
        expected_reduction: metrics.entropy.exp2(),
        expected_remaining: metrics.expected_remaining,
        worst_case: metrics.max_partition,
        total_candidates: pool.len(),
        best,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::SolverConfig;

    fn solver(colors: u8) -> Solver {
        Solver::new(SolverConfig::new(colors)).unwrap()
    }

    #[test]
    fn analyze_valid_code() {
        let result = analyze_code("aabc", &solver(4)).unwrap();

        assert_eq!(result.code.to_string(), "AABC");
        assert!(result.entropy > 0.0);
        assert!(result.expected_reduction >= 1.0);
        assert_eq!(result.total_candidates, 256);
        assert!(result.worst_case < 256);
    }

    #[test]
    fn analyze_invalid_code() {
        assert!(analyze_code("AAGG", &solver(4)).is_err());
        assert!(analyze_code("AAAAA", &solver(4)).is_err());
    }

    #[test]
    fn entropy_properties() {
        let result = analyze_code("ABCD", &solver(5)).unwrap();

        assert!(result.entropy >= 0.0);
        assert!(result.entropy <= (result.total_candidates as f64).log2());
        assert!(result.expected_remaining >= 1.0);
        assert!(result.expected_remaining <= result.total_candidates as f64);

        // The computed opener carries at least as much information
        let (_, best_bits) = result.best.unwrap();
        assert!(best_bits + 1e-9 >= result.entropy);
    }

    #[test]
    fn uniform_code_is_weaker() {
        let uniform = analyze_code("AAAA", &solver(6)).unwrap();
        let mixed = analyze_code("AABC", &solver(6)).unwrap();
        assert!(mixed.entropy > uniform.entropy);
        assert!(mixed.worst_case < uniform.worst_case);
    }
}
