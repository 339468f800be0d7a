//! Formatting utilities for terminal output

use crate::core::{CODE_LENGTH, Pattern};

/// Format a pattern as key pegs: `●` exact, `○` color only, `·` miss
#[must_use]
pub fn pattern_pegs(pattern: Pattern) -> String {
    let exact = usize::from(pattern.exact());
    let color_only = usize::from(pattern.color_only());
    format!(
        "{}{}{}",
        "●".repeat(exact),
        "○".repeat(color_only),
        "·".repeat(CODE_LENGTH - exact - color_only)
    )
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Entropy bar scaled to the largest possible information, log2(pool size)
#[must_use]
pub fn entropy_bar(entropy: f64, pool_size: usize, width: usize) -> String {
    create_progress_bar(entropy, (pool_size.max(1) as f64).log2(), width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pegs_for_patterns() {
        assert_eq!(pattern_pegs(Pattern::new(0)), "····");
        assert_eq!(pattern_pegs(Pattern::PERFECT), "●●●●");
        assert_eq!(pattern_pegs(Pattern::from_counts(1, 2).unwrap()), "●○○·");
    }

    #[test]
    fn progress_bar_empty() {
        assert_eq!(create_progress_bar(0.0, 100.0, 10), "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        assert_eq!(create_progress_bar(150.0, 100.0, 10), "██████████");
    }

    #[test]
    fn progress_bar_half() {
        assert_eq!(create_progress_bar(50.0, 100.0, 10), "█████░░░░░");
    }

    #[test]
    fn entropy_bar_scales_to_pool() {
        assert_eq!(entropy_bar(2.0, 16, 4), "██░░");
        assert_eq!(entropy_bar(0.0, 1, 4), "░░░░");
    }
}
