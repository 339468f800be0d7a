//! Display functions for command results

use super::formatters::{entropy_bar, pattern_pegs};
use crate::commands::{AnalysisResult, SolveResult};
use colored::Colorize;

/// Print the result of solving a code
pub fn print_solve_result(result: &SolveResult, verbose: bool) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Solving: {}",
        result.secret.to_string().bright_yellow().bold()
    );
    println!("{}", "─".repeat(60).cyan());

    for (i, step) in result.steps.iter().enumerate() {
        println!(
            "\nTurn {}: {} {} ({})",
            i + 1,
            step.guess.to_string().bright_white().bold(),
            pattern_pegs(step.pattern),
            step.pattern
        );

        if verbose {
            println!("  Candidates:  {} → {}", step.pool_before, step.pool_after);
            println!("  Score:       {}", step.score);
            println!("  Entropy:     {:.3} bits", step.metrics.entropy);
            println!(
                "  Expected:    {:.1} candidates (worst case {})",
                step.metrics.expected_remaining, step.metrics.max_partition
            );
            if step.pool_after > 0 {
                let reduction = step.pool_before as f64 / step.pool_after as f64;
                println!(
                    "  Info gained: {:.3} bits ({reduction:.1}x reduction)",
                    reduction.log2()
                );
            }
        }
    }

    println!();
    if result.success {
        println!(
            "{}",
            format!("✅ Solved in {} guesses!", result.steps.len())
                .green()
                .bold()
        );
    } else {
        println!(
            "{}",
            format!("❌ Failed to solve in {} guesses", result.steps.len())
                .red()
                .bold()
        );
    }
}

/// Print the result of code analysis
pub fn print_analysis_result(result: &AnalysisResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "ENTROPY ANALYSIS:".bright_cyan().bold(),
        result.code.to_string().bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    let bar = entropy_bar(result.entropy, result.total_candidates, 30);

    println!("\n📊 Against {} possible secrets:", result.total_candidates);
    println!(
        "   Entropy:     [{}] {}",
        bar.green(),
        format!("{:.3} bits", result.entropy).bright_yellow()
    );
    println!(
        "   Info gain:   {:.1}x reduction",
        result.expected_reduction
    );
    println!(
        "   Expected:    {:.1} candidates remain",
        result.expected_remaining
    );
    println!("   Worst case:  {} candidates remain", result.worst_case);

    if let Some((best, bits)) = result.best {
        println!(
            "\n   Solver opener: {} ({bits:.3} bits)",
            best.to_string().bright_green()
        );
    }
}
