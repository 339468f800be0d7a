//! Test all secrets - comprehensive solver evaluation
//!
//! Runs the solver against every code of its initial pool and generates statistics.

use crate::solver::{GameRecord, GuessResult, SolveAllStatistics, Solver, SolverError};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Statistics from testing all secrets
#[derive(Debug)]
pub struct TestAllReport {
    pub stats: SolveAllStatistics,
    pub opener: GuessResult,
    pub total_time: Duration,
}

/// Run the solver on every secret of its initial pool
///
/// # Errors
///
/// Returns the first error any game produced.
pub fn run_test_all(solver: &Solver) -> Result<(TestAllReport, Vec<GameRecord>), SolverError> {
    let total = solver.initial_pool().len();
    println!("🎯 Testing {total} secrets...");

    let total_start = Instant::now();
    let opener = solver.first_guess()?;

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
            .map_or_else(|_| ProgressStyle::default_bar(), |style| style.progress_chars("█▓▒░")),
    );
    pb.set_message(format!("opener {}", opener.guess));

    let records = solver.solve_all_with(|_| pb.inc(1))?;
    pb.finish_with_message("Complete!");

    let report = TestAllReport {
        stats: SolveAllStatistics::from_records(&records),
        opener,
        total_time: total_start.elapsed(),
    };
    Ok((report, records))
}

/// Print test-all statistics
pub fn print_test_all_statistics(report: &TestAllReport) {
    let stats = &report.stats;
    println!("\n{}", "═".repeat(70));
    println!(" Test Results ");
    println!("{}", "═".repeat(70));

    // Overall performance
    println!("\n📊 {}", "Overall Performance".bright_cyan().bold());
    println!("  Total secrets tested: {}", stats.total_games);
    println!(
        "  Successfully solved:  {} {}",
        stats.solved,
        format!(
            "({:.1}%)",
            stats.solved as f64 / stats.total_games.max(1) as f64 * 100.0
        )
        .green()
    );
    if stats.failed() > 0 {
        println!("  Failed to solve:      {}", stats.failed().to_string().red());
    }
    println!(
        "  Opening guess:        {} ({})",
        report.opener.guess.to_string().bright_white().bold(),
        report.opener.score
    );
    println!(
        "  Average guesses:      {}",
        format!("{:.3}", stats.average_guesses).bright_yellow().bold()
    );
    println!(
        "  Best / worst:         {} / {}",
        stats.min_guesses.to_string().green(),
        stats.max_guesses.to_string().yellow()
    );
    println!(
        "  Total time:           {:.2}s",
        report.total_time.as_secs_f64()
    );
    println!(
        "  Time per secret:      {:.2}ms",
        report.total_time.as_secs_f64() * 1000.0 / stats.total_games.max(1) as f64
    );

    // Guess distribution
    println!("\n📈 {}", "Guess Distribution".bright_cyan().bold());
    let max_count = stats.guess_distribution.values().copied().max().unwrap_or(1);
    for guesses in stats.guess_counts() {
        let count = stats.guess_distribution.get(&guesses).copied().unwrap_or(0);
        let percentage = count as f64 / stats.solved.max(1) as f64 * 100.0;
        let bar_len = (count * 40 / max_count).max(usize::from(count > 0));
        let bar = format!(
            "{}{}",
            "█".repeat(bar_len).green(),
            "░".repeat(40_usize.saturating_sub(bar_len)).bright_black()
        );
        println!("  {guesses:2} guesses: {bar} {count:5} ({percentage:5.1}%)");
    }

    // Information theory metrics
    println!("\n🧮 Information Theory Metrics");
    println!(
        "  Total information:    {:.2} bits",
        (stats.total_games.max(1) as f64).log2()
    );
    println!("  Bits per guess:       {:.2} bits", stats.bits_per_guess());

    if !stats.hardest.is_empty() {
        println!("\n😰 {}", "Hardest Secrets".yellow().bold());
        for (secret, guesses) in stats.hardest.iter().take(5) {
            println!("  {} ({guesses} guesses)", secret.to_string().yellow());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::SolverConfig;

    #[test]
    fn test_all_covers_every_secret() {
        let solver = Solver::new(SolverConfig::new(3)).unwrap();
        let (report, records) = run_test_all(&solver).unwrap();

        assert_eq!(records.len(), 81);
        assert_eq!(report.stats.total_games, 81);
        assert_eq!(report.stats.solved, 81);
        assert_eq!(report.opener, solver.first_guess().unwrap());
        assert_eq!(
            report.stats.guess_distribution.values().sum::<usize>(),
            81
        );
    }
}
