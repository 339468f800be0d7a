//! Mastermind Solver - CLI
//!
//! Four-peg Mastermind solver over 2 to 8 colors using information theory
//! (entropy) or game theory (minimax).

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use colored::Colorize;
use mastermind_solver::{
    commands::{
        SolveConfig, analyze_code, print_test_all_statistics, run_play, run_test_all, solve_code,
    },
    output::{print_analysis_result, print_solve_result},
    solver::{FirstGuessCache, JsonFileStore, Objective, OpeningMode, Solver, SolverConfig},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mastermind_solver",
    about = "Mastermind solver using information-theoretic and minimax strategies",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Number of colors (2-8)
    #[arg(short, long, global = true, default_value_t = 6)]
    colors: u8,

    /// Strategy: entropy (default), minimax, random
    #[arg(short, long, global = true, default_value = "entropy")]
    strategy: String,

    /// Opening guess: computed (default) or fixed
    #[arg(short, long, global = true, default_value = "computed")]
    opener: String,

    /// First-guess cache file
    #[arg(long, global = true, default_value = "first_guesses.json")]
    cache: PathBuf,

    /// Do not read or write the first-guess cache
    #[arg(long, global = true)]
    no_cache: bool,

    /// Precompute the full pattern table
    #[arg(long, global = true)]
    table: bool,

    /// Worker threads (default: RAYON_NUM_THREADS or all cores)
    #[arg(short = 'j', long, global = true)]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive mode: you keep the secret and report feedback (default)
    Play,

    /// Solve a specific (or random) secret
    Solve {
        /// The secret to solve; random when omitted
        secret: Option<String>,

        /// Show per-round pool sizes and information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Analyze the information content of a code as an opener
    Analyze {
        /// Code to analyze
        code: String,
    },

    /// Test the solver on ALL possible secrets
    TestAll,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| anyhow!("Failed to configure {threads} threads: {e}"))?;
    }

    let solver = build_solver(&cli)?;

    // Default to Play mode if no command given
    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => run_play(&solver)?,
        Commands::Solve { secret, verbose } => {
            let result = solve_code(&SolveConfig::new(secret), &solver)?;
            print_solve_result(&result, verbose);
        }
        Commands::Analyze { code } => {
            let result = analyze_code(&code, &solver)?;
            print_analysis_result(&result);
        }
        Commands::TestAll => run_test_all_command(&solver)?,
    }

    match solver.flush_cache() {
        Ok(0) => {}
        Ok(written) => println!(
            "{}",
            format!("💾 Saved {written} opener(s) to {}", cli.cache.display()).bright_black()
        ),
        Err(err) => log::warn!("{err}"),
    }
    Ok(())
}

/// Build the solver from command-line options
fn build_solver(cli: &Cli) -> Result<Solver> {
    let objective = Objective::from_name(&cli.strategy)
        .ok_or_else(|| anyhow!("Unknown strategy '{}' (entropy, minimax, random)", cli.strategy))?;
    let opening = OpeningMode::from_name(&cli.opener)
        .ok_or_else(|| anyhow!("Unknown opener '{}' (computed, fixed)", cli.opener))?;

    let config = SolverConfig::new(cli.colors)
        .with_objective(objective)
        .with_opening(opening)
        .with_table(cli.table);
    let solver = Solver::new(config)?;

    if cli.no_cache {
        return Ok(solver);
    }

    let cache = FirstGuessCache::new(JsonFileStore::new(cli.cache.clone()));
    if let Err(err) = cache.reload() {
        log::warn!("{err}");
    }
    Ok(solver.with_cache(cache))
}

fn run_test_all_command(solver: &Solver) -> Result<()> {
    println!("\n{}", "═".repeat(70));
    println!(" Comprehensive Mastermind Solver Test ");
    println!("{}", "═".repeat(70));
    println!(
        "\nColors: {}  |  Strategy: {}  |  Opener: {}",
        solver.space().colors(),
        solver.objective(),
        solver.opening()
    );
    println!();

    let (report, _) = run_test_all(solver)?;
    print_test_all_statistics(&report);
    Ok(())
}
