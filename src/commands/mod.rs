//! Command implementations

pub mod analyze;
pub mod play;
pub mod solve;
pub mod test_all;

pub use analyze::{AnalysisResult, analyze_code};
pub use play::{ConsoleFeedback, play_session, run_play};
pub use solve::{GuessStep, SolveConfig, SolveResult, solve_code};
pub use test_all::{TestAllReport, print_test_all_statistics, run_test_all};
