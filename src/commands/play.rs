//! Interactive play mode
//!
//! The solver suggests guesses and a person reports the feedback for a secret
//! only they know.

use crate::core::Pattern;
use crate::output::formatters::pattern_pegs;
use crate::solver::entropy::calculate_metrics;
use crate::solver::{
    FeedbackSource, Game, GameRecord, GameState, GuessResult, Solver, SolverError,
};
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Feedback typed at a console, re-prompting until it is well formed
pub struct ConsoleFeedback<R, W> {
    input: R,
    output: W,
}

impl ConsoleFeedback<io::StdinLock<'static>, io::Stdout> {
    /// Console feedback over the process's stdin and stdout
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleFeedback<R, W> {
    #[must_use]
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask for the feedback to `guess`; `None` when the player quits
    ///
    /// # Errors
    /// Returns `SolverError::Feedback` on I/O failure.
    pub fn read_feedback(&mut self, guess: &GuessResult) -> Result<Option<Pattern>, SolverError> {
        loop {
            let line = self.prompt(&format!(
                "Feedback for {} (exact + color digits, 'win', or 'quit')",
                guess.guess
            ))?;
            let Some(line) = line else {
                return Ok(None);
            };

            if matches!(line.to_ascii_lowercase().as_str(), "quit" | "q" | "exit") {
                return Ok(None);
            }
            if let Some(pattern) = Pattern::parse_feedback(&line) {
                return Ok(Some(pattern));
            }
            self.say(&format!(
                "❌ Invalid feedback '{line}': two digits, each 0-4, summing to at most 4 (e.g. 21)"
            ))?;
        }
    }

    /// Print one line
    ///
    /// # Errors
    /// Returns `SolverError::Feedback` on I/O failure.
    pub fn say(&mut self, message: &str) -> Result<(), SolverError> {
        writeln!(self.output, "{message}").map_err(io_error)
    }

    /// Prompt and read one trimmed line; `None` at end of input
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>, SolverError> {
        write!(self.output, "{prompt}: ").map_err(io_error)?;
        self.output.flush().map_err(io_error)?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(io_error)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> FeedbackSource for ConsoleFeedback<R, W> {
    fn feedback(&mut self, guess: &GuessResult, _game: &Game<'_>) -> Result<Pattern, SolverError> {
        self.read_feedback(guess)?
            .ok_or_else(|| SolverError::Feedback("player quit".to_string()))
    }
}

fn io_error(err: io::Error) -> SolverError {
    SolverError::Feedback(err.to_string())
}

/// Play one interactive game over `console`
///
/// Contradictory feedback is reported and asked for again. Returns `None`
/// when the player quits before the code is found.
///
/// # Errors
///
/// Returns an error on I/O failure or if the solver cannot provide a guess.
pub fn play_session<R: BufRead, W: Write>(
    solver: &Solver,
    console: &mut ConsoleFeedback<R, W>,
) -> Result<Option<GameRecord>, SolverError> {
    let mut game = solver.new_game();

    loop {
        let guess = game.next_guess()?;
        let turn = game.rounds().len() + 1;
        let metrics = calculate_metrics(&guess.guess, game.pool());

        console.say(&format!(
            "\nTurn {turn}: {} candidates remaining",
            game.pool().len()
        ))?;
        console.say(&format!(
            "📊 Suggested guess: {}  ({}, worst case {})",
            guess.guess.to_string().bright_white().bold(),
            guess.score,
            metrics.max_partition
        ))?;
        if game.pool().len() <= 10 {
            let remaining: Vec<String> = game.pool().iter().map(ToString::to_string).collect();
            console.say(&format!("   Candidates: {}", remaining.join(" ")))?;
        }

        let Some(pattern) = console.read_feedback(&guess)? else {
            return Ok(None);
        };

        match game.submit_feedback(pattern) {
            Ok(GameState::Solved) => {
                let record = game.into_record(None);
                console.say(&format!(
                    "\n{}",
                    format!("🎉 Solved in {} guesses!", record.num_guesses())
                        .green()
                        .bold()
                ))?;
                for (i, round) in record.rounds.iter().enumerate() {
                    console.say(&format!(
                        "  {}. {} {}",
                        i + 1,
                        round.guess,
                        pattern_pegs(round.pattern)
                    ))?;
                }
                return Ok(Some(record));
            }
            Ok(_) => {}
            Err(SolverError::EmptyPool) => {
                console.say(
                    &"❌ No code is consistent with that feedback; please check it and try again."
                        .red()
                        .to_string(),
                )?;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Run interactive play on stdin / stdout
///
/// # Errors
///
/// Returns an error on I/O failure or if the solver cannot provide a guess.
pub fn run_play(solver: &Solver) -> Result<(), SolverError> {
    let mut console = ConsoleFeedback::stdio();
    console.say("\n╔══════════════════════════════════════════════════════════════╗")?;
    console.say("║            Mastermind Solver - Interactive Mode              ║")?;
    console.say("╚══════════════════════════════════════════════════════════════╝\n")?;
    console.say(&format!(
        "Think of a 4-peg code using the colors A-{}.",
        crate::core::ALPHABET[usize::from(solver.space().colors()) - 1]
    ))?;
    console.say("After each guess enter two digits: exact matches, then color-only matches.\n")?;

    if play_session(solver, &mut console)?.is_none() {
        console.say("\n👋 Thanks for playing!")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Code;
    use crate::solver::SolverConfig;
    use std::io::Cursor;

    fn console(input: &str) -> ConsoleFeedback<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleFeedback::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn two_code_solver() -> Solver {
        let pool = vec![Code::parse("AAAA").unwrap(), Code::parse("BBBB").unwrap()];
        Solver::new(SolverConfig::new(2).with_pool(pool)).unwrap()
    }

    #[test]
    fn malformed_feedback_is_requested_again() {
        let mut console = console("5\n32\nab\n21\n");
        let guess = GuessResult {
            guess: Code::parse("ABCD").unwrap(),
            score: crate::solver::Score::Bits(1.0),
        };
        let pattern = console.read_feedback(&guess).unwrap();
        assert_eq!(pattern, Pattern::from_counts(2, 1));

        let transcript = String::from_utf8(console.output).unwrap();
        assert_eq!(transcript.matches("Invalid feedback").count(), 3);
    }

    #[test]
    fn quit_and_end_of_input_stop_the_game() {
        let solver = two_code_solver();
        assert_eq!(play_session(&solver, &mut console("quit\n")).unwrap(), None);
        assert_eq!(play_session(&solver, &mut console("")).unwrap(), None);
    }

    #[test]
    fn session_plays_to_the_win() {
        let solver = two_code_solver();
        // AAAA first: no match, then BBBB wins
        let record = play_session(&solver, &mut console("00\nwin\n"))
            .unwrap()
            .unwrap();
        assert_eq!(record.num_guesses(), 2);
        assert!(record.solved());
    }

    #[test]
    fn contradictory_feedback_is_reported() {
        let solver = two_code_solver();
        let mut console = console("20\n00\n40\n");
        let record = play_session(&solver, &mut console).unwrap().unwrap();
        assert_eq!(record.num_guesses(), 2);

        let transcript = String::from_utf8(console.output).unwrap();
        assert!(transcript.contains("No code is consistent"));
    }

    #[test]
    fn console_is_a_feedback_source() {
        let solver = two_code_solver();
        let record = solver.play_with(&mut console("00\n40\n")).unwrap();
        assert_eq!(record.secret, None);
        assert!(matches!(
            solver.play_with(&mut console("quit\n")),
            Err(SolverError::Feedback(_))
        ));
    }
}
