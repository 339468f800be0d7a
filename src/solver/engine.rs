//! Main Mastermind solver interface
//!
//! A [`Solver`] owns the configuration shared by every game: the code space,
//! the initial pool, the guess selector and the optional pattern table. Each
//! [`Game`] walks the guess / feedback / filter loop:
//!
//! ```text
//! Initialized -> Guessing -> AwaitingFeedback -> Filtering -> Guessing | Solved
//! ```

use super::cache::FirstGuessCache;
use super::entropy::calculate_entropy;
use super::error::SolverError;
use super::feedback::{FeedbackSource, SecretFeedback};
use super::minimax::calculate_max_remaining;
use super::selector::GuessSelector;
use super::strategy::{GuessResult, Objective, Score};
use crate::core::{Code, CodeError, CodeSpace, MIN_COLORS, Pattern, PatternTable};
use rand::seq::IndexedRandom;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::fmt;
use std::sync::OnceLock;

/// Empirically chosen openers for 2 through 8 colors
const FIXED_OPENERS: [[u8; 4]; 7] = [
    [1, 1, 1, 0], // BBBA
    [2, 2, 1, 1], // CCBB
    [3, 3, 2, 1], // DDCB
    [4, 4, 3, 2], // EEDC
    [5, 4, 3, 2], // FEDC
    [6, 5, 4, 3], // GFED
    [7, 6, 5, 4], // HGFE
];

/// Fixed opening guess for `colors`
///
/// # Errors
/// Returns `CodeError::UnsupportedColors` outside 2..=8.
///
/// # Examples
/// ```
/// use mastermind_solver::solver::fixed_opener;
///
/// assert_eq!(fixed_opener(6).unwrap().to_string(), "FEDC");
/// assert!(fixed_opener(9).is_err());
/// ```
pub fn fixed_opener(colors: u8) -> Result<Code, CodeError> {
    let space = CodeSpace::new(colors)?;
    Code::new(FIXED_OPENERS[usize::from(space.colors() - MIN_COLORS)])
}

/// How the opening guess is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpeningMode {
    /// Run the selector over the initial pool (served from the cache when possible)
    #[default]
    Computed,
    /// Use the per-color opener table
    Fixed,
}

impl OpeningMode {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "computed" | "compute" => Some(Self::Computed),
            "fixed" | "table" => Some(Self::Fixed),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Computed => "computed",
            Self::Fixed => "fixed",
        }
    }
}

impl fmt::Display for OpeningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Solver configuration
///
/// # Examples
/// ```
/// use mastermind_solver::solver::{Objective, OpeningMode, SolverConfig};
///
/// let config = SolverConfig::new(6)
///     .with_objective(Objective::Minimax)
///     .with_opening(OpeningMode::Fixed);
/// assert_eq!(config.colors, 6);
/// assert!(config.pool.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    pub colors: u8,
    pub objective: Objective,
    pub opening: OpeningMode,
    /// Initial pool; the whole code space when `None`
    pub pool: Option<Vec<Code>>,
    /// Precompute the full pattern table and filter by lookup
    pub use_table: bool,
}

impl SolverConfig {
    #[must_use]
    pub fn new(colors: u8) -> Self {
        Self {
            colors,
            objective: Objective::default(),
            opening: OpeningMode::default(),
            pool: None,
            use_table: false,
        }
    }

    #[must_use]
    pub const fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    #[must_use]
    pub const fn with_opening(mut self, opening: OpeningMode) -> Self {
        self.opening = opening;
        self
    }

    #[must_use]
    pub fn with_pool(mut self, pool: Vec<Code>) -> Self {
        self.pool = Some(pool);
        self
    }

    #[must_use]
    pub const fn with_table(mut self, use_table: bool) -> Self {
        self.use_table = use_table;
        self
    }
}

/// Main Mastermind solver
///
/// Shared read-only by every game it starts, including the games `solve_all`
/// runs in parallel.
#[derive(Debug)]
pub struct Solver {
    space: CodeSpace,
    opening: OpeningMode,
    pool: Vec<Code>,
    selector: GuessSelector,
    table: Option<PatternTable>,
    opener: OnceLock<GuessResult>,
}

impl Solver {
    /// Create a solver from `config`
    ///
    /// A custom pool keeps its order; repeated codes are dropped.
    ///
    /// # Errors
    /// Returns `SolverError::Code` for an unsupported color count or a pool code
    /// outside the alphabet, and `SolverError::EmptyPool` for an empty custom pool.
    pub fn new(config: SolverConfig) -> Result<Self, SolverError> {
        let space = CodeSpace::new(config.colors)?;

        let pool = match config.pool {
            Some(mut pool) => {
                for code in &pool {
                    space.validate(code)?;
                }
                let mut seen = FxHashSet::default();
                pool.retain(|code| seen.insert(*code));
                if pool.is_empty() {
                    return Err(SolverError::EmptyPool);
                }
                pool
            }
            None => space.all_codes(),
        };

        Ok(Self {
            space,
            opening: config.opening,
            pool,
            selector: GuessSelector::new(config.objective),
            table: config.use_table.then(|| PatternTable::build(space)),
            opener: OnceLock::new(),
        })
    }

    /// Serve and record computed openers through `cache`
    #[must_use]
    pub fn with_cache(mut self, cache: FirstGuessCache) -> Self {
        self.selector = GuessSelector::new(self.selector.objective()).with_cache(cache);
        self.opener = OnceLock::new();
        self
    }

    #[must_use]
    pub const fn space(&self) -> CodeSpace {
        self.space
    }

    #[must_use]
    pub const fn objective(&self) -> Objective {
        self.selector.objective()
    }

    #[must_use]
    pub const fn opening(&self) -> OpeningMode {
        self.opening
    }

    /// Initial pool every game starts from
    #[must_use]
    pub fn initial_pool(&self) -> &[Code] {
        &self.pool
    }

    #[must_use]
    pub const fn table(&self) -> Option<&PatternTable> {
        self.table.as_ref()
    }

    #[must_use]
    pub const fn cache(&self) -> Option<&FirstGuessCache> {
        self.selector.cache()
    }

    /// Write newly computed openers to the cache's store
    ///
    /// Returns the number of entries written, zero without a cache.
    ///
    /// # Errors
    /// Returns `SolverError::Cache` if the store rejects a write.
    pub fn flush_cache(&self) -> Result<usize, SolverError> {
        self.selector.cache().map_or(Ok(0), FirstGuessCache::flush)
    }

    /// Opening guess for a new game
    ///
    /// Deterministic openers are computed once per solver and reused.
    ///
    /// # Errors
    /// Propagates selector errors.
    pub fn first_guess(&self) -> Result<GuessResult, SolverError> {
        if let Some(opener) = self.opener.get() {
            return Ok(*opener);
        }

        let result = match self.opening {
            OpeningMode::Fixed => {
                let guess = fixed_opener(self.space.colors())?;
                GuessResult {
                    guess,
                    score: self.score_of(&guess, &self.pool),
                }
            }
            OpeningMode::Computed => self.best_guess(&self.pool)?,
        };

        if self.opening == OpeningMode::Fixed || self.objective().is_deterministic() {
            return Ok(*self.opener.get_or_init(|| result));
        }
        Ok(result)
    }

    /// Best guess for `pool` under the configured objective
    ///
    /// # Errors
    /// Returns `SolverError::EmptyPool` if `pool` is empty.
    pub fn best_guess(&self, pool: &[Code]) -> Result<GuessResult, SolverError> {
        self.selector.best_guess(pool, self.space, self.table.as_ref())
    }

    /// Pool members that would answer `guess` with `pattern`
    #[must_use]
    pub fn filter_pool(&self, pool: &[Code], guess: &Code, pattern: Pattern) -> Vec<Code> {
        match &self.table {
            Some(table) if self.space.contains(guess) => {
                let row = table.row(self.space.encode(guess));
                pool.iter()
                    .filter(|code| row[self.space.encode(code)] == pattern)
                    .copied()
                    .collect()
            }
            _ => pool
                .iter()
                .filter(|code| Pattern::calculate(guess, code) == pattern)
                .copied()
                .collect(),
        }
    }

    /// Objective score of an arbitrary guess over `pool`
    fn score_of(&self, guess: &Code, pool: &[Code]) -> Score {
        match self.objective() {
            Objective::Minimax => Score::WorstCase(calculate_max_remaining(guess, pool)),
            Objective::Entropy | Objective::Random => Score::Bits(calculate_entropy(guess, pool)),
        }
    }

    /// Start a game over the initial pool
    #[must_use]
    pub fn new_game(&self) -> Game<'_> {
        Game {
            solver: self,
            state: GameState::Initialized,
            pool: self.pool.clone(),
            pending: None,
            rounds: Vec::new(),
        }
    }

    /// Self-play against `secret`, or a random pool member when `None`
    ///
    /// # Errors
    /// Returns `SolverError::Code` if `secret` is outside the code space and
    /// `SolverError::EmptyPool` if it is not in the initial pool.
    ///
    /// # Examples
    /// ```
    /// use mastermind_solver::solver::{Solver, SolverConfig};
    ///
    /// let solver = Solver::new(SolverConfig::new(4)).unwrap();
    /// let secret = solver.space().parse("DCBA").unwrap();
    /// let record = solver.play(Some(secret)).unwrap();
    ///
    /// assert!(record.solved());
    /// assert_eq!(record.guesses().last(), Some(&secret));
    /// ```
    pub fn play(&self, secret: Option<Code>) -> Result<GameRecord, SolverError> {
        let secret = match secret {
            Some(secret) => {
                self.space.validate(&secret)?;
                secret
            }
            None => *self
                .pool
                .choose(&mut rand::rng())
                .ok_or(SolverError::EmptyPool)?,
        };
        self.play_with(&mut SecretFeedback::new(secret))
    }

    /// Play one game, asking `source` for every pattern
    ///
    /// # Errors
    /// Propagates selector and feedback errors; `SolverError::EmptyPool` when
    /// the feedback is contradictory.
    pub fn play_with(&self, source: &mut impl FeedbackSource) -> Result<GameRecord, SolverError> {
        let mut game = self.new_game();
        loop {
            let guess = game.next_guess()?;
            let pattern = source.feedback(&guess, &game)?;
            if game.submit_feedback(pattern)? == GameState::Solved {
                return Ok(game.into_record(source.secret()));
            }
        }
    }

    /// Self-play against every code of the initial pool, in pool order
    ///
    /// # Errors
    /// Returns the first error any game produced.
    pub fn solve_all(&self) -> Result<Vec<GameRecord>, SolverError> {
        self.solve_all_with(|_| {})
    }

    /// [`solve_all`](Self::solve_all), calling `on_game` as each game finishes
    ///
    /// `on_game` runs on worker threads, in completion order.
    ///
    /// # Errors
    /// Returns the first error any game produced.
    pub fn solve_all_with<F>(&self, on_game: F) -> Result<Vec<GameRecord>, SolverError>
    where
        F: Fn(&GameRecord) + Sync,
    {
        if self.opening == OpeningMode::Fixed || self.objective().is_deterministic() {
            let opener = self.first_guess()?;
            log::debug!("opener {} ({})", opener.guess, opener.score);
        }
        log::debug!(
            "solving {} secrets over {} colors with {}",
            self.pool.len(),
            self.space.colors(),
            self.objective()
        );

        self.pool
            .par_iter()
            .map(|&secret| {
                let record = self.play_with(&mut SecretFeedback::new(secret))?;
                on_game(&record);
                Ok(record)
            })
            .collect()
    }
}

/// Solve every code of the `colors` space with `objective`
///
/// # Errors
/// Returns `SolverError::Code` for an unsupported color count.
pub fn solve_all(colors: u8, objective: Objective) -> Result<Vec<GameRecord>, SolverError> {
    Solver::new(SolverConfig::new(colors).with_objective(objective))?.solve_all()
}

/// Position of a game in the solving loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Initialized,
    Guessing,
    AwaitingFeedback,
    Filtering,
    Solved,
}

/// One completed round
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Round {
    pub guess: Code,
    pub score: Score,
    pub pattern: Pattern,
    pub pool_before: usize,
    pub pool_after: usize,
}

impl Round {
    /// Information actually gained, in bits
    #[must_use]
    pub fn information(&self) -> f64 {
        if self.pool_after == 0 {
            return 0.0;
        }
        (self.pool_before as f64 / self.pool_after as f64).log2()
    }
}

/// A finished game: the secret when known and every round played
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub secret: Option<Code>,
    pub rounds: Vec<Round>,
}

impl GameRecord {
    /// Guesses in play order
    #[must_use]
    pub fn guesses(&self) -> Vec<Code> {
        self.rounds.iter().map(|round| round.guess).collect()
    }

    /// Scores in play order
    #[must_use]
    pub fn scores(&self) -> Vec<Score> {
        self.rounds.iter().map(|round| round.score).collect()
    }

    #[must_use]
    pub fn num_guesses(&self) -> usize {
        self.rounds.len()
    }

    /// Whether the last round ended on the full match
    #[must_use]
    pub fn solved(&self) -> bool {
        self.rounds.last().is_some_and(|round| round.pattern.is_perfect())
    }
}

/// A single game in progress
#[derive(Debug)]
pub struct Game<'s> {
    solver: &'s Solver,
    state: GameState,
    pool: Vec<Code>,
    pending: Option<GuessResult>,
    rounds: Vec<Round>,
}

impl Game<'_> {
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Codes still consistent with every pattern received
    #[must_use]
    pub fn pool(&self) -> &[Code] {
        &self.pool
    }

    #[must_use]
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Choose the next guess
    ///
    /// While a guess awaits feedback, that same guess is returned again.
    ///
    /// # Errors
    /// Returns `SolverError::InvalidTransition` once solved, or selector errors.
    pub fn next_guess(&mut self) -> Result<GuessResult, SolverError> {
        match (self.state, self.pending) {
            (GameState::AwaitingFeedback, Some(pending)) => return Ok(pending),
            (GameState::Initialized | GameState::Guessing, _) => {}
            (state, _) => {
                return Err(SolverError::InvalidTransition {
                    state,
                    action: "request a guess",
                });
            }
        }

        self.state = GameState::Guessing;
        let result = if self.rounds.is_empty() {
            self.solver.first_guess()?
        } else {
            self.solver.best_guess(&self.pool)?
        };
        self.pending = Some(result);
        self.state = GameState::AwaitingFeedback;
        Ok(result)
    }

    /// Apply the pattern the pending guess earned
    ///
    /// Contradictory feedback (nothing left in the pool) is rejected and the
    /// game stays awaiting feedback for the same guess.
    ///
    /// # Errors
    /// Returns `SolverError::InvalidTransition` when no guess is pending and
    /// `SolverError::EmptyPool` for contradictory feedback.
    pub fn submit_feedback(&mut self, pattern: Pattern) -> Result<GameState, SolverError> {
        let Some(guess) = self.pending.filter(|_| self.state == GameState::AwaitingFeedback) else {
            return Err(SolverError::InvalidTransition {
                state: self.state,
                action: "submit feedback",
            });
        };

        self.state = GameState::Filtering;
        let pool = if pattern.is_perfect() {
            vec![guess.guess]
        } else {
            self.solver.filter_pool(&self.pool, &guess.guess, pattern)
        };
        if pool.is_empty() {
            self.state = GameState::AwaitingFeedback;
            return Err(SolverError::EmptyPool);
        }

        self.rounds.push(Round {
            guess: guess.guess,
            score: guess.score,
            pattern,
            pool_before: self.pool.len(),
            pool_after: pool.len(),
        });
        self.pool = pool;
        self.pending = None;
        self.state = if pattern.is_perfect() {
            GameState::Solved
        } else {
            GameState::Guessing
        };
        Ok(self.state)
    }

    /// Finish the game, attaching `secret` when known
    #[must_use]
    pub fn into_record(self, secret: Option<Code>) -> GameRecord {
        GameRecord {
            secret,
            rounds: self.rounds,
        }
    }
}
