//! Aggregate statistics over a set of finished games

use super::engine::GameRecord;
use crate::core::Code;
use rustc_hash::FxHashMap;

/// Number of hardest secrets kept
const HARDEST_KEPT: usize = 10;

/// Statistics from solving every secret of a pool
#[derive(Debug, Clone, PartialEq)]
pub struct SolveAllStatistics {
    pub total_games: usize,
    pub solved: usize,
    pub average_guesses: f64,
    pub min_guesses: usize,
    pub max_guesses: usize,
    /// Number of games per guess count
    pub guess_distribution: FxHashMap<usize, usize>,
    /// Secrets needing the most guesses, hardest first
    pub hardest: Vec<(Code, usize)>,
}

impl SolveAllStatistics {
    /// Summarize `records`; games without a known secret count toward totals only
    ///
    /// # Examples
    /// ```
    /// use mastermind_solver::solver::{SolveAllStatistics, Solver, SolverConfig};
    ///
    /// let solver = Solver::new(SolverConfig::new(2)).unwrap();
    /// let stats = SolveAllStatistics::from_records(&solver.solve_all().unwrap());
    ///
    /// assert_eq!(stats.total_games, 16);
    /// assert_eq!(stats.solved, 16);
    /// assert!(stats.max_guesses <= 7);
    /// ```
    #[must_use]
    pub fn from_records(records: &[GameRecord]) -> Self {
        let solved: Vec<&GameRecord> = records.iter().filter(|r| r.solved()).collect();

        let mut guess_distribution = FxHashMap::default();
        for record in &solved {
            *guess_distribution.entry(record.num_guesses()).or_insert(0) += 1;
        }

        let total_guesses: usize = solved.iter().map(|r| r.num_guesses()).sum();
        let average_guesses = if solved.is_empty() {
            0.0
        } else {
            total_guesses as f64 / solved.len() as f64
        };

        let mut hardest: Vec<(Code, usize)> = solved
            .iter()
            .filter_map(|r| r.secret.map(|secret| (secret, r.num_guesses())))
            .collect();
        // Stable: equal counts stay in pool order
        hardest.sort_by_key(|&(_, guesses)| std::cmp::Reverse(guesses));
        hardest.truncate(HARDEST_KEPT);

        Self {
            total_games: records.len(),
            solved: solved.len(),
            average_guesses,
            min_guesses: solved.iter().map(|r| r.num_guesses()).min().unwrap_or(0),
            max_guesses: solved.iter().map(|r| r.num_guesses()).max().unwrap_or(0),
            guess_distribution,
            hardest,
        }
    }

    /// Games that ended without the full match
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.total_games - self.solved
    }

    /// Information per guess: log2(games) spread over the average game
    #[must_use]
    pub fn bits_per_guess(&self) -> f64 {
        if self.average_guesses > 0.0 {
            (self.total_games as f64).log2() / self.average_guesses
        } else {
            0.0
        }
    }

    /// Guess counts present in the distribution, ascending
    #[must_use]
    pub fn guess_counts(&self) -> Vec<usize> {
        let mut counts: Vec<usize> = self.guess_distribution.keys().copied().collect();
        counts.sort_unstable();
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pattern;
    use crate::solver::engine::Round;
    use crate::solver::strategy::Score;

    fn record(secret: &str, guesses: usize) -> GameRecord {
        let secret = Code::parse(secret).unwrap();
        let mut rounds: Vec<Round> = (1..guesses)
            .map(|_| Round {
                guess: Code::parse("AAAA").unwrap(),
                score: Score::Bits(1.0),
                pattern: Pattern::new(0),
                pool_before: 2,
                pool_after: 1,
            })
            .collect();
        rounds.push(Round {
            guess: secret,
            score: Score::Bits(0.0),
            pattern: Pattern::PERFECT,
            pool_before: 1,
            pool_after: 1,
        });
        GameRecord {
            secret: Some(secret),
            rounds,
        }
    }

    #[test]
    fn summarizes_guess_counts() {
        let records = vec![record("ABCD", 3), record("BBBB", 5), record("CCCC", 3), record("DDDD", 4)];
        let stats = SolveAllStatistics::from_records(&records);

        assert_eq!(stats.total_games, 4);
        assert_eq!(stats.solved, 4);
        assert_eq!(stats.failed(), 0);
        assert!((stats.average_guesses - 3.75).abs() < 1e-12);
        assert_eq!((stats.min_guesses, stats.max_guesses), (3, 5));
        assert_eq!(stats.guess_distribution[&3], 2);
        assert_eq!(stats.guess_counts(), vec![3, 4, 5]);
        assert_eq!(stats.hardest[0], (Code::parse("BBBB").unwrap(), 5));
        assert_eq!(stats.hardest[1], (Code::parse("DDDD").unwrap(), 4));
        assert_eq!(stats.hardest[2].0, Code::parse("ABCD").unwrap());
    }

    #[test]
    fn unsolved_games_are_counted_as_failures() {
        let mut unsolved = record("ABCD", 2);
        unsolved.rounds.pop();
        let stats = SolveAllStatistics::from_records(&[record("AAAA", 1), unsolved]);
        assert_eq!(stats.total_games, 2);
        assert_eq!(stats.solved, 1);
        assert_eq!(stats.failed(), 1);
        assert!((stats.average_guesses - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_input() {
        let stats = SolveAllStatistics::from_records(&[]);
        assert_eq!(stats.total_games, 0);
        assert!(stats.hardest.is_empty());
        assert!(stats.bits_per_guess().abs() < f64::EPSILON);
    }
}
