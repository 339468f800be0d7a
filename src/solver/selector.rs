//! Guess selection over a candidate pool
//!
//! Builds the pool's pattern matrix and ranks candidates by the configured
//! [`Objective`]. For the entropy objective on the full code space the result
//! is served from the first-guess cache when present, and recorded there after
//! a cache miss.

use super::cache::{CachedGuess, FirstGuessCache};
use super::error::SolverError;
use super::strategy::{GuessResult, Objective, RandomStrategy, Score, Strategy};
use crate::core::{Code, CodeSpace, PatternMatrix, PatternTable};

/// Select the best guess for `pool` without any cache
///
/// # Errors
/// Returns `SolverError::EmptyPool` if `pool` is empty, or `SolverError::Code`
/// if a pool member uses a symbol outside `space`.
///
/// # Examples
/// ```
/// use mastermind_solver::core::{Code, CodeSpace};
/// use mastermind_solver::solver::{Objective, Score, best_guess};
///
/// let space = CodeSpace::new(4).unwrap();
/// let pool: Vec<Code> = ["AAAA", "AAAB", "AABB", "ABBB", "BBBB"]
///     .iter()
///     .map(|s| space.parse(s).unwrap())
///     .collect();
///
/// let result = best_guess(&pool, space, Objective::Entropy).unwrap();
/// assert!(pool.contains(&result.guess));
/// assert!(matches!(result.score, Score::Bits(bits) if bits > 0.0));
/// ```
pub fn best_guess(
    pool: &[Code],
    space: CodeSpace,
    objective: Objective,
) -> Result<GuessResult, SolverError> {
    GuessSelector::new(objective).best_guess(pool, space, None)
}

/// Ranks pools by an objective, with an optional first-guess cache
#[derive(Debug, Default)]
pub struct GuessSelector {
    objective: Objective,
    cache: Option<FirstGuessCache>,
}

impl GuessSelector {
    #[must_use]
    pub const fn new(objective: Objective) -> Self {
        Self {
            objective,
            cache: None,
        }
    }

    /// Serve full-space entropy selections from `cache`
    #[must_use]
    pub fn with_cache(mut self, cache: FirstGuessCache) -> Self {
        self.cache = Some(cache);
        self
    }

    #[must_use]
    pub const fn objective(&self) -> Objective {
        self.objective
    }

    #[must_use]
    pub const fn cache(&self) -> Option<&FirstGuessCache> {
        self.cache.as_ref()
    }

    /// Select the best guess for `pool`
    ///
    /// `table`, when given and covering `space`, replaces pattern evaluation
    /// with lookups.
    ///
    /// # Errors
    /// Returns `SolverError::EmptyPool` if `pool` is empty, or `SolverError::Code`
    /// if a pool member uses a symbol outside `space`.
    pub fn best_guess(
        &self,
        pool: &[Code],
        space: CodeSpace,
        table: Option<&PatternTable>,
    ) -> Result<GuessResult, SolverError> {
        if pool.is_empty() {
            return Err(SolverError::EmptyPool);
        }
        for code in pool {
            space.validate(code)?;
        }

        if self.objective == Objective::Random {
            return RandomStrategy::pick(pool).ok_or(SolverError::EmptyPool);
        }

        let cacheable = self.objective == Objective::Entropy && is_full_space(pool, space);
        if cacheable && let Some(hit) = self.cache.as_ref().and_then(|c| c.get(space.colors())) {
            if hit.fits(space) {
                log::debug!("cached opener {} for {} colors", hit.guess, space.colors());
                return Ok(GuessResult {
                    guess: hit.guess,
                    score: Score::Bits(hit.bits),
                });
            }
            log::warn!(
                "ignoring cached opener {} ({:.3} bits) for {} colors",
                hit.guess,
                hit.bits,
                space.colors()
            );
        }

        let matrix = match table {
            Some(table) if table.space() == space => PatternMatrix::from_table(table, pool)?,
            _ => PatternMatrix::evaluate(pool),
        };
        let result = self
            .objective
            .select_guess(pool, &matrix)
            .ok_or(SolverError::EmptyPool)?;

        if cacheable
            && let (Some(cache), Score::Bits(bits)) = (self.cache.as_ref(), result.score)
            && cache.insert(
                space.colors(),
                CachedGuess {
                    guess: result.guess,
                    bits,
                },
            )
        {
            log::debug!("computed opener {} for {} colors", result.guess, space.colors());
        }

        Ok(result)
    }
}

/// Whether `pool` is exactly the code space in canonical order
fn is_full_space(pool: &[Code], space: CodeSpace) -> bool {
    pool.len() == space.size()
        && pool
            .iter()
            .enumerate()
            .all(|(index, code)| space.index_of(code) == Ok(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pattern;
    use crate::solver::entropy::calculate_entropy;

    fn pool_of(space: CodeSpace, texts: &[&str]) -> Vec<Code> {
        texts.iter().map(|s| space.parse(s).unwrap()).collect()
    }

    #[test]
    fn scenario_small_pool_entropy() {
        let space = CodeSpace::new(4).unwrap();
        let pool = pool_of(space, &["AAAA", "AAAB", "AABB", "ABBB", "BBBB"]);
        let result = best_guess(&pool, space, Objective::Entropy).unwrap();
        assert!(pool.contains(&result.guess));
        assert!(result.score.value() > 0.0);
    }

    #[test]
    fn empty_pool_is_an_error() {
        let space = CodeSpace::new(4).unwrap();
        for objective in Objective::ALL {
            assert_eq!(
                best_guess(&[], space, objective),
                Err(SolverError::EmptyPool)
            );
        }
    }

    #[test]
    fn single_code_pool_degrades_gracefully() {
        let space = CodeSpace::new(6).unwrap();
        let pool = pool_of(space, &["FACE"]);

        let entropy = best_guess(&pool, space, Objective::Entropy).unwrap();
        assert_eq!(entropy.guess, pool[0]);
        assert_eq!(entropy.score, Score::Bits(0.0));

        let minimax = best_guess(&pool, space, Objective::Minimax).unwrap();
        assert_eq!(minimax.guess, pool[0]);
        assert_eq!(minimax.score, Score::WorstCase(1));
    }

    #[test]
    fn foreign_code_is_rejected() {
        let space = CodeSpace::new(3).unwrap();
        let pool = vec![Code::parse("ABCD").unwrap()];
        assert!(matches!(
            best_guess(&pool, space, Objective::Entropy),
            Err(SolverError::Code(_))
        ));
    }

    #[test]
    fn repeated_selection_is_identical() {
        let space = CodeSpace::new(4).unwrap();
        let pool = space.all_codes();
        for objective in [Objective::Entropy, Objective::Minimax] {
            let first = best_guess(&pool, space, objective).unwrap();
            let second = best_guess(&pool, space, objective).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn cache_miss_records_the_computed_opener() {
        let space = CodeSpace::new(3).unwrap();
        let pool = space.all_codes();
        let selector = GuessSelector::new(Objective::Entropy).with_cache(FirstGuessCache::in_memory());

        let computed = selector.best_guess(&pool, space, None).unwrap();
        let cached = selector.cache().unwrap().get(3).unwrap();
        assert_eq!(cached.guess, computed.guess);
        assert_eq!(Score::Bits(cached.bits), computed.score);

        // Served from the cache, identical to brute computation
        assert_eq!(selector.best_guess(&pool, space, None).unwrap(), computed);
        assert_eq!(best_guess(&pool, space, Objective::Entropy).unwrap(), computed);
    }

    #[test]
    fn cache_hit_short_circuits() {
        let space = CodeSpace::new(3).unwrap();
        let cache = FirstGuessCache::in_memory();
        let planted = space.parse("CCCC").unwrap();
        cache.insert(
            3,
            CachedGuess {
                guess: planted,
                bits: 0.5,
            },
        );
        let selector = GuessSelector::new(Objective::Entropy).with_cache(cache);
        let result = selector.best_guess(&space.all_codes(), space, None).unwrap();
        assert_eq!(result.guess, planted);

        // Partial pools never use the cache
        let partial = pool_of(space, &["AABB", "CCCC"]);
        let result = selector.best_guess(&partial, space, None).unwrap();
        assert_eq!(result.guess, partial[0]);
    }

    #[test]
    fn cache_entry_outside_space_is_recomputed() {
        let space = CodeSpace::new(3).unwrap();
        let pool = space.all_codes();
        let cache = FirstGuessCache::in_memory();
        cache.insert(
            3,
            CachedGuess {
                guess: Code::parse("HHHH").unwrap(),
                bits: 9.0,
            },
        );
        let selector = GuessSelector::new(Objective::Entropy).with_cache(cache);

        let result = selector.best_guess(&pool, space, None).unwrap();
        assert_eq!(result, best_guess(&pool, space, Objective::Entropy).unwrap());
        assert!(space.contains(&result.guess));
    }

    #[test]
    fn random_scores_its_pick_over_the_pool() {
        let space = CodeSpace::new(4).unwrap();
        let pool = space.all_codes();
        for _ in 0..5 {
            let result = best_guess(&pool, space, Objective::Random).unwrap();
            assert!(pool.contains(&result.guess));
            let expected = calculate_entropy(&result.guess, &pool);
            assert!((result.score.value() - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn minimax_does_not_touch_cache() {
        let space = CodeSpace::new(2).unwrap();
        let selector = GuessSelector::new(Objective::Minimax).with_cache(FirstGuessCache::in_memory());
        selector.best_guess(&space.all_codes(), space, None).unwrap();
        assert!(selector.cache().unwrap().entries().is_empty());
    }

    #[test]
    fn table_lookup_gives_same_choice() {
        let space = CodeSpace::new(4).unwrap();
        let table = PatternTable::build(space);
        let secret = space.parse("DCBA").unwrap();
        let opener = space.parse("AABB").unwrap();
        let pattern = Pattern::calculate(&opener, &secret);
        let pool: Vec<Code> = space
            .all_codes()
            .into_iter()
            .filter(|c| Pattern::calculate(&opener, c) == pattern)
            .collect();

        let selector = GuessSelector::new(Objective::Entropy);
        assert_eq!(
            selector.best_guess(&pool, space, Some(&table)).unwrap(),
            selector.best_guess(&pool, space, None).unwrap()
        );
    }
}
