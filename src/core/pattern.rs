//! Mastermind feedback pattern calculation and representation
//!
//! A pattern encodes the feedback for a (guess, candidate) pair as a single byte:
//! `value = 5 × exact + color_only`, where
//! - `exact` counts positions holding the same symbol in both codes
//! - `color_only` counts further symbols shared by both codes at different positions
//!
//! The value range is 0-20, giving 21 histogram buckets. The full match (4, 0) is 20.

use super::code::{CODE_LENGTH, Code, MAX_COLORS};

/// Number of distinct pattern values (0-20)
pub const PATTERN_COUNT: usize = 21;

/// Feedback pattern for a Mastermind guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pattern(u8);

impl Pattern {
    /// All four positions correct
    pub const PERFECT: Self = Self(20); // 5×4 + 0

    /// Create a pattern from a raw value
    ///
    /// # Panics
    /// Panics in debug mode if value > 20
    #[inline]
    #[must_use]
    pub const fn new(value: u8) -> Self {
        debug_assert!(value < PATTERN_COUNT as u8, "Pattern value must be <= 20");
        Self(value)
    }

    /// Build a pattern from feedback counts
    ///
    /// Returns `None` unless both counts are at most 4 and their sum is at most 4.
    ///
    /// # Examples
    /// ```
    /// use mastermind_solver::core::Pattern;
    ///
    /// let p = Pattern::from_counts(2, 1).unwrap();
    /// assert_eq!(p.value(), 11);
    /// assert_eq!((p.exact(), p.color_only()), (2, 1));
    ///
    /// assert!(Pattern::from_counts(3, 2).is_none());
    /// ```
    #[must_use]
    pub const fn from_counts(exact: u8, color_only: u8) -> Option<Self> {
        let limit = CODE_LENGTH as u8;
        if exact > limit || color_only > limit || exact + color_only > limit {
            return None;
        }
        Some(Self(5 * exact + color_only))
    }

    /// Get the raw pattern value (0-20)
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Histogram bucket of this pattern
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Number of symbols in the right position
    #[inline]
    #[must_use]
    pub const fn exact(self) -> u8 {
        self.0 / 5
    }

    /// Number of shared symbols in the wrong position
    #[inline]
    #[must_use]
    pub const fn color_only(self) -> u8 {
        self.0 % 5
    }

    /// Check if this is the full match
    #[inline]
    #[must_use]
    pub const fn is_perfect(self) -> bool {
        self.0 == Self::PERFECT.0
    }

    /// Calculate the feedback pattern between two codes
    ///
    /// The result is symmetric in its arguments.
    ///
    /// # Algorithm
    /// 1. First pass: mark exact matches and remove both symbols from consideration
    /// 2. Second pass: for each unmatched symbol of `guess`, consume one unmatched
    ///    occurrence of the same symbol in `secret`
    ///
    /// Each symbol occurrence satisfies at most one match, so duplicates never
    /// over-count.
    ///
    /// # Examples
    /// ```
    /// use mastermind_solver::core::{Code, Pattern};
    ///
    /// let guess = Code::parse("AABB").unwrap();
    /// let secret = Code::parse("ABAB").unwrap();
    /// let pattern = Pattern::calculate(&guess, &secret);
    ///
    /// assert_eq!(pattern.exact(), 2);
    /// assert_eq!(pattern.color_only(), 2);
    /// ```
    #[must_use]
    pub fn calculate(guess: &Code, secret: &Code) -> Self {
        let guess = guess.symbols();
        let secret = secret.symbols();

        let mut exact_at = [false; CODE_LENGTH];
        let mut secret_available = [0u8; MAX_COLORS as usize];
        let mut exact = 0u8;

        // First pass: exact position matches
        for i in 0..CODE_LENGTH {
            if guess[i] == secret[i] {
                exact_at[i] = true;
                exact += 1;
            } else {
                secret_available[usize::from(secret[i])] += 1;
            }
        }

        // Second pass: consume remaining secret symbols
        let mut color_only = 0u8;
        for i in 0..CODE_LENGTH {
            if exact_at[i] {
                continue;
            }
            let available = &mut secret_available[usize::from(guess[i])];
            if *available > 0 {
                *available -= 1;
                color_only += 1;
            }
        }

        Self(5 * exact + color_only)
    }

    /// Parse interactive feedback such as `"21"` (2 exact, 1 color-only)
    ///
    /// Accepts exactly two digits, each at most 4, summing to at most 4.
    /// The words `win` and `solved` are shortcuts for the full match.
    ///
    /// # Examples
    /// ```
    /// use mastermind_solver::core::Pattern;
    ///
    /// assert_eq!(Pattern::parse_feedback("40"), Some(Pattern::PERFECT));
    /// assert_eq!(Pattern::parse_feedback("win"), Some(Pattern::PERFECT));
    /// assert_eq!(Pattern::parse_feedback(" 13 ").map(|p| p.value()), Some(8));
    ///
    /// assert!(Pattern::parse_feedback("32").is_none());
    /// assert!(Pattern::parse_feedback("5").is_none());
    /// assert!(Pattern::parse_feedback("1 2").is_none());
    /// ```
    #[must_use]
    pub fn parse_feedback(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("win") || input.eq_ignore_ascii_case("solved") {
            return Some(Self::PERFECT);
        }

        let bytes = input.as_bytes();
        if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_digit) {
            return None;
        }

        Self::from_counts(bytes[0] - b'0', bytes[1] - b'0')
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.exact(), self.color_only())
    }
}

impl std::str::FromStr for Pattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_feedback(s).ok_or_else(|| {
            format!(
                "Invalid feedback '{s}': expected two digits (exact, color-only), each <= 4, sum <= 4"
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc(guess: &str, secret: &str) -> (u8, u8) {
        let p = Pattern::calculate(&Code::parse(guess).unwrap(), &Code::parse(secret).unwrap());
        (p.exact(), p.color_only())
    }

    #[test]
    fn pattern_perfect_constant() {
        assert_eq!(Pattern::PERFECT.value(), 20);
        assert!(Pattern::PERFECT.is_perfect());
        assert_eq!(Pattern::PERFECT.exact(), 4);
        assert_eq!(Pattern::PERFECT.color_only(), 0);
    }

    #[test]
    fn pattern_no_shared_symbols() {
        assert_eq!(calc("AAAA", "BBBB"), (0, 0));
        assert_eq!(calc("ABAB", "CDCD"), (0, 0));
    }

    #[test]
    fn pattern_all_exact() {
        for code in ["AAAA", "ABCD", "HGFE", "AABB"] {
            let c = Code::parse(code).unwrap();
            assert_eq!(Pattern::calculate(&c, &c), Pattern::PERFECT);
        }
    }

    #[test]
    fn pattern_all_misplaced() {
        assert_eq!(calc("ABCD", "DCBA"), (0, 4));
        assert_eq!(calc("ABCD", "BCDA"), (0, 4));
    }

    #[test]
    fn pattern_duplicate_symbols_do_not_over_count() {
        // A at position 0 is exact; the second A finds no leftover A in ABCC,
        // the B pair matches once
        assert_eq!(calc("AABB", "ABCC"), (1, 1));
        assert_eq!(calc("AABB", "ABAB"), (2, 2));
        assert_eq!(calc("AAAA", "ABCD"), (1, 0));
        assert_eq!(calc("AAAB", "BBBA"), (0, 2));
    }

    #[test]
    fn pattern_exact_takes_priority() {
        // The A at position 3 is exact, so the guess A at position 0 has nothing left
        assert_eq!(calc("ABCD", "EFGA"), (0, 1));
        assert_eq!(calc("ABCA", "EFGA"), (1, 0));
    }

    #[test]
    fn pattern_symmetric_examples() {
        let pairs = [("AABB", "ABCC"), ("ABCD", "DDAA"), ("HGFE", "EEHH")];
        for (a, b) in pairs {
            assert_eq!(calc(a, b), calc(b, a));
        }
    }

    #[test]
    fn pattern_from_counts_bounds() {
        assert_eq!(Pattern::from_counts(4, 0), Some(Pattern::PERFECT));
        assert_eq!(Pattern::from_counts(0, 0), Some(Pattern::new(0)));
        assert_eq!(Pattern::from_counts(0, 4).map(Pattern::value), Some(4));
        assert!(Pattern::from_counts(5, 0).is_none());
        assert!(Pattern::from_counts(2, 3).is_none());
    }

    #[test]
    fn parse_feedback_valid() {
        assert_eq!(Pattern::parse_feedback("00"), Some(Pattern::new(0)));
        assert_eq!(Pattern::parse_feedback("21"), Pattern::from_counts(2, 1));
        assert_eq!(Pattern::parse_feedback("04"), Pattern::from_counts(0, 4));
        assert_eq!(Pattern::parse_feedback("SOLVED"), Some(Pattern::PERFECT));
    }

    #[test]
    fn parse_feedback_invalid() {
        assert!(Pattern::parse_feedback("").is_none());
        assert!(Pattern::parse_feedback("2").is_none());
        assert!(Pattern::parse_feedback("211").is_none());
        assert!(Pattern::parse_feedback("2a").is_none());
        assert!(Pattern::parse_feedback("50").is_none());
        assert!(Pattern::parse_feedback("23").is_none());
        assert!(Pattern::parse_feedback("-1").is_none());
    }

    #[test]
    fn pattern_display_round_trips() {
        let p = Pattern::from_counts(1, 2).unwrap();
        assert_eq!(p.to_string(), "12");
        assert_eq!("12".parse::<Pattern>().unwrap(), p);
        assert!("9".parse::<Pattern>().is_err());
    }
}
