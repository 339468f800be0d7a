//! Mastermind code representation
//!
//! A Code is an ordered sequence of exactly four symbols drawn from the
//! alphabet `A..=H`. Symbols are stored as their offset from `A`.

use std::fmt;
use std::str::FromStr;

/// Number of positions in every code
pub const CODE_LENGTH: usize = 4;

/// Largest supported alphabet size
pub const MAX_COLORS: u8 = 8;

/// Smallest supported alphabet size
pub const MIN_COLORS: u8 = 2;

/// The fixed ordered alphabet; an alphabet of size `n` uses its first `n` letters
pub const ALPHABET: [char; MAX_COLORS as usize] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// A four-symbol Mastermind code
///
/// Codes are plain values: two codes are equal when their symbols are equal.
/// A code does not know the alphabet size of the game it belongs to; use
/// [`CodeSpace`](super::CodeSpace) to check membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code([u8; CODE_LENGTH]);

/// Error type for malformed codes and out-of-range indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    /// Code text does not have exactly four symbols
    InvalidLength(usize),
    /// Character is not a letter of the alphabet
    InvalidSymbol(char),
    /// Symbol is a valid letter but outside the alphabet of this game
    SymbolOutOfRange { symbol: char, colors: u8 },
    /// Index is not below `colors^4`
    InvalidIndex { index: usize, size: usize },
    /// Alphabet size outside `2..=8`
    UnsupportedColors(u8),
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => {
                write!(f, "Code must have exactly {CODE_LENGTH} symbols, got {len}")
            }
            Self::InvalidSymbol(ch) => {
                write!(f, "Invalid symbol '{ch}', expected a letter between A and H")
            }
            Self::SymbolOutOfRange { symbol, colors } => {
                let last = ALPHABET[usize::from(*colors).saturating_sub(1)];
                write!(
                    f,
                    "Symbol '{symbol}' is not used with {colors} colors (A to {last})"
                )
            }
            Self::InvalidIndex { index, size } => {
                write!(f, "Code index {index} out of range (size {size})")
            }
            Self::UnsupportedColors(colors) => write!(
                f,
                "Number of colors must be between {MIN_COLORS} and {MAX_COLORS}, got {colors}"
            ),
        }
    }
}

impl std::error::Error for CodeError {}

impl Code {
    /// Create a code from raw symbol indices (0 = `A`)
    ///
    /// # Errors
    /// Returns `CodeError::InvalidSymbol` if a symbol is not below 8.
    pub fn new(symbols: [u8; CODE_LENGTH]) -> Result<Self, CodeError> {
        if let Some(&bad) = symbols.iter().find(|&&s| s >= MAX_COLORS) {
            return Err(CodeError::InvalidSymbol(char::from(b'A'.wrapping_add(bad))));
        }
        Ok(Self(symbols))
    }

    /// Create a code without checking the symbols
    ///
    /// Callers guarantee every symbol is below [`MAX_COLORS`].
    #[inline]
    #[must_use]
    pub(crate) const fn from_symbols(symbols: [u8; CODE_LENGTH]) -> Self {
        Self(symbols)
    }

    /// Parse a code from text such as `"AABC"` (case-insensitive)
    ///
    /// # Errors
    /// Returns `CodeError` if the text is not four letters between A and H.
    ///
    /// # Examples
    /// ```
    /// use mastermind_solver::core::Code;
    ///
    /// let code = Code::parse("abcd").unwrap();
    /// assert_eq!(code.to_string(), "ABCD");
    /// assert_eq!(code.symbols(), &[0, 1, 2, 3]);
    ///
    /// assert!(Code::parse("ABC").is_err());
    /// assert!(Code::parse("ABCZ").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, CodeError> {
        let chars: Vec<char> = text.trim().chars().collect();
        if chars.len() != CODE_LENGTH {
            return Err(CodeError::InvalidLength(chars.len()));
        }

        let mut symbols = [0u8; CODE_LENGTH];
        for (slot, ch) in symbols.iter_mut().zip(chars) {
            let upper = ch.to_ascii_uppercase();
            *slot = ALPHABET
                .iter()
                .position(|&letter| letter == upper)
                .ok_or(CodeError::InvalidSymbol(ch))? as u8;
        }

        Ok(Self(symbols))
    }

    /// Symbol indices, position 0 first
    #[inline]
    #[must_use]
    pub const fn symbols(&self) -> &[u8; CODE_LENGTH] {
        &self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &symbol in &self.0 {
            write!(f, "{}", ALPHABET[usize::from(symbol)])?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_parse_valid() {
        let code = Code::parse("ABCD").unwrap();
        assert_eq!(code.symbols(), &[0, 1, 2, 3]);
        assert_eq!(code.to_string(), "ABCD");
    }

    #[test]
    fn code_parse_lowercase_normalized() {
        assert_eq!(Code::parse("hgfe").unwrap(), Code::parse("HGFE").unwrap());
    }

    #[test]
    fn code_parse_invalid_length() {
        assert_eq!(Code::parse("ABC"), Err(CodeError::InvalidLength(3)));
        assert_eq!(Code::parse("ABCDE"), Err(CodeError::InvalidLength(5)));
        assert_eq!(Code::parse(""), Err(CodeError::InvalidLength(0)));
    }

    #[test]
    fn code_parse_invalid_symbol() {
        assert_eq!(Code::parse("ABCI"), Err(CodeError::InvalidSymbol('I')));
        assert_eq!(Code::parse("AB1D"), Err(CodeError::InvalidSymbol('1')));
    }

    #[test]
    fn code_new_rejects_large_symbols() {
        assert!(Code::new([0, 1, 2, 7]).is_ok());
        assert!(matches!(
            Code::new([0, 1, 2, 8]),
            Err(CodeError::InvalidSymbol('I'))
        ));
    }

    #[test]
    fn code_from_str_matches_parse() {
        let parsed: Code = "DDCB".parse().unwrap();
        assert_eq!(parsed, Code::parse("DDCB").unwrap());
    }

    #[test]
    fn code_error_display() {
        let err = CodeError::SymbolOutOfRange {
            symbol: 'E',
            colors: 4,
        };
        assert_eq!(err.to_string(), "Symbol 'E' is not used with 4 colors (A to D)");
    }
}
