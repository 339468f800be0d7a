//! Code space enumeration and dense indexing
//!
//! A code is mapped to an index by reading it as a base-`colors` number with
//! position 0 as the least significant digit. Enumeration follows ascending
//! index order, so `all_codes()[i]` is always the code with index `i`.

use super::code::{ALPHABET, CODE_LENGTH, Code, CodeError, MAX_COLORS, MIN_COLORS};

/// All codes of length four over the first `colors` letters of the alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodeSpace {
    colors: u8,
}

impl CodeSpace {
    /// Create the code space for an alphabet of `colors` symbols
    ///
    /// # Errors
    /// Returns `CodeError::UnsupportedColors` unless `2 <= colors <= 8`.
    pub const fn new(colors: u8) -> Result<Self, CodeError> {
        if colors < MIN_COLORS || colors > MAX_COLORS {
            return Err(CodeError::UnsupportedColors(colors));
        }
        Ok(Self { colors })
    }

    /// Alphabet size
    #[inline]
    #[must_use]
    pub const fn colors(self) -> u8 {
        self.colors
    }

    /// Number of codes (`colors^4`)
    #[inline]
    #[must_use]
    pub const fn size(self) -> usize {
        (self.colors as usize).pow(CODE_LENGTH as u32)
    }

    /// Every code in ascending index order
    ///
    /// # Examples
    /// ```
    /// use mastermind_solver::core::CodeSpace;
    ///
    /// let space = CodeSpace::new(2).unwrap();
    /// let codes = space.all_codes();
    /// assert_eq!(codes.len(), 16);
    /// assert_eq!(codes[0].to_string(), "AAAA");
    /// assert_eq!(codes[1].to_string(), "BAAA");
    /// assert_eq!(codes[15].to_string(), "BBBB");
    /// ```
    #[must_use]
    pub fn all_codes(self) -> Vec<Code> {
        (0..self.size()).map(|index| self.decode(index)).collect()
    }

    /// Check that every symbol of `code` belongs to this alphabet
    ///
    /// # Errors
    /// Returns `CodeError::SymbolOutOfRange` naming the first offending symbol.
    pub fn validate(self, code: &Code) -> Result<(), CodeError> {
        match code.symbols().iter().find(|&&s| s >= self.colors) {
            Some(&symbol) => Err(CodeError::SymbolOutOfRange {
                symbol: ALPHABET[usize::from(symbol)],
                colors: self.colors,
            }),
            None => Ok(()),
        }
    }

    /// Whether `code` belongs to this code space
    #[inline]
    #[must_use]
    pub fn contains(self, code: &Code) -> bool {
        self.validate(code).is_ok()
    }

    /// Parse a code and check it belongs to this code space
    ///
    /// # Errors
    /// Returns `CodeError` if the text is malformed or uses a symbol outside the alphabet.
    pub fn parse(self, text: &str) -> Result<Code, CodeError> {
        let code = Code::parse(text)?;
        self.validate(&code)?;
        Ok(code)
    }

    /// Dense index of a code
    ///
    /// # Errors
    /// Returns `CodeError::SymbolOutOfRange` if the code uses a symbol outside the alphabet.
    ///
    /// # Examples
    /// ```
    /// use mastermind_solver::core::{Code, CodeSpace};
    ///
    /// let space = CodeSpace::new(4).unwrap();
    /// let code = Code::parse("BAAA").unwrap();
    /// assert_eq!(space.index_of(&code).unwrap(), 1);
    /// assert_eq!(space.code_at(1).unwrap(), code);
    /// ```
    pub fn index_of(self, code: &Code) -> Result<usize, CodeError> {
        self.validate(code)?;
        Ok(self.encode(code))
    }

    /// Code with the given dense index
    ///
    /// # Errors
    /// Returns `CodeError::InvalidIndex` if `index >= colors^4`.
    pub fn code_at(self, index: usize) -> Result<Code, CodeError> {
        if index >= self.size() {
            return Err(CodeError::InvalidIndex {
                index,
                size: self.size(),
            });
        }
        Ok(self.decode(index))
    }

    /// Index of a code already known to be in this space
    #[inline]
    pub(crate) fn encode(self, code: &Code) -> usize {
        let base = usize::from(self.colors);
        code.symbols()
            .iter()
            .rev()
            .fold(0, |acc, &symbol| acc * base + usize::from(symbol))
    }

    #[inline]
    fn decode(self, index: usize) -> Code {
        let base = usize::from(self.colors);
        let mut symbols = [0u8; CODE_LENGTH];
        let mut rest = index;
        for slot in &mut symbols {
            *slot = (rest % base) as u8;
            rest /= base;
        }
        Code::from_symbols(symbols)
    }
}
