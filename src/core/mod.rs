//! Core domain types for Mastermind
//!
//! Codes, the code space with its dense indexing, feedback patterns and the
//! all-pairs pattern matrices. Everything here is a pure function of its inputs.

mod code;
mod matrix;
mod pattern;
mod space;

pub use code::{ALPHABET, CODE_LENGTH, Code, CodeError, MAX_COLORS, MIN_COLORS};
pub use matrix::{PatternMatrix, PatternTable};
pub use pattern::{PATTERN_COUNT, Pattern};
pub use space::CodeSpace;
