//! Mastermind Solver
//!
//! A Mastermind solver for four-peg codes over 2 to 8 colors, choosing guesses
//! by expected information (entropy) or worst-case pool size (minimax).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mastermind_solver::core::{Code, Pattern};
//!
//! // Create codes
//! let guess = Code::parse("AABB").unwrap();
//! let secret = Code::parse("ABCC").unwrap();
//!
//! // Calculate pattern
//! let pattern = Pattern::calculate(&guess, &secret);
//! println!("Exact: {}, color only: {}", pattern.exact(), pattern.color_only());
//! ```

// Core domain types
pub mod core;

// Solving algorithms
pub mod solver;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
