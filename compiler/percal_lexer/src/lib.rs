//! Percal lexical analyzer module
//!
//! Converts a percentage-adjustment expression string into a stream of
//! tokens for the parser. Numbers are carried as raw text so that decimal
//! validity is reported at evaluation time rather than as a lexer error.

pub mod lexer;
pub mod token;

// Re-export the main types for convenience
pub use lexer::{Lexer, LogosToken};
pub use token::{Location, Token, TokenType};
