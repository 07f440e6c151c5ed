//! Recursive-descent parser for the Percal expression language.
//!
//! Lexes an expression string with `percal_lexer` and parses the token
//! stream into a `percal_ast` expression tree. The token-level recursion
//! makes the two-argument call split bracket-aware: commas belonging to a
//! nested call can never split the enclosing argument list.

pub mod parser;

pub use parser::{
    parse_expression, parse_source, parse_source_with_limit, ParseError, TokenSlice,
    DEFAULT_MAX_DEPTH,
};
