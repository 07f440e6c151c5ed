//! Evaluator for the Percal percentage-adjustment expression language.
//!
//! The public entry point takes an expression string and returns either a
//! 64-bit float or a single typed error:
//!
//! ```
//! use percal_eval::{evaluate, EvalError};
//!
//! assert_eq!(evaluate("10").unwrap(), 10.0);
//! assert_eq!(evaluate("1.5%").unwrap(), 0.015);
//! assert!(matches!(evaluate("increase(10)"), Err(EvalError::Malformed(_))));
//! ```
//!
//! Evaluation is synchronous, side-effect-free, and referentially
//! transparent: identical input always yields an identical result or an
//! identical error, so concurrent callers need no coordination.

pub mod error;
pub mod eval;

pub use error::EvalError;
pub use eval::{evaluate, evaluate_expr, evaluate_with_limit};
pub use percal_parser::DEFAULT_MAX_DEPTH;
