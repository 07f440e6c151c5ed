//! Abstract Syntax Tree (AST) for the Percal expression language.
//!
//! This crate defines the expression nodes shared by the parser and the
//! evaluator, along with JSON serialization helpers behind the `serde`
//! feature (enabled by default).

pub mod ast;

pub use ast::{CallExpressionNode, ExpressionNode, LiteralNode, Operation};

/// Serializes an AST node to a JSON string.
#[cfg(feature = "serde")]
pub fn to_json(expr: &ExpressionNode) -> Result<String, serde_json::Error> {
    serde_json::to_string(expr)
}

/// Deserializes an AST node from a JSON string.
#[cfg(feature = "serde")]
pub fn from_json(json: &str) -> Result<ExpressionNode, serde_json::Error> {
    serde_json::from_str(json)
}
