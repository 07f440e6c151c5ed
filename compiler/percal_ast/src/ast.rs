// Abstract Syntax Tree (AST) definitions for the Percal expression language.
//
// Every expression is exactly one of: a number literal, a percent literal,
// or a two-argument increase/decrease call. Literals carry their raw source
// text; numeric parsing happens in the evaluator so that bad decimal text
// is reported as a number-format error rather than a parse error.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single node of a Percal expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExpressionNode {
    Literal(LiteralNode),
    Call(Box<CallExpressionNode>),
}

/// A leaf expression.
///
/// The percent-ness of a literal is a structural fact recorded here at
/// parse time. The evaluator's rate-versus-delta decision is a pattern
/// match on this variant, which is equivalent to checking whether the
/// argument's trimmed source text ends with `%`: only a bare percent
/// literal produces `Percent`, while a call's surface text ends with `)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LiteralNode {
    /// Raw numeric text, e.g. `10` or `1.5`
    Number(String),
    /// The numeric prefix of a percent literal, e.g. `1.5` for `1.5%`
    Percent(String),
}

/// An `increase(base, amount)` or `decrease(base, amount)` call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CallExpressionNode {
    pub operation: Operation,
    pub base: ExpressionNode,
    pub amount: ExpressionNode,
}

/// The two operations of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operation {
    Increase,
    Decrease,
}

impl Operation {
    /// Resolve a (case-insensitive) operation name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "increase" => Some(Operation::Increase),
            "decrease" => Some(Operation::Decrease),
            _ => None,
        }
    }

    /// The canonical lowercase name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Increase => "increase",
            Operation::Decrease => "decrease",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for LiteralNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralNode::Number(text) => write!(f, "{text}"),
            LiteralNode::Percent(text) => write!(f, "{text}%"),
        }
    }
}

impl fmt::Display for ExpressionNode {
    /// Renders the expression back to canonical source text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionNode::Literal(lit) => write!(f, "{lit}"),
            ExpressionNode::Call(call) => {
                write!(f, "{}({}, {})", call.operation, call.base, call.amount)
            }
        }
    }
}

impl ExpressionNode {
    /// True when this node is a bare percent literal.
    ///
    /// This is the amount-classification predicate: at a call site the
    /// amount argument is a rate only when the node itself is a percent
    /// literal, never when it is a nested call, regardless of what percent
    /// literals occur inside that call.
    pub fn is_percent_literal(&self) -> bool {
        matches!(self, ExpressionNode::Literal(LiteralNode::Percent(_)))
    }

    /// The nesting depth of the expression (literals are depth 0).
    pub fn depth(&self) -> usize {
        match self {
            ExpressionNode::Literal(_) => 0,
            ExpressionNode::Call(call) => 1 + call.base.depth().max(call.amount.depth()),
        }
    }
}
