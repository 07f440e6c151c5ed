//! Recursive evaluator for Percal expression trees.
//!
//! The amount argument of a call is classified by the variant of its own
//! node: only a bare percent literal is a rate. A nested call always
//! contributes its evaluated value as an absolute delta to the enclosing
//! operation, even when percent literals occur somewhere inside it. This
//! mirrors the surface-syntax rule of the language (the argument's source
//! text ends with `%` only for a percent literal) and is deliberate; do
//! not generalize it to a semantic percentage tag.

use percal_ast::{ExpressionNode, LiteralNode, Operation};
use percal_parser::{parse_source_with_limit, DEFAULT_MAX_DEPTH};

use crate::error::EvalError;

/// Evaluates a complete expression string with the default nesting limit.
///
/// # Examples
///
/// ```
/// use percal_eval::evaluate;
///
/// assert_eq!(evaluate("increase(10, 1.5%)").unwrap(), 10.15);
/// assert_eq!(evaluate("decrease(10, 2.5%)").unwrap(), 9.75);
/// ```
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    evaluate_with_limit(input, DEFAULT_MAX_DEPTH)
}

/// Evaluates a complete expression string, rejecting call nesting deeper
/// than `max_depth`.
pub fn evaluate_with_limit(input: &str, max_depth: usize) -> Result<f64, EvalError> {
    let expr = parse_source_with_limit(input, max_depth)?;
    let value = evaluate_expr(&expr)?;
    log::debug!("evaluated {input:?} => {value}");
    Ok(value)
}

/// Evaluates a parsed expression tree.
///
/// Recursion depth equals the nesting depth of the tree, which the parser
/// has already bounded.
pub fn evaluate_expr(expr: &ExpressionNode) -> Result<f64, EvalError> {
    match expr {
        ExpressionNode::Literal(literal) => evaluate_literal(literal),
        ExpressionNode::Call(call) => {
            let base = evaluate_expr(&call.base)?;
            let raw_amount = evaluate_expr(&call.amount)?;

            // Rate versus absolute delta is decided by the amount node's
            // own variant, not by its evaluated value.
            let delta = if call.amount.is_percent_literal() {
                base * raw_amount
            } else {
                raw_amount
            };

            Ok(match call.operation {
                Operation::Increase => base + delta,
                Operation::Decrease => base - delta,
            })
        }
    }
}

fn evaluate_literal(literal: &LiteralNode) -> Result<f64, EvalError> {
    match literal {
        LiteralNode::Number(text) => parse_number(text),
        // A percent literal evaluates to a fractional rate: 1.5% => 0.015.
        LiteralNode::Percent(text) => Ok(parse_number(text)? / 100.0),
    }
}

/// Parses a literal's numeric text, restricted to plain decimal form:
/// digits with at most one decimal point. `f64::from_str` alone would
/// also admit exponents, infinities, and signs, none of which the
/// language grammar allows.
fn parse_number(text: &str) -> Result<f64, EvalError> {
    let valid_shape = !text.is_empty()
        && text.chars().all(|c| c.is_ascii_digit() || c == '.')
        && text.chars().filter(|&c| c == '.').count() <= 1
        && text.chars().any(|c| c.is_ascii_digit());
    if !valid_shape {
        return Err(EvalError::NumberFormat(text.to_string()));
    }
    text.parse::<f64>()
        .map_err(|_| EvalError::NumberFormat(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use percal_ast::CallExpressionNode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_number_literal_evaluates_to_itself() {
        assert_eq!(evaluate("10").unwrap(), 10.0);
        assert_eq!(evaluate("1.5").unwrap(), 1.5);
        assert_eq!(evaluate(".5").unwrap(), 0.5);
    }

    #[test]
    fn test_percent_literal_evaluates_to_rate() {
        assert_eq!(evaluate("1.5%").unwrap(), 0.015);
        assert_eq!(evaluate("100%").unwrap(), 1.0);
    }

    #[test]
    fn test_nested_call_amount_is_an_absolute_delta() {
        // Inner call: 10 + 10 * 0.015 = 10.15. The outer amount is a call,
        // so 10.15 is added as-is: 10 + 10.15 = 20.15 (not 10 * 10.15).
        assert_eq!(evaluate("increase(10, increase(10, 1.5%))").unwrap(), 20.15);
    }

    #[test]
    fn test_malformed_number_in_literal_position() {
        assert_eq!(
            evaluate("1.2.3"),
            Err(EvalError::NumberFormat("1.2.3".to_string()))
        );
        assert_eq!(
            evaluate("abc"),
            Err(EvalError::NumberFormat("abc".to_string()))
        );
    }

    #[test]
    fn test_evaluate_expr_on_hand_built_tree() {
        let expr = ExpressionNode::Call(Box::new(CallExpressionNode {
            operation: Operation::Decrease,
            base: ExpressionNode::Literal(LiteralNode::Number("10".to_string())),
            amount: ExpressionNode::Literal(LiteralNode::Percent("2.5".to_string())),
        }));
        assert_eq!(evaluate_expr(&expr).unwrap(), 9.75);
    }

    #[test]
    fn test_dot_only_text_is_a_number_format_error() {
        assert_eq!(evaluate("."), Err(EvalError::NumberFormat(".".to_string())));
    }
}
