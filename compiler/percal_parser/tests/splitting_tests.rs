// Integration tests for the bracket-aware argument split: a comma that
// belongs to a nested call must never partition the enclosing call's
// argument list, no matter which side the nesting occurs on.

use percal_ast::{ExpressionNode, LiteralNode, Operation};
use percal_parser::parse_source;

fn as_call(expr: &ExpressionNode) -> (&Operation, &ExpressionNode, &ExpressionNode) {
    match expr {
        ExpressionNode::Call(call) => (&call.operation, &call.base, &call.amount),
        other => panic!("expected a call, got {other:?}"),
    }
}

#[test]
fn nested_amount_argument_keeps_its_comma() {
    let expr = parse_source("increase(10, increase(10, 1.5%))").unwrap();
    let (op, base, amount) = as_call(&expr);
    assert_eq!(*op, Operation::Increase);
    assert_eq!(
        *base,
        ExpressionNode::Literal(LiteralNode::Number("10".to_string()))
    );
    // The amount must be the whole inner call, not a mis-partitioned slice.
    assert_eq!(amount.to_string(), "increase(10, 1.5%)");
}

#[test]
fn nested_base_argument_keeps_its_comma() {
    let expr = parse_source("decrease(increase(100, 5%), 2.5%)").unwrap();
    let (op, base, amount) = as_call(&expr);
    assert_eq!(*op, Operation::Decrease);
    assert_eq!(base.to_string(), "increase(100, 5%)");
    assert_eq!(
        *amount,
        ExpressionNode::Literal(LiteralNode::Percent("2.5".to_string()))
    );
}

#[test]
fn both_arguments_may_nest() {
    let expr = parse_source("increase(decrease(10, 1%), increase(20, 2%))").unwrap();
    let (_, base, amount) = as_call(&expr);
    assert_eq!(base.to_string(), "decrease(10, 1%)");
    assert_eq!(amount.to_string(), "increase(20, 2%)");
}

#[test]
fn deeply_nested_expressions_round_trip_through_display() {
    // Build increase(1, increase(1, ... increase(1, 5%) ...)) and check
    // that parsing and re-rendering preserves the structure at any depth
    // the configured limit allows.
    let mut source = String::from("5%");
    for _ in 0..32 {
        source = format!("increase(1, {source})");
    }
    let expr = parse_source(&source).unwrap();
    assert_eq!(expr.to_string(), source);
    assert_eq!(expr.depth(), 32);
}

#[test]
fn comma_outside_any_call_is_rejected() {
    assert!(parse_source("10, 20").is_err());
    assert!(parse_source(",").is_err());
}
