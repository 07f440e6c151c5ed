// Parser for the Percal expression language using nom over lexed tokens.
//
// GRAMMAR:
//   expression --> literal | call
//   literal    --> NUMBER | PERCENT_NUMBER | IDENT
//   call       --> ("increase" | "decrease") "(" expression "," expression ")"
//
// A bare IDENT in literal position is carried through as numeric text so
// that the evaluator reports it as a number-format error. Commas inside a
// nested call are consumed by that call's own parse, so the two-argument
// split of the outer call is bracket-aware by construction.

use nom::error::ErrorKind;
use nom::IResult;
use percal_ast::{CallExpressionNode, ExpressionNode, LiteralNode, Operation};
use percal_lexer::{Lexer, Token, TokenType};
use thiserror::Error;

pub mod token_stream;
pub use token_stream::{take_token_if, TokenSlice};

/// Default cap on call nesting depth, bounding recursion against
/// adversarial input.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Errors produced by the source-level parse entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Input does not match the literal or call grammar.
    #[error("malformed expression: {0}")]
    Syntax(String),
    /// Call nesting exceeds the configured depth limit.
    #[error("malformed expression: nesting depth exceeds limit of {limit}")]
    DepthExceeded { limit: usize },
    /// Internal invariant violation; not reachable from any input.
    #[error("parser reached an internal inconsistency")]
    Internal,
}

/// Parses a single expression from a token slice with the default depth
/// limit, returning the remaining tokens and the AST node.
pub fn parse_expression(input: TokenSlice<'_>) -> IResult<TokenSlice<'_>, ExpressionNode> {
    parse_expression_at_depth(input, 0, DEFAULT_MAX_DEPTH)
}

fn parse_expression_at_depth<'a>(
    input: TokenSlice<'a>,
    depth: usize,
    max_depth: usize,
) -> IResult<TokenSlice<'a>, ExpressionNode> {
    log::trace!(
        "parse_expression depth={} remaining_tokens={}",
        depth,
        input.len()
    );

    match input.peek().map(|t| &t.token_type) {
        Some(TokenType::Increase) | Some(TokenType::Decrease) => {
            parse_call(input, depth, max_depth)
        }
        // An identifier applied to parentheses is a call form with an
        // unknown operation name; fail hard at the callee token.
        Some(TokenType::Identifier(_))
            if matches!(
                input.peek_second().map(|t| &t.token_type),
                Some(TokenType::LeftParen)
            ) =>
        {
            Err(nom::Err::Failure(nom::error::Error::new(
                input,
                ErrorKind::Tag,
            )))
        }
        Some(_) => {
            let (input, literal) = parse_literal(input)?;
            Ok((input, ExpressionNode::Literal(literal)))
        }
        None => Err(nom::Err::Error(nom::error::Error::new(
            input,
            ErrorKind::Eof,
        ))),
    }
}

/// Parses a literal token into a `LiteralNode`.
///
/// Percent literals are split into their numeric prefix here, making
/// percent-ness a structural fact of the node. Bare identifiers become
/// `Number` text that will fail numeric parsing during evaluation.
pub fn parse_literal(input: TokenSlice<'_>) -> IResult<TokenSlice<'_>, LiteralNode> {
    if let Some(token) = input.peek() {
        match &token.token_type {
            TokenType::Number(text) => Ok((input.advance(), LiteralNode::Number(text.clone()))),
            TokenType::PercentNumber(text) => {
                let prefix = text.trim_end_matches('%').to_string();
                Ok((input.advance(), LiteralNode::Percent(prefix)))
            }
            TokenType::Identifier(name) => {
                Ok((input.advance(), LiteralNode::Number(name.clone())))
            }
            _ => Err(nom::Err::Error(nom::error::Error::new(
                input,
                ErrorKind::Tag,
            ))),
        }
    } else {
        Err(nom::Err::Error(nom::error::Error::new(
            input,
            ErrorKind::Eof,
        )))
    }
}

/// Promote a recoverable error to a failure so that structural errors
/// inside a call do not backtrack (same role as nom's `cut`).
fn cut_err(
    err: nom::Err<nom::error::Error<TokenSlice<'_>>>,
) -> nom::Err<nom::error::Error<TokenSlice<'_>>> {
    match err {
        nom::Err::Error(e) => nom::Err::Failure(e),
        other => other,
    }
}

fn parse_call<'a>(
    input: TokenSlice<'a>,
    depth: usize,
    max_depth: usize,
) -> IResult<TokenSlice<'a>, ExpressionNode> {
    let next_depth = depth + 1;
    if next_depth > max_depth {
        log::debug!("call nesting exceeded limit of {max_depth}");
        return Err(nom::Err::Failure(nom::error::Error::new(
            input,
            ErrorKind::TooLarge,
        )));
    }

    let (input, op_token) = take_token_if(
        |t| matches!(t, TokenType::Increase | TokenType::Decrease),
        ErrorKind::Tag,
    )(input)?;
    let operation = match op_token.token_type {
        TokenType::Increase => Operation::Increase,
        TokenType::Decrease => Operation::Decrease,
        _ => {
            return Err(nom::Err::Failure(nom::error::Error::new(
                input,
                ErrorKind::Fail,
            )))
        }
    };

    // Once the operation keyword is seen the call shape is committed:
    // every error below is a hard failure, not a backtrack point.
    let (input, _) =
        take_token_if(|t| matches!(t, TokenType::LeftParen), ErrorKind::Char)(input)
            .map_err(cut_err)?;
    let (input, base) =
        parse_expression_at_depth(input, next_depth, max_depth).map_err(cut_err)?;
    let (input, _) = take_token_if(|t| matches!(t, TokenType::Comma), ErrorKind::Char)(input)
        .map_err(cut_err)?;
    let (input, amount) =
        parse_expression_at_depth(input, next_depth, max_depth).map_err(cut_err)?;
    let (input, _) =
        take_token_if(|t| matches!(t, TokenType::RightParen), ErrorKind::Char)(input)
            .map_err(cut_err)?;

    Ok((
        input,
        ExpressionNode::Call(Box::new(CallExpressionNode {
            operation,
            base,
            amount,
        })),
    ))
}

/// Parses a complete expression string with the default nesting limit.
pub fn parse_source(source: &str) -> Result<ExpressionNode, ParseError> {
    parse_source_with_limit(source, DEFAULT_MAX_DEPTH)
}

/// Parses a complete expression string, requiring that every token is
/// consumed and that call nesting stays within `max_depth`.
pub fn parse_source_with_limit(
    source: &str,
    max_depth: usize,
) -> Result<ExpressionNode, ParseError> {
    let trimmed = source.trim();
    log::debug!("parse_source: {trimmed:?}");

    if trimmed.is_empty() {
        return Err(ParseError::Syntax("empty expression".to_string()));
    }

    let tokens: Vec<Token> = Lexer::new(trimmed).collect();
    if let Some(bad) = tokens
        .iter()
        .find(|t| matches!(t.token_type, TokenType::Error(_)))
    {
        return Err(ParseError::Syntax(format!(
            "unrecognised input '{}' at {}:{}",
            bad.lexeme, bad.location.line, bad.location.column
        )));
    }

    match parse_expression_at_depth(TokenSlice::new(&tokens), 0, max_depth) {
        Ok((rest, expr)) => {
            if let Some(token) = rest.peek() {
                Err(ParseError::Syntax(format!(
                    "unexpected token '{}' after expression at {}:{}",
                    token.token_type, token.location.line, token.location.column
                )))
            } else {
                Ok(expr)
            }
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(match e.code {
            ErrorKind::TooLarge => ParseError::DepthExceeded { limit: max_depth },
            _ => ParseError::Syntax(describe_failure(&e.input)),
        }),
        Err(nom::Err::Incomplete(_)) => Err(ParseError::Internal),
    }
}

fn describe_failure(input: &TokenSlice<'_>) -> String {
    match input.peek() {
        Some(token) => {
            if let TokenType::Identifier(name) = &token.token_type {
                if matches!(
                    input.peek_second().map(|t| &t.token_type),
                    Some(TokenType::LeftParen)
                ) {
                    return format!(
                        "unknown operation '{name}' at {}:{}",
                        token.location.line, token.location.column
                    );
                }
            }
            format!(
                "unexpected token '{}' at {}:{}",
                token.token_type, token.location.line, token.location.column
            )
        }
        None => "unexpected end of expression".to_string(),
    }
}
