use percal_parser::ParseError;
use thiserror::Error;

/// The error taxonomy of a Percal evaluation.
///
/// Every `evaluate` call is independent: an error from a sub-expression
/// propagates unchanged to the caller, with no wrapping, retry, or
/// partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Input does not match the literal or call grammar: unbalanced
    /// parentheses, unknown operation name, wrong argument count, or
    /// nesting beyond the configured depth limit.
    #[error("malformed expression: {0}")]
    Malformed(String),
    /// The text in a literal position is not a valid decimal number.
    #[error("invalid number: '{0}'")]
    NumberFormat(String),
    /// Internal invariant violation. Never produced by grammar matching;
    /// reserved for states the evaluator considers unreachable.
    #[error("internal evaluator error: {0}")]
    Internal(&'static str),
}

impl EvalError {
    /// Short machine-readable name of the error kind, used by the CLI's
    /// JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            EvalError::Malformed(_) => "malformed-expression",
            EvalError::NumberFormat(_) => "number-format",
            EvalError::Internal(_) => "internal",
        }
    }
}

impl From<ParseError> for EvalError {
    fn from(err: ParseError) -> Self {
        match err {
            // Syntax and depth errors are both grammar violations.
            ParseError::Syntax(msg) => EvalError::Malformed(msg),
            ParseError::DepthExceeded { limit } => {
                EvalError::Malformed(format!("nesting depth exceeds limit of {limit}"))
            }
            ParseError::Internal => EvalError::Internal("parser reported an incomplete input"),
        }
    }
}
