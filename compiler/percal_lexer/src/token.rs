use std::fmt;

/// Represents a token's location in the source text.
///
/// Tracks 1-based line and column numbers and the 0-based byte offset
/// from the start of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// The 1-based line number
    pub line: usize,
    /// The 1-based column number
    pub column: usize,
    /// The 0-based byte offset from the start of the source
    pub offset: usize,
}

/// The type of a token in the Percal expression language.
///
/// Number-like tokens carry their raw source text rather than a parsed
/// value: whether the text is a valid decimal number is decided at
/// evaluation time, so that `1.2.3` lexes as a single token and surfaces
/// as a number-format error instead of a stray-character error.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    /// The `increase` operation keyword (matched case-insensitively)
    Increase,
    /// The `decrease` operation keyword (matched case-insensitively)
    Decrease,
    /// Raw numeric text such as `10` or `1.5` (not yet validated)
    Number(String),
    /// Raw numeric text with a trailing percent sign, e.g. `1.5%`
    PercentNumber(String),
    /// Any other bare word
    Identifier(String),
    LeftParen,
    RightParen,
    Comma,
    /// Unrecognised input, with a diagnostic message
    Error(String),
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Increase => write!(f, "increase"),
            TokenType::Decrease => write!(f, "decrease"),
            TokenType::Number(s) => write!(f, "{s}"),
            TokenType::PercentNumber(s) => write!(f, "{s}"),
            TokenType::Identifier(s) => write!(f, "{s}"),
            TokenType::LeftParen => write!(f, "("),
            TokenType::RightParen => write!(f, ")"),
            TokenType::Comma => write!(f, ","),
            TokenType::Error(msg) => write!(f, "ERROR({msg})"),
        }
    }
}

/// A token with its type, original lexeme, and source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    /// The original text of the token as it appeared in the source
    pub lexeme: String,
    pub location: Location,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, location: Location) -> Self {
        Token {
            token_type,
            lexeme,
            location,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}:{}",
            self.token_type, self.location.line, self.location.column
        )
    }
}
