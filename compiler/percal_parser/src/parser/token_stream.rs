use nom::error::ErrorKind;
use nom::IResult;
use percal_lexer::{Token, TokenType};

/// A slice of lexed tokens used as the nom input type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenSlice<'a>(pub &'a [Token]);

impl<'a> TokenSlice<'a> {
    /// Create a new token slice from a slice of tokens.
    pub fn new(tokens: &'a [Token]) -> Self {
        TokenSlice(tokens)
    }

    /// Get the current token without advancing.
    pub fn peek(&self) -> Option<&'a Token> {
        self.0.first()
    }

    /// Look one token past the current one.
    pub fn peek_second(&self) -> Option<&'a Token> {
        self.0.get(1)
    }

    /// A slice advanced past the current token.
    pub fn advance(&self) -> Self {
        TokenSlice(&self.0[1.min(self.0.len())..])
    }

    /// Check if we're at the end of input.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of tokens remaining.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Consume the next token if it satisfies the predicate, otherwise fail
/// with the given nom error kind.
pub fn take_token_if<'a, F>(
    pred: F,
    kind: ErrorKind,
) -> impl Fn(TokenSlice<'a>) -> IResult<TokenSlice<'a>, &'a Token>
where
    F: Fn(&TokenType) -> bool,
{
    move |input: TokenSlice<'a>| match input.peek() {
        Some(token) if pred(&token.token_type) => Ok((input.advance(), token)),
        _ => Err(nom::Err::Error(nom::error::Error::new(input, kind))),
    }
}
