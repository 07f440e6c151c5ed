//! Lexer for the Percal expression language using the 'logos' crate.
//! Recognizes operation keywords, numeric text, percent literals, and
//! the call-form delimiters.

use crate::token::{Location, Token, TokenType};
use logos::Logos;

/// Raw token type used by the logos lexer.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum LogosToken {
    // Numeric text with a trailing percent sign. Must come before the bare
    // number pattern so `1.5%` lexes as one token.
    #[regex(r"[0-9.]+%", |lex| lex.slice().to_string(), priority = 3)]
    PercentNumber(String),

    // Numeric text. Deliberately loose (`1.2.3` matches): validity of the
    // decimal text is decided at evaluation time, not here.
    #[regex(r"[0-9.]+", |lex| lex.slice().to_string())]
    Number(String),

    // Bare words. Operation keywords are resolved case-insensitively in
    // the conversion step below.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,

    // Whitespace (skipped)
    #[regex(r"[ \t\n\r]+", logos::skip)]
    Whitespace,
}

/// Percal expression lexer.
pub struct Lexer<'source> {
    /// The logos lexer instance
    logos_lexer: logos::Lexer<'source, LogosToken>,
    /// Current line number (1-based)
    line: usize,
    /// Current column number (1-based)
    column: usize,
    /// Current byte offset in source
    offset: usize,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'source str) -> Self {
        Self {
            logos_lexer: LogosToken::lexer(source),
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Convert a LogosToken to our semantic Token type.
    fn convert_token(&self, logos_token: LogosToken, lexeme: &str) -> Token {
        let location = Location {
            line: self.line,
            column: self.column,
            offset: self.offset,
        };

        let token_type = match logos_token {
            LogosToken::PercentNumber(s) => TokenType::PercentNumber(s),
            LogosToken::Number(s) => TokenType::Number(s),

            // The two operation keywords are case-insensitive; anything
            // else stays a plain identifier for the parser to reject.
            LogosToken::Ident(s) => match s.to_ascii_lowercase().as_str() {
                "increase" => TokenType::Increase,
                "decrease" => TokenType::Decrease,
                _ => TokenType::Identifier(s),
            },

            LogosToken::LParen => TokenType::LeftParen,
            LogosToken::RParen => TokenType::RightParen,
            LogosToken::Comma => TokenType::Comma,

            // Skipped by logos; kept only for match exhaustiveness.
            LogosToken::Whitespace => {
                TokenType::Error(format!("Invalid token at {}:{}", self.line, self.column))
            }
        };

        Token::new(token_type, lexeme.to_string(), location)
    }

    /// Update line and column numbers based on the consumed lexeme.
    fn update_position(&mut self, lexeme: &str) {
        for c in lexeme.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.offset += c.len_utf8();
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.logos_lexer.next()?;
        let lexeme = self.logos_lexer.slice();
        let token = match logos_token {
            Ok(token) => self.convert_token(token, lexeme),
            Err(_) => {
                log::debug!("lexer error at {}:{}: {:?}", self.line, self.column, lexeme);
                Token::new(
                    TokenType::Error(format!("Invalid token at {}:{}", self.line, self.column)),
                    lexeme.to_string(),
                    Location {
                        line: self.line,
                        column: self.column,
                        offset: self.offset,
                    },
                )
            }
        };
        self.update_position(lexeme);
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token_types(source: &str) -> Vec<TokenType> {
        Lexer::new(source).map(|t| t.token_type).collect()
    }

    #[test]
    fn test_lexer_call_form() {
        let source = "increase(10, 1.5%)";
        assert_eq!(
            token_types(source),
            vec![
                TokenType::Increase,
                TokenType::LeftParen,
                TokenType::Number("10".to_string()),
                TokenType::Comma,
                TokenType::PercentNumber("1.5%".to_string()),
                TokenType::RightParen,
            ]
        );
    }

    #[test]
    fn test_lexer_keywords_are_case_insensitive() {
        assert_eq!(token_types("InCrEaSe"), vec![TokenType::Increase]);
        assert_eq!(token_types("DECREASE"), vec![TokenType::Decrease]);
    }

    #[test]
    fn test_lexer_keeps_raw_numeric_text() {
        // Malformed decimal text still lexes as one token; the evaluator
        // is responsible for rejecting it as a bad number.
        assert_eq!(
            token_types("1.2.3"),
            vec![TokenType::Number("1.2.3".to_string())]
        );
    }

    #[test]
    fn test_lexer_percent_binds_to_the_number() {
        let source = "decrease (10, 2.5%)";
        let tokens: Vec<Token> = Lexer::new(source).collect();
        assert_eq!(
            tokens[3].token_type,
            TokenType::PercentNumber("2.5%".to_string())
        );
        assert_eq!(tokens[3].lexeme, "2.5%");
    }

    #[test]
    fn test_lexer_tracks_location() {
        let tokens: Vec<Token> = Lexer::new("increase(10, 1.5%)").collect();
        assert_eq!(tokens[0].location.line, 1);
        assert_eq!(tokens[0].location.column, 1);
        // "10" starts right after "increase("
        assert_eq!(tokens[2].location.column, 10);
        assert_eq!(tokens[2].location.offset, 9);
    }

    #[test]
    fn test_lexer_unrecognised_character() {
        let types = token_types("10 @ 20");
        assert!(matches!(types[1], TokenType::Error(_)));
    }
}
