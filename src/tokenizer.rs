//! Cursor-based tokenizer over an equation source string.
//!
//! Tokens are recognized by longest match: a letter followed by lowercase
//! letters, a digit run, or one of `+ - ^ = ( )`. Space and tab between
//! tokens are skipped silently; any other character is a lexical failure
//! carrying the current offset.

use crate::error::{Error, Result};
use crate::token::{Token, TokenKind};

pub struct Tokenizer {
    chars: Vec<char>,
    position: usize,
}

impl Tokenizer {
    pub fn new(input: &str) -> Self {
        let mut tokenizer = Self {
            chars: input.chars().collect(),
            position: 0,
        };
        tokenizer.skip_spaces();
        tokenizer
    }

    /// Character offset of the next unconsumed token (or of the end of
    /// input). Used by the parser for error ranges.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the next token without consuming it, or `None` at end of
    /// input.
    pub fn peek(&self) -> Result<Option<Token>> {
        let Some((kind, len)) = self.scan()? else {
            return Ok(None);
        };
        Ok(Some(Token {
            kind,
            text: self.chars[self.position..self.position + len]
                .iter()
                .collect(),
            position: self.position,
        }))
    }

    /// Consumes and returns the next token, failing at end of input.
    pub fn take(&mut self) -> Result<Token> {
        match self.scan()? {
            Some((kind, len)) => {
                let token = Token {
                    kind,
                    text: self.chars[self.position..self.position + len]
                        .iter()
                        .collect(),
                    position: self.position,
                };
                self.position += len;
                self.skip_spaces();
                Ok(token)
            }
            None => Err(Error::syntax_at(self.position, "unexpected end of input")),
        }
    }

    /// Consumes the next token and fails unless its text matches `expected`.
    pub fn consume(&mut self, expected: &str) -> Result<()> {
        let token = self.take()?;
        if token.text != expected {
            return Err(Error::syntax_at(token.position, "unexpected token"));
        }
        Ok(())
    }

    fn skip_spaces(&mut self) {
        while matches!(self.chars.get(self.position).copied(), Some(' ' | '\t')) {
            self.position += 1;
        }
    }

    /// Recognizes the token at the cursor, returning its kind and length in
    /// characters without moving the cursor.
    fn scan(&self) -> Result<Option<(TokenKind, usize)>> {
        let Some(c) = self.chars.get(self.position).copied() else {
            return Ok(None);
        };
        let token = match c {
            'A'..='Z' | 'a'..='z' => {
                let mut len = 1;
                while matches!(
                    self.chars.get(self.position + len).copied(),
                    Some('a'..='z')
                ) {
                    len += 1;
                }
                (TokenKind::Symbol, len)
            }
            '0'..='9' => {
                let mut len = 1;
                while matches!(
                    self.chars.get(self.position + len).copied(),
                    Some('0'..='9')
                ) {
                    len += 1;
                }
                (TokenKind::Number, len)
            }
            '+' => (TokenKind::Plus, 1),
            '-' => (TokenKind::Minus, 1),
            '^' => (TokenKind::Caret, 1),
            '=' => (TokenKind::Equals, 1),
            '(' => (TokenKind::OpenParen, 1),
            ')' => (TokenKind::CloseParen, 1),
            _ => return Err(Error::syntax_at(self.position, "invalid symbol")),
        };
        Ok(Some(token))
    }
}
