//! Recursive descent parser for equation source text.
//!
//! Grammar:
//! ```text
//! Equation := Term ('+' Term)* '=' Term ('+' Term)*
//! Term     := (Group | Element | 'e')* ('^' Number? ('+'|'-'))?
//! Group    := '(' (Group|Element)+ ')' Number?
//! Element  := Uppercase-Symbol Number?
//! Number   := digits | ε(=1)
//! ```
//! The parser is the only producer of [`Equation`] values and must consume
//! the entire input. Every syntax error carries the `[start, end)` character
//! range where the problem was detected.

use crate::ast::{Equation, Formula, Term, ELECTRON};
use crate::error::{Error, Result};
use crate::num;
use crate::token::{Token, TokenKind};
use crate::tokenizer::Tokenizer;

/// Parses a full equation such as `H2 + O2 = H2O`.
pub fn parse(input: &str) -> Result<Equation> {
    Parser::new(input).parse_equation()
}

fn is_element(token: &Token) -> bool {
    token.kind == TokenKind::Symbol && token.text.starts_with(|c: char| c.is_ascii_uppercase())
}

struct Parser {
    tok: Tokenizer,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            tok: Tokenizer::new(input),
        }
    }

    fn parse_equation(&mut self) -> Result<Equation> {
        let mut left = vec![self.parse_term()?];
        loop {
            match self.tok.peek()? {
                Some(t) if t.kind == TokenKind::Plus => {
                    self.tok.consume("+")?;
                    left.push(self.parse_term()?);
                }
                Some(t) if t.kind == TokenKind::Equals => {
                    self.tok.consume("=")?;
                    break;
                }
                _ => {
                    return Err(Error::syntax_at(
                        self.tok.position(),
                        "plus or equal sign expected",
                    ))
                }
            }
        }

        let mut right = vec![self.parse_term()?];
        loop {
            match self.tok.peek()? {
                None => break,
                Some(t) if t.kind == TokenKind::Plus => {
                    self.tok.consume("+")?;
                    right.push(self.parse_term()?);
                }
                _ => {
                    return Err(Error::syntax_at(
                        self.tok.position(),
                        "plus or end of input expected",
                    ))
                }
            }
        }
        Ok(Equation { left, right })
    }

    fn parse_term(&mut self) -> Result<Term> {
        let start = self.tok.position();

        let mut items = Vec::new();
        let mut electron = false;
        loop {
            match self.tok.peek()? {
                Some(t) if t.kind == TokenKind::OpenParen => items.push(self.parse_group()?),
                Some(t) if t.kind == TokenKind::Symbol && t.text == ELECTRON => {
                    self.tok.consume(ELECTRON)?;
                    electron = true;
                }
                Some(t) if is_element(&t) => items.push(self.parse_element()?),
                Some(t) if t.kind == TokenKind::Number => {
                    return Err(Error::syntax_at(self.tok.position(), "number not expected"));
                }
                _ => break,
            }
        }

        let mut charge = None;
        if matches!(self.tok.peek()?, Some(t) if t.kind == TokenKind::Caret) {
            self.tok.consume("^")?;
            if self.tok.peek()?.is_none() {
                return Err(Error::syntax_at(
                    self.tok.position(),
                    "number or sign expected",
                ));
            }
            let magnitude = self.parse_optional_number()?;
            charge = Some(match self.tok.peek()? {
                Some(t) if t.kind == TokenKind::Plus => magnitude,
                Some(t) if t.kind == TokenKind::Minus => -magnitude,
                _ => return Err(Error::syntax_at(self.tok.position(), "sign expected")),
            });
            self.tok.take()?; // the sign
        }

        if electron {
            if !items.is_empty() {
                return Err(Error::syntax_span(
                    start,
                    self.tok.position(),
                    "electron must stand alone in a term",
                ));
            }
            let charge = charge.unwrap_or(-1);
            if charge != -1 {
                return Err(Error::syntax_span(
                    start,
                    self.tok.position(),
                    "invalid charge for electron",
                ));
            }
            Ok(Term { items, charge })
        } else {
            if items.is_empty() {
                return Err(Error::syntax_span(start, self.tok.position(), "empty term"));
            }
            Ok(Term {
                items,
                charge: charge.unwrap_or(0),
            })
        }
    }

    fn parse_group(&mut self) -> Result<Formula> {
        let start = self.tok.position();
        self.tok.consume("(")?;
        let mut items = Vec::new();
        loop {
            match self.tok.peek()? {
                Some(t) if t.kind == TokenKind::OpenParen => items.push(self.parse_group()?),
                Some(t) if is_element(&t) => items.push(self.parse_element()?),
                Some(t) if t.kind == TokenKind::CloseParen => {
                    self.tok.consume(")")?;
                    if items.is_empty() {
                        return Err(Error::syntax_span(
                            start,
                            self.tok.position(),
                            "empty group",
                        ));
                    }
                    break;
                }
                _ => {
                    return Err(Error::syntax_at(
                        self.tok.position(),
                        "element, group, or closing parenthesis expected",
                    ))
                }
            }
        }
        Ok(Formula::Group {
            items,
            count: self.parse_optional_number()?,
        })
    }

    fn parse_element(&mut self) -> Result<Formula> {
        let token = self.tok.take()?;
        Ok(Formula::Element {
            symbol: token.text,
            count: self.parse_optional_number()?,
        })
    }

    /// Parses a number if one is next, defaulting to 1.
    fn parse_optional_number(&mut self) -> Result<i64> {
        match self.tok.peek()? {
            Some(t) if t.kind == TokenKind::Number => {
                let token = self.tok.take()?;
                num::parse_int(&token.text)
            }
            _ => Ok(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(symbol: &str, count: i64) -> Formula {
        Formula::Element {
            symbol: symbol.into(),
            count,
        }
    }

    fn syntax_error(input: &str) -> (usize, usize, &'static str) {
        match parse(input).unwrap_err() {
            Error::Syntax {
                start,
                end,
                message,
            } => (start, end, message),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn parses_a_simple_equation() {
        let eq = parse("H2 + O2 = H2O").unwrap();
        assert_eq!(eq.left.len(), 2);
        assert_eq!(eq.right.len(), 1);
        assert_eq!(
            eq.left[0],
            Term {
                items: vec![element("H", 2)],
                charge: 0,
            }
        );
        assert_eq!(
            eq.right[0],
            Term {
                items: vec![element("H", 2), element("O", 1)],
                charge: 0,
            }
        );
    }

    #[test]
    fn parses_nested_groups() {
        let eq = parse("K4Fe(CN)6 = ((H2O)2)3").unwrap();
        let left = &eq.left[0];
        assert_eq!(left.count_element("K").unwrap(), 4);
        assert_eq!(left.count_element("C").unwrap(), 6);
        assert_eq!(left.count_element("N").unwrap(), 6);
        let right = &eq.right[0];
        assert_eq!(right.count_element("H").unwrap(), 12);
        assert_eq!(right.count_element("O").unwrap(), 6);
    }

    #[test]
    fn parses_charges() {
        let eq = parse("Cr2O7^2- + Na^+ = OH^- + Cr^3+").unwrap();
        assert_eq!(eq.left[0].charge, -2);
        assert_eq!(eq.left[1].charge, 1);
        assert_eq!(eq.right[0].charge, -1);
        assert_eq!(eq.right[1].charge, 3);
    }

    #[test]
    fn charge_magnitude_defaults_to_one() {
        let eq = parse("H^+ = H^1+").unwrap();
        assert_eq!(eq.left[0].charge, 1);
        assert_eq!(eq.right[0].charge, 1);
    }

    #[test]
    fn parses_electron_terms() {
        let eq = parse("Fe^3+ + e = Fe^2+").unwrap();
        assert!(eq.left[1].is_electron());
        let eq = parse("e^- = e").unwrap();
        assert!(eq.left[0].is_electron());
        assert!(eq.right[0].is_electron());
    }

    #[test]
    fn electron_must_stand_alone() {
        let (start, end, message) = syntax_error("Fe e = Fe");
        assert_eq!((start, end), (0, 5));
        assert_eq!(message, "electron must stand alone in a term");
    }

    #[test]
    fn electron_charge_must_be_minus_one() {
        let (.., message) = syntax_error("e^2- = e");
        assert_eq!(message, "invalid charge for electron");
        let (.., message) = syntax_error("e^+ = e");
        assert_eq!(message, "invalid charge for electron");
    }

    #[test]
    fn leading_number_is_rejected() {
        let (start, end, message) = syntax_error("2H2 = H2");
        assert_eq!((start, end), (0, 0));
        assert_eq!(message, "number not expected");
    }

    #[test]
    fn empty_group_is_rejected() {
        // The range's end sits after the whitespace the tokenizer skipped;
        // `Error::highlight` trims it back for display.
        let (start, end, message) = syntax_error("() = H2");
        assert_eq!((start, end), (0, 3));
        assert_eq!(message, "empty group");
    }

    #[test]
    fn unterminated_group_points_at_the_missing_paren() {
        let (start, end, message) = syntax_error("(OH");
        assert_eq!((start, end), (3, 3));
        assert_eq!(message, "element, group, or closing parenthesis expected");
    }

    #[test]
    fn missing_right_side_term_is_an_empty_term() {
        let (start, end, message) = syntax_error("H2 = ");
        assert_eq!((start, end), (5, 5));
        assert_eq!(message, "empty term");
    }

    #[test]
    fn charge_requires_a_trailing_sign() {
        let (start, _, message) = syntax_error("H2^2 = H2");
        assert_eq!(start, 5);
        assert_eq!(message, "sign expected");
        let (start, _, message) = syntax_error("H2^");
        assert_eq!(start, 3);
        assert_eq!(message, "number or sign expected");
    }

    #[test]
    fn input_must_be_consumed_entirely() {
        let (start, _, message) = syntax_error("H2 = H2)");
        assert_eq!(start, 7);
        assert_eq!(message, "plus or end of input expected");
    }

    #[test]
    fn whitespace_inside_a_term_is_insignificant() {
        // "H2 H2" is one term with four hydrogens, as if written "H2H2".
        let eq = parse("H2 H2 = H4").unwrap();
        assert_eq!(eq.left.len(), 1);
        assert_eq!(eq.left[0].count_element("H").unwrap(), 4);
    }

    #[test]
    fn missing_equals_sign_is_reported() {
        let (start, _, message) = syntax_error("H2 - O2");
        assert_eq!(start, 3);
        assert_eq!(message, "plus or equal sign expected");
    }

    #[test]
    fn lexical_errors_surface_with_their_offset() {
        let (start, end, message) = syntax_error("H2 + $ = H2");
        assert_eq!((start, end), (5, 5));
        assert_eq!(message, "invalid symbol");
    }

    #[test]
    fn count_literal_above_the_bound_overflows() {
        assert_eq!(parse("H9007199254740992 = H2"), Err(Error::Overflow));
    }
}
