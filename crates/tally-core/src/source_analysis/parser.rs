// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for Tally expressions.
//!
//! # Primary Expressions
//!
//! A primary expression is resolved by ordered speculative attempts:
//! integer literal first, then unary expression, then bracketed
//! expression. Each attempt saves the cursor and restores it on
//! failure, so a failed alternative leaves no trace. The ordering is
//! for efficiency only; no alternative can both match and be wrong for
//! this grammar.
//!
//! When every alternative fails, the surfaced error comes from the
//! attempt that consumed the most tokens before failing. A three-way
//! tie at zero progress means nothing matched at all, and the error
//! names the offending token together with the acceptable forms.
//!
//! # Binary Operators (Precedence Climbing)
//!
//! | Precedence | Operators | Associativity |
//! |------------|-----------|---------------|
//! | 20         | `+` `-`   | Left          |
//! | 30         | `*` `/`   | Left          |
//!
//! Higher binds tighter. The climbing loop consumes operators at or
//! above the current threshold and recursively climbs into the
//! right-hand side only for strictly higher precedence, which is what
//! makes equal-precedence chains associate left (`8-3-2` parses as
//! `(8-3)-2`) while `2+3*4` parses as `2+(3*4)`.
//!
//! Unary `+`/`-` bind tighter than any binary operator: a unary
//! expression is resolved entirely within a primary, before the
//! climbing loop ever sees a binary operator, so `-5+3` is `(-5)+3`.
//!
//! # Usage
//!
//! ```
//! use tally_core::source_analysis::parse;
//!
//! let expression = parse("2+3*4").unwrap();
//! assert_eq!(
//!     serde_json::to_value(expression.describe()).unwrap()["op"],
//!     "+",
//! );
//! ```

use ecow::EcoString;

use crate::ast::Expression;

use super::cursor::TokenCursor;
use super::error::ParseError;
use super::lexer::lex_filtered;
use super::token::{TokenKind, TokenValue};

/// Returns the precedence of a binary operator kind, or `None` for
/// kinds that are not binary operators.
///
/// Higher values bind tighter.
fn binary_precedence(kind: TokenKind) -> Option<u8> {
    match kind {
        // Additive
        TokenKind::Plus | TokenKind::Minus => Some(20),
        // Multiplicative
        TokenKind::Asterisk | TokenKind::Slash => Some(30),
        _ => None,
    }
}

/// Parses source text into an expression tree.
///
/// This is the main entry point: it lexes the text (dropping
/// whitespace), parses a complete expression, and verifies that every
/// token was consumed.
///
/// # Examples
///
/// ```
/// use tally_core::source_analysis::parse;
///
/// assert!(parse("4*5+3*(2+1)").is_ok());
/// assert!(parse("(1+2").is_err());
/// ```
///
/// # Errors
///
/// Fails with [`ParseError`] when tokenization fails, when the grammar
/// rejects the token sequence, or when tokens remain after a complete
/// expression.
pub fn parse(source: &str) -> Result<Expression, ParseError> {
    let tokens = lex_filtered(source)?;
    let mut parser = Parser::new(TokenCursor::new(tokens));
    let expression = parser.parse_expression()?;
    parser.finish()?;
    Ok(expression)
}

/// The parser state: a token cursor and nothing else. Each parse owns
/// its own cursor, so parsing is reentrant.
struct Parser {
    cursor: TokenCursor,
}

/// A failed speculative attempt: how many tokens it consumed before
/// failing, and the error it failed with.
type Failure = (usize, ParseError);

impl Parser {
    fn new(cursor: TokenCursor) -> Self {
        Self { cursor }
    }

    /// Parses a complete expression: a primary followed by binary
    /// operator climbing from the zero threshold.
    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let lhs = self.parse_primary()?;
        self.parse_binary(lhs, 0)
    }

    /// Precedence climbing over binary operators.
    ///
    /// Consumes operators whose precedence is at least `min_precedence`.
    /// After each operator's provisional right-hand side, any following
    /// operator of strictly higher precedence climbs into that side
    /// first, so it binds tighter than the pending combination.
    fn parse_binary(
        &mut self,
        mut lhs: Expression,
        min_precedence: u8,
    ) -> Result<Expression, ParseError> {
        while let Some(precedence) = self.peek_binary_precedence() {
            if precedence < min_precedence {
                break;
            }

            let op = self.pop_operator_text()?;
            let mut rhs = self.parse_primary()?;

            while let Some(next) = self.peek_binary_precedence() {
                if next <= precedence {
                    break;
                }
                rhs = self.parse_binary(rhs, next)?;
            }

            lhs = Expression::binary(lhs, op, rhs);
        }

        Ok(lhs)
    }

    /// Returns the precedence of the next token if it is a binary
    /// operator; `None` at end of input or for any other kind.
    fn peek_binary_precedence(&self) -> Option<u8> {
        self.cursor
            .peek()
            .ok()
            .and_then(|token| binary_precedence(token.kind()))
    }

    /// Consumes the next token and returns its matched operator text.
    fn pop_operator_text(&mut self) -> Result<EcoString, ParseError> {
        let token = self.cursor.pop()?;
        match token.value() {
            TokenValue::Text(text) => Ok(text.clone()),
            TokenValue::Integer(_) => Err(ParseError::unexpected_token_kind(
                "a binary operator",
                token.kind(),
                token.span(),
            )),
        }
    }

    /// Parses a primary expression by ordered speculative attempts.
    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        let first = match self.attempt(Self::parse_integer_literal) {
            Ok(expression) => return Ok(expression),
            Err(failure) => failure,
        };
        let second = match self.attempt(Self::parse_unary) {
            Ok(expression) => return Ok(expression),
            Err(failure) => failure,
        };
        let third = match self.attempt(Self::parse_bracketed) {
            Ok(expression) => return Ok(expression),
            Err(failure) => failure,
        };

        let (progress, error) = furthest(furthest(first, second), third);
        if progress > 0 {
            // One alternative got past its leading token before
            // failing; its error is the precise one.
            return Err(error);
        }

        // Nothing matched at all: name the offending token and the
        // acceptable forms. Peeking an exhausted cursor propagates
        // UnexpectedEndOfInput instead.
        let found = self.cursor.peek()?;
        Err(ParseError::unexpected_token(found.kind(), found.span()))
    }

    /// Runs one speculative grammar alternative.
    ///
    /// Saves the cursor position, runs the rule, and commits on
    /// success or restores on failure, so a failed attempt leaves the
    /// cursor exactly where it started. Failures report how far the
    /// rule advanced before failing.
    fn attempt<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, Failure> {
        self.cursor.save();
        let start = self.cursor.position();
        match rule(self) {
            Ok(value) => {
                self.cursor.commit();
                Ok(value)
            }
            Err(error) => {
                let progress = self.cursor.position() - start;
                self.cursor.restore();
                Err((progress, error))
            }
        }
    }

    /// Parses an integer literal token into a leaf node.
    fn parse_integer_literal(&mut self) -> Result<Expression, ParseError> {
        let token = self.expect(TokenKind::Integer, "an integer")?;
        match token.value().as_integer() {
            Some(value) => Ok(Expression::integer(value)),
            // A hand-built Integer token without a converted value.
            None => Err(ParseError::unexpected_token_kind(
                "an integer",
                token.kind(),
                token.span(),
            )),
        }
    }

    /// Parses a unary `+`/`-` applied to a primary expression.
    fn parse_unary(&mut self) -> Result<Expression, ParseError> {
        let token = self.peek_expecting(
            "a unary operator",
            |kind| kind.is_unary_operator(),
        )?;
        match token.value() {
            TokenValue::Text(op) => {
                let op = op.clone();
                let operand = self.parse_primary()?;
                Ok(Expression::unary(op, operand))
            }
            // A hand-built operator token without its matched text.
            TokenValue::Integer(_) => Err(ParseError::unexpected_token_kind(
                "a unary operator",
                token.kind(),
                token.span(),
            )),
        }
    }

    /// Parses a parenthesized expression; the brackets group but do
    /// not appear in the tree.
    fn parse_bracketed(&mut self) -> Result<Expression, ParseError> {
        self.expect(TokenKind::LeftParen, "'('")?;
        let expression = self.parse_expression()?;
        self.expect(TokenKind::RightParen, "')'")?;
        Ok(expression)
    }

    /// Consumes the next token, requiring the given kind.
    ///
    /// A mismatch fails without consuming, so speculative attempts
    /// that fail on their leading token register zero progress.
    fn expect(
        &mut self,
        kind: TokenKind,
        expected: &'static str,
    ) -> Result<super::Token, ParseError> {
        self.peek_expecting(expected, |found| found == kind)
    }

    /// Peeks the next token, requires it to satisfy `accepts`, and
    /// consumes it only on success.
    fn peek_expecting(
        &mut self,
        expected: &'static str,
        accepts: impl FnOnce(TokenKind) -> bool,
    ) -> Result<super::Token, ParseError> {
        let token = self.cursor.peek()?;
        if accepts(token.kind()) {
            self.cursor.pop()
        } else {
            Err(ParseError::unexpected_token_kind(
                expected,
                token.kind(),
                token.span(),
            ))
        }
    }

    /// Verifies the cursor is fully consumed after a successful parse.
    ///
    /// Trailing tokens are rejected, so `"1+2 3"` is an error rather
    /// than a truncated success.
    fn finish(&self) -> Result<(), ParseError> {
        if self.cursor.is_at_end() {
            return Ok(());
        }
        let token = self.cursor.peek()?;
        Err(ParseError::unexpected_token_kind(
            "end of input",
            token.kind(),
            token.span(),
        ))
    }
}

/// Picks the failure that consumed more tokens; ties keep the earlier
/// attempt.
fn furthest(a: Failure, b: Failure) -> Failure {
    if b.0 > a.0 { b } else { a }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::Span;
    use crate::source_analysis::error::ParseErrorKind;

    fn integer(value: i64) -> Expression {
        Expression::integer(value)
    }

    #[test]
    fn parses_a_bare_integer() {
        assert_eq!(parse("5").unwrap(), integer(5));
    }

    #[test]
    fn parses_unary_operators() {
        assert_eq!(parse("-5").unwrap(), Expression::unary("-", integer(5)));
        assert_eq!(
            parse("-(+52)").unwrap(),
            Expression::unary("-", Expression::unary("+", integer(52))),
        );
    }

    #[test]
    fn equal_precedence_associates_left() {
        assert_eq!(
            parse("8-3-2").unwrap(),
            Expression::binary(Expression::binary(integer(8), "-", integer(3)), "-", integer(2)),
        );
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(
            parse("2+3*4").unwrap(),
            Expression::binary(integer(2), "+", Expression::binary(integer(3), "*", integer(4))),
        );
    }

    #[test]
    fn unary_binds_tighter_than_binary() {
        assert_eq!(
            parse("-5+3").unwrap(),
            Expression::binary(Expression::unary("-", integer(5)), "+", integer(3)),
        );
    }

    #[test]
    fn brackets_override_precedence() {
        assert_eq!(
            parse("(1+2)*3").unwrap(),
            Expression::binary(Expression::binary(integer(1), "+", integer(2)), "*", integer(3)),
        );
    }

    #[test]
    fn parses_the_worked_example() {
        let expected = Expression::binary(
            Expression::binary(integer(4), "*", integer(5)),
            "+",
            Expression::binary(
                integer(3),
                "*",
                Expression::binary(integer(2), "+", integer(1)),
            ),
        );
        assert_eq!(parse("4*5+3*(2+1)").unwrap(), expected);
        assert_eq!(parse("4 * 5 + 3 * (2 + 1)").unwrap(), expected);
    }

    #[test]
    fn unclosed_bracket_reports_end_of_input() {
        let error = parse("(1+2").unwrap_err();
        assert!(matches!(error.kind, ParseErrorKind::UnexpectedEndOfInput));
        // Just past the last consumed token.
        assert_eq!(error.span, Span::empty_at(4));
    }

    #[test]
    fn empty_input_reports_end_of_input() {
        let error = parse("").unwrap_err();
        assert!(matches!(error.kind, ParseErrorKind::UnexpectedEndOfInput));
        assert_eq!(error.span, Span::empty_at(0));
    }

    #[test]
    fn operator_without_operand_reports_unexpected_token() {
        let error = parse("+*2").unwrap_err();
        assert!(matches!(
            error.kind,
            ParseErrorKind::UnexpectedToken {
                found: TokenKind::Asterisk
            }
        ));
        assert_eq!(error.span, Span::new(1, 2));
    }

    #[test]
    fn leading_binary_operator_reports_unexpected_token() {
        let error = parse("*2").unwrap_err();
        assert!(matches!(
            error.kind,
            ParseErrorKind::UnexpectedToken {
                found: TokenKind::Asterisk
            }
        ));
        assert_eq!(error.span, Span::new(0, 1));
    }

    #[test]
    fn missing_closing_bracket_names_the_intruder() {
        let error = parse("(1+2]").unwrap_err();
        // ']' never lexes, so this surfaces as a lexical failure.
        assert!(matches!(error.kind, ParseErrorKind::Lex(_)));

        let error = parse("(1 2").unwrap_err();
        assert!(matches!(
            error.kind,
            ParseErrorKind::UnexpectedTokenKind {
                expected: "')'",
                found: TokenKind::Integer
            }
        ));
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        let error = parse("1+2 3").unwrap_err();
        assert!(matches!(
            error.kind,
            ParseErrorKind::UnexpectedTokenKind {
                expected: "end of input",
                found: TokenKind::Integer
            }
        ));
        assert_eq!(error.span, Span::new(4, 5));
    }

    #[test]
    fn lex_failures_propagate_through_parse() {
        let error = parse("1+%").unwrap_err();
        assert!(matches!(error.kind, ParseErrorKind::Lex(_)));
        assert_eq!(error.span, Span::new(2, 3));
    }

    #[test]
    fn deeply_bracketed_expressions_parse() {
        assert_eq!(parse("((((((7))))))").unwrap(), integer(7));
    }
}
