// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! A position-tracking view over a materialized token sequence.
//!
//! The cursor supports peek/pop plus nested save/restore of its
//! position, which is what makes speculative parsing possible: a
//! grammar alternative saves the position, consumes freely, and either
//! commits on success or restores on failure. Saved positions form a
//! stack, so nested speculative attempts compose (LIFO discipline).

use super::error::ParseError;
use super::span::Span;
use super::token::Token;

/// A cursor over a finite token sequence.
#[derive(Debug)]
pub struct TokenCursor {
    /// The tokens being consumed.
    tokens: Vec<Token>,
    /// Index of the next token to yield.
    cursor: usize,
    /// Saved cursor positions for speculative parsing.
    saved: Vec<usize>,
}

impl TokenCursor {
    /// Creates a cursor over the given tokens.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            cursor: 0,
            saved: Vec::new(),
        }
    }

    /// Returns the token at the cursor without advancing.
    ///
    /// # Errors
    ///
    /// Fails with `UnexpectedEndOfInput` if the cursor is at or past
    /// the end of the sequence.
    pub fn peek(&self) -> Result<&Token, ParseError> {
        self.tokens
            .get(self.cursor)
            .ok_or_else(|| ParseError::unexpected_end_of_input(self.end_span()))
    }

    /// Returns the token at the cursor and advances by one.
    ///
    /// # Errors
    ///
    /// Same failure mode as [`peek`](Self::peek).
    pub fn pop(&mut self) -> Result<Token, ParseError> {
        let token = self.peek()?.clone();
        self.cursor += 1;
        Ok(token)
    }

    /// Returns true if every token has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// Returns the current cursor position, for measuring how far a
    /// speculative attempt advanced before failing.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Pushes the current position onto the save stack.
    ///
    /// Every `save` must be balanced by exactly one [`restore`] or
    /// [`commit`], in LIFO order.
    ///
    /// [`restore`]: Self::restore
    /// [`commit`]: Self::commit
    pub fn save(&mut self) {
        self.saved.push(self.cursor);
    }

    /// Pops the most recent saved position and resets the cursor to
    /// it, discarding any intermediate advancement.
    ///
    /// # Panics
    ///
    /// Panics if there is no matching [`save`](Self::save); that is a
    /// bug in the caller's save/restore discipline.
    pub fn restore(&mut self) {
        self.cursor = self
            .saved
            .pop()
            .expect("TokenCursor::restore without a matching save");
    }

    /// Pops the most recent saved position without moving the cursor,
    /// accepting the tokens consumed since the matching
    /// [`save`](Self::save).
    ///
    /// # Panics
    ///
    /// Panics if there is no matching [`save`](Self::save).
    pub fn commit(&mut self) {
        self.saved
            .pop()
            .expect("TokenCursor::commit without a matching save");
    }

    /// Returns the empty span just past the last token, for
    /// end-of-input diagnostics.
    #[must_use]
    pub fn end_span(&self) -> Span {
        self.tokens
            .last()
            .map_or_else(|| Span::empty_at(0), |token| Span::empty_at(token.span().end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::error::ParseErrorKind;
    use crate::source_analysis::lex_filtered;

    fn cursor_for(source: &str) -> TokenCursor {
        TokenCursor::new(lex_filtered(source).unwrap())
    }

    #[test]
    fn peek_does_not_advance() {
        let cursor = cursor_for("1+2");
        assert_eq!(cursor.peek().unwrap().span(), Span::new(0, 1));
        assert_eq!(cursor.peek().unwrap().span(), Span::new(0, 1));
    }

    #[test]
    fn pop_advances_through_the_sequence() {
        let mut cursor = cursor_for("1+2");
        assert_eq!(cursor.pop().unwrap().span(), Span::new(0, 1));
        assert_eq!(cursor.pop().unwrap().span(), Span::new(1, 2));
        assert_eq!(cursor.pop().unwrap().span(), Span::new(2, 3));
        assert!(cursor.is_at_end());
    }

    #[test]
    fn exhausted_cursor_reports_end_of_input() {
        let mut cursor = cursor_for("7");
        cursor.pop().unwrap();

        let error = cursor.peek().unwrap_err();
        assert!(matches!(error.kind, ParseErrorKind::UnexpectedEndOfInput));
        // The error points just past the last token.
        assert_eq!(error.span, Span::empty_at(1));
    }

    #[test]
    fn empty_sequence_reports_position_zero() {
        let cursor = TokenCursor::new(Vec::new());
        let error = cursor.peek().unwrap_err();
        assert_eq!(error.span, Span::empty_at(0));
    }

    #[test]
    fn restore_rewinds_to_the_saved_position() {
        let mut cursor = cursor_for("1+2");
        cursor.save();
        cursor.pop().unwrap();
        cursor.pop().unwrap();
        cursor.restore();
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn nested_saves_restore_in_lifo_order() {
        let mut cursor = cursor_for("1+2*3");
        cursor.save();
        cursor.pop().unwrap();
        cursor.save();
        cursor.pop().unwrap();
        cursor.pop().unwrap();

        cursor.restore();
        assert_eq!(cursor.position(), 1);
        cursor.restore();
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn commit_keeps_the_cursor_in_place() {
        let mut cursor = cursor_for("1+2");
        cursor.save();
        cursor.pop().unwrap();
        cursor.commit();
        assert_eq!(cursor.position(), 1);
    }
}
