// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for Tally source text.
//!
//! The lexer repeatedly finds the longest catalog match at the current
//! offset, converts the matched text when the winning rule has a
//! converter, and yields the token. An offset where no rule matches is
//! an unrecoverable lexical failure.
//!
//! The token sequence is lazy ([`Lexer`] implements [`Iterator`]),
//! restartable (lexing the same text twice yields identical output),
//! and finite for finite input. It never filters whitespace itself;
//! [`lex_filtered`] is the wiring-point helper that does so before the
//! tokens reach a parser.
//!
//! # Example
//!
//! ```
//! use tally_core::source_analysis::{lex, lex_filtered};
//!
//! assert_eq!(lex("8 +9").unwrap().len(), 4);
//! assert_eq!(lex_filtered("8 +9").unwrap().len(), 3);
//! ```

use super::catalog::longest_match_at;
use super::error::LexError;
use super::span::Span;
use super::token::{Token, TokenKind, TokenValue};

/// A lazy token stream over source text.
///
/// Yields `Ok(token)` for each match and a single `Err` if the text
/// contains input no catalog rule recognizes, after which the stream
/// is fused.
#[derive(Debug)]
pub struct Lexer<'src> {
    /// The source text being lexed.
    source: &'src str,
    /// Current byte offset into the source.
    offset: usize,
    /// Set after a lexical failure so the stream yields nothing more.
    failed: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            failed: false,
        }
    }

    /// Produces the single longest matching token at the current
    /// offset and advances past it.
    fn next_token(&mut self) -> Result<Token, LexError> {
        let Some((rule, len)) = longest_match_at(self.source, self.offset) else {
            // No rule recognizes the input here. Report the offending
            // character so the message names what the lexer saw.
            let c = self.source[self.offset..]
                .chars()
                .next()
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            let span = Span::from(self.offset..self.offset + c.len_utf8());
            return Err(LexError::unrecognized_input(c, span));
        };

        let span = Span::from(self.offset..self.offset + len);
        let text = &self.source[span.as_range()];
        let value = match rule.convert {
            Some(convert) => convert(text, span)?,
            None => TokenValue::Text(text.into()),
        };

        self.offset += len;
        Ok(Token::new(rule.kind, value, span))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.source.len() {
            return None;
        }
        let result = self.next_token();
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

/// Lexes source text into a complete token sequence, whitespace
/// included.
///
/// # Errors
///
/// Fails with [`LexError`] if any offset contains input no catalog
/// rule recognizes, or an integer literal fails conversion.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).collect()
}

/// Lexes source text and drops whitespace tokens.
///
/// This is the wiring point between lexer and parser: whitespace
/// participates in longest-match resolution but is never seen by the
/// parser.
///
/// # Errors
///
/// Same failure modes as [`lex`].
pub fn lex_filtered(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = lex(source)?;
    tokens.retain(|token| token.kind() != TokenKind::Whitespace);
    Ok(tokens)
}
