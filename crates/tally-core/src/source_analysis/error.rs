// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for lexing and parsing.
//!
//! Errors carry source locations ([`Span`]) for precise diagnostics.
//! They integrate with [`miette`] for rich error reporting.

use miette::Diagnostic;
use thiserror::Error;

use super::{Span, TokenKind};

/// A lexical error: the source text contains input no token rule
/// recognizes, or a matched token failed value conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind}")]
#[diagnostic()]
pub struct LexError {
    /// The kind of lexical error.
    #[source]
    pub kind: LexErrorKind,
    /// The source location of the error.
    #[label("here")]
    pub span: Span,
}

impl LexError {
    /// Creates a new lexical error.
    #[must_use]
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Creates an "unrecognized input" error.
    #[must_use]
    pub fn unrecognized_input(c: char, span: Span) -> Self {
        Self::new(LexErrorKind::UnrecognizedInput(c), span)
    }

    /// Creates an "invalid integer" error.
    #[must_use]
    pub fn invalid_integer(span: Span) -> Self {
        Self::new(LexErrorKind::InvalidInteger, span)
    }
}

/// The kind of lexical error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// No catalog rule matches at this offset.
    #[error("unrecognized input starting at '{0}'")]
    UnrecognizedInput(char),

    /// A digit run too large for the integer value type.
    #[error("integer literal out of range")]
    InvalidInteger,
}

/// A parse error with the offending source span.
///
/// Inside primary-expression parsing these are caught and recovered
/// from by restoring the cursor and trying the next alternative; once
/// every alternative is exhausted, or anywhere else in the parser, they
/// propagate unchanged to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind}")]
#[diagnostic()]
pub struct ParseError {
    /// The kind of parse error.
    #[source]
    pub kind: ParseErrorKind,
    /// The source location of the error.
    #[label("here")]
    pub span: Span,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_end_of_input(span: Span) -> Self {
        Self::new(ParseErrorKind::UnexpectedEndOfInput, span)
    }

    /// Creates an error for a specific expected form that did not match.
    #[must_use]
    pub fn unexpected_token_kind(expected: &'static str, found: TokenKind, span: Span) -> Self {
        Self::new(ParseErrorKind::UnexpectedTokenKind { expected, found }, span)
    }

    /// Creates an error for a token no primary alternative accepts.
    #[must_use]
    pub fn unexpected_token(found: TokenKind, span: Span) -> Self {
        Self::new(ParseErrorKind::UnexpectedToken { found }, span)
    }
}

impl From<LexError> for ParseError {
    fn from(error: LexError) -> Self {
        Self::new(ParseErrorKind::Lex(error.kind), error.span)
    }
}

/// The kind of parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The cursor was exhausted when a token was required.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// A specific expected token kind did not match the next token.
    #[error("expected {expected}, found '{found}'")]
    UnexpectedTokenKind {
        /// Human-readable description of the expected form.
        expected: &'static str,
        /// The token kind actually found.
        found: TokenKind,
    },

    /// No primary-expression alternative matched at a choice point.
    #[error("expected an integer, a unary operator, or '(', found '{found}'")]
    UnexpectedToken {
        /// The token kind actually found.
        found: TokenKind,
    },

    /// Tokenization failed before parsing could begin.
    #[error(transparent)]
    Lex(LexErrorKind),
}
