// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Token types for Tally lexical analysis.
//!
//! Each token consists of:
//! - A [`TokenKind`] naming the lexical category
//! - A [`TokenValue`] holding either the raw matched text or the
//!   converted value (integers are converted at lex time)
//! - A [`Span`] locating it in the source
//!
//! Tokens are immutable once produced by the lexer.

use ecow::EcoString;

use super::Span;

/// The lexical category of a token.
///
/// One variant per entry in the token catalog. Whitespace is a real
/// token kind: it competes during longest-match resolution and is only
/// filtered out at the wiring point before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// The `+` operator.
    Plus,
    /// The `-` operator.
    Minus,
    /// The `*` operator.
    Asterisk,
    /// The `/` operator.
    Slash,
    /// Left parenthesis: `(`
    LeftParen,
    /// Right parenthesis: `)`
    RightParen,
    /// An integer literal: a run of ASCII digits.
    Integer,
    /// Spaces and tabs between tokens.
    Whitespace,
}

impl TokenKind {
    /// Returns `true` if this kind can begin a unary expression.
    #[must_use]
    pub const fn is_unary_operator(self) -> bool {
        matches!(self, Self::Plus | Self::Minus)
    }

    /// Returns `true` if this kind is a binary arithmetic operator.
    #[must_use]
    pub const fn is_binary_operator(self) -> bool {
        matches!(self, Self::Plus | Self::Minus | Self::Asterisk | Self::Slash)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Asterisk => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
            Self::Integer => write!(f, "integer"),
            Self::Whitespace => write!(f, "whitespace"),
        }
    }
}

/// The value carried by a token.
///
/// Punctuation and whitespace keep the raw matched text; kinds with a
/// converter in the catalog (currently only integers) carry the
/// converted value instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenValue {
    /// The raw matched substring.
    Text(EcoString),
    /// A converted integer value.
    Integer(i64),
}

impl TokenValue {
    /// Returns the text content if this value is raw matched text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Integer(_) => None,
        }
    }

    /// Returns the integer content if this value was converted.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

/// A classified, positioned fragment of source text.
///
/// # Examples
///
/// ```
/// use tally_core::source_analysis::{Span, Token, TokenKind, TokenValue};
///
/// let token = Token::new(TokenKind::Integer, TokenValue::Integer(68), Span::new(0, 2));
/// assert_eq!(token.kind(), TokenKind::Integer);
/// assert_eq!(token.span().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    value: TokenValue,
    span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, value: TokenValue, span: Span) -> Self {
        Self { kind, value, span }
    }

    /// Returns the kind of this token.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Returns the value of this token.
    #[must_use]
    pub const fn value(&self) -> &TokenValue {
        &self.value
    }

    /// Returns the source span of this token.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_kind_display() {
        assert_eq!(TokenKind::Plus.to_string(), "+");
        assert_eq!(TokenKind::Slash.to_string(), "/");
        assert_eq!(TokenKind::LeftParen.to_string(), "(");
        assert_eq!(TokenKind::Integer.to_string(), "integer");
        assert_eq!(TokenKind::Whitespace.to_string(), "whitespace");
    }

    #[test]
    fn token_kind_predicates() {
        assert!(TokenKind::Plus.is_unary_operator());
        assert!(TokenKind::Minus.is_unary_operator());
        assert!(!TokenKind::Asterisk.is_unary_operator());

        assert!(TokenKind::Asterisk.is_binary_operator());
        assert!(TokenKind::Slash.is_binary_operator());
        assert!(!TokenKind::LeftParen.is_binary_operator());
        assert!(!TokenKind::Integer.is_binary_operator());
    }

    #[test]
    fn token_value_accessors() {
        let text = TokenValue::Text("+".into());
        assert_eq!(text.as_text(), Some("+"));
        assert_eq!(text.as_integer(), None);

        let integer = TokenValue::Integer(68);
        assert_eq!(integer.as_text(), None);
        assert_eq!(integer.as_integer(), Some(68));
    }

    #[test]
    fn token_accessors() {
        let token = Token::new(TokenKind::Minus, TokenValue::Text("-".into()), Span::new(1, 2));
        assert_eq!(token.kind(), TokenKind::Minus);
        assert_eq!(token.value().as_text(), Some("-"));
        assert_eq!(token.span(), Span::new(1, 2));
    }
}
