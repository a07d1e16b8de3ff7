// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The token catalog: the static table of recognized lexical forms.
//!
//! Each rule pairs a [`TokenKind`] with a matcher (an exact literal or
//! a pattern function) and an optional value converter. The table is
//! built once as a `const` and never mutated, so it is freely shared
//! across any number of concurrent lexes.
//!
//! Matching is longest-match-wins: every rule is tried at the current
//! offset in declaration order, the longest matched substring wins, and
//! ties keep the first-declared rule.

use super::error::LexError;
use super::span::Span;
use super::token::{TokenKind, TokenValue};

/// How a rule recognizes text at the scan offset.
pub(super) enum Matcher {
    /// Exact literal text, matched as a prefix at the offset.
    Literal(&'static str),
    /// Pattern function returning the matched length at the offset,
    /// or `None` if it does not match there.
    Pattern(fn(&str) -> Option<usize>),
}

/// One entry in the token catalog.
pub(super) struct TokenRule {
    /// The kind of token this rule produces.
    pub(super) kind: TokenKind,
    /// The matcher tried at each scan offset.
    pub(super) matcher: Matcher,
    /// Converts the raw matched text into the token value. Rules
    /// without a converter keep the matched text itself.
    pub(super) convert: Option<fn(&str, Span) -> Result<TokenValue, LexError>>,
}

/// The process-wide token catalog, in declaration order.
pub(super) const CATALOG: &[TokenRule] = &[
    // Operators
    TokenRule {
        kind: TokenKind::Plus,
        matcher: Matcher::Literal("+"),
        convert: None,
    },
    TokenRule {
        kind: TokenKind::Minus,
        matcher: Matcher::Literal("-"),
        convert: None,
    },
    TokenRule {
        kind: TokenKind::Asterisk,
        matcher: Matcher::Literal("*"),
        convert: None,
    },
    TokenRule {
        kind: TokenKind::Slash,
        matcher: Matcher::Literal("/"),
        convert: None,
    },
    // Other punctuation
    TokenRule {
        kind: TokenKind::LeftParen,
        matcher: Matcher::Literal("("),
        convert: None,
    },
    TokenRule {
        kind: TokenKind::RightParen,
        matcher: Matcher::Literal(")"),
        convert: None,
    },
    // Pattern-based rules
    TokenRule {
        kind: TokenKind::Integer,
        matcher: Matcher::Pattern(match_digits),
        convert: Some(convert_integer),
    },
    TokenRule {
        kind: TokenKind::Whitespace,
        matcher: Matcher::Pattern(match_whitespace),
        convert: None,
    },
];

/// Matches a run of ASCII digits: `[0-9]+`
fn match_digits(rest: &str) -> Option<usize> {
    let len = rest.bytes().take_while(u8::is_ascii_digit).count();
    (len > 0).then_some(len)
}

/// Matches a run of spaces and tabs: `[ \t]+`
fn match_whitespace(rest: &str) -> Option<usize> {
    let len = rest.bytes().take_while(|b| matches!(b, b' ' | b'\t')).count();
    (len > 0).then_some(len)
}

/// Converts matched digits into an integer value.
fn convert_integer(text: &str, span: Span) -> Result<TokenValue, LexError> {
    text.parse::<i64>()
        .map(TokenValue::Integer)
        .map_err(|_| LexError::invalid_integer(span))
}

/// Finds the longest matching rule at `offset`, with ties broken by
/// declaration order. Returns the rule and the matched length, or
/// `None` if no rule matches there.
pub(super) fn longest_match_at(source: &str, offset: usize) -> Option<(&'static TokenRule, usize)> {
    let rest = &source[offset..];
    let mut winner: Option<(&'static TokenRule, usize)> = None;

    for rule in CATALOG {
        let matched = match rule.matcher {
            Matcher::Literal(literal) => rest.starts_with(literal).then(|| literal.len()),
            Matcher::Pattern(pattern) => pattern(rest),
        };
        let Some(len) = matched else { continue };

        // Strictly longer wins; equal length keeps the earlier rule.
        if winner.is_none_or(|(_, best)| len > best) {
            winner = Some((rule, len));
        }
    }

    winner
}
