// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexing and parsing for Tally source text.
//!
//! # Lexical Analysis
//!
//! The [`Lexer`] scans source text against a static catalog of token
//! rules using a longest-match-wins policy. Whitespace is a real token
//! during matching and is filtered out by [`lex_filtered`] before the
//! parser sees the stream.
//!
//! ```
//! use tally_core::source_analysis::{lex, TokenKind};
//!
//! let tokens = lex("8 + 9").unwrap();
//! assert_eq!(tokens.len(), 5); // 8, whitespace, +, whitespace, 9
//! assert_eq!(tokens[0].kind(), TokenKind::Integer);
//! ```
//!
//! # Parsing
//!
//! The [`parse`] function converts source text into an
//! [`Expression`](crate::ast::Expression) tree. The grammar:
//!
//! ```text
//! Expression     := BinaryExpr
//! BinaryExpr     := Primary ( BinaryOp Primary )*   (precedence climbing)
//! Primary        := IntegerLiteral | UnaryExpr | "(" Expression ")"
//! UnaryExpr      := ("+" | "-") Primary
//! IntegerLiteral := <integer token>
//! ```
//!
//! Primary alternatives are tried speculatively in order; a failed
//! alternative restores the cursor before the next one runs. Binary
//! operators use precedence climbing: `+ -` bind at 20, `* /` at 30,
//! equal precedence associates left.
//!
//! # Error Handling
//!
//! Lexing and parsing fail fast with a single [`LexError`] or
//! [`ParseError`] carrying the offending source span. The only recovery
//! is the bounded speculative retry inside primary parsing; no error is
//! swallowed anywhere else and no partial tree escapes.

mod catalog;
mod cursor;
mod error;
mod lexer;
mod parser;
mod span;
mod token;


pub use cursor::TokenCursor;
pub use error::{LexError, LexErrorKind, ParseError, ParseErrorKind};
pub use lexer::{Lexer, lex, lex_filtered};
pub use parser::parse;
pub use span::Span;
pub use token::{Token, TokenKind, TokenValue};
