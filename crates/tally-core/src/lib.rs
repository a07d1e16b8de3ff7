// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Tally expression language core.
//!
//! This crate contains the whole text → tree pipeline for Tally, a small
//! arithmetic expression language:
//!
//! - Lexical analysis (catalog-driven, longest-match tokenization)
//! - Parsing (speculative recursive descent with precedence climbing)
//! - AST definitions with two interpretations: structural description
//!   and value emission
//!
//! Code generation backends live behind the [`emit::EmitContext`] trait;
//! this crate ships only [`emit::Calculator`], a plain arithmetic context
//! used by tests and the CLI.
//!
//! # Example
//!
//! ```
//! use tally_core::prelude::*;
//!
//! let expression = parse("4*5+3*(2+1)").unwrap();
//! let mut calculator = Calculator;
//! assert_eq!(expression.emit(&mut calculator).unwrap(), 29.0);
//! ```

pub mod ast;
pub mod emit;
pub mod source_analysis;

pub use source_analysis::parse;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::ast::{Description, Expression};
    pub use crate::emit::{Calculator, EmitContext, EmitError};
    pub use crate::source_analysis::{ParseError, Span, Token, TokenKind, parse};
}
