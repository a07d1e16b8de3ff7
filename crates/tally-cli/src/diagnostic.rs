// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Beautiful error diagnostics using miette.
//!
//! Converts tally-core parse errors into miette-formatted errors with:
//! - Source code context
//! - Arrows pointing to the error location
//! - Diagnostic codes for easy reference

use miette::{Diagnostic, SourceSpan};
use tally_core::source_analysis::ParseError;

/// A parse diagnostic with rich formatting.
#[derive(Debug, Diagnostic, thiserror::Error)]
#[error("{message}")]
#[diagnostic(code(tally::parse))]
pub struct SourceDiagnostic {
    /// Human-readable error message
    pub message: String,
    /// Source code for context
    #[source_code]
    pub src: miette::NamedSource<String>,
    /// Location of the error
    #[label("error here")]
    pub span: SourceSpan,
}

impl SourceDiagnostic {
    /// Create a new diagnostic from a tally-core parse error.
    pub fn from_parse_error(error: &ParseError, source_name: &str, source: &str) -> Self {
        Self {
            message: error.to_string(),
            src: miette::NamedSource::new(source_name, source.to_string()),
            span: (error.span.start() as usize, error.span.len() as usize).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::parse;

    #[test]
    fn carries_the_error_location() {
        let error = parse("1+%").unwrap_err();
        let diag = SourceDiagnostic::from_parse_error(&error, "<expression>", "1+%");

        assert_eq!(diag.message, "unrecognized input starting at '%'");
        assert_eq!(diag.span.offset(), 2);
        assert_eq!(diag.span.len(), 1);
    }

    #[test]
    fn end_of_input_yields_a_zero_length_span() {
        let error = parse("(1+2").unwrap_err();
        let diag = SourceDiagnostic::from_parse_error(&error, "<expression>", "(1+2");

        assert_eq!(diag.message, "unexpected end of input");
        assert_eq!(diag.span.offset(), 4);
        assert_eq!(diag.span.len(), 0);
    }
}
