// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The `parse` and `eval` commands.

use miette::{IntoDiagnostic, Result, WrapErr};
use tally_core::ast::Expression;
use tally_core::emit::Calculator;
use tracing::debug;

use crate::diagnostic::SourceDiagnostic;

/// Parse an expression and print its syntax tree as JSON.
pub fn parse(expression: &str, compact: bool) -> Result<()> {
    let tree = parse_expression(expression)?;
    let description = tree.describe();

    let json = if compact {
        serde_json::to_string(&description)
    } else {
        serde_json::to_string_pretty(&description)
    }
    .into_diagnostic()
    .wrap_err("Failed to serialize syntax tree")?;

    println!("{json}");
    Ok(())
}

/// Parse an expression, evaluate it, and print the result.
pub fn eval(expression: &str) -> Result<()> {
    let tree = parse_expression(expression)?;
    // Parser output only carries the closed operator sets, so emission
    // cannot fail here; propagate anyway rather than panic.
    let value = tree.emit(&mut Calculator).map_err(miette::Report::new)?;
    println!("{value}");
    Ok(())
}

fn parse_expression(expression: &str) -> Result<Expression> {
    debug!(source = expression, "Parsing expression");
    tally_core::parse(expression).map_err(|error| {
        SourceDiagnostic::from_parse_error(&error, "<expression>", expression).into()
    })
}
