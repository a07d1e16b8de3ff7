// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Tally command-line interface.
//!
//! This is the main entry point for the `tally` command.

use clap::{Parser, Subcommand};
use miette::Result;
use tracing_subscriber::EnvFilter;

mod commands;
mod diagnostic;

/// Tally: a small arithmetic expression language
#[derive(Debug, Parser)]
#[command(name = "tally")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse an expression and print its syntax tree as JSON
    Parse {
        /// The expression to parse
        expression: String,

        /// Print compact JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Parse an expression and evaluate it
    Eval {
        /// The expression to evaluate
        expression: String,
    },
}

fn main() -> Result<()> {
    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    // Log to stderr so command output on stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Parse {
            expression,
            compact,
        } => commands::parse(&expression, compact),
        Command::Eval { expression } => commands::eval(&expression),
    };

    // Exit with appropriate code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    }
}
