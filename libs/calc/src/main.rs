//! # calc
//!
//! Reads one arithmetic expression per line from stdin and prints its tree
//! and value.
//!
//! ```text
//! $ echo "2 + 3 * 4" | calc
//! Add(2, Mul(3, 4))
//! = 14
//! ```
//!
//! Log output goes to stderr and is selected with `RUST_LOG` (default
//! `info`).

use clap::ArgAction::SetTrue;
use clap::Parser;
use expression::ExpressionGrammar;
use grammar::{CommentSkippingSource, ParseOptions, TextSource};
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

/// Parse and evaluate arithmetic expressions read from stdin
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Cli {
    /// Ignore `//` line comments and `/* */` block comments.
    #[clap(action = SetTrue, long)]
    skip_comments: bool,

    /// When a line does not parse, print every grammar attempt made on it.
    #[clap(action = SetTrue, long)]
    trace: bool,

    /// Print trees without evaluating them.
    #[clap(action = SetTrue, long)]
    tree_only: bool,
}

#[derive(Debug, Error)]
enum Fail {
    /// Logging could not be set up.
    #[error("failed to initialise tracing filter (perhaps there is a problem with environment variables): {0}")]
    Initialisation(String),

    /// Reading stdin or writing stdout failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn init_tracing() -> Result<(), Fail> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(io::stderr);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
        .map_err(|e| Fail::Initialisation(e.to_string()))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
    Ok(())
}

/// Parses one line and writes the outcome to `out`.
fn report(line: &str, cli: &Cli, grammar: &ExpressionGrammar, out: &mut impl Write) -> io::Result<()> {
    let options = ParseOptions::default().with_trace(cli.trace);
    let (result, trace) = if cli.skip_comments {
        grammar.parse_traced(&mut CommentSkippingSource::new(line), options)
    } else {
        grammar.parse_traced(&mut TextSource::new(line), options)
    };

    match result {
        Ok(tree) => {
            writeln!(out, "{tree}")?;
            if !cli.tree_only {
                match tree.evaluate() {
                    Ok(value) => writeln!(out, "= {value}")?,
                    Err(error) => writeln!(out, "error: {error}")?,
                }
            }
        }
        Err(error) => {
            writeln!(out, "error: {error}")?;
            if let Some(trace) = trace {
                write!(out, "{trace}")?;
            }
        }
    }
    Ok(())
}

fn run() -> Result<(), Fail> {
    let cli = Cli::parse();
    init_tracing()?;

    let span = span!(
        Level::INFO,
        "calc",
        skip_comments = cli.skip_comments,
        trace = cli.trace
    );
    let _enter = span.enter();

    let grammar = ExpressionGrammar::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut lines = 0usize;
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        lines += 1;
        report(&line, &cli, &grammar, &mut out)?;
    }
    event!(Level::DEBUG, lines, "end of input");
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
