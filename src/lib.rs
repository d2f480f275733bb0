//! # luz
//!
//! luz is a small, dynamically typed, expression-oriented scripting language
//! interpreter written in Rust. It supports numbers, big integers, strings,
//! booleans, `null`, three aggregate kinds (fixed arrays, growable vectors,
//! ordered sets) and numeric ranges, with operator overloading across all of
//! them, string interpolation, and control flow through `if`/`else`
//! expressions and a unified `loop` construct.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use logos::Logos;

use crate::{
    error::ExitCode,
    host::Host,
    interpreter::{
        evaluator::core::{Context, StepOutcome},
        lexer::{LexerExtras, Token},
        parser::statement::parse_statement,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` enum and related types that represent the
/// syntactic structure of source code as a tree. The AST is built by the
/// parser and walked by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to AST nodes for error reporting.
/// - Names the types, operators and assignable places of the language.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// or evaluating code, along with the stable exit-code table both the core
/// and the CLI report through.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Maps every error onto its process exit code.
pub mod error;
/// The injected collaborators of the interpreter core.
///
/// The core performs no I/O of its own: program output, diagnostics, input
/// and the run lifecycle all flow through a [`host::Host`] implementation.
///
/// # Responsibilities
/// - Declares the `Host` trait with its lifecycle hooks.
/// - Provides the standard-stream host used by the CLI.
/// - Provides an in-memory host for tests.
pub mod host;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, error handling, and all supporting infrastructure to
/// provide a complete runtime for source code evaluation.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for interpreting and executing programs.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion and helpers.
///
/// This module provides reusable helpers and conversion routines that are
/// used throughout the parser and evaluator, mostly safe conversions between
/// integer and floating-point types.
///
/// # Responsibilities
/// - Safely convert between `i64`, `u64`, `usize`, and `f64` without silent
///   data loss.
/// - Provide general utility functions used in multiple modules.
pub mod util;

/// Runs a program and returns its exit code.
///
/// The source is tokenized, then top-level statements are parsed and
/// evaluated one after another. The lifecycle hooks fire around the run:
/// `on_start` first, then `on_success` or `on_error`, then `on_end` with
/// the final code. Error messages are written to the host's error stream.
///
/// With `debug` set, every top-level statement producing a non-`null` value
/// writes its debug formatting to the error stream.
///
/// # Examples
/// ```
/// use luz::{error::ExitCode, host::BufferHost};
///
/// let mut host = BufferHost::new();
/// let code = luz::run("x = 7; y = 2; log x ~/ y", &mut host, false);
///
/// assert_eq!(code, ExitCode::Success);
/// assert_eq!(host.out, "3");
/// ```
pub fn run(source: &str, host: &mut dyn Host, debug: bool) -> ExitCode {
    host.on_start();

    let code = execute(source, host, debug, None);
    if code == ExitCode::Success {
        host.on_success();
    } else {
        host.on_error(code);
    }
    host.on_end(code);

    code
}

/// Runs a program with a seeded random source, so that `maybe` draws are
/// reproducible. Used by tests; the CLI always runs unseeded.
pub fn run_seeded(source: &str, host: &mut dyn Host, debug: bool, seed: u64) -> ExitCode {
    host.on_start();

    let code = execute(source, host, debug, Some(seed));
    if code == ExitCode::Success {
        host.on_success();
    } else {
        host.on_error(code);
    }
    host.on_end(code);

    code
}

/// Tokenizes the source and drives the top-level statement loop.
fn execute(source: &str, host: &mut dyn Host, debug: bool, seed: Option<u64>) -> ExitCode {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        match token {
            Ok(tok) => tokens.push((tok, lexer.extras.line)),
            Err(()) => {
                let error = crate::error::ParseError::UnrecognizedInput { slice: lexer.slice()
                                                                                      .to_string(),
                                                                          line:  lexer.extras
                                                                                      .line, };
                host.write_err(&format!("{error}\n"));
                return error.exit_code();
            },
        }
    }

    let mut context = match seed {
        Some(seed) => Context::with_seed(host, seed),
        None => Context::new(host),
    };
    let mut iter = tokens.iter().peekable();

    loop {
        while let Some((Token::NewLine, _)) = iter.peek() {
            iter.next();
        }

        match iter.peek() {
            None => return ExitCode::Success,
            Some((Token::Semicolon, line)) => {
                let error = crate::error::ParseError::StrayStatementEnd { line: *line };
                context.host.write_err(&format!("{error}\n"));
                return error.exit_code();
            },
            Some(_) => {},
        }

        let statement = match parse_statement(&mut iter) {
            Ok(statement) => statement,
            Err(error) => {
                context.host.write_err(&format!("{error}\n"));
                return error.exit_code();
            },
        };

        match context.eval_statement(&statement) {
            Ok(StepOutcome::Normal(value)) => {
                if debug && value != crate::interpreter::value::core::Value::Null {
                    context.host
                           .write_err(&format!("= {}\n", value.format_debug()));
                }
            },
            Ok(StepOutcome::Break { line, .. }) => {
                let error = crate::error::RuntimeError::BreakOutsideLoop { line };
                context.host.write_err(&format!("{error}\n"));
                return error.exit_code();
            },
            Ok(StepOutcome::Continue { line }) => {
                let error = crate::error::RuntimeError::ContinueOutsideLoop { line };
                context.host.write_err(&format!("{error}\n"));
                return error.exit_code();
            },
            Err(error) => {
                context.host.write_err(&format!("{error}\n"));
                return error.exit_code();
            },
        }

        if let Some((Token::Semicolon, _)) = iter.peek() {
            iter.next();
        }
    }
}
