/// Expression entry points and compound constructs.
///
/// Contains the expression entry point, the assignment/swap lookahead, and
/// the `if` and `loop` grammars.
pub mod core;

/// Unary, postfix and primary parsing.
///
/// Handles prefix operators and intrinsics, postfix increment/decrement and
/// index chains, literals, and the aggregate literal forms.
pub mod unary;

/// Binary operator precedence chain.
///
/// Implements the precedence ladder from ranges down to casts.
pub mod binary;

/// Block parsing.
///
/// Parses brace-delimited statement sequences with the statement separator
/// rules.
pub mod block;

/// Utility functions for the parser.
///
/// Provides the l-value grammar, element list parsing and small shared
/// helpers.
pub mod utils;

/// Statement parsing.
///
/// Implements top-level statements: `const` declarations, reserved-keyword
/// rejection, and expression statements.
pub mod statement;
