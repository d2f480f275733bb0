/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the AST, evaluates expressions and statements,
/// performs the polymorphic operator semantics, manages the scope store, and
/// routes I/O through the injected host. It is the core execution engine of
/// the interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles variables, scopes, control flow and the `break`/`continue`
///   outcomes.
/// - Reports runtime errors such as unknown variables or invalid operations.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as
/// numbers, strings, identifiers, operators, delimiters, and keywords. This
/// is the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with type and source
///   location.
/// - Handles numeric, big-integer and string literals, identifiers, and
///   operators.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs an AST that represents the syntactic structure of expressions
/// and statements. This enables the evaluator to walk user code, and to
/// re-walk it for loop conditions.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates correct grammar and syntax, reporting errors with location
///   info.
/// - Supports assignments, swaps, conditionals, loops, casts and more.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all the value types used during interpretation and
/// execution: numbers, big integers, booleans, strings, `null`, the three
/// aggregates and numeric ranges. It also provides formatting, deep copying,
/// truthiness and size estimation.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements the plain and debug formatters.
/// - Provides the ordered set and range building blocks.
pub mod value;
