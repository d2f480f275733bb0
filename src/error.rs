/// Stable process exit codes.
///
/// Defines the closed table of exit codes shared by the core and the CLI.
/// Every error type maps onto one of these via `exit_code()`.
pub mod exit_code;
/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Parse errors include syntax mistakes, unexpected tokens, invalid
/// literals, and any other issues detected before evaluation.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation and execution.
/// Runtime errors include things like unknown variables, type mismatches,
/// invalid operations, or failed numeric conversions.
pub mod runtime_error;

pub use exit_code::ExitCode;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
