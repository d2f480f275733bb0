/// Binary operator dispatch.
///
/// Routes each operator and operand-kind pair to its specialized handler,
/// and hosts the expression-level entry point with the short-circuit
/// operators.
pub mod core;

/// Scalar arithmetic.
///
/// Number and big-integer arithmetic, with `NaN` normalised to `null` at
/// every output.
pub mod scalar;

/// Aggregate and range forms of `+` and `-`.
///
/// Vector append/remove, set insert/delete, string concatenation, range
/// endpoint shifts, and the fixed-size array refusals.
pub mod aggregate;

/// Comparisons, equality and membership.
///
/// Ordering within one numeric family, loose equality, and the `has`
/// operator over ranges, sequences, sets and strings.
pub mod comparison;

/// Bitwise operators.
///
/// Integer semantics on numbers, arbitrary-precision semantics on big
/// integers.
pub mod bitwise;
