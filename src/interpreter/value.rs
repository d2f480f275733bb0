/// Ordered set support.
///
/// Defines the `OrderedSet` type backing `Value::Set`: a set that iterates in
/// insertion order and remembers its most recently inserted element. Keys are
/// derived from values so that numbers hash reliably and aggregates compare
/// by identity.
pub mod ordered_set;
/// Numeric range support.
///
/// Defines the `RangeValue` type backing `Value::Ran` and `Value::XRan`:
/// half-open and closed numeric ranges with step `±1`, their iteration,
/// membership and endpoint arithmetic.
pub mod range;

pub mod core;
