/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions, including
/// arithmetic, comparisons, membership, bitwise operators and the aggregate
/// forms of `+` and `-`.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and identity, logical NOT, and bitwise
/// complement.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the main evaluation engine, the runtime context, the
/// `StepOutcome` flow type, and literal evaluation.
pub mod core;

/// The scope store.
///
/// One flat name-to-binding map plus a stack of frames recording the names
/// each block or iteration introduced.
pub mod scope;

/// Places: assignment, swap, update, deletion and element access.
///
/// Everything that reads or writes through an l-value lives here.
pub mod assign;

/// Control flow: blocks, conditionals and the three loop shapes.
///
/// Loops catch `Break` and `Continue` outcomes at their boundary; every
/// other construct forwards them upward.
pub mod control_flow;

/// Cast evaluation.
///
/// Implements the `as` conversion matrix, including the random `maybe`
/// target.
pub mod cast;

/// Prefix intrinsics.
///
/// Implements `lenof`, `sizeof`, `typeof`, `copyof`, `firstof`, `lastof`
/// and the I/O intrinsics `log`, `logln`, `get`, `getln`.
pub mod intrinsic;

/// String interpolation.
///
/// Expands `{expr}` holes in string literals by re-tokenizing and
/// evaluating the inner source in the current scope.
pub mod interpolation;
