use crate::error::ExitCode;

#[derive(Debug)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// Tried to use an undefined variable.
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to rebind or compound-assign a `const` binding.
    ModifiedConstant {
        /// The name of the constant.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value had an unexpected or incompatible type.
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A numeric value was expected, but not found.
    ExpectedNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Both sides of an ordering comparison must belong to the same
    /// numeric family.
    MixedComparison {
        /// Type tag of the left operand.
        left:  &'static str,
        /// Type tag of the right operand.
        right: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The value given to a for-in loop cannot be iterated.
    NotIterable {
        /// Type tag of the offending value.
        type_name: &'static str,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A cast between two kinds that have no conversion.
    InvalidCast {
        /// Type tag of the source value.
        from: &'static str,
        /// The requested target tag.
        to:   String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An operator was applied to a kind it does not support.
    UnsupportedOperand {
        /// Details about the operator and operand.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Tried to grow, shrink or concatenate a fixed-size array.
    FixedSizeArray {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to write outside the bounds of a container.
    IndexOutOfBounds {
        /// The length of the container.
        len:   usize,
        /// The index that was actually requested.
        found: i64,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Range arithmetic with a non-numeric shift operand.
    InvalidRangeShift {
        /// Type tag of the offending operand.
        type_name: &'static str,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// Integer division of big integers by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `break` was evaluated with no enclosing loop.
    BreakOutsideLoop {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `continue` was evaluated with no enclosing loop.
    ContinueOutsideLoop {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A string interpolation hole could not be tokenized or parsed.
    BadInterpolation {
        /// The parse failure, verbatim.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A literal value was too large to be represented safely.
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A literal value was too small to be represented safely.
    LiteralTooSmall {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to use a fractional number where an integer was required.
    RealIsFractional {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An invariant of the interpreter itself was violated.
    Internal {
        /// Details about the broken invariant.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl RuntimeError {
    /// Maps the error to its stable process exit code.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::UnknownVariable { .. }
            | Self::ModifiedConstant { .. }
            | Self::TypeError { .. }
            | Self::ExpectedNumber { .. }
            | Self::MixedComparison { .. }
            | Self::NotIterable { .. }
            | Self::InvalidCast { .. }
            | Self::UnsupportedOperand { .. }
            | Self::BreakOutsideLoop { .. }
            | Self::ContinueOutsideLoop { .. } => ExitCode::SemanticError,

            Self::FixedSizeArray { .. }
            | Self::IndexOutOfBounds { .. }
            | Self::InvalidRangeShift { .. }
            | Self::DivisionByZero { .. } => ExitCode::InvalidInstruction,

            Self::BadInterpolation { .. } => ExitCode::SyntaxError,

            Self::Internal { .. } => ExitCode::InternalInterpreterError,

            Self::LiteralTooLarge { .. }
            | Self::LiteralTooSmall { .. }
            | Self::RealIsFractional { .. } => ExitCode::RuntimeError,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name, line } => {
                write!(f, "Error on line {line}: Unknown variable '{name}'.")
            },
            Self::ModifiedConstant { name, line } => write!(f,
                                                            "Error on line {line}: Cannot modify constant '{name}'."),

            Self::TypeError { details, line } => {
                write!(f, "Error on line {line}: Type error: {details}.")
            },
            Self::ExpectedNumber { line } => write!(f, "Error on line {line}: Expected number."),
            Self::MixedComparison { left, right, line } => write!(f,
                                                                  "Error on line {line}: Cannot order '{left}' against '{right}'."),
            Self::NotIterable { type_name, line } => write!(f,
                                                            "Error on line {line}: Value of type '{type_name}' is not iterable."),
            Self::InvalidCast { from, to, line } => {
                write!(f, "Error on line {line}: Cannot cast '{from}' to '{to}'.")
            },
            Self::UnsupportedOperand { details, line } => {
                write!(f, "Error on line {line}: {details}.")
            },
            Self::FixedSizeArray { line } => write!(f,
                                                    "Error on line {line}: Arrays have a fixed size. Use a vec instead."),
            Self::IndexOutOfBounds { len, found, line } => write!(f,
                                                                  "Error on line {line}: Index {found} is out of bounds for length {len}."),
            Self::InvalidRangeShift { type_name, line } => write!(f,
                                                                  "Error on line {line}: Ranges can only be shifted by numbers, found '{type_name}'."),
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::BreakOutsideLoop { line } => {
                write!(f, "Error on line {line}: 'break' outside loop.")
            },
            Self::ContinueOutsideLoop { line } => {
                write!(f, "Error on line {line}: 'continue' outside loop.")
            },
            Self::BadInterpolation { details, line } => {
                write!(f, "Error on line {line}: In interpolation: {details}")
            },
            Self::LiteralTooLarge { line } => {
                write!(f, "Error on line {line}: Literal is too large.")
            },
            Self::LiteralTooSmall { line } => {
                write!(f, "Error on line {line}: Literal is too small.")
            },
            Self::RealIsFractional { line } => write!(f,
                                                      "Error on line {line}: Value is fractional and cannot be safely converted to an integer."),
            Self::Internal { details, line } => {
                write!(f, "Error on line {line}: Internal interpreter error: {details}.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
