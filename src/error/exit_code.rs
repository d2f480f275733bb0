/// Stable process exit codes shared by the interpreter core and the CLI.
///
/// The numeric values are part of the public contract: scripts and tooling
/// built around the `luz` binary match on them, so the order must never
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// The program ran to completion.
    Success = 0,
    /// A generic, otherwise unclassified failure.
    Error = 1,
    /// The command line was malformed.
    IncorrectUsage = 2,
    /// The source text could not be tokenized or parsed.
    SyntaxError = 3,
    /// The program is well-formed but meaningless (unknown variable,
    /// modified constant, invalid cast, ...).
    SemanticError = 4,
    /// An unexpected failure during evaluation.
    RuntimeError = 5,
    /// The script file does not exist.
    FileNotFound = 6,
    /// The script file exists but cannot be read.
    PermissionDenied = 7,
    /// A well-typed operation that the value model forbids (growing a
    /// fixed-size array, negative index writes, ...).
    InvalidInstruction = 8,
    /// The interpreter ran out of memory.
    OutOfMemory = 9,
    /// A bug in the interpreter itself.
    InternalInterpreterError = 10,
    /// A reserved construct (`fn`, `return`) was used.
    UnimplementedFeature = 11,
    /// The CLI was given a path that is not a `.luz` file. Never produced
    /// by the core.
    InvalidFilePath = 12,
}

impl ExitCode {
    /// Returns the numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Success => "Success",
            Self::Error => "Error",
            Self::IncorrectUsage => "IncorrectUsage",
            Self::SyntaxError => "SyntaxError",
            Self::SemanticError => "SemanticError",
            Self::RuntimeError => "RuntimeError",
            Self::FileNotFound => "FileNotFound",
            Self::PermissionDenied => "PermissionDenied",
            Self::InvalidInstruction => "InvalidInstruction",
            Self::OutOfMemory => "OutOfMemory",
            Self::InternalInterpreterError => "InternalInterpreterError",
            Self::UnimplementedFeature => "UnimplementedFeature",
            Self::InvalidFilePath => "InvalidFilePath",
        };
        write!(f, "{name}")
    }
}
