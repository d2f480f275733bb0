use num_bigint::BigInt;

/// Represents a literal value in the language.
///
/// `LiteralValue` covers all raw, constant values that can appear directly in
/// source code: numbers, big integers, booleans, strings, `null` and `maybe`.
/// The `inf` literal is represented as `Num(f64::INFINITY)`; `maybe` keeps its
/// own variant because it only collapses to a boolean when evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit floating-point literal such as `1_000.5e-3` or `.5`.
    Num(f64),
    /// An arbitrary-precision integer literal such as `42xl`.
    BigInt(BigInt),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
    /// A string literal with its escapes already decoded. Interpolation
    /// braces are kept verbatim and expanded at evaluation time.
    Str(String),
    /// The `null` literal.
    Null,
    /// The `maybe` literal, a coin flip evaluated freshly every time.
    Maybe,
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Num(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// A type name usable as a cast target and returned by `typeof`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName {
    /// 64-bit floating-point number.
    Num,
    /// Arbitrary-precision integer.
    Xl,
    /// Boolean.
    Bool,
    /// String.
    Str,
    /// The unit value.
    Null,
    /// Random draw: boolean for scalars, element for sequences.
    Maybe,
    /// Fixed-size array.
    Arr,
    /// Growable vector.
    Vec,
    /// Ordered-last-insertion set.
    Set,
    /// Positive or negative infinity.
    Inf,
    /// Half-open numeric range.
    Ran,
    /// Closed numeric range.
    Xran,
}

impl TypeName {
    /// Resolves a source-level type name, or `None` when the identifier does
    /// not name a type.
    #[must_use]
    pub fn from_source(name: &str) -> Option<Self> {
        match name {
            "num" => Some(Self::Num),
            "xl" => Some(Self::Xl),
            "bool" => Some(Self::Bool),
            "str" => Some(Self::Str),
            "null" => Some(Self::Null),
            "maybe" => Some(Self::Maybe),
            "arr" => Some(Self::Arr),
            "vec" => Some(Self::Vec),
            "set" => Some(Self::Set),
            "inf" => Some(Self::Inf),
            "ran" => Some(Self::Ran),
            "xran" => Some(Self::Xran),
            _ => None,
        }
    }

    /// Returns the tag string exposed to programs via `typeof`.
    #[must_use]
    pub const fn as_tag(self) -> &'static str {
        match self {
            Self::Num => "num",
            Self::Xl => "xl",
            Self::Bool => "bool",
            Self::Str => "str",
            Self::Null => "null",
            Self::Maybe => "maybe",
            Self::Arr => "arr",
            Self::Vec => "vec",
            Self::Set => "set",
            Self::Inf => "inf",
            Self::Ran => "ran",
            Self::Xran => "xran",
        }
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// An assignable place: a variable name followed by zero or more index
/// steps, as in `x`, `v[0]` or `grid[1][2]`. Dotted positional access
/// (`v.0`) desugars to the same index path.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignTarget {
    /// The variable at the root of the place.
    pub name: String,
    /// Index expressions applied left to right. Empty for a plain variable.
    pub path: Vec<Expr>,
    /// Line number in the source code.
    pub line: usize,
}

/// The target of an `as` cast.
#[derive(Debug, Clone, PartialEq)]
pub enum CastTarget {
    /// A literal type name: `x as vec`.
    Named(TypeName),
    /// The type of another expression: `x as typeof y`.
    Typeof(Box<Expr>),
}

/// A single `if`/`else if` arm: a condition and the block it guards.
#[derive(Debug, Clone, PartialEq)]
pub struct IfBranch {
    /// The branch condition, evaluated for truthiness.
    pub condition: Expr,
    /// The block executed when the condition holds.
    pub block:     Expr,
}

/// The three shapes a `loop` expression can take.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopKind {
    /// `loop { body }` — runs until `break`.
    Infinite {
        /// The loop body block.
        body: Box<Expr>,
    },
    /// `loop cond { body }` — the condition is re-walked every iteration.
    While {
        /// The condition expression.
        condition: Box<Expr>,
        /// The loop body block.
        body:      Box<Expr>,
    },
    /// `loop x in iterable { body }` — iterates ranges, strings, arrays and
    /// vectors.
    ForIn {
        /// The loop variable, bound afresh each iteration.
        var:      String,
        /// The expression producing the iterated value.
        iterable: Box<Expr>,
        /// The loop body block.
        body:     Box<Expr>,
    },
}

/// Prefix operators with value-returning intrinsics among them.
///
/// These parse exactly like unary operators (`lenof x`, `log x`) but their
/// semantics range from inspection (`typeof`) to I/O (`log`, `get`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntrinsicOp {
    /// Element or character count of a sequence.
    Lenof,
    /// Recursive byte estimate of a value.
    Sizeof,
    /// Type tag of a value, as a string.
    Typeof,
    /// Deep structural clone.
    Copyof,
    /// First element of an ordered value.
    Firstof,
    /// Last element of an ordered value.
    Lastof,
    /// Write the plain formatting of the operand.
    Log,
    /// Write the plain formatting of the operand followed by a newline.
    Logln,
    /// Read one whitespace-separated token from standard input.
    Get,
    /// Read one full line from standard input.
    Getln,
}

impl std::fmt::Display for IntrinsicOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Lenof => "lenof",
            Self::Sizeof => "sizeof",
            Self::Typeof => "typeof",
            Self::Copyof => "copyof",
            Self::Firstof => "firstof",
            Self::Lastof => "lastof",
            Self::Log => "log",
            Self::Logln => "logln",
            Self::Get => "get",
            Self::Getln => "getln",
        };
        write!(f, "{name}")
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Everything in the language is an expression, including assignments,
/// conditionals, loops and `break`. Each variant carries the source line of
/// its introducing token for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A unary operation (`-x`, `!x`, `~x`, `+x`).
    Unary {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation, including the short-circuit operators.
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A range expression, half-open (`a..b`) or closed (`a..=b`).
    Range {
        /// Start bound.
        start:  Box<Self>,
        /// End bound.
        end:    Box<Self>,
        /// Whether the end bound is included.
        closed: bool,
        /// Line number in the source code.
        line:   usize,
    },
    /// An `as` cast.
    Cast {
        /// The value being converted.
        expr:   Box<Self>,
        /// The conversion target.
        target: CastTarget,
        /// Line number in the source code.
        line:   usize,
    },
    /// An assignment or compound assignment into a place.
    Assign {
        /// The place being written.
        target: AssignTarget,
        /// `None` for plain `=`; the combining operator for `+=` and kin.
        op:     Option<BinaryOperator>,
        /// The right-hand side.
        value:  Box<Self>,
        /// Line number in the source code.
        line:   usize,
    },
    /// An atomic exchange of two places: `a <=> b`.
    Swap {
        /// The left place.
        left:  AssignTarget,
        /// The right place.
        right: AssignTarget,
        /// Line number in the source code.
        line:  usize,
    },
    /// A prefix or postfix increment/decrement of a numeric place.
    Update {
        /// The place being stepped.
        target:    AssignTarget,
        /// `true` for `++`, `false` for `--`.
        increment: bool,
        /// `true` when the operator precedes the place (yields the new
        /// value), `false` for postfix (yields the old value).
        prefix:    bool,
        /// Line number in the source code.
        line:      usize,
    },
    /// An element read: `container[index]` or `container.N`.
    Index {
        /// The indexed container.
        target: Box<Self>,
        /// The index or range expression.
        index:  Box<Self>,
        /// Line number in the source code.
        line:   usize,
    },
    /// A fixed-size array literal, optionally replicated: `[a b]`, `[e; n]`.
    ArrayLiteral {
        /// Element expressions, or the per-slot block when replicated.
        elements: Vec<Self>,
        /// The replication count after `;`, when present.
        count:    Option<Box<Self>>,
        /// Line number in the source code.
        line:     usize,
    },
    /// A growable vector literal: `![a b]`, `![e; n]`.
    VectorLiteral {
        /// Element expressions, or the per-slot block when replicated.
        elements: Vec<Self>,
        /// The replication count after `;`, when present.
        count:    Option<Box<Self>>,
        /// Line number in the source code.
        line:     usize,
    },
    /// An ordered set literal: `@{a b}`.
    SetLiteral {
        /// Element expressions, inserted in order.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// A conditional expression with any number of `else if` arms.
    If {
        /// The `if` and `else if` arms, in source order.
        branches:   Vec<IfBranch>,
        /// The trailing `else` block, when present.
        else_block: Option<Box<Self>>,
        /// Line number in the source code.
        line:       usize,
    },
    /// A `loop` expression in one of its three shapes.
    Loop {
        /// Which loop shape was written.
        kind: LoopKind,
        /// Line number in the source code.
        line: usize,
    },
    /// A braced block of statements; its value is the last statement's.
    Block {
        /// Statements inside the block.
        statements: Vec<Statement>,
        /// Line number in the source code.
        line:       usize,
    },
    /// `break`, optionally carrying the loop's result value.
    Break {
        /// The value handed to the enclosing loop.
        value: Option<Box<Self>>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `continue`.
    Continue {
        /// Line number in the source code.
        line: usize,
    },
    /// A prefix intrinsic: `lenof x`, `typeof x`, `log x`, `get`, ...
    Intrinsic {
        /// Which intrinsic was written.
        op:   IntrinsicOp,
        /// The operand; absent for bare `log`/`logln`/`get`/`getln`.
        expr: Option<Box<Self>>,
        /// Line number in the source code.
        line: usize,
    },
    /// Removal of a variable or container element: `del x`, `del v[0]`.
    Del {
        /// The place being removed.
        target: AssignTarget,
        /// Line number in the source code.
        line:   usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Variable { line, .. }
            | Self::Unary { line, .. }
            | Self::Binary { line, .. }
            | Self::Range { line, .. }
            | Self::Cast { line, .. }
            | Self::Assign { line, .. }
            | Self::Swap { line, .. }
            | Self::Update { line, .. }
            | Self::Index { line, .. }
            | Self::ArrayLiteral { line, .. }
            | Self::VectorLiteral { line, .. }
            | Self::SetLiteral { line, .. }
            | Self::If { line, .. }
            | Self::Loop { line, .. }
            | Self::Block { line, .. }
            | Self::Break { line, .. }
            | Self::Continue { line }
            | Self::Intrinsic { line, .. }
            | Self::Del { line, .. } => *line,
        }
    }
}

/// Represents a top-level or block-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A standalone expression evaluated for its value and side effects.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// A constant declaration: `const name = expression`.
    ConstDeclaration {
        /// The name of the constant.
        name:  String,
        /// The initial (and only) value of the constant.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Floor division (`~/`)
    FloorDiv,
    /// Modulo (`%`)
    Mod,
    /// Exponentiation (`**`)
    Pow,
    /// Bitwise and (`&`)
    BitAnd,
    /// Bitwise or (`|`)
    BitOr,
    /// Bitwise exclusive or (`^`)
    BitXor,
    /// Left shift (`<<`)
    Shl,
    /// Arithmetic right shift (`>>`)
    Shr,
    /// Logical right shift (`>>>`)
    UShr,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Short-circuit logical and (`&&`)
    And,
    /// Short-circuit logical or (`||`)
    Or,
    /// Null-coalescing (`??`)
    Nullish,
    /// Membership test (`has`)
    Has,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (`-x`).
    Negate,
    /// Arithmetic identity (`+x`), numeric operands only.
    Plus,
    /// Logical NOT over truthiness (`!x`).
    Not,
    /// Bitwise complement (`~x`).
    BitNot,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, BitAnd, BitOr, BitXor, Div, Equal, FloorDiv, Greater, GreaterEqual, Has,
            Less, LessEqual, Mod, Mul, NotEqual, Nullish, Or, Pow, Shl, Shr, Sub, UShr,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            FloorDiv => "~/",
            Mod => "%",
            Pow => "**",
            BitAnd => "&",
            BitOr => "|",
            BitXor => "^",
            Shl => "<<",
            Shr => ">>",
            UShr => ">>>",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            And => "&&",
            Or => "||",
            Nullish => "??",
            Has => "has",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Negate => "-",
            Self::Plus => "+",
            Self::Not => "!",
            Self::BitNot => "~",
        };
        write!(f, "{operator}")
    }
}
