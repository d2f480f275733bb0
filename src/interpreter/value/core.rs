use std::{cell::RefCell, collections::HashMap, collections::HashSet, rc::Rc};

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::{
    ast::TypeName,
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{ordered_set::OrderedSet, range::RangeValue},
    },
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments and conditional evaluations. Aggregates (`Arr`, `Vec`, `Set`)
/// share their storage behind `Rc<RefCell<..>>`, so two bindings reaching the
/// same aggregate observe each other's element writes; `copyof` is the only
/// way to sever that link.
#[derive(Debug, Clone)]
pub enum Value {
    /// A 64-bit floating-point number. Infinities are first-class and report
    /// the `inf` type tag; `NaN` never survives an operator (it normalises
    /// to `Null`).
    Num(f64),
    /// An arbitrary-precision integer.
    Xl(BigInt),
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// An immutable string.
    Str(String),
    /// The unit value.
    Null,
    /// A fixed-length array. Element writes within bounds are allowed;
    /// growing or shrinking is not.
    Arr(Rc<RefCell<Vec<Self>>>),
    /// A growable vector.
    Vec(Rc<RefCell<Vec<Self>>>),
    /// An ordered-last-insertion set.
    Set(Rc<RefCell<OrderedSet>>),
    /// A numeric range; `closed` distinguishes `a..b` from `a..=b`.
    Ran(RangeValue),
}

impl PartialEq for Value {
    /// Strict equality: scalars compare structurally, aggregates by the
    /// identity of their shared allocation.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Num(a), Self::Num(b)) => a == b,
            (Self::Xl(a), Self::Xl(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Null, Self::Null) => true,
            (Self::Arr(a), Self::Arr(b)) | (Self::Vec(a), Self::Vec(b)) => Rc::ptr_eq(a, b),
            (Self::Set(a), Self::Set(b)) => Rc::ptr_eq(a, b),
            (Self::Ran(a), Self::Ran(b)) => a == b,
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Num(v)
    }
}

impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        Self::Xl(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<RangeValue> for Value {
    fn from(v: RangeValue) -> Self {
        Self::Ran(v)
    }
}

impl Value {
    /// Wraps element storage into a fixed-size array value.
    #[must_use]
    pub fn array(elements: Vec<Self>) -> Self {
        Self::Arr(Rc::new(RefCell::new(elements)))
    }

    /// Wraps element storage into a growable vector value.
    #[must_use]
    pub fn vector(elements: Vec<Self>) -> Self {
        Self::Vec(Rc::new(RefCell::new(elements)))
    }

    /// Wraps an ordered set into a set value.
    #[must_use]
    pub fn set(entries: OrderedSet) -> Self {
        Self::Set(Rc::new(RefCell::new(entries)))
    }

    /// Converts an operator's numeric output into a value, normalising
    /// `NaN` to `Null`.
    #[must_use]
    pub fn from_num(n: f64) -> Self {
        if n.is_nan() { Self::Null } else { Self::Num(n) }
    }

    /// Returns the type of the value as exposed by `typeof`.
    ///
    /// Infinite numbers report `inf`; half-open ranges report `ran` and
    /// closed ones `xran`.
    #[must_use]
    pub fn type_name(&self) -> TypeName {
        match self {
            Self::Num(n) if n.is_infinite() => TypeName::Inf,
            Self::Num(_) => TypeName::Num,
            Self::Xl(_) => TypeName::Xl,
            Self::Bool(_) => TypeName::Bool,
            Self::Str(_) => TypeName::Str,
            Self::Null => TypeName::Null,
            Self::Arr(_) => TypeName::Arr,
            Self::Vec(_) => TypeName::Vec,
            Self::Set(_) => TypeName::Set,
            Self::Ran(r) if r.closed => TypeName::Xran,
            Self::Ran(_) => TypeName::Ran,
        }
    }

    /// Returns the tag string of the value's type.
    #[must_use]
    pub fn type_tag(&self) -> &'static str {
        self.type_name().as_tag()
    }

    /// The truthiness used by `!`, conditions and the short-circuit
    /// operators: `null` and `false` are falsy, along with zero, the empty
    /// string, empty aggregates and empty ranges.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Num(n) => *n != 0.0,
            Self::Xl(b) => !b.is_zero(),
            Self::Str(s) => !s.is_empty(),
            Self::Arr(cells) | Self::Vec(cells) => !cells.borrow().is_empty(),
            Self::Set(entries) => !entries.borrow().is_empty(),
            Self::Ran(r) => !r.is_empty(),
        }
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// Big integers out of `f64` range collapse to the infinity of their
    /// sign.
    pub fn as_num(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Num(n) => Ok(*n),
            Self::Xl(b) => Ok(big_to_f64(b)),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }

    /// Returns `true` for `Num` and `Xl` values.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Num(_) | Self::Xl(_))
    }

    /// Loose equality as used by the language's `==`: strict equality plus
    /// numeric comparison across the `num`/`xl` families.
    #[must_use]
    pub fn loose_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Num(n), Self::Xl(b)) | (Self::Xl(b), Self::Num(n)) => big_to_f64(b) == *n,
            _ => self == other,
        }
    }

    /// Performs the deep structural clone behind `copyof`.
    ///
    /// Aggregates are cloned recursively; shared substructure and cycles are
    /// preserved in the copy rather than unfolded.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        self.deep_copy_with(&mut HashMap::new())
    }

    fn deep_copy_with(&self, seen: &mut HashMap<usize, Self>) -> Self {
        match self {
            Self::Arr(cells) | Self::Vec(cells) => {
                let ptr = Rc::as_ptr(cells) as usize;
                if let Some(copy) = seen.get(&ptr) {
                    return copy.clone();
                }

                let storage = Rc::new(RefCell::new(Vec::with_capacity(cells.borrow().len())));
                let copy = if matches!(self, Self::Arr(_)) {
                    Self::Arr(Rc::clone(&storage))
                } else {
                    Self::Vec(Rc::clone(&storage))
                };
                seen.insert(ptr, copy.clone());

                for element in cells.borrow().iter() {
                    storage.borrow_mut().push(element.deep_copy_with(seen));
                }
                copy
            },
            Self::Set(entries) => {
                let ptr = Rc::as_ptr(entries) as usize;
                if let Some(copy) = seen.get(&ptr) {
                    return copy.clone();
                }

                let storage = Rc::new(RefCell::new(OrderedSet::new()));
                let copy = Self::Set(Rc::clone(&storage));
                seen.insert(ptr, copy.clone());

                for element in entries.borrow().iter() {
                    let cloned = element.deep_copy_with(seen);
                    storage.borrow_mut().insert(cloned);
                }
                copy
            },
            _ => self.clone(),
        }
    }

    /// Estimates the memory footprint in bytes: `null` = 4, `bool` = 1,
    /// `num` = 8, `str` = 2·length, `xl` = 2·digits, ranges = two numbers,
    /// aggregates = sum of members. Shared allocations are counted once.
    #[must_use]
    pub fn byte_size(&self) -> u64 {
        self.byte_size_with(&mut HashSet::new())
    }

    fn byte_size_with(&self, seen: &mut HashSet<usize>) -> u64 {
        match self {
            Self::Null => 4,
            Self::Bool(_) => 1,
            Self::Num(_) => 8,
            Self::Ran(_) => 16,
            Self::Str(s) => 2 * s.chars().count() as u64,
            Self::Xl(b) => {
                let digits = b.abs().to_string().len() as u64;
                2 * digits
            },
            Self::Arr(cells) | Self::Vec(cells) => {
                if !seen.insert(Rc::as_ptr(cells) as usize) {
                    return 0;
                }
                cells.borrow().iter().map(|e| e.byte_size_with(seen)).sum()
            },
            Self::Set(entries) => {
                if !seen.insert(Rc::as_ptr(entries) as usize) {
                    return 0;
                }
                entries.borrow().iter().map(|e| e.byte_size_with(seen)).sum()
            },
        }
    }

    /// Formats the value the way `log`, interpolation and `as str` show it.
    ///
    /// # Example
    /// ```
    /// use luz::interpreter::value::core::Value;
    ///
    /// let v = Value::vector(vec![Value::Num(1.0), Value::Str("hi".into())]);
    /// assert_eq!(v.format_plain(), "![1 hi]");
    ///
    /// assert_eq!(Value::Num(f64::INFINITY).format_plain(), "inf");
    /// ```
    #[must_use]
    pub fn format_plain(&self) -> String {
        let mut out = String::new();
        self.write_formatted(&mut out, false, &mut Vec::new());
        out
    }

    /// Formats the value for debug output: like [`format_plain`], except
    /// strings are quoted with their escapes restored and big integers keep
    /// their `xl` suffix.
    ///
    /// [`format_plain`]: Value::format_plain
    ///
    /// # Example
    /// ```
    /// use luz::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Str("a\tb".into()).format_debug(), "\"a\\tb\"");
    /// ```
    #[must_use]
    pub fn format_debug(&self) -> String {
        let mut out = String::new();
        self.write_formatted(&mut out, true, &mut Vec::new());
        out
    }

    fn write_formatted(&self, out: &mut String, debug: bool, visiting: &mut Vec<usize>) {
        match self {
            Self::Num(n) => {
                // NaN cannot normally reach a formatter; print it as its
                // normalised form anyway.
                if n.is_nan() {
                    out.push_str("null");
                } else {
                    out.push_str(&n.to_string());
                }
            },
            Self::Xl(b) => {
                out.push_str(&b.to_string());
                if debug {
                    out.push_str("xl");
                }
            },
            Self::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Self::Null => out.push_str("null"),
            Self::Str(s) => {
                if debug {
                    out.push('"');
                    for c in s.chars() {
                        match c {
                            '\n' => out.push_str("\\n"),
                            '\t' => out.push_str("\\t"),
                            '\\' => out.push_str("\\\\"),
                            '"' => out.push_str("\\\""),
                            _ => out.push(c),
                        }
                    }
                    out.push('"');
                } else {
                    out.push_str(s);
                }
            },
            Self::Ran(r) => {
                let op = if r.closed { "..=" } else { ".." };
                out.push_str(&format!("{}{op}{}", r.start, r.end));
            },
            Self::Arr(cells) | Self::Vec(cells) => {
                let (open, close, cycle) = if matches!(self, Self::Arr(_)) {
                    ("[", "]", "[...]")
                } else {
                    ("![", "]", "![...]")
                };

                let ptr = Rc::as_ptr(cells) as usize;
                if visiting.contains(&ptr) {
                    out.push_str(cycle);
                    return;
                }
                visiting.push(ptr);

                out.push_str(open);
                for (index, element) in cells.borrow().iter().enumerate() {
                    if index > 0 {
                        out.push(' ');
                    }
                    element.write_formatted(out, debug, visiting);
                }
                out.push_str(close);

                visiting.pop();
            },
            Self::Set(entries) => {
                let ptr = Rc::as_ptr(entries) as usize;
                if visiting.contains(&ptr) {
                    out.push_str("@{...}");
                    return;
                }
                visiting.push(ptr);

                out.push_str("@{");
                for (index, element) in entries.borrow().iter().enumerate() {
                    if index > 0 {
                        out.push(' ');
                    }
                    element.write_formatted(out, debug, visiting);
                }
                out.push('}');

                visiting.pop();
            },
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format_plain())
    }
}

/// Converts a big integer to `f64`, collapsing out-of-range magnitudes to
/// the infinity of their sign.
#[must_use]
pub fn big_to_f64(b: &BigInt) -> f64 {
    b.to_f64().unwrap_or_else(|| {
                  if b.is_negative() {
                      f64::NEG_INFINITY
                  } else {
                      f64::INFINITY
                  }
              })
}
