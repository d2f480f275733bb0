use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::{Value, big_to_f64},
    },
};

impl Context<'_> {
    /// Evaluates a scalar arithmetic operation.
    ///
    /// Two big integers stay in big-integer arithmetic, except `/`, which
    /// promotes to floating point. Mixed numeric operands promote the big
    /// side to `num`. Floating-point results pass through `NaN`
    /// normalisation, so `0/0` is `null` while `x/0` is an infinity.
    ///
    /// # Parameters
    /// - `op`: The arithmetic operator (`*`, `/`, `~/`, `%`, `**`, or the
    ///   scalar fallback of `+`/`-`).
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the computed scalar.
    ///
    /// # Example
    /// ```
    /// use luz::{ast::BinaryOperator, interpreter::{evaluator::core::Context, value::core::Value}};
    ///
    /// let x = Value::Num(7.0);
    /// let y = Value::Num(2.0);
    ///
    /// let result = Context::eval_scalar_op(BinaryOperator::FloorDiv, &x, &y, 1).unwrap();
    /// assert_eq!(result, Value::Num(3.0));
    /// ```
    pub fn eval_scalar_op(op: BinaryOperator,
                          left: &Value,
                          right: &Value,
                          line: usize)
                          -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, FloorDiv, Mod, Mul, Pow, Sub};
        use Value::Xl;

        match (left, right) {
            (Xl(a), Xl(b)) => match op {
                Add => Ok(Xl(a + b)),
                Sub => Ok(Xl(a - b)),
                Mul => Ok(Xl(a * b)),
                Div => Ok(Value::from_num(big_to_f64(a) / big_to_f64(b))),
                FloorDiv => {
                    if b.is_zero() {
                        return Err(RuntimeError::DivisionByZero { line });
                    }
                    Ok(Xl(floor_div(a, b)))
                },
                Mod => {
                    if b.is_zero() {
                        return Err(RuntimeError::DivisionByZero { line });
                    }
                    Ok(Xl(a % b))
                },
                Pow => big_pow(a, b, line),
                _ => unreachable!(),
            },

            _ if left.is_numeric() && right.is_numeric() => {
                let a = left.as_num(line)?;
                let b = right.as_num(line)?;

                Ok(Value::from_num(match op {
                                       Add => a + b,
                                       Sub => a - b,
                                       Mul => a * b,
                                       Div => a / b,
                                       FloorDiv => (a / b).floor(),
                                       Mod => a % b,
                                       Pow => a.powf(b),
                                       _ => unreachable!(),
                                   }))
            },

            _ => {
                Err(RuntimeError::TypeError { details: format!("Cannot use '{op}' on '{}' and '{}'",
                                                               left.type_tag(),
                                                               right.type_tag()),
                                              line })
            },
        }
    }
}

/// Floor division on big integers: the quotient rounded towards negative
/// infinity.
fn floor_div(a: &BigInt, b: &BigInt) -> BigInt {
    let quotient = a / b;
    let remainder = a % b;
    if !remainder.is_zero() && (remainder.is_negative() != b.is_negative()) {
        quotient - BigInt::from(1)
    } else {
        quotient
    }
}

/// Exponentiation on big integers. Negative or oversized exponents promote
/// to floating point.
fn big_pow(base: &BigInt, exponent: &BigInt, line: usize) -> EvalResult<Value> {
    match exponent.to_u32() {
        Some(exp) => Ok(Value::Xl(base.pow(exp))),
        None => {
            if exponent.is_negative() {
                Ok(Value::from_num(big_to_f64(base).powf(big_to_f64(exponent))))
            } else {
                Err(RuntimeError::LiteralTooLarge { line })
            }
        },
    }
}
