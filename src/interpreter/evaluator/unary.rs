use num_bigint::BigInt;

use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    util::num::f64_to_i64_checked,
};

impl Context<'_> {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate` / `Plus`: numeric negation and identity, numbers and big
    ///   integers only.
    /// - `Not`: logical negation of the operand's truthiness, defined for
    ///   every value.
    /// - `BitNot`: bitwise complement; integral numbers use 64-bit
    ///   semantics, big integers are exact.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The computed `Value` wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use luz::{ast::UnaryOperator, interpreter::{evaluator::core::Context, value::core::Value}};
    ///
    /// let v = Context::eval_unary(UnaryOperator::Negate, &Value::Num(5.0), 1).unwrap();
    /// assert_eq!(v, Value::Num(-5.0));
    ///
    /// let v = Context::eval_unary(UnaryOperator::Not, &Value::Null, 1).unwrap();
    /// assert_eq!(v, Value::Bool(true));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => match value {
                Value::Num(n) => Ok(Value::Num(-n)),
                Value::Xl(b) => Ok(Value::Xl(-b)),
                _ => Err(RuntimeError::ExpectedNumber { line }),
            },
            UnaryOperator::Plus => match value {
                Value::Num(_) | Value::Xl(_) => Ok(value.clone()),
                _ => Err(RuntimeError::ExpectedNumber { line }),
            },
            UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
            UnaryOperator::BitNot => match value {
                Value::Num(n) => {
                    let bits = f64_to_i64_checked(*n, line)?;
                    #[allow(clippy::cast_precision_loss)]
                    Ok(Value::Num(!bits as f64))
                },
                Value::Xl(b) => Ok(Value::Xl(-(b + BigInt::from(1)))),
                _ => Err(RuntimeError::ExpectedNumber { line }),
            },
        }
    }
}
