use num_traits::{Signed, ToPrimitive};

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    util::num::f64_to_i64_checked,
};

impl Context<'_> {
    /// Evaluates a bitwise operation.
    ///
    /// Two big integers stay in arbitrary-precision arithmetic (where the
    /// logical shift `>>>` has no meaning and is rejected). All other
    /// numeric operands use 64-bit integer semantics: values must be
    /// integral, shifts are taken modulo 64, and `>>>` shifts the raw bit
    /// pattern.
    ///
    /// # Parameters
    /// - `op`: The bitwise operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the computed integer.
    pub fn eval_bitwise(op: BinaryOperator,
                        left: &Value,
                        right: &Value,
                        line: usize)
                        -> EvalResult<Value> {
        use BinaryOperator::{BitAnd, BitOr, BitXor, Shl, Shr, UShr};

        if let (Value::Xl(a), Value::Xl(b)) = (left, right) {
            return match op {
                BitAnd => Ok(Value::Xl(a & b)),
                BitOr => Ok(Value::Xl(a | b)),
                BitXor => Ok(Value::Xl(a ^ b)),
                Shl | Shr => {
                    if b.is_negative() {
                        return Err(RuntimeError::LiteralTooSmall { line });
                    }
                    let shift =
                        b.to_usize().ok_or(RuntimeError::LiteralTooLarge { line })?;
                    if op == Shl {
                        Ok(Value::Xl(a << shift))
                    } else {
                        Ok(Value::Xl(a >> shift))
                    }
                },
                UShr => {
                    Err(RuntimeError::UnsupportedOperand { details: "'>>>' is not defined for big integers".to_string(),
                                                           line })
                },
                _ => unreachable!(),
            };
        }

        if !left.is_numeric() || !right.is_numeric() {
            return Err(RuntimeError::TypeError { details: format!("Cannot use '{op}' on '{}' and '{}'",
                                                                  left.type_tag(),
                                                                  right.type_tag()),
                                                 line });
        }

        let a = f64_to_i64_checked(left.as_num(line)?, line)?;
        let b = f64_to_i64_checked(right.as_num(line)?, line)?;

        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let result = match op {
            BitAnd => a & b,
            BitOr => a | b,
            BitXor => a ^ b,
            Shl => a.wrapping_shl(b as u32),
            Shr => a.wrapping_shr(b as u32),
            UShr => ((a as u64).wrapping_shr(b as u32)) as i64,
            _ => unreachable!(),
        };

        #[allow(clippy::cast_precision_loss)]
        Ok(Value::Num(result as f64))
    }
}
