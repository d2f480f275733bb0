use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        evaluator::core::{Context, EvalResult, StepOutcome, step},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a binary expression, including the short-circuit
    /// operators.
    ///
    /// `&&`, `||` and `??` evaluate their left operand first and skip the
    /// right one entirely when the left decides the result; the skipped
    /// operand's semantic errors never fire. All value-returning logic
    /// follows the left-to-right evaluation order.
    ///
    /// # Parameters
    /// - `left`: Left operand expression.
    /// - `op`: The operator.
    /// - `right`: Right operand expression.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The outcome of the operation.
    pub fn eval_binary_expr(&mut self,
                            left: &Expr,
                            op: BinaryOperator,
                            right: &Expr,
                            line: usize)
                            -> EvalResult<StepOutcome> {
        use BinaryOperator::{And, Nullish, Or};

        match op {
            And => {
                let left_value = step!(self.eval(left));
                if !left_value.is_truthy() {
                    return Ok(StepOutcome::Normal(left_value));
                }
                Ok(StepOutcome::Normal(step!(self.eval(right))))
            },
            Or => {
                let left_value = step!(self.eval(left));
                if left_value.is_truthy() {
                    return Ok(StepOutcome::Normal(left_value));
                }
                Ok(StepOutcome::Normal(step!(self.eval(right))))
            },
            Nullish => {
                let left_value = step!(self.eval(left));
                if left_value != Value::Null {
                    return Ok(StepOutcome::Normal(left_value));
                }
                Ok(StepOutcome::Normal(step!(self.eval(right))))
            },
            _ => {
                let left_value = step!(self.eval(left));
                let right_value = step!(self.eval(right));
                Ok(StepOutcome::Normal(Self::eval_binary(op, &left_value, &right_value, line)?))
            },
        }
    }

    /// Evaluates a binary operation between two values.
    ///
    /// This function routes the operation to specialized handlers depending
    /// on the operator and operand kinds. `+` and `-` consider aggregates,
    /// ranges and strings before falling back to scalar arithmetic; the
    /// remaining arithmetic is scalar-only; comparisons, membership and
    /// bitwise operators have their own handlers.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, BitAnd, BitOr, BitXor, Div, Equal, FloorDiv, Greater, GreaterEqual, Has,
            Less, LessEqual, Mod, Mul, NotEqual, Nullish, Or, Pow, Shl, Shr, Sub, UShr,
        };

        match op {
            Add | Sub => Self::eval_additive(op, left, right, line),

            Mul | Div | FloorDiv | Mod | Pow => Self::eval_scalar_op(op, left, right, line),

            BitAnd | BitOr | BitXor | Shl | Shr | UShr => {
                Self::eval_bitwise(op, left, right, line)
            },

            Less | Greater | LessEqual | GreaterEqual | Equal | NotEqual => {
                Self::eval_comparison(op, left, right, line)
            },

            Has => Self::eval_has(left, right, line),

            And | Or | Nullish => {
                unreachable!("short-circuit operators are handled at the expression level")
            },
        }
    }
}
