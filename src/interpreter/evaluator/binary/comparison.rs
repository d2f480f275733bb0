use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// Equality uses loose equality: scalars compare structurally (numbers
    /// across the `num`/`xl` families compare numerically), aggregates by
    /// the identity of their shared allocation. Ordering requires both
    /// sides in the same numeric family; anything else is a semantic
    /// error.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    /// - `line`: Current line number used for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean result.
    ///
    /// # Example
    /// ```
    /// use luz::{ast::BinaryOperator, interpreter::{evaluator::core::Context, value::core::Value}};
    ///
    /// let a = Value::Num(3.0);
    /// let b = Value::Num(5.0);
    ///
    /// let result = Context::eval_comparison(BinaryOperator::Less, &a, &b, 1);
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

        Ok(Value::Bool(match op {
                           Equal => left.loose_eq(right),
                           NotEqual => !left.loose_eq(right),

                           Less | Greater | LessEqual | GreaterEqual => {
                               let ordering = match (left, right) {
                                   (Value::Num(a), Value::Num(b)) => a.partial_cmp(b),
                                   (Value::Xl(a), Value::Xl(b)) => Some(a.cmp(b)),
                                   _ => {
                                       return Err(RuntimeError::MixedComparison {
                                           left: left.type_tag(),
                                           right: right.type_tag(),
                                           line,
                                       });
                                   },
                               };

                               match ordering {
                                   Some(ordering) => match op {
                                       Less => ordering.is_lt(),
                                       Greater => ordering.is_gt(),
                                       LessEqual => ordering.is_le(),
                                       GreaterEqual => ordering.is_ge(),
                                       _ => unreachable!(),
                                   },
                                   None => false,
                               }
                           },

                           _ => unreachable!(),
                       }))
    }

    /// Evaluates the membership operator `has`.
    ///
    /// - A range on the left tests numeric membership by its bounds.
    /// - Sequences test element equality; sets test membership.
    /// - A string tests for a substring.
    /// - `null` contains nothing.
    ///
    /// Any other left operand is a semantic error.
    ///
    /// # Parameters
    /// - `left`: The container or range searched.
    /// - `right`: The candidate member.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean.
    pub fn eval_has(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        let found = match left {
            Value::Ran(range) => match right {
                Value::Num(_) | Value::Xl(_) => range.contains(right.as_num(line)?),
                _ => false,
            },
            Value::Arr(cells) | Value::Vec(cells) => {
                cells.borrow().iter().any(|e| e.loose_eq(right))
            },
            Value::Set(entries) => entries.borrow().contains(right),
            Value::Str(s) => match right {
                Value::Str(needle) => s.contains(needle.as_str()),
                _ => false,
            },
            Value::Null => false,
            _ => {
                return Err(RuntimeError::UnsupportedOperand { details: format!("Cannot use 'has' on '{}'",
                                                                               left.type_tag()),
                                                              line });
            },
        };

        Ok(Value::Bool(found))
    }
}
