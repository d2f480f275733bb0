use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates `+` and `-`, which carry the aggregate, range and string
    /// forms on top of scalar arithmetic.
    ///
    /// - `vec + x` / `x + vec` build a new vector with `x` appended or
    ///   prepended; `vec - x` builds one without the last occurrence of
    ///   `x`.
    /// - `set + x` builds a new set with `x` inserted (order updated);
    ///   `x + set` puts `x` in front; `set - x` removes.
    /// - `arr` refuses both, suggesting a vector.
    /// - A range on the left shifts its end by a number; a number added on
    ///   the left of a range shifts its start.
    /// - Two strings concatenate under `+`.
    ///
    /// Everything else falls through to scalar arithmetic.
    ///
    /// # Parameters
    /// - `op`: `Add` or `Sub`.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the combined value.
    pub fn eval_additive(op: BinaryOperator,
                         left: &Value,
                         right: &Value,
                         line: usize)
                         -> EvalResult<Value> {
        use BinaryOperator::Add;

        match (left, right) {
            (Value::Arr(_), _) | (_, Value::Arr(_)) => {
                Err(RuntimeError::FixedSizeArray { line })
            },

            (Value::Ran(range), shift) => {
                let delta = range_shift(shift, line)?;
                let delta = if op == Add { delta } else { -delta };
                Ok(Value::Ran(range.shift_end(delta)))
            },

            (Value::Vec(cells), element) if op == Add => {
                let mut combined = cells.borrow().clone();
                combined.push(element.clone());
                Ok(Value::vector(combined))
            },
            (element, Value::Vec(cells)) if op == Add => {
                let mut combined = Vec::with_capacity(cells.borrow().len() + 1);
                combined.push(element.clone());
                combined.extend(cells.borrow().iter().cloned());
                Ok(Value::vector(combined))
            },
            (Value::Vec(cells), element) => {
                let mut combined = cells.borrow().clone();
                if let Some(position) = combined.iter().rposition(|e| e.loose_eq(element)) {
                    combined.remove(position);
                }
                Ok(Value::vector(combined))
            },

            (Value::Set(entries), element) if op == Add => {
                let mut combined = entries.borrow().clone();
                combined.insert(element.clone());
                Ok(Value::set(combined))
            },
            (element, Value::Set(entries)) if op == Add => {
                let mut combined = crate::interpreter::value::ordered_set::OrderedSet::new();
                combined.insert(element.clone());
                for existing in entries.borrow().iter() {
                    combined.insert(existing.clone());
                }
                Ok(Value::set(combined))
            },
            (Value::Set(entries), element) => {
                let mut combined = entries.borrow().clone();
                combined.remove(element);
                Ok(Value::set(combined))
            },

            (Value::Str(a), Value::Str(b)) if op == Add => Ok(Value::Str(format!("{a}{b}"))),

            (shift, Value::Ran(range)) if op == Add => {
                let delta = range_shift(shift, line)?;
                Ok(Value::Ran(range.shift_start(delta)))
            },
            (_, Value::Ran(_)) => {
                Err(RuntimeError::UnsupportedOperand { details:
                                                           "Cannot subtract a range".to_string(),
                                                       line })
            },

            _ => Self::eval_scalar_op(op, left, right, line),
        }
    }
}

/// Extracts the numeric shift applied to a range bound.
fn range_shift(value: &Value, line: usize) -> EvalResult<f64> {
    if value.is_numeric() {
        value.as_num(line)
    } else {
        Err(RuntimeError::InvalidRangeShift { type_name: value.type_tag(),
                                              line })
    }
}
