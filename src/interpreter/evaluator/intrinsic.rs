use crate::{
    ast::{Expr, IntrinsicOp},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, StepOutcome, step},
        value::core::Value,
    },
    util::num::usize_to_f64_checked,
};

impl Context<'_> {
    /// Evaluates a prefix intrinsic.
    ///
    /// The inspection intrinsics (`lenof`, `sizeof`, `typeof`, `copyof`,
    /// `firstof`, `lastof`) compute over their operand's value. The I/O
    /// intrinsics route through the injected host: `log`/`logln` write the
    /// plain formatting of their operand (or nothing/just a newline when
    /// bare), `get` reads whitespace-separated tokens through a small
    /// queue, `getln` reads whole lines.
    ///
    /// # Parameters
    /// - `op`: Which intrinsic to evaluate.
    /// - `operand`: The operand expression, absent for the bare I/O forms.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The intrinsic's value; the writing intrinsics yield `null`.
    pub fn eval_intrinsic(&mut self,
                          op: IntrinsicOp,
                          operand: Option<&Expr>,
                          line: usize)
                          -> EvalResult<StepOutcome> {
        match op {
            IntrinsicOp::Log | IntrinsicOp::Logln => {
                let text = match operand {
                    Some(expr) => {
                        let value = step!(self.eval(expr));
                        value.format_plain()
                    },
                    None => String::new(),
                };

                self.host.write_out(&text);
                if op == IntrinsicOp::Logln {
                    self.host.write_out("\n");
                }
                Ok(StepOutcome::Normal(Value::Null))
            },

            IntrinsicOp::Get | IntrinsicOp::Getln => {
                let prompt = match operand {
                    Some(expr) => {
                        let value = step!(self.eval(expr));
                        Some(value.format_plain())
                    },
                    None => None,
                };
                Ok(StepOutcome::Normal(self.read_input(op, prompt.as_deref())))
            },

            _ => {
                let expr = operand.ok_or_else(|| RuntimeError::Internal { details: format!("'{op}' parsed without an operand"),
                                                                          line })?;
                let value = step!(self.eval(expr));
                Ok(StepOutcome::Normal(self.eval_inspection(op, &value, line)?))
            },
        }
    }

    /// Evaluates the non-I/O intrinsics over an operand value.
    fn eval_inspection(&mut self, op: IntrinsicOp, value: &Value, line: usize) -> EvalResult<Value> {
        match op {
            IntrinsicOp::Typeof => Ok(Value::Str(value.type_tag().to_string())),

            IntrinsicOp::Copyof => Ok(value.deep_copy()),

            #[allow(clippy::cast_precision_loss)]
            IntrinsicOp::Sizeof => Ok(Value::Num(value.byte_size() as f64)),

            IntrinsicOp::Lenof => {
                let len = match value {
                    Value::Str(s) => s.chars().count(),
                    Value::Arr(cells) | Value::Vec(cells) => cells.borrow().len(),
                    Value::Set(entries) => entries.borrow().len(),
                    _ => {
                        return Err(RuntimeError::UnsupportedOperand { details: format!("Cannot use 'lenof' on '{}'",
                                                                                       value.type_tag()),
                                                                      line });
                    },
                };
                Ok(Value::Num(usize_to_f64_checked(len, line)?))
            },

            IntrinsicOp::Firstof | IntrinsicOp::Lastof => {
                let first = op == IntrinsicOp::Firstof;
                match value {
                    Value::Str(s) => {
                        let c = if first { s.chars().next() } else { s.chars().last() };
                        Ok(c.map_or(Value::Null, |c| Value::Str(c.to_string())))
                    },
                    Value::Arr(cells) | Value::Vec(cells) => {
                        let cells = cells.borrow();
                        let element = if first { cells.first() } else { cells.last() };
                        Ok(element.cloned().unwrap_or(Value::Null))
                    },
                    Value::Set(entries) => {
                        let entries = entries.borrow();
                        let element = if first { entries.first() } else { entries.last() };
                        Ok(element.cloned().unwrap_or(Value::Null))
                    },
                    Value::Ran(range) => {
                        let bound = if first { range.first() } else { range.last() };
                        Ok(bound.map_or(Value::Null, Value::Num))
                    },
                    _ => {
                        Err(RuntimeError::UnsupportedOperand { details: format!("Cannot use '{op}' on '{}'",
                                                                                value.type_tag()),
                                                               line })
                    },
                }
            },

            IntrinsicOp::Log
            | IntrinsicOp::Logln
            | IntrinsicOp::Get
            | IntrinsicOp::Getln => unreachable!("I/O intrinsics are handled by the caller"),
        }
    }

    /// Serves one `get`/`getln` request.
    ///
    /// `getln` always reads a fresh line. `get` keeps a token queue: when
    /// it runs dry a line is read and split on whitespace; each call then
    /// pops one token. End of input yields `null`.
    fn read_input(&mut self, op: IntrinsicOp, prompt: Option<&str>) -> Value {
        if op == IntrinsicOp::Getln {
            return match self.host.read_line(prompt) {
                Some(text) => Value::Str(text),
                None => Value::Null,
            };
        }

        while self.input_tokens.is_empty() {
            match self.host.read_line(prompt) {
                Some(text) => {
                    self.input_tokens
                        .extend(text.split_whitespace().map(str::to_string));
                },
                None => return Value::Null,
            }
        }

        self.input_tokens
            .pop_front()
            .map_or(Value::Null, Value::Str)
    }
}
