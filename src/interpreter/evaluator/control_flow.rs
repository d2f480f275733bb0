use crate::{
    ast::{Expr, IfBranch, LoopKind, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, StepOutcome, step},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a block of statements.
    ///
    /// A frame is opened for the block so that names introduced inside it
    /// vanish on exit, including abnormal exits through `break`, `continue`
    /// or errors. Writes to names that existed before the block persist.
    ///
    /// The block's value is the value of its last statement, `null` for an
    /// empty block.
    pub fn eval_block(&mut self, statements: &[Statement]) -> EvalResult<StepOutcome> {
        self.scope.open_frame();
        let result = self.eval_block_statements(statements);
        self.scope.close_frame();
        result
    }

    fn eval_block_statements(&mut self, statements: &[Statement]) -> EvalResult<StepOutcome> {
        let mut last = Value::Null;
        for statement in statements {
            match self.eval_statement(statement)? {
                StepOutcome::Normal(value) => last = value,
                other => return Ok(other),
            }
        }
        Ok(StepOutcome::Normal(last))
    }

    /// Evaluates an `if`/`else if`/`else` expression.
    ///
    /// Conditions are tested for truthiness in order; the first holding arm
    /// runs and supplies the expression's value. With no executed branch
    /// the result is `null`. Branches that are not taken are never
    /// evaluated, so their semantic errors cannot fire.
    pub fn eval_if(&mut self,
                   branches: &[IfBranch],
                   else_block: Option<&Expr>)
                   -> EvalResult<StepOutcome> {
        for branch in branches {
            let condition = step!(self.eval(&branch.condition));
            if condition.is_truthy() {
                return self.eval(&branch.block);
            }
        }

        match else_block {
            Some(block) => self.eval(block),
            None => Ok(StepOutcome::Normal(Value::Null)),
        }
    }

    /// Evaluates a `loop` expression.
    ///
    /// All three shapes share the same boundary behavior: each iteration
    /// runs in its own frame (the body block opens it), `Break` stops the
    /// loop and supplies its value, `Continue` moves to the next iteration,
    /// and errors propagate.
    ///
    /// The while shape re-walks its condition expression before every
    /// iteration. The for-in shape iterates ranges, strings (by character)
    /// and the two sequence aggregates; sets are not iterable.
    pub fn eval_loop(&mut self, kind: &LoopKind, line: usize) -> EvalResult<StepOutcome> {
        match kind {
            LoopKind::Infinite { body } => loop {
                match self.eval(body)? {
                    StepOutcome::Normal(_) | StepOutcome::Continue { .. } => {},
                    StepOutcome::Break { value, .. } => {
                        return Ok(StepOutcome::Normal(value));
                    },
                }
            },

            LoopKind::While { condition, body } => loop {
                let condition_value = step!(self.eval(condition));
                if !condition_value.is_truthy() {
                    return Ok(StepOutcome::Normal(Value::Null));
                }

                match self.eval(body)? {
                    StepOutcome::Normal(_) | StepOutcome::Continue { .. } => {},
                    StepOutcome::Break { value, .. } => {
                        return Ok(StepOutcome::Normal(value));
                    },
                }
            },

            LoopKind::ForIn { var, iterable, body } => {
                let source = step!(self.eval(iterable));
                let items = Self::iteration_items(&source, line)?;

                for item in items {
                    self.scope.open_frame();
                    self.scope.declare(var, item, false);
                    let outcome = self.eval(body);
                    self.scope.close_frame();

                    match outcome? {
                        StepOutcome::Normal(_) | StepOutcome::Continue { .. } => {},
                        StepOutcome::Break { value, .. } => {
                            return Ok(StepOutcome::Normal(value));
                        },
                    }
                }

                Ok(StepOutcome::Normal(Value::Null))
            },
        }
    }

    /// Materializes the items a for-in loop walks over.
    ///
    /// Aggregates are snapshot at loop entry, so element writes during
    /// iteration do not change the walk.
    fn iteration_items(source: &Value, line: usize) -> EvalResult<Vec<Value>> {
        match source {
            Value::Ran(range) => {
                if !range.is_finite() {
                    return Err(RuntimeError::NotIterable { type_name: source.type_tag(),
                                                           line });
                }
                Ok(range.iter().map(Value::Num).collect())
            },
            Value::Str(s) => Ok(s.chars().map(|c| Value::Str(c.to_string())).collect()),
            Value::Arr(cells) | Value::Vec(cells) => Ok(cells.borrow().clone()),
            _ => Err(RuntimeError::NotIterable { type_name: source.type_tag(),
                                                 line }),
        }
    }
}
