use std::collections::VecDeque;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    ast::{Expr, LiteralValue, Statement},
    error::RuntimeError,
    host::Host,
    interpreter::{evaluator::scope::ScopeStore, value::core::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// What one evaluation step produced.
///
/// `break` and `continue` do not unwind through errors: they travel as
/// outcomes up the call stack until a loop boundary inspects them. Any
/// outcome other than `Normal` that reaches the top-level statement driver
/// is a semantic error.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Ordinary evaluation, producing a value.
    Normal(Value),
    /// A `break` travelling towards the innermost loop.
    Break {
        /// The loop result carried by `break`, `null` when omitted.
        value: Value,
        /// The line of the `break`, for reporting an escape.
        line:  usize,
    },
    /// A `continue` travelling towards the innermost loop.
    Continue {
        /// The line of the `continue`, for reporting an escape.
        line: usize,
    },
}

/// Unwraps a `Normal` evaluation outcome into its value, forwarding
/// `Break` and `Continue` to the caller.
macro_rules! step {
    ($outcome:expr) => {
        match $outcome? {
            $crate::interpreter::evaluator::core::StepOutcome::Normal(value) => value,
            other => return Ok(other),
        }
    };
}
pub(crate) use step;

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the scope store, the injected
/// host collaborators, the random source behind `maybe`, and the pending
/// token queue used by `get`.
///
/// ## Usage
///
/// A `Context` is created once per program run and drives all statement and
/// expression evaluation. The random source can be seeded so that programs
/// using `maybe` stay reproducible under test.
pub struct Context<'h> {
    /// The flat scope store with its frame stack.
    pub scope:               ScopeStore,
    pub(crate) host:         &'h mut dyn Host,
    pub(crate) rng:          StdRng,
    pub(crate) input_tokens: VecDeque<String>,
}

impl<'h> Context<'h> {
    /// Creates a context over the given host with an entropy-seeded random
    /// source.
    pub fn new(host: &'h mut dyn Host) -> Self {
        Self { scope:        ScopeStore::new(),
               host,
               rng:          StdRng::from_entropy(),
               input_tokens: VecDeque::new(), }
    }

    /// Creates a context whose `maybe` draws are reproducible.
    pub fn with_seed(host: &'h mut dyn Host, seed: u64) -> Self {
        Self { scope:        ScopeStore::new(),
               host,
               rng:          StdRng::seed_from_u64(seed),
               input_tokens: VecDeque::new(), }
    }

    /// Evaluates an expression.
    ///
    /// This is the main entry point for expression evaluation. The
    /// evaluator dispatches on the expression variant; every path returns a
    /// [`StepOutcome`] so that `break` and `continue` can cross expression
    /// boundaries on their way to the innermost loop.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The outcome of the step, `Normal` in the common case.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<StepOutcome> {
        match expr {
            Expr::Literal { value, line } => self.eval_literal(value, *line),
            Expr::Variable { name, line } => self.eval_variable(name, *line),
            Expr::Unary { op, expr, line } => {
                let value = step!(self.eval(expr));
                Ok(StepOutcome::Normal(Self::eval_unary(*op, &value, *line)?))
            },
            Expr::Binary { left, op, right, line } => {
                self.eval_binary_expr(left, *op, right, *line)
            },
            Expr::Range { start, end, closed, line } => {
                self.eval_range(start, end, *closed, *line)
            },
            Expr::Cast { expr, target, line } => self.eval_cast_expr(expr, target, *line),
            Expr::Assign { target, op, value, line } => {
                self.eval_assign(target, *op, value, *line)
            },
            Expr::Swap { left, right, line } => self.eval_swap(left, right, *line),
            Expr::Update { target,
                           increment,
                           prefix,
                           line, } => self.eval_update(target, *increment, *prefix, *line),
            Expr::Index { target, index, line } => self.eval_index_expr(target, index, *line),
            Expr::ArrayLiteral { elements, count, line } => {
                self.eval_sequence_literal(elements, count.as_deref(), false, *line)
            },
            Expr::VectorLiteral { elements, count, line } => {
                self.eval_sequence_literal(elements, count.as_deref(), true, *line)
            },
            Expr::SetLiteral { elements, .. } => self.eval_set_literal(elements),
            Expr::If { branches, else_block, .. } => self.eval_if(branches, else_block.as_deref()),
            Expr::Loop { kind, line } => self.eval_loop(kind, *line),
            Expr::Block { statements, .. } => self.eval_block(statements),
            Expr::Break { value, line } => {
                let value = match value {
                    Some(value_expr) => step!(self.eval(value_expr)),
                    None => Value::Null,
                };
                Ok(StepOutcome::Break { value, line: *line })
            },
            Expr::Continue { line } => Ok(StepOutcome::Continue { line: *line }),
            Expr::Intrinsic { op, expr, line } => {
                self.eval_intrinsic(*op, expr.as_deref(), *line)
            },
            Expr::Del { target, line } => self.eval_del(target, *line),
        }
    }

    /// Evaluates a single statement.
    ///
    /// Expression statements produce the expression's outcome. Constant
    /// declarations bind their value immutably and yield it.
    ///
    /// # Parameters
    /// - `statement`: Statement to evaluate.
    ///
    /// # Returns
    /// The outcome of the statement.
    pub fn eval_statement(&mut self, statement: &Statement) -> EvalResult<StepOutcome> {
        match statement {
            Statement::Expression { expr, .. } => self.eval(expr),
            Statement::ConstDeclaration { name, value, line } => {
                let value = step!(self.eval(value));

                if let Some(existing) = self.scope.get(name)
                   && existing.constant
                {
                    return Err(RuntimeError::ModifiedConstant { name: name.clone(),
                                                                line: *line, });
                }
                self.scope.declare(name, value.clone(), true);
                Ok(StepOutcome::Normal(value))
            },
        }
    }

    /// Evaluates a literal expression.
    ///
    /// Scalars convert directly. String literals go through interpolation
    /// expansion; `maybe` draws a fresh boolean from the random source.
    pub fn eval_literal(&mut self, value: &LiteralValue, line: usize) -> EvalResult<StepOutcome> {
        match value {
            LiteralValue::Num(n) => Ok(StepOutcome::Normal(Value::Num(*n))),
            LiteralValue::BigInt(b) => Ok(StepOutcome::Normal(Value::Xl(b.clone()))),
            LiteralValue::Bool(b) => Ok(StepOutcome::Normal(Value::Bool(*b))),
            LiteralValue::Null => Ok(StepOutcome::Normal(Value::Null)),
            LiteralValue::Maybe => Ok(StepOutcome::Normal(Value::Bool(self.rng.gen_bool(0.5)))),
            LiteralValue::Str(raw) => self.eval_string_literal(raw, line),
        }
    }

    /// Looks up a variable by name.
    ///
    /// # Errors
    /// `UnknownVariable` when the name has no binding.
    pub fn eval_variable(&mut self, name: &str, line: usize) -> EvalResult<StepOutcome> {
        match self.scope.get_value(name) {
            Some(value) => Ok(StepOutcome::Normal(value.clone())),
            None => Err(RuntimeError::UnknownVariable { name: name.to_string(),
                                                        line }),
        }
    }

    /// Evaluates a range expression. Both bounds must be numeric.
    fn eval_range(&mut self,
                  start: &Expr,
                  end: &Expr,
                  closed: bool,
                  line: usize)
                  -> EvalResult<StepOutcome> {
        use crate::interpreter::value::range::RangeValue;

        let start_value = step!(self.eval(start));
        let end_value = step!(self.eval(end));

        let start_num = start_value.as_num(line)?;
        let end_num = end_value.as_num(line)?;

        Ok(StepOutcome::Normal(Value::Ran(RangeValue::new(start_num, end_num, closed))))
    }

    /// Evaluates an array or vector literal, including the
    /// length-replication form `[element_block; count]` where the element
    /// block is re-evaluated once per slot.
    fn eval_sequence_literal(&mut self,
                             elements: &[Expr],
                             count: Option<&Expr>,
                             growable: bool,
                             line: usize)
                             -> EvalResult<StepOutcome> {
        let values = match count {
            None => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(step!(self.eval(element)));
                }
                values
            },
            Some(count_expr) => {
                let count_value = step!(self.eval(count_expr));
                let count_num = count_value.as_num(line)?;
                let count = crate::util::num::f64_to_i64_checked(count_num, line)?;
                if count < 0 {
                    return Err(RuntimeError::LiteralTooSmall { line });
                }

                let mut values = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    let mut slot = Value::Null;
                    for element in elements {
                        slot = step!(self.eval(element));
                    }
                    values.push(slot);
                }
                values
            },
        };

        Ok(StepOutcome::Normal(if growable {
                                   Value::vector(values)
                               } else {
                                   Value::array(values)
                               }))
    }

    /// Evaluates a set literal, inserting elements in source order.
    fn eval_set_literal(&mut self, elements: &[Expr]) -> EvalResult<StepOutcome> {
        use crate::interpreter::value::ordered_set::OrderedSet;

        let mut entries = OrderedSet::new();
        for element in elements {
            let value = step!(self.eval(element));
            entries.insert(value);
        }
        Ok(StepOutcome::Normal(Value::set(entries)))
    }
}
