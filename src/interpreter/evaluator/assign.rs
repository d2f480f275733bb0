use crate::{
    ast::{AssignTarget, BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, StepOutcome, step},
        value::core::Value,
    },
    util::num::f64_to_i64_checked,
};

impl Context<'_> {
    /// Evaluates an assignment or compound assignment.
    ///
    /// Plain assignment to a fresh name creates a binding; to an existing
    /// one it rebinds (rejecting constants). Compound assignment requires
    /// an existing binding, and on vectors and sets `+=`/`-=` mutate the
    /// shared container in place so every alias observes the change.
    ///
    /// Element assignment (`v[0] = x`) writes through the place's index
    /// path; the binding's constant flag does not protect the aggregate's
    /// elements.
    ///
    /// The assignment's value is the value written.
    pub fn eval_assign(&mut self,
                       target: &AssignTarget,
                       op: Option<BinaryOperator>,
                       value_expr: &Expr,
                       line: usize)
                       -> EvalResult<StepOutcome> {
        let rhs = step!(self.eval(value_expr));

        if target.path.is_empty() {
            let result = match op {
                None => rhs,
                Some(op) => {
                    let binding =
                        self.scope
                            .get(&target.name)
                            .ok_or_else(|| RuntimeError::UnknownVariable { name:
                                                                               target.name
                                                                                     .clone(),
                                                                           line })?;
                    if binding.constant {
                        return Err(RuntimeError::ModifiedConstant { name: target.name.clone(),
                                                                    line });
                    }

                    let current = binding.value.clone();
                    Self::combine(op, &current, rhs, line)?
                },
            };

            self.scope.assign(&target.name, result.clone(), line)?;
            return Ok(StepOutcome::Normal(result));
        }

        let indices = match self.eval_path(&target.path)? {
            Ok(indices) => indices,
            Err(outcome) => return Ok(outcome),
        };
        let container = self.walk_to_container(target, &indices, line)?;
        let last = &indices[indices.len() - 1];

        let result = match op {
            None => rhs,
            Some(op) => {
                let current = Self::read_element(&container, last, line)?;
                Self::combine(op, &current, rhs, line)?
            },
        };

        Self::write_element(&container, last, result.clone(), line)?;
        Ok(StepOutcome::Normal(result))
    }

    /// Evaluates a swap `a <=> b`.
    ///
    /// Both places are read, then exchanged. When the two cells already
    /// hold strictly equal values the swap is a no-op and yields `false`;
    /// otherwise it yields `true`.
    pub fn eval_swap(&mut self,
                     left: &AssignTarget,
                     right: &AssignTarget,
                     line: usize)
                     -> EvalResult<StepOutcome> {
        let left_indices = match self.eval_path(&left.path)? {
            Ok(indices) => indices,
            Err(outcome) => return Ok(outcome),
        };
        let right_indices = match self.eval_path(&right.path)? {
            Ok(indices) => indices,
            Err(outcome) => return Ok(outcome),
        };

        let left_value = self.read_place(left, &left_indices, line)?;
        let right_value = self.read_place(right, &right_indices, line)?;

        if left_value == right_value {
            return Ok(StepOutcome::Normal(Value::Bool(false)));
        }

        self.write_place(left, &left_indices, right_value, line)?;
        self.write_place(right, &right_indices, left_value, line)?;
        Ok(StepOutcome::Normal(Value::Bool(true)))
    }

    /// Evaluates a prefix or postfix `++`/`--` on a numeric place.
    ///
    /// Prefix yields the stepped value, postfix the original.
    pub fn eval_update(&mut self,
                       target: &AssignTarget,
                       increment: bool,
                       prefix: bool,
                       line: usize)
                       -> EvalResult<StepOutcome> {
        let indices = match self.eval_path(&target.path)? {
            Ok(indices) => indices,
            Err(outcome) => return Ok(outcome),
        };

        let old = self.read_place(target, &indices, line)?;
        let new = match &old {
            Value::Num(n) => Value::Num(if increment { n + 1.0 } else { n - 1.0 }),
            Value::Xl(b) => {
                let one = num_bigint::BigInt::from(1);
                Value::Xl(if increment { b + one } else { b - one })
            },
            _ => return Err(RuntimeError::ExpectedNumber { line }),
        };

        self.write_place(target, &indices, new.clone(), line)?;
        Ok(StepOutcome::Normal(if prefix { new } else { old }))
    }

    /// Evaluates `del`.
    ///
    /// Without an index path the binding itself is removed (constants are
    /// protected). With a path, the final step removes an element: vectors
    /// splice by position, sets remove by value, arrays refuse.
    pub fn eval_del(&mut self, target: &AssignTarget, line: usize) -> EvalResult<StepOutcome> {
        if target.path.is_empty() {
            match self.scope.get(&target.name) {
                Some(binding) if binding.constant => {
                    return Err(RuntimeError::ModifiedConstant { name: target.name.clone(),
                                                                line });
                },
                Some(_) => {
                    self.scope.remove(&target.name);
                    return Ok(StepOutcome::Normal(Value::Null));
                },
                None => {
                    return Err(RuntimeError::UnknownVariable { name: target.name.clone(),
                                                               line });
                },
            }
        }

        let indices = match self.eval_path(&target.path)? {
            Ok(indices) => indices,
            Err(outcome) => return Ok(outcome),
        };
        let container = self.walk_to_container(target, &indices, line)?;
        let last = &indices[indices.len() - 1];

        match &container {
            Value::Arr(_) => Err(RuntimeError::FixedSizeArray { line }),
            Value::Vec(cells) => {
                let position = f64_to_i64_checked(last.as_num(line)?, line)?;
                let mut cells = cells.borrow_mut();
                if position < 0 || position as usize >= cells.len() {
                    return Err(RuntimeError::IndexOutOfBounds { len:   cells.len(),
                                                                found: position,
                                                                line });
                }
                cells.remove(position as usize);
                Ok(StepOutcome::Normal(Value::Null))
            },
            Value::Set(entries) => {
                entries.borrow_mut().remove(last);
                Ok(StepOutcome::Normal(Value::Null))
            },
            other => {
                Err(RuntimeError::UnsupportedOperand { details: format!("Cannot use 'del' on '{}'",
                                                                        other.type_tag()),
                                                       line })
            },
        }
    }

    /// Evaluates an element read expression.
    pub fn eval_index_expr(&mut self,
                           target: &Expr,
                           index: &Expr,
                           line: usize)
                           -> EvalResult<StepOutcome> {
        let container = step!(self.eval(target));
        let index_value = step!(self.eval(index));
        Ok(StepOutcome::Normal(Self::read_element(&container, &index_value, line)?))
    }

    /// Evaluates every index expression of a place exactly once.
    ///
    /// A `break`/`continue` surfacing from an index expression is returned
    /// through the `Err` side so the caller can forward it untouched.
    #[allow(clippy::type_complexity)]
    fn eval_path(&mut self, path: &[Expr]) -> EvalResult<Result<Vec<Value>, StepOutcome>> {
        let mut indices = Vec::with_capacity(path.len());
        for index_expr in path {
            match self.eval(index_expr)? {
                StepOutcome::Normal(value) => indices.push(value),
                other => return Ok(Err(other)),
            }
        }
        Ok(Ok(indices))
    }

    /// Resolves the container a place's final index applies to by reading
    /// through all earlier index steps.
    fn walk_to_container(&self,
                         target: &AssignTarget,
                         indices: &[Value],
                         line: usize)
                         -> EvalResult<Value> {
        let mut current =
            self.scope
                .get_value(&target.name)
                .ok_or_else(|| RuntimeError::UnknownVariable { name: target.name.clone(),
                                                               line })?
                .clone();

        for index in &indices[..indices.len() - 1] {
            current = Self::read_element(&current, index, line)?;
        }
        Ok(current)
    }

    /// Reads a place's current value.
    fn read_place(&self,
                  target: &AssignTarget,
                  indices: &[Value],
                  line: usize)
                  -> EvalResult<Value> {
        let root = self.scope
                       .get_value(&target.name)
                       .ok_or_else(|| RuntimeError::UnknownVariable { name:
                                                                          target.name.clone(),
                                                                      line })?
                       .clone();

        let mut current = root;
        for index in indices {
            current = Self::read_element(&current, index, line)?;
        }
        Ok(current)
    }

    /// Writes a value into a place.
    fn write_place(&mut self,
                   target: &AssignTarget,
                   indices: &[Value],
                   value: Value,
                   line: usize)
                   -> EvalResult<()> {
        if indices.is_empty() {
            return self.scope.assign(&target.name, value, line);
        }

        let container = self.walk_to_container(target, indices, line)?;
        Self::write_element(&container, &indices[indices.len() - 1], value, line)
    }

    /// Applies a compound-assignment operator.
    ///
    /// On vectors and sets, `+=`/`-=` mutate the shared container in
    /// place; everything else falls back to the ordinary binary operator.
    pub(crate) fn combine(op: BinaryOperator,
                          current: &Value,
                          rhs: Value,
                          line: usize)
                          -> EvalResult<Value> {
        use BinaryOperator::{Add, Sub};

        match (op, current) {
            (Add | Sub, Value::Arr(_)) => Err(RuntimeError::FixedSizeArray { line }),
            (Add, Value::Vec(cells)) => {
                cells.borrow_mut().push(rhs);
                Ok(current.clone())
            },
            (Sub, Value::Vec(cells)) => {
                let mut cells = cells.borrow_mut();
                if let Some(position) = cells.iter().rposition(|e| e.loose_eq(&rhs)) {
                    cells.remove(position);
                }
                Ok(current.clone())
            },
            (Add, Value::Set(entries)) => {
                entries.borrow_mut().insert(rhs);
                Ok(current.clone())
            },
            (Sub, Value::Set(entries)) => {
                entries.borrow_mut().remove(&rhs);
                Ok(current.clone())
            },
            _ => Self::eval_binary(op, current, &rhs, line),
        }
    }

    /// Reads one element from a container.
    ///
    /// Out-of-bounds and negative positions read as `null`. Range indices
    /// slice, producing a container of the same kind (or a substring), with
    /// out-of-bounds positions skipped.
    pub(crate) fn read_element(container: &Value, index: &Value, line: usize) -> EvalResult<Value> {
        match container {
            Value::Arr(cells) | Value::Vec(cells) => match index {
                Value::Ran(range) => {
                    let cells = cells.borrow();
                    let picked = slice_positions(range, cells.len(), line)?
                        .into_iter()
                        .map(|i| cells[i].clone())
                        .collect();
                    Ok(if matches!(container, Value::Arr(_)) {
                           Value::array(picked)
                       } else {
                           Value::vector(picked)
                       })
                },
                _ if index.is_numeric() => {
                    let position = f64_to_i64_checked(index.as_num(line)?, line)?;
                    let cells = cells.borrow();
                    if position < 0 || position as usize >= cells.len() {
                        Ok(Value::Null)
                    } else {
                        Ok(cells[position as usize].clone())
                    }
                },
                _ => Err(RuntimeError::TypeError { details: format!("Cannot index with '{}'",
                                                                    index.type_tag()),
                                                   line }),
            },

            Value::Str(s) => match index {
                Value::Ran(range) => {
                    let chars: Vec<char> = s.chars().collect();
                    let picked = slice_positions(range, chars.len(), line)?
                        .into_iter()
                        .map(|i| chars[i])
                        .collect::<String>();
                    Ok(Value::Str(picked))
                },
                _ if index.is_numeric() => {
                    let position = f64_to_i64_checked(index.as_num(line)?, line)?;
                    if position < 0 {
                        return Ok(Value::Null);
                    }
                    match s.chars().nth(position as usize) {
                        Some(c) => Ok(Value::Str(c.to_string())),
                        None => Ok(Value::Null),
                    }
                },
                _ => Err(RuntimeError::TypeError { details: format!("Cannot index with '{}'",
                                                                    index.type_tag()),
                                                   line }),
            },

            Value::Set(_) => {
                Err(RuntimeError::UnsupportedOperand { details:
                                                           "Sets are not indexable".to_string(),
                                                       line })
            },

            other => Err(RuntimeError::TypeError { details: format!("Cannot index into '{}'",
                                                                    other.type_tag()),
                                                   line }),
        }
    }

    /// Writes one element into a container.
    ///
    /// Writes outside the current bounds fail, including negative
    /// positions; growing a container is only possible through the vector
    /// operators.
    pub(crate) fn write_element(container: &Value,
                                index: &Value,
                                value: Value,
                                line: usize)
                                -> EvalResult<()> {
        match container {
            Value::Arr(cells) | Value::Vec(cells) => {
                let position = f64_to_i64_checked(index.as_num(line)?, line)?;
                let mut cells = cells.borrow_mut();
                if position < 0 || position as usize >= cells.len() {
                    return Err(RuntimeError::IndexOutOfBounds { len:   cells.len(),
                                                                found: position,
                                                                line });
                }
                cells[position as usize] = value;
                Ok(())
            },
            Value::Str(_) => {
                Err(RuntimeError::UnsupportedOperand { details:
                                                           "Strings are immutable".to_string(),
                                                       line })
            },
            Value::Set(_) => {
                Err(RuntimeError::UnsupportedOperand { details:
                                                           "Sets are not indexable".to_string(),
                                                       line })
            },
            other => {
                Err(RuntimeError::TypeError { details: format!("Cannot write into '{}'",
                                                               other.type_tag()),
                                              line })
            },
        }
    }
}

/// Collects the in-bounds integral positions a range index selects.
fn slice_positions(range: &crate::interpreter::value::range::RangeValue,
                   len: usize,
                   line: usize)
                   -> EvalResult<Vec<usize>> {
    if !range.is_finite() {
        return Err(RuntimeError::TypeError { details: "Cannot slice with an unbounded range"
                                                      .to_string(),
                                             line });
    }

    let mut positions = Vec::new();
    for raw in range.iter() {
        if raw.fract() != 0.0 || raw < 0.0 {
            continue;
        }
        let position = raw as usize;
        if position < len {
            positions.push(position);
        }
    }
    Ok(positions)
}
