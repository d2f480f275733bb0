use num_bigint::BigInt;
use num_traits::FromPrimitive;
use rand::Rng;

use crate::{
    ast::{CastTarget, Expr, TypeName},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, StepOutcome, step},
        value::{core::Value, core::big_to_f64, ordered_set::OrderedSet, range::RangeValue},
    },
};

impl Context<'_> {
    /// Evaluates an `as` cast expression.
    ///
    /// With `as typeof other`, the other expression is evaluated first
    /// (side effects included) and its type tag becomes the target.
    pub fn eval_cast_expr(&mut self,
                          expr: &Expr,
                          target: &CastTarget,
                          line: usize)
                          -> EvalResult<StepOutcome> {
        let value = step!(self.eval(expr));
        let target = match target {
            CastTarget::Named(name) => *name,
            CastTarget::Typeof(other) => step!(self.eval(other)).type_name(),
        };
        Ok(StepOutcome::Normal(self.cast_value(value, target, line)?))
    }

    /// Converts a value to the given target type.
    ///
    /// The conversion matrix follows the data model: numeric kinds convert
    /// among themselves and from strings, everything casts to `str` via
    /// plain formatting (ranges join their elements with spaces), ranges
    /// materialise into the three aggregates, the aggregates convert among
    /// themselves, and `ran`/`xran` adjust their endpoint by one step when
    /// switching form. `as maybe` draws a random element from anything
    /// ordered and a random boolean from scalars. `as null` always yields
    /// `null`; `inf` is not a valid target.
    ///
    /// # Errors
    /// `InvalidCast` for every pair outside the matrix.
    pub fn cast_value(&mut self, value: Value, target: TypeName, line: usize) -> EvalResult<Value> {
        let invalid = |value: &Value| RuntimeError::InvalidCast { from: value.type_tag(),
                                                                  to:   target.as_tag()
                                                                               .to_string(),
                                                                  line };

        match target {
            TypeName::Maybe => Ok(self.random_draw(&value)),
            TypeName::Null => Ok(Value::Null),
            TypeName::Inf => Err(invalid(&value)),

            TypeName::Bool => Ok(Value::Bool(value.is_truthy())),

            TypeName::Num => match &value {
                Value::Num(_) => Ok(value),
                Value::Xl(b) => Ok(Value::Num(big_to_f64(b))),
                Value::Bool(b) => Ok(Value::Num(f64::from(*b))),
                Value::Str(s) => {
                    s.trim()
                     .parse::<f64>()
                     .map(Value::from_num)
                     .map_err(|_| invalid(&value))
                },
                _ => Err(invalid(&value)),
            },

            TypeName::Xl => match &value {
                Value::Xl(_) => Ok(value),
                Value::Num(n) => {
                    BigInt::from_f64(n.trunc()).map(Value::Xl)
                                               .ok_or_else(|| invalid(&value))
                },
                Value::Bool(b) => Ok(Value::Xl(BigInt::from(i32::from(*b)))),
                Value::Str(s) => {
                    s.trim()
                     .parse::<BigInt>()
                     .map(Value::Xl)
                     .map_err(|_| invalid(&value))
                },
                _ => Err(invalid(&value)),
            },

            TypeName::Str => match &value {
                Value::Ran(range) => {
                    let elements = Self::materialize(range, &value, line)?;
                    let joined = elements.iter()
                                         .map(Value::format_plain)
                                         .collect::<Vec<_>>()
                                         .join(" ");
                    Ok(Value::Str(joined))
                },
                _ => Ok(Value::Str(value.format_plain())),
            },

            TypeName::Arr => match &value {
                Value::Arr(_) => Ok(value),
                Value::Vec(cells) => Ok(Value::array(cells.borrow().clone())),
                Value::Set(entries) => {
                    Ok(Value::array(entries.borrow().iter().cloned().collect()))
                },
                Value::Ran(range) => Ok(Value::array(Self::materialize(range, &value, line)?)),
                _ => Err(invalid(&value)),
            },

            TypeName::Vec => match &value {
                Value::Vec(_) => Ok(value),
                Value::Arr(cells) => Ok(Value::vector(cells.borrow().clone())),
                Value::Set(entries) => {
                    Ok(Value::vector(entries.borrow().iter().cloned().collect()))
                },
                Value::Ran(range) => Ok(Value::vector(Self::materialize(range, &value, line)?)),
                _ => Err(invalid(&value)),
            },

            TypeName::Set => match &value {
                Value::Set(_) => Ok(value),
                Value::Arr(cells) | Value::Vec(cells) => {
                    let mut entries = OrderedSet::new();
                    for element in cells.borrow().iter() {
                        entries.insert(element.clone());
                    }
                    Ok(Value::set(entries))
                },
                Value::Ran(range) => {
                    let mut entries = OrderedSet::new();
                    for element in Self::materialize(range, &value, line)? {
                        entries.insert(element);
                    }
                    Ok(Value::set(entries))
                },
                _ => Err(invalid(&value)),
            },

            TypeName::Ran => match &value {
                Value::Ran(range) => Ok(Value::Ran(range.to_half_open())),
                _ => Err(invalid(&value)),
            },

            TypeName::Xran => match &value {
                Value::Ran(range) => Ok(Value::Ran(range.to_closed())),
                _ => Err(invalid(&value)),
            },
        }
    }

    /// Draws the `as maybe` result: a uniformly random element from
    /// anything ordered, a uniformly random boolean from scalars. Empty
    /// sources draw `null`.
    fn random_draw(&mut self, value: &Value) -> Value {
        match value {
            Value::Ran(range) if range.is_finite() => {
                let count = range.iter().count();
                if count == 0 {
                    return Value::Null;
                }
                let pick = self.rng.gen_range(0..count);
                range.iter().nth(pick).map_or(Value::Null, Value::Num)
            },
            Value::Str(s) => {
                let chars: Vec<char> = s.chars().collect();
                if chars.is_empty() {
                    return Value::Null;
                }
                let pick = self.rng.gen_range(0..chars.len());
                Value::Str(chars[pick].to_string())
            },
            Value::Arr(cells) | Value::Vec(cells) => {
                let cells = cells.borrow();
                if cells.is_empty() {
                    return Value::Null;
                }
                let pick = self.rng.gen_range(0..cells.len());
                cells[pick].clone()
            },
            Value::Set(entries) => {
                let entries = entries.borrow();
                if entries.is_empty() {
                    return Value::Null;
                }
                let pick = self.rng.gen_range(0..entries.len());
                entries.iter().nth(pick).cloned().unwrap_or(Value::Null)
            },
            _ => Value::Bool(self.rng.gen_bool(0.5)),
        }
    }

    /// Materialises a finite range into its element values.
    fn materialize(range: &RangeValue, value: &Value, line: usize) -> EvalResult<Vec<Value>> {
        if !range.is_finite() {
            return Err(RuntimeError::InvalidCast { from: value.type_tag(),
                                                   to:   "a finite sequence".to_string(),
                                                   line });
        }
        Ok(range.iter().map(Value::Num).collect())
    }
}
