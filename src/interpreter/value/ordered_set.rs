use std::{collections::HashMap, rc::Rc};

use num_bigint::BigInt;
use ordered_float::OrderedFloat;

use crate::interpreter::value::core::Value;

/// A hashable key derived from a [`Value`] for set membership.
///
/// Scalars key by their contents (`OrderedFloat` makes numbers hashable);
/// aggregates key by the address of their shared allocation, matching the
/// language's reference equality on aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SetKey {
    /// A floating-point number, including infinities.
    Num(OrderedFloat<f64>),
    /// A big integer.
    Big(BigInt),
    /// A boolean.
    Bool(bool),
    /// A string, keyed by contents.
    Str(String),
    /// The unit value.
    Null,
    /// A range, keyed by bounds and openness.
    Range {
        /// Start bound.
        start:  OrderedFloat<f64>,
        /// End bound.
        end:    OrderedFloat<f64>,
        /// Whether the end bound is included.
        closed: bool,
    },
    /// An aggregate, keyed by allocation identity.
    Ref(usize),
}

impl From<&Value> for SetKey {
    fn from(v: &Value) -> Self {
        match v {
            Value::Num(n) => Self::Num(OrderedFloat(*n)),
            Value::Xl(b) => Self::Big(b.clone()),
            Value::Bool(b) => Self::Bool(*b),
            Value::Str(s) => Self::Str(s.clone()),
            Value::Null => Self::Null,
            Value::Ran(r) => Self::Range { start:  OrderedFloat(r.start),
                                           end:    OrderedFloat(r.end),
                                           closed: r.closed, },
            Value::Arr(cells) | Value::Vec(cells) => Self::Ref(Rc::as_ptr(cells) as usize),
            Value::Set(entries) => Self::Ref(Rc::as_ptr(entries) as usize),
        }
    }
}

/// A set that iterates in insertion order and remembers its most recent
/// insertion.
///
/// Re-inserting an element that is already present moves it to the end, so
/// the last element is always the survivor of the latest add. Removal keeps
/// the relative order of the remaining elements.
#[derive(Debug, Clone, Default)]
pub struct OrderedSet {
    entries: Vec<Value>,
    index:   HashMap<SetKey, usize>,
}

impl OrderedSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the set holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a value, moving it to the end when already present.
    /// Returns `true` when the value was not present before.
    ///
    /// # Example
    /// ```
    /// use luz::interpreter::value::{core::Value, ordered_set::OrderedSet};
    ///
    /// let mut set = OrderedSet::new();
    /// set.insert(Value::Num(1.0));
    /// set.insert(Value::Num(2.0));
    /// assert!(!set.insert(Value::Num(1.0)));
    ///
    /// assert_eq!(set.last(), Some(&Value::Num(1.0)));
    /// ```
    pub fn insert(&mut self, value: Value) -> bool {
        let key = SetKey::from(&value);
        let fresh = if let Some(&position) = self.index.get(&key) {
            self.entries.remove(position);
            self.reindex(position);
            false
        } else {
            true
        };

        self.index.insert(key, self.entries.len());
        self.entries.push(value);
        fresh
    }

    /// Removes a value. Returns `true` when it was present.
    pub fn remove(&mut self, value: &Value) -> bool {
        let key = SetKey::from(value);
        match self.index.remove(&key) {
            Some(position) => {
                self.entries.remove(position);
                self.reindex(position);
                true
            },
            None => false,
        }
    }

    /// Tests membership.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.index.contains_key(&SetKey::from(value))
    }

    /// The earliest surviving insertion.
    #[must_use]
    pub fn first(&self) -> Option<&Value> {
        self.entries.first()
    }

    /// The latest surviving insertion.
    #[must_use]
    pub fn last(&self) -> Option<&Value> {
        self.entries.last()
    }

    /// Iterates elements in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.entries.iter()
    }

    fn reindex(&mut self, from: usize) {
        for (position, value) in self.entries.iter().enumerate().skip(from) {
            self.index.insert(SetKey::from(value), position);
        }
    }
}

impl<'a> IntoIterator for &'a OrderedSet {
    type IntoIter = std::slice::Iter<'a, Value>;
    type Item = &'a Value;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
