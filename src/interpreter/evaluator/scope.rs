use std::collections::HashMap;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// A variable binding: its current value and whether it was declared
/// `const`.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The bound value.
    pub value:    Value,
    /// Set for `const` declarations; constant bindings reject rebinding and
    /// compound assignment, but not element writes into their aggregate.
    pub constant: bool,
}

/// The scope store: one flat mapping from name to binding.
///
/// The language has no lexical nesting. Blocks and loop iterations open a
/// frame recording the names they introduce; closing the frame removes
/// exactly those names, while writes to pre-existing names persist.
#[derive(Debug, Default)]
pub struct ScopeStore {
    bindings: HashMap<String, Binding>,
    frames:   Vec<Vec<String>>,
}

impl ScopeStore {
    /// Creates an empty store with no open frames.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a binding by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// Looks up a binding's value by name.
    #[must_use]
    pub fn get_value(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name).map(|b| &b.value)
    }

    /// Creates or overwrites a binding without a constant check, recording
    /// fresh names in the innermost open frame.
    pub fn declare(&mut self, name: &str, value: Value, constant: bool) {
        if !self.bindings.contains_key(name)
           && let Some(frame) = self.frames.last_mut()
        {
            frame.push(name.to_string());
        }

        self.bindings
            .insert(name.to_string(), Binding { value, constant });
    }

    /// Writes a value to a name: rebinding an existing mutable binding or
    /// creating a fresh one.
    ///
    /// # Errors
    /// `ModifiedConstant` when the existing binding is `const`.
    pub fn assign(&mut self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        match self.bindings.get_mut(name) {
            Some(binding) if binding.constant => {
                Err(RuntimeError::ModifiedConstant { name: name.to_string(),
                                                     line })
            },
            Some(binding) => {
                binding.value = value;
                Ok(())
            },
            None => {
                self.declare(name, value, false);
                Ok(())
            },
        }
    }

    /// Removes a binding. Returns `true` when it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.bindings.remove(name).is_some()
    }

    /// Opens a frame: names declared from here on are removed again by the
    /// matching [`close_frame`].
    ///
    /// [`close_frame`]: ScopeStore::close_frame
    pub fn open_frame(&mut self) {
        self.frames.push(Vec::new());
    }

    /// Closes the innermost frame, dropping every binding it introduced.
    pub fn close_frame(&mut self) {
        if let Some(introduced) = self.frames.pop() {
            for name in introduced {
                self.bindings.remove(&name);
            }
        }
    }
}
