// File: src/interpreter/environment.rs
//
// Global variable namespace for the Vinyl interpreter.
// Vinyl has exactly one flat scope; assignment overwrites.

use super::value::Value;
use std::collections::HashMap;

/// Variable storage for one program run
///
/// The Environment is a plain name-to-value map. It is owned by whoever
/// drives the run and passed by `&mut` into every evaluation call, so two
/// runs never share state.
///
/// # Examples
///
/// ```
/// use vinyl::interpreter::{Environment, Value};
///
/// let mut env = Environment::new();
/// env.set("x", Value::Int(10));
/// env.set("x", Value::Str("ten".into()));   // declarations are not immutable
/// assert_eq!(env.get("x"), Some(&Value::Str("ten".into())));
/// assert_eq!(env.get("y"), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Environment {
    vars: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Environment { vars: HashMap::new() }
    }

    /// Looks up a variable; `None` means it was never assigned
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Stores a value, replacing any previous one under the same name
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// All bindings ordered by name
    pub fn sorted_entries(&self) -> Vec<(&str, &Value)> {
        let mut entries: Vec<(&str, &Value)> =
            self.vars.iter().map(|(k, v)| (k.as_str(), v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
