//! Binding accumulator and bound arguments

use crate::options::{OptionKind, OptionSet};
use crate::signature::Value;

/// Where a slot's current value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Required option with nothing bound yet
    Unset,
    /// Declared default
    Default,
    /// Explicit flag
    Explicit,
    /// Bare positional token
    Positional,
}

/// Current state of one option during binding
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub name: String,
    pub value: Option<Value>,
    pub source: Source,
}

/// Mutable accumulator built while tokens are consumed
///
/// Holds one slot per option in declared order. A failed binding is kept
/// so the current options can be shown next to the error.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Binding {
    slots: Vec<Slot>,
}

impl Binding {
    /// Start from the defaults of an option set
    pub fn new(options: &OptionSet) -> Self {
        let slots = options
            .iter()
            .map(|option| {
                let value = option.initial_value();
                let source = if value.is_some() {
                    Source::Default
                } else {
                    Source::Unset
                };
                Slot {
                    name: option.name.clone(),
                    value,
                    source,
                }
            })
            .collect();

        Binding { slots }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Current value of an option, if resolved
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.slots
            .iter()
            .find(|s| s.name == name)
            .and_then(|s| s.value.as_ref())
    }

    /// Whether an option was bound by a flag or a positional token
    pub fn is_bound(&self, index: usize) -> bool {
        self.slots
            .get(index)
            .map(|s| matches!(s.source, Source::Explicit | Source::Positional))
            .unwrap_or(false)
    }

    pub(crate) fn set(&mut self, index: usize, value: Value, source: Source) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.value = Some(value);
            slot.source = source;
        }
    }

    /// Append to a list slot; the first explicit item replaces the default
    pub(crate) fn append(&mut self, index: usize, item: String) {
        if let Some(slot) = self.slots.get_mut(index) {
            if slot.source != Source::Explicit {
                slot.value = Some(Value::List(Vec::new()));
                slot.source = Source::Explicit;
            }
            if let Some(Value::List(items)) = &mut slot.value {
                items.push(item);
            }
        }
    }

    /// Names of required options that are still unresolved
    pub fn missing(&self, options: &OptionSet) -> Vec<String> {
        options
            .iter()
            .zip(&self.slots)
            .filter(|(option, slot)| {
                option.required && option.kind != OptionKind::Boolean && slot.value.is_none()
            })
            .map(|(option, _)| option.name.clone())
            .collect()
    }

    /// Freeze into bound arguments; unresolved slots become `Value::None`
    pub fn into_bound_args(self) -> BoundArgs {
        BoundArgs {
            values: self
                .slots
                .into_iter()
                .map(|slot| (slot.name, slot.value.unwrap_or(Value::None)))
                .collect(),
        }
    }
}

/// Immutable arguments for a handler, one entry per option
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundArgs {
    values: Vec<(String, Value)>,
}

impl BoundArgs {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_float)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn get_list(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(Value::as_list)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in declared order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }
}
