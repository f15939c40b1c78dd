//! Derived option types

use crate::signature::Value;
use std::collections::HashMap;
use std::fmt;

/// Type a raw command line value is coerced to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    Int,
    Float,
    Bool,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::String => "string",
            ValueType::Int => "integer",
            ValueType::Float => "float",
            ValueType::Bool => "boolean",
        };
        f.write_str(name)
    }
}

/// How an option consumes command line tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Takes exactly one value
    Value,
    /// A switch; presence flips the default
    Boolean,
    /// Repeatable; each occurrence appends a value
    List,
}

/// One command line option derived from a parameter
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    /// Canonical name (the parameter name), used as the binding key
    pub name: String,

    /// Flag base name; `no_<name>` for booleans that default to true
    pub flag: String,

    /// Accepted long spellings; the first one is shown in help
    pub long_forms: Vec<String>,

    /// Short alias, if one could be assigned
    pub short: Option<char>,

    pub kind: OptionKind,

    pub value_type: ValueType,

    /// True iff there is no default and the option is not a switch
    pub required: bool,

    /// Declared default
    pub default: Option<Value>,

    /// Whether bare positional tokens may bind to this option
    pub positional: bool,
}

impl OptionSpec {
    /// Long spelling shown in help
    pub fn display_long(&self) -> &str {
        self.long_forms.first().map(String::as_str).unwrap_or(&self.flag)
    }

    /// Spellings accepted in addition to the displayed one
    pub fn hyphen_aliases(&self) -> &[String] {
        self.long_forms.get(1..).unwrap_or(&[])
    }

    /// Placeholder used for the value in usage text
    pub fn value_name(&self) -> String {
        self.name.replace('-', "_").to_uppercase()
    }

    /// Value the option takes when nothing binds it
    pub fn initial_value(&self) -> Option<Value> {
        match (&self.kind, &self.default) {
            (OptionKind::List, None) => Some(Value::List(Vec::new())),
            (_, default) => default.clone(),
        }
    }
}

/// Ordered options of one command with lookup tables
#[derive(Debug, Clone, Default)]
pub struct OptionSet {
    options: Vec<OptionSpec>,
    by_long: HashMap<String, usize>,
    by_short: HashMap<char, usize>,
}

impl OptionSet {
    /// Assemble a set from options whose names are already known to be unique
    pub(crate) fn from_parts(
        options: Vec<OptionSpec>,
        by_long: HashMap<String, usize>,
        by_short: HashMap<char, usize>,
    ) -> Self {
        OptionSet {
            options,
            by_long,
            by_short,
        }
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OptionSpec> {
        self.options.iter()
    }

    /// Find an option by canonical name
    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Index of the option a long spelling (without `--`) refers to
    pub fn index_of_long(&self, flag: &str) -> Option<usize> {
        self.by_long.get(flag).copied()
    }

    /// Index of the option a short form refers to
    pub fn index_of_short(&self, short: char) -> Option<usize> {
        self.by_short.get(&short).copied()
    }
}

impl<'a> IntoIterator for &'a OptionSet {
    type Item = &'a OptionSpec;
    type IntoIter = std::slice::Iter<'a, OptionSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}
