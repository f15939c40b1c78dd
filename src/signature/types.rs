//! Parameter and signature types

use crate::error::SignatureError;
use crate::options::ValueType;
use crate::signature::Value;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Conventional name of the instance parameter
pub const SELF_PARAM: &str = "self";

/// One declared parameter of a handler
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Parameter name
    pub name: String,

    /// Ordinal among positional parameters, `None` for keyword-only
    pub position: Option<usize>,

    /// Declared default; `Some(Value::None)` is a default of none
    pub default: Option<Value>,
}

impl Parameter {
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Type inferred from the declared default
    ///
    /// No default and a default of none both fall back to strings. Lists
    /// are always string-valued.
    pub fn declared_type(&self) -> ValueType {
        match &self.default {
            Some(Value::Bool(_)) => ValueType::Bool,
            Some(Value::Int(_)) => ValueType::Int,
            Some(Value::Float(_)) => ValueType::Float,
            _ => ValueType::String,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self.default, Some(Value::List(_)))
    }

    pub fn is_receiver(&self) -> bool {
        self.name == SELF_PARAM
    }
}

/// The parameter list and documentation of one handler
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signature {
    params: Vec<Parameter>,
    doc: Option<String>,
}

impl Signature {
    /// Start declaring a signature
    pub fn builder() -> SignatureBuilder {
        SignatureBuilder::default()
    }

    /// Parameters in declared order
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Documentation text, reproduced verbatim in help output
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Parameters that take part in option derivation
    pub fn effective_params(&self, ignore_self: bool) -> impl Iterator<Item = &Parameter> {
        self.params
            .iter()
            .filter(move |p| !(ignore_self && p.is_receiver()))
    }
}

/// Explicit, static declaration of a handler's parameters
///
/// Positions are assigned in call order to `required` and `optional`
/// parameters; `keyword*` parameters can only be given by flag.
#[derive(Debug, Clone, Default)]
pub struct SignatureBuilder {
    params: Vec<(String, bool, Option<Value>)>,
    doc: Option<String>,
}

impl SignatureBuilder {
    /// A positional parameter without a default
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.params.push((name.into(), true, None));
        self
    }

    /// A positional parameter with a default
    pub fn optional(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.params.push((name.into(), true, Some(default.into())));
        self
    }

    /// A keyword-only parameter with a default
    pub fn keyword(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.params.push((name.into(), false, Some(default.into())));
        self
    }

    /// A keyword-only parameter without a default
    pub fn keyword_required(mut self, name: impl Into<String>) -> Self {
        self.params.push((name.into(), false, None));
        self
    }

    /// The instance parameter, conventionally first
    pub fn receiver(mut self) -> Self {
        self.params.push((SELF_PARAM.to_string(), true, None));
        self
    }

    /// Add a parameter from its parts
    pub fn param(mut self, name: impl Into<String>, positional: bool, default: Option<Value>) -> Self {
        self.params.push((name.into(), positional, default));
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Validate names and produce the signature
    pub fn build(self) -> Result<Signature, SignatureError> {
        let mut seen = HashSet::new();
        let mut params = Vec::with_capacity(self.params.len());
        let mut next_position = 0;

        for (name, positional, default) in self.params {
            validate_name(&name)?;
            if !seen.insert(name.clone()) {
                return Err(SignatureError::DuplicateParameter(name));
            }

            let position = if positional {
                next_position += 1;
                Some(next_position - 1)
            } else {
                None
            };

            params.push(Parameter {
                name,
                position,
                default,
            });
        }

        Ok(Signature {
            params,
            doc: self.doc,
        })
    }
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("valid name pattern"))
}

fn validate_name(name: &str) -> Result<(), SignatureError> {
    if name.is_empty() {
        return Err(SignatureError::EmptyName);
    }
    if !name_pattern().is_match(name) {
        return Err(SignatureError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_assigns_positions() {
        let sig = Signature::builder()
            .required("name")
            .keyword("verbose", false)
            .optional("title", "Mr.")
            .build()
            .unwrap();

        let positions: Vec<_> = sig.params().iter().map(|p| p.position).collect();
        assert_eq!(positions, vec![Some(0), None, Some(1)]);
    }

    #[test]
    fn test_declared_types() {
        let sig = Signature::builder()
            .required("name")
            .optional("times", 1)
            .optional("ratio", 0.5)
            .optional("comma", false)
            .optional("maybe", None::<&str>)
            .optional("tags", vec!["a"])
            .build()
            .unwrap();

        let types: Vec<_> = sig.params().iter().map(|p| p.declared_type()).collect();
        assert_eq!(
            types,
            vec![
                ValueType::String,
                ValueType::Int,
                ValueType::Float,
                ValueType::Bool,
                ValueType::String,
                ValueType::String,
            ]
        );
        assert!(sig.params()[5].is_list());
        assert!(sig.params()[4].has_default());
        assert!(!sig.params()[0].has_default());
    }

    #[test]
    fn test_duplicate_parameter() {
        let result = Signature::builder().required("a").optional("a", 1).build();
        assert_eq!(
            result,
            Err(SignatureError::DuplicateParameter("a".to_string()))
        );
    }

    #[test]
    fn test_invalid_names() {
        assert_eq!(
            Signature::builder().required("").build(),
            Err(SignatureError::EmptyName)
        );
        assert!(matches!(
            Signature::builder().required("1abc").build(),
            Err(SignatureError::InvalidName(_))
        ));
        assert!(matches!(
            Signature::builder().required("a b").build(),
            Err(SignatureError::InvalidName(_))
        ));
        assert!(Signature::builder().required("caps-lock").build().is_ok());
    }

    #[test]
    fn test_effective_params_skip_receiver() {
        let sig = Signature::builder().receiver().required("key").build().unwrap();
        let names: Vec<_> = sig.effective_params(true).map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["key"]);
        assert_eq!(sig.effective_params(false).count(), 2);
    }
}
