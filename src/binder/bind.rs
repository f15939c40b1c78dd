//! Binding of command line tokens to an option set

use crate::binder::{classify, wants_help, Binding, BoundArgs, Flag, Source, Token};
use crate::error::BindingError;
use crate::options::{OptionKind, OptionSet, OptionSpec, ValueType};
use crate::signature::Value;
use thiserror::Error;

/// Successful result of binding
#[derive(Debug, Clone, PartialEq)]
pub enum BindOutcome {
    /// Every option resolved
    Bound(BoundArgs),
    /// `-h`/`--help` was present; nothing else was checked
    Help,
}

/// A binding error together with the partial binding at the time it occurred
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{error}")]
pub struct BindFailure {
    pub error: BindingError,
    pub binding: Binding,
}

/// Bind raw tokens against an option set
///
/// Explicit flags are applied first, then positional tokens fill the
/// positional options that are still unbound, in declared order.
pub fn bind(options: &OptionSet, tokens: &[String]) -> Result<BindOutcome, BindFailure> {
    if wants_help(tokens) {
        return Ok(BindOutcome::Help);
    }

    let mut binding = Binding::new(options);
    match bind_tokens(options, &mut binding, tokens) {
        Ok(()) => Ok(BindOutcome::Bound(binding.into_bound_args())),
        Err(error) => Err(BindFailure { error, binding }),
    }
}

fn bind_tokens(
    options: &OptionSet,
    binding: &mut Binding,
    tokens: &[String],
) -> Result<(), BindingError> {
    let mut positionals: Vec<&str> = Vec::new();
    let mut iter = tokens.iter();

    while let Some(token) = iter.next() {
        let flag = match classify(token) {
            Token::Terminator => {
                positionals.extend(iter.by_ref().map(String::as_str));
                break;
            }
            Token::Positional(value) => {
                positionals.push(value);
                continue;
            }
            Token::Flag(flag) => flag,
        };

        let index = resolve(options, &flag)
            .ok_or_else(|| BindingError::UnknownOption(flag.raw.to_string()))?;
        let option = &options.options()[index];

        match option.kind {
            OptionKind::Boolean => {
                if flag.value.is_some() {
                    return Err(BindingError::UnexpectedValue(flag.raw.to_string()));
                }
                let default = option
                    .default
                    .as_ref()
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                binding.set(index, Value::Bool(!default), Source::Explicit);
            }
            OptionKind::Value | OptionKind::List => {
                let raw = match flag.value {
                    Some(value) => value,
                    None => iter
                        .next()
                        .map(String::as_str)
                        .ok_or_else(|| BindingError::MissingValue(flag.raw.to_string()))?,
                };

                if option.kind == OptionKind::List {
                    binding.append(index, raw.to_string());
                } else {
                    binding.set(index, coerce(option, raw)?, Source::Explicit);
                }
            }
        }
    }

    for raw in positionals {
        let index = options
            .iter()
            .enumerate()
            .find(|(index, option)| option.positional && !binding.is_bound(*index))
            .map(|(index, _)| index)
            .ok_or_else(|| BindingError::TooManyArguments(raw.to_string()))?;
        let value = coerce(&options.options()[index], raw)?;
        binding.set(index, value, Source::Positional);
    }

    let missing = binding.missing(options);
    if !missing.is_empty() {
        return Err(BindingError::MissingRequired { missing });
    }

    Ok(())
}

/// Find the option a flag refers to
fn resolve(options: &OptionSet, flag: &Flag<'_>) -> Option<usize> {
    if flag.long {
        return options.index_of_long(flag.name);
    }

    let mut chars = flag.name.chars();
    match (chars.next(), chars.next()) {
        (Some(short), None) => options.index_of_short(short),
        _ => None,
    }
}

/// Cast a raw value to the option's value type
pub fn coerce(option: &OptionSpec, raw: &str) -> Result<Value, BindingError> {
    let mismatch = || BindingError::TypeCoercion {
        name: option.name.clone(),
        value: raw.to_string(),
        expected: option.value_type,
    };

    match option.value_type {
        ValueType::String => Ok(Value::Str(raw.to_string())),
        ValueType::Int => raw.trim().parse::<i64>().map(Value::Int).map_err(|_| mismatch()),
        ValueType::Float => raw
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| mismatch()),
        // Booleans are switches and never take a value
        ValueType::Bool => Err(mismatch()),
    }
}
