//! Error types for argspec
//!
//! Errors come in two tiers. Registration errors are programmer mistakes in
//! a command declaration and abort startup. Binding and dispatch errors come
//! from user input and are rendered together with usage text.

use crate::binder::BindFailure;
use crate::options::ValueType;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for argspec operations
pub type Result<T> = std::result::Result<T, ArgspecError>;

/// Main error type for argspec
#[derive(Error, Debug)]
pub enum ArgspecError {
    /// Command declaration errors
    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),

    /// Errors raised while running a command
    #[error("{0}")]
    Dispatch(#[from] DispatchError),

    /// Manifest and settings errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A parameter list that cannot be turned into a signature
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Parameter name cannot be empty")]
    EmptyName,

    #[error("Invalid parameter name '{0}': must start with a letter and contain only letters, digits, '_' or '-'")]
    InvalidName(String),

    #[error("Parameter '{0}' is declared more than once")]
    DuplicateParameter(String),
}

/// Fatal errors raised while registering a command
#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Invalid signature for command '{command}': {source}")]
    Signature {
        command: String,
        #[source]
        source: SignatureError,
    },

    #[error("Option '--{flag}' is claimed by both '{first}' and '{second}'")]
    OptionConflict {
        flag: String,
        first: String,
        second: String,
    },

    #[error("Command '{0}' is already registered")]
    DuplicateCommand(String),

    #[error("No handler supplied for declared command '{0}'")]
    MissingHandler(String),

    #[error("Invalid settings: {0}")]
    Config(#[from] ConfigError),
}

/// Errors produced while binding command line tokens to options
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindingError {
    #[error("Unknown option '{0}'")]
    UnknownOption(String),

    #[error("Invalid value for '{name}': '{value}' is not a valid {expected}")]
    TypeCoercion {
        name: String,
        value: String,
        expected: ValueType,
    },

    #[error("All options without default values must be specified (missing: {})", .missing.join(", "))]
    MissingRequired { missing: Vec<String> },

    #[error("Option '{0}' requires a value")]
    MissingValue(String),

    #[error("Option '{0}' does not take a value")]
    UnexpectedValue(String),

    #[error("Too many arguments: no parameter left for '{0}'")]
    TooManyArguments(String),
}

/// Errors raised while dispatching a command
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Command must be specified")]
    NoCommand,

    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    #[error("{0}")]
    Binding(#[from] BindFailure),

    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

/// Manifest and settings errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find manifest file (searched: {0})")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Command '{0}' is declared more than once")]
    DuplicateCommand(String),

    #[error("Failed to read manifest '{path}': {error}")]
    Read { path: PathBuf, error: String },
}

/// Specialized result type for registration
pub type RegistrationResult<T> = std::result::Result<T, RegistrationError>;

/// Specialized result type for manifest operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for dispatch
pub type DispatchResult<T> = std::result::Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_lists_names() {
        let err = BindingError::MissingRequired {
            missing: vec!["name".to_string(), "key".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "All options without default values must be specified (missing: name, key)"
        );
    }

    #[test]
    fn test_type_coercion_message() {
        let err = BindingError::TypeCoercion {
            name: "times".to_string(),
            value: "blah".to_string(),
            expected: ValueType::Int,
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'times': 'blah' is not a valid integer"
        );
    }
}
