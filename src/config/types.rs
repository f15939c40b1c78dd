//! Core configuration types
//!
//! This module defines the process-wide settings and the data structures of
//! an `argspec.yml` manifest, which declares command signatures statically.

use crate::signature::{Signature, SignatureBuilder, Value};
use serde::{Deserialize, Serialize};

/// Category used for commands registered without one
pub const DEFAULT_CATEGORY: &str = "General";

/// How a name containing underscores may be spelled on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HyphenMode {
    /// `caps_lock` becomes `caps-lock`
    Dash,
    /// `caps_lock` stays `caps_lock`
    Underscore,
    /// `caps_lock` becomes `capslock`
    Delete,
}

impl HyphenMode {
    /// Spell a name in this mode
    pub fn apply(self, name: &str) -> String {
        match self {
            HyphenMode::Dash => name.replace('_', "-"),
            HyphenMode::Underscore => name.to_string(),
            HyphenMode::Delete => name.replace('_', ""),
        }
    }
}

/// Process-wide settings
///
/// Settings are handed to the registry when it is created and cannot change
/// afterwards, so every option set is derived under the same rules.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Accepted spellings for names with underscores; the first is displayed
    pub modes: Vec<HyphenMode>,

    /// List every spelling in help instead of only the first
    pub show_all_variants: bool,

    /// Drop a parameter named `self` from option derivation
    pub ignore_self: bool,

    /// Command to run when no command name is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_command: Option<String>,

    /// Program name used in usage lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_name: Option<String>,
}

impl Settings {
    /// Whether names with underscores also accept a non-underscore spelling
    pub fn hyphenate(&self) -> bool {
        self.modes.iter().any(|m| *m != HyphenMode::Underscore)
    }

    /// Set the accepted spellings
    pub fn with_modes(mut self, modes: Vec<HyphenMode>) -> Self {
        self.modes = modes;
        self
    }

    /// Show every spelling in help
    pub fn with_all_variants(mut self, show: bool) -> Self {
        self.show_all_variants = show;
        self
    }

    pub fn with_ignore_self(mut self, ignore: bool) -> Self {
        self.ignore_self = ignore;
        self
    }

    pub fn with_main_command(mut self, name: impl Into<String>) -> Self {
        self.main_command = Some(name.into());
        self
    }

    pub fn with_program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = Some(name.into());
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            modes: vec![HyphenMode::Dash, HyphenMode::Underscore],
            show_all_variants: false,
            ignore_self: true,
            main_command: None,
            program_name: None,
        }
    }
}

/// Top-level manifest structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Manifest {
    /// Settings for the registry built from this manifest
    #[serde(default)]
    pub settings: Settings,

    /// Declared commands, in listing order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandDecl>,
}

/// A statically declared command
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommandDecl {
    /// Command name
    pub name: String,

    /// Category for the command listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Run this command when no command name is given
    #[serde(default)]
    pub main: bool,

    /// Documentation shown in help
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,

    /// Parameters in declared order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamDecl>,
}

impl CommandDecl {
    /// Builder for this command's signature
    pub fn signature(&self) -> SignatureBuilder {
        let mut builder = Signature::builder();
        for param in &self.params {
            builder = builder.param(param.name.clone(), !param.keyword, param.default.clone());
        }
        if let Some(doc) = &self.doc {
            builder = builder.doc(doc.clone());
        }
        builder
    }
}

/// A declared parameter
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ParamDecl {
    /// Parameter name
    pub name: String,

    /// Declared default; a present but null key is a default of none
    #[serde(
        default,
        deserialize_with = "deserialize_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<Value>,

    /// Keyword-only parameter (never bound positionally)
    #[serde(default)]
    pub keyword: bool,
}

/// Custom deserializer that keeps an explicit null as `Value::None`
fn deserialize_default<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
