//! Common test utilities

#![allow(dead_code)]

use argspec::registry::{CommandDef, Handler};
use argspec::{BoundArgs, CommandResult, Registry, Settings, Signature};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Create a temporary directory with an argspec.yml file
pub fn create_test_manifest(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let manifest_path = temp_dir.path().join("argspec.yml");
    fs::write(&manifest_path, content).unwrap();
    (temp_dir, manifest_path)
}

/// Create a test manifest with a subdirectory to search from
pub fn create_test_manifest_in_subdir(content: &str) -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let manifest_path = temp_dir.path().join("argspec.yml");
    let sub_dir = temp_dir.path().join("subdir");

    fs::write(&manifest_path, content).unwrap();
    fs::create_dir(&sub_dir).unwrap();

    (temp_dir, manifest_path, sub_dir)
}

/// Owned argument vector
pub fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The greeting command used across tests
pub fn greet(args: &BoundArgs) -> CommandResult {
    let separator = if args.get_bool("comma").unwrap_or(false) { "," } else { "" };
    let line = format!(
        "Hi{} {} {}!",
        separator,
        args.get_str("title").unwrap_or_default(),
        args.get_str("name").unwrap_or_default()
    );
    let times = args.get_int("times").unwrap_or(1).max(0) as usize;
    Ok(Some(vec![line; times].join("\n")))
}

pub fn greet_def() -> CommandDef {
    CommandDef::new(
        "greet",
        Signature::builder()
            .required("name")
            .optional("title", "Mr.")
            .optional("times", 1)
            .optional("comma", false)
            .optional("caps_lock", false)
            .doc("Greet someone.\n\nArguments:\n  name - Name to greet."),
        greet,
    )
}

/// Registry holding only the greeting command
pub fn greet_registry(settings: Settings) -> Registry {
    let mut registry = Registry::new(settings).unwrap();
    registry.register(greet_def()).unwrap();
    registry
}

/// Handlers keyed by command name, for manifest-built registries
pub fn handlers() -> HashMap<String, Handler> {
    let mut handlers: HashMap<String, Handler> = HashMap::new();
    handlers.insert("greet".to_string(), Arc::new(greet));
    handlers.insert(
        "echo".to_string(),
        Arc::new(|args: &BoundArgs| {
            let parts: Vec<String> = args.iter().map(|(name, value)| format!("{}={}", name, value)).collect();
            Ok(Some(parts.join(" ")))
        }),
    );
    handlers
}
