//! Settings and manifest validation

use crate::config::types::{Manifest, Settings};
use crate::error::{ConfigError, ConfigResult};
use std::collections::HashSet;

/// Validate settings before any option set is derived from them
pub fn validate_settings(settings: &Settings) -> ConfigResult<()> {
    if settings.modes.is_empty() {
        return Err(ConfigError::Invalid(
            "at least one hyphen mode must be set".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for mode in &settings.modes {
        if !seen.insert(mode) {
            return Err(ConfigError::Invalid(format!(
                "hyphen mode '{:?}' is listed more than once",
                mode
            )));
        }
    }

    if let Some(main) = &settings.main_command {
        if main.trim().is_empty() {
            return Err(ConfigError::Invalid("main command name cannot be empty".to_string()));
        }
    }

    Ok(())
}

/// Validate a complete manifest
pub fn validate_manifest(manifest: &Manifest) -> ConfigResult<()> {
    validate_settings(&manifest.settings)?;

    let mut names = HashSet::new();
    let mut mains = Vec::new();
    for command in &manifest.commands {
        if command.name.trim().is_empty() {
            return Err(ConfigError::Invalid("command name cannot be empty".to_string()));
        }
        if !names.insert(command.name.as_str()) {
            return Err(ConfigError::DuplicateCommand(command.name.clone()));
        }
        if command.main {
            mains.push(command.name.as_str());
        }
    }

    if mains.len() > 1 {
        return Err(ConfigError::Invalid(format!(
            "only one main command is allowed (found: {})",
            mains.join(", ")
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{CommandDecl, HyphenMode};

    fn decl(name: &str, main: bool) -> CommandDecl {
        CommandDecl {
            name: name.to_string(),
            category: None,
            main,
            doc: None,
            params: vec![],
        }
    }

    #[test]
    fn test_validate_default_settings() {
        assert!(validate_settings(&Settings::default()).is_ok());
    }

    #[test]
    fn test_validate_empty_modes() {
        let settings = Settings::default().with_modes(vec![]);
        assert!(matches!(
            validate_settings(&settings),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_validate_repeated_mode() {
        let settings = Settings::default().with_modes(vec![HyphenMode::Dash, HyphenMode::Dash]);
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_validate_duplicate_command() {
        let manifest = Manifest {
            settings: Settings::default(),
            commands: vec![decl("greet", false), decl("greet", false)],
        };
        assert!(matches!(
            validate_manifest(&manifest),
            Err(ConfigError::DuplicateCommand(_))
        ));
    }

    #[test]
    fn test_validate_two_mains() {
        let manifest = Manifest {
            settings: Settings::default(),
            commands: vec![decl("a", true), decl("b", true)],
        };
        assert!(validate_manifest(&manifest).is_err());
    }

    #[test]
    fn test_validate_valid_manifest() {
        let manifest = Manifest {
            settings: Settings::default(),
            commands: vec![decl("a", true), decl("b", false)],
        };
        assert!(validate_manifest(&manifest).is_ok());
    }
}
