//! Command registry
//!
//! The registry owns the frozen settings, derives each command's option set
//! at registration time and answers the lookups the dispatcher needs.

use crate::binder::{bind, BindOutcome};
use crate::config::{validate_manifest, validate_settings, Manifest, Settings, DEFAULT_CATEGORY};
use crate::error::{ConfigError, DispatchError, DispatchResult, RegistrationError, RegistrationResult};
use crate::help::{group_by_category, render_listing, HelpPage, ListingItem};
use crate::options::derive_options;
use crate::registry::{CommandDef, CommandEntry, Handler};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Program name used when neither the settings nor argv provide one
pub const DEFAULT_PROGRAM_NAME: &str = "prog";

/// Result of a successful dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The handler ran; holds whatever it asked to print
    Completed(Option<String>),
    /// Help was requested; the handler did not run
    HelpRequested,
}

/// Registered commands, in registration order
#[derive(Debug, Default)]
pub struct Registry {
    settings: Settings,
    commands: Vec<CommandEntry>,
    index: HashMap<String, usize>,
    main: Option<String>,
}

impl Registry {
    /// Create a registry; settings are fixed from here on
    pub fn new(settings: Settings) -> RegistrationResult<Self> {
        validate_settings(&settings)?;
        Ok(Registry {
            settings,
            commands: Vec::new(),
            index: HashMap::new(),
            main: None,
        })
    }

    /// Build a registry from a manifest, using its settings
    pub fn from_manifest(manifest: &Manifest, handlers: &HashMap<String, Handler>) -> RegistrationResult<Self> {
        validate_manifest(manifest)?;
        let mut registry = Registry::new(manifest.settings.clone())?;
        registry.register_manifest(manifest, handlers)?;
        Ok(registry)
    }

    /// Register the commands a manifest declares, pairing each with the
    /// handler registered under its name
    ///
    /// The manifest's settings are ignored; this registry's settings apply.
    pub fn register_manifest(
        &mut self,
        manifest: &Manifest,
        handlers: &HashMap<String, Handler>,
    ) -> RegistrationResult<()> {
        for decl in &manifest.commands {
            let handler = handlers
                .get(&decl.name)
                .cloned()
                .ok_or_else(|| RegistrationError::MissingHandler(decl.name.clone()))?;

            let mut def = CommandDef::from_handler(decl.name.clone(), decl.signature(), handler);
            if let Some(category) = &decl.category {
                def = def.with_category(category.clone());
            }
            if decl.main {
                def = def.as_main();
            }
            self.register(def)?;
        }

        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Register a command, deriving its option set immediately
    pub fn register(&mut self, def: CommandDef) -> RegistrationResult<&CommandEntry> {
        let CommandDef {
            name,
            signature,
            handler,
            category,
            main,
        } = def;

        if name.trim().is_empty() {
            return Err(ConfigError::Invalid("command name cannot be empty".to_string()).into());
        }
        if self.index.contains_key(&name) {
            return Err(RegistrationError::DuplicateCommand(name));
        }
        if main {
            if let Some(existing) = &self.main {
                return Err(ConfigError::Invalid(format!(
                    "'{}' cannot be the main command, '{}' already is",
                    name, existing
                ))
                .into());
            }
        }

        let signature = signature
            .build()
            .map_err(|source| RegistrationError::Signature {
                command: name.clone(),
                source,
            })?;
        let options = derive_options(&signature, &self.settings)?;

        debug!(command = %name, options = options.len(), main, "registered command");

        if main {
            self.main = Some(name.clone());
        }
        let position = self.commands.len();
        self.index.insert(name.clone(), position);
        self.commands.push(CommandEntry {
            name,
            category: category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            signature,
            options,
            handler,
            main,
        });

        Ok(&self.commands[position])
    }

    /// Look up a command by name
    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.index.get(name).map(|&i| &self.commands[i])
    }

    pub fn commands(&self) -> &[CommandEntry] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Command run when no command name is given
    pub fn main_command(&self) -> Option<&CommandEntry> {
        self.main
            .as_deref()
            .or(self.settings.main_command.as_deref())
            .and_then(|name| self.get(name))
    }

    /// Program name for usage lines
    ///
    /// The configured name wins, then the file name of `arg0`, then
    /// [`DEFAULT_PROGRAM_NAME`].
    pub fn program_name(&self, arg0: Option<&str>) -> String {
        self.settings
            .program_name
            .clone()
            .or_else(|| {
                arg0.and_then(|arg0| Path::new(arg0).file_name())
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| DEFAULT_PROGRAM_NAME.to_string())
    }

    /// Commands grouped by category, default category first
    pub fn list_by_category(&self) -> Vec<(&str, Vec<&CommandEntry>)> {
        let items = self.listing_items();
        group_by_category(&items)
            .into_iter()
            .map(|(category, members)| {
                let entries = members
                    .iter()
                    .filter_map(|item| self.get(item.name))
                    .collect();
                (category, entries)
            })
            .collect()
    }

    fn listing_items(&self) -> Vec<ListingItem<'_>> {
        self.commands
            .iter()
            .map(|entry| ListingItem {
                name: entry.name(),
                category: entry.category(),
                summary: entry.summary(),
            })
            .collect()
    }

    /// Bind tokens for a command without running it
    pub fn bind(&self, name: &str, tokens: &[String]) -> DispatchResult<BindOutcome> {
        let entry = self
            .get(name)
            .ok_or_else(|| DispatchError::UnknownCommand(name.to_string()))?;
        Ok(bind(entry.options(), tokens)?)
    }

    /// Bind tokens and, if binding is complete, run the handler
    pub fn bind_and_invoke(&self, name: &str, tokens: &[String]) -> DispatchResult<Outcome> {
        let entry = self
            .get(name)
            .ok_or_else(|| DispatchError::UnknownCommand(name.to_string()))?;

        debug!(command = %name, tokens = tokens.len(), "dispatching");

        match bind(entry.options(), tokens)? {
            BindOutcome::Help => Ok(Outcome::HelpRequested),
            BindOutcome::Bound(args) => {
                let output = entry.invoke(&args)?;
                Ok(Outcome::Completed(output))
            }
        }
    }

    /// Help page builder for a command
    pub fn help_page<'a>(&'a self, entry: &'a CommandEntry, program: &'a str) -> HelpPage<'a> {
        HelpPage::new(program, entry.name(), entry.options(), entry.doc(), &self.settings)
    }

    /// Help text for a command
    pub fn render_help(&self, name: &str) -> DispatchResult<String> {
        let entry = self
            .get(name)
            .ok_or_else(|| DispatchError::UnknownCommand(name.to_string()))?;
        let program = self.program_name(None);
        Ok(self.help_page(entry, &program).render())
    }

    /// All commands grouped by category
    pub fn render_command_listing(&self) -> String {
        render_listing(&self.listing_items())
    }

    /// Command names starting with `prefix`, sorted
    pub fn list_completions(&self, prefix: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .commands
            .iter()
            .map(CommandEntry::name)
            .filter(|name| name.starts_with(prefix))
            .collect();
        names.sort_unstable();
        names
    }
}
