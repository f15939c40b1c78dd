//! Main CLI application

use crate::binder::is_help;
use crate::cli::completion::{
    parse_shell, reserved_flags_command, shell_names, write_completions, COMPLETIONS_ARG,
    LIST_COMPLETIONS_ARG,
};
use crate::config::{parse_manifest_auto, parse_manifest_file, parse_manifest_from, Manifest};
use crate::error::{ArgspecError, DispatchError};
use crate::registry::{CommandEntry, Handler, Outcome, Registry};
use clap::{Arg, Command};
use colored::Colorize;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Id of the catch-all argument holding the command and its tokens
const TOKENS_ARG: &str = "tokens";

/// Exit code for a successful run or a help request
pub const EXIT_OK: i32 = 0;

/// Exit code for a missing or unknown command and for handler failures
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for binding and usage errors
pub const EXIT_USAGE: i32 = 2;

/// CLI application
pub struct App {
    /// Registered commands
    registry: Registry,
}

impl App {
    /// Create a new app around a populated registry
    pub fn new(registry: Registry) -> Self {
        App { registry }
    }

    /// Create app from a manifest file and the handlers it names
    pub fn with_manifest_file(path: &Path, handlers: &HashMap<String, Handler>) -> Result<Self, ArgspecError> {
        let manifest = parse_manifest_file(path)?;
        let registry = Registry::from_manifest(&manifest, handlers)?;
        Ok(App::new(registry))
    }

    /// Create app from the manifest found in the current directory or one
    /// of its parents
    pub fn discover(handlers: &HashMap<String, Handler>) -> Result<Self, ArgspecError> {
        let (manifest, path) = parse_manifest_auto()?;
        Self::from_discovered(manifest, &path, handlers)
    }

    /// Create app from the manifest found in `start_dir` or one of its parents
    pub fn discover_from(start_dir: PathBuf, handlers: &HashMap<String, Handler>) -> Result<Self, ArgspecError> {
        let (manifest, path) = parse_manifest_from(start_dir)?;
        Self::from_discovered(manifest, &path, handlers)
    }

    fn from_discovered(
        manifest: Manifest,
        path: &Path,
        handlers: &HashMap<String, Handler>,
    ) -> Result<Self, ArgspecError> {
        debug!(path = %path.display(), "using manifest");
        let registry = Registry::from_manifest(&manifest, handlers)?;
        Ok(App::new(registry))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run against the process arguments, returning the exit code
    pub fn run(&self) -> io::Result<i32> {
        let args: Vec<String> = std::env::args().collect();
        let stdout = io::stdout();
        let stderr = io::stderr();
        self.run_with(&args, &mut stdout.lock(), &mut stderr.lock())
    }

    /// Run with explicit arguments (program name first) and output streams
    pub fn run_with(&self, args: &[String], out: &mut dyn Write, err: &mut dyn Write) -> io::Result<i32> {
        let program = self.registry.program_name(args.first().map(String::as_str));
        let rest = args.get(1..).unwrap_or_default();

        let matches = match top_level_command(&program).try_get_matches_from(args) {
            Ok(matches) => matches,
            Err(e) => {
                write!(err, "{}", e.render())?;
                return Ok(EXIT_USAGE);
            }
        };

        if let Some(prefix) = matches.get_one::<String>(LIST_COMPLETIONS_ARG) {
            for name in self.registry.list_completions(prefix) {
                writeln!(out, "{}", name)?;
            }
            return Ok(EXIT_OK);
        }
        if let Some(shell) = matches.get_one::<String>(COMPLETIONS_ARG) {
            return self.print_completions(shell, &program, out, err);
        }

        // clap drops a leading `--`, so the command sees the raw tokens
        let (entry, tokens, named) = match split_command(rest) {
            (Some(name), tokens) => match self.registry.get(name) {
                Some(entry) => (entry, tokens, true),
                None => {
                    let error = DispatchError::UnknownCommand(name.to_string());
                    return self.print_listing_error(&error, err);
                }
            },
            (None, tokens) => match self.registry.main_command() {
                Some(entry) => (entry, tokens, false),
                None if tokens.first().is_some_and(|t| is_help(t)) => {
                    write!(out, "{}", self.registry.render_command_listing())?;
                    return Ok(EXIT_OK);
                }
                None => return self.print_listing_error(&DispatchError::NoCommand, err),
            },
        };

        self.dispatch(entry, tokens, named, &program, out, err)
    }

    fn dispatch(
        &self,
        entry: &CommandEntry,
        tokens: &[String],
        named: bool,
        program: &str,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<i32> {
        debug!(command = entry.name(), named, "running command");
        let page = self.registry.help_page(entry, program).as_main(!named);

        match self.registry.bind_and_invoke(entry.name(), tokens) {
            Ok(Outcome::Completed(Some(text))) => {
                writeln!(out, "{}", text)?;
                Ok(EXIT_OK)
            }
            Ok(Outcome::Completed(None)) => Ok(EXIT_OK),
            Ok(Outcome::HelpRequested) => {
                write!(out, "{}", page.render())?;
                Ok(EXIT_OK)
            }
            Err(DispatchError::Binding(failure)) => {
                let text = page
                    .with_message(error_line(&failure.error))
                    .with_binding(&failure.binding)
                    .render();
                write!(err, "{}", text)?;
                Ok(EXIT_USAGE)
            }
            Err(DispatchError::Usage(message)) => {
                write!(err, "{}", page.with_message(error_line(&message)).render())?;
                Ok(EXIT_USAGE)
            }
            Err(e) => {
                writeln!(err, "{}", error_line(&format!("{:#}", e)))?;
                Ok(EXIT_FAILURE)
            }
        }
    }

    fn print_completions(
        &self,
        shell: &str,
        program: &str,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<i32> {
        match parse_shell(shell) {
            Some(shell) => {
                write_completions(shell, &self.registry, program, out);
                Ok(EXIT_OK)
            }
            None => {
                let message = format!(
                    "--{} expects one of: {}",
                    COMPLETIONS_ARG,
                    shell_names().join(", ")
                );
                writeln!(err, "{}", error_line(&message))?;
                Ok(EXIT_USAGE)
            }
        }
    }

    fn print_listing_error(&self, error: &DispatchError, err: &mut dyn Write) -> io::Result<i32> {
        writeln!(err, "{}", error_line(error))?;
        writeln!(err)?;
        write!(err, "{}", self.registry.render_command_listing())?;
        Ok(EXIT_FAILURE)
    }
}

/// Top-level parser: the reserved flags, then every remaining token
///
/// Tokens after the first one that is not a reserved flag are collected
/// verbatim, hyphens included, for the command's own binding.
fn top_level_command(program: &str) -> Command {
    reserved_flags_command(program)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new(TOKENS_ARG)
                .num_args(0..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true),
        )
}

/// Split the command name from its tokens
///
/// The first token names the command unless it is absent or looks like a
/// flag, in which case every token belongs to the main command.
fn split_command(args: &[String]) -> (Option<&str>, &[String]) {
    match args.split_first() {
        Some((first, tail)) if !first.starts_with('-') => (Some(first.as_str()), tail),
        _ => (None, args),
    }
}

fn error_line(message: &dyn std::fmt::Display) -> String {
    format!("{} {}", "error:".red().bold(), message)
}

/// Run the CLI application with provided registry, returning the exit code
pub fn run(registry: Registry) -> io::Result<i32> {
    App::new(registry).run()
}
