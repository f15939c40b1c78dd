//! Reserved top-level flags and shell completion
//!
//! The top level of the command line is described as a `clap::Command`.
//! The same description, extended with one subcommand per registered
//! command, feeds `clap_complete`. Command tokens are bound by the binder,
//! never by clap.

use crate::options::{OptionKind, OptionSpec};
use crate::registry::Registry;
use clap::{Arg, ArgAction, Command};
use clap_complete::{generate, Shell};
use std::io::Write;
use std::str::FromStr;

/// Top-level flag printing command names for a prefix
pub const LIST_COMPLETIONS_ARG: &str = "list-completions";

/// Top-level flag printing a completion script
pub const COMPLETIONS_ARG: &str = "completions";

/// Parse a shell name such as `bash` or `zsh`
pub fn parse_shell(name: &str) -> Option<Shell> {
    Shell::from_str(&name.to_lowercase()).ok()
}

/// Names accepted by [`parse_shell`]
pub fn shell_names() -> Vec<String> {
    [Shell::Bash, Shell::Elvish, Shell::Fish, Shell::PowerShell, Shell::Zsh]
        .iter()
        .map(|shell| shell.to_string())
        .collect()
}

/// Top-level command with the reserved flags
///
/// Both flags take an optional value, given as `--flag value` or
/// `--flag=value`. A missing value reads as the empty string.
pub fn reserved_flags_command(bin_name: &str) -> Command {
    Command::new(bin_name.to_string())
        .disable_help_subcommand(true)
        .arg(
            Arg::new(LIST_COMPLETIONS_ARG)
                .long(LIST_COMPLETIONS_ARG)
                .value_name("PREFIX")
                .num_args(0..=1)
                .default_missing_value("")
                .help("List command names starting with PREFIX"),
        )
        .arg(
            Arg::new(COMPLETIONS_ARG)
                .long(COMPLETIONS_ARG)
                .value_name("SHELL")
                .num_args(0..=1)
                .default_missing_value("")
                .conflicts_with(LIST_COMPLETIONS_ARG)
                .help("Print a completion script for SHELL"),
        )
}

/// Mirror the registry as a clap command tree
pub fn completion_command(registry: &Registry, bin_name: &str) -> Command {
    let mut cmd = reserved_flags_command(bin_name)
        .mut_arg(COMPLETIONS_ARG, |arg| {
            arg.value_parser(shell_names())
                .num_args(1)
                .default_missing_value(None::<&'static str>)
        });

    for entry in registry.commands() {
        let mut sub = Command::new(entry.name().to_string());
        if let Some(summary) = entry.summary() {
            sub = sub.about(summary.to_string());
        }
        for option in entry.options() {
            sub = sub.arg(completion_arg(option));
        }
        cmd = cmd.subcommand(sub);
    }

    cmd
}

fn completion_arg(option: &OptionSpec) -> Arg {
    let mut arg = Arg::new(option.name.clone()).long(option.display_long().to_string());

    let aliases: Vec<String> = option
        .long_forms
        .iter()
        .filter(|form| form.as_str() != option.display_long())
        .cloned()
        .collect();
    if !aliases.is_empty() {
        arg = arg.aliases(aliases);
    }

    if let Some(short) = option.short {
        arg = arg.short(short);
    }

    match option.kind {
        OptionKind::Boolean => arg.action(ArgAction::SetTrue),
        OptionKind::List => arg.action(ArgAction::Append).value_name(option.value_name()),
        OptionKind::Value => arg.action(ArgAction::Set).value_name(option.value_name()),
    }
}

/// Write a completion script for `shell`
pub fn write_completions(shell: Shell, registry: &Registry, bin_name: &str, out: &mut dyn Write) {
    let mut cmd = completion_command(registry, bin_name);
    generate(shell, &mut cmd, bin_name.to_string(), out);
}
