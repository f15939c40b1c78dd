//! Per-command help text
//!
//! Everything here is a pure function of its inputs and never fails.

use crate::binder::Binding;
use crate::config::Settings;
use crate::options::{OptionKind, OptionSet, OptionSpec, HELP_LONG, HELP_SHORT};
use crate::signature::Value;
use std::fmt::Write;

/// Width of the rulers around command documentation
const RULER_WIDTH: usize = 40;

/// Smallest gap between the flag column and the annotation column
const COLUMN_GAP: usize = 2;

/// Note printed under every usage line
pub const REQUIRED_NOTE: &str = "Options without default values MUST be specified";

/// Usage line, required-options note and the option table
///
/// `command` is `None` when rendering the main command, which is invoked
/// without a command name.
pub fn render_usage(
    program: &str,
    command: Option<&str>,
    options: &OptionSet,
    settings: &Settings,
) -> String {
    let mut out = String::new();
    match command {
        Some(name) => {
            let _ = writeln!(out, "Usage: {} {} [options]", program, name);
        }
        None => {
            let _ = writeln!(out, "Usage: {} [options]", program);
        }
    }
    let _ = writeln!(out, "{}", REQUIRED_NOTE);
    let _ = writeln!(out);
    let _ = writeln!(out, "Options:");

    let mut rows = vec![(
        format!("-{}, --{}", HELP_SHORT, HELP_LONG),
        "show this help message and exit".to_string(),
    )];
    rows.extend(
        options
            .iter()
            .map(|option| (flag_column(option, settings), annotation(option))),
    );

    let width = rows.iter().map(|(flags, _)| flags.len()).max().unwrap_or(0) + COLUMN_GAP;
    for (flags, note) in rows {
        if note.is_empty() {
            let _ = writeln!(out, "  {}", flags);
        } else {
            let _ = writeln!(out, "  {:<width$}{}", flags, note, width = width);
        }
    }

    out
}

/// Flag column of one option: short form, long spellings and placeholder
fn flag_column(option: &OptionSpec, settings: &Settings) -> String {
    let mut column = match option.short {
        Some(short) => format!("-{}, ", short),
        None => "    ".to_string(),
    };

    let spellings: Vec<String> = if settings.show_all_variants {
        option.long_forms.iter().map(|f| format!("--{}", f)).collect()
    } else {
        vec![format!("--{}", option.display_long())]
    };
    column.push_str(&spellings.join(", "));

    if option.kind != OptionKind::Boolean {
        let _ = write!(column, " <{}>", option.value_name());
    }
    column
}

/// Default and repeatability notes of one option
fn annotation(option: &OptionSpec) -> String {
    match (option.kind, &option.default) {
        (OptionKind::Boolean, _) => String::new(),
        (OptionKind::List, Some(Value::List(items))) if !items.is_empty() => {
            format!("[repeatable] [default: {}]", items.join(", "))
        }
        (OptionKind::List, _) => "[repeatable]".to_string(),
        (OptionKind::Value, Some(default)) => format!("[default: {}]", default.display_default()),
        (OptionKind::Value, None) => String::new(),
    }
}

/// Documentation block, reproducing the text unmodified
pub fn render_documentation(command: &str, doc: Option<&str>) -> String {
    match doc {
        Some(doc) => {
            let ruler = "-".repeat(RULER_WIDTH);
            format!(
                "Documentation for command '{}':\n{}\n{}\n{}\n",
                command, ruler, doc, ruler
            )
        }
        None => format!("No documentation for command '{}'.\n", command),
    }
}

/// "Current Options" block listing every option's value
pub fn render_current_options(binding: &Binding) -> String {
    let mut out = String::from("Current Options:\n");
    for slot in binding.slots() {
        let value = slot
            .value
            .as_ref()
            .map(Value::to_string)
            .unwrap_or_else(|| Value::None.to_string());
        let _ = writeln!(out, " --{}={}", slot.name, value);
    }
    out
}

/// First non-blank line of a documentation text
pub fn summary_line(doc: &str) -> Option<&str> {
    doc.lines().map(str::trim).find(|line| !line.is_empty())
}

/// Full help page for one command
///
/// Shown on `-h`, and after a binding or usage error together with the
/// error message and the current options.
#[derive(Debug, Clone)]
pub struct HelpPage<'a> {
    program: &'a str,
    command: &'a str,
    is_main: bool,
    options: &'a OptionSet,
    doc: Option<&'a str>,
    settings: &'a Settings,
    message: Option<String>,
    binding: Option<&'a Binding>,
}

impl<'a> HelpPage<'a> {
    pub fn new(
        program: &'a str,
        command: &'a str,
        options: &'a OptionSet,
        doc: Option<&'a str>,
        settings: &'a Settings,
    ) -> Self {
        HelpPage {
            program,
            command,
            is_main: false,
            options,
            doc,
            settings,
            message: None,
            binding: None,
        }
    }

    /// Render the usage line without a command name
    pub fn as_main(mut self, is_main: bool) -> Self {
        self.is_main = is_main;
        self
    }

    /// Error message printed first
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Partial binding shown as the current options
    pub fn with_binding(mut self, binding: &'a Binding) -> Self {
        self.binding = Some(binding);
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        if let Some(message) = &self.message {
            out.push_str(message);
            out.push_str("\n\n");
        }

        if let Some(binding) = self.binding {
            out.push_str(&render_current_options(binding));
            out.push('\n');
        }

        out.push_str(&render_documentation(self.command, self.doc));
        out.push('\n');

        let command = if self.is_main { None } else { Some(self.command) };
        out.push_str(&render_usage(self.program, command, self.options, self.settings));
        out
    }
}
