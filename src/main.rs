use anyhow::Result;
use argspec::{App, BoundArgs, CommandDef, CommandError, CommandResult, Registry, Settings, Signature};
use std::process;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn greet(args: &BoundArgs) -> CommandResult {
    let name = args.get_str("name").unwrap_or_default();
    let title = args.get_str("title").unwrap_or_default();
    let times = args.get_int("times").unwrap_or(1);
    if times < 0 {
        return Err(CommandError::usage("times must not be negative"));
    }

    let separator = if args.get_bool("comma").unwrap_or(false) { "," } else { "" };
    let mut line = format!("Hi{} {} {}!", separator, title, name);
    if args.get_bool("caps_lock").unwrap_or(false) {
        line = line.to_uppercase();
    }

    Ok(Some(vec![line; times as usize].join("\n")))
}

fn sum(args: &BoundArgs) -> CommandResult {
    let mut total = 0.0;
    for raw in args.get_list("number").unwrap_or_default() {
        let value: f64 = raw
            .parse()
            .map_err(|_| CommandError::usage(format!("'{}' is not a number", raw)))?;
        total += value;
    }
    Ok(Some(total.to_string()))
}

fn tag(args: &BoundArgs) -> CommandResult {
    let target = args.get_str("target").unwrap_or_default();
    let tags = args.get_list("tag").unwrap_or_default();
    if tags.is_empty() {
        return Ok(Some(format!("{}: no tags", target)));
    }

    let rendered: Vec<String> = if args.get_bool("color").unwrap_or(true) {
        tags.iter().map(|t| format!("#{}", t)).collect()
    } else {
        tags.to_vec()
    };
    Ok(Some(format!("{}: {}", target, rendered.join(" "))))
}

fn build_registry() -> Result<Registry> {
    let mut registry = Registry::new(Settings::default().with_program_name("argspec-demo"))?;

    registry.register(
        CommandDef::new(
            "greet",
            Signature::builder()
                .required("name")
                .optional("title", "Mr.")
                .optional("times", 1)
                .optional("comma", false)
                .optional("caps_lock", false)
                .doc(
                    "Greet someone.\n\n\
                     Arguments:\n  \
                     name - Name to greet.\n  \
                     title - Title to use.\n  \
                     times - Number of times to greet.\n  \
                     comma - Whether to add a comma after the greeting.\n  \
                     caps_lock - Whether to shout.",
                ),
            greet,
        )
        .as_main(),
    )?;

    registry.register(
        CommandDef::new(
            "sum",
            Signature::builder()
                .optional("number", Vec::<String>::new())
                .doc("Add up every --number given."),
            sum,
        )
        .with_category("Math"),
    )?;

    registry.register(
        CommandDef::new(
            "tag",
            Signature::builder()
                .required("target")
                .optional("tag", Vec::<String>::new())
                .optional("color", true)
                .doc("Attach tags to a target."),
            tag,
        )
        .with_category("Misc"),
    )?;

    Ok(registry)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = argspec::VERSION, "starting argspec-demo");
    let app = App::new(build_registry()?);
    let code = app.run()?;
    process::exit(code);
}
