//! Command line token classification

/// Long help flag
pub const HELP_FLAG_LONG: &str = "--help";

/// Short help flag
pub const HELP_FLAG_SHORT: &str = "-h";

/// End-of-options marker
pub const TERMINATOR: &str = "--";

/// A flag reference such as `--title=Dr.` or `-t`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flag<'a> {
    /// Flag text before any `=`, dashes included
    pub raw: &'a str,
    /// Flag text without dashes
    pub name: &'a str,
    /// Whether the flag was written with two dashes
    pub long: bool,
    /// Inline value after `=`
    pub value: Option<&'a str>,
}

/// One classified token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Flag(Flag<'a>),
    Positional(&'a str),
    Terminator,
}

/// Classify a single token
///
/// A lone `-` and negative numbers such as `-5` are positional values.
pub fn classify(token: &str) -> Token<'_> {
    if token == TERMINATOR {
        return Token::Terminator;
    }

    let (long, name_and_value) = if let Some(rest) = token.strip_prefix("--") {
        (true, rest)
    } else if let Some(rest) = token.strip_prefix('-') {
        if rest.is_empty() || is_negative_number(rest) {
            return Token::Positional(token);
        }
        (false, rest)
    } else {
        return Token::Positional(token);
    };

    let (name, value) = match name_and_value.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (name_and_value, None),
    };
    let dashes = if long { 2 } else { 1 };

    Token::Flag(Flag {
        raw: &token[..dashes + name.len()],
        name,
        long,
        value,
    })
}

/// Whether a token asks for help
pub fn is_help(token: &str) -> bool {
    token == HELP_FLAG_LONG || token == HELP_FLAG_SHORT
}

/// Whether help is requested anywhere before the end-of-options marker
pub fn wants_help(tokens: &[String]) -> bool {
    tokens
        .iter()
        .take_while(|t| t.as_str() != TERMINATOR)
        .any(|t| is_help(t))
}

fn is_negative_number(rest: &str) -> bool {
    rest.starts_with(|c: char| c.is_ascii_digit() || c == '.') && rest.parse::<f64>().is_ok()
}
