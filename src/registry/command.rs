//! Command definitions and registered entries

use crate::binder::BoundArgs;
use crate::error::DispatchError;
use crate::help::summary_line;
use crate::options::OptionSet;
use crate::signature::{Signature, SignatureBuilder};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// What a handler returns: optional text to print, or an error
pub type CommandResult = Result<Option<String>, CommandError>;

/// Shared handler called with the bound arguments
pub type Handler = Arc<dyn Fn(&BoundArgs) -> CommandResult + Send + Sync>;

/// Errors a handler can signal
#[derive(Error, Debug)]
pub enum CommandError {
    /// Show the command's usage along with this message and stop
    #[error("{0}")]
    Usage(String),

    /// Ordinary failure
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

impl CommandError {
    pub fn usage(message: impl Into<String>) -> Self {
        CommandError::Usage(message.into())
    }
}

impl From<CommandError> for DispatchError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Usage(message) => DispatchError::Usage(message),
            CommandError::Failed(err) => DispatchError::Failed(err),
        }
    }
}

/// A command waiting to be registered
pub struct CommandDef {
    pub(crate) name: String,
    pub(crate) signature: SignatureBuilder,
    pub(crate) handler: Handler,
    pub(crate) category: Option<String>,
    pub(crate) main: bool,
}

impl CommandDef {
    pub fn new<F>(name: impl Into<String>, signature: SignatureBuilder, handler: F) -> Self
    where
        F: Fn(&BoundArgs) -> CommandResult + Send + Sync + 'static,
    {
        Self::from_handler(name, signature, Arc::new(handler))
    }

    /// Build from an already shared handler
    pub fn from_handler(name: impl Into<String>, signature: SignatureBuilder, handler: Handler) -> Self {
        CommandDef {
            name: name.into(),
            signature,
            handler,
            category: None,
            main: false,
        }
    }

    /// Group the command under a category in the listing
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Run this command when no command name is given
    pub fn as_main(mut self) -> Self {
        self.main = true;
        self
    }

    /// Wrap the handler while keeping its signature
    ///
    /// The wrapper receives the bound arguments and the inner handler. The
    /// command is registered with the inner handler's signature.
    pub fn wrap<W>(mut self, wrapper: W) -> Self
    where
        W: Fn(&BoundArgs, &dyn Fn(&BoundArgs) -> CommandResult) -> CommandResult
            + Send
            + Sync
            + 'static,
    {
        let inner = Arc::clone(&self.handler);
        self.handler = Arc::new(move |args: &BoundArgs| wrapper(args, &*inner));
        self
    }
}

impl fmt::Debug for CommandDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDef")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("main", &self.main)
            .finish_non_exhaustive()
    }
}

/// A registered command with its derived option set
///
/// Entries are never modified after registration.
pub struct CommandEntry {
    pub(crate) name: String,
    pub(crate) category: String,
    pub(crate) signature: Signature,
    pub(crate) options: OptionSet,
    pub(crate) handler: Handler,
    pub(crate) main: bool,
}

impl CommandEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn doc(&self) -> Option<&str> {
        self.signature.doc()
    }

    /// First line of the documentation
    pub fn summary(&self) -> Option<&str> {
        self.doc().and_then(summary_line)
    }

    pub fn is_main(&self) -> bool {
        self.main
    }

    /// Call the handler with fully bound arguments
    pub fn invoke(&self, args: &BoundArgs) -> CommandResult {
        (self.handler)(args)
    }
}

impl fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEntry")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("options", &self.options.len())
            .field("main", &self.main)
            .finish_non_exhaustive()
    }
}
