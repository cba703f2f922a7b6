//! The command invocation the host is about to execute.

use super::HELP_COMMAND;

/// Parsed top-level invocation.
///
/// When the host cannot dereference the first positional token it falls back
/// to `help` and keeps the token in `unresolved`, leaving the remaining
/// tokens in `args`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Resolved top-level command.
    pub command: String,
    /// Command token the host could not resolve at parse time.
    pub unresolved: Option<String>,
    /// Positional arguments for `command`.
    pub args: Vec<String>,
    /// A bare `--help` flag was supplied.
    pub help_flag: bool,
    /// Render usage instead of executing.
    pub usage: bool,
    /// Usage text overriding the command's own.
    pub usage_text: Option<String>,
}

impl Invocation {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            ..Default::default()
        }
    }

    /// `help` fallback for a token the host did not recognise.
    pub fn unresolved(token: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: HELP_COMMAND.to_string(),
            unresolved: Some(token.into()),
            args,
            ..Default::default()
        }
    }

    pub fn with_help_flag(mut self) -> Self {
        self.help_flag = true;
        self
    }

    pub fn is_help(&self) -> bool {
        self.command == HELP_COMMAND
    }

    /// The command the user is really asking about.
    ///
    /// For a `help` fallback over an unresolved token this is the token,
    /// unless a bare help flag asks for help about it.
    pub fn target(&self) -> &str {
        match &self.unresolved {
            Some(token) if self.is_help() && !self.help_flag => token,
            _ => &self.command,
        }
    }
}
