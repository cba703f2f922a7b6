//! Host, hook and command errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Command already registered: {0}")]
    CommandExists(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

#[derive(Debug, Error)]
pub enum HookError {
    #[error("{0} is not a hook")]
    NotAHook(String),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("{0}")]
    Failed(String),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error("Failed to spawn {program}: {reason}")]
    Spawn { program: String, reason: String },

    #[error("{command} exited with status {code}")]
    ExitStatus { command: String, code: i32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
