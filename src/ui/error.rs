//! UI error types

use thiserror::Error;

/// Errors that can occur while running the picker
#[derive(Debug, Error)]
pub enum UiError {
    /// Terminal setup, drawing or input failed
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stdin or stderr is not an interactive terminal
    #[error("The picker needs an interactive terminal")]
    NotATerminal,
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
