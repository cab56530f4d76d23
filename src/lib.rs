//! twd - bookmark directories and jump back to them
//!
//! This library stores directory bookmarks in a small JSON file, resolves
//! them by alias or id prefix, and provides an interactive terminal picker
//! for browsing, searching, sorting and deleting them.

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod shell;
pub mod store;
pub mod ui;
pub mod view;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum TwdError {
    /// Bookmark store error
    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),
    /// Picker error
    #[error("UI error: {0}")]
    Ui(#[from] ui::UiError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Interactive prompt failed
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
    /// Invalid input error
    #[error("{0}")]
    InvalidInput(String),
}
