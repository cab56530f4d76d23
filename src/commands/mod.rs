//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI
//! args and runs against the bookmark store. Status output goes to stderr so
//! that stdout only ever carries results (`--print` targets, ids, scripts).

pub mod go;
pub mod init;
pub mod list;
pub mod remove;
pub mod save;

pub use go::execute as go;
pub use init::execute as init;
pub use list::execute as list;
pub use remove::execute as remove;
pub use save::execute as save;

use crate::TwdError;
use crate::shell::Navigator;
use crate::store::{BookmarkRecord, BookmarkStore, Resolution};
use colored::Colorize;
use dialoguer::{Select, theme::ColorfulTheme};

type Result<T> = std::result::Result<T, TwdError>;

pub(crate) fn success(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{} {}", "✓".green(), message);
    }
}

/// One-line description used in prompts and messages
#[must_use]
pub fn describe(record: &BookmarkRecord) -> String {
    format!(
        "{} ({}) {}",
        record.alias.bold(),
        record.id.dimmed(),
        record.path.display()
    )
}

/// Hand `record`'s directory to the shell
///
/// # Errors
///
/// Returns `TwdError::InvalidInput` if the directory no longer exists, or an
/// I/O error if the navigator cannot write the target.
pub fn navigate(record: &BookmarkRecord, navigator: &dyn Navigator, quiet: bool) -> Result<()> {
    if !record.path.is_dir() {
        return Err(TwdError::InvalidInput(format!(
            "Bookmark '{}' points to a missing directory: {}",
            record.alias,
            record.path.display()
        )));
    }

    navigator.emit(&record.path)?;
    tracing::info!(id = %record.id, path = %record.path.display(), "navigating");
    success(&format!("cd {}", record.path.display()), quiet);
    Ok(())
}

/// Let the user choose among several matches
///
/// Returns `None` if the prompt is dismissed.
///
/// # Errors
///
/// Returns `TwdError::Prompt` if the terminal prompt fails.
pub fn disambiguate(candidates: &[BookmarkRecord]) -> Result<Option<BookmarkRecord>> {
    let items: Vec<String> = candidates.iter().map(describe).collect();

    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Several bookmarks match, pick one")
        .items(&items)
        .default(0)
        .interact_opt()?;

    Ok(choice.and_then(|index| candidates.get(index).cloned()))
}

/// Resolve a query to exactly one record, prompting on ambiguity
///
/// # Errors
///
/// Returns `TwdError::InvalidInput` when nothing matches, or a prompt error.
pub fn resolve_one(store: &BookmarkStore, query: &str) -> Result<Option<BookmarkRecord>> {
    match store.resolve(query) {
        Resolution::Unique(record) => Ok(Some(record)),
        Resolution::Ambiguous(candidates) => {
            tracing::debug!(query, count = candidates.len(), "ambiguous query");
            disambiguate(&candidates)
        }
        Resolution::None => Err(TwdError::InvalidInput(format!(
            "No bookmark matches '{query}'"
        ))),
    }
}
