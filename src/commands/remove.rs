//! Remove command - delete a bookmark by alias or id prefix

use super::{describe, resolve_one, success};
use crate::TwdError;
use crate::store::{BookmarkRecord, BookmarkStore};

type Result<T> = std::result::Result<T, TwdError>;

/// Execute the remove command
///
/// Returns the deleted record, or `None` if the user dismissed the choice
/// between several matches.
///
/// # Errors
///
/// Returns `TwdError` if nothing matches, the prompt fails, or the store
/// cannot be written.
pub fn execute(store: &BookmarkStore, query: &str, quiet: bool) -> Result<Option<BookmarkRecord>> {
    let Some(record) = resolve_one(store, query)? else {
        return Ok(None);
    };

    let removed = store.delete(&record.id)?;
    success(&format!("Removed {}", describe(&removed)), quiet);
    Ok(Some(removed))
}
