//! Go command - jump to a bookmark by alias or id prefix

use super::{navigate, resolve_one};
use crate::TwdError;
use crate::config::TwdConfig;
use crate::shell::Navigator;
use crate::store::BookmarkStore;
use std::path::Path;

type Result<T> = std::result::Result<T, TwdError>;

/// Execute the go command
///
/// Without a query this is the same as `list`.
///
/// # Errors
///
/// Returns `TwdError` if nothing matches, the prompt or picker fails, or the
/// directory cannot be handed to the shell.
pub fn execute(
    store: &BookmarkStore,
    query: Option<&str>,
    config: &mut TwdConfig,
    config_path: &Path,
    navigator: &dyn Navigator,
    quiet: bool,
) -> Result<()> {
    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return super::list(store, config, config_path, navigator, quiet);
    };

    match resolve_one(store, query)? {
        Some(record) => navigate(&record, navigator, quiet),
        None => Ok(()),
    }
}
