//! Save command - bookmark a directory

use super::success;
use crate::TwdError;
use crate::store::BookmarkStore;
use std::path::Path;

type Result<T> = std::result::Result<T, TwdError>;

/// Execute the save command
///
/// Bookmarks `path` (the current directory when `None`) and prints the new
/// id on stdout.
///
/// # Errors
///
/// Returns `TwdError` if the path is not an existing directory, the alias is
/// invalid, or the store cannot be written.
pub fn execute(store: &BookmarkStore, path: Option<&Path>, alias: Option<&str>, quiet: bool) -> Result<String> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };

    if !path.is_dir() {
        return Err(TwdError::InvalidInput(format!(
            "Not a directory: {}",
            path.display()
        )));
    }

    let id = store.create(&path, alias)?;
    success(
        &format!("Saved {} as '{}'", path.display(), alias.unwrap_or(&id)),
        quiet,
    );
    println!("{id}");

    Ok(id)
}
