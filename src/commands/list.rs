//! List command - pick a bookmark interactively

use super::navigate;
use crate::TwdError;
use crate::config::TwdConfig;
use crate::shell::Navigator;
use crate::store::BookmarkStore;
use crate::ui::Picker;
use std::path::Path;

type Result<T> = std::result::Result<T, TwdError>;

/// Execute the list command
///
/// Opens the picker over every bookmark. Display changes are written back
/// to `config_path` as they happen; a chosen bookmark is navigated to.
///
/// # Errors
///
/// Returns `TwdError` if the terminal cannot be used or the chosen
/// directory cannot be handed to the shell.
pub fn execute(
    store: &BookmarkStore,
    config: &mut TwdConfig,
    config_path: &Path,
    navigator: &dyn Navigator,
    quiet: bool,
) -> Result<()> {
    let bookmarks = store.load();
    let cwd = std::env::current_dir()?;

    let picker = Picker::new(store);
    let chosen = picker.run(bookmarks, config.display, cwd, |display| {
        config.display = *display;
        config.save_to(config_path)
    })?;

    match chosen {
        Some(record) => navigate(&record, navigator, quiet),
        None => Ok(()),
    }
}
