//! Terminal event loop for the picker
//!
//! Draws on stderr so that stdout stays free for `--print` output.

use super::events::{self, EventResult};
use super::frame::PickerFrame;
use super::layout;
use super::state::{NoticeLevel, PickerState};
use super::theme::Theme;
use crate::config::DisplayConfig;
use crate::store::{BookmarkRecord, BookmarkStore, Bookmarks, StoreError};
use crate::ui::error::{Result, UiError};
use config::ConfigError;
use crossterm::{
    event::{self as term_event, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, IsTerminal, Stderr};
use std::path::PathBuf;

type PickerTerminal = Terminal<CrosstermBackend<Stderr>>;

/// Interactive bookmark picker
pub struct Picker<'a> {
    store: &'a BookmarkStore,
    theme: Theme,
}

impl<'a> Picker<'a> {
    /// Create a picker that deletes through `store`
    #[must_use]
    pub fn new(store: &'a BookmarkStore) -> Self {
        Self {
            store,
            theme: Theme::default(),
        }
    }

    /// Setup terminal for TUI
    fn setup_terminal() -> Result<PickerTerminal> {
        enable_raw_mode()?;
        let mut stderr = io::stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stderr))?;
        terminal.hide_cursor()?;
        Ok(terminal)
    }

    /// Cleanup terminal after TUI
    fn cleanup_terminal(terminal: &mut PickerTerminal) -> Result<()> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Run the picker until the user chooses a record or cancels
    ///
    /// `on_display_change` is called with the new settings after every
    /// toggle; its failures are logged and shown, never fatal.
    ///
    /// # Errors
    ///
    /// Returns `UiError` if the terminal is not interactive or terminal I/O
    /// fails. The terminal is restored in either case.
    pub fn run<F>(
        &self,
        bookmarks: Bookmarks,
        display: DisplayConfig,
        cwd: PathBuf,
        mut on_display_change: F,
    ) -> Result<Option<BookmarkRecord>>
    where
        F: FnMut(&DisplayConfig) -> std::result::Result<(), ConfigError>,
    {
        if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
            return Err(UiError::NotATerminal);
        }

        let mut state = PickerState::new(bookmarks, display, cwd);
        tracing::debug!(count = state.bookmarks.len(), "picker started");

        let mut terminal = Self::setup_terminal()?;
        let outcome = self.event_loop(&mut terminal, &mut state, &mut on_display_change);
        let cleanup = Self::cleanup_terminal(&mut terminal);

        let chosen = outcome?;
        cleanup?;
        tracing::debug!(chosen = ?chosen.as_ref().map(|r| &r.id), "picker finished");
        Ok(chosen)
    }

    fn event_loop<F>(
        &self,
        terminal: &mut PickerTerminal,
        state: &mut PickerState,
        on_display_change: &mut F,
    ) -> Result<Option<BookmarkRecord>>
    where
        F: FnMut(&DisplayConfig) -> std::result::Result<(), ConfigError>,
    {
        loop {
            terminal.draw(|frame| {
                let area = frame.area();
                let layout = layout::compute(state, area.width, area.height);
                frame.render_widget(PickerFrame::new(&layout, &self.theme), area);
                state.scroll_offset = layout.scroll_offset;
                state.hits = layout.hits;
            })?;

            let event = term_event::read()?;
            match events::handle_event(state, &event) {
                EventResult::Continue | EventResult::Ignored => {}
                EventResult::Select(record) => return Ok(Some(record)),
                EventResult::Cancel => return Ok(None),
                EventResult::DeleteConfirmed(id) => self.delete(state, &id),
                EventResult::DisplayChanged => {
                    if let Err(e) = on_display_change(&state.display) {
                        tracing::warn!(error = %e, "failed to save display settings");
                        state.set_notice(NoticeLevel::Error, format!("Could not save settings: {e}"));
                    }
                }
            }
        }
    }

    fn delete(&self, state: &mut PickerState, id: &str) {
        match self.store.delete(id) {
            Ok(record) => {
                state.set_notice(NoticeLevel::Success, format!("Deleted '{}'", record.alias));
                state.remove_bookmark(id);
            }
            Err(StoreError::NotFound(_)) => {
                tracing::warn!(id, "bookmark already missing from store, dropping it from the list");
                state.set_notice(NoticeLevel::Warning, "Bookmark was already removed");
                state.remove_bookmark(id);
            }
            Err(e) => {
                tracing::error!(id, error = %e, "failed to delete bookmark");
                state.set_notice(NoticeLevel::Error, format!("Delete failed: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestStore;
    use crate::ui::picker::state::Mode;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(state: &mut PickerState, code: KeyCode) -> EventResult {
        events::handle_key(state, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_confirmed_delete_removes_from_store_and_view() {
        let test_store = TestStore::with_records(&[
            BookmarkRecord::new("000000000001", "a", "/a", 1),
            BookmarkRecord::new("000000000002", "b", "/b", 2),
        ]);
        let picker = Picker::new(test_store.store());
        let mut state =
            PickerState::new(test_store.store().load(), DisplayConfig::default(), PathBuf::from("/"));

        press(&mut state, KeyCode::Char('d'));
        let EventResult::DeleteConfirmed(id) = press(&mut state, KeyCode::Enter) else {
            panic!("Expected DeleteConfirmed");
        };
        picker.delete(&mut state, &id);

        assert_eq!(state.view.len(), 1);
        assert_eq!(state.mode, Mode::Browse);
        assert_eq!(state.notice.as_ref().unwrap().level, NoticeLevel::Success);
        assert!(!test_store.store().load().contains("000000000001"));
    }

    #[test]
    fn test_delete_of_missing_record_still_drops_it() {
        let test_store = TestStore::new();
        let picker = Picker::new(test_store.store());
        let bookmarks: Bookmarks = [BookmarkRecord::new("000000000009", "ghost", "/g", 1)]
            .into_iter()
            .collect();
        let mut state = PickerState::new(bookmarks, DisplayConfig::default(), PathBuf::from("/"));

        picker.delete(&mut state, "000000000009");

        assert!(state.view.is_empty());
        assert_eq!(state.selected, None);
        assert_eq!(state.notice.as_ref().unwrap().level, NoticeLevel::Warning);
    }
}
