//! Session state for the bookmark picker
//!
//! Everything the picker knows lives in one [`PickerState`] that is passed by
//! reference through layout and event handling.

use crate::config::DisplayConfig;
use crate::store::{BookmarkRecord, Bookmarks};
use crate::view;
use std::path::PathBuf;

/// Current mode of the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Full list, navigation wraps around
    #[default]
    Browse,
    /// Typing a search query
    Search,
    /// Browsing a committed search result, navigation clamps
    PostSearch,
    /// Waiting for the user to confirm a delete
    ConfirmDelete,
}

/// Delete target remembered while the confirmation prompt is shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: String,
    pub alias: String,
    pub path: PathBuf,
    /// Mode to go back to once the prompt is answered
    pub return_to: Mode,
}

/// Display controls reachable by key or by clicking their label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    IdColumn,
    CreatedColumn,
    PathMode,
    SortCriteria,
    SortDirection,
}

impl Control {
    pub const ALL: [Self; 5] = [
        Self::IdColumn,
        Self::CreatedColumn,
        Self::PathMode,
        Self::SortCriteria,
        Self::SortDirection,
    ];

    /// Key bound to this control
    #[must_use]
    pub const fn key(self) -> char {
        match self {
            Self::IdColumn => 'n',
            Self::CreatedColumn => 't',
            Self::PathMode => 'p',
            Self::SortCriteria => 'o',
            Self::SortDirection => 'l',
        }
    }

    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// One-line message shown in the action line until the next key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// What a mouse click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Index into the active view
    Row(usize),
    Control(Control),
}

/// Clickable row of the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHit {
    pub y: u16,
    pub x0: u16,
    pub x1: u16,
    pub index: usize,
}

/// Clickable control label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlHit {
    pub y: u16,
    pub x0: u16,
    pub x1: u16,
    pub control: Control,
}

/// Screen regions of the last drawn frame, used to resolve mouse clicks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    pub rows: Vec<RowHit>,
    pub controls: Vec<ControlHit>,
}

impl HitMap {
    /// Resolve a click at (`x`, `y`); the end column of each region is exclusive
    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<Hit> {
        if let Some(row) = self
            .rows
            .iter()
            .find(|r| r.y == y && (r.x0..r.x1).contains(&x))
        {
            return Some(Hit::Row(row.index));
        }

        self.controls
            .iter()
            .find(|c| c.y == y && (c.x0..c.x1).contains(&x))
            .map(|c| Hit::Control(c.control))
    }
}

/// Picker session state
#[derive(Debug, Clone)]
pub struct PickerState {
    /// Every bookmark, in store order
    pub bookmarks: Vec<BookmarkRecord>,
    /// Filtered and sorted records currently listed
    pub view: Vec<BookmarkRecord>,
    /// Search query; empty outside search
    pub query: String,
    /// Index into `view`; `None` exactly when `view` is empty
    pub selected: Option<usize>,
    pub mode: Mode,
    pub pending_delete: Option<PendingDelete>,
    pub display: DisplayConfig,
    /// First `view` index drawn in the list area
    pub scroll_offset: usize,
    pub notice: Option<Notice>,
    /// Shown in the title line
    pub cwd: PathBuf,
    pub hits: HitMap,
}

impl PickerState {
    /// Create a session over `bookmarks` with the first row selected
    #[must_use]
    pub fn new(bookmarks: Bookmarks, display: DisplayConfig, cwd: PathBuf) -> Self {
        let mut state = Self {
            bookmarks: bookmarks.into_vec(),
            view: Vec::new(),
            query: String::new(),
            selected: None,
            mode: Mode::Browse,
            pending_delete: None,
            display,
            scroll_offset: 0,
            notice: None,
            cwd,
            hits: HitMap::default(),
        };
        state.rebuild_view();
        state.select_first();
        state
    }

    /// Recompute the view from the full set, the query and the sort settings
    pub fn rebuild_view(&mut self) {
        self.view = view::active_view(
            &self.bookmarks,
            &self.query,
            self.display.sort_criteria,
            self.display.sort_descending,
        );
        self.clamp_selection();
    }

    /// Keep `selected` inside `[0, len - 1]`, or `None` for an empty view
    pub fn clamp_selection(&mut self) {
        self.selected = match self.view.len() {
            0 => None,
            len => Some(self.selected.unwrap_or(0).min(len - 1)),
        };
    }

    fn select_first(&mut self) {
        self.selected = if self.view.is_empty() { None } else { Some(0) };
        self.scroll_offset = 0;
    }

    /// Currently highlighted record
    #[must_use]
    pub fn selected_record(&self) -> Option<&BookmarkRecord> {
        self.selected.and_then(|i| self.view.get(i))
    }

    /// Move the selection up; wraps in Browse, stops at the top in `PostSearch`
    pub fn move_up(&mut self) {
        let (Some(current), len) = (self.selected, self.view.len()) else {
            return;
        };
        self.selected = Some(match (self.mode, current) {
            (Mode::Browse, 0) => len - 1,
            (_, 0) => 0,
            (_, i) => i - 1,
        });
    }

    /// Move the selection down; wraps in Browse, stops at the bottom in `PostSearch`
    pub fn move_down(&mut self) {
        let (Some(current), len) = (self.selected, self.view.len()) else {
            return;
        };
        let last = len - 1;
        self.selected = Some(match self.mode {
            Mode::Browse if current >= last => 0,
            _ if current >= last => last,
            _ => current + 1,
        });
    }

    pub fn jump_to_start(&mut self) {
        if !self.view.is_empty() {
            self.selected = Some(0);
        }
    }

    pub fn jump_to_end(&mut self) {
        if !self.view.is_empty() {
            self.selected = Some(self.view.len() - 1);
        }
    }

    /// Select a view row directly
    pub fn select(&mut self, index: usize) {
        if index < self.view.len() {
            self.selected = Some(index);
        }
    }

    /// Enter search mode, optionally starting from an empty query
    pub fn enter_search(&mut self, clear: bool) {
        self.mode = Mode::Search;
        if clear {
            self.query.clear();
            self.rebuild_view();
            self.select_first();
        }
    }

    /// Append a character to the query and re-filter
    pub fn push_query(&mut self, c: char) {
        self.query.push(c);
        self.rebuild_view();
        self.select_first();
    }

    /// Drop the last query character and re-filter
    pub fn pop_query(&mut self) {
        if self.query.pop().is_some() {
            self.rebuild_view();
            self.select_first();
        }
    }

    /// Freeze the filtered set as the active view
    pub fn commit_search(&mut self) {
        self.mode = Mode::PostSearch;
        self.clamp_selection();
    }

    /// Leave search, restoring the unfiltered view with the first row selected
    pub fn clear_search(&mut self) {
        self.mode = Mode::Browse;
        self.query.clear();
        self.rebuild_view();
        self.select_first();
    }

    /// Ask for confirmation before deleting the selected record
    ///
    /// Returns `false` when there is nothing to delete.
    pub fn request_delete(&mut self) -> bool {
        if !matches!(self.mode, Mode::Browse | Mode::PostSearch) {
            return false;
        }
        let Some(record) = self.selected_record() else {
            return false;
        };

        self.pending_delete = Some(PendingDelete {
            id: record.id.clone(),
            alias: record.alias.clone(),
            path: record.path.clone(),
            return_to: self.mode,
        });
        self.mode = Mode::ConfirmDelete;
        true
    }

    /// Accept the pending delete and return to the previous mode
    ///
    /// The caller performs the store deletion and then calls
    /// [`Self::remove_bookmark`].
    pub fn confirm_delete(&mut self) -> Option<PendingDelete> {
        let pending = self.pending_delete.take()?;
        self.mode = pending.return_to;
        Some(pending)
    }

    /// Drop the pending delete without touching anything
    pub fn cancel_delete(&mut self) {
        if let Some(pending) = self.pending_delete.take() {
            self.mode = pending.return_to;
        }
    }

    /// Remove a record from the session after it was deleted
    pub fn remove_bookmark(&mut self, id: &str) {
        self.bookmarks.retain(|r| r.id != id);
        self.view.retain(|r| r.id != id);
        self.clamp_selection();
    }

    /// Apply a display control, re-sorting when the sort order changed
    ///
    /// The selected record stays selected across a re-sort.
    pub fn apply_control(&mut self, control: Control) {
        let display = &mut self.display;
        match control {
            Control::IdColumn => display.show_id_column = !display.show_id_column,
            Control::CreatedColumn => display.show_created_column = !display.show_created_column,
            Control::PathMode => display.path_display_mode = display.path_display_mode.next(),
            Control::SortCriteria => display.sort_criteria = display.sort_criteria.next(),
            Control::SortDirection => display.sort_descending = !display.sort_descending,
        }

        if matches!(control, Control::SortCriteria | Control::SortDirection) {
            let selected_id = self.selected_record().map(|r| r.id.clone());
            self.rebuild_view();
            if let Some(id) = selected_id
                && let Some(index) = self.view.iter().position(|r| r.id == id)
            {
                self.selected = Some(index);
            }
        }
    }

    pub fn set_notice(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notice = Some(Notice {
            level,
            text: text.into(),
        });
    }
}
