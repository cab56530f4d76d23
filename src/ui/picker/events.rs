//! Event handling for the picker
//!
//! Maps keyboard and mouse events onto [`PickerState`] transitions.

use super::state::{Control, Hit, Mode, PickerState};
use crate::store::BookmarkRecord;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Result of handling an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running the event loop
    Continue,
    /// No action taken
    Ignored,
    /// Exit with the chosen record
    Select(BookmarkRecord),
    /// Exit without a choice
    Cancel,
    /// The user confirmed deleting this id; the caller deletes it from the store
    DeleteConfirmed(String),
    /// Display settings changed and should be persisted
    DisplayChanged,
}

/// Handle one terminal event
pub fn handle_event(state: &mut PickerState, event: &Event) -> EventResult {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(state, *key),
        Event::Mouse(mouse) => handle_mouse(state, *mouse),
        // The next draw lays out for the new size
        Event::Resize(..) => EventResult::Continue,
        _ => EventResult::Ignored,
    }
}

fn is_plain_char(key: KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            Some(c)
        }
        _ => None,
    }
}

/// Handle a key press
pub fn handle_key(state: &mut PickerState, key: KeyEvent) -> EventResult {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return EventResult::Cancel;
    }

    state.notice = None;

    let result = match state.mode {
        Mode::Browse | Mode::PostSearch => handle_list_mode(state, key),
        Mode::Search => handle_search_mode(state, key),
        Mode::ConfirmDelete => handle_confirm_mode(state, key),
    };

    if result != EventResult::Ignored {
        tracing::debug!(mode = ?state.mode, key = ?key.code, "picker key handled");
    }
    result
}

/// Browse and `PostSearch` share every binding except `q`/escape and `s`
fn handle_list_mode(state: &mut PickerState, key: KeyEvent) -> EventResult {
    let in_results = state.mode == Mode::PostSearch;

    match key.code {
        KeyCode::Char('q') if in_results => {
            state.clear_search();
            EventResult::Continue
        }
        KeyCode::Esc if in_results => {
            state.clear_search();
            EventResult::Continue
        }
        KeyCode::Char('q') => EventResult::Cancel,
        KeyCode::Char('s') => {
            state.enter_search(!in_results);
            EventResult::Continue
        }
        KeyCode::Char('d') | KeyCode::Backspace => {
            if state.request_delete() {
                EventResult::Continue
            } else {
                EventResult::Ignored
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.move_up();
            EventResult::Continue
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.move_down();
            EventResult::Continue
        }
        KeyCode::Home => {
            state.jump_to_start();
            EventResult::Continue
        }
        KeyCode::End => {
            state.jump_to_end();
            EventResult::Continue
        }
        KeyCode::Enter => state
            .selected_record()
            .cloned()
            .map_or(EventResult::Ignored, EventResult::Select),
        _ => match is_plain_char(key).and_then(Control::from_key) {
            Some(control) => {
                state.apply_control(control);
                EventResult::DisplayChanged
            }
            None => EventResult::Ignored,
        },
    }
}

fn handle_search_mode(state: &mut PickerState, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Enter => {
            state.commit_search();
            EventResult::Continue
        }
        KeyCode::Esc => {
            state.clear_search();
            EventResult::Continue
        }
        KeyCode::Backspace => {
            state.pop_query();
            EventResult::Continue
        }
        _ => match is_plain_char(key) {
            Some(c) => {
                state.push_query(c);
                EventResult::Continue
            }
            None => EventResult::Ignored,
        },
    }
}

fn handle_confirm_mode(state: &mut PickerState, key: KeyEvent) -> EventResult {
    if key.code == KeyCode::Enter
        && let Some(pending) = state.confirm_delete()
    {
        return EventResult::DeleteConfirmed(pending.id);
    }

    state.cancel_delete();
    EventResult::Continue
}

/// Handle mouse clicks and the scroll wheel
pub fn handle_mouse(state: &mut PickerState, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match state.hits.hit_test(mouse.column, mouse.row) {
            Some(Hit::Row(index)) if matches!(state.mode, Mode::Browse | Mode::PostSearch) => {
                state.select(index);
                state
                    .selected_record()
                    .cloned()
                    .map_or(EventResult::Ignored, EventResult::Select)
            }
            Some(Hit::Control(control)) if state.mode != Mode::ConfirmDelete => {
                state.notice = None;
                state.apply_control(control);
                EventResult::DisplayChanged
            }
            _ => EventResult::Ignored,
        },
        MouseEventKind::ScrollUp if matches!(state.mode, Mode::Browse | Mode::PostSearch) => {
            state.move_up();
            EventResult::Continue
        }
        MouseEventKind::ScrollDown if matches!(state.mode, Mode::Browse | Mode::PostSearch) => {
            state.move_down();
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}
