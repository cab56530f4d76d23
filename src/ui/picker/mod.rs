//! Interactive bookmark picker
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  events   ┌──────────────┐
//! │  crossterm   │ ────────▶ │ PickerState  │
//! └──────────────┘           └──────┬───────┘
//!                                   │ layout::compute
//!                                   ▼
//!                            ┌──────────────┐  render   ┌──────────┐
//!                            │ FrameLayout  │ ────────▶ │ ratatui  │
//!                            └──────────────┘           └──────────┘
//! ```
//!
//! # Keys
//!
//! - **Browse**: `j`/`k` or arrows move (wrapping), `enter` picks, `s` searches,
//!   `d`/backspace deletes, `q` quits
//! - **Search**: type to filter by alias, `enter` keeps the result, `esc` drops it
//! - **Results**: like Browse but movement stops at the ends, `s` edits the
//!   query, `q`/`esc` returns to the full list
//! - **Anywhere**: `n`/`t`/`p`/`o`/`l` toggle the id column, the created
//!   column, the path mode, the sort field and the sort order (in Search only
//!   by clicking their labels)

pub mod events;
pub mod frame;
pub mod layout;
pub mod state;
pub mod theme;
mod finder;

pub use finder::Picker;
pub use state::{Mode, PickerState};
pub use theme::Theme;
