//! Terminal user interface
//!
//! The interactive bookmark picker lives in [`picker`]. It is split into a
//! pure session state machine, a pure layout pass and a ratatui widget, so
//! everything except the event loop itself can be exercised without a
//! terminal.

pub mod error;
pub mod picker;

pub use error::{Result, UiError};
pub use picker::{Picker, PickerState};
