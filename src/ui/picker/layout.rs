//! Frame layout for the picker
//!
//! [`compute`] turns the session state and the terminal size into positioned
//! text. It does no drawing, so the whole screen can be checked in tests.
//!
//! ```text
//! 0  ╭──────────────────────────────╮
//! 1  │ Current directory: /home/u   │
//! 2  │──────────────────────────────│
//! 3  │ ALIAS  ID  PATH  CREATED AT  │
//! 4  │──────────────────────────────│
//! 5  │ rows ...                     │
//!    │                              │
//! -5 │──────────────────────────────│
//! -4 │ n=id:on t=created:on ...     │
//! -3 │──────────────────────────────│
//! -2 │ Command: cd /home/u/proj     │
//! -1 ╰──────────────────────────────╯
//! ```

use super::state::{Control, ControlHit, HitMap, Mode, NoticeLevel, PickerState, RowHit};
use crate::config::{DisplayConfig, PathDisplayMode};
use crate::store::BookmarkRecord;
use chrono::{Local, TimeZone};

pub const MIN_WIDTH: u16 = 30;
pub const MIN_HEIGHT: u16 = 12;

const MIN_ALIAS_WIDTH: usize = 5;
const MIN_ID_WIDTH: usize = 2;
const MIN_PATH_WIDTH: usize = 4;
const COLUMN_GAP: usize = 2;

const CONTENT_X: u16 = 2;
const TITLE_Y: u16 = 1;
const HEADER_Y: u16 = 3;
const LIST_Y: u16 = 5;
/// Rows taken by everything except the list
const CHROME_HEIGHT: u16 = 10;

const EMPTY_MESSAGE: &str = "No matching directories found.";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRole {
    Alias,
    Id,
    Path,
    Created,
}

/// Positioned text; `x` and `y` are relative to the frame's top-left corner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub x: u16,
    pub text: String,
    pub role: CellRole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    pub y: u16,
    /// Index into the active view
    pub index: usize,
    pub selected: bool,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlLabel {
    pub x: u16,
    pub text: String,
    pub control: Control,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Command,
    Prompt,
    Warning,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionLine {
    pub text: String,
    pub tone: Tone,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLayout {
    pub width: u16,
    pub height: u16,
    /// The terminal is below the minimum size; nothing else is laid out
    pub too_small: bool,
    pub title: String,
    /// Y positions of the horizontal rules
    pub rules: Vec<u16>,
    pub header: Vec<Cell>,
    pub header_y: u16,
    pub rows: Vec<RowLayout>,
    pub empty_message: Option<(u16, &'static str)>,
    pub controls_y: u16,
    pub controls: Vec<ControlLabel>,
    /// Key hints for the current mode, after the control labels
    pub hint: Option<(u16, String)>,
    pub action_y: u16,
    pub action: ActionLine,
    /// Scroll offset that keeps the selection visible
    pub scroll_offset: usize,
    pub hits: HitMap,
}

/// Shorten a path for display
///
/// Segments are the non-empty pieces between `/`. Medium keeps the first two
/// and last two segments when there are more than four; short keeps the first
/// and last when there are more than two. A leading `/` is kept.
#[must_use]
pub fn truncate_path(path: &str, mode: PathDisplayMode) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let n = segments.len();

    let kept: Vec<&str> = match mode {
        PathDisplayMode::Medium if n > 4 => {
            vec![segments[0], segments[1], "...", segments[n - 2], segments[n - 1]]
        }
        PathDisplayMode::Short if n > 2 => vec![segments[0], "...", segments[n - 1]],
        _ => return path.to_string(),
    };

    let joined = kept.join("/");
    if path.starts_with('/') {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Local time rendering of a creation timestamp
#[must_use]
pub fn format_created(timestamp: i64) -> String {
    Local
        .timestamp_opt(timestamp, 0)
        .single()
        .map_or_else(|| "-".to_string(), |dt| dt.format(TIMESTAMP_FORMAT).to_string())
}

/// Scroll offset keeping `selected` inside a window of `visible` rows
#[must_use]
pub fn scroll_for(selected: Option<usize>, offset: usize, visible: usize, len: usize) -> usize {
    let max_offset = len.saturating_sub(visible);
    let offset = match selected {
        Some(s) if s < offset => s,
        Some(s) if visible > 0 && s >= offset + visible => s + 1 - visible,
        _ => offset,
    };
    offset.min(max_offset)
}

fn text_width(text: &str) -> usize {
    text.chars().count()
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

struct Columns {
    alias: usize,
    id: Option<usize>,
    path: usize,
    created: bool,
}

impl Columns {
    fn measure(view: &[BookmarkRecord], display: &DisplayConfig) -> Self {
        let widest = |f: &dyn Fn(&BookmarkRecord) -> usize, min: usize| {
            view.iter().map(f).max().unwrap_or(0).max(min)
        };

        Self {
            alias: widest(&|r: &BookmarkRecord| text_width(&r.alias), MIN_ALIAS_WIDTH),
            id: display
                .show_id_column
                .then(|| widest(&|r: &BookmarkRecord| text_width(&r.id), MIN_ID_WIDTH)),
            path: widest(
                &|r: &BookmarkRecord| text_width(&truncate_path(&r.path_str(), display.path_display_mode)),
                MIN_PATH_WIDTH,
            ),
            created: display.show_created_column,
        }
    }

    /// Column start positions, in `ALIAS ID PATH CREATED AT` order
    fn positions(&self) -> (u16, Option<u16>, u16, Option<u16>) {
        let mut x = usize::from(CONTENT_X);
        let alias_x = x;
        x += self.alias + COLUMN_GAP;

        let id_x = self.id.map(|width| {
            let at = x;
            x += width + COLUMN_GAP;
            at
        });

        let path_x = x;
        x += self.path + COLUMN_GAP;

        let created_x = self.created.then_some(x);

        (to_u16(alias_x), id_x.map(to_u16), to_u16(path_x), created_x.map(to_u16))
    }

    fn cells(&self, values: [&str; 4]) -> Vec<Cell> {
        let (alias_x, id_x, path_x, created_x) = self.positions();
        let [alias, id, path, created] = values;

        let mut cells = vec![Cell {
            x: alias_x,
            text: alias.to_string(),
            role: CellRole::Alias,
        }];
        if let Some(x) = id_x {
            cells.push(Cell {
                x,
                text: id.to_string(),
                role: CellRole::Id,
            });
        }
        cells.push(Cell {
            x: path_x,
            text: path.to_string(),
            role: CellRole::Path,
        });
        if let Some(x) = created_x {
            cells.push(Cell {
                x,
                text: created.to_string(),
                role: CellRole::Created,
            });
        }
        cells
    }
}

/// Label text for a control, reflecting the current setting
#[must_use]
pub fn control_label(control: Control, display: &DisplayConfig) -> String {
    let on_off = |on: bool| if on { "on" } else { "off" };
    let value = match control {
        Control::IdColumn => on_off(display.show_id_column),
        Control::CreatedColumn => on_off(display.show_created_column),
        Control::PathMode => display.path_display_mode.label(),
        Control::SortCriteria => display.sort_criteria.label(),
        Control::SortDirection => {
            if display.sort_descending {
                "desc"
            } else {
                "asc"
            }
        }
    };
    let name = match control {
        Control::IdColumn => "id",
        Control::CreatedColumn => "created",
        Control::PathMode => "path",
        Control::SortCriteria => "sort",
        Control::SortDirection => "order",
    };
    format!("{}={name}:{value}", control.key())
}

const fn mode_hint(mode: Mode) -> &'static str {
    match mode {
        Mode::Browse => "s=search  d=delete  enter=go  q=quit",
        Mode::Search => "type to filter  enter=done  esc=cancel",
        Mode::PostSearch => "s=edit  d=delete  enter=go  q=back",
        Mode::ConfirmDelete => "enter=confirm  any other key=cancel",
    }
}

fn action_line(state: &PickerState) -> ActionLine {
    if let (Mode::ConfirmDelete, Some(pending)) = (state.mode, &state.pending_delete) {
        return ActionLine {
            text: format!(
                "Delete entry '{}' ({})? [enter/q]",
                pending.alias,
                pending.path.display()
            ),
            tone: Tone::Warning,
        };
    }

    if state.mode == Mode::Search {
        return ActionLine {
            text: format!("Search: {}", state.query),
            tone: Tone::Prompt,
        };
    }

    if let Some(notice) = &state.notice {
        let tone = match notice.level {
            NoticeLevel::Success => Tone::Success,
            NoticeLevel::Warning => Tone::Warning,
            NoticeLevel::Error => Tone::Error,
        };
        return ActionLine {
            text: notice.text.clone(),
            tone,
        };
    }

    ActionLine {
        text: state
            .selected_record()
            .map(|r| format!("Command: cd {}", r.path.display()))
            .unwrap_or_default(),
        tone: Tone::Command,
    }
}

/// Lay out a frame of `width` x `height` cells
#[must_use]
pub fn compute(state: &PickerState, width: u16, height: u16) -> FrameLayout {
    let action = action_line(state);

    if width < MIN_WIDTH || height < MIN_HEIGHT {
        return FrameLayout {
            width,
            height,
            too_small: true,
            title: format!("Terminal too small ({width}x{height}), need {MIN_WIDTH}x{MIN_HEIGHT}"),
            rules: Vec::new(),
            header: Vec::new(),
            header_y: HEADER_Y,
            rows: Vec::new(),
            empty_message: None,
            controls_y: 0,
            controls: Vec::new(),
            hint: None,
            action_y: 0,
            action,
            scroll_offset: state.scroll_offset,
            hits: HitMap::default(),
        };
    }

    let visible = usize::from(height - CHROME_HEIGHT);
    let controls_y = height - 4;
    let action_y = height - 2;

    let columns = Columns::measure(&state.view, &state.display);
    let header = columns.cells(["ALIAS", "ID", "PATH", "CREATED AT"]);

    let scroll_offset = scroll_for(state.selected, state.scroll_offset, visible, state.view.len());
    let mut hits = HitMap::default();

    let rows: Vec<RowLayout> = state
        .view
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible)
        .map(|(index, record)| {
            let y = LIST_Y + to_u16(index - scroll_offset);
            let path = truncate_path(&record.path_str(), state.display.path_display_mode);
            let created = format_created(record.created_at);
            hits.rows.push(RowHit {
                y,
                x0: 1,
                x1: width - 1,
                index,
            });
            RowLayout {
                y,
                index,
                selected: state.selected == Some(index),
                cells: columns.cells([record.alias.as_str(), record.id.as_str(), path.as_str(), created.as_str()]),
            }
        })
        .collect();

    let empty_message = state.view.is_empty().then_some((LIST_Y, EMPTY_MESSAGE));

    // Hit regions stop at the right border; labels clipped away get none
    let border_x = usize::from(width - 1);
    let mut x = usize::from(CONTENT_X);
    let mut controls = Vec::with_capacity(Control::ALL.len());
    for control in Control::ALL {
        let text = control_label(control, &state.display);
        let end = x + text_width(&text);
        if state.mode != Mode::ConfirmDelete && x < border_x {
            hits.controls.push(ControlHit {
                y: controls_y,
                x0: to_u16(x),
                x1: to_u16(end.min(border_x)),
                control,
            });
        }
        controls.push(ControlLabel {
            x: to_u16(x),
            text,
            control,
        });
        x = end + COLUMN_GAP;
    }
    let hint = Some((to_u16(x), mode_hint(state.mode).to_string()));

    FrameLayout {
        width,
        height,
        too_small: false,
        title: format!("Current directory: {}", state.cwd.display()),
        rules: vec![TITLE_Y + 1, HEADER_Y + 1, height - 5, height - 3],
        header,
        header_y: HEADER_Y,
        rows,
        empty_message,
        controls_y,
        controls,
        hint,
        action_y,
        action,
        scroll_offset,
        hits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Bookmarks;
    use crate::ui::picker::state::Hit;
    use std::path::PathBuf;

    fn make_state(records: Vec<BookmarkRecord>) -> PickerState {
        let bookmarks: Bookmarks = records.into_iter().collect();
        PickerState::new(bookmarks, DisplayConfig::default(), PathBuf::from("/home/u"))
    }

    fn numbered(count: usize) -> Vec<BookmarkRecord> {
        (0..count)
            .map(|i| {
                BookmarkRecord::new(
                    format!("{i:012}"),
                    format!("dir{i}"),
                    format!("/home/u/dir{i}"),
                    1_700_000_000 + i64::try_from(i).unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn test_truncate_path_modes() {
        assert_eq!(truncate_path("/a/b/c/d/e", PathDisplayMode::Full), "/a/b/c/d/e");
        assert_eq!(truncate_path("/a/b/c/d/e", PathDisplayMode::Medium), "/a/b/.../d/e");
        assert_eq!(truncate_path("/a/b/c/d/e", PathDisplayMode::Short), "/a/.../e");
    }

    #[test]
    fn test_truncate_path_short_paths_unchanged() {
        assert_eq!(truncate_path("/a/b/c/d", PathDisplayMode::Medium), "/a/b/c/d");
        assert_eq!(truncate_path("/a/b", PathDisplayMode::Short), "/a/b");
        assert_eq!(truncate_path("/", PathDisplayMode::Short), "/");
        assert_eq!(truncate_path("rel/x/y", PathDisplayMode::Short), "rel/.../y");
    }

    #[test]
    fn test_scroll_for() {
        assert_eq!(scroll_for(Some(0), 0, 5, 20), 0);
        assert_eq!(scroll_for(Some(7), 0, 5, 20), 3);
        assert_eq!(scroll_for(Some(2), 3, 5, 20), 2);
        assert_eq!(scroll_for(Some(4), 3, 5, 20), 3);
        assert_eq!(scroll_for(None, 9, 5, 3), 0);
        assert_eq!(scroll_for(Some(19), 18, 5, 20), 15);
    }

    #[test]
    fn test_too_small() {
        let state = make_state(numbered(3));
        let layout = compute(&state, 20, 8);
        assert!(layout.too_small);
        assert!(layout.rows.is_empty());
        assert!(layout.hits.rows.is_empty());
    }

    #[test]
    fn test_column_minimums() {
        let state = make_state(vec![BookmarkRecord::new("ab", "x", "/", 0)]);
        let layout = compute(&state, 80, 20);
        let xs: Vec<u16> = layout.header.iter().map(|c| c.x).collect();
        // alias 5, id 2, path 4, each followed by a gap of 2
        assert_eq!(xs, vec![2, 9, 13, 19]);
    }

    #[test]
    fn test_hidden_columns() {
        let mut state = make_state(numbered(2));
        state.display.show_id_column = false;
        state.display.show_created_column = false;
        let layout = compute(&state, 80, 20);

        let roles: Vec<CellRole> = layout.rows[0].cells.iter().map(|c| c.role).collect();
        assert_eq!(roles, vec![CellRole::Alias, CellRole::Path]);
        assert_eq!(layout.header.len(), 2);
    }

    #[test]
    fn test_path_width_uses_truncated_path() {
        let mut state = make_state(vec![BookmarkRecord::new("id", "a", "/one/two/three/four/five", 0)]);
        state.display.show_id_column = false;
        state.display.path_display_mode = PathDisplayMode::Short;
        let layout = compute(&state, 80, 20);

        let path_cell = &layout.rows[0].cells[1];
        assert_eq!(path_cell.text, "/one/.../five");
        let created_x = layout.rows[0].cells[2].x;
        assert_eq!(usize::from(created_x - path_cell.x), "/one/.../five".len() + COLUMN_GAP);
    }

    #[test]
    fn test_rows_and_selection() {
        let mut state = make_state(numbered(3));
        state.selected = Some(1);
        let layout = compute(&state, 80, 20);

        assert_eq!(layout.rows.len(), 3);
        assert_eq!(layout.rows[0].y, LIST_Y);
        assert!(layout.rows[1].selected);
        assert!(!layout.rows[0].selected);
        assert_eq!(layout.title, "Current directory: /home/u");
        assert_eq!(layout.action.text, "Command: cd /home/u/dir1");
        assert_eq!(layout.action.tone, Tone::Command);
    }

    #[test]
    fn test_scrolls_to_keep_selection_visible() {
        let mut state = make_state(numbered(30));
        state.selected = Some(25);
        let layout = compute(&state, 80, 20);

        // 20 rows leave 10 for the list
        assert_eq!(layout.rows.len(), 10);
        assert_eq!(layout.scroll_offset, 16);
        assert_eq!(layout.rows.last().unwrap().index, 25);
        assert!(layout.rows.last().unwrap().selected);
    }

    #[test]
    fn test_empty_view_message() {
        let state = make_state(Vec::new());
        let layout = compute(&state, 60, 14);
        assert!(layout.rows.is_empty());
        assert_eq!(layout.empty_message, Some((LIST_Y, EMPTY_MESSAGE)));
        assert_eq!(layout.action.text, "");
    }

    #[test]
    fn test_action_line_precedence() {
        let mut state = make_state(numbered(2));
        state.set_notice(NoticeLevel::Success, "Deleted 'x'");
        assert_eq!(compute(&state, 80, 20).action.tone, Tone::Success);

        state.enter_search(true);
        state.push_query('d');
        let layout = compute(&state, 80, 20);
        assert_eq!(layout.action.text, "Search: d");

        state.commit_search();
        state.notice = None;
        state.request_delete();
        let layout = compute(&state, 80, 20);
        assert_eq!(layout.action.text, "Delete entry 'dir0' (/home/u/dir0)? [enter/q]");
        assert_eq!(layout.action.tone, Tone::Warning);
    }

    #[test]
    fn test_control_labels_and_hits() {
        let state = make_state(numbered(1));
        let layout = compute(&state, 100, 20);

        let texts: Vec<&str> = layout.controls.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["n=id:on", "t=created:on", "p=path:full", "o=sort:created", "l=order:asc"]
        );

        let label = &layout.controls[2];
        assert_eq!(
            layout.hits.hit_test(label.x, layout.controls_y),
            Some(Hit::Control(Control::PathMode))
        );
    }

    #[test]
    fn test_hint_follows_last_control() {
        let state = make_state(numbered(1));
        let layout = compute(&state, 100, 20);

        let last = layout.controls.last().unwrap();
        let (hint_x, hint) = layout.hint.clone().unwrap();
        assert_eq!(usize::from(hint_x), usize::from(last.x) + last.text.len() + COLUMN_GAP);
        assert_eq!(hint, "s=search  d=delete  enter=go  q=quit");
    }

    #[test]
    fn test_control_hits_stop_at_border() {
        let state = make_state(numbered(1));
        let layout = compute(&state, 40, 12);
        let y = layout.controls_y;

        // "o=sort:created" starts at 38 and runs past the border at 39
        assert_eq!(layout.hits.controls.len(), 4);
        assert_eq!(layout.hits.hit_test(38, y), Some(Hit::Control(Control::SortCriteria)));
        assert_eq!(layout.hits.hit_test(39, y), None);
        assert!(
            layout
                .hits
                .controls
                .iter()
                .all(|hit| hit.x1 <= 39 && hit.control != Control::SortDirection)
        );
    }

    #[test]
    fn test_controls_not_clickable_while_confirming() {
        let mut state = make_state(numbered(1));
        state.request_delete();
        let layout = compute(&state, 100, 20);
        assert!(layout.hits.controls.is_empty());
        assert_eq!(layout.controls.len(), 5);
    }

    #[test]
    fn test_rules_positions() {
        let state = make_state(numbered(1));
        let layout = compute(&state, 40, 12);
        assert_eq!(layout.rules, vec![2, 4, 7, 9]);
        assert_eq!(layout.controls_y, 8);
        assert_eq!(layout.action_y, 10);
    }
}
