//! Widget drawing a computed [`FrameLayout`]

use super::layout::{CellRole, FrameLayout};
use super::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

/// Draws one picker frame
pub struct PickerFrame<'a> {
    layout: &'a FrameLayout,
    theme: &'a Theme,
}

impl<'a> PickerFrame<'a> {
    #[must_use]
    pub const fn new(layout: &'a FrameLayout, theme: &'a Theme) -> Self {
        Self { layout, theme }
    }
}

/// Absolute position and remaining width inside the border, or `None` when
/// (`x`, `y`) falls outside it
fn clip(area: Rect, x: u16, y: u16) -> Option<(u16, u16, usize)> {
    let inner_right = area.width.saturating_sub(1);
    let inner_bottom = area.height.saturating_sub(1);
    if y == 0 || y >= inner_bottom || x == 0 || x >= inner_right {
        return None;
    }
    Some((area.x + x, area.y + y, usize::from(inner_right - x)))
}

fn put(buf: &mut Buffer, area: Rect, x: u16, y: u16, text: &str, style: Style) {
    if let Some((abs_x, abs_y, width)) = clip(area, x, y) {
        buf.set_stringn(abs_x, abs_y, text, width, style);
    }
}

/// Path text with separators in their own color
fn path_line<'t>(text: &'t str, theme: &Theme) -> Line<'t> {
    let mut spans = Vec::new();
    for (i, part) in text.split('/').enumerate() {
        if i > 0 {
            spans.push(Span::styled("/", theme.slash_style()));
        }
        if !part.is_empty() {
            spans.push(Span::styled(part, theme.cell_style(CellRole::Path)));
        }
    }
    Line::from(spans)
}

impl Widget for PickerFrame<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = self.layout;
        let theme = self.theme;

        if layout.too_small {
            Paragraph::new(layout.title.as_str())
                .style(theme.warning_style())
                .wrap(Wrap { trim: true })
                .render(area, buf);
            return;
        }

        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(theme.border_style())
            .render(area, buf);

        let rule = "─".repeat(usize::from(area.width.saturating_sub(2)));
        for &y in &layout.rules {
            put(buf, area, 1, y, &rule, theme.border_style());
        }

        put(buf, area, 2, 1, &layout.title, theme.header_style());

        for cell in &layout.header {
            put(buf, area, cell.x, layout.header_y, &cell.text, theme.header_style());
        }

        for row in &layout.rows {
            let Some((_, abs_y, _)) = clip(area, 1, row.y) else {
                continue;
            };

            for cell in &row.cells {
                if cell.role == CellRole::Path {
                    if let Some((abs_x, _, width)) = clip(area, cell.x, row.y) {
                        let line = path_line(&cell.text, theme);
                        buf.set_line(abs_x, abs_y, &line, u16::try_from(width).unwrap_or(u16::MAX));
                    }
                } else {
                    put(buf, area, cell.x, row.y, &cell.text, theme.cell_style(cell.role));
                }
            }

            if row.selected {
                let highlight = Rect::new(area.x + 1, abs_y, area.width.saturating_sub(2), 1);
                buf.set_style(highlight, theme.selected_style());
            }
        }

        if let Some((y, message)) = layout.empty_message {
            put(buf, area, 2, y, message, theme.warning_style());
        }

        for label in &layout.controls {
            put(buf, area, label.x, layout.controls_y, &label.text, theme.controls_style());
        }
        if let Some((x, hint)) = &layout.hint {
            put(buf, area, *x, layout.controls_y, hint, theme.dimmed_style());
        }

        put(
            buf,
            area,
            2,
            layout.action_y,
            &layout.action.text,
            theme.tone_style(layout.action.tone),
        );
    }
}
