//! Color theme for the picker
//!
//! Uses 256-color palette indexes so the picker looks the same on any
//! terminal that supports them.

use super::layout::{CellRole, Tone};
use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the picker
#[derive(Debug, Clone)]
pub struct Theme {
    pub border: Color,
    pub header: Color,
    /// Control labels in the footer
    pub controls: Color,
    /// `Command: cd ...` and the search prompt
    pub action: Color,
    pub warning: Color,
    pub success: Color,
    pub alias: Color,
    pub id: Color,
    pub path: Color,
    /// Path separators
    pub slash: Color,
    pub created: Color,
    pub dimmed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::candy()
    }
}

impl Theme {
    /// Bright default palette
    #[must_use]
    pub const fn candy() -> Self {
        Self {
            border: Color::Indexed(46),
            header: Color::Indexed(255),
            controls: Color::Indexed(226),
            action: Color::Indexed(200),
            warning: Color::Indexed(196),
            success: Color::Indexed(46),
            alias: Color::Indexed(196),
            id: Color::Indexed(21),
            path: Color::Indexed(46),
            slash: Color::Indexed(226),
            created: Color::Indexed(201),
            dimmed: Color::Indexed(244),
        }
    }

    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    #[must_use]
    pub fn header_style(&self) -> Style {
        Style::default().fg(self.header).add_modifier(Modifier::BOLD)
    }

    /// Style for a list cell
    #[must_use]
    pub fn cell_style(&self, role: CellRole) -> Style {
        let color = match role {
            CellRole::Alias => self.alias,
            CellRole::Id => self.id,
            CellRole::Path => self.path,
            CellRole::Created => self.created,
        };
        Style::default().fg(color)
    }

    #[must_use]
    pub fn slash_style(&self) -> Style {
        Style::default().fg(self.slash)
    }

    /// Applied on top of a row's cell styles
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }

    #[must_use]
    pub fn controls_style(&self) -> Style {
        Style::default().fg(self.controls)
    }

    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }

    #[must_use]
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning).add_modifier(Modifier::BOLD)
    }

    /// Style for the action line
    #[must_use]
    pub fn tone_style(&self, tone: Tone) -> Style {
        match tone {
            Tone::Command | Tone::Prompt => Style::default().fg(self.action),
            Tone::Success => Style::default().fg(self.success),
            Tone::Warning | Tone::Error => self.warning_style(),
        }
    }
}
