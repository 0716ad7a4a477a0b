// Theme system for the TUI
//
// Each theme defines colors for the block chrome, the digit cells and the
// logs panel. Selected with `theme = "..."` in the config file.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

use crate::indicator::PendingDirection;

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
    Nord,
}

impl ThemeKind {
    pub fn all() -> &'static [ThemeKind] {
        &[ThemeKind::Dark, ThemeKind::Light, ThemeKind::Nord]
    }

    /// Get the next theme in the cycle
    pub fn next(self) -> Self {
        let themes = Self::all();
        let current = themes.iter().position(|&t| t == self).unwrap_or(0);
        themes[(current + 1) % themes.len()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
            ThemeKind::Nord => "Nord",
        }
    }

    /// Case-insensitive lookup by display name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
            ThemeKind::Nord => Theme::nord(),
        }
    }
}

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub fg: Color,
    pub border: Color,
    pub border_focused: Color,

    // Title and status
    pub title: Color,
    pub status_bar: Color,
    pub error: Color,

    // Digit cells
    pub digit: Color,
    pub digit_dimmed: Color,
    pub digit_inactive: Color,
    pub digit_focused_bg: Color,
    pub pending_up: Color,
    pub pending_down: Color,

    // Slider and text entry
    pub slider_fill: Color,
    pub slider_track: Color,
    pub dirty_bg: Color,

    // Log levels
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
    pub log_trace: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

// Hover highlights carried over from the desktop widget's style sheets
const PINK: Color = Color::Rgb(255, 153, 153);
const LIGHT_BLUE: Color = Color::Rgb(153, 204, 255);

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            fg: Color::White,
            border: Color::Gray,
            border_focused: Color::Cyan,

            title: Color::Cyan,
            status_bar: Color::Green,
            error: Color::Red,

            digit: Color::White,
            digit_dimmed: Color::DarkGray,
            digit_inactive: Color::DarkGray,
            digit_focused_bg: Color::Rgb(60, 60, 60),
            pending_up: PINK,
            pending_down: LIGHT_BLUE,

            slider_fill: Color::Cyan,
            slider_track: Color::DarkGray,
            dirty_bg: PINK,

            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Blue,
            log_debug: Color::Gray,
            log_trace: Color::DarkGray,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            fg: Color::Black,
            border: Color::DarkGray,
            border_focused: Color::Blue,

            title: Color::Blue,
            status_bar: Color::DarkGray,
            error: Color::Red,

            digit: Color::Black,
            digit_dimmed: Color::Gray,
            digit_inactive: Color::Gray,
            digit_focused_bg: Color::Rgb(220, 220, 220),
            pending_up: PINK,
            pending_down: LIGHT_BLUE,

            slider_fill: Color::Blue,
            slider_track: Color::Gray,
            dirty_bg: PINK,

            log_error: Color::Red,
            log_warn: Color::Rgb(184, 134, 11), // Dark goldenrod
            log_info: Color::Blue,
            log_debug: Color::DarkGray,
            log_trace: Color::Gray,
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            fg: Color::Rgb(236, 239, 244),
            border: Color::Rgb(76, 86, 106),
            border_focused: Color::Rgb(136, 192, 208), // Frost

            title: Color::Rgb(136, 192, 208),
            status_bar: Color::Rgb(163, 190, 140), // Green
            error: Color::Rgb(191, 97, 106),

            digit: Color::Rgb(236, 239, 244),
            digit_dimmed: Color::Rgb(76, 86, 106),
            digit_inactive: Color::Rgb(59, 66, 82),
            digit_focused_bg: Color::Rgb(67, 76, 94),
            pending_up: PINK,
            pending_down: LIGHT_BLUE,

            slider_fill: Color::Rgb(129, 161, 193),
            slider_track: Color::Rgb(59, 66, 82),
            dirty_bg: PINK,

            log_error: Color::Rgb(191, 97, 106),
            log_warn: Color::Rgb(235, 203, 139),
            log_info: Color::Rgb(129, 161, 193),
            log_debug: Color::Rgb(76, 86, 106),
            log_trace: Color::Rgb(59, 66, 82),
        }
    }

    // Helper methods for creating styles

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    pub fn status_style(&self) -> Style {
        Style::default().fg(self.status_bar)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    /// Arrow color for a digit cell's hover state
    pub fn pending_style(&self, pending: PendingDirection, up: bool) -> Style {
        match (pending, up) {
            (PendingDirection::Up, true) => Style::default().fg(self.pending_up),
            (PendingDirection::Down, false) => Style::default().fg(self.pending_down),
            _ => Style::default().fg(self.digit_dimmed),
        }
    }

    /// Digit text style from a cell's presentation flags
    pub fn digit_style(&self, dimmed: bool, active: bool, focused: bool) -> Style {
        let fg = if !active {
            self.digit_inactive
        } else if dimmed {
            self.digit_dimmed
        } else {
            self.digit
        };
        let style = Style::default().fg(fg).add_modifier(Modifier::BOLD);
        if focused {
            style.bg(self.digit_focused_bg)
        } else {
            style
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_cycle_wraps() {
        assert_eq!(ThemeKind::Dark.next(), ThemeKind::Light);
        assert_eq!(ThemeKind::Nord.next(), ThemeKind::Dark);
    }

    #[test]
    fn test_from_name_ignores_case() {
        assert_eq!(ThemeKind::from_name("nord"), Some(ThemeKind::Nord));
        assert_eq!(ThemeKind::from_name("LIGHT"), Some(ThemeKind::Light));
        assert_eq!(ThemeKind::from_name("monokai"), None);
    }

    #[test]
    fn test_pending_highlight_colors() {
        let theme = Theme::dark();
        assert_eq!(
            theme.pending_style(PendingDirection::Up, true).fg,
            Some(Color::Rgb(255, 153, 153))
        );
        assert_eq!(
            theme.pending_style(PendingDirection::Down, false).fg,
            Some(Color::Rgb(153, 204, 255))
        );
        // Hovering the upper half leaves the lower arrow neutral
        assert_eq!(
            theme.pending_style(PendingDirection::Up, false).fg,
            Some(theme.digit_dimmed)
        );
    }
}
