//! Core component trait - the foundation of the UI system
//!
//! Every block that can be drawn implements `Component`.

use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    text::Span,
    widgets::{Block, Borders},
    Frame,
};

/// Immutable context passed to components during rendering
///
/// Components only see what they need - no access to mutable app state.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Color theme for styling
    pub theme: &'a Theme,

    /// Whether this component currently has keyboard focus
    pub focused: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a Theme, focused: bool) -> Self {
        Self { theme, focused }
    }

    /// Bordered frame with the block title, highlighted when focused
    pub fn frame<'t>(&self, title: &'t str) -> Block<'t> {
        let border = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        };

        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(
                format!(" {} ", title),
                self.theme.title_style(),
            ))
    }
}

/// Base trait for all UI components
///
/// A component is anything that can render itself to the terminal.
pub trait Component {
    /// Render the component to the given area
    ///
    /// # Arguments
    ///
    /// * `f` - The frame to render to
    /// * `area` - The rectangular area allocated for this component
    /// * `ctx` - Immutable render context (theme, focus)
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext);

    /// Rows this component wants, borders included
    fn height(&self) -> u16;
}
