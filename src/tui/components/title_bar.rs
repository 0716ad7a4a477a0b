// Title bar component
//
// App name, the loaded design and how many blocks it hosts.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let text = format!(
        " ◉ spinwheel ──── {} ({} blocks)",
        app.design_name,
        app.blocks.len()
    );

    let title = Paragraph::new(text).style(app.theme.title_style()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.title))
            .title_top(Line::from(format!(" {} ", app.theme_kind.name())).right_aligned()),
    );

    f.render_widget(title, area);
}
