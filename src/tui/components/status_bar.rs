// Status bar component
//
// Uptime, signal count and the most recent event, with the focused block's
// key hints on the right.

use crate::events::WidgetEvent;
use crate::tui::app::App;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let last = match &app.last_event {
        Some(event @ WidgetEvent::CallFailed { .. }) => {
            Span::styled(event.summary(), theme.error_style())
        }
        Some(event) => Span::styled(event.summary(), theme.status_style()),
        None => Span::styled("waiting for signals", theme.status_style()),
    };

    let left = Line::from(vec![
        Span::styled(
            format!(" {} │ ⚡ {} │ ", app.uptime(), app.signal_count),
            theme.status_style(),
        ),
        last,
    ]);

    let focus = match app.focus_hint() {
        Some((title, Some(hint))) => format!("[{}] {}  ", title, hint),
        Some((title, None)) => format!("[{}]  ", title),
        None => String::new(),
    };
    let right = Line::from(format!("{}Tab focus  t theme  q quit ", focus)).right_aligned();

    let block = Block::default().borders(Borders::TOP);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [left_area, right_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(inner);
    f.render_widget(Paragraph::new(left), left_area);
    f.render_widget(Paragraph::new(right).style(theme.base_style()), right_area);
}
