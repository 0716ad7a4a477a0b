//! Logs panel component
//!
//! Shows the newest entries from the shared [`LogBuffer`], color-coded by
//! level. Always follows the tail.
//!
//! [`LogBuffer`]: crate::logging::LogBuffer

use crate::logging::{LogEntry, LogLevel};
use crate::tui::app::App;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let visible = usize::from(area.height.saturating_sub(2));
    let entries = app.log_buffer.recent(visible);

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            ListItem::new(format_log_entry(entry)).style(log_level_style(entry.level, &app.theme))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border))
            .title(" Logs "),
    );
    f.render_widget(list, area);
}

fn format_log_entry(entry: &LogEntry) -> String {
    // Module path without the crate prefix; crate-root events get none
    let module = entry
        .target
        .strip_prefix("spinwheel")
        .map(|rest| rest.trim_start_matches("::"))
        .unwrap_or(&entry.target);
    if module.is_empty() {
        format!(
            "{} {} {}",
            entry.timestamp.format("%H:%M:%S"),
            entry.level.as_str(),
            entry.message
        )
    } else {
        format!(
            "{} {} {}: {}",
            entry.timestamp.format("%H:%M:%S"),
            entry.level.as_str(),
            module,
            entry.message
        )
    }
}

fn log_level_style(level: LogLevel, theme: &Theme) -> Style {
    let color = match level {
        LogLevel::Error => theme.log_error,
        LogLevel::Warn => theme.log_warn,
        LogLevel::Info => theme.log_info,
        LogLevel::Debug => theme.log_debug,
        LogLevel::Trace => theme.log_trace,
    };
    Style::default().fg(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_log_entry() {
        let entry = LogEntry {
            timestamp: chrono::Utc.with_ymd_and_hms(2025, 1, 2, 13, 4, 5).unwrap(),
            level: LogLevel::Warn,
            target: "spinwheel::host".to_string(),
            message: "call failed".to_string(),
        };
        assert_eq!(format_log_entry(&entry), "13:04:05 WARN  host: call failed");

        let root = LogEntry {
            target: "spinwheel".to_string(),
            ..entry.clone()
        };
        assert_eq!(format_log_entry(&root), "13:04:05 WARN  call failed");

        let foreign = LogEntry {
            target: "tokio::runtime".to_string(),
            ..entry
        };
        assert_eq!(
            format_log_entry(&foreign),
            "13:04:05 WARN  tokio::runtime: call failed"
        );
    }
}
