// Components module - the shell drawn around the hosted blocks
//
// - Title bar: app name, design, block count
// - Logs panel: captured tracing output
// - Status bar: uptime, signal count, last event, focus hints

pub mod logs_panel;
pub mod status_bar;
pub mod title_bar;
