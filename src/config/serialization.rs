//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;
use std::path::Path;

/// Quoted TOML string for a path
fn toml_path(path: &Path) -> String {
    format!("{:?}", path.display().to_string())
}

impl Config {
    /// Serialize config to TOML format
    ///
    /// Used both for `spinwheel config --show` and for writing the initial
    /// config file.
    pub fn to_toml(&self) -> String {
        let design = match &self.design {
            Some(path) => format!("design = {}", toml_path(path)),
            None => "# design = \"/path/to/design.toml\"".to_string(),
        };

        format!(
            r#"# spinwheel configuration

# Design file describing the hosted blocks (built-in design when unset)
{design}

# Run without the TUI: host calls as JSON lines on stdin, signals on stdout
headless = {headless}

# TUI redraw interval in milliseconds
tick_ms = {tick_ms}

# Theme: Dark, Light, Nord
theme = "{theme}"

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# Lines kept for the TUI logs panel
buffer_lines = {log_buffer_lines}
# JSON file logging (in addition to the TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"

# Block state saved on exit and restored on start
[state]
enabled = {state_enabled}
path = {state_path}

# JSON Lines log of every emitted signal, one file per session
[signals]
enabled = {signals_enabled}
dir = {signals_dir}
"#,
            design = design,
            headless = self.headless,
            tick_ms = self.tick_ms,
            theme = self.theme,
            log_level = self.logging.level,
            log_buffer_lines = self.logging.buffer_lines,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = toml_path(&self.logging.file_dir),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
            state_enabled = self.state.enabled,
            state_path = toml_path(&self.state.path),
            signals_enabled = self.signals.enabled,
            signals_dir = toml_path(&self.signals.dir),
        )
    }
}
