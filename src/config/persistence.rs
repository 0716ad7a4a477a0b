//! Persistence configuration: saved block state and the signal log

use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Saved State
// ─────────────────────────────────────────────────────────────────────────────

/// Block state saved on exit and restored on start
#[derive(Debug, Clone, PartialEq)]
pub struct StateConfig {
    pub enabled: bool,
    /// JSON file holding `{ "<block id>": <state> }`
    pub path: PathBuf,
}

impl Default for StateConfig {
    fn default() -> Self {
        let path = super::Config::config_dir()
            .map(|dir| dir.join("state.json"))
            .unwrap_or_else(|| PathBuf::from("spinwheel-state.json"));
        Self {
            enabled: true,
            path,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileState {
    pub enabled: Option<bool>,
    pub path: Option<String>,
}

impl StateConfig {
    pub fn from_file(file: Option<FileState>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            enabled: file.enabled.unwrap_or(defaults.enabled),
            path: file.path.map(PathBuf::from).unwrap_or(defaults.path),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Signal Log
// ─────────────────────────────────────────────────────────────────────────────

/// JSON Lines log of emitted signals, one file per session
#[derive(Debug, Clone, PartialEq)]
pub struct SignalLogConfig {
    pub enabled: bool,
    pub dir: PathBuf,
}

impl Default for SignalLogConfig {
    fn default() -> Self {
        Self {
            enabled: false, // Opt-in
            dir: PathBuf::from("./logs"),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileSignalLog {
    pub enabled: Option<bool>,
    pub dir: Option<String>,
}

impl SignalLogConfig {
    pub fn from_file(file: Option<FileSignalLog>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            enabled: file.enabled.unwrap_or(defaults.enabled),
            dir: file.dir.map(PathBuf::from).unwrap_or(defaults.dir),
        }
    }
}
