//! Configuration for spinwheel
//!
//! Configuration is loaded in order of precedence:
//! 1. Command-line flags (highest priority)
//! 2. Environment variables
//! 3. Config file (~/.config/spinwheel/config.toml)
//! 4. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod observability;
mod persistence;
mod serialization;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use observability::{FileLogging, LogRotation, LoggingConfig};
pub use persistence::{FileSignalLog, FileState, SignalLogConfig, StateConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default redraw interval for the TUI
pub const DEFAULT_TICK_MS: u64 = 100;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Design file to load; the built-in design when unset
    pub design: Option<PathBuf>,

    /// Run without the TUI: host calls on stdin, signals on stdout
    pub headless: bool,

    /// TUI redraw interval in milliseconds
    pub tick_ms: u64,

    /// Theme name: "Dark", "Light", "Nord"
    pub theme: String,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Saved block state between runs
    pub state: StateConfig,

    /// JSON Lines log of every emitted signal
    pub signals: SignalLogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            design: None,
            headless: false,
            tick_ms: DEFAULT_TICK_MS,
            theme: "Dark".to_string(),
            logging: LoggingConfig::default(),
            state: StateConfig::default(),
            signals: SignalLogConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub design: Option<String>,
    pub headless: Option<bool>,
    pub tick_ms: Option<u64>,
    pub theme: Option<String>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,

    /// Optional [state] section
    pub state: Option<FileState>,

    /// Optional [signals] section
    pub signals: Option<FileSignalLog>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

/// "1" / "true" / "yes" (any case)
fn env_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes")
}

impl Config {
    /// Get the config file path: ~/.config/spinwheel/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// ~/.config/spinwheel
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("spinwheel"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        // Config::default().to_toml() is the template
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// A config file that exists but cannot be read or parsed ends the
    /// process with a framed error instead of silently using defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values");
                    eprintln!("    - Invalid boolean values (use true/false)");
                    eprintln!("    - Typos in section names\n");
                    eprintln!("  To reset, run `spinwheel config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        Self::from_sources(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed config file with an environment lookup
    pub(crate) fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Design: env > file > built-in
        let design = env("SPINWHEEL_DESIGN")
            .or(file.design)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        // Headless: env > file > default
        let headless = env("SPINWHEEL_HEADLESS")
            .map(|v| env_flag(&v))
            .or(file.headless)
            .unwrap_or(defaults.headless);

        // A zero tick would spin the redraw loop
        let tick_ms = file.tick_ms.filter(|&ms| ms > 0).unwrap_or(defaults.tick_ms);

        let theme = file.theme.unwrap_or(defaults.theme);

        let mut logging = LoggingConfig::from_file(file.logging);
        if let Some(level) = env("SPINWHEEL_LOG_LEVEL") {
            logging.level = level;
        }

        // State file: env path overrides, "off"/"0" disables
        let mut state = StateConfig::from_file(file.state);
        if let Some(value) = env("SPINWHEEL_STATE") {
            match value.to_lowercase().as_str() {
                "0" | "off" | "false" => state.enabled = false,
                _ => {
                    state.enabled = true;
                    state.path = PathBuf::from(value);
                }
            }
        }

        let signals = SignalLogConfig::from_file(file.signals);

        Self {
            design,
            headless,
            tick_ms,
            theme,
            logging,
            state,
            signals,
        }
    }

    /// Apply command-line flags on top of everything else
    pub fn apply_cli(&mut self, design: Option<PathBuf>, headless: bool) {
        if design.is_some() {
            self.design = design;
        }
        if headless {
            self.headless = true;
        }
    }
}
