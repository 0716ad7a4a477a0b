// spinwheel - Digit-wheel numeric entry blocks in the terminal
//
// Hosts a small graph of widget blocks (odometer, digit spinner, slider,
// text entry, colored box) described by a design file, and drives them
// either from a terminal UI or headlessly over JSON Lines.
//
// Architecture:
// - Host: block registry, design loading, call queue (host calls in)
// - Widgets: the blocks themselves, built on the digit indicator
// - TUI (ratatui): renders blocks, routes keyboard and mouse input
// - Headless: host calls on stdin, events on stdout
// - Storage: optional JSON Lines signal log, saved block state
// - Event system: blocks emit WidgetEvents on an mpsc channel

mod cli;
mod config;
mod events;
mod headless;
mod host;
mod indicator;
mod logging;
mod storage;
mod tui;
mod widgets;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use config::{Config, LogRotation};
use host::{BlockRegistry, BlockSet, Design};
use logging::{LogBuffer, TuiLogLayer};
use std::time::Duration;
use storage::{SignalSink, StateStore, Storage};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tui::theme::ThemeKind;

/// Session ID for log file naming: YYYYMMDD-HHMMSS
fn generate_session_id() -> String {
    Utc::now().format("%Y%m%d-%H%M%S").to_string()
}

/// Install the global subscriber
///
/// TUI mode captures logs into `log_buffer` (stderr would garble the
/// screen); headless mode writes them to stderr, keeping stdout for events.
/// File logging adds a JSON layer on a rotating appender. The returned guard
/// must live until exit so buffered lines get flushed.
fn init_tracing(
    config: &Config,
    log_buffer: &LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("spinwheel={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (tui_layer, stderr_layer) = if config.headless {
        (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
    } else {
        (Some(TuiLogLayer::new(log_buffer.clone())), None)
    };

    let mut guard = None;
    let file_layer = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let dir = &config.logging.file_dir;
                let prefix = &config.logging.file_prefix;
                let appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(dir, prefix),
                    LogRotation::Daily => tracing_appender::rolling::daily(dir, prefix),
                    LogRotation::Never => tracing_appender::rolling::never(dir, prefix),
                };
                let (non_blocking, file_guard) = tracing_appender::non_blocking(appender);
                guard = Some(file_guard);
                Some(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                None
            }
        }
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// Load the configured design, falling back to the built-in one
fn load_design(config: &Config) -> Result<(Design, String)> {
    match &config.design {
        Some(path) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok((Design::load(path)?, name))
        }
        None => Ok((Design::builtin()?, "built-in".to_string())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // config --show, blocks, ... exit early
    if cli::handle_command(&cli) {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();
    config.apply_cli(cli.design.clone(), cli.headless);

    let log_buffer = LogBuffer::with_capacity(config.logging.buffer_lines);
    let _file_guard = init_tracing(&config, &log_buffer);

    let session_id = generate_session_id();
    tracing::debug!("Session ID: {}", session_id);

    // Blocks
    let (design, design_name) = load_design(&config)?;
    let registry = BlockRegistry::with_builtin();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut blocks = BlockSet::build(&registry, &design, event_tx)
        .with_context(|| format!("Failed to build design {}", design_name))?;
    tracing::info!("Loaded {} blocks from {}", blocks.len(), design_name);

    let state_store = config
        .state
        .enabled
        .then(|| StateStore::new(config.state.path.clone()));
    if let Some(store) = &state_store {
        match store.load() {
            Ok(Some(states)) => blocks.restore_states(&states),
            Ok(None) => {}
            Err(e) => tracing::warn!("Ignoring saved state: {:#}", e),
        }
    }

    // Announce initial values so listeners start in sync
    blocks.activate_all();

    // Signal log writer (if enabled)
    let (mut sink, storage_handle) = if config.signals.enabled {
        let (tx, rx) = mpsc::channel(storage::CHANNEL_CAPACITY);
        let storage = Storage::new(config.signals.dir.clone(), session_id.clone(), rx)?;
        (SignalSink::new(tx), Some(tokio::spawn(storage.run())))
    } else {
        (SignalSink::disabled(), None)
    };

    let (handle, mut queue) = host::call_channel();

    let (result, blocks) = if config.headless {
        let result =
            headless::run_headless(&mut blocks, handle, &mut queue, &mut event_rx, &sink).await;
        (result, blocks)
    } else {
        // The TUI has no external callers; only its own handle keeps the queue open
        let _handle = handle;
        let theme_kind = ThemeKind::from_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!("Unknown theme {:?}, using Dark", config.theme);
            ThemeKind::Dark
        });
        let mut app = tui::app::App::new(blocks, log_buffer, theme_kind)
            .with_design_name(design_name);
        let result = tui::run_tui(
            &mut app,
            &mut queue,
            &mut event_rx,
            &sink,
            Duration::from_millis(config.tick_ms),
        )
        .await;
        (result, app.blocks)
    };

    // Shutdown: persist state, then let the signal log drain
    if let Some(store) = &state_store {
        match store.save(&blocks.save_states()) {
            Ok(()) => tracing::debug!("Saved block state to {:?}", store.path()),
            Err(e) => tracing::warn!("Failed to save block state: {:#}", e),
        }
    }

    sink.close();
    if let Some(handle) = storage_handle {
        match handle.await {
            Ok(Err(e)) => tracing::error!("Signal log failed: {:#}", e),
            Err(e) => tracing::error!("Signal log task panicked: {}", e),
            Ok(Ok(())) => {}
        }
    }

    result
}
