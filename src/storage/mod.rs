// Storage module - signal logs and saved block state
//
// Signal logs use JSON Lines (one JSON object per line), so a session can be
// replayed or inspected with standard tools:
//
//   jq 'select(.block == "frequency") | .value' logs/spinwheel-20251127-143022.jsonl
//
// Each session gets its own file: spinwheel-YYYYMMDD-HHMMSS.jsonl

mod state;

pub use state::StateStore;

use crate::events::WidgetEvent;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::mpsc::{self, error::TrySendError};

/// Queue depth between the front-end and the signal log writer
pub const CHANNEL_CAPACITY: usize = 1000;

/// Front-end side of the signal log; a no-op when logging is disabled
#[derive(Debug, Clone, Default)]
pub struct SignalSink {
    tx: Option<mpsc::Sender<WidgetEvent>>,
}

impl SignalSink {
    pub fn new(tx: mpsc::Sender<WidgetEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    /// Queue an event for the writer without waiting
    ///
    /// Events are dropped (with a warning) if the writer falls behind.
    pub fn send(&self, event: WidgetEvent) {
        let Some(tx) = &self.tx else {
            return;
        };
        if let Err(e) = tx.try_send(event) {
            let reason = match &e {
                TrySendError::Full(_) => "writer behind",
                TrySendError::Closed(_) => "writer gone",
            };
            let dropped = e.into_inner();
            tracing::warn!(block = dropped.block(), reason, "Signal log dropped an event");
        }
    }

    /// Close the channel so the writer can finish
    pub fn close(&mut self) {
        self.tx = None;
    }
}

/// Writes widget events to a JSON Lines file
pub struct Storage {
    log_dir: PathBuf,
    session_id: String,
    event_rx: mpsc::Receiver<WidgetEvent>,
}

impl Storage {
    /// Create a new storage handler
    /// Each session gets its own log file based on session_id
    pub fn new(
        log_dir: PathBuf,
        session_id: String,
        event_rx: mpsc::Receiver<WidgetEvent>,
    ) -> Result<Self> {
        fs::create_dir_all(&log_dir).context("Failed to create signal log directory")?;

        Ok(Self {
            log_dir,
            session_id,
            event_rx,
        })
    }

    /// Format: spinwheel-YYYYMMDD-HHMMSS.jsonl
    pub fn log_file_path(&self) -> PathBuf {
        self.log_dir
            .join(format!("spinwheel-{}.jsonl", self.session_id))
    }

    /// Write events as they arrive until every sender is dropped
    pub async fn run(mut self) -> Result<()> {
        tracing::info!("Signal log: {:?}", self.log_file_path());

        while let Some(event) = self.event_rx.recv().await {
            if let Err(e) = self.write_event(&event) {
                // Keep going; one bad write shouldn't end the log
                tracing::error!("Failed to write event: {:?}", e);
            }
        }

        tracing::debug!("Signal log closed");
        Ok(())
    }

    fn write_event(&self, event: &WidgetEvent) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.log_file_path())
            .context("Failed to open signal log")?;

        let json = serde_json::to_string(event).context("Failed to serialize event")?;
        writeln!(file, "{}", json).context("Failed to write to signal log")?;

        // Flush immediately so the log survives a crash
        file.flush().context("Failed to flush signal log")?;

        Ok(())
    }
}
