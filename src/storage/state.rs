// Saved block state - one JSON object keyed by block id
//
// Written on exit, read back on start. Writes go through a temp file and a
// rename so a crash mid-write never leaves a truncated state file.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved states, or `None` when nothing has been saved yet
    pub fn load(&self) -> Result<Option<Map<String, Value>>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read state file {}", self.path.display()))
            }
        };

        let states = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid state file {}", self.path.display()))?;
        Ok(Some(states))
    }

    pub fn save(&self, states: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("Failed to create state directory")?;
            }
        }

        let json = serde_json::to_string_pretty(states).context("Failed to serialize state")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).context("Failed to write state file")?;
        fs::rename(&tmp, &self.path).context("Failed to replace state file")?;

        tracing::debug!(blocks = states.len(), path = %self.path.display(), "state saved");
        Ok(())
    }
}
