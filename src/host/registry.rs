//! Block registry
//!
//! Maps registry paths to factories plus the metadata the design loader and
//! `spinwheel blocks` need: which calls a block exposes and which design
//! params map to which setters.

use serde_json::Value;

use super::{Block, CallError, Signals};

/// Design param and the setter it is applied through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setter {
    pub param: &'static str,
    pub method: &'static str,
}

impl Setter {
    pub const fn new(param: &'static str, method: &'static str) -> Self {
        Self { param, method }
    }
}

/// Everything a factory gets to build one block
pub struct BlockContext<'a> {
    pub id: &'a str,
    /// Factory arguments from the design (e.g. slider orientation)
    pub args: &'a [Value],
    pub signals: Signals,
}

pub type Factory = fn(BlockContext<'_>) -> Result<Box<dyn Block>, CallError>;

/// One registered block type
#[derive(Clone, Copy)]
pub struct BlockEntry {
    pub path: &'static str,
    pub summary: &'static str,
    /// Calls the block answers, for listings
    pub calls: &'static [&'static str],
    /// Design params in the order they are applied
    pub setters: &'static [Setter],
    pub factory: Factory,
}

impl std::fmt::Debug for BlockEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockEntry")
            .field("path", &self.path)
            .field("calls", &self.calls)
            .finish_non_exhaustive()
    }
}

/// Path → factory table, in registration order
#[derive(Debug, Default)]
pub struct BlockRegistry {
    entries: Vec<BlockEntry>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in widget block
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        crate::widgets::register_all(&mut registry);
        registry
    }

    /// Add an entry; a later registration under the same path replaces it
    pub fn register(&mut self, entry: BlockEntry) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.path == entry.path) {
            tracing::debug!(path = entry.path, "replacing registered block");
            *existing = entry;
        } else {
            self.entries.push(entry);
        }
    }

    pub fn get(&self, path: &str) -> Option<&BlockEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    pub fn entries(&self) -> &[BlockEntry] {
        &self.entries
    }

    /// Build a block instance from its registry path
    pub fn make(&self, path: &str, ctx: BlockContext<'_>) -> Result<Box<dyn Block>, CallError> {
        let entry = self
            .get(path)
            .ok_or_else(|| CallError::UnknownPath(path.to_string()))?;
        (entry.factory)(ctx)
    }
}
