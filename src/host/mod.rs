//! Block host
//!
//! Hosts named widget blocks and routes calls, signals and saved state
//! between them and the front-end.
//!
//! # Architecture
//!
//! ```text
//! design.toml ──▶ BlockRegistry::make ──▶ BlockSet ◀── CallQueue ◀── HostHandle (any thread)
//!                                            │
//!                                            │ Signals::emit
//!                                            ▼
//!                                 mpsc<WidgetEvent> ──▶ TUI / stdout ──▶ Storage
//! ```
//!
//! Everything in here runs on the UI thread. Other threads only ever hold a
//! [`HostHandle`] and never touch a block directly.

pub mod args;
pub mod design;
pub mod queue;
pub mod registry;
mod set;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::events::WidgetEvent;
use crate::tui::traits::Interactive;

pub use design::Design;
pub use queue::{call_channel, CallQueue, HostCall, HostHandle};
pub use registry::{BlockContext, BlockEntry, BlockRegistry, Setter};
pub use set::BlockSet;

/// A widget instance the host can address by id
///
/// Blocks render and take input through the TUI traits; everything else
/// goes through string-named calls so the design file, the headless stdin
/// protocol and cross-thread handles all share one entry point.
pub trait Block: Interactive {
    /// Registry path this block was created from (e.g. `/widgets/odometer`)
    fn path(&self) -> &'static str;

    fn title(&self) -> &str;

    /// Invoke a named call; setters return `Value::Null`
    fn call(&mut self, method: &str, args: &[Value]) -> Result<Value, CallError>;

    /// Current value as it appears on the wire
    fn value(&self) -> Value;

    fn save_state(&self) -> Value {
        self.value()
    }

    /// Re-apply a saved state through the block's own `setValue` path
    fn restore_state(&mut self, state: &Value) -> Result<(), CallError> {
        self.call("setValue", std::slice::from_ref(state)).map(|_| ())
    }

    /// Emit the current value; run once the design is up
    fn activate(&mut self);
}

/// Failure at the host call boundary
#[derive(Debug, Clone, PartialEq)]
pub enum CallError {
    /// No block with this id in the set
    UnknownBlock(String),
    /// No factory registered under this path
    UnknownPath(String),
    /// The block does not expose this call
    UnknownMethod { path: &'static str, method: String },
    /// Wrong number of arguments
    ArgCount {
        method: String,
        expected: usize,
        got: usize,
    },
    /// Argument could not be read as the expected JSON type
    ArgType {
        method: String,
        index: usize,
        expected: &'static str,
    },
    /// Argument had the right type but an unusable value
    InvalidArg { method: String, message: String },
    /// Two blocks in one design share an id
    DuplicateId(String),
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownBlock(id) => write!(f, "Unknown block '{}'", id),
            Self::UnknownPath(path) => write!(f, "No block registered at '{}'", path),
            Self::UnknownMethod { path, method } => {
                write!(f, "{} has no call '{}'", path, method)
            }
            Self::ArgCount {
                method,
                expected,
                got,
            } => write!(
                f,
                "{} expects {} argument(s), got {}",
                method, expected, got
            ),
            Self::ArgType {
                method,
                index,
                expected,
            } => write!(f, "{} argument {} must be {}", method, index, expected),
            Self::InvalidArg { method, message } => write!(f, "{}: {}", method, message),
            Self::DuplicateId(id) => write!(f, "Duplicate block id '{}'", id),
        }
    }
}

impl std::error::Error for CallError {}

/// Outgoing signal port handed to each block at construction
///
/// Cheap to clone; the block id travels with every emitted event.
#[derive(Debug, Clone)]
pub struct Signals {
    block: Arc<str>,
    tx: mpsc::UnboundedSender<WidgetEvent>,
}

impl Signals {
    pub fn new(block: &str, tx: mpsc::UnboundedSender<WidgetEvent>) -> Self {
        Self {
            block: Arc::from(block),
            tx,
        }
    }

    /// Emit a named signal carrying `value`
    pub fn emit(&self, signal: &str, value: Value) {
        tracing::trace!(block = %self.block, signal, %value, "signal");
        // Receiver gone means we're shutting down
        let _ = self.tx.send(WidgetEvent::signal(&self.block, signal, value));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Signal port plus the receiving end, for block tests
    pub(crate) fn signals(block: &str) -> (Signals, mpsc::UnboundedReceiver<WidgetEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Signals::new(block, tx), rx)
    }

    /// Values of every pending signal, in emission order
    pub(crate) fn drain_values(rx: &mut mpsc::UnboundedReceiver<WidgetEvent>) -> Vec<Value> {
        let mut values = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let WidgetEvent::Signal { value, .. } = event {
                values.push(value);
            }
        }
        values
    }

    #[test]
    fn test_emit_tags_block_id() {
        let (signals, mut rx) = signals("freq");
        signals.emit(crate::events::VALUE_CHANGED, Value::from(42));

        let event = rx.try_recv().unwrap();
        assert_eq!(event.block(), "freq");
        assert_eq!(drain_values(&mut rx), Vec::<Value>::new());
    }

    #[test]
    fn test_emit_after_receiver_dropped_is_silent() {
        let (signals, rx) = signals("freq");
        drop(rx);
        signals.emit("valueChanged", Value::from(1));
    }

    #[test]
    fn test_call_error_messages() {
        let err = CallError::ArgCount {
            method: "setValue".into(),
            expected: 1,
            got: 0,
        };
        assert_eq!(err.to_string(), "setValue expects 1 argument(s), got 0");

        let err = CallError::UnknownMethod {
            path: "/widgets/slider",
            method: "setSize".into(),
        };
        assert_eq!(err.to_string(), "/widgets/slider has no call 'setSize'");
    }
}
