// Events that flow from the blocks to the front-end and storage
//
// Blocks never talk to the outside world directly: every signal they emit,
// every call result and every failed call becomes a WidgetEvent on an
// unbounded channel.
// The front-end (TUI or headless) drains that channel on the UI thread and
// forwards each event to storage when signal logging is enabled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Signal name every value-carrying block emits
pub const VALUE_CHANGED: &str = "valueChanged";

/// Main event type emitted by the block host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")] // {"type": "signal", ...}
pub enum WidgetEvent {
    /// A block emitted a signal to the host graph
    Signal {
        block: String,
        signal: String,
        value: Value,
        timestamp: DateTime<Utc>,
    },

    /// A host call returned a value (e.g. `value`)
    Reply {
        block: String,
        method: String,
        value: Value,
        timestamp: DateTime<Utc>,
    },

    /// A host call could not be applied
    CallFailed {
        block: String,
        method: String,
        message: String,
        timestamp: DateTime<Utc>,
    },
}

impl WidgetEvent {
    pub fn signal(block: &str, signal: &str, value: Value) -> Self {
        Self::Signal {
            block: block.to_string(),
            signal: signal.to_string(),
            value,
            timestamp: Utc::now(),
        }
    }

    pub fn reply(block: &str, method: &str, value: Value) -> Self {
        Self::Reply {
            block: block.to_string(),
            method: method.to_string(),
            value,
            timestamp: Utc::now(),
        }
    }

    pub fn call_failed(block: &str, method: &str, message: impl Into<String>) -> Self {
        Self::CallFailed {
            block: block.to_string(),
            method: method.to_string(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Block id this event concerns
    pub fn block(&self) -> &str {
        match self {
            Self::Signal { block, .. }
            | Self::Reply { block, .. }
            | Self::CallFailed { block, .. } => block,
        }
    }

    /// One-line summary for the status bar
    pub fn summary(&self) -> String {
        match self {
            Self::Signal {
                block,
                signal,
                value,
                ..
            } => format!("{}.{} → {}", block, signal, value),
            Self::Reply {
                block,
                method,
                value,
                ..
            } => format!("{}.{}() = {}", block, method, value),
            Self::CallFailed {
                block,
                method,
                message,
                ..
            } => format!("{}.{} failed: {}", block, method, message),
        }
    }
}
