//! Cross-thread call queue
//!
//! Blocks live on the UI thread and are not `Send`. Anything running
//! elsewhere (the stdin reader, a script task) holds a [`HostHandle`] and
//! pushes [`HostCall`]s; the UI loop drains them in arrival order, one at a
//! time, through [`BlockSet::call`].

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc;

use super::BlockSet;

/// One call addressed to a block by id
///
/// Also the headless wire format: `{"block": "freq", "method": "setValue", "args": [7]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostCall {
    pub block: String,
    pub method: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

impl HostCall {
    pub fn new(block: &str, method: &str, args: Vec<Value>) -> Self {
        Self {
            block: block.to_string(),
            method: method.to_string(),
            args,
        }
    }
}

/// Sending side of the call queue; clone freely, send from any thread
#[derive(Debug, Clone)]
pub struct HostHandle {
    tx: mpsc::UnboundedSender<HostCall>,
}

impl HostHandle {
    pub fn send(&self, call: HostCall) -> Result<()> {
        self.tx
            .send(call)
            .map_err(|e| anyhow!("call queue closed, dropped {}.{}", e.0.block, e.0.method))
    }
}

/// Receiving side, owned by the UI loop
#[derive(Debug)]
pub struct CallQueue {
    rx: mpsc::UnboundedReceiver<HostCall>,
}

impl CallQueue {
    /// Wait for the next call; `None` once every handle is dropped
    pub async fn recv(&mut self) -> Option<HostCall> {
        self.rx.recv().await
    }

    /// Apply every call already queued, in order
    ///
    /// Returns how many calls were applied. Never waits.
    pub fn drain_into(&mut self, blocks: &mut BlockSet) -> usize {
        let mut applied = 0;
        while let Ok(call) = self.rx.try_recv() {
            // Failures are reported through the event channel
            let _ = blocks.call(&call);
            applied += 1;
        }
        applied
    }
}

/// Create a connected handle/queue pair
pub fn call_channel() -> (HostHandle, CallQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (HostHandle { tx }, CallQueue { rx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::WidgetEvent;
    use crate::host::design::Design;
    use crate::host::registry::BlockRegistry;
    use crate::host::tests::drain_values;
    use serde_json::json;

    fn odometer_set() -> (BlockSet, mpsc::UnboundedReceiver<WidgetEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let design = Design::from_toml(
            r#"
            [[blocks]]
            id = "freq"
            path = "/widgets/odometer"
            params = { size = 3, value_max = 999 }
            "#,
        )
        .unwrap();
        let set = BlockSet::build(&BlockRegistry::with_builtin(), &design, tx).unwrap();
        (set, rx)
    }

    #[test]
    fn test_wire_format_defaults_args() {
        let call: HostCall = serde_json::from_str(r#"{"block":"freq","method":"value"}"#).unwrap();
        assert_eq!(call, HostCall::new("freq", "value", vec![]));
    }

    #[tokio::test]
    async fn test_calls_from_another_task_apply_in_order() {
        let (mut set, mut rx) = odometer_set();
        let (handle, mut queue) = call_channel();

        let sender = tokio::spawn(async move {
            for v in [100, 200, 300] {
                handle.send(HostCall::new("freq", "setValue", vec![json!(v)])).unwrap();
            }
        });
        sender.await.unwrap();

        assert_eq!(queue.drain_into(&mut set), 3);
        assert_eq!(drain_values(&mut rx), vec![json!(100), json!(200), json!(300)]);
    }

    #[tokio::test]
    async fn test_order_changes_outcome() {
        let (mut set, mut rx) = odometer_set();
        let (handle, mut queue) = call_channel();

        // Value first, then a tighter bound: the value gets clamped
        handle.send(HostCall::new("freq", "setValue", vec![json!(7)])).unwrap();
        handle.send(HostCall::new("freq", "setValueMax", vec![json!(5)])).unwrap();
        queue.drain_into(&mut set);
        assert_eq!(set.get("freq").unwrap().value(), json!(5));
        assert_eq!(drain_values(&mut rx), vec![json!(7), json!(5)]);

        // Bound first: the out-of-range value is rejected
        handle.send(HostCall::new("freq", "setValueMax", vec![json!(3)])).unwrap();
        handle.send(HostCall::new("freq", "setValue", vec![json!(4)])).unwrap();
        queue.drain_into(&mut set);
        assert_eq!(set.get("freq").unwrap().value(), json!(3));
        assert_eq!(drain_values(&mut rx), vec![json!(3)]);
    }

    #[tokio::test]
    async fn test_recv_ends_when_handles_drop() {
        let (handle, mut queue) = call_channel();
        handle.send(HostCall::new("freq", "value", vec![])).unwrap();
        drop(handle);

        assert!(queue.recv().await.is_some());
        assert!(queue.recv().await.is_none());
    }

    #[test]
    fn test_send_after_queue_dropped_fails() {
        let (handle, queue) = call_channel();
        drop(queue);
        assert!(handle.send(HostCall::new("freq", "value", vec![])).is_err());
    }
}
