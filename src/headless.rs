// Headless mode - JSON Lines in, JSON Lines out
//
// stdin:  one host call per line, {"block": "freq", "method": "setValue", "args": [7]}
// stdout: one event per line (signals, call replies, call failures)
// stderr: logs
//
// A reader task parses stdin and pushes calls through a HostHandle, the same
// path any other thread would use. The loop below applies them on this task
// in arrival order and stops at EOF or Ctrl+C.

use std::io::Write;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::events::WidgetEvent;
use crate::host::{BlockSet, CallQueue, HostCall, HostHandle};
use crate::storage::SignalSink;

/// Run the headless loop until stdin closes or Ctrl+C
pub async fn run_headless(
    blocks: &mut BlockSet,
    handle: HostHandle,
    queue: &mut CallQueue,
    events: &mut mpsc::UnboundedReceiver<WidgetEvent>,
    sink: &SignalSink,
) -> Result<()> {
    let reader = tokio::spawn(read_calls(BufReader::new(tokio::io::stdin()), handle));
    let mut stdout = std::io::stdout();

    // Signals emitted while the design came up
    write_events(events, sink, &mut stdout)?;

    loop {
        tokio::select! {
            call = queue.recv() => match call {
                Some(call) => {
                    let _ = blocks.call(&call);
                    queue.drain_into(blocks);
                }
                // Reader hit EOF and dropped its handle
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
        write_events(events, sink, &mut stdout)?;
    }

    write_events(events, sink, &mut stdout)?;
    reader.abort();
    Ok(())
}

/// Parse host calls line by line and forward them
///
/// Blank lines are skipped; malformed lines are logged and skipped. Returns
/// the number of calls forwarded.
pub async fn read_calls<R>(input: R, handle: HostHandle) -> usize
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut forwarded = 0;

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read stdin: {}", e);
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<HostCall>(line) {
            Ok(call) => {
                if let Err(e) = handle.send(call) {
                    tracing::warn!("{}", e);
                    break;
                }
                forwarded += 1;
            }
            Err(e) => tracing::warn!(line, "invalid host call: {}", e),
        }
    }

    tracing::debug!(forwarded, "stdin closed");
    forwarded
}

/// Drain pending events as JSON lines, forwarding each to the signal log
fn write_events(
    events: &mut mpsc::UnboundedReceiver<WidgetEvent>,
    sink: &SignalSink,
    out: &mut impl Write,
) -> Result<()> {
    while let Ok(event) = events.try_recv() {
        let json = serde_json::to_string(&event).context("Failed to serialize event")?;
        writeln!(out, "{}", json).context("Failed to write to stdout")?;
        sink.send(event);
    }
    out.flush().context("Failed to flush stdout")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{call_channel, BlockRegistry, Design};
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_read_calls_skips_bad_lines() {
        let input: &[u8] = b"{\"block\":\"freq\",\"method\":\"setValue\",\"args\":[7]}\n\
            \n\
            not json\n\
            {\"block\":\"freq\",\"method\":\"value\"}\n";
        let (handle, mut queue) = call_channel();

        assert_eq!(read_calls(input, handle).await, 2);
        assert_eq!(
            queue.recv().await,
            Some(HostCall::new("freq", "setValue", vec![json!(7)]))
        );
        assert_eq!(queue.recv().await, Some(HostCall::new("freq", "value", vec![])));
        assert_eq!(queue.recv().await, None);
    }

    #[tokio::test]
    async fn test_calls_to_stdout_lines() {
        let (tx, mut events) = mpsc::unbounded_channel();
        let design = Design::from_toml(
            r#"
            [[blocks]]
            id = "freq"
            path = "/widgets/odometer"
            params = { size = 3, value_max = 999 }
            "#,
        )
        .unwrap();
        let mut blocks = BlockSet::build(&BlockRegistry::with_builtin(), &design, tx).unwrap();

        let input: &[u8] = b"{\"block\":\"freq\",\"method\":\"setValue\",\"args\":[295]}\n\
            {\"block\":\"freq\",\"method\":\"value\"}\n\
            {\"block\":\"nope\",\"method\":\"value\"}\n";
        let (handle, mut queue) = call_channel();
        read_calls(input, handle).await;
        queue.drain_into(&mut blocks);

        let mut out = Vec::new();
        write_events(&mut events, &SignalSink::disabled(), &mut out).unwrap();

        let lines: Vec<Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        let kinds: Vec<&str> = lines.iter().map(|l| l["type"].as_str().unwrap()).collect();
        assert_eq!(kinds, vec!["signal", "reply", "call_failed"]);
        assert_eq!(lines[0]["signal"], "valueChanged");
        assert_eq!(lines[0]["value"], 295);
        assert_eq!(lines[1]["value"], 295);
        assert_eq!(lines[2]["block"], "nope");
    }
}
