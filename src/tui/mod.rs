// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard and mouse input, redraw ticks, queued host calls)
// - Draining block signals into the status bar and the signal log

pub mod app;
pub mod components;
pub mod theme;
pub mod traits;
pub mod ui;

use crate::events::WidgetEvent;
use crate::host::CallQueue;
use crate::storage::SignalSink;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// even when the loop fails.
pub async fn run_tui(
    app: &mut App,
    queue: &mut CallQueue,
    events: &mut mpsc::UnboundedReceiver<WidgetEvent>,
    sink: &SignalSink,
    tick: Duration,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, app, queue, events, sink, tick).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources with tokio::select!:
/// 1. Terminal input (keyboard, mouse)
/// 2. Redraw ticks
/// 3. Host calls queued from other threads
///
/// After each wake-up every pending block event is drained, so signals show
/// up in the status bar on the next frame.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    queue: &mut CallQueue,
    events: &mut mpsc::UnboundedReceiver<WidgetEvent>,
    sink: &SignalSink,
    tick: Duration,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(tick);

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key)) => app.handle_key(key),
                        Ok(Event::Mouse(mouse)) => {
                            app.handle_mouse(mouse);
                        }
                        _ => {}
                    }
                }
            } => {}

            // Periodic tick for redrawing
            _ = tick_interval.tick() => {}

            // Calls from other threads, applied in arrival order
            Some(call) = queue.recv() => {
                let _ = app.blocks.call(&call);
                queue.drain_into(&mut app.blocks);
            }
        }

        while let Ok(event) = events.try_recv() {
            app.record_event(&event);
            sink.send(event);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
