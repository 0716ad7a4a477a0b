// Application state for the TUI
//
// The App owns the live BlockSet and the shell state around it (focus,
// theme, last signal). Rendering reads it; input handlers and the call
// queue mutate it, all on the UI thread.

use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use super::theme::{Theme, ThemeKind};
use super::traits::Handled;
use crate::events::WidgetEvent;
use crate::host::BlockSet;
use crate::logging::LogBuffer;

pub struct App {
    /// Hosted blocks, in design order
    pub blocks: BlockSet,

    /// Index of the block with keyboard focus
    pub focused: usize,

    /// Screen area of each block from the last draw
    pub block_areas: Vec<Rect>,

    /// Captured tracing output for the logs panel
    pub log_buffer: LogBuffer,

    pub theme_kind: ThemeKind,
    pub theme: Theme,

    /// Most recent signal or call failure
    pub last_event: Option<WidgetEvent>,
    pub signal_count: u64,

    /// Label shown in the title bar (design file name or "built-in")
    pub design_name: String,

    pub should_quit: bool,

    /// Block under the mouse pointer
    hovered: Option<usize>,
    started: Instant,
}

impl App {
    pub fn new(blocks: BlockSet, log_buffer: LogBuffer, theme_kind: ThemeKind) -> Self {
        Self {
            blocks,
            focused: 0,
            block_areas: Vec::new(),
            log_buffer,
            theme_kind,
            theme: theme_kind.theme(),
            last_event: None,
            signal_count: 0,
            design_name: "built-in".to_string(),
            should_quit: false,
            hovered: None,
            started: Instant::now(),
        }
    }

    pub fn with_design_name(mut self, name: impl Into<String>) -> Self {
        self.design_name = name.into();
        self
    }

    /// Session uptime as `HH:MM:SS`
    pub fn uptime(&self) -> String {
        let secs = self.started.elapsed().as_secs();
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    }

    pub fn focus_next(&mut self) {
        if !self.blocks.is_empty() {
            self.focused = (self.focused + 1) % self.blocks.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.blocks.is_empty() {
            self.focused = (self.focused + self.blocks.len() - 1) % self.blocks.len();
        }
    }

    pub fn cycle_theme(&mut self) {
        self.theme_kind = self.theme_kind.next();
        self.theme = self.theme_kind.theme();
        tracing::info!(theme = self.theme_kind.name(), "theme changed");
    }

    /// Remember an event for the status bar
    pub fn record_event(&mut self, event: &WidgetEvent) {
        if matches!(event, WidgetEvent::Signal { .. }) {
            self.signal_count += 1;
        }
        self.last_event = Some(event.clone());
    }

    /// Title and keybind hint of the focused block
    pub fn focus_hint(&self) -> Option<(&str, Option<&'static str>)> {
        self.blocks
            .iter()
            .nth(self.focused)
            .map(|(_, block)| (block.title(), block.focus_hint()))
    }

    // ─────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────

    /// Layered dispatch: global navigation → focused block → fallbacks
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Key release events would double every step on some terminals
        if key.kind == KeyEventKind::Release {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.focus_next();
                return;
            }
            KeyCode::BackTab => {
                self.focus_prev();
                return;
            }
            _ => {}
        }

        if let Some(block) = self.blocks.at_mut(self.focused) {
            if block.handle_key(key).was_handled() {
                return;
            }
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('t') => self.cycle_theme(),
            _ => {}
        }
    }

    /// Route a mouse event to the block under the pointer
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Handled {
        let pos = Position::new(mouse.column, mouse.row);
        let target = self.block_areas.iter().position(|area| area.contains(pos));

        if self.hovered != target {
            if let Some(previous) = self.hovered.and_then(|i| self.blocks.at_mut(i)) {
                previous.pointer_left();
            }
            self.hovered = target;
        }

        let Some(index) = target else {
            return Handled::No;
        };
        let area = self.block_areas[index];

        if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
            self.focused = index;
        }

        match self.blocks.at_mut(index) {
            Some(block) => block.handle_mouse(mouse, area),
            None => Handled::No,
        }
    }
}
