// Text entry block - single-line edit with a committed value
//
// Edits stay local until Enter commits them; while the text differs from the
// last committed string the field is drawn highlighted.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use serde_json::Value;
use unicode_width::UnicodeWidthStr;

use crate::events::VALUE_CHANGED;
use crate::host::{args, Block, BlockContext, BlockEntry, CallError, Setter, Signals};
use crate::tui::traits::{Component, Handled, Interactive, RenderContext};

pub(super) const ENTRY: BlockEntry = BlockEntry {
    path: "/widgets/text_entry",
    summary: "Single line of text, emitted on Enter",
    calls: &["setTitle", "setValue", "value"],
    setters: &[
        Setter::new("title", "setTitle"),
        Setter::new("value", "setValue"),
    ],
    factory: make,
};

fn make(ctx: BlockContext<'_>) -> Result<Box<dyn Block>, CallError> {
    Ok(Box::new(TextEntryBlock::new(ctx.id, ctx.signals)))
}

pub struct TextEntryBlock {
    title: String,
    text: String,
    committed: String,
    /// Cursor position in chars
    cursor: usize,
    signals: Signals,
}

impl TextEntryBlock {
    pub fn new(id: &str, signals: Signals) -> Self {
        Self {
            title: id.to_string(),
            text: String::new(),
            committed: String::new(),
            cursor: 0,
            signals,
        }
    }

    /// Edited but not yet committed
    pub fn is_dirty(&self) -> bool {
        self.text != self.committed
    }

    fn commit(&mut self) {
        self.committed = self.text.clone();
        self.signals.emit(VALUE_CHANGED, Value::String(self.text.clone()));
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.text
            .char_indices()
            .nth(cursor)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }
}

impl Block for TextEntryBlock {
    fn path(&self) -> &'static str {
        ENTRY.path
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn call(&mut self, method: &str, args: &[Value]) -> Result<Value, CallError> {
        match method {
            "setTitle" => {
                args::expect_count(method, args, 1)?;
                self.title = args::string(method, args, 0)?.to_string();
            }
            "setValue" => {
                args::expect_count(method, args, 1)?;
                self.text = args::string(method, args, 0)?.to_string();
                self.committed = self.text.clone();
                self.cursor = self.char_count();
            }
            "value" => {
                args::expect_count(method, args, 0)?;
                return Ok(self.value());
            }
            _ => {
                return Err(CallError::UnknownMethod {
                    path: ENTRY.path,
                    method: method.to_string(),
                })
            }
        }
        Ok(Value::Null)
    }

    fn value(&self) -> Value {
        Value::String(self.text.clone())
    }

    fn activate(&mut self) {
        self.commit();
    }
}

impl Component for TextEntryBlock {
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let frame = ctx.frame(&self.title);
        let inner = frame.inner(area);
        f.render_widget(frame, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let style = if self.is_dirty() {
            Style::default().fg(Color::Black).bg(ctx.theme.dirty_bg)
        } else {
            ctx.theme.base_style()
        };

        // Scroll so the cursor stays inside the field
        let before_cursor = &self.text[..self.byte_index(self.cursor)];
        let width = usize::from(inner.width);
        let mut start = 0;
        while before_cursor[start..].width() >= width {
            start += before_cursor[start..].chars().next().map_or(1, char::len_utf8);
        }

        let line = Rect::new(inner.x, inner.y, inner.width, 1);
        f.render_widget(Paragraph::new(&self.text[start..]).style(style), line);

        if ctx.focused {
            let column = before_cursor[start..].width() as u16;
            f.set_cursor_position(Position::new(inner.x + column, inner.y));
        }
    }

    fn height(&self) -> u16 {
        3
    }
}

impl Interactive for TextEntryBlock {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return Handled::No;
        }

        match key.code {
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.char_count()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.char_count(),
            KeyCode::Enter => self.commit(),
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("type to edit  Enter commit")
    }
}
