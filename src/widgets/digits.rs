// Digit blocks - odometer and digit spinner
//
// Both wrap a DigitIndicator plus an InputMapper. They differ only in how the
// value crosses the host boundary: the odometer speaks i64, the digit
// spinner speaks f64 (truncated toward zero on the way in).

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};
use serde_json::Value;

use crate::events::VALUE_CHANGED;
use crate::host::{args, Block, BlockContext, BlockEntry, CallError, Setter, Signals};
use crate::indicator::{CellInput, DigitIndicator, InputMapper, PointerHalf, ValueObserver};
use crate::tui::traits::{Component, Handled, Interactive, RenderContext};

const CALLS: &[&str] = &[
    "setTitle",
    "setSize",
    "setValue",
    "setValueMin",
    "setValueMax",
    "setDeltaMin",
    "value",
];

const SETTERS: &[Setter] = &[
    Setter::new("title", "setTitle"),
    Setter::new("size", "setSize"),
    Setter::new("delta_min", "setDeltaMin"),
    Setter::new("value_min", "setValueMin"),
    Setter::new("value_max", "setValueMax"),
    Setter::new("value", "setValue"),
];

pub(super) const ODOMETER: BlockEntry = BlockEntry {
    path: "/widgets/odometer",
    summary: "Integer entry, one clickable cell per decimal digit",
    calls: CALLS,
    setters: SETTERS,
    factory: odometer,
};

pub(super) const DIGIT_SPINNER: BlockEntry = BlockEntry {
    path: "/widgets/digit_spinner",
    summary: "Odometer that reports its value as a float",
    calls: CALLS,
    setters: SETTERS,
    factory: digit_spinner,
};

fn odometer(ctx: BlockContext<'_>) -> Result<Box<dyn Block>, CallError> {
    Ok(Box::new(DigitBlock::new(ODOMETER.path, Numeric::Integer, ctx)))
}

fn digit_spinner(ctx: BlockContext<'_>) -> Result<Box<dyn Block>, CallError> {
    Ok(Box::new(DigitBlock::new(DIGIT_SPINNER.path, Numeric::Float, ctx)))
}

/// Wire type of a digit block's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numeric {
    Integer,
    Float,
}

impl Numeric {
    fn to_json(self, value: i64) -> Value {
        match self {
            Numeric::Integer => Value::from(value),
            Numeric::Float => Value::from(value as f64),
        }
    }
}

/// Re-emits indicator notifications as host signals
struct ValueRelay {
    signals: Signals,
    numeric: Numeric,
}

impl ValueObserver for ValueRelay {
    fn value_changed(&self, value: i64) {
        self.signals.emit(VALUE_CHANGED, self.numeric.to_json(value));
    }
}

pub struct DigitBlock {
    path: &'static str,
    numeric: Numeric,
    title: String,
    indicator: DigitIndicator,
    mapper: InputMapper,
    /// Cell that keyboard steps apply to
    focus: usize,
    relay: Rc<ValueRelay>,
}

impl DigitBlock {
    pub fn new(path: &'static str, numeric: Numeric, ctx: BlockContext<'_>) -> Self {
        if !ctx.args.is_empty() {
            tracing::debug!(block = ctx.id, "digit blocks take no factory arguments");
        }

        let relay = Rc::new(ValueRelay {
            signals: ctx.signals,
            numeric,
        });
        let mut indicator = DigitIndicator::new();
        indicator.subscribe(&relay);

        Self {
            path,
            numeric,
            title: ctx.id.to_string(),
            indicator,
            mapper: InputMapper::new(),
            focus: 0,
            relay,
        }
    }

    fn set_size(&mut self, size: usize) {
        self.indicator.set_size(size);
        self.mapper.reset();
        // Default focus on the least significant place
        self.focus = self.indicator.size().saturating_sub(1);
    }

    fn input(&mut self, index: usize, input: CellInput) {
        self.mapper.handle(&mut self.indicator, index, input);
    }
}

impl Block for DigitBlock {
    fn path(&self) -> &'static str {
        self.path
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
            "setSize" => {
                args::expect_count(method, args, 1)?;
                let size = args::integer(method, args, 0)?;
                let size = usize::try_from(size).map_err(|_| CallError::InvalidArg {
                    method: method.to_string(),
                    message: format!("digit count must not be negative, got {}", size),
                })?;
                self.set_size(size);
            }
            "setValue" => {
                args::expect_count(method, args, 1)?;
                self.indicator.set_value(args::integer(method, args, 0)?);
            }
            "setValueMin" => {
                args::expect_count(method, args, 1)?;
                self.indicator.set_value_min(args::integer(method, args, 0)?);
            }
            "setValueMax" => {
                args::expect_count(method, args, 1)?;
                self.indicator.set_value_max(args::integer(method, args, 0)?);
            }
            "setDeltaMin" => {
                args::expect_count(method, args, 1)?;
                self.indicator.set_delta_min(args::integer(method, args, 0)?);
                self.mapper.reset();
            }
            "value" => {
                args::expect_count(method, args, 0)?;
                return Ok(self.value());
            }
            _ => {
                return Err(CallError::UnknownMethod {
                    path: self.path,
                    method: method.to_string(),
                })
            }
        }
        Ok(Value::Null)
    }

    fn value(&self) -> Value {
        self.numeric.to_json(self.indicator.value())
    }

    fn activate(&mut self) {
        self.relay.value_changed(self.indicator.value());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout
// ─────────────────────────────────────────────────────────────────────────────

/// Columns per digit cell
const CELL_WIDTH: u16 = 3;
/// Rows per digit cell: up arrow, digit, down arrow
const CELL_HEIGHT: u16 = 3;

/// Screen positions of the sign column and every digit cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CellLayout {
    pub sign: Rect,
    pub cells: Vec<Rect>,
}

impl CellLayout {
    /// Center `count` cells in `inner`, with a one-column gap between
    /// groups of three places counted from the units digit
    pub fn new(inner: Rect, count: usize) -> Self {
        let count_u16 = count as u16;
        let gaps = count_u16.saturating_sub(1) / 3;
        let total = 1 + count_u16 * CELL_WIDTH + gaps;
        let mut x = inner.x + inner.width.saturating_sub(total) / 2;
        let height = CELL_HEIGHT.min(inner.height);

        let sign = Rect::new(x, inner.y, 1, height).intersection(inner);
        x += 1;

        let mut cells = Vec::with_capacity(count);
        for index in 0..count {
            cells.push(Rect::new(x, inner.y, CELL_WIDTH, height).intersection(inner));
            x = x.saturating_add(CELL_WIDTH);
            let places_right = count - 1 - index;
            if places_right > 0 && places_right % 3 == 0 {
                x = x.saturating_add(1);
            }
        }

        Self { sign, cells }
    }

    /// Cell under a terminal position
    ///
    /// Partially clipped cells are not drawn, so they never match.
    pub fn hit(&self, column: u16, row: u16) -> Option<usize> {
        let pos = Position::new(column, row);
        self.cells
            .iter()
            .position(|cell| Self::is_whole(cell) && cell.contains(pos))
    }

    fn is_whole(cell: &Rect) -> bool {
        cell.width >= CELL_WIDTH && cell.height >= CELL_HEIGHT
    }
}

fn inner_area(area: Rect) -> Rect {
    ratatui::widgets::Block::bordered().inner(area)
}

impl Component for DigitBlock {
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let frame = ctx.frame(&self.title);
        let inner = frame.inner(area);
        f.render_widget(frame, area);

        if self.indicator.size() == 0 {
            f.render_widget(
                Paragraph::new("(no digits)").style(Style::default().fg(ctx.theme.digit_dimmed)),
                inner,
            );
            return;
        }

        let layout = CellLayout::new(inner, self.indicator.size());
        let buf = f.buffer_mut();

        if self.indicator.is_negative() && layout.sign.height > 1 {
            buf.set_string(
                layout.sign.x,
                layout.sign.y + 1,
                "-",
                ctx.theme.digit_style(false, true, false),
            );
        }

        for (index, (cell, rect)) in self
            .indicator
            .cells()
            .iter()
            .zip(&layout.cells)
            .enumerate()
        {
            // Partially clipped cells are skipped
            if !CellLayout::is_whole(rect) {
                continue;
            }

            let pending = self.mapper.pending(index);
            let focused = ctx.focused && index == self.focus;
            let (up, down) = if cell.active {
                (" ▴ ", " ▾ ")
            } else {
                ("   ", "   ")
            };

            buf.set_string(rect.x, rect.y, up, ctx.theme.pending_style(pending, true));
            buf.set_string(
                rect.x,
                rect.y + 1,
                format!(" {} ", cell.displayed_digit),
                ctx.theme.digit_style(cell.dimmed, cell.active, focused),
            );
            buf.set_string(rect.x, rect.y + 2, down, ctx.theme.pending_style(pending, false));
        }
    }

    fn height(&self) -> u16 {
        CELL_HEIGHT + 2
    }
}

impl Interactive for DigitBlock {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        let last = self.indicator.size().saturating_sub(1);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.input(self.focus, CellInput::Press(PointerHalf::Upper));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.input(self.focus, CellInput::Press(PointerHalf::Lower));
            }
            KeyCode::Left | KeyCode::Char('h') => self.focus = self.focus.saturating_sub(1),
            KeyCode::Right | KeyCode::Char('l') => self.focus = (self.focus + 1).min(last),
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect) -> Handled {
        let layout = CellLayout::new(inner_area(area), self.indicator.size());
        let Some(index) = layout.hit(mouse.column, mouse.row) else {
            self.pointer_left();
            return Handled::No;
        };

        let half = PointerHalf::from_position(mouse.row - layout.cells[index].y, CELL_HEIGHT);

        if let Some(previous) = self.mapper.hovered_cell() {
            if previous != index {
                self.input(previous, CellInput::Leave);
            }
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.focus = index;
                if let Some(half) = half {
                    self.input(index, CellInput::Press(half));
                }
            }
            MouseEventKind::Moved => {
                if let Some(half) = half {
                    self.input(index, CellInput::Hover(half));
                }
            }
            MouseEventKind::ScrollUp => self.input(index, CellInput::Scroll(1)),
            MouseEventKind::ScrollDown => self.input(index, CellInput::Scroll(-1)),
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn pointer_left(&mut self) {
        if let Some(previous) = self.mapper.hovered_cell() {
            self.input(previous, CellInput::Leave);
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓ step digit  ←→ move  click/scroll cells")
    }
}
