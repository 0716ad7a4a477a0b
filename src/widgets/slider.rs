// Slider block - a stepped f64 range
//
// Unlike the digit blocks, the slider saturates: out-of-range values are
// pulled to the nearest bound and snapped to the step grid anchored at the
// minimum.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use serde_json::Value;

use crate::events::VALUE_CHANGED;
use crate::host::{args, Block, BlockContext, BlockEntry, CallError, Setter, Signals};
use crate::tui::traits::{Component, Handled, Interactive, RenderContext};

pub(super) const ENTRY: BlockEntry = BlockEntry {
    path: "/widgets/slider",
    summary: "Stepped value between a minimum and maximum",
    calls: &[
        "setTitle",
        "setValue",
        "setMinimum",
        "setMaximum",
        "setSingleStep",
        "value",
    ],
    setters: &[
        Setter::new("title", "setTitle"),
        Setter::new("minimum", "setMinimum"),
        Setter::new("maximum", "setMaximum"),
        Setter::new("step", "setSingleStep"),
        Setter::new("value", "setValue"),
    ],
    factory: make,
};

fn make(ctx: BlockContext<'_>) -> Result<Box<dyn Block>, CallError> {
    let orientation = match ctx.args.first() {
        None => Orientation::Horizontal,
        Some(arg) => arg
            .as_str()
            .and_then(Orientation::from_name)
            .ok_or_else(|| CallError::InvalidArg {
                method: "orientation".to_string(),
                message: format!("expected \"Horizontal\" or \"Vertical\", got {}", arg),
            })?,
    };
    Ok(Box::new(SliderBlock::new(ctx.id, orientation, ctx.signals)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Horizontal" => Some(Self::Horizontal),
            "Vertical" => Some(Self::Vertical),
            _ => None,
        }
    }
}

/// Bounded, stepped value
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RangeModel {
    value: f64,
    minimum: f64,
    maximum: f64,
    step: f64,
}

impl Default for RangeModel {
    fn default() -> Self {
        Self {
            value: 0.0,
            minimum: -1.0,
            maximum: 1.0,
            step: 0.01,
        }
    }
}

impl RangeModel {
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Saturate and snap; true when the stored value changed
    pub fn set_value(&mut self, value: f64) -> bool {
        if value.is_nan() {
            return false;
        }
        let snapped = self.snap(value);
        let changed = snapped != self.value;
        self.value = snapped;
        changed
    }

    /// Lower bound; drags the upper bound along if it would cross
    pub fn set_minimum(&mut self, minimum: f64) -> bool {
        self.minimum = minimum;
        if self.maximum < minimum {
            self.maximum = minimum;
        }
        self.set_value(self.value)
    }

    /// Upper bound; drags the lower bound along if it would cross
    pub fn set_maximum(&mut self, maximum: f64) -> bool {
        self.maximum = maximum;
        if self.minimum > maximum {
            self.minimum = maximum;
        }
        self.set_value(self.value)
    }

    /// Only positive steps are kept
    pub fn set_step(&mut self, step: f64) -> Option<bool> {
        if step.is_finite() && step > 0.0 {
            self.step = step;
            Some(self.set_value(self.value))
        } else {
            None
        }
    }

    pub fn step_by(&mut self, steps: i32) -> bool {
        self.set_value(self.value + f64::from(steps) * self.step)
    }

    /// Position of the value along the range, `0.0..=1.0`
    pub fn fraction(&self) -> f64 {
        let span = self.maximum - self.minimum;
        if span > 0.0 {
            (self.value - self.minimum) / span
        } else {
            0.0
        }
    }

    pub fn set_fraction(&mut self, fraction: f64) -> bool {
        self.set_value(self.minimum + fraction.clamp(0.0, 1.0) * (self.maximum - self.minimum))
    }

    fn snap(&self, value: f64) -> f64 {
        let value = value.clamp(self.minimum, self.maximum);
        let steps = ((value - self.minimum) / self.step).round();
        (self.minimum + steps * self.step).min(self.maximum)
    }
}

pub struct SliderBlock {
    title: String,
    orientation: Orientation,
    range: RangeModel,
    signals: Signals,
}

impl SliderBlock {
    pub fn new(id: &str, orientation: Orientation, signals: Signals) -> Self {
        Self {
            title: id.to_string(),
            orientation,
            range: RangeModel::default(),
            signals,
        }
    }

    fn changed(&self, changed: bool) {
        if changed {
            self.signals.emit(VALUE_CHANGED, self.value());
        }
    }

    /// Rows/columns of the track inside the frame
    fn track(&self, inner: Rect) -> Rect {
        match self.orientation {
            Orientation::Horizontal => Rect::new(inner.x, inner.y, inner.width, inner.height.min(1)),
            Orientation::Vertical => Rect::new(
                inner.x + inner.width / 2,
                inner.y,
                inner.width.min(1),
                inner.height.saturating_sub(1),
            ),
        }
    }

    fn fraction_at(&self, track: Rect, column: u16, row: u16) -> f64 {
        match self.orientation {
            Orientation::Horizontal if track.width > 1 => {
                f64::from(column - track.x) / f64::from(track.width - 1)
            }
            Orientation::Vertical if track.height > 1 => {
                1.0 - f64::from(row - track.y) / f64::from(track.height - 1)
            }
            _ => 0.0,
        }
    }
}

impl Block for SliderBlock {
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
                let changed = self.range.set_value(args::float(method, args, 0)?);
                self.changed(changed);
            }
            "setMinimum" => {
                args::expect_count(method, args, 1)?;
                let changed = self.range.set_minimum(args::float(method, args, 0)?);
                self.changed(changed);
            }
            "setMaximum" => {
                args::expect_count(method, args, 1)?;
                let changed = self.range.set_maximum(args::float(method, args, 0)?);
                self.changed(changed);
            }
            "setSingleStep" => {
                args::expect_count(method, args, 1)?;
                let step = args::float(method, args, 0)?;
                let changed = self.range.set_step(step).ok_or_else(|| CallError::InvalidArg {
                    method: method.to_string(),
                    message: format!("step must be positive, got {}", step),
                })?;
                self.changed(changed);
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
        Value::from(self.range.value())
    }

    fn activate(&mut self) {
        self.signals.emit(VALUE_CHANGED, self.value());
    }
}

impl Component for SliderBlock {
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let frame = ctx.frame(&self.title);
        let inner = frame.inner(area);
        f.render_widget(frame, area);

        let fill = Style::default().fg(ctx.theme.slider_fill);
        let rest = Style::default().fg(ctx.theme.slider_track);
        let track = self.track(inner);
        let label = format!(
            "{}  [{} .. {}]",
            self.range.value, self.range.minimum, self.range.maximum
        );

        match self.orientation {
            Orientation::Horizontal => {
                let width = usize::from(track.width);
                if width == 0 {
                    return;
                }
                let knob = (self.range.fraction() * (width - 1) as f64).round() as usize;
                let line = Line::from(vec![
                    Span::styled("━".repeat(knob), fill),
                    Span::styled("●", fill),
                    Span::styled("─".repeat(width - 1 - knob), rest),
                ]);
                f.render_widget(Paragraph::new(line), track);

                if inner.height > 1 {
                    let row = Rect::new(inner.x, inner.y + 1, inner.width, 1);
                    f.render_widget(Paragraph::new(label).style(ctx.theme.base_style()), row);
                }
            }
            Orientation::Vertical => {
                let height = track.height;
                if height == 0 || track.width == 0 {
                    return;
                }
                let knob = (self.range.fraction() * f64::from(height - 1)).round() as u16;
                let buf = f.buffer_mut();
                for offset in 0..height {
                    // Offset 0 is the bottom of the track
                    let y = track.y + height - 1 - offset;
                    let (symbol, style) = match offset.cmp(&knob) {
                        std::cmp::Ordering::Less => ("┃", fill),
                        std::cmp::Ordering::Equal => ("●", fill),
                        std::cmp::Ordering::Greater => ("│", rest),
                    };
                    buf.set_string(track.x, y, symbol, style);
                }

                let row = Rect::new(inner.x, inner.y + height, inner.width, 1);
                f.render_widget(Paragraph::new(label).style(ctx.theme.base_style()), row);
            }
        }
    }

    fn height(&self) -> u16 {
        match self.orientation {
            Orientation::Horizontal => 4,
            Orientation::Vertical => 8,
        }
    }
}

impl Interactive for SliderBlock {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        let changed = match key.code {
            KeyCode::Right | KeyCode::Up | KeyCode::Char('l') | KeyCode::Char('k') => {
                self.range.step_by(1)
            }
            KeyCode::Left | KeyCode::Down | KeyCode::Char('h') | KeyCode::Char('j') => {
                self.range.step_by(-1)
            }
            KeyCode::PageUp => self.range.step_by(10),
            KeyCode::PageDown => self.range.step_by(-10),
            KeyCode::Home => self.range.set_fraction(0.0),
            KeyCode::End => self.range.set_fraction(1.0),
            _ => return Handled::No,
        };
        self.changed(changed);
        Handled::Yes
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect) -> Handled {
        let track = self.track(ratatui::widgets::Block::bordered().inner(area));
        let changed = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                if !track.contains(Position::new(mouse.column, mouse.row)) {
                    return Handled::No;
                }
                let fraction = self.fraction_at(track, mouse.column, mouse.row);
                self.range.set_fraction(fraction)
            }
            MouseEventKind::ScrollUp => self.range.step_by(1),
            MouseEventKind::ScrollDown => self.range.step_by(-1),
            _ => return Handled::No,
        };
        self.changed(changed);
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("←→ step  PgUp/PgDn ×10  Home/End bounds  click track")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::tests::{drain_values, signals};
    use crossterm::event::KeyModifiers;
    use serde_json::json;

    type Events = tokio::sync::mpsc::UnboundedReceiver<crate::events::WidgetEvent>;

    fn slider(orientation: Orientation) -> (SliderBlock, Events) {
        let (signals, rx) = signals("volume");
        (SliderBlock::new("volume", orientation, signals), rx)
    }

    fn percent() -> (SliderBlock, Events) {
        let (mut s, mut rx) = slider(Orientation::Horizontal);
        s.call("setMaximum", &[json!(100.0)]).unwrap();
        s.call("setMinimum", &[json!(0.0)]).unwrap();
        s.call("setSingleStep", &[json!(5.0)]).unwrap();
        drain_values(&mut rx);
        (s, rx)
    }

    #[test]
    fn test_defaults() {
        let model = RangeModel::default();
        assert_eq!(model.value(), 0.0);
        assert_eq!(model.fraction(), 0.5);
    }

    #[test]
    fn test_set_value_saturates_and_snaps() {
        let (mut s, mut rx) = percent();

        s.call("setValue", &[json!(52.0)]).unwrap();
        assert_eq!(s.value(), json!(50.0));

        s.call("setValue", &[json!(250.0)]).unwrap();
        assert_eq!(s.value(), json!(100.0));

        s.call("setValue", &[json!(-3)]).unwrap();
        assert_eq!(s.value(), json!(0.0));

        // Same value again: no signal
        s.call("setValue", &[json!(1.0)]).unwrap();
        assert_eq!(drain_values(&mut rx), vec![json!(50.0), json!(100.0), json!(0.0)]);
    }

    #[test]
    fn test_bounds_push_each_other() {
        let mut model = RangeModel::default();
        model.set_minimum(5.0);
        assert_eq!((model.minimum, model.maximum), (5.0, 5.0));
        assert_eq!(model.value(), 5.0);

        model.set_maximum(2.0);
        assert_eq!((model.minimum, model.maximum), (2.0, 2.0));
        assert_eq!(model.value(), 2.0);
    }

    #[test]
    fn test_step_must_be_positive() {
        let (mut s, _rx) = percent();
        assert!(matches!(
            s.call("setSingleStep", &[json!(0.0)]),
            Err(CallError::InvalidArg { .. })
        ));
        assert!(s.call("setSingleStep", &[json!(0.5)]).is_ok());
    }

    #[test]
    fn test_keys_step_and_jump() {
        let (mut s, mut rx) = percent();
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);

        s.handle_key(key(KeyCode::Right));
        s.handle_key(key(KeyCode::Right));
        s.handle_key(key(KeyCode::Left));
        s.handle_key(key(KeyCode::End));
        s.handle_key(key(KeyCode::PageDown));
        s.handle_key(key(KeyCode::Home));
        s.handle_key(key(KeyCode::Left)); // already at minimum

        assert_eq!(
            drain_values(&mut rx),
            vec![
                json!(5.0),
                json!(10.0),
                json!(5.0),
                json!(100.0),
                json!(50.0),
                json!(0.0)
            ]
        );
    }

    #[test]
    fn test_click_on_track_jumps() {
        let (mut s, _rx) = percent();
        // Frame at x=0: track spans columns 1..=21, so column 11 is halfway
        let area = Rect::new(0, 0, 23, 4);
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 11,
            row: 1,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(s.handle_mouse(click, area), Handled::Yes);
        assert_eq!(s.value(), json!(50.0));

        let outside = MouseEvent { row: 3, ..click };
        assert_eq!(s.handle_mouse(outside, area), Handled::No);
    }

    #[test]
    fn test_vertical_click_top_is_maximum() {
        let (signals, _rx) = signals("v");
        let mut s = SliderBlock::new("v", Orientation::Vertical, signals);
        let area = Rect::new(0, 0, 9, 8);
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 1,
            modifiers: KeyModifiers::NONE,
        };
        s.handle_mouse(click, area);
        assert_eq!(s.value(), json!(1.0));
    }

    #[test]
    fn test_orientation_factory_arg() {
        let (signals, _rx) = signals("v");
        let ctx = BlockContext {
            id: "v",
            args: &[json!("Sideways")],
            signals,
        };
        assert!(matches!(make(ctx), Err(CallError::InvalidArg { .. })));
    }
}
