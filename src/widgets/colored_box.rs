// Colored box block - a titled status swatch

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, style::Color, style::Style, widgets::Block as Fill, Frame};
use serde_json::Value;

use crate::events::VALUE_CHANGED;
use crate::host::{args, Block, BlockContext, BlockEntry, CallError, Setter, Signals};
use crate::tui::traits::{Component, Handled, Interactive, RenderContext};

pub(super) const ENTRY: BlockEntry = BlockEntry {
    path: "/widgets/colored_box",
    summary: "Titled box filled with a status color",
    calls: &["setTitle", "setColor", "value"],
    setters: &[
        Setter::new("title", "setTitle"),
        Setter::new("color", "setColor"),
    ],
    factory: make,
};

const DEFAULT_COLOR: &str = "#77dd77";

fn make(ctx: BlockContext<'_>) -> Result<Box<dyn Block>, CallError> {
    Ok(Box::new(ColoredBoxBlock::new(ctx.id, ctx.signals)))
}

/// Parse `#rrggbb`, a color name (`red`, `lightblue`, ...) or a palette index
fn parse_color(name: &str) -> Option<Color> {
    name.trim().parse::<Color>().ok()
}

pub struct ColoredBoxBlock {
    title: String,
    /// Color as it was given, reported back as the value
    name: String,
    color: Color,
    signals: Signals,
}

impl ColoredBoxBlock {
    pub fn new(id: &str, signals: Signals) -> Self {
        Self {
            title: id.to_string(),
            name: DEFAULT_COLOR.to_string(),
            color: Color::Rgb(0x77, 0xdd, 0x77),
            signals,
        }
    }

    fn set_color(&mut self, name: &str) -> Result<(), CallError> {
        let color = parse_color(name).ok_or_else(|| CallError::InvalidArg {
            method: "setColor".to_string(),
            message: format!("unrecognized color '{}'", name),
        })?;

        let name = name.trim();
        if name != self.name {
            self.name = name.to_string();
            self.color = color;
            self.signals.emit(VALUE_CHANGED, self.value());
        }
        Ok(())
    }
}

impl Block for ColoredBoxBlock {
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
            "setColor" => {
                args::expect_count(method, args, 1)?;
                self.set_color(args::string(method, args, 0)?)?;
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
        Value::String(self.name.clone())
    }

    fn restore_state(&mut self, state: &Value) -> Result<(), CallError> {
        self.call("setColor", std::slice::from_ref(state)).map(|_| ())
    }

    fn activate(&mut self) {
        self.signals.emit(VALUE_CHANGED, self.value());
    }
}

impl Component for ColoredBoxBlock {
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let frame = ctx.frame(&self.title);
        let inner = frame.inner(area);
        f.render_widget(frame, area);
        f.render_widget(Fill::default().style(Style::default().bg(self.color)), inner);
    }

    fn height(&self) -> u16 {
        5
    }
}

impl Interactive for ColoredBoxBlock {
    fn handle_key(&mut self, _key: KeyEvent) -> Handled {
        Handled::No
    }
}
