// Screen layout and drawing
//
// ┌ title ─────────────────────────────────────────────┐
// ├ blocks (stacked, design order) ──┬ logs ───────────┤
// │                                  │                 │
// └ status ──────────────────────────┴─────────────────┘

use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

use super::app::App;
use super::components::{logs_panel, status_bar, title_bar};
use super::traits::RenderContext;

/// Narrower terminals drop the logs panel
const LOGS_MIN_WIDTH: u16 = 100;

pub fn draw(f: &mut Frame, app: &mut App) {
    let [title, main, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(2),
    ])
    .areas(f.area());

    title_bar::render(f, title, app);

    let (blocks_area, logs_area) = if main.width >= LOGS_MIN_WIDTH {
        let [blocks, logs] =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                .areas(main);
        (blocks, Some(logs))
    } else {
        (main, None)
    };

    app.block_areas = block_areas(app, blocks_area);
    for (index, ((_, block), area)) in app.blocks.iter().zip(&app.block_areas).enumerate() {
        if area.height == 0 {
            continue;
        }
        let ctx = RenderContext::new(&app.theme, index == app.focused);
        block.render(f, *area, &ctx);
    }

    if let Some(area) = logs_area {
        logs_panel::render(f, area, app);
    }
    status_bar::render(f, status, app);
}

/// Stack blocks at their preferred heights; ones that don't fit get no rows
fn block_areas(app: &App, area: Rect) -> Vec<Rect> {
    let mut constraints: Vec<Constraint> = app
        .blocks
        .iter()
        .map(|(_, block)| Constraint::Length(block.height()))
        .collect();
    constraints.push(Constraint::Min(0));

    let mut areas = Layout::vertical(constraints).split(area).to_vec();
    areas.pop();
    areas
}
