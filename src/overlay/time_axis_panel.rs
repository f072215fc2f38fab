use crate::core::{PanelSize, time_to_string};
use crate::panel::{Panel, PanelRenderContext};
use crate::render::{Color, PaintContext, TextHAlign};

pub const TIME_AXIS_HEIGHT: f64 = 22.0;

const BACKGROUND: Color = Color::rgb(1.0, 1.0, 1.0);
const TICK_COLOR: Color = Color::rgb(0.6, 0.6, 0.6);
const LABEL_COLOR: Color = Color::rgb(0.25, 0.25, 0.25);
const LABEL_FONT_PX: f64 = 10.0;
const TICK_LENGTH_PX: f64 = 6.0;

/// Axis ruler: one tick per gridline, labelled relative to trace start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeAxisPanel;

impl Panel for TimeAxisPanel {
    fn name(&self) -> &str {
        "time-axis"
    }

    fn height(&self) -> f64 {
        TIME_AXIS_HEIGHT
    }

    fn render_canvas(&self, ctx: &mut PaintContext<'_>, size: PanelSize, view: &PanelRenderContext<'_>) {
        ctx.fill_rect(0.0, 0.0, size.width, size.height, BACKGROUND);
        ctx.fill_text(
            "Time",
            8.0,
            (size.height - LABEL_FONT_PX) / 2.0,
            LABEL_FONT_PX,
            LABEL_COLOR,
            TextHAlign::Left,
        );

        let offset = view.trace_span.start();
        for tick in view.grid_ticks {
            ctx.line(tick.x, size.height - TICK_LENGTH_PX, tick.x, size.height, 1.0, TICK_COLOR);
            ctx.fill_text(
                time_to_string(tick.time - offset),
                tick.x + 3.0,
                2.0,
                LABEL_FONT_PX,
                LABEL_COLOR,
                TextHAlign::Left,
            );
        }
    }
}
