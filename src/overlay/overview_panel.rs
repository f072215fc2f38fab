use crate::core::{PanelSize, TimeScale, gridlines, time_to_string};
use crate::overlay::{SELECTION_COLOR, draw_vertical_selection};
use crate::panel::{Panel, PanelDragBehavior, PanelRenderContext};
use crate::render::{Color, PaintContext, TextHAlign};

pub const OVERVIEW_PANEL_HEIGHT: f64 = 40.0;

const BACKGROUND: Color = Color::rgb(0.96, 0.96, 0.96);
const TICK_COLOR: Color = Color::rgb(0.8, 0.8, 0.8);
const LABEL_COLOR: Color = Color::rgb(0.35, 0.35, 0.35);
const LABEL_FONT_PX: f64 = 10.0;
const HANDLE_WIDTH_PX: f64 = 3.0;

/// Whole-trace strip with a brush marking the visible window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverviewPanel;

impl OverviewPanel {
    /// Scale mapping the whole trace onto the panel's time area.
    #[must_use]
    pub fn overview_scale(view: &PanelRenderContext<'_>, width: f64) -> TimeScale {
        TimeScale::new(view.trace_span, view.shell_width, width)
    }
}

impl Panel for OverviewPanel {
    fn name(&self) -> &str {
        "overview"
    }

    fn height(&self) -> f64 {
        OVERVIEW_PANEL_HEIGHT
    }

    fn render_canvas(&self, ctx: &mut PaintContext<'_>, size: PanelSize, view: &PanelRenderContext<'_>) {
        ctx.fill_rect(0.0, 0.0, size.width, size.height, BACKGROUND);
        let scale = Self::overview_scale(view, size.width);

        let offset = view.trace_span.start();
        for tick in gridlines(size.width, view.trace_span, &scale) {
            ctx.line(tick.x, 0.0, tick.x, size.height, 1.0, TICK_COLOR);
            ctx.fill_text(
                time_to_string(tick.time - offset),
                tick.x + 3.0,
                2.0,
                LABEL_FONT_PX,
                LABEL_COLOR,
                TextHAlign::Left,
            );
        }

        let visible = view.visible_window;
        draw_vertical_selection(
            ctx,
            &scale,
            visible.start(),
            visible.end(),
            size.height,
            SELECTION_COLOR,
            1.0,
        );
        for edge in [visible.start(), visible.end()] {
            let x = scale.time_to_px(edge);
            ctx.fill_rect(
                x - HANDLE_WIDTH_PX / 2.0,
                size.height / 4.0,
                HANDLE_WIDTH_PX,
                size.height / 2.0,
                SELECTION_COLOR,
            );
        }
    }

    fn drag_behavior(&self) -> PanelDragBehavior {
        PanelDragBehavior::OverviewBrush
    }

    fn draws_timeline_overlay(&self) -> bool {
        false
    }
}
