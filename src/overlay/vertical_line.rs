use crate::core::TimeScale;
use crate::render::{Color, PaintContext};

pub const DEFAULT_VERTICAL_LINE_WIDTH: f64 = 2.0;

/// Fill used to dim everything outside a selected range.
pub const OUTSIDE_SELECTION_DIM: Color = Color::rgba(0.0, 0.0, 0.0, 0.2);

/// Full-height line at `time`.
pub fn draw_vertical_line_at_time(
    ctx: &mut PaintContext<'_>,
    scale: &TimeScale,
    time: f64,
    height: f64,
    color: Color,
    line_width: f64,
) {
    let x = scale.time_to_px(time);
    ctx.line(x, 0.0, x, height, line_width, color);
}

/// Marks `[start, end]` by dimming the time area outside it and drawing a
/// solid line on each edge. The inside is left untouched.
pub fn draw_vertical_selection(
    ctx: &mut PaintContext<'_>,
    scale: &TimeScale,
    start: f64,
    end: f64,
    height: f64,
    color: Color,
    line_width: f64,
) {
    let area_left = scale.start_px();
    let area_right = scale.end_px();
    let start_px = scale.time_to_px(start).clamp(area_left, area_right);
    let end_px = scale.time_to_px(end).clamp(area_left, area_right);

    ctx.fill_rect(area_left, 0.0, start_px - area_left, height, OUTSIDE_SELECTION_DIM);
    ctx.fill_rect(end_px, 0.0, area_right - end_px, height, OUTSIDE_SELECTION_DIM);

    draw_vertical_line_at_time(ctx, scale, start, height, color, line_width);
    draw_vertical_line_at_time(ctx, scale, end, height, color, line_width);
}
