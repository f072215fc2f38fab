use crate::core::PanelSize;
use crate::overlay::{Note, draw_vertical_line_at_time, draw_vertical_selection};
use crate::panel::PanelRenderContext;
use crate::render::{Color, PaintContext};

pub const SELECTION_COLOR: Color = Color::rgb(0.15, 0.45, 0.85);
pub const HOVER_LINE_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.35);

/// Paints the shared overlay over one row: the area selection, the
/// selected note, and the hovered timestamp. Drawing is clipped to the time
/// area so nothing spills into the shell.
pub fn draw_timeline_overlay(
    ctx: &mut PaintContext<'_>,
    size: PanelSize,
    view: &PanelRenderContext<'_>,
) {
    let scale = view.time_scale;
    ctx.save();
    ctx.clip_rect(view.shell_width, 0.0, size.width - view.shell_width, size.height);

    if let Some(area) = view.selected_area {
        draw_vertical_selection(
            ctx,
            scale,
            area.start_sec,
            area.end_sec,
            size.height,
            SELECTION_COLOR,
            view.selection_line_width,
        );
    }

    match view.notes.selected_note() {
        Some(Note::Default(note)) => draw_vertical_line_at_time(
            ctx,
            scale,
            note.timestamp,
            size.height,
            note.color,
            view.selection_line_width,
        ),
        Some(Note::Area(note)) => draw_vertical_selection(
            ctx,
            scale,
            note.area.start_sec,
            note.area.end_sec,
            size.height,
            note.color,
            view.selection_line_width,
        ),
        None => {}
    }

    if let Some(time) = view.hover_time {
        draw_vertical_line_at_time(ctx, scale, time, size.height, HOVER_LINE_COLOR, 1.0);
    }
    ctx.restore();
}
