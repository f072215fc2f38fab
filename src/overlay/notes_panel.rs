use tracing::debug;

use crate::api::Action;
use crate::core::PanelSize;
use crate::overlay::{AREA_TRIANGLE_WIDTH_PX, FLAG_WIDTH_PX, Note, NoteId, random_note_color};
use crate::panel::{LocalPoint, Panel, PanelRenderContext};
use crate::render::{Color, PaintContext};

pub const NOTES_PANEL_HEIGHT: f64 = 20.0;

const BACKGROUND: Color = Color::rgb(0.98, 0.98, 0.98);
const PREVIEW_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.3);

/// Pinned bar holding note flags. Clicking a flag selects its note,
/// clicking empty space adds a note at that timestamp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotesPanel {
    hovered_note: Option<NoteId>,
    hover_x: Option<f64>,
}

impl NotesPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn hovered_note(&self) -> Option<NoteId> {
        self.hovered_note
    }
}

fn draw_flag(ctx: &mut PaintContext<'_>, x: f64, height: f64, color: Color, emphasized: bool) {
    let flag_height = height / 2.0;
    ctx.line(x, 0.0, x, height, if emphasized { 2.0 } else { 1.0 }, color);
    ctx.fill_rect(x, 0.0, FLAG_WIDTH_PX, flag_height, color);
}

fn draw_triangle(ctx: &mut PaintContext<'_>, tip_x: f64, base_x: f64, height: f64, color: Color) {
    ctx.line(base_x, 0.0, base_x, height, 1.0, color);
    ctx.line(base_x, 0.0, tip_x, height / 2.0, 1.0, color);
    ctx.line(tip_x, height / 2.0, base_x, height, 1.0, color);
}

impl Panel for NotesPanel {
    fn name(&self) -> &str {
        "notes"
    }

    fn height(&self) -> f64 {
        NOTES_PANEL_HEIGHT
    }

    fn render_canvas(&self, ctx: &mut PaintContext<'_>, size: PanelSize, view: &PanelRenderContext<'_>) {
        ctx.fill_rect(0.0, 0.0, size.width, size.height, BACKGROUND);
        ctx.save();
        ctx.clip_rect(view.shell_width, 0.0, size.width - view.shell_width, size.height);

        let scale = view.time_scale;
        let selected = view.notes.selected();
        for note in view.notes.sorted_by_time() {
            let emphasized = selected == Some(note.id()) || self.hovered_note == Some(note.id());
            match note {
                Note::Default(point) => {
                    let x = scale.time_to_px(point.timestamp);
                    draw_flag(ctx, x, size.height, point.color, emphasized);
                }
                Note::Area(area) => {
                    let start_px = scale.time_to_px(area.area.start_sec);
                    let end_px = scale.time_to_px(area.area.end_sec);
                    let line_width = if emphasized { 2.0 } else { 1.0 };
                    draw_triangle(ctx, start_px + AREA_TRIANGLE_WIDTH_PX, start_px, size.height, area.color);
                    draw_triangle(ctx, end_px - AREA_TRIANGLE_WIDTH_PX, end_px, size.height, area.color);
                    ctx.line(start_px, 0.0, end_px, 0.0, line_width, area.color);
                }
            }
        }

        if self.hovered_note.is_none() {
            if let Some(x) = self.hover_x {
                draw_flag(ctx, x, size.height, PREVIEW_COLOR, false);
            }
        }
        ctx.restore();
    }

    fn on_mouse_move(&mut self, position: LocalPoint, view: &PanelRenderContext<'_>) {
        if position.x < view.shell_width {
            self.on_mouse_out();
            return;
        }
        self.hovered_note = view.notes.hit_test(position.x, view.time_scale);
        self.hover_x = Some(position.x);
    }

    fn on_mouse_click(
        &mut self,
        position: LocalPoint,
        view: &PanelRenderContext<'_>,
        actions: &mut Vec<Action>,
    ) -> bool {
        if position.x < view.shell_width {
            return false;
        }
        if let Some(id) = view.notes.hit_test(position.x, view.time_scale) {
            actions.push(Action::SelectNote { id });
            return true;
        }
        let id = NoteId::new_random();
        let timestamp = view.time_scale.px_to_time(position.x);
        debug!(note = %id, timestamp, "note requested from notes panel click");
        actions.push(Action::AddNote {
            id,
            timestamp,
            color: random_note_color(),
        });
        true
    }

    fn on_mouse_out(&mut self) {
        self.hovered_note = None;
        self.hover_x = None;
    }
}
