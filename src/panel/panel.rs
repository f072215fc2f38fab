use serde::{Deserialize, Serialize};

use crate::api::Action;
use crate::core::{GridTick, PanelSize, TimeScale, TimeSpan};
use crate::overlay::{Area, NoteStore};
use crate::panel::LocalPoint;
use crate::render::PaintContext;

/// How a pointer-down on a panel is interpreted once it turns into a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PanelDragBehavior {
    /// Pan, area-select or edit a selection boundary on the shared scale.
    #[default]
    Timeline,
    /// Brush the visible window on a whole-trace overview.
    OverviewBrush,
    /// Drags are ignored.
    None,
}

/// Shared per-redraw state handed to every panel.
///
/// `time_scale` is the absolute scale: its pixel range starts at
/// `shell_width` and ends at the viewport's right edge.
#[derive(Debug, Clone, Copy)]
pub struct PanelRenderContext<'a> {
    pub time_scale: &'a TimeScale,
    pub visible_window: TimeSpan,
    pub trace_span: TimeSpan,
    pub shell_width: f64,
    pub device_pixel_ratio: f64,
    pub grid_ticks: &'a [GridTick],
    pub selected_area: Option<&'a Area>,
    pub hover_time: Option<f64>,
    pub notes: &'a NoteStore,
    pub selection_line_width: f64,
}

/// A drawable region composed by the container that is not a data track:
/// time axis, notes bar, overview, or a host-provided header.
///
/// Coordinates are relative to the panel's top-left corner; `x` still
/// includes the shell so `time_scale` applies directly.
pub trait Panel {
    fn name(&self) -> &str;

    fn height(&self) -> f64;

    fn render_canvas(
        &self,
        ctx: &mut PaintContext<'_>,
        size: PanelSize,
        view: &PanelRenderContext<'_>,
    );

    fn on_mouse_move(&mut self, _position: LocalPoint, _view: &PanelRenderContext<'_>) {}

    /// Returns `true` when the click was consumed. State changes are
    /// reported by pushing onto `actions`, never applied directly.
    fn on_mouse_click(
        &mut self,
        _position: LocalPoint,
        _view: &PanelRenderContext<'_>,
        _actions: &mut Vec<Action>,
    ) -> bool {
        false
    }

    fn on_mouse_out(&mut self) {}

    fn drag_behavior(&self) -> PanelDragBehavior {
        PanelDragBehavior::Timeline
    }

    /// Whether the selection/hover/note overlay is painted over this panel.
    /// Panels on a different time scale (the overview) opt out.
    fn draws_timeline_overlay(&self) -> bool {
        true
    }
}
