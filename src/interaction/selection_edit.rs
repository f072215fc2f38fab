use serde::{Deserialize, Serialize};

/// Hotspot radius around a selection boundary, in device pixels.
pub const DEFAULT_BOUNDARY_HOTSPOT_PX: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionEdge {
    Start,
    End,
}

/// Returns the selection edge grabbed by a pointer at `mouse_px`, if any.
///
/// An edge is grabbable when the pointer is closer than
/// `hotspot_px * device_pixel_ratio`. When both edges qualify the closer one
/// wins; an exact tie picks the start edge.
#[must_use]
pub fn grabbed_selection_edge(
    start_px: f64,
    end_px: f64,
    mouse_px: f64,
    hotspot_px: f64,
    device_pixel_ratio: f64,
) -> Option<SelectionEdge> {
    let radius = hotspot_px * device_pixel_ratio;
    let to_start = (start_px - mouse_px).abs();
    let to_end = (end_px - mouse_px).abs();
    if to_start.min(to_end) >= radius {
        return None;
    }
    if to_start <= to_end {
        Some(SelectionEdge::Start)
    } else {
        Some(SelectionEdge::End)
    }
}

/// Position of the grabbed edge while it is dragged to `pointer_px`.
///
/// The edge cannot cross the opposite, fixed edge and cannot leave
/// `[min_px, max_px]`.
#[must_use]
pub fn clamp_edited_edge(
    edge: SelectionEdge,
    pointer_px: f64,
    fixed_px: f64,
    min_px: f64,
    max_px: f64,
) -> f64 {
    let within_view = pointer_px.clamp(min_px, max_px.max(min_px));
    match edge {
        SelectionEdge::Start => within_view.min(fixed_px),
        SelectionEdge::End => within_view.max(fixed_px),
    }
}
