use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{SelectionEdge, grabbed_selection_edge};
use crate::core::{TimeScale, TimeSpan, compute_pan, fit_within};

/// What a drag on the overview strip is doing to the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BrushMode {
    /// Sweeping out a new window from `anchor_time`.
    NewWindow { anchor_time: f64 },
    /// Dragging the whole window; `grab_offset` is the pointer time minus
    /// the window start at grab time.
    Move { grab_offset: f64, start_window: TimeSpan },
    /// Moving one edge while the other stays at `fixed_time`.
    Edit { edge: SelectionEdge, fixed_time: f64 },
}

/// Brush on the whole-trace overview. Positions are absolute canvas x on
/// the overview's own scale.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverviewBrush {
    mode: Option<BrushMode>,
}

impl OverviewBrush {
    #[must_use]
    pub fn mode(&self) -> Option<BrushMode> {
        self.mode
    }

    /// Picks the brush mode for a drag that started at `x`.
    pub fn begin(
        &mut self,
        x: f64,
        scale: &TimeScale,
        visible: TimeSpan,
        hotspot_px: f64,
        device_pixel_ratio: f64,
    ) -> BrushMode {
        let start_px = scale.time_to_px(visible.start());
        let end_px = scale.time_to_px(visible.end());
        let mode = match grabbed_selection_edge(start_px, end_px, x, hotspot_px, device_pixel_ratio) {
            Some(SelectionEdge::Start) => BrushMode::Edit {
                edge: SelectionEdge::Start,
                fixed_time: visible.end(),
            },
            Some(SelectionEdge::End) => BrushMode::Edit {
                edge: SelectionEdge::End,
                fixed_time: visible.start(),
            },
            None if x > start_px && x < end_px => BrushMode::Move {
                grab_offset: scale.px_to_time(x) - visible.start(),
                start_window: visible,
            },
            None => BrushMode::NewWindow {
                anchor_time: scale.px_to_time(x.clamp(scale.start_px(), scale.end_px())),
            },
        };
        trace!(?mode, "overview brush started");
        self.mode = Some(mode);
        mode
    }

    /// Visible window for the pointer at `x`, or `None` when no brush drag
    /// is active. The result lies inside `trace` and is at least `min_span`
    /// long.
    #[must_use]
    pub fn update(&self, x: f64, scale: &TimeScale, trace: TimeSpan, min_span: f64) -> Option<TimeSpan> {
        let mode = self.mode?;
        let time = scale.px_to_time(x.clamp(scale.start_px(), scale.end_px()));
        let window = match mode {
            BrushMode::NewWindow { anchor_time } => {
                let start = anchor_time.min(time);
                let end = anchor_time.max(time).max(start + min_span);
                fit_within(TimeSpan::new(start, end), trace)
            }
            BrushMode::Move {
                grab_offset,
                start_window,
            } => compute_pan(start_window, trace, time - grab_offset - start_window.start()),
            BrushMode::Edit { edge, fixed_time } => match edge {
                SelectionEdge::Start => {
                    let start = time.min(fixed_time - min_span).max(trace.start());
                    TimeSpan::new(start, fixed_time.max(start))
                }
                SelectionEdge::End => {
                    let end = time.max(fixed_time + min_span).min(trace.end());
                    TimeSpan::new(fixed_time.min(end), end)
                }
            },
        };
        Some(window)
    }

    pub fn end(&mut self) {
        self.mode = None;
    }
}
