use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::{RedrawRequest, RedrawScheduler, RedrawTopic, TimelineConfig};
use crate::core::{
    TimeScale, TimeSpan, Viewport, clip_to_trace, compute_pan, compute_zoom_with_min_span,
    fit_within,
};
use crate::error::{TimelineError, TimelineResult};
use crate::overlay::Area;

/// Local view state of one trace-viewer session: what is visible, how it
/// maps to pixels, what is selected and hovered, and whether a redraw is
/// due.
///
/// Every mutator keeps `time_scale` in sync with `visible_window` and the
/// viewport before returning, and marks the scheduler dirty when something
/// visible changed.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportContext {
    viewport: Viewport,
    shell_width: f64,
    device_pixel_ratio: f64,
    trace_span: TimeSpan,
    visible_window: TimeSpan,
    time_scale: TimeScale,
    min_zoom_span: f64,
    selected_area: Option<Area>,
    hover_time: Option<f64>,
    redraw: RedrawScheduler,
}

/// Serializable copy of the view state, used in engine snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub viewport: Viewport,
    pub shell_width: f64,
    pub device_pixel_ratio: f64,
    pub trace_span: TimeSpan,
    pub visible_window: TimeSpan,
    pub sec_per_px: f64,
    pub selected_area: Option<Area>,
    pub hover_time: Option<f64>,
}

impl ViewportContext {
    /// Starts a session showing the whole trace.
    pub fn new(config: &TimelineConfig) -> TimelineResult<Self> {
        config.validate()?;
        let trace_span = config.trace_span()?;
        let time_scale = TimeScale::new(trace_span, config.shell_width, config.viewport.width_px());
        let mut redraw = RedrawScheduler::new();
        redraw.request(RedrawRequest::full());
        Ok(Self {
            viewport: config.viewport,
            shell_width: config.shell_width,
            device_pixel_ratio: config.device_pixel_ratio,
            trace_span,
            visible_window: trace_span,
            time_scale,
            min_zoom_span: config.min_zoom_span,
            selected_area: None,
            hover_time: None,
            redraw,
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn shell_width(&self) -> f64 {
        self.shell_width
    }

    #[must_use]
    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    #[must_use]
    pub fn trace_span(&self) -> TimeSpan {
        self.trace_span
    }

    #[must_use]
    pub fn visible_window(&self) -> TimeSpan {
        self.visible_window
    }

    #[must_use]
    pub fn time_scale(&self) -> &TimeScale {
        &self.time_scale
    }

    #[must_use]
    pub fn min_zoom_span(&self) -> f64 {
        self.min_zoom_span
    }

    #[must_use]
    pub fn selected_area(&self) -> Option<&Area> {
        self.selected_area.as_ref()
    }

    #[must_use]
    pub fn hover_time(&self) -> Option<f64> {
        self.hover_time
    }

    #[must_use]
    pub fn redraw(&self) -> &RedrawScheduler {
        &self.redraw
    }

    pub fn redraw_mut(&mut self) -> &mut RedrawScheduler {
        &mut self.redraw
    }

    pub fn request_redraw(&mut self, request: RedrawRequest) {
        self.redraw.request(request);
    }

    /// Scale of the whole-trace overview strip.
    #[must_use]
    pub fn overview_scale(&self) -> TimeScale {
        TimeScale::new(self.trace_span, self.shell_width, self.viewport.width_px())
    }

    /// Whether canvas-local `x` lies in the time area (right of the shell).
    #[must_use]
    pub fn is_in_time_area(&self, x: f64) -> bool {
        x >= self.shell_width && x < self.viewport.width_px()
    }

    /// Shows `window`, clipped to the trace. Returns `true` when the visible
    /// window changed.
    pub fn set_visible_window(&mut self, window: TimeSpan) -> bool {
        let window = clip_to_trace(window, self.trace_span);
        if window.approx_eq(self.visible_window) {
            return false;
        }
        self.visible_window = window;
        self.time_scale.set_time_bounds(window);
        trace!(start = window.start(), end = window.end(), "visible window changed");
        self.redraw.request(RedrawRequest::light(RedrawTopic::TimeWindow));
        true
    }

    /// Pans by `delta_px` pixels; positive moves later in time. The window
    /// keeps its duration and never leaves the trace.
    pub fn pan_by_px(&mut self, delta_px: f64) -> bool {
        let delta_time = self.time_scale.delta_px_to_duration(delta_px);
        let panned = compute_pan(self.visible_window, self.trace_span, delta_time);
        self.set_visible_window(panned)
    }

    /// Zooms by `zoom_factor` around canvas-local `anchor_px`.
    pub fn zoom_at_px(&mut self, zoom_factor: f64, anchor_px: f64) -> bool {
        let zoomed = compute_zoom_with_min_span(
            &self.time_scale,
            self.visible_window,
            zoom_factor,
            anchor_px,
            self.min_zoom_span,
        );
        self.set_visible_window(fit_within(zoomed, self.trace_span))
    }

    /// Rebinds the pixel side of the scale; the visible window is kept.
    pub fn resize(&mut self, viewport: Viewport) -> TimelineResult<()> {
        if !viewport.is_valid() {
            warn!(width = viewport.width, height = viewport.height, "rejected viewport resize");
            return Err(TimelineError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if viewport.width_px() <= self.shell_width {
            return Err(TimelineError::InvalidData(format!(
                "viewport width {} leaves no room past the {}px shell",
                viewport.width, self.shell_width
            )));
        }
        self.viewport = viewport;
        self.time_scale
            .set_limits_px(self.shell_width, viewport.width_px());
        debug!(width = viewport.width, height = viewport.height, "viewport resized");
        self.redraw.request(RedrawRequest::full());
        Ok(())
    }

    pub fn set_device_pixel_ratio(&mut self, device_pixel_ratio: f64) -> TimelineResult<()> {
        if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
            return Err(TimelineError::InvalidData(format!(
                "device pixel ratio must be finite and > 0, got {device_pixel_ratio}"
            )));
        }
        self.device_pixel_ratio = device_pixel_ratio;
        self.redraw.request(RedrawRequest::full());
        Ok(())
    }

    pub fn set_selected_area(&mut self, area: Option<Area>) {
        if self.selected_area == area {
            return;
        }
        self.selected_area = area;
        self.redraw.request(RedrawRequest::light(RedrawTopic::Selection));
    }

    pub fn set_hover_time(&mut self, hover_time: Option<f64>) {
        if self.hover_time == hover_time {
            return;
        }
        self.hover_time = hover_time;
        self.redraw.request(RedrawRequest::cursor());
    }

    #[must_use]
    pub fn state(&self) -> ViewportState {
        ViewportState {
            viewport: self.viewport,
            shell_width: self.shell_width,
            device_pixel_ratio: self.device_pixel_ratio,
            trace_span: self.trace_span,
            visible_window: self.visible_window,
            sec_per_px: self.time_scale.sec_per_px(),
            selected_area: self.selected_area.clone(),
            hover_time: self.hover_time,
        }
    }
}
