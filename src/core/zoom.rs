use crate::core::{TimeScale, TimeSpan};

/// Smallest visible duration a zoom can produce, in seconds (0.1ms).
pub const MIN_ZOOM_SPAN: f64 = 1e-4;

/// Largest duration a zoom can produce. Keeps both edges finite however
/// large the factor is.
pub const MAX_ZOOM_SPAN: f64 = f64::MAX / 4.0;

/// Computes the span visible after zooming by `zoom_factor` around a pixel.
///
/// `zoom_factor < 1.0` zooms in. The anchor is clamped into the scale's pixel
/// range and the timestamp under it keeps its relative position. The result
/// is never shorter than `MIN_ZOOM_SPAN` nor longer than `MAX_ZOOM_SPAN`;
/// fitting it into the trace bounds is left to the caller.
#[must_use]
pub fn compute_zoom(
    scale: &TimeScale,
    span: TimeSpan,
    zoom_factor: f64,
    zoom_px_anchor: f64,
) -> TimeSpan {
    compute_zoom_with_min_span(scale, span, zoom_factor, zoom_px_anchor, MIN_ZOOM_SPAN)
}

#[must_use]
pub fn compute_zoom_with_min_span(
    scale: &TimeScale,
    span: TimeSpan,
    zoom_factor: f64,
    zoom_px_anchor: f64,
    min_span: f64,
) -> TimeSpan {
    let start_px = scale.start_px();
    let end_px = scale.end_px();
    let delta_px = end_px - start_px;
    let delta_time = span.duration();

    let zoom_factor = if zoom_factor.is_finite() && zoom_factor > 0.0 {
        zoom_factor
    } else {
        1.0
    };
    let new_delta_time = (delta_time * zoom_factor)
        .min(MAX_ZOOM_SPAN)
        .max(min_span);

    let anchor_px = if zoom_px_anchor.is_finite() {
        zoom_px_anchor.clamp(start_px.min(end_px), end_px.max(start_px))
    } else {
        start_px
    };
    let anchor_time = scale.px_to_time(anchor_px);
    let ratio = if delta_px > 0.0 {
        (anchor_px - start_px) / delta_px
    } else {
        0.0
    };

    let new_start = anchor_time - new_delta_time * ratio;
    TimeSpan::new(new_start, new_start + new_delta_time)
}

/// Shifts `visible` by `delta_time` seconds without leaving `trace`.
///
/// When the shift would push one edge past the trace boundary, that edge is
/// pinned to the boundary and the other edge follows so the duration is
/// preserved. A visible span longer than the trace collapses to the trace.
#[must_use]
pub fn compute_pan(visible: TimeSpan, trace: TimeSpan, delta_time: f64) -> TimeSpan {
    if !delta_time.is_finite() {
        return fit_within(visible, trace);
    }
    let duration = visible.duration();
    if duration >= trace.duration() {
        return trace;
    }

    let mut start = visible.start() + delta_time;
    if start < trace.start() {
        start = trace.start();
    }
    if start + duration > trace.end() {
        start = trace.end() - duration;
    }
    TimeSpan::new(start, start + duration)
}

/// Intersects `span` with `trace`, falling back to `trace` when they are
/// disjoint.
#[must_use]
pub fn clip_to_trace(span: TimeSpan, trace: TimeSpan) -> TimeSpan {
    let start = span.start().max(trace.start());
    let end = span.end().min(trace.end());
    if start > end {
        return trace;
    }
    TimeSpan::new(start, end)
}

/// Moves `span` inside `trace` preserving its duration where possible.
#[must_use]
pub fn fit_within(span: TimeSpan, trace: TimeSpan) -> TimeSpan {
    compute_pan(span, trace, 0.0)
}
