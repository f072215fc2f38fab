pub mod gridline;
pub mod time_scale;
pub mod time_span;
pub mod types;
pub mod windowing;
pub mod zoom;

pub use gridline::{
    DESIRED_PX_PER_STEP, GridTick, GridTicks, grid_step_size, gridlines, gridlines_with_spacing,
    time_to_string,
};
pub use time_scale::TimeScale;
pub use time_span::{TIME_SPAN_EPSILON, TimeSpan};
pub use types::{PanelSize, Viewport};
pub use windowing::{intervals_in_window, samples_in_window, samples_in_window_with_lead};
pub use zoom::{
    MAX_ZOOM_SPAN, MIN_ZOOM_SPAN, clip_to_trace, compute_pan, compute_zoom, compute_zoom_with_min_span,
    fit_within,
};
