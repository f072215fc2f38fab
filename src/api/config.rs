use serde::{Deserialize, Serialize};

use crate::core::{MIN_ZOOM_SPAN, TimeSpan, Viewport};
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::{
    DEFAULT_BOUNDARY_HOTSPOT_PX, DEFAULT_DRAG_THRESHOLD_PX, DEFAULT_KEYBOARD_PAN_PX_PER_FRAME,
    DEFAULT_ZOOM_RATIO_PER_FRAME,
};
use crate::overlay::DEFAULT_VERTICAL_LINE_WIDTH;
use crate::panel::DEFAULT_TRACK_HEIGHT;

pub const DEFAULT_SHELL_WIDTH_PX: f64 = 250.0;
pub const DEFAULT_GROUP_HEADER_HEIGHT_PX: f64 = 40.0;
pub const DEFAULT_WHEEL_ZOOM_SPEED: f64 = -0.02;
pub const DEFAULT_HORIZONTAL_WHEEL_PAN_SPEED: f64 = 1.0;

/// Engine bootstrap configuration.
///
/// Serializable so hosts can keep timeline setup next to their own settings;
/// every tuning knob falls back to its default when omitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub viewport: Viewport,
    pub trace_start: f64,
    pub trace_end: f64,
    #[serde(default = "default_shell_width")]
    pub shell_width: f64,
    #[serde(default = "default_device_pixel_ratio")]
    pub device_pixel_ratio: f64,
    #[serde(default = "default_gridline_spacing")]
    pub gridline_spacing_px: f64,
    #[serde(default = "default_min_zoom_span")]
    pub min_zoom_span: f64,
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold_px: f64,
    #[serde(default = "default_boundary_hotspot")]
    pub boundary_hotspot_px: f64,
    #[serde(default = "default_track_height")]
    pub default_track_height: f64,
    #[serde(default = "default_group_header_height")]
    pub group_header_height: f64,
    #[serde(default = "default_selection_line_width")]
    pub selection_line_width: f64,
    #[serde(default = "default_keyboard_pan")]
    pub keyboard_pan_px_per_frame: f64,
    #[serde(default = "default_keyboard_zoom")]
    pub keyboard_zoom_ratio_per_frame: f64,
    #[serde(default = "default_wheel_zoom_speed")]
    pub wheel_zoom_speed: f64,
    #[serde(default = "default_horizontal_wheel_pan_speed")]
    pub horizontal_wheel_pan_speed: f64,
}

impl TimelineConfig {
    /// Config with default tuning for a trace spanning `[trace_start, trace_end]`.
    #[must_use]
    pub fn new(viewport: Viewport, trace_start: f64, trace_end: f64) -> Self {
        Self {
            viewport,
            trace_start,
            trace_end,
            shell_width: default_shell_width(),
            device_pixel_ratio: default_device_pixel_ratio(),
            gridline_spacing_px: default_gridline_spacing(),
            min_zoom_span: default_min_zoom_span(),
            drag_threshold_px: default_drag_threshold(),
            boundary_hotspot_px: default_boundary_hotspot(),
            default_track_height: default_track_height(),
            group_header_height: default_group_header_height(),
            selection_line_width: default_selection_line_width(),
            keyboard_pan_px_per_frame: default_keyboard_pan(),
            keyboard_zoom_ratio_per_frame: default_keyboard_zoom(),
            wheel_zoom_speed: default_wheel_zoom_speed(),
            horizontal_wheel_pan_speed: default_horizontal_wheel_pan_speed(),
        }
    }

    #[must_use]
    pub fn with_shell_width(mut self, shell_width: f64) -> Self {
        self.shell_width = shell_width;
        self
    }

    #[must_use]
    pub fn with_device_pixel_ratio(mut self, device_pixel_ratio: f64) -> Self {
        self.device_pixel_ratio = device_pixel_ratio;
        self
    }

    #[must_use]
    pub fn with_boundary_hotspot_px(mut self, hotspot_px: f64) -> Self {
        self.boundary_hotspot_px = hotspot_px;
        self
    }

    #[must_use]
    pub fn with_gridline_spacing_px(mut self, spacing_px: f64) -> Self {
        self.gridline_spacing_px = spacing_px;
        self
    }

    /// Trace bounds as a span, rejecting inverted or non-finite values.
    pub fn trace_span(&self) -> TimelineResult<TimeSpan> {
        TimeSpan::try_new(self.trace_start, self.trace_end)
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if !self.viewport.is_valid() {
            return Err(TimelineError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.trace_span()?;
        if !self.shell_width.is_finite()
            || self.shell_width < 0.0
            || self.shell_width >= self.viewport.width_px()
        {
            return Err(TimelineError::InvalidData(format!(
                "shell width must be finite and within [0, viewport width), got {}",
                self.shell_width
            )));
        }
        let positive = [
            ("device_pixel_ratio", self.device_pixel_ratio),
            ("gridline_spacing_px", self.gridline_spacing_px),
            ("min_zoom_span", self.min_zoom_span),
            ("default_track_height", self.default_track_height),
            ("group_header_height", self.group_header_height),
            ("selection_line_width", self.selection_line_width),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TimelineError::InvalidData(format!(
                    "{name} must be finite and > 0, got {value}"
                )));
            }
        }
        let non_negative = [
            ("drag_threshold_px", self.drag_threshold_px),
            ("boundary_hotspot_px", self.boundary_hotspot_px),
            ("keyboard_pan_px_per_frame", self.keyboard_pan_px_per_frame),
            ("keyboard_zoom_ratio_per_frame", self.keyboard_zoom_ratio_per_frame),
            ("horizontal_wheel_pan_speed", self.horizontal_wheel_pan_speed),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(TimelineError::InvalidData(format!(
                    "{name} must be finite and >= 0, got {value}"
                )));
            }
        }
        if !self.wheel_zoom_speed.is_finite() {
            return Err(TimelineError::InvalidData(
                "wheel_zoom_speed must be finite".to_owned(),
            ));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(self) -> TimelineResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| TimelineError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| TimelineError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_shell_width() -> f64 {
    DEFAULT_SHELL_WIDTH_PX
}

fn default_device_pixel_ratio() -> f64 {
    1.0
}

fn default_gridline_spacing() -> f64 {
    crate::core::DESIRED_PX_PER_STEP
}

fn default_min_zoom_span() -> f64 {
    MIN_ZOOM_SPAN
}

fn default_drag_threshold() -> f64 {
    DEFAULT_DRAG_THRESHOLD_PX
}

fn default_boundary_hotspot() -> f64 {
    DEFAULT_BOUNDARY_HOTSPOT_PX
}

fn default_track_height() -> f64 {
    DEFAULT_TRACK_HEIGHT
}

fn default_group_header_height() -> f64 {
    DEFAULT_GROUP_HEADER_HEIGHT_PX
}

fn default_selection_line_width() -> f64 {
    DEFAULT_VERTICAL_LINE_WIDTH
}

fn default_keyboard_pan() -> f64 {
    DEFAULT_KEYBOARD_PAN_PX_PER_FRAME
}

fn default_keyboard_zoom() -> f64 {
    DEFAULT_ZOOM_RATIO_PER_FRAME
}

fn default_wheel_zoom_speed() -> f64 {
    DEFAULT_WHEEL_ZOOM_SPEED
}

fn default_horizontal_wheel_pan_speed() -> f64 {
    DEFAULT_HORIZONTAL_WHEEL_PAN_SPEED
}
