use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{PanelSize, TimeScale, TimeSpan};
use crate::panel::TrackData;
use crate::render::PaintContext;

/// Height a track reports before it knows anything about its data.
pub const DEFAULT_TRACK_HEIGHT: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackId(u32);

impl TrackId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "track#{}", self.0)
    }
}

/// Static description of a track: which data slice it owns and how it is
/// drawn. `kind` selects the factory in the track registry; `settings`
/// carries kind-specific options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackConfig {
    pub id: TrackId,
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub settings: serde_json::Value,
}

impl TrackConfig {
    #[must_use]
    pub fn new(id: TrackId, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
            name: name.into(),
            settings: serde_json::Value::Null,
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: serde_json::Value) -> Self {
        self.settings = settings;
        self
    }

    /// Fills the `height` setting when the config does not carry one.
    #[must_use]
    pub fn with_default_height(mut self, height: f64) -> Self {
        if self.settings.is_null() {
            self.settings = serde_json::json!({ "height": height });
        } else if let Some(map) = self.settings.as_object_mut() {
            map.entry("height").or_insert_with(|| height.into());
        }
        self
    }

    /// Row height from the `height` setting, if it holds a usable value.
    #[must_use]
    pub fn height_setting(&self) -> Option<f64> {
        self.setting_f64("height")
            .filter(|height| height.is_finite() && *height > 0.0)
    }

    /// Reads a numeric setting, ignoring missing or non-numeric values.
    #[must_use]
    pub fn setting_f64(&self, key: &str) -> Option<f64> {
        self.settings.get(key).and_then(serde_json::Value::as_f64)
    }
}

/// Pointer position relative to the track's drawing origin (past the shell).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalPoint {
    pub x: f64,
    pub y: f64,
}

impl LocalPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Per-redraw inputs handed to a track.
///
/// `time_scale` maps the visible window onto `[0, size.width]`, i.e. the
/// track's own coordinate space after the shell translation.
#[derive(Debug, Clone, Copy)]
pub struct TrackRenderContext<'a> {
    pub time_scale: &'a TimeScale,
    pub visible_window: TimeSpan,
    pub size: PanelSize,
    pub data: Option<&'a TrackData>,
}

impl TrackRenderContext<'_> {
    /// Pixel range, in local coordinates, covered by the loaded data.
    #[must_use]
    pub fn data_px_range(&self) -> Option<(f64, f64)> {
        self.data.map(|data| {
            (
                self.time_scale.time_to_px(data.window.start()),
                self.time_scale.time_to_px(data.window.end()),
            )
        })
    }
}

/// Drawing and hit-testing contract shared by every track kind.
///
/// Tracks own no data: the compositor looks their snapshot up in the data
/// store each redraw and passes it through [`TrackRenderContext::data`].
pub trait Track {
    fn config(&self) -> &TrackConfig;

    fn id(&self) -> TrackId {
        self.config().id
    }

    fn height(&self) -> f64 {
        self.config().height_setting().unwrap_or(DEFAULT_TRACK_HEIGHT)
    }

    /// Paints the track with the origin already translated past the shell.
    /// Must not fail: missing data is drawn as a placeholder.
    fn render_canvas(&self, ctx: &mut PaintContext<'_>, view: &TrackRenderContext<'_>);

    fn on_mouse_move(&mut self, _position: LocalPoint, _view: &TrackRenderContext<'_>) {}

    /// Returns `true` when the click was consumed, which suppresses the
    /// container's deselect-on-empty-click behavior.
    fn on_mouse_click(&mut self, _position: LocalPoint, _view: &TrackRenderContext<'_>) -> bool {
        false
    }

    fn on_mouse_out(&mut self) {}
}

impl fmt::Debug for dyn Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Track").field("config", self.config()).finish()
    }
}
