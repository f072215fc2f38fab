use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::Key;

/// Horizontal pan applied per frame while `A` or `D` is held.
pub const DEFAULT_KEYBOARD_PAN_PX_PER_FRAME: f64 = 8.0;
/// Zoom ratio applied per frame while `W` or `S` is held.
pub const DEFAULT_ZOOM_RATIO_PER_FRAME: f64 = 0.008;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationKey {
    PanLeft,
    PanRight,
    ZoomIn,
    ZoomOut,
}

impl NavigationKey {
    #[must_use]
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::A => Some(Self::PanLeft),
            Key::D => Some(Self::PanRight),
            Key::W => Some(Self::ZoomIn),
            Key::S => Some(Self::ZoomOut),
            _ => None,
        }
    }
}

/// Motion to apply for one frame of held navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NavigationStep {
    /// Pixels to pan; positive moves the window later in time.
    pub pan_px: f64,
    /// Zoom factor for `compute_zoom`; below `1.0` zooms in.
    pub zoom_factor: f64,
}

/// Held-key state for WASD navigation.
///
/// Keys only record state; motion is produced once per frame by
/// [`KeyboardNavigation::step`], so holding a key scrolls smoothly at the
/// frame rate regardless of the OS key-repeat rate.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardNavigation {
    held: SmallVec<[NavigationKey; 4]>,
    pan_px_per_frame: f64,
    zoom_ratio_per_frame: f64,
}

impl Default for KeyboardNavigation {
    fn default() -> Self {
        Self::new(DEFAULT_KEYBOARD_PAN_PX_PER_FRAME, DEFAULT_ZOOM_RATIO_PER_FRAME)
    }
}

impl KeyboardNavigation {
    #[must_use]
    pub fn new(pan_px_per_frame: f64, zoom_ratio_per_frame: f64) -> Self {
        Self {
            held: SmallVec::new(),
            pan_px_per_frame,
            zoom_ratio_per_frame,
        }
    }

    /// Returns `true` when the key is a navigation key.
    pub fn on_key_down(&mut self, key: Key) -> bool {
        let Some(nav) = NavigationKey::from_key(key) else {
            return false;
        };
        if !self.held.contains(&nav) {
            self.held.push(nav);
        }
        true
    }

    pub fn on_key_up(&mut self, key: Key) -> bool {
        let Some(nav) = NavigationKey::from_key(key) else {
            return false;
        };
        self.held.retain(|held| *held != nav);
        true
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.held.is_empty()
    }

    /// Motion for one frame, or `None` when no navigation key is held.
    /// Opposing keys cancel out.
    #[must_use]
    pub fn step(&self) -> Option<NavigationStep> {
        if self.held.is_empty() {
            return None;
        }
        let mut pan_px = 0.0;
        let mut zoom_ratio = 0.0;
        for key in &self.held {
            match key {
                NavigationKey::PanLeft => pan_px -= self.pan_px_per_frame,
                NavigationKey::PanRight => pan_px += self.pan_px_per_frame,
                NavigationKey::ZoomIn => zoom_ratio += self.zoom_ratio_per_frame,
                NavigationKey::ZoomOut => zoom_ratio -= self.zoom_ratio_per_frame,
            }
        }
        Some(NavigationStep {
            pan_px,
            zoom_factor: 1.0 - zoom_ratio,
        })
    }
}
