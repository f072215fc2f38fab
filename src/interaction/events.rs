use serde::{Deserialize, Serialize};

/// Bit of `PointerEvent::buttons` set while the primary button is held.
pub const PRIMARY_BUTTON: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            shift: false,
            ctrl: false,
            alt: false,
            meta: false,
        }
    }

    #[must_use]
    pub const fn shift() -> Self {
        Self {
            shift: true,
            ctrl: false,
            alt: false,
            meta: false,
        }
    }

    #[must_use]
    pub const fn ctrl() -> Self {
        Self {
            shift: false,
            ctrl: true,
            alt: false,
            meta: false,
        }
    }
}

/// DOM-style mouse event in client (window) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
    /// Bitmask of held buttons; `0` means no button is down.
    pub buttons: u16,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Event with the primary button held.
    #[must_use]
    pub const fn pressed(client_x: f64, client_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            buttons: PRIMARY_BUTTON,
            modifiers: Modifiers::none(),
        }
    }

    /// Event with no button held.
    #[must_use]
    pub const fn released(client_x: f64, client_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            buttons: 0,
            modifiers: Modifiers::none(),
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// DOM-style wheel event; deltas are in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    pub client_x: f64,
    pub client_y: f64,
    pub delta_x: f64,
    pub delta_y: f64,
    /// Browsers report trackpad pinch as a wheel event with ctrl held.
    pub modifiers: Modifiers,
}

impl WheelEvent {
    #[must_use]
    pub const fn new(client_x: f64, client_y: f64, delta_x: f64, delta_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            delta_x,
            delta_y,
            modifiers: Modifiers::none(),
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Bounding client rect of the element receiving input.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementRect {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Converts client coordinates to element-local coordinates.
    #[must_use]
    pub fn to_local(self, client_x: f64, client_y: f64) -> (f64, f64) {
        (client_x - self.left, client_y - self.top)
    }
}

/// Whether the host should keep propagating the DOM event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Propagation {
    Continue,
    /// The event was handled; the host must call `stopPropagation` so nested
    /// handlers do not also react to it.
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    M,
    Shift,
    Escape,
    Other,
}

/// Cursor the host should display over the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorStyle {
    #[default]
    Default,
    /// Pointer is over a draggable selection boundary.
    EwResize,
    Grabbing,
    Crosshair,
}
