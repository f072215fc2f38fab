use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{ElementRect, PointerEvent, Propagation};

/// Movement, in pixels on either axis, a pressed pointer must exceed before
/// the gesture counts as a drag rather than a click.
pub const DEFAULT_DRAG_THRESHOLD_PX: f64 = 1.0;

/// Receiver of drag notifications. Coordinates are element-local.
pub trait DragCallbacks {
    fn on_drag_started(&mut self, x: f64, y: f64);
    fn on_drag(&mut self, x: f64, y: f64);
    fn on_drag_finished(&mut self);
}

/// Lifecycle of one pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Button is down but the pointer has not left the dead zone yet.
    Pending { down_x: f64, down_y: f64 },
    /// A real drag; `rect` is the element rect captured when it started.
    Dragging { rect: ElementRect },
}

/// How a gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureEnd {
    /// No gesture was being tracked.
    NotTracking,
    /// Button released inside the dead zone; coordinates are client space.
    Click { client_x: f64, client_y: f64 },
    /// Button released after a drag; `on_drag_finished` has fired.
    DragFinished,
    /// Button state was lost (no buttons held) before any drag happened.
    Abandoned,
}

/// Turns raw pointer events into a drag-start / drag / drag-finished protocol.
///
/// While a gesture is in progress the host must route document-level
/// `mousemove`/`mouseup` events here (see [`Self::is_capturing`]) so drags
/// keep tracking outside the source element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGestureHandler {
    phase: DragPhase,
    threshold_px: f64,
}

impl Default for DragGestureHandler {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD_PX)
    }
}

impl DragGestureHandler {
    #[must_use]
    pub fn new(threshold_px: f64) -> Self {
        let threshold_px = if threshold_px.is_finite() && threshold_px >= 0.0 {
            threshold_px
        } else {
            DEFAULT_DRAG_THRESHOLD_PX
        };
        Self {
            phase: DragPhase::Idle,
            threshold_px,
        }
    }

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// `true` while document-level move/up listeners would be attached.
    #[must_use]
    pub fn is_capturing(&self) -> bool {
        !matches!(self.phase, DragPhase::Idle)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    pub fn on_mouse_down(&mut self, event: &PointerEvent) -> Propagation {
        if self.is_dragging() {
            return Propagation::Stop;
        }
        self.phase = DragPhase::Pending {
            down_x: event.client_x,
            down_y: event.client_y,
        };
        trace!(x = event.client_x, y = event.client_y, "drag gesture pending");
        Propagation::Stop
    }

    /// Handles a pointer move.
    ///
    /// `element_rect` is queried only when the gesture crosses the threshold;
    /// later moves reuse the captured rect. A move with `buttons == 0` means
    /// the matching `mouseup` was lost and ends the gesture.
    pub fn on_mouse_move<C: DragCallbacks + ?Sized>(
        &mut self,
        event: &PointerEvent,
        element_rect: impl FnOnce() -> ElementRect,
        callbacks: &mut C,
    ) -> (Propagation, Option<GestureEnd>) {
        if event.buttons == 0 && self.is_capturing() {
            let end = match self.on_mouse_up(event, callbacks) {
                GestureEnd::Click { .. } => GestureEnd::Abandoned,
                other => other,
            };
            return (Propagation::Stop, Some(end));
        }

        match self.phase {
            DragPhase::Idle => (Propagation::Continue, None),
            DragPhase::Pending { down_x, down_y } => {
                let moved_x = (event.client_x - down_x).abs();
                let moved_y = (event.client_y - down_y).abs();
                if moved_x > self.threshold_px || moved_y > self.threshold_px {
                    let rect = element_rect();
                    self.phase = DragPhase::Dragging { rect };
                    let (x, y) = rect.to_local(down_x, down_y);
                    trace!(x, y, "drag gesture started");
                    callbacks.on_drag_started(x, y);
                    let (x, y) = rect.to_local(event.client_x, event.client_y);
                    callbacks.on_drag(x, y);
                }
                (Propagation::Stop, None)
            }
            DragPhase::Dragging { rect } => {
                let (x, y) = rect.to_local(event.client_x, event.client_y);
                callbacks.on_drag(x, y);
                (Propagation::Stop, None)
            }
        }
    }

    pub fn on_mouse_up<C: DragCallbacks + ?Sized>(
        &mut self,
        event: &PointerEvent,
        callbacks: &mut C,
    ) -> GestureEnd {
        let phase = std::mem::take(&mut self.phase);
        match phase {
            DragPhase::Idle => GestureEnd::NotTracking,
            DragPhase::Pending { .. } => GestureEnd::Click {
                client_x: event.client_x,
                client_y: event.client_y,
            },
            DragPhase::Dragging { .. } => {
                trace!("drag gesture finished");
                callbacks.on_drag_finished();
                GestureEnd::DragFinished
            }
        }
    }

    /// Drops any in-progress gesture without notifying callbacks.
    pub fn reset(&mut self) {
        self.phase = DragPhase::Idle;
    }
}
