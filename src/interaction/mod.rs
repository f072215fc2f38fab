//! Input primitives: DOM-style events, the drag gesture state machine,
//! selection-boundary hit-testing and held-key navigation.
//!
//! Nothing here touches viewport state; the controllers in `api` compose
//! these pieces and apply their results.

mod drag_gesture;
mod events;
mod keyboard;
mod overview_brush;
mod selection_edit;

pub use drag_gesture::{
    DEFAULT_DRAG_THRESHOLD_PX, DragCallbacks, DragGestureHandler, DragPhase, GestureEnd,
};
pub use events::{
    CursorStyle, ElementRect, Key, Modifiers, PRIMARY_BUTTON, PointerEvent, Propagation,
    WheelEvent,
};
pub use keyboard::{
    DEFAULT_KEYBOARD_PAN_PX_PER_FRAME, DEFAULT_ZOOM_RATIO_PER_FRAME, KeyboardNavigation,
    NavigationKey, NavigationStep,
};
pub use overview_brush::{BrushMode, OverviewBrush};
pub use selection_edit::{
    DEFAULT_BOUNDARY_HOTSPOT_PX, SelectionEdge, clamp_edited_edge, grabbed_selection_edge,
};
