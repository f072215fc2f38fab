use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{Action, TimelineConfig, ViewportContext};
use crate::interaction::{
    CursorStyle, DragCallbacks, DragGestureHandler, ElementRect, GestureEnd, Key,
    KeyboardNavigation, Modifiers, OverviewBrush, PointerEvent, Propagation, SelectionEdge,
    WheelEvent, clamp_edited_edge, grabbed_selection_edge,
};
use crate::overlay::Area;
use crate::panel::{PanelDragBehavior, TrackLocator};

/// What the current drag is doing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum DragMode {
    #[default]
    Idle,
    /// Plain drag on the timeline; `last_x` is the previous pointer x.
    Pan { last_x: f64 },
    /// Sweeping a new area selection from the drag origin.
    AreaSelect { start_x: f64, start_y: f64 },
    /// Moving one edge of the existing selection.
    EditBoundary { edge: SelectionEdge, fixed_time: f64 },
    /// Brushing the visible window on the overview strip.
    OverviewBrush,
}

/// What a wheel event did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WheelOutcome {
    Zoomed,
    Panned,
    /// Vertical scroll the host should apply to the track list.
    ScrollTracks { delta_px: f64 },
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanAndZoomSettings {
    pub boundary_hotspot_px: f64,
    pub drag_threshold_px: f64,
    pub wheel_zoom_speed: f64,
    pub horizontal_wheel_pan_speed: f64,
    pub keyboard_pan_px_per_frame: f64,
    pub keyboard_zoom_ratio_per_frame: f64,
}

impl PanAndZoomSettings {
    #[must_use]
    pub fn from_config(config: &TimelineConfig) -> Self {
        Self {
            boundary_hotspot_px: config.boundary_hotspot_px,
            drag_threshold_px: config.drag_threshold_px,
            wheel_zoom_speed: config.wheel_zoom_speed,
            horizontal_wheel_pan_speed: config.horizontal_wheel_pan_speed,
            keyboard_pan_px_per_frame: config.keyboard_pan_px_per_frame,
            keyboard_zoom_ratio_per_frame: config.keyboard_zoom_ratio_per_frame,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct DragState {
    mode: DragMode,
    behavior: PanelDragBehavior,
    modifiers: Modifiers,
    brush: OverviewBrush,
    cursor: CursorStyle,
    /// Set once this gesture has written the selected area.
    area_touched: bool,
}

/// Translates pointer, wheel and key input into pan, zoom and area
/// selection on a [`ViewportContext`].
///
/// Pointer coordinates arrive in client space and are converted with the
/// element rect the host last reported.
#[derive(Debug, Clone, PartialEq)]
pub struct PanAndZoomHandler {
    gesture: DragGestureHandler,
    drag: DragState,
    keyboard: KeyboardNavigation,
    settings: PanAndZoomSettings,
    element_rect: ElementRect,
    area_select_mode: bool,
    last_pointer_x: Option<f64>,
}

struct DragSink<'a> {
    state: &'a mut DragState,
    viewport: &'a mut ViewportContext,
    locator: &'a dyn TrackLocator,
    settings: &'a PanAndZoomSettings,
    area_select_mode: bool,
    actions: &'a mut Vec<Action>,
}

impl DragSink<'_> {
    fn grabbed_edge(&self, x: f64) -> Option<(SelectionEdge, f64)> {
        let area = self.viewport.selected_area()?;
        let scale = self.viewport.time_scale();
        let edge = grabbed_selection_edge(
            scale.time_to_px(area.start_sec),
            scale.time_to_px(area.end_sec),
            x,
            self.settings.boundary_hotspot_px,
            self.viewport.device_pixel_ratio(),
        )?;
        let fixed_time = match edge {
            SelectionEdge::Start => area.end_sec,
            SelectionEdge::End => area.start_sec,
        };
        Some((edge, fixed_time))
    }
}

impl DragCallbacks for DragSink<'_> {
    fn on_drag_started(&mut self, x: f64, y: f64) {
        let mode = match self.state.behavior {
            PanelDragBehavior::None => DragMode::Idle,
            PanelDragBehavior::OverviewBrush => {
                let scale = self.viewport.overview_scale();
                self.state.brush.begin(
                    x,
                    &scale,
                    self.viewport.visible_window(),
                    self.settings.boundary_hotspot_px,
                    self.viewport.device_pixel_ratio(),
                );
                DragMode::OverviewBrush
            }
            PanelDragBehavior::Timeline => {
                if let Some((edge, fixed_time)) = self.grabbed_edge(x) {
                    DragMode::EditBoundary { edge, fixed_time }
                } else if self.state.modifiers.shift || self.area_select_mode {
                    DragMode::AreaSelect {
                        start_x: x,
                        start_y: y,
                    }
                } else {
                    DragMode::Pan { last_x: x }
                }
            }
        };
        self.state.cursor = match mode {
            DragMode::Pan { .. } => CursorStyle::Grabbing,
            DragMode::AreaSelect { .. } => CursorStyle::Crosshair,
            DragMode::EditBoundary { .. } | DragMode::OverviewBrush => CursorStyle::EwResize,
            DragMode::Idle => CursorStyle::Default,
        };
        debug!(?mode, x, y, "drag mode selected");
        self.state.mode = mode;
        self.state.area_touched = false;
    }

    fn on_drag(&mut self, x: f64, y: f64) {
        match self.state.mode {
            DragMode::Idle => {}
            DragMode::Pan { last_x } => {
                self.viewport.pan_by_px(last_x - x);
                self.state.mode = DragMode::Pan { last_x: x };
            }
            DragMode::AreaSelect { start_x, start_y } => {
                let scale = *self.viewport.time_scale();
                let left = start_x.min(x).clamp(scale.start_px(), scale.end_px());
                let right = start_x.max(x).clamp(scale.start_px(), scale.end_px());
                let tracks = self.locator.tracks_in_vertical_range(start_y, y);
                let area = Area::new(scale.px_to_time(left), scale.px_to_time(right))
                    .with_tracks(tracks);
                self.viewport.set_selected_area(Some(area));
                self.state.area_touched = true;
            }
            DragMode::EditBoundary { edge, fixed_time } => {
                let scale = *self.viewport.time_scale();
                let edge_px = clamp_edited_edge(
                    edge,
                    x,
                    scale.time_to_px(fixed_time),
                    scale.start_px(),
                    scale.end_px(),
                );
                let moved = scale.px_to_time(edge_px);
                let moved = match edge {
                    SelectionEdge::Start => moved.min(fixed_time),
                    SelectionEdge::End => moved.max(fixed_time),
                };
                let tracks = self
                    .viewport
                    .selected_area()
                    .map(|area| area.track_ids.clone())
                    .unwrap_or_default();
                let area = Area::new(moved, fixed_time).with_tracks(tracks);
                self.viewport.set_selected_area(Some(area));
                self.state.area_touched = true;
            }
            DragMode::OverviewBrush => {
                let scale = self.viewport.overview_scale();
                let window = self.state.brush.update(
                    x,
                    &scale,
                    self.viewport.trace_span(),
                    self.viewport.min_zoom_span(),
                );
                if let Some(window) = window {
                    self.viewport.set_visible_window(window);
                }
            }
        }
    }

    fn on_drag_finished(&mut self) {
        match self.state.mode {
            DragMode::AreaSelect { .. } | DragMode::EditBoundary { .. } => {
                let committed = self
                    .viewport
                    .selected_area()
                    .filter(|_| self.state.area_touched);
                if let Some(area) = committed {
                    debug!(
                        start = area.start_sec,
                        end = area.end_sec,
                        tracks = area.track_ids.len(),
                        "area selection committed"
                    );
                    self.actions.push(Action::SelectArea { area: area.clone() });
                }
            }
            DragMode::OverviewBrush => self.state.brush.end(),
            DragMode::Pan { .. } | DragMode::Idle => {}
        }
        self.state.mode = DragMode::Idle;
        self.state.cursor = CursorStyle::Default;
        self.state.area_touched = false;
    }
}

impl PanAndZoomHandler {
    #[must_use]
    pub fn new(settings: PanAndZoomSettings, element_rect: ElementRect) -> Self {
        Self {
            gesture: DragGestureHandler::new(settings.drag_threshold_px),
            drag: DragState::default(),
            keyboard: KeyboardNavigation::new(
                settings.keyboard_pan_px_per_frame,
                settings.keyboard_zoom_ratio_per_frame,
            ),
            settings,
            element_rect,
            area_select_mode: false,
            last_pointer_x: None,
        }
    }

    #[must_use]
    pub fn settings(&self) -> PanAndZoomSettings {
        self.settings
    }

    #[must_use]
    pub fn drag_mode(&self) -> DragMode {
        self.drag.mode
    }

    #[must_use]
    pub fn cursor(&self) -> CursorStyle {
        self.drag.cursor
    }

    #[must_use]
    pub fn is_capturing(&self) -> bool {
        self.gesture.is_capturing()
    }

    #[must_use]
    pub fn element_rect(&self) -> ElementRect {
        self.element_rect
    }

    pub fn set_element_rect(&mut self, element_rect: ElementRect) {
        self.element_rect = element_rect;
    }

    /// When enabled, plain drags select areas instead of panning.
    pub fn set_area_select_mode(&mut self, enabled: bool) {
        self.area_select_mode = enabled;
    }

    #[must_use]
    pub fn area_select_mode(&self) -> bool {
        self.area_select_mode
    }

    pub fn set_boundary_hotspot_px(&mut self, hotspot_px: f64) {
        self.settings.boundary_hotspot_px = hotspot_px;
    }

    /// Element-local position of a client-space point.
    #[must_use]
    pub fn to_local(&self, client_x: f64, client_y: f64) -> (f64, f64) {
        self.element_rect.to_local(client_x, client_y)
    }

    /// Starts tracking a gesture. `behavior` comes from the panel under the
    /// pointer.
    pub fn on_mouse_down(&mut self, event: &PointerEvent, behavior: PanelDragBehavior) -> Propagation {
        self.drag.behavior = behavior;
        self.drag.modifiers = event.modifiers;
        self.gesture.on_mouse_down(event)
    }

    /// Advances the drag if one is tracked, otherwise updates hover state.
    pub fn on_mouse_move(
        &mut self,
        event: &PointerEvent,
        viewport: &mut ViewportContext,
        locator: &dyn TrackLocator,
        actions: &mut Vec<Action>,
    ) -> (Propagation, Option<GestureEnd>) {
        let (x, _) = self.to_local(event.client_x, event.client_y);
        self.last_pointer_x = Some(x);

        if self.gesture.is_capturing() {
            let rect = self.element_rect;
            let mut sink = DragSink {
                state: &mut self.drag,
                viewport,
                locator,
                settings: &self.settings,
                area_select_mode: self.area_select_mode,
                actions,
            };
            return self.gesture.on_mouse_move(event, || rect, &mut sink);
        }

        self.update_hover(x, viewport);
        (Propagation::Continue, None)
    }

    pub fn on_mouse_up(
        &mut self,
        event: &PointerEvent,
        viewport: &mut ViewportContext,
        locator: &dyn TrackLocator,
        actions: &mut Vec<Action>,
    ) -> GestureEnd {
        let mut sink = DragSink {
            state: &mut self.drag,
            viewport,
            locator,
            settings: &self.settings,
            area_select_mode: self.area_select_mode,
            actions,
        };
        let end = self.gesture.on_mouse_up(event, &mut sink);
        if !matches!(end, GestureEnd::DragFinished) {
            self.drag.mode = DragMode::Idle;
        }
        trace!(?end, "gesture ended");
        end
    }

    pub fn on_mouse_leave(&mut self, viewport: &mut ViewportContext) {
        self.last_pointer_x = None;
        viewport.set_hover_time(None);
        if !self.gesture.is_capturing() {
            self.drag.cursor = CursorStyle::Default;
        }
    }

    /// Ctrl (or pinch) wheel zooms around the pointer, horizontal-dominant
    /// wheel pans, plain vertical wheel is handed back as a track scroll.
    pub fn on_wheel(&mut self, event: &WheelEvent, viewport: &mut ViewportContext) -> WheelOutcome {
        let (x, _) = self.to_local(event.client_x, event.client_y);
        self.last_pointer_x = Some(x);

        if event.modifiers.ctrl || event.modifiers.meta {
            if event.delta_y == 0.0 || !event.delta_y.is_finite() {
                return WheelOutcome::Ignored;
            }
            let zoom_ratio =
                event.delta_y.signum() * (1.0 + event.delta_y.abs()).log2() * self.settings.wheel_zoom_speed;
            let zoom_factor = 1.0 - zoom_ratio;
            viewport.zoom_at_px(zoom_factor, x);
            trace!(zoom_factor, anchor_px = x, "wheel zoom");
            return WheelOutcome::Zoomed;
        }
        if event.delta_x.abs() > event.delta_y.abs() {
            viewport.pan_by_px(event.delta_x * self.settings.horizontal_wheel_pan_speed);
            return WheelOutcome::Panned;
        }
        if event.delta_y != 0.0 && event.delta_y.is_finite() {
            return WheelOutcome::ScrollTracks {
                delta_px: event.delta_y,
            };
        }
        WheelOutcome::Ignored
    }

    /// Returns `true` when the key drives navigation.
    pub fn on_key_down(&mut self, key: Key) -> bool {
        if key == Key::Shift {
            self.drag.modifiers.shift = true;
            return true;
        }
        self.keyboard.on_key_down(key)
    }

    pub fn on_key_up(&mut self, key: Key) -> bool {
        if key == Key::Shift {
            self.drag.modifiers.shift = false;
            return true;
        }
        self.keyboard.on_key_up(key)
    }

    /// Applies one frame of held-key navigation. Zoom anchors on the last
    /// pointer position, or the centre of the time area.
    pub fn tick(&mut self, viewport: &mut ViewportContext) -> bool {
        let Some(step) = self.keyboard.step() else {
            return false;
        };
        let mut changed = false;
        if step.pan_px != 0.0 {
            changed |= viewport.pan_by_px(step.pan_px);
        }
        if step.zoom_factor != 1.0 {
            let scale = viewport.time_scale();
            let anchor = self
                .last_pointer_x
                .filter(|x| viewport.is_in_time_area(*x))
                .unwrap_or((scale.start_px() + scale.end_px()) / 2.0);
            changed |= viewport.zoom_at_px(step.zoom_factor, anchor);
        }
        changed
    }

    pub fn release_keys(&mut self) {
        self.keyboard.release_all();
        self.drag.modifiers.shift = false;
    }

    fn update_hover(&mut self, x: f64, viewport: &mut ViewportContext) {
        if !viewport.is_in_time_area(x) {
            viewport.set_hover_time(None);
            self.drag.cursor = CursorStyle::Default;
            return;
        }
        let time = viewport.time_scale().px_to_time(x);
        viewport.set_hover_time(Some(time));

        let near_edge = viewport.selected_area().is_some_and(|area| {
            let scale = viewport.time_scale();
            grabbed_selection_edge(
                scale.time_to_px(area.start_sec),
                scale.time_to_px(area.end_sec),
                x,
                self.settings.boundary_hotspot_px,
                viewport.device_pixel_ratio(),
            )
            .is_some()
        });
        self.drag.cursor = if near_edge {
            CursorStyle::EwResize
        } else {
            CursorStyle::Default
        };
    }
}
