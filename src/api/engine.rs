use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{
    Action, ActionDispatcher, DragMode, PanAndZoomHandler, PanAndZoomSettings, RedrawLevel,
    RedrawRequest, RedrawTopic, TimelineConfig, ViewportContext, WheelOutcome,
};
use crate::core::{GridTicks, TimeSpan, Viewport, gridlines_with_spacing};
use crate::error::TimelineResult;
use crate::interaction::{
    CursorStyle, ElementRect, GestureEnd, Key, PointerEvent, Propagation, WheelEvent,
};
use crate::overlay::{NoteId, NoteStore, NotesPanel, OverviewPanel, TimeAxisPanel, random_note_color};
use crate::panel::{
    PanelContainer, PanelRegion, PanelRenderContext, Track, TrackConfig, TrackDataSource,
    TrackGroup, TrackId, TrackRegistry,
};
use crate::render::{Color, PaintContext, RenderFrame, Renderer};

/// Outcome of one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameStats {
    pub level: RedrawLevel,
    pub rows_drawn: usize,
    pub rows_skipped: usize,
    pub command_count: usize,
    /// Zero-based index of the rendered frame.
    pub frame_index: u64,
}

/// Main orchestration facade consumed by host applications.
///
/// Owns the local view state, the panel container and the renderer. Input
/// handlers mutate view state synchronously and mark it dirty; the host's
/// frame loop calls [`TimelineEngine::pump_frame`] once per animation frame.
pub struct TimelineEngine<R: Renderer> {
    renderer: R,
    config: TimelineConfig,
    viewport: ViewportContext,
    container: PanelContainer,
    registry: TrackRegistry,
    notes: NoteStore,
    controller: PanAndZoomHandler,
    pending_actions: Vec<Action>,
    seen_structure_generation: u64,
    frames_rendered: u64,
    last_frame: Option<FrameStats>,
}

fn grid_ticks(viewport: &ViewportContext, spacing_px: f64) -> GridTicks {
    gridlines_with_spacing(
        viewport.viewport().width_px(),
        viewport.visible_window(),
        viewport.time_scale(),
        spacing_px,
    )
}

fn panel_view<'a>(
    viewport: &'a ViewportContext,
    notes: &'a NoteStore,
    ticks: &'a GridTicks,
    config: &TimelineConfig,
) -> PanelRenderContext<'a> {
    PanelRenderContext {
        time_scale: viewport.time_scale(),
        visible_window: viewport.visible_window(),
        trace_span: viewport.trace_span(),
        shell_width: viewport.shell_width(),
        device_pixel_ratio: viewport.device_pixel_ratio(),
        grid_ticks: ticks.as_slice(),
        selected_area: viewport.selected_area(),
        hover_time: viewport.hover_time(),
        notes,
        selection_line_width: config.selection_line_width,
    }
}

impl<R: Renderer> TimelineEngine<R> {
    /// Builds an engine with the overview, time axis and notes bar pinned on
    /// top and an empty scrolling region.
    pub fn new(renderer: R, config: TimelineConfig) -> TimelineResult<Self> {
        let viewport = ViewportContext::new(&config)?;
        let mut container =
            PanelContainer::new(config.viewport, config.shell_width, config.group_header_height);
        container.add_panel(PanelRegion::Pinned, Box::new(OverviewPanel));
        container.add_panel(PanelRegion::Pinned, Box::new(TimeAxisPanel));
        container.add_panel(PanelRegion::Pinned, Box::new(NotesPanel::new()));
        let element_rect = ElementRect::new(
            0.0,
            0.0,
            config.viewport.width_px(),
            config.viewport.height_px(),
        );
        let controller = PanAndZoomHandler::new(PanAndZoomSettings::from_config(&config), element_rect);
        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            trace_start = config.trace_start,
            trace_end = config.trace_end,
            "timeline engine created"
        );
        Ok(Self {
            renderer,
            config,
            viewport,
            seen_structure_generation: container.structure_generation(),
            container,
            registry: TrackRegistry::with_builtin_kinds(),
            notes: NoteStore::new(),
            controller,
            pending_actions: Vec::new(),
            frames_rendered: 0,
            last_frame: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> &ViewportContext {
        &self.viewport
    }

    #[must_use]
    pub fn container(&self) -> &PanelContainer {
        &self.container
    }

    /// Direct access for structural edits; changes are detected on the next
    /// frame and force a full redraw.
    pub fn container_mut(&mut self) -> &mut PanelContainer {
        &mut self.container
    }

    #[must_use]
    pub fn notes(&self) -> &NoteStore {
        &self.notes
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn registry_mut(&mut self) -> &mut TrackRegistry {
        &mut self.registry
    }

    #[must_use]
    pub fn cursor(&self) -> CursorStyle {
        self.controller.cursor()
    }

    #[must_use]
    pub fn drag_mode(&self) -> DragMode {
        self.controller.drag_mode()
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<FrameStats> {
        self.last_frame
    }

    pub fn set_element_rect(&mut self, element_rect: ElementRect) {
        self.controller.set_element_rect(element_rect);
    }

    pub fn set_area_select_mode(&mut self, enabled: bool) {
        self.controller.set_area_select_mode(enabled);
    }

    /// Creates a track through the registry and appends it to `region`.
    pub fn add_track(&mut self, region: PanelRegion, config: TrackConfig) -> TimelineResult<TrackId> {
        let track = self.build_track(config)?;
        self.container.add_track(region, track)
    }

    /// Creates every track of `group` (summary first, then members) and adds
    /// the group to `region`.
    pub fn add_track_group(
        &mut self,
        region: PanelRegion,
        group: TrackGroup,
        configs: Vec<TrackConfig>,
    ) -> TimelineResult<()> {
        let tracks = configs
            .into_iter()
            .map(|config| self.build_track(config))
            .collect::<TimelineResult<Vec<_>>>()?;
        self.container.add_group(region, group, tracks)
    }

    pub fn remove_track(&mut self, track: TrackId) -> TimelineResult<()> {
        self.container.remove_track(track).map(|_| ())
    }

    pub fn move_track(&mut self, track: TrackId, to_index: usize) -> TimelineResult<()> {
        self.container.move_track(track, to_index)
    }

    /// Shows `window` (clipped to the trace).
    pub fn set_visible_window(&mut self, window: TimeSpan) -> bool {
        self.viewport.set_visible_window(window)
    }

    pub fn scroll_tracks_by(&mut self, delta_px: f64) -> bool {
        let scrolled = self.container.scroll_by(delta_px);
        if scrolled {
            self.viewport
                .request_redraw(RedrawRequest::light(RedrawTopic::Layout));
        }
        scrolled
    }

    pub fn resize(&mut self, viewport: Viewport) -> TimelineResult<()> {
        self.viewport.resize(viewport)?;
        self.container.set_viewport(viewport);
        self.config.viewport = viewport;
        Ok(())
    }

    /// The data layer published new snapshots.
    pub fn notify_data_changed(&mut self) {
        self.viewport
            .request_redraw(RedrawRequest::light(RedrawTopic::Data));
    }

    pub fn on_mouse_down(&mut self, event: &PointerEvent) -> Propagation {
        let (x, y) = self.controller.to_local(event.client_x, event.client_y);
        let behavior = self.container.drag_behavior_at(x, y);
        self.controller.on_mouse_down(event, behavior)
    }

    pub fn on_mouse_move(&mut self, event: &PointerEvent, data: &dyn TrackDataSource) -> Propagation {
        let mut actions = Vec::new();
        let (propagation, end) =
            self.controller
                .on_mouse_move(event, &mut self.viewport, &self.container, &mut actions);
        self.emit_all(actions);
        if let Some(end) = end {
            trace!(?end, "gesture ended by button loss");
        }

        if !self.controller.is_capturing() {
            let (x, y) = self.controller.to_local(event.client_x, event.client_y);
            let ticks = grid_ticks(&self.viewport, self.config.gridline_spacing_px);
            let view = panel_view(&self.viewport, &self.notes, &ticks, &self.config);
            self.container.on_mouse_move(x, y, &view, data);
        }
        propagation
    }

    pub fn on_mouse_up(&mut self, event: &PointerEvent, data: &dyn TrackDataSource) -> Propagation {
        let mut actions = Vec::new();
        let end = self
            .controller
            .on_mouse_up(event, &mut self.viewport, &self.container, &mut actions);
        self.emit_all(actions);
        match end {
            GestureEnd::Click { client_x, client_y } => {
                let (x, y) = self.controller.to_local(client_x, client_y);
                self.handle_click(x, y, data);
                Propagation::Stop
            }
            GestureEnd::DragFinished | GestureEnd::Abandoned => Propagation::Stop,
            GestureEnd::NotTracking => Propagation::Continue,
        }
    }

    pub fn on_mouse_leave(&mut self) {
        self.controller.on_mouse_leave(&mut self.viewport);
        self.container.on_mouse_out();
        self.viewport.request_redraw(RedrawRequest::cursor());
    }

    pub fn on_wheel(&mut self, event: &WheelEvent) -> Propagation {
        match self.controller.on_wheel(event, &mut self.viewport) {
            WheelOutcome::ScrollTracks { delta_px } => {
                self.scroll_tracks_by(delta_px);
                Propagation::Stop
            }
            WheelOutcome::Zoomed | WheelOutcome::Panned => Propagation::Stop,
            WheelOutcome::Ignored => Propagation::Continue,
        }
    }

    /// `M` turns the area selection into an area note and `Escape` drops the
    /// selection; `W`/`A`/`S`/`D` are held for navigation.
    pub fn on_key_down(&mut self, key: Key) -> Propagation {
        match key {
            Key::M => {
                self.create_area_note_from_selection();
                Propagation::Stop
            }
            Key::Escape => {
                if self.viewport.selected_area().is_some() {
                    self.emit(Action::DeselectArea);
                }
                Propagation::Stop
            }
            _ if self.controller.on_key_down(key) => Propagation::Stop,
            _ => Propagation::Continue,
        }
    }

    pub fn on_key_up(&mut self, key: Key) -> Propagation {
        if self.controller.on_key_up(key) {
            Propagation::Stop
        } else {
            Propagation::Continue
        }
    }

    /// Window lost focus: held keys would otherwise never see their key-up.
    pub fn on_blur(&mut self) {
        self.controller.release_keys();
    }

    /// Copies the current area selection into a new area note.
    pub fn create_area_note_from_selection(&mut self) -> Option<NoteId> {
        let area = self.viewport.selected_area()?.clone();
        let id = NoteId::new_random();
        self.emit(Action::AddAreaNote {
            id,
            area,
            color: random_note_color(),
        });
        Some(id)
    }

    pub fn select_note(&mut self, id: NoteId) {
        self.emit(Action::SelectNote { id });
    }

    pub fn change_note_color(&mut self, id: NoteId, color: Color) {
        self.emit(Action::ChangeNoteColor { id, color });
    }

    pub fn change_note_text(&mut self, id: NoteId, text: impl Into<String>) {
        self.emit(Action::ChangeNoteText {
            id,
            text: text.into(),
        });
    }

    pub fn remove_note(&mut self, id: NoteId) {
        self.emit(Action::RemoveNote { id });
    }

    /// Actions emitted since the last drain, oldest first.
    pub fn drain_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.pending_actions)
    }

    pub fn dispatch_pending(&mut self, dispatcher: &mut impl ActionDispatcher) {
        for action in self.drain_actions() {
            dispatcher.dispatch(action);
        }
    }

    /// Applies an action reduced by the host store. Track group collapse
    /// and pinning only take effect through here.
    pub fn apply_action(&mut self, action: &Action) -> TimelineResult<bool> {
        match action {
            Action::ToggleTrackGroupCollapsed { group } => {
                self.container.toggle_group_collapsed(*group)?;
                Ok(true)
            }
            Action::ToggleTrackPinned { track } => {
                self.container.toggle_pinned(*track)?;
                Ok(true)
            }
            _ => Ok(self.mirror(action)),
        }
    }

    /// Applies one frame of held-key navigation and renders if anything
    /// changed since the previous frame. Returns `None` for an idle frame.
    pub fn pump_frame(&mut self, data: &dyn TrackDataSource) -> TimelineResult<Option<FrameStats>> {
        self.controller.tick(&mut self.viewport);
        let generation = self.container.structure_generation();
        if generation != self.seen_structure_generation {
            self.seen_structure_generation = generation;
            self.viewport.request_redraw(RedrawRequest::full());
        }
        let Some(request) = self.viewport.redraw_mut().take() else {
            return Ok(None);
        };
        self.render_frame(request.level(), data).map(Some)
    }

    /// Renders immediately regardless of the dirty state.
    pub fn render_now(&mut self, data: &dyn TrackDataSource) -> TimelineResult<FrameStats> {
        self.seen_structure_generation = self.container.structure_generation();
        let _ = self.viewport.redraw_mut().take();
        self.render_frame(RedrawLevel::Full, data)
    }

    fn render_frame(&mut self, level: RedrawLevel, data: &dyn TrackDataSource) -> TimelineResult<FrameStats> {
        let mut frame = RenderFrame::new(self.viewport.viewport());
        let ticks = grid_ticks(&self.viewport, self.config.gridline_spacing_px);
        let container_stats = {
            let mut ctx = PaintContext::new(&mut frame);
            let view = panel_view(&self.viewport, &self.notes, &ticks, &self.config);
            self.container.render(&mut ctx, &view, data)
        };
        self.renderer.render(&frame)?;

        let stats = FrameStats {
            level,
            rows_drawn: container_stats.rows_drawn,
            rows_skipped: container_stats.rows_skipped,
            command_count: frame.commands.len(),
            frame_index: self.frames_rendered,
        };
        self.frames_rendered += 1;
        debug!(
            level = ?stats.level,
            drawn = stats.rows_drawn,
            skipped = stats.rows_skipped,
            commands = stats.command_count,
            "frame rendered"
        );
        self.last_frame = Some(stats);
        Ok(stats)
    }

    fn build_track(&self, config: TrackConfig) -> TimelineResult<Box<dyn Track>> {
        let config = config.with_default_height(self.config.default_track_height);
        self.registry.create(&config)
    }

    fn handle_click(&mut self, x: f64, y: f64, data: &dyn TrackDataSource) {
        let mut actions = Vec::new();
        let consumed = {
            let ticks = grid_ticks(&self.viewport, self.config.gridline_spacing_px);
            let view = panel_view(&self.viewport, &self.notes, &ticks, &self.config);
            self.container
                .on_mouse_click(x, y, &view, data, &mut actions)
        };
        if !consumed && self.viewport.is_in_time_area(x) {
            let time = self.viewport.time_scale().px_to_time(x);
            let outside = self
                .viewport
                .selected_area()
                .is_some_and(|area| !area.contains_time(time));
            if outside {
                actions.push(Action::DeselectArea);
            }
        }
        self.emit_all(actions);
    }

    fn emit_all(&mut self, actions: Vec<Action>) {
        for action in actions {
            self.emit(action);
        }
    }

    /// Mirrors the action locally and queues it for the host store.
    fn emit(&mut self, action: Action) {
        self.mirror(&action);
        trace!(?action, "action emitted");
        self.pending_actions.push(action);
    }

    fn mirror(&mut self, action: &Action) -> bool {
        match action {
            Action::SelectArea { area } => {
                self.viewport.set_selected_area(Some(area.clone()));
                true
            }
            Action::DeselectArea => {
                let had_selection = self.viewport.selected_area().is_some();
                self.viewport.set_selected_area(None);
                had_selection
            }
            _ => {
                let changed = self.notes.apply(action);
                if changed {
                    self.viewport
                        .request_redraw(RedrawRequest::light(RedrawTopic::Notes));
                }
                changed
            }
        }
    }
}
