use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::api::Action;
use crate::core::{PanelSize, TimeScale, Viewport};
use crate::error::{TimelineError, TimelineResult};
use crate::overlay::draw_timeline_overlay;
use crate::panel::{
    LocalPoint, Panel, PanelDragBehavior, PanelRenderContext, Track, TrackDataSource,
    TrackGroup, TrackGroupId, TrackId, TrackRenderContext,
};
use crate::render::{Color, PaintContext, TextHAlign};

const SHELL_BACKGROUND: Color = Color::rgb(0.97, 0.97, 0.98);
const GROUP_SHELL_BACKGROUND: Color = Color::rgb(0.91, 0.93, 0.96);
const SHELL_TEXT: Color = Color::rgb(0.2, 0.2, 0.2);
const ROW_SEPARATOR: Color = Color::rgb(0.85, 0.85, 0.85);
const GRIDLINE_COLOR: Color = Color::rgb(0.9, 0.9, 0.9);
const PIN_BUTTON_COLOR: Color = Color::rgb(0.45, 0.45, 0.45);
const SHELL_FONT_PX: f64 = 12.0;
const SHELL_TEXT_INSET_PX: f64 = 8.0;
const GROUP_INDENT_PX: f64 = 12.0;
/// Width of the pin toggle at the right edge of a track shell.
pub const PIN_BUTTON_WIDTH_PX: f64 = 20.0;

/// Which stack a slot belongs to. Pinned rows never scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelRegion {
    Pinned,
    Scrolling,
}

/// Top-level entry in a region.
pub enum PanelSlot {
    Static(Box<dyn Panel>),
    Track(TrackId),
    Group(TrackGroupId),
}

impl fmt::Debug for PanelSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(panel) => f.debug_tuple("Static").field(&panel.name()).finish(),
            Self::Track(track) => f.debug_tuple("Track").field(track).finish(),
            Self::Group(group) => f.debug_tuple("Group").field(group).finish(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowKind {
    /// Static panel at `index` within its region.
    Panel { index: usize },
    Track {
        track: TrackId,
        group: Option<TrackGroupId>,
    },
    /// Group header; it draws the group's summary track.
    GroupHeader {
        group: TrackGroupId,
        summary: TrackId,
    },
}

/// One laid-out row. `top` is in canvas pixels with the scroll offset
/// already applied to scrolling rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutRow {
    pub region: PanelRegion,
    pub kind: RowKind,
    pub top: f64,
    pub height: f64,
}

impl LayoutRow {
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContainerRenderStats {
    pub rows_drawn: usize,
    pub rows_skipped: usize,
}

/// Resolves a vertical pixel extent to the tracks drawn there.
pub trait TrackLocator {
    /// Ids of tracks whose rows intersect `[top, bottom]` (canvas pixels).
    /// A collapsed group contributes every track it owns.
    fn tracks_in_vertical_range(&self, top: f64, bottom: f64) -> IndexSet<TrackId>;
}

/// Stacks pinned and scrolling panels that all share one time scale.
pub struct PanelContainer {
    pinned: Vec<PanelSlot>,
    scrolling: Vec<PanelSlot>,
    tracks: IndexMap<TrackId, Box<dyn Track>>,
    groups: IndexMap<TrackGroupId, TrackGroup>,
    viewport: Viewport,
    shell_width: f64,
    group_header_height: f64,
    scroll_offset: f64,
    structure_generation: u64,
    hovered: Option<(PanelRegion, RowKind)>,
}

impl PanelContainer {
    #[must_use]
    pub fn new(viewport: Viewport, shell_width: f64, group_header_height: f64) -> Self {
        Self {
            pinned: Vec::new(),
            scrolling: Vec::new(),
            tracks: IndexMap::new(),
            groups: IndexMap::new(),
            viewport,
            shell_width,
            group_header_height,
            scroll_offset: 0.0,
            structure_generation: 0,
            hovered: None,
        }
    }

    /// Bumped on every add/remove/reorder/collapse/pin; the engine turns a
    /// change into a full redraw.
    #[must_use]
    pub fn structure_generation(&self) -> u64 {
        self.structure_generation
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn shell_width(&self) -> f64 {
        self.shell_width
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.set_scroll_offset(self.scroll_offset);
    }

    #[must_use]
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn contains_track(&self, track: TrackId) -> bool {
        self.tracks.contains_key(&track)
    }

    #[must_use]
    pub fn track(&self, track: TrackId) -> Option<&dyn Track> {
        self.tracks.get(&track).map(|track| &**track)
    }

    #[must_use]
    pub fn group(&self, group: TrackGroupId) -> Option<&TrackGroup> {
        self.groups.get(&group)
    }

    /// Region holding the top-level slot for `track`, if it has one.
    #[must_use]
    pub fn track_region(&self, track: TrackId) -> Option<PanelRegion> {
        let is_slot = |slot: &PanelSlot| matches!(slot, PanelSlot::Track(id) if *id == track);
        if self.pinned.iter().any(is_slot) {
            Some(PanelRegion::Pinned)
        } else if self.scrolling.iter().any(is_slot) {
            Some(PanelRegion::Scrolling)
        } else {
            None
        }
    }

    pub fn add_panel(&mut self, region: PanelRegion, panel: Box<dyn Panel>) {
        debug!(panel = panel.name(), ?region, "panel added");
        self.slots_mut(region).push(PanelSlot::Static(panel));
        self.bump_structure();
    }

    pub fn add_track(&mut self, region: PanelRegion, track: Box<dyn Track>) -> TimelineResult<TrackId> {
        let id = track.id();
        if self.tracks.contains_key(&id) {
            return Err(TimelineError::DuplicateId(id.to_string()));
        }
        self.tracks.insert(id, track);
        self.slots_mut(region).push(PanelSlot::Track(id));
        debug!(track = %id, ?region, "track added");
        self.bump_structure();
        Ok(id)
    }

    /// Adds a group together with every track it owns (summary included).
    pub fn add_group(
        &mut self,
        region: PanelRegion,
        group: TrackGroup,
        tracks: Vec<Box<dyn Track>>,
    ) -> TimelineResult<()> {
        if self.groups.contains_key(&group.id) {
            return Err(TimelineError::DuplicateId(group.id.to_string()));
        }
        let provided: IndexSet<TrackId> = tracks.iter().map(|track| track.id()).collect();
        if provided.len() != tracks.len() {
            return Err(TimelineError::InvalidData(format!(
                "group {} was given the same track twice",
                group.id
            )));
        }
        if let Some(foreign) = provided.iter().find(|id| !group.contains(**id)) {
            return Err(TimelineError::InvalidData(format!(
                "{foreign} is not a member of group {}",
                group.id
            )));
        }
        if let Some(missing) = group.all_tracks().find(|id| !provided.contains(id)) {
            return Err(TimelineError::UnknownTrack(missing));
        }
        if let Some(existing) = provided.iter().find(|id| self.tracks.contains_key(*id)) {
            return Err(TimelineError::DuplicateId(existing.to_string()));
        }

        for track in tracks {
            self.tracks.insert(track.id(), track);
        }
        debug!(group = %group.id, members = group.members.len(), ?region, "track group added");
        self.slots_mut(region).push(PanelSlot::Group(group.id));
        self.groups.insert(group.id, group);
        self.bump_structure();
        Ok(())
    }

    /// Removes a top-level or grouped track. A group's summary track can
    /// only go away with its group.
    pub fn remove_track(&mut self, track: TrackId) -> TimelineResult<Box<dyn Track>> {
        if !self.tracks.contains_key(&track) {
            return Err(TimelineError::UnknownTrack(track));
        }
        if let Some(group) = self.groups.values().find(|group| group.summary_track == track) {
            return Err(TimelineError::InvalidData(format!(
                "{track} is the summary track of {}; remove the group instead",
                group.id
            )));
        }
        self.pinned
            .retain(|slot| !matches!(slot, PanelSlot::Track(id) if *id == track));
        self.scrolling
            .retain(|slot| !matches!(slot, PanelSlot::Track(id) if *id == track));
        for group in self.groups.values_mut() {
            group.members.retain(|member| *member != track);
        }
        let removed = self
            .tracks
            .shift_remove(&track)
            .ok_or(TimelineError::UnknownTrack(track))?;
        self.forget_hover_of(|kind| matches!(kind, RowKind::Track { track: id, .. } if id == track));
        debug!(track = %track, "track removed");
        self.bump_structure();
        Ok(removed)
    }

    pub fn remove_group(&mut self, group: TrackGroupId) -> TimelineResult<TrackGroup> {
        let removed = self
            .groups
            .shift_remove(&group)
            .ok_or(TimelineError::UnknownTrackGroup(group))?;
        self.pinned
            .retain(|slot| !matches!(slot, PanelSlot::Group(id) if *id == group));
        self.scrolling
            .retain(|slot| !matches!(slot, PanelSlot::Group(id) if *id == group));
        for track in removed.all_tracks() {
            self.tracks.shift_remove(&track);
        }
        self.forget_hover_of(|kind| match kind {
            RowKind::GroupHeader { group: id, .. } => id == group,
            RowKind::Track { group: owner, .. } => owner == Some(group),
            RowKind::Panel { .. } => false,
        });
        debug!(group = %group, "track group removed");
        self.bump_structure();
        Ok(removed)
    }

    /// Moves a track to `to_index` within the list that holds it (its region
    /// for top-level tracks, its group's member list otherwise). The index is
    /// clamped to the list length.
    pub fn move_track(&mut self, track: TrackId, to_index: usize) -> TimelineResult<()> {
        let is_slot = |slot: &PanelSlot| matches!(slot, PanelSlot::Track(id) if *id == track);
        let mut moved = None;
        for slots in [&mut self.pinned, &mut self.scrolling] {
            if let Some(from) = slots.iter().position(is_slot) {
                let slot = slots.remove(from);
                let to = to_index.min(slots.len());
                slots.insert(to, slot);
                moved = Some((from, to));
                break;
            }
        }
        if moved.is_none() {
            for group in self.groups.values_mut() {
                if let Some(from) = group.members.iter().position(|member| *member == track) {
                    group.members.remove(from);
                    let to = to_index.min(group.members.len());
                    group.members.insert(to, track);
                    moved = Some((from, to));
                    break;
                }
            }
        }
        let Some((from, to)) = moved else {
            return Err(TimelineError::UnknownTrack(track));
        };
        debug!(track = %track, from, to, "track moved");
        self.bump_structure();
        Ok(())
    }

    /// Returns the new collapsed state.
    pub fn toggle_group_collapsed(&mut self, group: TrackGroupId) -> TimelineResult<bool> {
        let entry = self
            .groups
            .get_mut(&group)
            .ok_or(TimelineError::UnknownTrackGroup(group))?;
        entry.toggle_collapsed();
        let collapsed = entry.collapsed;
        debug!(group = %group, collapsed, "track group toggled");
        self.bump_structure();
        self.set_scroll_offset(self.scroll_offset);
        Ok(collapsed)
    }

    /// Moves a top-level track to the end of the other region and returns
    /// the region it now lives in.
    pub fn toggle_pinned(&mut self, track: TrackId) -> TimelineResult<PanelRegion> {
        let Some(from) = self.track_region(track) else {
            if self.tracks.contains_key(&track) {
                return Err(TimelineError::InvalidData(format!(
                    "{track} belongs to a group and cannot be pinned on its own"
                )));
            }
            return Err(TimelineError::UnknownTrack(track));
        };
        let to = match from {
            PanelRegion::Pinned => PanelRegion::Scrolling,
            PanelRegion::Scrolling => PanelRegion::Pinned,
        };
        self.slots_mut(from)
            .retain(|slot| !matches!(slot, PanelSlot::Track(id) if *id == track));
        self.slots_mut(to).push(PanelSlot::Track(track));
        self.hovered = None;
        debug!(track = %track, ?to, "track pin toggled");
        self.bump_structure();
        self.set_scroll_offset(self.scroll_offset);
        Ok(to)
    }

    #[must_use]
    pub fn pinned_height(&self) -> f64 {
        self.region_height(PanelRegion::Pinned)
    }

    /// Sum of every scrolling row height; sizes the virtual scrollbar.
    #[must_use]
    pub fn total_scroll_height(&self) -> f64 {
        self.region_height(PanelRegion::Scrolling)
    }

    /// Height of the window through which scrolling rows are seen.
    #[must_use]
    pub fn scroll_viewport_height(&self) -> f64 {
        (self.viewport.height_px() - self.pinned_height()).max(0.0)
    }

    #[must_use]
    pub fn max_scroll_offset(&self) -> f64 {
        (self.total_scroll_height() - self.scroll_viewport_height()).max(0.0)
    }

    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Sets the scroll offset clamped to `[0, max_scroll_offset]` and
    /// returns the applied value.
    pub fn set_scroll_offset(&mut self, offset: f64) -> f64 {
        let offset = if offset.is_finite() { offset } else { 0.0 };
        self.scroll_offset = offset.clamp(0.0, self.max_scroll_offset());
        self.scroll_offset
    }

    /// Returns `true` when the offset actually changed.
    pub fn scroll_by(&mut self, delta_px: f64) -> bool {
        let before = self.scroll_offset;
        self.set_scroll_offset(before + delta_px) != before
    }

    /// Every row in draw order, pinned first.
    #[must_use]
    pub fn layout(&self) -> Vec<LayoutRow> {
        let mut rows = Vec::with_capacity(self.pinned.len() + self.scrolling.len());
        let pinned_bottom = self.layout_region(PanelRegion::Pinned, 0.0, &mut rows);
        self.layout_region(
            PanelRegion::Scrolling,
            pinned_bottom - self.scroll_offset,
            &mut rows,
        );
        rows
    }

    /// Row under a canvas position, honoring the scroll viewport.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<LayoutRow> {
        if x < 0.0 || x >= self.viewport.width_px() || y < 0.0 || y >= self.viewport.height_px() {
            return None;
        }
        let pinned_height = self.pinned_height();
        self.layout().into_iter().find(|row| {
            let visible = match row.region {
                PanelRegion::Pinned => true,
                PanelRegion::Scrolling => y >= pinned_height,
            };
            visible && row.contains_y(y)
        })
    }

    #[must_use]
    pub fn drag_behavior_at(&self, x: f64, y: f64) -> PanelDragBehavior {
        match self.hit_test(x, y) {
            Some(LayoutRow {
                region,
                kind: RowKind::Panel { index },
                ..
            }) => self
                .static_panel(region, index)
                .map_or(PanelDragBehavior::Timeline, |panel| panel.drag_behavior()),
            _ => PanelDragBehavior::Timeline,
        }
    }

    /// Draws every row that intersects the viewport. Scrolling rows outside
    /// the scroll viewport are skipped without issuing any draw call.
    pub fn render(
        &self,
        ctx: &mut PaintContext<'_>,
        view: &PanelRenderContext<'_>,
        data: &dyn TrackDataSource,
    ) -> ContainerRenderStats {
        let mut stats = ContainerRenderStats::default();
        let width = self.viewport.width_px();
        let pinned_height = self.pinned_height();
        let viewport_height = self.viewport.height_px();
        let track_scale = self.track_time_scale(view);
        let rows = self.layout();

        for row in rows.iter().filter(|row| row.region == PanelRegion::Pinned) {
            if row.top >= viewport_height {
                stats.rows_skipped += 1;
                continue;
            }
            self.render_row(ctx, row, view, &track_scale, data);
            stats.rows_drawn += 1;
        }

        ctx.save();
        ctx.clip_rect(0.0, pinned_height, width, self.scroll_viewport_height());
        for row in rows.iter().filter(|row| row.region == PanelRegion::Scrolling) {
            if row.bottom() <= pinned_height || row.top >= viewport_height {
                stats.rows_skipped += 1;
                continue;
            }
            self.render_row(ctx, row, view, &track_scale, data);
            stats.rows_drawn += 1;
        }
        ctx.restore();

        trace!(
            drawn = stats.rows_drawn,
            skipped = stats.rows_skipped,
            "panel container rendered"
        );
        stats
    }

    /// Routes a pointer move to the row under it, sending `on_mouse_out` to
    /// the previously hovered row when the pointer changed rows.
    pub fn on_mouse_move(
        &mut self,
        x: f64,
        y: f64,
        view: &PanelRenderContext<'_>,
        data: &dyn TrackDataSource,
    ) {
        let hit = self.hit_test(x, y);
        let hovered = hit.map(|row| (row.region, row.kind));
        if self.hovered != hovered {
            self.on_mouse_out();
            self.hovered = hovered;
        }
        let Some(row) = hit else {
            return;
        };

        let local_y = y - row.top;
        match row.kind {
            RowKind::Panel { index } => {
                if let Some(panel) = self.static_panel_mut(row.region, index) {
                    panel.on_mouse_move(LocalPoint::new(x, local_y), view);
                }
            }
            RowKind::Track { track, .. } | RowKind::GroupHeader { summary: track, .. } => {
                if x < self.shell_width {
                    return;
                }
                let track_scale = self.track_time_scale(view);
                let track_view = self.track_view(track, row.height, view, &track_scale, data);
                if let Some(entry) = self.tracks.get_mut(&track) {
                    entry.on_mouse_move(LocalPoint::new(x - self.shell_width, local_y), &track_view);
                }
            }
        }
    }

    pub fn on_mouse_out(&mut self) {
        let Some((region, kind)) = self.hovered.take() else {
            return;
        };
        match kind {
            RowKind::Panel { index } => {
                if let Some(panel) = self.static_panel_mut(region, index) {
                    panel.on_mouse_out();
                }
            }
            RowKind::Track { track, .. } | RowKind::GroupHeader { summary: track, .. } => {
                if let Some(entry) = self.tracks.get_mut(&track) {
                    entry.on_mouse_out();
                }
            }
        }
    }

    /// Routes a click. Returns `true` when a panel, track, or shell control
    /// consumed it.
    pub fn on_mouse_click(
        &mut self,
        x: f64,
        y: f64,
        view: &PanelRenderContext<'_>,
        data: &dyn TrackDataSource,
        actions: &mut Vec<Action>,
    ) -> bool {
        let Some(row) = self.hit_test(x, y) else {
            return false;
        };
        let local_y = y - row.top;
        match row.kind {
            RowKind::Panel { index } => self
                .static_panel_mut(row.region, index)
                .is_some_and(|panel| panel.on_mouse_click(LocalPoint::new(x, local_y), view, actions)),
            RowKind::GroupHeader { group, .. } if x < self.shell_width => {
                actions.push(Action::ToggleTrackGroupCollapsed { group });
                true
            }
            RowKind::Track { track, group: None } if x < self.shell_width => {
                if x >= self.shell_width - PIN_BUTTON_WIDTH_PX {
                    actions.push(Action::ToggleTrackPinned { track });
                    return true;
                }
                false
            }
            RowKind::Track { track, .. } | RowKind::GroupHeader { summary: track, .. } => {
                if x < self.shell_width {
                    return false;
                }
                let track_scale = self.track_time_scale(view);
                let track_view = self.track_view(track, row.height, view, &track_scale, data);
                self.tracks.get_mut(&track).is_some_and(|entry| {
                    entry.on_mouse_click(LocalPoint::new(x - self.shell_width, local_y), &track_view)
                })
            }
        }
    }

    /// Scale tracks draw with: the visible window over `[0, width - shell]`.
    #[must_use]
    pub fn track_time_scale(&self, view: &PanelRenderContext<'_>) -> TimeScale {
        TimeScale::new(view.visible_window, 0.0, self.track_area_width())
    }

    fn track_area_width(&self) -> f64 {
        (self.viewport.width_px() - self.shell_width).max(0.0)
    }

    fn track_view<'a>(
        &self,
        track: TrackId,
        height: f64,
        view: &PanelRenderContext<'_>,
        track_scale: &'a TimeScale,
        data: &'a dyn TrackDataSource,
    ) -> TrackRenderContext<'a> {
        TrackRenderContext {
            time_scale: track_scale,
            visible_window: view.visible_window,
            size: PanelSize::new(self.track_area_width(), height),
            data: data.track_data(track, view.visible_window),
        }
    }

    fn render_row(
        &self,
        ctx: &mut PaintContext<'_>,
        row: &LayoutRow,
        view: &PanelRenderContext<'_>,
        track_scale: &TimeScale,
        data: &dyn TrackDataSource,
    ) {
        let width = self.viewport.width_px();
        let size = PanelSize::new(width, row.height);
        ctx.save();
        ctx.translate(0.0, row.top);
        ctx.clip_rect(0.0, 0.0, width, row.height);

        let overlay = match row.kind {
            RowKind::Panel { index } => match self.static_panel(row.region, index) {
                Some(panel) => {
                    panel.render_canvas(ctx, size, view);
                    panel.draws_timeline_overlay()
                }
                None => false,
            },
            RowKind::Track { track, group } => {
                let indent = if group.is_some() { GROUP_INDENT_PX } else { 0.0 };
                let label = self.tracks.get(&track).map_or("", |entry| entry.config().name.as_str());
                self.draw_shell(ctx, label, row.height, indent, SHELL_BACKGROUND);
                if group.is_none() {
                    self.draw_pin_button(ctx, row.height, row.region == PanelRegion::Pinned);
                }
                self.render_track_area(ctx, track, row.height, view, track_scale, data);
                true
            }
            RowKind::GroupHeader { group, summary } => {
                let (name, collapsed) = self
                    .groups
                    .get(&group)
                    .map_or(("", true), |entry| (entry.name.as_str(), entry.collapsed));
                let glyph = if collapsed { '\u{25B8}' } else { '\u{25BE}' };
                self.draw_shell(
                    ctx,
                    &format!("{glyph} {name}"),
                    row.height,
                    0.0,
                    GROUP_SHELL_BACKGROUND,
                );
                if collapsed {
                    self.render_track_area(ctx, summary, row.height, view, track_scale, data);
                }
                true
            }
        };

        if overlay {
            draw_timeline_overlay(ctx, size, view);
        }
        ctx.line(0.0, row.height, width, row.height, 1.0, ROW_SEPARATOR);
        ctx.restore();
    }

    fn render_track_area(
        &self,
        ctx: &mut PaintContext<'_>,
        track: TrackId,
        height: f64,
        view: &PanelRenderContext<'_>,
        track_scale: &TimeScale,
        data: &dyn TrackDataSource,
    ) {
        let Some(entry) = self.tracks.get(&track) else {
            return;
        };
        let track_view = self.track_view(track, height, view, track_scale, data);
        ctx.save();
        ctx.translate(self.shell_width, 0.0);
        ctx.clip_rect(0.0, 0.0, track_view.size.width, height);
        for tick in view.grid_ticks {
            let x = tick.x - self.shell_width;
            ctx.line(x, 0.0, x, height, 1.0, GRIDLINE_COLOR);
        }
        entry.render_canvas(ctx, &track_view);
        ctx.restore();
    }

    fn draw_shell(
        &self,
        ctx: &mut PaintContext<'_>,
        label: &str,
        height: f64,
        indent: f64,
        background: Color,
    ) {
        ctx.fill_rect(0.0, 0.0, self.shell_width, height, background);
        ctx.fill_text(
            label,
            SHELL_TEXT_INSET_PX + indent,
            (height - SHELL_FONT_PX) / 2.0,
            SHELL_FONT_PX,
            SHELL_TEXT,
            TextHAlign::Left,
        );
        ctx.line(self.shell_width, 0.0, self.shell_width, height, 1.0, ROW_SEPARATOR);
    }

    fn draw_pin_button(&self, ctx: &mut PaintContext<'_>, height: f64, pinned: bool) {
        let size = PIN_BUTTON_WIDTH_PX / 2.0;
        let x = self.shell_width - PIN_BUTTON_WIDTH_PX + size / 2.0;
        let y = (height - size) / 2.0;
        if pinned {
            ctx.fill_rect(x, y, size, size, PIN_BUTTON_COLOR);
        } else {
            ctx.stroke_rect(x, y, size, size, 1.0, PIN_BUTTON_COLOR);
        }
    }

    fn layout_region(&self, region: PanelRegion, start: f64, rows: &mut Vec<LayoutRow>) -> f64 {
        let mut top = start;
        let mut push = |kind: RowKind, height: f64| {
            rows.push(LayoutRow {
                region,
                kind,
                top,
                height,
            });
            top += height;
        };
        for (index, slot) in self.slots(region).iter().enumerate() {
            match slot {
                PanelSlot::Static(panel) => push(RowKind::Panel { index }, panel.height()),
                PanelSlot::Track(id) => {
                    if let Some(track) = self.tracks.get(id) {
                        push(
                            RowKind::Track {
                                track: *id,
                                group: None,
                            },
                            track.height(),
                        );
                    }
                }
                PanelSlot::Group(id) => {
                    let Some(group) = self.groups.get(id) else {
                        continue;
                    };
                    push(
                        RowKind::GroupHeader {
                            group: *id,
                            summary: group.summary_track,
                        },
                        self.group_header_height,
                    );
                    if group.collapsed {
                        continue;
                    }
                    for member in &group.members {
                        if let Some(track) = self.tracks.get(member) {
                            push(
                                RowKind::Track {
                                    track: *member,
                                    group: Some(*id),
                                },
                                track.height(),
                            );
                        }
                    }
                }
            }
        }
        top
    }

    fn region_height(&self, region: PanelRegion) -> f64 {
        let mut rows = Vec::new();
        self.layout_region(region, 0.0, &mut rows)
    }

    fn slots(&self, region: PanelRegion) -> &[PanelSlot] {
        match region {
            PanelRegion::Pinned => &self.pinned,
            PanelRegion::Scrolling => &self.scrolling,
        }
    }

    fn slots_mut(&mut self, region: PanelRegion) -> &mut Vec<PanelSlot> {
        match region {
            PanelRegion::Pinned => &mut self.pinned,
            PanelRegion::Scrolling => &mut self.scrolling,
        }
    }

    fn static_panel(&self, region: PanelRegion, index: usize) -> Option<&dyn Panel> {
        match self.slots(region).get(index) {
            Some(PanelSlot::Static(panel)) => Some(&**panel),
            _ => None,
        }
    }

    fn static_panel_mut(&mut self, region: PanelRegion, index: usize) -> Option<&mut Box<dyn Panel>> {
        match self.slots_mut(region).get_mut(index) {
            Some(PanelSlot::Static(panel)) => Some(panel),
            _ => None,
        }
    }

    fn forget_hover_of(&mut self, matches_kind: impl Fn(RowKind) -> bool) {
        if self.hovered.is_some_and(|(_, kind)| matches_kind(kind)) {
            self.hovered = None;
        }
    }

    fn bump_structure(&mut self) {
        self.structure_generation = self.structure_generation.wrapping_add(1);
    }
}

impl TrackLocator for PanelContainer {
    fn tracks_in_vertical_range(&self, top: f64, bottom: f64) -> IndexSet<TrackId> {
        let (top, bottom) = if top <= bottom { (top, bottom) } else { (bottom, top) };
        let pinned_height = self.pinned_height();
        let mut ids = IndexSet::new();
        for row in self.layout() {
            let row_top = match row.region {
                PanelRegion::Pinned => row.top,
                PanelRegion::Scrolling => row.top.max(pinned_height),
            };
            if row.bottom() <= row_top || row.bottom() <= top || row_top > bottom {
                continue;
            }
            match row.kind {
                RowKind::Panel { .. } => {}
                RowKind::Track { track, .. } => {
                    ids.insert(track);
                }
                RowKind::GroupHeader { group, summary } => match self.groups.get(&group) {
                    Some(entry) if entry.collapsed => ids.extend(entry.all_tracks()),
                    _ => {
                        ids.insert(summary);
                    }
                },
            }
        }
        ids
    }
}

impl fmt::Debug for PanelContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelContainer")
            .field("pinned", &self.pinned)
            .field("scrolling", &self.scrolling)
            .field("tracks", &self.tracks.keys().collect::<Vec<_>>())
            .field("groups", &self.groups.keys().collect::<Vec<_>>())
            .field("viewport", &self.viewport)
            .field("scroll_offset", &self.scroll_offset)
            .finish()
    }
}
