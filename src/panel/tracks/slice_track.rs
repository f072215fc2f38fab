use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use tracing::trace;

use crate::core::{TimeSpan, intervals_in_window};
use crate::panel::checkerboard::{checkerboard, checkerboard_except};
use crate::panel::{
    DEFAULT_TRACK_HEIGHT, LocalPoint, SliceSample, Track, TrackConfig, TrackPayload, TrackRenderContext,
};
use crate::render::{Color, PaintContext, TextHAlign};

pub const SLICE_TRACK_KIND: &str = "slices";

const SLICE_HEIGHT: f64 = 18.0;
const TRACK_PADDING: f64 = 4.0;
const MIN_LABEL_WIDTH_PX: f64 = 30.0;
const LABEL_FONT_PX: f64 = 11.0;
const LABEL_COLOR: Color = Color::rgb(1.0, 1.0, 1.0);
const SELECTED_BORDER: Color = Color::rgb(0.0, 0.0, 0.0);

/// Stacked slices (spans) drawn one row per nesting depth.
///
/// Settings: `depth_rows` (number of rows to reserve, default 1).
#[derive(Debug, Clone, PartialEq)]
pub struct SliceTrack {
    config: TrackConfig,
    depth_rows: u32,
    hovered: Option<usize>,
    selected: Option<usize>,
}

impl SliceTrack {
    #[must_use]
    pub fn new(config: TrackConfig) -> Self {
        let depth_rows = config
            .setting_f64("depth_rows")
            .filter(|rows| rows.is_finite() && *rows >= 1.0)
            .map_or(1, |rows| rows as u32);
        Self {
            config,
            depth_rows,
            hovered: None,
            selected: None,
        }
    }

    #[must_use]
    pub fn hovered_slice(&self) -> Option<usize> {
        self.hovered
    }

    #[must_use]
    pub fn selected_slice(&self) -> Option<usize> {
        self.selected
    }

    fn slices<'a>(view: &TrackRenderContext<'a>) -> Option<&'a [SliceSample]> {
        match view.data.map(|data| &data.payload) {
            Some(TrackPayload::Slices(slices)) => Some(slices.as_slice()),
            _ => None,
        }
    }

    fn slice_px(slice: &SliceSample, view: &TrackRenderContext<'_>) -> (f64, f64) {
        let left = view.time_scale.time_to_px(slice.start).max(0.0);
        let right = view.time_scale.time_to_px(slice.end()).min(view.size.width);
        (left, (right - left).max(1.0))
    }

    fn hit_test(&self, position: LocalPoint, view: &TrackRenderContext<'_>) -> Option<usize> {
        let slices = Self::slices(view)?;
        let row = position.y - TRACK_PADDING;
        if row < 0.0 {
            return None;
        }
        let depth = (row / SLICE_HEIGHT).floor() as u32;
        visible_in_row(slices, depth, view.visible_window)
            .find(|(_, slice)| {
                let (left, width) = Self::slice_px(slice, view);
                position.x >= left && position.x <= left + width
            })
            .map(|(index, _)| index)
    }
}

/// Visible slices of one depth row, with their index into `slices`.
fn visible_in_row<'a>(
    slices: &'a [SliceSample],
    depth: u32,
    window: TimeSpan,
) -> impl Iterator<Item = (usize, &'a SliceSample)> + 'a {
    let row_start = slices.partition_point(|slice| slice.depth < depth);
    let row_end = slices.partition_point(|slice| slice.depth <= depth);
    let row = &slices[row_start..row_end];
    let visible = intervals_in_window(row, window, |slice| (slice.start, slice.end()));
    row[visible.clone()]
        .iter()
        .enumerate()
        .map(move |(offset, slice)| (row_start + visible.start + offset, slice))
}

fn color_for_title(title: &str) -> Color {
    let mut hasher = DefaultHasher::new();
    title.hash(&mut hasher);
    let hue = (hasher.finish() % 360) as f64;
    Color::from_hsl(hue, 0.45, 0.45)
}

impl Track for SliceTrack {
    fn config(&self) -> &TrackConfig {
        &self.config
    }

    fn height(&self) -> f64 {
        let rows = f64::from(self.depth_rows) * SLICE_HEIGHT + 2.0 * TRACK_PADDING;
        rows.max(self.config.height_setting().unwrap_or(DEFAULT_TRACK_HEIGHT))
    }

    fn render_canvas(&self, ctx: &mut PaintContext<'_>, view: &TrackRenderContext<'_>) {
        let height = view.size.height;
        let Some(slices) = Self::slices(view) else {
            checkerboard(ctx, height, 0.0, view.size.width);
            return;
        };
        if let Some((data_start, data_end)) = view.data_px_range() {
            checkerboard_except(ctx, height, 0.0, view.size.width, data_start, data_end);
        }

        let max_depth = slices.last().map_or(0, |slice| slice.depth);
        let visible = (0..=max_depth)
            .flat_map(|depth| visible_in_row(slices, depth, view.visible_window));
        for (index, slice) in visible {
            let (left, width) = Self::slice_px(slice, view);
            let top = TRACK_PADDING + f64::from(slice.depth) * SLICE_HEIGHT;
            let base = slice.color.unwrap_or_else(|| color_for_title(&slice.title));
            let fill = if self.hovered == Some(index) {
                base.with_alpha(0.7)
            } else {
                base
            };
            ctx.fill_rect(left, top, width, SLICE_HEIGHT - 1.0, fill);
            if self.selected == Some(index) {
                ctx.stroke_rect(left, top, width, SLICE_HEIGHT - 1.0, 2.0, SELECTED_BORDER);
            }
            if width > MIN_LABEL_WIDTH_PX {
                ctx.fill_text(
                    slice.title.as_str(),
                    left + width / 2.0,
                    top + 2.0,
                    LABEL_FONT_PX,
                    LABEL_COLOR,
                    TextHAlign::Center,
                );
            }
        }
    }

    fn on_mouse_move(&mut self, position: LocalPoint, view: &TrackRenderContext<'_>) {
        self.hovered = self.hit_test(position, view);
    }

    fn on_mouse_click(&mut self, position: LocalPoint, view: &TrackRenderContext<'_>) -> bool {
        let Some(index) = self.hit_test(position, view) else {
            return false;
        };
        trace!(track = %self.config.id, index, "slice selected");
        self.selected = Some(index);
        true
    }

    fn on_mouse_out(&mut self) {
        self.hovered = None;
    }
}
