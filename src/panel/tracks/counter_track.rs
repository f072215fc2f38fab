use crate::core::samples_in_window_with_lead;
use crate::panel::checkerboard::{checkerboard, checkerboard_except};
use crate::panel::{
    CounterSample, LocalPoint, Track, TrackConfig, TrackPayload, TrackRenderContext,
};
use crate::render::{Color, PaintContext, TextHAlign};

pub const COUNTER_TRACK_KIND: &str = "counter";

const LINE_COLOR: Color = Color::rgb(0.18, 0.45, 0.7);
const TEXT_COLOR: Color = Color::rgb(0.15, 0.15, 0.15);
const VALUE_FONT_PX: f64 = 10.0;
const VERTICAL_PADDING: f64 = 3.0;

/// Step-shaped counter: each value holds until the next sample.
///
/// Settings: `min` / `max` pin the value axis; otherwise it fits the
/// visible samples.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterTrack {
    config: TrackConfig,
    hovered: Option<CounterSample>,
}

impl CounterTrack {
    #[must_use]
    pub fn new(config: TrackConfig) -> Self {
        Self {
            config,
            hovered: None,
        }
    }

    #[must_use]
    pub fn hovered_sample(&self) -> Option<CounterSample> {
        self.hovered
    }

    fn samples<'a>(view: &TrackRenderContext<'a>) -> Option<&'a [CounterSample]> {
        match view.data.map(|data| &data.payload) {
            Some(TrackPayload::Counter(samples)) => Some(samples.as_slice()),
            _ => None,
        }
    }

    fn value_range(&self, samples: &[CounterSample]) -> (f64, f64) {
        let mut min = samples.iter().map(|s| s.value).fold(f64::INFINITY, f64::min);
        let mut max = samples
            .iter()
            .map(|s| s.value)
            .fold(f64::NEG_INFINITY, f64::max);
        if let Some(pinned) = self.config.setting_f64("min") {
            min = pinned;
        }
        if let Some(pinned) = self.config.setting_f64("max") {
            max = pinned;
        }
        if !min.is_finite() || !max.is_finite() {
            return (0.0, 1.0);
        }
        if min == max {
            return (min - 1.0, max + 1.0);
        }
        (min.min(0.0), max)
    }
}

impl Track for CounterTrack {
    fn config(&self) -> &TrackConfig {
        &self.config
    }

    fn render_canvas(&self, ctx: &mut PaintContext<'_>, view: &TrackRenderContext<'_>) {
        let width = view.size.width;
        let height = view.size.height;
        let Some(samples) = Self::samples(view) else {
            checkerboard(ctx, height, 0.0, width);
            return;
        };
        if let Some((data_start, data_end)) = view.data_px_range() {
            checkerboard_except(ctx, height, 0.0, width, data_start, data_end);
        }

        let range = samples_in_window_with_lead(samples, view.visible_window, |s| s.time);
        let visible = &samples[range];
        if visible.is_empty() {
            return;
        }

        let (min, max) = self.value_range(visible);
        let plot_height = (height - 2.0 * VERTICAL_PADDING).max(1.0);
        let value_to_y =
            |value: f64| VERTICAL_PADDING + plot_height * (1.0 - (value - min) / (max - min));

        let mut previous_y: Option<f64> = None;
        for (index, sample) in visible.iter().enumerate() {
            let left = view.time_scale.time_to_px(sample.time).clamp(0.0, width);
            let right = visible
                .get(index + 1)
                .map_or(width, |next| view.time_scale.time_to_px(next.time).clamp(0.0, width));
            let y = value_to_y(sample.value);
            if let Some(previous) = previous_y {
                ctx.line(left, previous, left, y, 1.0, LINE_COLOR);
            }
            if right > left {
                ctx.line(left, y, right, y, 1.0, LINE_COLOR);
            }
            previous_y = Some(y);
        }

        if let Some(hovered) = self.hovered {
            let x = view.time_scale.time_to_px(hovered.time).clamp(0.0, width);
            ctx.fill_text(
                format!("{}", hovered.value),
                x + 4.0,
                VERTICAL_PADDING,
                VALUE_FONT_PX,
                TEXT_COLOR,
                TextHAlign::Left,
            );
        }
    }

    fn on_mouse_move(&mut self, position: LocalPoint, view: &TrackRenderContext<'_>) {
        let Some(samples) = Self::samples(view) else {
            self.hovered = None;
            return;
        };
        let time = view.time_scale.px_to_time(position.x);
        let after = samples.partition_point(|sample| sample.time <= time);
        self.hovered = after.checked_sub(1).map(|index| samples[index]);
    }

    fn on_mouse_out(&mut self) {
        self.hovered = None;
    }
}
