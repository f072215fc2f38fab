use serde::{Deserialize, Serialize};

use crate::core::TimeSpan;

/// Affine mapping between a [`TimeSpan`] (seconds) and a pixel interval.
///
/// `sec_per_px` is derived state: every mutator recomputes it before
/// returning, so it always equals `time_bounds.duration() / (end_px - start_px)`.
/// Pixel widths below one pixel are treated as one pixel to keep the slope
/// finite while a host is mid-resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    time_bounds: TimeSpan,
    start_px: f64,
    end_px: f64,
    sec_per_px: f64,
}

impl TimeScale {
    #[must_use]
    pub fn new(time_bounds: TimeSpan, start_px: f64, end_px: f64) -> Self {
        let mut scale = Self {
            time_bounds,
            start_px,
            end_px,
            sec_per_px: 0.0,
        };
        scale.update_slope();
        scale
    }

    #[must_use]
    pub fn time_bounds(&self) -> TimeSpan {
        self.time_bounds
    }

    #[must_use]
    pub fn start_px(&self) -> f64 {
        self.start_px
    }

    #[must_use]
    pub fn end_px(&self) -> f64 {
        self.end_px
    }

    #[must_use]
    pub fn sec_per_px(&self) -> f64 {
        self.sec_per_px
    }

    /// Width of the mapped pixel interval.
    #[must_use]
    pub fn width_px(&self) -> f64 {
        self.end_px - self.start_px
    }

    /// Maps a timestamp to a pixel. Timestamps outside the bounds extrapolate.
    #[must_use]
    pub fn time_to_px(&self, time: f64) -> f64 {
        if self.sec_per_px == 0.0 {
            return self.start_px;
        }
        self.start_px + (time - self.time_bounds.start()) / self.sec_per_px
    }

    /// Maps a pixel to a timestamp. Pixels outside the range extrapolate.
    #[must_use]
    pub fn px_to_time(&self, px: f64) -> f64 {
        self.time_bounds.start() + (px - self.start_px) * self.sec_per_px
    }

    /// Pixel length of a duration, rounded to whole pixels.
    #[must_use]
    pub fn delta_time_to_px(&self, delta_time: f64) -> f64 {
        if self.sec_per_px == 0.0 {
            return 0.0;
        }
        (delta_time / self.sec_per_px).round()
    }

    #[must_use]
    pub fn delta_px_to_duration(&self, delta_px: f64) -> f64 {
        delta_px * self.sec_per_px
    }

    pub fn set_time_bounds(&mut self, time_bounds: TimeSpan) {
        self.time_bounds = time_bounds;
        self.update_slope();
    }

    pub fn set_limits_px(&mut self, start_px: f64, end_px: f64) {
        self.start_px = start_px;
        self.end_px = end_px;
        self.update_slope();
    }

    #[must_use]
    pub fn time_in_bounds(&self, time: f64) -> bool {
        self.time_bounds.is_in_bounds(time)
    }

    fn update_slope(&mut self) {
        let px_span = (self.end_px - self.start_px).max(1.0);
        self.sec_per_px = self.time_bounds.duration() / px_span;
    }
}

#[cfg(test)]
mod tests {
    use super::TimeScale;
    use crate::core::TimeSpan;

    #[test]
    fn slope_follows_both_mutators() {
        let mut scale = TimeScale::new(TimeSpan::new(0.0, 100.0), 0.0, 100.0);
        assert_eq!(scale.sec_per_px(), 1.0);

        scale.set_limits_px(0.0, 200.0);
        assert_eq!(scale.sec_per_px(), 0.5);

        scale.set_time_bounds(TimeSpan::new(0.0, 400.0));
        assert_eq!(scale.sec_per_px(), 2.0);
    }

    #[test]
    fn zero_duration_maps_everything_to_start_px() {
        let scale = TimeScale::new(TimeSpan::new(5.0, 5.0), 10.0, 110.0);
        assert_eq!(scale.time_to_px(5.0), 10.0);
        assert_eq!(scale.time_to_px(7.0), 10.0);
        assert_eq!(scale.delta_time_to_px(3.0), 0.0);
    }
}
