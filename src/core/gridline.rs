use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{TimeScale, TimeSpan};

/// Target horizontal distance between two axis ticks.
pub const DESIRED_PX_PER_STEP: f64 = 80.0;

const STEP_MULTIPLIERS: [f64; 3] = [2.0, 5.0, 10.0];

/// One axis tick: its snapped pixel column and the timestamp it marks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridTick {
    pub x: f64,
    pub time: f64,
}

pub type GridTicks = SmallVec<[GridTick; 32]>;

/// Returns a "nice" step of the form `{1,2,5} x 10^n` so that `range / step`
/// is as close as possible to `desired_steps`.
///
/// Candidates are evaluated smallest first and only replaced on a strictly
/// better distance, so exact ties keep the smaller step. Non-positive or
/// non-finite inputs yield `1.0`.
#[must_use]
pub fn grid_step_size(range: f64, desired_steps: f64) -> f64 {
    if !range.is_finite() || range <= 0.0 || !desired_steps.is_finite() || desired_steps <= 0.0 {
        return 1.0;
    }

    let desired_step_size = range / desired_steps;
    let zeros = desired_step_size.log10().floor();
    let initial_step = 10f64.powf(zeros);

    let mut closest = initial_step;
    for multiplier in STEP_MULTIPLIERS {
        let candidate = multiplier * initial_step;
        if (range / candidate - desired_steps).abs() < (range / closest - desired_steps).abs() {
            closest = candidate;
        }
    }
    closest
}

/// Tick positions for an axis `width_px` wide showing `span`, using the
/// default spacing of [`DESIRED_PX_PER_STEP`].
#[must_use]
pub fn gridlines(width_px: f64, span: TimeSpan, scale: &TimeScale) -> GridTicks {
    gridlines_with_spacing(width_px, span, scale, DESIRED_PX_PER_STEP)
}

/// Tick positions with an explicit target spacing.
///
/// Ticks are produced by step count rather than by accumulating `step` onto a
/// running timestamp: when `step` is tiny relative to `span.start()` repeated
/// addition stalls or drifts. Only ticks whose pixel lands inside
/// `[scale.start_px(), width_px]` are returned, and a tick equal to the one
/// before it is dropped.
#[must_use]
pub fn gridlines_with_spacing(
    width_px: f64,
    span: TimeSpan,
    scale: &TimeScale,
    target_spacing_px: f64,
) -> GridTicks {
    let mut ticks = GridTicks::new();
    if span.duration() <= 0.0 || !width_px.is_finite() || width_px <= 0.0 {
        return ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return ticks;
    }

    let desired_steps = width_px / target_spacing_px;
    let step = grid_step_size(span.duration(), desired_steps);
    let step_count = (span.duration() / step).floor() as u64;
    let start = (span.start() / step).round() * step;
    let shell_px = scale.start_px();

    let mut previous = f64::NEG_INFINITY;
    for index in 0..=step_count {
        let time = start + index as f64 * step;
        if time == previous {
            continue;
        }
        let x = scale.time_to_px(time).floor();
        if x >= shell_px && x <= width_px {
            ticks.push(GridTick { x, time });
            previous = time;
        }
    }
    ticks
}

/// Formats seconds with the largest unit that keeps the magnitude >= 1,
/// rounded to one decimal: `0.0025` -> `"2.5 ms"`.
#[must_use]
pub fn time_to_string(seconds: f64) -> String {
    const UNITS: [&str; 4] = ["s", "ms", "us", "ns"];
    let negative = seconds < 0.0;
    let mut magnitude = seconds.abs();
    let mut unit = 0;
    while magnitude < 1.0 && magnitude != 0.0 && unit < UNITS.len() - 1 {
        magnitude *= 1000.0;
        unit += 1;
    }
    let rounded = (magnitude * 10.0).round() / 10.0;
    format!("{}{} {}", if negative { "-" } else { "" }, rounded, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::{grid_step_size, time_to_string};

    #[test]
    fn step_size_table() {
        assert_eq!(grid_step_size(10.0, 14.0), 1.0);
        assert_eq!(grid_step_size(30.0, 14.0), 2.0);
        assert_eq!(grid_step_size(60.0, 14.0), 5.0);
        assert_eq!(grid_step_size(100.0, 14.0), 10.0);
        assert_eq!(grid_step_size(800.0, 4.0), 200.0);
    }

    #[test]
    fn step_size_handles_fractional_ranges() {
        let step = grid_step_size(0.001, 10.0);
        assert!((step - 1e-4).abs() < 1e-18);
    }

    #[test]
    fn formats_time_units() {
        assert_eq!(time_to_string(2.0), "2 s");
        assert_eq!(time_to_string(0.0025), "2.5 ms");
        assert_eq!(time_to_string(-0.000_001_5), "-1.5 us");
        assert_eq!(time_to_string(0.0), "0 s");
    }
}
