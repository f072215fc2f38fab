use std::ops::Range;

use crate::core::TimeSpan;

/// Index range of the samples in `samples` (sorted by `time_of`) whose
/// timestamp falls inside `window`, inclusive on both ends.
#[must_use]
pub fn samples_in_window<T>(
    samples: &[T],
    window: TimeSpan,
    time_of: impl Fn(&T) -> f64,
) -> Range<usize> {
    let first = samples.partition_point(|sample| time_of(sample) < window.start());
    let last = samples.partition_point(|sample| time_of(sample) <= window.end());
    first..last.max(first)
}

/// Like [`samples_in_window`] but also keeps the last sample before the
/// window, so step-shaped series (counters, thread states) start drawing at
/// the window's left edge instead of at their first in-window change.
#[must_use]
pub fn samples_in_window_with_lead<T>(
    samples: &[T],
    window: TimeSpan,
    time_of: impl Fn(&T) -> f64,
) -> Range<usize> {
    let range = samples_in_window(samples, window, time_of);
    range.start.saturating_sub(1)..range.end
}

/// Index range of intervals (sorted by start) that overlap `window`.
///
/// Intervals are `(start, end)` pairs; an interval ending before the window
/// is skipped only when it also starts before the window, which is exact for
/// non-overlapping intervals such as the slices of one depth row.
#[must_use]
pub fn intervals_in_window<T>(
    intervals: &[T],
    window: TimeSpan,
    bounds_of: impl Fn(&T) -> (f64, f64),
) -> Range<usize> {
    let first = intervals.partition_point(|interval| bounds_of(interval).1 < window.start());
    let last = intervals.partition_point(|interval| bounds_of(interval).0 <= window.end());
    first..last.max(first)
}
