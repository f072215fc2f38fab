use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

/// Tolerance used by [`TimeSpan::approx_eq`].
///
/// Repeated pan/zoom accumulates floating point drift; spans that differ by
/// less than this are treated as the same span.
pub const TIME_SPAN_EPSILON: f64 = 1e-10;

/// Immutable interval of trace time, in seconds.
///
/// Invariant: `start <= end`, both finite. Every transform returns a new
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSpan", into = "RawTimeSpan")]
pub struct TimeSpan {
    start: f64,
    end: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawTimeSpan {
    start: f64,
    end: f64,
}

impl TryFrom<RawTimeSpan> for TimeSpan {
    type Error = TimelineError;

    fn try_from(raw: RawTimeSpan) -> TimelineResult<Self> {
        Self::try_new(raw.start, raw.end)
    }
}

impl From<TimeSpan> for RawTimeSpan {
    fn from(span: TimeSpan) -> Self {
        Self {
            start: span.start,
            end: span.end,
        }
    }
}

impl TimeSpan {
    /// Creates a span.
    ///
    /// # Panics
    ///
    /// Panics when `start > end` or either bound is not finite. An inverted
    /// span is a programming error and is never silently swapped; use
    /// [`TimeSpan::try_new`] for host-supplied values.
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        assert!(
            start.is_finite() && end.is_finite(),
            "time span bounds must be finite: start={start}, end={end}"
        );
        assert!(start <= end, "time span start {start} is after end {end}");
        Self { start, end }
    }

    /// Fallible constructor for values that did not originate in this crate.
    pub fn try_new(start: f64, end: f64) -> TimelineResult<Self> {
        if !start.is_finite() || !end.is_finite() || start > end {
            return Err(TimelineError::InvalidTimeSpan { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end(self) -> f64 {
        self.end
    }

    #[must_use]
    pub fn duration(self) -> f64 {
        self.end - self.start
    }

    /// Inclusive on both ends.
    #[must_use]
    pub fn is_in_bounds(self, time: f64) -> bool {
        self.start <= time && time <= self.end
    }

    /// Returns `true` when `other` lies fully inside this span.
    #[must_use]
    pub fn contains(self, other: TimeSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    #[must_use]
    pub fn intersects(self, other: TimeSpan) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Shifts both ends by `delta` seconds.
    #[must_use]
    pub fn add(self, delta: f64) -> Self {
        Self::new(self.start + delta, self.end + delta)
    }

    #[must_use]
    pub fn approx_eq(self, other: TimeSpan) -> bool {
        self.approx_eq_with(other, TIME_SPAN_EPSILON)
    }

    #[must_use]
    pub fn approx_eq_with(self, other: TimeSpan, epsilon: f64) -> bool {
        (self.start - other.start).abs() < epsilon && (self.end - other.end).abs() < epsilon
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}s, {}s]", self.start, self.end)
    }
}
