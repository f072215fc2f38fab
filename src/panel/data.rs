use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::TimeSpan;
use crate::panel::TrackId;
use crate::render::Color;

/// One slice on a slice track row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceSample {
    pub start: f64,
    pub duration: f64,
    pub depth: u32,
    pub title: String,
    #[serde(default)]
    pub color: Option<Color>,
}

impl SliceSample {
    #[must_use]
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// One counter value; it holds until the next sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CounterSample {
    pub time: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TrackPayload {
    /// Sorted by `(depth, start)`.
    Slices(Vec<SliceSample>),
    /// Sorted by `time`.
    Counter(Vec<CounterSample>),
}

/// Snapshot of one track's data as produced by the external data layer.
///
/// `window` is the time range the snapshot was fetched for; it can lag the
/// visible window while a newer fetch is in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackData {
    pub window: TimeSpan,
    /// Seconds per bucket the data was summarized at.
    pub resolution: f64,
    pub payload: TrackPayload,
}

/// Read-only lookup into the track data store.
///
/// Returning `None` is the normal "still loading" state, not an error.
pub trait TrackDataSource {
    fn track_data(&self, track: TrackId, visible_window: TimeSpan) -> Option<&TrackData>;
}

/// Data source with nothing loaded yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyTrackData;

impl TrackDataSource for EmptyTrackData {
    fn track_data(&self, _track: TrackId, _visible_window: TimeSpan) -> Option<&TrackData> {
        None
    }
}

/// Simple keyed store that hands back the latest snapshot per track.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryTrackData {
    entries: IndexMap<TrackId, TrackData>,
}

impl InMemoryTrackData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a snapshot, replacing the previous one for `track`.
    pub fn publish(&mut self, track: TrackId, data: TrackData) {
        self.entries.insert(track, data);
    }

    pub fn evict(&mut self, track: TrackId) -> Option<TrackData> {
        self.entries.shift_remove(&track)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TrackDataSource for InMemoryTrackData {
    fn track_data(&self, track: TrackId, _visible_window: TimeSpan) -> Option<&TrackData> {
        self.entries.get(&track)
    }
}
