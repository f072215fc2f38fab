use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::TimeSpan;
use crate::panel::TrackId;

/// A time range spanning zero or more tracks: the live area selection and
/// the payload of an area note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub start_sec: f64,
    pub end_sec: f64,
    #[serde(default)]
    pub track_ids: IndexSet<TrackId>,
}

impl Area {
    /// Builds an area from two edges given in any order.
    #[must_use]
    pub fn new(edge_a: f64, edge_b: f64) -> Self {
        Self {
            start_sec: edge_a.min(edge_b),
            end_sec: edge_a.max(edge_b),
            track_ids: IndexSet::new(),
        }
    }

    #[must_use]
    pub fn with_tracks(mut self, tracks: impl IntoIterator<Item = TrackId>) -> Self {
        self.track_ids = tracks.into_iter().collect();
        self
    }

    #[must_use]
    pub fn span(&self) -> TimeSpan {
        TimeSpan::new(self.start_sec, self.end_sec)
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end_sec - self.start_sec
    }

    #[must_use]
    pub fn contains_time(&self, time: f64) -> bool {
        time >= self.start_sec && time <= self.end_sec
    }
}
