use std::fmt;

use serde::{Deserialize, Serialize};

use crate::panel::TrackId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackGroupId(u32);

impl TrackGroupId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TrackGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group#{}", self.0)
    }
}

/// Ordered set of tracks drawn under one collapsible header.
///
/// Collapsing only changes which rows are drawn: the summary track takes the
/// place of every member row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackGroup {
    pub id: TrackGroupId,
    pub name: String,
    pub summary_track: TrackId,
    pub members: Vec<TrackId>,
    pub collapsed: bool,
}

impl TrackGroup {
    #[must_use]
    pub fn new(id: TrackGroupId, name: impl Into<String>, summary_track: TrackId) -> Self {
        Self {
            id,
            name: name.into(),
            summary_track,
            members: Vec::new(),
            collapsed: true,
        }
    }

    #[must_use]
    pub fn with_members(mut self, members: impl IntoIterator<Item = TrackId>) -> Self {
        self.members = members.into_iter().collect();
        self
    }

    #[must_use]
    pub fn expanded(mut self) -> Self {
        self.collapsed = false;
        self
    }

    #[must_use]
    pub fn contains(&self, track: TrackId) -> bool {
        self.summary_track == track || self.members.contains(&track)
    }

    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    /// Every track id the group owns, summary first.
    pub fn all_tracks(&self) -> impl Iterator<Item = TrackId> + '_ {
        std::iter::once(self.summary_track).chain(self.members.iter().copied())
    }
}
