use serde::{Deserialize, Serialize};
use tracing::trace;

/// Ordered redraw classes; a frame pump repaints at the highest pending one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum RedrawLevel {
    #[default]
    None,
    /// Only the hover line moved.
    Cursor,
    /// View state changed (window, selection, notes) on an unchanged layout.
    Light,
    /// Resize or structural change: everything is laid out again.
    Full,
}

impl RedrawLevel {
    #[must_use]
    pub const fn max(self, other: Self) -> Self {
        if self as u8 >= other as u8 {
            self
        } else {
            other
        }
    }
}

/// What changed; kept for diagnostics and selective hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RedrawTopic {
    General,
    Hover,
    TimeWindow,
    Selection,
    Notes,
    Layout,
    Data,
}

impl RedrawTopic {
    const fn bit(self) -> u8 {
        match self {
            Self::General => 1 << 0,
            Self::Hover => 1 << 1,
            Self::TimeWindow => 1 << 2,
            Self::Selection => 1 << 3,
            Self::Notes => 1 << 4,
            Self::Layout => 1 << 5,
            Self::Data => 1 << 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RedrawTopics {
    bits: u8,
}

impl RedrawTopics {
    const ALL_BITS: u8 = RedrawTopic::General.bit()
        | RedrawTopic::Hover.bit()
        | RedrawTopic::TimeWindow.bit()
        | RedrawTopic::Selection.bit()
        | RedrawTopic::Notes.bit()
        | RedrawTopic::Layout.bit()
        | RedrawTopic::Data.bit();

    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            bits: Self::ALL_BITS,
        }
    }

    #[must_use]
    pub const fn from_topic(topic: RedrawTopic) -> Self {
        Self { bits: topic.bit() }
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    #[must_use]
    pub const fn contains_topic(self, topic: RedrawTopic) -> bool {
        (self.bits & topic.bit()) != 0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }
}

/// One coalesced redraw request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RedrawRequest {
    level: RedrawLevel,
    #[serde(default)]
    topics: RedrawTopics,
}

impl RedrawRequest {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            level: RedrawLevel::None,
            topics: RedrawTopics::none(),
        }
    }

    #[must_use]
    pub const fn cursor() -> Self {
        Self {
            level: RedrawLevel::Cursor,
            topics: RedrawTopics::from_topic(RedrawTopic::Hover),
        }
    }

    #[must_use]
    pub const fn light(topic: RedrawTopic) -> Self {
        Self {
            level: RedrawLevel::Light,
            topics: RedrawTopics::from_topic(topic),
        }
    }

    #[must_use]
    pub const fn full() -> Self {
        Self {
            level: RedrawLevel::Full,
            topics: RedrawTopics::all(),
        }
    }

    #[must_use]
    pub const fn level(self) -> RedrawLevel {
        self.level
    }

    #[must_use]
    pub const fn topics(self) -> RedrawTopics {
        self.topics
    }

    #[must_use]
    pub const fn has_topic(self, topic: RedrawTopic) -> bool {
        self.topics.contains_topic(topic)
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self.level, RedrawLevel::None)
    }

    pub fn merge(&mut self, other: Self) {
        self.level = self.level.max(other.level);
        self.topics = self.topics.union(other.topics);
    }
}

/// Dirty flag plus frame pump bookkeeping.
///
/// Mutations call [`Self::request`] as often as they like; the host's frame
/// loop calls [`Self::take`] once per frame and repaints at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RedrawScheduler {
    pending: RedrawRequest,
    requests_since_frame: usize,
    frames_pumped: u64,
}

impl RedrawScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, request: RedrawRequest) {
        if request.is_none() {
            return;
        }
        self.pending.merge(request);
        self.requests_since_frame += 1;
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.pending.is_none()
    }

    #[must_use]
    pub fn pending(&self) -> RedrawRequest {
        self.pending
    }

    /// Number of requests folded into the pending redraw.
    #[must_use]
    pub fn requests_since_frame(&self) -> usize {
        self.requests_since_frame
    }

    #[must_use]
    pub fn frames_pumped(&self) -> u64 {
        self.frames_pumped
    }

    /// Clears the dirty state and returns what has to be redrawn, or `None`
    /// when nothing changed since the previous frame.
    pub fn take(&mut self) -> Option<RedrawRequest> {
        if !self.is_dirty() {
            return None;
        }
        let request = std::mem::take(&mut self.pending);
        trace!(
            level = ?request.level(),
            coalesced = self.requests_since_frame,
            "redraw taken"
        );
        self.requests_since_frame = 0;
        self.frames_pumped += 1;
        Some(request)
    }
}
