mod counter_track;
mod slice_track;

pub use counter_track::{COUNTER_TRACK_KIND, CounterTrack};
pub use slice_track::{SLICE_TRACK_KIND, SliceTrack};
