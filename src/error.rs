use thiserror::Error;

use crate::panel::{TrackGroupId, TrackId};

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid time span: start={start}, end={end}")]
    InvalidTimeSpan { start: f64, end: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("no track factory registered for kind `{0}`")]
    UnknownTrackKind(String),

    #[error("unknown track: {0}")]
    UnknownTrack(TrackId),

    #[error("unknown track group: {0}")]
    UnknownTrackGroup(TrackGroupId),

    #[error("duplicate id: {0}")]
    DuplicateId(String),
}
