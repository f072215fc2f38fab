use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};
use crate::overlay::{Area, NoteId};
use crate::panel::{TrackGroupId, TrackId};
use crate::render::Color;

/// State change requested by the user, emitted to the host's store.
///
/// The engine never mutates global state on its own: it emits these and,
/// for notes and the area selection, mirrors them locally so it can draw
/// without waiting for the round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    AddNote {
        id: NoteId,
        timestamp: f64,
        color: Color,
    },
    AddAreaNote {
        id: NoteId,
        area: Area,
        color: Color,
    },
    SelectNote {
        id: NoteId,
    },
    ChangeNoteColor {
        id: NoteId,
        color: Color,
    },
    ChangeNoteText {
        id: NoteId,
        text: String,
    },
    RemoveNote {
        id: NoteId,
    },
    SelectArea {
        area: Area,
    },
    DeselectArea,
    ToggleTrackGroupCollapsed {
        group: TrackGroupId,
    },
    ToggleTrackPinned {
        track: TrackId,
    },
}

/// Sink for emitted actions (the host's reducer/store).
pub trait ActionDispatcher {
    fn dispatch(&mut self, action: Action);
}

impl<F: FnMut(Action)> ActionDispatcher for F {
    fn dispatch(&mut self, action: Action) {
        self(action);
    }
}

/// Dispatcher that only records, for tests and replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionLog {
    actions: Vec<Action>,
}

impl ActionLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn take(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }

    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(&self.actions)
            .map_err(|e| TimelineError::InvalidData(format!("failed to serialize actions: {e}")))
    }
}

impl ActionDispatcher for ActionLog {
    fn dispatch(&mut self, action: Action) {
        self.actions.push(action);
    }
}
