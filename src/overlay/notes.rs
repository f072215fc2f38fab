use std::fmt;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::api::Action;
use crate::core::TimeScale;
use crate::overlay::Area;
use crate::render::Color;

/// Width of a point note's flag glyph; also its click hotspot.
pub const FLAG_WIDTH_PX: f64 = 16.0;
/// Width of each boundary triangle of an area note.
pub const AREA_TRIANGLE_WIDTH_PX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(Uuid);

impl NoteId {
    #[must_use]
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "note#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultNote {
    pub id: NoteId,
    pub timestamp: f64,
    pub color: Color,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaNote {
    pub id: NoteId,
    pub area: Area,
    pub color: Color,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Note {
    Default(DefaultNote),
    Area(AreaNote),
}

impl Note {
    #[must_use]
    pub fn id(&self) -> NoteId {
        match self {
            Self::Default(note) => note.id,
            Self::Area(note) => note.id,
        }
    }

    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Self::Default(note) => note.color,
            Self::Area(note) => note.color,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Default(note) => &note.text,
            Self::Area(note) => &note.text,
        }
    }

    /// Timestamp for point notes, area start for area notes.
    #[must_use]
    pub fn start_time(&self) -> f64 {
        match self {
            Self::Default(note) => note.timestamp,
            Self::Area(note) => note.area.start_sec,
        }
    }

    pub fn set_color(&mut self, color: Color) {
        match self {
            Self::Default(note) => note.color = color,
            Self::Area(note) => note.color = color,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        match self {
            Self::Default(note) => note.text = text,
            Self::Area(note) => note.text = text,
        }
    }

    /// Whether absolute pixel `x` lands on this note's glyph: the flag for
    /// point notes, either boundary triangle for area notes.
    #[must_use]
    pub fn hit_test(&self, x: f64, scale: &TimeScale) -> bool {
        match self {
            Self::Default(note) => {
                let flag_x = scale.time_to_px(note.timestamp);
                x >= flag_x && x < flag_x + FLAG_WIDTH_PX
            }
            Self::Area(note) => {
                let start_px = scale.time_to_px(note.area.start_sec);
                let end_px = scale.time_to_px(note.area.end_sec);
                (x >= start_px && x < start_px + AREA_TRIANGLE_WIDTH_PX)
                    || (x > end_px - AREA_TRIANGLE_WIDTH_PX && x <= end_px)
            }
        }
    }
}

/// Fresh, fully saturated color with a random hue.
#[must_use]
pub fn random_note_color() -> Color {
    let bits = Uuid::new_v4().as_u128();
    let hue = (bits % 360) as f64;
    Color::from_hsl(hue, 0.7, 0.5)
}

/// Local mirror of the note state, kept in sync by reducing the same
/// actions the host store receives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteStore {
    notes: IndexMap<NoteId, Note>,
    selected: Option<NoteId>,
}

impl NoteStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }

    #[must_use]
    pub fn selected(&self) -> Option<NoteId> {
        self.selected
    }

    #[must_use]
    pub fn selected_note(&self) -> Option<&Note> {
        self.selected.and_then(|id| self.notes.get(&id))
    }

    /// Notes ordered by start time; insertion order breaks ties.
    #[must_use]
    pub fn sorted_by_time(&self) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self.notes.values().collect();
        notes.sort_by_key(|note| OrderedFloat(note.start_time()));
        notes
    }

    /// Topmost note under absolute pixel `x`. Later notes draw on top, so
    /// they win.
    #[must_use]
    pub fn hit_test(&self, x: f64, scale: &TimeScale) -> Option<NoteId> {
        self.notes
            .values()
            .rev()
            .find(|note| note.hit_test(x, scale))
            .map(Note::id)
    }

    /// Reduces a note action. Returns `true` when the store changed;
    /// non-note actions, unknown ids and re-adds of an existing id are
    /// ignored, so replaying an emitted action is harmless. Actions carrying
    /// a non-finite time or an out-of-range color are dropped.
    pub fn apply(&mut self, action: &Action) -> bool {
        match action {
            Action::AddNote {
                id,
                timestamp,
                color,
            } => {
                if self.notes.contains_key(id) || !accepts(timestamp.is_finite(), *color) {
                    return false;
                }
                self.notes.insert(
                    *id,
                    Note::Default(DefaultNote {
                        id: *id,
                        timestamp: *timestamp,
                        color: *color,
                        text: String::new(),
                    }),
                );
                self.selected = Some(*id);
                debug!(note = %id, timestamp, "note added");
                true
            }
            Action::AddAreaNote { id, area, color } => {
                let bounded = area.start_sec.is_finite()
                    && area.end_sec.is_finite()
                    && area.start_sec <= area.end_sec;
                if self.notes.contains_key(id) || !accepts(bounded, *color) {
                    return false;
                }
                self.notes.insert(
                    *id,
                    Note::Area(AreaNote {
                        id: *id,
                        area: area.clone(),
                        color: *color,
                        text: String::new(),
                    }),
                );
                self.selected = Some(*id);
                debug!(note = %id, start = area.start_sec, end = area.end_sec, "area note added");
                true
            }
            Action::SelectNote { id } => {
                if !self.notes.contains_key(id) || self.selected == Some(*id) {
                    return false;
                }
                self.selected = Some(*id);
                true
            }
            Action::ChangeNoteColor { id, color } => match self.notes.get_mut(id) {
                Some(note) if accepts(true, *color) => {
                    note.set_color(*color);
                    true
                }
                _ => false,
            },
            Action::ChangeNoteText { id, text } => match self.notes.get_mut(id) {
                Some(note) => {
                    note.set_text(text.as_str());
                    true
                }
                None => false,
            },
            Action::RemoveNote { id } => {
                if self.notes.shift_remove(id).is_none() {
                    return false;
                }
                if self.selected == Some(*id) {
                    self.selected = None;
                }
                debug!(note = %id, "note removed");
                true
            }
            _ => false,
        }
    }
}

fn accepts(finite_time: bool, color: Color) -> bool {
    if !finite_time {
        warn!("note action dropped: time must be finite");
        return false;
    }
    match color.validate() {
        Ok(()) => true,
        Err(err) => {
            warn!(%err, "note action dropped");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FLAG_WIDTH_PX, NoteId, NoteStore};
    use crate::api::Action;
    use crate::core::{TimeScale, TimeSpan};
    use crate::overlay::Area;
    use crate::render::Color;

    fn scale() -> TimeScale {
        TimeScale::new(TimeSpan::new(0.0, 100.0), 100.0, 1000.0)
    }

    #[test]
    fn flag_hotspot_spans_flag_width() {
        let mut store = NoteStore::new();
        let id = NoteId::new_random();
        store.apply(&Action::AddNote {
            id,
            timestamp: 50.0,
            color: Color::rgb(1.0, 0.0, 0.0),
        });

        let flag_x = scale().time_to_px(50.0);
        assert_eq!(store.hit_test(flag_x, &scale()), Some(id));
        assert_eq!(store.hit_test(flag_x + FLAG_WIDTH_PX - 0.5, &scale()), Some(id));
        assert_eq!(store.hit_test(flag_x + FLAG_WIDTH_PX, &scale()), None);
        assert_eq!(store.hit_test(flag_x - 1.0, &scale()), None);
    }

    #[test]
    fn area_note_hotspots_are_its_boundaries() {
        let mut store = NoteStore::new();
        let id = NoteId::new_random();
        store.apply(&Action::AddAreaNote {
            id,
            area: Area::new(10.0, 40.0),
            color: Color::rgb(0.0, 1.0, 0.0),
        });

        let start_px = scale().time_to_px(10.0);
        let end_px = scale().time_to_px(40.0);
        assert_eq!(store.hit_test(start_px + 2.0, &scale()), Some(id));
        assert_eq!(store.hit_test(end_px - 2.0, &scale()), Some(id));
        assert_eq!(store.hit_test((start_px + end_px) / 2.0, &scale()), None);
    }

    #[test]
    fn removing_selected_note_clears_selection() {
        let mut store = NoteStore::new();
        let id = NoteId::new_random();
        store.apply(&Action::AddNote {
            id,
            timestamp: 1.0,
            color: Color::rgb(0.0, 0.0, 1.0),
        });
        assert_eq!(store.selected(), Some(id));
        assert!(store.apply(&Action::RemoveNote { id }));
        assert_eq!(store.selected(), None);
        assert!(!store.apply(&Action::RemoveNote { id }));
    }
}
