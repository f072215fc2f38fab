//! Selection, hover and note overlays plus the non-track panels that
//! share the timeline scale.

pub mod area;
pub mod notes;
pub mod notes_panel;
pub mod overview_panel;
pub mod time_axis_panel;
pub mod timeline_overlay;
pub mod vertical_line;

pub use area::Area;
pub use notes::{
    AREA_TRIANGLE_WIDTH_PX, AreaNote, DefaultNote, FLAG_WIDTH_PX, Note, NoteId, NoteStore,
    random_note_color,
};
pub use notes_panel::{NOTES_PANEL_HEIGHT, NotesPanel};
pub use overview_panel::{OVERVIEW_PANEL_HEIGHT, OverviewPanel};
pub use time_axis_panel::{TIME_AXIS_HEIGHT, TimeAxisPanel};
pub use timeline_overlay::{HOVER_LINE_COLOR, SELECTION_COLOR, draw_timeline_overlay};
pub use vertical_line::{
    DEFAULT_VERTICAL_LINE_WIDTH, OUTSIDE_SELECTION_DIM, draw_vertical_line_at_time,
    draw_vertical_selection,
};
