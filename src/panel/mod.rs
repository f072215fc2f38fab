//! Panel compositing: the track contract, concrete track kinds, and the
//! container that stacks pinned and scrolling rows on one time scale.

pub mod checkerboard;
pub mod container;
pub mod data;
#[allow(clippy::module_inception)]
pub mod panel;
pub mod registry;
pub mod track;
pub mod track_group;
pub mod tracks;

pub use checkerboard::{checkerboard, checkerboard_except};
pub use container::{
    ContainerRenderStats, LayoutRow, PIN_BUTTON_WIDTH_PX, PanelContainer, PanelRegion, PanelSlot,
    RowKind, TrackLocator,
};
pub use data::{
    CounterSample, EmptyTrackData, InMemoryTrackData, SliceSample, TrackData, TrackDataSource,
    TrackPayload,
};
pub use panel::{Panel, PanelDragBehavior, PanelRenderContext};
pub use registry::{TrackFactory, TrackRegistry};
pub use track::{DEFAULT_TRACK_HEIGHT, LocalPoint, Track, TrackConfig, TrackId, TrackRenderContext};
pub use track_group::{TrackGroup, TrackGroupId};
pub use tracks::{COUNTER_TRACK_KIND, CounterTrack, SLICE_TRACK_KIND, SliceTrack};
