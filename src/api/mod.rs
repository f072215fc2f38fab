mod actions;
mod config;
mod engine;
mod pan_and_zoom;
mod redraw;
mod snapshot;
mod viewport_context;

pub use actions::{Action, ActionDispatcher, ActionLog};
pub use config::{
    DEFAULT_GROUP_HEADER_HEIGHT_PX, DEFAULT_HORIZONTAL_WHEEL_PAN_SPEED, DEFAULT_SHELL_WIDTH_PX,
    DEFAULT_WHEEL_ZOOM_SPEED, TimelineConfig,
};
pub use engine::{FrameStats, TimelineEngine};
pub use pan_and_zoom::{DragMode, PanAndZoomHandler, PanAndZoomSettings, WheelOutcome};
pub use redraw::{RedrawLevel, RedrawRequest, RedrawScheduler, RedrawTopic, RedrawTopics};
pub use snapshot::{ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot, EngineSnapshotJsonContractV1};
pub use viewport_context::{ViewportContext, ViewportState};
