use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};
use crate::interaction::CursorStyle;
use crate::overlay::{Note, NoteId};
use crate::panel::LayoutRow;
use crate::render::Renderer;

use super::{DragMode, FrameStats, RedrawRequest, TimelineEngine, ViewportState};

pub const ENGINE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Deterministic dump of engine state for regression tests and host
/// debugging tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub viewport: ViewportState,
    pub pending_redraw: RedrawRequest,
    pub notes: Vec<Note>,
    pub selected_note: Option<NoteId>,
    pub layout: Vec<LayoutRow>,
    pub scroll_offset: f64,
    pub total_scroll_height: f64,
    pub drag_mode: DragMode,
    pub cursor: CursorStyle,
    pub last_frame: Option<FrameStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: EngineSnapshot,
}

impl<R: Renderer> TimelineEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        let container = self.container();
        EngineSnapshot {
            viewport: self.viewport().state(),
            pending_redraw: self.viewport().redraw().pending(),
            notes: self.notes().iter().cloned().collect(),
            selected_note: self.notes().selected(),
            layout: container.layout(),
            scroll_offset: container.scroll_offset(),
            total_scroll_height: container.total_scroll_height(),
            drag_mode: self.drag_mode(),
            cursor: self.cursor(),
            last_frame: self.last_frame(),
        }
    }
}

impl EngineSnapshot {
    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize snapshot json: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> TimelineResult<String> {
        let payload = EngineSnapshotJsonContractV1 {
            schema_version: ENGINE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts both a bare snapshot and a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> TimelineResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<EngineSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: EngineSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != ENGINE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(TimelineError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
