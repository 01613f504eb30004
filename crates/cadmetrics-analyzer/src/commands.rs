//! Interaction commands.
//!
//! Every change to a session goes through one of these, applied in order by
//! [`crate::AnalyzerState::apply`]. A script is a JSON array of commands:
//!
//! ```json
//! [
//!   { "command": "set_mode", "mode": "site" },
//!   { "command": "toggle", "id": 0 },
//!   { "command": "box_select", "rect": { "min_x": 0, "min_y": 0, "max_x": 50, "max_y": 50 } }
//! ]
//! ```

use serde::{Deserialize, Serialize};

use crate::bounds::BoundingBox;
use crate::model::PolygonId;
use crate::selection_manager::{SelectionMode, ToolState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AnalyzerCommand {
    /// Toggle the active role on one polygon.
    Toggle { id: PolygonId },
    /// Toggle the topmost polygon under a canvas pixel.
    ToggleAt { x: f64, y: f64 },
    /// Toggle every polygon touching a world-space rectangle.
    BoxSelect { rect: BoundingBox },
    SetToolState { tool: ToolState },
    SetMode { mode: SelectionMode },
    SetFloorCount { floors: u32 },
    SetFootprint { footprint: bool },
    /// Clear the whole selection.
    Reset,
    /// Pointer press starting a box-select drag, in pixels.
    BeginDrag { x: f64, y: f64 },
    UpdateDrag { x: f64, y: f64 },
    /// Pointer release; short drags are ignored.
    EndDrag,
    CancelDrag,
    /// Multiply the zoom by `factor`, keeping the pixel under the pointer fixed.
    ZoomAt { x: f64, y: f64, factor: f64 },
    ZoomIn,
    ZoomOut,
    PanByPixels { dx: f64, dy: f64 },
    FitToView,
}

impl AnalyzerCommand {
    /// Whether applying the command may change the selection.
    pub fn mutates_selection(&self) -> bool {
        matches!(
            self,
            Self::Toggle { .. }
                | Self::ToggleAt { .. }
                | Self::BoxSelect { .. }
                | Self::Reset
                | Self::EndDrag
        )
    }
}

/// Parses a JSON command script.
pub fn parse_script(json: &str) -> Result<Vec<AnalyzerCommand>, serde_json::Error> {
    serde_json::from_str(json)
}
