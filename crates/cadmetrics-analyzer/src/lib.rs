//! # CadMetrics Analyzer
//!
//! Geometry core for site and building area analysis of extracted drawings.
//! Includes hole resolution, role selection, box-select, the viewport
//! transform, area metrics and preview rendering.

pub mod analyzer_state;
pub mod bounds;
pub mod box_select;
pub mod commands;
pub mod composite;
pub mod containment;
pub mod extraction;
pub mod metrics;
pub mod model;
pub mod renderer;
pub mod selection_manager;
pub mod style;
pub mod viewport;

pub use analyzer_state::{status_line, AnalyzerOptions, AnalyzerState};
pub use bounds::BoundingBox;
pub use box_select::DragTracker;
pub use commands::{parse_script, AnalyzerCommand};
pub use composite::CompositeBoundary;
pub use containment::{area_order, is_hole_candidate, resolve, resolve_holes, ContainmentMap};
pub use extraction::{
    validate_polygons, ExtractionRequest, ExtractionResponse, ExtractionSource,
    FileExtractionSource, LayersResponse, LoadReport, WireBounds, WirePolygon,
};
#[cfg(feature = "http")]
pub use extraction::HttpExtractionClient;
pub use metrics::{
    check_compliance, compute_metrics, ComplianceLimits, ComplianceReport, Metrics, RatioStatus,
};
pub use model::{Point, Polygon, PolygonId};
pub use renderer::{render_preview, render_svg};
pub use selection_manager::{RoleRecord, SelectionMode, SelectionState, ToolState};
pub use style::{role_style, Rgb, RoleStyle};
pub use viewport::Viewport;
