//! # CadMetrics
//!
//! Site and building area analysis for drawings extracted by the
//! drawing-processing service:
//! - Hole resolution among closed rings, rendered with even-odd fill
//! - Site / footprint / upper-floor role selection with box-select
//! - Site area, footprint area, total floor area, BCR and FAR
//! - SVG and PNG previews of the selection
//!
//! ## Architecture
//!
//! 1. **cadmetrics-core** - Error types, drawing units, shared constants
//! 2. **cadmetrics-analyzer** - Geometry core, selection, metrics, viewport, rendering
//! 3. **cadmetrics-settings** - Analyzer configuration and persistence
//! 4. **cadmetrics** - CLI that loads a drawing, replays commands and reports

pub mod cli;
pub mod commands;

pub use cadmetrics_analyzer as analyzer;
pub use cadmetrics_settings as settings;

pub use cadmetrics_analyzer::{
    AnalyzerCommand, AnalyzerOptions, AnalyzerState, BoundingBox, ComplianceReport,
    ExtractionRequest, ExtractionResponse, Metrics, Polygon, SelectionMode, ToolState,
};
pub use cadmetrics_core::{Error, Result};
pub use cadmetrics_settings::AnalyzerConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting on stderr
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    init_logging_with_level(tracing::Level::INFO)
}

/// Initialize logging with `level` as the default directive.
pub fn init_logging_with_level(level: tracing::Level) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
