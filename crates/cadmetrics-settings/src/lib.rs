//! CadMetrics Settings Crate
//!
//! Handles analyzer configuration and its persistence.

pub mod config;
pub mod error;

pub use config::{
    AnalyzerConfig, ComplianceSettings, ExtractionSettings, RenderSettings, SelectionSettings,
    ViewportSettings,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
