//! Configuration for the CadMetrics analyzer
//!
//! Supports JSON and TOML file formats; the default file lives in the
//! platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Viewport (zoom range, canvas size, fit padding)
//! - Selection (drag threshold, initial tool parameters)
//! - Extraction (minimum polygon area, service endpoint)
//! - Render (stroke width, preview size)
//! - Compliance (optional BCR / FAR ceilings)

use std::path::{Path, PathBuf};
use std::time::Duration;

use cadmetrics_analyzer::{AnalyzerOptions, ComplianceLimits, SelectionMode, ToolState};
use cadmetrics_core::constants::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DRAG_THRESHOLD_PX, MAX_ZOOM, MIN_AREA_M2,
    MIN_ZOOM, STROKE_FRACTION, VIEW_PADDING, ZOOM_STEP,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Viewport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Multiplier per zoom step
    pub zoom_step: f64,
    /// Canvas width in pixels
    pub canvas_width: u32,
    /// Canvas height in pixels
    pub canvas_height: u32,
    /// Fraction of the canvas kept free on each edge when fitting (0.0 - 0.5)
    pub fit_padding: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            canvas_width: DEFAULT_CANVAS_WIDTH as u32,
            canvas_height: DEFAULT_CANVAS_HEIGHT as u32,
            fit_padding: VIEW_PADDING,
        }
    }
}

/// Selection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionSettings {
    /// Drags shorter than this many pixels do not box-select
    pub drag_threshold_px: f64,
    pub default_floor_count: u32,
    pub default_footprint: bool,
    pub default_mode: SelectionMode,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            drag_threshold_px: DRAG_THRESHOLD_PX,
            default_floor_count: 1,
            default_footprint: true,
            default_mode: SelectionMode::Building,
        }
    }
}

/// Extraction service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    /// Polygons at or below this area in m² are excluded
    pub min_area_m2: f64,
    pub service_url: String,
    pub timeout_ms: u64,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            min_area_m2: MIN_AREA_M2,
            service_url: "http://localhost:7001".to_string(),
            timeout_ms: 30_000,
        }
    }
}

/// Preview rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Outline width as a fraction of the larger scene extent
    pub stroke_fraction: f64,
    pub preview_width: u32,
    pub preview_height: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            stroke_fraction: STROKE_FRACTION,
            preview_width: DEFAULT_CANVAS_WIDTH as u32,
            preview_height: DEFAULT_CANVAS_HEIGHT as u32,
        }
    }
}

/// Optional regulatory ceilings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceSettings {
    /// Maximum BCR in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bcr: Option<f64>,
    /// Maximum FAR as a plain ratio
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_far: Option<f64>,
}

impl ComplianceSettings {
    pub fn limits(&self) -> ComplianceLimits {
        ComplianceLimits {
            max_bcr: self.max_bcr,
            max_far: self.max_far,
        }
    }
}

/// Complete analyzer configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub viewport: ViewportSettings,
    pub selection: SelectionSettings,
    pub extraction: ExtractionSettings,
    pub render: RenderSettings,
    pub compliance: ComplianceSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> ConfigResult<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
        Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl AnalyzerConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config_dir>/cadmetrics/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("cadmetrics").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::LoadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads `path` if given, else the default file if it exists, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Ok(default) if default.exists() => Self::load_from_file(&default),
            _ => Ok(Self::default()),
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| SettingsError::SaveError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let v = &self.viewport;
        if !(v.min_zoom > 0.0 && v.min_zoom.is_finite()) {
            return Err(ConfigError::out_of_range("viewport.min_zoom", v.min_zoom));
        }
        if !(v.max_zoom >= v.min_zoom && v.max_zoom.is_finite()) {
            return Err(ConfigError::out_of_range("viewport.max_zoom", v.max_zoom));
        }
        if !(v.zoom_step > 1.0 && v.zoom_step.is_finite()) {
            return Err(ConfigError::out_of_range("viewport.zoom_step", v.zoom_step));
        }
        if v.canvas_width == 0 || v.canvas_height == 0 {
            return Err(ConfigError::out_of_range(
                "viewport.canvas_size",
                format!("{}x{}", v.canvas_width, v.canvas_height),
            ));
        }
        if !(0.0..0.5).contains(&v.fit_padding) {
            return Err(ConfigError::out_of_range("viewport.fit_padding", v.fit_padding));
        }

        let s = &self.selection;
        if !(s.drag_threshold_px >= 0.0 && s.drag_threshold_px.is_finite()) {
            return Err(ConfigError::out_of_range(
                "selection.drag_threshold_px",
                s.drag_threshold_px,
            ));
        }
        if s.default_floor_count == 0 {
            return Err(ConfigError::out_of_range("selection.default_floor_count", 0));
        }

        let e = &self.extraction;
        if !(e.min_area_m2 >= 0.0 && e.min_area_m2.is_finite()) {
            return Err(ConfigError::out_of_range("extraction.min_area_m2", e.min_area_m2));
        }
        if e.timeout_ms == 0 {
            return Err(ConfigError::out_of_range("extraction.timeout_ms", 0));
        }

        let r = &self.render;
        if !(r.stroke_fraction > 0.0 && r.stroke_fraction.is_finite()) {
            return Err(ConfigError::out_of_range(
                "render.stroke_fraction",
                r.stroke_fraction,
            ));
        }
        if r.preview_width == 0 || r.preview_height == 0 {
            return Err(ConfigError::out_of_range(
                "render.preview_size",
                format!("{}x{}", r.preview_width, r.preview_height),
            ));
        }

        for (key, limit) in [
            ("compliance.max_bcr", self.compliance.max_bcr),
            ("compliance.max_far", self.compliance.max_far),
        ] {
            if let Some(value) = limit {
                if !(value >= 0.0 && value.is_finite()) {
                    return Err(ConfigError::out_of_range(key, value));
                }
            }
        }

        Ok(())
    }

    /// Initial tool parameters.
    pub fn tool_state(&self) -> ConfigResult<ToolState> {
        ToolState::new(
            self.selection.default_mode,
            self.selection.default_floor_count,
            self.selection.default_footprint,
        )
        .map_err(|_| ConfigError::out_of_range("selection.default_floor_count", 0))
    }

    /// Session tunables for [`cadmetrics_analyzer::AnalyzerState`].
    pub fn analyzer_options(&self) -> ConfigResult<AnalyzerOptions> {
        Ok(AnalyzerOptions {
            canvas_width: f64::from(self.viewport.canvas_width),
            canvas_height: f64::from(self.viewport.canvas_height),
            min_zoom: self.viewport.min_zoom,
            max_zoom: self.viewport.max_zoom,
            zoom_step: self.viewport.zoom_step,
            fit_padding: self.viewport.fit_padding,
            drag_threshold_px: self.selection.drag_threshold_px,
            min_area_m2: self.extraction.min_area_m2,
            initial_tool: self.tool_state()?,
        })
    }

    pub fn service_timeout(&self) -> Duration {
        Duration::from_millis(self.extraction.timeout_ms)
    }
}
