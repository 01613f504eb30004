//! Boundary with the drawing-processing service.
//!
//! The service turns a DXF/DWG drawing into closed rings; this module holds
//! the wire shapes it answers with, the validation that turns them into
//! [`Polygon`]s, and the [`ExtractionSource`] seam the analyzer loads through.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use cadmetrics_core::constants::{EMPTY_SCENE_BOUNDS, MIN_AREA_M2};
use cadmetrics_core::{area_to_m2, DrawingUnits, ExtractionError, GeometryError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::bounds::BoundingBox;
use crate::model::{distinct_point_count, ring_area, Point, Polygon, PolygonId};

#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::HttpExtractionClient;

/// Scene extents as sent by the service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl From<WireBounds> for BoundingBox {
    fn from(b: WireBounds) -> Self {
        BoundingBox::new(b.min_x, b.min_y, b.max_x, b.max_y)
    }
}

impl Default for WireBounds {
    fn default() -> Self {
        let (min_x, min_y, max_x, max_y) = EMPTY_SCENE_BOUNDS;
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

/// One ring as sent by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WirePolygon {
    pub id: PolygonId,
    pub points: Vec<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_raw: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_m2: Option<f64>,
}

/// Answer of `POST /cad/process`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResponse {
    #[serde(default)]
    pub polygons: Vec<WirePolygon>,
    /// Meters per drawing unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<WireBounds>,
}

impl ExtractionResponse {
    pub fn from_json(json: &str) -> Result<Self, ExtractionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Drawing unit matching `scale`, when it is one of the known units.
    pub fn units(&self) -> Option<DrawingUnits> {
        self.scale.and_then(DrawingUnits::from_scale)
    }

    /// Scene bounds, or the fallback square for an empty drawing.
    pub fn scene_bounds(&self) -> BoundingBox {
        self.bounds.unwrap_or_default().into()
    }
}

/// Answer of `POST /cad/layers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayersResponse {
    #[serde(default)]
    pub layers: Vec<String>,
}

/// A drawing file and the layer subset to extract from it.
///
/// An empty layer list means every layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    file: PathBuf,
    layers: Vec<String>,
}

impl ExtractionRequest {
    /// Accepts `.dxf` and `.dwg` files only (case-insensitive).
    pub fn new(file: impl Into<PathBuf>, layers: Vec<String>) -> Result<Self, ExtractionError> {
        let file = file.into();
        let supported = file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("dxf") || e.eq_ignore_ascii_case("dwg"))
            .unwrap_or(false);
        if !supported {
            return Err(ExtractionError::UnsupportedFile {
                file: file.display().to_string(),
            });
        }
        Ok(Self { file, layers })
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn layers(&self) -> &[String] {
        &self.layers
    }

    /// Layer list encoded the way the service expects its `layers` form field.
    pub fn layers_json(&self) -> String {
        serde_json::to_string(&self.layers).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Outcome of validating one response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Polygons that passed validation.
    pub accepted: usize,
    /// One diagnostic per excluded polygon, in response order.
    pub excluded: Vec<GeometryError>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.excluded.is_empty()
    }
}

fn validate_one(
    wire: &WirePolygon,
    scale: Option<f64>,
    min_area_m2: f64,
) -> Result<Polygon, GeometryError> {
    let id = wire.id;
    let points: Vec<Point> = wire.points.iter().copied().map(Point::from).collect();

    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(GeometryError::NonFiniteCoordinate { id, index });
    }

    let distinct = distinct_point_count(&points);
    if distinct < 3 {
        return Err(GeometryError::DegenerateRing {
            id,
            points: distinct,
        });
    }

    let area = wire.area_raw.unwrap_or_else(|| ring_area(&points));
    if !area.is_finite() || area < 0.0 {
        return Err(GeometryError::InvalidArea { id, area });
    }

    let area_m2 = match (wire.area_m2, scale) {
        (Some(m2), _) => m2,
        (None, Some(scale)) => area_to_m2(area, scale),
        (None, None) => area,
    };
    if !area_m2.is_finite() || area_m2 < 0.0 {
        return Err(GeometryError::InvalidArea { id, area: area_m2 });
    }
    if area_m2 <= min_area_m2 {
        return Err(GeometryError::BelowMinimumArea {
            id,
            area_m2,
            min_area_m2,
        });
    }

    Ok(Polygon::new(id, points, area, area_m2))
}

/// Validates every wire polygon, excluding the bad ones with a diagnostic.
///
/// `area_m2` is back-filled from `scale` when the service omitted it, and the
/// raw area from the ring itself when `area_raw` is missing.
pub fn validate_polygons(
    response: &ExtractionResponse,
    min_area_m2: f64,
) -> (Vec<Polygon>, LoadReport) {
    let mut report = LoadReport::default();
    let mut seen: HashSet<PolygonId> = HashSet::with_capacity(response.polygons.len());
    let mut polygons = Vec::with_capacity(response.polygons.len());

    for wire in &response.polygons {
        let result = if seen.insert(wire.id) {
            validate_one(wire, response.scale, min_area_m2)
        } else {
            Err(GeometryError::DuplicateId { id: wire.id })
        };

        match result {
            Ok(polygon) => polygons.push(polygon),
            Err(err) => {
                warn!("Excluding polygon: {}", err);
                report.excluded.push(err);
            }
        }
    }

    report.accepted = polygons.len();
    debug!(
        "Validated {} polygon(s), excluded {}",
        report.accepted,
        report.excluded.len()
    );
    (polygons, report)
}

/// Validation with the default minimum area.
pub fn validate_polygons_default(response: &ExtractionResponse) -> (Vec<Polygon>, LoadReport) {
    validate_polygons(response, MIN_AREA_M2)
}

/// Anything that can produce extraction responses for a drawing.
pub trait ExtractionSource {
    /// Layers available in the drawing.
    fn layers(&self, request: &ExtractionRequest) -> Result<Vec<String>, ExtractionError>;

    /// Closed rings extracted from the requested layers.
    fn process(&self, request: &ExtractionRequest) -> Result<ExtractionResponse, ExtractionError>;
}

/// Serves a previously saved response body from disk.
///
/// The drawing in the request is ignored; the saved rings are returned as-is.
#[derive(Debug, Clone)]
pub struct FileExtractionSource {
    path: PathBuf,
}

impl FileExtractionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<String, ExtractionError> {
        fs::read_to_string(&self.path).map_err(|e| ExtractionError::Transport {
            reason: format!("{}: {}", self.path.display(), e),
        })
    }

    /// The saved `/cad/process` body.
    pub fn response(&self) -> Result<ExtractionResponse, ExtractionError> {
        ExtractionResponse::from_json(&self.read()?)
    }
}

impl ExtractionSource for FileExtractionSource {
    fn layers(&self, _request: &ExtractionRequest) -> Result<Vec<String>, ExtractionError> {
        let body = self.read()?;
        let layers: LayersResponse = serde_json::from_str(&body)?;
        Ok(layers.layers)
    }

    fn process(&self, _request: &ExtractionRequest) -> Result<ExtractionResponse, ExtractionError> {
        self.response()
    }
}
