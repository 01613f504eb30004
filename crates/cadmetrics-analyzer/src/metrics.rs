//! Area metrics derived from a selection.
//!
//! [`compute_metrics`] is a pure function of the polygons and the selection
//! map. FAR is reported as a plain ratio, BCR as a percentage.

use std::fmt;

use cadmetrics_core::constants::{BCR_PLAUSIBLE_MAX, BCR_PLAUSIBLE_MIN};
use serde::{Deserialize, Serialize};

use crate::model::Polygon;
use crate::selection_manager::SelectionState;

/// Snapshot of the five compliance numbers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Sum of m² over site polygons
    pub site_area: f64,
    /// Sum of m² over building footprint polygons
    pub footprint_area: f64,
    /// Sum of m² × floors over every building polygon
    pub total_floor_area: f64,
    /// Building Coverage Ratio, percent
    pub bcr: f64,
    /// Floor Area Ratio, plain ratio
    pub far: f64,
}

/// Derives the metrics for `selection` over `polygons`.
///
/// Sums run in polygon order so equal inputs give bit-identical output.
/// Records whose id is not among `polygons` contribute nothing. Both ratios
/// are 0 when the site area is 0.
pub fn compute_metrics(polygons: &[Polygon], selection: &SelectionState) -> Metrics {
    let mut site_area = 0.0;
    let mut footprint_area = 0.0;
    let mut total_floor_area = 0.0;

    for polygon in polygons {
        let Some(record) = selection.get(polygon.id()) else {
            continue;
        };
        let area = polygon.area_m2();
        if record.is_site {
            site_area += area;
        }
        if record.is_building {
            if record.is_footprint {
                footprint_area += area;
            }
            total_floor_area += area * f64::from(record.floors.get());
        }
    }

    let (bcr, far) = if site_area > 0.0 {
        (
            footprint_area / site_area * 100.0,
            total_floor_area / site_area,
        )
    } else {
        (0.0, 0.0)
    };

    Metrics {
        site_area,
        footprint_area,
        total_floor_area,
        bcr,
        far,
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Site: {:.1}m² | Footprint: {:.1}m² | Total Floor: {:.1}m² | BCR: {:.2}% | FAR: {:.2}",
            self.site_area, self.footprint_area, self.total_floor_area, self.bcr, self.far
        )
    }
}

/// Optional regulatory ceilings for the two ratios.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComplianceLimits {
    /// Maximum BCR in percent
    #[serde(default)]
    pub max_bcr: Option<f64>,
    /// Maximum FAR as a ratio
    #[serde(default)]
    pub max_far: Option<f64>,
}

/// Outcome of checking one ratio against its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioStatus {
    /// No limit configured
    Unchecked,
    Within,
    Exceeds,
}

/// Result of [`check_compliance`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub bcr: RatioStatus,
    pub far: RatioStatus,
    /// Plausibility notes (e.g. suspiciously high coverage)
    pub notes: Vec<String>,
}

impl ComplianceReport {
    pub fn is_compliant(&self) -> bool {
        self.bcr != RatioStatus::Exceeds && self.far != RatioStatus::Exceeds
    }
}

fn ratio_status(value: f64, limit: Option<f64>) -> RatioStatus {
    match limit {
        None => RatioStatus::Unchecked,
        Some(max) if value <= max => RatioStatus::Within,
        Some(_) => RatioStatus::Exceeds,
    }
}

/// Checks BCR and FAR against `limits` and adds plausibility notes.
pub fn check_compliance(metrics: &Metrics, limits: &ComplianceLimits) -> ComplianceReport {
    let mut notes = Vec::new();

    if metrics.site_area <= 0.0 {
        notes.push("No site area selected".to_string());
    } else if metrics.bcr > BCR_PLAUSIBLE_MAX {
        notes.push(format!(
            "BCR {:.2}% is above {:.0}%; verify the site and footprint selection",
            metrics.bcr, BCR_PLAUSIBLE_MAX
        ));
    } else if metrics.bcr < BCR_PLAUSIBLE_MIN {
        notes.push(format!(
            "BCR {:.2}% is below {:.0}%; verify the layer selection",
            metrics.bcr, BCR_PLAUSIBLE_MIN
        ));
    }

    ComplianceReport {
        bcr: ratio_status(metrics.bcr, limits.max_bcr),
        far: ratio_status(metrics.far, limits.max_far),
        notes,
    }
}
