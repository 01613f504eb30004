//! Drawing unit conversion
//!
//! Maps the drawing header `$INSUNITS` code onto a length scale in meters and
//! converts raw (source unit²) areas into square meters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length unit a drawing was authored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingUnits {
    /// Inches (also used for unitless and unknown drawings)
    Inches,
    /// Millimeters
    Millimeters,
    /// Centimeters
    Centimeters,
    /// Meters
    Meters,
}

impl Default for DrawingUnits {
    fn default() -> Self {
        Self::Inches
    }
}

impl DrawingUnits {
    /// Resolves an `$INSUNITS` header code.
    ///
    /// Unitless (0), inches (1) and feet (2) drawings are all treated as inches,
    /// as is any code without a mapping.
    pub fn from_insunits(code: i32) -> Self {
        match code {
            4 => Self::Millimeters,
            5 => Self::Centimeters,
            6 => Self::Meters,
            0..=2 => Self::Inches,
            other => {
                tracing::debug!("Unmapped $INSUNITS code {}, assuming inches", other);
                Self::Inches
            }
        }
    }

    /// Length of one drawing unit in meters.
    pub fn meters_per_unit(&self) -> f64 {
        match self {
            Self::Inches => 0.0254,
            Self::Millimeters => 0.001,
            Self::Centimeters => 0.01,
            Self::Meters => 1.0,
        }
    }

    /// Unit whose length matches a service-reported scale, if any.
    pub fn from_scale(meters_per_unit: f64) -> Option<Self> {
        [Self::Inches, Self::Millimeters, Self::Centimeters, Self::Meters]
            .into_iter()
            .find(|u| (u.meters_per_unit() - meters_per_unit).abs() < 1e-12)
    }

    /// Converts a raw area in drawing units² to m².
    pub fn area_to_m2(&self, raw_area: f64) -> f64 {
        area_to_m2(raw_area, self.meters_per_unit())
    }
}

impl fmt::Display for DrawingUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inches => write!(f, "in"),
            Self::Millimeters => write!(f, "mm"),
            Self::Centimeters => write!(f, "cm"),
            Self::Meters => write!(f, "m"),
        }
    }
}

impl FromStr for DrawingUnits {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in" | "inch" | "inches" => Ok(Self::Inches),
            "mm" | "millimeter" | "millimeters" => Ok(Self::Millimeters),
            "cm" | "centimeter" | "centimeters" => Ok(Self::Centimeters),
            "m" | "meter" | "meters" => Ok(Self::Meters),
            _ => Err(format!("Unknown drawing units: {}", s)),
        }
    }
}

/// Converts a raw area using a length scale (meters per drawing unit).
pub fn area_to_m2(raw_area: f64, meters_per_unit: f64) -> f64 {
    raw_area * meters_per_unit * meters_per_unit
}

/// Format an area in m² for display
///
/// * `area_m2` - Area in square meters
pub fn format_area(area_m2: f64) -> String {
    format!("{:.2} m²", area_m2)
}
