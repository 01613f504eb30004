//! # CadMetrics Core
//!
//! Core types and utilities shared by the CadMetrics crates:
//! the layered error model, drawing unit conversion and constants.

pub mod constants;
pub mod error;
pub mod units;

pub use error::{Error, ExtractionError, GeometryError, Result, SelectionError};
pub use units::{area_to_m2, format_area, DrawingUnits};
