//! Error handling for CadMetrics
//!
//! Provides error types for every layer of the analyzer:
//! - Geometry errors (degenerate or malformed polygons)
//! - Extraction errors (the external drawing-processing service)
//! - Selection errors (role toggling and tool parameters)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised while validating polygons received from the extraction service.
/// These are reported per polygon; a single bad ring never rejects a
/// whole response.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Ring has fewer than three distinct points
    #[error("Polygon {id} is degenerate: {points} distinct point(s), at least 3 required")]
    DegenerateRing {
        /// The polygon identifier.
        id: u64,
        /// The number of distinct points found.
        points: usize,
    },

    /// A coordinate is NaN or infinite
    #[error("Polygon {id} has a non-finite coordinate at index {index}")]
    NonFiniteCoordinate {
        /// The polygon identifier.
        id: u64,
        /// Index of the offending point in the ring.
        index: usize,
    },

    /// Area is NaN, infinite or negative
    #[error("Polygon {id} has an invalid area: {area}")]
    InvalidArea {
        /// The polygon identifier.
        id: u64,
        /// The rejected area value.
        area: f64,
    },

    /// Converted area is at or below the configured minimum
    #[error("Polygon {id} area {area_m2} m² is below the minimum of {min_area_m2} m²")]
    BelowMinimumArea {
        /// The polygon identifier.
        id: u64,
        /// The converted area.
        area_m2: f64,
        /// The configured minimum.
        min_area_m2: f64,
    },

    /// The same identifier appears more than once in one response
    #[error("Duplicate polygon id {id}")]
    DuplicateId {
        /// The repeated identifier.
        id: u64,
    },
}

impl GeometryError {
    /// Identifier of the polygon the error refers to.
    pub fn polygon_id(&self) -> u64 {
        match self {
            Self::DegenerateRing { id, .. }
            | Self::NonFiniteCoordinate { id, .. }
            | Self::InvalidArea { id, .. }
            | Self::BelowMinimumArea { id, .. }
            | Self::DuplicateId { id } => *id,
        }
    }
}

/// Extraction error type
///
/// Represents failures talking to, or interpreting the answer of, the
/// drawing-processing service.
#[derive(Error, Debug, Clone)]
pub enum ExtractionError {
    /// Only DXF and DWG drawings are accepted
    #[error("Unsupported drawing file '{file}': must be a DXF or DWG file")]
    UnsupportedFile {
        /// The rejected file name.
        file: String,
    },

    /// The service could not be reached
    #[error("Extraction service unreachable: {reason}")]
    Transport {
        /// The transport failure description.
        reason: String,
    },

    /// The service answered with an error status
    #[error("Extraction service returned {status}: {detail}")]
    Service {
        /// HTTP-like status code.
        status: u16,
        /// Service-provided detail message.
        detail: String,
    },

    /// The response body could not be decoded
    #[error("Malformed extraction response: {reason}")]
    MalformedResponse {
        /// The decoding failure description.
        reason: String,
    },
}

impl From<serde_json::Error> for ExtractionError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse {
            reason: err.to_string(),
        }
    }
}

/// Selection error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The identifier does not belong to the current session
    #[error("Unknown polygon id {id}")]
    UnknownPolygon {
        /// The rejected identifier.
        id: u64,
    },

    /// Floor count must be at least one
    #[error("Floor count must be >= 1")]
    ZeroFloorCount,

    /// Role name could not be parsed
    #[error("Unknown selection mode: {mode}")]
    UnknownMode {
        /// The rejected mode name.
        mode: String,
    },
}

/// Main error type for CadMetrics
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Extraction error
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// Selection error
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an extraction-service error
    pub fn is_extraction_error(&self) -> bool {
        matches!(self, Error::Extraction(_))
    }

    /// Check if this is a selection error
    pub fn is_selection_error(&self) -> bool {
        matches!(self, Error::Selection(_))
    }
}

/// Result type alias for CadMetrics operations
pub type Result<T> = std::result::Result<T, Error>;
