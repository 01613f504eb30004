//! Shared constants for the analyzer and its settings.

/// Smallest zoom factor the viewport accepts.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest zoom factor the viewport accepts.
pub const MAX_ZOOM: f64 = 200.0;

/// Multiplicative step for zoom in/out.
pub const ZOOM_STEP: f64 = 1.2;

/// Fraction of the canvas reserved as padding on each edge when fitting.
pub const VIEW_PADDING: f64 = 0.05;

/// Drags shorter than this (in pixels) are not box selections.
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

/// Polygons at or below this converted area are discarded as noise.
pub const MIN_AREA_M2: f64 = 0.001;

/// Scene bounds reported for a drawing with no polygons.
pub const EMPTY_SCENE_BOUNDS: (f64, f64, f64, f64) = (0.0, 0.0, 100.0, 100.0);

/// Stroke width as a fraction of the larger scene extent.
pub const STROKE_FRACTION: f64 = 0.002;

/// Default canvas size in pixels.
pub const DEFAULT_CANVAS_WIDTH: f64 = 1200.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 800.0;

/// BCR above this percentage is flagged as implausible for a single lot.
pub const BCR_PLAUSIBLE_MAX: f64 = 80.0;

/// BCR below this percentage usually means the wrong layers were selected.
pub const BCR_PLAUSIBLE_MIN: f64 = 5.0;
