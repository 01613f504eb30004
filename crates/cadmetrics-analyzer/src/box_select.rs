//! Box-select drag tracking.
//!
//! Drags are tracked in pixel space. On release the two corners are mapped
//! through the viewport into world space, where hit-testing happens.

use crate::bounds::BoundingBox;
use crate::viewport::Viewport;

/// Tracks one box-select drag between press and release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragTracker {
    /// Pixel position where the drag started
    pub start: (f64, f64),
    /// Latest pixel position
    pub current: (f64, f64),
}

impl DragTracker {
    pub fn new(start: (f64, f64)) -> Self {
        Self {
            start,
            current: start,
        }
    }

    pub fn update(&mut self, current: (f64, f64)) {
        self.current = current;
    }

    /// Selection rectangle in pixels as (min_x, min_y, max_x, max_y).
    pub fn pixel_bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.start.0.min(self.current.0),
            self.start.1.min(self.current.1),
            self.start.0.max(self.current.0),
            self.start.1.max(self.current.1),
        )
    }

    /// Straight-line length of the drag in pixels.
    pub fn distance(&self) -> f64 {
        let dx = self.current.0 - self.start.0;
        let dy = self.current.1 - self.start.1;
        (dx * dx + dy * dy).sqrt()
    }

    /// Drags shorter than `threshold_px` are not box selections.
    pub fn is_below_threshold(&self, threshold_px: f64) -> bool {
        self.distance() < threshold_px
    }

    /// World-space rectangle covered by the drag.
    ///
    /// Both corners go through the viewport's inverse mapping, which undoes
    /// the vertical flip, so the result is a proper Y-up box.
    pub fn world_rect(&self, viewport: &Viewport) -> BoundingBox {
        let a = viewport.pixel_to_world(self.start.0, self.start.1);
        let b = viewport.pixel_to_world(self.current.0, self.current.1);
        BoundingBox::from_corners(a, b)
    }
}
