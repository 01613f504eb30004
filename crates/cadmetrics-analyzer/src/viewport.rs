//! Viewport and coordinate transformation for drawing display.
//!
//! Handles conversion between pixel coordinates (screen space, Y down) and
//! world coordinates (drawing space, Y up). Zoom and pan act on a view window
//! derived from the scene bounds:
//!
//! ```text
//! window = (scene_center + pan) ± (scene_extent / 2) / zoom
//! ```
//!
//! The window is fitted into the canvas preserving aspect ratio and centered.
//! The single vertical flip lives in `world_to_pixel` / `pixel_to_world`;
//! every pointer position used for hit-testing goes through `pixel_to_world`.

use std::fmt;

use cadmetrics_core::constants::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, EMPTY_SCENE_BOUNDS, MAX_ZOOM, MIN_ZOOM,
    VIEW_PADDING, ZOOM_STEP,
};

use crate::bounds::BoundingBox;
use crate::model::Point;

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    scene: BoundingBox,
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
    min_zoom: f64,
    max_zoom: f64,
    zoom_step: f64,
}

impl Viewport {
    /// Creates a viewport for a canvas of the given pixel size, showing the
    /// default empty scene.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        let (min_x, min_y, max_x, max_y) = EMPTY_SCENE_BOUNDS;
        Self {
            scene: BoundingBox::new(min_x, min_y, max_x, max_y),
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
        }
    }

    /// Overrides the zoom range and step.
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64, zoom_step: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom_step = zoom_step;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
        self
    }

    /// Gets the canvas width.
    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    /// Gets the canvas height.
    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions (typically called when window resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    pub fn scene(&self) -> &BoundingBox {
        &self.scene
    }

    /// Installs new scene bounds and resets zoom and pan.
    ///
    /// Invalid bounds fall back to the empty-scene default.
    pub fn set_scene(&mut self, scene: BoundingBox) {
        self.scene = if scene.is_valid() {
            scene
        } else {
            let (min_x, min_y, max_x, max_y) = EMPTY_SCENE_BOUNDS;
            BoundingBox::new(min_x, min_y, max_x, max_y)
        };
        self.reset();
    }

    /// Gets the current zoom level (1.0 = whole scene).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamped to the configured range.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        }
    }

    /// Zooms in by one step.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * self.zoom_step);
    }

    /// Zooms out by one step.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / self.zoom_step);
    }

    /// Gets the pan offset (X, world units).
    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    /// Gets the pan offset (Y, world units).
    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    /// Sets the pan offset in world units.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Pans by a world-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Pans so the content follows a pointer drag of `(dx, dy)` pixels.
    ///
    /// Dragging right moves the window left; dragging down (screen +Y)
    /// moves the window up in world space.
    pub fn pan_by_pixels(&mut self, dx: f64, dy: f64) {
        let scale = self.scale();
        self.pan_x -= dx / scale;
        self.pan_y += dy / scale;
    }

    /// Resets to the whole scene (zoom 1, no pan).
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }

    /// World-space rectangle currently visible.
    pub fn view_window(&self) -> BoundingBox {
        let center = self.window_center();
        let half_w = self.scene.width() / 2.0 / self.zoom;
        let half_h = self.scene.height() / 2.0 / self.zoom;
        BoundingBox::new(
            center.x - half_w,
            center.y - half_h,
            center.x + half_w,
            center.y + half_h,
        )
    }

    fn window_center(&self) -> Point {
        let c = self.scene.center();
        Point::new(c.x + self.pan_x, c.y + self.pan_y)
    }

    /// Pixels per world unit.
    pub fn scale(&self) -> f64 {
        let width = self.scene.width().max(f64::EPSILON);
        let height = self.scene.height().max(f64::EPSILON);
        (self.canvas_width / width).min(self.canvas_height / height) * self.zoom
    }

    /// Converts pixel coordinates to world coordinates.
    ///
    /// Formula:
    /// ```text
    /// world_x = center_x + (pixel_x - canvas_width / 2) / scale
    /// world_y = center_y - (pixel_y - canvas_height / 2) / scale  // Flip Y-axis
    /// ```
    pub fn pixel_to_world(&self, pixel_x: f64, pixel_y: f64) -> Point {
        let c = self.window_center();
        let scale = self.scale();
        Point::new(
            c.x + (pixel_x - self.canvas_width / 2.0) / scale,
            c.y - (pixel_y - self.canvas_height / 2.0) / scale,
        )
    }

    /// Converts world coordinates to pixel coordinates.
    ///
    /// Formula:
    /// ```text
    /// pixel_x = canvas_width / 2 + (world_x - center_x) * scale
    /// pixel_y = canvas_height / 2 - (world_y - center_y) * scale  // Flip Y-axis
    /// ```
    pub fn world_to_pixel(&self, world_x: f64, world_y: f64) -> (f64, f64) {
        let c = self.window_center();
        let scale = self.scale();
        (
            self.canvas_width / 2.0 + (world_x - c.x) * scale,
            self.canvas_height / 2.0 - (world_y - c.y) * scale,
        )
    }

    /// Converts world coordinates to pixel coordinates (using Point).
    pub fn world_point_to_pixel(&self, point: &Point) -> (f64, f64) {
        self.world_to_pixel(point.x, point.y)
    }

    /// Zooms while keeping the world point under `(pixel_x, pixel_y)` fixed.
    ///
    /// Useful for "zoom to cursor" on mouse wheel events.
    pub fn zoom_at_pixel(&mut self, pixel_x: f64, pixel_y: f64, new_zoom: f64) {
        let anchor = self.pixel_to_world(pixel_x, pixel_y);
        self.set_zoom(new_zoom);

        let scale = self.scale();
        let scene_center = self.scene.center();
        let center_x = anchor.x - (pixel_x - self.canvas_width / 2.0) / scale;
        let center_y = anchor.y + (pixel_y - self.canvas_height / 2.0) / scale;
        self.pan_x = center_x - scene_center.x;
        self.pan_y = center_y - scene_center.y;
    }

    /// Centers the viewport on a world coordinate.
    pub fn center_on(&mut self, world_x: f64, world_y: f64) {
        let c = self.scene.center();
        self.pan_x = world_x - c.x;
        self.pan_y = world_y - c.y;
    }

    /// Fits the given box into the canvas with `padding` (0.0 - 0.5) of the
    /// canvas reserved on each edge.
    pub fn fit_to_bounds(&mut self, bounds: &BoundingBox, padding: f64) {
        if !bounds.is_valid() || bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return;
        }

        let padding_factor = 1.0 - (padding * 2.0);
        let target_scale = (self.canvas_width * padding_factor / bounds.width())
            .min(self.canvas_height * padding_factor / bounds.height());

        let base_scale = self.scale() / self.zoom;
        self.set_zoom(target_scale / base_scale);

        let c = bounds.center();
        self.center_on(c.x, c.y);
    }

    /// Fits the whole scene with the default padding.
    pub fn fit_to_view(&mut self) {
        let scene = self.scene;
        self.fit_to_bounds(&scene, VIEW_PADDING);
    }

    /// SVG `viewBox` for the current window, for content drawn inside a
    /// `scale(1,-1)` group.
    pub fn svg_view_box(&self) -> (f64, f64, f64, f64) {
        let window = self.view_window();
        (window.min_x, -window.max_y, window.width(), window.height())
    }

    /// World-space stroke width that stays proportional to drawing size and
    /// constant on screen while zooming.
    pub fn stroke_width(&self, fraction: f64) -> f64 {
        self.scene.stroke_width(fraction) / self.zoom
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}
