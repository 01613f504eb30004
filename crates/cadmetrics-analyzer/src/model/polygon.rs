use serde::{Deserialize, Serialize};

use super::{point_in_ring, Point};
use crate::bounds::BoundingBox;
use crate::composite::CompositeBoundary;

/// Identifier assigned by the extraction service, unique within one session.
pub type PolygonId = u64;

/// A closed ring extracted from a drawing.
///
/// Built once per extraction response and read-only afterwards; the
/// bounding box is derived on construction and the composite boundary is
/// attached by the containment pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    id: PolygonId,
    points: Vec<Point>,
    bbox: BoundingBox,
    area: f64,
    area_m2: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    composite: Option<CompositeBoundary>,
}

impl Polygon {
    pub fn new(id: PolygonId, points: Vec<Point>, area: f64, area_m2: f64) -> Self {
        let bbox = BoundingBox::from_points(&points);
        Self {
            id,
            points,
            bbox,
            area,
            area_m2,
            composite: None,
        }
    }

    pub fn id(&self) -> PolygonId {
        self.id
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// Area in source drawing units².
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Area converted to m².
    pub fn area_m2(&self) -> f64 {
        self.area_m2
    }

    pub fn composite(&self) -> Option<&CompositeBoundary> {
        self.composite.as_ref()
    }

    pub(crate) fn set_composite(&mut self, composite: CompositeBoundary) {
        self.composite = Some(composite);
    }

    /// Bounding-box veto, then crossing-number test on the outer ring.
    pub fn contains_point(&self, p: &Point) -> bool {
        self.bbox.contains_point(p) && point_in_ring(p, &self.points)
    }
}
