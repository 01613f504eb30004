//! Composite boundaries: an outer ring followed by its hole rings.
//!
//! The encoding is meant for even-odd fill. Every ring is emitted as a
//! move-to, line-to per remaining point, and close. Holes nested inside holes
//! therefore invert back to filled without any depth bookkeeping.

use std::fmt::Write;

use lyon::math::point;
use lyon::path::Path;
use serde::{Deserialize, Serialize};

use crate::model::{Point, PolygonId};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompositeBoundary {
    rings: Vec<Vec<Point>>,
    holes: Vec<PolygonId>,
}

impl CompositeBoundary {
    /// Starts a boundary with only the outer ring.
    pub fn new(outer: &[Point]) -> Self {
        Self {
            rings: vec![outer.to_vec()],
            holes: Vec::new(),
        }
    }

    /// Appends a hole ring, keeping discovery order.
    pub fn push_hole(&mut self, id: PolygonId, ring: &[Point]) {
        self.rings.push(ring.to_vec());
        self.holes.push(id);
    }

    pub fn outer(&self) -> &[Point] {
        self.rings.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// All rings, outer first.
    pub fn rings(&self) -> &[Vec<Point>] {
        &self.rings
    }

    /// Identifiers of the hole rings, in discovery order.
    pub fn hole_ids(&self) -> &[PolygonId] {
        &self.holes
    }

    pub fn has_holes(&self) -> bool {
        !self.holes.is_empty()
    }

    /// SVG path data (`d` attribute) in world coordinates.
    pub fn to_svg_path_data(&self) -> String {
        let mut d = String::new();
        for ring in &self.rings {
            let mut iter = ring.iter();
            let Some(first) = iter.next() else {
                continue;
            };
            if !d.is_empty() {
                d.push(' ');
            }
            let _ = write!(d, "M {} {}", first.x, first.y);
            for p in iter {
                let _ = write!(d, " L {} {}", p.x, p.y);
            }
            d.push_str(" Z");
        }
        d
    }

    /// Lyon path with one closed sub-path per ring.
    pub fn to_lyon_path(&self) -> Path {
        let mut builder = Path::builder();
        for ring in &self.rings {
            let mut iter = ring.iter();
            let Some(first) = iter.next() else {
                continue;
            };
            builder.begin(point(first.x as f32, first.y as f32));
            for p in iter {
                builder.line_to(point(p.x as f32, p.y as f32));
            }
            builder.close();
        }
        builder.build()
    }
}
