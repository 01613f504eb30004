//! Containment resolver.
//!
//! Decides which polygons are holes of which, and builds the composite
//! boundary each polygon is rendered with.
//!
//! # Algorithm
//!
//! 1. Order polygons by raw area, largest first (stable on input order), so
//!    any container is visited before anything it could contain.
//! 2. For each polygon `i`, scan every later polygon `j`:
//!    - reject unless `j`'s bounding box lies inside `i`'s (inclusive),
//!    - require `j`'s first point inside `i`'s ring (crossing number),
//!    - confirm with `j`'s middle point.
//! 3. Emit `i`'s outer ring followed by each recorded hole, in discovery order.
//!
//! Hole-of-hole nesting is never tracked: a ring that is a hole of `A` is
//! still scanned as a candidate hole of every other polygon, and even-odd
//! fill inverts each level correctly.
//!
//! Self-intersecting or boundary-touching rings can still be misclassified;
//! the two-sample test reduces that but does not eliminate it.

use std::collections::HashMap;

use tracing::debug;

use crate::composite::CompositeBoundary;
use crate::model::{point_in_ring, ring_midpoint, Polygon, PolygonId};

/// Hole relationships discovered for one drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainmentMap {
    holes: HashMap<PolygonId, Vec<PolygonId>>,
}

impl ContainmentMap {
    /// Holes recorded for `outer`, in discovery order.
    pub fn holes_of(&self, outer: PolygonId) -> &[PolygonId] {
        self.holes.get(&outer).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `inner` was recorded as a hole of `outer`.
    pub fn is_hole_of(&self, inner: PolygonId, outer: PolygonId) -> bool {
        self.holes_of(outer).contains(&inner)
    }

    /// Whether `id` is a hole of any polygon.
    pub fn is_hole(&self, id: PolygonId) -> bool {
        self.holes.values().any(|holes| holes.contains(&id))
    }

    /// Total number of outer→hole relationships.
    pub fn relation_count(&self) -> usize {
        self.holes.values().map(Vec::len).sum()
    }

    fn record(&mut self, outer: PolygonId, inner: PolygonId) {
        self.holes.entry(outer).or_default().push(inner);
    }
}

/// Tests whether `inner` is a hole of `outer`.
///
/// The bounding-box test is an absolute veto; the point samples only run
/// once it passes.
pub fn is_hole_candidate(outer: &Polygon, inner: &Polygon) -> bool {
    outer.bbox().contains_box(inner.bbox()) && samples_inside(outer, inner)
}

/// First point, then middle point of `inner`, both inside `outer`'s ring.
fn samples_inside(outer: &Polygon, inner: &Polygon) -> bool {
    let Some(first) = inner.points().first() else {
        return false;
    };
    if !point_in_ring(first, outer.points()) {
        return false;
    }

    match ring_midpoint(inner.points()) {
        Some(mid) => point_in_ring(&mid, outer.points()),
        None => false,
    }
}

/// Indices of `polygons` ordered by raw area, largest first, ties kept in
/// input order.
pub fn area_order(polygons: &[Polygon]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..polygons.len()).collect();
    order.sort_by(|&a, &b| polygons[b].area().total_cmp(&polygons[a].area()));
    order
}

/// Discovers every outer→hole relationship among `polygons`.
pub fn resolve_holes(polygons: &[Polygon]) -> ContainmentMap {
    let order = area_order(polygons);
    let mut map = ContainmentMap::default();
    let mut box_rejections = 0usize;

    for (pos, &i) in order.iter().enumerate() {
        let outer = &polygons[i];
        for &j in &order[pos + 1..] {
            let inner = &polygons[j];
            if !outer.bbox().contains_box(inner.bbox()) {
                box_rejections += 1;
                continue;
            }
            if samples_inside(outer, inner) {
                map.record(outer.id(), inner.id());
            }
        }
    }

    debug!(
        "Containment pass over {} polygons: {} hole relation(s), {} bbox rejection(s)",
        polygons.len(),
        map.relation_count(),
        box_rejections
    );

    map
}

/// Builds the composite boundary of `polygon` from the resolved map.
pub fn build_composite(
    polygon: &Polygon,
    map: &ContainmentMap,
    by_id: &HashMap<PolygonId, usize>,
    polygons: &[Polygon],
) -> CompositeBoundary {
    let mut composite = CompositeBoundary::new(polygon.points());
    for hole_id in map.holes_of(polygon.id()) {
        if let Some(&idx) = by_id.get(hole_id) {
            composite.push_hole(*hole_id, polygons[idx].points());
        }
    }
    composite
}

/// Runs the containment pass and attaches a composite boundary to every
/// polygon (polygons without holes get their outer ring alone).
pub fn resolve(polygons: &mut [Polygon]) -> ContainmentMap {
    let map = resolve_holes(polygons);
    let by_id: HashMap<PolygonId, usize> = polygons
        .iter()
        .enumerate()
        .map(|(idx, p)| (p.id(), idx))
        .collect();

    let composites: Vec<CompositeBoundary> = polygons
        .iter()
        .map(|p| build_composite(p, &map, &by_id, polygons))
        .collect();

    for (polygon, composite) in polygons.iter_mut().zip(composites) {
        polygon.set_composite(composite);
    }

    map
}
