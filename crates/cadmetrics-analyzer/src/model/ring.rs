//! Ring predicates shared by the containment resolver and point picking.

use super::Point;

/// Crossing-number test: casts a horizontal ray from `p` towards +X and
/// counts how many ring edges it crosses. An odd count means inside.
///
/// The ring is treated as implicitly closed; a repeated closing point only
/// adds a zero-length edge, which never counts as a crossing.
pub fn point_in_ring(p: &Point, ring: &[Point]) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = ring.len() - 1;

    for i in 0..ring.len() {
        let (xi, yi) = (ring[i].x, ring[i].y);
        let (xj, yj) = (ring[j].x, ring[j].y);

        if ((yi > p.y) != (yj > p.y)) && (p.x < (xj - xi) * (p.y - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Point at the middle index of the ring, used as the confirmation sample.
pub fn ring_midpoint(ring: &[Point]) -> Option<Point> {
    ring.get(ring.len() / 2).copied()
}

/// Number of points once consecutive duplicates and a repeated closing
/// point are ignored.
pub fn distinct_point_count(ring: &[Point]) -> usize {
    let mut count = 0;
    let mut prev: Option<&Point> = None;
    for p in ring {
        if prev != Some(p) {
            count += 1;
        }
        prev = Some(p);
    }
    if count > 1 && ring.first() == ring.last() {
        count -= 1;
    }
    count
}

/// Unsigned shoelace area of the implicitly closed ring.
pub fn ring_area(ring: &[Point]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        twice += (ring[j].x * ring[i].y) - (ring[i].x * ring[j].y);
        j = i;
    }
    (twice / 2.0).abs()
}
