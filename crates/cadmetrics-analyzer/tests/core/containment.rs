use cadmetrics_analyzer::model::ring_area;
use cadmetrics_analyzer::{area_order, is_hole_candidate, resolve, Point, Polygon};

fn square(id: u64, min: f64, max: f64) -> Polygon {
    let points = vec![
        Point::new(min, min),
        Point::new(max, min),
        Point::new(max, max),
        Point::new(min, max),
    ];
    let area = (max - min) * (max - min);
    Polygon::new(id, points, area, area)
}

fn ring(id: u64, coords: &[(f64, f64)]) -> Polygon {
    let points: Vec<Point> = coords.iter().copied().map(Point::from).collect();
    let area = ring_area(&points);
    Polygon::new(id, points, area, area)
}

/// L-shape covering everything in 0..100 except the upper-right quadrant.
fn l_shape(id: u64) -> Polygon {
    ring(
        id,
        &[
            (0.0, 0.0),
            (100.0, 0.0),
            (100.0, 50.0),
            (50.0, 50.0),
            (50.0, 100.0),
            (0.0, 100.0),
        ],
    )
}

#[test]
fn test_single_interior_hole_is_one_directional() {
    let mut polygons = vec![square(1, 0.0, 100.0), square(2, 10.0, 20.0)];
    let map = resolve(&mut polygons);

    assert_eq!(map.relation_count(), 1);
    assert!(map.is_hole_of(2, 1));
    assert!(!map.is_hole_of(1, 2));
    assert_eq!(map.holes_of(1), &[2]);
    assert!(map.holes_of(2).is_empty());
}

#[test]
fn test_composite_boundary_outer_then_holes() {
    let mut polygons = vec![square(2, 10.0, 20.0), square(1, 0.0, 100.0)];
    resolve(&mut polygons);

    let outer = polygons.iter().find(|p| p.id() == 1).unwrap();
    let composite = outer.composite().unwrap();
    assert_eq!(composite.rings().len(), 2);
    assert_eq!(composite.outer(), outer.points());
    assert_eq!(composite.hole_ids(), &[2]);

    let inner = polygons.iter().find(|p| p.id() == 2).unwrap();
    let inner_composite = inner.composite().unwrap();
    assert!(!inner_composite.has_holes());
    assert_eq!(inner_composite.rings().len(), 1);
}

#[test]
fn test_disjoint_boxes_never_related() {
    let mut polygons = vec![square(1, 0.0, 10.0), square(2, 20.0, 25.0)];
    let map = resolve(&mut polygons);
    assert_eq!(map.relation_count(), 0);
    assert!(!is_hole_candidate(&polygons[0], &polygons[1]));
}

#[test]
fn test_box_inside_but_ring_outside_rejected() {
    // The square sits in the L's missing quadrant
    let outer = l_shape(1);
    let inner = square(2, 60.0, 90.0);
    assert!(outer.bbox().contains_box(inner.bbox()));
    assert!(!is_hole_candidate(&outer, &inner));
}

#[test]
fn test_midpoint_confirmation_rejects_straddling_ring() {
    let outer = l_shape(1);
    // First point inside the L, middle point in the missing quadrant
    let inner = ring(
        2,
        &[(10.0, 10.0), (40.0, 10.0), (90.0, 90.0), (40.0, 40.0)],
    );
    assert!(outer.bbox().contains_box(inner.bbox()));
    assert!(!is_hole_candidate(&outer, &inner));
}

#[test]
fn test_multi_level_nesting() {
    let mut polygons = vec![
        square(3, 20.0, 80.0),
        square(1, 0.0, 100.0),
        square(2, 10.0, 90.0),
    ];
    let map = resolve(&mut polygons);

    assert_eq!(map.holes_of(1), &[2, 3]);
    assert_eq!(map.holes_of(2), &[3]);
    assert!(map.holes_of(3).is_empty());

    let outer = polygons.iter().find(|p| p.id() == 1).unwrap();
    assert_eq!(outer.composite().unwrap().rings().len(), 3);
}

#[test]
fn test_area_order_is_stable_on_ties() {
    let polygons = vec![
        square(1, 0.0, 10.0),
        square(2, 50.0, 60.0),
        square(3, 0.0, 100.0),
    ];
    assert_eq!(area_order(&polygons), vec![2, 0, 1]);
}

#[test]
fn test_touching_boundary_box_is_inclusive() {
    let outer = square(1, 0.0, 100.0);
    let inner = ring(2, &[(0.0, 0.0), (50.0, 10.0), (10.0, 50.0)]);
    // Box test passes on the shared corner; the ring test decides
    assert!(outer.bbox().contains_box(inner.bbox()));
}
