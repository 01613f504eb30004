use cadmetrics_analyzer::{BoundingBox, DragTracker, Viewport};

fn scene_viewport() -> Viewport {
    let mut viewport = Viewport::new(1200.0, 800.0);
    viewport.set_scene(BoundingBox::new(0.0, 0.0, 100.0, 100.0));
    viewport
}

#[test]
fn test_scene_center_maps_to_canvas_center() {
    let viewport = scene_viewport();
    let (px, py) = viewport.world_to_pixel(50.0, 50.0);
    assert!((px - 600.0).abs() < 1e-9);
    assert!((py - 400.0).abs() < 1e-9);
}

#[test]
fn test_vertical_flip() {
    let viewport = scene_viewport();
    let (_, low) = viewport.world_to_pixel(50.0, 0.0);
    let (_, high) = viewport.world_to_pixel(50.0, 100.0);
    assert!(high < low, "larger world Y should be higher on screen");

    let top = viewport.pixel_to_world(600.0, 0.0);
    let bottom = viewport.pixel_to_world(600.0, 800.0);
    assert!(top.y > bottom.y);
}

#[test]
fn test_round_trip_under_zoom_and_pan() {
    let mut viewport = scene_viewport();
    viewport.set_zoom(3.5);
    viewport.pan_by(12.0, -7.0);

    for &(x, y) in &[(0.0, 0.0), (33.0, 71.0), (100.0, 100.0)] {
        let (px, py) = viewport.world_to_pixel(x, y);
        let back = viewport.pixel_to_world(px, py);
        assert!((back.x - x).abs() < 1e-9);
        assert!((back.y - y).abs() < 1e-9);
    }
}

#[test]
fn test_zoom_clamped() {
    let mut viewport = scene_viewport();
    viewport.set_zoom(1000.0);
    assert_eq!(viewport.zoom(), 200.0);
    viewport.set_zoom(0.001);
    assert_eq!(viewport.zoom(), 0.1);
    viewport.set_zoom(f64::NAN);
    assert_eq!(viewport.zoom(), 0.1);
}

#[test]
fn test_view_window_shrinks_with_zoom() {
    let mut viewport = scene_viewport();
    viewport.set_zoom(2.0);
    viewport.set_pan(10.0, 0.0);
    let window = viewport.view_window();
    assert!((window.min_x - 35.0).abs() < 1e-9);
    assert!((window.max_x - 85.0).abs() < 1e-9);
    assert!((window.min_y - 25.0).abs() < 1e-9);
    assert!((window.max_y - 75.0).abs() < 1e-9);
}

#[test]
fn test_zoom_at_pixel_keeps_anchor() {
    let mut viewport = scene_viewport();
    let before = viewport.pixel_to_world(900.0, 200.0);
    viewport.zoom_at_pixel(900.0, 200.0, 4.0);
    let after = viewport.pixel_to_world(900.0, 200.0);
    assert_eq!(viewport.zoom(), 4.0);
    assert!((before.x - after.x).abs() < 1e-9);
    assert!((before.y - after.y).abs() < 1e-9);
}

#[test]
fn test_pan_by_pixels_follows_pointer() {
    let mut viewport = scene_viewport();
    let grabbed = viewport.pixel_to_world(600.0, 400.0);
    viewport.pan_by_pixels(40.0, 25.0);
    let (px, py) = viewport.world_point_to_pixel(&grabbed);
    assert!((px - 640.0).abs() < 1e-9);
    assert!((py - 425.0).abs() < 1e-9);
}

#[test]
fn test_fit_to_bounds_padding() {
    let mut viewport = scene_viewport();
    let target = BoundingBox::new(20.0, 40.0, 60.0, 60.0);
    viewport.fit_to_bounds(&target, 0.05);

    let (min_px, max_py) = viewport.world_to_pixel(target.min_x, target.min_y);
    let (max_px, min_py) = viewport.world_to_pixel(target.max_x, target.max_y);
    assert!(min_px >= 60.0 - 1e-6);
    assert!(max_px <= 1140.0 + 1e-6);
    assert!(min_py >= 40.0 - 1e-6);
    assert!(max_py <= 760.0 + 1e-6);
}

#[test]
fn test_invalid_scene_falls_back() {
    let mut viewport = Viewport::default();
    viewport.set_scene(BoundingBox::empty());
    assert_eq!(*viewport.scene(), BoundingBox::new(0.0, 0.0, 100.0, 100.0));
}

#[test]
fn test_drag_world_rect_undoes_flip() {
    let viewport = scene_viewport();
    // Drag from the upper-left towards the lower-right on screen
    let mut drag = DragTracker::new(viewport.world_to_pixel(10.0, 90.0));
    drag.update(viewport.world_to_pixel(30.0, 60.0));

    let rect = drag.world_rect(&viewport);
    assert!((rect.min_x - 10.0).abs() < 1e-9);
    assert!((rect.max_x - 30.0).abs() < 1e-9);
    assert!((rect.min_y - 60.0).abs() < 1e-9);
    assert!((rect.max_y - 90.0).abs() < 1e-9);
}

#[test]
fn test_stroke_width_shrinks_when_zoomed() {
    let mut viewport = scene_viewport();
    let base = viewport.stroke_width(0.002);
    assert!((base - 0.2).abs() < 1e-9);
    viewport.set_zoom(2.0);
    assert!((viewport.stroke_width(0.002) - 0.1).abs() < 1e-9);
}
