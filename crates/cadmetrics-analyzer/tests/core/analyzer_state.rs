use cadmetrics_analyzer::{
    AnalyzerCommand, AnalyzerState, BoundingBox, ExtractionRequest, ExtractionResponse,
    ExtractionSource, SelectionMode, ToolState,
};
use cadmetrics_core::ExtractionError;

const DRAWING: &str = r#"{
    "polygons": [
        {"id": 0, "points": [[0, 0], [100, 0], [100, 100], [0, 100]], "area_raw": 10000.0, "area_m2": 1000.0},
        {"id": 1, "points": [[10, 10], [30, 10], [30, 30], [10, 30]], "area_raw": 400.0, "area_m2": 40.0},
        {"id": 2, "points": [[60, 60], [80, 60], [80, 80], [60, 80]], "area_raw": 400.0, "area_m2": 40.0}
    ],
    "scale": 0.1,
    "bounds": {"min_x": 0, "min_y": 0, "max_x": 100, "max_y": 100}
}"#;

fn loaded() -> AnalyzerState {
    let mut state = AnalyzerState::default();
    state.load_response(&ExtractionResponse::from_json(DRAWING).unwrap());
    state
}

/// Canvas pixel of a world point after the default 5% padded fit.
fn pixel(state: &AnalyzerState, x: f64, y: f64) -> (f64, f64) {
    state.viewport().world_to_pixel(x, y)
}

struct FailingSource;

impl ExtractionSource for FailingSource {
    fn layers(&self, _request: &ExtractionRequest) -> Result<Vec<String>, ExtractionError> {
        Err(ExtractionError::Transport {
            reason: "connection refused".to_string(),
        })
    }

    fn process(&self, _request: &ExtractionRequest) -> Result<ExtractionResponse, ExtractionError> {
        Err(ExtractionError::Service {
            status: 400,
            detail: "Invalid layers format".to_string(),
        })
    }
}

#[test]
fn test_load_resolves_holes_and_fits_view() {
    let state = loaded();
    assert_eq!(state.session(), 1);
    assert_eq!(state.polygons().len(), 3);
    assert_eq!(state.containment().holes_of(0), &[1, 2]);
    assert!(state.polygons().iter().all(|p| p.composite().is_some()));

    let (px, py) = pixel(&state, 50.0, 50.0);
    assert!((px - 600.0).abs() < 1e-9 && (py - 400.0).abs() < 1e-9);
    assert!((state.viewport().zoom() - 0.9).abs() < 1e-9);
}

#[test]
fn test_commands_drive_metrics() {
    let mut state = loaded();
    state
        .replay(&[
            AnalyzerCommand::SetMode {
                mode: SelectionMode::Site,
            },
            AnalyzerCommand::Toggle { id: 0 },
            AnalyzerCommand::SetMode {
                mode: SelectionMode::Building,
            },
            AnalyzerCommand::SetFloorCount { floors: 3 },
            AnalyzerCommand::Toggle { id: 1 },
            AnalyzerCommand::SetFootprint { footprint: false },
            AnalyzerCommand::SetFloorCount { floors: 2 },
            AnalyzerCommand::Toggle { id: 2 },
        ])
        .unwrap();

    let metrics = state.metrics();
    assert_eq!(metrics.site_area, 1000.0);
    assert_eq!(metrics.footprint_area, 40.0);
    assert_eq!(metrics.total_floor_area, 200.0);
    assert!((metrics.bcr - 4.0).abs() < 1e-9);
    assert!((metrics.far - 0.2).abs() < 1e-9);

    state.apply(&AnalyzerCommand::Reset).unwrap();
    assert!(state.selection().is_empty());
    assert_eq!(state.metrics().site_area, 0.0);
}

#[test]
fn test_toggle_unknown_id_rejected() {
    let mut state = loaded();
    let err = state.apply(&AnalyzerCommand::Toggle { id: 99 }).unwrap_err();
    assert!(err.is_selection_error());
    assert!(state.selection().is_empty());
}

#[test]
fn test_zero_floor_count_leaves_tool_unchanged() {
    let mut state = loaded();
    let before = *state.tool();
    assert!(state
        .apply(&AnalyzerCommand::SetFloorCount { floors: 0 })
        .is_err());
    assert_eq!(*state.tool(), before);
}

#[test]
fn test_toggle_at_picks_smallest_polygon() {
    let mut state = loaded();
    let (x, y) = pixel(&state, 20.0, 20.0);
    state.apply(&AnalyzerCommand::ToggleAt { x, y }).unwrap();
    assert!(state.selection().contains(1));
    assert!(!state.selection().contains(0));

    let (x, y) = pixel(&state, 50.0, 50.0);
    state.apply(&AnalyzerCommand::ToggleAt { x, y }).unwrap();
    assert!(state.selection().contains(0));

    // Outside every polygon
    state
        .apply(&AnalyzerCommand::ToggleAt { x: 1.0, y: 1.0 })
        .unwrap();
    assert_eq!(state.selection().len(), 2);
}

#[test]
fn test_hover_status_line() {
    let mut state = loaded();
    state.apply(&AnalyzerCommand::Toggle { id: 1 }).unwrap();
    state
        .apply(&AnalyzerCommand::SetMode {
            mode: SelectionMode::Site,
        })
        .unwrap();
    state.apply(&AnalyzerCommand::Toggle { id: 1 }).unwrap();

    let (x, y) = pixel(&state, 20.0, 20.0);
    assert_eq!(
        state.hover_info(x, y).unwrap(),
        "Area 1 (40.00 m²) [SITE] [BLDG: Footprint, 1x]"
    );

    let (x, y) = pixel(&state, 70.0, 70.0);
    assert_eq!(state.hover_info(x, y).unwrap(), "Area 2 (40.00 m²)");
    assert!(state.hover_info(1.0, 1.0).is_none());
}

#[test]
fn test_drag_box_select_and_short_drag() {
    let mut state = loaded();
    state
        .apply(&AnalyzerCommand::SetToolState {
            tool: ToolState::site(),
        })
        .unwrap();

    let (x0, y0) = pixel(&state, 55.0, 85.0);
    let (x1, y1) = pixel(&state, 85.0, 55.0);
    state
        .replay(&[
            AnalyzerCommand::BeginDrag { x: x0, y: y0 },
            AnalyzerCommand::UpdateDrag { x: x1, y: y1 },
            AnalyzerCommand::EndDrag,
        ])
        .unwrap();
    // Polygon 0's box touches the drag box too
    assert!(state.selection().get(0).unwrap().is_site);
    assert!(state.selection().get(2).unwrap().is_site);
    assert!(!state.selection().contains(1));
    assert!(state.drag().is_none());

    state
        .replay(&[
            AnalyzerCommand::BeginDrag { x: 100.0, y: 100.0 },
            AnalyzerCommand::UpdateDrag { x: 102.0, y: 102.0 },
            AnalyzerCommand::EndDrag,
        ])
        .unwrap();
    assert_eq!(state.selection().len(), 2);
}

#[test]
fn test_box_select_command_in_world_space() {
    let mut state = loaded();
    state
        .apply(&AnalyzerCommand::SetMode {
            mode: SelectionMode::Site,
        })
        .unwrap();
    state
        .apply(&AnalyzerCommand::BoxSelect {
            rect: BoundingBox::new(5.0, 5.0, 35.0, 35.0),
        })
        .unwrap();
    assert_eq!(state.selection().len(), 2);
    assert!(state.metrics().site_area > 1000.0);
}

#[test]
fn test_failed_fetch_keeps_session_and_selection() {
    let mut state = loaded();
    state.apply(&AnalyzerCommand::Toggle { id: 2 }).unwrap();
    let metrics = state.metrics();

    let request = ExtractionRequest::new("plan.dxf", vec!["A-WALL".to_string()]).unwrap();
    let err = state.load_from(&FailingSource, &request).unwrap_err();
    assert!(err.is_extraction_error());

    assert_eq!(state.session(), 1);
    assert!(state.selection().contains(2));
    assert_eq!(state.metrics(), metrics);
    assert_eq!(
        state.last_error(),
        Some("Extraction service returned 400: Invalid layers format")
    );
}

#[test]
fn test_reload_replaces_session() {
    let mut state = loaded();
    state.apply(&AnalyzerCommand::Toggle { id: 0 }).unwrap();
    state.apply_failure(&ExtractionError::Transport {
        reason: "timeout".to_string(),
    });

    let report = state
        .load_response(&ExtractionResponse::from_json(DRAWING).unwrap())
        .clone();
    assert!(report.is_clean());
    assert_eq!(state.session(), 2);
    assert!(state.selection().is_empty());
    assert!(state.last_error().is_none());
}

#[test]
fn test_excluded_polygons_reported() {
    let mut state = AnalyzerState::default();
    let response = ExtractionResponse::from_json(
        r#"{"polygons": [
            {"id": 0, "points": [[0, 0], [10, 0], [10, 10]], "area_raw": 50.0, "area_m2": 50.0},
            {"id": 1, "points": [[0, 0], [10, 0]], "area_raw": 0.0, "area_m2": 0.0}
        ]}"#,
    )
    .unwrap();
    let report = state.load_response(&response);
    assert_eq!(report.accepted, 1);
    assert_eq!(report.excluded.len(), 1);
    assert_eq!(state.polygons().len(), 1);
}

#[test]
fn test_zoom_and_pan_commands() {
    let mut state = loaded();
    state
        .apply(&AnalyzerCommand::ZoomAt {
            x: 600.0,
            y: 400.0,
            factor: 2.0,
        })
        .unwrap();
    assert!((state.viewport().zoom() - 1.8).abs() < 1e-9);

    state
        .apply(&AnalyzerCommand::PanByPixels { dx: 50.0, dy: 0.0 })
        .unwrap();
    assert!(state.viewport().pan_x() < 0.0);

    state.apply(&AnalyzerCommand::FitToView).unwrap();
    assert!((state.viewport().zoom() - 0.9).abs() < 1e-9);
    assert!(state.viewport().pan_x().abs() < 1e-9);
}
