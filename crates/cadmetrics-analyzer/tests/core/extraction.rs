use std::io::Write;

use cadmetrics_analyzer::{
    validate_polygons, BoundingBox, ExtractionRequest, ExtractionResponse, ExtractionSource,
    FileExtractionSource, WirePolygon,
};
use cadmetrics_core::{DrawingUnits, ExtractionError, GeometryError};

const RESPONSE: &str = r#"{
    "polygons": [
        {"id": 0, "points": [[0, 0], [100, 0], [100, 100], [0, 100], [0, 0]], "area_raw": 10000.0, "area_m2": 6.4516},
        {"id": 1, "points": [[10, 10], [20, 10], [20, 20], [10, 20], [10, 10]], "area_raw": 100.0, "area_m2": 0.064516}
    ],
    "scale": 0.0254,
    "bounds": {"min_x": 0, "min_y": 0, "max_x": 100, "max_y": 100}
}"#;

fn wire(id: u64, points: &[[f64; 2]], area_raw: Option<f64>, area_m2: Option<f64>) -> WirePolygon {
    WirePolygon {
        id,
        points: points.to_vec(),
        area_raw,
        area_m2,
    }
}

const SQUARE: [[f64; 2]; 4] = [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]];

#[test]
fn test_parse_service_response() {
    let response = ExtractionResponse::from_json(RESPONSE).unwrap();
    assert_eq!(response.polygons.len(), 2);
    assert_eq!(response.scale, Some(0.0254));
    assert_eq!(response.units(), Some(DrawingUnits::Inches));
    assert_eq!(
        response.scene_bounds(),
        BoundingBox::new(0.0, 0.0, 100.0, 100.0)
    );

    let (polygons, report) = validate_polygons(&response, 0.001);
    assert!(report.is_clean());
    assert_eq!(report.accepted, 2);
    assert_eq!(polygons[1].bbox(), &BoundingBox::new(10.0, 10.0, 20.0, 20.0));
    assert_eq!(polygons[0].area_m2(), 6.4516);
}

#[test]
fn test_empty_response_uses_default_bounds() {
    let response = ExtractionResponse::from_json("{}").unwrap();
    assert!(response.polygons.is_empty());
    assert_eq!(
        response.scene_bounds(),
        BoundingBox::new(0.0, 0.0, 100.0, 100.0)
    );
}

#[test]
fn test_malformed_body() {
    let err = ExtractionResponse::from_json("{\"polygons\": 3}").unwrap_err();
    assert!(matches!(err, ExtractionError::MalformedResponse { .. }));
}

#[test]
fn test_invalid_polygons_excluded_with_diagnostics() {
    let response = ExtractionResponse {
        polygons: vec![
            wire(0, &SQUARE, Some(100.0), Some(100.0)),
            wire(1, &[[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]], Some(1.0), Some(1.0)),
            wire(2, &[[0.0, 0.0], [f64::NAN, 1.0], [1.0, 0.0]], Some(1.0), Some(1.0)),
            wire(3, &SQUARE, Some(-5.0), Some(1.0)),
            wire(4, &SQUARE, Some(1.0), Some(0.0005)),
            wire(0, &SQUARE, Some(100.0), Some(100.0)),
        ],
        scale: None,
        bounds: None,
    };

    let (polygons, report) = validate_polygons(&response, 0.001);
    assert_eq!(polygons.len(), 1);
    assert_eq!(report.accepted, 1);
    assert_eq!(report.excluded.len(), 5);
    assert_eq!(
        report.excluded[0],
        GeometryError::DegenerateRing { id: 1, points: 2 }
    );
    assert_eq!(
        report.excluded[1],
        GeometryError::NonFiniteCoordinate { id: 2, index: 1 }
    );
    assert!(matches!(report.excluded[2], GeometryError::InvalidArea { id: 3, .. }));
    assert!(matches!(
        report.excluded[3],
        GeometryError::BelowMinimumArea { id: 4, .. }
    ));
    assert_eq!(report.excluded[4], GeometryError::DuplicateId { id: 0 });
}

#[test]
fn test_area_backfilled_from_scale_and_ring() {
    let response = ExtractionResponse {
        polygons: vec![
            wire(0, &SQUARE, Some(1_000_000.0), None),
            wire(1, &SQUARE, None, None),
        ],
        scale: Some(0.001),
        bounds: None,
    };

    let (polygons, report) = validate_polygons(&response, 0.0);
    assert!(report.is_clean());
    assert!((polygons[0].area_m2() - 1.0).abs() < 1e-12);
    assert!((polygons[1].area() - 100.0).abs() < 1e-12);
    assert!((polygons[1].area_m2() - 0.0001).abs() < 1e-12);
}

#[test]
fn test_request_accepts_drawings_only() {
    assert!(ExtractionRequest::new("plans/site.dxf", vec![]).is_ok());
    assert!(ExtractionRequest::new("plans/SITE.DWG", vec![]).is_ok());
    assert!(matches!(
        ExtractionRequest::new("plans/site.pdf", vec![]),
        Err(ExtractionError::UnsupportedFile { .. })
    ));
    assert!(ExtractionRequest::new("plans/site", vec![]).is_err());

    let request =
        ExtractionRequest::new("a.dxf", vec!["WALLS".to_string(), "SITE".to_string()]).unwrap();
    assert_eq!(request.layers_json(), r#"["WALLS","SITE"]"#);
}

#[test]
fn test_file_source_serves_saved_response() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(RESPONSE.as_bytes()).unwrap();

    let source = FileExtractionSource::new(file.path());
    let request = ExtractionRequest::new("drawing.dxf", vec![]).unwrap();
    let response = source.process(&request).unwrap();
    assert_eq!(response.polygons.len(), 2);
    assert!(source.layers(&request).unwrap().is_empty());
}

#[test]
fn test_file_source_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileExtractionSource::new(dir.path().join("missing.json"));
    let request = ExtractionRequest::new("drawing.dxf", vec![]).unwrap();
    assert!(matches!(
        source.process(&request),
        Err(ExtractionError::Transport { .. })
    ));
}
