//! Session reducer.
//!
//! `AnalyzerState` owns one drawing session: the validated polygons with
//! their composite boundaries, the selection, the tool parameters, the
//! viewport and any in-progress drag. Commands are applied one at a time and
//! metrics are recomputed after every selection change.

use cadmetrics_core::constants::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DRAG_THRESHOLD_PX, MAX_ZOOM, MIN_AREA_M2,
    MIN_ZOOM, VIEW_PADDING, ZOOM_STEP,
};
use cadmetrics_core::{format_area, DrawingUnits, ExtractionError, Result, SelectionError};
use tracing::{debug, info, warn};

use crate::box_select::DragTracker;
use crate::commands::AnalyzerCommand;
use crate::containment::{resolve, ContainmentMap};
use crate::extraction::{
    validate_polygons, ExtractionRequest, ExtractionResponse, ExtractionSource, LoadReport,
};
use crate::metrics::{check_compliance, compute_metrics, ComplianceLimits, ComplianceReport, Metrics};
use crate::model::{Point, Polygon, PolygonId};
use crate::selection_manager::{RoleRecord, SelectionState, ToolState};
use crate::viewport::Viewport;

/// Tunables for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerOptions {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
    /// Fraction of the scene extent left around it when fitting.
    pub fit_padding: f64,
    pub drag_threshold_px: f64,
    pub min_area_m2: f64,
    /// Tool parameters a fresh state starts with.
    pub initial_tool: ToolState,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            fit_padding: VIEW_PADDING,
            drag_threshold_px: DRAG_THRESHOLD_PX,
            min_area_m2: MIN_AREA_M2,
            initial_tool: ToolState::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzerState {
    options: AnalyzerOptions,
    polygons: Vec<Polygon>,
    containment: ContainmentMap,
    selection: SelectionState,
    tool: ToolState,
    viewport: Viewport,
    drag: Option<DragTracker>,
    metrics: Metrics,
    report: LoadReport,
    units: Option<DrawingUnits>,
    last_error: Option<String>,
    session: u64,
}

impl Default for AnalyzerState {
    fn default() -> Self {
        Self::new(AnalyzerOptions::default())
    }
}

impl AnalyzerState {
    pub fn new(options: AnalyzerOptions) -> Self {
        let viewport = Viewport::new(options.canvas_width, options.canvas_height)
            .with_zoom_limits(options.min_zoom, options.max_zoom, options.zoom_step);
        Self {
            tool: options.initial_tool,
            options,
            polygons: Vec::new(),
            containment: ContainmentMap::default(),
            selection: SelectionState::new(),
            viewport,
            drag: None,
            metrics: Metrics::default(),
            report: LoadReport::default(),
            units: None,
            last_error: None,
            session: 0,
        }
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn polygon(&self, id: PolygonId) -> Option<&Polygon> {
        self.polygons.iter().find(|p| p.id() == id)
    }

    pub fn containment(&self) -> &ContainmentMap {
        &self.containment
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn drag(&self) -> Option<&DragTracker> {
        self.drag.as_ref()
    }

    /// Metrics as of the last selection change.
    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn compliance(&self, limits: &ComplianceLimits) -> ComplianceReport {
        check_compliance(&self.metrics, limits)
    }

    /// Validation report of the current session.
    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    /// Drawing unit of the current session, when the scale maps onto one.
    pub fn units(&self) -> Option<DrawingUnits> {
        self.units
    }

    /// Message of the most recent failed fetch, cleared by a successful load.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Incremented by every successful load.
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Starts a new session from an extraction response.
    ///
    /// Polygons are validated, the containment pass runs, and the previous
    /// polygons and selection are replaced wholesale.
    pub fn load_response(&mut self, response: &ExtractionResponse) -> &LoadReport {
        let (mut polygons, report) = validate_polygons(response, self.options.min_area_m2);
        let containment = resolve(&mut polygons);

        self.polygons = polygons;
        self.containment = containment;
        self.selection.clear();
        self.drag = None;
        self.report = report;
        self.units = response.units();
        self.last_error = None;
        self.session += 1;

        self.viewport.set_scene(response.scene_bounds());
        let scene = *self.viewport.scene();
        self.viewport.fit_to_bounds(&scene, self.options.fit_padding);
        self.recompute_metrics();

        info!(
            "Session {}: {} polygon(s), {} hole relation(s), {} excluded",
            self.session,
            self.polygons.len(),
            self.containment.relation_count(),
            self.report.excluded.len()
        );
        &self.report
    }

    /// Records a failed fetch without touching the session or selection.
    pub fn apply_failure(&mut self, err: &ExtractionError) {
        warn!("Extraction failed: {}", err);
        self.last_error = Some(err.to_string());
    }

    /// Fetches through `source` and loads the result.
    ///
    /// On failure the error is recorded and the current session is left as is.
    pub fn load_from(
        &mut self,
        source: &dyn ExtractionSource,
        request: &ExtractionRequest,
    ) -> Result<LoadReport> {
        match source.process(request) {
            Ok(response) => Ok(self.load_response(&response).clone()),
            Err(err) => {
                self.apply_failure(&err);
                Err(err.into())
            }
        }
    }

    /// Topmost polygon containing `world`: the smallest one by area.
    pub fn pick(&self, world: &Point) -> Option<&Polygon> {
        self.polygons
            .iter()
            .filter(|p| p.contains_point(world))
            .min_by(|a, b| a.area().total_cmp(&b.area()))
    }

    /// Topmost polygon under a canvas pixel.
    pub fn pick_at_pixel(&self, x: f64, y: f64) -> Option<&Polygon> {
        self.pick(&self.viewport.pixel_to_world(x, y))
    }

    /// Status line for the polygon under a canvas pixel.
    pub fn hover_info(&self, x: f64, y: f64) -> Option<String> {
        self.pick_at_pixel(x, y)
            .map(|p| status_line(p, self.selection.get(p.id())))
    }

    /// Applies one command.
    pub fn apply(&mut self, command: &AnalyzerCommand) -> Result<()> {
        debug!("Applying {:?}", command);
        match command {
            AnalyzerCommand::Toggle { id } => {
                if self.polygon(*id).is_none() {
                    return Err(SelectionError::UnknownPolygon { id: *id }.into());
                }
                self.selection.toggle(*id, &self.tool);
            }
            AnalyzerCommand::ToggleAt { x, y } => {
                if let Some(id) = self.pick_at_pixel(*x, *y).map(Polygon::id) {
                    self.selection.toggle(id, &self.tool);
                }
            }
            AnalyzerCommand::BoxSelect { rect } => {
                let hits = self.selection.box_select(rect, &self.polygons, &self.tool);
                debug!("Box select toggled {} polygon(s)", hits.len());
            }
            AnalyzerCommand::SetToolState { tool } => self.tool = *tool,
            AnalyzerCommand::SetMode { mode } => self.tool.active_mode = *mode,
            AnalyzerCommand::SetFloorCount { floors } => {
                self.tool = ToolState::new(self.tool.active_mode, *floors, self.tool.is_footprint)?;
            }
            AnalyzerCommand::SetFootprint { footprint } => self.tool.is_footprint = *footprint,
            AnalyzerCommand::Reset => self.selection.clear(),
            AnalyzerCommand::BeginDrag { x, y } => self.drag = Some(DragTracker::new((*x, *y))),
            AnalyzerCommand::UpdateDrag { x, y } => {
                if let Some(drag) = self.drag.as_mut() {
                    drag.update((*x, *y));
                }
            }
            AnalyzerCommand::EndDrag => {
                if let Some(drag) = self.drag.take() {
                    if drag.is_below_threshold(self.options.drag_threshold_px) {
                        debug!("Drag of {:.1}px ignored", drag.distance());
                    } else {
                        let rect = drag.world_rect(&self.viewport);
                        let hits = self.selection.box_select(&rect, &self.polygons, &self.tool);
                        debug!("Drag box toggled {} polygon(s)", hits.len());
                    }
                }
            }
            AnalyzerCommand::CancelDrag => self.drag = None,
            AnalyzerCommand::ZoomAt { x, y, factor } => {
                let zoom = self.viewport.zoom() * factor;
                self.viewport.zoom_at_pixel(*x, *y, zoom);
            }
            AnalyzerCommand::ZoomIn => self.viewport.zoom_in(),
            AnalyzerCommand::ZoomOut => self.viewport.zoom_out(),
            AnalyzerCommand::PanByPixels { dx, dy } => self.viewport.pan_by_pixels(*dx, *dy),
            AnalyzerCommand::FitToView => {
                let scene = *self.viewport.scene();
                self.viewport.fit_to_bounds(&scene, self.options.fit_padding);
            }
        }

        if command.mutates_selection() {
            self.recompute_metrics();
        }
        Ok(())
    }

    /// Applies commands in order, stopping at the first error.
    pub fn replay<'a, I>(&mut self, commands: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a AnalyzerCommand>,
    {
        for command in commands {
            self.apply(command)?;
        }
        Ok(())
    }

    fn recompute_metrics(&mut self) {
        self.metrics = compute_metrics(&self.polygons, &self.selection);
    }
}

/// `Area <id> (<m²>) [SITE] [BLDG: <kind>, <n>x]`
pub fn status_line(polygon: &Polygon, record: Option<&RoleRecord>) -> String {
    let mut line = format!("Area {} ({})", polygon.id(), format_area(polygon.area_m2()));
    if let Some(record) = record {
        if record.is_site {
            line.push_str(" [SITE]");
        }
        if let Some(kind) = record.building_kind() {
            line.push_str(&format!(" [BLDG: {}, {}x]", kind, record.floors));
        }
    }
    line
}
