use std::fs;
use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use cadmetrics_analyzer::{
    parse_script, render_preview, render_svg, AnalyzerState, ComplianceReport, Metrics,
    RoleRecord,
};
use cadmetrics_settings::AnalyzerConfig;

use crate::cli::OutputArgs;

/// What `analyze` and `process` print.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub session: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    pub polygons: usize,
    pub hole_relations: usize,
    pub excluded: Vec<String>,
    pub selection: Vec<SelectedPolygon>,
    pub metrics: Metrics,
    pub compliance: ComplianceReport,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedPolygon {
    pub id: u64,
    #[serde(flatten)]
    pub roles: RoleRecord,
    pub status: String,
}

impl Report {
    pub fn from_state(state: &AnalyzerState, config: &AnalyzerConfig) -> Self {
        Self {
            session: state.session(),
            units: state.units().map(|u| u.to_string()),
            polygons: state.polygons().len(),
            hole_relations: state.containment().relation_count(),
            excluded: state
                .load_report()
                .excluded
                .iter()
                .map(ToString::to_string)
                .collect(),
            selection: selected(state),
            metrics: state.metrics(),
            compliance: state.compliance(&config.compliance.limits()),
        }
    }

    pub fn write_text(&self, out: &mut impl Write) -> std::io::Result<()> {
        if let Some(units) = &self.units {
            writeln!(out, "drawing units: {}", units)?;
        }
        writeln!(
            out,
            "{} polygon(s), {} hole relation(s), {} excluded",
            self.polygons,
            self.hole_relations,
            self.excluded.len()
        )?;
        for reason in &self.excluded {
            writeln!(out, "  excluded: {}", reason)?;
        }
        for polygon in &self.selection {
            writeln!(out, "{}", polygon.status)?;
        }
        writeln!(out, "{}", self.metrics)?;
        for note in &self.compliance.notes {
            writeln!(out, "note: {}", note)?;
        }
        if !self.compliance.is_compliant() {
            writeln!(
                out,
                "limits exceeded: BCR {:?}, FAR {:?}",
                self.compliance.bcr, self.compliance.far
            )?;
        }
        Ok(())
    }
}

fn selected(state: &AnalyzerState) -> Vec<SelectedPolygon> {
    let selection = state.selection();
    state
        .polygons()
        .iter()
        .filter_map(|p| {
            selection.get(p.id()).map(|record| SelectedPolygon {
                id: p.id(),
                roles: *record,
                status: cadmetrics_analyzer::status_line(p, Some(record)),
            })
        })
        .collect()
}

/// Replays the script, writes the previews and prints the report.
pub fn finish_session(
    state: &mut AnalyzerState,
    config: &AnalyzerConfig,
    output: &OutputArgs,
    out: &mut impl Write,
) -> Result<Report> {
    if let Some(script) = &output.script {
        let body = fs::read_to_string(script)
            .with_context(|| format!("read script {}", script.display()))?;
        let commands = parse_script(&body)
            .with_context(|| format!("parse script {}", script.display()))?;
        state
            .replay(&commands)
            .with_context(|| format!("replay script {}", script.display()))?;
    }

    if let Some(path) = &output.svg {
        let svg = render_svg(
            state.polygons(),
            state.selection(),
            state.viewport(),
            config.render.stroke_fraction,
        );
        fs::write(path, svg).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("Wrote SVG preview to {}", path.display());
    }

    if let Some(path) = &output.png {
        let mut view = state.viewport().clone();
        view.set_canvas_size(
            f64::from(config.render.preview_width),
            f64::from(config.render.preview_height),
        );
        render_preview(state.polygons(), state.selection(), &view)
            .save(path)
            .with_context(|| format!("write {}", path.display()))?;
        tracing::info!("Wrote PNG preview to {}", path.display());
    }

    let report = Report::from_state(state, config);
    if output.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        report.write_text(out)?;
    }
    Ok(report)
}
