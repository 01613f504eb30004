//! Preview rendering of a session.
//!
//! Two outputs, both drawing each polygon's composite boundary with even-odd
//! fill and the role colors from [`crate::style`]:
//! - an SVG document whose content sits in one `scale(1,-1)` group,
//! - a raster image rendered with tiny-skia.

use std::fmt::Write;

use image::{Rgba, RgbaImage};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::composite::CompositeBoundary;
use crate::containment::area_order;
use crate::model::Polygon;
use crate::selection_manager::SelectionState;
use crate::style::{role_style, RoleStyle, BACKGROUND};
use crate::viewport::Viewport;

fn composite_of(polygon: &Polygon) -> CompositeBoundary {
    polygon
        .composite()
        .cloned()
        .unwrap_or_else(|| CompositeBoundary::new(polygon.points()))
}

/// Renders an SVG document of the polygons as seen through `viewport`.
///
/// `stroke_fraction` sizes outlines relative to the scene extent.
pub fn render_svg(
    polygons: &[Polygon],
    selection: &SelectionState,
    viewport: &Viewport,
    stroke_fraction: f64,
) -> String {
    let (vx, vy, vw, vh) = viewport.svg_view_box();
    let base_stroke = viewport.stroke_width(stroke_fraction);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
        viewport.canvas_width(),
        viewport.canvas_height(),
        vx,
        vy,
        vw,
        vh
    );
    let _ = writeln!(
        svg,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
        vx,
        vy,
        vw,
        vh,
        BACKGROUND.to_hex()
    );
    svg.push_str("<g transform=\"scale(1,-1)\">\n");

    for idx in area_order(polygons) {
        let polygon = &polygons[idx];
        let style = role_style(selection.get(polygon.id()));
        let _ = writeln!(
            svg,
            r#"<path data-id="{}" d="{}" fill="{}" fill-opacity="{}" fill-rule="evenodd" stroke="{}" stroke-width="{}"/>"#,
            polygon.id(),
            composite_of(polygon).to_svg_path_data(),
            style.fill.to_hex(),
            style.fill_alpha,
            style.edge.to_hex(),
            base_stroke * f64::from(style.line_width)
        );
    }

    svg.push_str("</g>\n</svg>\n");
    svg
}

/// Builds the tiny-skia path in pixel space.
///
/// Points are projected in f64 first so large drawing coordinates keep their
/// precision before narrowing to f32.
fn pixel_path(composite: &CompositeBoundary, viewport: &Viewport) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for ring in composite.rings() {
        let mut iter = ring.iter();
        let Some(first) = iter.next() else {
            continue;
        };
        let (x, y) = viewport.world_point_to_pixel(first);
        pb.move_to(x as f32, y as f32);
        for p in iter {
            let (x, y) = viewport.world_point_to_pixel(p);
            pb.line_to(x as f32, y as f32);
        }
        pb.close();
    }
    pb.finish()
}

fn paint_for(color: crate::style::Rgb, alpha: f32) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(Color::from_rgba8(
        color.0,
        color.1,
        color.2,
        (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
    ));
    paint.anti_alias = true;
    paint
}

fn draw_polygon(pixmap: &mut Pixmap, path: &tiny_skia::Path, style: &RoleStyle) {
    let fill = paint_for(style.fill, style.fill_alpha);
    pixmap.fill_path(path, &fill, FillRule::EvenOdd, Transform::identity(), None);

    let edge = paint_for(style.edge, 1.0);
    let stroke = Stroke {
        width: style.line_width,
        ..Default::default()
    };
    pixmap.stroke_path(path, &edge, &stroke, Transform::identity(), None);
}

/// Renders the polygons to an RGBA image of the viewport's canvas size.
pub fn render_preview(
    polygons: &[Polygon],
    selection: &SelectionState,
    viewport: &Viewport,
) -> RgbaImage {
    let width = viewport.canvas_width().max(1.0) as u32;
    let height = viewport.canvas_height().max(1.0) as u32;

    let Some(mut pixmap) = Pixmap::new(width, height) else {
        return RgbaImage::new(width, height);
    };
    pixmap.fill(Color::from_rgba8(BACKGROUND.0, BACKGROUND.1, BACKGROUND.2, 255));

    for idx in area_order(polygons) {
        let polygon = &polygons[idx];
        if let Some(path) = pixel_path(&composite_of(polygon), viewport) {
            draw_polygon(&mut pixmap, &path, &role_style(selection.get(polygon.id())));
        }
    }

    // Pixmap stores premultiplied RGBA
    let data = pixmap.data();
    RgbaImage::from_fn(width, height, |x, y| {
        let idx = ((y * width + x) * 4) as usize;
        let a = data[idx + 3];
        let unpremultiply = |c: u8| {
            if a == 0 {
                0
            } else {
                ((u16::from(c) * 255 + u16::from(a) / 2) / u16::from(a)).min(255) as u8
            }
        };
        Rgba([
            unpremultiply(data[idx]),
            unpremultiply(data[idx + 1]),
            unpremultiply(data[idx + 2]),
            a,
        ])
    })
}
