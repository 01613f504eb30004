//! Display style per selection role.

use crate::selection_manager::RoleRecord;

/// RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb` form for SVG attributes.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

const WHITE: Rgb = Rgb(255, 255, 255);

/// Fill and outline used to draw one polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleStyle {
    pub fill: Rgb,
    pub fill_alpha: f32,
    pub edge: Rgb,
    pub line_width: f32,
}

/// Background behind the drawing.
pub const BACKGROUND: Rgb = Rgb(0x1e, 0x1e, 0x1e);

/// Site + building purple, site cyan, footprint orange, upper floor gold,
/// unselected dark grey.
pub fn role_style(record: Option<&RoleRecord>) -> RoleStyle {
    match record {
        Some(r) if r.is_site && r.is_building => RoleStyle {
            fill: Rgb(0x99, 0x32, 0xcc),
            fill_alpha: 0.7,
            edge: WHITE,
            line_width: 2.0,
        },
        Some(r) if r.is_site => RoleStyle {
            fill: Rgb(0, 255, 255),
            fill_alpha: 0.4,
            edge: WHITE,
            line_width: 1.0,
        },
        Some(r) if r.is_building && r.is_footprint => RoleStyle {
            fill: Rgb(255, 165, 0),
            fill_alpha: 0.6,
            edge: WHITE,
            line_width: 1.0,
        },
        Some(r) if r.is_building => RoleStyle {
            fill: Rgb(0xff, 0xd7, 0x00),
            fill_alpha: 0.5,
            edge: WHITE,
            line_width: 1.0,
        },
        _ => RoleStyle {
            fill: Rgb(0x33, 0x33, 0x33),
            fill_alpha: 0.3,
            edge: Rgb(0x55, 0x55, 0x55),
            line_width: 1.0,
        },
    }
}
