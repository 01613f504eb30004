//! Role selection over the polygons of one session.
//!
//! `SelectionState` is a sparse map from polygon id to a [`RoleRecord`].
//! A record only exists while at least one of its role flags is set; the
//! toggle operation removes it the moment both flags clear, so callers can
//! never observe an empty record.
//!
//! # Tool parameters
//!
//! The active mode, floor count and footprint flag are passed in as a
//! [`ToolState`] on every call. Floor count and footprint are captured into
//! the record when the building role switches on and are not live-bound
//! afterwards.

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use cadmetrics_core::SelectionError;
use serde::{Deserialize, Serialize};

use crate::bounds::BoundingBox;
use crate::model::{Polygon, PolygonId};

/// Which role a toggle acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    Site,
    #[default]
    Building,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Site => write!(f, "site"),
            Self::Building => write!(f, "building"),
        }
    }
}

impl FromStr for SelectionMode {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "site" => Ok(Self::Site),
            "building" | "bldg" => Ok(Self::Building),
            _ => Err(SelectionError::UnknownMode {
                mode: s.to_string(),
            }),
        }
    }
}

/// Ambient tool parameters supplied with each interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolState {
    pub active_mode: SelectionMode,
    pub floor_count: NonZeroU32,
    pub is_footprint: bool,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            active_mode: SelectionMode::Building,
            floor_count: NonZeroU32::MIN,
            is_footprint: true,
        }
    }
}

impl ToolState {
    /// Creates a tool state, rejecting a floor count of zero.
    pub fn new(
        active_mode: SelectionMode,
        floor_count: u32,
        is_footprint: bool,
    ) -> Result<Self, SelectionError> {
        let floor_count = NonZeroU32::new(floor_count).ok_or(SelectionError::ZeroFloorCount)?;
        Ok(Self {
            active_mode,
            floor_count,
            is_footprint,
        })
    }

    /// Site mode with default building parameters.
    pub fn site() -> Self {
        Self {
            active_mode: SelectionMode::Site,
            ..Self::default()
        }
    }

    /// Building mode capturing `floors` and `is_footprint` on activation.
    pub fn building(floors: u32, is_footprint: bool) -> Result<Self, SelectionError> {
        Self::new(SelectionMode::Building, floors, is_footprint)
    }
}

/// Roles assigned to one polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecord {
    pub is_site: bool,
    pub is_building: bool,
    pub floors: NonZeroU32,
    pub is_footprint: bool,
}

impl Default for RoleRecord {
    fn default() -> Self {
        Self {
            is_site: false,
            is_building: false,
            floors: NonZeroU32::MIN,
            is_footprint: true,
        }
    }
}

impl RoleRecord {
    /// Neither role is set; such a record must not be stored.
    pub fn is_empty(&self) -> bool {
        !self.is_site && !self.is_building
    }

    /// "Footprint" or "Upper Floor" for building records.
    pub fn building_kind(&self) -> Option<&'static str> {
        if !self.is_building {
            return None;
        }
        Some(if self.is_footprint {
            "Footprint"
        } else {
            "Upper Floor"
        })
    }
}

/// Sparse per-polygon role mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    records: HashMap<PolygonId, RoleRecord>,
}

impl SelectionState {
    /// Creates an empty selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use cadmetrics_analyzer::selection_manager::SelectionState;
    ///
    /// let selection = SelectionState::new();
    /// assert!(selection.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the active role on `id`.
    ///
    /// Site mode flips `is_site`. Building mode flips `is_building` and, only
    /// when it turns on, copies the floor count and footprint flag from
    /// `tool`; turning it off puts them back to their defaults. The record
    /// is removed when both flags end up false.
    ///
    /// # Returns
    ///
    /// The record after the toggle, or `None` if it was removed.
    pub fn toggle(&mut self, id: PolygonId, tool: &ToolState) -> Option<RoleRecord> {
        let mut record = self.records.get(&id).copied().unwrap_or_default();

        match tool.active_mode {
            SelectionMode::Site => record.is_site = !record.is_site,
            SelectionMode::Building => {
                record.is_building = !record.is_building;
                if record.is_building {
                    record.floors = tool.floor_count;
                    record.is_footprint = tool.is_footprint;
                } else {
                    let cleared = RoleRecord::default();
                    record.floors = cleared.floors;
                    record.is_footprint = cleared.is_footprint;
                }
            }
        }

        if record.is_empty() {
            self.records.remove(&id);
            None
        } else {
            self.records.insert(id, record);
            Some(record)
        }
    }

    /// Toggles every polygon whose bounding box touches `rect`, once each.
    ///
    /// This is a toggle over the hit set, not a select-all: repeating the
    /// same box reverts it.
    ///
    /// # Returns
    ///
    /// Identifiers of the polygons that were toggled, in polygon order.
    pub fn box_select(
        &mut self,
        rect: &BoundingBox,
        polygons: &[Polygon],
        tool: &ToolState,
    ) -> Vec<PolygonId> {
        let hits: Vec<PolygonId> = polygons
            .iter()
            .filter(|p| p.bbox().intersects(rect))
            .map(Polygon::id)
            .collect();

        for id in &hits {
            self.toggle(*id, tool);
        }
        hits
    }

    pub fn get(&self, id: PolygonId) -> Option<&RoleRecord> {
        self.records.get(&id)
    }

    pub fn contains(&self, id: PolygonId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PolygonId, &RoleRecord)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of polygons currently carrying the site role.
    pub fn site_count(&self) -> usize {
        self.records.values().filter(|r| r.is_site).count()
    }

    /// Number of polygons currently carrying the building role.
    pub fn building_count(&self) -> usize {
        self.records.values().filter(|r| r.is_building).count()
    }

    /// Removes every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
