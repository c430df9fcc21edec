// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Already-parsed job records as delivered by the ingestion layer.
//!
//! Field names follow the CAM export. Presence and typing are validated
//! upstream; the accessors here only turn a missing or out-of-range value
//! into an [`Error`] scoped to the entry that carries it.

use serde::{Deserialize, Serialize};

use crate::dictionary::{Dictionary, ParamValue};
use crate::error::{Error, Result};

/// One machining operation as exported for a part.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobRecord {
    pub name: String,
    /// Job index in the CAM program. The driver falls back to the record
    /// position when absent.
    pub job_number: Option<u32>,
    #[serde(rename = "type")]
    pub job_type: String,
    /// Row-major 4x4 home transform.
    #[serde(default)]
    pub home_matrix: Vec<f64>,
    pub home_number: i64,
    /// Homes registered as coaxial and opposite-facing to this one.
    #[serde(rename = "home_vParallelHomeNumbers", default)]
    pub parallel_home_numbers: Vec<i64>,
    pub tool: ToolRecord,
    pub job_depth: f64,
    pub drill: Option<DrillRecord>,
    pub thread_mill: Option<Dictionary>,
    pub operation_parameters: Option<Dictionary>,
    pub geometry: Option<GeometryRecord>,
}

impl JobRecord {
    /// Returns the home matrix as a fixed-size array.
    pub fn home_matrix_values(&self) -> Result<[f64; 16]> {
        self.home_matrix
            .as_slice()
            .try_into()
            .map_err(|_| Error::InvalidHomeMatrix(self.home_matrix.len()))
    }

    /// Returns the raw recognized hole-group entries, or `None` for
    /// operations that do not work on holes (pocket pre-drilling, for
    /// example). Each entry is read with [`HoleGroupRecord::from_value`].
    pub fn hole_groups(&self) -> Option<&[serde_json::Value]> {
        self.geometry
            .as_ref()
            .and_then(|g| g.recognized_holes_groups.as_deref())
    }
}

/// Tool description. Everything besides the tool type is kept verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolRecord {
    pub tool_type: String,
    #[serde(flatten)]
    pub parameters: Dictionary,
}

/// Drill block present on drilling operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrillRecord {
    pub cycle: Option<DrillCycleRecord>,
    #[serde(rename = "cycle_isUsing")]
    pub cycle_is_using: Option<ParamValue>,
    pub depth_diameter_value: Option<f64>,
    pub depth_is_cutter_tip: Option<ParamValue>,
    pub depth_is_full_diameter: Option<ParamValue>,
    #[serde(rename = "depth_is_tool_Diameter")]
    pub depth_is_tool_diameter: Option<ParamValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrillCycleRecord {
    pub drill_type: Option<String>,
    pub gcode_name: Option<String>,
    pub params: Option<ParamValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeometryRecord {
    /// Kept as raw JSON so that one malformed entry does not take its
    /// siblings down with it.
    pub recognized_holes_groups: Option<Vec<serde_json::Value>>,
}

/// One recognized hole group: a cross-section plus the hole centers the
/// operation touches, in the job's home frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HoleGroupRecord {
    #[serde(rename = "_topology_type", default)]
    pub topology_type: String,
    #[serde(rename = "_geomShapeMask")]
    pub shape_mask: Option<i64>,
    #[serde(rename = "_geom_ShapePoly", default)]
    pub shape: Vec<SegmentRecord>,
    #[serde(rename = "_positions_format")]
    pub positions_format: Option<String>,
    #[serde(rename = "_tech_positions", default)]
    pub positions: Vec<f64>,
    #[serde(rename = "_geom_upper_level")]
    pub upper_level: Option<f64>,
    #[serde(rename = "_geom_depth")]
    pub depth: Option<f64>,
    #[serde(rename = "_geom_thread_depth")]
    pub thread_depth: Option<f64>,
    #[serde(rename = "_geom_thread_diameter", alias = "_geom_thread_hole_diameter")]
    pub thread_diameter: Option<f64>,
    #[serde(rename = "_geom_thread_pitch")]
    pub thread_pitch: Option<f64>,
    #[serde(rename = "_tech_depth")]
    pub tech_depth: Option<f64>,
    #[serde(rename = "_tech_depth_type")]
    pub tech_depth_type: Option<String>,
    #[serde(rename = "_tech_depth_type_val")]
    pub tech_depth_type_val: Option<f64>,
}

impl HoleGroupRecord {
    /// Deserializes one hole-group entry of a job.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        HoleGroupRecord::deserialize(value).map_err(|e| Error::InvalidRecord(e.to_string()))
    }

    /// Reads the shape mask straight from a raw entry, for entries that do
    /// not deserialize as a whole.
    pub fn raw_mask(value: &serde_json::Value) -> Option<i64> {
        value.get("_geomShapeMask").and_then(serde_json::Value::as_i64)
    }

    /// Returns the shape mask, rejecting missing and non-positive values.
    pub fn mask(&self) -> Result<u64> {
        match self.shape_mask {
            None => Err(Error::MissingField("_geomShapeMask")),
            Some(m) if m <= 0 => Err(Error::InvalidShapeMask(m)),
            Some(m) => Ok(m as u64),
        }
    }

    /// Nominal hole depth.
    pub fn nominal_depth(&self) -> Result<f64> {
        self.depth.ok_or(Error::MissingField("_geom_depth"))
    }

    pub fn positions_format(&self) -> Result<&str> {
        self.positions_format
            .as_deref()
            .filter(|f| !f.is_empty())
            .ok_or(Error::MissingField("_positions_format"))
    }

    pub fn upper_level(&self) -> Result<f64> {
        self.upper_level.ok_or(Error::MissingField("_geom_upper_level"))
    }
}

/// One straight or arc segment of a hole cross-section. Points are
/// `[radial, axial]` offsets from the hole axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub p0: [f64; 2],
    pub p1: [f64; 2],
}

/// One exported part file: the jobs of its machining program in execution
/// order.
///
/// Jobs are kept as raw JSON so that a single malformed job can be reported
/// and skipped without losing the rest of the part.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartRecord {
    pub event_data: EventDataRecord,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventDataRecord {
    #[serde(default)]
    pub jobs: Vec<serde_json::Value>,
}

impl PartRecord {
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::InvalidRecord(e.to_string()))
    }

    /// Number of job entries, well-formed or not.
    pub fn job_count(&self) -> usize {
        self.event_data.jobs.len()
    }
}

impl JobRecord {
    /// Deserializes one job entry of a part file.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        JobRecord::deserialize(value).map_err(|e| Error::InvalidRecord(e.to_string()))
    }
}
