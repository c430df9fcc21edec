// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Machining-job domain types.
//!
//! A [`Job`] is one operation applied to one hole. Drilling, thread milling
//! and contouring operations each carry a different parameter set, modelled
//! by the [`JobParams`] variants.

use serde::Serialize;

use crate::dictionary::{without_version, Dictionary};
use crate::records::{DrillRecord, HoleGroupRecord, JobRecord};

/// Operation kinds the catalog tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum JobType {
    /// `NC_DRILL_OLD`
    Drilling,
    /// `NC_DRILL_DEEP`
    MultiDepthDrilling,
    /// `NC_THREAD`
    ThreadMilling,
    /// `NC_DRILL_HR`
    DrillRecognition,
    /// `NC_JOB_MW_DRILL_5X`
    MultiAxisDrilling,
    /// `NC_PROFILE`
    Profile,
    /// `NC_CHAMFER`
    Chamfer,
    /// `NC_JOB_HSS_PARALLEL_TO_CURVE`
    ParallelToCurve,
}

impl JobType {
    /// Parses an export type tag. Returns `None` for operations the catalog
    /// does not track.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "NC_DRILL_OLD" => Some(JobType::Drilling),
            "NC_DRILL_DEEP" => Some(JobType::MultiDepthDrilling),
            "NC_THREAD" => Some(JobType::ThreadMilling),
            "NC_DRILL_HR" => Some(JobType::DrillRecognition),
            "NC_JOB_MW_DRILL_5X" => Some(JobType::MultiAxisDrilling),
            "NC_PROFILE" => Some(JobType::Profile),
            "NC_CHAMFER" => Some(JobType::Chamfer),
            "NC_JOB_HSS_PARALLEL_TO_CURVE" => Some(JobType::ParallelToCurve),
            _ => None,
        }
    }

    /// Returns the export type tag.
    pub fn tag(&self) -> &'static str {
        match self {
            JobType::Drilling => "NC_DRILL_OLD",
            JobType::MultiDepthDrilling => "NC_DRILL_DEEP",
            JobType::ThreadMilling => "NC_THREAD",
            JobType::DrillRecognition => "NC_DRILL_HR",
            JobType::MultiAxisDrilling => "NC_JOB_MW_DRILL_5X",
            JobType::Profile => "NC_PROFILE",
            JobType::Chamfer => "NC_CHAMFER",
            JobType::ParallelToCurve => "NC_JOB_HSS_PARALLEL_TO_CURVE",
        }
    }

    /// Drilling operations carry a drill block.
    pub fn is_drilling(&self) -> bool {
        matches!(
            self,
            JobType::Drilling
                | JobType::MultiDepthDrilling
                | JobType::ThreadMilling
                | JobType::DrillRecognition
                | JobType::MultiAxisDrilling
        )
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Tool used by a job. `parameters` holds the remaining tool block without
/// its format version.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tool {
    pub tool_type: String,
    pub parameters: Dictionary,
}

/// Drill cycle selected for a drilling job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrillCycle {
    pub drill_type: Option<String>,
    pub gcode_name: Option<String>,
    pub params: Option<crate::dictionary::ParamValue>,
}

/// Depth specification of a multi-axis drilling hole group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiAxisDepth {
    pub depth: f64,
    pub depth_type: String,
    pub depth_type_value: f64,
}

impl MultiAxisDepth {
    /// Reads the auxiliary depth fields; all three must be present.
    pub fn from_record(entry: &HoleGroupRecord) -> Option<Self> {
        Some(Self {
            depth: entry.tech_depth?,
            depth_type: entry.tech_depth_type.clone().filter(|t| !t.is_empty())?,
            depth_type_value: entry.tech_depth_type_val?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrillParams {
    pub cycle: Option<DrillCycle>,
    pub cycle_is_using: Option<bool>,
    pub depth_diameter_value: Option<f64>,
    pub depth_is_cutter_tip: Option<bool>,
    pub depth_is_full_diameter: Option<bool>,
    pub depth_is_tool_diameter: Option<bool>,
    pub multi_axis_depth: Option<MultiAxisDepth>,
}

impl DrillParams {
    fn from_record(drill: Option<&DrillRecord>, entry: &HoleGroupRecord, job_type: JobType) -> Self {
        let flag = |v: &Option<crate::dictionary::ParamValue>| v.as_ref().and_then(|p| p.as_flag());
        let mut params = match drill {
            Some(d) => Self {
                cycle: d.cycle.as_ref().map(|c| DrillCycle {
                    drill_type: c.drill_type.clone(),
                    gcode_name: c.gcode_name.clone(),
                    params: c.params.clone(),
                }),
                cycle_is_using: flag(&d.cycle_is_using),
                depth_diameter_value: d.depth_diameter_value,
                depth_is_cutter_tip: flag(&d.depth_is_cutter_tip),
                depth_is_full_diameter: flag(&d.depth_is_full_diameter),
                depth_is_tool_diameter: flag(&d.depth_is_tool_diameter),
                multi_axis_depth: None,
            },
            None => Self::default(),
        };
        if job_type == JobType::MultiAxisDrilling {
            params.multi_axis_depth = MultiAxisDepth::from_record(entry);
        }
        params
    }
}

/// Parameters specific to the kind of operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobParams {
    Drilling(DrillParams),
    ThreadMilling {
        drill: DrillParams,
        thread_mill: Dictionary,
    },
    /// Profile and chamfer operations.
    Contour { operation_parameters: Dictionary },
    Curve,
}

/// One operation applied to one hole.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Job {
    pub name: String,
    pub number: u32,
    pub job_type: JobType,
    pub tool: Tool,
    pub depth: f64,
    pub home_number: i64,
    pub parallel_home_numbers: Vec<i64>,
    pub params: JobParams,
}

impl Job {
    /// Builds the job attached to the holes of one hole-group entry.
    pub fn from_record(
        record: &JobRecord,
        job_type: JobType,
        entry: &HoleGroupRecord,
        number: u32,
    ) -> Self {
        let drill = || DrillParams::from_record(record.drill.as_ref(), entry, job_type);
        let params = match job_type {
            JobType::ThreadMilling => JobParams::ThreadMilling {
                drill: drill(),
                thread_mill: record.thread_mill.clone().unwrap_or_default(),
            },
            t if t.is_drilling() => JobParams::Drilling(drill()),
            JobType::Profile | JobType::Chamfer => JobParams::Contour {
                operation_parameters: record.operation_parameters.clone().unwrap_or_default(),
            },
            _ => JobParams::Curve,
        };

        Self {
            name: record.name.clone(),
            number,
            job_type,
            tool: Tool {
                tool_type: record.tool.tool_type.clone(),
                parameters: without_version(record.tool.parameters.clone()),
            },
            depth: record.job_depth,
            home_number: record.home_number,
            parallel_home_numbers: record.parallel_home_numbers.clone(),
            params,
        }
    }

    /// Two jobs on the same hole are duplicates when depth, type and tool
    /// all match exactly.
    pub fn is_duplicate_of(&self, other: &Job) -> bool {
        self.depth == other.depth && self.job_type == other.job_type && self.tool == other.tool
    }

    /// Returns `true` if `home` is registered as parallel to this job's home.
    pub fn is_parallel_to(&self, home: i64) -> bool {
        self.parallel_home_numbers.contains(&home)
    }
}
