// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixtures shared by the unit tests.

use nalgebra::Point3;

use holemap_core::{Dictionary, DrillParams, HoleGroupRecord, Job, JobParams, JobType, SegmentRecord, Tool};

pub fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
    Point3::new(x, y, z)
}

pub fn drill_job(name: &str, home_number: i64, parallel: &[i64], depth: f64) -> Job {
    Job {
        name: name.to_string(),
        number: 1,
        job_type: JobType::Drilling,
        tool: Tool {
            tool_type: "TT_DRILL".to_string(),
            parameters: Dictionary::default(),
        },
        depth,
        home_number,
        parallel_home_numbers: parallel.to_vec(),
        params: JobParams::Drilling(DrillParams::default()),
    }
}

fn line(p0: [f64; 2], p1: [f64; 2]) -> SegmentRecord {
    SegmentRecord {
        kind: "line".to_string(),
        p0,
        p1,
    }
}

/// A plain cylindrical hole.
pub fn simple_hole(radius: f64, depth: f64) -> Vec<SegmentRecord> {
    vec![line([radius, 0.0], [radius, -depth])]
}

/// M6 counterbore: 11 x 6 over 6.6 x 14.
pub fn counterbore() -> Vec<SegmentRecord> {
    vec![
        line([5.5, 0.0], [5.5, -6.0]),
        line([5.5, -6.0], [3.3, -6.0]),
        line([3.3, -6.0], [3.3, -20.0]),
    ]
}

/// The same cross-section as seen from the opposite face.
pub fn reversed(shape: &[SegmentRecord]) -> Vec<SegmentRecord> {
    shape
        .iter()
        .rev()
        .map(|s| line(s.p1, s.p0))
        .collect()
}

pub fn entry(mask: i64, shape: Vec<SegmentRecord>, depth: f64) -> HoleGroupRecord {
    HoleGroupRecord {
        topology_type: "HR_hwCounterBore".to_string(),
        shape_mask: Some(mask),
        shape,
        depth: Some(depth),
        ..Default::default()
    }
}
