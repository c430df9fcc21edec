// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Job home frames and hole-center extraction.
//!
//! Every job expresses its hole centers in its own home frame. The home
//! matrix embeds a rotation block and a translation column; mapping a local
//! point into the part frame subtracts the translation and then applies the
//! transposed rotation block. Results are rounded so that the same physical
//! center computed from different homes lands on the same key.

use nalgebra::{Matrix3, Point3, Vector3};
use rustc_hash::FxHashSet;

use holemap_core::{Error, HoleGroupRecord, Result};

use crate::point::{round_point, round_to, GridPoint};

/// Rotation and translation taking home-frame points into the part frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransform {
    pub rotation: Matrix3<f64>,
    pub translation: Vector3<f64>,
}

impl FrameTransform {
    /// The part frame itself.
    pub fn identity() -> Self {
        Self {
            rotation: Matrix3::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// Splits a row-major 4x4 home matrix into rotation and translation.
    ///
    /// The rows of the embedded 3x3 block become the columns of the rotation;
    /// the translation is the last column. The trailing row is ignored.
    pub fn from_home_matrix(m: &[f64; 16]) -> Self {
        let r_x = Vector3::new(m[0], m[1], m[2]);
        let r_y = Vector3::new(m[4], m[5], m[6]);
        let r_z = Vector3::new(m[8], m[9], m[10]);

        Self {
            rotation: Matrix3::from_columns(&[r_x, r_y, r_z]),
            translation: Vector3::new(m[3], m[7], m[11]),
        }
    }

    /// Maps one home-frame point into the part frame, rounded to `precision`.
    pub fn apply_point(&self, point: &Point3<f64>, precision: u32) -> Point3<f64> {
        let global = self.rotation * (point.coords - self.translation);
        round_point(&Point3::from(global), precision)
    }

    /// Maps a batch of points, preserving order.
    pub fn apply(&self, points: &[Point3<f64>], precision: u32) -> Vec<Point3<f64>> {
        points
            .iter()
            .map(|p| self.apply_point(p, precision))
            .collect()
    }
}

impl Default for FrameTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// How a hole group encodes its centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionFormat {
    /// Nine values per hole: start point, end point, direction. Only the
    /// start point is used.
    StartEndDirection,
    /// Two values per hole; the height comes from the group's upper level.
    PlanarXy,
}

impl PositionFormat {
    pub const START_END_DIRECTION_TAG: &'static str = "VFrmt_P3Str_P3End_V3Dir";
    pub const PLANAR_XY_TAG: &'static str = "VFrmt_XY";

    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag {
            Self::START_END_DIRECTION_TAG => Ok(PositionFormat::StartEndDirection),
            Self::PLANAR_XY_TAG => Ok(PositionFormat::PlanarXy),
            other => Err(Error::UnknownPositionFormat(other.to_string())),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            PositionFormat::StartEndDirection => Self::START_END_DIRECTION_TAG,
            PositionFormat::PlanarXy => Self::PLANAR_XY_TAG,
        }
    }

    /// Number of raw values describing one hole.
    pub fn stride(&self) -> usize {
        match self {
            PositionFormat::StartEndDirection => 9,
            PositionFormat::PlanarXy => 2,
        }
    }
}

/// Reads the hole centers of one hole-group entry and maps them into the
/// part frame.
///
/// Duplicate centers (after rounding) are reported once, in first-seen order.
pub fn extract_points(
    entry: &HoleGroupRecord,
    frame: &FrameTransform,
    precision: u32,
) -> Result<Vec<Point3<f64>>> {
    let format = PositionFormat::from_tag(entry.positions_format()?)?;
    let raw = &entry.positions;
    let stride = format.stride();

    if raw.is_empty() || raw.len() % stride != 0 {
        return Err(Error::MalformedPositions {
            format: format.tag(),
            len: raw.len(),
        });
    }

    let local: Vec<Point3<f64>> = match format {
        PositionFormat::StartEndDirection => raw
            .chunks_exact(stride)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect(),
        PositionFormat::PlanarXy => {
            let z = round_to(entry.upper_level()?, precision);
            raw.chunks_exact(stride)
                .map(|c| Point3::new(round_to(c[0], precision), round_to(c[1], precision), z))
                .collect()
        }
    };

    let mut seen = FxHashSet::default();
    Ok(frame
        .apply(&local, precision)
        .into_iter()
        .filter(|p| seen.insert(GridPoint::from_point(p, precision)))
        .collect())
}
