// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coordinate identity: deciding whether a part-frame point is a hole that
//! the group already knows.
//!
//! A through hole machined from two opposing homes is observed once at each
//! face. The two observations lie exactly one hole depth apart, and the
//! homes are registered as parallel. Such a pair is one physical hole.

use nalgebra::Point3;

use holemap_geometry::GridPoint;

use crate::catalog::Catalog;
use crate::keys::*;

/// How a candidate point was resolved to an existing hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoleMatch {
    /// The rounded coordinates coincide.
    Coincident(HoleKey),
    /// The point is the far face of a through hole seen from a parallel home.
    FarFace(HoleKey),
}

impl HoleMatch {
    pub fn hole(&self) -> HoleKey {
        match *self {
            HoleMatch::Coincident(k) | HoleMatch::FarFace(k) => k,
        }
    }
}

impl Catalog {
    /// Looks up the hole at exactly `point` (after rounding) in a group.
    pub fn hole_at(&self, group: HoleGroupKey, point: &Point3<f64>) -> Option<HoleKey> {
        let key = GridPoint::from_point(point, self.config.precision);
        self.hole_groups.get(group)?.by_coordinate.get(&key).copied()
    }

    /// Resolves a candidate point observed from `home_number` against the
    /// holes of `group`.
    ///
    /// The coordinate index is consulted first. Otherwise every hole is
    /// scanned in creation order; a hole matches when one of its jobs lists
    /// `home_number` among its parallel homes and the distance between the
    /// two points equals the group depth within tolerance.
    pub fn resolve_hole(
        &self,
        group: HoleGroupKey,
        point: &Point3<f64>,
        home_number: i64,
    ) -> Option<HoleMatch> {
        if let Some(hole) = self.hole_at(group, point) {
            return Some(HoleMatch::Coincident(hole));
        }

        let data = self.hole_groups.get(group)?;
        let tolerance = self.config.tolerance;

        data.order
            .iter()
            .copied()
            .find(|&hk| {
                let Some(hole) = self.holes.get(hk) else {
                    return false;
                };
                hole.jobs.iter().any(|job| job.is_parallel_to(home_number))
                    && ((point - hole.coordinate).norm() - data.depth).abs() <= tolerance
            })
            .map(HoleMatch::FarFace)
    }
}
