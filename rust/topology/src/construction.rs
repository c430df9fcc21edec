// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Merging hole-group observations into the catalog.
//!
//! Each call to [`Catalog::add_hole_group`] places one job's view of one
//! hole group: the topology is found by mask (or its reversal), the hole
//! group by cross-section, and each hole by coordinate identity. Anything
//! not found is created. Nothing is ever removed or re-assigned.

use nalgebra::Point3;

use holemap_core::{HoleGroupRecord, Job};
use holemap_geometry::{round_point, same_shape, GridPoint, Shape};

use crate::catalog::*;
use crate::error::{Error, Result};
use crate::identity::HoleMatch;
use crate::keys::*;

/// Reverses the decimal digits of a shape mask. Trailing zeros of the input
/// vanish, as they would when the digit string is read backwards.
pub fn reverse_mask(mut mask: u64) -> u64 {
    let mut reversed = 0;
    while mask > 0 {
        reversed = reversed * 10 + mask % 10;
        mask /= 10;
    }
    reversed
}

/// Turns an exported topology type into a display name: the `HR_hw` export
/// prefix is dropped and words are split on capitals
/// (`HR_hwCounterBore` becomes `Counter_Bore`).
pub fn topology_display_name(raw: &str) -> String {
    let stem = raw.strip_prefix("HR_hw").unwrap_or(raw);
    let mut name = String::with_capacity(stem.len() + 4);
    for (i, c) in stem.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            name.push('_');
        }
        name.push(c);
    }
    name
}

/// What a single [`Catalog::add_hole_group`] call changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleGroupOutcome {
    pub topology: TopologyKey,
    pub group: HoleGroupKey,
    pub created_topology: bool,
    pub created_group: bool,
    /// Holes created by this call.
    pub created_holes: usize,
    /// Jobs appended to holes that already existed.
    pub attached_jobs: usize,
    /// Jobs discarded as duplicates of a job already on the hole.
    pub duplicate_jobs: usize,
    /// Points resolved as the far face of an existing through hole.
    pub far_face_merges: usize,
}

impl Catalog {
    /// Returns the topology stored under `mask` or its digit reversal.
    pub fn topology_for_mask(&self, mask: u64) -> Option<TopologyKey> {
        self.masks
            .get(&mask)
            .or_else(|| self.masks.get(&reverse_mask(mask)))
            .copied()
    }

    /// Merges one job's observation of a hole group.
    ///
    /// `points` are hole centers already mapped into the part frame. The
    /// entry supplies mask, cross-section and the group metadata used if a
    /// new group has to be created.
    ///
    /// Returns an error, leaving the catalog untouched, when the mask is
    /// missing or non-positive, the cross-section is empty, or the depth is
    /// missing.
    pub fn add_hole_group(
        &mut self,
        job: &Job,
        points: &[Point3<f64>],
        entry: &HoleGroupRecord,
        part_name: &str,
    ) -> Result<HoleGroupOutcome> {
        let mask = entry.mask()?;
        let shape = Shape::from_records(&entry.shape)?;
        let depth = entry.nominal_depth()?;

        let (topology, created_topology) = match self.topology_for_mask(mask) {
            Some(key) => (key, false),
            None => (self.insert_topology(mask, &entry.topology_type), true),
        };

        // First matching group in creation order wins.
        let tolerance = self.config.tolerance;
        let existing = self.topologies[topology]
            .hole_groups
            .iter()
            .copied()
            .find(|&g| same_shape(&shape, &self.hole_groups[g].shape, tolerance));

        let (group, created_group) = match existing {
            Some(group) => (group, false),
            None => (
                self.insert_hole_group(topology, shape, depth, entry, part_name),
                true,
            ),
        };

        let mut outcome = HoleGroupOutcome {
            topology,
            group,
            created_topology,
            created_group,
            created_holes: 0,
            attached_jobs: 0,
            duplicate_jobs: 0,
            far_face_merges: 0,
        };

        for point in points {
            let resolved = if created_group {
                self.hole_at(group, point).map(HoleMatch::Coincident)
            } else {
                self.resolve_hole(group, point, job.home_number)
            };

            match resolved {
                Some(found) => {
                    if matches!(found, HoleMatch::FarFace(_)) {
                        outcome.far_face_merges += 1;
                    }
                    if self.attach_job(found.hole(), job)? {
                        outcome.attached_jobs += 1;
                    } else {
                        outcome.duplicate_jobs += 1;
                    }
                }
                None => {
                    let hole = self.insert_hole(group, point)?;
                    self.attach_job(hole, job)?;
                    outcome.created_holes += 1;
                }
            }
        }

        Ok(outcome)
    }

    /// Appends `job` to a hole unless an identical job (same depth, type and
    /// tool) is already there. Returns whether the job was appended.
    pub fn attach_job(&mut self, hole: HoleKey, job: &Job) -> Result<bool> {
        let data = self
            .holes
            .get_mut(hole)
            .ok_or(Error::NotFound(CatalogKey::Hole(hole)))?;

        if data.jobs.iter().any(|existing| existing.is_duplicate_of(job)) {
            return Ok(false);
        }
        data.jobs.push(job.clone());
        Ok(true)
    }

    fn insert_topology(&mut self, mask: u64, name: &str) -> TopologyKey {
        let key = self.topologies.insert(Topology {
            name: topology_display_name(name),
            mask,
            hole_groups: Vec::new(),
        });
        self.masks.insert(mask, key);
        key
    }

    fn insert_hole_group(
        &mut self,
        topology: TopologyKey,
        shape: Shape,
        depth: f64,
        entry: &HoleGroupRecord,
        part_name: &str,
    ) -> HoleGroupKey {
        let key = self.hole_groups.insert(HoleGroup {
            topology,
            diameter: shape.nominal_diameter(),
            shape,
            part_name: part_name.to_string(),
            depth,
            thread: ThreadSpec {
                depth: entry.thread_depth.unwrap_or_default(),
                diameter: entry.thread_diameter.unwrap_or_default(),
                pitch: entry.thread_pitch.unwrap_or_default(),
            },
            by_coordinate: Default::default(),
            order: Vec::new(),
        });
        self.topologies[topology].hole_groups.push(key);
        key
    }

    fn insert_hole(&mut self, group: HoleGroupKey, point: &Point3<f64>) -> Result<HoleKey> {
        if !self.hole_groups.contains_key(group) {
            return Err(Error::NotFound(CatalogKey::HoleGroup(group)));
        }

        let precision = self.config.precision;
        let key = self.holes.insert(Hole {
            group,
            coordinate: round_point(point, precision),
            jobs: Vec::new(),
            annotations: HoleAnnotations::default(),
        });

        let data = &mut self.hole_groups[group];
        data.by_coordinate
            .insert(GridPoint::from_point(point, precision), key);
        data.order.push(key);
        Ok(key)
    }
}
