// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON snapshot of a catalog.
//!
//! The snapshot is the read contract for downstream consumers (drawing
//! enrichment, reporting, persistence). Slot map keys are replaced by
//! sequential ids in creation order.

use rustc_hash::FxHashMap;
use serde::Serialize;

use holemap_core::Job;
use holemap_geometry::Shape;

use crate::catalog::*;
use crate::error::{Error, Result};

/// Serializable representation of the whole catalog.
#[derive(Debug, Serialize)]
pub struct CatalogSnapshot<'a> {
    pub topologies: Vec<TopologySnapshot<'a>>,
    pub hole_groups: Vec<HoleGroupSnapshot<'a>>,
    pub holes: Vec<HoleSnapshot<'a>>,
}

#[derive(Debug, Serialize)]
pub struct TopologySnapshot<'a> {
    pub id: usize,
    pub name: &'a str,
    pub mask: u64,
    pub hole_groups: Vec<usize>,
}

#[derive(Debug, Serialize)]
pub struct HoleGroupSnapshot<'a> {
    pub id: usize,
    pub topology: usize,
    pub part_name: &'a str,
    pub diameter: f64,
    pub depth: f64,
    pub thread: ThreadSpec,
    pub shape: &'a Shape,
    pub holes: Vec<usize>,
}

#[derive(Debug, Serialize)]
pub struct HoleSnapshot<'a> {
    pub id: usize,
    pub group: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub job_order: String,
    pub jobs: &'a [Job],
    #[serde(skip_serializing_if = "no_annotations")]
    pub annotations: &'a HoleAnnotations,
}

fn no_annotations(annotations: &&HoleAnnotations) -> bool {
    annotations.is_empty()
}

impl Catalog {
    /// Serializes the catalog to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        let snapshot = self.to_snapshot();
        serde_json::to_string_pretty(&snapshot).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Creates a serializable snapshot of the catalog.
    pub fn to_snapshot(&self) -> CatalogSnapshot<'_> {
        // Build key → sequential ID mappings
        let topology_ids: FxHashMap<_, _> = self
            .topologies
            .keys()
            .enumerate()
            .map(|(i, k)| (k, i))
            .collect();
        let group_ids: FxHashMap<_, _> = self
            .hole_groups
            .keys()
            .enumerate()
            .map(|(i, k)| (k, i))
            .collect();
        let hole_ids: FxHashMap<_, _> = self
            .holes
            .keys()
            .enumerate()
            .map(|(i, k)| (k, i))
            .collect();

        let topologies = self
            .topologies
            .iter()
            .enumerate()
            .map(|(i, (_, t))| TopologySnapshot {
                id: i,
                name: &t.name,
                mask: t.mask,
                hole_groups: t
                    .hole_groups
                    .iter()
                    .filter_map(|k| group_ids.get(k).copied())
                    .collect(),
            })
            .collect();

        let hole_groups = self
            .hole_groups
            .iter()
            .enumerate()
            .map(|(i, (_, g))| HoleGroupSnapshot {
                id: i,
                topology: topology_ids[&g.topology],
                part_name: &g.part_name,
                diameter: g.diameter,
                depth: g.depth,
                thread: g.thread,
                shape: &g.shape,
                holes: g
                    .order
                    .iter()
                    .filter_map(|k| hole_ids.get(k).copied())
                    .collect(),
            })
            .collect();

        let holes = self
            .holes
            .iter()
            .enumerate()
            .map(|(i, (k, h))| HoleSnapshot {
                id: i,
                group: group_ids[&h.group],
                x: h.coordinate.x,
                y: h.coordinate.y,
                z: h.coordinate.z,
                job_order: self.job_order(k).unwrap_or_default(),
                jobs: &h.jobs,
                annotations: &h.annotations,
            })
            .collect();

        CatalogSnapshot {
            topologies,
            hole_groups,
            holes,
        }
    }
}
