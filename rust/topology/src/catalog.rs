// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based storage for the hole catalog.
//!
//! The [`Catalog`] is the caller-owned context for one processing run (one
//! part). It owns every topology, hole group and hole in slot maps with
//! stable keys:
//!
//! ```text
//! Topology ──owns──▶ HoleGroup ──owns──▶ Hole ──owns──▶ [Job]
//!     ▲                  │  ▲               │
//!     └───── key ────────┘  └───── key ─────┘
//! ```
//!
//! Topologies are indexed by shape mask. A mask and its digit reversal name
//! the same family, and only one of the two is ever stored.

use nalgebra::Point3;
use rustc_hash::FxHashMap;
use serde::Serialize;
use slotmap::SlotMap;

use holemap_core::{CatalogConfig, Job};
use holemap_geometry::{GridPoint, Shape};

use crate::keys::*;

/// A family of holes sharing one cross-section mask.
#[derive(Debug, Clone)]
pub struct Topology {
    /// Display name derived from the exported topology type.
    pub name: String,
    /// Mask under which the family was first seen.
    pub mask: u64,
    /// Hole groups in creation order.
    pub hole_groups: Vec<HoleGroupKey>,
}

/// Thread dimensions of a hole group as recognized from the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ThreadSpec {
    pub depth: f64,
    pub diameter: f64,
    pub pitch: f64,
}

/// All holes sharing one exact cross-section within a topology.
///
/// Diameter, depth and thread data are fixed when the group is created.
#[derive(Debug, Clone)]
pub struct HoleGroup {
    pub topology: TopologyKey,
    pub shape: Shape,
    pub part_name: String,
    pub diameter: f64,
    pub depth: f64,
    pub thread: ThreadSpec,
    /// Coordinate index into `order`.
    pub(crate) by_coordinate: FxHashMap<GridPoint, HoleKey>,
    /// Holes in creation order.
    pub(crate) order: Vec<HoleKey>,
}

impl HoleGroup {
    /// Holes in creation order.
    pub fn holes(&self) -> &[HoleKey] {
        &self.order
    }

    pub fn hole_count(&self) -> usize {
        self.order.len()
    }
}

/// A tolerance band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tolerance {
    pub plus: f64,
    pub minus: f64,
}

/// Thread callout read from a drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadCallout {
    pub nominal_diameter: f64,
    pub pitch: f64,
    pub depth: f64,
    pub class_grade: String,
}

/// Geometric tolerance read from a drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometricTolerance {
    pub kind: String,
    pub value: Option<f64>,
}

/// Drawing-sourced attributes. Filled by the enrichment pass, never by the
/// catalog itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HoleAnnotations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_finish: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diameter_tolerance: Option<Tolerance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth_tolerance: Option<Tolerance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread: Option<ThreadCallout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gdandt: Option<GeometricTolerance>,
}

impl HoleAnnotations {
    pub fn is_empty(&self) -> bool {
        *self == HoleAnnotations::default()
    }
}

/// One physical hole at a fixed part-frame coordinate.
#[derive(Debug, Clone)]
pub struct Hole {
    pub group: HoleGroupKey,
    pub coordinate: Point3<f64>,
    /// Jobs in processing order.
    pub jobs: Vec<Job>,
    pub annotations: HoleAnnotations,
}

/// The catalog of one part: every topology, hole group and hole discovered
/// from its jobs.
///
/// # Example
///
/// ```
/// use holemap_topology::Catalog;
///
/// let catalog = Catalog::default();
/// assert_eq!(catalog.topology_count(), 0);
/// assert_eq!(catalog.hole_count(), 0);
/// ```
#[derive(Debug)]
pub struct Catalog {
    pub(crate) config: CatalogConfig,

    // Entity storage
    pub(crate) topologies: SlotMap<TopologyKey, Topology>,
    pub(crate) hole_groups: SlotMap<HoleGroupKey, HoleGroup>,
    pub(crate) holes: SlotMap<HoleKey, Hole>,

    // Mask index: exactly one of a mask and its reversal is present
    pub(crate) masks: FxHashMap<u64, TopologyKey>,
}

impl Catalog {
    /// Creates an empty catalog using `config` for every comparison.
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            topologies: SlotMap::with_key(),
            hole_groups: SlotMap::with_key(),
            holes: SlotMap::with_key(),
            masks: FxHashMap::default(),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    // --- Topology operations ---

    pub fn topology(&self, key: TopologyKey) -> Option<&Topology> {
        self.topologies.get(key)
    }

    /// Iterates topologies in creation order.
    pub fn topologies(&self) -> impl Iterator<Item = (TopologyKey, &Topology)> {
        self.topologies.iter()
    }

    pub fn topology_count(&self) -> usize {
        self.topologies.len()
    }

    // --- Hole group operations ---

    pub fn hole_group(&self, key: HoleGroupKey) -> Option<&HoleGroup> {
        self.hole_groups.get(key)
    }

    pub fn hole_group_count(&self) -> usize {
        self.hole_groups.len()
    }

    // --- Hole operations ---

    pub fn hole(&self, key: HoleKey) -> Option<&Hole> {
        self.holes.get(key)
    }

    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }

    /// Returns the drawing annotations of a hole for the enrichment pass.
    /// Coordinates and jobs stay read-only.
    pub fn annotations_mut(&mut self, key: HoleKey) -> Option<&mut HoleAnnotations> {
        self.holes.get_mut(key).map(|h| &mut h.annotations)
    }

    /// Total number of jobs attached across all holes.
    pub fn job_count(&self) -> usize {
        self.holes.values().map(|h| h.jobs.len()).sum()
    }

    /// Returns `true` if the key references a live entity.
    pub fn contains(&self, key: CatalogKey) -> bool {
        match key {
            CatalogKey::Topology(k) => self.topologies.contains_key(k),
            CatalogKey::HoleGroup(k) => self.hole_groups.contains_key(k),
            CatalogKey::Hole(k) => self.holes.contains_key(k),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_catalog_is_empty() {
        let catalog = Catalog::new(CatalogConfig::default().with_tolerance(0.111));
        assert_eq!(catalog.topology_count(), 0);
        assert_eq!(catalog.hole_group_count(), 0);
        assert_eq!(catalog.hole_count(), 0);
        assert_eq!(catalog.job_count(), 0);
        assert_eq!(catalog.config().tolerance, 0.111);
    }

    #[test]
    fn null_keys_are_not_contained() {
        let catalog = Catalog::default();
        assert!(!catalog.contains(CatalogKey::Hole(HoleKey::default())));
        assert!(!catalog.contains(TopologyKey::default().into()));
        assert!(catalog.hole(HoleKey::default()).is_none());
    }

    #[test]
    fn empty_annotations() {
        let mut annotations = HoleAnnotations::default();
        assert!(annotations.is_empty());
        annotations.material = Some("AL 6061".to_string());
        assert!(!annotations.is_empty());
    }
}
