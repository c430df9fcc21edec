// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-side queries over the catalog: walking the hierarchy downwards,
//! reading job histories and rendering the job order of a hole.

use holemap_core::Job;

use crate::catalog::*;
use crate::error::{Error, Result};
use crate::keys::*;

impl Catalog {
    /// Returns the mask under which the family of `mask` is stored, if the
    /// family (in either orientation) is already known.
    pub fn canonical_mask(&self, mask: u64) -> Option<u64> {
        self.topology_for_mask(mask)
            .and_then(|key| self.topologies.get(key))
            .map(|t| t.mask)
    }

    /// Hole groups of a topology in creation order.
    pub fn hole_groups_of(&self, topology: TopologyKey) -> Result<Vec<(HoleGroupKey, &HoleGroup)>> {
        let data = self
            .topologies
            .get(topology)
            .ok_or(Error::NotFound(CatalogKey::Topology(topology)))?;

        Ok(data
            .hole_groups
            .iter()
            .filter_map(|&k| self.hole_groups.get(k).map(|g| (k, g)))
            .collect())
    }

    /// Holes of a group in creation order.
    pub fn holes_in_group(&self, group: HoleGroupKey) -> Result<Vec<(HoleKey, &Hole)>> {
        let data = self
            .hole_groups
            .get(group)
            .ok_or(Error::NotFound(CatalogKey::HoleGroup(group)))?;

        Ok(data
            .order
            .iter()
            .filter_map(|&k| self.holes.get(k).map(|h| (k, h)))
            .collect())
    }

    /// Jobs applied to a hole, in processing order.
    pub fn jobs_of(&self, hole: HoleKey) -> Result<&[Job]> {
        self.holes
            .get(hole)
            .map(|h| h.jobs.as_slice())
            .ok_or(Error::NotFound(CatalogKey::Hole(hole)))
    }

    /// The `index`-th job applied to a hole.
    pub fn job(&self, hole: HoleKey, index: usize) -> Option<&Job> {
        self.holes.get(hole)?.jobs.get(index)
    }

    /// Renders the machining history of a hole as
    /// `"<job type> - <tool type>"` entries joined by `" | "`.
    pub fn job_order(&self, hole: HoleKey) -> Result<String> {
        let entries: Vec<String> = self
            .jobs_of(hole)?
            .iter()
            .map(|job| format!("{} - {}", job.job_type, job.tool.tool_type))
            .collect();
        Ok(entries.join(" | "))
    }

    /// Walks up from a hole to its topology.
    pub fn topology_of(&self, hole: HoleKey) -> Option<TopologyKey> {
        let group = self.holes.get(hole)?.group;
        self.hole_groups.get(group).map(|g| g.topology)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn canonical_mask_follows_first_seen_orientation() {
        let mut catalog = Catalog::default();
        let job = drill_job("Drill", 1, &[], 10.0);
        assert_eq!(catalog.canonical_mask(21), None);

        catalog
            .add_hole_group(&job, &[p(0.0, 0.0, 0.0)], &entry(21, simple_hole(4.0, 10.0), 10.0), "part")
            .unwrap();

        assert_eq!(catalog.canonical_mask(21), Some(21));
        assert_eq!(catalog.canonical_mask(12), Some(21));
        assert_eq!(catalog.canonical_mask(13), None);
    }

    #[test]
    fn hierarchy_walk() {
        let mut catalog = Catalog::default();
        let job = drill_job("Drill", 1, &[], 10.0);
        let outcome = catalog
            .add_hole_group(
                &job,
                &[p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0), p(20.0, 0.0, 0.0)],
                &entry(21, simple_hole(4.0, 10.0), 10.0),
                "part",
            )
            .unwrap();

        let groups = catalog.hole_groups_of(outcome.topology).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, outcome.group);

        let holes = catalog.holes_in_group(outcome.group).unwrap();
        let xs: Vec<f64> = holes.iter().map(|(_, h)| h.coordinate.x).collect();
        assert_eq!(xs, vec![0.0, 10.0, 20.0]);
        assert_eq!(catalog.topology_of(holes[2].0), Some(outcome.topology));
    }

    #[test]
    fn job_order_string() {
        let mut catalog = Catalog::default();
        let entry = entry(21, simple_hole(4.0, 10.0), 10.0);
        let drill = drill_job("Drill", 1, &[], 10.0);
        let mut tap = drill_job("Tap", 1, &[], 8.0);
        tap.job_type = holemap_core::JobType::ThreadMilling;
        tap.tool.tool_type = "TT_THREAD_MILL".to_string();

        let outcome = catalog.add_hole_group(&drill, &[p(0.0, 0.0, 0.0)], &entry, "part").unwrap();
        catalog.add_hole_group(&tap, &[p(0.0, 0.0, 0.0)], &entry, "part").unwrap();

        let hole = catalog.hole_group(outcome.group).unwrap().holes()[0];
        assert_eq!(
            catalog.job_order(hole).unwrap(),
            "NC_DRILL_OLD - TT_DRILL | NC_THREAD - TT_THREAD_MILL"
        );
        assert_eq!(catalog.job(hole, 1).map(|j| j.name.as_str()), Some("Tap"));
        assert!(catalog.job(hole, 2).is_none());
    }

    #[test]
    fn missing_entities_are_reported() {
        let catalog = Catalog::default();
        assert!(matches!(
            catalog.jobs_of(HoleKey::default()),
            Err(Error::NotFound(CatalogKey::Hole(_)))
        ));
        assert!(catalog.holes_in_group(HoleGroupKey::default()).is_err());
        assert!(catalog.hole_groups_of(TopologyKey::default()).is_err());
        assert!(catalog.topology_of(HoleKey::default()).is_none());
    }
}
