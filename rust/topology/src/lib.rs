// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Holemap Topology
//!
//! The hole catalog of a machined part.
//!
//! Holes are classified in three levels. A *topology* is a family of
//! cross-sections sharing one shape mask (a mask and its digit reversal are
//! the same family). A *hole group* is one exact cross-section within a
//! topology. A *hole* is one physical feature at a fixed part-frame
//! coordinate, carrying the ordered list of jobs that machined it.
//!
//! Entities are stored in slot maps owned by a [`Catalog`]; back-references
//! are keys, never shared ownership. The catalog only grows: entities are
//! created and merged, never removed.

pub mod catalog;
pub mod construction;
pub mod error;
pub mod identity;
pub mod keys;
pub mod query;
pub mod serialization;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::{
    Catalog, GeometricTolerance, Hole, HoleAnnotations, HoleGroup, ThreadCallout, ThreadSpec,
    Tolerance, Topology,
};
pub use construction::{reverse_mask, topology_display_name, HoleGroupOutcome};
pub use error::{Error, Result};
pub use identity::HoleMatch;
pub use keys::{CatalogKey, EntityKind, HoleGroupKey, HoleKey, TopologyKey};
pub use serialization::CatalogSnapshot;
