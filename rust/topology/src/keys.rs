// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Catalog key types for arena-based storage.
//!
//! Topologies, hole groups and holes live in slot maps owned by the
//! [`Catalog`](crate::Catalog). Back-references (hole → group → topology) are
//! stored as these keys, so ownership stays a strict tree.

use slotmap::new_key_type;

new_key_type! {
    /// Key for a topology (cross-section family).
    pub struct TopologyKey;

    /// Key for a hole group (one exact cross-section within a topology).
    pub struct HoleGroupKey;

    /// Key for a hole (one physical feature).
    pub struct HoleKey;
}

/// A key that can reference any catalog entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKey {
    Topology(TopologyKey),
    HoleGroup(HoleGroupKey),
    Hole(HoleKey),
}

impl CatalogKey {
    /// Returns the entity kind of this key.
    pub fn kind(&self) -> EntityKind {
        match self {
            CatalogKey::Topology(_) => EntityKind::Topology,
            CatalogKey::HoleGroup(_) => EntityKind::HoleGroup,
            CatalogKey::Hole(_) => EntityKind::Hole,
        }
    }
}

/// Discriminant for catalog entity kinds, ordered from the top of the
/// hierarchy down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Topology = 0,
    HoleGroup = 1,
    Hole = 2,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Topology => "Topology",
            EntityKind::HoleGroup => "HoleGroup",
            EntityKind::Hole => "Hole",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TopologyKey> for CatalogKey {
    fn from(k: TopologyKey) -> Self {
        CatalogKey::Topology(k)
    }
}

impl From<HoleGroupKey> for CatalogKey {
    fn from(k: HoleGroupKey) -> Self {
        CatalogKey::HoleGroup(k)
    }
}

impl From<HoleKey> for CatalogKey {
    fn from(k: HoleKey) -> Self {
        CatalogKey::Hole(k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_kind_names() {
        assert_eq!(EntityKind::Topology.as_str(), "Topology");
        assert_eq!(EntityKind::HoleGroup.as_str(), "HoleGroup");
        assert_eq!(EntityKind::Hole.to_string(), "Hole");
    }

    #[test]
    fn entity_kind_ordering() {
        assert!(EntityKind::Topology < EntityKind::HoleGroup);
        assert!(EntityKind::HoleGroup < EntityKind::Hole);
    }

    #[test]
    fn default_keys_are_null() {
        use slotmap::Key;
        let key = CatalogKey::from(HoleKey::default());
        assert_eq!(key.kind(), EntityKind::Hole);
        assert!(HoleKey::default().is_null());
    }
}
