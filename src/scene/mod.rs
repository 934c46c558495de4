//! Part registry: flat, fixed-topology storage for an organ's sub-meshes.
//!
//! Each organ owns one [`PartRegistry`] holding its named parts and the
//! geometry arena they reference. The animation driver is the only
//! writer of part transforms, and it writes through the [`TransformSink`]
//! trait so a host can substitute its own scene-graph sink.

mod part;

use rustc_hash::FxHashMap;

pub use part::{GeometryId, Material, Part, PartId, Transform};

use crate::geometry::MeshData;

/// Receiver for per-frame transform updates.
///
/// [`PartRegistry`] implements this for in-place mutation; rendering
/// backends can implement it to mirror updates straight into their own
/// node hierarchy.
pub trait TransformSink {
    /// Set the local transform of a part. Unknown part ids are ignored.
    fn set_transform(&mut self, part: PartId, transform: Transform);
}

/// Flat storage for an organ's parts and geometry arena.
///
/// Topology is fixed after construction: there is no removal API, and
/// insertion happens only while the organ is being built. Iteration
/// preserves insertion order; lookup goes through an `FxHashMap` index.
#[derive(Debug, Default)]
pub struct PartRegistry {
    parts: Vec<Part>,
    index: FxHashMap<PartId, usize>,
    geometries: Vec<MeshData>,
}

impl PartRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move a mesh into the arena, returning its handle.
    pub fn add_geometry(&mut self, mesh: MeshData) -> GeometryId {
        self.geometries.push(mesh);
        GeometryId(self.geometries.len() - 1)
    }

    /// Read a mesh from the arena.
    #[must_use]
    pub fn geometry(&self, id: GeometryId) -> Option<&MeshData> {
        self.geometries.get(id.0)
    }

    /// All meshes in the arena, in insertion order.
    #[must_use]
    pub fn geometries(&self) -> &[MeshData] {
        &self.geometries
    }

    /// Register a part. A duplicate id replaces the previous part and is
    /// logged; organs construct each part exactly once.
    pub fn insert(&mut self, part: Part) {
        if let Some(&i) = self.index.get(&part.id) {
            log::warn!("part {} registered twice, replacing", part.id);
            self.parts[i] = part;
        } else {
            let _ = self.index.insert(part.id, self.parts.len());
            self.parts.push(part);
        }
    }

    /// Read access to a part.
    #[must_use]
    pub fn part(&self, id: PartId) -> Option<&Part> {
        self.index.get(&id).map(|&i| &self.parts[i])
    }

    /// A part's current transform.
    #[must_use]
    pub fn transform(&self, id: PartId) -> Option<Transform> {
        self.part(id).map(|p| p.transform)
    }

    /// Whether a part is registered.
    #[must_use]
    pub fn contains(&self, id: PartId) -> bool {
        self.index.contains_key(&id)
    }

    /// Whether every listed part is registered. Drivers use this as the
    /// whole-frame guard: a missing part skips the entire advance rather
    /// than leaving a partially updated pose.
    #[must_use]
    pub fn has_all(&self, ids: &[PartId]) -> bool {
        ids.iter().all(|id| self.contains(*id))
    }

    /// All parts in insertion order.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Number of registered parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl TransformSink for PartRegistry {
    fn set_transform(&mut self, part: PartId, transform: Transform) {
        if let Some(&i) = self.index.get(&part) {
            self.parts[i].transform = transform;
        } else {
            log::trace!("transform for unknown part {part} dropped");
        }
    }
}
