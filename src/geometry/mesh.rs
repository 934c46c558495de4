//! Owned triangle mesh storage shared by all generators.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rustc_hash::FxHashMap;

/// Interleaved vertex layout handed to the host renderer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Unit surface normal.
    pub normal: [f32; 3],
}

/// An owned, exclusively-held triangle mesh.
///
/// One contiguous position/normal buffer indexed by vertex id, built once
/// at organ construction. After construction (and the normal recompute
/// that follows displacement) the buffers are read-only; per-frame motion
/// is transform-only by design.
#[derive(Debug, Clone)]
pub struct MeshData {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
}

impl MeshData {
    /// Build a mesh from raw buffers. Normals must be unit length and
    /// match `positions` one-to-one.
    pub(crate) fn from_parts(
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        indices: Vec<u32>,
    ) -> Self {
        debug_assert_eq!(positions.len(), normals.len());
        debug_assert_eq!(indices.len() % 3, 0);
        Self {
            positions,
            normals,
            indices,
        }
    }

    /// Vertex positions, indexed by the triangle list.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Per-vertex unit normals.
    #[must_use]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Triangle index list (three indices per triangle).
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Mutable position access for the displacement pass.
    pub(crate) fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }

    /// Recompute per-vertex normals from the current positions.
    ///
    /// Area-weighted face normal accumulation: larger triangles pull the
    /// shared vertex normal harder, which keeps shading smooth across the
    /// non-uniform triangles a displacement pass produces. Vertices that
    /// share an exact position (the sphere's seam column and pole fans)
    /// are welded for the accumulation, so every copy sees the full
    /// triangle fan around that position rather than only its own, often
    /// degenerate, slice of it. A vertex whose welded fan still sums to
    /// zero keeps its previous normal.
    pub(crate) fn recompute_normals(&mut self) {
        // Duplicated vertices are exact copies, so welding can key on the
        // raw position bits.
        let mut slots: FxHashMap<[u32; 3], usize> = FxHashMap::default();
        let mut slot_of = Vec::with_capacity(self.positions.len());
        for (i, p) in self.positions.iter().enumerate() {
            let key = [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()];
            slot_of.push(*slots.entry(key).or_insert(i));
        }

        let mut accum = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let (i0, i1, i2) =
                (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let p0 = self.positions[i0];
            let p1 = self.positions[i1];
            let p2 = self.positions[i2];
            // Cross product magnitude is twice the triangle area, so this
            // sum is area-weighted without an explicit normalize per face.
            let face = (p1 - p0).cross(p2 - p0);
            accum[slot_of[i0]] += face;
            accum[slot_of[i1]] += face;
            accum[slot_of[i2]] += face;
        }
        for (i, n) in self.normals.iter_mut().enumerate() {
            let welded = accum[slot_of[i]];
            if welded.length_squared() > 0.0 {
                *n = welded.normalize();
            }
        }
    }

    /// Interleaved vertex array for host upload.
    #[must_use]
    pub fn vertices(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .map(|(p, n)| MeshVertex {
                position: (*p).into(),
                normal: (*n).into(),
            })
            .collect()
    }

    /// Interleaved vertex bytes for host upload.
    #[must_use]
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.vertices()).to_vec()
    }

    /// Index bytes for host upload.
    #[must_use]
    pub fn index_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.indices).to_vec()
    }
}
