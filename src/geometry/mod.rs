//! One-shot procedural geometry synthesis.
//!
//! Base primitives (UV sphere, capped cylinder, bevelled profile
//! extrusion) plus parametric displacement fields that carve organic
//! surface detail into them. Everything here runs once per organ at
//! construction; the per-frame animation path never rebuilds vertex data.

mod displacement;
mod mesh;
mod primitives;
mod profile;

pub use displacement::{
    Axis, BasisTerm, DisplacementField, GrainTerm, HalfSpace, HarmonicTerm,
    SeamBand, Waveform, WeightedTerm,
};
pub use mesh::{MeshData, MeshVertex};
pub use primitives::{cylinder, quad, uv_sphere};
pub use profile::{extrude_profile, ExtrudeOptions, ProfilePath};
