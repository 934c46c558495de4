//! Particle and flow overlays rendered on top of the organ meshes.
//!
//! Two flavors: the lungs' air particles are recomputed every frame from
//! slot index and elapsed time, while the brain's neural pathways are a
//! one-shot random scatter frozen at construction.

mod airflow;
mod pathways;

pub use airflow::{AirFlow, ParticleSample};
pub use pathways::{Bundle, NeuralPathways};
