//! Per-frame animation: physiological signals and pose blending.
//!
//! Everything here is a pure function of the host-supplied elapsed clock
//! (plus the exponentially smoothed pose-blend state), so behavior is
//! reproducible from timestamps alone and a dropped frame recovers on
//! the next call.

pub mod pose;
pub mod signal;

pub use pose::{GroupBlend, PoseMode, PoseTarget};
