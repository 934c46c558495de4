//! The three organ models: brain, heart, lungs.
//!
//! Structurally identical subsystems built from the shared blocks:
//! geometry is synthesized once at construction (fail-fast), parts are
//! registered with fixed topology, and `advance` drives all per-frame
//! motion from the host's clock. Organs never share mutable state; each
//! reads only its own registry, its pose flag and the elapsed clock.

mod brain;
mod heart;
mod lungs;

pub use brain::Brain;
pub use heart::Heart;
pub use lungs::Lungs;

use crate::animation::PoseMode;
use crate::scene::{PartRegistry, Transform};

/// Which organ a model represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrganKind {
    /// The brain model.
    Brain,
    /// The heart model.
    Heart,
    /// The lungs model.
    Lungs,
}

impl std::fmt::Display for OrganKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Brain => "brain",
            Self::Heart => "heart",
            Self::Lungs => "lungs",
        })
    }
}

/// Common host-facing surface of an organ model.
///
/// The host render loop calls [`advance`](Self::advance) exactly once
/// per displayed frame, then reads the registry and group transform to
/// rasterize. Nothing here blocks, suspends or spawns work.
pub trait Organ {
    /// Which organ this is.
    fn kind(&self) -> OrganKind;

    /// Current pose mode.
    fn pose(&self) -> PoseMode;

    /// Flip the pose. Idempotent; may arrive on any frame boundary.
    fn set_pose(&mut self, mode: PoseMode);

    /// Advance one frame. `elapsed` is seconds since the host clock
    /// started, `delta` seconds since the previous frame. Mutates part
    /// transforms in place; if any required part is missing the whole
    /// call no-ops (skip, not failure).
    fn advance(&mut self, elapsed: f32, delta: f32);

    /// The organ's part registry.
    fn registry(&self) -> &PartRegistry;

    /// Group-level transform applied above all parts.
    fn group_transform(&self) -> Transform;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::pose::REFERENCE_DELTA;
    use crate::options::{DetailOptions, OrganOptions};

    #[test]
    fn organs_drive_through_the_trait_object() {
        let options = OrganOptions {
            detail: DetailOptions::coarse(),
            ..OrganOptions::default()
        };
        let mut organs: Vec<Box<dyn Organ>> = vec![
            Box::new(Brain::new(&options, 7).unwrap()),
            Box::new(Heart::new(&options).unwrap()),
            Box::new(Lungs::new(&options).unwrap()),
        ];
        for organ in &mut organs {
            assert_eq!(organ.pose(), PoseMode::Resting);
            organ.set_pose(PoseMode::Active);
            for i in 0..120 {
                organ.advance(i as f32 * REFERENCE_DELTA, REFERENCE_DELTA);
            }
            assert!(!organ.registry().is_empty());
            // Two seconds of blending has visibly left the rest pose.
            assert!(organ.group_transform().position.length() > 0.1);
        }
        let kinds: Vec<String> =
            organs.iter().map(|o| o.kind().to_string()).collect();
        assert_eq!(kinds, ["brain", "heart", "lungs"]);
    }
}
