//! Pose state and exponential pose blending.
//!
//! The pose mode is a two-state external signal; the target transform is
//! recomputed from it every frame (never persisted), and the group
//! transform eases toward it with exponential smoothing. Flips are
//! idempotent and may land on any frame boundary — the smoothing absorbs
//! the discontinuity without any reset.

use glam::Vec3;

use crate::scene::Transform;

/// Frame delta the smoothing factors are authored against (60 fps).
pub const REFERENCE_DELTA: f32 = 1.0 / 60.0;

/// Externally supplied organ pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoseMode {
    /// Overview pose: the organ idles at its mounted position.
    #[default]
    Resting,
    /// Inspection pose: enlarged and offset for a close look.
    Active,
}

/// Target transform derived from the pose mode.
///
/// Two fixed constants per organ, selected by mode each frame; there are
/// no intermediate targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseTarget {
    /// Target group scale.
    pub scale: Vec3,
    /// Target group position.
    pub position: Vec3,
    /// Target group rotation (XYZ Euler, radians).
    pub rotation: Vec3,
}

impl PoseTarget {
    /// The resting default: identity transform.
    pub const RESTING: Self = Self {
        scale: Vec3::ONE,
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
    };

    /// Target with the given scale/position and no rotation.
    #[must_use]
    pub const fn new(scale: Vec3, position: Vec3) -> Self {
        Self {
            scale,
            position,
            rotation: Vec3::ZERO,
        }
    }

    /// Same target with a rotation.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Rescale a per-reference-frame smoothing factor to the actual delta.
///
/// A constant per-frame lerp factor couples animation speed to frame
/// rate; `1 - (1-f)^(delta/reference)` keeps the convergence rate
/// identical at any frame rate while degenerating to exactly `f` at the
/// reference delta.
#[inline]
#[must_use]
pub fn smoothing_alpha(factor: f32, delta: f32) -> f32 {
    let factor = factor.clamp(0.0, 1.0);
    if factor >= 1.0 {
        return 1.0;
    }
    1.0 - (1.0 - factor).powf(delta / REFERENCE_DELTA)
}

/// Exponentially ease `current` toward `target` for one frame.
#[inline]
#[must_use]
pub fn blend_vec3(
    current: Vec3,
    target: Vec3,
    factor: f32,
    delta: f32,
) -> Vec3 {
    current.lerp(target, smoothing_alpha(factor, delta))
}

/// Group-level pose blend state for one organ.
///
/// Scale and position always ease toward the pose target; rotation is
/// held separately so drivers can either blend it or snap it (the
/// brain's inspection view sets rotation directly).
#[derive(Debug, Clone, Copy)]
pub struct GroupBlend {
    current: Transform,
    factor: f32,
}

impl GroupBlend {
    /// Blend starting at identity with a per-reference-frame factor.
    #[must_use]
    pub fn new(factor: f32) -> Self {
        Self {
            current: Transform::IDENTITY,
            factor,
        }
    }

    /// Ease scale and position toward `target` for one frame and return
    /// the updated group transform. Rotation is untouched; call
    /// [`set_rotation`](Self::set_rotation) or
    /// [`blend_rotation`](Self::blend_rotation) separately.
    pub fn step(&mut self, target: &PoseTarget, delta: f32) -> Transform {
        let alpha = smoothing_alpha(self.factor, delta);
        self.current.scale = self.current.scale.lerp(target.scale, alpha);
        self.current.position =
            self.current.position.lerp(target.position, alpha);
        self.current
    }

    /// Snap the group rotation (orientation changes that must not lag).
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.current.rotation = rotation;
    }

    /// Ease the group rotation toward a target.
    pub fn blend_rotation(&mut self, rotation: Vec3, delta: f32) {
        let alpha = smoothing_alpha(self.factor, delta);
        self.current.rotation = self.current.rotation.lerp(rotation, alpha);
    }

    /// Current group transform.
    #[must_use]
    pub fn current(&self) -> Transform {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_matches_factor_at_reference_delta() {
        let a = smoothing_alpha(0.1, REFERENCE_DELTA);
        assert!((a - 0.1).abs() < 1e-6);
    }

    #[test]
    fn alpha_is_frame_rate_independent() {
        // Two 30fps-sized steps must cover the same ground as four
        // 60fps-sized steps.
        let fine = smoothing_alpha(0.1, REFERENCE_DELTA);
        let coarse = smoothing_alpha(0.1, REFERENCE_DELTA * 2.0);
        let two_fine = 1.0 - (1.0 - fine) * (1.0 - fine);
        assert!((coarse - two_fine).abs() < 1e-6);
    }

    #[test]
    fn alpha_handles_degenerate_inputs() {
        assert_eq!(smoothing_alpha(0.1, 0.0), 0.0);
        assert_eq!(smoothing_alpha(1.0, REFERENCE_DELTA), 1.0);
        assert_eq!(smoothing_alpha(-0.5, REFERENCE_DELTA), 0.0);
    }

    #[test]
    fn step_converges_monotonically() {
        let target = PoseTarget::new(
            Vec3::splat(1.2),
            Vec3::new(0.0, 0.5, 0.0),
        );
        let mut blend = GroupBlend::new(0.1);
        let mut last_distance = f32::INFINITY;
        for _ in 0..400 {
            let t = blend.step(&target, REFERENCE_DELTA);
            let distance = (t.position - target.position).length()
                + (t.scale - target.scale).length();
            assert!(
                distance <= last_distance + 1e-7,
                "distance increased: {distance} > {last_distance}"
            );
            last_distance = distance;
        }
        assert!(
            last_distance < 1e-4,
            "blend failed to converge: {last_distance}"
        );
    }

    #[test]
    fn single_step_is_bounded_by_factor() {
        let target = PoseTarget::new(Vec3::ONE, Vec3::new(0.0, 0.5, 0.0));
        let mut blend = GroupBlend::new(0.1);
        let t = blend.step(&target, REFERENCE_DELTA);
        // One step covers at most 10% of the distance — no snapping.
        let covered = t.position.y / target.position.y;
        assert!(
            covered <= 0.1 + 1e-6,
            "single step covered {covered} of the distance"
        );
        assert!(covered > 0.0);
    }

    #[test]
    fn pose_flip_mid_blend_needs_no_reset() {
        let active = PoseTarget::new(
            Vec3::splat(1.2),
            Vec3::new(0.0, 0.5, 0.0),
        );
        let mut blend = GroupBlend::new(0.1);
        for _ in 0..30 {
            let _ = blend.step(&active, REFERENCE_DELTA);
        }
        // Flip back and keep stepping: must converge to resting.
        for _ in 0..600 {
            let _ = blend.step(&PoseTarget::RESTING, REFERENCE_DELTA);
        }
        let t = blend.current();
        assert!(t.position.length() < 1e-4);
        assert!((t.scale - Vec3::ONE).length() < 1e-4);
    }
}
