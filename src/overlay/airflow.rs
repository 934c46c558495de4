//! Air particles rising through the trachea on the breathing cycle.

use glam::Vec3;

/// One ephemeral particle sample.
///
/// Carries no identity beyond its slot index: every field is recomputed
/// each frame as a pure function of `(index, elapsed)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSample {
    /// World-space position within the organ group.
    pub position: Vec3,
    /// Render opacity, always within [0, 1].
    pub opacity: f32,
}

/// Fixed-cardinality air particle buffer for the lungs.
///
/// Particles sit on a small ring at the base of the trachea and ride a
/// per-index phase of the breathing cycle: a vertical rise and fall,
/// radial pulsing, and an opacity swell that peaks mid-breath.
#[derive(Debug, Clone)]
pub struct AirFlow {
    /// Ring anchor per slot, fixed at construction.
    anchors: Vec<Vec3>,
    particles: Vec<ParticleSample>,
}

/// Base opacity scale; the phase signal modulates within [0, this].
const BASE_OPACITY: f32 = 0.3;
/// Phase advance per slot index.
const INDEX_PHASE: f32 = 0.1;
/// Breathing-cycle rate shared with the lobe animation.
const CYCLE_RATE: f32 = 0.5;

impl AirFlow {
    /// Build `count` particles anchored on a ring below the lungs.
    #[must_use]
    pub fn new(count: usize) -> Self {
        let anchors: Vec<Vec3> = (0..count)
            .map(|i| {
                let a = i as f32 * 0.4;
                Vec3::new(a.cos() * 0.2, -0.8, a.sin() * 0.2)
            })
            .collect();
        let particles = anchors
            .iter()
            .map(|anchor| ParticleSample {
                position: *anchor,
                opacity: BASE_OPACITY,
            })
            .collect();
        Self { anchors, particles }
    }

    /// Recompute every particle for the current frame.
    ///
    /// Pure in `(index, elapsed)`: a skipped frame leaves no residue
    /// because nothing accumulates across calls.
    pub fn update(&mut self, elapsed: f32) {
        for (i, (anchor, particle)) in self
            .anchors
            .iter()
            .zip(self.particles.iter_mut())
            .enumerate()
        {
            let phase = elapsed * CYCLE_RATE + i as f32 * INDEX_PHASE;
            let swell = phase.sin();
            let radial = 1.0 + swell * 0.2;
            particle.position = Vec3::new(
                anchor.x * radial,
                -0.8 + swell * 0.6,
                anchor.z * radial,
            );
            // Raised sine keeps the product non-negative and ≤ BASE.
            particle.opacity = BASE_OPACITY * (1.0 + swell) / 2.0;
        }
    }

    /// Current samples, one per slot.
    #[must_use]
    pub fn samples(&self) -> &[ParticleSample] {
        &self.particles
    }

    /// Number of particle slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the buffer has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_always_in_unit_range() {
        let mut flow = AirFlow::new(50);
        for step in 0..500 {
            flow.update(step as f32 * 0.137);
            for p in flow.samples() {
                assert!(
                    (0.0..=1.0).contains(&p.opacity),
                    "opacity {} out of range",
                    p.opacity
                );
            }
        }
    }

    #[test]
    fn update_is_pure_in_elapsed_time() {
        let mut a = AirFlow::new(50);
        let mut b = AirFlow::new(50);
        // Different call histories, same final timestamp.
        a.update(1.0);
        a.update(7.5);
        b.update(7.5);
        assert_eq!(a.samples(), b.samples());
    }

    #[test]
    fn particles_ride_distinct_phases() {
        let mut flow = AirFlow::new(50);
        flow.update(2.0);
        let ys: Vec<f32> =
            flow.samples().iter().map(|p| p.position.y).collect();
        assert!(
            ys.iter().any(|y| (*y - ys[0]).abs() > 0.01),
            "per-index phase offsets should desynchronize particles"
        );
    }

    #[test]
    fn vertical_travel_stays_near_trachea() {
        let mut flow = AirFlow::new(50);
        for step in 0..200 {
            flow.update(step as f32 * 0.21);
            for p in flow.samples() {
                assert!(p.position.y >= -1.4001 && p.position.y <= -0.1999);
            }
        }
    }
}
