//! Neural pathway point cloud: a one-shot scatter into four bundles.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The four anatomical bundles pathway points scatter into.
///
/// Bundle choice quarters the unit interval; each bundle is a distinct
/// anisotropic squash of the same spherical draw, which is what visually
/// separates the fiber groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bundle {
    /// Inter-hemispheric fibers, wide and flat.
    CorpusCallosum,
    /// Deep limbic loop below the midline.
    Limbic,
    /// Radiations fanning out from the thalamus.
    Thalamic,
    /// Long-range association fibers.
    Association,
}

impl Bundle {
    /// Map a uniform draw in [0, 1) to a bundle by quartile boundaries.
    #[must_use]
    pub fn classify(u: f32) -> Self {
        if u < 0.25 {
            Self::CorpusCallosum
        } else if u < 0.5 {
            Self::Limbic
        } else if u < 0.75 {
            Self::Thalamic
        } else {
            Self::Association
        }
    }
}

/// Static point cloud of pathway fibers, generated once at construction
/// and frozen into the brain model. Only rendering state (host-side
/// point material) varies afterwards.
#[derive(Debug, Clone)]
pub struct NeuralPathways {
    points: Vec<Vec3>,
    bundles: Vec<Bundle>,
}

impl NeuralPathways {
    /// Scatter `count` points from an explicit seed.
    ///
    /// The polar angle uses inverse-cosine sampling (`acos(2u - 1)`) so
    /// points distribute uniformly over the shell instead of clustering
    /// at the poles; radius falls in [0.4, 0.7).
    #[must_use]
    pub fn generate(seed: u64, count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut points = Vec::with_capacity(count);
        let mut bundles = Vec::with_capacity(count);

        for _ in 0..count {
            let theta = rng.random::<f32>() * std::f32::consts::TAU;
            let phi = (rng.random::<f32>() * 2.0 - 1.0).acos();
            let radius = 0.4 + rng.random::<f32>() * 0.3;
            let bundle = Bundle::classify(rng.random::<f32>());

            let point = match bundle {
                Bundle::CorpusCallosum => Vec3::new(
                    radius * theta.cos() * 0.8,
                    radius * theta.sin() * 0.2,
                    radius * phi.sin() * 0.6,
                ),
                Bundle::Limbic => Vec3::new(
                    radius * phi.sin() * 0.4,
                    -radius * phi.cos() * 0.3,
                    radius * theta.sin() * 0.5,
                ),
                Bundle::Thalamic => Vec3::new(
                    radius * phi.sin() * theta.cos() * 0.6,
                    radius * phi.cos() * 0.4,
                    radius * phi.sin() * theta.sin() * 0.5,
                ),
                Bundle::Association => Vec3::new(
                    radius * theta.cos() * 0.7,
                    radius * phi.sin() * 0.5,
                    radius * theta.sin() * 0.4,
                ),
            };
            points.push(point);
            bundles.push(bundle);
        }

        Self { points, bundles }
    }

    /// Scatter positions, one per point.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Bundle assignment per point (parallel to [`points`](Self::points)).
    #[must_use]
    pub fn bundles(&self) -> &[Bundle] {
        &self.bundles
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the cloud is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Tightly packed position bytes for host point-cloud upload.
    #[must_use]
    pub fn position_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.points).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_seed_deterministic() {
        let a = NeuralPathways::generate(7, 500);
        let b = NeuralPathways::generate(7, 500);
        assert_eq!(a.points(), b.points());

        let c = NeuralPathways::generate(8, 500);
        assert_ne!(a.points(), c.points());
    }

    #[test]
    fn bundles_partition_into_quartiles() {
        let cloud = NeuralPathways::generate(42, 2000);
        let mut counts = [0usize; 4];
        for b in cloud.bundles() {
            let slot = match b {
                Bundle::CorpusCallosum => 0,
                Bundle::Limbic => 1,
                Bundle::Thalamic => 2,
                Bundle::Association => 3,
            };
            counts[slot] += 1;
        }
        for (i, &count) in counts.iter().enumerate() {
            // ~500 expected per bundle; allow generous sampling slack.
            assert!(
                (380..=620).contains(&count),
                "bundle {i} has {count} of 2000 points"
            );
        }
    }

    #[test]
    fn classify_respects_boundaries() {
        assert_eq!(Bundle::classify(0.0), Bundle::CorpusCallosum);
        assert_eq!(Bundle::classify(0.25), Bundle::Limbic);
        assert_eq!(Bundle::classify(0.5), Bundle::Thalamic);
        assert_eq!(Bundle::classify(0.75), Bundle::Association);
        assert_eq!(Bundle::classify(0.999), Bundle::Association);
    }

    #[test]
    fn points_stay_in_plausible_shell() {
        let cloud = NeuralPathways::generate(3, 1000);
        for p in cloud.points() {
            // Max radius 0.7, max axis squash 0.8.
            assert!(
                p.length() <= 0.7 + 1e-5,
                "point {p:?} escaped the shell"
            );
        }
    }

    #[test]
    fn position_bytes_are_tightly_packed() {
        let cloud = NeuralPathways::generate(1, 10);
        assert_eq!(cloud.position_bytes().len(), 10 * 3 * 4);
    }
}
