//! The brain: folded cortex hemispheres, deep structures, pathways.
//!
//! The cortex field is the crate's heaviest displacement field: four
//! primary sulci, three secondary sulci, five gyral ridges, four
//! region-gated lobe swells, three microfolding grains and the
//! longitudinal fissure seam, all applied once per hemisphere mesh at
//! construction. Per-frame work is transform-only.

use glam::Vec3;

use crate::animation::pose::blend_vec3;
use crate::animation::signal::{
    blood_flow, cortical_activity, cortical_base,
};
use crate::animation::{GroupBlend, PoseMode, PoseTarget};
use crate::error::VisceraError;
use crate::geometry::{
    cylinder, extrude_profile, quad, uv_sphere, Axis, BasisTerm,
    DisplacementField, ExtrudeOptions, GrainTerm, HalfSpace, HarmonicTerm,
    ProfilePath, SeamBand, Waveform, WeightedTerm,
};
use crate::options::OrganOptions;
use crate::overlay::NeuralPathways;
use crate::scene::{
    Material, Part, PartId, PartRegistry, Transform, TransformSink,
};

use super::{Organ, OrganKind};

/// Left cortical hemisphere.
pub const LEFT_HEMISPHERE: PartId = PartId("left_hemisphere");
/// Right cortical hemisphere.
pub const RIGHT_HEMISPHERE: PartId = PartId("right_hemisphere");
/// Cerebellum.
pub const CEREBELLUM: PartId = PartId("cerebellum");
/// Brain stem.
pub const BRAIN_STEM: PartId = PartId("brain_stem");
/// Medulla oblongata.
pub const MEDULLA: PartId = PartId("medulla");
/// Lateral ventricles (extruded profile).
pub const VENTRICLES: PartId = PartId("ventricles");
/// Thalamus.
pub const THALAMUS: PartId = PartId("thalamus");
/// Hippocampus.
pub const HIPPOCAMPUS: PartId = PartId("hippocampus");
/// Translucent cross-section plane, swept during inspection.
pub const CROSS_SECTION: PartId = PartId("cross_section");

/// Parts the cortical driver writes every frame.
const ANIMATED_PARTS: [PartId; 5] = [
    LEFT_HEMISPHERE,
    RIGHT_HEMISPHERE,
    CEREBELLUM,
    BRAIN_STEM,
    CROSS_SECTION,
];

/// Hemisphere offset from the midline.
const HEMISPHERE_OFFSET: f32 = 0.25;
/// Cerebellum squash relative to its base sphere.
const CEREBELLUM_SQUASH: Vec3 = Vec3::new(1.0, 0.45, 0.8);
/// Brain stem anchor under the cortex.
const STEM_ANCHOR: Vec3 = Vec3::new(0.0, -0.7, -0.1);
/// Forward tilt of the stem about X, shared by the medulla so it stays
/// on the stem axis.
const STEM_TILT: f32 = 0.2;
/// How far down the tilted stem axis the medulla sits.
const MEDULLA_DROP: f32 = 0.2;

/// Inspection pose: enlarged, off to the side, angled for the
/// cross-section view. Rotation is snapped, not blended.
const ACTIVE_ROTATION: Vec3 = Vec3::new(
    0.0,
    -std::f32::consts::PI / 2.2,
    std::f32::consts::PI / 12.0,
);

fn active_target() -> PoseTarget {
    PoseTarget::new(Vec3::splat(2.5), Vec3::new(-2.0, 0.4, 0.0))
        .with_rotation(ACTIVE_ROTATION)
}

fn sulcus(
    carrier: (Axis, f32),
    couple: (Axis, f32),
    envelope: (Axis, f32),
    amplitude: f32,
    weight: f32,
) -> WeightedTerm {
    WeightedTerm::new(
        BasisTerm::Harmonic(HarmonicTerm {
            base: Waveform::Sine,
            phase: carrier,
            couple,
            envelope: Waveform::Cosine,
            envelope_phase: envelope,
            amplitude,
        }),
        weight,
    )
}

fn gyrus(
    carrier: (Axis, f32),
    couple: (Axis, f32),
    envelope: (Axis, f32),
    amplitude: f32,
    weight: f32,
) -> WeightedTerm {
    WeightedTerm::new(
        BasisTerm::Harmonic(HarmonicTerm {
            base: Waveform::Cosine,
            phase: carrier,
            couple,
            envelope: Waveform::Sine,
            envelope_phase: envelope,
            amplitude,
        }),
        weight,
    )
}

/// Single-wave lobe swell gated to a coordinate region. A zero-frequency
/// cosine envelope passes the carrier through unmodulated.
fn lobe(
    base: Waveform,
    carrier: (Axis, f32),
    amplitude: f32,
    weight: f32,
    region: Vec<HalfSpace>,
) -> WeightedTerm {
    WeightedTerm::gated(
        BasisTerm::Harmonic(HarmonicTerm {
            base,
            phase: carrier,
            couple: (Axis::X, 0.0),
            envelope: Waveform::Cosine,
            envelope_phase: (Axis::X, 0.0),
            amplitude,
        }),
        weight,
        region,
    )
}

fn half(axis: Axis, positive: bool) -> HalfSpace {
    HalfSpace { axis, positive }
}

/// The full cortical fold field.
fn cortical_field() -> DisplacementField {
    use Axis::{X, Y, Z};

    let terms = vec![
        // Primary sulci.
        sulcus((Y, 12.0), (X, 2.5), (X, 2.0), 0.08, 1.0),
        sulcus((X, 14.0), (Z, 2.5), (Z, 2.0), 0.07, 0.9),
        sulcus((Z, 10.0), (Y, 3.0), (Y, 2.0), 0.06, 0.8),
        sulcus((Y, 13.0), (Z, -3.0), (Z, 2.0), 0.07, 0.8),
        // Secondary sulci.
        sulcus((Y, 20.0), (X, 4.0), (X, 3.0), 0.04, 0.7),
        sulcus((Y, 20.0), (X, -4.0), (X, 3.0), 0.04, 0.7),
        sulcus((X, 25.0), (Z, 5.0), (Z, 3.0), 0.035, 0.6),
        // Microfolding grains.
        WeightedTerm::new(
            BasisTerm::Grain(GrainTerm {
                frequency: Vec3::splat(40.0),
                amplitude: 0.015,
            }),
            0.3,
        ),
        WeightedTerm::new(
            BasisTerm::Harmonic(HarmonicTerm {
                base: Waveform::Sine,
                phase: (X, 35.0),
                couple: (Y, 35.0),
                envelope: Waveform::Sine,
                envelope_phase: (Z, 35.0),
                amplitude: 0.02,
            }),
            0.3,
        ),
        WeightedTerm::new(
            BasisTerm::Harmonic(HarmonicTerm {
                base: Waveform::Sine,
                phase: (Y, 45.0),
                couple: (Z, -45.0),
                envelope: Waveform::Sine,
                envelope_phase: (X, 45.0),
                amplitude: 0.015,
            }),
            0.3,
        ),
        // Gyral ridges.
        gyrus((Y, 16.0), (X, 3.0), (X, 2.0), 0.05, 0.8),
        gyrus((Y, 16.0), (X, -3.0), (X, 2.0), 0.05, 0.8),
        gyrus((Z, 15.0), (Y, 4.0), (Y, 2.0), 0.045, 0.7),
        gyrus((Z, 14.0), (Y, -4.0), (Y, 2.0), 0.045, 0.7),
        gyrus((X, 18.0), (Z, 3.0), (Z, 2.0), 0.04, 0.6),
        // Region-gated lobe swells.
        lobe(Waveform::Sine, (Y, 6.0), 0.03, 0.5, vec![half(Y, true)]),
        lobe(
            Waveform::Sine,
            (Z, 6.0),
            0.03,
            0.5,
            vec![half(Y, false), half(Z, true)],
        ),
        lobe(Waveform::Cosine, (X, 8.0), 0.035, 0.5, vec![half(X, true)]),
        lobe(Waveform::Sine, (Z, 9.0), 0.04, 0.6, vec![half(Z, false)]),
    ];

    DisplacementField::new(terms, 0.25).with_seam(SeamBand {
        axis: X,
        half_width: 0.1,
        depth: 0.12,
        ripple: (Y, 8.0),
    })
}

/// The ventricle outline traced in profile space.
fn ventricle_profile() -> ProfilePath {
    let mut shape = ProfilePath::new();
    shape.move_to(0.0, 0.0);
    shape.bezier_curve_to((0.1, 0.1), (0.2, 0.15), (0.15, 0.2));
    shape.bezier_curve_to((0.1, 0.25), (0.05, 0.2), (0.0, 0.15));
    shape.bezier_curve_to((-0.05, 0.1), (-0.1, 0.05), (0.0, 0.0));
    shape
}

/// The brain model.
#[derive(Debug)]
pub struct Brain {
    registry: PartRegistry,
    pose: PoseMode,
    blend: GroupBlend,
    hemisphere_factor: f32,
    left_scale: Vec3,
    right_scale: Vec3,
    pathways: NeuralPathways,
}

impl Brain {
    /// Build the brain at the given detail level. `pathway_seed` fixes
    /// the neural pathway scatter; the same seed always reproduces the
    /// same point cloud.
    ///
    /// # Errors
    ///
    /// Tessellation counts below the primitive minimums.
    pub fn new(
        options: &OrganOptions,
        pathway_seed: u64,
    ) -> Result<Self, VisceraError> {
        let detail = &options.detail;
        let mut registry = PartRegistry::new();

        let mut cortex = uv_sphere(
            0.5,
            detail.cortex_segments,
            detail.cortex_segments,
        )?;
        cortical_field().apply(&mut cortex);
        // Both hemispheres share the folded cortex mesh.
        let cortex_geo = registry.add_geometry(cortex);

        let cerebellum_geo = registry.add_geometry(uv_sphere(
            0.3,
            detail.cerebellum_segments,
            detail.cerebellum_segments,
        )?);
        let stem_geo =
            registry.add_geometry(cylinder(0.12, 0.15, 0.4, 64)?);
        let medulla_geo =
            registry.add_geometry(cylinder(0.1, 0.12, 0.2, 64)?);
        let ventricle_geo = registry.add_geometry(extrude_profile(
            &ventricle_profile(),
            &ExtrudeOptions::default(),
        )?);
        let thalamus_geo =
            registry.add_geometry(uv_sphere(0.15, 32, 32)?);
        let hippocampus_geo =
            registry.add_geometry(cylinder(0.05, 0.08, 0.3, 16)?);
        let plane_geo = registry.add_geometry(quad(2.0, 2.0)?);

        let cortex_material =
            Material::standard([0.894, 0.663, 0.663], 0.88, 0.02)
                .with_opacity(0.7);

        registry.insert(Part::new(
            LEFT_HEMISPHERE,
            cortex_geo,
            cortex_material,
            Transform::at(Vec3::new(-HEMISPHERE_OFFSET, 0.0, 0.0)),
        ));
        registry.insert(Part::new(
            RIGHT_HEMISPHERE,
            cortex_geo,
            cortex_material,
            Transform::at(Vec3::new(HEMISPHERE_OFFSET, 0.0, 0.0)),
        ));
        registry.insert(Part::new(
            CEREBELLUM,
            cerebellum_geo,
            Material::standard([0.859, 0.631, 0.631], 0.92, 0.02)
                .with_opacity(0.7),
            Transform {
                position: Vec3::new(0.0, -0.45, -0.2),
                rotation: Vec3::ZERO,
                scale: CEREBELLUM_SQUASH,
            },
        ));
        registry.insert(Part::new(
            BRAIN_STEM,
            stem_geo,
            Material::standard([0.902, 0.902, 0.902], 0.85, 0.02)
                .with_opacity(0.7),
            Transform {
                position: STEM_ANCHOR,
                rotation: Vec3::new(STEM_TILT, 0.0, 0.0),
                scale: Vec3::ONE,
            },
        ));
        // The drop is rotated by the stem tilt so the medulla continues
        // the stem axis rather than hanging straight down.
        let medulla_drop = Vec3::new(
            0.0,
            -MEDULLA_DROP * STEM_TILT.cos(),
            -MEDULLA_DROP * STEM_TILT.sin(),
        );
        registry.insert(Part::new(
            MEDULLA,
            medulla_geo,
            Material::standard([0.851, 0.851, 0.851], 0.85, 0.02)
                .with_opacity(0.7),
            Transform {
                position: STEM_ANCHOR + medulla_drop,
                rotation: Vec3::new(STEM_TILT, 0.0, 0.0),
                scale: Vec3::ONE,
            },
        ));
        registry.insert(Part::new(
            VENTRICLES,
            ventricle_geo,
            Material::standard([0.533, 0.8, 1.0], 0.6, 0.1)
                .with_opacity(0.8),
            Transform::at(Vec3::new(0.0, 0.1, 0.0)),
        ));
        registry.insert(Part::new(
            THALAMUS,
            thalamus_geo,
            Material::standard([0.8, 0.6, 0.8], 0.7, 0.1)
                .with_opacity(0.9),
            Transform::at(Vec3::new(0.0, -0.1, 0.0)),
        ));
        registry.insert(Part::new(
            HIPPOCAMPUS,
            hippocampus_geo,
            Material::standard([0.6, 0.8, 0.6], 0.7, 0.1)
                .with_opacity(0.9),
            Transform {
                position: Vec3::new(0.2, -0.2, 0.1),
                rotation: Vec3::new(
                    0.0,
                    0.0,
                    std::f32::consts::FRAC_PI_4,
                ),
                scale: Vec3::ONE,
            },
        ));
        registry.insert(Part::new(
            CROSS_SECTION,
            plane_geo,
            Material::standard([1.0, 0.6, 0.6], 0.8, 0.1)
                .with_opacity(0.1),
            Transform {
                position: Vec3::ZERO,
                rotation: Vec3::new(
                    0.0,
                    std::f32::consts::FRAC_PI_2,
                    0.0,
                ),
                scale: Vec3::ONE,
            },
        ));

        let pathways = NeuralPathways::generate(
            pathway_seed,
            detail.pathway_points as usize,
        );

        log::debug!(
            "brain built: {} parts, {} meshes, {} pathway points",
            registry.len(),
            registry.geometries().len(),
            pathways.len()
        );

        Ok(Self {
            registry,
            pose: PoseMode::Resting,
            blend: GroupBlend::new(options.animation.brain_smoothing),
            hemisphere_factor: options.animation.hemisphere_smoothing,
            left_scale: Vec3::ONE,
            right_scale: Vec3::ONE,
            pathways,
        })
    }

    /// The frozen neural pathway point cloud.
    #[must_use]
    pub fn pathways(&self) -> &NeuralPathways {
        &self.pathways
    }
}

impl Organ for Brain {
    fn kind(&self) -> OrganKind {
        OrganKind::Brain
    }

    fn pose(&self) -> PoseMode {
        self.pose
    }

    fn set_pose(&mut self, mode: PoseMode) {
        self.pose = mode;
    }

    fn advance(&mut self, elapsed: f32, delta: f32) {
        if !self.registry.has_all(&ANIMATED_PARTS) {
            log::trace!("brain advance skipped, cortical parts missing");
            return;
        }

        let base = cortical_base(elapsed);
        let activity = cortical_activity(elapsed);
        let flow = blood_flow(elapsed);

        // The hemispheres breathe in antiphase: activity adds to the
        // left and subtracts from the right.
        self.left_scale = blend_vec3(
            self.left_scale,
            Vec3::new(base + activity, base + flow, base + activity),
            self.hemisphere_factor,
            delta,
        );
        self.right_scale = blend_vec3(
            self.right_scale,
            Vec3::new(base - activity, base + flow, base - activity),
            self.hemisphere_factor,
            delta,
        );
        self.registry.set_transform(
            LEFT_HEMISPHERE,
            Transform {
                scale: self.left_scale,
                ..Transform::at(Vec3::new(-HEMISPHERE_OFFSET, 0.0, 0.0))
            },
        );
        self.registry.set_transform(
            RIGHT_HEMISPHERE,
            Transform {
                scale: self.right_scale,
                ..Transform::at(Vec3::new(HEMISPHERE_OFFSET, 0.0, 0.0))
            },
        );

        self.registry.set_transform(
            CEREBELLUM,
            Transform {
                position: Vec3::new(0.0, -0.45, -0.2),
                rotation: Vec3::new(
                    (elapsed * 0.15).sin() * 0.003,
                    0.0,
                    (elapsed * 0.15).cos() * 0.002,
                ),
                scale: CEREBELLUM_SQUASH,
            },
        );

        let target = match self.pose {
            PoseMode::Active => {
                // Snap the angled view; the cross-section plane sweeps
                // slowly through the tissue while inspecting.
                self.blend.set_rotation(ACTIVE_ROTATION);
                if let Some(plane) = self.registry.part(CROSS_SECTION) {
                    let swept = Transform {
                        position: Vec3::new(
                            (elapsed * 0.2).sin() * 0.1,
                            0.0,
                            0.0,
                        ),
                        ..plane.transform
                    };
                    self.registry.set_transform(CROSS_SECTION, swept);
                }
                active_target()
            }
            PoseMode::Resting => {
                self.blend.set_rotation(Vec3::ZERO);
                PoseTarget::RESTING
            }
        };
        let _ = self.blend.step(&target, delta);
    }

    fn registry(&self) -> &PartRegistry {
        &self.registry
    }

    fn group_transform(&self) -> Transform {
        self.blend.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::pose::REFERENCE_DELTA;

    fn coarse_brain(seed: u64) -> Brain {
        let options = OrganOptions {
            detail: crate::options::DetailOptions::coarse(),
            ..OrganOptions::default()
        };
        Brain::new(&options, seed).unwrap()
    }

    #[test]
    fn construction_registers_all_parts() {
        let brain = coarse_brain(1);
        assert_eq!(brain.registry().len(), 9);
        // Hemispheres share the cortex mesh: 8 meshes for 9 parts.
        assert_eq!(brain.registry().geometries().len(), 8);
        assert_eq!(brain.pathways().len(), 2000);
    }

    #[test]
    fn construction_rejects_degenerate_detail() {
        let options = OrganOptions {
            detail: crate::options::DetailOptions {
                cortex_segments: 2,
                ..crate::options::DetailOptions::default()
            },
            ..OrganOptions::default()
        };
        assert!(Brain::new(&options, 1).is_err());
    }

    #[test]
    fn pathways_are_seed_deterministic() {
        let a = coarse_brain(99);
        let b = coarse_brain(99);
        assert_eq!(a.pathways().points(), b.pathways().points());
    }

    #[test]
    fn cortical_field_is_bounded_and_deterministic() {
        let field = cortical_field();
        for i in 0..200 {
            let a = i as f32 * 0.41;
            let p = Vec3::new(a.sin(), (a * 1.3).cos(), (a * 0.7).sin())
                * 0.5;
            let s = field.sample(p);
            assert!(s.abs() <= 0.25 + f32::EPSILON);
            assert_eq!(s, field.sample(p));
        }
    }

    #[test]
    fn cortex_mesh_is_actually_folded() {
        let brain = coarse_brain(1);
        let lh = brain.registry().part(LEFT_HEMISPHERE).unwrap();
        let cortex = brain.registry().geometry(lh.geometry).unwrap();
        let mut off_sphere = 0usize;
        for p in cortex.positions() {
            if (p.length() - 0.5).abs() > 0.005 {
                off_sphere += 1;
            }
        }
        assert!(
            off_sphere > cortex.vertex_count() / 4,
            "only {off_sphere} of {} vertices displaced",
            cortex.vertex_count()
        );
    }

    #[test]
    fn inspection_pose_snaps_rotation_but_blends_scale() {
        let mut brain = coarse_brain(1);
        brain.set_pose(PoseMode::Active);
        brain.advance(0.0, REFERENCE_DELTA);

        let group = brain.group_transform();
        assert!((group.rotation.y - ACTIVE_ROTATION.y).abs() < 1e-6);
        assert!((group.rotation.z - ACTIVE_ROTATION.z).abs() < 1e-6);
        // Scale eases toward 2.5, covering at most 5% per frame.
        assert!(group.scale.x > 1.0);
        assert!(group.scale.x <= 1.0 + 1.5 * 0.05 + 1e-6);

        brain.set_pose(PoseMode::Resting);
        brain.advance(0.1, REFERENCE_DELTA);
        assert_eq!(brain.group_transform().rotation, Vec3::ZERO);
    }

    #[test]
    fn cross_section_sweeps_only_while_active() {
        let mut brain = coarse_brain(1);
        // sin(0.2 * 8) is well away from zero.
        brain.advance(8.0, REFERENCE_DELTA);
        let resting = brain.registry().transform(CROSS_SECTION).unwrap();
        assert_eq!(resting.position.x, 0.0);

        brain.set_pose(PoseMode::Active);
        brain.advance(8.0, REFERENCE_DELTA);
        let swept = brain.registry().transform(CROSS_SECTION).unwrap();
        assert!((swept.position.x - (8.0_f32 * 0.2).sin() * 0.1).abs()
            < 1e-6);
        assert_eq!(swept.rotation, resting.rotation);
    }

    #[test]
    fn hemispheres_diverge_under_activity() {
        let mut brain = coarse_brain(1);
        // Hold the clock at a point of strong asymmetric activity so
        // the scale blend settles onto the antiphase targets.
        for _ in 0..400 {
            brain.advance(1.3, REFERENCE_DELTA);
        }
        let left = brain.registry().transform(LEFT_HEMISPHERE).unwrap();
        let right =
            brain.registry().transform(RIGHT_HEMISPHERE).unwrap();
        assert!(left.scale.x > right.scale.x);
        // Blood flow is shared: vertical scales match.
        assert!((left.scale.y - right.scale.y).abs() < 1e-6);
        // The sway is subtle, within a tenth of a percent.
        assert!((left.scale.x - 1.0).abs() < 0.002);
    }

    #[test]
    fn deep_structures_hold_their_anchors() {
        let mut brain = coarse_brain(1);
        let thalamus = brain.registry().transform(THALAMUS).unwrap();
        let ventricles = brain.registry().transform(VENTRICLES).unwrap();
        for i in 0..100 {
            brain.advance(i as f32 * 0.09, REFERENCE_DELTA);
        }
        assert_eq!(
            brain.registry().transform(THALAMUS),
            Some(thalamus)
        );
        assert_eq!(
            brain.registry().transform(VENTRICLES),
            Some(ventricles)
        );
        // The cerebellum rocks but never leaves its seat.
        let cb = brain.registry().transform(CEREBELLUM).unwrap();
        assert_eq!(cb.position, Vec3::new(0.0, -0.45, -0.2));
        assert!(cb.rotation.x.abs() <= 0.003);
        assert_eq!(cb.scale, CEREBELLUM_SQUASH);
    }

    #[test]
    fn medulla_continues_the_tilted_stem_axis() {
        let brain = coarse_brain(1);
        let stem = brain.registry().transform(BRAIN_STEM).unwrap();
        let medulla = brain.registry().transform(MEDULLA).unwrap();
        assert_eq!(medulla.rotation, stem.rotation);

        // The drop between the anchors is 0.2 along -Y rotated by the
        // stem's forward tilt, so it picks up a -Z component too.
        let drop = medulla.position - stem.position;
        assert_eq!(drop.x, 0.0);
        assert!((drop.y + 0.2 * STEM_TILT.cos()).abs() < 1e-6);
        assert!((drop.z + 0.2 * STEM_TILT.sin()).abs() < 1e-6);
        assert!((medulla.position.y + 0.896).abs() < 1e-3);
        assert!((medulla.position.z + 0.1397).abs() < 1e-3);
    }
}
