//! The beating heart: four chambers, two great vessels, a pulse shell.

use glam::Vec3;

use crate::animation::signal::{
    atrial_contraction, cardiac_diastole, cardiac_systole,
};
use crate::animation::{GroupBlend, PoseMode, PoseTarget};
use crate::error::VisceraError;
use crate::geometry::{
    cylinder, uv_sphere, BasisTerm, DisplacementField, GrainTerm,
    WeightedTerm,
};
use crate::options::OrganOptions;
use crate::scene::{
    Material, Part, PartId, PartRegistry, Transform, TransformSink,
};

use super::{Organ, OrganKind};

/// Left ventricle, the main pumping chamber.
pub const LEFT_VENTRICLE: PartId = PartId("left_ventricle");
/// Right ventricle.
pub const RIGHT_VENTRICLE: PartId = PartId("right_ventricle");
/// Left atrium.
pub const LEFT_ATRIUM: PartId = PartId("left_atrium");
/// Right atrium.
pub const RIGHT_ATRIUM: PartId = PartId("right_atrium");
/// Aorta.
pub const AORTA: PartId = PartId("aorta");
/// Pulmonary artery.
pub const PULMONARY_ARTERY: PartId = PartId("pulmonary_artery");
/// Translucent pulse shell enclosing the whole organ.
pub const PULSE_SHELL: PartId = PartId("pulse_shell");

/// Parts the cardiac driver writes every frame.
const ANIMATED_PARTS: [PartId; 4] =
    [LEFT_VENTRICLE, RIGHT_VENTRICLE, LEFT_ATRIUM, RIGHT_ATRIUM];

/// Peak fractional ventricular contraction.
const VENTRICLE_CONTRACTION: f32 = 0.15;
/// Peak fractional atrial contraction.
const ATRIAL_CONTRACTION: f32 = 0.1;
/// Size ratio of the right side relative to the left.
const RIGHT_SIDE_RATIO: f32 = 0.9;

/// Pose target when the heart is under inspection.
const ACTIVE_TARGET: PoseTarget = PoseTarget::new(
    Vec3::splat(1.2),
    Vec3::new(0.0, 0.5, 0.0),
);

/// Static surface irregularity for the chamber spheres. The low-frequency
/// grain keeps the chambers from reading as perfect CAD spheres.
fn chamber_field(amplitude: f32) -> DisplacementField {
    DisplacementField::new(
        vec![WeightedTerm::new(
            BasisTerm::Grain(GrainTerm {
                frequency: Vec3::new(9.0, 7.0, 8.0),
                amplitude,
            }),
            1.0,
        )],
        amplitude,
    )
}

/// The heart model.
///
/// Geometry is built once at construction; `advance` only rewrites part
/// transforms, the group transform and the pulse-shell opacity scalar.
#[derive(Debug)]
pub struct Heart {
    registry: PartRegistry,
    pose: PoseMode,
    blend: GroupBlend,
    pulse_opacity: f32,
}

impl Heart {
    /// Build the heart at the given detail level. Fails fast on
    /// degenerate tessellation options; never fails afterwards.
    ///
    /// # Errors
    ///
    /// Tessellation counts below the primitive minimums.
    pub fn new(options: &OrganOptions) -> Result<Self, VisceraError> {
        let detail = &options.detail;
        let mut registry = PartRegistry::new();

        let chamber_grain = chamber_field(0.02);
        let atrium_grain = chamber_field(0.015);

        let mut lv = uv_sphere(
            0.4,
            detail.chamber_segments,
            detail.chamber_segments,
        )?;
        chamber_grain.apply(&mut lv);
        let lv_geo = registry.add_geometry(lv);

        let mut rv = uv_sphere(
            0.35,
            detail.chamber_segments,
            detail.chamber_segments,
        )?;
        chamber_grain.apply(&mut rv);
        let rv_geo = registry.add_geometry(rv);

        let mut atrium = uv_sphere(
            0.25,
            detail.atrium_segments,
            detail.atrium_segments,
        )?;
        atrium_grain.apply(&mut atrium);
        // Both atria share one mesh; only material and placement differ.
        let atrium_geo = registry.add_geometry(atrium);

        let vessel_geo = registry.add_geometry(cylinder(
            0.08,
            0.08,
            0.4,
            detail.vessel_segments,
        )?);
        let shell_geo = registry.add_geometry(uv_sphere(1.1, 32, 32)?);

        let left_material = Material::standard([0.8, 0.0, 0.0], 0.7, 0.3);
        let right_material = Material::standard([0.6, 0.0, 0.0], 0.7, 0.3);

        registry.insert(Part::new(
            LEFT_VENTRICLE,
            lv_geo,
            left_material,
            Transform::at(Vec3::new(-0.2, -0.1, 0.0)),
        ));
        registry.insert(Part::new(
            RIGHT_VENTRICLE,
            rv_geo,
            right_material,
            Transform::at(Vec3::new(0.2, -0.1, 0.0)),
        ));
        registry.insert(Part::new(
            LEFT_ATRIUM,
            atrium_geo,
            left_material,
            Transform::at(Vec3::new(-0.2, 0.3, 0.0)),
        ));
        registry.insert(Part::new(
            RIGHT_ATRIUM,
            atrium_geo,
            right_material,
            Transform::at(Vec3::new(0.2, 0.3, 0.0)),
        ));
        registry.insert(Part::new(
            AORTA,
            vessel_geo,
            left_material,
            Transform {
                position: Vec3::new(-0.2, 0.6, 0.0),
                rotation: Vec3::new(
                    0.0,
                    0.0,
                    -std::f32::consts::FRAC_PI_6,
                ),
                scale: Vec3::ONE,
            },
        ));
        registry.insert(Part::new(
            PULMONARY_ARTERY,
            vessel_geo,
            right_material,
            Transform {
                position: Vec3::new(0.2, 0.6, 0.0),
                rotation: Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_6),
                scale: Vec3::ONE,
            },
        ));
        registry.insert(Part::new(
            PULSE_SHELL,
            shell_geo,
            Material::standard([1.0, 0.0, 0.0], 1.0, 0.0)
                .with_opacity(0.1),
            Transform::IDENTITY,
        ));

        log::debug!(
            "heart built: {} parts, {} meshes",
            registry.len(),
            registry.geometries().len()
        );

        Ok(Self {
            registry,
            pose: PoseMode::Resting,
            blend: GroupBlend::new(options.animation.heart_smoothing),
            pulse_opacity: 0.1,
        })
    }

    /// Current pulse-shell opacity, in [0.05, 0.15]. The host applies this
    /// to the [`PULSE_SHELL`] material at draw time.
    #[must_use]
    pub fn pulse_opacity(&self) -> f32 {
        self.pulse_opacity
    }
}

impl Organ for Heart {
    fn kind(&self) -> OrganKind {
        OrganKind::Heart
    }

    fn pose(&self) -> PoseMode {
        self.pose
    }

    fn set_pose(&mut self, mode: PoseMode) {
        self.pose = mode;
    }

    fn advance(&mut self, elapsed: f32, delta: f32) {
        if !self.registry.has_all(&ANIMATED_PARTS) {
            log::trace!("heart advance skipped, chamber parts missing");
            return;
        }

        let systole = cardiac_systole(elapsed);
        let diastole = cardiac_diastole(elapsed);
        let atrial = atrial_contraction(elapsed);

        let ventricle_scale =
            1.0 - systole.max(diastole) * VENTRICLE_CONTRACTION;
        let atrial_scale = 1.0 - atrial * ATRIAL_CONTRACTION;

        for (part, scale) in [
            (LEFT_VENTRICLE, ventricle_scale),
            (RIGHT_VENTRICLE, ventricle_scale * RIGHT_SIDE_RATIO),
            (LEFT_ATRIUM, atrial_scale),
            (RIGHT_ATRIUM, atrial_scale * RIGHT_SIDE_RATIO),
        ] {
            if let Some(base) = self.registry.part(part) {
                let transform = Transform {
                    scale: Vec3::splat(scale),
                    ..Transform::at(base.transform.position)
                };
                self.registry.set_transform(part, transform);
            }
        }

        // Contraction twists the whole organ slightly around its axis;
        // the sway and twist are snapped, not blended.
        let twist = systole * 0.1;
        self.blend.set_rotation(Vec3::new(
            0.0,
            (elapsed * 2.0).sin() * 0.05,
            (elapsed * 2.0).cos() * 0.05 + twist,
        ));

        self.pulse_opacity = 0.1 + (elapsed * 4.0).sin() * 0.05;

        let target = match self.pose {
            PoseMode::Active => ACTIVE_TARGET,
            PoseMode::Resting => PoseTarget::RESTING,
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

    fn coarse_heart() -> Heart {
        let options = OrganOptions {
            detail: crate::options::DetailOptions::coarse(),
            ..OrganOptions::default()
        };
        Heart::new(&options).unwrap()
    }

    #[test]
    fn construction_registers_all_parts() {
        let heart = coarse_heart();
        assert_eq!(heart.registry().len(), 7);
        assert!(heart.registry().has_all(&[
            LEFT_VENTRICLE,
            RIGHT_VENTRICLE,
            LEFT_ATRIUM,
            RIGHT_ATRIUM,
            AORTA,
            PULMONARY_ARTERY,
            PULSE_SHELL,
        ]));
        // Atria share one mesh: 5 meshes for 7 parts.
        assert_eq!(heart.registry().geometries().len(), 5);
    }

    #[test]
    fn construction_rejects_degenerate_detail() {
        let options = OrganOptions {
            detail: crate::options::DetailOptions {
                chamber_segments: 2,
                ..crate::options::DetailOptions::default()
            },
            ..OrganOptions::default()
        };
        assert!(Heart::new(&options).is_err());
    }

    #[test]
    fn heart_is_relaxed_at_time_zero() {
        let mut heart = coarse_heart();
        heart.advance(0.0, REFERENCE_DELTA);
        let lv = heart.registry().transform(LEFT_VENTRICLE).unwrap();
        assert!((lv.scale.x - 1.0).abs() < 1e-3);
        // Group still at rest after one frame.
        let group = heart.group_transform();
        assert!(group.position.length() < 1e-6);
    }

    #[test]
    fn systole_contracts_ventricles() {
        let mut heart = coarse_heart();
        // Crest of sin(4t) at t = pi/8.
        let crest = std::f32::consts::FRAC_PI_2 / 4.0;
        heart.advance(crest, REFERENCE_DELTA);
        let lv = heart.registry().transform(LEFT_VENTRICLE).unwrap();
        let rv = heart.registry().transform(RIGHT_VENTRICLE).unwrap();
        assert!((lv.scale.x - 0.85).abs() < 1e-3);
        assert!((rv.scale.x - 0.85 * 0.9).abs() < 1e-3);
        // Chamber anchors never move.
        assert_eq!(lv.position, Vec3::new(-0.2, -0.1, 0.0));
    }

    #[test]
    fn pose_blend_is_gradual() {
        let mut heart = coarse_heart();
        heart.set_pose(PoseMode::Active);
        heart.advance(0.0, REFERENCE_DELTA);
        let group = heart.group_transform();
        // One step covers at most the smoothing fraction.
        assert!(group.position.y > 0.0);
        assert!(group.position.y <= 0.5 * 0.1 + 1e-6);
        assert!(group.scale.x < 1.2);

        for i in 1..600 {
            heart.advance(i as f32 * REFERENCE_DELTA, REFERENCE_DELTA);
        }
        let settled = heart.group_transform();
        assert!((settled.position.y - 0.5).abs() < 1e-3);
        assert!((settled.scale.x - 1.2).abs() < 1e-3);
    }

    #[test]
    fn pulse_opacity_tracks_the_cycle() {
        let mut heart = coarse_heart();
        for i in 0..200 {
            heart.advance(i as f32 * 0.031, REFERENCE_DELTA);
            let o = heart.pulse_opacity();
            assert!((0.05..=0.15).contains(&o), "opacity {o}");
        }
    }

    #[test]
    fn advance_is_deterministic_in_elapsed_time() {
        let mut a = coarse_heart();
        let mut b = coarse_heart();
        a.advance(1.0, REFERENCE_DELTA);
        a.advance(3.5, REFERENCE_DELTA);
        b.advance(2.0, REFERENCE_DELTA);
        b.advance(3.5, REFERENCE_DELTA);
        // Part transforms depend only on the latest elapsed time.
        assert_eq!(
            a.registry().transform(LEFT_VENTRICLE),
            b.registry().transform(LEFT_VENTRICLE)
        );
        assert_eq!(
            a.registry().transform(RIGHT_ATRIUM),
            b.registry().transform(RIGHT_ATRIUM)
        );
    }
}
