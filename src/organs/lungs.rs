//! The breathing lungs: five lobes, the airways, and air particles.

use glam::Vec3;

use crate::animation::signal::breathing;
use crate::animation::{GroupBlend, PoseMode, PoseTarget};
use crate::error::VisceraError;
use crate::geometry::{
    cylinder, uv_sphere, BasisTerm, DisplacementField, GrainTerm,
    WeightedTerm,
};
use crate::options::OrganOptions;
use crate::overlay::AirFlow;
use crate::scene::{
    Material, Part, PartId, PartRegistry, Transform, TransformSink,
};

use super::{Organ, OrganKind};

/// Left upper lobe.
pub const LEFT_UPPER_LOBE: PartId = PartId("left_upper_lobe");
/// Left lower lobe.
pub const LEFT_LOWER_LOBE: PartId = PartId("left_lower_lobe");
/// Right upper lobe.
pub const RIGHT_UPPER_LOBE: PartId = PartId("right_upper_lobe");
/// Right middle lobe.
pub const RIGHT_MIDDLE_LOBE: PartId = PartId("right_middle_lobe");
/// Right lower lobe.
pub const RIGHT_LOWER_LOBE: PartId = PartId("right_lower_lobe");
/// Left main bronchus.
pub const LEFT_BRONCHUS: PartId = PartId("left_bronchus");
/// Right main bronchus.
pub const RIGHT_BRONCHUS: PartId = PartId("right_bronchus");
/// Trachea.
pub const TRACHEA: PartId = PartId("trachea");

/// Parts the breathing driver writes every frame.
const ANIMATED_PARTS: [PartId; 5] = [
    LEFT_UPPER_LOBE,
    LEFT_LOWER_LOBE,
    RIGHT_UPPER_LOBE,
    RIGHT_MIDDLE_LOBE,
    RIGHT_LOWER_LOBE,
];

/// Per-lobe breathing gain, giving the natural asymmetry of the
/// reference model (upper lobes swell slightly more than lower).
const LOBE_GAIN: [(PartId, f32); 5] = [
    (LEFT_UPPER_LOBE, 1.2),
    (LEFT_LOWER_LOBE, 1.1),
    (RIGHT_UPPER_LOBE, 1.1),
    (RIGHT_MIDDLE_LOBE, 1.0),
    (RIGHT_LOWER_LOBE, 1.05),
];

/// Resting horizontal offset of each lung from the midline.
const LUNG_SPREAD: f32 = 0.6;

/// Pose target when the lungs are under inspection.
const ACTIVE_TARGET: PoseTarget = PoseTarget::new(
    Vec3::splat(1.2),
    Vec3::new(0.0, 0.5, 0.0),
);

/// Static pleural surface irregularity for the lobe spheres.
fn lobe_field() -> DisplacementField {
    DisplacementField::new(
        vec![WeightedTerm::new(
            BasisTerm::Grain(GrainTerm {
                frequency: Vec3::new(11.0, 9.0, 10.0),
                amplitude: 0.015,
            }),
            1.0,
        )],
        0.015,
    )
}

/// The lungs model.
///
/// Lobe scales and horizontal spread ride the breathing signal; air
/// particles rise through the trachea on per-index phases of the same
/// cycle. All geometry is fixed after construction.
#[derive(Debug)]
pub struct Lungs {
    registry: PartRegistry,
    pose: PoseMode,
    blend: GroupBlend,
    airflow: AirFlow,
}

impl Lungs {
    /// Build the lungs at the given detail level.
    ///
    /// # Errors
    ///
    /// Tessellation counts below the primitive minimums.
    pub fn new(options: &OrganOptions) -> Result<Self, VisceraError> {
        let detail = &options.detail;
        let mut registry = PartRegistry::new();

        let grain = lobe_field();
        let mut lobe_geos = Vec::with_capacity(3);
        // Three distinct radii across the five lobes.
        for radius in [0.3, 0.35, 0.25] {
            let mut mesh = uv_sphere(
                radius,
                detail.lobe_segments,
                detail.lobe_segments,
            )?;
            grain.apply(&mut mesh);
            lobe_geos.push(registry.add_geometry(mesh));
        }
        let (large, larger, small) =
            (lobe_geos[0], lobe_geos[1], lobe_geos[2]);

        let bronchus_geo = registry.add_geometry(cylinder(
            0.05,
            0.04,
            0.4,
            detail.bronchus_segments,
        )?);
        let trachea_geo = registry.add_geometry(cylinder(
            0.08,
            0.08,
            0.8,
            detail.trachea_segments,
        )?);

        let lobe_material =
            Material::standard([1.0, 0.412, 0.702], 0.8, 0.1);
        let airway_material =
            Material::standard([0.8, 0.4, 0.6], 0.3, 0.2);

        for (part, geo, position) in [
            (LEFT_UPPER_LOBE, large, Vec3::new(-0.6, 0.2, 0.0)),
            (LEFT_LOWER_LOBE, larger, Vec3::new(-0.6, -0.2, 0.0)),
            (RIGHT_UPPER_LOBE, small, Vec3::new(0.6, 0.3, 0.0)),
            (RIGHT_MIDDLE_LOBE, small, Vec3::new(0.6, 0.0, 0.0)),
            (RIGHT_LOWER_LOBE, large, Vec3::new(0.6, -0.3, 0.0)),
        ] {
            registry.insert(Part::new(
                part,
                geo,
                lobe_material,
                Transform::at(position),
            ));
        }

        let quarter_turn = std::f32::consts::FRAC_PI_4;
        registry.insert(Part::new(
            LEFT_BRONCHUS,
            bronchus_geo,
            airway_material,
            Transform {
                position: Vec3::new(-0.3, -0.2, 0.0),
                rotation: Vec3::new(0.0, 0.0, quarter_turn),
                scale: Vec3::ONE,
            },
        ));
        registry.insert(Part::new(
            RIGHT_BRONCHUS,
            bronchus_geo,
            airway_material,
            Transform {
                position: Vec3::new(0.3, -0.2, 0.0),
                rotation: Vec3::new(0.0, 0.0, -quarter_turn),
                scale: Vec3::ONE,
            },
        ));
        registry.insert(Part::new(
            TRACHEA,
            trachea_geo,
            airway_material,
            Transform::at(Vec3::new(0.0, -0.6, 0.0)),
        ));

        log::debug!(
            "lungs built: {} parts, {} meshes, {} air particles",
            registry.len(),
            registry.geometries().len(),
            detail.air_particles
        );

        Ok(Self {
            registry,
            pose: PoseMode::Resting,
            blend: GroupBlend::new(options.animation.lungs_smoothing),
            airflow: AirFlow::new(detail.air_particles as usize),
        })
    }

    /// The air particle overlay, updated by [`advance`](Organ::advance).
    #[must_use]
    pub fn airflow(&self) -> &AirFlow {
        &self.airflow
    }
}

impl Organ for Lungs {
    fn kind(&self) -> OrganKind {
        OrganKind::Lungs
    }

    fn pose(&self) -> PoseMode {
        self.pose
    }

    fn set_pose(&mut self, mode: PoseMode) {
        self.pose = mode;
    }

    fn advance(&mut self, elapsed: f32, delta: f32) {
        if !self.registry.has_all(&ANIMATED_PARTS) {
            log::trace!("lungs advance skipped, lobe parts missing");
            return;
        }

        let breathe = breathing(elapsed);
        let expansion = breathe * 0.2;

        for (part, gain) in LOBE_GAIN {
            if let Some(base) = self.registry.part(part) {
                let side = base.transform.position.x.signum();
                let transform = Transform {
                    position: Vec3::new(
                        side * (LUNG_SPREAD + expansion),
                        base.transform.position.y,
                        base.transform.position.z,
                    ),
                    rotation: Vec3::ZERO,
                    scale: Vec3::splat(1.0 + breathe * gain),
                };
                self.registry.set_transform(part, transform);
            }
        }

        self.airflow.update(elapsed);

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
