//! Parts: named, independently transformable sub-meshes of an organ.

use glam::Vec3;

/// Stable name of a part within its organ's registry.
///
/// Part names are compile-time constants; organs never grow or shed
/// parts after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartId(pub &'static str);

impl std::fmt::Display for PartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Handle into an organ's geometry arena.
///
/// Structurally identical parts (e.g. both hemispheres) may share one
/// handle; the meshes themselves are owned exclusively by the organ that
/// built them and are never aliased across organs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryId(pub(crate) usize);

/// Local transform of a part: position, XYZ Euler rotation, scale.
///
/// Rotation stays in Euler form because the reference poses are authored
/// as per-axis angles; hosts needing quaternions convert at upload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation relative to the organ group.
    pub position: Vec3,
    /// XYZ Euler rotation in radians.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Transform {
    /// The do-nothing transform.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Transform with only a position set.
    #[must_use]
    pub const fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Static material descriptor, set once at construction.
///
/// Dynamic appearance (the heart's pulse shell opacity) is a driver
/// output consumed by the host, not a material mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base color, linear RGB.
    pub color: [f32; 3],
    /// Surface roughness in [0, 1].
    pub roughness: f32,
    /// Metalness in [0, 1].
    pub metalness: f32,
    /// Opacity in [0, 1]; below 1 the host renders the part translucent.
    pub opacity: f32,
    /// Emissive color, linear RGB.
    pub emissive: [f32; 3],
    /// Emissive intensity multiplier.
    pub emissive_intensity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            roughness: 1.0,
            metalness: 0.0,
            opacity: 1.0,
            emissive: [0.0, 0.0, 0.0],
            emissive_intensity: 0.0,
        }
    }
}

impl Material {
    /// Opaque physical material.
    #[must_use]
    pub const fn standard(
        color: [f32; 3],
        roughness: f32,
        metalness: f32,
    ) -> Self {
        Self {
            color,
            roughness,
            metalness,
            opacity: 1.0,
            emissive: [0.0, 0.0, 0.0],
            emissive_intensity: 0.0,
        }
    }

    /// Same material with a translucent opacity.
    #[must_use]
    pub const fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Same material with an emissive component.
    #[must_use]
    pub const fn with_emissive(
        mut self,
        emissive: [f32; 3],
        intensity: f32,
    ) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }
}

/// A named sub-component of an organ.
///
/// The transform is owned exclusively by the organ's animation driver;
/// hosts read it after each `advance` and must not write it back.
#[derive(Debug, Clone)]
pub struct Part {
    /// Registry name.
    pub id: PartId,
    /// Geometry handle into the organ's arena.
    pub geometry: GeometryId,
    /// Static material descriptor.
    pub material: Material,
    /// Current local transform.
    pub transform: Transform,
}

impl Part {
    /// Part at an initial transform.
    #[must_use]
    pub fn new(
        id: PartId,
        geometry: GeometryId,
        material: Material,
        transform: Transform,
    ) -> Self {
        Self {
            id,
            geometry,
            material,
            transform,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_transform() {
        let t = Transform::IDENTITY;
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(Transform::default(), t);
    }

    #[test]
    fn test_material_builders() {
        let m = Material::standard([0.8, 0.0, 0.0], 0.3, 0.7)
            .with_opacity(0.5)
            .with_emissive([1.0, 0.0, 0.0], 0.2);
        assert_eq!(m.opacity, 0.5);
        assert_eq!(m.emissive_intensity, 0.2);
    }

    #[test]
    fn test_part_id_display() {
        assert_eq!(PartId("left_ventricle").to_string(), "left_ventricle");
    }
}
