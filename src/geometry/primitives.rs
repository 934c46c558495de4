//! Base primitives: UV sphere, capped cylinder, single quad.
//!
//! Invalid parameters fail fast with a crate error rather than being
//! clamped — synthesis only runs at mount, so there is no recovery path
//! worth supporting and no partial geometry may reach the renderer.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::mesh::MeshData;
use crate::error::VisceraError;

fn check_dimension(
    name: &'static str,
    value: f32,
) -> Result<(), VisceraError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(VisceraError::InvalidDimension { name, value })
    }
}

fn check_resolution(
    name: &'static str,
    value: u32,
    min: u32,
) -> Result<(), VisceraError> {
    if value >= min {
        Ok(())
    } else {
        Err(VisceraError::InvalidResolution { name, value, min })
    }
}

/// Generate a UV sphere with smooth analytic normals.
///
/// `segments` is the longitudinal division count, `rings` the latitudinal
/// one. The seam column is duplicated so displacement fields evaluate
/// identically on both sides of it.
///
/// # Errors
///
/// Non-positive or non-finite `radius`, `segments < 3` or `rings < 2`.
pub fn uv_sphere(
    radius: f32,
    segments: u32,
    rings: u32,
) -> Result<MeshData, VisceraError> {
    check_dimension("radius", radius)?;
    check_resolution("segments", segments, 3)?;
    check_resolution("rings", rings, 2)?;

    let mut positions =
        Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
    let mut normals = Vec::with_capacity(positions.capacity());

    for ring in 0..=rings {
        let phi = (ring as f32 / rings as f32) * PI;
        let y = phi.cos();
        let ring_radius = phi.sin();
        for seg in 0..=segments {
            let theta = (seg as f32 / segments as f32) * TAU;
            let dir = Vec3::new(
                ring_radius * theta.cos(),
                y,
                ring_radius * theta.sin(),
            );
            positions.push(dir * radius);
            normals.push(dir.normalize_or(Vec3::Y));
        }
    }

    let stride = segments + 1;
    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * stride + seg;
            let b = a + stride;
            // Counter-clockwise from outside, matching the cylinder.
            indices.extend_from_slice(&[a, a + 1, b]);
            indices.extend_from_slice(&[a + 1, b + 1, b]);
        }
    }

    Ok(MeshData::from_parts(positions, normals, indices))
}

/// Generate a capped cylinder along the Y axis, centered at the origin.
///
/// Distinct top/bottom radii produce the tapered stems and vessels the
/// organ models use. Side normals account for the taper; caps use flat
/// normals with their own vertex ring so the rim stays crisp.
///
/// # Errors
///
/// Non-positive or non-finite radii/height, or `segments < 3`.
pub fn cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
) -> Result<MeshData, VisceraError> {
    check_dimension("radius_top", radius_top)?;
    check_dimension("radius_bottom", radius_bottom)?;
    check_dimension("height", height)?;
    check_resolution("segments", segments, 3)?;

    let half = height * 0.5;
    let slope = (radius_bottom - radius_top) / height;

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    // Side wall: two rings with slanted normals.
    for (y, radius) in [(half, radius_top), (-half, radius_bottom)] {
        for seg in 0..=segments {
            let theta = (seg as f32 / segments as f32) * TAU;
            let (sin_t, cos_t) = theta.sin_cos();
            positions.push(Vec3::new(radius * cos_t, y, radius * sin_t));
            normals.push(
                Vec3::new(cos_t, slope, sin_t).normalize_or(Vec3::Y),
            );
        }
    }
    let stride = segments + 1;
    for seg in 0..segments {
        let a = seg;
        let b = seg + stride;
        indices.extend_from_slice(&[a, a + 1, b]);
        indices.extend_from_slice(&[a + 1, b + 1, b]);
    }

    // Caps: center fan with flat normals on a duplicated rim ring.
    for (y, radius, normal) in
        [(half, radius_top, Vec3::Y), (-half, radius_bottom, -Vec3::Y)]
    {
        let center = positions.len() as u32;
        positions.push(Vec3::new(0.0, y, 0.0));
        normals.push(normal);
        let rim_start = positions.len() as u32;
        for seg in 0..=segments {
            let theta = (seg as f32 / segments as f32) * TAU;
            positions.push(Vec3::new(
                radius * theta.cos(),
                y,
                radius * theta.sin(),
            ));
            normals.push(normal);
        }
        for seg in 0..segments {
            let a = rim_start + seg;
            if normal.y > 0.0 {
                indices.extend_from_slice(&[center, a + 1, a]);
            } else {
                indices.extend_from_slice(&[center, a, a + 1]);
            }
        }
    }

    Ok(MeshData::from_parts(positions, normals, indices))
}

/// Generate a single quad in the XY plane, facing +Z.
///
/// Used for the brain's cross-section inspection plane.
///
/// # Errors
///
/// Non-positive or non-finite `width` or `height`.
pub fn quad(width: f32, height: f32) -> Result<MeshData, VisceraError> {
    check_dimension("width", width)?;
    check_dimension("height", height)?;
    let hw = width * 0.5;
    let hh = height * 0.5;
    let positions = vec![
        Vec3::new(-hw, -hh, 0.0),
        Vec3::new(hw, -hh, 0.0),
        Vec3::new(hw, hh, 0.0),
        Vec3::new(-hw, hh, 0.0),
    ];
    let normals = vec![Vec3::Z; 4];
    let indices = vec![0, 1, 2, 0, 2, 3];
    Ok(MeshData::from_parts(positions, normals, indices))
}
