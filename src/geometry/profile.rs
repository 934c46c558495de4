//! Closed 2D bezier profiles extruded into bevelled solids.
//!
//! Covers the brain ventricle geometry: a small closed shape traced with
//! cubic beziers, extruded along +Z with rounded bevel rings at both
//! faces. Validation is strict — this runs once at mount and a malformed
//! profile must never reach the renderer.

use glam::{Vec2, Vec3};

use super::mesh::MeshData;
use crate::error::VisceraError;

/// Polyline subdivisions per cubic bezier segment.
const CURVE_SEGMENTS: u32 = 8;

/// A closed 2D outline traced with `move_to` / `bezier_curve_to`.
///
/// The path is flattened to a polyline as it is built. It is considered
/// closed when the final on-curve point returns to the start (within a
/// small epsilon); the duplicate closing point is dropped at extrusion.
#[derive(Debug, Clone, Default)]
pub struct ProfilePath {
    points: Vec<Vec2>,
}

impl ProfilePath {
    /// Start an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Place the pen at the path's starting point.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.points.clear();
        self.points.push(Vec2::new(x, y));
    }

    /// Append a cubic bezier from the current point through two control
    /// points, flattened to [`CURVE_SEGMENTS`] polyline steps.
    pub fn bezier_curve_to(
        &mut self,
        c1: (f32, f32),
        c2: (f32, f32),
        end: (f32, f32),
    ) {
        let p0 = self.points.last().copied().unwrap_or(Vec2::ZERO);
        let p1 = Vec2::new(c1.0, c1.1);
        let p2 = Vec2::new(c2.0, c2.1);
        let p3 = Vec2::new(end.0, end.1);
        for step in 1..=CURVE_SEGMENTS {
            let t = step as f32 / CURVE_SEGMENTS as f32;
            let omt = 1.0 - t;
            let point = p0 * (omt * omt * omt)
                + p1 * (3.0 * t * omt * omt)
                + p2 * (3.0 * t * t * omt)
                + p3 * (t * t * t);
            self.points.push(point);
        }
    }

    /// Flattened on-curve points, including any duplicate closing point.
    #[must_use]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Contour with the duplicate closing point removed, validated for
    /// extrusion.
    fn contour(&self) -> Result<Vec<Vec2>, VisceraError> {
        let mut pts = self.points.clone();
        for p in &pts {
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(VisceraError::MalformedProfile(
                    "non-finite profile coordinate".into(),
                ));
            }
        }
        if let (Some(first), Some(last)) = (pts.first(), pts.last()) {
            if pts.len() > 1 && first.distance(*last) < 1e-5 {
                let _ = pts.pop();
            }
        }
        if pts.len() < 3 {
            return Err(VisceraError::MalformedProfile(format!(
                "need at least 3 contour points, have {}",
                pts.len()
            )));
        }
        // Normalize to counter-clockwise so the extruded side walls wind
        // outward regardless of the direction the profile was traced.
        let doubled_area: f32 = pts
            .iter()
            .zip(pts.iter().cycle().skip(1))
            .take(pts.len())
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum();
        if doubled_area < 0.0 {
            pts.reverse();
        }
        Ok(pts)
    }
}

/// Extrusion parameters, mirroring the reference ventricle settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrudeOptions {
    /// Ring count along the straight body of the extrusion.
    pub steps: u32,
    /// Extrusion depth along +Z.
    pub depth: f32,
    /// How far each bevel extends beyond the faces along Z.
    pub bevel_thickness: f32,
    /// How far the contour expands outward at the bevelled faces.
    pub bevel_size: f32,
    /// Ring count per bevel.
    pub bevel_segments: u32,
}

impl Default for ExtrudeOptions {
    fn default() -> Self {
        Self {
            steps: 2,
            depth: 0.1,
            bevel_thickness: 0.05,
            bevel_size: 0.02,
            bevel_segments: 5,
        }
    }
}

/// Extrude a closed profile along +Z with rounded bevels and capped ends.
///
/// Rings run from `-bevel_thickness` to `depth + bevel_thickness`; the
/// bevel rings ease the contour outward with a quadratic profile so the
/// edge reads as rounded rather than chamfered. Normals are derived by
/// the shared area-weighted recompute, matching the displaced primitives.
///
/// # Errors
///
/// Non-positive depth, zero steps, or a malformed profile (fewer than 3
/// contour points, non-finite coordinates).
pub fn extrude_profile(
    profile: &ProfilePath,
    opts: &ExtrudeOptions,
) -> Result<MeshData, VisceraError> {
    if opts.depth <= 0.0 || !opts.depth.is_finite() {
        return Err(VisceraError::InvalidDimension {
            name: "depth",
            value: opts.depth,
        });
    }
    if opts.steps == 0 {
        return Err(VisceraError::InvalidResolution {
            name: "steps",
            value: 0,
            min: 1,
        });
    }
    let contour = profile.contour()?;
    let n = contour.len();

    let centroid =
        contour.iter().copied().sum::<Vec2>() / n as f32;
    // Outward direction per contour point, used to push bevel rings out.
    let outward: Vec<Vec2> = contour
        .iter()
        .map(|p| (*p - centroid).normalize_or(Vec2::X))
        .collect();

    // Ring schedule: (z, contour expansion).
    let mut rings: Vec<(f32, f32)> = Vec::new();
    let bevels = opts.bevel_segments.max(1);
    if opts.bevel_thickness > 0.0 {
        for k in 0..bevels {
            let s = k as f32 / bevels as f32;
            let ease = 1.0 - (1.0 - s) * (1.0 - s);
            rings.push((
                -opts.bevel_thickness * (1.0 - s),
                opts.bevel_size * ease,
            ));
        }
    }
    for k in 0..=opts.steps {
        let s = k as f32 / opts.steps as f32;
        rings.push((opts.depth * s, opts.bevel_size));
    }
    if opts.bevel_thickness > 0.0 {
        for k in 1..=bevels {
            let s = k as f32 / bevels as f32;
            let ease = 1.0 - s * s;
            rings.push((
                opts.depth + opts.bevel_thickness * s,
                opts.bevel_size * ease,
            ));
        }
    }

    let mut positions = Vec::with_capacity(rings.len() * n + 2);
    let normals_placeholder = Vec3::Z;
    for &(z, expand) in &rings {
        for (point, out) in contour.iter().zip(&outward) {
            let p2 = *point + *out * expand;
            positions.push(Vec3::new(p2.x, p2.y, z));
        }
    }

    let mut indices = Vec::new();
    let ring_count = rings.len();
    for ring in 0..ring_count - 1 {
        let base = (ring * n) as u32;
        let next = base + n as u32;
        for j in 0..n as u32 {
            let j1 = (j + 1) % n as u32;
            // Contour is counter-clockwise, so this winds outward.
            indices.extend_from_slice(&[base + j, base + j1, next + j]);
            indices.extend_from_slice(&[base + j1, next + j1, next + j]);
        }
    }

    // Cap fans from the centroid at both extreme rings.
    let front_center = positions.len() as u32;
    positions.push(Vec3::new(centroid.x, centroid.y, rings[0].0));
    let back_center = positions.len() as u32;
    positions.push(Vec3::new(
        centroid.x,
        centroid.y,
        rings[ring_count - 1].0,
    ));
    let back_base = ((ring_count - 1) * n) as u32;
    for j in 0..n as u32 {
        let j1 = (j + 1) % n as u32;
        indices.extend_from_slice(&[front_center, j1, j]);
        indices.extend_from_slice(&[
            back_center,
            back_base + j,
            back_base + j1,
        ]);
    }

    let normals = vec![normals_placeholder; positions.len()];
    let mut mesh = MeshData::from_parts(positions, normals, indices);
    mesh.recompute_normals();
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The reference ventricle outline.
    fn ventricle_profile() -> ProfilePath {
        let mut shape = ProfilePath::new();
        shape.move_to(0.0, 0.0);
        shape.bezier_curve_to((0.1, 0.1), (0.2, 0.15), (0.15, 0.2));
        shape.bezier_curve_to((0.1, 0.25), (0.05, 0.2), (0.0, 0.15));
        shape.bezier_curve_to((-0.05, 0.1), (-0.1, 0.05), (0.0, 0.0));
        shape
    }

    #[test]
    fn ventricle_profile_extrudes() {
        let mesh =
            extrude_profile(&ventricle_profile(), &ExtrudeOptions::default())
                .unwrap();
        assert!(mesh.vertex_count() > 0);
        assert!(mesh.triangle_count() > 0);
        // All z values within [-bevel_thickness, depth + bevel_thickness].
        for p in mesh.positions() {
            assert!(p.z >= -0.05 - 1e-6 && p.z <= 0.15 + 1e-6);
        }
    }

    #[test]
    fn normals_are_unit_length() {
        let mesh =
            extrude_profile(&ventricle_profile(), &ExtrudeOptions::default())
                .unwrap();
        for n in mesh.normals() {
            assert!(
                (n.length() - 1.0).abs() < 1e-4,
                "non-unit normal {n:?}"
            );
        }
    }

    /// Divergence-theorem volume; positive only when every triangle winds
    /// counter-clockwise seen from outside.
    fn signed_volume(mesh: &MeshData) -> f32 {
        mesh.indices()
            .chunks_exact(3)
            .map(|tri| {
                let p0 = mesh.positions()[tri[0] as usize];
                let p1 = mesh.positions()[tri[1] as usize];
                let p2 = mesh.positions()[tri[2] as usize];
                p0.dot(p1.cross(p2))
            })
            .sum::<f32>()
            / 6.0
    }

    #[test]
    fn extrusion_winds_outward() {
        let mesh =
            extrude_profile(&ventricle_profile(), &ExtrudeOptions::default())
                .unwrap();
        let volume = signed_volume(&mesh);
        assert!(volume > 0.0, "extrusion winds inward: volume {volume}");
    }

    #[test]
    fn clockwise_profile_still_winds_outward() {
        // The same outline traced in the opposite direction.
        let mut shape = ProfilePath::new();
        shape.move_to(0.0, 0.0);
        shape.bezier_curve_to((-0.1, 0.05), (-0.05, 0.1), (0.0, 0.15));
        shape.bezier_curve_to((0.05, 0.2), (0.1, 0.25), (0.15, 0.2));
        shape.bezier_curve_to((0.2, 0.15), (0.1, 0.1), (0.0, 0.0));
        let mesh =
            extrude_profile(&shape, &ExtrudeOptions::default()).unwrap();
        assert!(signed_volume(&mesh) > 0.0);
    }

    #[test]
    fn too_few_points_is_malformed() {
        let mut shape = ProfilePath::new();
        shape.move_to(0.0, 0.0);
        let err =
            extrude_profile(&shape, &ExtrudeOptions::default()).unwrap_err();
        assert!(matches!(err, VisceraError::MalformedProfile(_)));
    }

    #[test]
    fn non_finite_point_is_malformed() {
        let mut shape = ProfilePath::new();
        shape.move_to(0.0, 0.0);
        shape.bezier_curve_to((f32::NAN, 0.1), (0.2, 0.15), (0.15, 0.2));
        shape.bezier_curve_to((0.1, 0.25), (0.05, 0.2), (0.0, 0.0));
        assert!(
            extrude_profile(&shape, &ExtrudeOptions::default()).is_err()
        );
    }

    #[test]
    fn bad_depth_is_rejected() {
        let opts = ExtrudeOptions {
            depth: 0.0,
            ..ExtrudeOptions::default()
        };
        assert!(matches!(
            extrude_profile(&ventricle_profile(), &opts),
            Err(VisceraError::InvalidDimension { name: "depth", .. })
        ));
    }
}
