//! Parametric displacement fields for organic surface detail.
//!
//! A field is a weighted sum of sinusoidal basis terms evaluated at each
//! vertex of a base primitive, pushed along the vertex's outward normal.
//! Three frequency bands emulate anatomical folding: primary folds (low
//! frequency, high amplitude), secondary folds (mid/mid) and micro
//! texture (high frequency, low amplitude). Terms can be gated to a
//! coordinate region (half-space conjunction), and a seam band carves a
//! fissure with a smooth quadratic falloff.
//!
//! Fields are plain data and fully deterministic: the same field applied
//! to the same primitive always yields the same mesh.

use glam::Vec3;

use super::mesh::MeshData;

/// A coordinate axis of the base primitive's object space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Left/right.
    X,
    /// Up/down.
    Y,
    /// Front/back.
    Z,
}

impl Axis {
    /// The component of `p` along this axis.
    #[inline]
    #[must_use]
    pub fn component(self, p: Vec3) -> f32 {
        match self {
            Self::X => p.x,
            Self::Y => p.y,
            Self::Z => p.z,
        }
    }
}

/// Waveform selector for basis terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    /// `sin(x)` — zero-centered at the origin; used for sulci.
    Sine,
    /// `cos(x)` — peaked at the origin; used for gyral ridges.
    Cosine,
}

impl Waveform {
    #[inline]
    fn eval(self, x: f32) -> f32 {
        match self {
            Self::Sine => x.sin(),
            Self::Cosine => x.cos(),
        }
    }
}

/// A half-space predicate: vertex passes when its coordinate along
/// `axis` has the requested sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfSpace {
    /// Gating axis.
    pub axis: Axis,
    /// `true` keeps the positive side, `false` the negative side.
    pub positive: bool,
}

impl HalfSpace {
    #[inline]
    fn contains(self, p: Vec3) -> bool {
        let c = self.axis.component(p);
        if self.positive {
            c > 0.0
        } else {
            c < 0.0
        }
    }
}

/// `base(p·a·fa + p·b·fb) * envelope(p·c·fc) * amplitude`
///
/// The workhorse basis: a carrier wave over one axis, frequency-coupled
/// to a second, and amplitude-modulated by an envelope wave over a third.
/// A zero frequency neutralizes the corresponding factor (`sin(0) = 0`
/// kills a term; `cos(0) = 1` passes it through), which lets single-wave
/// regional terms reuse this struct with a cosine envelope at zero
/// frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicTerm {
    /// Carrier waveform.
    pub base: Waveform,
    /// Carrier axis and angular frequency.
    pub phase: (Axis, f32),
    /// Coupled axis and angular frequency, added into the carrier phase.
    pub couple: (Axis, f32),
    /// Envelope waveform.
    pub envelope: Waveform,
    /// Envelope axis and angular frequency.
    pub envelope_phase: (Axis, f32),
    /// Peak displacement contribution.
    pub amplitude: f32,
}

impl HarmonicTerm {
    #[inline]
    fn eval(&self, p: Vec3) -> f32 {
        let carrier = self.phase.0.component(p) * self.phase.1
            + self.couple.0.component(p) * self.couple.1;
        let envelope = self
            .envelope
            .eval(self.envelope_phase.0.component(p) * self.envelope_phase.1);
        self.base.eval(carrier) * envelope * self.amplitude
    }
}

/// `sin(x·fx) * sin(y·fy) * sin(z·fz) * amplitude` — isotropic micro
/// texture that breaks up any residual regularity in the harmonic bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrainTerm {
    /// Per-axis angular frequencies.
    pub frequency: Vec3,
    /// Peak displacement contribution.
    pub amplitude: f32,
}

impl GrainTerm {
    #[inline]
    fn eval(&self, p: Vec3) -> f32 {
        (p.x * self.frequency.x).sin()
            * (p.y * self.frequency.y).sin()
            * (p.z * self.frequency.z).sin()
            * self.amplitude
    }
}

/// One basis function of a displacement field.
#[derive(Debug, Clone, PartialEq)]
pub enum BasisTerm {
    /// Carrier/envelope harmonic.
    Harmonic(HarmonicTerm),
    /// Triple-product micro texture.
    Grain(GrainTerm),
}

impl BasisTerm {
    #[inline]
    fn eval(&self, p: Vec3) -> f32 {
        match self {
            Self::Harmonic(h) => h.eval(p),
            Self::Grain(g) => g.eval(p),
        }
    }
}

/// A basis term with its blend weight and optional region gate.
///
/// The gate is a conjunction: every half-space must contain the vertex
/// for the term to contribute (e.g. the parietal lobe term requires
/// `y < 0` and `z > 0`).
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedTerm {
    /// The basis function.
    pub term: BasisTerm,
    /// Blend weight applied to the term's value.
    pub weight: f32,
    /// Half-space conjunction gating the term, if any.
    pub region: Vec<HalfSpace>,
}

impl WeightedTerm {
    /// Ungated term.
    #[must_use]
    pub fn new(term: BasisTerm, weight: f32) -> Self {
        Self {
            term,
            weight,
            region: Vec::new(),
        }
    }

    /// Region-gated term.
    #[must_use]
    pub fn gated(
        term: BasisTerm,
        weight: f32,
        region: Vec<HalfSpace>,
    ) -> Self {
        Self {
            term,
            weight,
            region,
        }
    }

    #[inline]
    fn eval(&self, p: Vec3) -> f32 {
        if self.region.iter().any(|h| !h.contains(p)) {
            return 0.0;
        }
        self.term.eval(p) * self.weight
    }
}

/// A fissure: suppresses the surface inside a band around a seam plane.
///
/// Inside `|p·axis| < half_width` the band subtracts
/// `(1 - (d/half_width)²) · depth · (sin(p·ripple)·0.5 + 0.5)`.
/// The quadratic falloff reaches zero exactly at the band edge, so the
/// fissure blends into the folded surface with no crease.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeamBand {
    /// Axis perpendicular to the seam plane.
    pub axis: Axis,
    /// Half-width of the suppression band.
    pub half_width: f32,
    /// Maximum carve depth at the seam plane.
    pub depth: f32,
    /// Ripple axis and frequency modulating the depth along the seam.
    pub ripple: (Axis, f32),
}

impl SeamBand {
    #[inline]
    fn eval(&self, p: Vec3) -> f32 {
        let d = self.axis.component(p).abs();
        if d >= self.half_width {
            return 0.0;
        }
        let t = d / self.half_width;
        let falloff = 1.0 - t * t;
        let ripple =
            (self.ripple.0.component(p) * self.ripple.1).sin() * 0.5 + 0.5;
        -falloff * self.depth * ripple
    }
}

/// A complete displacement field: weighted basis terms, an optional seam
/// band, and a hard bound on total per-vertex displacement.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplacementField {
    /// Weighted basis terms, summed per vertex.
    pub terms: Vec<WeightedTerm>,
    /// Optional fissure carve.
    pub seam: Option<SeamBand>,
    /// Clamp on the signed total displacement magnitude. Guarantees the
    /// displaced surface cannot invert or self-intersect beyond this
    /// bound regardless of how the terms interfere.
    pub max_offset: f32,
}

impl DisplacementField {
    /// Field with no seam band.
    #[must_use]
    pub fn new(terms: Vec<WeightedTerm>, max_offset: f32) -> Self {
        Self {
            terms,
            seam: None,
            max_offset,
        }
    }

    /// Attach a seam band.
    #[must_use]
    pub fn with_seam(mut self, seam: SeamBand) -> Self {
        self.seam = Some(seam);
        self
    }

    /// Signed total displacement at a point of the base surface, clamped
    /// to `±max_offset`.
    #[must_use]
    pub fn sample(&self, p: Vec3) -> f32 {
        let mut total: f32 = self.terms.iter().map(|t| t.eval(p)).sum();
        if let Some(seam) = &self.seam {
            total += seam.eval(p);
        }
        total.clamp(-self.max_offset, self.max_offset)
    }

    /// Displace every vertex of `mesh` along its outward normal by the
    /// sampled field value, then recompute normals from the new
    /// positions. Correct shading requires the recompute; the stale
    /// analytic normals of the base primitive no longer match the
    /// displaced surface.
    pub fn apply(&self, mesh: &mut MeshData) {
        let normals: Vec<Vec3> = mesh.normals().to_vec();
        for (position, normal) in
            mesh.positions_mut().iter_mut().zip(normals)
        {
            let offset = self.sample(*position);
            *position += normal * offset;
        }
        mesh.recompute_normals();
    }
}
