//! Centralized organ construction/animation options with TOML support.
//!
//! All tweakable settings (tessellation detail, particle cardinality,
//! pose-blend smoothing factors) are consolidated here. Options serialize
//! to/from TOML so hosts can ship presets; every sub-struct uses
//! `#[serde(default)]` so partial files work.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::VisceraError;

/// Tessellation detail for one-shot geometry synthesis.
///
/// Higher counts only affect construction cost; the per-frame path never
/// touches vertex data. The defaults match the hand-tuned reference models.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DetailOptions {
    /// Cortex sphere subdivisions (segments and rings) per hemisphere.
    pub cortex_segments: u32,
    /// Cerebellum sphere subdivisions.
    pub cerebellum_segments: u32,
    /// Heart chamber (ventricle) sphere subdivisions.
    pub chamber_segments: u32,
    /// Heart atrium sphere subdivisions.
    pub atrium_segments: u32,
    /// Lung lobe sphere subdivisions.
    pub lobe_segments: u32,
    /// Radial segments for vessels (aorta, pulmonary artery).
    pub vessel_segments: u32,
    /// Radial segments for bronchi.
    pub bronchus_segments: u32,
    /// Radial segments for the trachea.
    pub trachea_segments: u32,
    /// Number of lung air particles.
    pub air_particles: u32,
    /// Number of brain neural pathway points.
    pub pathway_points: u32,
}

impl Default for DetailOptions {
    fn default() -> Self {
        Self {
            cortex_segments: 384,
            cerebellum_segments: 192,
            chamber_segments: 64,
            atrium_segments: 32,
            lobe_segments: 64,
            vessel_segments: 16,
            bronchus_segments: 8,
            trachea_segments: 16,
            air_particles: 50,
            pathway_points: 2000,
        }
    }
}

impl DetailOptions {
    /// Low-detail preset for tests and headless tooling.
    #[must_use]
    pub fn coarse() -> Self {
        Self {
            cortex_segments: 24,
            cerebellum_segments: 16,
            chamber_segments: 12,
            atrium_segments: 8,
            lobe_segments: 12,
            vessel_segments: 8,
            bronchus_segments: 6,
            trachea_segments: 8,
            air_particles: 50,
            pathway_points: 2000,
        }
    }
}

/// Pose-blend smoothing factors, expressed per reference frame (60 fps).
///
/// The driver rescales each factor by the actual frame delta (see
/// [`crate::animation::pose::smoothing_alpha`]) so convergence speed does
/// not depend on frame rate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationOptions {
    /// Heart group scale/position blend factor.
    pub heart_smoothing: f32,
    /// Lungs group scale/position blend factor.
    pub lungs_smoothing: f32,
    /// Brain group scale/position blend factor.
    pub brain_smoothing: f32,
    /// Brain hemisphere per-part scale blend factor.
    pub hemisphere_smoothing: f32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            heart_smoothing: 0.1,
            lungs_smoothing: 0.1,
            brain_smoothing: 0.05,
            hemisphere_smoothing: 0.1,
        }
    }
}

/// Top-level options container passed to organ constructors.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default,
)]
#[serde(default)]
pub struct OrganOptions {
    /// Tessellation detail.
    pub detail: DetailOptions,
    /// Smoothing factors.
    pub animation: AnimationOptions,
}

impl OrganOptions {
    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Malformed TOML or mistyped fields.
    pub fn from_toml(content: &str) -> Result<Self, VisceraError> {
        toml::from_str(content)
            .map_err(|e| VisceraError::OptionsParse(e.to_string()))
    }

    /// Serialize options to a pretty-printed TOML string.
    ///
    /// # Errors
    ///
    /// Serializer failure (should not occur for well-formed options).
    pub fn to_toml(&self) -> Result<String, VisceraError> {
        toml::to_string_pretty(self)
            .map_err(|e| VisceraError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// The file cannot be read, or its contents fail to parse.
    pub fn load(path: &Path) -> Result<Self, VisceraError> {
        let content = std::fs::read_to_string(path).map_err(VisceraError::Io)?;
        Self::from_toml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = OrganOptions::default();
        let toml_str = opts.to_toml().unwrap();
        let parsed = OrganOptions::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let parsed =
            OrganOptions::from_toml("[detail]\ncortex_segments = 48\n")
                .unwrap();
        assert_eq!(parsed.detail.cortex_segments, 48);
        assert_eq!(parsed.detail.lobe_segments, 64);
        assert_eq!(parsed.animation, AnimationOptions::default());
    }

    #[test]
    fn garbage_toml_is_a_parse_error() {
        let err = OrganOptions::from_toml("not = [valid").unwrap_err();
        assert!(matches!(err, VisceraError::OptionsParse(_)));
    }
}
