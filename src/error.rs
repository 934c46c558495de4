//! Crate-level error types.

use std::fmt;

/// Errors produced by the viscera crate.
///
/// All variants are construction-time faults: geometry synthesis and
/// options parsing run once at mount, and nothing on the per-frame path
/// can fail (a frame with missing parts is skipped, not errored).
#[derive(Debug)]
pub enum VisceraError {
    /// A primitive dimension (radius, height, depth) was not positive.
    InvalidDimension {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A tessellation count was below the primitive's minimum.
    InvalidResolution {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: u32,
        /// Minimum accepted value.
        min: u32,
    },
    /// An extrusion profile was malformed (too few points, not closed,
    /// or containing non-finite coordinates).
    MalformedProfile(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for VisceraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { name, value } => {
                write!(f, "invalid geometry dimension: {name} = {value}")
            }
            Self::InvalidResolution { name, value, min } => {
                write!(
                    f,
                    "invalid tessellation: {name} = {value} (minimum {min})"
                )
            }
            Self::MalformedProfile(msg) => {
                write!(f, "malformed extrusion profile: {msg}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for VisceraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VisceraError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = VisceraError::InvalidDimension {
            name: "radius",
            value: -1.0,
        };
        assert!(e.to_string().contains("radius"));

        let e = VisceraError::InvalidResolution {
            name: "segments",
            value: 2,
            min: 3,
        };
        assert!(e.to_string().contains("minimum 3"));
    }
}
