use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result alias for fix computations
pub type FixResult<T> = Result<T, FixError>;

/// Failure classification for a bearing fix
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FixError {
    /// A bearing or coordinate is missing, unparseable, non-finite, or out of range.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// A station name has no entry in the registry.
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// No unique geometric answer exists for the supplied sightings.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(DegeneracyKind),
}

impl FixError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        FixError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Short machine-friendly name of the error class
    pub fn kind_name(&self) -> &'static str {
        match self {
            FixError::InvalidInput { .. } => "InvalidInput",
            FixError::UnknownStation(_) => "UnknownStation",
            FixError::DegenerateGeometry(_) => "DegenerateGeometry",
        }
    }
}

/// Which geometric construction had no unique solution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegeneracyKind {
    /// The two great circles coincide, so they share every point.
    CoincidentCircles,
    /// The resultant of the intersection vectors has zero length.
    ZeroResultant,
}

impl fmt::Display for DegeneracyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegeneracyKind::CoincidentCircles => {
                write!(f, "lines of sight lie on the same great circle")
            }
            DegeneracyKind::ZeroResultant => {
                write!(f, "intersection points cancel out, spherical mean is undefined")
            }
        }
    }
}
