//! Error taxonomy shared by boundaries, spaces, and the spacer.
//!
//! - `InvalidGeometry`: fewer than three non-colinear points, a self-intersecting
//!   ring, or an engine result that is not a single hole-free polygon.
//! - `InvalidParameter`: non-positive height/radius, non-finite inputs, or arm
//!   widths that collapse a compound shape.
//!
//! Every mutating operation that returns one of these leaves its receiver in the
//! last valid state. A shape that cannot be placed inside a bound is not an
//! error: placement reports it as `false`.

use thiserror::Error;

/// Errors surfaced by geometry construction and mutation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The points do not describe a single simple polygon.
    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    /// An argument is outside its admissible range.
    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },
}

impl GeometryError {
    pub fn invalid_geometry(reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            reason: reason.into(),
        }
    }

    pub fn invalid_parameter(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }
}

/// Library result alias.
pub type Result<T> = std::result::Result<T, GeometryError>;
