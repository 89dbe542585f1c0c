//! Tolerance defaults and placement budget.
//!
//! Policy
//! - Tolerances are fixed constants to avoid tolerance juggling at call sites.
//! - Colinearity and turn tests are relative to edge lengths (scale-agnostic);
//!   only duplicate-point removal uses an absolute distance.

/// Relative slack for colinearity: the sine of a corner, or twice a ring's
/// area over its squared extent.
pub(crate) const COLINEAR_EPS: f64 = 1e-9;
/// Relative slack on the sine of a turn when classifying it as straight.
pub(crate) const ANGLE_EPS: f64 = 1e-12;
/// Coordinate equality slack used for duplicate removal after engine ops.
pub(crate) const COORD_EPS: f64 = 1e-9;
/// Rejection-sampling budget for placement.
pub const PLACEMENT_TRIALS: usize = 100;
/// Upper bound on the copies a single `Spacer` call may produce.
pub const MAX_COPIES: usize = 100_000;

/// Spacer placement configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementCfg {
    /// Number of random candidate positions tried before giving up.
    pub trials: usize,
}

impl Default for PlacementCfg {
    fn default() -> Self {
        Self {
            trials: PLACEMENT_TRIALS,
        }
    }
}
