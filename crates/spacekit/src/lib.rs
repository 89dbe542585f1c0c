//! Prismatic spaces from 2D footprints.
//!
//! Layers, leaves first:
//! - `geom2`: stateless planar algorithms and the `geo` adapter.
//! - `boundary`: validated counter-clockwise footprint with an elevation.
//! - `vertex`: per-corner angle/convexity/normal records.
//! - `space`: footprint + height, derived ceiling/vertices, surface meshes.
//! - `spacer`: copies, rows, stacks, and randomized placement of spaces.
//!
//! API Policy
//! - Mutations return `Result<(), GeometryError>` and never leave a value
//!   half-updated; placement returns `bool` because a miss is a normal outcome.
//! - Randomized calls accept any `rand::Rng`; seeded `StdRng` makes them replayable.

pub mod boundary;
pub mod cfg;
pub mod error;
pub mod geom2;
pub mod mesh;
pub mod space;
pub mod spacer;
pub mod vertex;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use boundary::{BarArms, Boundary, CrossArms};
pub use error::{GeometryError, Result};
pub use nalgebra::{Point3, Vector2 as Vec2, Vector3 as Vec3};
pub use space::Space;
pub use spacer::{Axis, Spacer};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::boundary::{BarArms, Boundary, CrossArms};
    pub use crate::cfg::PlacementCfg;
    pub use crate::error::{GeometryError, Result};
    pub use crate::geom2::rand::ReplayToken;
    pub use crate::geom2::{Affine2, Angles, Compass, Rect};
    pub use crate::mesh::{Mesh, MeshGraphic};
    pub use crate::space::Space;
    pub use crate::spacer::{Axis, Spacer};
    pub use crate::vertex::Vertex;
    pub use nalgebra::{Point3, Vector2 as Vec2, Vector3 as Vec3};
}
