//! Stateless 2D geometry utilities.
//!
//! Purpose
//! - Free functions for the planar algorithms every boundary relies on:
//!   colinearity, monotone-chain hull, corner angles, mirroring, colinear-point
//!   removal, compass lookup on a bounding box, and footprint triangulation.
//! - No shared state: callers own their points, these functions only read them.
//!
//! Why free functions
//! - Nothing here needs configuration beyond the fixed tolerances in `cfg`,
//!   so a utility object would only add plumbing.
//!
//! References
//! - Code cross-refs: `Boundary`, `Vertex`, `engine`, `mesh2d::get_mesh_2d`

pub mod engine;
pub mod mesh2d;
pub mod rand;
mod types;
mod util;

pub use mesh2d::{get_mesh_2d, Mesh2d};
pub use types::{Affine2, Angles, Compass, Rect};
pub use util::{
    are_colinear, box_points, convex_hull, get_angles, is_convex_ring, midpoint, mirror_points_2d,
    regular_polygon, rmv_colinear, signed_area2,
};

#[cfg(test)]
mod tests;
