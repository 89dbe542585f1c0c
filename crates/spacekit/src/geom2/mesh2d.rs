//! Planar triangulation of a boundary ring.
//!
//! Ear clipping via `earcutr`, then a footprint filter: a triangle survives
//! only if its centroid lies inside the source polygon. Surviving triangles
//! are re-wound counter-clockwise.

use nalgebra::Vector2;

use super::{engine, util::cross};
use crate::error::{GeometryError, Result};

/// Triangulated planar ring: `indices` reference `vertices`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh2d {
    pub vertices: Vec<Vector2<f64>>,
    pub indices: Vec<[u32; 3]>,
}

impl Mesh2d {
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Sum of triangle areas.
    pub fn area(&self) -> f64 {
        self.indices
            .iter()
            .map(|t| {
                let [a, b, c] = t.map(|i| self.vertices[i as usize]);
                0.5 * cross(a, b, c).abs()
            })
            .sum()
    }
}

/// Triangulate the open ring `points`.
pub fn get_mesh_2d(points: &[Vector2<f64>]) -> Result<Mesh2d> {
    if points.len() < 3 {
        return Err(GeometryError::invalid_geometry(format!(
            "cannot triangulate {} points",
            points.len()
        )));
    }
    let flat: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();
    let raw = earcutr::earcut(&flat, &[], 2)
        .map_err(|e| GeometryError::invalid_geometry(format!("triangulation failed: {e:?}")))?;

    let poly = engine::to_polygon(points);
    let mut indices = Vec::with_capacity(raw.len() / 3);
    for tri in raw.chunks_exact(3) {
        let (a, b, c) = (points[tri[0]], points[tri[1]], points[tri[2]]);
        let turn = cross(a, b, c);
        if turn == 0.0 {
            continue;
        }
        let center = (a + b + c) / 3.0;
        if !geo::Contains::contains(&poly, &geo::Point::new(center.x, center.y)) {
            continue;
        }
        let t = [tri[0] as u32, tri[1] as u32, tri[2] as u32];
        indices.push(if turn > 0.0 { t } else { [t[0], t[2], t[1]] });
    }
    Ok(Mesh2d {
        vertices: points.to_vec(),
        indices,
    })
}
