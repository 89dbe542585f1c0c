//! Triangle mesh snapshot of a space's surfaces.
//!
//! Meshes are never stored on a `Space`; each request builds a fresh one so it
//! always matches the current geometry. Normals are per vertex: every surface
//! gets its own copies of shared corners so each copy can carry that surface's
//! outward normal.

use nalgebra::{Point3, Vector3};
use serde::Serialize;

use crate::error::{GeometryError, Result};

/// Indexed triangle mesh with one normal per vertex.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Mesh {
    vertices: Vec<Point3<f64>>,
    normals: Vec<Vector3<f64>>,
    indices: Vec<[u32; 3]>,
}

/// Flat buffers for a renderer: xyz triples, normal triples, index triples.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MeshGraphic {
    pub vertices: Vec<f64>,
    pub normals: Vec<f64>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(triangle_count),
        }
    }

    /// Adds a vertex with its normal and returns its index.
    pub fn add_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        self.normals.push(normal);
        index
    }

    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.indices.push([v0, v1, v2]);
    }

    /// Appends `other`, re-basing its indices past this mesh's vertices.
    pub fn merge(&mut self, other: &Mesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|t| t.map(|i| i + base)));
    }

    #[inline]
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    #[inline]
    pub fn normals(&self) -> &[Vector3<f64>] {
        &self.normals
    }

    #[inline]
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Index and normal buffers agree with the vertex buffer.
    pub fn validate(&self) -> Result<()> {
        if self.normals.len() != self.vertices.len() {
            return Err(GeometryError::invalid_geometry(format!(
                "{} normals for {} vertices",
                self.normals.len(),
                self.vertices.len()
            )));
        }
        let n = self.vertices.len() as u32;
        if let Some(t) = self.indices.iter().find(|t| t.iter().any(|&i| i >= n)) {
            return Err(GeometryError::invalid_geometry(format!(
                "triangle {t:?} references a vertex past {n}"
            )));
        }
        Ok(())
    }

    /// Unit normal of triangle `tri` from its winding; `None` if `tri` or one
    /// of its indices is out of range. Degenerate triangles give zero.
    pub fn face_normal(&self, tri: usize) -> Option<Vector3<f64>> {
        let idx = self.indices.get(tri)?;
        let a = self.vertices.get(idx[0] as usize)?;
        let b = self.vertices.get(idx[1] as usize)?;
        let c = self.vertices.get(idx[2] as usize)?;
        Some(
            (b - a)
                .cross(&(c - a))
                .try_normalize(0.0)
                .unwrap_or_else(Vector3::zeros),
        )
    }

    /// Signed enclosed volume (divergence theorem); positive when every face
    /// winds counter-clockwise seen from outside.
    pub fn signed_volume(&self) -> f64 {
        self.indices
            .iter()
            .map(|t| {
                let [a, b, c] = t.map(|i| self.vertices[i as usize].coords);
                a.dot(&b.cross(&c)) / 6.0
            })
            .sum()
    }

    /// Flat renderer buffers.
    pub fn to_graphic(&self) -> MeshGraphic {
        MeshGraphic {
            vertices: self.vertices.iter().flat_map(|p| [p.x, p.y, p.z]).collect(),
            normals: self.normals.iter().flat_map(|n| [n.x, n.y, n.z]).collect(),
            indices: self.indices.iter().flatten().copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::point;

    fn triangle() -> Mesh {
        let mut m = Mesh::new();
        let up = Vector3::z();
        let a = m.add_vertex(point![0.0, 0.0, 0.0], up);
        let b = m.add_vertex(point![1.0, 0.0, 0.0], up);
        let c = m.add_vertex(point![0.0, 1.0, 0.0], up);
        m.add_triangle(a, b, c);
        m
    }

    #[test]
    fn merge_rebases_indices() {
        let mut m = triangle();
        m.merge(&triangle());
        assert_eq!(m.vertex_count(), 6);
        assert_eq!(m.indices()[1], [3, 4, 5]);
        assert!(m.validate().is_ok());
        assert!((m.face_normal(1).unwrap() - Vector3::z()).norm() < 1e-12);
    }

    #[test]
    fn graphic_buffers_are_flat() {
        let g = triangle().to_graphic();
        assert_eq!(g.vertices.len(), 9);
        assert_eq!(g.normals[2], 1.0);
        assert_eq!(g.indices, vec![0, 1, 2]);
    }

    #[test]
    fn validate_catches_dangling_index() {
        let mut m = triangle();
        m.add_triangle(0, 1, 7);
        assert!(matches!(m.validate(), Err(GeometryError::InvalidGeometry { .. })));
        assert!(m.face_normal(1).is_none());
        assert!(m.face_normal(9).is_none());
        assert!(m.face_normal(0).is_some());
    }
}
