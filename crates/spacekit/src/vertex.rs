//! Per-corner angle, convexity, and normal records.
//!
//! A `Vertex` is derived from a point, its previous and next neighbours, and a
//! reference direction (the outward side of the surface it belongs to). The
//! neighbours are projected onto the plane orthogonal to the reference, so
//! "counter-clockwise" always means counter-clockwise seen from outside.
//!
//! Normal: `normalize((next − p) × (prev − p))`, flipped to agree with the
//! reference. Floors, ceilings, and arbitrarily tilted side quads all use this
//! one definition.

use nalgebra::{Point3, Vector2, Vector3};
use serde::Serialize;

use crate::geom2::get_angles;

/// Derived, read-only corner data.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Vertex {
    pub point: Point3<f64>,
    pub convex: bool,
    /// Interior angle in radians.
    pub interior: f64,
    /// `2π − interior`.
    pub exterior: f64,
    /// Unit outward normal.
    pub normal: Vector3<f64>,
}

impl Vertex {
    /// Corner at `point` on a surface whose outward side is `reference`.
    pub fn new(
        point: Point3<f64>,
        prev: Point3<f64>,
        next: Point3<f64>,
        reference: Vector3<f64>,
    ) -> Self {
        let r = reference.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::z);
        let (u, v) = plane_frame(&r);
        let project = |q: Point3<f64>| {
            let d = q - point;
            Vector2::new(d.dot(&u), d.dot(&v))
        };
        let angles = get_angles(Vector2::zeros(), project(prev), project(next));

        let raw = (next - point).cross(&(prev - point));
        let mut normal = raw.try_normalize(f64::EPSILON).unwrap_or(r);
        if normal.dot(&r) < 0.0 {
            normal = -normal;
        }
        Self {
            point,
            convex: angles.convex,
            interior: angles.interior,
            exterior: angles.exterior,
            normal,
        }
    }

    /// Corner of a volume whose opposite-surface neighbour is `opposite`;
    /// the outward side points away from it.
    pub fn with_opposite(
        point: Point3<f64>,
        prev: Point3<f64>,
        next: Point3<f64>,
        opposite: Point3<f64>,
    ) -> Self {
        Self::new(point, prev, next, point - opposite)
    }

    pub fn interior_degrees(&self) -> f64 {
        self.interior.to_degrees()
    }

    pub fn exterior_degrees(&self) -> f64 {
        self.exterior.to_degrees()
    }
}

/// Right-handed in-plane basis `(u, v)` with `u × v = r` for a unit `r`.
fn plane_frame(r: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let helper = if r.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let u = (helper - r * r.dot(&helper)).normalize();
    let v = r.cross(&u);
    (u, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::point;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn ceiling_corner_points_up() {
        let v = Vertex::new(
            point![0.0, 0.0, 5.0],
            point![0.0, 10.0, 5.0],
            point![10.0, 0.0, 5.0],
            Vector3::z(),
        );
        assert!(v.convex);
        assert!((v.interior - FRAC_PI_2).abs() < 1e-12);
        assert!((v.interior_degrees() - 90.0).abs() < 1e-9);
        assert!((v.exterior_degrees() - 270.0).abs() < 1e-9);
        assert!((v.normal - Vector3::z()).norm() < 1e-12);
    }

    #[test]
    fn floor_corner_seen_from_below() {
        // Floor walks the ring backwards so the corner stays convex from outside.
        let v = Vertex::with_opposite(
            point![0.0, 0.0, 0.0],
            point![10.0, 0.0, 0.0],
            point![0.0, 10.0, 0.0],
            point![0.0, 0.0, 5.0],
        );
        assert!(v.convex);
        assert!((v.normal + Vector3::z()).norm() < 1e-12);
    }

    #[test]
    fn reflex_corner_keeps_outward_normal() {
        let v = Vertex::new(
            point![1.0, 1.0, 0.0],
            point![2.0, 1.0, 0.0],
            point![1.0, 2.0, 0.0],
            Vector3::z(),
        );
        assert!(!v.convex);
        assert!((v.interior_degrees() - 270.0).abs() < 1e-9);
        assert!((v.normal - Vector3::z()).norm() < 1e-12);
    }

    #[test]
    fn tilted_side_quad_normal() {
        // Side face of a 45°-rotated box edge.
        let a = point![0.0, 0.0, 0.0];
        let b = point![1.0, 1.0, 0.0];
        let d = point![0.0, 0.0, 3.0];
        let outward = Vector3::new(1.0, -1.0, 0.0);
        let v = Vertex::new(a, d, b, outward);
        assert!(v.convex);
        assert!((v.normal - outward.normalize()).norm() < 1e-12);
    }
}
