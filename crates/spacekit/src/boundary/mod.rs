//! Simple polygon footprint with an elevation.
//!
//! Purpose
//! - Own one counter-clockwise, simple, colinear-free 2D ring plus a `level`.
//! - Funnel every mutation (constructors, booleans, transforms) through
//!   `set_points`, which validates a candidate ring fully before committing it.
//!
//! Invariants
//! - At least 3 points, no three cyclically-consecutive points colinear.
//! - Ring is simple with non-zero area and wound counter-clockwise.
//! - On any error the previous ring, level, and convex flag are untouched.
//!
//! References
//! - Code cross-refs: `geom2::engine`, `geom2::rmv_colinear`, `Space`

mod shapes;

pub use shapes::{BarArms, CrossArms};

use nalgebra::{Point3, Vector2, Vector3};
use rand::Rng;
use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::geom2::engine::{self, BoolOp};
use crate::geom2::{
    convex_hull, is_convex_ring, mirror_points_2d, rmv_colinear, Affine2, Compass, Rect,
};
use crate::vertex::Vertex;

/// Simple polygon footprint in the plane `z = level`.
#[derive(Clone, Debug, PartialEq)]
pub struct Boundary {
    points: Vec<Vector2<f64>>,
    level: f64,
    convex: bool,
}

impl Default for Boundary {
    /// Unit square at the origin.
    fn default() -> Self {
        Self {
            points: vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 0.0),
                Vector2::new(1.0, 1.0),
                Vector2::new(0.0, 1.0),
            ],
            level: 0.0,
            convex: true,
        }
    }
}

/// Validated ring ready to be committed.
struct Ring {
    points: Vec<Vector2<f64>>,
    convex: bool,
}

fn validate(points: &[Vector2<f64>]) -> Result<Ring> {
    if points.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
        return Err(GeometryError::invalid_parameter("non-finite coordinate"));
    }
    let cleaned = rmv_colinear(points);
    if cleaned.len() < 3 {
        return Err(GeometryError::invalid_geometry(format!(
            "{} non-colinear points, need at least 3",
            cleaned.len()
        )));
    }
    let ring = engine::orient_ccw(&cleaned);
    if !engine::is_simple(&ring) {
        return Err(GeometryError::invalid_geometry("ring is self-intersecting"));
    }
    if engine::area(&ring) <= 0.0 {
        return Err(GeometryError::invalid_geometry("ring encloses no area"));
    }
    let convex = is_convex_ring(&ring);
    Ok(Ring {
        points: ring,
        convex,
    })
}

fn xy(p: &Point3<f64>) -> Vector2<f64> {
    Vector2::new(p.x, p.y)
}

impl Boundary {
    /// Boundary from 3D points; the level is taken from the first point's z.
    pub fn new(points: &[Point3<f64>]) -> Result<Self> {
        let level = points.first().map_or(0.0, |p| p.z);
        let flat: Vec<Vector2<f64>> = points.iter().map(xy).collect();
        Self::from_xy(&flat, level)
    }

    /// Boundary from planar points at `level`.
    pub fn from_xy(points: &[Vector2<f64>], level: f64) -> Result<Self> {
        if !level.is_finite() {
            return Err(GeometryError::invalid_parameter("non-finite level"));
        }
        let ring = validate(points)?;
        Ok(Self {
            points: ring.points,
            level,
            convex: ring.convex,
        })
    }

    /// Replace the ring. The only path by which the ring ever changes.
    ///
    /// Colinear points are dropped and the ring is reoriented counter-clockwise
    /// before the simplicity check. On error nothing changes.
    pub fn set_points(&mut self, points: &[Vector2<f64>]) -> Result<()> {
        match validate(points) {
            Ok(ring) => {
                self.points = ring.points;
                self.convex = ring.convex;
                Ok(())
            }
            Err(e) => {
                debug!(error = %e, points = points.len(), "boundary update rejected");
                Err(e)
            }
        }
    }

    /// Like [`Boundary::set_points`] for 3D input; z is ignored.
    pub fn set_points_3d(&mut self, points: &[Point3<f64>]) -> Result<()> {
        let flat: Vec<Vector2<f64>> = points.iter().map(xy).collect();
        self.set_points(&flat)
    }

    pub fn set_level(&mut self, level: f64) -> Result<()> {
        if !level.is_finite() {
            return Err(GeometryError::invalid_parameter("non-finite level"));
        }
        self.level = level;
        Ok(())
    }

    #[inline]
    pub fn level(&self) -> f64 {
        self.level
    }

    #[inline]
    pub fn is_convex(&self) -> bool {
        self.convex
    }

    /// Number of corners.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a valid boundary has at least three corners.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Planar ring, counter-clockwise.
    #[inline]
    pub fn points_2d(&self) -> &[Vector2<f64>] {
        &self.points
    }

    /// Ring elevated to the boundary's level.
    pub fn points(&self) -> Vec<Point3<f64>> {
        self.points_at(self.level)
    }

    pub(crate) fn points_at(&self, z: f64) -> Vec<Point3<f64>> {
        self.points.iter().map(|p| Point3::new(p.x, p.y, z)).collect()
    }

    fn lift(&self, p: Vector2<f64>) -> Point3<f64> {
        Point3::new(p.x, p.y, self.level)
    }

    // ---- derived metrics ----

    pub fn area(&self) -> f64 {
        engine::area(&self.points)
    }

    pub fn perimeter(&self) -> f64 {
        engine::perimeter(&self.points)
    }

    pub(crate) fn centroid_2d(&self) -> Vector2<f64> {
        // A validated ring always has non-zero area; the mean is a safe fallback.
        engine::centroid(&self.points).unwrap_or_else(|| {
            self.points.iter().sum::<Vector2<f64>>() / self.points.len().max(1) as f64
        })
    }

    /// Area centroid at the boundary's level.
    pub fn centroid(&self) -> Point3<f64> {
        self.lift(self.centroid_2d())
    }

    /// Axis-aligned bounding box of the ring.
    pub fn bounds(&self) -> Rect {
        Rect::from_points(&self.points)
            .unwrap_or_else(|| Rect::new(Vector2::zeros(), Vector2::zeros()))
    }

    /// Bounding-box center.
    pub fn center(&self) -> Point3<f64> {
        self.lift(self.bounds().center())
    }

    /// Bounding-box corners SW, SE, NE, NW.
    pub fn box_points(&self) -> [Point3<f64>; 4] {
        self.bounds().corners().map(|p| self.lift(p))
    }

    pub fn size_x(&self) -> f64 {
        self.bounds().size().x
    }

    pub fn size_y(&self) -> f64 {
        self.bounds().size().y
    }

    pub fn axis_x(&self) -> (Point3<f64>, Point3<f64>) {
        self.lift_pair(self.bounds().axis_x())
    }

    pub fn axis_y(&self) -> (Point3<f64>, Point3<f64>) {
        self.lift_pair(self.bounds().axis_y())
    }

    pub fn axis_major(&self) -> (Point3<f64>, Point3<f64>) {
        self.lift_pair(self.bounds().axis_major())
    }

    pub fn axis_minor(&self) -> (Point3<f64>, Point3<f64>) {
        self.lift_pair(self.bounds().axis_minor())
    }

    fn lift_pair(&self, (a, b): (Vector2<f64>, Vector2<f64>)) -> (Point3<f64>, Point3<f64>) {
        (self.lift(a), self.lift(b))
    }

    /// One of the 17 named bounding-box locations.
    pub fn compass_point(&self, dir: Compass) -> Point3<f64> {
        self.lift(self.bounds().compass(dir))
    }

    /// Corner records, measured with the outward side facing +z.
    pub fn vertices(&self) -> Vec<Vertex> {
        let pts = self.points();
        let n = pts.len();
        (0..n)
            .map(|i| Vertex::new(pts[i], pts[(i + n - 1) % n], pts[(i + 1) % n], Vector3::z()))
            .collect()
    }

    // ---- containment ----

    /// Planar containment; points on the outline are outside.
    pub fn contains_point(&self, p: &Point3<f64>) -> bool {
        engine::contains_point(&self.points, xy(p))
    }

    /// True iff the polygon through `points` lies wholly inside this boundary.
    pub fn contains_shape(&self, points: &[Vector2<f64>]) -> bool {
        points.len() >= 3 && engine::contains_ring(&self.points, points)
    }

    pub fn contains_boundary(&self, other: &Boundary) -> bool {
        engine::contains_ring(&self.points, &other.points)
    }

    /// Uniform random point inside the boundary by rejection sampling on the
    /// bounding box. There is no draw cap; the expected number of draws is
    /// the inverse of the fill ratio.
    pub fn point_within<R: Rng + ?Sized>(&self, rng: &mut R) -> Point3<f64> {
        let rect = self.bounds();
        loop {
            let p = crate::geom2::rand::point_in_rect(rng, &rect);
            if engine::contains_point(&self.points, p) {
                return self.lift(p);
            }
        }
    }

    // ---- boolean combinations ----

    /// Union with the polygon through `points`, or replace the ring if `restart`.
    ///
    /// Fails without change when the union is not one hole-free simple polygon.
    pub fn add(&mut self, points: &[Vector2<f64>], restart: bool) -> Result<()> {
        if restart {
            return self.set_points(points);
        }
        let other = validate(points)?;
        let merged = engine::boolean(&self.points, &other.points, BoolOp::Union)?;
        self.set_points(&merged)
    }

    /// Clip to the perimeter through `points`.
    pub fn fit_within(&mut self, points: &[Vector2<f64>]) -> Result<()> {
        let other = validate(points)?;
        let clipped = engine::boolean(&self.points, &other.points, BoolOp::Intersection)?;
        self.set_points(&clipped)
    }

    /// Remove the polygon through `points` from this boundary.
    pub fn subtract(&mut self, points: &[Vector2<f64>]) -> Result<()> {
        let other = validate(points)?;
        let rest = engine::boolean(&self.points, &other.points, BoolOp::Difference)?;
        self.set_points(&rest)
    }

    /// Replace the ring by the convex hull of `points`.
    pub fn wrap(&mut self, points: &[Vector2<f64>]) -> Result<()> {
        self.set_points(&convex_hull(points))
    }

    // ---- transforms ----

    /// Apply a planar affine map to the ring.
    pub fn transform(&mut self, f: &Affine2) -> Result<()> {
        let moved: Vec<Vector2<f64>> = self.points.iter().map(|p| f.apply(*p)).collect();
        self.set_points(&moved)
    }

    /// Translate; the z component shifts the level.
    pub fn move_by(&mut self, d: Vector3<f64>) -> Result<()> {
        let level = self.level + d.z;
        if !level.is_finite() {
            return Err(GeometryError::invalid_parameter("non-finite displacement"));
        }
        self.transform(&Affine2::translation(Vector2::new(d.x, d.y)))?;
        self.level = level;
        Ok(())
    }

    /// Translate by `to − from`.
    pub fn move_to(&mut self, from: &Point3<f64>, to: &Point3<f64>) -> Result<()> {
        self.move_by(to - from)
    }

    /// Counter-clockwise rotation in degrees about `pivot` (default: centroid).
    pub fn rotate(&mut self, degrees: f64, pivot: Option<Point3<f64>>) -> Result<()> {
        if !degrees.is_finite() {
            return Err(GeometryError::invalid_parameter("non-finite angle"));
        }
        let c = pivot.map_or_else(|| self.centroid_2d(), |p| xy(&p));
        self.transform(&Affine2::rotation_about(degrees, c))
    }

    /// Axis-aligned scaling about `pivot` (default: centroid).
    pub fn scale(&mut self, sx: f64, sy: f64, pivot: Option<Point3<f64>>) -> Result<()> {
        if !(sx.is_finite() && sy.is_finite()) || sx == 0.0 || sy == 0.0 {
            return Err(GeometryError::invalid_parameter(format!(
                "scale factors must be finite and non-zero, got ({sx}, {sy})"
            )));
        }
        let c = pivot.map_or_else(|| self.centroid_2d(), |p| xy(&p));
        self.transform(&Affine2::scaling_about(sx, sy, c))
    }

    /// Reflect across the line through two points (default: the major axis).
    pub fn mirror(&mut self, axis: Option<(Point3<f64>, Point3<f64>)>) -> Result<()> {
        let (a, b) = axis.unwrap_or_else(|| self.axis_major());
        let flipped = mirror_points_2d(&self.points, (xy(&a), xy(&b)));
        self.set_points(&flipped)
    }
}
