//! Prismatic volume: a floor boundary extruded by a height.
//!
//! Purpose
//! - Own a floor `Boundary` and a height; derive the ceiling, the per-corner
//!   vertex records of floor, ceiling, and side quads, and the footprint
//!   triangulation in one `derive` step.
//! - Every mutation runs on a scratch floor/height and is committed only after
//!   derivation succeeds, so a failed edit leaves the space as it was.
//!
//! Mesh layout
//! - `mesh()` concatenates ceiling, floor, then sides. Ceiling triangles wind
//!   counter-clockwise seen from above, floor triangles the reverse, and each
//!   side quad `[f_i, f_{i+1}, c_{i+1}, c_i]` splits into `(0,1,2)`, `(0,2,3)`;
//!   every face therefore winds counter-clockwise seen from outside.
//!
//! References
//! - Code cross-refs: `Boundary`, `Vertex`, `Mesh`, `geom2::get_mesh_2d`

use nalgebra::{Point3, Vector2, Vector3};
use rand::Rng;
use tracing::debug;

use crate::boundary::{BarArms, Boundary, CrossArms};
use crate::error::{GeometryError, Result};
use crate::geom2::{get_mesh_2d, Compass, Mesh2d};
use crate::mesh::{Mesh, MeshGraphic};
use crate::vertex::Vertex;

/// Data recomputed from `(floor, height)` on every commit.
#[derive(Clone, Debug, PartialEq)]
struct Derived {
    ceiling: Boundary,
    footprint: Mesh2d,
    vertices_floor: Vec<Vertex>,
    vertices_ceiling: Vec<Vertex>,
    vertices_sides: Vec<[Vertex; 4]>,
}

fn side_quads(floor: &[Point3<f64>], ceiling: &[Point3<f64>]) -> Vec<[Point3<f64>; 4]> {
    let n = floor.len();
    (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            [floor[i], floor[j], ceiling[j], ceiling[i]]
        })
        .collect()
}

/// Outward normal of a side quad: bottom edge × vertical edge.
fn quad_normal(q: &[Point3<f64>; 4]) -> Vector3<f64> {
    (q[1] - q[0])
        .cross(&(q[3] - q[0]))
        .try_normalize(0.0)
        .unwrap_or_else(Vector3::zeros)
}

fn derive(floor: &Boundary, height: f64) -> Result<Derived> {
    if !(height.is_finite() && height > 0.0) {
        return Err(GeometryError::invalid_parameter(format!(
            "height must be positive, got {height}"
        )));
    }
    let mut ceiling = floor.clone();
    ceiling.set_level(floor.level() + height)?;
    let footprint = get_mesh_2d(floor.points_2d())?;

    let f = floor.points();
    let c = ceiling.points();
    let n = f.len();
    let prev = |i: usize| (i + n - 1) % n;
    let next = |i: usize| (i + 1) % n;
    let vertices_floor = (0..n)
        .map(|i| Vertex::with_opposite(f[i], f[next(i)], f[prev(i)], c[i]))
        .collect();
    let vertices_ceiling = (0..n)
        .map(|i| Vertex::with_opposite(c[i], c[prev(i)], c[next(i)], f[i]))
        .collect();
    let vertices_sides = side_quads(&f, &c)
        .iter()
        .map(|q| {
            let out = quad_normal(q);
            [0, 1, 2, 3].map(|k| Vertex::new(q[k], q[(k + 3) % 4], q[(k + 1) % 4], out))
        })
        .collect();
    Ok(Derived {
        ceiling,
        footprint,
        vertices_floor,
        vertices_ceiling,
        vertices_sides,
    })
}

/// Floor boundary extruded by `height`.
#[derive(Clone, Debug, PartialEq)]
pub struct Space {
    floor: Boundary,
    height: f64,
    derived: Derived,
}

impl Default for Space {
    /// Unit cube at the origin.
    fn default() -> Self {
        let floor = Boundary::default();
        // The unit square is a valid footprint; derivation cannot fail for it.
        let derived = derive(&floor, 1.0).unwrap_or_else(|_| Derived {
            ceiling: floor.clone(),
            footprint: Mesh2d::default(),
            vertices_floor: Vec::new(),
            vertices_ceiling: Vec::new(),
            vertices_sides: Vec::new(),
        });
        Self {
            floor,
            height: 1.0,
            derived,
        }
    }
}

impl Space {
    pub fn new(floor: Boundary, height: f64) -> Result<Self> {
        let derived = derive(&floor, height)?;
        Ok(Self {
            floor,
            height,
            derived,
        })
    }

    /// Space on the boundary through 3D `points` (level from the first point).
    pub fn from_points(points: &[Point3<f64>], height: f64) -> Result<Self> {
        Self::new(Boundary::new(points)?, height)
    }

    fn commit(&mut self, floor: Boundary, height: f64) -> Result<()> {
        match derive(&floor, height) {
            Ok(derived) => {
                self.floor = floor;
                self.height = height;
                self.derived = derived;
                Ok(())
            }
            Err(e) => {
                debug!(error = %e, "space update rejected");
                Err(e)
            }
        }
    }

    /// Run `edit` on a scratch copy of the floor and height, then commit.
    fn update<F>(&mut self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Boundary, &mut f64) -> Result<()>,
    {
        let mut floor = self.floor.clone();
        let mut height = self.height;
        edit(&mut floor, &mut height)?;
        self.commit(floor, height)
    }

    // ---- state ----

    #[inline]
    pub fn floor(&self) -> &Boundary {
        &self.floor
    }

    #[inline]
    pub fn ceiling(&self) -> &Boundary {
        &self.derived.ceiling
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn level(&self) -> f64 {
        self.floor.level()
    }

    pub fn set_height(&mut self, height: f64) -> Result<()> {
        self.update(|_, h| {
            *h = height;
            Ok(())
        })
    }

    pub fn set_level(&mut self, level: f64) -> Result<()> {
        self.update(|f, _| f.set_level(level))
    }

    /// Replace the floor ring (z ignored).
    pub fn set_points(&mut self, points: &[Point3<f64>]) -> Result<()> {
        self.update(|f, _| f.set_points_3d(points))
    }

    // ---- shape constructors ----

    pub fn make_box(&mut self, origin: Vector2<f64>, x_size: f64, y_size: f64) -> Result<()> {
        self.update(|f, _| f.make_box(origin, x_size, y_size))
    }

    pub fn make_cross(
        &mut self,
        origin: Vector2<f64>,
        x_size: f64,
        y_size: f64,
        arms: CrossArms,
    ) -> Result<()> {
        self.update(|f, _| f.make_cross(origin, x_size, y_size, arms))
    }

    pub fn make_l(
        &mut self,
        origin: Vector2<f64>,
        x_size: f64,
        y_size: f64,
        x_width: f64,
        y_depth: f64,
    ) -> Result<()> {
        self.update(|f, _| f.make_l(origin, x_size, y_size, x_width, y_depth))
    }

    pub fn make_t(
        &mut self,
        origin: Vector2<f64>,
        x_size: f64,
        y_size: f64,
        x_width: f64,
        y_depth: f64,
    ) -> Result<()> {
        self.update(|f, _| f.make_t(origin, x_size, y_size, x_width, y_depth))
    }

    pub fn make_u(
        &mut self,
        origin: Vector2<f64>,
        x_size: f64,
        y_size: f64,
        arms: BarArms,
    ) -> Result<()> {
        self.update(|f, _| f.make_u(origin, x_size, y_size, arms))
    }

    pub fn make_h(
        &mut self,
        origin: Vector2<f64>,
        x_size: f64,
        y_size: f64,
        arms: BarArms,
    ) -> Result<()> {
        self.update(|f, _| f.make_h(origin, x_size, y_size, arms))
    }

    pub fn make_polygon(&mut self, center: Vector2<f64>, radius: f64, sides: usize) -> Result<()> {
        self.update(|f, _| f.make_polygon(center, radius, sides))
    }

    pub fn make_cylinder(&mut self, center: Vector2<f64>, radius: f64) -> Result<()> {
        self.update(|f, _| f.make_cylinder(center, radius))
    }

    pub fn add(&mut self, points: &[Vector2<f64>], restart: bool) -> Result<()> {
        self.update(|f, _| f.add(points, restart))
    }

    pub fn fit_within(&mut self, points: &[Vector2<f64>]) -> Result<()> {
        self.update(|f, _| f.fit_within(points))
    }

    pub fn subtract(&mut self, points: &[Vector2<f64>]) -> Result<()> {
        self.update(|f, _| f.subtract(points))
    }

    pub fn wrap(&mut self, points: &[Vector2<f64>]) -> Result<()> {
        self.update(|f, _| f.wrap(points))
    }

    // ---- transforms ----

    /// Translate; the z component shifts the level.
    pub fn move_by(&mut self, d: Vector3<f64>) -> Result<()> {
        self.update(|f, _| f.move_by(d))
    }

    pub fn move_to(&mut self, from: &Point3<f64>, to: &Point3<f64>) -> Result<()> {
        self.move_by(to - from)
    }

    pub fn rotate(&mut self, degrees: f64, pivot: Option<Point3<f64>>) -> Result<()> {
        self.update(|f, _| f.rotate(degrees, pivot))
    }

    /// Scale the footprint about `pivot` (default: centroid) and the height by `sz`.
    pub fn scale(&mut self, sx: f64, sy: f64, sz: f64, pivot: Option<Point3<f64>>) -> Result<()> {
        self.update(|f, h| {
            f.scale(sx, sy, pivot)?;
            *h *= sz;
            Ok(())
        })
    }

    pub fn mirror(&mut self, axis: Option<(Point3<f64>, Point3<f64>)>) -> Result<()> {
        self.update(|f, _| f.mirror(axis))
    }

    // ---- metrics ----

    pub fn area(&self) -> f64 {
        self.floor.area()
    }

    pub fn perimeter(&self) -> f64 {
        self.floor.perimeter()
    }

    pub fn volume(&self) -> f64 {
        self.area() * self.height
    }

    pub fn is_convex(&self) -> bool {
        self.floor.is_convex()
    }

    pub fn size_x(&self) -> f64 {
        self.floor.size_x()
    }

    pub fn size_y(&self) -> f64 {
        self.floor.size_y()
    }

    pub fn centroid_floor(&self) -> Point3<f64> {
        self.floor.centroid()
    }

    pub fn centroid_ceiling(&self) -> Point3<f64> {
        self.derived.ceiling.centroid()
    }

    /// Footprint centroid at mid-height.
    pub fn centroid_space(&self) -> Point3<f64> {
        let c = self.floor.centroid();
        Point3::new(c.x, c.y, c.z + self.height * 0.5)
    }

    pub fn center_floor(&self) -> Point3<f64> {
        self.floor.center()
    }

    pub fn center_ceiling(&self) -> Point3<f64> {
        self.derived.ceiling.center()
    }

    /// Bounding-box center at mid-height.
    pub fn center_space(&self) -> Point3<f64> {
        let c = self.floor.center();
        Point3::new(c.x, c.y, c.z + self.height * 0.5)
    }

    pub fn compass_point(&self, dir: Compass) -> Point3<f64> {
        self.floor.compass_point(dir)
    }

    // ---- surfaces ----

    pub fn points_floor(&self) -> Vec<Point3<f64>> {
        self.floor.points()
    }

    pub fn points_ceiling(&self) -> Vec<Point3<f64>> {
        self.derived.ceiling.points()
    }

    /// One quad per floor edge: `floor[i], floor[i+1], ceiling[i+1], ceiling[i]`.
    pub fn points_sides(&self) -> Vec<[Point3<f64>; 4]> {
        side_quads(&self.points_floor(), &self.points_ceiling())
    }

    pub fn normal_floor(&self) -> Vector3<f64> {
        -Vector3::z()
    }

    pub fn normal_ceiling(&self) -> Vector3<f64> {
        Vector3::z()
    }

    pub fn normal_sides(&self) -> Vec<Vector3<f64>> {
        self.points_sides().iter().map(quad_normal).collect()
    }

    pub fn vertices_floor(&self) -> &[Vertex] {
        &self.derived.vertices_floor
    }

    pub fn vertices_ceiling(&self) -> &[Vertex] {
        &self.derived.vertices_ceiling
    }

    pub fn vertices_sides(&self) -> &[[Vertex; 4]] {
        &self.derived.vertices_sides
    }

    // ---- meshes ----

    fn mesh_cap(&self, z: f64, normal: Vector3<f64>, flip: bool) -> Mesh {
        let fp = &self.derived.footprint;
        let mut m = Mesh::with_capacity(fp.vertices.len(), fp.indices.len());
        for p in &fp.vertices {
            m.add_vertex(Point3::new(p.x, p.y, z), normal);
        }
        for &[a, b, c] in &fp.indices {
            if flip {
                m.add_triangle(a, c, b);
            } else {
                m.add_triangle(a, b, c);
            }
        }
        m
    }

    /// Footprint triangles elevated to the ceiling, facing up.
    pub fn mesh_ceiling(&self) -> Mesh {
        self.mesh_cap(self.level() + self.height, self.normal_ceiling(), false)
    }

    /// Footprint triangles at the floor, wound to face down.
    pub fn mesh_floor(&self) -> Mesh {
        self.mesh_cap(self.level(), self.normal_floor(), true)
    }

    /// Two triangles per side quad, four vertices each.
    pub fn mesh_sides(&self) -> Mesh {
        let quads = self.points_sides();
        let mut m = Mesh::with_capacity(quads.len() * 4, quads.len() * 2);
        for q in &quads {
            let n = quad_normal(q);
            let [a, b, c, d] = q.map(|p| m.add_vertex(p, n));
            m.add_triangle(a, b, c);
            m.add_triangle(a, c, d);
        }
        m
    }

    /// Closed surface: ceiling, floor, then sides.
    pub fn mesh(&self) -> Mesh {
        let mut m = self.mesh_ceiling();
        m.merge(&self.mesh_floor());
        m.merge(&self.mesh_sides());
        m
    }

    pub fn mesh_graphic(&self) -> MeshGraphic {
        self.mesh().to_graphic()
    }

    // ---- containment ----

    /// Planar containment only (z ignored).
    pub fn contains_point(&self, p: &Point3<f64>) -> bool {
        self.floor.contains_point(p)
    }

    pub fn contains_shape(&self, points: &[Vector2<f64>]) -> bool {
        self.floor.contains_shape(points)
    }

    /// Random point inside the footprint at the floor level.
    pub fn point_within<R: Rng + ?Sized>(&self, rng: &mut R) -> Point3<f64> {
        self.floor.point_within(rng)
    }

    /// Inside the footprint and between floor and ceiling (inclusive).
    pub fn encloses_point(&self, p: &Point3<f64>) -> bool {
        let lo = self.level();
        let hi = lo + self.height;
        self.floor.contains_point(p) && p.z >= lo && p.z <= hi
    }

    /// Footprint containment and `other.level >= self.level`.
    ///
    /// The other boundary's level is not checked against this ceiling.
    pub fn encloses_boundary(&self, other: &Boundary) -> bool {
        self.floor.contains_boundary(other) && other.level() >= self.level()
    }

    /// Footprint containment and `other.level >= self.level`.
    ///
    /// The other space's top is not checked against this ceiling, so a taller
    /// space standing on this floor still counts as enclosed.
    pub fn encloses_space(&self, other: &Space) -> bool {
        self.encloses_boundary(&other.floor)
    }
}
