//! Basic 2D types used by boundaries and placement.
//!
//! - `Affine2`: planar affine map `x ↦ M x + t` behind move, rotate, and scale.
//! - `Rect`: axis-aligned box with corner, axis, and compass lookups.
//! - `Compass`: the 17 named box locations (center + 16 wind directions).
//! - `Angles`: convexity and interior/exterior angle at a polygon corner.

use nalgebra::{Matrix2, Vector2};
use serde::Serialize;

use super::util::midpoint;

/// 2D affine map: `x ↦ M x + t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2 {
    pub m: Matrix2<f64>,
    pub t: Vector2<f64>,
}

impl Affine2 {
    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::zeros(),
        }
    }

    #[inline]
    pub fn translation(d: Vector2<f64>) -> Self {
        Self {
            m: Matrix2::identity(),
            t: d,
        }
    }

    /// Counter-clockwise rotation by `degrees` about `pivot`.
    pub fn rotation_about(degrees: f64, pivot: Vector2<f64>) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        let m = Matrix2::new(c, -s, s, c);
        Self::about(m, pivot)
    }

    /// Axis-aligned scaling by `(sx, sy)` with `pivot` held fixed.
    pub fn scaling_about(sx: f64, sy: f64, pivot: Vector2<f64>) -> Self {
        Self::about(Matrix2::new(sx, 0.0, 0.0, sy), pivot)
    }

    #[inline]
    fn about(m: Matrix2<f64>, pivot: Vector2<f64>) -> Self {
        Self {
            m,
            t: pivot - m * pivot,
        }
    }

    #[inline]
    pub fn apply(&self, p: Vector2<f64>) -> Vector2<f64> {
        self.m * p + self.t
    }

    /// `self ∘ other` (apply `other` first).
    #[inline]
    pub fn compose(&self, other: &Affine2) -> Affine2 {
        Affine2 {
            m: self.m * other.m,
            t: self.m * other.t + self.t,
        }
    }

    #[inline]
    pub fn inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|minv| Self {
            m: minv,
            t: -minv * self.t,
        })
    }

    #[inline]
    pub fn is_orientation_preserving(&self) -> bool {
        self.m.determinant() > 0.0
    }
}

/// Named locations on an axis-aligned box.
///
/// Cardinals are edge midpoints, intercardinals are corners, and the
/// secondary winds sit halfway between a cardinal and its neighbouring corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Compass {
    C,
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl Compass {
    /// All 17 locations, center first, then clockwise from north.
    pub const ALL: [Compass; 17] = [
        Compass::C,
        Compass::N,
        Compass::NNE,
        Compass::NE,
        Compass::ENE,
        Compass::E,
        Compass::ESE,
        Compass::SE,
        Compass::SSE,
        Compass::S,
        Compass::SSW,
        Compass::SW,
        Compass::WSW,
        Compass::W,
        Compass::WNW,
        Compass::NW,
        Compass::NNW,
    ];

    /// Fractional box coordinates `(u, v)` in `[0, 1]²`, origin at the SW corner.
    pub fn unit(self) -> (f64, f64) {
        use Compass::*;
        match self {
            C => (0.5, 0.5),
            N => (0.5, 1.0),
            NNE => (0.75, 1.0),
            NE => (1.0, 1.0),
            ENE => (1.0, 0.75),
            E => (1.0, 0.5),
            ESE => (1.0, 0.25),
            SE => (1.0, 0.0),
            SSE => (0.75, 0.0),
            S => (0.5, 0.0),
            SSW => (0.25, 0.0),
            SW => (0.0, 0.0),
            WSW => (0.0, 0.25),
            W => (0.0, 0.5),
            WNW => (0.0, 0.75),
            NW => (0.0, 1.0),
            NNW => (0.25, 1.0),
        }
    }
}

impl std::str::FromStr for Compass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let up = s.trim().to_ascii_uppercase();
        Compass::ALL
            .iter()
            .copied()
            .find(|c| format!("{c:?}") == up)
            .ok_or_else(|| format!("unknown compass direction '{s}'"))
    }
}

/// Axis-aligned 2D box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

impl Rect {
    pub fn new(a: Vector2<f64>, b: Vector2<f64>) -> Self {
        Self {
            min: Vector2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vector2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Smallest box containing every point; `None` for an empty slice.
    pub fn from_points(points: &[Vector2<f64>]) -> Option<Self> {
        let first = points.first()?;
        let (mut min, mut max) = (*first, *first);
        for p in &points[1..] {
            min = min.inf(p);
            max = max.sup(p);
        }
        Some(Self { min, max })
    }

    #[inline]
    pub fn sw(&self) -> Vector2<f64> {
        self.min
    }
    #[inline]
    pub fn se(&self) -> Vector2<f64> {
        Vector2::new(self.max.x, self.min.y)
    }
    #[inline]
    pub fn ne(&self) -> Vector2<f64> {
        self.max
    }
    #[inline]
    pub fn nw(&self) -> Vector2<f64> {
        Vector2::new(self.min.x, self.max.y)
    }
    #[inline]
    pub fn size(&self) -> Vector2<f64> {
        self.max - self.min
    }
    #[inline]
    pub fn center(&self) -> Vector2<f64> {
        midpoint(self.min, self.max)
    }

    /// Corners SW, SE, NE, NW (counter-clockwise).
    pub fn corners(&self) -> [Vector2<f64>; 4] {
        [self.sw(), self.se(), self.ne(), self.nw()]
    }

    /// Interpolated location of a compass point on the box outline.
    pub fn compass(&self, dir: Compass) -> Vector2<f64> {
        let (u, v) = dir.unit();
        let s = self.size();
        Vector2::new(self.min.x + u * s.x, self.min.y + v * s.y)
    }

    /// Horizontal central axis, west to east.
    pub fn axis_x(&self) -> (Vector2<f64>, Vector2<f64>) {
        (self.compass(Compass::W), self.compass(Compass::E))
    }

    /// Vertical central axis, south to north.
    pub fn axis_y(&self) -> (Vector2<f64>, Vector2<f64>) {
        (self.compass(Compass::S), self.compass(Compass::N))
    }

    /// Longer central axis; ties go to the x-axis.
    pub fn axis_major(&self) -> (Vector2<f64>, Vector2<f64>) {
        let s = self.size();
        if s.y > s.x {
            self.axis_y()
        } else {
            self.axis_x()
        }
    }

    /// Shorter central axis; ties go to the y-axis.
    pub fn axis_minor(&self) -> (Vector2<f64>, Vector2<f64>) {
        let s = self.size();
        if s.y > s.x {
            self.axis_x()
        } else {
            self.axis_y()
        }
    }
}

/// Corner classification produced by [`super::get_angles`]. Angles in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Angles {
    pub convex: bool,
    pub interior: f64,
    pub exterior: f64,
}
