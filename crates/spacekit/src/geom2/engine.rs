//! Adapter over the `geo` crate for polygon algebra and predicates.
//!
//! Purpose
//! - Keep every `geo` type behind this module so the rest of the crate speaks
//!   `Vector2<f64>` rings (open, counter-clockwise, no repeated closing point).
//! - Boolean results are accepted only as exactly one polygon without holes.
//!
//! References
//! - `geo::BooleanOps`, `geo::Contains`, `geo::algorithm::orient::Orient`

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::algorithm::orient::{Direction, Orient};
use geo::{
    Area, BooleanOps, Centroid, Contains, Coord, EuclideanLength, Line, LineString, MultiPolygon,
    Point, Polygon,
};
use nalgebra::Vector2;

use crate::error::{GeometryError, Result};

/// Closed `geo` polygon from an open ring.
pub fn to_polygon(points: &[Vector2<f64>]) -> Polygon<f64> {
    let coords: Vec<Coord<f64>> = points.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    Polygon::new(LineString::from(coords), vec![])
}

/// Open ring of a polygon's exterior (closing point dropped).
pub fn exterior_points(poly: &Polygon<f64>) -> Vec<Vector2<f64>> {
    let mut pts: Vec<Vector2<f64>> = poly
        .exterior()
        .coords()
        .map(|c| Vector2::new(c.x, c.y))
        .collect();
    if pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }
    pts
}

/// The same ring, wound counter-clockwise.
pub fn orient_ccw(points: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
    exterior_points(&to_polygon(points).orient(Direction::Default))
}

/// True iff no two non-adjacent edges of the ring touch and no adjacent edges overlap.
pub fn is_simple(points: &[Vector2<f64>]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let edge = |i: usize| {
        let a = points[i];
        let b = points[(i + 1) % n];
        Line::new(Coord { x: a.x, y: a.y }, Coord { x: b.x, y: b.y })
    };
    for i in 0..n {
        for j in (i + 1)..n {
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            match line_intersection(edge(i), edge(j)) {
                None => {}
                Some(LineIntersection::Collinear { .. }) => return false,
                Some(LineIntersection::SinglePoint { .. }) if adjacent => {}
                Some(LineIntersection::SinglePoint { .. }) => return false,
            }
        }
    }
    true
}

pub fn area(points: &[Vector2<f64>]) -> f64 {
    to_polygon(points).unsigned_area()
}

pub fn perimeter(points: &[Vector2<f64>]) -> f64 {
    to_polygon(points).exterior().euclidean_length()
}

/// Area centroid; `None` for a degenerate ring.
pub fn centroid(points: &[Vector2<f64>]) -> Option<Vector2<f64>> {
    to_polygon(points).centroid().map(|c| Vector2::new(c.x(), c.y()))
}

/// Strict interior containment (points on the outline are outside).
pub fn contains_point(points: &[Vector2<f64>], p: Vector2<f64>) -> bool {
    to_polygon(points).contains(&Point::new(p.x, p.y))
}

/// True iff `inner` lies wholly within `outer`; shared edges are allowed.
pub fn contains_ring(outer: &[Vector2<f64>], inner: &[Vector2<f64>]) -> bool {
    to_polygon(outer).contains(&to_polygon(inner))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoolOp {
    Union,
    Intersection,
    Difference,
}

/// Apply a boolean operation and require a single hole-free polygon back.
pub fn boolean(a: &[Vector2<f64>], b: &[Vector2<f64>], op: BoolOp) -> Result<Vec<Vector2<f64>>> {
    let pa = to_polygon(a);
    let pb = to_polygon(b);
    let out: MultiPolygon<f64> = match op {
        BoolOp::Union => pa.union(&pb),
        BoolOp::Intersection => pa.intersection(&pb),
        BoolOp::Difference => pa.difference(&pb),
    };
    let mut polys = out.0.into_iter().filter(|p| p.unsigned_area() > 0.0);
    let first = polys
        .next()
        .ok_or_else(|| GeometryError::invalid_geometry(format!("{op:?} produced an empty result")))?;
    if polys.next().is_some() {
        return Err(GeometryError::invalid_geometry(format!(
            "{op:?} produced disjoint regions"
        )));
    }
    if !first.interiors().is_empty() {
        return Err(GeometryError::invalid_geometry(format!(
            "{op:?} produced a region with holes"
        )));
    }
    Ok(exterior_points(&first))
}
