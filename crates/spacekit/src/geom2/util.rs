use nalgebra::Vector2;

use super::types::Angles;
use crate::cfg::{ANGLE_EPS, COLINEAR_EPS, COORD_EPS};

/// z-component of `(b - a) × (c - a)`; positive for a counter-clockwise turn.
#[inline]
pub(crate) fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

#[inline]
fn perp_dot(u: Vector2<f64>, v: Vector2<f64>) -> f64 {
    u.x * v.y - u.y * v.x
}

/// Twice the signed shoelace area of the closed ring `points`.
pub fn signed_area2(points: &[Vector2<f64>]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| perp_dot(points[i], points[(i + 1) % n]))
        .sum()
}

/// True iff the ring through `points` encloses no area relative to its size.
/// Fewer than 3 points are trivially colinear.
///
/// A triple `[a, b, c]` compares the sine of the corner at `b` with
/// `COLINEAR_EPS`; longer rings compare twice their area with `COLINEAR_EPS`
/// times the squared bounding-box diagonal. Both tests are scale-free.
pub fn are_colinear(points: &[Vector2<f64>]) -> bool {
    if let [a, b, c] = points {
        let scale = (a - b).norm() * (c - b).norm();
        return cross(*b, *a, *c).abs() <= COLINEAR_EPS * scale;
    }
    if points.len() < 3 {
        return true;
    }
    let (mut lo, mut hi) = (points[0], points[0]);
    for p in points {
        lo = lo.inf(p);
        hi = hi.sup(p);
    }
    let n = points.len();
    let area2: f64 = (0..n)
        .map(|i| perp_dot(points[i] - lo, points[(i + 1) % n] - lo))
        .sum();
    area2.abs() <= COLINEAR_EPS * (hi - lo).norm_squared()
}

fn lex_cmp(a: &Vector2<f64>, b: &Vector2<f64>) -> std::cmp::Ordering {
    match a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal) {
        std::cmp::Ordering::Equal => a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal),
        o => o,
    }
}

/// Andrew’s monotone chain convex hull (returns hull in CCW order).
///
/// Starts at the lexicographically smallest point; only strict left turns are kept.
/// Inputs with three or fewer points come back unchanged.
pub fn convex_hull(points: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
    if points.len() <= 3 {
        return points.to_vec();
    }
    let mut pts: Vec<_> = points.to_vec();
    pts.sort_by(lex_cmp);
    pts.dedup_by(|a, b| (*a - *b).norm() < 1e-12);
    if pts.len() < 3 {
        return pts;
    }
    let mut lower: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    hull
}

/// Drop repeated points, then repeatedly remove the middle of any cyclically
/// consecutive colinear triple until none is left. Order is preserved.
pub fn rmv_colinear(points: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
    let mut pts: Vec<Vector2<f64>> = Vec::with_capacity(points.len());
    for p in points {
        if pts.last().map_or(true, |q| (q - p).norm() > COORD_EPS) {
            pts.push(*p);
        }
    }
    while pts.len() > 1 && (pts[0] - pts[pts.len() - 1]).norm() <= COORD_EPS {
        pts.pop();
    }
    loop {
        let n = pts.len();
        if n < 3 {
            return pts;
        }
        let hit = (0..n).find(|&i| are_colinear(&[pts[(i + n - 1) % n], pts[i], pts[(i + 1) % n]]));
        match hit {
            Some(i) => {
                pts.remove(i);
            }
            None => return pts,
        }
    }
}

/// Convexity and angles at `vertex` for a counter-clockwise walk `prev → vertex → next`.
///
/// The interior angle is measured between `prev − vertex` and `next − vertex`;
/// a straight corner counts as convex with interior angle π.
pub fn get_angles(vertex: Vector2<f64>, prev: Vector2<f64>, next: Vector2<f64>) -> Angles {
    let a = prev - vertex;
    let b = next - vertex;
    let turn = perp_dot(vertex - prev, next - vertex);
    let convex = turn >= -ANGLE_EPS * a.norm() * b.norm();
    let theta = perp_dot(a, b).abs().atan2(a.dot(&b));
    let tau = std::f64::consts::TAU;
    let interior = if convex { theta } else { tau - theta };
    Angles {
        convex,
        interior,
        exterior: tau - interior,
    }
}

/// True iff every corner of the counter-clockwise ring is convex.
pub fn is_convex_ring(points: &[Vector2<f64>]) -> bool {
    let n = points.len();
    (0..n).all(|i| get_angles(points[i], points[(i + n - 1) % n], points[(i + 1) % n]).convex)
}

/// Reflect `points` across the line through `axis.0` and `axis.1`.
///
/// Vertical and horizontal axes are handled exactly; a degenerate axis
/// (both points equal) is treated as vertical.
pub fn mirror_points_2d(
    points: &[Vector2<f64>],
    axis: (Vector2<f64>, Vector2<f64>),
) -> Vec<Vector2<f64>> {
    let (a, b) = axis;
    if a.x == b.x {
        return points.iter().map(|p| Vector2::new(2.0 * a.x - p.x, p.y)).collect();
    }
    if a.y == b.y {
        return points.iter().map(|p| Vector2::new(p.x, 2.0 * a.y - p.y)).collect();
    }
    let d = b - a;
    let len2 = d.norm_squared();
    points
        .iter()
        .map(|p| {
            let foot = a + d * ((p - a).dot(&d) / len2);
            foot * 2.0 - p
        })
        .collect()
}

/// Counter-clockwise rectangle from its SW corner and its size.
pub fn box_points(origin: Vector2<f64>, size: Vector2<f64>) -> Vec<Vector2<f64>> {
    vec![
        origin,
        Vector2::new(origin.x + size.x, origin.y),
        origin + size,
        Vector2::new(origin.x, origin.y + size.y),
    ]
}

/// Regular polygon vertices, counter-clockwise, first vertex straight above `center`.
pub fn regular_polygon(center: Vector2<f64>, radius: f64, sides: usize) -> Vec<Vector2<f64>> {
    let step = std::f64::consts::TAU / sides as f64;
    (0..sides)
        .map(|k| {
            let (s, c) = (std::f64::consts::FRAC_PI_2 + step * k as f64).sin_cos();
            center + Vector2::new(c, s) * radius
        })
        .collect()
}

#[inline]
pub fn midpoint(a: Vector2<f64>, b: Vector2<f64>) -> Vector2<f64> {
    (a + b) * 0.5
}
