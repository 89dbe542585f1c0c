use super::*;
use nalgebra::{vector, Vector2};
use proptest::prelude::*;
use std::f64::consts::{FRAC_PI_2, PI};

fn square(side: f64) -> Vec<Vector2<f64>> {
    box_points(vector![0.0, 0.0], vector![side, side])
}

#[test]
fn colinear_detection() {
    assert!(are_colinear(&[vector![0.0, 0.0], vector![1.0, 1.0]]));
    assert!(are_colinear(&[vector![0.0, 0.0], vector![1.0, 1.0], vector![3.0, 3.0]]));
    assert!(!are_colinear(&[vector![0.0, 0.0], vector![1.0, 0.0], vector![1.0, 1.0]]));
}

#[test]
fn colinear_detection_ignores_scale() {
    let tiny = 1e-5;
    assert!(!are_colinear(&[vector![0.0, 0.0], vector![tiny, 0.0], vector![tiny, tiny]]));
    assert!(!are_colinear(&square(tiny)));
    assert!(are_colinear(&[vector![0.0, 0.0], vector![tiny, tiny], vector![3.0 * tiny, 3.0 * tiny]]));
    // 1e-9 off a 20-unit edge far from the origin is a straight corner.
    let far = 1e5;
    assert!(are_colinear(&[
        vector![far, far],
        vector![far + 10.0, far + 1e-9],
        vector![far + 20.0, far],
    ]));
    assert!(!are_colinear(&[vector![far, far], vector![far + 10.0, far + 1e-3], vector![far + 20.0, far]]));
}

#[test]
fn small_reflex_corner_is_not_convex() {
    let tiny = 1e-5;
    let a = get_angles(vector![tiny, 0.0], vector![0.0, 0.0], vector![tiny, -tiny]);
    assert!(!a.convex);
    assert!(!is_convex_ring(&[
        vector![0.0, 0.0],
        vector![2.0 * tiny, 0.0],
        vector![tiny, 0.5 * tiny],
        vector![2.0 * tiny, 2.0 * tiny],
        vector![0.0, 2.0 * tiny],
    ]));
}

#[test]
fn straight_corner_is_convex_half_turn() {
    let a = get_angles(vector![1.0, 0.0], vector![0.0, 0.0], vector![2.0, 0.0]);
    assert!(a.convex);
    assert!((a.interior - PI).abs() < 1e-12);
    assert!((a.exterior - PI).abs() < 1e-12);
}

#[test]
fn square_corner_and_reflex_corner() {
    // CCW walk along the bottom edge turning north: convex right angle.
    let convex = get_angles(vector![1.0, 0.0], vector![0.0, 0.0], vector![1.0, 1.0]);
    assert!(convex.convex);
    assert!((convex.interior - FRAC_PI_2).abs() < 1e-12);
    // Turning south instead: reflex corner.
    let reflex = get_angles(vector![1.0, 0.0], vector![0.0, 0.0], vector![1.0, -1.0]);
    assert!(!reflex.convex);
    assert!((reflex.interior - 3.0 * FRAC_PI_2).abs() < 1e-12);
    assert!((reflex.exterior - FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn hull_of_square_with_interior_points() {
    let mut pts = square(2.0);
    pts.push(vector![1.0, 1.0]);
    pts.push(vector![0.5, 1.5]);
    pts.push(vector![1.0, 0.0]); // on an edge, dropped
    let hull = convex_hull(&pts);
    assert_eq!(hull.len(), 4);
    assert_eq!(hull[0], vector![0.0, 0.0]);
    assert!(signed_area2(&hull) > 0.0);
}

#[test]
fn hull_small_inputs_unchanged() {
    let tri = vec![vector![1.0, 1.0], vector![0.0, 0.0], vector![2.0, 0.0]];
    assert_eq!(convex_hull(&tri), tri);
}

#[test]
fn rmv_colinear_drops_midpoints_and_duplicates() {
    let pts = vec![
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![2.0, 0.0],
        vector![2.0, 0.0],
        vector![2.0, 2.0],
        vector![0.0, 2.0],
        vector![0.0, 1.0],
    ];
    let out = rmv_colinear(&pts);
    assert_eq!(out, square(2.0));
}

#[test]
fn rmv_colinear_collapses_a_line() {
    let pts = vec![vector![0.0, 0.0], vector![1.0, 0.0], vector![2.0, 0.0]];
    assert!(rmv_colinear(&pts).len() < 3);
}

#[test]
fn mirror_special_and_general_axes() {
    let p = vec![vector![1.0, 2.0]];
    let v = mirror_points_2d(&p, (vector![0.0, 0.0], vector![0.0, 5.0]));
    assert_eq!(v[0], vector![-1.0, 2.0]);
    let h = mirror_points_2d(&p, (vector![0.0, 3.0], vector![1.0, 3.0]));
    assert_eq!(h[0], vector![1.0, 4.0]);
    let d = mirror_points_2d(&p, (vector![0.0, 0.0], vector![1.0, 1.0]));
    assert!((d[0] - vector![2.0, 1.0]).norm() < 1e-12);
}

#[test]
fn compass_points_on_box() {
    let r = Rect::new(vector![0.0, 0.0], vector![4.0, 8.0]);
    assert_eq!(r.compass(Compass::C), vector![2.0, 4.0]);
    assert_eq!(r.center(), midpoint(r.sw(), r.ne()));
    assert_eq!(r.compass(Compass::N), vector![2.0, 8.0]);
    assert_eq!(r.compass(Compass::NNE), vector![3.0, 8.0]);
    assert_eq!(r.compass(Compass::ENE), vector![4.0, 6.0]);
    assert_eq!(r.compass(Compass::SW), r.sw());
    assert_eq!(r.compass(Compass::WSW), vector![0.0, 2.0]);
    assert_eq!(r.axis_major(), r.axis_y());
    assert_eq!(r.axis_minor(), r.axis_x());
    assert_eq!("nnw".parse::<Compass>(), Ok(Compass::NNW));
    assert!("up".parse::<Compass>().is_err());
}

#[test]
fn affine_rotation_round_trip() {
    let pivot = vector![3.0, -1.0];
    let f = Affine2::rotation_about(90.0, pivot);
    assert!(f.is_orientation_preserving());
    let q = f.apply(vector![4.0, -1.0]);
    assert!((q - vector![3.0, 0.0]).norm() < 1e-12);
    let inv = f.inverse().unwrap();
    let id = inv.compose(&f);
    assert!((id.m - Affine2::identity().m).norm() < 1e-12);
    assert!(id.t.norm() < 1e-12);
    let flip = Affine2::scaling_about(-1.0, 1.0, Vector2::zeros());
    assert!(!flip.is_orientation_preserving());
}

#[test]
fn mesh_2d_box_has_two_triangles() {
    let m = get_mesh_2d(&square(10.0)).unwrap();
    assert_eq!(m.triangle_count(), 2);
    let mut used: Vec<u32> = m.indices.iter().flatten().copied().collect();
    used.sort_unstable();
    used.dedup();
    assert_eq!(used, vec![0, 1, 2, 3]);
    assert!((m.area() - 100.0).abs() < 1e-9);
}

#[test]
fn mesh_2d_concave_l_covers_footprint() {
    let l = vec![
        vector![0.0, 0.0],
        vector![4.0, 0.0],
        vector![4.0, 1.0],
        vector![1.0, 1.0],
        vector![1.0, 4.0],
        vector![0.0, 4.0],
    ];
    let m = get_mesh_2d(&l).unwrap();
    assert_eq!(m.triangle_count(), 4);
    assert!((m.area() - 7.0).abs() < 1e-9);
    for t in &m.indices {
        let [a, b, c] = t.map(|i| l[i as usize]);
        assert!(util::cross(a, b, c) > 0.0);
    }
}

#[test]
fn engine_union_and_holes() {
    let a = square(2.0);
    let b = box_points(vector![1.0, 1.0], vector![2.0, 2.0]);
    let u = engine::boolean(&a, &b, engine::BoolOp::Union).unwrap();
    assert!((engine::area(&u) - 7.0).abs() < 1e-9);
    let far = box_points(vector![10.0, 10.0], vector![1.0, 1.0]);
    assert!(engine::boolean(&a, &far, engine::BoolOp::Union).is_err());
    let inner = box_points(vector![0.5, 0.5], vector![0.5, 0.5]);
    assert!(engine::boolean(&a, &inner, engine::BoolOp::Difference).is_err());
}

#[test]
fn engine_simplicity() {
    assert!(engine::is_simple(&square(1.0)));
    let bowtie = vec![vector![0.0, 0.0], vector![1.0, 1.0], vector![1.0, 0.0], vector![0.0, 1.0]];
    assert!(!engine::is_simple(&bowtie));
    let cw: Vec<_> = square(1.0).into_iter().rev().collect();
    assert!(signed_area2(&engine::orient_ccw(&cw)) > 0.0);
}

fn arb_points() -> impl Strategy<Value = Vec<Vector2<f64>>> {
    prop::collection::vec((-50i32..50, -50i32..50), 4..24)
        .prop_map(|v| v.into_iter().map(|(x, y)| vector![x as f64, y as f64]).collect())
}

proptest! {
    #[test]
    fn hull_is_idempotent(pts in arb_points()) {
        let h1 = convex_hull(&pts);
        let h2 = convex_hull(&h1);
        prop_assert_eq!(h1, h2);
    }

    #[test]
    fn rmv_colinear_leaves_no_colinear_triple(pts in arb_points()) {
        let out = rmv_colinear(&pts);
        let n = out.len();
        if n >= 3 {
            for i in 0..n {
                prop_assert!(!are_colinear(&[out[(i + n - 1) % n], out[i], out[(i + 1) % n]]));
            }
        }
        // Survivors keep their relative order.
        let mut cursor = 0;
        for p in &out {
            let found = pts[cursor..].iter().position(|q| q == p);
            prop_assert!(found.is_some());
            cursor += found.unwrap_or(0) + 1;
        }
    }
}
