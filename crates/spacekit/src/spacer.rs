//! Copying, arraying, stacking, and randomized placement of spaces.
//!
//! Purpose
//! - Build new spaces from a seed (`copy`, `place`, `row`, `stack`,
//!   `stack_to_area`) without touching the seed.
//! - Position a shape inside a bound by bounded rejection sampling
//!   (`place_within`, `place_within_line`); only the shape passed in is mutated,
//!   and only on success.
//!
//! Model
//! - Candidates move the shape's centroid in x/y; the shape keeps its level.
//! - A candidate is accepted when the moved footprint lies wholly inside the
//!   bound's footprint. After `PlacementCfg::trials` misses the call gives up.
//! - Every randomized call has an `_rng` form taking any `Rng`; the plain form
//!   uses `rand::thread_rng()`.

use nalgebra::{Point3, Vector3};
use rand::Rng;
use tracing::{debug, trace};

use crate::cfg::{PlacementCfg, MAX_COPIES};
use crate::error::{GeometryError, Result};
use crate::geom2::rand::{integer_point_in_rect, sample_range};
use crate::geom2::Compass;
use crate::space::Space;

/// Direction of a [`Spacer::row`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    X,
    Y,
}

/// Stateless arranger of spaces, configured only by its trial budget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Spacer {
    cfg: PlacementCfg,
}

impl Spacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cfg(cfg: PlacementCfg) -> Self {
        Self { cfg }
    }

    pub fn cfg(&self) -> PlacementCfg {
        self.cfg
    }

    /// Clone of `space` translated by `move_by`.
    pub fn copy(&self, space: &Space, move_by: Vector3<f64>) -> Result<Space> {
        let mut out = space.clone();
        if move_by != Vector3::zeros() {
            out.move_by(move_by)?;
        }
        Ok(out)
    }

    /// `copies` new spaces, each offset by `move_by` from the one before.
    /// The seed itself is not included; more than `MAX_COPIES` is rejected.
    pub fn place(&self, space: &Space, copies: usize, move_by: Vector3<f64>) -> Result<Vec<Space>> {
        if copies > MAX_COPIES {
            return Err(GeometryError::invalid_parameter(format!(
                "{copies} copies requested, at most {MAX_COPIES} allowed"
            )));
        }
        let mut out = Vec::new();
        let mut last = space.clone();
        for _ in 0..copies {
            last = self.copy(&last, move_by)?;
            out.push(last.clone());
        }
        Ok(out)
    }

    /// Copies side by side: each step is the bounding-box size along `axis` plus `gap`.
    pub fn row(&self, space: &Space, copies: usize, gap: f64, axis: Axis) -> Result<Vec<Space>> {
        let step = match axis {
            Axis::X => Vector3::new(space.size_x() + gap, 0.0, 0.0),
            Axis::Y => Vector3::new(0.0, space.size_y() + gap, 0.0),
        };
        self.place(space, copies, step)
    }

    /// Copies on top of each other: each step is the height plus `plenum`.
    pub fn stack(&self, space: &Space, copies: usize, plenum: f64) -> Result<Vec<Space>> {
        self.place(space, copies, Vector3::new(0.0, 0.0, space.height() + plenum))
    }

    /// Stack `floor(target_area / area)` copies; none if the seed already
    /// covers the target. The seed plus copies may fall short of the target.
    pub fn stack_to_area(&self, space: &Space, target_area: f64, plenum: f64) -> Result<Vec<Space>> {
        if !target_area.is_finite() {
            return Err(GeometryError::invalid_parameter("non-finite target area"));
        }
        let area = space.area();
        if area >= target_area {
            return Ok(Vec::new());
        }
        let copies = (target_area / area).floor();
        if copies > MAX_COPIES as f64 {
            return Err(GeometryError::invalid_parameter(format!(
                "target area {target_area} needs {copies} copies, at most {MAX_COPIES} allowed"
            )));
        }
        self.stack(space, copies as usize, plenum)
    }

    /// Move `shape` to a random position inside `bound`, using the thread-local generator.
    pub fn place_within(&self, shape: &mut Space, bound: &Space) -> bool {
        self.place_within_rng(shape, bound, &mut rand::thread_rng())
    }

    /// Move `shape` so its centroid sits on a random integer point of
    /// `bound`'s bounding box where the footprint fits inside `bound`.
    ///
    /// Returns false without drawing if `shape` is larger than `bound`, and
    /// false with `shape` untouched when the trial budget runs out.
    pub fn place_within_rng<R: Rng + ?Sized>(
        &self,
        shape: &mut Space,
        bound: &Space,
        rng: &mut R,
    ) -> bool {
        if shape.area() > bound.area() {
            debug!(shape = shape.area(), bound = bound.area(), "shape larger than bound");
            return false;
        }
        let rect = bound.floor().bounds();
        self.search(shape, bound, |_| {
            let p = integer_point_in_rect(rng, &rect);
            Point3::new(p.x, p.y, 0.0)
        })
    }

    /// Like [`Spacer::place_within`] but along the segment from `bound`'s
    /// centroid to its compass point `dir`.
    pub fn place_within_line(&self, shape: &mut Space, bound: &Space, dir: Compass) -> bool {
        self.place_within_line_rng(shape, bound, dir, &mut rand::thread_rng())
    }

    /// Candidates are `centroid + t (compass − centroid)` with `t ~ U[0, 1]`.
    pub fn place_within_line_rng<R: Rng + ?Sized>(
        &self,
        shape: &mut Space,
        bound: &Space,
        dir: Compass,
        rng: &mut R,
    ) -> bool {
        if shape.area() > bound.area() {
            debug!(shape = shape.area(), bound = bound.area(), "shape larger than bound");
            return false;
        }
        let from = bound.centroid_floor();
        let to = bound.compass_point(dir);
        self.search(shape, bound, |_| {
            let t = sample_range(rng, 0.0, 1.0);
            from + (to - from) * t
        })
    }

    /// Rejection loop shared by both placement modes.
    fn search<F>(&self, shape: &mut Space, bound: &Space, mut candidate: F) -> bool
    where
        F: FnMut(usize) -> Point3<f64>,
    {
        let mut scratch = shape.clone();
        for trial in 0..self.cfg.trials {
            let target = candidate(trial);
            let c = scratch.centroid_floor();
            let d = Vector3::new(target.x - c.x, target.y - c.y, 0.0);
            if scratch.move_by(d).is_err() {
                continue;
            }
            if bound.floor().contains_boundary(scratch.floor()) {
                trace!(trial, x = target.x, y = target.y, "placed");
                *shape = scratch;
                return true;
            }
        }
        debug!(trials = self.cfg.trials, "no placement found");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn box_space(origin: (f64, f64), x: f64, y: f64, h: f64) -> Space {
        let mut s = Space::default();
        s.make_box(vector![origin.0, origin.1], x, y).unwrap();
        s.set_height(h).unwrap();
        s
    }

    #[test]
    fn copy_leaves_source_untouched() {
        let s = box_space((0.0, 0.0), 2.0, 2.0, 1.0);
        let c = Spacer::new().copy(&s, Vector3::new(5.0, 0.0, 1.0)).unwrap();
        assert_eq!(s.level(), 0.0);
        assert_eq!(c.level(), 1.0);
        assert!((c.centroid_floor().x - 6.0).abs() < 1e-9);
        let same = Spacer::new().copy(&s, Vector3::zeros()).unwrap();
        assert_eq!(same, s);
    }

    #[test]
    fn row_and_stack_offsets() {
        let sp = Spacer::new();
        let s = box_space((0.0, 0.0), 4.0, 2.0, 3.0);
        let xs = sp.row(&s, 3, 1.0, Axis::X).unwrap();
        assert_eq!(xs.len(), 3);
        assert!((xs[2].floor().bounds().min.x - 15.0).abs() < 1e-9);
        let ys = sp.row(&s, 2, 0.5, Axis::Y).unwrap();
        assert!((ys[1].floor().bounds().min.y - 5.0).abs() < 1e-9);
        let zs = sp.stack(&s, 4, 0.5).unwrap();
        assert_eq!(zs.len(), 4);
        assert!((zs[3].level() - 14.0).abs() < 1e-9);
        assert!(sp.place(&s, 0, Vector3::x()).unwrap().is_empty());
    }

    #[test]
    fn stack_to_area_uses_floor_division() {
        let sp = Spacer::new();
        let s = box_space((0.0, 0.0), 10.0, 10.0, 3.0);
        assert!(sp.stack_to_area(&s, 100.0, 0.0).unwrap().is_empty());
        assert!(sp.stack_to_area(&s, 50.0, 0.0).unwrap().is_empty());
        assert_eq!(sp.stack_to_area(&s, 250.0, 0.0).unwrap().len(), 2);
        assert_eq!(sp.stack_to_area(&s, 300.0, 1.0).unwrap().len(), 3);
    }

    #[test]
    fn oversized_shape_is_rejected_without_change() {
        let sp = Spacer::new();
        let bound = box_space((0.0, 0.0), 10.0, 10.0, 1.0);
        let mut shape = box_space((50.0, 50.0), 20.0, 20.0, 1.0);
        let before = shape.clone();
        let mut rng = StdRng::seed_from_u64(1);
        let mut untouched = rng.clone();
        assert!(!sp.place_within_rng(&mut shape, &bound, &mut rng));
        assert!(!sp.place_within_line_rng(&mut shape, &bound, Compass::N, &mut rng));
        assert_eq!(shape, before);
        // No candidate was drawn.
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn copy_count_is_capped() {
        let sp = Spacer::new();
        let s = box_space((0.0, 0.0), 10.0, 10.0, 1.0);
        assert!(matches!(
            sp.stack_to_area(&s, 1e30, 0.0),
            Err(GeometryError::InvalidParameter { .. })
        ));
        assert!(sp.stack_to_area(&s, f64::MAX, 0.0).is_err());
        assert!(sp.place(&s, MAX_COPIES + 1, Vector3::x()).is_err());
        assert!(sp.row(&s, usize::MAX, 1.0, Axis::X).is_err());
        assert_eq!(sp.stack_to_area(&s, 1_000.0, 0.0).unwrap().len(), 10);
    }

    #[test]
    fn place_within_moves_inside_and_keeps_level() {
        let sp = Spacer::new();
        let bound = box_space((0.0, 0.0), 100.0, 100.0, 1.0);
        let mut shape = box_space((500.0, 500.0), 10.0, 10.0, 2.0);
        shape.set_level(7.0).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        assert!(sp.place_within_rng(&mut shape, &bound, &mut rng));
        assert!(bound.floor().contains_boundary(shape.floor()));
        assert_eq!(shape.level(), 7.0);
        let c = shape.centroid_floor();
        assert!((c.x - c.x.round()).abs() < 1e-9);
    }

    #[test]
    fn place_within_gives_up_after_budget() {
        // A thin diagonal strip: the square's bounding box never fits.
        let sp = Spacer::with_cfg(PlacementCfg { trials: 25 });
        let mut bound = Space::default();
        bound
            .set_points(&[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(100.0, 99.0, 0.0),
                Point3::new(99.0, 100.0, 0.0),
            ])
            .unwrap();
        let mut shape = box_space((0.0, 0.0), 5.0, 5.0, 1.0);
        let before = shape.clone();
        let mut rng = StdRng::seed_from_u64(5);
        assert!(!sp.place_within_rng(&mut shape, &bound, &mut rng));
        assert_eq!(shape, before);
    }

    #[test]
    fn place_within_line_lands_on_segment() {
        let sp = Spacer::new();
        let bound = box_space((0.0, 0.0), 100.0, 20.0, 1.0);
        let mut shape = box_space((0.0, 0.0), 4.0, 4.0, 1.0);
        let mut rng = StdRng::seed_from_u64(8);
        assert!(sp.place_within_line_rng(&mut shape, &bound, Compass::E, &mut rng));
        let c = shape.centroid_floor();
        assert!((c.y - 10.0).abs() < 1e-9);
        assert!(c.x >= 50.0 - 1e-9 && c.x <= 98.0 + 1e-9);
        assert!(bound.floor().contains_boundary(shape.floor()));
    }

    proptest! {
        #[test]
        fn stack_to_area_count(side in 1.0f64..20.0, target in 1.0f64..5000.0) {
            let s = box_space((0.0, 0.0), side, side, 1.0);
            let a = s.area();
            let out = Spacer::new().stack_to_area(&s, target, 0.0).unwrap();
            if a >= target {
                prop_assert!(out.is_empty());
            } else {
                prop_assert_eq!(out.len(), (target / a).floor() as usize);
            }
        }
    }
}
