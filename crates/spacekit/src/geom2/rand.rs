//! Random sources for sampling and placement (replay tokens + uniform draws).
//!
//! Purpose
//! - Give placement a reproducible, indexable stream: a `(seed, index)` pair
//!   maps to one `StdRng`, so run `k` of an experiment can be replayed alone.
//! - Keep the uniform draws used by rejection sampling in one place.
//!
//! Model
//! - Every sampler is generic over `R: Rng + ?Sized`; callers inject a seeded
//!   generator for tests or fall back to `rand::thread_rng()`.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::Rect;

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    /// Token for the next draw in the same stream.
    pub fn next(self) -> Self {
        Self {
            index: self.index.wrapping_add(1),
            ..self
        }
    }

    #[inline]
    pub fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Uniform point in the box (continuous).
pub fn point_in_rect<R: Rng + ?Sized>(rng: &mut R, rect: &Rect) -> Vector2<f64> {
    Vector2::new(
        sample_range(rng, rect.min.x, rect.max.x),
        sample_range(rng, rect.min.y, rect.max.y),
    )
}

/// Uniform integer-coordinate point in the box.
///
/// Falls back to a continuous draw on an axis whose extent holds no integer.
pub fn integer_point_in_rect<R: Rng + ?Sized>(rng: &mut R, rect: &Rect) -> Vector2<f64> {
    Vector2::new(
        integer_or_float(rng, rect.min.x, rect.max.x),
        integer_or_float(rng, rect.min.y, rect.max.y),
    )
}

fn integer_or_float<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    let (a, b) = (lo.ceil(), hi.floor());
    if a <= b && a.is_finite() && b.is_finite() {
        rng.gen_range(a as i64..=b as i64) as f64
    } else {
        sample_range(rng, lo, hi)
    }
}

/// Uniform draw in `[lo, hi]`; returns `lo` when the range is empty.
pub fn sample_range<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        lo
    }
}
