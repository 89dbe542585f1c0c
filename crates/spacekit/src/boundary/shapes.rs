//! Parametric footprint constructors.
//!
//! Every constructor builds its candidate ring(s) on a scratch copy and commits
//! only when the whole shape validates. Compound shapes (cross, L, T, U, H) are
//! one or two bars unioned through `Boundary::add`.
//!
//! Arm widths and axis positions are fractions of the overall box size. Values
//! above 1 are clamped to 1; widths must be positive and everything finite.
//! Bars never extend past the box.

use nalgebra::Vector2;

use super::Boundary;
use crate::error::{GeometryError, Result};
use crate::geom2::{box_points, regular_polygon};

/// Bar widths and centerlines of a cross, as fractions of the box size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrossArms {
    /// Width of the north-south bar (fraction of `x_size`).
    pub x_width: f64,
    /// Depth of the east-west bar (fraction of `y_size`).
    pub y_depth: f64,
    /// Centerline of the north-south bar (fraction of `x_size` from the west side).
    pub x_axis: f64,
    /// Centerline of the east-west bar (fraction of `y_size` from the south side).
    pub y_axis: f64,
}

impl Default for CrossArms {
    fn default() -> Self {
        Self {
            x_width: 1.0 / 3.0,
            y_depth: 1.0 / 3.0,
            x_axis: 0.5,
            y_axis: 0.5,
        }
    }
}

/// Bar widths of U and H shapes, as fractions of the box size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarArms {
    /// West bar width.
    pub x_width1: f64,
    /// East bar width.
    pub x_width2: f64,
    /// Connecting bar depth.
    pub y_depth: f64,
}

impl Default for BarArms {
    fn default() -> Self {
        Self {
            x_width1: 1.0 / 3.0,
            x_width2: 1.0 / 3.0,
            y_depth: 1.0 / 3.0,
        }
    }
}

fn check_size(x_size: f64, y_size: f64) -> Result<()> {
    if x_size.is_finite() && y_size.is_finite() && x_size > 0.0 && y_size > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid_parameter(format!(
            "box size must be positive, got ({x_size}, {y_size})"
        )))
    }
}

/// Bar width fraction: positive, clamped to 1.
fn width(v: f64, name: &str) -> Result<f64> {
    if v.is_finite() && v > 0.0 {
        Ok(v.min(1.0))
    } else {
        Err(GeometryError::invalid_parameter(format!(
            "{name} must be a positive fraction, got {v}"
        )))
    }
}

/// Axis position fraction, clamped into [0, 1].
fn fraction(v: f64, name: &str) -> Result<f64> {
    if v.is_finite() {
        Ok(v.clamp(0.0, 1.0))
    } else {
        Err(GeometryError::invalid_parameter(format!("{name} must be finite")))
    }
}

impl Boundary {
    /// Rectangle with its SW corner at `origin`.
    pub fn make_box(&mut self, origin: Vector2<f64>, x_size: f64, y_size: f64) -> Result<()> {
        check_size(x_size, y_size)?;
        self.set_points(&box_points(origin, Vector2::new(x_size, y_size)))
    }

    /// Cross inside the box at `origin` of size `x_size × y_size`.
    pub fn make_cross(
        &mut self,
        origin: Vector2<f64>,
        x_size: f64,
        y_size: f64,
        arms: CrossArms,
    ) -> Result<()> {
        self.commit_bars(&cross_bars(origin, x_size, y_size, arms)?)
    }

    /// L: north-south bar on the west side, east-west bar along the south side.
    pub fn make_l(
        &mut self,
        origin: Vector2<f64>,
        x_size: f64,
        y_size: f64,
        x_width: f64,
        y_depth: f64,
    ) -> Result<()> {
        let arms = l_arms(x_width, y_depth)?;
        self.commit_bars(&cross_bars(origin, x_size, y_size, arms)?)
    }

    /// T: east-west bar along the north side, north-south bar centered.
    pub fn make_t(
        &mut self,
        origin: Vector2<f64>,
        x_size: f64,
        y_size: f64,
        x_width: f64,
        y_depth: f64,
    ) -> Result<()> {
        let y_depth = width(y_depth, "y_depth")?;
        let arms = CrossArms {
            x_width,
            y_depth,
            x_axis: 0.5,
            y_axis: 1.0 - y_depth * 0.5,
        };
        self.commit_bars(&cross_bars(origin, x_size, y_size, arms)?)
    }

    /// U: an L plus a north-south bar on the east side.
    pub fn make_u(
        &mut self,
        origin: Vector2<f64>,
        x_size: f64,
        y_size: f64,
        arms: BarArms,
    ) -> Result<()> {
        let l = l_arms(arms.x_width1, arms.y_depth)?;
        let mut bars = cross_bars(origin, x_size, y_size, l)?;
        bars.push(east_bar(origin, x_size, y_size, arms.x_width2)?);
        self.commit_bars(&bars)
    }

    /// H: west bar, east bar, and a connecting bar at mid-height.
    pub fn make_h(
        &mut self,
        origin: Vector2<f64>,
        x_size: f64,
        y_size: f64,
        arms: BarArms,
    ) -> Result<()> {
        let x_width1 = width(arms.x_width1, "x_width1")?;
        let cross = CrossArms {
            x_width: x_width1,
            y_depth: arms.y_depth,
            x_axis: x_width1 * 0.5,
            y_axis: 0.5,
        };
        let mut bars = cross_bars(origin, x_size, y_size, cross)?;
        bars.push(east_bar(origin, x_size, y_size, arms.x_width2)?);
        self.commit_bars(&bars)
    }

    /// Regular polygon centered on `center`, first corner due north.
    ///
    /// `sides` of 1 or 2 are raised to 3.
    pub fn make_polygon(&mut self, center: Vector2<f64>, radius: f64, sides: usize) -> Result<()> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(GeometryError::invalid_parameter(format!(
                "radius must be positive, got {radius}"
            )));
        }
        if sides == 0 {
            return Err(GeometryError::invalid_parameter("sides must be positive"));
        }
        self.set_points(&regular_polygon(center, radius, sides.max(3)))
    }

    /// Circle approximation with one side per unit of radius (at least 3).
    pub fn make_cylinder(&mut self, center: Vector2<f64>, radius: f64) -> Result<()> {
        let sides = if radius.is_finite() && radius >= 3.0 {
            radius.floor() as usize
        } else {
            3
        };
        self.make_polygon(center, radius, sides)
    }

    fn commit_bars(&mut self, bars: &[Vec<Vector2<f64>>]) -> Result<()> {
        let mut scratch = self.clone();
        let mut it = bars.iter();
        if let Some(first) = it.next() {
            scratch.set_points(first)?;
        }
        for bar in it {
            scratch.add(bar, false)?;
        }
        *self = scratch;
        Ok(())
    }
}

fn l_arms(x_width: f64, y_depth: f64) -> Result<CrossArms> {
    let x_width = width(x_width, "x_width")?;
    let y_depth = width(y_depth, "y_depth")?;
    Ok(CrossArms {
        x_width,
        y_depth,
        x_axis: x_width * 0.5,
        y_axis: y_depth * 0.5,
    })
}

/// Rectangle `[x0, x1] × [y0, y1]` clipped to the shape's box.
fn bar(
    origin: Vector2<f64>,
    x_size: f64,
    y_size: f64,
    (x0, x1): (f64, f64),
    (y0, y1): (f64, f64),
) -> Vec<Vector2<f64>> {
    let (xe, ye) = (origin.x + x_size, origin.y + y_size);
    let (x0, x1) = (x0.max(origin.x), x1.min(xe));
    let (y0, y1) = (y0.max(origin.y), y1.min(ye));
    vec![
        Vector2::new(x0, y0),
        Vector2::new(x1, y0),
        Vector2::new(x1, y1),
        Vector2::new(x0, y1),
    ]
}

/// North-south bar, then east-west bar.
fn cross_bars(
    origin: Vector2<f64>,
    x_size: f64,
    y_size: f64,
    arms: CrossArms,
) -> Result<Vec<Vec<Vector2<f64>>>> {
    check_size(x_size, y_size)?;
    let xw = width(arms.x_width, "x_width")? * x_size;
    let yd = width(arms.y_depth, "y_depth")? * y_size;
    let xc = origin.x + fraction(arms.x_axis, "x_axis")? * x_size;
    let yc = origin.y + fraction(arms.y_axis, "y_axis")? * y_size;
    let full_x = (origin.x, origin.x + x_size);
    let full_y = (origin.y, origin.y + y_size);
    let north_south = bar(origin, x_size, y_size, (xc - xw * 0.5, xc + xw * 0.5), full_y);
    let east_west = bar(origin, x_size, y_size, full_x, (yc - yd * 0.5, yc + yd * 0.5));
    Ok(vec![north_south, east_west])
}

fn east_bar(origin: Vector2<f64>, x_size: f64, y_size: f64, x_width: f64) -> Result<Vec<Vector2<f64>>> {
    let w = width(x_width, "x_width2")? * x_size;
    let xe = origin.x + x_size;
    Ok(bar(origin, x_size, y_size, (xe - w, xe), (origin.y, origin.y + y_size)))
}
