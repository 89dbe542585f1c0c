//! Site placement demo: drop a rotated rectangular building onto a site
//! footprint, then stack floors until a target area is reached.
//!
//! Usage:
//! - `cargo run -p spacekit --example site_placement`          (seed 7)
//! - `cargo run -p spacekit --example site_placement -- 1234`  (custom seed)

use nalgebra::{Point3, Vector2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spacekit::{Space, Spacer};

const SITE: [(f64, f64); 6] = [
    (1771.8803, 1282.6400),
    (1792.2478, 1263.0727),
    (2108.5229, 1263.0727),
    (2700.4829, 1737.8546),
    (2700.4829, 2289.2733),
    (2000.1994, 2289.2733),
];

fn main() -> spacekit::Result<()> {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(7);
    let mut rng = StdRng::seed_from_u64(seed);

    let ring: Vec<Point3<f64>> = SITE.iter().map(|&(x, y)| Point3::new(x, y, -20.0)).collect();
    let site = Space::from_points(&ring, 20.0)?;
    println!("site: area={:.1} perimeter={:.1}", site.area(), site.perimeter());

    let length = rng.gen_range(200.0..=400.0);
    let width = rng.gen_range(200.0..=300.0);
    let height = rng.gen_range(20.0..=40.0);
    let rotation = rng.gen_range(5.0..=355.0);
    let target = rng.gen_range(80_000.0..=150_000.0);

    let mut building = Space::default();
    building.make_box(Vector2::zeros(), length, width)?;
    building.set_height(height)?;
    building.rotate(rotation, None)?;
    println!(
        "building: {length:.1} x {width:.1} x {height:.1}, rotated {rotation:.1} deg, target area {target:.0}"
    );

    let spacer = Spacer::new();
    if !spacer.place_within_rng(&mut building, &site, &mut rng) {
        println!("no placement found after {} trials", spacer.cfg().trials);
        return Ok(());
    }
    let c = building.centroid_floor();
    println!("placed at ({:.1}, {:.1})", c.x, c.y);

    let upper = spacer.stack_to_area(&building, target, 0.0)?;
    let floors = 1 + upper.len();
    let triangles: usize = std::iter::once(&building)
        .chain(&upper)
        .map(|s| s.mesh().triangle_count())
        .sum();
    println!(
        "floors={floors} total_area={:.0} top={:.1} triangles={triangles}",
        building.area() * floors as f64,
        upper.last().unwrap_or(&building).ceiling().level(),
    );
    Ok(())
}
