use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use nalgebra::Vector2;
use serde_json::json;
use spacekit::geom2::rand::ReplayToken;
use spacekit::{BarArms, CrossArms, Space, Spacer};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod site;

use provenance::Payload;

#[derive(Parser)]
#[command(name = "spacekit-cli")]
#[command(about = "Build, place and stack prismatic spaces")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Place a rotated building on a site and stack it to a target area
    Site {
        /// JSON footprint `{coordinates, level, height}`; the demo site if omitted
        #[arg(long)]
        site: Option<PathBuf>,
        #[arg(long)]
        length: Option<f64>,
        #[arg(long)]
        width: Option<f64>,
        #[arg(long)]
        height: Option<f64>,
        /// Degrees, counter-clockwise
        #[arg(long)]
        rotation: Option<f64>,
        #[arg(long)]
        area: Option<f64>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = spacekit::cfg::PLACEMENT_TRIALS)]
        trials: usize,
        #[arg(long)]
        out: PathBuf,
    },
    /// Build one space and write its mesh and metrics
    Shape {
        #[arg(long, value_enum)]
        kind: ShapeKind,
        #[arg(long, default_value_t = 10.0)]
        x_size: f64,
        #[arg(long, default_value_t = 10.0)]
        y_size: f64,
        #[arg(long, default_value_t = 1.0)]
        height: f64,
        #[arg(long, default_value_t = 5.0)]
        radius: f64,
        #[arg(long, default_value_t = 6)]
        sides: usize,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ShapeKind {
    Box,
    Cross,
    L,
    T,
    U,
    H,
    Polygon,
    Cylinder,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    match Cmd::parse().action {
        Action::Site {
            site,
            length,
            width,
            height,
            rotation,
            area,
            seed,
            trials,
            out,
        } => {
            let args = site::BuildingArgs {
                length,
                width,
                height,
                rotation,
                target_area: area,
            };
            run_site(site, args, seed, trials, out)
        }
        Action::Shape {
            kind,
            x_size,
            y_size,
            height,
            radius,
            sides,
            out,
        } => run_shape(kind, x_size, y_size, height, radius, sides, out),
        Action::Report => report(),
    }
}

fn run_site(
    site_path: Option<PathBuf>,
    args: site::BuildingArgs,
    seed: Option<u64>,
    trials: usize,
    out: PathBuf,
) -> Result<()> {
    let cfg = match &site_path {
        Some(p) => site::SiteConfig::load(p)?,
        None => site::SiteConfig::default(),
    };
    let bound = cfg.to_space()?;
    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = ReplayToken::new(seed, 0).to_std_rng();
    let building = args.resolve(&mut rng);
    tracing::info!(seed, ?building, site_area = bound.area(), "site");

    let spacer = Spacer::with_cfg(spacekit::cfg::PlacementCfg { trials });
    let report = site::run(&bound, building, &spacer, &mut rng)?;
    provenance::write_json(&out, &report)?;

    let payload = Payload::new(
        "site",
        json!({ "site": site_path, "building": building, "trials": trials }),
    )
    .with_seed(seed);
    let prov = provenance::write_sidecar(&out, &payload)?;
    tracing::info!(out = %out.display(), provenance = %prov.display(), "written");
    Ok(())
}

fn run_shape(
    kind: ShapeKind,
    x_size: f64,
    y_size: f64,
    height: f64,
    radius: f64,
    sides: usize,
    out: PathBuf,
) -> Result<()> {
    tracing::info!(?kind, x_size, y_size, height, "shape");
    let origin = Vector2::zeros();
    let mut space = Space::default();
    match kind {
        ShapeKind::Box => space.make_box(origin, x_size, y_size),
        ShapeKind::Cross => space.make_cross(origin, x_size, y_size, CrossArms::default()),
        ShapeKind::L => space.make_l(origin, x_size, y_size, 1.0 / 3.0, 1.0 / 3.0),
        ShapeKind::T => space.make_t(origin, x_size, y_size, 1.0 / 3.0, 1.0 / 3.0),
        ShapeKind::U => space.make_u(origin, x_size, y_size, BarArms::default()),
        ShapeKind::H => space.make_h(origin, x_size, y_size, BarArms::default()),
        ShapeKind::Polygon => space.make_polygon(origin, radius, sides),
        ShapeKind::Cylinder => space.make_cylinder(origin, radius),
    }
    .with_context(|| format!("building {kind:?}"))?;
    space.set_height(height).context("space height")?;

    let mesh = space.mesh();
    let doc = json!({
        "area": space.area(),
        "perimeter": space.perimeter(),
        "volume": space.volume(),
        "convex": space.is_convex(),
        "points": space.floor().len(),
        "triangles": mesh.triangle_count(),
        "mesh": mesh.to_graphic(),
    });
    provenance::write_json(&out, &doc)?;
    let payload = Payload::new(
        "shape",
        json!({
            "kind": format!("{kind:?}"),
            "x_size": x_size,
            "y_size": y_size,
            "height": height,
            "radius": radius,
            "sides": sides,
        }),
    );
    provenance::write_sidecar(&out, &payload)?;
    tracing::info!(out = %out.display(), triangles = mesh.triangle_count(), "written");
    Ok(())
}

fn report() -> Result<()> {
    let obj = provenance::block(&Payload::new("report", json!({})), &[]);
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
