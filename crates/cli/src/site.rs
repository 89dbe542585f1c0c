//! Site placement scenario: one rotated rectangular building placed inside a
//! site footprint, then stacked until a target floor area is reached.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use nalgebra::{Point3, Vector2};
use rand::Rng;
use serde::{Deserialize, Serialize};
use spacekit::mesh::MeshGraphic;
use spacekit::{Space, Spacer};

/// Site footprint as read from a JSON file.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SiteConfig {
    pub coordinates: Vec<[f64; 2]>,
    #[serde(default = "default_level")]
    pub level: f64,
    #[serde(default = "default_height")]
    pub height: f64,
}

fn default_level() -> f64 {
    -20.0
}

fn default_height() -> f64 {
    20.0
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            coordinates: vec![
                [1771.8803, 1282.6400],
                [1792.2478, 1263.0727],
                [2108.5229, 1263.0727],
                [2700.4829, 1737.8546],
                [2700.4829, 2289.2733],
                [2000.1994, 2289.2733],
            ],
            level: default_level(),
            height: default_height(),
        }
    }
}

impl SiteConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("reading site {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing site {}", path.display()))
    }

    pub fn to_space(&self) -> Result<Space> {
        let ring: Vec<Point3<f64>> = self
            .coordinates
            .iter()
            .map(|&[x, y]| Point3::new(x, y, self.level))
            .collect();
        Space::from_points(&ring, self.height).context("site footprint is not a simple polygon")
    }
}

/// Building dimensions; any field left `None` on the command line is drawn
/// from the scenario's default range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Building {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub target_area: f64,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BuildingArgs {
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub target_area: Option<f64>,
}

impl BuildingArgs {
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Building {
        Building {
            length: self.length.unwrap_or_else(|| rng.gen_range(200.0..=400.0)),
            width: self.width.unwrap_or_else(|| rng.gen_range(200.0..=300.0)),
            height: self.height.unwrap_or_else(|| rng.gen_range(20.0..=40.0)),
            rotation: self.rotation.unwrap_or_else(|| rng.gen_range(5.0..=355.0)),
            target_area: self
                .target_area
                .unwrap_or_else(|| rng.gen_range(80_000.0..=150_000.0)),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SiteReport {
    pub building: Building,
    pub placed: bool,
    pub floors: usize,
    pub area: f64,
    pub site: MeshGraphic,
    pub spaces: Vec<MeshGraphic>,
}

pub fn run<R: Rng + ?Sized>(
    site: &Space,
    building: Building,
    spacer: &Spacer,
    rng: &mut R,
) -> Result<SiteReport> {
    let mut seed = Space::default();
    seed.make_box(Vector2::zeros(), building.length, building.width)
        .context("building footprint")?;
    seed.set_height(building.height).context("building height")?;
    seed.rotate(building.rotation, None).context("building rotation")?;

    let placed = spacer.place_within_rng(&mut seed, site, rng);
    let spaces = if placed {
        let mut all = vec![seed.clone()];
        all.extend(spacer.stack_to_area(&seed, building.target_area, 0.0)?);
        all
    } else {
        Vec::new()
    };
    let floors = spaces.len();
    tracing::info!(placed, floors, "site scenario finished");
    Ok(SiteReport {
        building,
        placed,
        floors,
        area: seed.area() * floors as f64,
        site: site.mesh_graphic(),
        spaces: spaces.iter().map(Space::mesh_graphic).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    fn building(length: f64, width: f64, target_area: f64) -> Building {
        Building {
            length,
            width,
            height: 30.0,
            rotation: 0.0,
            target_area,
        }
    }

    #[test]
    fn default_site_is_valid() {
        let site = SiteConfig::default().to_space().unwrap();
        assert_eq!(site.floor().len(), 6);
        assert_eq!(site.level(), -20.0);
        assert_eq!(site.ceiling().level(), 0.0);
        assert!(site.area() > 500_000.0);
    }

    #[test]
    fn load_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("site.json");
        fs::write(&path, r#"{"coordinates": [[0,0],[100,0],[100,50],[0,50]]}"#).unwrap();
        let cfg = SiteConfig::load(&path).unwrap();
        assert_eq!(cfg.level, -20.0);
        assert_eq!(cfg.height, 20.0);
        assert!((cfg.to_space().unwrap().area() - 5000.0).abs() < 1e-9);
    }

    #[test]
    fn load_reports_bad_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("site.json");
        fs::write(&path, "{").unwrap();
        let err = SiteConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing site"));
    }

    #[test]
    fn small_building_is_placed_and_stacked() {
        let site = SiteConfig::default().to_space().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let report = run(&site, building(100.0, 50.0, 12_000.0), &Spacer::new(), &mut rng).unwrap();
        assert!(report.placed);
        assert_eq!(report.floors, 3);
        assert!((report.area - 15_000.0).abs() < 1e-6);
        assert_eq!(report.spaces.len(), 3);
    }

    #[test]
    fn oversized_building_is_not_placed() {
        let site = SiteConfig::default().to_space().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let report = run(&site, building(5000.0, 5000.0, 1.0), &Spacer::new(), &mut rng).unwrap();
        assert!(!report.placed);
        assert_eq!(report.floors, 0);
        assert!(report.spaces.is_empty());
    }

    #[test]
    fn resolve_keeps_given_values() {
        let mut rng = StdRng::seed_from_u64(1);
        let args = BuildingArgs {
            length: Some(250.0),
            ..Default::default()
        };
        let b = args.resolve(&mut rng);
        assert_eq!(b.length, 250.0);
        assert!((200.0..=300.0).contains(&b.width));
        assert!((5.0..=355.0).contains(&b.rotation));
    }
}
