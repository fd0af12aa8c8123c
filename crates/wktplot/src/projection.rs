//! Spherical Web Mercator and slippy-map tile coverage.
//!
//! Formula (EPSG:3857 on a sphere of radius `R = 6_378_137 m`)
//! - `x = R · λ`
//! - `y = R · ln(tan(π/4 + φ/2))`
//!
//! No range checks: latitudes at or beyond ±90° give infinities or NaN, which
//! are passed on untouched.
//!
//! Axis convention
//! - `Projection::WebMercator` feeds a geometry's `(x, y)` pair as
//!   `(lat, lng)`, so `POINT (30 10)` maps to `(R·rad(10), R·ln tan(π/4 + rad(30)/2))`.

use std::f64::consts::{FRAC_PI_4, PI};

use nalgebra::DVector;
use serde::Serialize;

use crate::figure::Bounds;

/// Earth's equatorial radius in meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Half the width of the Web Mercator world square, in meters.
pub const MERCATOR_HALF_WORLD: f64 = PI * EARTH_RADIUS;

/// Deepest zoom level considered when picking tiles.
pub const MAX_TILE_ZOOM: u32 = 19;

/// Convert one geographic coordinate (degrees) to Web Mercator meters.
///
/// Returns `(x, y)`: the projected longitude, then the projected latitude.
#[inline]
pub fn geographic_to_mercator(lat_deg: f64, lng_deg: f64) -> (f64, f64) {
    let phi = lat_deg.to_radians();
    let lambda = lng_deg.to_radians();
    let merc_y = EARTH_RADIUS * (FRAC_PI_4 + phi / 2.0).tan().ln();
    let merc_x = EARTH_RADIUS * lambda;
    (merc_x, merc_y)
}

/// Batched [`geographic_to_mercator`] over parallel arrays.
///
/// Each output has the length of its input; values match the scalar form
/// bit-for-bit.
pub fn geographic_to_mercator_batch(lat_deg: &[f64], lng_deg: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let phi = DVector::from_column_slice(lat_deg).map(f64::to_radians);
    let lambda = DVector::from_column_slice(lng_deg).map(f64::to_radians);
    let merc_y = phi.map(|p| EARTH_RADIUS * (FRAC_PI_4 + p / 2.0).tan().ln());
    let merc_x = lambda.map(|l| EARTH_RADIUS * l);
    (merc_x.as_slice().to_vec(), merc_y.as_slice().to_vec())
}

/// Coordinate transform applied by a mapper to every extracted coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// Coordinates pass through unchanged.
    #[default]
    Identity,
    /// Geographic degrees to Web Mercator meters.
    WebMercator,
}

impl Projection {
    #[inline]
    pub fn project_point(self, x: f64, y: f64) -> (f64, f64) {
        match self {
            Projection::Identity => (x, y),
            Projection::WebMercator => geographic_to_mercator(x, y),
        }
    }

    /// Project parallel coordinate arrays as one batch.
    pub fn project_batch(self, xs: Vec<f64>, ys: Vec<f64>) -> (Vec<f64>, Vec<f64>) {
        match self {
            Projection::Identity => (xs, ys),
            Projection::WebMercator => geographic_to_mercator_batch(&xs, &ys),
        }
    }
}

/// Raster tile background providers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TileProvider {
    OpenStreetMap,
}

impl TileProvider {
    /// URL of tile `z/x/y`.
    ///
    /// https://wiki.openstreetmap.org/wiki/Raster_tile_providers
    pub fn tile_url(self, tile: &Tile) -> String {
        match self {
            TileProvider::OpenStreetMap => format!(
                "https://tile.openstreetmap.org/{}/{}/{}.png",
                tile.zoom, tile.x, tile.y
            ),
        }
    }

    pub fn attribution(self) -> &'static str {
        match self {
            TileProvider::OpenStreetMap => "© OpenStreetMap contributors",
        }
    }
}

/// One slippy-map tile with its extent in Web Mercator meters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Tile {
    pub zoom: u32,
    pub x: u32,
    pub y: u32,
    pub extent: Bounds,
}

/// Side length of one tile at `zoom`, in meters.
#[inline]
pub fn tile_width_meters(zoom: u32) -> f64 {
    2.0 * MERCATOR_HALF_WORLD / f64::from(1u32 << zoom)
}

/// Tiles covering `bounds` (Web Mercator meters) at the deepest zoom whose
/// tile count stays within `max_tiles`. Rows run north to south, columns west
/// to east. Empty for non-finite bounds or a zero budget.
pub fn tiles_covering(bounds: &Bounds, max_tiles: usize) -> Vec<Tile> {
    if !bounds.is_finite() || max_tiles == 0 {
        return Vec::new();
    }
    let mut best = None;
    for zoom in 0..=MAX_TILE_ZOOM {
        let (xr, yr) = tile_ranges(bounds, zoom);
        let count = (xr.1 - xr.0 + 1) as usize * (yr.1 - yr.0 + 1) as usize;
        if count > max_tiles {
            break;
        }
        best = Some((zoom, xr, yr));
    }
    let Some((zoom, (x0, x1), (y0, y1))) = best else {
        return Vec::new();
    };
    let size = tile_width_meters(zoom);
    let mut tiles = Vec::with_capacity(((x1 - x0 + 1) * (y1 - y0 + 1)) as usize);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let min_x = -MERCATOR_HALF_WORLD + f64::from(x) * size;
            let max_y = MERCATOR_HALF_WORLD - f64::from(y) * size;
            tiles.push(Tile {
                zoom,
                x,
                y,
                extent: Bounds {
                    min_x,
                    min_y: max_y - size,
                    max_x: min_x + size,
                    max_y,
                },
            });
        }
    }
    tiles
}

/// Inclusive column and row index ranges touched by `bounds` at `zoom`.
fn tile_ranges(bounds: &Bounds, zoom: u32) -> ((u32, u32), (u32, u32)) {
    let size = tile_width_meters(zoom);
    let last = (1u32 << zoom) - 1;
    let index = |offset: f64| -> u32 { ((offset / size).floor().max(0.0) as u32).min(last) };
    let x0 = index(bounds.min_x + MERCATOR_HALF_WORLD);
    let x1 = index(bounds.max_x + MERCATOR_HALF_WORLD);
    // tile rows grow southwards
    let y0 = index(MERCATOR_HALF_WORLD - bounds.max_y);
    let y1 = index(MERCATOR_HALF_WORLD - bounds.min_y);
    ((x0, x1), (y0, y1))
}
