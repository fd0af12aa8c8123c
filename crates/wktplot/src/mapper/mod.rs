//! Geometry coordinate mapper.
//!
//! Purpose
//! - Turn one geometry (or its WKT text) into primitive draw calls on a
//!   `Renderer`: points -> `circle`, lines and rings -> `line`, polygons ->
//!   `multi_polygons` with one entry holding the exterior and its holes.
//! - Multi-part kinds and collections recurse per member, in source order;
//!   that order is the renderer's paint order.
//!
//! Guarantees
//! - The whole tree passes the type gate before the first draw call, so a
//!   failing value leaves the renderer untouched.
//! - Empty values (at any depth) produce no call and no error.
//! - Styles are forwarded unchanged; the mapper holds no mutable state.
//!
//! Code cross-refs: `geometry::{ShapeKind, ensure_supported, is_empty}`,
//! `projection::Projection`, `figure::Figure`.

mod extract;

pub use extract::PolygonRings;

use geo_traits::{
    GeometryCollectionTrait, GeometryTrait, GeometryType, MultiLineStringTrait, MultiPointTrait,
    MultiPolygonTrait,
};
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, WktPlotError};
use crate::geometry::{ensure_supported, is_empty, parse_wkt, ShapeKind};
use crate::projection::Projection;
use crate::style::Style;

/// Figure-like drawing surface.
///
/// Coordinates arrive already projected; styles arrive exactly as the caller
/// passed them. Return values are never consulted.
pub trait Renderer {
    /// Point markers at each `(x[i], y[i])`.
    fn circle(&mut self, x: &[f64], y: &[f64], style: &Style);
    /// One open path.
    fn line(&mut self, x: &[f64], y: &[f64], style: &Style);
    /// Several open paths, one per `(xs[i], ys[i])`.
    fn multi_line(&mut self, xs: &[Vec<f64>], ys: &[Vec<f64>], style: &Style);
    /// Polygons, each an exterior ring followed by its holes.
    fn multi_polygons(&mut self, polygons: &[PolygonRings], style: &Style);
}

/// Mapper configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MapperCfg {
    /// Applied to every extracted coordinate.
    pub projection: Projection,
    /// Draw MultiPoint, MultiLineString and MultiPolygon values with a single
    /// batched call instead of one call per member. Collections always recurse.
    pub merge_multi_parts: bool,
}

/// Stateless shape-to-renderer dispatcher.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Mapper {
    cfg: MapperCfg,
}

impl Mapper {
    pub fn new(cfg: MapperCfg) -> Self {
        Self { cfg }
    }

    /// Coordinates pass through unchanged.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Geographic degrees are projected to Web Mercator meters.
    pub fn mercator() -> Self {
        Self::new(MapperCfg {
            projection: Projection::WebMercator,
            ..Default::default()
        })
    }

    pub fn cfg(&self) -> MapperCfg {
        self.cfg
    }

    pub fn projection(&self) -> Projection {
        self.cfg.projection
    }

    /// Parse `wkt` and draw it.
    ///
    /// Errors: `Parse` for malformed text, `UnsupportedType` for kinds outside
    /// the supported set. Neither issues a draw call.
    pub fn add_shape<R: Renderer + ?Sized>(
        &self,
        renderer: &mut R,
        wkt: &str,
        style: &Style,
    ) -> Result<()> {
        let geom = parse_wkt(wkt)?;
        self.add_geometry(renderer, &geom, style)
    }

    /// Draw an in-memory geometry.
    pub fn add_geometry<R, G>(&self, renderer: &mut R, geom: &G, style: &Style) -> Result<()>
    where
        R: Renderer + ?Sized,
        G: GeometryTrait<T = f64>,
    {
        ensure_supported(geom)?;
        self.draw(renderer, geom, style)
    }

    fn draw<R, G>(&self, renderer: &mut R, geom: &G, style: &Style) -> Result<()>
    where
        R: Renderer + ?Sized,
        G: GeometryTrait<T = f64>,
    {
        if is_empty(geom) {
            debug!(kind = %ShapeKind::of(geom), "given shape is empty, skipping");
            return Ok(());
        }
        let merge = self.cfg.merge_multi_parts;
        debug!(kind = %ShapeKind::of(geom), merge, "drawing shape");
        match geom.as_type() {
            GeometryType::Point(pt) => {
                if let Some((x, y)) = self.point_coords(pt) {
                    renderer.circle(&[x], &[y], style);
                }
            }
            GeometryType::LineString(ls) => {
                let (x, y) = self.line_string_coords(ls);
                renderer.line(&x, &y, style);
            }
            GeometryType::Polygon(pl) => {
                let rings = self.polygon_coords(pl);
                renderer.multi_polygons(std::slice::from_ref(&rings), style);
            }
            GeometryType::MultiPoint(mp) if merge => {
                let (x, y): (Vec<f64>, Vec<f64>) =
                    mp.points().filter_map(|pt| self.point_coords(&pt)).unzip();
                if !x.is_empty() {
                    renderer.circle(&x, &y, style);
                }
            }
            GeometryType::MultiLineString(mls) if merge => {
                let (xs, ys): (Vec<Vec<f64>>, Vec<Vec<f64>>) = mls
                    .line_strings()
                    .filter(|ls| !is_empty(ls))
                    .map(|ls| self.line_string_coords(&ls))
                    .unzip();
                if !xs.is_empty() {
                    renderer.multi_line(&xs, &ys, style);
                }
            }
            GeometryType::MultiPolygon(mpl) if merge => {
                let polygons = self.multi_polygon_coords(mpl);
                if !polygons.is_empty() {
                    renderer.multi_polygons(&polygons, style);
                }
            }
            GeometryType::MultiPoint(mp) => {
                for pt in mp.points() {
                    self.draw(renderer, &pt, style)?;
                }
            }
            GeometryType::MultiLineString(mls) => {
                for ls in mls.line_strings() {
                    self.draw(renderer, &ls, style)?;
                }
            }
            GeometryType::MultiPolygon(mpl) => {
                for pl in mpl.polygons() {
                    self.draw(renderer, &pl, style)?;
                }
            }
            GeometryType::GeometryCollection(gc) => {
                for g in gc.geometries() {
                    self.draw(renderer, &g, style)?;
                }
            }
            GeometryType::Line(_) | GeometryType::Rect(_) | GeometryType::Triangle(_) => {
                return Err(WktPlotError::UnsupportedType {
                    kind: ShapeKind::of(geom).name(),
                });
            }
        }
        Ok(())
    }
}
