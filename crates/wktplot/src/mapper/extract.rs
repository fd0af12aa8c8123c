//! Per-kind coordinate extraction.
//!
//! - Points project pairwise; lines and rings project as one batch each.
//! - Rings are returned open: a trailing pair equal to the first is dropped.
//!   Rings that are not closed keep every pair.
//! - No minimum-cardinality checks: a one-point line or a two-point ring is
//!   returned as-is.

use geo_traits::{CoordTrait, LineStringTrait, MultiPolygonTrait, PointTrait, PolygonTrait};
use serde::Serialize;

use super::Mapper;
use crate::geometry::is_empty;

/// Ring coordinates of one polygon as parallel nested arrays.
///
/// `xs[0]`/`ys[0]` is the exterior; later entries are holes in source order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PolygonRings {
    pub xs: Vec<Vec<f64>>,
    pub ys: Vec<Vec<f64>>,
}

impl PolygonRings {
    pub fn num_rings(&self) -> usize {
        self.xs.len()
    }

    /// `(x, y)` arrays of ring `i`.
    pub fn ring(&self, i: usize) -> Option<(&[f64], &[f64])> {
        Some((self.xs.get(i)?.as_slice(), self.ys.get(i)?.as_slice()))
    }

    pub fn exterior(&self) -> Option<(&[f64], &[f64])> {
        self.ring(0)
    }

    pub fn interiors(&self) -> impl Iterator<Item = (&[f64], &[f64])> {
        self.xs
            .iter()
            .zip(&self.ys)
            .skip(1)
            .map(|(x, y)| (x.as_slice(), y.as_slice()))
    }

    /// Every `(x, y)` pair across all rings.
    pub fn coords(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs
            .iter()
            .zip(&self.ys)
            .flat_map(|(x, y)| x.iter().copied().zip(y.iter().copied()))
    }

    fn push_ring(&mut self, x: Vec<f64>, y: Vec<f64>) {
        self.xs.push(x);
        self.ys.push(y);
    }
}

impl Mapper {
    /// Projected `(x, y)` of a point; `None` for an empty point.
    pub fn point_coords<P: PointTrait<T = f64>>(&self, point: &P) -> Option<(f64, f64)> {
        PointTrait::coord(point).map(|c| self.cfg.projection.project_point(c.x(), c.y()))
    }

    /// Projected coordinate arrays of a line string or ring, in path order.
    pub fn line_string_coords<L: LineStringTrait<T = f64>>(&self, line: &L) -> (Vec<f64>, Vec<f64>) {
        let (xs, ys) = line.coords().map(|c| (c.x(), c.y())).unzip();
        self.cfg.projection.project_batch(xs, ys)
    }

    /// Projected, open rings of a polygon: exterior first, then holes.
    ///
    /// A polygon without holes yields one ring; an empty polygon yields none.
    pub fn polygon_coords<P: PolygonTrait<T = f64>>(&self, polygon: &P) -> PolygonRings {
        let mut rings = PolygonRings::default();
        for ring in polygon.exterior().into_iter().chain(polygon.interiors()) {
            let (xs, ys) = open_ring(&ring);
            let (xs, ys) = self.cfg.projection.project_batch(xs, ys);
            rings.push_ring(xs, ys);
        }
        rings
    }

    /// Ring sets of every non-empty member polygon, concatenated in member order.
    pub fn multi_polygon_coords<M: MultiPolygonTrait<T = f64>>(&self, multi: &M) -> Vec<PolygonRings> {
        multi
            .polygons()
            .filter(|pl| !is_empty(pl))
            .map(|pl| self.polygon_coords(&pl))
            .collect()
    }
}

/// Ring coordinates with the closing duplicate removed.
fn open_ring<L: LineStringTrait<T = f64>>(ring: &L) -> (Vec<f64>, Vec<f64>) {
    let (mut xs, mut ys): (Vec<f64>, Vec<f64>) = ring.coords().map(|c| (c.x(), c.y())).unzip();
    let closed = xs.len() > 1 && xs.first() == xs.last() && ys.first() == ys.last();
    if closed {
        xs.pop();
        ys.pop();
    }
    (xs, ys)
}
