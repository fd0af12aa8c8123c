//! Geometry kinds, emptiness and WKT parsing.
//!
//! Any value implementing `geo_traits::GeometryTrait<T = f64>` is accepted
//! (`wkt::Wkt`, `geo_types::Geometry`, WKB readers, ...). WKT text is parsed
//! with the `wkt` crate.
//!
//! Invariants
//! - `ShapeKind::of` matches every `GeometryType` variant without a wildcard,
//!   so a new variant upstream fails the build instead of slipping through.
//! - The supported set is closed: Point, LineString, LinearRing, Polygon and
//!   their multi/collection forms. `Line`, `Rect` and `Triangle` are reported
//!   but rejected by the mapper's type gate.

use std::fmt;
use std::str::FromStr;

use geo_traits::{
    CoordTrait, GeometryCollectionTrait, GeometryTrait, GeometryType, LineStringTrait,
    MultiLineStringTrait, MultiPointTrait, MultiPolygonTrait, PointTrait, PolygonTrait,
};
use wkt::Wkt;

use crate::error::{Result, WktPlotError};

/// Kind tag of a geometry value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Point,
    LineString,
    /// A closed line string (first == last, at least four pairs).
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
    Line,
    Rect,
    Triangle,
}

impl ShapeKind {
    /// Classify `geom` by kind.
    pub fn of<G: GeometryTrait<T = f64>>(geom: &G) -> Self {
        match geom.as_type() {
            GeometryType::Point(_) => ShapeKind::Point,
            GeometryType::LineString(ls) => {
                if is_closed_ring(ls) {
                    ShapeKind::LinearRing
                } else {
                    ShapeKind::LineString
                }
            }
            GeometryType::Polygon(_) => ShapeKind::Polygon,
            GeometryType::MultiPoint(_) => ShapeKind::MultiPoint,
            GeometryType::MultiLineString(_) => ShapeKind::MultiLineString,
            GeometryType::MultiPolygon(_) => ShapeKind::MultiPolygon,
            GeometryType::GeometryCollection(_) => ShapeKind::GeometryCollection,
            GeometryType::Line(_) => ShapeKind::Line,
            GeometryType::Rect(_) => ShapeKind::Rect,
            GeometryType::Triangle(_) => ShapeKind::Triangle,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Point => "Point",
            ShapeKind::LineString => "LineString",
            ShapeKind::LinearRing => "LinearRing",
            ShapeKind::Polygon => "Polygon",
            ShapeKind::MultiPoint => "MultiPoint",
            ShapeKind::MultiLineString => "MultiLineString",
            ShapeKind::MultiPolygon => "MultiPolygon",
            ShapeKind::GeometryCollection => "GeometryCollection",
            ShapeKind::Line => "Line",
            ShapeKind::Rect => "Rect",
            ShapeKind::Triangle => "Triangle",
        }
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, ShapeKind::Line | ShapeKind::Rect | ShapeKind::Triangle)
    }

    /// Multi-part and collection kinds; the mapper recurses into their members.
    pub fn is_multi_part(self) -> bool {
        matches!(
            self,
            ShapeKind::MultiPoint
                | ShapeKind::MultiLineString
                | ShapeKind::MultiPolygon
                | ShapeKind::GeometryCollection
        )
    }

    /// `Ok(())` for supported kinds, `UnsupportedType` naming the kind otherwise.
    pub fn ensure_supported(self) -> Result<()> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(WktPlotError::UnsupportedType { kind: self.name() })
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse WKT text into a geometry value.
pub fn parse_wkt(text: &str) -> Result<Wkt<f64>> {
    Wkt::from_str(text.trim()).map_err(|e| WktPlotError::Parse(e.to_string()))
}

/// True when `geom` carries no coordinates at its top level.
///
/// Multi-part values with only empty members report non-empty here; the
/// mapper short-circuits each empty member on its own.
pub fn is_empty<G: GeometryTrait<T = f64>>(geom: &G) -> bool {
    match geom.as_type() {
        GeometryType::Point(pt) => PointTrait::coord(pt).is_none(),
        GeometryType::LineString(ls) => ls.num_coords() == 0,
        GeometryType::Polygon(pl) => pl.exterior().is_none() && pl.num_interiors() == 0,
        GeometryType::MultiPoint(mp) => mp.num_points() == 0,
        GeometryType::MultiLineString(mls) => mls.num_line_strings() == 0,
        GeometryType::MultiPolygon(mpl) => mpl.num_polygons() == 0,
        GeometryType::GeometryCollection(gc) => gc.num_geometries() == 0,
        GeometryType::Line(_) | GeometryType::Rect(_) | GeometryType::Triangle(_) => false,
    }
}

/// Walk the whole tree and reject the first unsupported kind.
///
/// Run before any draw call so a failing value leaves the renderer untouched.
pub fn ensure_supported<G: GeometryTrait<T = f64>>(geom: &G) -> Result<()> {
    ShapeKind::of(geom).ensure_supported()?;
    match geom.as_type() {
        GeometryType::MultiPoint(mp) => {
            for pt in mp.points() {
                ensure_supported(&pt)?;
            }
        }
        GeometryType::MultiLineString(mls) => {
            for ls in mls.line_strings() {
                ensure_supported(&ls)?;
            }
        }
        GeometryType::MultiPolygon(mpl) => {
            for pl in mpl.polygons() {
                ensure_supported(&pl)?;
            }
        }
        GeometryType::GeometryCollection(gc) => {
            for g in gc.geometries() {
                ensure_supported(&g)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn is_closed_ring<L: LineStringTrait<T = f64>>(ls: &L) -> bool {
    if ls.num_coords() < 4 {
        return false;
    }
    let first = ls.coords().next();
    let last = ls.coords().last();
    match (first, last) {
        (Some(a), Some(b)) => a.x() == b.x() && a.y() == b.y(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(text: &str) -> ShapeKind {
        ShapeKind::of(&parse_wkt(text).unwrap())
    }

    #[test]
    fn classifies_wkt_kinds() {
        assert_eq!(kind("POINT (30 10)"), ShapeKind::Point);
        assert_eq!(kind("LINESTRING (30 10, 10 30, 40 40)"), ShapeKind::LineString);
        assert_eq!(
            kind("LINESTRING (0 0, 1 0, 1 1, 0 0)"),
            ShapeKind::LinearRing
        );
        // closed but too short to be a ring
        assert_eq!(kind("LINESTRING (0 0, 1 1, 0 0)"), ShapeKind::LineString);
        assert_eq!(
            kind("POLYGON ((30 10, 40 40, 20 40, 10 20, 30 10))"),
            ShapeKind::Polygon
        );
        assert_eq!(kind("MULTIPOINT ((10 40), (40 30))"), ShapeKind::MultiPoint);
        assert_eq!(
            kind("MULTILINESTRING ((10 10, 20 20), (40 40, 30 30))"),
            ShapeKind::MultiLineString
        );
        assert_eq!(
            kind("MULTIPOLYGON (((30 20, 45 40, 10 40, 30 20)))"),
            ShapeKind::MultiPolygon
        );
        assert_eq!(
            kind("GEOMETRYCOLLECTION (POINT (40 10))"),
            ShapeKind::GeometryCollection
        );
    }

    #[test]
    fn kind_flags() {
        assert!(ShapeKind::LinearRing.is_supported());
        assert!(!ShapeKind::Rect.is_supported());
        assert!(ShapeKind::GeometryCollection.is_multi_part());
        assert!(!ShapeKind::Polygon.is_multi_part());
        assert!(matches!(
            ShapeKind::Triangle.ensure_supported(),
            Err(WktPlotError::UnsupportedType { kind: "Triangle" })
        ));
        assert_eq!(ShapeKind::MultiPolygon.to_string(), "MultiPolygon");
    }

    #[test]
    fn empty_values() {
        for text in [
            "POINT EMPTY",
            "LINESTRING EMPTY",
            "POLYGON EMPTY",
            "MULTIPOINT EMPTY",
            "MULTILINESTRING EMPTY",
            "MULTIPOLYGON EMPTY",
            "GEOMETRYCOLLECTION EMPTY",
        ] {
            assert!(is_empty(&parse_wkt(text).unwrap()), "{text}");
        }
        assert!(!is_empty(&parse_wkt("POINT (1 2)").unwrap()));
        assert!(!is_empty(
            &parse_wkt("GEOMETRYCOLLECTION (POINT EMPTY)").unwrap()
        ));
    }

    #[test]
    fn parse_errors_are_reported() {
        for text in ["", "POINT (30)", "CIRCLE (1 2 3)", "POLYGON ((1 2, 3 4"] {
            assert!(
                matches!(parse_wkt(text), Err(WktPlotError::Parse(_))),
                "{text}"
            );
        }
    }

    #[test]
    fn supported_tree_passes_gate() {
        let geom = parse_wkt(
            "GEOMETRYCOLLECTION (POINT (40 10), GEOMETRYCOLLECTION (LINESTRING (10 10, 20 20)))",
        )
        .unwrap();
        assert!(ensure_supported(&geom).is_ok());
    }

    #[test]
    fn geo_types_rect_fails_gate() {
        let rect = geo_types::Geometry::Rect(geo_types::Rect::new(
            geo_types::coord! { x: 0.0, y: 0.0 },
            geo_types::coord! { x: 1.0, y: 1.0 },
        ));
        assert_eq!(ShapeKind::of(&rect), ShapeKind::Rect);
        assert!(matches!(
            ensure_supported(&rect),
            Err(WktPlotError::UnsupportedType { kind: "Rect" })
        ));
    }
}
