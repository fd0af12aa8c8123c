//! Plot WKT strings and in-memory geometries onto 2D figures.
//!
//! Layout
//! - `geometry`: kind classification, emptiness and WKT parsing on top of
//!   `geo_traits` (any `GeometryTrait<T = f64>` is a valid input).
//! - `mapper`: the `Renderer` seam and the `Mapper` that turns one geometry
//!   into primitive draw calls (points, lines, polygons with holes).
//! - `projection`: spherical Web Mercator and slippy-map tile coverage.
//! - `figure`, `html`: an in-memory recording renderer and its HTML/SVG output.
//! - `plot`: `WktPlot`, the title/save-dir convenience wrapper.
//!
//! Conventions
//! - Coordinates travel as parallel `x`/`y` arrays in path order.
//! - Polygon rings are handed to renderers open (closing point dropped).

pub mod error;
pub mod figure;
pub mod geometry;
pub mod html;
pub mod mapper;
pub mod plot;
pub mod projection;
pub mod style;
pub mod text;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{Result, WktPlotError};
pub use figure::{AxisKind, Bounds, Figure, FigureCfg, Glyph};
pub use geometry::{parse_wkt, ShapeKind};
pub use mapper::{Mapper, MapperCfg, PolygonRings, Renderer};
pub use plot::{MapKind, PlotCfg, WktPlot};
pub use projection::{geographic_to_mercator, Projection, TileProvider};
pub use style::{Rgba, Style, StyleValue};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::figure::{Figure, FigureCfg};
    pub use crate::mapper::{Mapper, MapperCfg, Renderer};
    pub use crate::plot::{MapKind, PlotCfg, WktPlot};
    pub use crate::projection::Projection;
    pub use crate::style::{Rgba, Style, StyleValue};
}
