//! In-memory figure that records draw calls as glyphs.
//!
//! `Figure` is the crate's own `Renderer`: every primitive call becomes one
//! `Glyph`, kept in paint order. `html::render` turns the result into a page.

use serde::Serialize;

use crate::mapper::{PolygonRings, Renderer};
use crate::projection::TileProvider;
use crate::style::Style;

/// Axis scale of a figure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisKind {
    #[default]
    Linear,
    /// Axes carry Web Mercator meters.
    Mercator,
}

/// Figure configuration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FigureCfg {
    pub title: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub axis: AxisKind,
    /// Background tiles; only drawn on Mercator axes.
    pub tiles: Option<TileProvider>,
    pub width: u32,
    pub height: u32,
}

impl Default for FigureCfg {
    fn default() -> Self {
        Self {
            title: String::new(),
            x_axis_label: "Longitude".to_string(),
            y_axis_label: "Latitude".to_string(),
            axis: AxisKind::Linear,
            tiles: None,
            width: 800,
            height: 600,
        }
    }
}

impl FigureCfg {
    /// Mercator axes over the OpenStreetMap tile layer.
    pub fn open_street_map(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            axis: AxisKind::Mercator,
            tiles: Some(TileProvider::OpenStreetMap),
            ..Default::default()
        }
    }
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "glyph", rename_all = "snake_case")]
pub enum Glyph {
    Circle {
        x: Vec<f64>,
        y: Vec<f64>,
        style: Style,
    },
    Line {
        x: Vec<f64>,
        y: Vec<f64>,
        style: Style,
    },
    MultiLine {
        xs: Vec<Vec<f64>>,
        ys: Vec<Vec<f64>>,
        style: Style,
    },
    MultiPolygons {
        polygons: Vec<PolygonRings>,
        style: Style,
    },
}

impl Glyph {
    pub fn style(&self) -> &Style {
        match self {
            Glyph::Circle { style, .. }
            | Glyph::Line { style, .. }
            | Glyph::MultiLine { style, .. }
            | Glyph::MultiPolygons { style, .. } => style,
        }
    }

    /// All `(x, y)` pairs drawn by this glyph.
    pub fn coords(&self) -> Box<dyn Iterator<Item = (f64, f64)> + '_> {
        match self {
            Glyph::Circle { x, y, .. } | Glyph::Line { x, y, .. } => {
                Box::new(x.iter().copied().zip(y.iter().copied()))
            }
            Glyph::MultiLine { xs, ys, .. } => Box::new(
                xs.iter()
                    .zip(ys)
                    .flat_map(|(x, y)| x.iter().copied().zip(y.iter().copied())),
            ),
            Glyph::MultiPolygons { polygons, .. } => {
                Box::new(polygons.iter().flat_map(|p| p.coords()))
            }
        }
    }
}

/// Axis-aligned extent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }

    /// Grow by `frac` of each side length; zero-length sides grow by `min_pad`.
    pub fn padded(&self, frac: f64, min_pad: f64) -> Bounds {
        let px = (self.width() * frac).max(min_pad);
        let py = (self.height() * frac).max(min_pad);
        Bounds {
            min_x: self.min_x - px,
            min_y: self.min_y - py,
            max_x: self.max_x + px,
            max_y: self.max_y + py,
        }
    }

    /// Extent of the finite pairs in `coords`; `None` if there are none.
    pub fn of(coords: impl IntoIterator<Item = (f64, f64)>) -> Option<Bounds> {
        coords
            .into_iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .fold(None, |acc: Option<Bounds>, (x, y)| {
                Some(match acc {
                    None => Bounds {
                        min_x: x,
                        min_y: y,
                        max_x: x,
                        max_y: y,
                    },
                    Some(b) => Bounds {
                        min_x: b.min_x.min(x),
                        min_y: b.min_y.min(y),
                        max_x: b.max_x.max(x),
                        max_y: b.max_y.max(y),
                    },
                })
            })
    }
}

/// Recording renderer.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Figure {
    cfg: FigureCfg,
    glyphs: Vec<Glyph>,
}

impl Figure {
    pub fn new(cfg: FigureCfg) -> Self {
        Self {
            cfg,
            glyphs: Vec::new(),
        }
    }

    pub fn cfg(&self) -> &FigureCfg {
        &self.cfg
    }

    pub fn title(&self) -> &str {
        &self.cfg.title
    }

    /// Glyphs in paint order.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn clear(&mut self) {
        self.glyphs.clear();
    }

    /// Data extent over every glyph, ignoring non-finite coordinates.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(self.glyphs.iter().flat_map(|g| g.coords()))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Renderer for Figure {
    fn circle(&mut self, x: &[f64], y: &[f64], style: &Style) {
        self.glyphs.push(Glyph::Circle {
            x: x.to_vec(),
            y: y.to_vec(),
            style: style.clone(),
        });
    }

    fn line(&mut self, x: &[f64], y: &[f64], style: &Style) {
        self.glyphs.push(Glyph::Line {
            x: x.to_vec(),
            y: y.to_vec(),
            style: style.clone(),
        });
    }

    fn multi_line(&mut self, xs: &[Vec<f64>], ys: &[Vec<f64>], style: &Style) {
        self.glyphs.push(Glyph::MultiLine {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            style: style.clone(),
        });
    }

    fn multi_polygons(&mut self, polygons: &[PolygonRings], style: &Style) {
        self.glyphs.push(Glyph::MultiPolygons {
            polygons: polygons.to_vec(),
            style: style.clone(),
        });
    }
}
