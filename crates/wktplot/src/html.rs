//! Standalone HTML output for a recorded `Figure`.
//!
//! Layout
//! - One inline SVG sized `FigureCfg::width` x `FigureCfg::height`: title on
//!   top, axis labels on the bottom and left edges, the plot area in between.
//! - Data coordinates map to pixels with one uniform scale (y grows upwards),
//!   centered in the plot area, over the padded data extent.
//! - Mercator figures with a tile provider draw raster tiles first, then the
//!   glyphs in paint order, then the provider attribution.
//!
//! Style keys
//! - `color` is the fallback for `fill_color` and `line_color`; `alpha` for
//!   `fill_alpha` and `line_alpha`. `line_width` is in pixels, `size` is the
//!   marker diameter in pixels.
//! - Any other key is kept as a `data-*` attribute on the glyph's group.
//! - Non-finite coordinates are skipped.

use svg::node::element::{self, path::Data, Group};
use svg::Document;

use crate::figure::{AxisKind, Bounds, Figure, Glyph};
use crate::mapper::PolygonRings;
use crate::projection::{tiles_covering, TileProvider, MERCATOR_HALF_WORLD};
use crate::style::{Style, StyleValue};

/// Upper bound on background tiles per page.
pub const MAX_TILES: usize = 64;

const MARGIN: f64 = 40.0;
const PAD_FRAC: f64 = 0.05;
const DEFAULT_COLOR: &str = "#1f77b4";
const DEFAULT_SIZE: f64 = 4.0;
const DEFAULT_LINE_WIDTH: f64 = 1.0;

const KNOWN_KEYS: [&str; 8] = [
    "color",
    "alpha",
    "fill_color",
    "line_color",
    "fill_alpha",
    "line_alpha",
    "line_width",
    "size",
];

/// Render `fig` as a self-contained HTML page.
pub fn render(fig: &Figure) -> String {
    let title = element::Title::new(fig.title());
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n{title}\n</head>\n<body>\n{}\n</body>\n</html>\n",
        make_svg(fig)
    )
}

/// The figure as one SVG document.
pub fn make_svg(fig: &Figure) -> Document {
    let cfg = fig.cfg();
    let (w, h) = (f64::from(cfg.width), f64::from(cfg.height));
    let vp = Viewport::new(fig, w, h);

    let clip = element::ClipPath::new().set("id", "plot-area").add(
        element::Rectangle::new()
            .set("x", MARGIN)
            .set("y", MARGIN)
            .set("width", w - 2.0 * MARGIN)
            .set("height", h - 2.0 * MARGIN),
    );

    let tiles = match (cfg.axis, cfg.tiles) {
        (AxisKind::Mercator, Some(provider)) => Some(provider),
        _ => None,
    };
    let mut plot_area = Group::new().set("clip-path", "url(#plot-area)");
    if let Some(provider) = tiles {
        plot_area = plot_area.add(tile_layer(&vp, provider));
    }
    for glyph in fig.glyphs() {
        plot_area = plot_area.add(make_glyph(&vp, glyph));
    }

    let mut doc = Document::new()
        .set("width", cfg.width)
        .set("height", cfg.height)
        .set("viewBox", (0.0, 0.0, w, h))
        .add(element::Definitions::new().add(clip))
        .add(label("title", &cfg.title, MARGIN, MARGIN * 0.6, 14).set("text-anchor", "start"))
        .add(plot_area)
        .add(label("x-label", &cfg.x_axis_label, w / 2.0, h - MARGIN * 0.3, 12))
        .add(
            label("y-label", &cfg.y_axis_label, 0.0, 0.0, 12).set(
                "transform",
                format!("translate({} {}) rotate(-90)", MARGIN * 0.5, h / 2.0),
            ),
        );
    if let Some(provider) = tiles {
        doc = doc.add(
            label(
                "attribution",
                provider.attribution(),
                w - MARGIN,
                h - MARGIN - 4.0,
                10,
            )
            .set("text-anchor", "end"),
        );
    }
    doc
}

fn label(class: &str, text: &str, x: f64, y: f64, font_size: u32) -> element::Text {
    element::Text::new(text)
        .set("class", class)
        .set("x", x)
        .set("y", y)
        .set("text-anchor", "middle")
        .set("font-family", "sans-serif")
        .set("font-size", font_size)
}

fn tile_layer(vp: &Viewport, provider: TileProvider) -> Group {
    let mut layer = Group::new().set("class", "tiles");
    for tile in tiles_covering(&vp.view, MAX_TILES) {
        let (x, y) = vp.px(tile.extent.min_x, tile.extent.max_y);
        let side = tile.extent.width() * vp.scale;
        layer = layer.add(
            element::Image::new()
                .set("href", provider.tile_url(&tile))
                .set("x", x)
                .set("y", y)
                .set("width", side)
                .set("height", side)
                .set("preserveAspectRatio", "none"),
        );
    }
    layer
}

/// Data-to-pixel transform.
struct Viewport {
    view: Bounds,
    scale: f64,
    left: f64,
    top: f64,
}

impl Viewport {
    fn new(fig: &Figure, w: f64, h: f64) -> Self {
        let mercator = fig.cfg().axis == AxisKind::Mercator;
        let min_pad = if mercator { 500.0 } else { 0.5 };
        let view = match fig.bounds() {
            Some(b) => b.padded(PAD_FRAC, min_pad),
            None if mercator => Bounds {
                min_x: -MERCATOR_HALF_WORLD,
                min_y: -MERCATOR_HALF_WORLD,
                max_x: MERCATOR_HALF_WORLD,
                max_y: MERCATOR_HALF_WORLD,
            },
            None => Bounds {
                min_x: -1.0,
                min_y: -1.0,
                max_x: 1.0,
                max_y: 1.0,
            },
        };
        let area_w = (w - 2.0 * MARGIN).max(1.0);
        let area_h = (h - 2.0 * MARGIN).max(1.0);
        let scale = (area_w / view.width()).min(area_h / view.height());
        Self {
            view,
            scale,
            left: MARGIN + (area_w - view.width() * scale) / 2.0,
            top: MARGIN + (area_h - view.height() * scale) / 2.0,
        }
    }

    #[inline]
    fn px(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.left + (x - self.view.min_x) * self.scale,
            self.top + (self.view.max_y - y) * self.scale,
        )
    }

    /// Pixel pairs of the finite data points in `x`/`y`.
    fn path<'a>(&'a self, x: &'a [f64], y: &'a [f64]) -> impl Iterator<Item = (f64, f64)> + 'a {
        x.iter()
            .zip(y)
            .filter(|(a, b)| a.is_finite() && b.is_finite())
            .map(move |(a, b)| self.px(*a, *b))
    }

    /// `points` attribute of a polyline.
    fn points(&self, x: &[f64], y: &[f64]) -> String {
        self.path(x, y)
            .map(|(a, b)| format!("{a:.3},{b:.3}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn make_glyph(vp: &Viewport, glyph: &Glyph) -> Group {
    match glyph {
        Glyph::Circle { x, y, style } => {
            let r = style_number(style, "size").unwrap_or(DEFAULT_SIZE) / 2.0;
            let mut g = with_fill(styled_group("circle", style), style);
            for (cx, cy) in vp.path(x, y) {
                g = g.add(
                    element::Circle::new()
                        .set("cx", cx)
                        .set("cy", cy)
                        .set("r", r),
                );
            }
            g
        }
        Glyph::Line { x, y, style } => with_stroke(styled_group("line", style), style)
            .set("fill", "none")
            .add(element::Polyline::new().set("points", vp.points(x, y))),
        Glyph::MultiLine { xs, ys, style } => {
            let mut g = with_stroke(styled_group("multi-line", style), style).set("fill", "none");
            for (x, y) in xs.iter().zip(ys) {
                g = g.add(element::Polyline::new().set("points", vp.points(x, y)));
            }
            g
        }
        Glyph::MultiPolygons { polygons, style } => {
            let mut g = with_stroke(with_fill(styled_group("multi-polygons", style), style), style)
                .set("fill-rule", "evenodd");
            for polygon in polygons {
                g = g.add(element::Path::new().set("d", polygon_data(vp, polygon)));
            }
            g
        }
    }
}

/// One closed subpath per ring; holes cut out by the even-odd rule.
fn polygon_data(vp: &Viewport, polygon: &PolygonRings) -> Data {
    let mut data = Data::new();
    for (x, y) in polygon.xs.iter().zip(&polygon.ys) {
        let mut ring = vp.path(x, y);
        let Some(p0) = ring.next() else {
            continue;
        };
        data = data.move_to(p0);
        for p in ring {
            data = data.line_to(p);
        }
        data = data.close();
    }
    data
}

/// Group tagged with `class` and carrying the unrecognized keys as `data-*`.
fn styled_group(class: &str, style: &Style) -> Group {
    style
        .iter()
        .filter(|(k, _)| !KNOWN_KEYS.iter().any(|known| known == k))
        .fold(Group::new().set("class", class), |g, (k, v)| {
            let name: String = k
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
                .collect();
            g.set(format!("data-{name}"), value_text(v))
        })
}

fn with_fill(g: Group, style: &Style) -> Group {
    let color = style_color(style, "fill_color").unwrap_or_else(|| DEFAULT_COLOR.to_string());
    let alpha = style_number(style, "fill_alpha")
        .or_else(|| style_number(style, "alpha"))
        .unwrap_or(1.0);
    g.set("fill", color).set("fill-opacity", alpha)
}

fn with_stroke(g: Group, style: &Style) -> Group {
    let color = style_color(style, "line_color").unwrap_or_else(|| DEFAULT_COLOR.to_string());
    let alpha = style_number(style, "line_alpha")
        .or_else(|| style_number(style, "alpha"))
        .unwrap_or(1.0);
    let width = style_number(style, "line_width").unwrap_or(DEFAULT_LINE_WIDTH);
    g.set("stroke", color)
        .set("stroke-opacity", alpha)
        .set("stroke-width", width)
}

/// `key`, falling back to `color`.
fn style_color(style: &Style, key: &str) -> Option<String> {
    style.get(key).or_else(|| style.get("color")).map(value_text)
}

fn style_number(style: &Style, key: &str) -> Option<f64> {
    style.get(key).and_then(StyleValue::as_number)
}

fn value_text(v: &StyleValue) -> String {
    match v {
        StyleValue::Number(n) => n.to_string(),
        StyleValue::Text(s) => s.clone(),
        StyleValue::Color(c) => format!("rgba({},{},{},{})", c.r, c.g, c.b, c.a),
        StyleValue::Bool(b) => b.to_string(),
    }
}
