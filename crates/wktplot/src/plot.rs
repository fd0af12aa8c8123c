//! `WktPlot`: a titled figure plus a mapper plus an optional output file.
//!
//! Purpose
//! - Bundle the choices a caller usually makes once per plot: the title, where
//!   the HTML goes, and whether shapes land on a plain or an OpenStreetMap
//!   figure.
//!
//! Rules
//! - A missing or empty title is replaced by a random 6-character
//!   alphanumeric one; the output file is `<save_dir>/<sanitize_text(title)>.html`.
//! - `MapKind::OpenStreetMap` uses Mercator axes with the OSM tile layer and
//!   projects shapes to Web Mercator unless `disable_mercator` is set.
//!
//! Code cross-refs: `Mapper`, `Figure`, `html::render`, `text::sanitize_text`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::{Result, WktPlotError};
use crate::figure::{Figure, FigureCfg};
use crate::html;
use crate::mapper::{Mapper, MapperCfg};
use crate::projection::Projection;
use crate::style::Style;
use crate::text::{random_string, sanitize_text, RANDOM_TITLE_LEN};

/// Figure flavour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MapKind {
    #[default]
    Standard,
    OpenStreetMap,
}

/// Plot configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PlotCfg {
    /// Figure title and output file stem; random when `None` or empty.
    pub title: Option<String>,
    /// Existing directory for the HTML output. `None` disables `save`.
    pub save_dir: Option<PathBuf>,
    pub map: MapKind,
    /// Keep coordinates as given on an OpenStreetMap figure.
    pub disable_mercator: bool,
    pub merge_multi_parts: bool,
}

impl PlotCfg {
    /// Mapper configuration implied by this plot.
    pub fn mapper_cfg(&self) -> MapperCfg {
        let projection = match self.map {
            MapKind::OpenStreetMap if !self.disable_mercator => Projection::WebMercator,
            _ => Projection::Identity,
        };
        MapperCfg {
            projection,
            merge_multi_parts: self.merge_multi_parts,
        }
    }
}

#[derive(Clone, Debug)]
pub struct WktPlot {
    figure: Figure,
    mapper: Mapper,
    output: Option<PathBuf>,
}

impl WktPlot {
    /// Validate `cfg` and create an empty figure.
    ///
    /// Errors: `SaveDir` if `save_dir` is set but is not a directory.
    pub fn new(cfg: PlotCfg) -> Result<Self> {
        let output = match &cfg.save_dir {
            Some(dir) if !dir.is_dir() => return Err(WktPlotError::SaveDir(dir.clone())),
            Some(dir) => Some(dir.as_path()),
            None => None,
        };
        let title = match cfg.title.as_deref() {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => {
                let t = random_string(RANDOM_TITLE_LEN, &mut rand::thread_rng());
                info!(title = %t, "given title is empty, using a random one");
                t
            }
        };
        let output = output.map(|dir| output_file(dir, &title));
        let figure_cfg = match cfg.map {
            MapKind::Standard => FigureCfg {
                title,
                ..Default::default()
            },
            MapKind::OpenStreetMap => FigureCfg::open_street_map(title),
        };
        Ok(Self {
            figure: Figure::new(figure_cfg),
            mapper: Mapper::new(cfg.mapper_cfg()),
            output,
        })
    }

    /// Parse and draw one WKT string.
    pub fn add_shape(&mut self, wkt: &str, style: &Style) -> Result<()> {
        self.mapper.add_shape(&mut self.figure, wkt, style)
    }

    /// Draw an in-memory geometry.
    pub fn add_geometry<G: geo_traits::GeometryTrait<T = f64>>(
        &mut self,
        geom: &G,
        style: &Style,
    ) -> Result<()> {
        self.mapper.add_geometry(&mut self.figure, geom, style)
    }

    pub fn title(&self) -> &str {
        self.figure.title()
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn mapper(&self) -> Mapper {
        self.mapper
    }

    /// Target file, if a save dir was given.
    pub fn output_path(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    pub fn to_html(&self) -> String {
        html::render(&self.figure)
    }

    /// Write the page to `output_path()` and return that path.
    pub fn save(&self) -> Result<PathBuf> {
        let path = self.output.clone().ok_or(WktPlotError::NoOutput)?;
        fs::write(&path, self.to_html())?;
        info!(path = %path.display(), glyphs = self.figure.glyphs().len(), "saved plot");
        Ok(path)
    }
}

fn output_file(dir: &Path, title: &str) -> PathBuf {
    dir.join(format!("{}.html", sanitize_text(title)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{AxisKind, Glyph};
    use crate::projection::TileProvider;

    fn cfg_in(dir: &Path, title: &str) -> PlotCfg {
        PlotCfg {
            title: Some(title.to_string()),
            save_dir: Some(dir.to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn saves_to_sanitized_filename() {
        let dir = tempfile::tempdir().unwrap();
        let mut plot = WktPlot::new(cfg_in(dir.path(), "Test 123 ABC")).unwrap();
        assert_eq!(plot.title(), "Test 123 ABC");
        plot.add_shape("POINT (30 10)", &Style::new().with("color", "red"))
            .unwrap();
        let path = plot.save().unwrap();
        assert_eq!(path, dir.path().join("test_123_abc.html"));
        let page = std::fs::read_to_string(&path).unwrap();
        assert!(page.contains("<circle "));
        assert!(page.contains("<title>"));
        assert!(page.contains("Test 123 ABC"));
    }

    #[test]
    fn empty_title_gets_random_one() {
        let dir = tempfile::tempdir().unwrap();
        let plot = WktPlot::new(cfg_in(dir.path(), "")).unwrap();
        let title = plot.title().to_string();
        assert_eq!(title.len(), RANDOM_TITLE_LEN);
        assert!(title.chars().all(|c| c.is_ascii_alphanumeric()));
        let expected = dir
            .path()
            .join(format!("{}.html", title.to_ascii_lowercase()));
        assert_eq!(plot.output_path(), Some(expected.as_path()));

        let untitled = WktPlot::new(PlotCfg::default()).unwrap();
        assert_eq!(untitled.title().len(), RANDOM_TITLE_LEN);
    }

    #[test]
    fn rejects_non_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not_a_directory");
        std::fs::write(&file, "").unwrap();
        let err = WktPlot::new(cfg_in(&file, "x")).unwrap_err();
        assert!(matches!(err, WktPlotError::SaveDir(p) if p == file));

        let missing = dir.path().join("missing");
        assert!(WktPlot::new(cfg_in(&missing, "x")).is_err());
    }

    #[test]
    fn save_without_dir() {
        let plot = WktPlot::new(PlotCfg {
            title: Some("memory only".into()),
            ..Default::default()
        })
        .unwrap();
        assert!(plot.output_path().is_none());
        assert!(matches!(plot.save(), Err(WktPlotError::NoOutput)));
        assert!(plot.to_html().contains("memory only"));
    }

    #[test]
    fn open_street_map_projects_unless_disabled() {
        let mut cfg = PlotCfg {
            title: Some("Open Street Map Plot".into()),
            map: MapKind::OpenStreetMap,
            ..Default::default()
        };
        let mut plot = WktPlot::new(cfg.clone()).unwrap();
        assert_eq!(plot.figure().cfg().axis, AxisKind::Mercator);
        assert_eq!(plot.figure().cfg().tiles, Some(TileProvider::OpenStreetMap));
        assert_eq!(plot.mapper(), Mapper::mercator());
        plot.add_shape("POINT (30 10)", &Style::new()).unwrap();
        let Glyph::Circle { x, .. } = &plot.figure().glyphs()[0] else {
            panic!("expected circle");
        };
        assert!((x[0] - 1113194.90793).abs() < 1e-4);

        cfg.disable_mercator = true;
        let mut plot = WktPlot::new(cfg).unwrap();
        assert_eq!(plot.mapper(), Mapper::standard());
        plot.add_shape("POINT (30 10)", &Style::new()).unwrap();
        let Glyph::Circle { x, .. } = &plot.figure().glyphs()[0] else {
            panic!("expected circle");
        };
        assert_eq!(x[0], 30.0);
    }

    #[test]
    fn standard_map_ignores_disable_mercator() {
        let plot = WktPlot::new(PlotCfg {
            disable_mercator: true,
            merge_multi_parts: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(plot.figure().cfg().axis, AxisKind::Linear);
        assert_eq!(plot.figure().cfg().x_axis_label, "Longitude");
        assert_eq!(plot.mapper().projection(), Projection::Identity);
        assert!(plot.mapper().cfg().merge_multi_parts);
    }

    #[test]
    fn geometry_input_and_errors() {
        let mut plot = WktPlot::new(PlotCfg::default()).unwrap();
        let line = geo_types::Geometry::LineString(geo_types::LineString::from(vec![
            (0.0, 0.0),
            (1.0, 1.0),
        ]));
        plot.add_geometry(&line, &Style::new()).unwrap();
        assert!(matches!(
            plot.add_shape("NOT WKT", &Style::new()),
            Err(WktPlotError::Parse(_))
        ));
        assert_eq!(plot.figure().glyphs().len(), 1);
    }
}
