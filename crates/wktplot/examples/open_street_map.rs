//! Plot a few London landmarks over OpenStreetMap tiles.
//!
//! Shapes are written as `(lat lng)` pairs; the Mercator mapper projects them
//! to Web Mercator meters before they reach the figure.
//!
//! Usage
//!   cargo run -p wktplot --example open_street_map -- [OUT_DIR]

use std::path::PathBuf;

use wktplot::prelude::*;

fn main() {
    let save_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let mut plot = WktPlot::new(PlotCfg {
        title: Some("Open Street Map Plot".into()),
        save_dir: Some(save_dir),
        map: MapKind::OpenStreetMap,
        merge_multi_parts: true,
        ..Default::default()
    })
    .expect("save dir exists");

    plot.add_shape(
        "MULTIPOINT ((51.5007 -0.1246), (51.5081 -0.0759), (51.5033 -0.1195))",
        &Style::new().with("color", "firebrick").with("size", 10),
    )
    .expect("valid WKT");
    plot.add_shape(
        "LINESTRING (51.5007 -0.1246, 51.5033 -0.1195, 51.5081 -0.0759)",
        &Style::new().with("line_color", "MidnightBlue").with("line_width", 4),
    )
    .expect("valid WKT");
    plot.add_shape(
        "POLYGON ((51.5073 -0.1657, 51.5113 -0.1759, 51.5045 -0.1870, 51.5027 -0.1527, 51.5073 -0.1657))",
        &Style::new()
            .with("fill_color", "green")
            .with("fill_alpha", 0.4),
    )
    .expect("valid WKT");

    let path = plot.save().expect("write html");
    println!("{}", path.display());
}
