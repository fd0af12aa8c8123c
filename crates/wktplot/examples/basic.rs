//! Plot a handful of WKT shapes on plain Longitude/Latitude axes.
//!
//! Usage
//!   cargo run -p wktplot --example basic -- [OUT_DIR]
//! Writes `<OUT_DIR>/my_basic_plot.html` (OUT_DIR defaults to the current dir).

use std::path::PathBuf;

use wktplot::prelude::*;

fn main() {
    let save_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let mut plot = WktPlot::new(PlotCfg {
        title: Some("My Basic Plot".into()),
        save_dir: Some(save_dir),
        ..Default::default()
    })
    .expect("save dir exists");

    let shapes = [
        ("POINT (30 10)", Style::new().with("color", "firebrick").with("size", 8)),
        (
            "LINESTRING (30 10, 10 30, 40 40)",
            Style::new().with("color", "MidnightBlue").with("line_width", 3.0),
        ),
        (
            "POLYGON ((35 10, 45 45, 15 40, 10 20, 35 10), (20 30, 35 35, 30 20, 20 30))",
            Style::new()
                .with("fill_color", (50u8, 205u8, 50u8, 0.25))
                .with("line_color", "green"),
        ),
        (
            "GEOMETRYCOLLECTION (POINT (40 10), LINESTRING (10 10, 20 20, 10 40), POLYGON ((40 40, 20 45, 45 30, 40 40)))",
            Style::new().with("color", "orange").with("alpha", 0.6),
        ),
    ];
    for (wkt, style) in &shapes {
        plot.add_shape(wkt, style).expect("valid WKT");
    }
    let path = plot.save().expect("write html");
    println!("{}", path.display());
}
