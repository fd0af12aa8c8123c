use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;
use wktplot::{MapKind, PlotCfg, Style, StyleValue, WktPlot};

mod provenance;

#[derive(Parser)]
#[command(name = "wktplot")]
#[command(about = "Plot WKT shapes to standalone HTML pages", version = wktplot::VERSION)]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Plot one WKT shape per input line into `<out-dir>/<title>.html`
    Render {
        /// WKT file, or `-` for stdin. Blank lines and `#` comments are skipped.
        #[arg(long)]
        input: String,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Figure title and file stem; random if unset
        #[arg(long)]
        title: Option<String>,
        /// Draw over OpenStreetMap tiles on Mercator axes
        #[arg(long)]
        osm: bool,
        /// Keep coordinates unprojected on an OSM figure
        #[arg(long, requires = "osm")]
        disable_mercator: bool,
        /// One draw call per multi-part shape instead of one per member
        #[arg(long)]
        merge_multi_parts: bool,
        /// Style attribute applied to every shape, e.g. `--style color=MidnightBlue`
        #[arg(long = "style", value_parser = parse_key_val)]
        style: Vec<(String, String)>,
    },
    /// Print the Web Mercator projection of one geographic coordinate
    Project {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Render {
            input,
            out_dir,
            title,
            osm,
            disable_mercator,
            merge_multi_parts,
            style,
        } => {
            let cfg = PlotCfg {
                title,
                save_dir: Some(out_dir),
                map: if osm {
                    MapKind::OpenStreetMap
                } else {
                    MapKind::Standard
                },
                disable_mercator,
                merge_multi_parts,
            };
            render(&input, cfg, style)
        }
        Action::Project { lat, lng } => project(lat, lng),
        Action::Report => report(),
    }
}

fn render(input: &str, cfg: PlotCfg, style: Vec<(String, String)>) -> Result<()> {
    tracing::info!(input, map = ?cfg.map, "render");
    let text = read_input(input)?;
    let style: Style = style
        .into_iter()
        .map(|(k, v)| (k, StyleValue::parse_loose(&v)))
        .collect();

    if let Some(dir) = &cfg.save_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating output dir {}", dir.display()))?;
    }
    let params = serde_json::to_value(&cfg)?;
    let mut plot = WktPlot::new(cfg)?;
    let mut shapes = 0usize;
    for (lineno, wkt) in shape_lines(&text) {
        plot.add_shape(wkt, &style)
            .with_context(|| format!("{input}:{lineno}"))?;
        shapes += 1;
    }
    if shapes == 0 {
        bail!("no shapes found in {input}");
    }

    let page = plot.save()?;
    let payload = provenance::Payload::new(serde_json::json!({
        "plot": params,
        "style": style,
        "shapes": shapes,
        "glyphs": plot.figure().glyphs().len(),
    }))
    .with_input(input);
    let sidecar = provenance::write_sidecar(&page, payload)?;
    tracing::info!(page = %page.display(), sidecar = %sidecar.display(), shapes, "wrote plot");
    println!("{}", page.display());
    Ok(())
}

fn project(lat: f64, lng: f64) -> Result<()> {
    let (x, y) = wktplot::geographic_to_mercator(lat, lng);
    let obj = serde_json::json!({ "lat": lat, "lng": lng, "x": x, "y": y });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "tool": "wktplot",
        "version": wktplot::VERSION,
        "code_rev": provenance::current_git_rev(),
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(input).with_context(|| format!("reading {input}"))
}

/// Non-blank, non-comment lines with their 1-based line numbers.
fn shape_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.trim().to_string())),
        _ => Err(format!("expected key=value, got `{raw}`")),
    }
}
