use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use midrib_geometry::Spacing;
use midrib_pipeline::{compute_centerlines, CancelToken, CenterlineOptions, FailurePolicy};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod geojson;

/// Extract one centerline per polygon, for label placement.
#[derive(Parser)]
#[command(name = "midrib", version, about, long_about = None)]
struct Cli {
    /// Input GeoJSON file (FeatureCollection of polygons)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output GeoJSON file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Simplify and smooth the centerlines
    #[arg(long)]
    smooth: bool,

    /// Boundary sampling spacing in map units
    #[arg(long, value_name = "UNITS", conflicts_with = "spacing_fraction")]
    spacing: Option<f64>,

    /// Boundary sampling spacing as a fraction of each polygon's perimeter
    #[arg(long, value_name = "FRACTION")]
    spacing_fraction: Option<f64>,

    /// Douglas-Peucker tolerance used before smoothing
    #[arg(long, value_name = "UNITS", default_value_t = 5.0)]
    simplify_tolerance: f64,

    /// Chaikin smoothing iterations
    #[arg(long, value_name = "N", default_value_t = 10)]
    smooth_iterations: usize,

    /// Coordinate coincidence tolerance in map units
    #[arg(long, value_name = "UNITS", default_value_t = 1e-6)]
    snap_tolerance: f64,

    /// Skip features that fail instead of aborting
    #[arg(long)]
    skip_failures: bool,
}

impl Cli {
    fn options(&self) -> CenterlineOptions {
        let spacing = match (self.spacing, self.spacing_fraction) {
            (Some(units), _) => Spacing::Absolute(units),
            (None, Some(fraction)) => Spacing::Relative(fraction),
            (None, None) => Spacing::default(),
        };
        CenterlineOptions {
            spacing,
            smooth: self.smooth,
            simplify_tolerance: self.simplify_tolerance,
            smooth_iterations: self.smooth_iterations,
            snap_tolerance: self.snap_tolerance,
            failure_policy: if self.skip_failures {
                FailurePolicy::Skip
            } else {
                FailurePolicy::Abort
            },
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read input file: {:?}", cli.input))?;
    let layer = geojson::read_layer(&text)
        .with_context(|| format!("Failed to parse GeoJSON: {:?}", cli.input))?;

    info!(features = layer.len(), input = %cli.input.display(), "layer loaded");
    let centerlines = compute_centerlines(&layer, &cli.options(), &CancelToken::new())
        .context("Failed to compute centerlines")?;

    let output = geojson::write_layer(&centerlines)?;
    std::fs::write(&cli.output, output)
        .with_context(|| format!("Failed to write output file: {:?}", cli.output))?;

    println!(
        "Wrote {} centerline(s) to {}",
        centerlines.len(),
        cli.output.display()
    );
    Ok(())
}
