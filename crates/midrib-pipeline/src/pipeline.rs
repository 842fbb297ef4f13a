//! Orchestrator: validation, per-feature pipeline, layer-level post-process.

use geo::{Geometry, LineString, Polygon};
use midrib_core::{Feature, Layer};
use midrib_geometry::{sample, smooth, Spacing};
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::endpoints::detect_endpoints;
use crate::error::PipelineError;
use crate::network::build_network;
use crate::route::select_centerline;

/// What to do when a single feature fails topologically (empty skeleton,
/// too few endpoints, disconnected network).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the whole run.
    #[default]
    Abort,
    /// Log a warning, emit nothing for the feature, continue.
    Skip,
}

#[derive(Debug, Clone)]
pub struct CenterlineOptions {
    /// Boundary sampling spacing (default: 2.5% of the perimeter).
    pub spacing: Spacing,
    /// Apply the simplify + smooth post-process to the output layer.
    pub smooth: bool,
    /// Douglas–Peucker tolerance in map units.
    pub simplify_tolerance: f64,
    /// Chaikin corner-cutting iterations.
    pub smooth_iterations: usize,
    /// Coordinate coincidence tolerance in map units.
    pub snap_tolerance: f64,
    /// Per-feature failure handling.
    pub failure_policy: FailurePolicy,
}

impl Default for CenterlineOptions {
    fn default() -> Self {
        Self {
            spacing: Spacing::default(),
            smooth: true,
            simplify_tolerance: 5.0,
            smooth_iterations: 10,
            snap_tolerance: 1e-6,
            failure_policy: FailurePolicy::Abort,
        }
    }
}

/// Compute one centerline per input polygon.
///
/// Output features carry the centerline geometry paired with the source
/// feature's attributes, in input order. See
/// [`compute_centerlines_with_progress`] for the reporting variant.
pub fn compute_centerlines(
    layer: &Layer,
    options: &CenterlineOptions,
    cancel: &CancelToken,
) -> Result<Layer, PipelineError> {
    compute_centerlines_with_progress(layer, options, cancel, |_, _| {})
}

/// Like [`compute_centerlines`], invoking `progress(done, total)` after
/// each feature (1-based).
pub fn compute_centerlines_with_progress(
    layer: &Layer,
    options: &CenterlineOptions,
    cancel: &CancelToken,
    mut progress: impl FnMut(usize, usize),
) -> Result<Layer, PipelineError> {
    validate(layer)?;

    let total = layer.len();
    let mut output = Layer::new(layer.crs);

    for (index, feature) in layer.features.iter().enumerate() {
        // Validation guarantees every geometry is a polygon.
        let Geometry::Polygon(polygon) = &feature.geometry else {
            continue;
        };

        match centerline_for(index, polygon, options, cancel) {
            Ok(path) => {
                output.push(Feature::new(
                    Geometry::LineString(path),
                    feature.attributes.clone(),
                ));
            }
            Err(PipelineError::Cancelled) => return Err(PipelineError::Cancelled),
            Err(err) if options.failure_policy == FailurePolicy::Skip => {
                warn!(feature = index, %err, "skipping feature");
            }
            Err(err) => return Err(err),
        }
        info!(done = index + 1, total, "feature processed");
        progress(index + 1, total);
    }

    if options.smooth {
        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }
        post_process(&mut output, options);
    }
    Ok(output)
}

/// Fail-fast layer validation: run before any geometry processing.
fn validate(layer: &Layer) -> Result<(), PipelineError> {
    if layer.is_empty() {
        return Err(PipelineError::EmptyInput);
    }
    if layer.crs.is_geographic() {
        return Err(PipelineError::GeographicCrs);
    }
    for (index, feature) in layer.features.iter().enumerate() {
        match &feature.geometry {
            Geometry::Polygon(_) => {}
            Geometry::MultiPolygon(_) => {
                return Err(PipelineError::MultipartFeature { index });
            }
            _ => return Err(PipelineError::NotAPolygon { index }),
        }
    }
    Ok(())
}

/// The per-feature pipeline: sample, build network, detect endpoints,
/// select the route. Cancellation is checked before each sub-step.
fn centerline_for(
    index: usize,
    polygon: &Polygon<f64>,
    options: &CenterlineOptions,
    cancel: &CancelToken,
) -> Result<LineString<f64>, PipelineError> {
    let stage = |source| PipelineError::Feature { index, source };

    if cancel.is_cancelled() {
        return Err(PipelineError::Cancelled);
    }
    let spacing = options.spacing.resolve(sample::perimeter(polygon));
    let samples = sample::boundary_sample(polygon, spacing)
        .map_err(|e| stage(e.into()))?;
    debug!(feature = index, samples = samples.len(), spacing, "boundary sampled");

    if cancel.is_cancelled() {
        return Err(PipelineError::Cancelled);
    }
    let network = build_network(polygon, &samples, options.snap_tolerance).map_err(stage)?;
    debug!(feature = index, edges = network.len(), "skeleton network built");

    if cancel.is_cancelled() {
        return Err(PipelineError::Cancelled);
    }
    let endpoints = detect_endpoints(&network).map_err(stage)?;

    if cancel.is_cancelled() {
        return Err(PipelineError::Cancelled);
    }
    let route = select_centerline(&network, &endpoints).map_err(stage)?;
    Ok(route.path)
}

/// One combined simplify + smooth pass over the accumulated output layer.
fn post_process(layer: &mut Layer, options: &CenterlineOptions) {
    for feature in &mut layer.features {
        if let Geometry::LineString(line) = &mut feature.geometry {
            let simplified = smooth::simplify_line(line, options.simplify_tolerance);
            *line = smooth::smooth_line(&simplified, options.smooth_iterations);
        }
    }
}
