//! Network Builder: from boundary samples to an internal skeleton network.

use geo::{Coord, Line, Polygon};
use midrib_geometry::{ops, voronoi};
use tracing::debug;

use crate::error::StageError;

/// A planar line network: atomic edges whose topology is inferred from
/// coordinate coincidence under `snap_tolerance`.
#[derive(Debug, Clone)]
pub struct Network {
    pub edges: Vec<Line<f64>>,
    pub snap_tolerance: f64,
}

impl Network {
    #[must_use]
    pub fn new(edges: Vec<Line<f64>>, snap_tolerance: f64) -> Self {
        Self {
            edges,
            snap_tolerance,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Sum of edge lengths.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.edges
            .iter()
            .map(|e| (e.end.x - e.start.x).hypot(e.end.y - e.start.y))
            .sum()
    }
}

/// Build the internal skeleton network of `polygon` from its boundary
/// samples.
///
/// The Voronoi diagram of the samples is clipped to the polygon and turned
/// into deduplicated atomic edges; the silhouette of the dissolved cells
/// (the polygon's own outline as reproduced by the tessellation) is then
/// removed, together with every edge touching it, leaving only edges of
/// the interior skeleton.
pub fn build_network(
    polygon: &Polygon<f64>,
    samples: &[Coord<f64>],
    snap_tolerance: f64,
) -> Result<Network, StageError> {
    let cells = voronoi::voronoi_cells(samples)?;
    let clipped = ops::clip(&cells, polygon);
    debug!(
        cells = cells.len(),
        clipped = clipped.len(),
        "voronoi cells clipped to polygon"
    );

    let cell_lines = ops::polygons_to_lines(&clipped);
    let segments = ops::explode(&cell_lines);
    let segments = ops::dedupe_segments(segments, snap_tolerance);

    let dissolved = ops::dissolve(&clipped);
    let outline = ops::boundary_lines(&dissolved);

    let before = segments.len();
    let edges: Vec<Line<f64>> = segments
        .into_iter()
        .filter(|segment| !ops::segment_intersects_lines(segment, &outline, snap_tolerance))
        .collect();
    debug!(
        before,
        after = edges.len(),
        "outline-touching edges removed"
    );

    if edges.is_empty() {
        return Err(StageError::EmptyNetwork);
    }
    Ok(Network::new(edges, snap_tolerance))
}
