//! Polygon centerline extraction.
//!
//! For each input polygon: sample the boundary, build a Voronoi diagram of
//! the samples, clip it to the polygon and prune it down to an internal
//! skeleton network, find the network's leaf endpoints, and return the
//! longest shortest-path between two leaves, a medial-axis-like curve
//! suitable for placing a label along the polygon's length.

mod cancel;
mod endpoints;
mod error;
mod network;
mod pipeline;
mod route;

pub use cancel::CancelToken;
pub use endpoints::detect_endpoints;
pub use error::{PipelineError, StageError};
pub use network::{build_network, Network};
pub use pipeline::{
    compute_centerlines, compute_centerlines_with_progress, CenterlineOptions, FailurePolicy,
};
pub use route::{select_centerline, Route};
