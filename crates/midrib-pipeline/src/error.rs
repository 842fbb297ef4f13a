use midrib_geometry::GeometryError;
use thiserror::Error;

/// A failure while processing a single feature, without feature context.
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("skeleton network is empty after outline removal")]
    EmptyNetwork,

    #[error("found {found} network endpoint(s), need at least 2")]
    TooFewEndpoints { found: usize },

    #[error("no route exists between any endpoint pair (disconnected network)")]
    NoRoute,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input layer is empty, nothing to process")]
    EmptyInput,

    #[error("input layer uses a geographic coordinate system; a projected CRS is required")]
    GeographicCrs,

    #[error("no multipart feature allowed (feature {index} is a multipolygon)")]
    MultipartFeature { index: usize },

    #[error("feature {index} is not a polygon")]
    NotAPolygon { index: usize },

    #[error("feature {index}: {source}")]
    Feature {
        index: usize,
        #[source]
        source: StageError,
    },

    #[error("operation cancelled")]
    Cancelled,
}
