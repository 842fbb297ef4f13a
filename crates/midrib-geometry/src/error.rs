use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("polygon has zero perimeter, cannot sample its boundary")]
    ZeroPerimeter,

    #[error("sampling spacing must be positive, got {0}")]
    InvalidSpacing(f64),

    #[error("Voronoi diagram needs at least 3 generator points, got {0}")]
    TooFewGenerators(usize),

    #[error("generator points are degenerate (collinear or coincident), no Voronoi diagram exists")]
    DegenerateGenerators,

    #[error("generator point is not a finite coordinate: {0}")]
    NonFiniteGenerator(#[from] spade::InsertionError),
}
