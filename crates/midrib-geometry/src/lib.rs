//! Geometry engine for midrib.
//!
//! Narrow functional wrappers over the `geo`/`spade` stack: boundary
//! sampling, Voronoi cell construction, polygon clipping, line conversions
//! and the simplify/smooth post-processing primitives. Everything operates
//! on immutable `geo` values and returns new collections.

mod error;
pub mod ops;
pub mod sample;
pub mod smooth;
pub mod snap;
pub mod voronoi;

pub use error::GeometryError;
pub use sample::Spacing;
pub use snap::SnapKey;
