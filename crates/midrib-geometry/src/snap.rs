//! Quantized coordinate keys.
//!
//! Network topology is inferred from shared coordinates. Raw `f64` equality
//! is too brittle for coordinates produced by clipping and circumcenter
//! math, so coincidence is decided on a grid: two coordinates are the same
//! vertex when they land in the same snap cell.

use geo::Coord;

/// A coordinate quantized to a snap grid. Hashable and totally ordered, so
/// it can key maps and sets deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnapKey {
    x: i64,
    y: i64,
}

impl SnapKey {
    /// Quantize `coord` with the given tolerance (grid cell size).
    #[must_use]
    pub fn of(coord: Coord<f64>, tolerance: f64) -> Self {
        let inv = 1.0 / tolerance;
        Self {
            x: (coord.x * inv).round() as i64,
            y: (coord.y * inv).round() as i64,
        }
    }
}

/// Canonical key for an undirected segment: endpoint keys in sorted order,
/// so a segment and its reversal compare equal.
#[must_use]
pub fn segment_key(a: Coord<f64>, b: Coord<f64>, tolerance: f64) -> (SnapKey, SnapKey) {
    let ka = SnapKey::of(a, tolerance);
    let kb = SnapKey::of(b, tolerance);
    if ka <= kb { (ka, kb) } else { (kb, ka) }
}
