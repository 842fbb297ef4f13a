//! Boundary sampling.
//!
//! Generator points for the Voronoi step are taken by walking every ring of
//! the polygon (outer and holes) and emitting a point every `spacing` map
//! units, starting at the ring's first vertex with no start or end offset.

use geo::{Coord, Euclidean, Length, LineString, Polygon};

use crate::error::GeometryError;

/// Sampling spacing policy.
///
/// The default ties sampling density to the polygon's size: a fraction of
/// its perimeter, so small and large polygons get comparable sample counts.
/// An absolute distance in map units is also accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spacing {
    /// Spacing = perimeter * fraction.
    Relative(f64),
    /// Spacing in map units.
    Absolute(f64),
}

/// Perimeter fraction used by [`Spacing::default`].
pub const DEFAULT_SPACING_FRACTION: f64 = 0.025;

impl Default for Spacing {
    fn default() -> Self {
        Self::Relative(DEFAULT_SPACING_FRACTION)
    }
}

impl Spacing {
    /// Resolve to an absolute distance for a polygon with the given perimeter.
    #[must_use]
    pub fn resolve(self, perimeter: f64) -> f64 {
        match self {
            Self::Relative(fraction) => perimeter * fraction,
            Self::Absolute(distance) => distance,
        }
    }
}

/// Total boundary length of the polygon, holes included.
#[must_use]
pub fn perimeter(polygon: &Polygon<f64>) -> f64 {
    let mut total = Euclidean.length(polygon.exterior());
    for ring in polygon.interiors() {
        total += Euclidean.length(ring);
    }
    total
}

/// Sample points along every ring of `polygon` at the given spacing.
///
/// Points are ordered: exterior ring first, then holes, each walked from its
/// first vertex. The closing vertex of a ring is not emitted twice.
pub fn boundary_sample(
    polygon: &Polygon<f64>,
    spacing: f64,
) -> Result<Vec<Coord<f64>>, GeometryError> {
    if !(spacing > 0.0) {
        return Err(GeometryError::InvalidSpacing(spacing));
    }
    if perimeter(polygon) == 0.0 {
        return Err(GeometryError::ZeroPerimeter);
    }

    let mut points = Vec::new();
    sample_ring(polygon.exterior(), spacing, &mut points);
    for ring in polygon.interiors() {
        sample_ring(ring, spacing, &mut points);
    }
    Ok(points)
}

/// Walk one closed ring, emitting a point at every multiple of `spacing`
/// from offset 0 up to (but not including) the ring length.
fn sample_ring(ring: &LineString<f64>, spacing: f64, out: &mut Vec<Coord<f64>>) {
    let ring_length = Euclidean.length(ring);
    if ring_length == 0.0 {
        return;
    }

    let mut next_offset = 0.0;
    let mut walked = 0.0;
    for segment in ring.lines() {
        let dx = segment.end.x - segment.start.x;
        let dy = segment.end.y - segment.start.y;
        let seg_len = dx.hypot(dy);
        if seg_len == 0.0 {
            continue;
        }
        while next_offset < walked + seg_len && next_offset < ring_length {
            let t = (next_offset - walked) / seg_len;
            out.push(Coord {
                x: segment.start.x + t * (segment.end.x - segment.start.x),
                y: segment.start.y + t * (segment.end.y - segment.start.y),
            });
            next_offset += spacing;
        }
        walked += seg_len;
    }
}
