//! Overlay and conversion operations used by the network builder.
//!
//! Classic GIS toolbox steps as pure functions over `geo` values: clip,
//! polygons-to-lines, explode, delete-duplicate-geometries, dissolve and
//! select-by-location.

use geo::{BooleanOps, Coord, Intersects, Line, LineString, MultiPolygon, Polygon};
use indexmap::IndexSet;

use crate::snap::segment_key;

/// Intersect every candidate polygon with `mask`, dropping parts that fall
/// outside. A candidate overlapping the mask boundary contributes its
/// inside portion only.
#[must_use]
pub fn clip(candidates: &[Polygon<f64>], mask: &Polygon<f64>) -> Vec<Polygon<f64>> {
    let mut clipped = Vec::new();
    for candidate in candidates {
        let pieces = candidate.intersection(mask);
        for piece in pieces.0 {
            // A valid ring needs at least a triangle plus the closing vertex.
            if piece.exterior().0.len() >= 4 {
                clipped.push(piece);
            }
        }
    }
    clipped
}

/// Boundary rings (outer and holes) of every polygon, as line strings.
#[must_use]
pub fn polygons_to_lines(polygons: &[Polygon<f64>]) -> Vec<LineString<f64>> {
    let mut lines = Vec::new();
    for polygon in polygons {
        lines.push(polygon.exterior().clone());
        lines.extend(polygon.interiors().iter().cloned());
    }
    lines
}

/// Decompose line strings into atomic two-point segments, skipping
/// zero-length pieces.
#[must_use]
pub fn explode(lines: &[LineString<f64>]) -> Vec<Line<f64>> {
    lines
        .iter()
        .flat_map(LineString::lines)
        .filter(|segment| segment.start != segment.end)
        .collect()
}

/// Remove geometrically duplicate segments: same endpoints under the snap
/// tolerance, regardless of direction. The first occurrence wins, so output
/// order follows input order.
#[must_use]
pub fn dedupe_segments(segments: Vec<Line<f64>>, tolerance: f64) -> Vec<Line<f64>> {
    let mut seen = IndexSet::new();
    let mut unique = Vec::new();
    for segment in segments {
        if seen.insert(segment_key(segment.start, segment.end, tolerance)) {
            unique.push(segment);
        }
    }
    unique
}

/// Union all polygons into one (multi)polygon.
#[must_use]
pub fn dissolve(polygons: &[Polygon<f64>]) -> MultiPolygon<f64> {
    let mut iter = polygons.iter();
    let Some(first) = iter.next() else {
        return MultiPolygon::new(Vec::new());
    };
    let mut merged = MultiPolygon::new(vec![first.clone()]);
    for polygon in iter {
        let piece = MultiPolygon::new(vec![polygon.clone()]);
        merged = merged.union(&piece);
    }
    merged
}

/// Boundary rings of a dissolved multipolygon.
#[must_use]
pub fn boundary_lines(dissolved: &MultiPolygon<f64>) -> Vec<LineString<f64>> {
    let mut lines = Vec::new();
    for polygon in &dissolved.0 {
        lines.push(polygon.exterior().clone());
        lines.extend(polygon.interiors().iter().cloned());
    }
    lines
}

/// The subset of candidate segments that spatially intersect any of the
/// mask lines (within `tolerance`).
#[must_use]
pub fn select_by_intersection(
    candidates: &[Line<f64>],
    mask: &[LineString<f64>],
    tolerance: f64,
) -> Vec<Line<f64>> {
    candidates
        .iter()
        .filter(|segment| segment_intersects_lines(segment, mask, tolerance))
        .copied()
        .collect()
}

/// Whether `segment` intersects (or comes within `tolerance` of) any of the
/// given lines.
#[must_use]
pub fn segment_intersects_lines(
    segment: &Line<f64>,
    lines: &[LineString<f64>],
    tolerance: f64,
) -> bool {
    for line in lines {
        for other in line.lines() {
            if segment.intersects(&other) || segment_distance(segment, &other) <= tolerance {
                return true;
            }
        }
    }
    false
}

/// Every vertex of every segment, with multiplicity: a coordinate shared by
/// n segments appears n times. Order follows segment order, start before end.
#[must_use]
pub fn extract_vertices(segments: &[Line<f64>]) -> Vec<Coord<f64>> {
    let mut vertices = Vec::with_capacity(segments.len() * 2);
    for segment in segments {
        vertices.push(segment.start);
        vertices.push(segment.end);
    }
    vertices
}

/// Minimum distance between two segments. Zero when they cross.
fn segment_distance(a: &Line<f64>, b: &Line<f64>) -> f64 {
    if a.intersects(b) {
        return 0.0;
    }
    point_segment_distance(a.start, b)
        .min(point_segment_distance(a.end, b))
        .min(point_segment_distance(b.start, a))
        .min(point_segment_distance(b.end, a))
}

/// Distance from a point to a segment, clamped to the segment's extent.
fn point_segment_distance(p: Coord<f64>, segment: &Line<f64>) -> f64 {
    let d = Coord {
        x: segment.end.x - segment.start.x,
        y: segment.end.y - segment.start.y,
    };
    let len_sq = d.x * d.x + d.y * d.y;
    if len_sq == 0.0 {
        return (p.x - segment.start.x).hypot(p.y - segment.start.y);
    }
    let t = ((p.x - segment.start.x) * d.x + (p.y - segment.start.y) * d.y) / len_sq;
    let t = t.clamp(0.0, 1.0);
    let closest = Coord {
        x: segment.start.x + t * d.x,
        y: segment.start.y + t * d.y,
    };
    (p.x - closest.x).hypot(p.y - closest.y)
}
