//! Simplification and smoothing primitives for the post-processing stage.

use geo::{ChaikinSmoothing, LineString, Simplify};

/// Ramer–Douglas–Peucker simplification with the given tolerance in map
/// units. Endpoints are always preserved.
#[must_use]
pub fn simplify_line(line: &LineString<f64>, tolerance: f64) -> LineString<f64> {
    if tolerance <= 0.0 {
        return line.clone();
    }
    line.simplify(&tolerance)
}

/// Chaikin corner cutting with a fixed 0.25 offset fraction per iteration.
/// Endpoints of an open line are preserved.
#[must_use]
pub fn smooth_line(line: &LineString<f64>, iterations: usize) -> LineString<f64> {
    if iterations == 0 {
        return line.clone();
    }
    line.chaikin_smoothing(iterations)
}
