//! Endpoint Detector: the degree-1 vertices of a network.

use geo::Coord;
use indexmap::IndexMap;
use midrib_geometry::{ops, SnapKey};
use tracing::debug;

use crate::error::StageError;
use crate::network::Network;

/// Find every network vertex touched by exactly one edge.
///
/// Vertices are extracted with multiplicity (one instance per incident
/// edge) and counted per snap cell, so near-coincident coordinates are
/// treated as one vertex. The returned order is the order in which each
/// coordinate was first extracted, which makes downstream tie-breaking
/// deterministic.
pub fn detect_endpoints(network: &Network) -> Result<Vec<Coord<f64>>, StageError> {
    let vertices = ops::extract_vertices(&network.edges);

    let mut degree: IndexMap<SnapKey, (Coord<f64>, usize)> = IndexMap::new();
    for vertex in vertices {
        degree
            .entry(SnapKey::of(vertex, network.snap_tolerance))
            .and_modify(|(_, count)| *count += 1)
            .or_insert((vertex, 1));
    }

    let endpoints: Vec<Coord<f64>> = degree
        .values()
        .filter(|(_, count)| *count == 1)
        .map(|(coord, _)| *coord)
        .collect();
    debug!(
        vertices = degree.len(),
        endpoints = endpoints.len(),
        "network endpoints detected"
    );

    if endpoints.len() < 2 {
        return Err(StageError::TooFewEndpoints {
            found: endpoints.len(),
        });
    }
    Ok(endpoints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Line;

    fn line(ax: f64, ay: f64, bx: f64, by: f64) -> Line<f64> {
        Line::new(Coord { x: ax, y: ay }, Coord { x: bx, y: by })
    }

    #[test]
    fn y_shape_has_three_endpoints() {
        // Three segments meeting at (0, 5).
        let network = Network::new(
            vec![
                line(0.0, 0.0, 0.0, 5.0),
                line(0.0, 5.0, -3.0, 10.0),
                line(0.0, 5.0, 3.0, 10.0),
            ],
            1e-6,
        );
        let endpoints = detect_endpoints(&network).unwrap();
        assert_eq!(endpoints.len(), 3);
        // The junction (degree 3) is excluded.
        assert!(!endpoints.contains(&Coord { x: 0.0, y: 5.0 }));
        // First-extracted endpoint comes first.
        assert_eq!(endpoints[0], Coord { x: 0.0, y: 0.0 });
    }

    #[test]
    fn near_coincident_vertices_snap_together() {
        let network = Network::new(
            vec![
                line(0.0, 0.0, 5.0, 0.0),
                // Start is within snap tolerance of the previous end.
                line(5.0 + 1e-9, 0.0, 10.0, 0.0),
            ],
            1e-6,
        );
        let endpoints = detect_endpoints(&network).unwrap();
        assert_eq!(endpoints.len(), 2, "interior joint must not count as leaf");
    }

    #[test]
    fn single_edge_has_two_endpoints() {
        let network = Network::new(vec![line(0.0, 0.0, 1.0, 1.0)], 1e-6);
        assert_eq!(detect_endpoints(&network).unwrap().len(), 2);
    }

    #[test]
    fn closed_loop_has_no_endpoints() {
        let network = Network::new(
            vec![
                line(0.0, 0.0, 1.0, 0.0),
                line(1.0, 0.0, 1.0, 1.0),
                line(1.0, 1.0, 0.0, 0.0),
            ],
            1e-6,
        );
        assert!(matches!(
            detect_endpoints(&network),
            Err(StageError::TooFewEndpoints { found: 0 })
        ));
    }
}
