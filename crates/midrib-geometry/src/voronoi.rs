//! Voronoi cell construction.
//!
//! Cells are derived from a spade Delaunay triangulation: the Voronoi cell
//! of a generator is the intersection of the half-planes bounded by the
//! perpendicular bisectors towards each of its Delaunay neighbors. Each
//! cell starts as a large bounding frame around the generator set and is
//! clipped against one bisector per neighbor, which also closes the
//! otherwise unbounded cells of hull generators.

use geo::{Coord, LineString, Polygon};
use spade::{DelaunayTriangulation, Point2, Triangulation};

use crate::error::GeometryError;

/// Compute one closed Voronoi cell polygon per distinct generator.
///
/// Cells are returned in triangulation vertex order, which follows
/// insertion order, so the result is deterministic for a given input.
/// Coincident generators collapse to a single cell.
pub fn voronoi_cells(generators: &[Coord<f64>]) -> Result<Vec<Polygon<f64>>, GeometryError> {
    if generators.len() < 3 {
        return Err(GeometryError::TooFewGenerators(generators.len()));
    }

    let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
    for c in generators {
        triangulation.insert(Point2::new(c.x, c.y))?;
    }
    if triangulation.num_inner_faces() == 0 {
        // All generators collinear or coincident: every "cell" would be an
        // unbounded slab, useless as a tessellation.
        return Err(GeometryError::DegenerateGenerators);
    }

    let frame = bounding_frame(generators);
    let mut cells = Vec::with_capacity(triangulation.num_vertices());

    for vertex in triangulation.vertices() {
        let site = vertex.position();
        let site = Coord {
            x: site.x,
            y: site.y,
        };

        let mut ring = frame.clone();
        for edge in vertex.out_edges() {
            let neighbor = edge.to().position();
            let neighbor = Coord {
                x: neighbor.x,
                y: neighbor.y,
            };
            ring = clip_half_plane(&ring, site, neighbor);
            if ring.len() < 3 {
                break;
            }
        }

        if ring.len() >= 3 {
            let mut closed = ring;
            closed.push(closed[0]);
            cells.push(Polygon::new(LineString::from(closed), vec![]));
        }
    }

    Ok(cells)
}

/// A rectangle comfortably larger than the generator bounding box, used as
/// the starting ring for every cell.
fn bounding_frame(generators: &[Coord<f64>]) -> Vec<Coord<f64>> {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for c in generators {
        min_x = min_x.min(c.x);
        min_y = min_y.min(c.y);
        max_x = max_x.max(c.x);
        max_y = max_y.max(c.y);
    }
    let margin = ((max_x - min_x) + (max_y - min_y)).max(1.0);
    vec![
        Coord {
            x: min_x - margin,
            y: min_y - margin,
        },
        Coord {
            x: max_x + margin,
            y: min_y - margin,
        },
        Coord {
            x: max_x + margin,
            y: max_y + margin,
        },
        Coord {
            x: min_x - margin,
            y: max_y + margin,
        },
    ]
}

/// Clip a convex ring against the half-plane on `site`'s side of the
/// perpendicular bisector between `site` and `neighbor` (Sutherland–Hodgman
/// with a single clip edge).
fn clip_half_plane(ring: &[Coord<f64>], site: Coord<f64>, neighbor: Coord<f64>) -> Vec<Coord<f64>> {
    let mid = Coord {
        x: (site.x + neighbor.x) / 2.0,
        y: (site.y + neighbor.y) / 2.0,
    };
    let normal = Coord {
        x: neighbor.x - site.x,
        y: neighbor.y - site.y,
    };
    let signed = |p: Coord<f64>| (p.x - mid.x) * normal.x + (p.y - mid.y) * normal.y;

    let mut out = Vec::with_capacity(ring.len() + 1);
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        let da = signed(a);
        let db = signed(b);

        if da <= 0.0 {
            out.push(a);
        }
        if (da < 0.0) != (db < 0.0) && da != 0.0 && db != 0.0 {
            let t = da / (da - db);
            out.push(Coord {
                x: a.x + t * (b.x - a.x),
                y: a.y + t * (b.y - a.y),
            });
        }
    }
    out
}
