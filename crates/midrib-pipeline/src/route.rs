//! Longest-Path Selector.
//!
//! The network is turned into an explicit undirected graph (nodes keyed by
//! quantized coordinates, edge weight = Euclidean length) and a dijkstra
//! search is run from every endpoint. The most costly shortest-path
//! between two endpoints across all runs is the centerline: the longest
//! way to cross the skeleton leaf-to-leaf, which approximates the
//! polygon's principal axis.

use std::collections::HashSet;

use geo::{Coord, LineString};
use indexmap::IndexMap;
use midrib_geometry::SnapKey;
use petgraph::algo::dijkstra;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use tracing::debug;

use crate::error::StageError;
use crate::network::Network;

/// A path through the network with its total cost under the routing metric.
#[derive(Debug, Clone)]
pub struct Route {
    pub path: LineString<f64>,
    pub cost: f64,
}

/// Select the maximum-cost shortest-path between any two endpoints.
///
/// Ties are broken by endpoint order: a candidate only replaces the
/// incumbent on strictly greater cost, so the first pair encountered wins
/// and reruns on the same input yield the same route.
pub fn select_centerline(
    network: &Network,
    endpoints: &[Coord<f64>],
) -> Result<Route, StageError> {
    let (graph, nodes) = build_graph(network);

    let endpoint_nodes: Vec<NodeIndex> = endpoints
        .iter()
        .filter_map(|coord| {
            nodes
                .get(&SnapKey::of(*coord, network.snap_tolerance))
                .copied()
        })
        .collect();

    let mut best: Option<(NodeIndex, NodeIndex, f64)> = None;
    for &start in &endpoint_nodes {
        let costs = dijkstra(&graph, start, None, |e| *e.weight());
        for &target in &endpoint_nodes {
            if target == start {
                continue;
            }
            if let Some(&cost) = costs.get(&target) {
                if best.map_or(true, |(_, _, incumbent)| cost > incumbent) {
                    best = Some((start, target, cost));
                }
            }
        }
    }

    let (start, end, cost) = best.ok_or(StageError::NoRoute)?;
    let node_path = shortest_path_nodes(&graph, start, end).ok_or(StageError::NoRoute)?;
    let coords: Vec<Coord<f64>> = node_path.iter().map(|n| graph[*n]).collect();
    debug!(
        cost,
        vertices = coords.len(),
        "longest leaf-to-leaf route selected"
    );

    Ok(Route {
        path: LineString::from(coords),
        cost,
    })
}

/// Build the weighted graph once per network. Nodes are registered in edge
/// order, so node indices are deterministic.
fn build_graph(network: &Network) -> (UnGraph<Coord<f64>, f64>, IndexMap<SnapKey, NodeIndex>) {
    let mut graph = UnGraph::new_undirected();
    let mut nodes: IndexMap<SnapKey, NodeIndex> = IndexMap::new();

    let mut intern = |graph: &mut UnGraph<Coord<f64>, f64>, coord: Coord<f64>| {
        *nodes
            .entry(SnapKey::of(coord, network.snap_tolerance))
            .or_insert_with(|| graph.add_node(coord))
    };

    for edge in &network.edges {
        let a = intern(&mut graph, edge.start);
        let b = intern(&mut graph, edge.end);
        if a == b {
            continue;
        }
        let weight = (edge.end.x - edge.start.x).hypot(edge.end.y - edge.start.y);
        graph.add_edge(a, b, weight);
    }
    (graph, nodes)
}

/// Reconstruct the dijkstra shortest path from `start` to `end` by walking
/// backwards from `end`, stepping to the neighbor whose cost plus the edge
/// weight equals the current cost.
fn shortest_path_nodes(
    graph: &UnGraph<Coord<f64>, f64>,
    start: NodeIndex,
    end: NodeIndex,
) -> Option<Vec<NodeIndex>> {
    let costs = dijkstra(graph, start, Some(end), |e| *e.weight());
    if !costs.contains_key(&end) {
        return None;
    }

    let mut reversed = vec![end];
    let mut visited: HashSet<NodeIndex> = HashSet::from([end]);
    let mut current = end;

    while current != start {
        let current_cost = *costs.get(&current)?;
        let mut next = None;
        for edge in graph.edges(current) {
            let neighbor = edge.target();
            if visited.contains(&neighbor) {
                continue;
            }
            if let Some(&neighbor_cost) = costs.get(&neighbor) {
                let slack = (neighbor_cost + edge.weight() - current_cost).abs();
                if slack <= 1e-9 * current_cost.max(1.0) {
                    next = Some(neighbor);
                    break;
                }
            }
        }
        let neighbor = next?;
        visited.insert(neighbor);
        reversed.push(neighbor);
        current = neighbor;
    }

    reversed.reverse();
    Some(reversed)
}
