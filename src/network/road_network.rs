use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::{NetworkEdge, NetworkError, NetworkVertex, VertexId};

/// result of a single-source shortest path query.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    pub length_m: f64,
    /// vertices visited from source to target, inclusive on both ends.
    pub path: Vec<VertexId>,
}

/// an immutable projected road network. vertices carry planar coordinates in
/// meters; edges are directed with strictly positive finite lengths.
///
/// the network is loaded once at startup and shared read-only by all row
/// computations, so queries take &self and never mutate.
pub struct RoadNetwork {
    vertices: Vec<NetworkVertex>,
    /// outbound (target, distance_m) pairs per vertex, in edge insertion
    /// order. insertion order is stable, which keeps equal-length path
    /// tie-breaking deterministic across a run.
    adjacency: Vec<Vec<(VertexId, f64)>>,
    n_edges: usize,
}

impl RoadNetwork {
    /// builds a network from vertex and edge lists. self-loops are dropped
    /// (path finding ignores them); a non-finite or non-positive edge length
    /// is a construction error.
    pub fn new(
        vertices: Vec<NetworkVertex>,
        edges: Vec<NetworkEdge>,
    ) -> Result<RoadNetwork, NetworkError> {
        let mut adjacency: Vec<Vec<(VertexId, f64)>> = vec![vec![]; vertices.len()];
        let mut n_edges = 0;
        let mut n_self_loops = 0;
        for (idx, edge) in edges.iter().enumerate() {
            if !edge.distance_m.is_finite() || edge.distance_m <= 0.0 {
                return Err(NetworkError::Build(format!(
                    "edge {} ({}->{}) has invalid length {}",
                    idx, edge.src_vertex_id, edge.dst_vertex_id, edge.distance_m
                )));
            }
            let src = edge.src_vertex_id.0;
            if src >= vertices.len() || edge.dst_vertex_id.0 >= vertices.len() {
                return Err(NetworkError::Build(format!(
                    "edge {} ({}->{}) references a vertex outside the network ({} vertices)",
                    idx,
                    edge.src_vertex_id,
                    edge.dst_vertex_id,
                    vertices.len()
                )));
            }
            if edge.src_vertex_id == edge.dst_vertex_id {
                n_self_loops += 1;
                continue;
            }
            adjacency[src].push((edge.dst_vertex_id, edge.distance_m));
            n_edges += 1;
        }
        if n_self_loops > 0 {
            log::debug!("dropped {n_self_loops} self-loop edges");
        }
        Ok(RoadNetwork {
            vertices,
            adjacency,
            n_edges,
        })
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn n_edges(&self) -> usize {
        self.n_edges
    }

    pub fn vertex(&self, vertex_id: VertexId) -> Option<&NetworkVertex> {
        self.vertices.get(vertex_id.0)
    }

    pub fn vertices(&self) -> &[NetworkVertex] {
        &self.vertices
    }

    /// minimum-length path from source to target under edge lengths, or None
    /// when no path exists. ties between equal-length paths resolve to the
    /// lower vertex id, which keeps results stable across runs.
    pub fn shortest_path(&self, source: VertexId, target: VertexId) -> Option<PathResult> {
        if source.0 >= self.vertices.len() || target.0 >= self.vertices.len() {
            return None;
        }
        if source == target {
            return Some(PathResult {
                length_m: 0.0,
                path: vec![source],
            });
        }

        let mut dist = vec![f64::INFINITY; self.vertices.len()];
        let mut prev: Vec<Option<VertexId>> = vec![None; self.vertices.len()];
        let mut frontier = BinaryHeap::new();
        dist[source.0] = 0.0;
        frontier.push(FrontierEntry {
            cost_m: 0.0,
            vertex_id: source,
        });

        while let Some(FrontierEntry { cost_m, vertex_id }) = frontier.pop() {
            if vertex_id == target {
                return Some(PathResult {
                    length_m: cost_m,
                    path: reconstruct(&prev, source, target),
                });
            }
            if cost_m > dist[vertex_id.0] {
                continue;
            }
            for &(next, edge_m) in self.adjacency[vertex_id.0].iter() {
                let next_cost = cost_m + edge_m;
                if next_cost < dist[next.0] {
                    dist[next.0] = next_cost;
                    prev[next.0] = Some(vertex_id);
                    frontier.push(FrontierEntry {
                        cost_m: next_cost,
                        vertex_id: next,
                    });
                }
            }
        }

        None
    }
}

/// the vertices immediately before and after `pivot` on a path. boundary
/// positions produce None on the corresponding side; a pivot absent from the
/// path produces (None, None). when the pivot appears more than once (a cycle
/// through it), the first occurrence is used.
pub fn path_neighbours(
    path: &[VertexId],
    pivot: VertexId,
) -> (Option<VertexId>, Option<VertexId>) {
    match path.iter().position(|&v| v == pivot) {
        None => (None, None),
        Some(i) => {
            let before = if i > 0 { Some(path[i - 1]) } else { None };
            let after = path.get(i + 1).copied();
            (before, after)
        }
    }
}

fn reconstruct(prev: &[Option<VertexId>], source: VertexId, target: VertexId) -> Vec<VertexId> {
    let mut path = vec![target];
    let mut current = target;
    while current != source {
        match prev[current.0] {
            Some(p) => {
                path.push(p);
                current = p;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    cost_m: f64,
    vertex_id: VertexId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost_m.total_cmp(&other.cost_m).is_eq() && self.vertex_id == other.vertex_id
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    // reversed: BinaryHeap is a max-heap, we need the cheapest entry first.
    // equal costs order by ascending vertex id.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost_m
            .total_cmp(&self.cost_m)
            .then_with(|| other.vertex_id.cmp(&self.vertex_id))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// a small diamond network:
    ///
    /// ```text
    ///        1
    ///      /   \
    ///     0     3 --- 4
    ///      \   /
    ///        2
    /// ```
    ///
    /// the 0->2->3 leg is shorter than 0->1->3; vertex 4 hangs off 3; vertex 5
    /// is disconnected.
    fn diamond() -> RoadNetwork {
        let vertices = vec![
            NetworkVertex::new(0, 0.0, 0.0),
            NetworkVertex::new(1, 100.0, 100.0),
            NetworkVertex::new(2, 100.0, -50.0),
            NetworkVertex::new(3, 200.0, 0.0),
            NetworkVertex::new(4, 300.0, 0.0),
            NetworkVertex::new(5, 9999.0, 9999.0),
        ];
        let edges = vec![
            NetworkEdge::new(0, 1, 150.0),
            NetworkEdge::new(1, 3, 150.0),
            NetworkEdge::new(0, 2, 120.0),
            NetworkEdge::new(2, 3, 120.0),
            NetworkEdge::new(3, 4, 100.0),
            // reverse directions
            NetworkEdge::new(1, 0, 150.0),
            NetworkEdge::new(3, 1, 150.0),
            NetworkEdge::new(2, 0, 120.0),
            NetworkEdge::new(3, 2, 120.0),
            NetworkEdge::new(4, 3, 100.0),
        ];
        RoadNetwork::new(vertices, edges).expect("test invariant failed: diamond network invalid")
    }

    #[test]
    fn test_shortest_path_picks_cheaper_leg() {
        let network = diamond();
        let result = network
            .shortest_path(VertexId(0), VertexId(4))
            .expect("path 0->4 should exist");
        assert!(
            (result.length_m - 340.0).abs() < 1e-9,
            "expected 0->2->3->4 = 340m, got {}",
            result.length_m
        );
        assert_eq!(
            result.path,
            vec![VertexId(0), VertexId(2), VertexId(3), VertexId(4)]
        );
    }

    #[test]
    fn test_shortest_path_no_route() {
        let network = diamond();
        assert!(network.shortest_path(VertexId(0), VertexId(5)).is_none());
    }

    #[test]
    fn test_shortest_path_source_equals_target() {
        let network = diamond();
        let result = network
            .shortest_path(VertexId(2), VertexId(2))
            .expect("trivial path should exist");
        assert_eq!(result.length_m, 0.0);
        assert_eq!(result.path, vec![VertexId(2)]);
    }

    #[test]
    fn test_shortest_path_tie_breaks_on_vertex_id() {
        // two equal-length two-hop routes 0->1->3 and 0->2->3; the route
        // through the lower intermediate vertex id must win every run.
        let vertices = vec![
            NetworkVertex::new(0, 0.0, 0.0),
            NetworkVertex::new(1, 50.0, 50.0),
            NetworkVertex::new(2, 50.0, -50.0),
            NetworkVertex::new(3, 100.0, 0.0),
        ];
        let edges = vec![
            NetworkEdge::new(0, 1, 70.0),
            NetworkEdge::new(1, 3, 70.0),
            NetworkEdge::new(0, 2, 70.0),
            NetworkEdge::new(2, 3, 70.0),
        ];
        let network = RoadNetwork::new(vertices, edges).expect("valid network");
        for _ in 0..10 {
            let result = network
                .shortest_path(VertexId(0), VertexId(3))
                .expect("path exists");
            assert_eq!(result.path, vec![VertexId(0), VertexId(1), VertexId(3)]);
        }
    }

    #[test]
    fn test_directed_edges_are_not_symmetric() {
        let vertices = vec![NetworkVertex::new(0, 0.0, 0.0), NetworkVertex::new(1, 10.0, 0.0)];
        let edges = vec![NetworkEdge::new(0, 1, 10.0)];
        let network = RoadNetwork::new(vertices, edges).expect("valid network");
        assert!(network.shortest_path(VertexId(0), VertexId(1)).is_some());
        assert!(network.shortest_path(VertexId(1), VertexId(0)).is_none());
    }

    #[test]
    fn test_self_loops_are_ignored() {
        let vertices = vec![NetworkVertex::new(0, 0.0, 0.0), NetworkVertex::new(1, 10.0, 0.0)];
        let edges = vec![
            NetworkEdge::new(0, 0, 5.0),
            NetworkEdge::new(0, 1, 10.0),
        ];
        let network = RoadNetwork::new(vertices, edges).expect("valid network");
        assert_eq!(network.n_edges(), 1);
        let result = network
            .shortest_path(VertexId(0), VertexId(1))
            .expect("path exists");
        assert_eq!(result.length_m, 10.0);
    }

    #[test]
    fn test_invalid_edge_length_is_a_build_error() {
        let vertices = vec![NetworkVertex::new(0, 0.0, 0.0), NetworkVertex::new(1, 10.0, 0.0)];
        let edges = vec![NetworkEdge::new(0, 1, 0.0)];
        assert!(RoadNetwork::new(vertices, edges).is_err());
    }

    #[test]
    fn test_path_neighbours() {
        let path = vec![VertexId(7), VertexId(3), VertexId(9), VertexId(1)];
        assert_eq!(
            path_neighbours(&path, VertexId(3)),
            (Some(VertexId(7)), Some(VertexId(9)))
        );
        assert_eq!(path_neighbours(&path, VertexId(7)), (None, Some(VertexId(3))));
        assert_eq!(path_neighbours(&path, VertexId(1)), (Some(VertexId(9)), None));
        assert_eq!(path_neighbours(&path, VertexId(42)), (None, None));
    }

    #[test]
    fn test_path_neighbours_uses_first_occurrence() {
        let path = vec![VertexId(0), VertexId(5), VertexId(2), VertexId(5), VertexId(9)];
        assert_eq!(
            path_neighbours(&path, VertexId(5)),
            (Some(VertexId(0)), Some(VertexId(2)))
        );
    }
}
