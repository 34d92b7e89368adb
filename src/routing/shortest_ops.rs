use crate::network::{RoadNetwork, VertexId};

/// unconstrained (free flow) shortest path length from origin to destination,
/// or None when either endpoint is unbound or no route exists.
pub fn free_flow_length_m(
    network: &RoadNetwork,
    origin: Option<VertexId>,
    destination: Option<VertexId>,
) -> Option<f64> {
    let origin = origin?;
    let destination = destination?;
    network
        .shortest_path(origin, destination)
        .map(|result| result.length_m)
}
