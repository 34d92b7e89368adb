use serde::{Deserialize, Serialize};

use super::VertexId;

/// a directed road network edge with a length in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetworkEdge {
    pub src_vertex_id: VertexId,
    pub dst_vertex_id: VertexId,
    pub distance_m: f64,
}

impl NetworkEdge {
    pub fn new(src_vertex_id: usize, dst_vertex_id: usize, distance_m: f64) -> NetworkEdge {
        NetworkEdge {
            src_vertex_id: VertexId(src_vertex_id),
            dst_vertex_id: VertexId(dst_vertex_id),
            distance_m,
        }
    }
}
