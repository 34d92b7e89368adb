use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct VertexId(pub usize);

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// a road network vertex with planar coordinates in meters. all vertices of
/// a network share a single metric projection; bearings are computed in that
/// plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetworkVertex {
    pub vertex_id: VertexId,
    pub x: f64,
    pub y: f64,
}

impl NetworkVertex {
    pub fn new(vertex_id: usize, x: f64, y: f64) -> NetworkVertex {
        NetworkVertex {
            vertex_id: VertexId(vertex_id),
            x,
            y,
        }
    }

    pub fn distance_to(&self, other: &NetworkVertex) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    /// planar bearing in degrees from this vertex toward another, in the
    /// atan2 convention: east is 0, north is 90, range (-180, 180].
    pub fn bearing_deg_to(&self, other: &NetworkVertex) -> f64 {
        (other.y - self.y).atan2(other.x - self.x).to_degrees()
    }
}
