use crate::capacity::{CheckpointClass, SenseCatalogue};
use crate::model::{Cardinal, SenseCode};
use crate::network::{path_neighbours, RoadNetwork, VertexId};

/// the constrained (via-checkpoint) shortest path: origin to checkpoint plus
/// checkpoint to destination, with the checkpoint vertex appearing once at
/// the seam.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstrainedPath {
    pub length_m: f64,
    pub path: Vec<VertexId>,
    /// true when the checkpoint vertex is strictly interior to the path,
    /// which is exactly the condition under which both pivot neighbours
    /// exist and a direction can be derived.
    pub passes_checkpoint: bool,
}

/// computes the via-checkpoint path for one OD pair, or None when either
/// segment has no route or an endpoint is unbound.
pub fn via_checkpoint_path(
    network: &RoadNetwork,
    origin: Option<VertexId>,
    checkpoint: VertexId,
    destination: Option<VertexId>,
) -> Option<ConstrainedPath> {
    let origin = origin?;
    let destination = destination?;
    let inbound = network.shortest_path(origin, checkpoint)?;
    let outbound = network.shortest_path(checkpoint, destination)?;

    let mut path = inbound.path;
    path.extend(outbound.path.into_iter().skip(1));
    let length_m = inbound.length_m + outbound.length_m;
    let passes_checkpoint = match path.iter().position(|&v| v == checkpoint) {
        Some(i) => i > 0 && i + 1 < path.len(),
        None => false,
    };
    Some(ConstrainedPath {
        length_m,
        path,
        passes_checkpoint,
    })
}

/// derives the sense code of a constrained path at its checkpoint vertex.
///
/// aggregate checkpoints record all traffic under sense "0"; no bearings are
/// computed for them. for directional checkpoints the inbound bearing is
/// taken from the vertex preceding the checkpoint on the path and the
/// outbound bearing toward the vertex following it; each maps to a cardinal
/// quadrant and the pair forms the candidate code, which must survive the
/// sense catalogue. a path that starts or ends on the checkpoint has no
/// usable bearing pair and is invalid.
pub fn derive_sense(
    network: &RoadNetwork,
    constrained: &ConstrainedPath,
    checkpoint: VertexId,
    checkpoint_id: &str,
    class: CheckpointClass,
    catalogue: &SenseCatalogue,
) -> SenseCode {
    if class == CheckpointClass::Aggregate {
        return SenseCode::Aggregate;
    }

    let (before, after) = path_neighbours(&constrained.path, checkpoint);
    let (u, w) = match (before, after) {
        (Some(u), Some(w)) => (u, w),
        _ => return SenseCode::Invalid,
    };
    let (u, c, w) = match (
        network.vertex(u),
        network.vertex(checkpoint),
        network.vertex(w),
    ) {
        (Some(u), Some(c), Some(w)) => (u, c, w),
        _ => return SenseCode::Invalid,
    };

    let inbound = Cardinal::from_bearing_deg(u.bearing_deg_to(c));
    let outbound = Cardinal::from_bearing_deg(c.bearing_deg_to(w));
    let candidate = SenseCode::Directional(inbound, outbound);

    // a candidate always has a key; colinear in/out pairs such as "1-1" are
    // formed mechanically and stand or fall with the catalogue.
    match candidate.as_key() {
        Some(key) if catalogue.permits(checkpoint_id, &key) => candidate,
        _ => SenseCode::Invalid,
    }
}
