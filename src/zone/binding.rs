use std::collections::HashMap;

use geo::Centroid;
use rstar::{primitives::GeomWithData, RTree};
use uom::si::f64::Length;
use uom::si::length::meter;

use crate::network::{RoadNetwork, VertexId};

use super::{PolygonKind, PolygonRecord, ZoneError, ZoneId};

type IndexedVertex = GeomWithData<[f64; 2], usize>;

/// binds every zone and checkpoint polygon to exactly one road network
/// vertex: the vertex closest by planar distance to the polygon's centroid.
///
/// built once at startup from the zonification file and shared read-only by
/// all row computations. a polygon whose centroid cannot be bound (empty
/// geometry, or nothing within the snap tolerance) is simply absent from the
/// binding; rows touching it route to no-path downstream.
pub struct ZoneBinding {
    zones: HashMap<ZoneId, VertexId>,
    checkpoints: HashMap<String, VertexId>,
}

impl ZoneBinding {
    /// `max_snap_distance` optionally rejects bindings whose nearest vertex
    /// is farther than the tolerance from the centroid.
    pub fn new(
        records: &[PolygonRecord],
        network: &RoadNetwork,
        max_snap_distance: Option<Length>,
    ) -> Result<ZoneBinding, ZoneError> {
        if network.n_vertices() == 0 {
            return Err(ZoneError::Build(
                "cannot bind zones to an empty road network".to_string(),
            ));
        }
        let tree = RTree::bulk_load(
            network
                .vertices()
                .iter()
                .map(|v| IndexedVertex::new([v.x, v.y], v.vertex_id.0))
                .collect(),
        );
        let max_snap_m = max_snap_distance.map(|d| d.get::<meter>());

        let mut zones: HashMap<ZoneId, VertexId> = HashMap::new();
        let mut checkpoints: HashMap<String, VertexId> = HashMap::new();
        let mut n_unbound = 0;
        for record in records.iter() {
            let vertex_id = match nearest_vertex(&tree, record, max_snap_m) {
                Some(v) => v,
                None => {
                    n_unbound += 1;
                    log::warn!(
                        "polygon '{}' could not be bound to a network vertex",
                        record.id
                    );
                    continue;
                }
            };
            match record.kind {
                PolygonKind::Zone => {
                    let zone_id = ZoneId::new(&record.id);
                    if let Some(prev) = zones.insert(zone_id.clone(), vertex_id) {
                        return Err(ZoneError::Build(format!(
                            "zone id '{zone_id}' appears more than once (previously bound to vertex {prev})"
                        )));
                    }
                }
                PolygonKind::Checkpoint => {
                    let checkpoint_id = record.id.trim().to_string();
                    if let Some(prev) = checkpoints.insert(checkpoint_id.clone(), vertex_id) {
                        return Err(ZoneError::Build(format!(
                            "checkpoint id '{checkpoint_id}' appears more than once (previously bound to vertex {prev})"
                        )));
                    }
                }
            }
        }
        if n_unbound > 0 {
            log::warn!("{n_unbound} polygons left unbound");
        }
        log::info!(
            "bound {} zones and {} checkpoints to network vertices",
            zones.len(),
            checkpoints.len()
        );
        Ok(ZoneBinding { zones, checkpoints })
    }

    pub fn vertex_for_zone(&self, zone_id: &ZoneId) -> Option<VertexId> {
        self.zones.get(zone_id).copied()
    }

    pub fn vertex_for_checkpoint(&self, checkpoint_id: &str) -> Option<VertexId> {
        self.checkpoints.get(checkpoint_id.trim()).copied()
    }

    pub fn n_zones(&self) -> usize {
        self.zones.len()
    }

    pub fn n_checkpoints(&self) -> usize {
        self.checkpoints.len()
    }
}

fn nearest_vertex(
    tree: &RTree<IndexedVertex>,
    record: &PolygonRecord,
    max_snap_m: Option<f64>,
) -> Option<VertexId> {
    let centroid = record.geometry.centroid()?;
    let nearest = tree.nearest_neighbor(&[centroid.x(), centroid.y()])?;
    if let Some(tolerance_m) = max_snap_m {
        let [x, y] = *nearest.geom();
        let distance_m = ((x - centroid.x()).powi(2) + (y - centroid.y()).powi(2)).sqrt();
        if distance_m > tolerance_m {
            return None;
        }
    }
    Some(VertexId(nearest.data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{NetworkEdge, NetworkVertex};
    use geo::{polygon, Geometry};

    fn square_around(x: f64, y: f64, half: f64) -> Geometry<f64> {
        Geometry::Polygon(polygon![
            (x: x - half, y: y - half),
            (x: x + half, y: y - half),
            (x: x + half, y: y + half),
            (x: x - half, y: y + half),
            (x: x - half, y: y - half),
        ])
    }

    fn two_vertex_network() -> RoadNetwork {
        let vertices = vec![
            NetworkVertex::new(0, 0.0, 0.0),
            NetworkVertex::new(1, 1000.0, 0.0),
        ];
        let edges = vec![
            NetworkEdge::new(0, 1, 1000.0),
            NetworkEdge::new(1, 0, 1000.0),
        ];
        RoadNetwork::new(vertices, edges).expect("valid network")
    }

    #[test]
    fn test_binds_centroid_to_nearest_vertex() {
        let network = two_vertex_network();
        let records = vec![
            PolygonRecord {
                id: "1001".to_string(),
                kind: PolygonKind::Zone,
                geometry: square_around(100.0, 50.0, 50.0),
            },
            PolygonRecord {
                id: "2003".to_string(),
                kind: PolygonKind::Checkpoint,
                geometry: square_around(950.0, 0.0, 10.0),
            },
        ];
        let binding = ZoneBinding::new(&records, &network, None).expect("binding built");
        assert_eq!(
            binding.vertex_for_zone(&ZoneId::new("1001")),
            Some(VertexId(0))
        );
        assert_eq!(binding.vertex_for_checkpoint("2003"), Some(VertexId(1)));
        assert_eq!(binding.vertex_for_zone(&ZoneId::new("9999")), None);
    }

    #[test]
    fn test_snap_tolerance_rejects_distant_centroids() {
        let network = two_vertex_network();
        let records = vec![PolygonRecord {
            id: "1001".to_string(),
            kind: PolygonKind::Zone,
            geometry: square_around(0.0, 5000.0, 10.0),
        }];
        let tolerance = Length::new::<meter>(100.0);
        let binding =
            ZoneBinding::new(&records, &network, Some(tolerance)).expect("binding built");
        assert_eq!(binding.vertex_for_zone(&ZoneId::new("1001")), None);
    }

    #[test]
    fn test_duplicate_zone_id_is_a_build_error() {
        let network = two_vertex_network();
        let records = vec![
            PolygonRecord {
                id: "1001".to_string(),
                kind: PolygonKind::Zone,
                geometry: square_around(0.0, 0.0, 10.0),
            },
            PolygonRecord {
                id: "1001".to_string(),
                kind: PolygonKind::Zone,
                geometry: square_around(1000.0, 0.0, 10.0),
            },
        ];
        assert!(ZoneBinding::new(&records, &network, None).is_err());
    }
}
