use std::collections::HashMap;
use std::path::Path;

use geo::{Geometry, LineString};

use super::{NetworkEdge, NetworkError, NetworkVertex, RoadNetwork, VertexId};

/// reads a road network from a GeoJSON FeatureCollection of LineString
/// features whose coordinates are in a single metric projection.
///
/// every LineString coordinate becomes a vertex keyed by its rounded
/// coordinate pair, and each consecutive coordinate pair becomes an edge with
/// planar Euclidean length. features are treated as bidirectional unless a
/// truthy `oneway` property is present.
pub fn read_network_geojson(
    network_file: &Path,
    allow_geographic_coordinates: bool,
) -> Result<RoadNetwork, NetworkError> {
    let geojson_str = std::fs::read_to_string(network_file).map_err(|e| NetworkError::Read {
        path: network_file.to_path_buf(),
        source: e,
    })?;
    let geojson_value = geojson_str
        .parse::<geojson::GeoJson>()
        .map_err(|e| NetworkError::Parse {
            path: network_file.to_path_buf(),
            message: e.to_string(),
        })?;

    let feature_collection = match geojson_value {
        geojson::GeoJson::FeatureCollection(fc) => fc,
        _ => {
            return Err(NetworkError::Parse {
                path: network_file.to_path_buf(),
                message: "geojson in network file must be a FeatureCollection".to_string(),
            })
        }
    };

    let mut vertices: Vec<NetworkVertex> = vec![];
    let mut vertex_lookup: HashMap<String, usize> = HashMap::new();
    let mut edges: Vec<NetworkEdge> = vec![];

    for (n, feature) in feature_collection.features.iter().enumerate() {
        let geom_json = match feature.geometry.clone() {
            Some(g) => g,
            None => {
                log::warn!("network feature {n} has no geometry, skipping");
                continue;
            }
        };
        let geometry: Geometry = geom_json.try_into().map_err(|e| NetworkError::Parse {
            path: network_file.to_path_buf(),
            message: format!("failure decoding geometry of network feature {n}: {e}"),
        })?;
        let linestring: LineString = match geometry {
            Geometry::LineString(ls) => ls,
            other => {
                log::warn!(
                    "network feature {n} is not a LineString ({other:?} found), skipping"
                );
                continue;
            }
        };
        let oneway = is_oneway(feature);

        for segment in linestring.0.windows(2) {
            let (a, b) = (segment[0], segment[1]);
            let src = upsert_vertex(&mut vertices, &mut vertex_lookup, a.x, a.y);
            let dst = upsert_vertex(&mut vertices, &mut vertex_lookup, b.x, b.y);
            let distance_m = ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt();
            if distance_m == 0.0 || src == dst {
                continue;
            }
            edges.push(NetworkEdge {
                src_vertex_id: VertexId(src),
                dst_vertex_id: VertexId(dst),
                distance_m,
            });
            if !oneway {
                edges.push(NetworkEdge {
                    src_vertex_id: VertexId(dst),
                    dst_vertex_id: VertexId(src),
                    distance_m,
                });
            }
        }
    }

    if !allow_geographic_coordinates && looks_geographic(&vertices) {
        return Err(NetworkError::CoordinateSystem(format!(
            "all {} vertices fall inside lon/lat degree ranges; reproject the network into a \
             metric CRS or set allow_geographic_coordinates = true",
            vertices.len()
        )));
    }

    log::info!(
        "loaded road network with {} vertices and {} directed edges",
        vertices.len(),
        edges.len()
    );
    RoadNetwork::new(vertices, edges)
}

/// vertices are merged on their coordinates rounded to 1e-6; in a metric CRS
/// that is a micrometre, far below any real node spacing.
fn coordinate_key(x: f64, y: f64) -> String {
    format!("{x:.6},{y:.6}")
}

fn upsert_vertex(
    vertices: &mut Vec<NetworkVertex>,
    vertex_lookup: &mut HashMap<String, usize>,
    x: f64,
    y: f64,
) -> usize {
    let key = coordinate_key(x, y);
    match vertex_lookup.get(&key) {
        Some(&index) => index,
        None => {
            let index = vertices.len();
            vertices.push(NetworkVertex::new(index, x, y));
            vertex_lookup.insert(key, index);
            index
        }
    }
}

fn is_oneway(feature: &geojson::Feature) -> bool {
    match feature.property("oneway") {
        Some(serde_json::Value::Bool(b)) => *b,
        Some(serde_json::Value::String(s)) => {
            matches!(s.trim().to_lowercase().as_str(), "yes" | "true" | "1")
        }
        Some(serde_json::Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        _ => false,
    }
}

/// a network whose every coordinate fits in lon/lat degree ranges was almost
/// certainly not reprojected.
fn looks_geographic(vertices: &[NetworkVertex]) -> bool {
    !vertices.is_empty()
        && vertices
            .iter()
            .all(|v| v.x.abs() <= 180.0 && v.y.abs() <= 90.0)
}
