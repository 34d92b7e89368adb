use std::path::Path;

use geo::Geometry;

use super::{PolygonKind, PolygonRecord, ZoneError};

/// reads zone and checkpoint polygons from a GeoJSON FeatureCollection.
///
/// `id_property` names the feature property carrying the zone/checkpoint
/// identifier. `kind_property` optionally distinguishes checkpoints from
/// zones (value "checkpoint", any other value or a missing property means
/// zone).
pub fn read_polygons_geojson(
    zones_file: &Path,
    id_property: &str,
    kind_property: &str,
) -> Result<Vec<PolygonRecord>, ZoneError> {
    let geojson_str = std::fs::read_to_string(zones_file).map_err(|e| ZoneError::Read {
        path: zones_file.to_path_buf(),
        source: e,
    })?;
    let geojson_value = geojson_str
        .parse::<geojson::GeoJson>()
        .map_err(|e| ZoneError::Parse {
            path: zones_file.to_path_buf(),
            message: e.to_string(),
        })?;

    let feature_collection = match geojson_value {
        geojson::GeoJson::FeatureCollection(fc) => fc,
        _ => {
            return Err(ZoneError::Parse {
                path: zones_file.to_path_buf(),
                message: "geojson in zones file must be a FeatureCollection".to_string(),
            })
        }
    };

    let mut records = Vec::with_capacity(feature_collection.features.len());
    for (n, feature) in feature_collection.features.iter().enumerate() {
        let id = read_string_property(feature, id_property).ok_or_else(|| {
            ZoneError::Deserialize {
                property: id_property.to_string(),
                path: zones_file.to_path_buf(),
                message: format!("property missing or not readable as text in feature {n}"),
            }
        })?;
        let kind = match read_string_property(feature, kind_property) {
            Some(value) if value.trim().eq_ignore_ascii_case("checkpoint") => {
                PolygonKind::Checkpoint
            }
            _ => PolygonKind::Zone,
        };
        let geom_json = feature
            .geometry
            .clone()
            .ok_or_else(|| ZoneError::Deserialize {
                property: "geometry".to_string(),
                path: zones_file.to_path_buf(),
                message: format!("no geometry in feature {n}"),
            })?;
        let geometry: Geometry = geom_json.try_into().map_err(|e| ZoneError::Deserialize {
            property: "geometry".to_string(),
            path: zones_file.to_path_buf(),
            message: format!("failure decoding geometry for id {id}: {e}"),
        })?;
        records.push(PolygonRecord { id, kind, geometry });
    }

    log::info!(
        "loaded {} polygons ({} checkpoints) from {}",
        records.len(),
        records
            .iter()
            .filter(|r| r.kind == PolygonKind::Checkpoint)
            .count(),
        zones_file.display()
    );
    Ok(records)
}

/// property values may be JSON strings or numbers; both read as text ids.
fn read_string_property(feature: &geojson::Feature, property: &str) -> Option<String> {
    match feature.property(property) {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}
