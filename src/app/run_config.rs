use serde::{Deserialize, Serialize};

/// TOML run configuration: input locations plus the knobs that vary between
/// survey deliverables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// GeoJSON road network in a metric projection.
    pub network_file: String,
    /// GeoJSON zonification polygons (zones and checkpoints).
    pub zones_file: String,
    /// gauging capacity CSV.
    pub capacity_file: String,
    /// optional CSV of permitted sense codes per checkpoint.
    pub sense_catalogue_file: Option<String>,
    /// filename prefix announcing a checkpoint OD file, e.g. "checkpoint" in
    /// checkpoint2003.csv.
    #[serde(default = "default_checkpoint_prefix")]
    pub checkpoint_prefix: String,
    /// feature property carrying the zone/checkpoint identifier.
    #[serde(default = "default_id_property")]
    pub zone_id_property: String,
    /// feature property distinguishing checkpoint polygons from zones.
    #[serde(default = "default_kind_property")]
    pub poly_type_property: String,
    /// accept networks whose coordinates look like lon/lat degrees. off by
    /// default: bearings and lengths assume meters.
    #[serde(default)]
    pub allow_geographic_coordinates: bool,
    /// maximum distance in meters between a polygon centroid and its nearest
    /// network vertex; farther centroids stay unbound.
    pub max_snap_distance_m: Option<f64>,
    /// worker thread count; defaults to the rayon global default.
    pub parallelism: Option<usize>,
    /// also write a wide diagnostics CSV next to each vehicle table.
    #[serde(default)]
    pub write_diagnostics: bool,
}

fn default_checkpoint_prefix() -> String {
    "checkpoint".to_string()
}

fn default_id_property() -> String {
    "zone_id".to_string()
}

fn default_kind_property() -> String {
    "poly_type".to_string()
}
