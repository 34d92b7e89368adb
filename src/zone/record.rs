use geo::Geometry;

/// zonification polygons come in two kinds: survey zones and checkpoint
/// gauging stations. files without the distinguishing property are all
/// zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonKind {
    Zone,
    Checkpoint,
}

/// one polygon lifted from the zonification file, before binding to the
/// road network.
#[derive(Debug, Clone)]
pub struct PolygonRecord {
    pub id: String,
    pub kind: PolygonKind,
    pub geometry: Geometry<f64>,
}
