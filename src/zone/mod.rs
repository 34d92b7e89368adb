mod binding;
mod error;
mod loader;
mod record;
mod zone_id;

pub use binding::ZoneBinding;
pub use error::ZoneError;
pub use loader::read_polygons_geojson;
pub use record::{PolygonKind, PolygonRecord};
pub use zone_id::ZoneId;
