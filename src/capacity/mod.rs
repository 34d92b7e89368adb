mod catalogue;
mod error;
mod index;
mod raw_record;
mod record;

pub use catalogue::{read_catalogue_csv, CatalogueRecord, SenseCatalogue};
pub use error::CapacityError;
pub use index::{read_capacity_csv, CapacityIndex, CheckpointClass};
pub use raw_record::RawCapacityRecord;
pub use record::CapacityRecord;
