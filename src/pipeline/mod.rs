mod driver;
mod error;
mod od_row;
mod output;
mod reader;

pub use driver::{process_checkpoint_rows, process_general_rows, CheckpointContext};
pub use error::PipelineError;
pub use od_row::OdRow;
pub use output::{write_diagnostics_csv, write_vehicle_csv, OutputRecord};
pub use reader::{query_kind_from_filename, read_od_csv, trips_person_from_raw, QueryKind, RawOdRecord};
