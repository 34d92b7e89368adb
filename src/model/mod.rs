mod sense;
mod vehicle_class;

pub use sense::{Cardinal, SenseCode};
pub use vehicle_class::VehicleClass;
