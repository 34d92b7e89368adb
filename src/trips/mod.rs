mod disaggregation_ops;

pub use disaggregation_ops::{disaggregate, VehicleTrips};
