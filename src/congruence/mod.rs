mod classification;
mod congruence_class;
mod scoring;

pub use classification::classify;
pub use congruence_class::Congruence;
pub use scoring::{capacity_score, detour_ratio};
