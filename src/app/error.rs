use crate::capacity::CapacityError;
use crate::network::NetworkError;
use crate::pipeline::PipelineError;
use crate::zone::ZoneError;

/// construction failures are fatal and surface here; per-row conditions never
/// reach this type, they are encoded as sentinels in the row output.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("invalid user input: {0}")]
    InvalidUserInput(String),
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error(transparent)]
    Zone(#[from] ZoneError),
    #[error(transparent)]
    Capacity(#[from] CapacityError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}
