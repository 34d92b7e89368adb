mod aforo_app;
mod error;
mod run;
mod run_config;

pub use aforo_app::{AforoApp, AforoOperation};
pub use error::AppError;
pub use run_config::RunConfig;
