use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum NetworkError {
    #[error("failure reading file from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse '{path}' due to: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("network coordinates are not in a metric projection: {0}")]
    CoordinateSystem(String),
    #[error("failure building road network: {0}")]
    Build(String),
}
