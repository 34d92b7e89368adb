use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ZoneError {
    #[error("failure reading file from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse '{path}' due to: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("failed to deserialize property {property} in file '{path}' due to: {message}")]
    Deserialize {
        property: String,
        path: PathBuf,
        message: String,
    },
    #[error("failure building zone binding: {0}")]
    Build(String),
}
