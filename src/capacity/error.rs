use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum CapacityError {
    #[error("failure reading file from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse '{path}' due to: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("missing columns {columns:?} in capacity file '{path}'")]
    MissingColumns { columns: Vec<String>, path: PathBuf },
    #[error("failure building capacity index: {0}")]
    Build(String),
}
