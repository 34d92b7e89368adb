use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("failure reading file from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse '{path}' due to: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("missing columns {columns:?} in OD file '{path}'")]
    MissingColumns { columns: Vec<String>, path: PathBuf },
    #[error("failure writing '{path}': {message}")]
    Write { path: PathBuf, message: String },
    #[error("failure running pipeline: {0}")]
    Build(String),
}
