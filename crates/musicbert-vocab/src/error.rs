use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VocabError {
    #[error("Both a CSV folder and a feature name must be provided to infer a vocabulary")]
    MissingSource,

    #[error("CSV folder not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Column '{column}' not found in {file}")]
    MissingColumn { file: PathBuf, column: String },

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Failed to list CSV folder: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    #[error("Compound shape error: {0}")]
    Compound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VocabError>;
