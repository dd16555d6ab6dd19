use thiserror::Error;

use crate::backend::BackendError;
use crate::ingest::IngestError;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum HazardError {
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Geometry backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, HazardError>;
