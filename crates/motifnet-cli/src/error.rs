use motifnet::data::adapter::AdapterError;
use motifnet::data::archive::ArchiveLoadError;
use motifnet::nn::update::{ConfigError, UpdateError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Dataset(#[from] ArchiveLoadError),

    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error(transparent)]
    LayerConfig(#[from] ConfigError),

    #[error(transparent)]
    Update(#[from] UpdateError),

    #[error("Record '{0}' is not present in the dataset")]
    RecordNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
