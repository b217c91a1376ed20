use crate::config::ConfigError;
use crate::formats::IoError;
use crate::points::PointsError;
use crate::readers::ReaderError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("registration reader error: {0}")]
    Reader(#[from] ReaderError),

    #[error("points service error: {0}")]
    Points(#[from] PointsError),

    #[error("volume service error: {0}")]
    Volume(#[from] IoError),

    #[error("not a {expected} directory: {path}")]
    UnrecognizedDirectory { expected: &'static str, path: String },

    #[error("report serialization failure: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("output I/O failure: {0}")]
    Io(#[from] std::io::Error),
}
