use std::path::PathBuf;

use crate::formats::IoError;
use crate::model::CoreError;
use crate::points::PointsError;
use crate::transform::TransformError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReaderError>;

#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("expected file is missing: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("no atlas named `{name}` under {}", .root.display())]
    AtlasNotFound { name: String, root: PathBuf },

    #[error("no atlas directory configured and HOME is not set")]
    AtlasRootUnavailable,

    #[error("invalid metadata in {}: {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("reader I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("volume read failure: {0}")]
    Volume(#[from] IoError),

    #[error("normalization failure: {0}")]
    Transform(#[from] TransformError),

    #[error("points read failure: {0}")]
    Points(#[from] PointsError),

    #[error("invalid atlas: {0}")]
    Core(#[from] CoreError),
}
