use thiserror::Error;

use crate::model::{AnatomicalAxis, CoreError};

pub type Result<T> = std::result::Result<T, TransformError>;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("sample voxel size along dimension {dim} must be positive, found {value}")]
    ZeroVoxelSize { dim: usize, value: f64 },

    #[error("atlas dimension {atlas_dim} ({axis}) has no matching sample dimension")]
    AxisMismatch {
        atlas_dim: usize,
        axis: AnatomicalAxis,
    },

    #[error("no layer carries a reference atlas")]
    NoAtlasFound,

    #[error("reorientation needs at least 3 dimensions, found shape {shape:?}")]
    NotVolumetric { shape: Vec<usize> },

    #[error("cannot round scale to {0} decimals")]
    InvalidPrecision(u32),

    #[error("orientation failure: {0}")]
    Core(#[from] CoreError),
}
