use thiserror::Error;

use super::AnatomicalAxis;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid orientation code `{code}`: {reason}")]
    InvalidOrientationCode { code: String, reason: String },

    #[error("spaces `{from}` and `{to}` do not share the {missing} axis")]
    IncompatibleSpaces {
        from: String,
        to: String,
        missing: AnatomicalAxis,
    },

    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("unknown cell category {0}")]
    UnknownCategory(i64),

    #[error("point positions must have shape [N, 3], found {shape:?}")]
    InvalidPointShape { shape: Vec<usize> },

    #[error("point set has {positions} positions but {features} feature rows")]
    FeatureCountMismatch { positions: usize, features: usize },
}
