use std::path::PathBuf;

use crate::model::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PointsError>;

#[derive(Debug, Error)]
pub enum PointsError {
    #[error("not a recognized points file: {}", .0.display())]
    UnrecognizedFormat(PathBuf),

    #[error("unknown cell category {0}")]
    UnknownCategory(i64),

    #[error("malformed points file: {0}")]
    Malformed(String),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML failure: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute failure: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("YAML failure: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("point set failure: {0}")]
    Core(CoreError),
}

impl From<CoreError> for PointsError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::UnknownCategory(code) => PointsError::UnknownCategory(code),
            other => PointsError::Core(other),
        }
    }
}
