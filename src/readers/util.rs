use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::formats::read_volume;
use crate::model::VolumeData;

use super::{ReaderError, Result};

pub(super) fn require_file(dir: &Path, name: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    if path.is_file() {
        Ok(path)
    } else {
        Err(ReaderError::MissingFile(path))
    }
}

pub(super) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|source| ReaderError::Metadata {
        path: path.to_path_buf(),
        source,
    })
}

pub(super) fn read_layer_volume(dir: &Path, name: &str) -> Result<VolumeData> {
    let path = require_file(dir, name)?;
    tracing::debug!(path = %path.display(), "reading volume");
    Ok(read_volume(path)?)
}
