use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::config::Settings;
use crate::model::{AnatomicalSpace, ReferenceAtlas};

use super::util::{read_json, read_layer_volume, require_file};
use super::{ReaderError, Result};

pub const ATLAS_METADATA_FILE: &str = "metadata.json";
pub const ANNOTATION_FILE: &str = "annotation.tiff";

/// Source of reference atlases by name.
pub trait AtlasProvider {
    fn load(&self, name: &str) -> Result<ReferenceAtlas>;
}

#[derive(Debug, Deserialize)]
struct AtlasMetadata {
    name: String,
    orientation: AnatomicalSpace,
    resolution: [f64; 3],
}

/// Atlases unpacked under one directory, either as `<root>/<name>` or as
/// versioned `<root>/<name>_v<version>` directories.
#[derive(Debug, Clone)]
pub struct LocalAtlasProvider {
    root: PathBuf,
}

impl LocalAtlasProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings
            .atlas_root()
            .map(Self::new)
            .ok_or(ReaderError::AtlasRootUnavailable)
    }

    /// Directory holding atlas `name`. With several versions the highest
    /// sorting one wins.
    pub fn locate(&self, name: &str) -> Result<PathBuf> {
        let exact = self.root.join(name);
        if exact.join(ATLAS_METADATA_FILE).is_file() {
            return Ok(exact);
        }

        let prefix = format!("{name}_v");
        let mut versions = match fs::read_dir(&self.root) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| {
                    path.file_name()
                        .and_then(|file| file.to_str())
                        .is_some_and(|file| file.starts_with(&prefix))
                        && path.join(ATLAS_METADATA_FILE).is_file()
                })
                .collect::<Vec<_>>(),
            Err(_) => Vec::new(),
        };
        versions.sort();
        versions.pop().ok_or_else(|| ReaderError::AtlasNotFound {
            name: name.to_string(),
            root: self.root.clone(),
        })
    }
}

impl AtlasProvider for LocalAtlasProvider {
    fn load(&self, name: &str) -> Result<ReferenceAtlas> {
        let dir = self.locate(name)?;
        let metadata: AtlasMetadata = read_json(&require_file(&dir, ATLAS_METADATA_FILE)?)?;
        let annotation = read_layer_volume(&dir, ANNOTATION_FILE)?;
        tracing::info!(
            atlas = %metadata.name,
            dir = %dir.display(),
            orientation = %metadata.orientation,
            "loaded reference atlas"
        );
        Ok(ReferenceAtlas::new(
            metadata.name,
            metadata.orientation,
            metadata.resolution,
            annotation,
        )?)
    }
}
