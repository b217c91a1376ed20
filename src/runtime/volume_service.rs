use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::formats::{read_volume, write_volume};
use crate::model::{LabeledVolume, VolumeData};

use super::{LayerSummary, Result};

/// Layer summaries written next to exported volumes.
pub const LAYERS_MANIFEST: &str = "layers.json";

#[derive(Debug, Default, Clone, Copy)]
pub struct VolumeService;

impl VolumeService {
    pub fn read(&self, path: impl AsRef<Path>) -> Result<VolumeData> {
        Ok(read_volume(path)?)
    }

    pub fn write(&self, path: impl AsRef<Path>, volume: &VolumeData) -> Result<()> {
        write_volume(path, volume)?;
        Ok(())
    }

    /// Writes every volume layer as `<name>.tiff` under `dir`, plus a
    /// `layers.json` manifest covering all layers. Returns the written paths.
    pub fn export_layers(&self, dir: impl AsRef<Path>, layers: &[LabeledVolume]) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let mut used = BTreeSet::new();
        let mut written = Vec::new();
        for layer in layers {
            let Some(volume) = layer.volume() else {
                continue;
            };
            let path = dir.join(format!("{}.tiff", unique_stem(layer.name(), &mut used)));
            self.write(&path, volume)?;
            tracing::info!(layer = layer.name(), path = %path.display(), "exported layer");
            written.push(path);
        }

        let manifest = dir.join(LAYERS_MANIFEST);
        fs::write(&manifest, serde_json::to_string_pretty(&LayerSummary::of(layers))?)?;
        written.push(manifest);
        Ok(written)
    }
}

// Layer names repeat and may contain path separators.
fn unique_stem(name: &str, used: &mut BTreeSet<String>) -> String {
    let base = name
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || matches!(ch, ' ' | '-' | '_' | '(' | ')' | '.') {
                ch
            } else {
                '_'
            }
        })
        .collect::<String>();
    let mut stem = base.clone();
    let mut suffix = 2;
    while !used.insert(stem.clone()) {
        stem = format!("{base}_{suffix}");
        suffix += 1;
    }
    stem
}
