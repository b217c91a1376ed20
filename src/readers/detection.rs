use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::model::{LabeledVolume, RegistrationMetadata};
use crate::points::load_cell_layers;

use super::sample_space::normalize_registration_dir;
use super::util::read_json;
use super::{AtlasProvider, ReaderError, Result};

/// Metadata file names in order of preference. The second is what older
/// releases of the detection pipeline wrote.
pub const DETECTION_METADATA_FILES: [&str; 2] = ["brainmapper.json", "cellfinder.json"];

/// Classified cells, relative to a detection or channel directory.
pub const CELLS_FILE: &str = "points/cell_classification.xml";

pub fn is_detection_dir(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    path.is_dir()
        && DETECTION_METADATA_FILES
            .iter()
            .any(|name| path.join(name).is_file())
}

pub fn load_detection_metadata(dir: impl AsRef<Path>) -> Result<RegistrationMetadata> {
    let dir = dir.as_ref();
    let path = DETECTION_METADATA_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| ReaderError::MissingFile(dir.join(DETECTION_METADATA_FILES[0])))?;
    read_json(&path)
}

/// Detection output: sample-space registration layers when a `registration`
/// directory exists, followed by "Non cells" and "Cells" point layers, one
/// pair per channel when several signal channels were processed.
pub fn read_detection_dir(
    path: impl AsRef<Path>,
    provider: &dyn AtlasProvider,
    settings: &Settings,
) -> Result<Vec<LabeledVolume>> {
    let dir = path.as_ref();
    tracing::info!(dir = %dir.display(), "loading detection directory");
    let metadata = load_detection_metadata(dir)?;

    let mut layers = Vec::new();
    let registration = dir.join("registration");
    if registration.exists() {
        layers.extend(normalize_registration_dir(
            &registration,
            provider,
            settings,
            &metadata,
        )?);
    }

    if metadata.signal_planes_paths.len() > 1 {
        for channel_dir in channel_dirs(dir)? {
            let channel = channel_name(&channel_dir);
            layers.extend(load_cell_layers(
                channel_dir.join(CELLS_FILE),
                Some(channel.as_str()),
            )?);
        }
    } else {
        layers.extend(load_cell_layers(dir.join(CELLS_FILE), None)?);
    }
    Ok(layers)
}

fn channel_dirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_dir()
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with("channel"))
        })
        .collect::<Vec<_>>();
    dirs.sort();
    Ok(dirs)
}

// `channel_2` is channel "2"; the text after the last underscore.
fn channel_name(dir: &Path) -> String {
    let name = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.rsplit_once('_') {
        Some((_, channel)) => channel.to_string(),
        None => name,
    }
}
