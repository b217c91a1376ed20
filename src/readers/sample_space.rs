use std::path::Path;

use crate::config::Settings;
use crate::model::{LabeledVolume, RegistrationMetadata};

use super::{AtlasProvider, Result, load_registration_metadata, read_registration_dir};

/// Registration layers reoriented and scaled to overlay the raw sample.
/// Downsampled copies and the registered image are dropped.
pub fn read_registration_dir_sample_space(
    path: impl AsRef<Path>,
    provider: &dyn AtlasProvider,
    settings: &Settings,
) -> Result<Vec<LabeledVolume>> {
    let path = path.as_ref();
    let metadata = load_registration_metadata(path)?;
    normalize_registration_dir(path, provider, settings, &metadata)
}

/// Reads `path` in atlas space, then moves it into the sample space that
/// `metadata` describes.
pub(super) fn normalize_registration_dir(
    path: &Path,
    provider: &dyn AtlasProvider,
    settings: &Settings,
    metadata: &RegistrationMetadata,
) -> Result<Vec<LabeledVolume>> {
    let layers = read_registration_dir(path, provider)?;
    Ok(settings.normalizer().normalize(&layers, metadata)?)
}
