use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::model::{Blending, LabeledVolume, RegistrationMetadata};
use crate::transform::{DOWNSAMPLED_MARKER, REGISTERED_IMAGE_NAME};

use super::util::{read_json, read_layer_volume, require_file};
use super::{AtlasProvider, Result};

pub const REGISTRATION_METADATA_FILE: &str = "brainreg.json";

const DOWNSAMPLED_PREFIX: &str = "downsampled_";
const STANDARD_SPACE_PREFIX: &str = "downsampled_standard";
const VOLUME_SUFFIX: &str = ".tiff";

pub fn is_registration_dir(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    path.is_dir() && path.join(REGISTRATION_METADATA_FILE).is_file()
}

pub fn load_registration_metadata(dir: impl AsRef<Path>) -> Result<RegistrationMetadata> {
    read_json(&require_file(dir.as_ref(), REGISTRATION_METADATA_FILE)?)
}

/// Registration output in atlas space, in display order: extra downsampled
/// channels, the registered image, hemispheres, the atlas annotation and the
/// boundaries.
pub fn read_registration_dir(
    path: impl AsRef<Path>,
    provider: &dyn AtlasProvider,
) -> Result<Vec<LabeledVolume>> {
    let dir = path.as_ref();
    tracing::info!(dir = %dir.display(), "loading registration directory");
    let metadata = Arc::new(load_registration_metadata(dir)?);
    let atlas = Arc::new(provider.load(&metadata.atlas)?);

    let mut layers = additional_downsampled_channels(dir)?;
    layers.push(
        LabeledVolume::image(REGISTERED_IMAGE_NAME, read_layer_volume(dir, "downsampled.tiff")?)
            .with_atlas(Arc::clone(&atlas))
            .with_registration(Arc::clone(&metadata)),
    );
    layers.push(
        LabeledVolume::labels(
            "Hemispheres",
            read_layer_volume(dir, "registered_hemispheres.tiff")?,
        )
        .hidden()
        .with_opacity(0.3),
    );
    let registered_atlas = read_layer_volume(dir, "registered_atlas.tiff")?;
    if registered_atlas.shape() != atlas.shape() {
        tracing::warn!(
            atlas = %metadata.atlas,
            expected = ?atlas.shape(),
            found = ?registered_atlas.shape(),
            "registered atlas does not match the atlas annotation shape"
        );
    }
    layers.push(
        LabeledVolume::labels(metadata.atlas.as_str(), registered_atlas)
        .with_blending(Blending::Additive)
        .with_opacity(0.3)
        .hidden()
        .with_atlas(atlas)
        .with_registration(metadata),
    );
    layers.push(
        LabeledVolume::image("Boundaries", read_layer_volume(dir, "boundaries.tiff")?)
            .with_blending(Blending::Additive)
            .with_opacity(0.5)
            .hidden(),
    );
    Ok(layers)
}

// Channels other than the registered one, still at atlas resolution. Files
// in standard space are skipped.
fn additional_downsampled_channels(dir: &Path) -> Result<Vec<LabeledVolume>> {
    let mut names = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| {
            name.starts_with(DOWNSAMPLED_PREFIX)
                && !name.starts_with(STANDARD_SPACE_PREFIX)
                && name.ends_with(VOLUME_SUFFIX)
        })
        .collect::<Vec<_>>();
    names.sort();

    names
        .iter()
        .map(|name| -> Result<LabeledVolume> {
            let stem = name
                .strip_prefix(DOWNSAMPLED_PREFIX)
                .and_then(|rest| rest.strip_suffix(VOLUME_SUFFIX))
                .unwrap_or(name);
            tracing::info!(file = %name, "found additional downsampled channel");
            let volume = read_layer_volume(dir, name)?;
            Ok(LabeledVolume::image(format!("{stem} {DOWNSAMPLED_MARKER}"), volume).hidden())
        })
        .collect()
}
