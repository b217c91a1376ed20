use std::path::Path;

use crate::model::VolumeData;

use super::tiff::{read_tiff, write_tiff};
use super::util::extension;
use super::{IoError, Result};

/// Reads a volume, keeping its sample type. Multi-page files stack their
/// pages along axis 0.
pub fn read_volume(path: impl AsRef<Path>) -> Result<VolumeData> {
    let path = path.as_ref();
    let extension = extension(path)?;
    match extension.as_str() {
        "tif" | "tiff" => read_tiff(path),
        other => Err(IoError::UnsupportedFormat(other.to_string())),
    }
}

pub fn write_volume(path: impl AsRef<Path>, volume: &VolumeData) -> Result<()> {
    let path = path.as_ref();
    let extension = extension(path)?;
    match extension.as_str() {
        "tif" | "tiff" => write_tiff(path, volume),
        other => Err(IoError::UnsupportedFormat(other.to_string())),
    }
}

pub fn supported_formats() -> &'static [&'static str] {
    &["tif", "tiff"]
}
