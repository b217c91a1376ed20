use std::path::Path;

use super::{IoError, Result};

pub(crate) fn extension(path: &Path) -> Result<String> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| value.to_ascii_lowercase())
        .ok_or_else(|| IoError::UnsupportedFormat(path.to_string_lossy().to_string()))?;
    Ok(ext)
}
