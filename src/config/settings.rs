use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::transform::{
    DEFAULT_SCALE_DECIMALS, DOWNSAMPLED_MARKER, LayerFilter, MAX_SCALE_DECIMALS,
    REGISTERED_IMAGE_NAME, RegistrationNormalizer, sample_space_filter,
};

use super::{ConfigError, Result};

/// Overrides the default atlas root when `atlas_dir` is unset.
pub const ATLAS_DIR_ENV: &str = "BRAINGLOBE_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub atlas_dir: Option<PathBuf>,
    pub scale_decimals: u32,
    pub downsampled_marker: String,
    pub registered_image_name: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            atlas_dir: None,
            scale_decimals: DEFAULT_SCALE_DECIMALS,
            downsampled_marker: DOWNSAMPLED_MARKER.to_string(),
            registered_image_name: REGISTERED_IMAGE_NAME.to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.scale_decimals > MAX_SCALE_DECIMALS {
            return Err(ConfigError::Invalid(format!(
                "scale_decimals must be at most {MAX_SCALE_DECIMALS}, found {}",
                self.scale_decimals
            )));
        }
        for (field, value) in [
            ("downsampled_marker", &self.downsampled_marker),
            ("registered_image_name", &self.registered_image_name),
            ("log_filter", &self.log_filter),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }

    /// `atlas_dir`, then `$BRAINGLOBE_DIR`, then `$HOME/.brainglobe`.
    pub fn atlas_root(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.atlas_dir {
            return Some(dir.clone());
        }
        if let Some(dir) = env::var_os(ATLAS_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Some(PathBuf::from(dir));
        }
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".brainglobe"))
    }

    pub fn layer_filter(&self) -> LayerFilter {
        sample_space_filter(&self.downsampled_marker, &self.registered_image_name)
    }

    /// Normalizer keeping only sample-space layers, rounding scales as configured.
    pub fn normalizer(&self) -> RegistrationNormalizer {
        RegistrationNormalizer::new()
            .with_filter(self.layer_filter())
            .with_scale_decimals(self.scale_decimals)
    }
}

/// Reads YAML for `.yaml`/`.yml`, JSON otherwise. Missing fields take defaults.
pub fn load_settings(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let settings = if matches!(extension.as_str(), "yaml" | "yml") {
        serde_yaml::from_str::<Settings>(&raw)?
    } else {
        serde_json::from_str::<Settings>(&raw)?
    };
    settings.validate()?;
    Ok(settings)
}
