use std::path::Path;

use crate::config::Settings;
use crate::model::LabeledVolume;
use crate::readers::{
    LocalAtlasProvider, is_detection_dir, is_registration_dir, read_detection_dir,
    read_registration_dir, read_registration_dir_sample_space,
};

use super::{AppError, Result};

#[derive(Debug, Clone, Default)]
pub struct RegistrationService {
    settings: Settings,
}

impl RegistrationService {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn provider(&self) -> Result<LocalAtlasProvider> {
        Ok(LocalAtlasProvider::from_settings(&self.settings)?)
    }

    pub fn read_atlas_space(&self, path: impl AsRef<Path>) -> Result<Vec<LabeledVolume>> {
        let path = path.as_ref();
        require_dir(path, "registration", is_registration_dir(path))?;
        Ok(read_registration_dir(path, &self.provider()?)?)
    }

    pub fn read_sample_space(&self, path: impl AsRef<Path>) -> Result<Vec<LabeledVolume>> {
        let path = path.as_ref();
        require_dir(path, "registration", is_registration_dir(path))?;
        Ok(read_registration_dir_sample_space(
            path,
            &self.provider()?,
            &self.settings,
        )?)
    }

    pub fn read_detection(&self, path: impl AsRef<Path>) -> Result<Vec<LabeledVolume>> {
        let path = path.as_ref();
        require_dir(path, "detection", is_detection_dir(path))?;
        Ok(read_detection_dir(path, &self.provider()?, &self.settings)?)
    }
}

fn require_dir(path: &Path, expected: &'static str, recognized: bool) -> Result<()> {
    if recognized {
        Ok(())
    } else {
        Err(AppError::UnrecognizedDirectory {
            expected,
            path: path.display().to_string(),
        })
    }
}
