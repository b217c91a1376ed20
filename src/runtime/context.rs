use crate::config::Settings;

use super::{PointsService, RegistrationService, VolumeService};

#[derive(Debug, Clone, Default)]
pub struct AppContext {
    settings: Settings,
    points_service: PointsService,
    registration_service: RegistrationService,
    volume_service: VolumeService,
}

impl AppContext {
    pub fn new(settings: Settings) -> Self {
        Self {
            registration_service: RegistrationService::new(settings.clone()),
            settings,
            points_service: PointsService,
            volume_service: VolumeService,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn points_service(&self) -> &PointsService {
        &self.points_service
    }

    pub fn registration_service(&self) -> &RegistrationService {
        &self.registration_service
    }

    pub fn volume_service(&self) -> &VolumeService {
        &self.volume_service
    }
}
