mod context;
mod error;
mod points_service;
mod registration_service;
mod summary;
mod volume_service;


pub use context::AppContext;
pub use error::{AppError, Result};
pub use points_service::PointsService;
pub use registration_service::RegistrationService;
pub use summary::{LayerSummary, PointsSummary};
pub use volume_service::{LAYERS_MANIFEST, VolumeService};
