mod atlas;
mod detection;
mod error;
mod registration;
mod sample_space;
mod util;

#[cfg(test)]
mod tests;

pub use atlas::{ANNOTATION_FILE, ATLAS_METADATA_FILE, AtlasProvider, LocalAtlasProvider};
pub use detection::{
    CELLS_FILE, DETECTION_METADATA_FILES, is_detection_dir, load_detection_metadata,
    read_detection_dir,
};
pub use error::{ReaderError, Result};
pub use registration::{
    REGISTRATION_METADATA_FILE, is_registration_dir, load_registration_metadata,
    read_registration_dir,
};
pub use sample_space::read_registration_dir_sample_space;
