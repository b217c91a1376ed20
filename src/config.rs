mod error;
mod settings;

#[cfg(test)]
mod tests;

pub use error::{ConfigError, Result};
pub use settings::{ATLAS_DIR_ENV, Settings, load_settings};
