mod api;
mod error;
mod tiff;
mod util;

#[cfg(test)]
mod tests;

pub use api::{read_volume, supported_formats, write_volume};
pub use error::{IoError, Result};
