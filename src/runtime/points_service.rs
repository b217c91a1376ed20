use std::path::{Path, PathBuf};

use crate::points::{read_cells, write_cells};

use super::{PointsSummary, Result};

#[derive(Debug, Default, Clone, Copy)]
pub struct PointsService;

impl PointsService {
    pub fn info(&self, path: impl AsRef<Path>) -> Result<PointsSummary> {
        let path = path.as_ref();
        let cells = read_cells(path)?;
        Ok(PointsSummary::new(path.display().to_string(), &cells))
    }

    /// Re-encodes a points file in the format implied by `output`. Returns
    /// `None` when the input holds no points.
    pub fn convert(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<Option<PathBuf>> {
        let cells = read_cells(input)?;
        Ok(write_cells(output, &cells)?)
    }
}
