use std::path::{Path, PathBuf};

use ndarray::Array2;

use crate::model::{Cell, CellType, Features, LabeledVolume, PointSet};

use super::{Result, read_cells, write_cells};

pub const NON_CELLS_LAYER: &str = "Non cells";
pub const CELLS_LAYER: &str = "Cells";

fn positions(cells: &[&Cell]) -> Array2<f64> {
    Array2::from_shape_fn((cells.len(), 3), |(row, col)| cells[row].zyx()[col])
}

pub(crate) fn point_set<'a>(
    cells: impl IntoIterator<Item = &'a Cell>,
    category: CellType,
) -> Result<PointSet> {
    let cells = cells.into_iter().collect::<Vec<_>>();
    let features = cells.iter().map(|cell| cell.metadata().clone()).collect();
    Ok(PointSet::new(category, positions(&cells), features)?)
}

/// (z, y, x) positions of the cells and of the non-cells (`Unknown`).
/// Other categories appear in neither array.
pub fn cell_arrays(cells: &[Cell]) -> (Array2<f64>, Array2<f64>) {
    let select = |category| {
        cells
            .iter()
            .filter(|cell| cell.category() == category)
            .collect::<Vec<_>>()
    };
    (
        positions(&select(CellType::Cell)),
        positions(&select(CellType::Unknown)),
    )
}

/// Per-point metadata of the cells in `category`, in file order. Only keys
/// present on a point appear in its map.
pub fn cell_features(cells: &[Cell], category: CellType) -> Vec<Features> {
    cells
        .iter()
        .filter(|cell| cell.category() == category)
        .map(|cell| cell.metadata().clone())
        .collect()
}

/// Point layers for a points file: "Non cells" then "Cells", prefixed with
/// `channel_<n>: ` when a channel is given.
pub fn load_cell_layers(path: impl AsRef<Path>, channel: Option<&str>) -> Result<Vec<LabeledVolume>> {
    let cells = read_cells(path)?;
    let prefix = channel
        .map(|channel| format!("channel_{channel}: "))
        .unwrap_or_default();

    let skipped = cells
        .iter()
        .filter(|cell| !matches!(cell.category(), CellType::Cell | CellType::Unknown))
        .count();
    if skipped > 0 {
        tracing::debug!(skipped, "points outside Cells and Non cells are not shown");
    }

    [(CellType::Unknown, NON_CELLS_LAYER), (CellType::Cell, CELLS_LAYER)]
        .into_iter()
        .map(|(category, name)| -> Result<LabeledVolume> {
            let group = cells.iter().filter(|cell| cell.category() == category);
            let points = point_set(group, category)?;
            Ok(LabeledVolume::points(format!("{prefix}{name}"), points))
        })
        .collect()
}

/// Cells of a point layer; positions go back to (x, y, z) order.
pub fn layer_to_cells(points: &PointSet, category: CellType) -> Vec<Cell> {
    points
        .positions()
        .rows()
        .into_iter()
        .zip(points.features())
        .map(|(row, features)| Cell::new([row[2], row[1], row[0]], category, features.clone()))
        .collect()
}

/// Merges every Cells and Non cells point layer into one file at `path`.
///
/// Returns the written path, or nothing when no layer holds a point.
pub fn write_point_layers(path: impl AsRef<Path>, layers: &[LabeledVolume]) -> Result<Vec<PathBuf>> {
    let cells = layers
        .iter()
        .filter_map(LabeledVolume::point_set)
        .filter(|points| matches!(points.category(), CellType::Cell | CellType::Unknown))
        .flat_map(|points| layer_to_cells(points, points.category()))
        .collect::<Vec<_>>();
    Ok(write_cells(path, &cells)?.into_iter().collect())
}
