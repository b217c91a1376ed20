use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::{Cell, CellType, PointSet};

use super::layers::point_set;
use super::{PointsError, Result, xml, yaml};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointsFormat {
    Xml,
    Yaml,
}

fn format_of(path: &Path) -> Option<PointsFormat> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "xml" => Some(PointsFormat::Xml),
        "yaml" | "yml" => Some(PointsFormat::Yaml),
        _ => None,
    }
}

/// Cell counter XML file, judged by extension and root element.
pub fn is_points_xml(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    format_of(path) == Some(PointsFormat::Xml)
        && fs::read_to_string(path).is_ok_and(|text| xml::has_root(&text))
}

pub fn is_points_yaml(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    format_of(path) == Some(PointsFormat::Yaml)
        && fs::read_to_string(path).is_ok_and(|text| yaml::is_cells_document(&text))
}

/// Decodes every cell in a points file, in file order.
pub fn read_cells(path: impl AsRef<Path>) -> Result<Vec<Cell>> {
    let path = path.as_ref();
    let format =
        format_of(path).ok_or_else(|| PointsError::UnrecognizedFormat(path.to_path_buf()))?;
    let text = fs::read_to_string(path)?;
    let cells = match format {
        PointsFormat::Xml => {
            if !xml::has_root(&text) {
                return Err(PointsError::UnrecognizedFormat(path.to_path_buf()));
            }
            xml::decode(&text)?
        }
        PointsFormat::Yaml => yaml::decode(&text)?,
    };
    tracing::debug!(path = %path.display(), count = cells.len(), "read cells");
    Ok(cells)
}

/// Decodes a points file into one point set per category present, with
/// positions in (z, y, x) order.
pub fn read_points(path: impl AsRef<Path>) -> Result<BTreeMap<CellType, PointSet>> {
    let cells = read_cells(path)?;
    let mut by_category: BTreeMap<CellType, Vec<&Cell>> = BTreeMap::new();
    for cell in &cells {
        by_category.entry(cell.category()).or_default().push(cell);
    }
    by_category
        .into_iter()
        .map(|(category, group)| -> Result<(CellType, PointSet)> {
            Ok((category, point_set(group, category)?))
        })
        .collect()
}

/// Writes `cells` in the format implied by the extension of `path`.
///
/// Returns `None` without touching the filesystem when `cells` is empty.
pub fn write_cells(path: impl AsRef<Path>, cells: &[Cell]) -> Result<Option<PathBuf>> {
    let path = path.as_ref();
    let format =
        format_of(path).ok_or_else(|| PointsError::UnrecognizedFormat(path.to_path_buf()))?;
    if cells.is_empty() {
        tracing::info!(path = %path.display(), "no cells to write");
        return Ok(None);
    }
    match format {
        PointsFormat::Xml => fs::write(path, xml::encode(cells)?)?,
        PointsFormat::Yaml => fs::write(path, yaml::encode(cells)?)?,
    }
    tracing::info!(path = %path.display(), count = cells.len(), "wrote cells");
    Ok(Some(path.to_path_buf()))
}
