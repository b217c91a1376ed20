//! YAML dialect: a `cells` sequence of `{x, y, z, type, metadata}` entries.
//! Metadata keeps native YAML scalars.

use serde::{Deserialize, Serialize};

use crate::model::{Cell, CellType, Features};

use super::Result;

#[derive(Debug, Serialize, Deserialize)]
struct CellsDocument {
    #[serde(default)]
    cells: Vec<CellRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CellRecord {
    x: f64,
    y: f64,
    z: f64,
    #[serde(rename = "type")]
    category: i64,
    #[serde(default, skip_serializing_if = "Features::is_empty")]
    metadata: Features,
}

pub(crate) fn decode(text: &str) -> Result<Vec<Cell>> {
    let document: CellsDocument = serde_yaml::from_str(text)?;
    document
        .cells
        .into_iter()
        .map(|record| -> Result<Cell> {
            let category = CellType::from_code(record.category)?;
            Ok(Cell::new(
                [record.x, record.y, record.z],
                category,
                record.metadata,
            ))
        })
        .collect()
}

pub(crate) fn encode(cells: &[Cell]) -> Result<String> {
    let document = CellsDocument {
        cells: cells
            .iter()
            .map(|cell| CellRecord {
                x: cell.x(),
                y: cell.y(),
                z: cell.z(),
                category: cell.category().code(),
                metadata: cell.metadata().clone(),
            })
            .collect(),
    };
    Ok(serde_yaml::to_string(&document)?)
}

/// True when `text` parses as a cells document.
pub(crate) fn is_cells_document(text: &str) -> bool {
    serde_yaml::from_str::<serde_yaml::Value>(text)
        .ok()
        .and_then(|value| value.get("cells").map(serde_yaml::Value::is_sequence))
        .unwrap_or(false)
}
