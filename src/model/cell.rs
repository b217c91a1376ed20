use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CoreError, Result};

/// Classification of a detected point. The numeric codes are what point
/// files store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum CellType {
    Unknown,
    Cell,
    Artifact,
}

impl CellType {
    pub fn code(self) -> i64 {
        match self {
            CellType::Unknown => 1,
            CellType::Cell => 2,
            CellType::Artifact => 3,
        }
    }

    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            1 => Ok(CellType::Unknown),
            2 => Ok(CellType::Cell),
            3 => Ok(CellType::Artifact),
            other => Err(CoreError::UnknownCategory(other)),
        }
    }
}

impl TryFrom<i64> for CellType {
    type Error = CoreError;

    fn try_from(code: i64) -> Result<Self> {
        Self::from_code(code)
    }
}

impl From<CellType> for i64 {
    fn from(category: CellType) -> Self {
        category.code()
    }
}

/// A single metadata value attached to a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl MetadataValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            MetadataValue::Bool(_) => "bool",
            MetadataValue::Int(_) => "int",
            MetadataValue::Float(_) => "float",
            MetadataValue::Text(_) => "str",
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Bool(value) => write!(formatter, "{value}"),
            MetadataValue::Int(value) => write!(formatter, "{value}"),
            MetadataValue::Float(value) => write!(formatter, "{value}"),
            MetadataValue::Text(value) => formatter.write_str(value),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::Text(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Int(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        MetadataValue::Float(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Bool(value)
    }
}

/// Metadata present on one point. Keys that were never set are absent.
pub type Features = BTreeMap<String, MetadataValue>;

/// Detected point in (x, y, z) file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    position: [f64; 3],
    category: CellType,
    metadata: Features,
}

impl Cell {
    pub fn new(position: [f64; 3], category: CellType, metadata: Features) -> Self {
        Self {
            position,
            category,
            metadata,
        }
    }

    pub fn x(&self) -> f64 {
        self.position[0]
    }

    pub fn y(&self) -> f64 {
        self.position[1]
    }

    pub fn z(&self) -> f64 {
        self.position[2]
    }

    pub fn position(&self) -> [f64; 3] {
        self.position
    }

    /// Position in array order.
    pub fn zyx(&self) -> [f64; 3] {
        [self.position[2], self.position[1], self.position[0]]
    }

    pub fn category(&self) -> CellType {
        self.category
    }

    pub fn metadata(&self) -> &Features {
        &self.metadata
    }
}
