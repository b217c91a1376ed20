use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::model::{Blending, Cell, CellType, LabeledVolume, LayerData, LayerKind, PixelType};

/// What a viewer would be handed for one layer, minus the voxels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSummary {
    pub name: String,
    pub kind: LayerKind,
    pub shape: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_type: Option<PixelType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CellType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub feature_keys: Vec<String>,
    pub visible: bool,
    pub opacity: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blending: Option<Blending>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atlas: Option<String>,
}

impl From<&LabeledVolume> for LayerSummary {
    fn from(layer: &LabeledVolume) -> Self {
        let (pixel_type, category, feature_keys) = match layer.data() {
            LayerData::Volume(volume) => (Some(volume.pixel_type()), None, Vec::new()),
            LayerData::Points(points) => (
                None,
                Some(points.category()),
                points.feature_keys().into_iter().map(str::to_string).collect(),
            ),
        };
        let attributes = layer.attributes();
        Self {
            name: layer.name().to_string(),
            kind: layer.kind(),
            shape: layer.shape(),
            pixel_type,
            category,
            feature_keys,
            visible: attributes.visible,
            opacity: attributes.opacity,
            blending: attributes.blending,
            scale: attributes.scale,
            atlas: layer.atlas().map(|atlas| atlas.name().to_string()),
        }
    }
}

impl LayerSummary {
    pub fn of(layers: &[LabeledVolume]) -> Vec<Self> {
        layers.iter().map(Self::from).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointsSummary {
    pub path: String,
    pub total: usize,
    /// Point count per category name.
    pub categories: BTreeMap<String, usize>,
    pub metadata_keys: Vec<String>,
}

impl PointsSummary {
    pub fn new(path: impl Into<String>, cells: &[Cell]) -> Self {
        let mut categories = BTreeMap::new();
        let mut keys = BTreeSet::new();
        for cell in cells {
            *categories
                .entry(format!("{:?}", cell.category()))
                .or_insert(0) += 1;
            keys.extend(cell.metadata().keys().cloned());
        }
        Self {
            path: path.into(),
            total: cells.len(),
            categories,
            metadata_keys: keys.into_iter().collect(),
        }
    }
}
