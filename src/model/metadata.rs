use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::AnatomicalSpace;

/// Registration settings recorded next to a registration output.
///
/// `orientation` and `voxel_sizes` describe the raw sample, not the atlas.
/// Voxel sizes are in the same physical unit as the atlas resolution and are
/// ordered like the sample's dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationMetadata {
    pub atlas: String,
    pub orientation: AnatomicalSpace,
    #[serde(deserialize_with = "deserialize_voxel_sizes")]
    pub voxel_sizes: [f64; 3],
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signal_planes_paths: Vec<String>,
    #[serde(flatten)]
    pub extras: BTreeMap<String, serde_json::Value>,
}

impl RegistrationMetadata {
    pub fn new(atlas: impl Into<String>, orientation: AnatomicalSpace, voxel_sizes: [f64; 3]) -> Self {
        Self {
            atlas: atlas.into(),
            orientation,
            voxel_sizes,
            signal_planes_paths: Vec::new(),
            extras: BTreeMap::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

// Registration tools have written voxel sizes both as numbers and as strings.
fn deserialize_voxel_sizes<'de, D>(deserializer: D) -> std::result::Result<[f64; 3], D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<NumberOrText>::deserialize(deserializer)?;
    if raw.len() != 3 {
        return Err(serde::de::Error::invalid_length(
            raw.len(),
            &"exactly three voxel sizes",
        ));
    }
    let mut sizes = [0.0; 3];
    for (index, value) in raw.into_iter().enumerate() {
        sizes[index] = match value {
            NumberOrText::Number(number) => number,
            NumberOrText::Text(text) => text.trim().parse::<f64>().map_err(|_| {
                serde::de::Error::custom(format!("voxel size `{text}` is not a number"))
            })?,
        };
    }
    Ok(sizes)
}
