use std::collections::BTreeSet;
use std::sync::Arc;

use ndarray::{Array2, ArcArray, ArrayD, IxDyn};
use serde::{Deserialize, Serialize};

use super::{CellType, CoreError, Features, ReferenceAtlas, RegistrationMetadata, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelType {
    U8,
    U16,
    U32,
    F32,
}

/// Voxel array with its sample type preserved.
///
/// Arrays are reference counted so layers can share data with their source
/// until something needs to write into them.
#[derive(Debug, Clone, PartialEq)]
pub enum VolumeData {
    U8(ArcArray<u8, IxDyn>),
    U16(ArcArray<u16, IxDyn>),
    U32(ArcArray<u32, IxDyn>),
    F32(ArcArray<f32, IxDyn>),
}

/// Applies the same array expression to whichever sample type a
/// [`VolumeData`] holds, keeping the variant.
macro_rules! map_volume {
    ($volume:expr, $array:ident => $body:expr) => {
        match $volume {
            $crate::model::VolumeData::U8($array) => $crate::model::VolumeData::U8($body),
            $crate::model::VolumeData::U16($array) => $crate::model::VolumeData::U16($body),
            $crate::model::VolumeData::U32($array) => $crate::model::VolumeData::U32($body),
            $crate::model::VolumeData::F32($array) => $crate::model::VolumeData::F32($body),
        }
    };
}
pub(crate) use map_volume;

impl VolumeData {
    pub fn shape(&self) -> &[usize] {
        match self {
            VolumeData::U8(array) => array.shape(),
            VolumeData::U16(array) => array.shape(),
            VolumeData::U32(array) => array.shape(),
            VolumeData::F32(array) => array.shape(),
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    pub fn pixel_type(&self) -> PixelType {
        match self {
            VolumeData::U8(_) => PixelType::U8,
            VolumeData::U16(_) => PixelType::U16,
            VolumeData::U32(_) => PixelType::U32,
            VolumeData::F32(_) => PixelType::F32,
        }
    }

    /// True when the two volumes point at the same allocation.
    pub fn shares_data_with(&self, other: &VolumeData) -> bool {
        match (self, other) {
            (VolumeData::U8(left), VolumeData::U8(right)) => same_buffer(left, right),
            (VolumeData::U16(left), VolumeData::U16(right)) => same_buffer(left, right),
            (VolumeData::U32(left), VolumeData::U32(right)) => same_buffer(left, right),
            (VolumeData::F32(left), VolumeData::F32(right)) => same_buffer(left, right),
            _ => false,
        }
    }
}

fn same_buffer<A>(left: &ArcArray<A, IxDyn>, right: &ArcArray<A, IxDyn>) -> bool {
    let left_range = left.as_slice_memory_order().map(|slice| slice.as_ptr_range());
    let right_range = right.as_slice_memory_order().map(|slice| slice.as_ptr_range());
    match (left_range, right_range) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

macro_rules! volume_from {
    ($element:ty, $variant:ident) => {
        impl From<ArrayD<$element>> for VolumeData {
            fn from(array: ArrayD<$element>) -> Self {
                VolumeData::$variant(array.into_shared())
            }
        }

        impl From<ArcArray<$element, IxDyn>> for VolumeData {
            fn from(array: ArcArray<$element, IxDyn>) -> Self {
                VolumeData::$variant(array)
            }
        }
    };
}

volume_from!(u8, U8);
volume_from!(u16, U16);
volume_from!(u32, U32);
volume_from!(f32, F32);

/// Points of one category in (z, y, x) order, with sparse per-point metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    category: CellType,
    positions: Array2<f64>,
    features: Vec<Features>,
}

impl PointSet {
    /// `features` may be empty, in which case every point starts without metadata.
    pub fn new(category: CellType, positions: Array2<f64>, features: Vec<Features>) -> Result<Self> {
        if positions.ncols() != 3 {
            return Err(CoreError::InvalidPointShape {
                shape: positions.shape().to_vec(),
            });
        }
        let features = if features.is_empty() {
            vec![Features::new(); positions.nrows()]
        } else {
            features
        };
        if features.len() != positions.nrows() {
            return Err(CoreError::FeatureCountMismatch {
                positions: positions.nrows(),
                features: features.len(),
            });
        }
        Ok(Self {
            category,
            positions,
            features,
        })
    }

    pub fn empty(category: CellType) -> Self {
        Self {
            category,
            positions: Array2::zeros((0, 3)),
            features: Vec::new(),
        }
    }

    pub fn category(&self) -> CellType {
        self.category
    }

    pub fn positions(&self) -> &Array2<f64> {
        &self.positions
    }

    pub fn features(&self) -> &[Features] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.positions.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Union of the metadata keys present on any point.
    pub fn feature_keys(&self) -> BTreeSet<&str> {
        self.features
            .iter()
            .flat_map(|features| features.keys().map(String::as_str))
            .collect()
    }
}

/// What a viewer should do with a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Image,
    Labels,
    Points,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Blending {
    Translucent,
    Additive,
    Opaque,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerData {
    Volume(VolumeData),
    Points(PointSet),
}

/// Display and provenance attributes of a layer.
#[derive(Debug, Clone)]
pub struct LayerAttributes {
    pub visible: bool,
    pub opacity: f32,
    pub blending: Option<Blending>,
    /// Physical size of one voxel along each array dimension, for display.
    pub scale: Option<[f64; 3]>,
    pub atlas: Option<Arc<ReferenceAtlas>>,
    pub registration: Option<Arc<RegistrationMetadata>>,
}

impl Default for LayerAttributes {
    fn default() -> Self {
        Self {
            visible: true,
            opacity: 1.0,
            blending: None,
            scale: None,
            atlas: None,
            registration: None,
        }
    }
}

/// One renderable layer: an array or point set plus its name, kind and attributes.
///
/// Names are not unique within a collection.
#[derive(Debug, Clone)]
pub struct LabeledVolume {
    name: String,
    kind: LayerKind,
    data: LayerData,
    attributes: LayerAttributes,
}

impl LabeledVolume {
    pub fn image(name: impl Into<String>, data: impl Into<VolumeData>) -> Self {
        Self::volume_layer(name.into(), LayerKind::Image, data.into())
    }

    pub fn labels(name: impl Into<String>, data: impl Into<VolumeData>) -> Self {
        Self::volume_layer(name.into(), LayerKind::Labels, data.into())
    }

    pub fn points(name: impl Into<String>, points: PointSet) -> Self {
        Self {
            name: name.into(),
            kind: LayerKind::Points,
            data: LayerData::Points(points),
            attributes: LayerAttributes::default(),
        }
    }

    fn volume_layer(name: String, kind: LayerKind, data: VolumeData) -> Self {
        Self {
            name,
            kind,
            data: LayerData::Volume(data),
            attributes: LayerAttributes::default(),
        }
    }

    pub fn hidden(mut self) -> Self {
        self.attributes.visible = false;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.attributes.opacity = opacity;
        self
    }

    pub fn with_blending(mut self, blending: Blending) -> Self {
        self.attributes.blending = Some(blending);
        self
    }

    pub fn with_atlas(mut self, atlas: Arc<ReferenceAtlas>) -> Self {
        self.attributes.atlas = Some(atlas);
        self
    }

    pub fn with_registration(mut self, metadata: Arc<RegistrationMetadata>) -> Self {
        self.attributes.registration = Some(metadata);
        self
    }

    pub fn with_scale(mut self, scale: [f64; 3]) -> Self {
        self.attributes.scale = Some(scale);
        self
    }

    /// Copy of this layer holding `data` instead of its current volume.
    pub(crate) fn with_volume(&self, data: VolumeData) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            data: LayerData::Volume(data),
            attributes: self.attributes.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn data(&self) -> &LayerData {
        &self.data
    }

    pub fn attributes(&self) -> &LayerAttributes {
        &self.attributes
    }

    pub fn volume(&self) -> Option<&VolumeData> {
        match &self.data {
            LayerData::Volume(volume) => Some(volume),
            LayerData::Points(_) => None,
        }
    }

    pub fn point_set(&self) -> Option<&PointSet> {
        match &self.data {
            LayerData::Points(points) => Some(points),
            LayerData::Volume(_) => None,
        }
    }

    pub fn shape(&self) -> Vec<usize> {
        match &self.data {
            LayerData::Volume(volume) => volume.shape().to_vec(),
            LayerData::Points(points) => points.positions().shape().to_vec(),
        }
    }

    pub fn scale(&self) -> Option<[f64; 3]> {
        self.attributes.scale
    }

    pub fn atlas(&self) -> Option<&Arc<ReferenceAtlas>> {
        self.attributes.atlas.as_ref()
    }
}
