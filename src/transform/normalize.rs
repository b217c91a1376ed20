use std::fmt;
use std::sync::Arc;

use crate::model::{LabeledVolume, ReferenceAtlas, RegistrationMetadata};

use super::reorient::reorient_layer;
use super::{
    DEFAULT_SCALE_DECIMALS, LayerFilter, NormalizeObserver, Result, TracingObserver,
    TransformError, resolve_scale,
};

/// First layer in `volumes` carrying a reference atlas, with that atlas.
pub fn find_atlas(volumes: &[LabeledVolume]) -> Result<(&LabeledVolume, Arc<ReferenceAtlas>)> {
    volumes
        .iter()
        .find_map(|layer| layer.atlas().map(|atlas| (layer, Arc::clone(atlas))))
        .ok_or(TransformError::NoAtlasFound)
}

/// Moves atlas-space registration layers into sample space.
///
/// Every volume is reoriented from the atlas orientation to the sample
/// orientation and given the display scale that maps atlas voxels onto
/// sample voxels. Point layers are already in sample space and pass through.
pub struct RegistrationNormalizer {
    filter: Option<LayerFilter>,
    observer: Arc<dyn NormalizeObserver>,
    scale_decimals: u32,
}

impl fmt::Debug for RegistrationNormalizer {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RegistrationNormalizer")
            .field("filtered", &self.filter.is_some())
            .field("scale_decimals", &self.scale_decimals)
            .finish()
    }
}

impl Default for RegistrationNormalizer {
    fn default() -> Self {
        Self {
            filter: None,
            observer: Arc::new(TracingObserver),
            scale_decimals: DEFAULT_SCALE_DECIMALS,
        }
    }
}

impl RegistrationNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only layers for which `filter` returns true.
    pub fn with_filter(mut self, filter: LayerFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn NormalizeObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_scale_decimals(mut self, decimals: u32) -> Self {
        self.scale_decimals = decimals;
        self
    }

    /// Returns the transformed layers in input order, minus filtered ones.
    /// The input is left untouched.
    pub fn normalize(
        &self,
        volumes: &[LabeledVolume],
        metadata: &RegistrationMetadata,
    ) -> Result<Vec<LabeledVolume>> {
        let (source, atlas) = find_atlas(volumes)?;
        self.observer.on_atlas_found(source.name(), &atlas);

        let kept = volumes
            .iter()
            .filter(|layer| {
                let keep = self.filter.as_ref().is_none_or(|filter| filter(*layer));
                if !keep {
                    self.observer.on_volume_filtered(layer.name());
                }
                keep
            })
            .collect::<Vec<_>>();

        let atlas_space = atlas.space();
        let sample_space = &metadata.orientation;
        let mapping = atlas_space.mapping_to(sample_space)?;
        let reoriented = kept
            .into_iter()
            .map(|layer| reorient_layer(layer, &mapping))
            .collect::<Result<Vec<_>>>()?;

        let atlas_scale = resolve_scale(
            atlas_space,
            atlas.resolution(),
            sample_space,
            metadata.voxel_sizes,
            self.scale_decimals,
        )?;
        // Arrays are in sample order by now, so the scale has to be too.
        let sample_scale = mapping.apply(atlas_scale);
        self.observer.on_scale_computed(atlas_scale, sample_scale);

        Ok(reoriented
            .into_iter()
            .map(|layer| {
                let layer = if layer.volume().is_some() {
                    layer.with_scale(sample_scale)
                } else {
                    layer
                };
                self.observer.on_volume_normalized(&layer);
                layer
            })
            .collect())
    }
}
