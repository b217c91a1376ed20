//! Hooks fired while registration layers are normalized.

use crate::model::{LabeledVolume, ReferenceAtlas};

/// Receives progress from [`super::RegistrationNormalizer`].
pub trait NormalizeObserver: Send + Sync {
    fn on_atlas_found(&self, _layer: &str, _atlas: &ReferenceAtlas) {}

    fn on_volume_filtered(&self, _layer: &str) {}

    fn on_scale_computed(&self, _atlas_order: [f64; 3], _sample_order: [f64; 3]) {}

    fn on_volume_normalized(&self, _layer: &LabeledVolume) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl NormalizeObserver for TracingObserver {
    fn on_atlas_found(&self, layer: &str, atlas: &ReferenceAtlas) {
        tracing::info!(
            layer,
            atlas = atlas.name(),
            orientation = %atlas.space(),
            "using reference atlas"
        );
    }

    fn on_volume_filtered(&self, layer: &str) {
        tracing::debug!(layer, "dropping layer before rescaling");
    }

    fn on_scale_computed(&self, atlas_order: [f64; 3], sample_order: [f64; 3]) {
        tracing::info!(?atlas_order, ?sample_order, "computed sample-space scale");
    }

    fn on_volume_normalized(&self, layer: &LabeledVolume) {
        tracing::debug!(layer = layer.name(), shape = ?layer.shape(), "normalized layer");
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl NormalizeObserver for SilentObserver {}
