use crate::model::LabeledVolume;

pub const DOWNSAMPLED_MARKER: &str = "(downsampled)";
pub const REGISTERED_IMAGE_NAME: &str = "Registered image";

/// Decides which layers survive normalization.
pub type LayerFilter = Box<dyn Fn(&LabeledVolume) -> bool + Send + Sync>;

/// Drops the atlas-resolution copies of the raw data: layers whose name ends
/// with `downsampled_marker` and the layer named `registered_image`.
pub fn sample_space_filter(
    downsampled_marker: impl Into<String>,
    registered_image: impl Into<String>,
) -> LayerFilter {
    let marker = downsampled_marker.into();
    let registered = registered_image.into();
    Box::new(move |layer: &LabeledVolume| {
        !layer.name().ends_with(marker.as_str()) && layer.name() != registered
    })
}

pub fn is_sample_space_layer(layer: &LabeledVolume) -> bool {
    !layer.name().ends_with(DOWNSAMPLED_MARKER) && layer.name() != REGISTERED_IMAGE_NAME
}
