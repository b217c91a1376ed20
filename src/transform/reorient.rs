use ndarray::{ArrayBase, Axis, IxDyn, RawData};

use crate::model::{AnatomicalSpace, AxisMapping, LabeledVolume, VolumeData, map_volume};

use super::{Result, TransformError};

/// Applies `mapping` to the leading three axes of `array`.
///
/// Only strides change: the result shares storage with the input whether it
/// is an owned array, a shared array or a view. Axes past the third keep
/// their position.
pub fn reorient_array<S>(array: ArrayBase<S, IxDyn>, mapping: &AxisMapping) -> Result<ArrayBase<S, IxDyn>>
where
    S: RawData,
{
    let ndim = array.ndim();
    if ndim < 3 {
        return Err(TransformError::NotVolumetric {
            shape: array.shape().to_vec(),
        });
    }

    let mut axes = mapping.permutation.to_vec();
    axes.extend(3..ndim);
    let mut reoriented = array.permuted_axes(IxDyn(&axes));
    for (dim, flip) in mapping.flips.iter().enumerate() {
        if *flip {
            reoriented.invert_axis(Axis(dim));
        }
    }
    Ok(reoriented)
}

/// Re-expresses a volume laid out in `from` in the layout of `to`.
pub fn reorient(volume: &VolumeData, from: &AnatomicalSpace, to: &AnatomicalSpace) -> Result<VolumeData> {
    let mapping = from.mapping_to(to)?;
    reorient_with(volume, &mapping)
}

pub(crate) fn reorient_with(volume: &VolumeData, mapping: &AxisMapping) -> Result<VolumeData> {
    Ok(map_volume!(volume, array => reorient_array(array.clone(), mapping)?))
}

/// Reorients a layer's volume. Point layers are returned as they are.
pub(crate) fn reorient_layer(layer: &LabeledVolume, mapping: &AxisMapping) -> Result<LabeledVolume> {
    match layer.volume() {
        Some(volume) => Ok(layer.with_volume(reorient_with(volume, mapping)?)),
        None => Ok(layer.clone()),
    }
}
