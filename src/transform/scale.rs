use crate::model::AnatomicalSpace;

use super::{Result, TransformError};

pub const DEFAULT_SCALE_DECIMALS: u32 = 5;
pub const MAX_SCALE_DECIMALS: u32 = 12;

/// Display scale for an atlas-resolution volume shown over sample data, one
/// factor per atlas dimension.
///
/// Atlas resolution is ordered like the atlas dimensions and voxel sizes like
/// the sample dimensions, so each atlas dimension is paired with the sample
/// dimension carrying the same anatomical axis before dividing.
pub fn resolve_scale(
    atlas_space: &AnatomicalSpace,
    atlas_resolution: [f64; 3],
    sample_space: &AnatomicalSpace,
    sample_voxel_sizes: [f64; 3],
    decimals: u32,
) -> Result<[f64; 3]> {
    if decimals > MAX_SCALE_DECIMALS {
        return Err(TransformError::InvalidPrecision(decimals));
    }
    for (dim, value) in sample_voxel_sizes.iter().enumerate() {
        if !value.is_finite() || *value <= 0.0 {
            return Err(TransformError::ZeroVoxelSize { dim, value: *value });
        }
    }

    let mut scale = [0.0; 3];
    for (atlas_dim, factor) in scale.iter_mut().enumerate() {
        let axis = atlas_space.axis(atlas_dim);
        let sample_dim = sample_space
            .dim_of(axis)
            .ok_or(TransformError::AxisMismatch { atlas_dim, axis })?;
        *factor = round_to(
            atlas_resolution[atlas_dim] / sample_voxel_sizes[sample_dim],
            decimals,
        );
    }
    Ok(scale)
}

/// Reorders per-dimension values given in `from` order into `to` order.
pub fn reorder_to_space(
    values: [f64; 3],
    from: &AnatomicalSpace,
    to: &AnatomicalSpace,
) -> Result<[f64; 3]> {
    Ok(from.mapping_to(to)?.apply(values))
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}
