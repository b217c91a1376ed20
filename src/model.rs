mod atlas;
mod axis;
mod cell;
mod error;
mod metadata;
mod space;
mod volume;

#[cfg(test)]
mod tests;

pub use atlas::ReferenceAtlas;
pub use axis::{AnatomicalAxis, Direction};
pub use cell::{Cell, CellType, Features, MetadataValue};
pub use error::{CoreError, Result};
pub use metadata::RegistrationMetadata;
pub use space::{AnatomicalSpace, AxisMapping, mapping};
pub use volume::{
    Blending, LabeledVolume, LayerAttributes, LayerData, LayerKind, PixelType, PointSet,
    VolumeData,
};

pub(crate) use volume::map_volume;
