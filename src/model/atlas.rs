use super::{AnatomicalSpace, CoreError, Result, VolumeData};

/// Reference atlas as seen by the registration readers: its orientation,
/// resolution along each of its own dimensions, and annotation volume.
#[derive(Debug, Clone)]
pub struct ReferenceAtlas {
    name: String,
    space: AnatomicalSpace,
    resolution: [f64; 3],
    annotation: VolumeData,
}

impl ReferenceAtlas {
    pub fn new(
        name: impl Into<String>,
        space: AnatomicalSpace,
        resolution: [f64; 3],
        annotation: VolumeData,
    ) -> Result<Self> {
        let name = name.into();
        if let Some(value) = resolution
            .iter()
            .find(|value| !value.is_finite() || **value <= 0.0)
        {
            return Err(CoreError::InvalidMetadata(format!(
                "atlas `{name}` has non-positive resolution {value}"
            )));
        }
        if annotation.ndim() != 3 {
            return Err(CoreError::InvalidMetadata(format!(
                "atlas `{name}` annotation must be 3-D, found shape {:?}",
                annotation.shape()
            )));
        }
        Ok(Self {
            name,
            space,
            resolution,
            annotation,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn space(&self) -> &AnatomicalSpace {
        &self.space
    }

    pub fn resolution(&self) -> [f64; 3] {
        self.resolution
    }

    pub fn shape(&self) -> &[usize] {
        self.annotation.shape()
    }
}
