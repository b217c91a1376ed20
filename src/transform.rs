mod error;
mod filter;
mod normalize;
mod observer;
mod reorient;
mod scale;


pub use error::{Result, TransformError};
pub use filter::{
    DOWNSAMPLED_MARKER, LayerFilter, REGISTERED_IMAGE_NAME, is_sample_space_layer,
    sample_space_filter,
};
pub use normalize::{RegistrationNormalizer, find_atlas};
pub use observer::{NormalizeObserver, SilentObserver, TracingObserver};
pub use reorient::{reorient, reorient_array};
pub use scale::{DEFAULT_SCALE_DECIMALS, MAX_SCALE_DECIMALS, reorder_to_space, resolve_scale};
