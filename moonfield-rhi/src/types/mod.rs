mod basic_descriptors;
mod basic_types;
mod device_traits;
mod enums;
mod errors;
mod pipeline_descriptors;
mod traits;

pub use basic_descriptors::*;
pub use basic_types::*;
pub use device_traits::*;
pub use enums::*;
pub use errors::*;
pub use pipeline_descriptors::*;
pub use traits::*;

pub type DeviceAddress = u64;
pub type Size = usize;
pub type Offset = usize;

#[allow(unused)]
pub const TIMEOUT_INFINITE: u64 = u64::MAX;

/// Sentinel meaning "the rest of the texture", mirrored in `Extent3D::WHOLE_TEXTURE`.
pub const REMAINING_TEXTURE_SIZE: u32 = 0xffffffff;
pub const ALL_LAYERS: u32 = 0xffffffff;
pub const ALL_MIPS: u32 = 0xffffffff;
pub const MAX_ACCELERATION_STRUCTURE_MOTION_KEY_COUNT: u32 = 2;

pub const ENTIRE_TEXTURE: SubresourceRange = SubresourceRange {
    layer: 0,
    layer_count: ALL_LAYERS,
    mip: 0,
    mip_count: ALL_MIPS,
};




