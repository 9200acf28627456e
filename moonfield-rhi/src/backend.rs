//! The `Backend` trait contract external backends implement (spec.md §6).
//!
//! This workspace ships only the in-process CPU device
//! ([`crate::device::CpuDevice`]); D3D12/Vulkan/Metal/CUDA/WebGPU
//! translation is out of scope. `Backend` exists so the device façade can
//! be written against a stable, `dyn`-safe contract regardless of which
//! concrete backend eventually plugs in underneath it.

use crate::command_list::Command;
use crate::shader_object_layout::ShaderObjectLayout;
use crate::types::{
    AccelerationStructureBuildDesc, AccelerationStructureDesc, AccelerationStructureSizes, Buffer,
    BufferDesc, CpuAccessMode, Fence, FenceDesc, Format, FormatSupport, QueryPoolDesc, QueryPool,
    RhiError, Sampler, SamplerDesc, ShaderProgramDesc, SubmitDesc, Texture, TextureDesc,
};
use std::ffi::c_void;

/// Texture layout/allocation information a backend knows how to compute
/// from its native alignment/tiling rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureAllocationInfo {
    pub size: u64,
    pub alignment: u64,
}

/// Backend-reported cooperative-vector capability (matrix/vector element
/// type combinations the device can accelerate).
#[derive(Debug, Clone, Default)]
pub struct CooperativeVectorProperties {
    pub supported: bool,
    pub max_input_elements: u32,
}

/// Playback target for [`Backend::play_command`]: an opaque native command
/// buffer / encoder handle the backend created via `create_command_encoder`.
pub type NativeCommandBuffer = *mut c_void;

pub trait Backend {
    // --- resource creation -------------------------------------------------
    fn create_buffer(&self, desc: &BufferDesc, init_data: Option<&[u8]>) -> Result<Box<dyn Buffer>, RhiError>;
    fn create_texture(&self, desc: &TextureDesc) -> Result<Box<dyn Texture>, RhiError>;
    fn create_sampler(&self, desc: &SamplerDesc) -> Result<Box<dyn Sampler>, RhiError>;
    fn create_query_pool(&self, desc: &QueryPoolDesc) -> Result<Box<dyn QueryPool>, RhiError>;
    fn create_fence(&self, desc: &FenceDesc) -> Result<Box<dyn Fence>, RhiError>;
    fn create_shader_program(&self, desc: &ShaderProgramDesc) -> Result<u64, RhiError>;
    fn create_root_shader_object_layout(&self, program: u64) -> Result<ShaderObjectLayout, RhiError>;
    fn create_shader_object_layout(&self, program: u64, type_name: &str) -> Result<ShaderObjectLayout, RhiError>;

    // --- queue ops -----------------------------------------------------------
    fn create_command_encoder(&self) -> Result<NativeCommandBuffer, RhiError>;
    fn submit(&self, desc: &SubmitDesc) -> Result<u64, RhiError>;
    fn wait_on_host(&self, fence_value: u64, timeout_ns: u64) -> Result<(), RhiError>;
    fn wait_for_fences_on_device(&self, fences: &[(&dyn Fence, u64)]) -> Result<(), RhiError>;

    // --- data motion -----------------------------------------------------------
    fn map(&self, buffer: &dyn Buffer, mode: CpuAccessMode) -> Result<*mut c_void, RhiError>;
    fn unmap(&self, buffer: &dyn Buffer) -> Result<(), RhiError>;
    fn read_buffer(&self, buffer: &dyn Buffer, offset: u64, size: u64) -> Result<Vec<u8>, RhiError>;
    fn upload_buffer_data(&self, buffer: &dyn Buffer, offset: u64, data: &[u8]) -> Result<(), RhiError>;
    fn upload_texture_data(&self, texture: &dyn Texture, data: &[u8]) -> Result<(), RhiError>;

    // --- reflection helpers -----------------------------------------------------------
    fn get_texture_row_alignment(&self) -> u64;
    fn get_texture_allocation_info(&self, desc: &TextureDesc) -> Result<TextureAllocationInfo, RhiError>;
    fn get_format_support(&self, format: Format) -> Result<FormatSupport, RhiError>;
    fn get_acceleration_structure_sizes(&self, desc: &AccelerationStructureBuildDesc) -> Result<AccelerationStructureSizes, RhiError>;
    fn get_cooperative_vector_properties(&self) -> CooperativeVectorProperties;
    fn create_acceleration_structure(&self, desc: &AccelerationStructureDesc) -> Result<*mut c_void, RhiError>;

    /// Per-command-variant playback (§4.1): apply one recorded command to a
    /// native command buffer produced by `create_command_encoder`.
    fn play_command(&self, native_encoder: NativeCommandBuffer, command: &Command) -> Result<(), RhiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn Backend) {}
}
