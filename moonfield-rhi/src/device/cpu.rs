//! Minimal in-process software device.
//!
//! Implements enough of [`Device`] to back the staging heap, command list,
//! and shader-object tests without a native backend: host-memory buffers
//! that can be created, mapped, and unmapped directly, and textures that
//! only go as far as describing their own subresource layout (§3's
//! `getSubresourceLayout` law). Everything that would require real backend
//! translation (texture views, pipelines, surfaces, queues) returns
//! [`RhiError::NotAvailable`] -- the CPU device exists to drive the
//! backend-agnostic core, not to be a complete software rasterizer.

use std::any::Any;
use std::cell::UnsafeCell;
use std::ffi::c_void;
use std::sync::Arc;

use crate::types::*;

pub struct CpuBuffer {
    desc: BufferDesc,
    data: UnsafeCell<Box<[u8]>>,
}

impl CpuBuffer {
    fn new(desc: BufferDesc, init_data: Option<&[u8]>) -> Self {
        let mut data = vec![0u8; desc.size as usize].into_boxed_slice();
        if let Some(init) = init_data {
            let n = init.len().min(data.len());
            data[..n].copy_from_slice(&init[..n]);
        }
        Self { desc, data: UnsafeCell::new(data) }
    }

    fn as_mut_ptr(&self) -> *mut u8 {
        unsafe { (*self.data.get()).as_mut_ptr() }
    }
}

// SAFETY: access to `data` is only ever through the single `&mut [u8]` handed
// out by `CpuDevice::map_buffer`/`unmap_buffer`, serialized by the caller per
// the RHI's single-writer mapping contract (see `Device::map_buffer`).
unsafe impl Send for CpuBuffer {}
unsafe impl Sync for CpuBuffer {}

impl RHIObject for CpuBuffer {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Resource for CpuBuffer {
    fn get_native_handle(&self) -> Result<NativeHandle, RhiError> {
        Ok(NativeHandle::new(NativeHandleType::Undefined, self.as_mut_ptr() as u64))
    }
}

impl Buffer for CpuBuffer {
    fn get_desc(&self) -> &BufferDesc {
        &self.desc
    }

    fn get_shared_handle(&self) -> Result<NativeHandle, RhiError> {
        Err(RhiError::NotAvailable("cpu buffers cannot be shared cross-process".into()))
    }

    fn get_device_address(&self) -> DeviceAddress {
        self.as_mut_ptr() as DeviceAddress
    }

    fn get_descriptor_handle(
        &self,
        _access: DescriptorHandleAccess,
        _format: Format,
        _range: BufferRange,
    ) -> Result<DescriptorHandle, RhiError> {
        Err(RhiError::NotAvailable("cpu device has no descriptor heap".into()))
    }
}

pub struct CpuTexture {
    desc: TextureDesc,
}

impl CpuTexture {
    fn new(desc: TextureDesc) -> Self {
        Self { desc }
    }

    fn mip_extent(&self, mip: u32) -> Extent3D {
        let shift = mip.min(31);
        Extent3D::new(
            (self.desc.size.width >> shift).max(1),
            (self.desc.size.height >> shift).max(1),
            (self.desc.size.depth >> shift).max(1),
        )
    }
}

impl RHIObject for CpuTexture {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Resource for CpuTexture {
    fn get_native_handle(&self) -> Result<NativeHandle, RhiError> {
        Ok(NativeHandle::new(NativeHandleType::Undefined, 0))
    }
}

impl Texture for CpuTexture {
    fn get_desc(&self) -> &TextureDesc {
        &self.desc
    }

    fn get_shared_handle(&self) -> Result<NativeHandle, RhiError> {
        Err(RhiError::NotAvailable("cpu textures cannot be shared cross-process".into()))
    }

    fn create_view(&self, _desc: &TextureViewDesc) -> Result<Box<dyn TextureView>, RhiError> {
        Err(RhiError::NotAvailable("cpu device does not implement texture views".into()))
    }

    fn get_default_view(&self) -> Result<Box<dyn TextureView>, RhiError> {
        Err(RhiError::NotAvailable("cpu device does not implement texture views".into()))
    }

    fn get_subresource_layout(&self, mip: u32, row_alignment: Size) -> Result<SubresourceLayout, RhiError> {
        Ok(crate::format::subresource_layout(self.desc.format, self.mip_extent(mip), row_alignment))
    }
}

pub struct CpuDevice {
    info: DeviceInfo,
}

impl CpuDevice {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            info: DeviceInfo {
                device_type: DeviceType::Cpu,
                limits: DeviceLimits {
                    max_buffer_size: u64::MAX,
                    max_texture_dimension_1d: 0,
                    max_texture_dimension_2d: 0,
                    max_texture_dimension_3d: 0,
                    max_texture_dimension_cube: 0,
                    max_texture_layers: 0,
                    max_vertex_input_elements: 0,
                    max_vertex_input_element_offset: 0,
                    max_vertex_streams: 0,
                    max_vertex_stream_stride: 0,
                    max_compute_threads_per_group: 0,
                    max_compute_thread_group_size: [0; 3],
                    max_compute_dispatch_thread_groups: [0; 3],
                    max_viewports: 0,
                    max_viewport_dimensions: [0; 2],
                    max_framebuffer_dimensions: [0; 3],
                    max_shader_visible_samplers: 0,
                },
                api_name: "cpu".into(),
                adapter_name: "software".into(),
                adapter_luid: AdapterLUID::default(),
                timestamp_frequency: 1_000_000_000,
            },
        })
    }
}

impl RHIObject for CpuDevice {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Device for CpuDevice {
    fn get_info(&self) -> &DeviceInfo {
        &self.info
    }

    fn get_native_device_handles(&self) -> Result<DeviceNativeHandles, RhiError> {
        Ok(DeviceNativeHandles::default())
    }

    fn get_features(&self) -> Result<Vec<Feature>, RhiError> {
        Ok(vec![Feature::SoftwareDevice])
    }

    fn has_feature(&self, feature: Feature) -> bool {
        feature == Feature::SoftwareDevice
    }

    fn has_feature_by_name(&self, feature: &str) -> bool {
        feature == "software-device"
    }

    fn get_format_support(&self, _format: Format) -> Result<FormatSupport, RhiError> {
        Ok(FormatSupport::NONE)
    }

    fn create_texture(
        &self,
        desc: &TextureDesc,
        _init_data: Option<&[SubresourceData]>,
    ) -> Result<Box<dyn Texture>, RhiError> {
        if desc.size.width == 0 || desc.size.height == 0 {
            return Err(RhiError::InvalidArgument("texture dimensions must be nonzero".into()));
        }
        Ok(Box::new(CpuTexture::new(desc.clone())))
    }

    fn create_buffer(&self, desc: &BufferDesc, init_data: Option<&[u8]>) -> Result<Box<dyn Buffer>, RhiError> {
        if desc.size == 0 {
            return Err(RhiError::InvalidArgument("buffer size must be nonzero".into()));
        }
        Ok(Box::new(CpuBuffer::new(desc.clone(), init_data)))
    }

    fn create_sampler(&self, _desc: &SamplerDesc) -> Result<Box<dyn Sampler>, RhiError> {
        Err(RhiError::NotAvailable("cpu device does not implement samplers".into()))
    }

    fn create_texture_view(
        &self,
        _texture: &dyn Texture,
        _desc: &TextureViewDesc,
    ) -> Result<Box<dyn TextureView>, RhiError> {
        Err(RhiError::NotAvailable("cpu device does not implement texture views".into()))
    }

    fn create_surface(&self, _window_handle: WindowHandle) -> Result<Box<dyn Surface>, RhiError> {
        Err(RhiError::NotAvailable("cpu device has no presentation surface".into()))
    }

    fn create_input_layout(&self, _desc: &InputLayoutDesc) -> Result<Box<dyn InputLayout>, RhiError> {
        Err(RhiError::NotAvailable("cpu device does not implement input layouts".into()))
    }

    fn get_queue(&self, _queue_type: QueueType) -> Result<Box<dyn CommandQueue>, RhiError> {
        Err(RhiError::NotAvailable("cpu device does not implement command queues".into()))
    }

    fn create_shader_program(&self, _desc: &ShaderProgramDesc) -> Result<Box<dyn ShaderProgram>, RhiError> {
        Err(RhiError::NotAvailable("cpu device does not implement shader programs".into()))
    }

    fn create_render_pipeline(&self, _desc: &RenderPipelineDesc) -> Result<Box<dyn RenderPipeline>, RhiError> {
        Err(RhiError::NotAvailable("cpu device does not implement render pipelines".into()))
    }

    fn create_compute_pipeline(&self, _desc: &ComputePipelineDesc) -> Result<Box<dyn ComputePipeline>, RhiError> {
        Err(RhiError::NotAvailable("cpu device does not implement compute pipelines".into()))
    }

    fn create_ray_tracing_pipeline(
        &self,
        _desc: &RayTracingPipelineDesc,
    ) -> Result<Box<dyn RayTracingPipeline>, RhiError> {
        Err(RhiError::NotAvailable("cpu device does not implement ray tracing".into()))
    }

    fn create_query_pool(&self, _desc: &QueryPoolDesc) -> Result<Box<dyn QueryPool>, RhiError> {
        Err(RhiError::NotAvailable("cpu device does not implement query pools".into()))
    }

    fn create_acceleration_structure(
        &self,
        _desc: &AccelerationStructureDesc,
    ) -> Result<Box<dyn AccelerationStructure>, RhiError> {
        Err(RhiError::NotAvailable("cpu device does not implement acceleration structures".into()))
    }

    fn create_fence(&self, _desc: &FenceDesc) -> Result<Box<dyn Fence>, RhiError> {
        Err(RhiError::NotAvailable("cpu device does not implement fences".into()))
    }

    fn create_heap(&self, _desc: &HeapDesc) -> Result<Box<dyn Heap>, RhiError> {
        Err(RhiError::NotAvailable("cpu device does not implement heaps".into()))
    }

    fn map_buffer(&self, buffer: &dyn Buffer, _mode: CpuAccessMode) -> Result<*mut c_void, RhiError> {
        let cpu_buffer = buffer
            .as_any()
            .downcast_ref::<CpuBuffer>()
            .ok_or_else(|| RhiError::Internal("buffer was not created by CpuDevice".into()))?;
        Ok(cpu_buffer.as_mut_ptr() as *mut c_void)
    }

    fn unmap_buffer(&self, _buffer: &dyn Buffer) -> Result<(), RhiError> {
        Ok(())
    }

    fn wait_for_fences(
        &self,
        _fences: &[&dyn Fence],
        _fence_values: &[u64],
        _wait_for_all: bool,
        _timeout: u64,
    ) -> Result<(), RhiError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_map_roundtrip() {
        let device = CpuDevice::new();
        let desc = BufferDesc { size: 256, ..Default::default() };
        let buffer = device.create_buffer(&desc, None).unwrap();

        let ptr = device.map_buffer(buffer.as_ref(), CpuAccessMode::Write).unwrap() as *mut u8;
        unsafe {
            std::ptr::write_bytes(ptr, 0xab, 256);
        }
        device.unmap_buffer(buffer.as_ref()).unwrap();

        let ptr = device.map_buffer(buffer.as_ref(), CpuAccessMode::Read).unwrap() as *const u8;
        let slice = unsafe { std::slice::from_raw_parts(ptr, 256) };
        assert!(slice.iter().all(|&b| b == 0xab));
    }

    #[test]
    fn s9_texture_subresource_layout_accounts_for_mip_shrink() {
        let device = CpuDevice::new();
        let desc = TextureDesc {
            size: Extent3D::new(256, 256, 1),
            format: Format::RGBA8Unorm,
            mip_count: 9,
            ..Default::default()
        };
        let texture = device.create_texture(&desc, None).unwrap();

        let mip0 = texture.get_subresource_layout(0, 1).unwrap();
        assert_eq!(mip0.size, Extent3D::new(256, 256, 1));
        assert_eq!(mip0.row_pitch, 256 * 4);

        let mip4 = texture.get_subresource_layout(4, 1).unwrap();
        assert_eq!(mip4.size, Extent3D::new(16, 16, 1));
        assert_eq!(mip4.row_pitch, 16 * 4);
    }

    #[test]
    fn create_texture_rejects_zero_sized_dimensions() {
        let device = CpuDevice::new();
        let desc = TextureDesc { size: Extent3D::new(0, 1, 1), ..Default::default() };
        assert!(device.create_texture(&desc, None).is_err());
    }
}
