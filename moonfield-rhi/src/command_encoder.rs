//! Command encoder and pass encoders: the public recording surface (spec.md §4.2/§4.3).
//!
//! One encoder owns exactly one [`CommandList`]. Render/compute/ray-tracing
//! passes are entered with `begin_*_pass` and exited with `end_pass`; only
//! one may be armed at a time. Binding a pipeline persists its root shader
//! object for the rest of the pass; every draw/dispatch call captures a
//! fresh `Set*State` command with the pipeline's current (possibly virtual)
//! identity plus freshly collected specialization arguments and binding
//! data, so `resolve_pipelines` can later rewrite them in place.

use std::ffi::c_void;
use std::rc::Rc;

use crate::command_list::{Command, CommandList, PipelineState};
use crate::pipeline::{get_concrete_pipeline, Pipeline};
use crate::shader_cache::{ShaderCache, ShaderComponentId};
use crate::shader_object::{RootShaderObject, SpecializationArg};
use crate::shader_object_layout::ShaderObjectLayout;
use crate::types::{
    AccelerationStructureCopyMode, BufferOffsetPair, BufferRange, DrawArguments,
    IndirectDispatchArguments, IndirectDrawArguments, IndirectDrawIndexedArguments, MarkerColor,
    RenderPassColorAttachment, RenderPassDepthStencilAttachment, ResourceState, RhiError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PassKind {
    Render,
    Compute,
    RayTracing,
}

/// Records commands into one [`CommandList`].
///
/// Per spec.md §5, recording on a single encoder is not reentrant; distinct
/// encoders (each owning its own list, arena, and retained set) may be used
/// from separate threads freely.
pub struct CommandEncoder {
    list: CommandList,
    armed_pass: Option<PassKind>,
    bound_root: Option<Rc<RootShaderObject>>,
    bound_pipeline: Option<Rc<Pipeline>>,
}

impl CommandEncoder {
    pub fn new() -> Self {
        Self { list: CommandList::new(), armed_pass: None, bound_root: None, bound_pipeline: None }
    }

    pub fn command_list(&self) -> &CommandList {
        &self.list
    }

    fn ensure_no_pass_armed(&self) -> Result<(), RhiError> {
        if self.armed_pass.is_some() {
            return Err(RhiError::InvalidArgument("a pass is already armed on this encoder".into()));
        }
        Ok(())
    }

    fn ensure_pass_armed(&self, kind: PassKind) -> Result<(), RhiError> {
        if self.armed_pass != Some(kind) {
            return Err(RhiError::InvalidArgument("no matching pass is armed on this encoder".into()));
        }
        Ok(())
    }

    pub fn begin_render_pass(
        &mut self,
        color_attachments: &[RenderPassColorAttachment],
        depth_stencil_attachment: Option<RenderPassDepthStencilAttachment>,
        retain: impl IntoIterator<Item = Rc<dyn std::any::Any>>,
    ) -> Result<(), RhiError> {
        self.ensure_no_pass_armed()?;
        let copied = self.list.copy_slice(color_attachments);
        self.list.write(Command::BeginRenderPass { color_attachments: copied, depth_stencil_attachment }, retain);
        self.armed_pass = Some(PassKind::Render);
        Ok(())
    }

    pub fn begin_compute_pass(&mut self) -> Result<(), RhiError> {
        self.ensure_no_pass_armed()?;
        self.armed_pass = Some(PassKind::Compute);
        Ok(())
    }

    pub fn begin_ray_tracing_pass(&mut self) -> Result<(), RhiError> {
        self.ensure_no_pass_armed()?;
        self.armed_pass = Some(PassKind::RayTracing);
        Ok(())
    }

    pub fn end(&mut self) -> Result<(), RhiError> {
        let kind = self.armed_pass.ok_or_else(|| RhiError::InvalidArgument("no pass armed".into()))?;
        if kind == PassKind::Render {
            self.list.write(Command::EndRenderPass, []);
        }
        self.armed_pass = None;
        self.bound_root = None;
        self.bound_pipeline = None;
        Ok(())
    }

    /// `bindPipeline(pipeline) -> RootShaderObject*` — creates a fresh root
    /// object (a global scope plus one child per entry point in
    /// `entry_point_layouts`) and arms it for the rest of the pass.
    ///
    /// The real device call is `Device.createRootShaderObject(program)`,
    /// which reflects the linked program's entry-point list itself; this
    /// workspace's `Device` trait has no shader-reflection-backed program
    /// surface to drive that from, so the caller supplies the global and
    /// entry-point layouts directly (documented in DESIGN.md).
    pub fn bind_pipeline(
        &mut self,
        pipeline: Rc<Pipeline>,
        global_layout: Rc<ShaderObjectLayout>,
        entry_point_layouts: impl IntoIterator<Item = Rc<ShaderObjectLayout>>,
    ) -> Rc<RootShaderObject> {
        let root = Rc::new(RootShaderObject::new(global_layout, entry_point_layouts));
        self.bound_pipeline = Some(pipeline);
        self.bound_root = Some(root.clone());
        root
    }

    /// `bindPipeline(pipeline, rootObject)` — client supplies an
    /// already-populated root object.
    pub fn bind_pipeline_with_root_object(&mut self, pipeline: Rc<Pipeline>, root: Rc<RootShaderObject>) {
        self.bound_pipeline = Some(pipeline);
        self.bound_root = Some(root);
    }

    /// Collects specialization arguments from the bound root object and
    /// interns them, persisting the interned id list for later pipeline
    /// resolution.
    fn current_state(&mut self, cache: &mut ShaderCache) -> Result<PipelineState, RhiError> {
        let pipeline = self.bound_pipeline.clone().ok_or_else(|| RhiError::InvalidArgument("no pipeline bound".into()))?;
        let root = self.bound_root.clone().ok_or_else(|| RhiError::InvalidArgument("no pipeline bound".into()))?;

        let specialization_args = if pipeline.is_virtual() {
            let mut args = Vec::new();
            root.collect_specialization_args(&mut args);
            let ids: Vec<ShaderComponentId> = args
                .iter()
                .map(|arg| match arg {
                    SpecializationArg::Concrete(name) => cache.get_component_id(name, &[]),
                    SpecializationArg::Dynamic => cache.get_component_id("__Dynamic", &[]),
                })
                .collect();
            Some(Rc::from(ids.into_boxed_slice()))
        } else {
            None
        };

        Ok(PipelineState { pipeline, specialization_args, root_object: root })
    }

    fn write_set_state(&mut self, kind: PassKind, cache: &mut ShaderCache) -> Result<(), RhiError> {
        self.ensure_pass_armed(kind)?;
        let state = self.current_state(cache)?;
        let command = match kind {
            PassKind::Render => Command::SetRenderState { state, vertex_buffers: &[], index_buffer: None },
            PassKind::Compute => Command::SetComputeState { state },
            PassKind::RayTracing => Command::SetRayTracingState { state },
        };
        self.list.write(command, []);
        Ok(())
    }

    /// Render-state retention corner case (§4.2): vertex/index buffers are
    /// retained here, at call time, not merely at `write` time, so the
    /// client may drop its own references immediately after this call.
    pub fn set_render_state(
        &mut self,
        cache: &mut ShaderCache,
        vertex_buffers: &[BufferOffsetPair],
        index_buffer: Option<BufferOffsetPair>,
        retained_buffers: impl IntoIterator<Item = Rc<dyn std::any::Any>>,
    ) -> Result<(), RhiError> {
        self.ensure_pass_armed(PassKind::Render)?;
        let state = self.current_state(cache)?;
        let vertex_buffers = self.list.copy_slice(vertex_buffers);
        self.list.write(Command::SetRenderState { state, vertex_buffers, index_buffer }, retained_buffers);
        Ok(())
    }

    pub fn draw(&mut self, cache: &mut ShaderCache, args: DrawArguments) -> Result<(), RhiError> {
        self.write_set_state(PassKind::Render, cache)?;
        self.list.write(Command::Draw(args), []);
        Ok(())
    }

    pub fn draw_indexed(&mut self, cache: &mut ShaderCache, args: DrawArguments) -> Result<(), RhiError> {
        self.write_set_state(PassKind::Render, cache)?;
        self.list.write(Command::DrawIndexed(args), []);
        Ok(())
    }

    pub fn draw_indirect(&mut self, cache: &mut ShaderCache, args: IndirectDrawArguments) -> Result<(), RhiError> {
        self.write_set_state(PassKind::Render, cache)?;
        self.list.write(Command::DrawIndirect(args), []);
        Ok(())
    }

    pub fn draw_indexed_indirect(&mut self, cache: &mut ShaderCache, args: IndirectDrawIndexedArguments) -> Result<(), RhiError> {
        self.write_set_state(PassKind::Render, cache)?;
        self.list.write(Command::DrawIndexedIndirect(args), []);
        Ok(())
    }

    pub fn draw_mesh_tasks(&mut self, cache: &mut ShaderCache, x: u32, y: u32, z: u32) -> Result<(), RhiError> {
        self.write_set_state(PassKind::Render, cache)?;
        self.list.write(Command::DrawMeshTasks { x, y, z }, []);
        Ok(())
    }

    pub fn dispatch_compute(&mut self, cache: &mut ShaderCache, x: u32, y: u32, z: u32) -> Result<(), RhiError> {
        self.write_set_state(PassKind::Compute, cache)?;
        self.list.write(Command::DispatchCompute { x, y, z }, []);
        Ok(())
    }

    pub fn dispatch_compute_indirect(&mut self, cache: &mut ShaderCache, args: IndirectDispatchArguments) -> Result<(), RhiError> {
        self.write_set_state(PassKind::Compute, cache)?;
        self.list.write(Command::DispatchComputeIndirect(args), []);
        Ok(())
    }

    pub fn dispatch_rays(
        &mut self,
        cache: &mut ShaderCache,
        ray_gen_shader_index: u32,
        width: u32,
        height: u32,
        depth: u32,
    ) -> Result<(), RhiError> {
        self.write_set_state(PassKind::RayTracing, cache)?;
        self.list.write(Command::DispatchRays { ray_gen_shader_index, width, height, depth }, []);
        Ok(())
    }

    pub fn copy_buffer(
        &mut self,
        dst: *mut c_void,
        dst_offset: u64,
        src: *mut c_void,
        src_offset: u64,
        size: u64,
        retain: impl IntoIterator<Item = Rc<dyn std::any::Any>>,
    ) {
        self.list.write(Command::CopyBuffer { dst, dst_offset, src, src_offset, size }, retain);
    }

    pub fn clear_buffer(&mut self, buffer: *mut c_void, range: BufferRange, retain: impl IntoIterator<Item = Rc<dyn std::any::Any>>) {
        self.list.write(Command::ClearBuffer { buffer, range }, retain);
    }

    pub fn copy_acceleration_structure(
        &mut self,
        src: *mut c_void,
        dst: *mut c_void,
        mode: AccelerationStructureCopyMode,
        retain: impl IntoIterator<Item = Rc<dyn std::any::Any>>,
    ) {
        self.list.write(Command::CopyAccelerationStructure { src, dst, mode }, retain);
    }

    pub fn set_buffer_state(&mut self, buffer: *mut c_void, state: ResourceState, retain: impl IntoIterator<Item = Rc<dyn std::any::Any>>) {
        self.list.write(Command::SetBufferState { buffer, state }, retain);
    }

    pub fn set_texture_state(&mut self, texture: *mut c_void, state: ResourceState, retain: impl IntoIterator<Item = Rc<dyn std::any::Any>>) {
        self.list.write(Command::SetTextureState { texture, state }, retain);
    }

    pub fn push_debug_group(&mut self, name: &str, color: MarkerColor) {
        let name = self.list.copy_str(name);
        self.list.write(Command::PushDebugGroup { name, color }, []);
    }

    pub fn pop_debug_group(&mut self) {
        self.list.write(Command::PopDebugGroup, []);
    }

    pub fn insert_debug_marker(&mut self, name: &str, color: MarkerColor) {
        let name = self.list.copy_str(name);
        self.list.write(Command::InsertDebugMarker { name, color }, []);
    }

    /// Consumes the encoder and returns its finished command list.
    pub fn finish(self) -> Result<CommandList, RhiError> {
        if self.armed_pass.is_some() {
            return Err(RhiError::InvalidArgument("cannot finish an encoder with a pass still armed".into()));
        }
        Ok(self.list)
    }
}

impl Default for CommandEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// §4.3 `CommandEncoder.resolvePipelines(Device)`: walk the list once,
/// resolving every `Set*State` command's pipeline to a concrete one and
/// clearing its persisted specialization args.
pub fn resolve_pipelines(
    list: &mut CommandList,
    cache: &mut ShaderCache,
    build: impl Fn(&Pipeline, u64) -> String,
) -> Result<(), RhiError> {
    for command in list.get_commands_mut() {
        let state = match command {
            Command::SetRenderState { state, .. } => state,
            Command::SetComputeState { state } => state,
            Command::SetRayTracingState { state } => state,
            _ => continue,
        };
        let spec_args = state.specialization_args.as_deref();
        let concrete = get_concrete_pipeline(&state.pipeline, spec_args, cache, |id| build(&state.pipeline, id))?;
        state.pipeline = Rc::new(Pipeline::Concrete(concrete));
        state.specialization_args = None;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::pipeline::VirtualPipeline;
    use crate::shader_object_layout::ShaderObjectLayout;

    fn material_layout() -> Rc<ShaderObjectLayout> {
        Rc::new(
            ShaderObjectLayout::builder()
                .ordinary_data_size(32)
                .existential_range("IMaterial", 32)
                .build(),
        )
    }

    #[test]
    fn pass_arming_rejects_nested_passes() {
        let mut encoder = CommandEncoder::new();
        encoder.begin_compute_pass().unwrap();
        assert!(encoder.begin_render_pass(&[], None, []).is_err());
        encoder.end().unwrap();
        assert!(encoder.begin_render_pass(&[], None, []).is_ok());
    }

    #[test]
    fn draw_outside_a_pass_is_rejected() {
        let mut encoder = CommandEncoder::new();
        let mut cache = ShaderCache::new();
        let pipeline = Rc::new(Pipeline::Virtual(Rc::new(VirtualPipeline::new(1, "p", false))));
        encoder.bind_pipeline(pipeline, material_layout(), []);
        assert!(encoder.draw(&mut cache, DrawArguments::default()).is_err());
    }

    #[test]
    fn s3_resolve_pipelines_memoizes_specialized_pipeline_by_root_object_state() {
        let mut cache = ShaderCache::new();
        let virt = Rc::new(Pipeline::Virtual(Rc::new(VirtualPipeline::new(1, "p", true))));

        let mut encoder = CommandEncoder::new();
        encoder.begin_render_pass(&[], None, []).unwrap();
        for _ in 0..2 {
            let root = encoder.bind_pipeline(virt.clone(), material_layout(), []);
            let leaf = Rc::new(RefCell::new(crate::shader_object::ShaderObject::new(material_layout())));
            leaf.borrow_mut().set_concrete_type("LambertMaterial");
            let mut registry = crate::shader_object::TypeConformanceRegistry::new();
            root.global_object()
                .borrow_mut()
                .set_object(crate::types::ShaderOffset::new(0, 0, 0), leaf, &mut registry)
                .unwrap();
            encoder.draw(&mut cache, DrawArguments::default()).unwrap();
        }
        encoder.end().unwrap();
        let mut list = encoder.finish().unwrap();

        resolve_pipelines(&mut list, &mut cache, |_, id| format!("compiled-{id}")).unwrap();

        let mut pipelines = Vec::new();
        for command in list.get_commands() {
            if let Command::SetRenderState { state, .. } = command {
                pipelines.push(state.pipeline.clone());
                assert!(state.specialization_args.is_none());
            }
        }
        assert_eq!(pipelines.len(), 2);
        match (&*pipelines[0], &*pipelines[1]) {
            (Pipeline::Concrete(a), Pipeline::Concrete(b)) => assert!(Rc::ptr_eq(a, b)),
            _ => panic!("expected both commands to resolve to concrete pipelines"),
        }
    }
}
