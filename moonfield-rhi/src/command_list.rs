//! Typed, arena-backed command list (spec.md §4.1).
//!
//! `write` never touches the device: it only captures intent. Every command
//! variant is a POD-ish struct; arrays a command needs to dereference on
//! playback (vertex buffer lists, render pass attachments, build inputs)
//! are copied into the list's own [`ArenaAllocator`] so the command stays
//! self-contained once the caller's originals go away. Resources the
//! command references are kept alive in a parallel retained-resource list;
//! nothing is dropped until `reset`.

use std::any::Any;
use std::ffi::c_void;
use std::rc::Rc;

use crate::core::ArenaAllocator;
use crate::pipeline::Pipeline;
use crate::shader_cache::ShaderComponentId;
use crate::shader_object::RootShaderObject;
use crate::types::{
    AccelerationStructureBuildDesc, AccelerationStructureCopyMode, BufferOffsetPair, BufferRange,
    DrawArguments, IndirectDispatchArguments, IndirectDrawArguments, IndirectDrawIndexedArguments,
    MarkerColor, RenderPassColorAttachment, RenderPassDepthStencilAttachment, ResourceState,
    SubresourceLayout,
};

/// A pipeline + finalized binding state captured at draw/dispatch time.
///
/// `specialization_args` is populated by the encoder and cleared by
/// [`crate::command_encoder`]'s pipeline-resolution pass once the concrete
/// pipeline has been substituted in (§4.3: `cmd.pipeline ← concrete`,
/// `cmd.specializationArgs ← null`).
#[derive(Clone)]
pub struct PipelineState {
    pub pipeline: Rc<Pipeline>,
    pub specialization_args: Option<Rc<[ShaderComponentId]>>,
    pub root_object: Rc<RootShaderObject>,
}

#[derive(Clone)]
pub enum Command {
    CopyBuffer { dst: *mut c_void, dst_offset: u64, src: *mut c_void, src_offset: u64, size: u64 },
    CopyTexture { dst: *mut c_void, src: *mut c_void },
    CopyTextureToBuffer { dst: *mut c_void, dst_offset: u64, src: *mut c_void },
    UploadTextureData {
        texture: *mut c_void,
        layouts: &'static [SubresourceLayout],
        staging_buffer: *mut c_void,
        staging_offset: u64,
    },
    ClearBuffer { buffer: *mut c_void, range: BufferRange },
    ClearTextureFloat { texture: *mut c_void, value: [f32; 4] },
    ClearTextureUint { texture: *mut c_void, value: [u32; 4] },
    ClearTextureDepthStencil { texture: *mut c_void, depth: f32, stencil: u8 },
    ResolveQuery { pool: *mut c_void, index: u32, count: u32, dst: *mut c_void, dst_offset: u64 },

    BeginRenderPass {
        color_attachments: &'static [RenderPassColorAttachment],
        depth_stencil_attachment: Option<RenderPassDepthStencilAttachment>,
    },
    EndRenderPass,

    SetRenderState {
        state: PipelineState,
        vertex_buffers: &'static [BufferOffsetPair],
        index_buffer: Option<BufferOffsetPair>,
    },
    SetComputeState { state: PipelineState },
    SetRayTracingState { state: PipelineState },

    Draw(DrawArguments),
    DrawIndexed(DrawArguments),
    DrawIndirect(IndirectDrawArguments),
    DrawIndexedIndirect(IndirectDrawIndexedArguments),
    DrawMeshTasks { x: u32, y: u32, z: u32 },

    DispatchCompute { x: u32, y: u32, z: u32 },
    DispatchComputeIndirect(IndirectDispatchArguments),
    DispatchRays { ray_gen_shader_index: u32, width: u32, height: u32, depth: u32 },

    BuildAccelerationStructure { desc: &'static AccelerationStructureBuildDesc },
    CopyAccelerationStructure { src: *mut c_void, dst: *mut c_void, mode: AccelerationStructureCopyMode },
    SerializeAccelerationStructure { src: *mut c_void, dst_buffer: *mut c_void, dst_offset: u64 },
    DeserializeAccelerationStructure { src_buffer: *mut c_void, src_offset: u64, dst: *mut c_void },

    SetBufferState { buffer: *mut c_void, state: ResourceState },
    SetTextureState { texture: *mut c_void, state: ResourceState },
    GlobalBarrier,

    PushDebugGroup { name: &'static str, color: MarkerColor },
    PopDebugGroup,
    InsertDebugMarker { name: &'static str, color: MarkerColor },

    WriteTimestamp { pool: *mut c_void, index: u32 },
}

/// Ordered sequence of commands plus the resources they reference.
///
/// Commands and any arrays they embed live in an [`ArenaAllocator`]; the
/// arena guarantees a page is never moved or reused while commands still
/// point into it, so the raw pointers stashed in `order` stay valid from
/// `write` through `reset`.
pub struct CommandList {
    arena: ArenaAllocator,
    order: Vec<*mut Command>,
    retained: Vec<Rc<dyn Any>>,
}

impl CommandList {
    pub fn new() -> Self {
        Self { arena: ArenaAllocator::new(), order: Vec::new(), retained: Vec::new() }
    }

    /// Copy `slice` into the list's arena and return a pointer with the
    /// list's own lifetime (valid until the next `reset`).
    pub fn copy_slice<T: Clone>(&mut self, slice: &[T]) -> &'static [T] {
        if slice.is_empty() {
            return &[];
        }
        let bytes = std::mem::size_of_val(slice);
        let align = std::mem::align_of::<T>();
        let ptr = self.arena.allocate(bytes, align) as *mut T;
        unsafe {
            for (i, item) in slice.iter().enumerate() {
                ptr.add(i).write(item.clone());
            }
            std::slice::from_raw_parts(ptr, slice.len())
        }
    }

    /// Copy `value` into the list's arena and return a pointer with the
    /// list's own lifetime.
    pub fn copy_val<T>(&mut self, value: T) -> &'static T {
        unsafe { &*(self.arena.allocate_val(value) as *mut T) }
    }

    /// Copy a `&str` into the arena as a byte buffer, re-borrowed as `&str`.
    pub fn copy_str(&mut self, s: &str) -> &'static str {
        let bytes = self.copy_slice(s.as_bytes());
        unsafe { std::str::from_utf8_unchecked(bytes) }
    }

    /// Append a command. `retain` must include every resource the command
    /// will dereference on playback; it's appended to the retained set
    /// before the command becomes visible to `get_commands`.
    pub fn write(&mut self, command: Command, retain: impl IntoIterator<Item = Rc<dyn Any>>) {
        self.retained.extend(retain);
        let slot = self.arena.allocate_val(command) as *mut Command;
        self.order.push(slot);
    }

    /// Iterate commands in recording order.
    pub fn get_commands(&self) -> impl Iterator<Item = &Command> {
        // SAFETY: every pointer in `order` was produced by `arena.allocate_val`
        // on `self` and the arena never moves or frees a page while the list
        // is alive, so dereferencing for the list's own lifetime is sound.
        self.order.iter().map(|&ptr| unsafe { &*ptr })
    }

    /// Mutable iteration used by pipeline resolution (§4.3) to rewrite
    /// `Set*State` commands in place once concrete pipelines are known.
    pub fn get_commands_mut(&mut self) -> impl Iterator<Item = &mut Command> {
        self.order.iter().map(|&ptr| unsafe { &mut *ptr })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn retained_count(&self) -> usize {
        self.retained.len()
    }

    /// Release retained resources, drop all commands, and reset the arena.
    pub fn reset(&mut self) {
        self.order.clear();
        self.retained.clear();
        self.arena.reset();
    }
}

impl Default for CommandList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LoadOp;
    use crate::types::StoreOp;

    #[allow(dead_code)]
    struct Dummy(u32);

    #[test]
    fn write_then_iterate_preserves_order() {
        let mut list = CommandList::new();
        let name = list.copy_str("frame");
        list.write(Command::PushDebugGroup { name, color: MarkerColor::WHITE }, []);
        list.write(Command::Draw(DrawArguments { vertex_count: 3, ..Default::default() }), []);
        list.write(Command::PopDebugGroup, []);

        let commands: Vec<&Command> = list.get_commands().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], Command::PushDebugGroup { .. }));
        assert!(matches!(commands[1], Command::Draw(_)));
        assert!(matches!(commands[2], Command::PopDebugGroup));
    }

    #[test]
    fn s5_retained_resources_outlive_caller_references() {
        let mut list = CommandList::new();
        {
            let buffer: Rc<dyn Any> = Rc::new(Dummy(42));
            let weak = Rc::downgrade(&buffer);
            list.write(
                Command::ClearBuffer { buffer: std::ptr::null_mut(), range: BufferRange { offset: 0, size: 4 } },
                [buffer],
            );
            assert!(weak.upgrade().is_some(), "command list must hold a strong reference");
        }
        assert_eq!(list.retained_count(), 1);
        list.reset();
        assert_eq!(list.retained_count(), 0);
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn reset_clears_commands_and_replays_arena_addresses() {
        let mut list = CommandList::new();
        list.write(Command::EndRenderPass, []);
        list.write(Command::GlobalBarrier, []);
        assert_eq!(list.len(), 2);
        list.reset();
        assert!(list.is_empty());
        list.write(Command::EndRenderPass, []);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn begin_render_pass_copies_attachment_array_into_arena() {
        let mut list = CommandList::new();
        let attachments = [RenderPassColorAttachment {
            view: None,
            resolve_target: None,
            load_op: LoadOp::Clear,
            store_op: StoreOp::Store,
            clear_value: [1.0, 0.0, 0.0, 1.0],
        }];
        let copied = list.copy_slice(&attachments);
        list.write(
            Command::BeginRenderPass { color_attachments: copied, depth_stencil_attachment: None },
            [],
        );
        let commands: Vec<&Command> = list.get_commands().collect();
        match commands[0] {
            Command::BeginRenderPass { color_attachments, .. } => {
                assert_eq!(color_attachments.len(), 1);
                assert_eq!(color_attachments[0].clear_value, [1.0, 0.0, 0.0, 1.0]);
            }
            _ => panic!("expected BeginRenderPass"),
        }
    }
}
