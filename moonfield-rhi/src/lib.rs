//! Backend-agnostic rendering hardware interface.
//!
//! `moonfield-rhi` sits between a graphics application and a concrete
//! backend (D3D12, Vulkan, Metal, CUDA, WebGPU, or an in-process CPU
//! fallback). It owns the parts of a modern RHI that are genuinely
//! backend-independent: command recording, shader-object binding trees,
//! pipeline specialization and caching, and a paged staging heap for
//! upload/readback traffic. Per-backend translation is delegated to an
//! implementation of the [`backend::Backend`] trait.

pub mod types;

pub mod core;

pub mod resource;
pub mod staging_heap;

pub mod command_list;
pub mod command_encoder;

pub mod shader_object_layout;
pub mod shader_object;

pub mod shader_cache;
pub mod pipeline;

pub mod format;

pub mod device;

pub mod backend;

pub use types::*;
