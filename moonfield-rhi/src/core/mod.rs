//! Low-level allocators shared by the command list and staging heap.

mod arena;
mod offset_allocator;
mod paged;

pub use arena::ArenaAllocator;
pub use offset_allocator::{Allocation, OffsetAllocator, StorageReport};
pub use paged::PagedAllocator;
