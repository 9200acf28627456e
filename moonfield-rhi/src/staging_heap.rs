//! Paged upload/readback pool (spec.md §4.7).
//!
//! A [`StagingHeap`] hands out `(buffer, offset, mapped pointer)` triples
//! sub-allocated from a small set of device buffers ("pages"). Allocation
//! below the page size scans existing pages for a first-fit free node;
//! large allocations get a dedicated page. Unlike [`crate::core::offset_allocator`]
//! (which backs GPU-side descriptor heaps), each page here keeps its own
//! offset-ordered free list so splitting and neighbor coalescing stay
//! straightforward to reason about for a structure this small.

use std::ffi::c_void;
use std::sync::{Arc, Mutex};

use tracing::{debug, trace};

use crate::types::{BufferDesc, BufferUsage, CpuAccessMode, Device, MemoryType, RhiError};

const DEFAULT_ALIGNMENT: u64 = 1024;
const DEFAULT_PAGE_SIZE: u64 = 16 * 1024 * 1024;

fn align_up(value: u64, alignment: u64) -> u64 {
    (value + alignment - 1) & !(alignment - 1)
}

#[derive(Clone, Copy)]
struct Node {
    offset: u64,
    size: u64,
    free: bool,
    metadata: u64,
}

struct Page {
    id: u32,
    buffer: Box<dyn crate::types::Buffer>,
    size: u64,
    used: u64,
    nodes: Vec<Node>,
    is_standard_size: bool,
    mapped_ptr: Option<*mut c_void>,
}

// SAFETY: `mapped_ptr` is only read/written while `StagingHeap::inner` is
// locked, matching the single-writer mapping contract documented on
// `Device::map_buffer`.
unsafe impl Send for Page {}

impl Page {
    fn new(id: u32, buffer: Box<dyn crate::types::Buffer>, size: u64, is_standard_size: bool) -> Self {
        Self {
            id,
            buffer,
            size,
            used: 0,
            nodes: vec![Node { offset: 0, size, free: true, metadata: 0 }],
            is_standard_size,
            mapped_ptr: None,
        }
    }

    /// First-fit scan over the offset-ordered free list.
    fn try_allocate(&mut self, size: u64, metadata: u64) -> Option<u64> {
        let index = self.nodes.iter().position(|n| n.free && n.size >= size)?;
        let node = self.nodes[index];
        self.nodes[index] = Node { offset: node.offset, size, free: false, metadata };
        let remainder = node.size - size;
        if remainder > 0 {
            self.nodes.insert(
                index + 1,
                Node { offset: node.offset + size, size: remainder, free: true, metadata: 0 },
            );
        }
        self.used += size;
        Some(node.offset)
    }

    fn free(&mut self, offset: u64) {
        let index = self
            .nodes
            .iter()
            .position(|n| n.offset == offset && !n.free)
            .expect("freeing an offset not currently allocated from this page");
        self.used -= self.nodes[index].size;
        self.nodes[index].free = true;

        if index + 1 < self.nodes.len() && self.nodes[index + 1].free {
            self.nodes[index].size += self.nodes[index + 1].size;
            self.nodes.remove(index + 1);
        }
        if index > 0 && self.nodes[index - 1].free {
            self.nodes[index - 1].size += self.nodes[index].size;
            self.nodes.remove(index);
        }
    }

    fn is_fully_free(&self) -> bool {
        self.used == 0
    }
}

/// Opaque token identifying a live sub-allocation. Free with
/// [`StagingHeap::free`], or prefer [`StagingHeap::alloc_handle`] for
/// RAII-scoped allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    page_id: u32,
    pub offset: u64,
    pub size: u64,
}

struct Inner {
    pages: Vec<Page>,
    next_page_id: u32,
    used: u64,
    alignment: u64,
    page_size: u64,
    persistent_mapping: bool,
}

/// A multi-page, sub-allocated upload/readback pool.
///
/// All page allocation, free-list manipulation, and mapping bookkeeping is
/// serialized behind one mutex (spec.md §5), matching the shared-mutable
/// status of the shader cache and format-support table elsewhere in the
/// device façade.
pub struct StagingHeap {
    device: Arc<dyn Device>,
    inner: Mutex<Inner>,
}

impl StagingHeap {
    pub fn new(device: Arc<dyn Device>) -> Self {
        Self::with_page_size(device, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(device: Arc<dyn Device>, page_size: u64) -> Self {
        Self {
            device,
            inner: Mutex::new(Inner {
                pages: Vec::new(),
                next_page_id: 0,
                used: 0,
                alignment: DEFAULT_ALIGNMENT,
                page_size,
                persistent_mapping: false,
            }),
        }
    }

    /// Pages stay mapped for their whole lifetime: `map`/`unmap` only touch
    /// the device on a page's first mapping, matching buffers configured to
    /// keep pages permanently mapped (spec.md §4.7).
    pub fn with_persistent_mapping(device: Arc<dyn Device>, page_size: u64) -> Self {
        let heap = Self::with_page_size(device, page_size);
        heap.inner.lock().unwrap().persistent_mapping = true;
        heap
    }

    pub fn used(&self) -> u64 {
        self.inner.lock().unwrap().used
    }

    pub fn page_count(&self) -> usize {
        self.inner.lock().unwrap().pages.len()
    }

    /// Backing byte size of the page holding `allocation`.
    pub fn page_size_of(&self, allocation: Allocation) -> Result<u64, RhiError> {
        let inner = self.inner.lock().unwrap();
        inner
            .pages
            .iter()
            .find(|p| p.id == allocation.page_id)
            .map(|p| p.size)
            .ok_or_else(|| RhiError::Internal("staging allocation references a freed page".into()))
    }

    /// The caller-supplied tag passed to `alloc`/`stage` for this allocation.
    pub fn metadata_of(&self, allocation: Allocation) -> Result<u64, RhiError> {
        let inner = self.inner.lock().unwrap();
        let page = inner
            .pages
            .iter()
            .find(|p| p.id == allocation.page_id)
            .ok_or_else(|| RhiError::Internal("staging allocation references a freed page".into()))?;
        page.nodes
            .iter()
            .find(|n| n.offset == allocation.offset && !n.free)
            .map(|n| n.metadata)
            .ok_or_else(|| RhiError::Internal("staging allocation offset not currently allocated".into()))
    }

    /// Allocate `size` bytes from the heap. Does not map the allocation.
    pub fn alloc(&self, size: u64, metadata: u64) -> Result<Allocation, RhiError> {
        if size == 0 {
            return Err(RhiError::InvalidArgument("staging allocation size must be nonzero".into()));
        }
        let mut inner = self.inner.lock().unwrap();
        let aligned = align_up(size, inner.alignment);

        if aligned < inner.page_size {
            let mut found = None;
            for page in inner.pages.iter_mut() {
                if let Some(offset) = page.try_allocate(aligned, metadata) {
                    found = Some((page.id, offset));
                    break;
                }
            }
            if let Some((page_id, offset)) = found {
                inner.used += aligned;
                trace!(page_id, offset, size = aligned, "staging alloc reused page");
                return Ok(Allocation { page_id, offset, size: aligned });
            }
        }

        let page_size = inner.page_size;
        let is_standard = aligned < page_size;
        let new_page_size = aligned.max(page_size);
        let page_id = inner.next_page_id;
        inner.next_page_id += 1;

        let desc = BufferDesc {
            size: new_page_size,
            memory_type: MemoryType::Upload,
            usage: BufferUsage::COPY_SOURCE | BufferUsage::COPY_DESTINATION,
            label: Some(format!("staging-page-{page_id}")),
            ..Default::default()
        };
        let buffer = self.device.create_buffer(&desc, None)?;
        debug!(page_id, size = new_page_size, "staging heap allocated new page");
        let mut page = Page::new(page_id, buffer, new_page_size, is_standard);
        let offset = page.try_allocate(aligned, metadata).expect("freshly sized page must fit");
        inner.pages.push(page);
        inner.used += aligned;
        Ok(Allocation { page_id, offset, size: aligned })
    }

    /// Allocate, then return an RAII handle that frees on drop.
    pub fn alloc_handle(self: &Arc<Self>, size: u64, metadata: u64) -> Result<StagingAllocationHandle, RhiError> {
        let allocation = self.alloc(size, metadata)?;
        Ok(StagingAllocationHandle { heap: self.clone(), allocation: Some(allocation) })
    }

    /// Allocate, map, copy `data` in, and unmap.
    pub fn stage(&self, data: &[u8], metadata: u64) -> Result<Allocation, RhiError> {
        let allocation = self.alloc(data.len() as u64, metadata)?;
        let ptr = self.map(allocation)?;
        unsafe {
            std::ptr::copy_nonoverlapping(data.as_ptr(), ptr as *mut u8, data.len());
        }
        self.unmap(allocation)?;
        Ok(allocation)
    }

    pub fn stage_handle(self: &Arc<Self>, data: &[u8], metadata: u64) -> Result<StagingAllocationHandle, RhiError> {
        let allocation = self.stage(data, metadata)?;
        Ok(StagingAllocationHandle { heap: self.clone(), allocation: Some(allocation) })
    }

    /// Map the page backing `allocation` and return a pointer to the start
    /// of the allocation (not the page).
    pub fn map(&self, allocation: Allocation) -> Result<*mut c_void, RhiError> {
        let mut inner = self.inner.lock().unwrap();
        let persistent_mapping = inner.persistent_mapping;
        let page = inner
            .pages
            .iter_mut()
            .find(|p| p.id == allocation.page_id)
            .ok_or_else(|| RhiError::Internal("staging allocation references a freed page".into()))?;
        let base = if let Some(ptr) = page.mapped_ptr {
            ptr
        } else {
            let ptr = self.device.map_buffer(page.buffer.as_ref(), CpuAccessMode::Write)?;
            if persistent_mapping {
                page.mapped_ptr = Some(ptr);
            }
            ptr
        };
        Ok(unsafe { (base as *mut u8).add(allocation.offset as usize) as *mut c_void })
    }

    pub fn unmap(&self, allocation: Allocation) -> Result<(), RhiError> {
        let inner = self.inner.lock().unwrap();
        let page = inner
            .pages
            .iter()
            .find(|p| p.id == allocation.page_id)
            .ok_or_else(|| RhiError::Internal("staging allocation references a freed page".into()))?;
        if page.mapped_ptr.is_some() {
            return Ok(());
        }
        self.device.unmap_buffer(page.buffer.as_ref())
    }

    /// Buffer + byte offset backing a live allocation, for copy commands
    /// that source from or target the staging heap.
    pub fn resolve(&self, allocation: Allocation) -> Result<(u32, u64), RhiError> {
        let inner = self.inner.lock().unwrap();
        if inner.pages.iter().any(|p| p.id == allocation.page_id) {
            Ok((allocation.page_id, allocation.offset))
        } else {
            Err(RhiError::Internal("staging allocation references a freed page".into()))
        }
    }

    pub fn free(&self, allocation: Allocation) {
        let mut inner = self.inner.lock().unwrap();
        inner.used -= allocation.size;

        let index = inner.pages.iter().position(|p| p.id == allocation.page_id);
        let Some(index) = index else { return };
        inner.pages[index].free(allocation.offset);

        if inner.pages[index].is_fully_free() {
            let empty_standard_pages =
                inner.pages.iter().filter(|p| p.is_standard_size && p.is_fully_free()).count();
            let should_retire =
                !inner.pages[index].is_standard_size || empty_standard_pages > 1 || inner.used == 0;
            if should_retire {
                debug!(page_id = allocation.page_id, "retiring empty staging page");
                inner.pages.remove(index);
            }
        }
    }
}

/// RAII wrapper around a [`StagingHeap`] allocation; frees on drop.
pub struct StagingAllocationHandle {
    heap: Arc<StagingHeap>,
    allocation: Option<Allocation>,
}

impl StagingAllocationHandle {
    pub fn allocation(&self) -> Allocation {
        self.allocation.expect("handle used after being dropped")
    }

    pub fn map(&self) -> Result<*mut c_void, RhiError> {
        self.heap.map(self.allocation())
    }

    pub fn unmap(&self) -> Result<(), RhiError> {
        self.heap.unmap(self.allocation())
    }
}

impl Drop for StagingAllocationHandle {
    fn drop(&mut self) {
        if let Some(allocation) = self.allocation.take() {
            self.heap.free(allocation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::CpuDevice;

    fn heap_with_page_size(page_size: u64) -> Arc<StagingHeap> {
        let device: Arc<dyn Device> = CpuDevice::new();
        Arc::new(StagingHeap::with_page_size(device, page_size))
    }

    #[test]
    fn s1_staging_coalesce() {
        let heap = heap_with_page_size(8 * 1024 * 1024);
        let mib = 1024 * 1024;
        let a = heap.alloc(mib, 0).unwrap();
        let b = heap.alloc(mib, 0).unwrap();
        let c = heap.alloc(mib, 0).unwrap();

        heap.free(b);
        let inner = heap.inner.lock().unwrap();
        let page = &inner.pages[0];
        let hole = page.nodes.iter().find(|n| n.free && n.offset == mib).unwrap();
        assert_eq!(hole.size, mib);
        drop(inner);

        heap.free(a);
        let inner = heap.inner.lock().unwrap();
        let page = &inner.pages[0];
        let merged = page.nodes.iter().find(|n| n.free && n.offset == 0).unwrap();
        assert_eq!(merged.size, 2 * mib);
        drop(inner);

        heap.free(c);
        assert_eq!(heap.page_count(), 0, "sole empty standard page can also retire");
    }

    #[test]
    fn s1_second_empty_standard_page_retires() {
        let heap = heap_with_page_size(1024 * 1024);
        let a = heap.alloc(512 * 1024, 0).unwrap();
        let b = heap.alloc(1024 * 1024, 0).unwrap();
        assert_eq!(heap.page_count(), 2);
        heap.free(a);
        assert_eq!(heap.page_count(), 2, "first empty standard page is kept around");
        heap.free(b);
        assert_eq!(heap.page_count(), 1, "second empty standard page retires immediately");
    }

    #[test]
    fn oversized_allocation_gets_a_dedicated_non_standard_page() {
        let heap = heap_with_page_size(1024 * 1024);
        let big = heap.alloc(4 * 1024 * 1024, 0).unwrap();
        assert_eq!(heap.page_count(), 1);
        heap.free(big);
        assert_eq!(heap.page_count(), 0, "non-standard pages retire as soon as they're empty");
    }

    #[test]
    fn stage_round_trips_bytes_through_cpu_device() {
        let heap = heap_with_page_size(1024 * 1024);
        let data = [1u8, 2, 3, 4, 5];
        let allocation = heap.stage(&data, 0).unwrap();
        let ptr = heap.map(allocation).unwrap() as *const u8;
        let read = unsafe { std::slice::from_raw_parts(ptr, data.len()) };
        assert_eq!(read, &data);
        heap.unmap(allocation).unwrap();
    }

    #[test]
    fn metadata_and_page_size_are_queryable_for_a_live_allocation() {
        let heap = heap_with_page_size(1024 * 1024);
        let a = heap.alloc(64, 7).unwrap();
        assert_eq!(heap.metadata_of(a).unwrap(), 7);
        assert_eq!(heap.page_size_of(a).unwrap(), 1024 * 1024);
    }

    #[test]
    fn persistent_mapping_keeps_the_page_mapped_across_unmap_calls() {
        let device: Arc<dyn Device> = CpuDevice::new();
        let heap = Arc::new(StagingHeap::with_persistent_mapping(device, 1024 * 1024));
        let allocation = heap.alloc(64, 0).unwrap();

        let first = heap.map(allocation).unwrap();
        heap.unmap(allocation).unwrap();
        let second = heap.map(allocation).unwrap();
        assert_eq!(first, second, "persistently mapped pages must return the same pointer");
        heap.unmap(allocation).unwrap();
    }
}
