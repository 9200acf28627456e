//! The shader-object parameter tree (spec.md §4.4).
//!
//! Each node mirrors one level of the program's type layout: an
//! ordinary-data byte buffer, a slot vector for resource bindings, and an
//! object vector for sub-object ranges (constant buffers, parameter
//! blocks, existentials). Mutation is legal until [`ShaderObject::finalize`]
//! latches the node; every setter after that returns
//! [`RhiError::AlreadyFinalized`] without touching state.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::shader_object_layout::{BindingRangeInfo, BindingRangeKind, ShaderObjectLayout};
use crate::types::{
    Binding, Buffer, BufferDesc, BufferUsage, Device, ResourceState, RhiError, ShaderObjectContainerType, ShaderOffset,
};

pub type ShaderObjectUid = u64;

fn next_uid() -> ShaderObjectUid {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

/// Simulates Slang's `getTypeConformanceWitnessSequentialID`: hands out a
/// stable small integer per `(concreteType, existentialType)` pair, and a
/// stable per-type id for `rtti_id`.
#[derive(Default)]
pub struct TypeConformanceRegistry {
    witness_ids: HashMap<(String, String), u32>,
    rtti_ids: HashMap<String, u32>,
    next_witness: u32,
    next_rtti: u32,
}

impl TypeConformanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn witness_id(&mut self, concrete_type: &str, existential_type: &str) -> u32 {
        let key = (concrete_type.to_string(), existential_type.to_string());
        if let Some(&id) = self.witness_ids.get(&key) {
            return id;
        }
        let id = self.next_witness;
        self.next_witness += 1;
        self.witness_ids.insert(key, id);
        id
    }

    pub fn rtti_id(&mut self, concrete_type: &str) -> u32 {
        if let Some(&id) = self.rtti_ids.get(concrete_type) {
            return id;
        }
        let id = self.next_rtti;
        self.next_rtti += 1;
        self.rtti_ids.insert(concrete_type.to_string(), id);
        id
    }
}

const EXISTENTIAL_HEADER_SIZE: usize = 16;

/// One concrete specialization argument, as a stringified type (spec.md's
/// "stringifying the specialized type's argument list").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecializationArg {
    Concrete(String),
    /// The session's `__Dynamic` placeholder used by the array-uniformity rule.
    Dynamic,
}

pub struct ShaderObject {
    layout: Rc<ShaderObjectLayout>,
    data: Vec<u8>,
    slots: Vec<Option<Binding>>,
    objects: Vec<Option<Rc<RefCell<ShaderObject>>>>,
    user_specialization_overrides: HashMap<u32, Vec<SpecializationArg>>,
    structured_buffer_specialization_args: Vec<SpecializationArg>,
    concrete_type_name: Option<String>,
    /// Existential children whose payload did not fit their slot at bind
    /// time, keyed by the header offset in `data` they were bound at.
    /// `write_ordinary_data` recurses into these to fill the region a
    /// specialized layout would reserve for the now-concrete value.
    overflow_children: Vec<(usize, Rc<RefCell<ShaderObject>>)>,
    version: u64,
    finalized: bool,
    uid: ShaderObjectUid,
}

impl ShaderObject {
    pub fn new(layout: Rc<ShaderObjectLayout>) -> Self {
        let data = vec![0u8; layout.ordinary_data_size as usize];
        let slots = vec![None; layout.slot_count() as usize];
        let objects = (0..layout.sub_object_count()).map(|_| None).collect();
        Self {
            layout,
            data,
            slots,
            objects,
            user_specialization_overrides: HashMap::new(),
            structured_buffer_specialization_args: Vec::new(),
            concrete_type_name: None,
            overflow_children: Vec::new(),
            version: 0,
            finalized: false,
            uid: next_uid(),
        }
    }

    pub fn uid(&self) -> ShaderObjectUid {
        self.uid
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn layout(&self) -> &ShaderObjectLayout {
        &self.layout
    }

    pub fn raw_data(&self) -> &[u8] {
        &self.data
    }

    /// Set the concrete type name this node represents, for specialization
    /// argument collection and existential header writes when this node is
    /// bound as someone else's existential value.
    pub fn set_concrete_type(&mut self, name: impl Into<String>) {
        self.concrete_type_name = Some(name.into());
    }

    pub fn set_structured_buffer_specialization_args(&mut self, args: Vec<SpecializationArg>) {
        self.structured_buffer_specialization_args = args;
    }

    fn check_mutable(&self) -> Result<(), RhiError> {
        if self.finalized {
            Err(RhiError::AlreadyFinalized)
        } else {
            Ok(())
        }
    }

    /// §4.4.2 `setData` — clamps to `data.len() - offset.uniform_offset`, truncating silently.
    pub fn set_data(&mut self, offset: ShaderOffset, bytes: &[u8]) -> Result<(), RhiError> {
        self.check_mutable()?;
        let start = offset.uniform_offset as usize;
        if start >= self.data.len() {
            self.version += 1;
            return Ok(());
        }
        let available = self.data.len() - start;
        let n = bytes.len().min(available);
        self.data[start..start + n].copy_from_slice(&bytes[..n]);
        self.version += 1;
        Ok(())
    }

    /// §4.4.2 `setBinding`.
    pub fn set_binding(&mut self, offset: ShaderOffset, binding: Option<Binding>) -> Result<(), RhiError> {
        self.check_mutable()?;
        let range = self
            .layout
            .binding_ranges
            .get(offset.binding_range_index as usize)
            .ok_or_else(|| RhiError::InvalidArgument("binding range index out of bounds".into()))?;
        let slot = range.slot_index as usize + offset.binding_array_index as usize;
        *self
            .slots
            .get_mut(slot)
            .ok_or_else(|| RhiError::InvalidArgument("binding slot index out of bounds".into()))? = binding;
        self.version += 1;
        Ok(())
    }

    /// §4.4.2 `setDescriptorHandle` — writes 8 raw bytes, deliberately overlapping `setData`'s range.
    pub fn set_descriptor_handle(&mut self, offset: ShaderOffset, handle: u64) -> Result<(), RhiError> {
        self.set_data(offset, &handle.to_le_bytes())
    }

    /// Override the specialization argument collected for a sub-object range.
    pub fn set_specialization_args(&mut self, binding_range_index: u32, args: Vec<SpecializationArg>) -> Result<(), RhiError> {
        self.check_mutable()?;
        self.user_specialization_overrides.insert(binding_range_index, args);
        self.version += 1;
        Ok(())
    }

    /// §4.4.2 `setObject` — container self grows in place; non-container self
    /// dispatches on the target binding range's kind.
    pub fn set_object(
        &mut self,
        offset: ShaderOffset,
        child: Rc<RefCell<ShaderObject>>,
        registry: &mut TypeConformanceRegistry,
    ) -> Result<(), RhiError> {
        self.check_mutable()?;

        if self.layout.container_kind != ShaderObjectContainerType::None {
            let index = offset.binding_array_index as usize;
            if index >= self.objects.len() {
                self.objects.resize(index + 1, None);
            }
            let child_data = child.borrow().data.clone();
            let element_size = self.layout.ordinary_data_size as usize;
            let needed = (index + 1) * element_size;
            if self.data.len() < needed {
                self.data.resize(needed, 0);
            }
            let start = index * element_size;
            let n = child_data.len().min(element_size);
            self.data[start..start + n].copy_from_slice(&child_data[..n]);
            self.objects[index] = Some(child);
            self.version += 1;
            return Ok(());
        }

        let range = self
            .layout
            .binding_ranges
            .get(offset.binding_range_index as usize)
            .ok_or_else(|| RhiError::InvalidArgument("binding range index out of bounds".into()))?
            .clone();
        let base_sub_object_index = range
            .sub_object_index
            .ok_or_else(|| RhiError::InvalidArgument("binding range is not a sub-object range".into()))?
            as usize;
        if offset.binding_array_index >= range.slot_count.max(1) {
            return Err(RhiError::InvalidArgument("binding array index out of bounds".into()));
        }
        let sub_object_index = base_sub_object_index + offset.binding_array_index as usize;

        match range.kind {
            BindingRangeKind::ExistentialValue => {
                let existential_type = range.existential_type_name.as_deref().unwrap_or("");
                let concrete_type = child.borrow().concrete_type_name.clone().unwrap_or_default();
                let rtti_id = registry.rtti_id(&concrete_type);
                let witness_table_id = registry.witness_id(&concrete_type, existential_type);

                let header_start = offset.uniform_offset as usize;
                if header_start + EXISTENTIAL_HEADER_SIZE <= self.data.len() {
                    self.data[header_start..header_start + 8].copy_from_slice(&(rtti_id as u64).to_le_bytes());
                    self.data[header_start + 8..header_start + 16]
                        .copy_from_slice(&(witness_table_id as u64).to_le_bytes());
                }

                self.overflow_children.retain(|(start, _)| *start != header_start);
                let concrete_size = child.borrow().data.len();
                let uses_only_uniform = child.borrow().objects.iter().all(|o| o.is_none());
                let fits = concrete_size <= range.existential_payload_bytes as usize && uses_only_uniform;
                if fits {
                    let payload_start = header_start + EXISTENTIAL_HEADER_SIZE;
                    let child_data = child.borrow().data.clone();
                    let n = child_data.len().min(self.data.len().saturating_sub(payload_start));
                    self.data[payload_start..payload_start + n].copy_from_slice(&child_data[..n]);
                } else {
                    self.overflow_children.push((header_start, child.clone()));
                }
                self.objects[sub_object_index] = Some(child);
            }
            BindingRangeKind::ParameterBlock | BindingRangeKind::ConstantBuffer => {
                self.objects[sub_object_index] = Some(child);
            }
            BindingRangeKind::RawBuffer | BindingRangeKind::MutableRawBuffer => {
                // Materializing the backing buffer needs a `Device` (see
                // `write_structured_buffer`), which this call doesn't have;
                // stash the child so a later device pass can rebind it.
                self.objects[sub_object_index] = Some(child);
            }
            _ => return Err(RhiError::InvalidArgument("binding range is not a sub-object range".into())),
        }

        self.version += 1;
        Ok(())
    }

    /// §4.4.5 `writeStructuredBuffer` — materializes the backing GPU buffer
    /// for a `RawBuffer`/`MutableRawBuffer` sub-object from this node's raw
    /// data: sized to `data.len()`, strided by `element_stride`, readable
    /// and writable by shaders, seeded with the node's current contents.
    pub fn write_structured_buffer(
        &self,
        device: &dyn Device,
        element_stride: u32,
    ) -> Result<Box<dyn Buffer>, RhiError> {
        let desc = BufferDesc {
            size: self.data.len() as u64,
            element_size: element_stride,
            default_state: ResourceState::ShaderResource,
            usage: BufferUsage::SHADER_RESOURCE | BufferUsage::UNORDERED_ACCESS,
            ..Default::default()
        };
        device.create_buffer(&desc, Some(&self.data))
    }

    /// §4.4.1 latch — once true, every mutator above returns `AlreadyFinalized`.
    pub fn finalize(&mut self) -> Result<(), RhiError> {
        self.check_mutable()?;
        self.finalized = true;
        Ok(())
    }

    /// §4.4.3 recursive specialization-argument collection.
    ///
    /// Container self contributes its structured-buffer args; otherwise each
    /// sub-object range contributes per its binding kind, honoring user
    /// overrides and recursing into children. Ranges with `slot_count > 1`
    /// (arrays of sub-objects) apply the array-uniformity rule: every
    /// element's argument tuple is collected independently and compared
    /// position by position, substituting `SpecializationArg::Dynamic`
    /// wherever the elements disagree, so the range contributes exactly one
    /// merged tuple regardless of array length.
    pub fn collect_specialization_args(&self, out: &mut Vec<SpecializationArg>) {
        if self.layout.container_kind != ShaderObjectContainerType::None {
            out.extend(self.structured_buffer_specialization_args.iter().cloned());
        }

        for (range_index, range) in self.layout.binding_ranges.iter().enumerate() {
            let Some(base_sub_object_index) = range.sub_object_index else { continue };
            if let Some(override_args) = self.user_specialization_overrides.get(&(range_index as u32)) {
                out.extend(override_args.iter().cloned());
                continue;
            }

            let slot_count = range.slot_count.max(1) as usize;
            if slot_count == 1 {
                self.collect_element_args(range, base_sub_object_index as usize, out);
                continue;
            }

            let per_element: Vec<Vec<SpecializationArg>> = (0..slot_count)
                .map(|i| {
                    let mut elem_args = Vec::new();
                    self.collect_element_args(range, base_sub_object_index as usize + i, &mut elem_args);
                    elem_args
                })
                .collect();
            out.extend(merge_array_element_args(&per_element));
        }
    }

    /// The specialization-argument tuple contributed by a single sub-object
    /// slot, before array-uniformity merging.
    fn collect_element_args(&self, range: &BindingRangeInfo, sub_object_index: usize, out: &mut Vec<SpecializationArg>) {
        let Some(Some(child)) = self.objects.get(sub_object_index) else { return };
        let child = child.borrow();
        match range.kind {
            BindingRangeKind::ExistentialValue => {
                let concrete = child.concrete_type_name.clone().unwrap_or_else(|| "__Dynamic".to_string());
                out.push(SpecializationArg::Concrete(concrete));
                child.collect_specialization_args(out);
            }
            BindingRangeKind::ParameterBlock | BindingRangeKind::ConstantBuffer => {
                if range.is_specializable {
                    let concrete = child.concrete_type_name.clone().unwrap_or_else(|| "__Dynamic".to_string());
                    out.push(SpecializationArg::Concrete(concrete));
                }
                child.collect_specialization_args(out);
            }
            _ => {}
        }
    }

    /// §4.4.5 `writeOrdinaryData` — copy ordinary bytes, then recurse into
    /// children whose payload did not fit their existential slot, writing
    /// them into the region a specialized layout reserves for the
    /// now-concrete value (here, the slot the generic existential header
    /// occupied).
    pub fn write_ordinary_data(&self, dst: &mut [u8]) -> usize {
        let n = self.data.len().min(dst.len());
        dst[..n].copy_from_slice(&self.data[..n]);
        for (region_start, child) in &self.overflow_children {
            if *region_start >= dst.len() {
                continue;
            }
            child.borrow().write_ordinary_data(&mut dst[*region_start..]);
        }
        n
    }
}

/// §4.4.3 array-uniformity rule: merge each array element's argument tuple
/// position by position, substituting `Dynamic` where elements disagree (or
/// where an element's tuple is shorter than another's).
fn merge_array_element_args(per_element: &[Vec<SpecializationArg>]) -> Vec<SpecializationArg> {
    let max_len = per_element.iter().map(Vec::len).max().unwrap_or(0);
    let mut merged = Vec::with_capacity(max_len);
    for position in 0..max_len {
        let mut agreed: Option<&SpecializationArg> = None;
        let mut uniform = true;
        for element in per_element {
            match (agreed, element.get(position)) {
                (_, None) => uniform = false,
                (None, Some(arg)) => agreed = Some(arg),
                (Some(prev), Some(arg)) if prev == arg => {}
                _ => uniform = false,
            }
            if !uniform {
                break;
            }
        }
        merged.push(match (uniform, agreed) {
            (true, Some(arg)) => arg.clone(),
            _ => SpecializationArg::Dynamic,
        });
    }
    merged
}

/// §3/§4.4.4 the object bound as a whole pipeline's root: the global scope
/// plus one child per entry point in the linked program.
pub struct RootShaderObject {
    global: Rc<RefCell<ShaderObject>>,
    entry_points: Vec<Rc<RefCell<ShaderObject>>>,
}

impl RootShaderObject {
    pub fn new(
        global_layout: Rc<ShaderObjectLayout>,
        entry_point_layouts: impl IntoIterator<Item = Rc<ShaderObjectLayout>>,
    ) -> Self {
        Self {
            global: Rc::new(RefCell::new(ShaderObject::new(global_layout))),
            entry_points: entry_point_layouts
                .into_iter()
                .map(|layout| Rc::new(RefCell::new(ShaderObject::new(layout))))
                .collect(),
        }
    }

    /// Wraps an already-populated global-scope object with no entry points.
    pub fn from_global_object(global: Rc<RefCell<ShaderObject>>) -> Self {
        Self { global, entry_points: Vec::new() }
    }

    pub fn global_object(&self) -> &Rc<RefCell<ShaderObject>> {
        &self.global
    }

    pub fn entry_point(&self, index: usize) -> Option<&Rc<RefCell<ShaderObject>>> {
        self.entry_points.get(index)
    }

    pub fn entry_point_count(&self) -> usize {
        self.entry_points.len()
    }

    /// §4.4.4: global-scope specialization args followed by each entry
    /// point's args, in entry-point order.
    pub fn collect_specialization_args(&self, out: &mut Vec<SpecializationArg>) {
        self.global.borrow().collect_specialization_args(out);
        for entry_point in &self.entry_points {
            entry_point.borrow().collect_specialization_args(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader_object_layout::BindingRangeKind;
    use crate::types::BufferRange;

    fn leaf_layout(existential_size: u32) -> Rc<ShaderObjectLayout> {
        Rc::new(ShaderObjectLayout::builder().ordinary_data_size(existential_size).build())
    }

    fn root_layout() -> Rc<ShaderObjectLayout> {
        Rc::new(
            ShaderObjectLayout::builder()
                .ordinary_data_size(64)
                .binding_range(BindingRangeKind::Buffer, 1, false)
                .existential_range("IMaterial", 32)
                .build(),
        )
    }

    #[test]
    fn s4_finalize_latches_every_mutator() {
        let mut root = ShaderObject::new(root_layout());
        root.set_data(ShaderOffset::new(0, 0, 0), &4u32.to_le_bytes()).unwrap();
        root.finalize().unwrap();

        assert_eq!(root.set_data(ShaderOffset::new(0, 0, 0), &9u32.to_le_bytes()), Err(RhiError::AlreadyFinalized));
        assert_eq!(&root.raw_data()[0..4], &4u32.to_le_bytes());

        let binding = Binding::buffer(std::ptr::null_mut(), BufferRange::default());
        assert_eq!(root.set_binding(ShaderOffset::new(0, 0, 0), Some(binding)), Err(RhiError::AlreadyFinalized));
        assert_eq!(root.set_descriptor_handle(ShaderOffset::new(0, 0, 0), 1), Err(RhiError::AlreadyFinalized));
        assert_eq!(root.set_specialization_args(0, vec![]), Err(RhiError::AlreadyFinalized));
    }

    #[test]
    fn set_data_clamps_rather_than_erroring() {
        let mut root = ShaderObject::new(root_layout());
        let oversized = vec![0xAAu8; 1000];
        root.set_data(ShaderOffset::new(60, 0, 0), &oversized).unwrap();
        assert_eq!(root.raw_data().len(), 64);
    }

    #[test]
    fn existential_header_and_payload_written_when_concrete_type_fits() {
        let mut registry = TypeConformanceRegistry::new();
        let mut root = ShaderObject::new(root_layout());
        let leaf = Rc::new(RefCell::new(ShaderObject::new(leaf_layout(8))));
        leaf.borrow_mut().set_concrete_type("LambertMaterial");
        leaf.borrow_mut().set_data(ShaderOffset::new(0, 0, 0), &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();

        root.set_object(ShaderOffset::new(8, 1, 0), leaf, &mut registry).unwrap();

        let header = &root.raw_data()[8..24];
        let rtti = u64::from_le_bytes(header[0..8].try_into().unwrap());
        let witness = u64::from_le_bytes(header[8..16].try_into().unwrap());
        assert_eq!(rtti, 0);
        assert_eq!(witness, 0);
        assert_eq!(&root.raw_data()[24..32], &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn oversized_existential_payload_is_not_copied() {
        let mut registry = TypeConformanceRegistry::new();
        let mut root = ShaderObject::new(root_layout());
        let leaf = Rc::new(RefCell::new(ShaderObject::new(leaf_layout(64))));
        leaf.borrow_mut().set_concrete_type("HugeMaterial");
        leaf.borrow_mut().set_data(ShaderOffset::new(0, 0, 0), &[0xFFu8; 64]).unwrap();

        root.set_object(ShaderOffset::new(8, 1, 0), leaf, &mut registry).unwrap();

        assert!(root.raw_data()[24..].iter().all(|&b| b == 0), "oversized payload must not be copied inline");
    }

    #[test]
    fn s3_collect_specialization_args_is_deterministic() {
        let mut registry = TypeConformanceRegistry::new();
        let mut make_root = || {
            let mut root = ShaderObject::new(root_layout());
            let leaf = Rc::new(RefCell::new(ShaderObject::new(leaf_layout(8))));
            leaf.borrow_mut().set_concrete_type("LambertMaterial");
            root.set_object(ShaderOffset::new(8, 1, 0), leaf, &mut registry).unwrap();
            root
        };
        let r1 = make_root();
        let r2 = make_root();

        let mut args1 = Vec::new();
        let mut args2 = Vec::new();
        r1.collect_specialization_args(&mut args1);
        r2.collect_specialization_args(&mut args2);
        assert_eq!(args1, args2);
        assert_eq!(args1, vec![SpecializationArg::Concrete("LambertMaterial".to_string())]);
    }

    #[test]
    fn write_ordinary_data_recurses_into_overflowing_existential_children() {
        let mut registry = TypeConformanceRegistry::new();
        let mut root = ShaderObject::new(root_layout());
        let leaf = Rc::new(RefCell::new(ShaderObject::new(leaf_layout(64))));
        leaf.borrow_mut().set_concrete_type("HugeMaterial");
        leaf.borrow_mut().set_data(ShaderOffset::new(0, 0, 0), &[0xFFu8; 64]).unwrap();
        root.set_object(ShaderOffset::new(8, 1, 0), leaf, &mut registry).unwrap();

        let mut dst = vec![0u8; 72];
        let n = root.write_ordinary_data(&mut dst);
        assert_eq!(n, 64);
        assert!(
            dst[8..72].iter().all(|&b| b == 0xFF),
            "overflowing child's data must be recursed into the specialized region"
        );
    }

    #[test]
    fn write_ordinary_data_skips_recursion_once_payload_fits() {
        let mut registry = TypeConformanceRegistry::new();
        let mut root = ShaderObject::new(root_layout());
        let leaf = Rc::new(RefCell::new(ShaderObject::new(leaf_layout(8))));
        leaf.borrow_mut().set_data(ShaderOffset::new(0, 0, 0), &[7u8; 8]).unwrap();
        root.set_object(ShaderOffset::new(8, 1, 0), leaf, &mut registry).unwrap();

        let mut dst = vec![0u8; 64];
        root.write_ordinary_data(&mut dst);
        assert_eq!(&dst[24..32], &[7u8; 8], "fitting payload is already inline, not recursed");
    }

    fn array_layout() -> Rc<ShaderObjectLayout> {
        Rc::new(ShaderObjectLayout::builder().binding_range(BindingRangeKind::ParameterBlock, 2, true).build())
    }

    #[test]
    fn array_uniformity_keeps_concrete_arg_when_all_elements_agree() {
        let mut registry = TypeConformanceRegistry::new();
        let mut root = ShaderObject::new(array_layout());
        for i in 0..2 {
            let child = Rc::new(RefCell::new(ShaderObject::new(leaf_layout(0))));
            child.borrow_mut().set_concrete_type("LambertMaterial");
            root.set_object(ShaderOffset::new(0, 0, i), child, &mut registry).unwrap();
        }

        let mut args = Vec::new();
        root.collect_specialization_args(&mut args);
        assert_eq!(args, vec![SpecializationArg::Concrete("LambertMaterial".to_string())]);
    }

    #[test]
    fn array_uniformity_substitutes_dynamic_when_elements_disagree() {
        let mut registry = TypeConformanceRegistry::new();
        let mut root = ShaderObject::new(array_layout());
        let a = Rc::new(RefCell::new(ShaderObject::new(leaf_layout(0))));
        a.borrow_mut().set_concrete_type("LambertMaterial");
        let b = Rc::new(RefCell::new(ShaderObject::new(leaf_layout(0))));
        b.borrow_mut().set_concrete_type("PhongMaterial");
        root.set_object(ShaderOffset::new(0, 0, 0), a, &mut registry).unwrap();
        root.set_object(ShaderOffset::new(0, 0, 1), b, &mut registry).unwrap();

        let mut args = Vec::new();
        root.collect_specialization_args(&mut args);
        assert_eq!(args, vec![SpecializationArg::Dynamic]);
    }

    #[test]
    fn write_structured_buffer_materializes_node_data_as_a_shader_resource() {
        let device = crate::device::CpuDevice::new();
        let mut leaf = ShaderObject::new(leaf_layout(16));
        leaf.set_data(ShaderOffset::new(0, 0, 0), &[9u8; 16]).unwrap();

        let buffer = leaf.write_structured_buffer(device.as_ref(), 4).unwrap();
        assert_eq!(buffer.get_desc().size, 16);
        assert_eq!(buffer.get_desc().element_size, 4);
        assert_eq!(buffer.get_desc().default_state, crate::types::ResourceState::ShaderResource);
        assert!(buffer.get_desc().usage.contains(crate::types::BufferUsage::SHADER_RESOURCE));
        assert!(buffer.get_desc().usage.contains(crate::types::BufferUsage::UNORDERED_ACCESS));
    }

    #[test]
    fn root_shader_object_concatenates_global_then_entry_point_args() {
        let global = root_layout();
        let entry_point = root_layout();
        let root = RootShaderObject::new(global, [entry_point]);

        let mut registry = TypeConformanceRegistry::new();
        let global_child = Rc::new(RefCell::new(ShaderObject::new(leaf_layout(0))));
        global_child.borrow_mut().set_concrete_type("GlobalMaterial");
        root.global_object().borrow_mut().set_object(ShaderOffset::new(8, 1, 0), global_child, &mut registry).unwrap();

        let entry_child = Rc::new(RefCell::new(ShaderObject::new(leaf_layout(0))));
        entry_child.borrow_mut().set_concrete_type("EntryPointMaterial");
        root.entry_point(0)
            .unwrap()
            .borrow_mut()
            .set_object(ShaderOffset::new(8, 1, 0), entry_child, &mut registry)
            .unwrap();

        let mut args = Vec::new();
        root.collect_specialization_args(&mut args);
        assert_eq!(
            args,
            vec![
                SpecializationArg::Concrete("GlobalMaterial".to_string()),
                SpecializationArg::Concrete("EntryPointMaterial".to_string()),
            ]
        );
        assert_eq!(root.entry_point_count(), 1);
    }
}
