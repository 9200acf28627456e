//! Shader-object layout tables (spec.md §4.5).
//!
//! Mirrors what a Slang `TypeLayoutReflection` walk would hand back: a
//! container kind (peeled off `ConstantBuffer<T>`/`ParameterBlock<T>`/
//! `StructuredBuffer<T>`/`T[N]` wrappers), a flat list of binding ranges
//! with running slot/sub-object indices, and the derived sub-object range
//! list. There is no real Slang session in this workspace, so layouts are
//! hand-built with [`ShaderObjectLayoutBuilder`] instead of reflected.

use crate::types::ShaderObjectContainerType;

/// The wrapper a type was found under, before peeling (§4.5 first rule).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeWrapper {
    Plain,
    ConstantBuffer,
    ParameterBlock,
    StructuredBuffer,
    RwStructuredBuffer,
    Array(u32),
}

/// Peel a parameter-group wrapper down to its container kind.
pub fn peel_container(wrapper: TypeWrapper) -> ShaderObjectContainerType {
    match wrapper {
        TypeWrapper::ConstantBuffer | TypeWrapper::ParameterBlock => ShaderObjectContainerType::ParameterBlock,
        TypeWrapper::StructuredBuffer | TypeWrapper::RwStructuredBuffer => ShaderObjectContainerType::StructuredBuffer,
        TypeWrapper::Array(_) => ShaderObjectContainerType::Array,
        TypeWrapper::Plain => ShaderObjectContainerType::None,
    }
}

/// What kind of binding a [`BindingRangeInfo`] describes.
///
/// The first six variants are plain resource bindings (never sub-object
/// ranges); the last five are sub-object ranges (§4.4.2/§4.4.3 dispatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingRangeKind {
    Buffer,
    BufferWithCounter,
    Texture,
    Sampler,
    CombinedTextureSampler,
    AccelerationStructure,
    ExistentialValue,
    ParameterBlock,
    ConstantBuffer,
    RawBuffer,
    MutableRawBuffer,
}

impl BindingRangeKind {
    pub fn is_sub_object(self) -> bool {
        matches!(
            self,
            Self::ExistentialValue | Self::ParameterBlock | Self::ConstantBuffer | Self::RawBuffer | Self::MutableRawBuffer
        )
    }
}

#[derive(Debug, Clone)]
pub struct BindingRangeInfo {
    pub kind: BindingRangeKind,
    /// Index into the owning object's `slots` vector of this range's first element.
    pub slot_index: u32,
    pub slot_count: u32,
    /// Index into the owning object's `objects` vector, for sub-object ranges.
    pub sub_object_index: Option<u32>,
    pub is_specializable: bool,
    /// `existentialTypeSize - 16`, only meaningful for `ExistentialValue` ranges.
    pub existential_payload_bytes: u32,
    /// The interface type name bound fields of this range conform to, for
    /// `ExistentialValue` ranges.
    pub existential_type_name: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct SubObjectRangeInfo {
    pub binding_range_index: u32,
    pub sub_object_index: u32,
}

#[derive(Debug, Clone)]
pub struct ShaderObjectLayout {
    pub container_kind: ShaderObjectContainerType,
    pub ordinary_data_size: u32,
    pub binding_ranges: Vec<BindingRangeInfo>,
    pub sub_object_ranges: Vec<SubObjectRangeInfo>,
}

impl ShaderObjectLayout {
    pub fn builder() -> ShaderObjectLayoutBuilder {
        ShaderObjectLayoutBuilder::new()
    }

    pub fn slot_count(&self) -> u32 {
        self.binding_ranges.iter().map(|r| r.slot_count).sum()
    }

    /// Total sub-object slots reserved across all sub-object ranges: arrayed
    /// ranges (`slot_count > 1`) reserve one slot per array element, not one
    /// per range.
    pub fn sub_object_count(&self) -> usize {
        self.binding_ranges
            .iter()
            .filter(|r| r.kind.is_sub_object())
            .map(|r| r.slot_count as usize)
            .sum()
    }
}

pub struct ShaderObjectLayoutBuilder {
    container_kind: ShaderObjectContainerType,
    ordinary_data_size: u32,
    binding_ranges: Vec<BindingRangeInfo>,
}

impl ShaderObjectLayoutBuilder {
    pub fn new() -> Self {
        Self { container_kind: ShaderObjectContainerType::None, ordinary_data_size: 0, binding_ranges: Vec::new() }
    }

    pub fn container(mut self, kind: ShaderObjectContainerType) -> Self {
        self.container_kind = kind;
        self
    }

    pub fn ordinary_data_size(mut self, size: u32) -> Self {
        self.ordinary_data_size = size;
        self
    }

    pub fn binding_range(mut self, kind: BindingRangeKind, slot_count: u32, is_specializable: bool) -> Self {
        let slot_index = self.binding_ranges.iter().map(|r| r.slot_count).sum();
        self.binding_ranges.push(BindingRangeInfo {
            kind,
            slot_index,
            slot_count,
            sub_object_index: None,
            is_specializable,
            existential_payload_bytes: 0,
            existential_type_name: None,
        });
        self
    }

    pub fn existential_range(mut self, existential_type_name: impl Into<String>, existential_type_size: u32) -> Self {
        let slot_index = self.binding_ranges.iter().map(|r| r.slot_count).sum();
        self.binding_ranges.push(BindingRangeInfo {
            kind: BindingRangeKind::ExistentialValue,
            slot_index,
            slot_count: 1,
            sub_object_index: None,
            is_specializable: true,
            existential_payload_bytes: existential_type_size.saturating_sub(16),
            existential_type_name: Some(existential_type_name.into()),
        });
        self
    }

    pub fn build(mut self) -> ShaderObjectLayout {
        let mut sub_object_ranges = Vec::new();
        let mut next_sub_object_index = 0u32;
        for (index, range) in self.binding_ranges.iter_mut().enumerate() {
            if range.kind.is_sub_object() {
                range.sub_object_index = Some(next_sub_object_index);
                sub_object_ranges
                    .push(SubObjectRangeInfo { binding_range_index: index as u32, sub_object_index: next_sub_object_index });
                next_sub_object_index += range.slot_count.max(1);
            }
        }
        ShaderObjectLayout {
            container_kind: self.container_kind,
            ordinary_data_size: self.ordinary_data_size,
            binding_ranges: self.binding_ranges,
            sub_object_ranges,
        }
    }
}

impl Default for ShaderObjectLayoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peeling_matches_every_wrapper_rule() {
        assert_eq!(peel_container(TypeWrapper::ConstantBuffer), ShaderObjectContainerType::ParameterBlock);
        assert_eq!(peel_container(TypeWrapper::ParameterBlock), ShaderObjectContainerType::ParameterBlock);
        assert_eq!(peel_container(TypeWrapper::StructuredBuffer), ShaderObjectContainerType::StructuredBuffer);
        assert_eq!(peel_container(TypeWrapper::RwStructuredBuffer), ShaderObjectContainerType::StructuredBuffer);
        assert_eq!(peel_container(TypeWrapper::Array(4)), ShaderObjectContainerType::Array);
        assert_eq!(peel_container(TypeWrapper::Plain), ShaderObjectContainerType::None);
    }

    #[test]
    fn builder_assigns_running_slot_and_sub_object_indices() {
        let layout = ShaderObjectLayout::builder()
            .ordinary_data_size(16)
            .binding_range(BindingRangeKind::Texture, 1, false)
            .binding_range(BindingRangeKind::Sampler, 2, false)
            .existential_range("IMaterial", 32)
            .binding_range(BindingRangeKind::ConstantBuffer, 1, true)
            .build();

        assert_eq!(layout.slot_count(), 5);
        assert_eq!(layout.sub_object_count(), 2);

        assert_eq!(layout.binding_ranges[0].slot_index, 0);
        assert_eq!(layout.binding_ranges[1].slot_index, 1);
        assert_eq!(layout.binding_ranges[2].slot_index, 3);
        assert_eq!(layout.binding_ranges[2].sub_object_index, Some(0));
        assert_eq!(layout.binding_ranges[2].existential_payload_bytes, 16);
        assert_eq!(layout.binding_ranges[3].sub_object_index, Some(1));

        assert_eq!(layout.sub_object_ranges[0].binding_range_index, 2);
        assert_eq!(layout.sub_object_ranges[1].binding_range_index, 3);
    }

    #[test]
    fn arrayed_sub_object_range_reserves_one_slot_per_element() {
        let layout = ShaderObjectLayout::builder()
            .binding_range(BindingRangeKind::ParameterBlock, 3, true)
            .binding_range(BindingRangeKind::ConstantBuffer, 1, true)
            .build();

        assert_eq!(layout.binding_ranges[0].sub_object_index, Some(0));
        assert_eq!(layout.binding_ranges[1].sub_object_index, Some(3));
        assert_eq!(layout.sub_object_count(), 4);
    }
}
