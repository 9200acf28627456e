//! Component-ID interning and specialization/pipeline memoization (spec.md §4.6, §4.3).

use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

pub type ShaderComponentId = u32;

/// Interns `(typeName, [argIds…])` tuples into stable small integers.
///
/// Two equal keys always yield equal ids — the cache key itself is a
/// stringified name plus the already-interned argument ids, so recursive
/// specialization arguments compose into the same component id whenever
/// their shape matches.
#[derive(Default)]
pub struct ComponentInterner {
    ids: HashMap<String, ShaderComponentId>,
    next: ShaderComponentId,
}

impl ComponentInterner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_component_id(&mut self, type_name: &str, args: &[ShaderComponentId]) -> ShaderComponentId {
        let key = component_key(type_name, args);
        if let Some(&id) = self.ids.get(&key) {
            return id;
        }
        let id = self.next;
        self.next += 1;
        self.ids.insert(key, id);
        id
    }
}

fn component_key(type_name: &str, args: &[ShaderComponentId]) -> String {
    let mut key = type_name.to_string();
    key.push('<');
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            key.push(',');
        }
        key.push_str(&arg.to_string());
    }
    key.push('>');
    key
}

/// Key identifying one specialization of a (possibly virtual) pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub pipeline_id: u64,
    pub component_ids: Vec<ShaderComponentId>,
}

/// Key identifying one specialization of a program (§4.6 step 4).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpecializationKey {
    pub program_id: u64,
    pub component_ids: Vec<ShaderComponentId>,
}

/// A compiled, non-virtual pipeline. Identity (not contents) is what
/// `get_concrete_pipeline` memoization is about, so equality and interior
/// mutation are deliberately absent — callers compare with `Rc::ptr_eq`.
pub struct ConcretePipeline {
    pub id: u64,
    pub label: String,
}

/// A specialized program, memoized per [`SpecializationKey`] (§4.6 step 4:
/// "memoize ... break the specialized program's strong reference to the
/// device").
pub struct SpecializedProgram {
    pub id: u64,
    pub label: String,
}

#[derive(Default)]
pub struct ShaderCache {
    components: ComponentInterner,
    pipelines: HashMap<PipelineKey, Rc<ConcretePipeline>>,
    programs: HashMap<SpecializationKey, Rc<SpecializedProgram>>,
    next_pipeline_id: u64,
    next_program_id: u64,
}

impl ShaderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_component_id(&mut self, type_name: &str, args: &[ShaderComponentId]) -> ShaderComponentId {
        self.components.get_component_id(type_name, args)
    }

    /// §4.3 `Device.getConcretePipeline` cache half: on a cache hit, returns
    /// the exact same `Rc` every time (testable property #7); on a miss,
    /// runs `build` once and memoizes the result.
    pub fn get_or_build_pipeline(
        &mut self,
        key: PipelineKey,
        build: impl FnOnce(u64) -> String,
    ) -> Rc<ConcretePipeline> {
        if let Some(existing) = self.pipelines.get(&key) {
            debug!(pipeline_id = existing.id, "pipeline cache hit");
            return existing.clone();
        }
        let id = self.next_pipeline_id;
        self.next_pipeline_id += 1;
        let label = build(id);
        debug!(pipeline_id = id, "pipeline cache miss, specialized new pipeline");
        let pipeline = Rc::new(ConcretePipeline { id, label });
        self.pipelines.insert(key, pipeline.clone());
        pipeline
    }

    /// §4.6 `Device.specializeProgram` cache half.
    pub fn get_or_specialize_program(
        &mut self,
        key: SpecializationKey,
        specialize: impl FnOnce(u64) -> String,
    ) -> Rc<SpecializedProgram> {
        if let Some(existing) = self.programs.get(&key) {
            debug!(program_id = existing.id, "program specialization cache hit");
            return existing.clone();
        }
        let id = self.next_program_id;
        self.next_program_id += 1;
        let label = specialize(id);
        debug!(program_id = id, "program specialization cache miss");
        let program = Rc::new(SpecializedProgram { id, label });
        self.programs.insert(key, program.clone());
        program
    }
}

/// §4.6 kernel compilation: per-entry-point hash lookup against a
/// persistent cache, falling back to `compile` on a miss.
#[derive(Default)]
pub struct EntryPointCache {
    blobs: HashMap<u64, Vec<u8>>,
}

pub struct EntryPointCodeResult {
    pub code: Vec<u8>,
    pub is_cached: bool,
}

impl EntryPointCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_entry_point_code(&mut self, hash: u64, compile: impl FnOnce() -> Vec<u8>) -> EntryPointCodeResult {
        if let Some(blob) = self.blobs.get(&hash) {
            debug!(hash, "entry point cache hit");
            return EntryPointCodeResult { code: blob.clone(), is_cached: true };
        }
        let code = compile();
        debug!(hash, bytes = code.len(), "entry point cache miss, compiled kernel");
        self.blobs.insert(hash, code.clone());
        EntryPointCodeResult { code, is_cached: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_interning_is_stable_for_equal_keys() {
        let mut interner = ComponentInterner::new();
        let a = interner.get_component_id("Material", &[]);
        let b = interner.get_component_id("Material", &[]);
        assert_eq!(a, b);
        let c = interner.get_component_id("Material", &[a]);
        assert_ne!(a, c);
    }

    #[test]
    fn s3_get_concrete_pipeline_memoizes_by_key() {
        let mut cache = ShaderCache::new();
        let t = cache.get_component_id("LambertMaterial", &[]);
        let t2 = cache.get_component_id("GlassMaterial", &[]);

        let key1 = PipelineKey { pipeline_id: 1, component_ids: vec![t] };
        let p1 = cache.get_or_build_pipeline(key1.clone(), |id| format!("pipeline-{id}"));
        let p2 = cache.get_or_build_pipeline(key1, |id| format!("pipeline-{id}"));
        assert!(Rc::ptr_eq(&p1, &p2), "same (pipeline, specArgs) must return the same pipeline object");

        let key3 = PipelineKey { pipeline_id: 1, component_ids: vec![t2] };
        let p3 = cache.get_or_build_pipeline(key3, |id| format!("pipeline-{id}"));
        assert!(!Rc::ptr_eq(&p1, &p3), "a different specialization argument must produce a distinct pipeline");
    }

    #[test]
    fn entry_point_cache_reports_hit_after_first_miss() {
        let mut cache = EntryPointCache::new();
        let first = cache.get_entry_point_code(42, || vec![1, 2, 3]);
        assert!(!first.is_cached);
        let second = cache.get_entry_point_code(42, || panic!("should not recompile on a hit"));
        assert!(second.is_cached);
        assert_eq!(second.code, vec![1, 2, 3]);
    }
}
