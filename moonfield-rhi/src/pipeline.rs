//! Virtual/concrete pipeline plumbing and `getConcretePipeline` (spec.md §4.3).

use std::cell::RefCell;
use std::rc::Rc;

use crate::shader_cache::{ConcretePipeline, PipelineKey, ShaderCache, ShaderComponentId};
use crate::types::RhiError;

/// A pipeline descriptor that hasn't been compiled into backend kernels yet.
///
/// Non-specializable virtual pipelines cache their one concrete sub-object
/// locally (`concrete`); specializable ones defer entirely to the
/// device-wide [`ShaderCache`] keyed by specialization arguments.
pub struct VirtualPipeline {
    pub id: u64,
    pub label: String,
    pub is_specializable: bool,
    concrete: RefCell<Option<Rc<ConcretePipeline>>>,
}

impl VirtualPipeline {
    pub fn new(id: u64, label: impl Into<String>, is_specializable: bool) -> Self {
        Self { id, label: label.into(), is_specializable, concrete: RefCell::new(None) }
    }
}

/// Either an already-compiled pipeline, or one still awaiting specialization.
pub enum Pipeline {
    Concrete(Rc<ConcretePipeline>),
    Virtual(Rc<VirtualPipeline>),
}

impl Pipeline {
    pub fn is_virtual(&self) -> bool {
        matches!(self, Pipeline::Virtual(_))
    }
}

/// §4.3 `Device.getConcretePipeline`:
/// - Already concrete → returned as-is.
/// - Virtual with a cached concrete sub-object (non-specializable deferred) → returned as-is.
/// - Otherwise, if specializable, require `spec_args` and go through the
///   shader cache keyed by `PipelineKey { pipeline, component_ids }`.
/// - Otherwise (non-specializable, uncached), build once and cache locally
///   on the virtual pipeline.
pub fn get_concrete_pipeline(
    pipeline: &Pipeline,
    spec_args: Option<&[ShaderComponentId]>,
    cache: &mut ShaderCache,
    build: impl FnOnce(u64) -> String,
) -> Result<Rc<ConcretePipeline>, RhiError> {
    match pipeline {
        Pipeline::Concrete(concrete) => Ok(concrete.clone()),
        Pipeline::Virtual(virtual_pipeline) => {
            if let Some(cached) = virtual_pipeline.concrete.borrow().clone() {
                return Ok(cached);
            }

            if virtual_pipeline.is_specializable {
                let args = spec_args.ok_or_else(|| {
                    RhiError::InvalidArgument("specializable pipeline requires specialization args".into())
                })?;
                let key = PipelineKey { pipeline_id: virtual_pipeline.id, component_ids: args.to_vec() };
                Ok(cache.get_or_build_pipeline(key, build))
            } else {
                let concrete = Rc::new(ConcretePipeline { id: virtual_pipeline.id, label: build(virtual_pipeline.id) });
                *virtual_pipeline.concrete.borrow_mut() = Some(concrete.clone());
                Ok(concrete)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concrete_pipeline_passes_through_unchanged() {
        let mut cache = ShaderCache::new();
        let concrete = Rc::new(ConcretePipeline { id: 1, label: "p".into() });
        let pipeline = Pipeline::Concrete(concrete.clone());
        let resolved = get_concrete_pipeline(&pipeline, None, &mut cache, |_| unreachable!()).unwrap();
        assert!(Rc::ptr_eq(&concrete, &resolved));
    }

    #[test]
    fn non_specializable_virtual_pipeline_caches_locally_after_first_build() {
        let mut cache = ShaderCache::new();
        let virt = Rc::new(VirtualPipeline::new(7, "deferred", false));
        let pipeline = Pipeline::Virtual(virt);

        let first = get_concrete_pipeline(&pipeline, None, &mut cache, |id| format!("built-{id}")).unwrap();
        let second = get_concrete_pipeline(&pipeline, None, &mut cache, |_| panic!("must not rebuild")).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn specializable_virtual_pipeline_requires_spec_args() {
        let mut cache = ShaderCache::new();
        let virt = Rc::new(VirtualPipeline::new(7, "specializable", true));
        let pipeline = Pipeline::Virtual(virt);
        let err = get_concrete_pipeline(&pipeline, None, &mut cache, |id| format!("built-{id}"));
        assert!(err.is_err());
    }

    #[test]
    fn specializable_virtual_pipeline_memoizes_by_spec_args() {
        let mut cache = ShaderCache::new();
        let t = cache.get_component_id("LambertMaterial", &[]);
        let virt = Rc::new(VirtualPipeline::new(7, "specializable", true));
        let pipeline = Pipeline::Virtual(virt);

        let p1 = get_concrete_pipeline(&pipeline, Some(&[t]), &mut cache, |id| format!("built-{id}")).unwrap();
        let p2 = get_concrete_pipeline(&pipeline, Some(&[t]), &mut cache, |_| panic!("must not rebuild")).unwrap();
        assert!(Rc::ptr_eq(&p1, &p2));
    }
}
