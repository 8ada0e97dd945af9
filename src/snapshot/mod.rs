//! Snapshot model, loader, and the default handler registry for snapshot
//! diagnostic types.

mod loader;
mod types;

pub use loader::load;
pub use types::{
    AppDomain, Architecture, ExceptionInfo, GcMode, HeapObject, ModuleInfo, RuntimeInfo,
    SegmentInfo, Snapshot, ThreadFlags, ThreadRecord, TypeRef, FORMAT_VERSION,
};

use once_cell::sync::Lazy;

use crate::dump::{render_stack_trace, Handler, Registry, StackFrame};

static DEFAULT_REGISTRY: Lazy<Registry> = Lazy::new(build_default_registry);

/// The registry used by reports: compact one-liners for descriptor types,
/// coalesced stack traces, and suppression of the raw snapshot itself (it is
/// only ever dumped through projections).
pub fn default_registry() -> &'static Registry {
    &DEFAULT_REGISTRY
}

fn build_default_registry() -> Registry {
    Registry::new()
        .with(Handler::suppress::<Snapshot>())
        .with(Handler::for_type(|t: &TypeRef| Some(vec![t.name.clone()])))
        .with(Handler::for_type(|d: &AppDomain| Some(vec![d.display()])))
        .with(Handler::for_type(|m: &ModuleInfo| Some(vec![m.display()])))
        .with(Handler::for_type(|frames: &Vec<StackFrame>| {
            Some(render_stack_trace(frames))
        }))
}
