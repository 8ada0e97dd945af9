//! Runtime environment summary.

use chrono::{DateTime, Utc};

use crate::impl_composite;
use crate::snapshot::{AppDomain, Architecture, ModuleInfo, Snapshot};

/// Headline facts about the snapshotted runtime, dumped as one composite.
#[derive(Debug, Clone)]
pub struct RuntimeSummary {
    pub version: String,
    pub server_gc: String,
    pub architecture: Architecture,
    pub platform: String,
    pub bitness: String,
    pub app_domain_count: usize,
    pub app_domains: Vec<AppDomain>,
    pub thread_count: usize,
    pub heap_count: u32,
    pub modules: Vec<ModuleInfo>,
    pub captured_at: DateTime<Utc>,
}

impl_composite!(RuntimeSummary {
    version,
    server_gc,
    architecture,
    platform,
    bitness,
    app_domain_count,
    app_domains,
    thread_count,
    heap_count,
    modules,
    captured_at
});

pub fn runtime_summary(snapshot: &Snapshot) -> RuntimeSummary {
    let runtime = &snapshot.runtime;
    RuntimeSummary {
        version: runtime.version.clone(),
        server_gc: yes_no(runtime.server_gc),
        architecture: runtime.architecture,
        platform: runtime.platform.clone(),
        bitness: if runtime.pointer_size == 8 {
            "64-bit".to_string()
        } else {
            "32-bit".to_string()
        },
        app_domain_count: snapshot.app_domains.len(),
        app_domains: snapshot.app_domains.clone(),
        thread_count: snapshot.threads.len(),
        heap_count: runtime.heap_count,
        modules: snapshot.modules.clone(),
        captured_at: snapshot.captured_at,
    }
}

fn yes_no(value: bool) -> String {
    if value { "Yes" } else { "No" }.to_string()
}
