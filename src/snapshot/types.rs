//! Snapshot data model.
//!
//! A snapshot is a pre-extracted, serialized view of a process: runtime
//! metadata, loaded modules, heap segments and objects, and thread records.
//! Every type here implements [`crate::core::Inspect`] so the dumper can walk
//! a snapshot (or any projection of one) without per-type formatters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Inspect, Scalar, Shape};
use crate::dump::StackFrame;
use crate::impl_composite;

/// Snapshot file format version understood by this build.
pub const FORMAT_VERSION: u32 = 1;

/// A whole process snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub format_version: u32,
    pub captured_at: DateTime<Utc>,
    pub runtime: RuntimeInfo,
    #[serde(default)]
    pub app_domains: Vec<AppDomain>,
    #[serde(default)]
    pub modules: Vec<ModuleInfo>,
    #[serde(default)]
    pub segments: Vec<SegmentInfo>,
    #[serde(default)]
    pub objects: Vec<HeapObject>,
    #[serde(default)]
    pub threads: Vec<ThreadRecord>,
}

impl_composite!(Snapshot {
    format_version,
    captured_at,
    runtime,
    app_domains,
    modules,
    segments,
    objects,
    threads
});

/// Runtime metadata captured with the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeInfo {
    pub version: String,
    pub server_gc: bool,
    pub architecture: Architecture,
    pub platform: String,
    /// Pointer size in bytes (8 for 64-bit targets).
    pub pointer_size: u32,
    pub heap_count: u32,
}

impl_composite!(RuntimeInfo {
    version,
    server_gc,
    architecture,
    platform,
    pointer_size,
    heap_count
});

/// Processor architecture of the snapshotted process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Architecture {
    X86,
    X64,
    Arm,
    Arm64,
}

impl Architecture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::X86 => "X86",
            Architecture::X64 => "X64",
            Architecture::Arm => "Arm",
            Architecture::Arm64 => "Arm64",
        }
    }
}

impl Inspect for Architecture {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Enum(self.as_str()))
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// GC mode a thread was in when the snapshot was taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GcMode {
    #[default]
    Cooperative,
    Preemptive,
}

impl GcMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GcMode::Cooperative => "Cooperative",
            GcMode::Preemptive => "Preemptive",
        }
    }
}

impl Inspect for GcMode {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Enum(self.as_str()))
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// An application domain (isolation unit) in the snapshotted process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppDomain {
    pub id: u64,
    pub name: String,
}

impl AppDomain {
    /// One-line display form used by the default registry.
    pub fn display(&self) -> String {
        format!("{} (#{})", self.name, self.id)
    }
}

impl_composite!(AppDomain { id, name });

/// A loaded module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleInfo {
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub size: u64,
}

impl ModuleInfo {
    /// One-line display form used by the default registry.
    pub fn display(&self) -> String {
        self.path.clone().unwrap_or_else(|| self.name.clone())
    }
}

impl_composite!(ModuleInfo { name, path, size });

/// A heap segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentInfo {
    /// Logical heap this segment belongs to.
    pub heap: u32,
    /// Segment length in bytes.
    pub length: u64,
    #[serde(default)]
    pub large_object: bool,
}

impl_composite!(SegmentInfo {
    heap,
    length,
    large_object
});

/// One object on the managed heap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeapObject {
    /// Fully qualified type name; absent for nameless runtime-generated types.
    #[serde(default)]
    pub type_name: Option<String>,
    pub size: u64,
    /// String payload, present only for string objects.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub free: bool,
    #[serde(default)]
    pub large: bool,
}

impl_composite!(HeapObject {
    type_name,
    size,
    text,
    free,
    large
});

/// A managed thread with its stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadRecord {
    pub os_thread_id: u64,
    pub managed_thread_id: i32,
    #[serde(default)]
    pub is_alive: bool,
    #[serde(default)]
    pub gc_mode: GcMode,
    #[serde(default)]
    pub is_finalizer: bool,
    #[serde(default)]
    pub lock_count: u32,
    pub address: u64,
    #[serde(default)]
    pub details: ThreadFlags,
    #[serde(default)]
    pub current_exception: Option<ExceptionInfo>,
    #[serde(default)]
    pub stack: Vec<StackFrame>,
}

impl_composite!(ThreadRecord {
    os_thread_id,
    managed_thread_id,
    is_alive,
    gc_mode,
    is_finalizer,
    lock_count,
    address,
    details,
    current_exception,
    stack
});

/// Detailed thread state flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreadFlags {
    pub is_abort_requested: bool,
    pub is_aborted: bool,
    pub is_gc_suspend_pending: bool,
    pub is_user_suspended: bool,
    pub is_debug_suspended: bool,
    pub is_background: bool,
    pub is_unstarted: bool,
    pub is_sta: bool,
    pub is_mta: bool,
}

impl_composite!(ThreadFlags {
    is_abort_requested,
    is_aborted,
    is_gc_suspend_pending,
    is_user_suspended,
    is_debug_suspended,
    is_background,
    is_unstarted,
    is_sta,
    is_mta
});

/// An exception captured on a thread, with optional nested inner exception.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExceptionInfo {
    pub exception_type: TypeRef,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub hresult: i32,
    #[serde(default)]
    pub inner: Option<Box<ExceptionInfo>>,
    #[serde(default)]
    pub stack: Vec<StackFrame>,
}

impl_composite!(ExceptionInfo {
    exception_type,
    message,
    hresult,
    inner,
    stack
});

/// A type descriptor. The default registry renders it by qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl_composite!(TypeRef { name });
