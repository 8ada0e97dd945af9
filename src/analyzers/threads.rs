//! Thread views and paused-method grouping.

use std::collections::HashMap;

use crate::dump::StackFrame;
use crate::impl_composite;
use crate::impl_record;
use crate::snapshot::{ExceptionInfo, GcMode, Snapshot, ThreadFlags};

/// Dump-friendly projection of one managed thread.
///
/// The raw address becomes a hex string, and the stack vector is rendered by
/// the registry's trace handler.
#[derive(Debug, Clone)]
pub struct ThreadView {
    pub is_alive: bool,
    pub os_thread_id: u64,
    pub managed_thread_id: i32,
    pub gc_mode: GcMode,
    pub is_finalizer: bool,
    pub lock_count: u32,
    pub address: String,
    pub details: ThreadFlags,
    pub current_exception: Option<ExceptionInfo>,
    pub stack_trace: Vec<StackFrame>,
}

impl_composite!(ThreadView {
    is_alive,
    os_thread_id,
    managed_thread_id,
    gc_mode,
    is_finalizer,
    lock_count,
    address,
    details,
    current_exception,
    stack_trace
});

/// One row of the paused-methods table: how many threads are currently
/// executing a given top frame.
#[derive(Debug, Clone)]
pub struct PausedMethodRow {
    pub count: usize,
    pub signature: String,
}

impl_record!(PausedMethodRow { count, signature });

/// Project threads with a non-empty stack into dump views. With
/// `only_with_exception` set, threads without a captured exception are
/// filtered out.
pub fn thread_views(snapshot: &Snapshot, only_with_exception: bool) -> Vec<ThreadView> {
    snapshot
        .threads
        .iter()
        .filter(|t| !t.stack.is_empty())
        .filter(|t| !only_with_exception || t.current_exception.is_some())
        .map(|t| ThreadView {
            is_alive: t.is_alive,
            os_thread_id: t.os_thread_id,
            managed_thread_id: t.managed_thread_id,
            gc_mode: t.gc_mode,
            is_finalizer: t.is_finalizer,
            lock_count: t.lock_count,
            address: format!("{:x}", t.address),
            details: t.details.clone(),
            current_exception: t.current_exception.clone(),
            stack_trace: t.stack.clone(),
        })
        .collect()
}

/// Group threads by the signature of their topmost resolved frame.
pub fn paused_methods(snapshot: &Snapshot) -> Vec<PausedMethodRow> {
    let mut groups: HashMap<&str, usize> = HashMap::new();
    for thread in &snapshot.threads {
        let top = thread
            .stack
            .iter()
            .find_map(|frame| frame.signature.as_deref());
        if let Some(signature) = top {
            *groups.entry(signature).or_insert(0) += 1;
        }
    }

    let mut rows: Vec<_> = groups
        .into_iter()
        .map(|(signature, count)| PausedMethodRow {
            count,
            signature: signature.to_string(),
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then(a.signature.cmp(&b.signature)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dump::FrameKind;
    use crate::snapshot::{Architecture, RuntimeInfo, ThreadRecord, TypeRef};

    fn frame(signature: &str) -> StackFrame {
        StackFrame {
            signature: Some(signature.to_string()),
            frame_name: None,
            kind: FrameKind::ManagedMethod,
        }
    }

    fn thread(id: i32, stack: Vec<StackFrame>) -> ThreadRecord {
        ThreadRecord {
            os_thread_id: 1000 + id as u64,
            managed_thread_id: id,
            is_alive: true,
            gc_mode: GcMode::Cooperative,
            is_finalizer: false,
            lock_count: 0,
            address: 0x7f00_0000_0000 + id as u64,
            details: ThreadFlags::default(),
            current_exception: None,
            stack,
        }
    }

    fn snapshot_with(threads: Vec<ThreadRecord>) -> Snapshot {
        Snapshot {
            format_version: 1,
            captured_at: "2026-03-01T12:00:00Z".parse().unwrap(),
            runtime: RuntimeInfo {
                version: "8.0.11".to_string(),
                server_gc: false,
                architecture: Architecture::X64,
                platform: "Linux".to_string(),
                pointer_size: 8,
                heap_count: 1,
            },
            app_domains: Vec::new(),
            modules: Vec::new(),
            segments: Vec::new(),
            objects: Vec::new(),
            threads,
        }
    }

    #[test]
    fn test_empty_stacks_filtered() {
        let snap = snapshot_with(vec![thread(1, Vec::new()), thread(2, vec![frame("A()")])]);
        let views = thread_views(&snap, false);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].managed_thread_id, 2);
    }

    #[test]
    fn test_address_is_hex() {
        let snap = snapshot_with(vec![thread(1, vec![frame("A()")])]);
        let views = thread_views(&snap, false);
        assert_eq!(views[0].address, "7f0000000001");
    }

    #[test]
    fn test_exception_filter() {
        let mut failing = thread(1, vec![frame("A()")]);
        failing.current_exception = Some(ExceptionInfo {
            exception_type: TypeRef::new("System.Exception"),
            message: Some("boom".to_string()),
            hresult: -2146233088,
            inner: None,
            stack: Vec::new(),
        });
        let snap = snapshot_with(vec![failing, thread(2, vec![frame("B()")])]);

        assert_eq!(thread_views(&snap, false).len(), 2);
        let failing_only = thread_views(&snap, true);
        assert_eq!(failing_only.len(), 1);
        assert_eq!(failing_only[0].managed_thread_id, 1);
    }

    #[test]
    fn test_paused_methods_group_top_frames() {
        let snap = snapshot_with(vec![
            thread(1, vec![frame("Worker.Run()")]),
            thread(2, vec![frame("Worker.Run()")]),
            thread(3, vec![frame("Main()")]),
            thread(4, Vec::new()),
        ]);
        let rows = paused_methods(&snap);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].signature, "Worker.Run()");
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[1].signature, "Main()");
    }

    #[test]
    fn test_unresolved_top_frame_skips_to_next() {
        let snap = snapshot_with(vec![thread(
            1,
            vec![StackFrame::default(), frame("Deep.Call()")],
        )]);
        let rows = paused_methods(&snap);
        assert_eq!(rows[0].signature, "Deep.Call()");
    }
}
