//! Memory region aggregation: committed bytes per logical heap, with the
//! large-object share broken out.

use std::collections::BTreeMap;

use crate::impl_record;
use crate::snapshot::Snapshot;

/// One table row: a logical heap, its total segment bytes, and how much of
/// that total sits in large-object segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeapRegionRow {
    pub heap: u32,
    pub size: u64,
    pub large_object_size: u64,
}

impl_record!(HeapRegionRow {
    heap,
    size,
    large_object_size
});

/// Sum segment lengths per heap, ordered by heap number.
pub fn memory_regions(snapshot: &Snapshot) -> Vec<HeapRegionRow> {
    let mut totals: BTreeMap<u32, (u64, u64)> = BTreeMap::new();
    for segment in &snapshot.segments {
        let entry = totals.entry(segment.heap).or_insert((0, 0));
        entry.0 += segment.length;
        if segment.large_object {
            entry.1 += segment.length;
        }
    }
    totals
        .into_iter()
        .map(|(heap, (size, large_object_size))| HeapRegionRow {
            heap,
            size,
            large_object_size,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{Architecture, RuntimeInfo, SegmentInfo};

    fn snapshot_with_segments(segments: Vec<SegmentInfo>) -> Snapshot {
        Snapshot {
            format_version: 1,
            captured_at: "2026-03-01T12:00:00Z".parse().unwrap(),
            runtime: RuntimeInfo {
                version: "8.0.11".to_string(),
                server_gc: false,
                architecture: Architecture::X64,
                platform: "Linux".to_string(),
                pointer_size: 8,
                heap_count: 2,
            },
            app_domains: Vec::new(),
            modules: Vec::new(),
            segments,
            objects: Vec::new(),
            threads: Vec::new(),
        }
    }

    #[test]
    fn test_segments_group_by_heap() {
        let snap = snapshot_with_segments(vec![
            SegmentInfo {
                heap: 1,
                length: 200,
                large_object: false,
            },
            SegmentInfo {
                heap: 0,
                length: 100,
                large_object: false,
            },
            SegmentInfo {
                heap: 1,
                length: 50,
                large_object: true,
            },
        ]);
        assert_eq!(
            memory_regions(&snap),
            vec![
                HeapRegionRow {
                    heap: 0,
                    size: 100,
                    large_object_size: 0,
                },
                HeapRegionRow {
                    heap: 1,
                    size: 250,
                    large_object_size: 50,
                },
            ]
        );
    }

    #[test]
    fn test_large_object_share_is_part_of_total() {
        let snap = snapshot_with_segments(vec![SegmentInfo {
            heap: 0,
            length: 4096,
            large_object: true,
        }]);
        let rows = memory_regions(&snap);
        assert_eq!(rows[0].size, 4096);
        assert_eq!(rows[0].large_object_size, 4096);
    }

    #[test]
    fn test_no_segments() {
        let snap = snapshot_with_segments(Vec::new());
        assert!(memory_regions(&snap).is_empty());
    }
}
