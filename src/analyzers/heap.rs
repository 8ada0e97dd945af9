//! Heap statistics: per-type aggregates, string analysis, and large object
//! heap entries.
//!
//! Aggregation runs over the object list with rayon's fold/reduce so large
//! snapshots stay responsive. Top-N selectors sort with a name tie-break to
//! keep report output deterministic.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::core::group_digits;
use crate::impl_record;
use crate::snapshot::{HeapObject, Snapshot};

/// Row for the "by size" type table.
#[derive(Debug, Clone)]
pub struct TypeSizeRow {
    pub bytes: u64,
    pub count: u64,
    pub type_name: String,
}

impl_record!(TypeSizeRow {
    bytes,
    count,
    type_name
});

/// Row for the "by count" type table.
#[derive(Debug, Clone)]
pub struct TypeCountRow {
    pub count: u64,
    pub bytes: u64,
    pub type_name: String,
}

impl_record!(TypeCountRow {
    count,
    bytes,
    type_name
});

/// Row for the most duplicated string values.
#[derive(Debug, Clone)]
pub struct StringCountRow {
    pub count: u64,
    pub value: String,
}

impl_record!(StringCountRow { count, value });

/// Row for the largest string values. `size` is pre-formatted with thousands
/// separators; `value` is truncated to the configured preview length.
#[derive(Debug, Clone)]
pub struct LargeStringRow {
    pub size: String,
    pub count: u64,
    pub value: String,
}

impl_record!(LargeStringRow { size, count, value });

/// Row for the largest live large-object-heap entries.
#[derive(Debug, Clone)]
pub struct LohEntryRow {
    pub size: u64,
    pub entry: String,
}

impl_record!(LohEntryRow { size, entry });

/// Aggregated per-type and per-string statistics for one snapshot.
#[derive(Debug, Default)]
pub struct HeapStats {
    /// type name -> (total bytes, instance count)
    type_totals: HashMap<String, (u64, u64)>,
    /// string value -> occurrence count
    string_counts: HashMap<String, u64>,
    pub string_objects: u64,
    pub string_bytes: u64,
}

impl HeapStats {
    /// Aggregate the whole object list in parallel.
    pub fn collect(snapshot: &Snapshot) -> Self {
        snapshot
            .objects
            .par_iter()
            .fold(Self::default, |mut acc, obj| {
                acc.add(obj);
                acc
            })
            .reduce(Self::default, Self::merge)
    }

    fn add(&mut self, obj: &HeapObject) {
        if let Some(name) = &obj.type_name {
            let entry = self.type_totals.entry(name.clone()).or_insert((0, 0));
            entry.0 += obj.size;
            entry.1 += 1;
        }
        if let Some(text) = &obj.text {
            self.string_objects += 1;
            self.string_bytes += obj.size;
            *self.string_counts.entry(text.clone()).or_insert(0) += 1;
        }
    }

    fn merge(mut self, other: Self) -> Self {
        for (name, (bytes, count)) in other.type_totals {
            let entry = self.type_totals.entry(name).or_insert((0, 0));
            entry.0 += bytes;
            entry.1 += count;
        }
        for (value, count) in other.string_counts {
            *self.string_counts.entry(value).or_insert(0) += count;
        }
        self.string_objects += other.string_objects;
        self.string_bytes += other.string_bytes;
        self
    }

    pub fn top_types_by_size(&self, limit: usize) -> Vec<TypeSizeRow> {
        let mut rows: Vec<_> = self
            .type_totals
            .iter()
            .map(|(name, (bytes, count))| TypeSizeRow {
                bytes: *bytes,
                count: *count,
                type_name: name.clone(),
            })
            .collect();
        rows.sort_by(|a, b| b.bytes.cmp(&a.bytes).then(a.type_name.cmp(&b.type_name)));
        rows.truncate(limit);
        rows
    }

    pub fn top_types_by_count(&self, limit: usize) -> Vec<TypeCountRow> {
        let mut rows: Vec<_> = self
            .type_totals
            .iter()
            .map(|(name, (bytes, count))| TypeCountRow {
                count: *count,
                bytes: *bytes,
                type_name: name.clone(),
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then(a.type_name.cmp(&b.type_name)));
        rows.truncate(limit);
        rows
    }

    pub fn top_strings_by_count(&self, limit: usize) -> Vec<StringCountRow> {
        let mut rows: Vec<_> = self
            .string_counts
            .iter()
            .map(|(value, count)| StringCountRow {
                count: *count,
                value: value.clone(),
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then(a.value.cmp(&b.value)));
        rows.truncate(limit);
        rows
    }

    /// Distinct string values ordered by character length, longest first.
    pub fn largest_strings(&self, limit: usize, preview: usize) -> Vec<LargeStringRow> {
        let mut entries: Vec<_> = self
            .string_counts
            .iter()
            .map(|(value, count)| (value.chars().count(), *count, value))
            .collect();
        entries.sort_by(|a, b| b.0.cmp(&a.0).then(a.2.cmp(b.2)));
        entries
            .into_iter()
            .take(limit)
            .map(|(chars, count, value)| LargeStringRow {
                size: group_digits(&chars.to_string()),
                count,
                value: truncate(value, preview),
            })
            .collect()
    }

    /// One-line summary of total string storage.
    pub fn storage_summary(&self) -> String {
        let mb = self.string_bytes as f64 / (1024.0 * 1024.0);
        format!(
            "Overall {} string objects take up {} bytes ({:.2} MB)",
            group_digits(&self.string_objects.to_string()),
            group_digits(&self.string_bytes.to_string()),
            mb
        )
    }
}

/// Largest live entries on the large object heap, free blocks excluded.
/// String entries display their text, others their type name.
pub fn largest_loh_entries(snapshot: &Snapshot, limit: usize) -> Vec<LohEntryRow> {
    let mut rows: Vec<_> = snapshot
        .objects
        .iter()
        .filter(|obj| obj.large && !obj.free)
        .filter_map(|obj| {
            let entry = obj.text.clone().or_else(|| obj.type_name.clone())?;
            Some(LohEntryRow {
                size: obj.size,
                entry,
            })
        })
        .collect();
    rows.sort_by(|a, b| b.size.cmp(&a.size).then(a.entry.cmp(&b.entry)));
    rows.truncate(limit);
    rows
}

fn truncate(value: &str, preview: usize) -> String {
    if value.chars().count() <= preview {
        return value.to_string();
    }
    let mut out: String = value.chars().take(preview).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{Architecture, RuntimeInfo};

    fn obj(type_name: &str, size: u64) -> HeapObject {
        HeapObject {
            type_name: Some(type_name.to_string()),
            size,
            text: None,
            free: false,
            large: false,
        }
    }

    fn string_obj(text: &str, size: u64) -> HeapObject {
        HeapObject {
            type_name: Some("System.String".to_string()),
            size,
            text: Some(text.to_string()),
            free: false,
            large: false,
        }
    }

    fn snapshot_with(objects: Vec<HeapObject>) -> Snapshot {
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
            objects,
            threads: Vec::new(),
        }
    }

    #[test]
    fn test_type_totals() {
        let snap = snapshot_with(vec![obj("A", 100), obj("A", 50), obj("B", 500)]);
        let stats = HeapStats::collect(&snap);

        let by_size = stats.top_types_by_size(10);
        assert_eq!(by_size[0].type_name, "B");
        assert_eq!(by_size[0].bytes, 500);
        assert_eq!(by_size[1].type_name, "A");
        assert_eq!(by_size[1].count, 2);

        let by_count = stats.top_types_by_count(10);
        assert_eq!(by_count[0].type_name, "A");
        assert_eq!(by_count[0].count, 2);
    }

    #[test]
    fn test_limit_truncates() {
        let snap = snapshot_with(vec![obj("A", 1), obj("B", 2), obj("C", 3)]);
        let stats = HeapStats::collect(&snap);
        assert_eq!(stats.top_types_by_size(2).len(), 2);
    }

    #[test]
    fn test_equal_sizes_tie_break_by_name() {
        let snap = snapshot_with(vec![obj("B", 10), obj("A", 10)]);
        let stats = HeapStats::collect(&snap);
        let rows = stats.top_types_by_size(10);
        assert_eq!(rows[0].type_name, "A");
        assert_eq!(rows[1].type_name, "B");
    }

    #[test]
    fn test_string_duplication() {
        let snap = snapshot_with(vec![
            string_obj("hot", 30),
            string_obj("hot", 30),
            string_obj("cold", 32),
        ]);
        let stats = HeapStats::collect(&snap);
        assert_eq!(stats.string_objects, 3);
        assert_eq!(stats.string_bytes, 92);

        let rows = stats.top_strings_by_count(10);
        assert_eq!(rows[0].value, "hot");
        assert_eq!(rows[0].count, 2);
    }

    #[test]
    fn test_largest_strings_truncate_preview() {
        let snap = snapshot_with(vec![string_obj("abcdefgh", 40), string_obj("xy", 28)]);
        let stats = HeapStats::collect(&snap);
        let rows = stats.largest_strings(10, 4);
        assert_eq!(rows[0].size, "8");
        assert_eq!(rows[0].value, "abcd...");
        assert_eq!(rows[1].value, "xy");
    }

    #[test]
    fn test_storage_summary_groups_digits() {
        let mut stats = HeapStats::default();
        stats.string_objects = 1_500;
        stats.string_bytes = 2 * 1024 * 1024;
        assert_eq!(
            stats.storage_summary(),
            "Overall 1,500 string objects take up 2,097,152 bytes (2.00 MB)"
        );
    }

    #[test]
    fn test_loh_excludes_free_blocks() {
        let mut big = obj("Byte[]", 120_000);
        big.large = true;
        let mut free = obj("Free", 500_000);
        free.large = true;
        free.free = true;
        let mut text = string_obj("payload", 90_000);
        text.large = true;

        let snap = snapshot_with(vec![big, free, text]);
        let rows = largest_loh_entries(&snap, 10);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].entry, "Byte[]");
        assert_eq!(rows[1].entry, "payload");
    }
}
