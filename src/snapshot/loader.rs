//! Snapshot loading from pre-extracted JSON files.

use std::fs;
use std::path::Path;

use crate::core::{Error, Result};
use crate::snapshot::types::{Snapshot, FORMAT_VERSION};

/// Load and validate a snapshot file.
pub fn load(path: impl AsRef<Path>) -> Result<Snapshot> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let raw = fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&raw)?;

    if snapshot.format_version != FORMAT_VERSION {
        return Err(Error::snapshot(format!(
            "unsupported snapshot format version {} (expected {})",
            snapshot.format_version, FORMAT_VERSION
        )));
    }

    tracing::info!(
        objects = snapshot.objects.len(),
        threads = snapshot.threads.len(),
        modules = snapshot.modules.len(),
        "loaded snapshot from {}",
        path.display()
    );
    Ok(snapshot)
}
