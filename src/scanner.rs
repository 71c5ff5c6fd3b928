use std::fs;
use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum AuditError {
    /// The audited root itself is missing or cannot be listed. Fatal.
    #[error("cannot audit {}: {source}", path.display())]
    RootUnresolvable {
        path: std::path::PathBuf,
        source: io::Error,
    },

    /// A nested directory could not be listed. Recovered where it occurs by
    /// substituting an empty subtree; never returned from [`scan`].
    #[error("cannot list {}: {source}", path.display())]
    SubtreeInaccessible {
        path: std::path::PathBuf,
        source: io::Error,
    },
}

/// One filesystem entry (file or directory) found by a scan.
///
/// `children` holds only the descendants whose own aggregate size met the
/// threshold; everything else still counts toward `file_count` and
/// `total_size`. A node owns its children outright — the tree has no shared
/// or back references.
#[derive(Debug)]
pub struct AuditNode {
    /// Base name of the entry, no path separators.
    pub name: String,
    /// Descendants at or above the threshold, in discovery order.
    pub children: Vec<AuditNode>,
    /// Leaf files anywhere below this entry; 0 when the node is itself a file.
    pub file_count: u64,
    /// Exact byte total of the subtree, pruned entries included.
    pub total_size: u64,
}

/// Scan `path` recursively, keeping every entry whose aggregate size is at
/// least `threshold` bytes.
///
/// Only the root can fail: a missing or unlistable `path` is
/// [`AuditError::RootUnresolvable`]. Deeper failures degrade to an empty
/// subtree so one unreadable directory never aborts the audit.
pub fn scan(path: &Path, threshold: u64) -> Result<AuditNode, AuditError> {
    let entries = fs::read_dir(path).map_err(|source| AuditError::RootUnresolvable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(scan_entries(path, entries, threshold))
}

fn scan_dir(path: &Path, threshold: u64) -> AuditNode {
    match fs::read_dir(path) {
        Ok(entries) => scan_entries(path, entries, threshold),
        Err(source) => {
            let err = AuditError::SubtreeInaccessible {
                path: path.to_path_buf(),
                source,
            };
            debug!("substituting empty subtree: {err}");
            AuditNode {
                name: base_name(path),
                children: Vec::new(),
                file_count: 0,
                total_size: 0,
            }
        }
    }
}

fn scan_entries(path: &Path, entries: fs::ReadDir, threshold: u64) -> AuditNode {
    print!("\rScanning {}...", path.display());
    io::stdout().flush().ok();

    // Materialize the listing so the directory handle is closed before any
    // recursion below it; open handles otherwise pile up on deep trees.
    let entries: Vec<fs::DirEntry> = entries.filter_map(|e| e.ok()).collect();

    let mut children = Vec::new();
    let mut file_count = 0u64;
    let mut total_size = 0u64;

    for entry in entries {
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);

        if is_dir {
            let child = scan_dir(&entry.path(), threshold);
            // Totals accumulate unconditionally; the threshold only gates
            // whether the child is listed.
            file_count += child.file_count;
            total_size += child.total_size;
            if child.total_size >= threshold {
                children.push(child);
            }
        } else {
            let size = match entry.metadata() {
                Ok(meta) => meta.len(),
                Err(source) => {
                    debug!("skipping unreadable entry {}: {source}", entry.path().display());
                    continue;
                }
            };
            file_count += 1;
            total_size += size;
            if size >= threshold {
                children.push(AuditNode {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    children: Vec::new(),
                    file_count: 0,
                    total_size: size,
                });
            }
        }
    }

    AuditNode {
        name: base_name(path),
        children,
        file_count,
        total_size,
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
