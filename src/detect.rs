//! Change detection against a prior checksum table.
//!
//! Given the enumerated file list and the checksum table from a previous
//! run, decides which files must be (re)parsed:
//!
//! - non-script files are excluded outright and never checksummed;
//! - first-seen script files always load;
//! - script files whose digest differs from the cached one reload;
//! - digest matches are skipped — their previously merged contribution is
//!   not re-added by this crate (the caller reconciles across runs).
//!
//! Checksumming fans out across tasks to overlap file reads; results are
//! re-ordered to enumeration order before any decision is made, so the
//! outcome never depends on completion timing.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tokio::task::JoinSet;

use crate::checksum;
use crate::error::LoadError;

/// Map from script file path to the lowercase hex digest of its content.
///
/// Owned by the caller across runs: passed in as the prior cache, returned
/// rebuilt. The loader never mutates the caller's table.
pub type ChecksumTable = BTreeMap<PathBuf, String>;

/// Recognized script-file extension (matched case-insensitively).
pub const SCRIPT_EXTENSION: &str = "ss";

/// Whether `path` names a script file this loader should consider.
#[must_use]
pub fn is_script_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SCRIPT_EXTENSION))
}

// ---------------------------------------------------------------------------
// ChangeSet
// ---------------------------------------------------------------------------

/// Result of change detection over one enumerated file list.
#[derive(Debug, Default)]
pub struct ChangeSet {
    /// Files that must be (re)parsed, in enumeration order.
    pub to_load: Vec<PathBuf>,
    /// Fresh digest for every script file that could be read this run.
    pub checksums: ChecksumTable,
}

/// Checksum all script files in `files` and diff against `prior`.
///
/// Every readable script file gets an entry in the returned table, loaded or
/// not. A file whose checksum cannot be computed is logged and excluded from
/// both the table and the load set; the rest of the batch proceeds.
pub async fn detect_changes(files: Vec<PathBuf>, prior: &ChecksumTable) -> ChangeSet {
    let candidates: Vec<PathBuf> = files.into_iter().filter(|p| is_script_file(p)).collect();

    let mut tasks = JoinSet::new();
    for (index, path) in candidates.iter().cloned().enumerate() {
        tasks.spawn(async move { (index, checksum::file_checksum(&path).await) });
    }

    // Park results by enumeration index; completion order is irrelevant.
    let mut digests: Vec<Option<Result<String, LoadError>>> = Vec::new();
    digests.resize_with(candidates.len(), || None);
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, result)) => digests[index] = Some(result),
            Err(err) => tracing::warn!(%err, "checksum task aborted"),
        }
    }

    let mut change_set = ChangeSet::default();
    for (path, digest) in candidates.into_iter().zip(digests) {
        match digest {
            Some(Ok(sum)) => {
                let changed = prior.get(&path) != Some(&sum);
                change_set.checksums.insert(path.clone(), sum);
                if changed {
                    change_set.to_load.push(path);
                }
            }
            Some(Err(err)) => {
                tracing::warn!(path = %path.display(), %err, "skipping unreadable script file");
            }
            None => {}
        }
    }
    change_set
}
