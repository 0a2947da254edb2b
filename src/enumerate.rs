//! Recursive file enumeration with a stable ordering contract.
//!
//! Merge order is processing order, so the file list feeding the pipeline
//! must not depend on filesystem traversal order. Paths are sorted
//! lexicographically before return; repeated loads over the same tree see
//! the same sequence on every platform.
//!
//! Enumeration never fails. A root that is a plain file degrades to a
//! one-element list, and any listing error is logged and treated as "no
//! files there" — a missing or unreadable directory is not a reason to
//! abort a load.

use std::path::{Path, PathBuf};

/// Recursively list all plain files under `root`, sorted lexicographically.
///
/// If `root` is itself a plain file, returns just that file. If `root`
/// cannot be inspected at all, returns an empty list. Unreadable
/// subdirectories are skipped, not fatal. Symlinks resolve to their
/// targets; dangling links are skipped with a warning.
pub async fn enumerate(root: &Path) -> Vec<PathBuf> {
    let meta = match tokio::fs::metadata(root).await {
        Ok(meta) => meta,
        Err(err) => {
            tracing::warn!(path = %root.display(), %err, "cannot inspect load root, treating as zero files");
            return Vec::new();
        }
    };

    if meta.is_file() {
        return vec![root.to_path_buf()];
    }

    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(path = %dir.display(), %err, "skipping unreadable directory");
                continue;
            }
        };

        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    let path = entry.path();
                    match entry.file_type().await {
                        Ok(kind) if kind.is_dir() => pending.push(path),
                        Ok(kind) if kind.is_file() => files.push(path),
                        Ok(kind) if kind.is_symlink() => {
                            // Resolve through the link, like a stat-based walk.
                            match tokio::fs::metadata(&path).await {
                                Ok(meta) if meta.is_dir() => pending.push(path),
                                Ok(meta) if meta.is_file() => files.push(path),
                                Ok(_) => {}
                                Err(err) => {
                                    tracing::warn!(path = %path.display(), %err, "skipping dangling symlink");
                                }
                            }
                        }
                        Ok(_) => {}
                        Err(err) => {
                            tracing::warn!(path = %path.display(), %err, "skipping unreadable entry");
                        }
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    tracing::warn!(path = %dir.display(), %err, "directory listing interrupted");
                    break;
                }
            }
        }
    }

    files.sort();
    files
}
