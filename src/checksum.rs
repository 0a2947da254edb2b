//! Content checksums for script files.
//!
//! Checksums are SHA-256 over file bytes, rendered as lowercase hex. Content
//! identity drives change detection — never mtimes — so byte-identical files
//! produce the same digest regardless of path or copy history.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::LoadError;

/// Digest a byte slice to a 64-character lowercase hex string.
#[must_use]
pub fn content_checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Read a file and digest its full content.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read. Callers treat this
/// as a per-file failure, not an abort of the whole load.
pub async fn file_checksum(path: &Path) -> Result<String, LoadError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content_checksum(&bytes))
}
