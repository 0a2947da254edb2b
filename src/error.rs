//! Error types for script loading.
//!
//! Defines [`LoadError`], the unified error type for load operations. Each
//! variant carries the path of the offending file so that callers can report
//! exactly which script broke without additional context.
//!
//! Enumeration failures never appear here: a root that cannot be listed
//! degrades to an empty file set (see [`crate::enumerate`]), and unreadable
//! candidate files are skipped per-file during change detection. Only the
//! two failures a caller must act on surface as errors.

use std::fmt;
use std::path::PathBuf;

use crate::fragment::ParseError;

// ---------------------------------------------------------------------------
// LoadError
// ---------------------------------------------------------------------------

/// Unified error type for script load operations.
#[derive(Debug)]
pub enum LoadError {
    /// A script file could not be read.
    ///
    /// Non-fatal during a directory load (the file is skipped and dropped
    /// from the returned checksum table); fatal for [`crate::parse_file`],
    /// which has nothing else to return.
    Io {
        /// Path to the unreadable file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The fragment parser rejected a script file's content.
    ///
    /// Always fatal to the whole load: a partially merged knowledge base is
    /// never handed to the caller.
    Parse {
        /// Path to the rejected file.
        path: PathBuf,
        /// Location and reason reported by the parser.
        source: ParseError,
    },
}

impl LoadError {
    /// The path of the file this error refers to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "could not read script file `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse `{}`: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}
