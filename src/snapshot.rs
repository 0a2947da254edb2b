//! Versioned knowledge snapshots and the load outcome.
//!
//! A [`KnowledgeSnapshot`] packages the merged namespaces, the refreshed
//! checksum table, and the snapshot format version. A load that produced no
//! content at all does not get a hollow snapshot; it degenerates to one of
//! the no-content [`LoadOutcome`] variants so callers can tell "no scripts
//! found" apart from "scripts exist but nothing new this run".

use serde::{Deserialize, Serialize};

use crate::detect::ChecksumTable;
use crate::fragment::Namespace;
use crate::merge::MergedNamespaces;

/// Snapshot format version stamped into every [`KnowledgeSnapshot`].
///
/// The downstream dialogue engine checks this against the version it
/// supports. Incrementing it is a breaking-change signal and must be
/// coordinated with that consumer.
pub const SNAPSHOT_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// KnowledgeSnapshot
// ---------------------------------------------------------------------------

/// The complete merged, versioned output of one load call.
///
/// Serializable with serde; persistence (of the snapshot or just its
/// `checksums` table for the next run) is entirely the caller's business.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeSnapshot {
    /// Merged conversation topics.
    pub topics: Namespace,
    /// Merged bot-initiated prompts.
    pub gambits: Namespace,
    /// Merged response templates.
    pub replies: Namespace,
    /// Digest of every script file seen this run, loaded or skipped.
    pub checksums: ChecksumTable,
    /// Always [`SNAPSHOT_VERSION`] for snapshots built by this crate.
    pub version: u32,
}

// ---------------------------------------------------------------------------
// LoadOutcome
// ---------------------------------------------------------------------------

/// Outcome of a directory load.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadOutcome {
    /// No script files were found under the root (or the root itself was
    /// missing — enumeration degrades rather than failing).
    Empty,

    /// Script files exist, but none contributed content this run: all were
    /// unchanged against the cache, or every (re)parsed fragment was empty.
    /// The refreshed checksum table is still returned for persistence.
    Unchanged {
        /// Digest of every script file seen this run.
        checksums: ChecksumTable,
    },

    /// At least one namespace received content.
    Loaded(KnowledgeSnapshot),
}

impl LoadOutcome {
    /// Whether this outcome carries no knowledge-base content.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !matches!(self, Self::Loaded(_))
    }

    /// The refreshed checksum table, if any script files were seen.
    #[must_use]
    pub const fn checksums(&self) -> Option<&ChecksumTable> {
        match self {
            Self::Empty => None,
            Self::Unchanged { checksums } => Some(checksums),
            Self::Loaded(snapshot) => Some(&snapshot.checksums),
        }
    }

    /// Consume the outcome, yielding the snapshot if one was produced.
    #[must_use]
    pub fn into_snapshot(self) -> Option<KnowledgeSnapshot> {
        match self {
            Self::Loaded(snapshot) => Some(snapshot),
            Self::Empty | Self::Unchanged { .. } => None,
        }
    }
}

/// Package merged namespaces and the checksum table into an outcome,
/// applying the no-content degeneration rules.
pub(crate) fn assemble(merged: MergedNamespaces, checksums: ChecksumTable) -> LoadOutcome {
    if merged.is_empty() {
        if checksums.is_empty() {
            LoadOutcome::Empty
        } else {
            LoadOutcome::Unchanged { checksums }
        }
    } else {
        LoadOutcome::Loaded(KnowledgeSnapshot {
            topics: merged.topics,
            gambits: merged.gambits,
            replies: merged.replies,
            checksums,
            version: SNAPSHOT_VERSION,
        })
    }
}
