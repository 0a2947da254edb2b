//! Load orchestration: enumerate → detect → parse → merge → assemble.
//!
//! One logical load per call. File-level work (checksumming in
//! [`crate::detect`], reading and parsing here) fans out across tokio tasks
//! purely to overlap I/O latency; every result is parked by enumeration
//! index and the merge folds in the enumerator's sorted order, so
//! completion timing never changes the outcome.
//!
//! Parse failures are fail-fast: the first one (in enumeration order)
//! aborts the call. Read failures at parse time are per-file — the file is
//! dropped from the load *and* from the returned checksum table, so the
//! next run retries it instead of treating it as cached.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;

use crate::detect::{self, ChangeSet, ChecksumTable};
use crate::enumerate;
use crate::error::LoadError;
use crate::fragment::{Fragment, FragmentParser};
use crate::merge;
use crate::snapshot::{self, LoadOutcome};

// ---------------------------------------------------------------------------
// LoadOptions
// ---------------------------------------------------------------------------

/// Optional inputs to [`load_directory`].
#[derive(Clone, Debug)]
pub struct LoadOptions<F> {
    /// Opaque fact-system context handed through to every parse call.
    pub facts: Option<Arc<F>>,
    /// Checksum table from a previous run. Files whose digest still matches
    /// are skipped. Never mutated; a rebuilt table comes back in the outcome.
    pub cache: ChecksumTable,
}

impl<F> Default for LoadOptions<F> {
    fn default() -> Self {
        Self {
            facts: None,
            cache: ChecksumTable::new(),
        }
    }
}

impl<F> LoadOptions<F> {
    /// Seed the prior checksum table.
    #[must_use]
    pub fn cache(mut self, cache: ChecksumTable) -> Self {
        self.cache = cache;
        self
    }

    /// Provide a fact-system context for parsing.
    #[must_use]
    pub fn facts(mut self, facts: Arc<F>) -> Self {
        self.facts = Some(facts);
        self
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Read one script file and parse it into a [`Fragment`].
///
/// # Errors
///
/// [`LoadError::Io`] if the file cannot be read, [`LoadError::Parse`] if the
/// parser rejects its content.
pub async fn parse_file<P: FragmentParser>(
    parser: &P,
    path: &Path,
    facts: Option<&P::Facts>,
) -> Result<Fragment, LoadError> {
    let source = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    parser
        .parse(&source, facts)
        .map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Incrementally load every script file under `root`.
///
/// Enumerates `root` (a directory, or a single script file), checksums the
/// script files against `options.cache`, parses only first-seen or changed
/// files, deep-merges their fragments in path order, and packages the
/// result. See [`LoadOutcome`] for the three possible shapes.
///
/// # Errors
///
/// [`LoadError::Parse`] if any selected file fails to parse. Nothing else is
/// fatal: unreadable files and unlistable directories degrade with a warning.
pub async fn load_directory<P: FragmentParser>(
    parser: Arc<P>,
    root: impl AsRef<Path>,
    options: LoadOptions<P::Facts>,
) -> Result<LoadOutcome, LoadError> {
    let root = root.as_ref();
    let started = Instant::now();

    let files = enumerate::enumerate(root).await;
    let ChangeSet {
        to_load,
        mut checksums,
    } = detect::detect_changes(files, &options.cache).await;

    let mut tasks = JoinSet::new();
    for (index, path) in to_load.iter().cloned().enumerate() {
        let parser = Arc::clone(&parser);
        let facts = options.facts.clone();
        tasks.spawn(async move {
            let result = parse_file(parser.as_ref(), &path, facts.as_deref()).await;
            (index, result)
        });
    }

    // Park by enumeration index so merge order is independent of
    // completion order.
    let mut results: Vec<Option<Result<Fragment, LoadError>>> = Vec::new();
    results.resize_with(to_load.len(), || None);
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, result)) => results[index] = Some(result),
            Err(err) => tracing::warn!(%err, "parse task aborted"),
        }
    }

    let mut fragments = Vec::with_capacity(to_load.len());
    for (path, result) in to_load.iter().zip(results) {
        match result {
            Some(Ok(fragment)) => fragments.push(fragment),
            Some(Err(err @ LoadError::Io { .. })) => {
                tracing::warn!(path = %path.display(), %err, "could not read script for parsing, will retry next run");
                checksums.remove(path);
            }
            Some(Err(err)) => return Err(err),
            None => {
                checksums.remove(path);
            }
        }
    }

    let parsed = fragments.len();
    let merged = merge::merge_fragments(fragments);
    tracing::info!(
        root = %root.display(),
        elapsed = ?started.elapsed(),
        seen = checksums.len(),
        parsed,
        topics = merged.topics.len(),
        gambits = merged.gambits.len(),
        replies = merged.replies.len(),
        "script load complete"
    );

    Ok(snapshot::assemble(merged, checksums))
}
