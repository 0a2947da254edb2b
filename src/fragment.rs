//! Parsed script fragments and the parser seam.
//!
//! A [`Fragment`] is the structured content of one script file: three keyed
//! namespaces (topics, gambits, replies) whose value shapes are opaque to
//! this crate — they only need to be deep-mergeable JSON objects. The script
//! grammar itself lives behind the [`FragmentParser`] trait; this crate owns
//! the load pipeline, not the language.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One keyed namespace of opaque knowledge-base entries.
///
/// `serde_json::Map` is backed by a `BTreeMap`, so iteration order (and thus
/// serialized output) is deterministic.
pub type Namespace = serde_json::Map<String, Value>;

// ---------------------------------------------------------------------------
// Fragment
// ---------------------------------------------------------------------------

/// Parsed content of a single script file, prior to merging.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Named conversation topics.
    #[serde(default)]
    pub topics: Namespace,
    /// Bot-initiated prompts.
    #[serde(default)]
    pub gambits: Namespace,
    /// Response templates.
    #[serde(default)]
    pub replies: Namespace,
}

impl Fragment {
    /// Whether this fragment contributes nothing to any namespace.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty() && self.gambits.is_empty() && self.replies.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ParseError
// ---------------------------------------------------------------------------

/// A parse failure reported by a [`FragmentParser`].
///
/// The loader wraps this with the path of the offending file; the parser
/// only reports where in the source it gave up, and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based source line, if the parser can localize the failure.
    pub line: Option<u64>,
    /// Human-readable reason.
    pub detail: String,
}

impl ParseError {
    /// Parse failure at a known source line.
    #[must_use]
    pub fn at_line(line: u64, detail: impl Into<String>) -> Self {
        Self {
            line: Some(line),
            detail: detail.into(),
        }
    }

    /// Parse failure with no line information.
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            line: None,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.detail),
            None => write!(f, "{}", self.detail),
        }
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// FragmentParser
// ---------------------------------------------------------------------------

/// External collaborator that turns script text into a [`Fragment`].
///
/// `Facts` is an opaque capability handed through from
/// [`LoadOptions`](crate::loader::LoadOptions) to each parse call — for
/// example a fact system used for semantic expansion of triggers. Parsers
/// that need no such context can set `type Facts = ()`.
///
/// Implementations must be callable from multiple tasks at once: directory
/// loads parse changed files concurrently.
pub trait FragmentParser: Send + Sync + 'static {
    /// Opaque fact-system context available during parsing.
    type Facts: Send + Sync + 'static;

    /// Parse one file's text into a fragment.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] locating the failure within `source`.
    fn parse(&self, source: &str, facts: Option<&Self::Facts>) -> Result<Fragment, ParseError>;
}
