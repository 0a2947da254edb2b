//! Incremental script loader for a dialogue engine knowledge base.
//!
//! Loads a directory of `.ss` script files into three merged namespaces
//! (topics, gambits, replies), skipping files whose content checksum
//! matches a table from a previous run:
//!
//! ```text
//! enumerate → detect changes (SHA-256) → parse changed files
//! → deep-merge fragments in path order → versioned snapshot
//! ```
//!
//! The script grammar is not defined here — callers supply it through the
//! [`FragmentParser`] trait. Persistence of the checksum table between runs
//! is likewise the caller's job; the loader is a pure function of the tree
//! on disk, the parser, and the prior table.

pub mod checksum;
pub mod detect;
pub mod enumerate;
pub mod error;
pub mod fragment;
pub mod loader;
pub mod merge;
pub mod snapshot;

pub use detect::{ChecksumTable, SCRIPT_EXTENSION, is_script_file};
pub use error::LoadError;
pub use fragment::{Fragment, FragmentParser, Namespace, ParseError};
pub use loader::{LoadOptions, load_directory, parse_file};
pub use snapshot::{KnowledgeSnapshot, LoadOutcome, SNAPSHOT_VERSION};
