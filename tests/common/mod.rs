//! Shared helpers for scriptkb integration tests.
//!
//! All tests run against tempfile temp dirs — no side effects outside them.
//! Scripts use a toy line-oriented grammar so the tests exercise the load
//! pipeline without depending on any real script language:
//!
//! ```text
//! topic greeting tone=formal
//! gambit opener text=how are you?
//! reply hello text=hi there
//! # comment lines and blank lines are ignored
//! ```

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Once;
use std::sync::atomic::{AtomicUsize, Ordering};

use scriptkb::{Fragment, FragmentParser, ParseError};
use serde_json::Value;
use tempfile::TempDir;

static TRACING: Once = Once::new();

/// Install the test tracing subscriber once per test binary.
///
/// Honors `RUST_LOG`; output goes through the test writer so it is captured
/// per test like any other print.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Temp-dir fixture for a script tree; also activates the test subscriber
/// so loads run with the ambient logging stack in place.
pub fn scripts_dir() -> TempDir {
    init_tracing();
    TempDir::new().expect("temp dir")
}

/// Fact context for [`LineParser`]: a prefix applied to every key, so tests
/// can observe that the context actually reached the parser.
pub struct KeyPrefixFacts {
    pub prefix: String,
}

/// Line-oriented test parser implementing the toy grammar above.
///
/// Counts parse invocations so tests can assert exactly which files were
/// (re)parsed.
#[derive(Default)]
pub struct LineParser {
    pub calls: AtomicUsize,
}

impl LineParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FragmentParser for LineParser {
    type Facts = KeyPrefixFacts;

    fn parse(&self, source: &str, facts: Option<&KeyPrefixFacts>) -> Result<Fragment, ParseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut fragment = Fragment::default();
        for (number, raw) in source.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.splitn(3, ' ');
            let (Some(kind), Some(key), Some(rest)) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(ParseError::at_line(
                    number as u64 + 1,
                    format!("malformed line: {line}"),
                ));
            };
            let Some((field, value)) = rest.split_once('=') else {
                return Err(ParseError::at_line(
                    number as u64 + 1,
                    format!("expected field=value, got: {rest}"),
                ));
            };

            let key = facts.map_or_else(|| key.to_owned(), |f| format!("{}{key}", f.prefix));
            let namespace = match kind {
                "topic" => &mut fragment.topics,
                "gambit" => &mut fragment.gambits,
                "reply" => &mut fragment.replies,
                other => {
                    return Err(ParseError::at_line(
                        number as u64 + 1,
                        format!("unknown namespace: {other}"),
                    ));
                }
            };

            let entry = namespace
                .entry(key)
                .or_insert_with(|| Value::Object(serde_json::Map::new()));
            if let Value::Object(map) = entry {
                map.insert(field.to_owned(), Value::String(value.to_owned()));
            }
        }
        Ok(fragment)
    }
}

/// Write a script (or any file) under `dir`, returning its path.
pub fn write_script(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create script dir");
    }
    std::fs::write(&path, content).expect("write script");
    path
}
