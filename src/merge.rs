//! Deep merge of parsed fragments into accumulated namespaces.
//!
//! Fragments are folded in processing order — the enumerator's sorted
//! order — so the same file set always merges to the same result. Within a
//! namespace the merge is structural: object collisions recurse, anything
//! else is last-write-wins. Later scripts overriding earlier generic
//! content is the intended use, not an accident of ordering.

use serde_json::Value;

use crate::fragment::{Fragment, Namespace};

// ---------------------------------------------------------------------------
// MergedNamespaces
// ---------------------------------------------------------------------------

/// The three accumulated namespaces after merging every loaded fragment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergedNamespaces {
    pub topics: Namespace,
    pub gambits: Namespace,
    pub replies: Namespace,
}

impl MergedNamespaces {
    /// Whether no fragment contributed any entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty() && self.gambits.is_empty() && self.replies.is_empty()
    }
}

/// Fold `fragments` in sequence order into three merged namespaces.
///
/// Fragments touching disjoint keys commute; overlapping keys resolve in
/// favor of the later fragment at each leaf.
pub fn merge_fragments<I>(fragments: I) -> MergedNamespaces
where
    I: IntoIterator<Item = Fragment>,
{
    let mut merged = MergedNamespaces::default();
    for fragment in fragments {
        merge_namespace(&mut merged.topics, fragment.topics);
        merge_namespace(&mut merged.gambits, fragment.gambits);
        merge_namespace(&mut merged.replies, fragment.replies);
    }
    merged
}

/// Merge `incoming` into `acc`, recursing through object-vs-object
/// collisions and replacing the accumulated value everywhere else.
fn merge_namespace(acc: &mut Namespace, incoming: Namespace) {
    for (key, value) in incoming {
        match (acc.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(update)) => {
                merge_namespace(existing, update);
            }
            (Some(slot), value) => *slot = value,
            (None, value) => {
                acc.insert(key, value);
            }
        }
    }
}
