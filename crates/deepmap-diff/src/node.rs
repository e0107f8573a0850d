//! Change tree nodes.

use deepmap_value::{Key, Value};
use indexmap::IndexMap;
use serde::Serialize;

use crate::kind::{change_kind, ChangeKind};

/// The comparison of two values treated as leaves.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LeafChange {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    /// The left value, or the right value when the left is undefined.
    pub data: Value,
}

impl LeafChange {
    /// Compare two values as leaves.
    pub fn compare(a: &Value, b: &Value) -> Self {
        let data = if a.is_undefined() { b } else { a };
        Self {
            kind: change_kind(a, b),
            data: data.clone(),
        }
    }

    pub fn is_changed(&self) -> bool {
        !self.kind.is_unchanged()
    }
}

/// One node of a change tree.
///
/// Serializes as `{"type": ..., "data": ...}` for leaves and as a plain map
/// of key to node for containers.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChangeNode {
    Leaf(LeafChange),
    /// One entry per key present in either compared container.
    Container(IndexMap<Key, ChangeNode>),
}

impl Default for ChangeNode {
    /// The tree of two empty containers.
    fn default() -> Self {
        ChangeNode::Container(IndexMap::new())
    }
}

impl ChangeNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self, ChangeNode::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&LeafChange> {
        match self {
            ChangeNode::Leaf(leaf) => Some(leaf),
            ChangeNode::Container(_) => None,
        }
    }

    /// Child entries of a container node; `None` for leaves.
    pub fn entries(&self) -> Option<&IndexMap<Key, ChangeNode>> {
        match self {
            ChangeNode::Leaf(_) => None,
            ChangeNode::Container(entries) => Some(entries),
        }
    }

    /// Child node under `key`.
    pub fn get(&self, key: impl Into<Key>) -> Option<&ChangeNode> {
        self.entries()?.get(&key.into())
    }

    /// Returns `true` if any leaf in this subtree is not `Unchanged`.
    ///
    /// Depth-first in container order, stopping at the first changed leaf.
    pub fn has_change(&self) -> bool {
        match self {
            ChangeNode::Leaf(leaf) => leaf.is_changed(),
            ChangeNode::Container(entries) => entries.values().any(ChangeNode::has_change),
        }
    }

    /// Count leaves by kind across the whole subtree.
    pub fn summary(&self) -> ChangeSummary {
        let mut summary = ChangeSummary::default();
        self.tally(&mut summary);
        summary
    }

    fn tally(&self, summary: &mut ChangeSummary) {
        match self {
            ChangeNode::Leaf(leaf) => match leaf.kind {
                ChangeKind::Created => summary.created += 1,
                ChangeKind::Updated => summary.updated += 1,
                ChangeKind::Deleted => summary.deleted += 1,
                ChangeKind::Unchanged => summary.unchanged += 1,
            },
            ChangeNode::Container(entries) => {
                for child in entries.values() {
                    child.tally(summary);
                }
            }
        }
    }

    /// A copy of this subtree without unchanged leaves or containers left
    /// empty by removing them. `None` if nothing in the subtree changed.
    pub fn changed_only(&self) -> Option<ChangeNode> {
        match self {
            ChangeNode::Leaf(leaf) if leaf.is_changed() => Some(self.clone()),
            ChangeNode::Leaf(_) => None,
            ChangeNode::Container(entries) => {
                let kept: IndexMap<Key, ChangeNode> = entries
                    .iter()
                    .filter_map(|(k, child)| child.changed_only().map(|c| (k.clone(), c)))
                    .collect();
                if kept.is_empty() {
                    None
                } else {
                    Some(ChangeNode::Container(kept))
                }
            }
        }
    }
}

/// Leaf counts per [`ChangeKind`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSummary {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub unchanged: usize,
}

impl ChangeSummary {
    /// Number of leaves that are not `Unchanged`.
    pub fn changed(&self) -> usize {
        self.created + self.updated + self.deleted
    }

    pub fn total(&self) -> usize {
        self.changed() + self.unchanged
    }
}
