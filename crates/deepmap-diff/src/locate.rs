//! Finding changes inside a change tree.
//!
//! [`find_first_change`] answers "is there a change, and where does one
//! start?" and stops at the first hit. [`collect_changes`] is the separate,
//! exhaustive walk.

use std::fmt;

use deepmap_value::{Key, Value};
use serde::Serialize;
use tracing::trace;

use crate::kind::ChangeKind;
use crate::node::ChangeNode;

/// Find the first top-level entry of a container node whose subtree holds a
/// changed leaf.
///
/// Entries are searched depth-first in container order. The returned entry
/// is a witness, not a listing: later entries may also hold changes. Leaf
/// nodes have no entries and always yield `None`.
pub fn find_first_change(node: &ChangeNode) -> Option<(&Key, &ChangeNode)> {
    let found = node.entries()?.iter().find(|(_, child)| child.has_change());
    if let Some((key, _)) = found {
        trace!(%key, "first change found");
    }
    found
}

/// Location of a node, as the keys leading to it from the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<Key>);

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// This path extended by one key.
    pub fn child(&self, key: Key) -> Self {
        let mut keys = self.0.clone();
        keys.push(key);
        Self(keys)
    }
}

impl From<Vec<Key>> for Path {
    fn from(keys: Vec<Key>) -> Self {
        Self(keys)
    }
}

/// Renders as `$`, `$.name`, `$.list[0].name`.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for key in &self.0 {
            match key {
                Key::Index(i) => write!(f, "[{i}]")?,
                Key::Name(name) => write!(f, ".{name}")?,
            }
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A changed leaf and where it sits.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChangeRecord {
    pub path: Path,
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub data: Value,
}

/// Every changed leaf in the tree, depth-first in container order.
///
/// A top-level leaf that changed yields one record at the root path.
pub fn collect_changes(node: &ChangeNode) -> Vec<ChangeRecord> {
    let mut out = Vec::new();
    collect_into(node, &Path::root(), &mut out);
    out
}

fn collect_into(node: &ChangeNode, path: &Path, out: &mut Vec<ChangeRecord>) {
    match node {
        ChangeNode::Leaf(leaf) => {
            if leaf.is_changed() {
                out.push(ChangeRecord {
                    path: path.clone(),
                    kind: leaf.kind,
                    data: leaf.data.clone(),
                });
            }
        }
        ChangeNode::Container(entries) => {
            for (key, child) in entries {
                collect_into(child, &path.child(key.clone()), out);
            }
        }
    }
}
