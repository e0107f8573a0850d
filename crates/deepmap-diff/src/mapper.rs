//! Change tree construction.
//!
//! Both traversals follow the same rules:
//!
//! - a callable top-level input is rejected before anything is compared;
//! - if either side is a leaf, the pair is compared as leaves;
//! - otherwise every key of the left container is visited in order, then the
//!   keys only the right container has;
//! - a key holding a callable on either side is left out of the tree.
//!
//! Arrays are walked by position like any other container, so reordering
//! shows up as per-index updates rather than moves.

use std::collections::HashSet;

use deepmap_value::{classify, Key, Shape, Value};
use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::{DiffError, DiffResult, Side};
use crate::node::{ChangeNode, LeafChange};
use crate::options::{MapOptions, Traversal};

static UNDEFINED: Value = Value::Undefined;

/// Stateless change tree builder.
#[derive(Clone, Debug, Default)]
pub struct Mapper {
    options: MapOptions,
}

impl Mapper {
    pub fn new(options: MapOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Build the change tree of `a` against `b`.
    ///
    /// Fails with [`DiffError::InvalidArgument`] if either input is a
    /// callable.
    pub fn map(&self, a: &Value, b: &Value) -> DiffResult<ChangeNode> {
        ensure_comparable(a, b)?;
        debug!(
            left = a.type_name(),
            right = b.type_name(),
            traversal = ?self.options.traversal,
            "mapping values"
        );
        Ok(match self.options.traversal {
            Traversal::Recursive => map_values(a, b),
            Traversal::Iterative => map_with_stack(a, b),
        })
    }
}

/// Build the change tree of `a` against `b` by plain recursion.
pub fn map(a: &Value, b: &Value) -> DiffResult<ChangeNode> {
    Mapper::default().map(a, b)
}

/// Build the change tree of `a` against `b` with an explicit work stack.
///
/// Yields exactly the tree [`map`] does. Deep nesting consumes heap instead
/// of call stack.
pub fn map_iterative(a: &Value, b: &Value) -> DiffResult<ChangeNode> {
    Mapper::new(MapOptions::iterative()).map(a, b)
}

fn ensure_comparable(a: &Value, b: &Value) -> DiffResult<()> {
    if classify(a) == Shape::Callable {
        return Err(DiffError::InvalidArgument { side: Side::Left });
    }
    if classify(b) == Shape::Callable {
        return Err(DiffError::InvalidArgument { side: Side::Right });
    }
    Ok(())
}

fn map_values(a: &Value, b: &Value) -> ChangeNode {
    match (classify(a), classify(b)) {
        (Shape::Container, Shape::Container) => {
            let mut entries = IndexMap::new();
            for (key, left, right) in paired_entries(a, b) {
                let child = map_values(left, right);
                entries.insert(key, child);
            }
            ChangeNode::Container(entries)
        }
        _ => ChangeNode::Leaf(LeafChange::compare(a, b)),
    }
}

/// The slots of two containers, aligned by key.
///
/// Left keys come first in left order, then right-only keys in right order.
/// Missing slots read as undefined. Keys with a callable on either side are
/// dropped.
fn paired_entries<'v>(a: &'v Value, b: &'v Value) -> Vec<(Key, &'v Value, &'v Value)> {
    let left = a.entries();
    let mut seen: HashSet<Key> = HashSet::with_capacity(left.len());
    let mut pairs = Vec::with_capacity(left.len());

    for (key, value) in left {
        seen.insert(key.clone());
        if classify(value) == Shape::Callable {
            trace!(%key, "skipping callable on left");
            continue;
        }
        let other = b.get(&key).unwrap_or(&UNDEFINED);
        if classify(other) == Shape::Callable {
            trace!(%key, "skipping callable on right");
            continue;
        }
        pairs.push((key, value, other));
    }

    for (key, value) in b.entries() {
        if seen.contains(&key) {
            continue;
        }
        if classify(value) == Shape::Callable {
            trace!(%key, "skipping callable on right");
            continue;
        }
        pairs.push((key, &UNDEFINED, value));
    }

    pairs
}

/// A node under construction in the explicit-stack traversal.
enum Pending {
    Vacant,
    Leaf(LeafChange),
    /// Children as `(key, arena slot)`; slots always follow their parent.
    Container(Vec<(Key, usize)>),
}

fn map_with_stack(a: &Value, b: &Value) -> ChangeNode {
    let mut arena: Vec<Pending> = vec![Pending::Vacant];
    let mut work: Vec<(usize, &Value, &Value)> = vec![(0, a, b)];

    while let Some((slot, left, right)) = work.pop() {
        arena[slot] = match (classify(left), classify(right)) {
            (Shape::Container, Shape::Container) => {
                let pairs = paired_entries(left, right);
                let mut children = Vec::with_capacity(pairs.len());
                for (key, l, r) in pairs {
                    let child = arena.len();
                    arena.push(Pending::Vacant);
                    children.push((key, child));
                    work.push((child, l, r));
                }
                Pending::Container(children)
            }
            _ => Pending::Leaf(LeafChange::compare(left, right)),
        };
    }

    // Children sit at higher slots than their parent, so assembling from the
    // back always finds them finished.
    let mut built: Vec<ChangeNode> = Vec::with_capacity(arena.len());
    built.resize_with(arena.len(), ChangeNode::default);
    for slot in (0..arena.len()).rev() {
        let node = match std::mem::replace(&mut arena[slot], Pending::Vacant) {
            Pending::Leaf(leaf) => ChangeNode::Leaf(leaf),
            Pending::Container(children) => ChangeNode::Container(
                children
                    .into_iter()
                    .map(|(key, child)| (key, std::mem::take(&mut built[child])))
                    .collect(),
            ),
            Pending::Vacant => ChangeNode::default(),
        };
        built[slot] = node;
    }
    built.swap_remove(0)
}
