//! Structural change detection for deepmap.
//!
//! Compares two dynamic values, producing a change tree that mirrors the
//! union of their shapes, and answers "did anything change?" and "what
//! changed first?" on top of it.
//!
//! # Key Types
//!
//! - [`ChangeKind`] -- Four-way classification of a single leaf comparison
//! - [`ChangeNode`] / [`LeafChange`] -- The change tree
//! - [`Mapper`] / [`MapOptions`] -- Tree construction (recursive or explicit-stack)
//! - [`Changes`] -- Result of the tri-state change query
//! - [`ChangeRecord`] / [`Path`] -- Exhaustive listing of changed leaves
//! - [`Snapshot`] -- Baseline capture for dirty checks
//!
//! # Limitations
//!
//! There is no cycle detection and no depth limit. Recursion depth equals
//! the nesting depth of the compared values.

pub mod error;
pub mod kind;
pub mod locate;
pub mod mapper;
pub mod node;
pub mod options;
pub mod query;
pub mod snapshot;

pub use error::{DiffError, DiffResult, Side};
pub use kind::{change_kind, ChangeKind};
pub use locate::{collect_changes, find_first_change, ChangeRecord, Path};
pub use mapper::{map, map_iterative, Mapper};
pub use node::{ChangeNode, ChangeSummary, LeafChange};
pub use options::{MapOptions, Traversal};
pub use query::{any_changes, get_changes, has_changes, Changes};
pub use snapshot::Snapshot;
