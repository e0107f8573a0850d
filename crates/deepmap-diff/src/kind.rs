//! Leaf comparison.

use std::fmt;

use deepmap_value::Value;
use serde::{Deserialize, Serialize};

/// The outcome of comparing two leaf values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Absent on the left, present on the right.
    Created,
    /// Present on both sides with different values.
    Updated,
    /// Present on the left, absent on the right.
    Deleted,
    Unchanged,
}

impl ChangeKind {
    pub fn is_unchanged(self) -> bool {
        self == ChangeKind::Unchanged
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Created => "created",
            ChangeKind::Updated => "updated",
            ChangeKind::Deleted => "deleted",
            ChangeKind::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a comparison of two values as leaves.
///
/// Precedence: identical → `Unchanged`; both dates on the same epoch
/// millisecond → `Unchanged`; left undefined → `Created`; right undefined →
/// `Deleted`; anything else → `Updated`.
///
/// Containers are compared by identity here, so two separately built
/// containers with equal contents are `Updated`. Only [`crate::map`] looks
/// inside containers.
pub fn change_kind(a: &Value, b: &Value) -> ChangeKind {
    if a.strict_eq(b) {
        return ChangeKind::Unchanged;
    }
    if let (Some(x), Some(y)) = (a.as_date_millis(), b.as_date_millis()) {
        if x == y {
            return ChangeKind::Unchanged;
        }
    }
    if a.is_undefined() {
        ChangeKind::Created
    } else if b.is_undefined() {
        ChangeKind::Deleted
    } else {
        ChangeKind::Updated
    }
}
