//! Baseline capture for dirty checks.
//!
//! A [`Snapshot`] holds the value a record had when it was loaded and
//! compares later edits against it.

use deepmap_value::{is_callable, Value};
use tracing::debug;

use crate::error::{DiffError, DiffResult, Side};
use crate::locate::{collect_changes, ChangeRecord};
use crate::mapper::Mapper;
use crate::node::ChangeNode;
use crate::query::Changes;

#[derive(Clone, Debug)]
pub struct Snapshot {
    baseline: Value,
    mapper: Mapper,
}

impl Snapshot {
    /// Capture `baseline` with the default mapper.
    ///
    /// A callable can never be compared, so it is rejected here rather than
    /// on every later check.
    pub fn capture(baseline: Value) -> DiffResult<Self> {
        Self::with_mapper(baseline, Mapper::default())
    }

    pub fn with_mapper(baseline: Value, mapper: Mapper) -> DiffResult<Self> {
        if is_callable(&baseline) {
            return Err(DiffError::InvalidArgument { side: Side::Left });
        }
        Ok(Self { baseline, mapper })
    }

    pub fn baseline(&self) -> &Value {
        &self.baseline
    }

    /// Change tree of the baseline against `live`.
    pub fn diff(&self, live: &Value) -> DiffResult<ChangeNode> {
        self.mapper.map(&self.baseline, live)
    }

    pub fn changes(&self, live: &Value) -> DiffResult<Changes> {
        self.mapper.get_changes(&self.baseline, live)
    }

    /// Returns `true` if `live` differs from the baseline anywhere.
    ///
    /// Uses the corrected coercion, so an unchanged scalar baseline is clean.
    pub fn is_dirty(&self, live: &Value) -> DiffResult<bool> {
        let dirty = self.changes(live)?.is_changed();
        debug!(dirty, "snapshot dirty check");
        Ok(dirty)
    }

    /// Every changed leaf between the baseline and `live`.
    pub fn changed_paths(&self, live: &Value) -> DiffResult<Vec<ChangeRecord>> {
        Ok(collect_changes(&self.diff(live)?))
    }

    /// Make `live` the new baseline, e.g. after it has been saved.
    pub fn rebase(&mut self, live: Value) -> DiffResult<()> {
        if is_callable(&live) {
            return Err(DiffError::InvalidArgument { side: Side::Right });
        }
        debug!(kind = live.type_name(), "snapshot rebased");
        self.baseline = live;
        Ok(())
    }
}
