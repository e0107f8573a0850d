//! Change queries built on the mapper and the locator.
//!
//! # Legacy coercion
//!
//! [`any_changes`] keeps the long-standing behavior that existing dirty
//! checks rely on: it reports a change unless the comparison was between
//! containers and nothing inside them changed. When both inputs are leaves
//! and equal, [`get_changes`] returns `Changes::Leaf(false)`, which is not
//! "nothing", so `any_changes(1, 1)` is `true`. [`has_changes`] applies the
//! corrected coercion and is what new callers should use.

use deepmap_value::{Key, Value};
use tracing::debug;

use crate::error::DiffResult;
use crate::locate::find_first_change;
use crate::mapper::Mapper;
use crate::node::ChangeNode;

/// Result of the tri-state change query.
#[derive(Clone, Debug, PartialEq)]
pub enum Changes {
    /// The inputs were compared as leaves; `true` if they differ.
    Leaf(bool),
    /// The inputs were containers; this is the first top-level entry whose
    /// subtree holds a change.
    First { key: Key, node: ChangeNode },
    /// The inputs were containers and nothing changed.
    Nothing,
}

impl Changes {
    /// Corrected coercion: a leaf comparison counts only if it differed.
    pub fn is_changed(&self) -> bool {
        match self {
            Changes::Leaf(changed) => *changed,
            Changes::First { .. } => true,
            Changes::Nothing => false,
        }
    }

    /// Legacy coercion: anything but [`Changes::Nothing`] counts, including
    /// `Leaf(false)`.
    pub fn is_legacy_changed(&self) -> bool {
        !matches!(self, Changes::Nothing)
    }
}

impl Mapper {
    /// Map `a` against `b` and report whether, and where first, it changed.
    pub fn get_changes(&self, a: &Value, b: &Value) -> DiffResult<Changes> {
        let tree = self.map(a, b)?;
        let changes = match &tree {
            ChangeNode::Leaf(leaf) => Changes::Leaf(leaf.is_changed()),
            ChangeNode::Container(_) => match find_first_change(&tree) {
                Some((key, node)) => Changes::First {
                    key: key.clone(),
                    node: node.clone(),
                },
                None => Changes::Nothing,
            },
        };
        debug!(changed = changes.is_changed(), "change query");
        Ok(changes)
    }

    /// Legacy boolean; see the module docs for the equal-leaf quirk.
    pub fn any_changes(&self, a: &Value, b: &Value) -> DiffResult<bool> {
        Ok(self.get_changes(a, b)?.is_legacy_changed())
    }

    /// Corrected boolean: `false` whenever nothing differs.
    pub fn has_changes(&self, a: &Value, b: &Value) -> DiffResult<bool> {
        Ok(self.get_changes(a, b)?.is_changed())
    }
}

/// Tri-state change query with the default mapper.
pub fn get_changes(a: &Value, b: &Value) -> DiffResult<Changes> {
    Mapper::default().get_changes(a, b)
}

/// Legacy boolean change query. Reports `true` for equal top-level leaves.
pub fn any_changes(a: &Value, b: &Value) -> DiffResult<bool> {
    Mapper::default().any_changes(a, b)
}

/// Corrected boolean change query.
pub fn has_changes(a: &Value, b: &Value) -> DiffResult<bool> {
    Mapper::default().has_changes(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DiffError, Side};
    use crate::kind::ChangeKind;
    use crate::options::MapOptions;
    use serde_json::json;

    fn v(json: serde_json::Value) -> Value {
        Value::try_from(json).unwrap()
    }

    #[test]
    fn equal_containers() {
        let (a, b) = (v(json!({"a": "a"})), v(json!({"a": "a"})));
        assert_eq!(get_changes(&a, &b).unwrap(), Changes::Nothing);
        assert!(!any_changes(&a, &b).unwrap());
        assert!(!has_changes(&a, &b).unwrap());
    }

    #[test]
    fn differing_containers() {
        let (a, b) = (v(json!({"a": "a"})), v(json!({"b": "b"})));
        assert!(any_changes(&a, &b).unwrap());
        assert!(has_changes(&a, &b).unwrap());
        match get_changes(&a, &b).unwrap() {
            Changes::First { key, node } => {
                assert_eq!(key, Key::name("a"));
                assert_eq!(node.as_leaf().unwrap().kind, ChangeKind::Deleted);
            }
            other => panic!("expected First, got {:?}", other),
        }
    }

    #[test]
    fn equal_leaves_keep_legacy_quirk() {
        let one = Value::from(1);
        assert_eq!(get_changes(&one, &one).unwrap(), Changes::Leaf(false));
        assert!(any_changes(&one, &one).unwrap());
        assert!(!has_changes(&one, &one).unwrap());
    }

    #[test]
    fn equal_dates_keep_legacy_quirk() {
        let a = Value::date_millis(86_400_000).unwrap();
        let b = Value::date_millis(86_400_000).unwrap();
        assert_eq!(get_changes(&a, &b).unwrap(), Changes::Leaf(false));
        assert!(any_changes(&a, &b).unwrap());
        assert!(!has_changes(&a, &b).unwrap());
    }

    #[test]
    fn differing_leaves() {
        let changes = get_changes(&Value::from("x"), &Value::from("y")).unwrap();
        assert_eq!(changes, Changes::Leaf(true));
        assert!(changes.is_changed());
        assert!(changes.is_legacy_changed());
    }

    #[test]
    fn array_element_change() {
        let a = v(json!([{"n": "x", "v": 1}]));
        let b = v(json!([{"n": "x", "v": 2}]));
        assert!(any_changes(&a, &b).unwrap());
    }

    #[test]
    fn array_reorder_is_a_change() {
        let a = v(json!([{"id": 1}, {"id": 2}]));
        let b = v(json!([{"id": 2}, {"id": 1}]));
        assert!(any_changes(&a, &b).unwrap());
        assert!(has_changes(&a, &b).unwrap());
    }

    #[test]
    fn container_against_leaf() {
        let a = v(json!({"a": 1}));
        assert_eq!(get_changes(&a, &Value::Null).unwrap(), Changes::Leaf(true));
    }

    #[test]
    fn callable_errors_propagate() {
        let f = Value::callable("f", |_| Value::Null);
        assert_eq!(
            any_changes(&Value::Null, &f).unwrap_err(),
            DiffError::InvalidArgument { side: Side::Right }
        );
        assert!(has_changes(&f, &Value::Null).is_err());
    }

    #[test]
    fn nested_callables_do_not_count() {
        let a = Value::object([
            ("f", Value::callable("f", |_| Value::from(1))),
            ("x", Value::from(1)),
        ]);
        let b = Value::object([
            ("f", Value::callable("g", |_| Value::from(2))),
            ("x", Value::from(1)),
        ]);
        assert!(!any_changes(&a, &b).unwrap());
    }

    #[test]
    fn iterative_mapper_answers_the_same() {
        let mapper = Mapper::new(MapOptions::iterative());
        let a = v(json!({"a": [1, 2], "b": {"c": null}}));
        let b = v(json!({"a": [1, 2], "b": {"c": 0}}));
        assert_eq!(
            mapper.get_changes(&a, &b).unwrap(),
            get_changes(&a, &b).unwrap()
        );
        assert!(mapper.any_changes(&Value::from(1), &Value::from(1)).unwrap());
    }
}
