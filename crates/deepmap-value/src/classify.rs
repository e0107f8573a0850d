//! Leaf / container classification.
//!
//! All predicates are pure and total over every [`Value`] variant.

use crate::value::Value;

/// How the diff engine treats a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Compared by identity or date equality, never recursed into.
    Leaf,
    /// Recursed into key by key.
    Container,
    /// Excluded from comparison.
    Callable,
}

/// Classify a value for dispatch.
pub fn classify(value: &Value) -> Shape {
    match value {
        Value::Array(_) | Value::Object(_) => Shape::Container,
        Value::Callable(_) => Shape::Callable,
        _ => Shape::Leaf,
    }
}

/// `true` only for arrays and objects.
pub fn is_container(value: &Value) -> bool {
    classify(value) == Shape::Container
}

/// Negation of [`is_container`]. Callables count as leaves here.
pub fn is_leaf(value: &Value) -> bool {
    !is_container(value)
}

/// `true` only for genuine date instants, never for date-formatted strings.
pub fn is_date(value: &Value) -> bool {
    matches!(value, Value::Date(_))
}

pub fn is_callable(value: &Value) -> bool {
    classify(value) == Shape::Callable
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Value> {
        vec![
            Value::Undefined,
            Value::Null,
            Value::from(true),
            Value::from(0),
            Value::from("2024-01-01T00:00:00Z"),
            Value::date_millis(1_700_000_000_000).unwrap(),
            Value::callable("f", |_| Value::Null),
            Value::array([1]),
            Value::object([("k", "v")]),
        ]
    }

    #[test]
    fn containers() {
        let flags: Vec<bool> = samples().iter().map(is_container).collect();
        assert_eq!(
            flags,
            vec![false, false, false, false, false, false, false, true, true]
        );
    }

    #[test]
    fn leaf_is_negation_of_container() {
        for v in samples() {
            assert_eq!(is_leaf(&v), !is_container(&v), "{}", v.type_name());
        }
    }

    #[test]
    fn date_strings_are_not_dates() {
        assert!(!is_date(&Value::from("2024-01-01T00:00:00Z")));
        assert!(is_date(&Value::date_millis(0).unwrap()));
    }

    #[test]
    fn callables() {
        assert!(is_callable(&Value::callable("f", |_| Value::Null)));
        assert!(is_leaf(&Value::callable("f", |_| Value::Null)));
        assert!(!is_callable(&Value::Null));
    }

    #[test]
    fn classify_dispatch() {
        assert_eq!(classify(&Value::array(Vec::<Value>::new())), Shape::Container);
        assert_eq!(classify(&Value::callable("f", |_| Value::Null)), Shape::Callable);
        assert_eq!(classify(&Value::date_millis(5).unwrap()), Shape::Leaf);
        assert_eq!(classify(&Value::Undefined), Shape::Leaf);
    }
}
