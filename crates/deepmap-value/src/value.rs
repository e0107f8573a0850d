//! The dynamic [`Value`] type.
//!
//! Containers and callables are reference types: cloning a `Value` clones an
//! [`Arc`] handle, and [`Value::strict_eq`] compares those handles by
//! identity. Everything else compares by value.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::error::{ValueError, ValueResult};
use crate::key::Key;

/// Largest integer an `f64` holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

type CallableFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// A shared closure embedded in a value.
///
/// Callables are never compared by content; two callables are the same only
/// when they share the same allocation.
#[derive(Clone)]
pub struct Callable {
    name: Arc<str>,
    func: Arc<CallableFn>,
}

impl Callable {
    /// Wrap a closure under a diagnostic name.
    pub fn new<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// The diagnostic name given at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the closure.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.func)(args)
    }

    /// Returns `true` if both handles point at the same closure.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable({})", self.name)
    }
}

/// A dynamically shaped value.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// An absent value. Missing container slots read as `Undefined`.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// A date/time instant.
    Date(DateTime<Utc>),
    Callable(Callable),
    /// An indexed sequence.
    Array(Arc<Vec<Value>>),
    /// A keyed container, in insertion order.
    Object(Arc<IndexMap<String, Value>>),
}

impl Value {
    /// Build an array from its elements.
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::Array(Arc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Build an object from `(name, value)` pairs, keeping their order.
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(Arc::new(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    /// Build a date instant from epoch milliseconds.
    pub fn date_millis(millis: i64) -> ValueResult<Self> {
        Utc.timestamp_millis_opt(millis)
            .single()
            .map(Value::Date)
            .ok_or(ValueError::DateOutOfRange(millis))
    }

    /// Wrap a closure.
    pub fn callable<F>(name: &str, func: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Value::Callable(Callable::new(name, func))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Short lowercase name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::Callable(_) => "callable",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Epoch milliseconds of a date instant.
    pub fn as_date_millis(&self) -> Option<i64> {
        match self {
            Value::Date(dt) => Some(dt.timestamp_millis()),
            _ => None,
        }
    }

    /// Identity comparison.
    ///
    /// Primitives and dates compare by value (`NaN` is never identical to
    /// itself). Arrays, objects and callables compare by handle, so two
    /// separately built containers with the same contents are not identical.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => a.ptr_eq(b),
            (Value::Array(a), Value::Array(b)) => Arc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Read one slot of a container. Leaves have no slots.
    pub fn get(&self, key: &Key) -> Option<&Value> {
        match (self, key) {
            (Value::Array(items), Key::Index(i)) => items.get(*i),
            (Value::Object(map), Key::Index(i)) => map.get(i.to_string().as_str()),
            (Value::Object(map), Key::Name(name)) => map.get(name.as_str()),
            _ => None,
        }
    }

    /// Enumerable entries of a container in iteration order; empty for leaves.
    ///
    /// Object entries follow insertion order. Integer-like names are not
    /// hoisted ahead of other names, so `{"b": .., "1": ..}` yields `b`
    /// before `1`. This order decides which entry the first-change search
    /// reports.
    pub fn entries(&self) -> Vec<(Key, &Value)> {
        match self {
            Value::Array(items) => items.iter().enumerate().map(|(i, v)| (Key::Index(i), v)).collect(),
            Value::Object(map) => map.iter().map(|(k, v)| (Key::name(k.as_str()), v)).collect(),
            _ => Vec::new(),
        }
    }
}

/// Structural equality: containers compare element-wise, callables by
/// identity. Used for assertions; the diff engine relies on
/// [`Value::strict_eq`] instead.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => self.strict_eq(other),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::Date(dt)
    }
}

impl From<Callable> for Value {
    fn from(c: Callable) -> Self {
        Value::Callable(c)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

/// Serializes with JSON text semantics: undefined, callables and non-finite
/// numbers become `null`, object properties holding undefined or a callable
/// are skipped, and dates render as RFC 3339 with millisecond precision.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null | Value::Callable(_) => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) if !n.is_finite() => serializer.serialize_unit(),
            Value::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Date(dt) => {
                serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut out = serializer.serialize_map(None)?;
                for (k, v) in map.iter() {
                    if matches!(v, Value::Undefined | Value::Callable(_)) {
                        continue;
                    }
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Callable(c) => write!(f, "[callable {}]", c.name()),
            other => {
                let text = serde_json::to_string(other).map_err(|_| fmt::Error)?;
                f.write_str(&text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn primitives_are_identical_by_value() {
        assert!(Value::from(1).strict_eq(&Value::from(1.0)));
        assert!(Value::from("a").strict_eq(&Value::from("a")));
        assert!(Value::Null.strict_eq(&Value::Null));
        assert!(Value::Undefined.strict_eq(&Value::Undefined));
        assert!(!Value::Null.strict_eq(&Value::Undefined));
        assert!(!Value::from(1).strict_eq(&Value::from("1")));
    }

    #[test]
    fn nan_is_not_identical_to_itself() {
        let nan = Value::Number(f64::NAN);
        assert!(!nan.strict_eq(&nan.clone()));
    }

    #[test]
    fn containers_are_identical_by_handle() {
        let a = Value::object([("x", 1)]);
        let b = Value::object([("x", 1)]);
        assert!(a.strict_eq(&a.clone()));
        assert!(!a.strict_eq(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn callables_are_identical_by_handle() {
        let f = Value::callable("f", |_| Value::from(1));
        let g = Value::callable("f", |_| Value::from(1));
        assert!(f.strict_eq(&f.clone()));
        assert!(!f.strict_eq(&g));
    }

    #[test]
    fn callable_invocation() {
        let double = Callable::new("double", |args: &[Value]| match args.first() {
            Some(Value::Number(n)) => Value::Number(n * 2.0),
            _ => Value::Undefined,
        });
        assert_eq!(double.call(&[Value::from(21)]), Value::from(42));
        assert_eq!(format!("{double:?}"), "Callable(double)");
    }

    #[test]
    fn get_by_key() {
        let arr = Value::array([10, 20]);
        assert_eq!(arr.get(&Key::Index(1)), Some(&Value::from(20)));
        assert_eq!(arr.get(&Key::name("x")), None);

        let obj = Value::object([("0", "zero"), ("a", "b")]);
        assert_eq!(obj.get(&Key::Index(0)), Some(&Value::from("zero")));
        assert_eq!(obj.get(&Key::name("a")), Some(&Value::from("b")));
        assert_eq!(Value::from(3).get(&Key::Index(0)), None);
    }

    #[test]
    fn entries_keep_insertion_order() {
        let obj = Value::object([("z", 1), ("a", 2), ("3", 3)]);
        let keys: Vec<Key> = obj.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![Key::name("z"), Key::name("a"), Key::Index(3)]);
        assert!(Value::from("leaf").entries().is_empty());
    }

    #[test]
    fn date_millis_rejects_out_of_range() {
        assert_eq!(
            Value::date_millis(1_700_000_000_000).unwrap().as_date_millis(),
            Some(1_700_000_000_000)
        );
        let err = Value::date_millis(i64::MAX).unwrap_err();
        assert!(matches!(err, ValueError::DateOutOfRange(i64::MAX)));
    }

    #[test]
    fn serializes_like_json_text() {
        let v = Value::object([
            ("n", Value::from(1)),
            ("f", Value::from(1.5)),
            ("gone", Value::Undefined),
            ("fn", Value::callable("fn", |_| Value::Null)),
            ("when", Value::date_millis(0).unwrap()),
            ("list", Value::array([Value::Undefined, Value::Number(f64::NAN)])),
        ]);
        assert_eq!(
            serde_json::to_value(&v).unwrap(),
            json!({
                "n": 1,
                "f": 1.5,
                "when": "1970-01-01T00:00:00.000Z",
                "list": [null, null],
            })
        );
    }

    #[test]
    fn display() {
        assert_eq!(Value::Undefined.to_string(), "undefined");
        assert_eq!(Value::from("hi").to_string(), "\"hi\"");
        assert_eq!(Value::array([1, 2]).to_string(), "[1,2]");
        assert_eq!(Value::callable("cb", |_| Value::Null).to_string(), "[callable cb]");
    }

    #[test]
    fn option_maps_none_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }
}
