use std::fmt;

use serde::{Serialize, Serializer};

/// Addresses one slot of a container.
///
/// Array elements are addressed by [`Key::Index`], object properties by
/// [`Key::Name`]. A property name that is a canonical array index (`"0"`,
/// `"42"`, but not `"042"` or `"-1"`) is normalized to `Index`, so `arr[0]`
/// and `obj["0"]` refer to the same slot when an array is compared against
/// an object.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Position within an indexed sequence.
    Index(usize),
    /// Property name within a keyed container.
    Name(String),
}

impl Key {
    /// Build a key from a property name, normalizing canonical indices.
    pub fn name(name: impl Into<String>) -> Self {
        let name = name.into();
        match canonical_index(&name) {
            Some(index) => Key::Index(index),
            None => Key::Name(name),
        }
    }

    /// The positional index, if this key is one.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(_) => None,
        }
    }
}

fn canonical_index(name: &str) -> Option<usize> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if name.len() > 1 && name.starts_with('0') {
        return None;
    }
    name.parse().ok()
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Name(name) => f.write_str(name),
        }
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::name(name)
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::name(name)
    }
}

// Keys become JSON object keys, which must be strings.
impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
