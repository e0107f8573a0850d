use serde::{Deserialize, Serialize};

/// How the mapper walks nested containers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Traversal {
    /// Plain recursion; depth is bounded by the thread's stack.
    #[default]
    Recursive,
    /// Explicit work stack on the heap. Produces the same tree.
    Iterative,
}

/// Configuration for [`crate::Mapper`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    pub traversal: Traversal,
}

impl MapOptions {
    /// Options selecting the explicit-stack traversal.
    pub fn iterative() -> Self {
        Self {
            traversal: Traversal::Iterative,
        }
    }
}
