//! Dynamic value model for deepmap.
//!
//! The diff engine compares arbitrary values of the same shape family. Rust
//! has no ambient dynamic value, so this crate provides one together with the
//! classification predicates the engine routes on.
//!
//! # Key Types
//!
//! - [`Value`] — undefined, null, primitives, date instants, callables, arrays and objects
//! - [`Key`] — a positional index or a property name addressing a container slot
//! - [`Callable`] — a shared closure; compared by identity only
//! - [`Shape`] — closed leaf / container / callable classification

pub mod classify;
pub mod convert;
pub mod error;
pub mod key;
pub mod value;

pub use classify::{classify, is_callable, is_container, is_date, is_leaf, Shape};
pub use error::{ValueError, ValueResult};
pub use key::Key;
pub use value::{Callable, Value};
