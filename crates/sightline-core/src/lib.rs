#![forbid(unsafe_code)]

//! Foundational value model for Sightline.
//!
//! This crate provides the pieces the binding layer reasons about state with:
//!
//! - [`Value`]: a dynamic state tree (null, bool, number, text, list, map)
//!   with `Rc`-backed structural sharing for composites.
//! - [`same_value`] / [`same_number`]: identity comparison honoring IEEE-754
//!   float identity (`NaN` equal to itself, `+0.0` distinct from `-0.0`).
//! - [`shallow_equal`]: one-level-deep equality over values.
//! - [`get_path`] / [`get_path_or`]: safe dot-delimited nested lookup that
//!   never fails; missing segments resolve to nothing, not an error.
//!
//! # Architecture
//!
//! Composite values (`List`, `Map`) wrap their contents in `Rc`, so cloning a
//! snapshot is cheap and two clones of the same tree share every allocation.
//! Sharing is semantically load-bearing: [`same_value`] compares composites by
//! allocation identity, which is what makes the one-level-deep
//! [`shallow_equal`] meaningful for change detection: a reducer that returns
//! untouched subtrees unchanged produces snapshots whose unchanged branches
//! are *identical*, not merely equal.
//!
//! # Invariants
//!
//! 1. `same_value(a, a)` holds for every value, including `NaN` numbers.
//! 2. `same_value(+0.0, -0.0)` is false; `a == b` (structural `PartialEq`)
//!    follows ordinary `f64` semantics instead.
//! 3. `get_path` never panics, for any path string against any value.
//! 4. `shallow_equal` inspects at most one level of composite structure;
//!    nested composites are compared by identity only.

pub mod equality;
pub mod path;
pub mod value;

pub use equality::{same_number, same_value, shallow_equal};
pub use path::{get_path, get_path_or};
pub use value::Value;
