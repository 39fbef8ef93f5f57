//! Dynamic state tree with `Rc`-backed structural sharing.
//!
//! [`Value`] is the shape of everything the binding layer reads from an
//! external state container: container state, resolved path values, and
//! dispatched actions. Composites are reference-counted so snapshots clone in
//! O(1) and unchanged subtrees stay shared between successive snapshots.

use std::collections::BTreeMap;
use std::rc::Rc;

/// A dynamically-typed value.
///
/// `Clone` is cheap: composites share their backing allocation. Derived
/// `PartialEq` is *structural* (and follows ordinary `f64` equality); the
/// binding layer's change detection uses [`same_value`](crate::same_value)
/// and [`shallow_equal`](crate::shallow_equal) instead, which compare
/// composites by identity and give `NaN`/signed-zero the IEEE-754 identity
/// treatment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(Rc<str>),
    List(Rc<Vec<Value>>),
    Map(Rc<BTreeMap<String, Value>>),
}

impl Value {
    /// Whether this value is `Null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The boolean payload, if this is a `Bool`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The numeric payload, if this is a `Number`.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The string payload, if this is a `Text`.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The elements, if this is a `List`.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The entries, if this is a `Map`.
    #[must_use]
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Direct child lookup on a `Map`; `None` for every other variant.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|entries| entries.get(key))
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(Rc::from(s.as_str()))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(Rc::new(items))
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self::Map(Rc::new(entries))
    }
}

/// Build a [`Value`] literal.
///
/// Lists use `[..]`, maps use `{ "key": value }`, and `null` is spelled out.
/// Anything else is passed through [`Value::from`]; compound expressions
/// (negative literals included) need parentheses inside lists and maps.
///
/// # Examples
///
/// ```
/// use sightline_core::{Value, value};
///
/// let state = value!({
///     "count": 0,
///     "user": { "name": "ada", "active": true },
///     "tags": ["a", "b"],
/// });
/// assert_eq!(state.get("count"), Some(&Value::Number(0.0)));
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };
    ([ $( $elem:tt ),* $(,)? ]) => {
        $crate::Value::from(::std::vec![ $( $crate::value!($elem) ),* ])
    };
    ({ $( $key:literal : $val:tt ),* $(,)? }) => {{
        let mut entries = ::std::collections::BTreeMap::new();
        $( entries.insert(::std::string::String::from($key), $crate::value!($val)); )*
        $crate::Value::from(entries)
    }};
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_primitives() {
        assert_eq!(Value::from(()), Value::Null);
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(3), Value::Number(3.0));
        assert_eq!(Value::from(1.5), Value::Number(1.5));
        assert_eq!(Value::from("hi"), Value::Text(Rc::from("hi")));
    }

    #[test]
    fn map_child_lookup() {
        let v = value!({ "a": 1, "b": "x" });
        assert_eq!(v.get("a"), Some(&Value::Number(1.0)));
        assert_eq!(v.get("missing"), None);
        assert_eq!(Value::Null.get("a"), None);
    }

    #[test]
    fn value_macro_nesting() {
        let v = value!({
            "list": [1, 2, { "inner": null }],
            "flag": false,
        });
        let list = v.get("list").and_then(Value::as_list).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[2].get("inner"), Some(&Value::Null));
        assert_eq!(v.get("flag"), Some(&Value::Bool(false)));
    }

    #[test]
    fn clone_shares_composites() {
        let v = value!({ "a": [1, 2] });
        let w = v.clone();
        match (&v, &w) {
            (Value::Map(a), Value::Map(b)) => assert!(Rc::ptr_eq(a, b)),
            _ => unreachable!(),
        }
    }

    #[test]
    fn accessors_reject_other_variants() {
        let v = Value::from("text");
        assert!(v.as_number().is_none());
        assert!(v.as_bool().is_none());
        assert!(v.as_map().is_none());
        assert_eq!(v.as_text(), Some("text"));
    }
}
