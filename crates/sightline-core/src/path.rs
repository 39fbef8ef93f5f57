//! Safe dot-delimited nested lookup.
//!
//! A path like `"a.b.c"` walks one map key (or list index) per segment.
//! Resolution short-circuits as soon as a segment is missing or the current
//! value has no children to walk into; partial paths yield nothing rather
//! than an error.

use crate::value::Value;

/// Resolve `path` against `root`, returning the value it points at.
///
/// Each `.`-separated segment is looked up as a map key, or as a decimal
/// index when the current value is a list. `None` if any segment fails to
/// resolve.
///
/// # Examples
///
/// ```
/// use sightline_core::{get_path, value, Value};
///
/// let state = value!({ "user": { "name": "ada" }, "tags": ["x", "y"] });
/// assert_eq!(get_path(&state, "user.name"), Some(&Value::from("ada")));
/// assert_eq!(get_path(&state, "tags.1"), Some(&Value::from("y")));
/// assert_eq!(get_path(&state, "user.missing.deeper"), None);
/// ```
#[must_use]
pub fn get_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = match current {
            Value::Map(entries) => entries.get(segment)?,
            Value::List(items) => {
                let index: usize = segment.parse().ok()?;
                items.get(index)?
            }
            _ => return None,
        };
    }
    Some(current)
}

/// Resolve `path` against `root`, falling back to `default` when any segment
/// is missing.
#[must_use]
pub fn get_path_or<'a>(root: &'a Value, path: &str, default: &'a Value) -> &'a Value {
    get_path(root, path).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value;

    #[test]
    fn resolves_nested_map_keys() {
        let state = value!({ "a": { "b": { "c": 42 } } });
        assert_eq!(get_path(&state, "a.b.c"), Some(&Value::Number(42.0)));
        assert_eq!(get_path(&state, "a.b"), Some(&value!({ "c": 42 })));
    }

    #[test]
    fn resolves_list_indices() {
        let state = value!({ "items": [10, 20, 30] });
        assert_eq!(get_path(&state, "items.0"), Some(&Value::Number(10.0)));
        assert_eq!(get_path(&state, "items.3"), None);
        assert_eq!(get_path(&state, "items.not-a-number"), None);
    }

    #[test]
    fn missing_intermediate_short_circuits() {
        let empty = value!({});
        assert_eq!(get_path(&empty, "x.y.z"), None);

        let with_null = value!({ "x": null });
        assert_eq!(get_path(&with_null, "x.y"), None);

        let with_scalar = value!({ "x": 5 });
        assert_eq!(get_path(&with_scalar, "x.y"), None);
    }

    #[test]
    fn default_is_returned_for_unresolved_paths() {
        let empty = value!({});
        let fallback = Value::from("fallback");
        assert_eq!(get_path_or(&empty, "x.y.z", &fallback), &fallback);

        let state = value!({ "x": 1 });
        assert_eq!(get_path_or(&state, "x", &fallback), &Value::Number(1.0));
    }

    #[test]
    fn empty_and_odd_paths_resolve_to_nothing() {
        let state = value!({ "a": 1 });
        assert_eq!(get_path(&state, ""), None);
        assert_eq!(get_path(&state, "."), None);
        assert_eq!(get_path(&state, "a."), None);
    }

    #[test]
    fn root_scalars_have_no_children() {
        assert_eq!(get_path(&Value::Null, "a"), None);
        assert_eq!(get_path(&value!(7), "a"), None);
        assert_eq!(get_path(&value!("s"), "a"), None);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn never_panics_on_arbitrary_paths(path in ".*") {
                let state = value!({ "a": { "b": [1, 2] }, "": null });
                let _ = get_path(&state, &path);
            }
        }
    }
}
