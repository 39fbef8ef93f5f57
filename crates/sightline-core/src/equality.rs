//! Identity and shallow equality over [`Value`].
//!
//! Change detection needs two distinct comparisons:
//!
//! - [`same_value`]: the identity rule. Primitives compare by value with
//!   IEEE-754 float identity semantics ([`same_number`]); composites compare
//!   by allocation, so two structurally-equal maps built separately are *not*
//!   the same value.
//! - [`shallow_equal`]: identity first, then one level of structure: same
//!   key set (or length) with each entry compared by [`same_value`]. Nothing
//!   recurses further.
//!
//! # Failure Modes
//!
//! | Inputs | Result |
//! |--------|--------|
//! | `NaN` vs `NaN` | equal (identity rule) |
//! | `+0.0` vs `-0.0` | not equal |
//! | Map vs List | not equal |
//! | Equal nested composites in fresh allocations | not equal (one level only) |

use std::rc::Rc;

use crate::value::Value;

/// IEEE-754 float identity: `NaN` is the same as itself, and `+0.0` is
/// distinct from `-0.0`. Every other pair follows ordinary `==`.
#[must_use]
pub fn same_number(x: f64, y: f64) -> bool {
    if x == y {
        x != 0.0 || x.is_sign_positive() == y.is_sign_positive()
    } else {
        x.is_nan() && y.is_nan()
    }
}

/// Identity comparison between two values.
///
/// Primitives compare by value (`Number` via [`same_number`]); `List` and
/// `Map` compare by shared allocation, never by contents.
#[must_use]
pub fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => same_number(*x, *y),
        (Value::Text(x), Value::Text(y)) => x == y,
        (Value::List(x), Value::List(y)) => Rc::ptr_eq(x, y),
        (Value::Map(x), Value::Map(y)) => Rc::ptr_eq(x, y),
        _ => false,
    }
}

/// One-level-deep equality between two values.
///
/// Identical values (per [`same_value`]) are equal. Beyond that, two maps are
/// equal iff they have the same key set and every entry is [`same_value`];
/// two lists are equal iff they have the same length and every element is
/// [`same_value`]. Nested composite contents are not inspected.
#[must_use]
pub fn shallow_equal(a: &Value, b: &Value) -> bool {
    if same_value(a, b) {
        return true;
    }

    match (a, b) {
        (Value::Map(x), Value::Map(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, va)| y.get(key).is_some_and(|vb| same_value(va, vb)))
        }
        (Value::List(x), Value::List(y)) => {
            x.len() == y.len()
                && x.iter().zip(y.iter()).all(|(va, vb)| same_value(va, vb))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value;

    #[test]
    fn nan_is_same_as_itself() {
        assert!(same_number(f64::NAN, f64::NAN));
        assert!(same_value(
            &Value::Number(f64::NAN),
            &Value::Number(f64::NAN)
        ));
    }

    #[test]
    fn signed_zero_is_distinguished() {
        assert!(!same_number(0.0, -0.0));
        assert!(same_number(0.0, 0.0));
        assert!(same_number(-0.0, -0.0));
    }

    #[test]
    fn primitives_compare_by_value() {
        assert!(same_value(&Value::Null, &Value::Null));
        assert!(same_value(&value!("abc"), &value!("abc")));
        assert!(!same_value(&value!("abc"), &value!("abd")));
        assert!(!same_value(&value!(true), &value!(false)));
        assert!(!same_value(&value!(1), &value!("1")));
    }

    #[test]
    fn composites_compare_by_allocation() {
        let a = value!({ "k": 1 });
        let b = value!({ "k": 1 });
        assert!(!same_value(&a, &b), "fresh allocations are not identical");
        assert!(same_value(&a, &a.clone()), "clones share the allocation");
    }

    #[test]
    fn shallow_equal_same_keys_same_primitives() {
        let a = value!({ "x": 1, "y": "s" });
        let b = value!({ "x": 1, "y": "s" });
        assert!(shallow_equal(&a, &b));
    }

    #[test]
    fn shallow_equal_rejects_key_set_mismatch() {
        assert!(!shallow_equal(&value!({ "x": 1 }), &value!({ "y": 1 })));
        assert!(!shallow_equal(&value!({ "x": 1 }), &value!({ "x": 1, "y": 2 })));
    }

    #[test]
    fn shallow_equal_is_one_level_deep() {
        let a = value!({ "nested": { "k": 1 } });
        let b = value!({ "nested": { "k": 1 } });
        // The nested maps are equal in structure but distinct allocations.
        assert!(!shallow_equal(&a, &b));

        let shared = value!({ "k": 1 });
        let c = value!({ "nested": (shared.clone()) });
        let d = value!({ "nested": (shared) });
        assert!(shallow_equal(&c, &d));
    }

    #[test]
    fn shallow_equal_lists() {
        assert!(shallow_equal(&value!([1, 2, 3]), &value!([1, 2, 3])));
        assert!(!shallow_equal(&value!([1, 2]), &value!([1, 2, 3])));
        assert!(!shallow_equal(&value!([1, 2]), &value!({ "0": 1, "1": 2 })));
    }

    #[test]
    fn shallow_equal_nan_entries() {
        let a = value!({ "n": (f64::NAN) });
        let b = value!({ "n": (f64::NAN) });
        assert!(shallow_equal(&a, &b));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn leaf() -> impl Strategy<Value = Value> {
            prop_oneof![
                Just(Value::Null),
                any::<bool>().prop_map(Value::Bool),
                any::<f64>().prop_map(Value::Number),
                ".*".prop_map(|s: String| Value::from(s)),
            ]
        }

        fn tree() -> impl Strategy<Value = Value> {
            leaf().prop_recursive(3, 16, 4, |inner| {
                prop_oneof![
                    proptest::collection::vec(inner.clone(), 0..4)
                        .prop_map(|items| Value::from(items)),
                    proptest::collection::btree_map(".*", inner, 0..4)
                        .prop_map(|entries| Value::from(entries)),
                ]
            })
        }

        proptest! {
            #[test]
            fn same_value_is_reflexive_on_clones(v in tree()) {
                prop_assert!(same_value(&v, &v.clone()));
            }

            #[test]
            fn same_value_is_symmetric(a in tree(), b in tree()) {
                prop_assert_eq!(same_value(&a, &b), same_value(&b, &a));
            }

            #[test]
            fn shallow_equal_is_symmetric(a in tree(), b in tree()) {
                prop_assert_eq!(shallow_equal(&a, &b), shallow_equal(&b, &a));
            }

            #[test]
            fn same_number_matches_bit_identity_for_zeros(x in any::<f64>()) {
                // Reflexivity holds for every float, including NaN and -0.0.
                prop_assert!(same_number(x, x));
            }
        }
    }
}
