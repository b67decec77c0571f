//! Property-based tests for the structural matcher and binding merger.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::needless_pass_by_value,
    reason = "Proptest macros generate code with these patterns"
)]

use casus_match::{casematch, merge, Bindings, MatchResult, Name, Pattern, Value};
use proptest::prelude::*;

// -- Strategies --

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::int),
        any::<bool>().prop_map(Value::Bool),
        "[a-z]{0,6}".prop_map(Value::string),
        Just(Value::Void),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::list),
            prop::collection::vec(inner, 0..4).prop_map(Value::tuple),
        ]
    })
}

fn bindings() -> impl Strategy<Value = Bindings> {
    prop::collection::vec(("[a-d]", 0..3_i64), 0..5).prop_map(|pairs| {
        let mut seen = Vec::new();
        pairs
            .into_iter()
            .filter(|(name, _)| {
                let fresh = !seen.contains(name);
                seen.push(name.clone());
                fresh
            })
            .map(|(name, n)| (Name::new(name), Value::int(n)))
            .collect()
    })
}

/// A pattern that mirrors `value` exactly, using equality at the leaves.
fn mirror(value: &Value) -> Pattern {
    match value {
        Value::List(items) => Pattern::list(items.iter().map(mirror).collect()),
        Value::Tuple(items) => Pattern::tuple(items.iter().map(mirror).collect()),
        other => Pattern::value(other.clone()),
    }
}

/// A pattern of the same shape as `value` binding every leaf to a fresh name.
fn binders(value: &Value, next: &mut usize) -> Pattern {
    match value {
        Value::List(items) => Pattern::list(items.iter().map(|v| binders(v, next)).collect()),
        Value::Tuple(items) => Pattern::tuple(items.iter().map(|v| binders(v, next)).collect()),
        _ => {
            *next += 1;
            Pattern::var(format!("v{next}"))
        }
    }
}

fn count_leaves(value: &Value) -> usize {
    match value {
        Value::List(items) => items.iter().map(count_leaves).sum(),
        Value::Tuple(items) => items.iter().map(count_leaves).sum(),
        _ => 1,
    }
}

// -- Properties --

proptest! {
    #[test]
    fn wildcard_matches_everything(target in value()) {
        prop_assert_eq!(casematch(&target, &Pattern::Wildcard).unwrap(), MatchResult::empty());
    }

    #[test]
    fn variable_binds_target(target in value()) {
        let result = casematch(&target, &Pattern::var("x")).unwrap();
        let bindings = result.into_bindings().unwrap();
        prop_assert_eq!(bindings.len(), 1);
        prop_assert_eq!(bindings.lookup("x"), Some(&target));
    }

    #[test]
    fn value_pattern_matches_iff_equal(target in value(), other in value()) {
        let result = casematch(&target, &Pattern::value(other.clone())).unwrap();
        prop_assert_eq!(result.is_match(), target == other);
    }

    #[test]
    fn mirrored_pattern_matches(target in value()) {
        prop_assert_eq!(casematch(&target, &mirror(&target)).unwrap(), MatchResult::empty());
    }

    #[test]
    fn fresh_binders_bind_every_leaf(target in value()) {
        let mut next = 0;
        let pattern = binders(&target, &mut next);
        let bindings = casematch(&target, &pattern).unwrap().into_bindings().unwrap();
        prop_assert_eq!(bindings.len(), count_leaves(&target));
    }

    #[test]
    fn merge_succeeds_iff_consistent(a in bindings(), b in bindings()) {
        let consistent = a
            .iter()
            .all(|(name, value)| b.lookup(name.as_str()).map_or(true, |other| other == value));
        let merged = merge(MatchResult::Bindings(a.clone()), MatchResult::Bindings(b.clone()));
        prop_assert_eq!(merged.is_match(), consistent);
        if let Some(merged) = merged.into_bindings() {
            for (name, value) in a.iter().chain(b.iter()) {
                prop_assert_eq!(merged.lookup(name.as_str()), Some(value));
            }
        }
    }

    #[test]
    fn merge_is_commutative(a in bindings(), b in bindings()) {
        let ab = merge(MatchResult::Bindings(a.clone()), MatchResult::Bindings(b.clone()));
        let ba = merge(MatchResult::Bindings(b), MatchResult::Bindings(a));
        prop_assert_eq!(ab, ba);
    }
}
