//! The structural matcher.
//!
//! `casematch` decides whether one target matches one pattern and, if so,
//! which variables it binds. Rules are tried in a fixed order and the first
//! applicable rule decides; a few rules only decide on success and fall
//! through to later rules otherwise.

use casus_stack::ensure_sufficient_stack;
use casus_value::{ListValue, MatchOutcome, Pattern, Value};

use crate::bindings::MatchResult;

/// Match `target` against `pattern`.
///
/// Rule order:
///
/// 1. `Wildcard` matches anything.
/// 2. `Variable(x)` binds `x` to the target.
/// 3. A literal-wrapped target is unwrapped before matching.
/// 4. `Literal(v)` matches an equal target (falls through otherwise).
/// 5. `Cons(h, t)` splits a nonempty list into head and tail.
/// 6. `Empty` matches the empty list.
/// 7. `As(x, p)` matches `p` and also binds `x` to the target.
/// 8. `TypeTest(t)` matches instances of `t` (falls through otherwise).
/// 9. A decomposable target is replaced by its decomposition.
/// 10. A constructor pattern (or a structural value in pattern position)
///     is matched element-wise against a tuple target.
/// 11. `Tuple` matches a tuple of equal arity element-wise.
/// 12. Any other pattern matches by equality.
/// 13. Otherwise, no match.
///
/// The only error is a failing `decompose` on the target.
pub fn casematch(target: &Value, pattern: &Pattern) -> MatchOutcome<MatchResult> {
    ensure_sufficient_stack(|| match_step(target, pattern))
}

fn match_step(target: &Value, pattern: &Pattern) -> MatchOutcome<MatchResult> {
    match pattern {
        Pattern::Wildcard => return Ok(MatchResult::empty()),
        Pattern::Variable(name) => return Ok(MatchResult::single(name.clone(), target.clone())),
        _ => {}
    }

    if let Value::Literal(inner) = target {
        return casematch(inner, pattern);
    }

    if let Pattern::Literal(value) = pattern {
        if value == target {
            return Ok(MatchResult::empty());
        }
    }

    if let Value::List(list) = target {
        match pattern {
            Pattern::Cons(head, tail) => {
                if let Some(result) = match_cons(list, head, tail)? {
                    return Ok(result);
                }
            }
            Pattern::Empty if list.is_empty() => return Ok(MatchResult::empty()),
            _ => {}
        }
    }

    match pattern {
        Pattern::As(name, sub) => {
            let inner = casematch(target, sub)?;
            return Ok(inner.and(MatchResult::single(name.clone(), target.clone())));
        }
        Pattern::TypeTest(desc) if desc.is_instance(target) => {
            return Ok(MatchResult::empty());
        }
        _ => {}
    }

    if let Some(decomposed) = target.decompose() {
        let decomposed = decomposed?;
        tracing::trace!(value = %target, "matching decomposition");
        return casematch(&decomposed, pattern);
    }

    match pattern {
        Pattern::Constructor(parts) => return match_elements(target, parts),
        Pattern::Value(Value::Structural(instance)) => {
            return casematch(target, &instance.as_pattern());
        }
        Pattern::Tuple(items) => return match_elements(target, items),
        _ => {}
    }

    Ok(match pattern {
        Pattern::Value(value) | Pattern::Literal(value) if value == target => MatchResult::empty(),
        Pattern::TypeTest(desc) if matches!(target, Value::Type(t) if t == desc) => {
            MatchResult::empty()
        }
        _ => MatchResult::NoMatch,
    })
}

/// Head and tail of a nonempty list. `None` if the list is empty, so the
/// caller can fall through.
fn match_cons(
    list: &ListValue,
    head: &Pattern,
    tail: &Pattern,
) -> MatchOutcome<Option<MatchResult>> {
    let (Some(first), Some(rest)) = (list.first(), list.tail()) else {
        return Ok(None);
    };
    let head_result = casematch(first, head)?;
    if !head_result.is_match() {
        return Ok(Some(MatchResult::NoMatch));
    }
    let tail_result = casematch(&Value::List(rest), tail)?;
    Ok(Some(head_result.and(tail_result)))
}

/// Element-wise match of a tuple target, folding bindings left to right and
/// stopping at the first failure.
fn match_elements(target: &Value, patterns: &[Pattern]) -> MatchOutcome<MatchResult> {
    let Value::Tuple(values) = target else {
        return Ok(MatchResult::NoMatch);
    };
    if values.len() != patterns.len() {
        return Ok(MatchResult::NoMatch);
    }
    let mut acc = MatchResult::empty();
    for (value, pattern) in values.iter().zip(patterns) {
        acc = acc.and(casematch(value, pattern)?);
        if !acc.is_match() {
            break;
        }
    }
    Ok(acc)
}
