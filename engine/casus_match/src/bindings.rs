//! Variable bindings and the two-case match result.
//!
//! A failed match is `MatchResult::NoMatch`, never an empty map: an empty
//! `Bindings` is a successful match that bound nothing.

use rustc_hash::FxHashMap;

use casus_value::{unbound_variable, MatchOutcome, Name, Value};

/// Variable name to bound value. Keys are unique; order is irrelevant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bindings {
    map: FxHashMap<Name, Value>,
}

impl Bindings {
    pub fn new() -> Self {
        Bindings::default()
    }

    /// A map with one binding.
    pub fn single(name: Name, value: Value) -> Self {
        let mut map = FxHashMap::default();
        map.insert(name, value);
        Bindings { map }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Look up a binding, failing with `GuardBinding` if `name` is unbound.
    ///
    /// This is what guards and actions use: asking for a variable the
    /// pattern never bound is a usage error, not a failed guard.
    pub fn get(&self, name: &str) -> MatchOutcome<&Value> {
        self.map.get(name).ok_or_else(|| unbound_variable(name))
    }

    /// Look up a binding.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.map.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Value)> {
        self.map.iter()
    }

    /// Combine two maps. Fails if a shared name holds different values.
    pub fn merge(self, other: Bindings) -> MatchResult {
        // Fold the smaller map into the larger one.
        let (mut into, from) = if self.map.len() >= other.map.len() {
            (self, other)
        } else {
            (other, self)
        };
        for (name, value) in from.map {
            match into.map.get(&name) {
                Some(existing) if *existing != value => {
                    tracing::trace!(%name, "conflicting bindings");
                    return MatchResult::NoMatch;
                }
                Some(_) => {}
                None => {
                    into.map.insert(name, value);
                }
            }
        }
        MatchResult::Bindings(into)
    }
}

impl FromIterator<(Name, Value)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (Name, Value)>>(iter: I) -> Self {
        Bindings {
            map: iter.into_iter().collect(),
        }
    }
}

/// Outcome of matching one target against one pattern.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub enum MatchResult {
    /// The pattern matched; these are its bindings (possibly none).
    Bindings(Bindings),
    /// The pattern did not match.
    NoMatch,
}

impl MatchResult {
    /// Success with no bindings.
    #[inline]
    pub fn empty() -> Self {
        MatchResult::Bindings(Bindings::new())
    }

    /// Success binding `name` to `value`.
    pub fn single(name: Name, value: Value) -> Self {
        MatchResult::Bindings(Bindings::single(name, value))
    }

    #[inline]
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Bindings(_))
    }

    pub fn bindings(&self) -> Option<&Bindings> {
        match self {
            MatchResult::Bindings(b) => Some(b),
            MatchResult::NoMatch => None,
        }
    }

    pub fn into_bindings(self) -> Option<Bindings> {
        match self {
            MatchResult::Bindings(b) => Some(b),
            MatchResult::NoMatch => None,
        }
    }

    /// Merge with another result; see [`merge`].
    #[inline]
    pub fn and(self, other: MatchResult) -> MatchResult {
        merge(self, other)
    }
}

impl From<Bindings> for MatchResult {
    fn from(bindings: Bindings) -> Self {
        MatchResult::Bindings(bindings)
    }
}

/// Merge two partial results.
///
/// `NoMatch` on either side is `NoMatch`. Otherwise every name bound on both
/// sides must hold equal values, and the result holds the union.
pub fn merge(a: MatchResult, b: MatchResult) -> MatchResult {
    match (a, b) {
        (MatchResult::Bindings(a), MatchResult::Bindings(b)) => a.merge(b),
        _ => MatchResult::NoMatch,
    }
}
