//! Error types for matching and dispatch.
//!
//! A structural match that fails is not an error: the matcher reports it as
//! a plain negative result. Errors are reserved for the cases where the
//! caller has to act: every clause was exhausted, a clause was put together
//! incorrectly, a constructor got the wrong number of arguments, a type
//! lacks a decomposition, or a guard/action asked for a variable the match
//! never bound.
//!
//! Factory functions (`no_pattern_matches()`, `wrong_arity()`, ...) are the
//! public way to build errors. They populate both `kind` and `message`.

use std::fmt;

use thiserror::Error;

use crate::value::Value;

/// Result of a matcher, guard, action or dispatcher call.
pub type MatchOutcome<T> = Result<T, MatchError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatchErrorKind {
    /// No clause matched the target.
    #[error("no pattern matches {target}")]
    NoMatch { target: String },

    /// A clause is not shaped `pattern, (Or | Guard)*, action`.
    #[error("malformed clause: {reason}")]
    MalformedClause { reason: String },

    /// A structural-value constructor got the wrong number of arguments.
    #[error("{name} expects {expected} {}, got {got}", plural(.expected))]
    Arity {
        name: String,
        expected: usize,
        got: usize,
    },

    /// A type is used for matching without implementing a capability.
    #[error("{capability} unimplemented for type {type_name}")]
    UnimplementedCapability {
        type_name: String,
        capability: &'static str,
    },

    /// A guard or action referenced a variable the match did not bind.
    #[error("variable `{name}` is not bound by the pattern")]
    GuardBinding { name: String },
}

fn plural(n: &usize) -> &'static str {
    if *n == 1 {
        "argument"
    } else {
        "arguments"
    }
}

/// Matching or dispatch error.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct MatchError {
    /// Structured category, for programmatic handling.
    pub kind: MatchErrorKind,
    /// Human-readable message, equal to `kind.to_string()`.
    pub message: String,
    /// Context notes, innermost first (e.g. the dispatcher that raised it).
    pub notes: Vec<String>,
}

impl MatchError {
    fn from_kind(kind: MatchErrorKind) -> Self {
        let message = kind.to_string();
        MatchError {
            kind,
            message,
            notes: Vec::new(),
        }
    }

    /// Add a context note to this error.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Whether this is clause exhaustion (`PatternMatchError`).
    #[inline]
    pub fn is_no_match(&self) -> bool {
        matches!(self.kind, MatchErrorKind::NoMatch { .. })
    }

    /// Render the message followed by its notes, one per line.
    pub fn display_with_notes(&self) -> String {
        DisplayWithNotes(self).to_string()
    }
}

struct DisplayWithNotes<'a>(&'a MatchError);

impl fmt::Display for DisplayWithNotes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.message)?;
        for note in &self.0.notes {
            write!(f, "\n  note: {note}")?;
        }
        Ok(())
    }
}

/// Every clause was tried and none matched `target`.
#[cold]
pub fn no_pattern_matches(target: &Value) -> MatchError {
    MatchError::from_kind(MatchErrorKind::NoMatch {
        target: target.to_string(),
    })
}

/// A clause failed shape validation.
#[cold]
pub fn malformed_clause(reason: impl Into<String>) -> MatchError {
    MatchError::from_kind(MatchErrorKind::MalformedClause {
        reason: reason.into(),
    })
}

/// A constructor was applied to the wrong number of arguments.
#[cold]
pub fn wrong_arity(name: &str, expected: usize, got: usize) -> MatchError {
    MatchError::from_kind(MatchErrorKind::Arity {
        name: name.to_string(),
        expected,
        got,
    })
}

/// A type lacks `decompose()` or `pattern()`.
#[cold]
pub fn unimplemented_capability(type_name: &str, capability: &'static str) -> MatchError {
    MatchError::from_kind(MatchErrorKind::UnimplementedCapability {
        type_name: type_name.to_string(),
        capability,
    })
}

/// A guard or action asked for a variable that is not bound.
#[cold]
pub fn unbound_variable(name: &str) -> MatchError {
    MatchError::from_kind(MatchErrorKind::GuardBinding {
        name: name.to_string(),
    })
}
