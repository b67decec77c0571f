//! Casus Value - data model for the Casus structural matcher.
//!
//! This crate provides:
//! - Runtime values (`Value`, `ListValue`, `Heap`)
//! - Type descriptors for type tests (`TypeDesc`, `Family`)
//! - The decomposition capability (`Decomposable`) and structural-value
//!   constructors (`Constructor`, `StructuralValue`)
//! - The closed pattern model (`Pattern`) and variable names (`Name`)
//! - Error types (`MatchError`, `MatchErrorKind`, `MatchOutcome`)
//!
//! The matching algorithms live in `casus_match`.

mod decompose;
mod errors;
mod name;
mod pattern;
mod types;
mod value;

pub use decompose::{Constructor, Decomposable, StructuralValue};
pub use errors::{MatchError, MatchErrorKind, MatchOutcome};
pub use name::Name;
pub use pattern::Pattern;
pub use types::{Family, ObjectType, TypeDesc};
pub use value::{Heap, ListValue, Value};

// Error constructors
pub use errors::{
    malformed_clause, no_pattern_matches, unbound_variable, unimplemented_capability, wrong_arity,
};
