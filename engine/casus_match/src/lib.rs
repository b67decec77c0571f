//! Casus Match - structural pattern matching and case dispatch.
//!
//! This crate provides:
//! - The binding merger (`Bindings`, `MatchResult`, `merge`)
//! - The structural matcher (`casematch`)
//! - Case clauses with alternates and guards (`Clause`, `Guard`, `Action`)
//! - First-match dispatch over a clause list (`match_value`)
//! - Growable clause tables (`Dispatcher`, `Matcher`)
//!
//! # Example
//!
//! ```text
//! let fact = Dispatcher::define("factorial", vec![
//!     ClauseItem::pattern(0),
//!     Action::constant(1).into(),
//! ])?;
//! fact.case(vec![
//!     ClauseItem::pattern("n"),
//!     Guard::named(&["n"], |args| args[0].as_int().is_some_and(|n| n > 0)).into(),
//!     ClauseItem::action(move |b| { ... }),
//! ])?;
//! ```
//!
//! # Debugging
//!
//! Matching emits `tracing` events: clause selection at `debug`, rule
//! decisions at `trace`. Call [`init_tracing`] and set
//! `RUST_LOG=casus_match=debug` to see them.

use std::sync::Once;

mod bindings;
mod casematch;
mod clause;
mod dispatch;
mod dispatcher;

pub use bindings::{merge, Bindings, MatchResult};
pub use casematch::casematch;
pub use clause::{Action, Clause, ClauseBuilder, ClauseItem, Guard};
pub use dispatch::match_value;
pub use dispatcher::{ClauseTable, Dispatcher, Matcher, WeakDispatcher};

// Data model, for single-import use.
pub use casus_value::{
    Constructor, Decomposable, Family, MatchError, MatchErrorKind, MatchOutcome, Name, Pattern,
    TypeDesc, Value,
};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing if `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true))
                .with(filter)
                .try_init()
                .ok();
        }
    });
}
