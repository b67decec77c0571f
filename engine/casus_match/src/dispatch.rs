//! First-match case dispatch over an ordered clause list.

use casus_value::{no_pattern_matches, MatchOutcome, Value};

use crate::bindings::MatchResult;
use crate::casematch::casematch;
use crate::clause::Clause;

/// Run the action of the first clause that accepts `target`.
///
/// Clauses are tried in order. Within a clause the main pattern is tried
/// first, then each alternate; a candidate is accepted when it matches and
/// every guard passes on its bindings. A guard refusal moves on to the next
/// candidate, not the next clause. If nothing accepts the target, the
/// result is a `NoMatch` error naming it.
///
/// Errors from `decompose`, guards, or the chosen action propagate unchanged.
#[tracing::instrument(level = "debug", skip_all, fields(value = %target, clauses = clauses.len()))]
pub fn match_value<R>(target: &Value, clauses: &[Clause<R>]) -> MatchOutcome<R> {
    for (index, clause) in clauses.iter().enumerate() {
        for candidate in clause.candidates() {
            let MatchResult::Bindings(bindings) = casematch(target, candidate)? else {
                continue;
            };
            if clause.guards_accept(&bindings)? {
                tracing::debug!(clause = index, pattern = %candidate, "clause selected");
                return clause.action().run(&bindings);
            }
        }
    }
    Err(no_pattern_matches(target))
}
