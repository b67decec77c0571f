//! Case clauses: a pattern, optional alternates and guards, and an action.
//!
//! Clauses are built either from a flat item list (`Clause::from_items`),
//! which is validated the same way a dispatcher definition is, or with the
//! builder returned by `Clause::new`.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use casus_value::{malformed_clause, unbound_variable, MatchOutcome, Name, Pattern, Value};

use crate::bindings::Bindings;

type GuardFn = dyn Fn(&Bindings) -> MatchOutcome<bool> + Send + Sync;
type ActionFn<R> = dyn Fn(&Bindings) -> MatchOutcome<R> + Send + Sync;

/// Names a guard or action declares it reads. Empty when the callback
/// reads the bindings map directly.
type Params = Arc<[Name]>;

fn params_of(names: &[&str]) -> Params {
    names.iter().map(|name| Name::new(*name)).collect()
}

fn gather(params: &[Name], bindings: &Bindings) -> MatchOutcome<Vec<Value>> {
    params
        .iter()
        .map(|name| bindings.get(name.as_str()).cloned())
        .collect()
}

/// A predicate over the bindings of a successful match.
#[derive(Clone)]
pub struct Guard {
    predicate: Arc<GuardFn>,
    params: Params,
}

impl Guard {
    /// A guard reading the bindings map. Looking up an unbound name through
    /// [`Bindings::get`] fails with a `GuardBinding` error at call time.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Bindings) -> MatchOutcome<bool> + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
            params: Arc::from(Vec::new()),
        }
    }

    /// A guard over named variables, receiving their values in order.
    ///
    /// Clauses check the names against their patterns when built, so an
    /// unbound name is reported before anything is matched.
    pub fn named<F>(names: &[&str], predicate: F) -> Self
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        let params = params_of(names);
        let reads = Arc::clone(&params);
        Guard {
            predicate: Arc::new(move |bindings: &Bindings| {
                gather(&reads, bindings).map(|args| predicate(&args))
            }),
            params,
        }
    }

    pub fn check(&self, bindings: &Bindings) -> MatchOutcome<bool> {
        (self.predicate)(bindings)
    }

    /// Declared variable names; empty for map-reading guards.
    pub fn params(&self) -> &[Name] {
        &self.params
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").field("params", &self.params).finish()
    }
}

/// The body run when a clause is selected.
pub struct Action<R> {
    body: Arc<ActionFn<R>>,
    params: Params,
}

impl<R> Action<R> {
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&Bindings) -> MatchOutcome<R> + Send + Sync + 'static,
    {
        Action {
            body: Arc::new(body),
            params: Arc::from(Vec::new()),
        }
    }

    /// An action over named variables, receiving their values in order.
    pub fn named<F>(names: &[&str], body: F) -> Self
    where
        F: Fn(&[Value]) -> MatchOutcome<R> + Send + Sync + 'static,
    {
        let params = params_of(names);
        let reads = Arc::clone(&params);
        Action {
            body: Arc::new(move |bindings: &Bindings| body(&gather(&reads, bindings)?)),
            params,
        }
    }

    /// An action ignoring the bindings and returning `value`.
    pub fn constant(value: R) -> Self
    where
        R: Clone + Send + Sync + 'static,
    {
        Action::new(move |_: &Bindings| Ok(value.clone()))
    }

    pub fn run(&self, bindings: &Bindings) -> MatchOutcome<R> {
        (self.body)(bindings)
    }

    pub fn params(&self) -> &[Name] {
        &self.params
    }
}

impl<R> Clone for Action<R> {
    fn clone(&self) -> Self {
        Action {
            body: Arc::clone(&self.body),
            params: Arc::clone(&self.params),
        }
    }
}

impl<R> fmt::Debug for Action<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("params", &self.params).finish()
    }
}

/// One element of a flat clause definition.
pub enum ClauseItem<R> {
    Pattern(Pattern),
    /// An alternate pattern, tried after the clause's main pattern.
    Or(Pattern),
    Guard(Guard),
    Action(Action<R>),
}

impl<R> ClauseItem<R> {
    pub fn pattern(pattern: impl Into<Pattern>) -> Self {
        ClauseItem::Pattern(pattern.into())
    }

    pub fn or(pattern: impl Into<Pattern>) -> Self {
        ClauseItem::Or(pattern.into())
    }

    pub fn guard<F>(predicate: F) -> Self
    where
        F: Fn(&Bindings) -> MatchOutcome<bool> + Send + Sync + 'static,
    {
        ClauseItem::Guard(Guard::new(predicate))
    }

    pub fn action<F>(body: F) -> Self
    where
        F: Fn(&Bindings) -> MatchOutcome<R> + Send + Sync + 'static,
    {
        ClauseItem::Action(Action::new(body))
    }

    fn describe(&self) -> &'static str {
        match self {
            ClauseItem::Pattern(_) => "a pattern",
            ClauseItem::Or(_) => "an alternate",
            ClauseItem::Guard(_) => "a guard",
            ClauseItem::Action(_) => "an action",
        }
    }
}

impl<R> From<Pattern> for ClauseItem<R> {
    fn from(pattern: Pattern) -> Self {
        ClauseItem::Pattern(pattern)
    }
}

impl<R> From<Guard> for ClauseItem<R> {
    fn from(guard: Guard) -> Self {
        ClauseItem::Guard(guard)
    }
}

impl<R> From<Action<R>> for ClauseItem<R> {
    fn from(action: Action<R>) -> Self {
        ClauseItem::Action(action)
    }
}

impl<R> fmt::Debug for ClauseItem<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClauseItem::Pattern(p) => write!(f, "Pattern({p})"),
            ClauseItem::Or(p) => write!(f, "Or({p})"),
            ClauseItem::Guard(g) => fmt::Debug::fmt(g, f),
            ClauseItem::Action(a) => fmt::Debug::fmt(a, f),
        }
    }
}

/// Alternates and guards following a clause's leading pattern.
#[derive(Default)]
pub(crate) struct Modifiers {
    pub(crate) alternates: SmallVec<[Pattern; 2]>,
    pub(crate) guards: SmallVec<[Guard; 2]>,
}

impl Modifiers {
    /// Consume `Or`/`Guard` items up to the action, which must be last.
    pub(crate) fn parse<R>(
        items: impl Iterator<Item = ClauseItem<R>>,
    ) -> MatchOutcome<(Modifiers, Action<R>)> {
        let mut modifiers = Modifiers::default();
        let mut items = items.peekable();
        while let Some(item) = items.next() {
            match item {
                ClauseItem::Or(pattern) => modifiers.alternates.push(pattern),
                ClauseItem::Guard(guard) => modifiers.guards.push(guard),
                ClauseItem::Action(action) => {
                    if let Some(extra) = items.peek() {
                        return Err(malformed_clause(format!(
                            "found {} after the action; the action must be last",
                            extra.describe()
                        )));
                    }
                    return Ok((modifiers, action));
                }
                ClauseItem::Pattern(pattern) => {
                    return Err(malformed_clause(format!(
                        "pattern `{pattern}` after a clause modifier; \
                         only alternates and guards may follow"
                    )));
                }
            }
        }
        Err(malformed_clause("clause has no action"))
    }
}

/// A complete case clause.
pub struct Clause<R> {
    pattern: Pattern,
    alternates: SmallVec<[Pattern; 2]>,
    guards: SmallVec<[Guard; 2]>,
    action: Action<R>,
}

impl<R> Clause<R> {
    /// Start building a clause with `pattern` as its main pattern.
    pub fn new(pattern: impl Into<Pattern>) -> ClauseBuilder<R> {
        ClauseBuilder {
            pattern: pattern.into(),
            modifiers: Modifiers::default(),
            _action: std::marker::PhantomData,
        }
    }

    /// Build a clause from a flat item list: a pattern, then any number of
    /// alternates and guards, then exactly one action.
    pub fn from_items(items: Vec<ClauseItem<R>>) -> MatchOutcome<Self> {
        let mut items = items.into_iter();
        let pattern = match items.next() {
            Some(ClauseItem::Pattern(pattern)) => pattern,
            Some(other) => {
                return Err(malformed_clause(format!(
                    "clause starts with {}, expected a pattern",
                    other.describe()
                )))
            }
            None => return Err(malformed_clause("empty clause")),
        };
        let (modifiers, action) = Modifiers::parse(items)?;
        Clause::assemble(pattern, modifiers, action)
    }

    /// Check named guard and action parameters against every candidate
    /// pattern.
    pub(crate) fn assemble(
        pattern: Pattern,
        modifiers: Modifiers,
        action: Action<R>,
    ) -> MatchOutcome<Self> {
        let clause = Clause {
            pattern,
            alternates: modifiers.alternates,
            guards: modifiers.guards,
            action,
        };
        for candidate in clause.candidates() {
            let bound = candidate.variables();
            let declared = clause
                .guards
                .iter()
                .flat_map(Guard::params)
                .chain(clause.action.params());
            for name in declared {
                if !bound.contains(name) {
                    return Err(unbound_variable(name.as_str())
                        .with_note(format!("pattern `{candidate}` does not bind it")));
                }
            }
        }
        Ok(clause)
    }

    /// The main pattern followed by the alternates, in trial order.
    pub fn candidates(&self) -> impl Iterator<Item = &Pattern> {
        std::iter::once(&self.pattern).chain(self.alternates.iter())
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn alternates(&self) -> &[Pattern] {
        &self.alternates
    }

    pub fn guards(&self) -> &[Guard] {
        &self.guards
    }

    pub fn action(&self) -> &Action<R> {
        &self.action
    }

    /// Whether every guard accepts `bindings`. Stops at the first refusal.
    pub fn guards_accept(&self, bindings: &Bindings) -> MatchOutcome<bool> {
        for guard in &self.guards {
            if !guard.check(bindings)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<R> Clone for Clause<R> {
    fn clone(&self) -> Self {
        Clause {
            pattern: self.pattern.clone(),
            alternates: self.alternates.clone(),
            guards: self.guards.clone(),
            action: self.action.clone(),
        }
    }
}

impl<R> fmt::Debug for Clause<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clause")
            .field("pattern", &self.pattern)
            .field("alternates", &self.alternates)
            .field("guards", &self.guards.len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Clause`], finished with [`ClauseBuilder::then`].
#[must_use]
pub struct ClauseBuilder<R> {
    pattern: Pattern,
    modifiers: Modifiers,
    _action: std::marker::PhantomData<fn() -> R>,
}

impl<R> ClauseBuilder<R> {
    /// Add an alternate pattern.
    pub fn or(mut self, pattern: impl Into<Pattern>) -> Self {
        self.modifiers.alternates.push(pattern.into());
        self
    }

    /// Add a guard reading the bindings map.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&Bindings) -> MatchOutcome<bool> + Send + Sync + 'static,
    {
        self.guard(Guard::new(predicate))
    }

    pub fn guard(mut self, guard: Guard) -> Self {
        self.modifiers.guards.push(guard);
        self
    }

    /// Finish with an action reading the bindings map.
    pub fn then<F>(self, body: F) -> MatchOutcome<Clause<R>>
    where
        F: Fn(&Bindings) -> MatchOutcome<R> + Send + Sync + 'static,
    {
        self.action(Action::new(body))
    }

    pub fn action(self, action: Action<R>) -> MatchOutcome<Clause<R>> {
        Clause::assemble(self.pattern, self.modifiers, action)
    }
}
