//! Growable clause tables: named piecewise dispatchers and match objects.
//!
//! Both wrap a [`ClauseTable`], an append-only clause list behind a
//! copy-on-write snapshot. Every invocation reads one snapshot, so a clause
//! appended while another thread is dispatching takes effect from the next
//! invocation on.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use casus_value::{no_pattern_matches, MatchOutcome, Pattern, Value};

use crate::clause::{Clause, ClauseItem, Modifiers};
use crate::dispatch::match_value;

/// Shared, append-only clause list.
pub struct ClauseTable<R>(Arc<RwLock<Arc<Vec<Clause<R>>>>>);

impl<R> ClauseTable<R> {
    pub fn new(clauses: Vec<Clause<R>>) -> Self {
        ClauseTable(Arc::new(RwLock::new(Arc::new(clauses))))
    }

    /// The clause list as of now. Later appends do not affect it.
    pub fn snapshot(&self) -> Arc<Vec<Clause<R>>> {
        Arc::clone(&self.0.read())
    }

    /// Append a clause after all existing ones.
    pub fn push(&self, clause: Clause<R>) {
        let mut guard = self.0.write();
        // Copies the list only while a snapshot of it is still held.
        Arc::make_mut(&mut *guard).push(clause);
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Whether both handles share one table.
    pub fn same(&self, other: &ClauseTable<R>) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<R> Clone for ClauseTable<R> {
    fn clone(&self) -> Self {
        ClauseTable(Arc::clone(&self.0))
    }
}

impl<R> fmt::Debug for ClauseTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClauseTable({:?})", &**self.0.read())
    }
}

// Dispatcher

struct DispatcherInner<R> {
    name: String,
    table: ClauseTable<R>,
}

/// A named function defined piecewise by clauses over its argument tuple.
///
/// Cloning yields another handle to the same dispatcher; clauses added
/// through any handle are visible to all.
pub struct Dispatcher<R> {
    inner: Arc<DispatcherInner<R>>,
}

impl<R> Dispatcher<R> {
    /// Create a dispatcher from its first clause.
    ///
    /// `items` is the clause in argument form: one pattern per argument,
    /// then alternates and guards, then the action. Alternates stand for
    /// the whole argument tuple.
    pub fn define(name: impl Into<String>, items: Vec<ClauseItem<R>>) -> MatchOutcome<Self> {
        let name = name.into();
        let clause = argument_clause(items).map_err(|err| err.with_note(in_dispatcher(&name)))?;
        tracing::debug!(dispatcher = %name, "defined");
        Ok(Dispatcher {
            inner: Arc::new(DispatcherInner {
                name,
                table: ClauseTable::new(vec![clause]),
            }),
        })
    }

    /// Append a clause, in the same form as [`Dispatcher::define`].
    ///
    /// Returns a handle to this same dispatcher.
    pub fn case(&self, items: Vec<ClauseItem<R>>) -> MatchOutcome<Self> {
        let clause =
            argument_clause(items).map_err(|err| err.with_note(in_dispatcher(&self.inner.name)))?;
        self.inner.table.push(clause);
        Ok(self.clone())
    }

    /// Call with positional arguments.
    ///
    /// The arguments are matched as one tuple against the clauses in
    /// definition order. Errors carry a note naming this dispatcher.
    pub fn call(&self, args: Vec<Value>) -> MatchOutcome<R> {
        let target = Value::tuple(args);
        let clauses = self.inner.table.snapshot();
        match_value(&target, &clauses).map_err(|err| err.with_note(in_dispatcher(&self.inner.name)))
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Number of clauses.
    pub fn len(&self) -> usize {
        self.inner.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.table.is_empty()
    }

    /// Whether both handles refer to the same dispatcher.
    pub fn same_identity(&self, other: &Dispatcher<R>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// A handle that does not keep the dispatcher alive, for actions that
    /// call the dispatcher recursively.
    pub fn downgrade(&self) -> WeakDispatcher<R> {
        WeakDispatcher {
            name: self.inner.name.clone(),
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl<R> Clone for Dispatcher<R> {
    fn clone(&self) -> Self {
        Dispatcher {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R> fmt::Debug for Dispatcher<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("name", &self.inner.name)
            .field("clauses", &self.inner.table.len())
            .finish()
    }
}

/// Non-owning dispatcher handle.
pub struct WeakDispatcher<R> {
    name: String,
    inner: Weak<DispatcherInner<R>>,
}

impl<R> WeakDispatcher<R> {
    pub fn upgrade(&self) -> Option<Dispatcher<R>> {
        self.inner.upgrade().map(|inner| Dispatcher { inner })
    }

    /// Call the dispatcher if it is still alive.
    ///
    /// A dropped dispatcher has no clauses, so calling it is exhaustion.
    pub fn call(&self, args: Vec<Value>) -> MatchOutcome<R> {
        match self.upgrade() {
            Some(dispatcher) => dispatcher.call(args),
            None => Err(no_pattern_matches(&Value::tuple(args))
                .with_note(format!("dispatcher `{}` was dropped", self.name))),
        }
    }
}

impl<R> Clone for WeakDispatcher<R> {
    fn clone(&self) -> Self {
        WeakDispatcher {
            name: self.name.clone(),
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<R> fmt::Debug for WeakDispatcher<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeakDispatcher({})", self.name)
    }
}

fn in_dispatcher(name: &str) -> String {
    format!("in dispatcher `{name}`")
}

/// Split argument-form items into the argument tuple pattern and the
/// clause modifiers. A pattern after the first modifier is malformed.
fn argument_clause<R>(items: Vec<ClauseItem<R>>) -> MatchOutcome<Clause<R>> {
    let mut items = items.into_iter().peekable();
    let mut arguments = Vec::new();
    while let Some(ClauseItem::Pattern(pattern)) =
        items.next_if(|item| matches!(item, ClauseItem::Pattern(_)))
    {
        arguments.push(pattern);
    }
    let (modifiers, action) = Modifiers::parse(items)?;
    Clause::assemble(Pattern::Tuple(arguments), modifiers, action)
}

// Matcher

/// A reusable, growable clause list applied to one target per invocation.
pub struct Matcher<R> {
    table: ClauseTable<R>,
}

impl<R> Matcher<R> {
    pub fn new(clauses: Vec<Clause<R>>) -> Self {
        Matcher {
            table: ClauseTable::new(clauses),
        }
    }

    /// Append a clause given as a flat item list; see [`Clause::from_items`].
    pub fn add(&self, items: Vec<ClauseItem<R>>) -> MatchOutcome<()> {
        self.table.push(Clause::from_items(items)?);
        Ok(())
    }

    /// Append a built clause.
    pub fn push(&self, clause: Clause<R>) {
        self.table.push(clause);
    }

    /// Match `target` against the clauses as of this call.
    pub fn invoke(&self, target: &Value) -> MatchOutcome<R> {
        match_value(target, &self.table.snapshot())
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<R> Default for Matcher<R> {
    fn default() -> Self {
        Matcher::new(Vec::new())
    }
}

impl<R> Clone for Matcher<R> {
    fn clone(&self) -> Self {
        Matcher {
            table: self.table.clone(),
        }
    }
}

impl<R> fmt::Debug for Matcher<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher").field("clauses", &self.table.len()).finish()
    }
}
