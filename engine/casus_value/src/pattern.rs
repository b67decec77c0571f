//! The pattern data model.
//!
//! A closed set of pattern forms. The matcher dispatches on the variant tag;
//! nothing is inferred from the runtime shape of an arbitrary value.
//!
//! Conversions follow the convention of writing patterns inline:
//!
//! ```text
//! Pattern::from("_")        // Wildcard
//! Pattern::from("x")        // Variable("x")
//! Pattern::from(42)         // Value(42), equality fallback
//! Pattern::lit("x")         // LiteralPattern("x"), the string itself
//! Pattern::from(("x", "y")) // Tuple([Variable x, Variable y])
//! ```

use std::fmt;

use crate::decompose::StructuralValue;
use crate::name::Name;
use crate::types::TypeDesc;
use crate::value::Value;

/// A structural description a target may satisfy.
#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    /// Matches anything, binds nothing.
    Wildcard,
    /// Matches anything, binds the name to the target.
    Variable(Name),
    /// Matches targets equal to the value.
    Literal(Value),
    /// Matches if the subpattern does; also binds the name to the target.
    As(Name, Box<Pattern>),
    /// Matches instances of the type.
    TypeTest(TypeDesc),
    /// Matches a nonempty list: head against the first element, tail
    /// against the rest.
    Cons(Box<Pattern>, Box<Pattern>),
    /// Matches an empty list.
    Empty,
    /// Matches a tuple of equal arity, element-wise.
    Tuple(Vec<Pattern>),
    /// Decomposed shape produced by a constructor's pattern builder.
    Constructor(Vec<Pattern>),
    /// Any other value; matches by equality as a fallback.
    Value(Value),
}

impl Pattern {
    #[inline]
    pub fn wildcard() -> Self {
        Pattern::Wildcard
    }

    pub fn var(name: impl Into<Name>) -> Self {
        Pattern::Variable(name.into())
    }

    /// A literal, matched by value equality. Use this for strings, which
    /// would otherwise convert to variables.
    pub fn lit(value: impl Into<Value>) -> Self {
        Pattern::Literal(value.into())
    }

    /// Bind `name` to whatever `sub` matched.
    pub fn bind(name: impl Into<Name>, sub: impl Into<Pattern>) -> Self {
        Pattern::As(name.into(), Box::new(sub.into()))
    }

    /// Type test.
    pub fn ty(desc: impl Into<TypeDesc>) -> Self {
        Pattern::TypeTest(desc.into())
    }

    pub fn cons(head: impl Into<Pattern>, tail: impl Into<Pattern>) -> Self {
        Pattern::Cons(Box::new(head.into()), Box::new(tail.into()))
    }

    #[inline]
    pub fn empty() -> Self {
        Pattern::Empty
    }

    pub fn tuple(items: Vec<Pattern>) -> Self {
        Pattern::Tuple(items)
    }

    /// A list of exactly these element patterns, as a cons chain ending in
    /// `Empty`.
    pub fn list(items: Vec<Pattern>) -> Self {
        items
            .into_iter()
            .rev()
            .fold(Pattern::Empty, |tail, head| Pattern::cons(head, tail))
    }

    /// Matches by equality only. See [`Pattern::from_value`] for reading a
    /// value as a pattern.
    pub fn value(value: impl Into<Value>) -> Self {
        Pattern::Value(value.into())
    }

    /// A value read in pattern position.
    ///
    /// Literal wrappers become literal patterns and types become type
    /// tests, element-wise through tuples. Anything else matches by
    /// equality.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Literal(inner) => Pattern::Literal(Value::clone(&inner)),
            Value::Type(desc) => Pattern::TypeTest(desc),
            Value::Tuple(items) => {
                Pattern::Tuple(items.iter().cloned().map(Pattern::from_value).collect())
            }
            other => Pattern::Value(other),
        }
    }

    /// Variable names bound by this pattern, in first-occurrence order.
    pub fn variables(&self) -> Vec<Name> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables(&self, names: &mut Vec<Name>) {
        match self {
            Pattern::Variable(name) => push_unique(names, name),
            Pattern::As(name, sub) => {
                sub.collect_variables(names);
                push_unique(names, name);
            }
            Pattern::Cons(head, tail) => {
                head.collect_variables(names);
                tail.collect_variables(names);
            }
            Pattern::Tuple(items) | Pattern::Constructor(items) => {
                for item in items {
                    item.collect_variables(names);
                }
            }
            Pattern::Wildcard
            | Pattern::Literal(_)
            | Pattern::TypeTest(_)
            | Pattern::Empty
            | Pattern::Value(_) => {}
        }
    }

    /// Whether this pattern binds `name`.
    pub fn binds(&self, name: &str) -> bool {
        self.variables().iter().any(|n| n.as_str() == name)
    }
}

fn push_unique(names: &mut Vec<Name>, name: &Name) {
    if !names.contains(name) {
        names.push(name.clone());
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Wildcard => write!(f, "_"),
            Pattern::Variable(name) => write!(f, "{name}"),
            Pattern::Literal(value) => write!(f, "lit {value}"),
            Pattern::As(name, sub) => write!(f, "{name} @ {sub}"),
            Pattern::TypeTest(desc) => write!(f, "<{desc}>"),
            Pattern::Cons(head, tail) => write!(f, "[{head} | {tail}]"),
            Pattern::Empty => write!(f, "[]"),
            Pattern::Tuple(items) => {
                write!(f, "(")?;
                write_joined(f, items)?;
                write!(f, ")")
            }
            Pattern::Constructor(items) => match items.split_first() {
                Some((Pattern::Value(Value::Type(head)), args)) => {
                    write!(f, "{head}(")?;
                    write_joined(f, args)?;
                    write!(f, ")")
                }
                _ => {
                    write!(f, "ctor(")?;
                    write_joined(f, items)?;
                    write!(f, ")")
                }
            },
            Pattern::Value(value) => write!(f, "{value}"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Pattern]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

// Conversions

impl From<&str> for Pattern {
    /// `"_"` is the wildcard; any other string names a variable.
    fn from(s: &str) -> Self {
        if s == "_" {
            Pattern::Wildcard
        } else {
            Pattern::Variable(Name::new(s))
        }
    }
}

impl From<String> for Pattern {
    fn from(s: String) -> Self {
        Pattern::from(s.as_str())
    }
}

impl From<i64> for Pattern {
    fn from(n: i64) -> Self {
        Pattern::Value(Value::Int(n))
    }
}

impl From<i32> for Pattern {
    fn from(n: i32) -> Self {
        Pattern::Value(Value::from(n))
    }
}

impl From<f64> for Pattern {
    fn from(x: f64) -> Self {
        Pattern::Value(Value::Float(x))
    }
}

impl From<bool> for Pattern {
    fn from(b: bool) -> Self {
        Pattern::Value(Value::Bool(b))
    }
}

impl From<char> for Pattern {
    fn from(c: char) -> Self {
        Pattern::Value(Value::Char(c))
    }
}

impl From<Value> for Pattern {
    fn from(value: Value) -> Self {
        Pattern::from_value(value)
    }
}

impl From<TypeDesc> for Pattern {
    fn from(desc: TypeDesc) -> Self {
        Pattern::TypeTest(desc)
    }
}

impl From<&StructuralValue> for Pattern {
    fn from(instance: &StructuralValue) -> Self {
        instance.as_pattern()
    }
}

impl From<()> for Pattern {
    /// The empty argument tuple.
    fn from((): ()) -> Self {
        Pattern::Tuple(Vec::new())
    }
}

impl<A: Into<Pattern>, B: Into<Pattern>> From<(A, B)> for Pattern {
    fn from((a, b): (A, B)) -> Self {
        Pattern::Tuple(vec![a.into(), b.into()])
    }
}

impl<A: Into<Pattern>, B: Into<Pattern>, C: Into<Pattern>> From<(A, B, C)> for Pattern {
    fn from((a, b, c): (A, B, C)) -> Self {
        Pattern::Tuple(vec![a.into(), b.into(), c.into()])
    }
}
