//! Runtime values: the targets of matching.
//!
//! # Arc Enforcement
//!
//! Heap payloads go through factory methods on `Value`. `Heap<T>` has a
//! crate-private constructor, so outside code cannot build heap values
//! directly:
//!
//! ```text
//! let s = Value::string("hello");                   // OK
//! let xs = Value::list(vec![Value::int(1)]);        // OK
//! let s = Value::Str(Heap::new("hello".into()));    // ERROR: Heap::new is pub(crate)
//! ```
//!
//! # Immutability
//!
//! No value exposes a mutation API. A value used as a match target, or
//! recorded as a constructor argument, stays exactly as it was built.

mod heap;
mod list;

use std::fmt;
use std::sync::Arc;

pub use heap::Heap;
pub use list::ListValue;

use crate::decompose::{Decomposable, StructuralValue};
use crate::errors::MatchOutcome;
use crate::types::TypeDesc;

/// A dynamically typed value.
#[derive(Clone)]
pub enum Value {
    // Primitives (inline, no heap allocation)
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Boolean value. Not an integer: `TypeTest(Int)` rejects it.
    Bool(bool),
    /// Character value.
    Char(char),
    /// Unit value.
    Void,

    // Heap types
    /// String value.
    Str(Heap<String>),
    /// Ordered sequence, matched by `Cons` / `Empty` patterns.
    List(ListValue),
    /// Fixed-arity ordered aggregate, matched element-wise.
    Tuple(Heap<Vec<Value>>),

    /// A type descriptor used as a value (e.g. the head of a decomposition).
    Type(TypeDesc),
    /// A target explicitly marked as literal; the matcher unwraps it.
    Literal(Heap<Value>),
    /// Instance of a structural-value constructor.
    Structural(StructuralValue),
    /// Instance of a user type with a hand-written decomposition.
    Object(Heap<dyn Decomposable>),
}

// Factory Methods

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create a list value.
    ///
    /// ```text
    /// let nums = Value::list(vec![Value::int(1), Value::int(2)]);
    /// ```
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(ListValue::new(items))
    }

    /// Create a tuple value.
    ///
    /// ```text
    /// let pair = Value::tuple(vec![Value::int(1), Value::Bool(true)]);
    /// ```
    #[inline]
    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Heap::new(items))
    }

    /// Wrap a value as an explicit literal target.
    #[inline]
    pub fn literal(inner: Value) -> Self {
        Value::Literal(Heap::new(inner))
    }

    /// Wrap a type descriptor as a value.
    #[inline]
    pub fn ty(desc: TypeDesc) -> Self {
        Value::Type(desc)
    }

    /// Wrap a user type that implements [`Decomposable`].
    pub fn object<T: Decomposable>(object: T) -> Self {
        let shared: Arc<dyn Decomposable> = Arc::new(object);
        Value::Object(Heap::from_arc(shared))
    }
}

// Value Methods

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            #[allow(clippy::cast_precision_loss, reason = "numeric widening")]
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The visible elements of a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(list) => Some(list.as_slice()),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_structural(&self) -> Option<&StructuralValue> {
        match self {
            Value::Structural(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this value participates in matching through decomposition.
    #[inline]
    pub fn is_decomposable(&self) -> bool {
        matches!(self, Value::Structural(_) | Value::Object(_))
    }

    /// The canonical decomposition of a decomposable value.
    ///
    /// `None` for values that do not implement the capability.
    pub fn decompose(&self) -> Option<MatchOutcome<Value>> {
        match self {
            Value::Structural(s) => Some(Ok(s.decompose())),
            Value::Object(object) => Some(object.decompose()),
            _ => None,
        }
    }

    /// Get the type name for error messages.
    pub fn type_name(&self) -> String {
        match self {
            Value::Int(_) => "int".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Char(_) => "char".to_string(),
            Value::Void => "void".to_string(),
            Value::Str(_) => "str".to_string(),
            Value::List(_) => "list".to_string(),
            Value::Tuple(_) => "tuple".to_string(),
            Value::Type(_) => "type".to_string(),
            Value::Literal(_) => "literal".to_string(),
            Value::Structural(s) => s.constructor().name().to_string(),
            Value::Object(object) => object.type_name().to_string(),
        }
    }

    /// Render for user output: strings unquoted, containers recursively.
    pub fn display_value(&self) -> String {
        match self {
            Value::Str(s) => s.to_string(),
            Value::Char(c) => c.to_string(),
            Value::List(items) => {
                let inner: Vec<_> = items.iter().map(Value::display_value).collect();
                format!("[{}]", inner.join(", "))
            }
            Value::Tuple(items) => {
                let inner: Vec<_> = items.iter().map(Value::display_value).collect();
                format!("({})", inner.join(", "))
            }
            Value::Literal(inner) => inner.display_value(),
            _ => self.to_string(),
        }
    }
}

// Trait Implementations

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Char(c) => write!(f, "Char({c:?})"),
            Value::Void => write!(f, "Void"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::List(items) => write!(f, "List({items:?})"),
            Value::Tuple(items) => write!(f, "Tuple({:?})", &**items),
            Value::Type(desc) => write!(f, "Type({desc})"),
            Value::Literal(inner) => write!(f, "Literal({:?})", &**inner),
            Value::Structural(s) => write!(f, "Structural({s:?})"),
            Value::Object(object) => write!(f, "Object({:?})", &**object),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Char(c) => write!(f, "'{c}'"),
            Value::Void => write!(f, "void"),
            Value::Str(s) => write!(f, "\"{}\"", &**s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
            Value::Type(desc) => write!(f, "<type {desc}>"),
            Value::Literal(inner) => write!(f, "Literal({})", &**inner),
            Value::Structural(s) => write!(f, "{s}"),
            Value::Object(object) => write!(f, "{:?}", &**object),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(i), Value::Float(x)) | (Value::Float(x), Value::Int(i)) => {
                int_eq_float(*i, *x)
            }
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Void, Value::Void) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Type(a), Value::Type(b)) => a == b,
            (Value::Literal(a), Value::Literal(b)) => a == b,
            (Value::Structural(a), Value::Structural(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                if Heap::ptr_eq(a, b) {
                    return true;
                }
                if a.type_key() != b.type_key() {
                    return false;
                }
                match (a.decompose(), b.decompose()) {
                    (Ok(da), Ok(db)) => da == db,
                    _ => false,
                }
            }
            _ => false,
        }
    }
}

/// Exact numeric equality. The float must be integral and in `i64` range,
/// so large ints never collapse onto the same float.
#[allow(
    clippy::cast_possible_truncation,
    clippy::float_cmp,
    reason = "range and integrality are checked before the cast"
)]
fn int_eq_float(i: i64, x: f64) -> bool {
    // 2^63, exactly representable.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    x.fract() == 0.0 && (-BOUND..BOUND).contains(&x) && x as i64 == i
}

// Conversions

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<TypeDesc> for Value {
    fn from(desc: TypeDesc) -> Self {
        Value::Type(desc)
    }
}

impl From<StructuralValue> for Value {
    fn from(s: StructuralValue) -> Self {
        Value::Structural(s)
    }
}

impl From<Vec<Value>> for Value {
    /// A `Vec` becomes a list; use [`Value::tuple`] for tuples.
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Void
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Self {
        Value::tuple(vec![a.into(), b.into()])
    }
}

impl<A: Into<Value>, B: Into<Value>, C: Into<Value>> From<(A, B, C)> for Value {
    fn from((a, b, c): (A, B, C)) -> Self {
        Value::tuple(vec![a.into(), b.into(), c.into()])
    }
}
