//! The decomposition capability.
//!
//! A value takes part in structural matching by exposing a canonical
//! decomposition: some other value (usually a tuple) that the matcher
//! recurses into. Two flavors exist behind the same capability:
//!
//! - **Structural values** are built by a [`Constructor`]. The constructor
//!   records its arguments once, immutably; the decomposition is
//!   `(Type(ctor), arg1, ..., argN)` and [`Constructor::pattern`] builds the
//!   matching pattern shape.
//! - **Objects** are user types implementing [`Decomposable`] by hand, for
//!   when the decomposition should be sanitized or derived rather than an
//!   echo of the constructor arguments.

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use crate::errors::{unimplemented_capability, wrong_arity, MatchOutcome};
use crate::pattern::Pattern;
use crate::types::{Family, TypeDesc};
use crate::value::{Heap, Value};

/// Capability of a user type to take part in matching.
///
/// `decompose` must be a pure function of the value's immutable state and
/// return the same shape on every call. `pattern` must build a pattern of
/// exactly that shape; a mismatch between the two is a usage error the
/// matcher does not detect.
///
/// Both methods default to `UnimplementedCapability` errors.
pub trait Decomposable: fmt::Debug + Send + Sync + 'static {
    /// The canonical decomposition of this value.
    fn decompose(&self) -> MatchOutcome<Value> {
        Err(unimplemented_capability(self.type_name(), "decompose"))
    }

    /// Build a pattern matching this type's decomposition.
    fn pattern(parts: Vec<Pattern>) -> MatchOutcome<Pattern>
    where
        Self: Sized,
    {
        let _ = parts;
        Err(unimplemented_capability(
            std::any::type_name::<Self>(),
            "pattern",
        ))
    }

    /// Name used in diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Identity of the implementing type.
    fn type_key(&self) -> TypeId {
        TypeId::of::<Self>()
    }
}

// Constructor

struct ConstructorInner {
    name: String,
    arity: usize,
    family: Option<Family>,
}

/// A structural-value constructor with a fixed arity.
///
/// Constructors compare by identity. Cloning shares the identity.
#[derive(Clone)]
pub struct Constructor(Arc<ConstructorInner>);

impl Constructor {
    /// A standalone constructor.
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        Constructor(Arc::new(ConstructorInner {
            name: name.into(),
            arity,
            family: None,
        }))
    }

    /// A constructor belonging to `family`.
    pub fn in_family(family: &Family, name: impl Into<String>, arity: usize) -> Self {
        Constructor(Arc::new(ConstructorInner {
            name: name.into(),
            arity,
            family: Some(family.clone()),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn arity(&self) -> usize {
        self.0.arity
    }

    pub fn family(&self) -> Option<&Family> {
        self.0.family.as_ref()
    }

    /// Identity comparison.
    #[inline]
    pub fn same(&self, other: &Constructor) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// This constructor as a type descriptor.
    pub fn as_type(&self) -> TypeDesc {
        TypeDesc::Constructor(self.clone())
    }

    fn check_arity(&self, got: usize) -> MatchOutcome<()> {
        if got == self.0.arity {
            Ok(())
        } else {
            Err(wrong_arity(&self.0.name, self.0.arity, got))
        }
    }

    /// Build an instance, recording `args` immutably.
    pub fn construct(&self, args: Vec<Value>) -> MatchOutcome<Value> {
        self.check_arity(args.len())?;
        Ok(Value::Structural(StructuralValue {
            ctor: self.clone(),
            args: Heap::from_arc(Arc::from(args)),
        }))
    }

    /// Build a pattern matching instances of this constructor whose
    /// arguments match `parts`.
    ///
    /// The pattern has the same shape as [`StructuralValue::decompose`]:
    /// the constructor itself as head, then one pattern per argument.
    pub fn pattern(&self, parts: Vec<Pattern>) -> MatchOutcome<Pattern> {
        self.check_arity(parts.len())?;
        let mut shape = Vec::with_capacity(parts.len().saturating_add(1));
        shape.push(Pattern::Value(Value::Type(self.as_type())));
        shape.extend(parts);
        Ok(Pattern::Constructor(shape))
    }
}

impl PartialEq for Constructor {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constructor({}/{})", self.0.name, self.0.arity)
    }
}

// StructuralValue

/// Instance of a [`Constructor`]: the constructor plus its recorded
/// arguments. There is no way to change the arguments after construction.
#[derive(Clone)]
pub struct StructuralValue {
    ctor: Constructor,
    args: Heap<[Value]>,
}

impl StructuralValue {
    pub fn constructor(&self) -> &Constructor {
        &self.ctor
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// `(Type(ctor), arg1, ..., argN)`.
    pub fn decompose(&self) -> Value {
        let mut parts = Vec::with_capacity(self.args.len().saturating_add(1));
        parts.push(Value::Type(self.ctor.as_type()));
        parts.extend(self.args.iter().cloned());
        Value::tuple(parts)
    }

    /// This instance's decomposition read as a pattern.
    ///
    /// Used when an instance itself appears in pattern position. The head
    /// must be this constructor; each argument goes through
    /// [`Pattern::from_value`], so literal and type arguments keep their
    /// pattern meaning.
    pub fn as_pattern(&self) -> Pattern {
        let mut shape = Vec::with_capacity(self.args.len().saturating_add(1));
        shape.push(Pattern::Value(Value::Type(self.ctor.as_type())));
        shape.extend(self.args.iter().cloned().map(Pattern::from_value));
        Pattern::Constructor(shape)
    }
}

impl PartialEq for StructuralValue {
    fn eq(&self, other: &Self) -> bool {
        self.ctor.same(&other.ctor) && self.args == other.args
    }
}

impl fmt::Debug for StructuralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?}", self.ctor.name(), &*self.args)
    }
}

impl fmt::Display for StructuralValue {
    /// `Ctor(arg1, arg2)`, arguments rendered for users.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.ctor.name())?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg.display_value())?;
        }
        write!(f, ")")
    }
}
