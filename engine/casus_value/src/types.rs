//! Type descriptors for `TypeTest` patterns and decomposition heads.

use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::decompose::{Constructor, Decomposable};
use crate::value::Value;

/// A named group of structural-value constructors (a variant family).
///
/// Families compare by identity: two families declared with the same name
/// are different types.
#[derive(Clone)]
pub struct Family(Arc<FamilyInner>);

struct FamilyInner {
    name: String,
}

impl Family {
    pub fn new(name: impl Into<String>) -> Self {
        Family(Arc::new(FamilyInner { name: name.into() }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Identity comparison.
    #[inline]
    pub fn same(&self, other: &Family) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Family {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl fmt::Debug for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Family({})", self.0.name)
    }
}

/// Identity of a Rust type implementing [`Decomposable`].
#[derive(Clone, Copy, Debug)]
pub struct ObjectType {
    id: TypeId,
    name: &'static str,
}

impl ObjectType {
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ObjectType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Describes a type a target can be an instance of.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeDesc {
    Int,
    Float,
    Bool,
    Char,
    Str,
    Void,
    List,
    Tuple,
    /// The type of type descriptors.
    Type,
    /// Instances built by one specific constructor.
    Constructor(Constructor),
    /// Instances built by any constructor of a family.
    Family(Family),
    /// Instances of a user type with a hand-written decomposition.
    Object(ObjectType),
}

impl TypeDesc {
    /// Descriptor for a user type implementing [`Decomposable`].
    pub fn of<T: Decomposable>() -> Self {
        TypeDesc::Object(ObjectType {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        })
    }

    pub fn name(&self) -> Cow<'static, str> {
        match self {
            TypeDesc::Int => Cow::Borrowed("int"),
            TypeDesc::Float => Cow::Borrowed("float"),
            TypeDesc::Bool => Cow::Borrowed("bool"),
            TypeDesc::Char => Cow::Borrowed("char"),
            TypeDesc::Str => Cow::Borrowed("str"),
            TypeDesc::Void => Cow::Borrowed("void"),
            TypeDesc::List => Cow::Borrowed("list"),
            TypeDesc::Tuple => Cow::Borrowed("tuple"),
            TypeDesc::Type => Cow::Borrowed("type"),
            TypeDesc::Constructor(ctor) => Cow::Owned(ctor.name().to_string()),
            TypeDesc::Family(family) => Cow::Owned(family.name().to_string()),
            TypeDesc::Object(object) => Cow::Borrowed(object.name),
        }
    }

    /// Whether `value` is an instance of this type.
    ///
    /// A structural value is an instance of its constructor and of the
    /// constructor's family. A literal wrapper is checked by its content.
    pub fn is_instance(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Literal(inner)) => self.is_instance(inner),
            (TypeDesc::Int, Value::Int(_))
            | (TypeDesc::Float, Value::Float(_))
            | (TypeDesc::Bool, Value::Bool(_))
            | (TypeDesc::Char, Value::Char(_))
            | (TypeDesc::Str, Value::Str(_))
            | (TypeDesc::Void, Value::Void)
            | (TypeDesc::List, Value::List(_))
            | (TypeDesc::Tuple, Value::Tuple(_))
            | (TypeDesc::Type, Value::Type(_)) => true,
            (TypeDesc::Constructor(ctor), Value::Structural(s)) => ctor.same(s.constructor()),
            (TypeDesc::Family(family), Value::Structural(s)) => s
                .constructor()
                .family()
                .is_some_and(|own| own.same(family)),
            (TypeDesc::Object(object), Value::Object(o)) => object.id == o.type_key(),
            _ => false,
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<&Family> for TypeDesc {
    fn from(family: &Family) -> Self {
        TypeDesc::Family(family.clone())
    }
}

impl From<&Constructor> for TypeDesc {
    fn from(ctor: &Constructor) -> Self {
        TypeDesc::Constructor(ctor.clone())
    }
}
