//! Casus ADT - algebraic data type families.
//!
//! An [`Adt`] is a named family of constructors. Every instance built by a
//! variant is a structural value: it matches its variant's constructor
//! patterns, and type tests against the variant or the whole family.
//!
//! ```text
//! let mut expr = Adt::new("expr");
//! let abs = expr.variant("Abs", vec![TypeDesc::Str, expr.ty()]);
//! let app = expr.variant("App", vec![expr.ty(), expr.ty()]);
//! let var = expr.variant("Var", vec![TypeDesc::Str]);
//!
//! assert_eq!(expr.to_string(), "ADT expr = Abs(str, expr) | App(expr, expr) | Var(str)");
//! ```

use std::fmt;

use casus_value::{Constructor, Family, TypeDesc, Value};

/// One registered variant: its constructor and declared field types.
#[derive(Clone, Debug)]
struct Variant {
    ctor: Constructor,
    fields: Vec<TypeDesc>,
}

/// A named family of variant constructors.
///
/// Field types document the variant; construction checks only the number
/// of arguments.
#[derive(Clone, Debug)]
pub struct Adt {
    family: Family,
    variants: Vec<Variant>,
}

impl Adt {
    pub fn new(name: impl Into<String>) -> Self {
        Adt {
            family: Family::new(name),
            variants: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.family.name()
    }

    pub fn family(&self) -> &Family {
        &self.family
    }

    /// Type descriptor matching every instance of every variant.
    pub fn ty(&self) -> TypeDesc {
        TypeDesc::Family(self.family.clone())
    }

    /// Register a variant and return its constructor.
    ///
    /// The constructor's arity is the number of field types. Registering a
    /// name twice yields two distinct constructors.
    pub fn variant(&mut self, name: impl Into<String>, fields: Vec<TypeDesc>) -> Constructor {
        let ctor = Constructor::in_family(&self.family, name, fields.len());
        tracing::debug!(
            adt = self.name(),
            variant = ctor.name(),
            arity = fields.len(),
            "variant registered"
        );
        self.variants.push(Variant {
            ctor: ctor.clone(),
            fields,
        });
        ctor
    }

    /// Constructors in registration order.
    pub fn variants(&self) -> impl Iterator<Item = &Constructor> {
        self.variants.iter().map(|variant| &variant.ctor)
    }

    /// The most recently registered variant called `name`.
    pub fn lookup(&self, name: &str) -> Option<&Constructor> {
        self.variants
            .iter()
            .rev()
            .map(|variant| &variant.ctor)
            .find(|ctor| ctor.name() == name)
    }

    /// Whether `value` was built by one of this family's variants.
    pub fn is_member(&self, value: &Value) -> bool {
        TypeDesc::Family(self.family.clone()).is_instance(value)
    }
}

impl fmt::Display for Adt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ADT {} = ", self.name())?;
        for (i, variant) in self.variants.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}(", variant.ctor.name())?;
            for (j, field) in variant.fields.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{field}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}
