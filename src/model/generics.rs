use serde::Serialize;

use crate::model::TypeRef;

/// A generic parameter of a type or method together with its constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenericParameter {
    /// Parameter name, e.g. `T`
    pub name: String,
    /// Type constraints in declaration order
    pub constraints: Vec<TypeRef>,
    /// `class` constraint
    pub reference_type: bool,
    /// `struct` constraint
    pub not_nullable_value_type: bool,
    /// `new()` constraint
    pub default_constructor: bool,
}

impl GenericParameter {
    /// An unconstrained parameter.
    #[must_use]
    pub fn new(name: &str) -> Self {
        GenericParameter {
            name: name.to_string(),
            constraints: Vec::new(),
            reference_type: false,
            not_nullable_value_type: false,
            default_constructor: false,
        }
    }

    /// Returns `true` if any type or special constraint is present.
    #[must_use]
    pub fn has_constraints(&self) -> bool {
        !self.constraints.is_empty()
            || self.reference_type
            || self.not_nullable_value_type
            || self.default_constructor
    }
}
