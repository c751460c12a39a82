use serde::Serialize;

use crate::model::{GenericParameter, TypeRef};

/// Declared accessibility of a field or method (II.23.1.5, II.23.1.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MemberAccess {
    /// Not referenceable by name
    CompilerControlled,
    /// `private`
    Private,
    /// `private protected`
    FamAndAssem,
    /// `internal`
    Assembly,
    /// `protected`
    Family,
    /// `protected internal`
    FamOrAssem,
    /// `public`
    Public,
}

impl MemberAccess {
    /// Decode the 3-bit access field shared by field and method flags.
    #[must_use]
    pub fn from_flags(flags: u32) -> Self {
        match flags & 0x7 {
            0x1 => MemberAccess::Private,
            0x2 => MemberAccess::FamAndAssem,
            0x3 => MemberAccess::Assembly,
            0x4 => MemberAccess::Family,
            0x5 => MemberAccess::FamOrAssem,
            0x6 => MemberAccess::Public,
            _ => MemberAccess::CompilerControlled,
        }
    }
}

/// A field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMember {
    /// Field name
    pub name: String,
    /// Declared accessibility
    pub access: MemberAccess,
    /// Belongs to the type rather than an instance
    pub is_static: bool,
    /// Field type
    pub field_type: TypeRef,
    /// Compile-time constant (`const`)
    pub is_literal: bool,
    /// Assignable only during initialization (`readonly`)
    pub is_init_only: bool,
    /// One of the named values of an enum
    pub is_enum_value: bool,
}

/// The getter or setter of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Accessor {
    /// Declared accessibility
    pub access: MemberAccess,
    /// Static accessor
    pub is_static: bool,
    /// Abstract accessor
    pub is_abstract: bool,
    /// Virtual accessor
    pub is_virtual: bool,
}

impl Accessor {
    /// An instance accessor that is neither abstract nor virtual.
    #[must_use]
    pub fn new(access: MemberAccess) -> Self {
        Accessor {
            access,
            is_static: false,
            is_abstract: false,
            is_virtual: false,
        }
    }
}

/// A property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyMember {
    /// Property name
    pub name: String,
    /// Property type
    pub property_type: TypeRef,
    /// The `get` accessor
    pub getter: Option<Accessor>,
    /// The `set` accessor
    pub setter: Option<Accessor>,
}

/// A parameter of a method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Parameter name, empty if metadata carries none
    pub name: String,
    /// Parameter type
    pub parameter_type: TypeRef,
}

impl Parameter {
    /// Create a parameter.
    #[must_use]
    pub fn new(name: &str, parameter_type: TypeRef) -> Self {
        Parameter {
            name: name.to_string(),
            parameter_type,
        }
    }
}

/// A method other than a constructor or an accessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct MethodMember {
    /// Method name
    pub name: String,
    /// Declared accessibility
    pub access: MemberAccess,
    /// Static method
    pub is_static: bool,
    /// Return type, `Void` for none
    pub return_type: TypeRef,
    /// Generic parameters in declaration order
    pub generic_parameters: Vec<GenericParameter>,
    /// Parameters in declaration order
    pub parameters: Vec<Parameter>,
    /// Abstract method
    pub is_abstract: bool,
    /// Virtual method
    pub is_virtual: bool,
    /// Marked with `ExtensionAttribute`; the first parameter is the extended type
    pub is_extension: bool,
}

/// A declared member of a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MetadataMember {
    /// A field
    Field(FieldMember),
    /// A property
    Property(PropertyMember),
    /// A method
    Method(MethodMember),
}

impl MetadataMember {
    /// Member name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            MetadataMember::Field(field) => &field.name,
            MetadataMember::Property(property) => &property.name,
            MetadataMember::Method(method) => &method.name,
        }
    }

    /// Declared accessibility; a property reports its getter, else its setter.
    #[must_use]
    pub fn access(&self) -> Option<MemberAccess> {
        match self {
            MetadataMember::Field(field) => Some(field.access),
            MetadataMember::Property(property) => property
                .getter
                .or(property.setter)
                .map(|accessor| accessor.access),
            MetadataMember::Method(method) => Some(method.access),
        }
    }

    /// Returns `true` for static members.
    #[must_use]
    pub fn is_static(&self) -> bool {
        match self {
            MetadataMember::Field(field) => field.is_static,
            MetadataMember::Property(property) => property
                .getter
                .or(property.setter)
                .is_some_and(|accessor| accessor.is_static),
            MetadataMember::Method(method) => method.is_static,
        }
    }

    /// Returns `true` for extension methods.
    #[must_use]
    pub fn is_extension(&self) -> bool {
        matches!(self, MetadataMember::Method(method) if method.is_extension)
    }
}
