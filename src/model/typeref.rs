use serde::Serialize;

use crate::model::TypeId;

/// Value types of `System` the runtime treats as primitives.
pub const PRIMITIVE_TYPES: [&str; 14] = [
    "Boolean", "Char", "SByte", "Byte", "Int16", "UInt16", "Int32", "UInt32", "Int64", "UInt64",
    "IntPtr", "UIntPtr", "Single", "Double",
];

/// Returns `true` if `namespace.name` is one of the [`PRIMITIVE_TYPES`].
#[must_use]
pub fn is_primitive(name: &str, namespace: Option<&str>) -> bool {
    namespace == Some("System") && PRIMITIVE_TYPES.contains(&name)
}

/// How a type usage refers to its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TypeUsageKind {
    /// A reference type, array, pointer or by-ref
    Class,
    /// A value type
    ValueType,
    /// A built-in value type of `System` such as `Int32` or `Boolean`
    Primitive,
    /// A generic parameter of the enclosing type or method
    GenericParameter,
}

/// A usage of a type: the type of a field, parameter, property or return value, a
/// base type, an interface or a generic argument.
///
/// Names follow the runtime's reflection naming. Primitives use their type names
/// (`Int32`, `String`, `Void`), generic definitions keep their arity suffix
/// (`List`1`) and constructed shapes append `[]`, `&` or `*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeRef {
    /// Display name
    pub name: String,
    /// Namespace, `None` for generic parameters and types without one
    pub namespace: Option<String>,
    /// Generic arguments; non-empty makes this a generic instantiation
    pub generic_args: Vec<TypeRef>,
    /// Kind of usage
    pub kind: TypeUsageKind,
    /// The referenced type, if it is part of the inspected set
    pub definition: Option<TypeId>,
}

impl TypeRef {
    /// A reference type usage.
    #[must_use]
    pub fn class(name: &str, namespace: Option<&str>) -> Self {
        TypeRef {
            name: name.to_string(),
            namespace: namespace.map(str::to_string),
            generic_args: Vec::new(),
            kind: TypeUsageKind::Class,
            definition: None,
        }
    }

    /// A value type usage.
    #[must_use]
    pub fn value_type(name: &str, namespace: Option<&str>) -> Self {
        TypeRef {
            kind: TypeUsageKind::ValueType,
            ..TypeRef::class(name, namespace)
        }
    }

    /// A usage of the primitive `System.<name>`.
    #[must_use]
    pub fn primitive(name: &str) -> Self {
        TypeRef {
            kind: TypeUsageKind::Primitive,
            ..TypeRef::class(name, Some("System"))
        }
    }

    /// A usage of the generic parameter `name`.
    #[must_use]
    pub fn generic_parameter(name: &str) -> Self {
        TypeRef {
            kind: TypeUsageKind::GenericParameter,
            ..TypeRef::class(name, None)
        }
    }

    /// This usage instantiated with `args`.
    #[must_use]
    pub fn with_args(mut self, args: Vec<TypeRef>) -> Self {
        self.generic_args = args;
        self
    }

    /// This usage pointing at `definition` in the inspected set.
    #[must_use]
    pub fn with_definition(mut self, definition: TypeId) -> Self {
        self.definition = Some(definition);
        self
    }

    /// Returns `true` for a generic instantiation such as `List`1<Int32>`.
    #[must_use]
    pub fn is_generic_instance(&self) -> bool {
        !self.generic_args.is_empty()
    }

    /// Returns `true` for a generic parameter usage.
    #[must_use]
    pub fn is_generic_parameter(&self) -> bool {
        self.kind == TypeUsageKind::GenericParameter
    }
}
