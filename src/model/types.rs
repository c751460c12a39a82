use serde::Serialize;

use crate::model::{GenericParameter, MetadataMember, TypeRef};

/// Identity of a type within one provider snapshot.
///
/// The value is opaque; [`crate::loader::CilProvider`] uses the `TypeDef` row id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

/// Declared visibility of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TypeVisibility {
    /// Top-level type visible only inside its assembly
    NotPublic,
    /// Top-level public type
    Public,
    /// Nested, public
    NestedPublic,
    /// Nested, private
    NestedPrivate,
    /// Nested, protected
    NestedFamily,
    /// Nested, internal
    NestedAssembly,
    /// Nested, private protected
    NestedFamAndAssem,
    /// Nested, protected internal
    NestedFamOrAssem,
}

impl TypeVisibility {
    /// Returns `true` for public top-level and public nested types.
    #[must_use]
    pub fn is_public(self) -> bool {
        matches!(self, TypeVisibility::Public | TypeVisibility::NestedPublic)
    }

    /// Returns `true` for nested types.
    #[must_use]
    pub fn is_nested(self) -> bool {
        !matches!(self, TypeVisibility::NotPublic | TypeVisibility::Public)
    }
}

/// What kind of type a descriptor declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TypeKind {
    /// Reference type
    Class,
    /// Interface
    Interface,
    /// Value type other than an enum or primitive
    Struct,
    /// Enumeration
    Enum,
    /// Built-in value type such as `System.Int32`
    Primitive,
}

/// A type defined in the inspected binary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataType {
    /// Identity within the snapshot
    pub id: TypeId,
    /// Simple name as stored in metadata, including any arity suffix (`List`1`)
    pub name: String,
    /// Namespace, `None` if the type has none
    pub namespace: Option<String>,
    /// Declared visibility
    pub visibility: TypeVisibility,
    /// Kind of type
    pub kind: TypeKind,
    /// Declared `abstract`
    pub is_abstract: bool,
    /// Declared `sealed`
    pub is_sealed: bool,
    /// Base type; `System.Object`, `System.ValueType` and `System.Enum` are never recorded
    pub base_type: Option<TypeRef>,
    /// Directly implemented interfaces in declaration order
    pub interfaces: Vec<TypeRef>,
    /// Generic parameters in declaration order
    pub generic_parameters: Vec<GenericParameter>,
    /// Declared members in declaration order
    pub members: Vec<MetadataMember>,
}

impl MetadataType {
    /// Create a descriptor without base type, interfaces, generic parameters or members.
    #[must_use]
    pub fn new(
        id: TypeId,
        name: &str,
        namespace: Option<&str>,
        visibility: TypeVisibility,
        kind: TypeKind,
    ) -> Self {
        MetadataType {
            id,
            name: name.to_string(),
            namespace: namespace.map(str::to_string),
            visibility,
            kind,
            is_abstract: false,
            is_sealed: false,
            base_type: None,
            interfaces: Vec::new(),
            generic_parameters: Vec::new(),
            members: Vec::new(),
        }
    }

    /// `Namespace.Name`, or just the name without a namespace.
    #[must_use]
    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(namespace) if !namespace.is_empty() => format!("{}.{}", namespace, self.name),
            _ => self.name.clone(),
        }
    }

    /// Returns `true` for a class that is both abstract and sealed.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.kind == TypeKind::Class && self.is_abstract && self.is_sealed
    }

    /// Returns `true` if the type declares generic parameters.
    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.generic_parameters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        let ty = MetadataType::new(
            TypeId(3),
            "List`1",
            Some("System.Collections.Generic"),
            TypeVisibility::Public,
            TypeKind::Class,
        );
        assert_eq!(ty.full_name(), "System.Collections.Generic.List`1");

        let ty = MetadataType::new(TypeId(4), "Orphan", None, TypeVisibility::NotPublic, TypeKind::Class);
        assert_eq!(ty.full_name(), "Orphan");
    }

    #[test]
    fn modifiers() {
        let mut ty = MetadataType::new(TypeId(1), "Util", Some("A"), TypeVisibility::Public, TypeKind::Class);
        assert!(!ty.is_static());

        ty.is_abstract = true;
        ty.is_sealed = true;
        assert!(ty.is_static());

        ty.kind = TypeKind::Struct;
        assert!(!ty.is_static());
    }

    #[test]
    fn visibility() {
        assert!(TypeVisibility::Public.is_public());
        assert!(TypeVisibility::NestedPublic.is_public());
        assert!(!TypeVisibility::NestedFamOrAssem.is_public());
        assert!(!TypeVisibility::NotPublic.is_public());

        assert!(TypeVisibility::NestedPrivate.is_nested());
        assert!(!TypeVisibility::Public.is_nested());
    }
}
