//! Descriptors of the types and members found in an inspected binary.
//!
//! A metadata provider produces [`MetadataType`]s; the declaration formatter and the
//! tree builder consume them. Descriptors are plain owned data with no link back to
//! the binary they came from, so they can equally be built by hand.
//!
//! # Examples
//!
//! ```rust
//! use dotbrowse::model::{MetadataType, TypeId, TypeKind, TypeVisibility};
//!
//! let ty = MetadataType::new(TypeId(1), "TestEnum", Some("Demo"), TypeVisibility::Public, TypeKind::Enum);
//! assert_eq!(ty.full_name(), "Demo.TestEnum");
//! assert!(ty.members.is_empty());
//! ```

mod generics;
mod member;
mod typeref;
mod types;

pub use generics::GenericParameter;
pub use member::{
    Accessor, FieldMember, MemberAccess, MetadataMember, MethodMember, Parameter, PropertyMember,
};
pub use typeref::{is_primitive, TypeRef, TypeUsageKind, PRIMITIVE_TYPES};
pub use types::{MetadataType, TypeId, TypeKind, TypeVisibility};
