//! Rendering of descriptors as single-line, source-like declarations.
//!
//! Every function here is pure: a descriptor goes in, a `String` comes out. The output
//! approximates C# declaration syntax closely enough to read an assembly's surface, but
//! it is not meant to compile. Names keep their metadata form, so generic types carry
//! their arity suffix (`List`1<Int32>`) and built-in types use their runtime names
//! (`Int32`, `String`, `Void`).
//!
//! # Examples
//!
//! ```rust
//! use dotbrowse::declaration::{field_declaration, type_declaration};
//! use dotbrowse::model::{FieldMember, MemberAccess, MetadataType, TypeId, TypeKind, TypeRef, TypeVisibility};
//!
//! let ty = MetadataType::new(TypeId(1), "Settings", Some("Demo"), TypeVisibility::Public, TypeKind::Class);
//! assert_eq!(type_declaration(&ty), "public class Settings");
//!
//! let field = FieldMember {
//!     name: "Default".to_string(),
//!     access: MemberAccess::Public,
//!     is_static: true,
//!     field_type: TypeRef::class("Settings", Some("Demo")),
//!     is_literal: false,
//!     is_init_only: true,
//!     is_enum_value: false,
//! };
//! assert_eq!(field_declaration(&field), "public readonly static Settings Default");
//! ```

mod generics;
mod members;
mod types;

pub use generics::{generic_arguments, generic_parameter_list, parameter_constraints, type_usage};
pub use members::{
    field_declaration, field_modifiers, member_declaration, method_modifiers, method_parameters,
    method_signature, property_declaration,
};
pub use types::{type_declaration, type_modifiers, type_parents};
