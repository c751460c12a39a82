use crate::{
    declaration::{generic_parameter_list, type_usage},
    model::{MetadataType, TypeKind},
};

/// Visibility, class modifier and kind keyword of a type, e.g. `public static class `.
#[must_use]
pub fn type_modifiers(ty: &MetadataType) -> String {
    let visibility = if ty.visibility.is_public() {
        "public "
    } else {
        "internal "
    };

    let keyword = match ty.kind {
        TypeKind::Class => match (ty.is_abstract, ty.is_sealed) {
            (true, true) => "static class ",
            (true, false) => "abstract class ",
            (false, true) => "sealed class ",
            (false, false) => "class ",
        },
        TypeKind::Enum => "enum ",
        TypeKind::Interface => "interface ",
        TypeKind::Struct => "struct ",
        TypeKind::Primitive => "",
    };

    format!("{visibility}{keyword}")
}

/// Base type followed by interfaces, joined with `, `. Empty if there are neither.
#[must_use]
pub fn type_parents(ty: &MetadataType) -> String {
    let parents: Vec<String> = ty
        .base_type
        .iter()
        .chain(ty.interfaces.iter())
        .map(type_usage)
        .collect();

    parents.join(", ")
}

/// Render the declaration line of a type.
///
/// ```rust
/// use dotbrowse::declaration::type_declaration;
/// use dotbrowse::model::{MetadataType, TypeId, TypeKind, TypeRef, TypeVisibility};
///
/// let mut ty = MetadataType::new(TypeId(2), "Repository`1", Some("Demo"), TypeVisibility::Public, TypeKind::Class);
/// ty.is_abstract = true;
/// ty.interfaces.push(TypeRef::class("IDisposable", Some("System")));
/// assert_eq!(type_declaration(&ty), "public abstract class Repository`1: IDisposable ");
/// ```
#[must_use]
pub fn type_declaration(ty: &MetadataType) -> String {
    let (arguments, constraints) = generic_parameter_list(&ty.generic_parameters);
    let mut declaration = format!("{}{}{}", type_modifiers(ty), ty.name, arguments);

    let parents = type_parents(ty);
    if !parents.is_empty() {
        declaration.push_str(": ");
        declaration.push_str(&parents);
        declaration.push(' ');
    }

    declaration.push_str(&constraints);
    declaration
}
