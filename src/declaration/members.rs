use crate::{
    declaration::{generic_parameter_list, type_usage},
    model::{
        Accessor, FieldMember, MemberAccess, MetadataMember, MethodMember, PropertyMember,
    },
    Result,
};

fn field_access(access: MemberAccess) -> &'static str {
    match access {
        MemberAccess::Family => "protected ",
        MemberAccess::Assembly => "internal ",
        MemberAccess::FamOrAssem => "public protected ",
        MemberAccess::FamAndAssem => "private protected ",
        MemberAccess::Private => "private ",
        MemberAccess::Public => "public ",
        MemberAccess::CompilerControlled => "",
    }
}

fn method_access(access: MemberAccess) -> &'static str {
    match access {
        MemberAccess::Family => "protected ",
        MemberAccess::Assembly => "internal ",
        MemberAccess::FamOrAssem => "protected internal ",
        MemberAccess::FamAndAssem => "private protected ",
        MemberAccess::Private => "private ",
        MemberAccess::Public => "public ",
        MemberAccess::CompilerControlled => "",
    }
}

/// Accessibility, `const`/`readonly` and `static` of a field, in that order.
#[must_use]
pub fn field_modifiers(field: &FieldMember) -> String {
    let mut modifiers = String::from(field_access(field.access));

    if field.is_literal {
        modifiers.push_str("const ");
    } else if field.is_init_only {
        modifiers.push_str("readonly ");
    }

    if field.is_static {
        modifiers.push_str("static ");
    }

    modifiers
}

/// Accessibility, `static` and `abstract`/`virtual` of a method or accessor.
#[must_use]
pub fn method_modifiers(
    access: MemberAccess,
    is_static: bool,
    is_abstract: bool,
    is_virtual: bool,
) -> String {
    let mut modifiers = String::from(method_access(access));

    if is_static {
        modifiers.push_str("static ");
    }

    if is_abstract {
        modifiers.push_str("abstract ");
    } else if is_virtual {
        modifiers.push_str("virtual ");
    }

    modifiers
}

fn accessor_modifiers(accessor: &Accessor) -> String {
    method_modifiers(
        accessor.access,
        accessor.is_static,
        accessor.is_abstract,
        accessor.is_virtual,
    )
}

/// Render a field. Values of an enum render as their bare name.
#[must_use]
pub fn field_declaration(field: &FieldMember) -> String {
    if field.is_enum_value {
        return field.name.clone();
    }

    format!(
        "{}{} {}",
        field_modifiers(field),
        type_usage(&field.field_type),
        field.name
    )
}

/// Render a property with its accessors.
///
/// The line is prefixed with the getter's modifiers; a set-only property has no prefix.
///
/// # Errors
/// Returns [`crate::Error::MetadataShape`] if the property has neither accessor.
pub fn property_declaration(property: &PropertyMember) -> Result<String> {
    if property.getter.is_none() && property.setter.is_none() {
        return Err(shape_error!(
            "Property {} has neither a getter nor a setter",
            property.name
        ));
    }

    let getter = property.getter.as_ref().map(accessor_modifiers);
    let setter = property.setter.as_ref().map(accessor_modifiers);

    let mut declaration = format!(
        "{}{} {} {{ ",
        getter.as_deref().unwrap_or_default(),
        type_usage(&property.property_type),
        property.name
    );

    if let Some(modifiers) = &getter {
        declaration.push_str(modifiers);
        declaration.push_str("get; ");
    }
    if let Some(modifiers) = &setter {
        declaration.push_str(modifiers);
        declaration.push_str("set; ");
    }

    declaration.push('}');
    Ok(declaration)
}

/// Render the parameter list of a method, without the parentheses.
///
/// # Errors
/// Returns [`crate::Error::MetadataShape`] for an extension method without parameters.
pub fn method_parameters(method: &MethodMember) -> Result<String> {
    if method.is_extension && method.parameters.is_empty() {
        return Err(shape_error!(
            "Extension method {} has no parameters",
            method.name
        ));
    }

    let rendered: Vec<String> = method
        .parameters
        .iter()
        .enumerate()
        .map(|(index, parameter)| {
            let usage = type_usage(&parameter.parameter_type);

            if method.is_extension && index == 0 {
                if parameter.parameter_type.is_generic_instance() || parameter.name.is_empty() {
                    format!("this {usage}")
                } else {
                    format!("this {usage} {}", parameter.name)
                }
            } else if parameter.name.is_empty() {
                usage
            } else {
                format!("{usage} {}", parameter.name)
            }
        })
        .collect();

    Ok(rendered.join(", "))
}

/// Render a method signature.
///
/// ```rust
/// use dotbrowse::declaration::method_signature;
/// use dotbrowse::model::{GenericParameter, MemberAccess, MethodMember, Parameter, TypeRef};
///
/// let method = MethodMember {
///     name: "Wrap".to_string(),
///     access: MemberAccess::Public,
///     is_static: true,
///     return_type: TypeRef::class("List`1", Some("System.Collections.Generic"))
///         .with_args(vec![TypeRef::generic_parameter("T")]),
///     generic_parameters: vec![GenericParameter::new("T")],
///     parameters: vec![Parameter::new("item", TypeRef::generic_parameter("T"))],
///     is_abstract: false,
///     is_virtual: false,
///     is_extension: false,
/// };
/// assert_eq!(method_signature(&method)?, "public static List`1<T> Wrap<T>(T item)");
/// # Ok::<(), dotbrowse::Error>(())
/// ```
///
/// # Errors
/// Returns [`crate::Error::MetadataShape`] for an extension method without parameters.
pub fn method_signature(method: &MethodMember) -> Result<String> {
    let (arguments, constraints) = generic_parameter_list(&method.generic_parameters);

    Ok(format!(
        "{}{} {}{}({}){}",
        method_modifiers(
            method.access,
            method.is_static,
            method.is_abstract,
            method.is_virtual
        ),
        type_usage(&method.return_type),
        method.name,
        arguments,
        method_parameters(method)?,
        constraints
    ))
}

/// Render any member.
///
/// # Errors
/// Returns [`crate::Error::MetadataShape`] if the member cannot be rendered.
pub fn member_declaration(member: &MetadataMember) -> Result<String> {
    match member {
        MetadataMember::Field(field) => Ok(field_declaration(field)),
        MetadataMember::Property(property) => property_declaration(property),
        MetadataMember::Method(method) => method_signature(method),
    }
}
