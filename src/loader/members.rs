use std::collections::BTreeMap;

use crate::{
    loader::{
        context::LoaderContext,
        resolve::{unresolved, GenericContext},
    },
    metadata::{
        signatures::{parse_field_signature, parse_method_signature, parse_property_signature},
        tables::{FieldAttributes, MethodAttributes, MethodDefRaw, TableId},
    },
    model::{
        Accessor, FieldMember, MemberAccess, MetadataMember, MethodMember, Parameter,
        PropertyMember, TypeKind, TypeRef,
    },
    Result,
};

/// The instance field holding the value of an enum.
const ENUM_VALUE_FIELD: &str = "value__";

fn accessor(method: &MethodDefRaw) -> Accessor {
    let attributes = method.attributes();
    Accessor {
        access: MemberAccess::from_flags(method.flags),
        is_static: attributes.contains(MethodAttributes::STATIC),
        is_abstract: attributes.contains(MethodAttributes::ABSTRACT),
        is_virtual: attributes.contains(MethodAttributes::VIRTUAL),
    }
}

fn is_constructor(method: &MethodDefRaw, name: &str) -> bool {
    method
        .attributes()
        .contains(MethodAttributes::RT_SPECIAL_NAME)
        && (name == ".ctor" || name == ".cctor")
}

impl LoaderContext<'_> {
    /// Fields, then properties, then methods of the `TypeDef` `rid`, each in table order.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if a member name cannot be read. Unresolvable
    /// signatures are logged and rendered as `?`.
    pub fn load_members(
        &self,
        rid: u32,
        kind: TypeKind,
        type_params: &[String],
    ) -> Result<Vec<MetadataMember>> {
        let generics = GenericContext::for_type(type_params);
        let mut members = Vec::new();

        self.load_fields(rid, kind, &generics, &mut members)?;
        self.load_properties(rid, &generics, &mut members)?;
        self.load_methods(rid, type_params, &mut members)?;

        Ok(members)
    }

    fn load_fields(
        &self,
        rid: u32,
        kind: TypeKind,
        generics: &GenericContext,
        members: &mut Vec<MetadataMember>,
    ) -> Result<()> {
        for field_rid in self.field_range(rid) {
            let Some(field) = self.fields.get(field_rid as usize - 1) else {
                break;
            };

            let name = self.string(field.name)?;
            let attributes = field.attributes();
            let is_static = attributes.contains(FieldAttributes::STATIC);
            if kind == TypeKind::Enum && !is_static && name == ENUM_VALUE_FIELD {
                continue;
            }

            let field_type = self
                .blob(field.signature)
                .and_then(parse_field_signature)
                .and_then(|signature| self.type_usage(&signature.base, generics))
                .unwrap_or_else(|error| unresolved(&format!("field {name}"), &error));

            let is_literal = attributes.contains(FieldAttributes::LITERAL);
            members.push(MetadataMember::Field(FieldMember {
                name: name.to_string(),
                access: MemberAccess::from_flags(field.flags),
                is_static,
                field_type,
                is_literal,
                is_init_only: attributes.contains(FieldAttributes::INIT_ONLY),
                is_enum_value: kind == TypeKind::Enum && is_static && is_literal,
            }));
        }

        Ok(())
    }

    fn load_properties(
        &self,
        rid: u32,
        generics: &GenericContext,
        members: &mut Vec<MetadataMember>,
    ) -> Result<()> {
        let Some(range) = self.property_lists.get(&rid) else {
            return Ok(());
        };

        for property_rid in range.clone() {
            let Some(property) = self.properties.get(property_rid as usize - 1) else {
                break;
            };

            let name = self.string(property.name)?;
            let property_type = self
                .blob(property.signature)
                .and_then(parse_property_signature)
                .and_then(|signature| self.type_usage(&signature.base, generics))
                .unwrap_or_else(|error| unresolved(&format!("property {name}"), &error));

            let accessors = self.accessors.get(&property_rid).copied().unwrap_or_default();
            let method = |rid: Option<u32>| {
                rid.and_then(|rid| rid.checked_sub(1))
                    .and_then(|index| self.methods.get(index as usize))
                    .map(accessor)
            };

            members.push(MetadataMember::Property(PropertyMember {
                name: name.to_string(),
                property_type,
                getter: method(accessors.getter),
                setter: method(accessors.setter),
            }));
        }

        Ok(())
    }

    fn load_methods(
        &self,
        rid: u32,
        type_params: &[String],
        members: &mut Vec<MetadataMember>,
    ) -> Result<()> {
        for method_rid in self.method_range(rid) {
            let Some(method) = self.methods.get(method_rid as usize - 1) else {
                break;
            };

            let name = self.string(method.name)?;
            if self.accessor_methods.contains(&method_rid) || is_constructor(method, name) {
                log::trace!("Skipping accessor or constructor {}", name);
                continue;
            }

            let owner = TableId::MethodDef.token_base() | method_rid;
            let method_params = self.generic_names(owner)?;
            let generics = GenericContext {
                type_params,
                method_params: &method_params,
            };

            let (return_type, parameters) = self.method_types(method_rid, name, &generics)?;
            let attributes = method.attributes();

            members.push(MetadataMember::Method(MethodMember {
                name: name.to_string(),
                access: MemberAccess::from_flags(method.flags),
                is_static: attributes.contains(MethodAttributes::STATIC),
                return_type,
                generic_parameters: self.generic_parameters(owner, &generics)?,
                parameters,
                is_abstract: attributes.contains(MethodAttributes::ABSTRACT),
                is_virtual: attributes.contains(MethodAttributes::VIRTUAL),
                is_extension: self.extension_methods.contains(&method_rid),
            }));
        }

        Ok(())
    }

    /// Return type and named parameters of a method.
    ///
    /// Parameter names come from the `Param` rows by sequence number; a parameter
    /// without a row has an empty name.
    fn method_types(
        &self,
        rid: u32,
        name: &str,
        generics: &GenericContext,
    ) -> Result<(TypeRef, Vec<Parameter>)> {
        let mut names = BTreeMap::new();
        for param_rid in self.param_range(rid) {
            let Some(param) = self.params.get(param_rid as usize - 1) else {
                break;
            };
            if param.sequence > 0 {
                names.insert(param.sequence, self.string(param.name)?);
            }
        }

        let Some(method) = rid.checked_sub(1).and_then(|index| self.methods.get(index as usize)) else {
            return Err(malformed_error!("Invalid MethodDef row - {}", rid));
        };

        let signature = match self.blob(method.signature).and_then(parse_method_signature) {
            Ok(signature) => signature,
            Err(error) => {
                let parameters = names
                    .values()
                    .map(|param_name| Parameter::new(param_name, TypeRef::class("?", None)))
                    .collect();
                return Ok((unresolved(&format!("method {name}"), &error), parameters));
            }
        };

        let return_type = self
            .parameter_usage(&signature.return_type, generics)
            .unwrap_or_else(|error| unresolved(&format!("the return of {name}"), &error));

        let parameters = signature
            .params
            .iter()
            .enumerate()
            .map(|(index, param)| {
                let param_name = names.get(&(index as u32 + 1)).copied().unwrap_or_default();
                let param_type = self.parameter_usage(param, generics).unwrap_or_else(|error| {
                    unresolved(&format!("parameter {param_name} of {name}"), &error)
                });
                Parameter::new(param_name, param_type)
            })
            .collect();

        Ok((return_type, parameters))
    }
}
