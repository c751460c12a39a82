use crate::{
    loader::{
        context::LoaderContext,
        resolve::{unresolved, GenericContext},
    },
    metadata::tables::{
        GenericParamAttributes, TableId, TypeAttributes, TypeDefRaw, TYPE_VISIBILITY_MASK,
    },
    model::{is_primitive, GenericParameter, MetadataType, TypeId, TypeKind, TypeVisibility},
    Result,
};

/// Name of the pseudo type holding global members.
const MODULE_TYPE: &str = "<Module>";

/// Base types never listed as parents.
const IMPLICIT_BASES: [&str; 3] = ["System.Object", "System.ValueType", "System.Enum"];

fn visibility(flags: u32) -> TypeVisibility {
    match flags & TYPE_VISIBILITY_MASK {
        0x1 => TypeVisibility::Public,
        0x2 => TypeVisibility::NestedPublic,
        0x3 => TypeVisibility::NestedPrivate,
        0x4 => TypeVisibility::NestedFamily,
        0x5 => TypeVisibility::NestedAssembly,
        0x6 => TypeVisibility::NestedFamAndAssem,
        0x7 => TypeVisibility::NestedFamOrAssem,
        _ => TypeVisibility::NotPublic,
    }
}

fn kind(
    attributes: TypeAttributes,
    full_name: &str,
    name: &str,
    namespace: Option<&str>,
    base: Option<&str>,
) -> TypeKind {
    if attributes.contains(TypeAttributes::INTERFACE) {
        return TypeKind::Interface;
    }

    match base {
        _ if full_name == "System.Enum" => TypeKind::Class,
        Some("System.Enum") => TypeKind::Enum,
        Some("System.ValueType") => {
            if is_primitive(name, namespace) {
                TypeKind::Primitive
            } else {
                TypeKind::Struct
            }
        }
        _ => TypeKind::Class,
    }
}

impl LoaderContext<'_> {
    /// Describe every type of the assembly in `TypeDef` order, skipping `<Module>`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if a type's name or namespace cannot be read.
    pub fn load_types(&self) -> Result<Vec<MetadataType>> {
        let mut types = Vec::with_capacity(self.type_defs.len());

        for type_def in &self.type_defs {
            let (name, namespace) = self.type_def_name(type_def.rid)?;
            if name == MODULE_TYPE && namespace.is_none() {
                log::trace!("Skipping {}", MODULE_TYPE);
                continue;
            }

            types.push(self.load_type(type_def, name, namespace)?);
        }

        log::debug!("Described {} types", types.len());
        Ok(types)
    }

    fn load_type(
        &self,
        type_def: &TypeDefRaw,
        name: &str,
        namespace: Option<String>,
    ) -> Result<MetadataType> {
        let attributes = type_def.attributes();
        let full_name = match &namespace {
            Some(namespace) => format!("{namespace}.{name}"),
            None => name.to_string(),
        };

        let base_name = if type_def.extends.is_null() || type_def.extends.tag == TableId::TypeSpec {
            None
        } else {
            self.full_name(type_def.extends).ok()
        };

        let mut ty = MetadataType::new(
            TypeId(type_def.rid),
            name,
            namespace.as_deref(),
            visibility(type_def.flags),
            kind(
                attributes,
                &full_name,
                name,
                namespace.as_deref(),
                base_name.as_deref(),
            ),
        );
        ty.is_abstract = attributes.contains(TypeAttributes::ABSTRACT);
        ty.is_sealed = attributes.contains(TypeAttributes::SEALED);

        let owner = TableId::TypeDef.token_base() | type_def.rid;
        let type_params = self.generic_names(owner)?;
        let generics = GenericContext::for_type(&type_params);

        let implicit = base_name
            .as_deref()
            .is_some_and(|base| IMPLICIT_BASES.contains(&base));
        if !type_def.extends.is_null() && !implicit {
            ty.base_type = Some(
                self.coded_usage(type_def.extends, &generics)
                    .unwrap_or_else(|error| unresolved(&format!("the base of {full_name}"), &error)),
            );
        }

        if let Some(interfaces) = self.interfaces.get(&type_def.rid) {
            ty.interfaces = interfaces
                .iter()
                .map(|interface| {
                    self.coded_usage(*interface, &generics).unwrap_or_else(|error| {
                        unresolved(&format!("an interface of {full_name}"), &error)
                    })
                })
                .collect();
        }

        ty.generic_parameters = self.generic_parameters(owner, &generics)?;
        ty.members = self.load_members(type_def.rid, ty.kind, &type_params)?;

        log::trace!(
            "Described {} with {} members",
            full_name,
            ty.members.len()
        );
        Ok(ty)
    }

    /// Names of the generic parameters owned by the type or method `owner`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for an unreadable name.
    pub fn generic_names(&self, owner: u32) -> Result<Vec<String>> {
        match self.generic_params.get(&owner) {
            Some(params) => params
                .iter()
                .map(|param| self.string(param.name).map(str::to_string))
                .collect(),
            None => Ok(Vec::new()),
        }
    }

    /// Generic parameters owned by `owner` with their constraints.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for an unreadable name.
    pub fn generic_parameters(
        &self,
        owner: u32,
        generics: &GenericContext,
    ) -> Result<Vec<GenericParameter>> {
        let Some(params) = self.generic_params.get(&owner) else {
            return Ok(Vec::new());
        };

        params
            .iter()
            .map(|param| {
                let name = self.string(param.name)?;
                let mut parameter = GenericParameter::new(name);
                let attributes = param.attributes();
                parameter.reference_type =
                    attributes.contains(GenericParamAttributes::REFERENCE_TYPE_CONSTRAINT);
                parameter.not_nullable_value_type =
                    attributes.contains(GenericParamAttributes::NOT_NULLABLE_VALUE_TYPE_CONSTRAINT);
                parameter.default_constructor =
                    attributes.contains(GenericParamAttributes::DEFAULT_CONSTRUCTOR_CONSTRAINT);

                if let Some(constraints) = self.constraints.get(&param.rid) {
                    parameter.constraints = constraints
                        .iter()
                        .map(|constraint| {
                            self.coded_usage(*constraint, generics).unwrap_or_else(|error| {
                                unresolved(&format!("a constraint of {name}"), &error)
                            })
                        })
                        .collect();
                }

                Ok(parameter)
            })
            .collect()
    }
}
