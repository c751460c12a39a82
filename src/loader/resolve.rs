use crate::{
    loader::context::LoaderContext,
    metadata::{
        signatures::{parse_type_spec_signature, SignatureParameter, TypeSignature},
        tables::{CodedIndex, TableId},
        token::Token,
    },
    model::{is_primitive, TypeId, TypeRef, TypeUsageKind},
    Error::{self, RecursionLimit},
    Result,
};

/// `TypeSpec` blobs nested deeper than this are rejected.
const MAX_SPEC_DEPTH: usize = 16;

/// Names of the generic parameters in scope while resolving a signature.
#[derive(Default)]
pub(crate) struct GenericContext<'g> {
    pub type_params: &'g [String],
    pub method_params: &'g [String],
}

impl<'g> GenericContext<'g> {
    pub fn for_type(type_params: &'g [String]) -> Self {
        GenericContext {
            type_params,
            method_params: &[],
        }
    }
}

fn system(name: &str, kind: TypeUsageKind) -> TypeRef {
    TypeRef {
        kind,
        ..TypeRef::class(name, Some("System"))
    }
}

/// Usage of a built-in element type under its runtime name.
fn primitive(signature: &TypeSignature) -> Option<TypeRef> {
    let name = match signature {
        TypeSignature::Void => "Void",
        TypeSignature::Boolean => "Boolean",
        TypeSignature::Char => "Char",
        TypeSignature::I1 => "SByte",
        TypeSignature::U1 => "Byte",
        TypeSignature::I2 => "Int16",
        TypeSignature::U2 => "UInt16",
        TypeSignature::I4 => "Int32",
        TypeSignature::U4 => "UInt32",
        TypeSignature::I8 => "Int64",
        TypeSignature::U8 => "UInt64",
        TypeSignature::R4 => "Single",
        TypeSignature::R8 => "Double",
        TypeSignature::String => "String",
        TypeSignature::I | TypeSignature::FnPtr(_) => "IntPtr",
        TypeSignature::U => "UIntPtr",
        TypeSignature::Object => "Object",
        TypeSignature::TypedByRef => "TypedReference",
        _ => return None,
    };

    let kind = match name {
        "String" | "Object" => TypeUsageKind::Class,
        _ if is_primitive(name, Some("System")) => TypeUsageKind::Primitive,
        _ => TypeUsageKind::ValueType,
    };

    Some(system(name, kind))
}

/// `inner` with a shape suffix such as `[]`, `&` or `*` appended.
fn decorate(inner: TypeRef, suffix: &str) -> TypeRef {
    TypeRef {
        name: format!("{}{}", inner.name, suffix),
        namespace: inner.namespace,
        generic_args: Vec::new(),
        kind: TypeUsageKind::Class,
        definition: None,
    }
}

fn array_suffix(rank: u32) -> String {
    match rank {
        0 | 1 => "[*]".to_string(),
        _ => format!("[{}]", ",".repeat(rank as usize - 1)),
    }
}

fn generic_parameter(names: &[String], position: u32, prefix: &str) -> TypeRef {
    match names.get(position as usize) {
        Some(name) => TypeRef::generic_parameter(name),
        None => {
            log::warn!("Generic parameter {}{} is not in scope", prefix, position);
            TypeRef::generic_parameter(&format!("{prefix}{position}"))
        }
    }
}

/// Stand-in for a type that could not be resolved.
pub(crate) fn unresolved(what: &str, error: &Error) -> TypeRef {
    log::warn!("Could not resolve the type of {} - {}", what, error);
    TypeRef::class("?", None)
}

impl LoaderContext<'_> {
    /// Usage for a decoded signature type.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for invalid tokens and
    /// [`crate::Error::RecursionLimit`] for self-referencing `TypeSpec` rows.
    pub fn type_usage(&self, signature: &TypeSignature, generics: &GenericContext) -> Result<TypeRef> {
        self.usage_at(signature, generics, 0)
    }

    /// Usage for a parameter or return type, with by-ref parameters suffixed `&`.
    ///
    /// # Errors
    /// See [`LoaderContext::type_usage`].
    pub fn parameter_usage(
        &self,
        parameter: &SignatureParameter,
        generics: &GenericContext,
    ) -> Result<TypeRef> {
        let usage = self.type_usage(&parameter.base, generics)?;
        if parameter.by_ref {
            Ok(decorate(usage, "&"))
        } else {
            Ok(usage)
        }
    }

    /// Usage for a `TypeDefOrRef` coded index such as a base type or constraint.
    ///
    /// # Errors
    /// See [`LoaderContext::type_usage`].
    pub fn coded_usage(&self, index: CodedIndex, generics: &GenericContext) -> Result<TypeRef> {
        self.token_usage(index.token, false, generics, 0)
    }

    fn usage_at(
        &self,
        signature: &TypeSignature,
        generics: &GenericContext,
        depth: usize,
    ) -> Result<TypeRef> {
        if let Some(usage) = primitive(signature) {
            return Ok(usage);
        }

        match signature {
            TypeSignature::ValueType(token) => self.token_usage(*token, true, generics, depth),
            TypeSignature::Class(token) => self.token_usage(*token, false, generics, depth),
            TypeSignature::GenericParamType(position) => {
                Ok(generic_parameter(generics.type_params, *position, "!"))
            }
            TypeSignature::GenericParamMethod(position) => {
                Ok(generic_parameter(generics.method_params, *position, "!!"))
            }
            TypeSignature::SzArray(inner) => Ok(decorate(
                self.usage_at(inner, generics, depth)?,
                "[]",
            )),
            TypeSignature::Array(array) => Ok(decorate(
                self.usage_at(&array.base, generics, depth)?,
                &array_suffix(array.rank),
            )),
            TypeSignature::Ptr(inner) => Ok(decorate(self.usage_at(inner, generics, depth)?, "*")),
            TypeSignature::ByRef(inner) => Ok(decorate(self.usage_at(inner, generics, depth)?, "&")),
            TypeSignature::Pinned(inner) => self.usage_at(inner, generics, depth),
            TypeSignature::GenericInst(base, args) => {
                let args = args
                    .iter()
                    .map(|arg| self.usage_at(arg, generics, depth))
                    .collect::<Result<Vec<_>>>()?;
                Ok(self.usage_at(base, generics, depth)?.with_args(args))
            }
            other => Err(malformed_error!("Unexpected signature element - {:?}", other)),
        }
    }

    fn token_usage(
        &self,
        token: Token,
        value_type: bool,
        generics: &GenericContext,
        depth: usize,
    ) -> Result<TypeRef> {
        let kind = |name: &str, namespace: Option<&str>| {
            if is_primitive(name, namespace) {
                TypeUsageKind::Primitive
            } else if value_type {
                TypeUsageKind::ValueType
            } else {
                TypeUsageKind::Class
            }
        };

        match token.table() {
            table if table == TableId::TypeDef as u8 => {
                let (name, namespace) = self.type_def_name(token.row())?;
                Ok(TypeRef {
                    kind: kind(name, namespace.as_deref()),
                    ..TypeRef::class(name, namespace.as_deref())
                }
                .with_definition(TypeId(token.row())))
            }
            table if table == TableId::TypeRef as u8 => {
                let (name, namespace) = self.type_ref_name(token.row())?;
                Ok(TypeRef {
                    kind: kind(name, namespace.as_deref()),
                    ..TypeRef::class(name, namespace.as_deref())
                })
            }
            table if table == TableId::TypeSpec as u8 => {
                if depth >= MAX_SPEC_DEPTH {
                    return Err(RecursionLimit(MAX_SPEC_DEPTH));
                }

                let Some(spec) = token
                    .row()
                    .checked_sub(1)
                    .and_then(|index| self.type_specs.get(index as usize))
                else {
                    return Err(malformed_error!("Invalid TypeSpec token - {}", token));
                };

                let signature = parse_type_spec_signature(self.blob(spec.signature)?)?;
                self.usage_at(&signature, generics, depth + 1)
            }
            _ => Err(malformed_error!("Token does not reference a type - {}", token)),
        }
    }
}
