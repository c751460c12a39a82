use std::{
    collections::{HashMap, HashSet},
    ops::Range,
};

use crate::{
    loader::view::AssemblyViewData,
    metadata::{
        streams::{Blob, Strings, TablesHeader},
        tables::{
            CodedIndex, CustomAttributeRaw, FieldRaw, GenericParamConstraintRaw, GenericParamRaw,
            InterfaceImplRaw, MemberRefRaw, MethodDefRaw, MethodSemanticsAttributes,
            MethodSemanticsRaw, NestedClassRaw, ParamRaw, PropertyMapRaw, PropertyRaw,
            RowReadable, TableId, TypeDefRaw, TypeRefRaw, TypeSpecRaw,
        },
    },
    Error::NotSupported,
    Result,
};

/// Full name of the attribute that marks extension methods.
pub(crate) const EXTENSION_ATTRIBUTE: &str = "System.Runtime.CompilerServices.ExtensionAttribute";

/// Nesting deeper than this is treated as a cycle.
const MAX_NESTING: usize = 64;

/// Getter and setter rows of one property.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct PropertyAccessors {
    pub getter: Option<u32>,
    pub setter: Option<u32>,
}

fn rows<T: RowReadable>(tables: &TablesHeader<'_>) -> Vec<T> {
    match tables.table::<T>() {
        Some(table) => table.iter().collect(),
        None => Vec::new(),
    }
}

/// Rows `start..next` of a list column, clamped to a table of `row_count` rows.
fn list_range(start: u32, next: Option<u32>, row_count: u32) -> Range<u32> {
    let end = next.unwrap_or(row_count + 1).min(row_count + 1);
    start.max(1).min(end)..end
}

/// Decoded rows and cross-table indexes of one assembly.
///
/// Built once per load; every lookup the descriptor builders need afterwards is a map
/// access or a slice index.
pub(crate) struct LoaderContext<'a> {
    pub strings: &'a Strings<'a>,
    pub blobs: Option<&'a Blob<'a>>,

    pub type_defs: Vec<TypeDefRaw>,
    pub type_refs: Vec<TypeRefRaw>,
    pub type_specs: Vec<TypeSpecRaw>,
    pub fields: Vec<FieldRaw>,
    pub methods: Vec<MethodDefRaw>,
    pub params: Vec<ParamRaw>,
    pub properties: Vec<PropertyRaw>,
    pub member_refs: Vec<MemberRefRaw>,

    /// Nested `TypeDef` rid to enclosing `TypeDef` rid
    pub enclosing: HashMap<u32, u32>,
    /// `TypeDef` rid to implemented interfaces, in table order
    pub interfaces: HashMap<u32, Vec<CodedIndex>>,
    /// `TypeDef` rid to its run of `Property` rows
    pub property_lists: HashMap<u32, Range<u32>>,
    /// `Property` rid to its accessor methods
    pub accessors: HashMap<u32, PropertyAccessors>,
    /// `MethodDef` rids of property and event accessors
    pub accessor_methods: HashSet<u32>,
    /// Owner token to generic parameters, ordered by number
    pub generic_params: HashMap<u32, Vec<GenericParamRaw>>,
    /// `GenericParam` rid to its constraints, in table order
    pub constraints: HashMap<u32, Vec<CodedIndex>>,
    /// `MethodDef` rids carrying the extension attribute
    pub extension_methods: HashSet<u32>,
}

impl<'a> LoaderContext<'a> {
    /// Decode the tables of `data` and build the lookup indexes.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotSupported`] for metadata using indirection tables and
    /// any error raised while resolving custom attribute constructors.
    pub fn new(data: &'a AssemblyViewData<'a>) -> Result<Self> {
        let tables = &data.tables;

        for indirection in [
            TableId::FieldPtr,
            TableId::MethodPtr,
            TableId::ParamPtr,
            TableId::EventPtr,
            TableId::PropertyPtr,
        ] {
            if tables.has_table(indirection) {
                log::warn!("Metadata uses the {:?} indirection table", indirection);
                return Err(NotSupported);
            }
        }

        let mut context = LoaderContext {
            strings: &data.strings,
            blobs: data.blobs.as_ref(),
            type_defs: rows(tables),
            type_refs: rows(tables),
            type_specs: rows(tables),
            fields: rows(tables),
            methods: rows(tables),
            params: rows(tables),
            properties: rows(tables),
            member_refs: rows(tables),
            enclosing: HashMap::new(),
            interfaces: HashMap::new(),
            property_lists: HashMap::new(),
            accessors: HashMap::new(),
            accessor_methods: HashSet::new(),
            generic_params: HashMap::new(),
            constraints: HashMap::new(),
            extension_methods: HashSet::new(),
        };

        for nested in rows::<NestedClassRaw>(tables) {
            context
                .enclosing
                .insert(nested.nested_class, nested.enclosing_class);
        }

        for implementation in rows::<InterfaceImplRaw>(tables) {
            context
                .interfaces
                .entry(implementation.class)
                .or_default()
                .push(implementation.interface);
        }

        let property_count = context.properties.len() as u32;
        let property_maps = rows::<PropertyMapRaw>(tables);
        for (index, map) in property_maps.iter().enumerate() {
            let next = property_maps.get(index + 1).map(|next| next.property_list);
            context.property_lists.insert(
                map.parent,
                list_range(map.property_list, next, property_count),
            );
        }

        for semantic in rows::<MethodSemanticsRaw>(tables) {
            context.accessor_methods.insert(semantic.method);
            if semantic.association.tag != TableId::Property {
                continue;
            }

            let accessors = context
                .accessors
                .entry(semantic.association.row)
                .or_default();
            let attributes = semantic.attributes();
            if attributes.contains(MethodSemanticsAttributes::GETTER) {
                accessors.getter = Some(semantic.method);
            } else if attributes.contains(MethodSemanticsAttributes::SETTER) {
                accessors.setter = Some(semantic.method);
            }
        }

        for param in rows::<GenericParamRaw>(tables) {
            context
                .generic_params
                .entry(param.owner.token.value())
                .or_default()
                .push(param);
        }
        for params in context.generic_params.values_mut() {
            params.sort_by_key(|param| param.number);
        }

        for constraint in rows::<GenericParamConstraintRaw>(tables) {
            context
                .constraints
                .entry(constraint.owner)
                .or_default()
                .push(constraint.constraint);
        }

        for attribute in rows::<CustomAttributeRaw>(tables) {
            if attribute.parent.tag == TableId::MethodDef
                && context.attribute_type(attribute.constructor).as_deref()
                    == Some(EXTENSION_ATTRIBUTE)
            {
                context.extension_methods.insert(attribute.parent.row);
            }
        }

        log::debug!(
            "Indexed {} types, {} fields, {} methods, {} properties, {} extension methods",
            context.type_defs.len(),
            context.fields.len(),
            context.methods.len(),
            context.properties.len(),
            context.extension_methods.len()
        );

        Ok(context)
    }

    /// Full name of the type declaring an attribute constructor.
    fn attribute_type(&self, constructor: CodedIndex) -> Option<String> {
        match constructor.tag {
            TableId::MethodDef => self
                .method_owner(constructor.row)
                .and_then(|owner| self.type_def_full_name(owner).ok()),
            TableId::MemberRef => {
                let member = self.member_refs.get(constructor.row.checked_sub(1)? as usize)?;
                self.full_name(member.class).ok()
            }
            _ => None,
        }
    }

    /// The `TypeDef` whose method run contains `method`.
    pub fn method_owner(&self, method: u32) -> Option<u32> {
        (1..=self.type_defs.len() as u32).find(|rid| self.method_range(*rid).contains(&method))
    }

    pub fn type_def(&self, rid: u32) -> Result<&TypeDefRaw> {
        rid.checked_sub(1)
            .and_then(|index| self.type_defs.get(index as usize))
            .ok_or_else(|| malformed_error!("Invalid TypeDef row - {}", rid))
    }

    /// Rows of the `Field` table owned by the `TypeDef` `rid`.
    pub fn field_range(&self, rid: u32) -> Range<u32> {
        self.owned_range(rid, |row| row.field_list, self.fields.len())
    }

    /// Rows of the `MethodDef` table owned by the `TypeDef` `rid`.
    pub fn method_range(&self, rid: u32) -> Range<u32> {
        self.owned_range(rid, |row| row.method_list, self.methods.len())
    }

    /// Rows of the `Param` table owned by the `MethodDef` `rid`.
    pub fn param_range(&self, rid: u32) -> Range<u32> {
        let Some(method) = rid.checked_sub(1).and_then(|index| self.methods.get(index as usize)) else {
            return 0..0;
        };
        let next = self.methods.get(rid as usize).map(|next| next.param_list);
        list_range(method.param_list, next, self.params.len() as u32)
    }

    fn owned_range<F>(&self, rid: u32, list: F, row_count: usize) -> Range<u32>
    where
        F: Fn(&TypeDefRaw) -> u32,
    {
        let Ok(type_def) = self.type_def(rid) else {
            return 0..0;
        };
        let next = self.type_defs.get(rid as usize).map(&list);
        list_range(list(type_def), next, row_count as u32)
    }

    /// A string of the `#Strings` heap.
    pub fn string(&self, index: u32) -> Result<&'a str> {
        self.strings.get(index as usize)
    }

    /// A blob of the `#Blob` heap.
    pub fn blob(&self, index: u32) -> Result<&'a [u8]> {
        match self.blobs {
            Some(blobs) => blobs.get(index as usize),
            None => Err(malformed_error!("Blob {} referenced without a #Blob heap", index)),
        }
    }

    /// Simple name and effective namespace of a `TypeDef`.
    ///
    /// Nested types report the namespace of their outermost enclosing type.
    pub fn type_def_name(&self, rid: u32) -> Result<(&'a str, Option<String>)> {
        let name = self.string(self.type_def(rid)?.type_name)?;

        let mut outer = rid;
        for _ in 0..MAX_NESTING {
            match self.enclosing.get(&outer) {
                Some(enclosing) => outer = *enclosing,
                None => {
                    let namespace = self.string(self.type_def(outer)?.type_namespace)?;
                    return Ok((name, non_empty(namespace)));
                }
            }
        }

        Err(malformed_error!("Nested type chain of TypeDef {} is too deep", rid))
    }

    /// Simple name and effective namespace of a `TypeRef`.
    pub fn type_ref_name(&self, rid: u32) -> Result<(&'a str, Option<String>)> {
        let type_ref = self.type_ref(rid)?;
        let name = self.string(type_ref.type_name)?;

        let mut outer = type_ref;
        for _ in 0..MAX_NESTING {
            if outer.resolution_scope.tag == TableId::TypeRef && !outer.resolution_scope.is_null() {
                outer = self.type_ref(outer.resolution_scope.row)?;
            } else {
                let namespace = self.string(outer.type_namespace)?;
                return Ok((name, non_empty(namespace)));
            }
        }

        Err(malformed_error!("Nested type chain of TypeRef {} is too deep", rid))
    }

    fn type_ref(&self, rid: u32) -> Result<&TypeRefRaw> {
        rid.checked_sub(1)
            .and_then(|index| self.type_refs.get(index as usize))
            .ok_or_else(|| malformed_error!("Invalid TypeRef row - {}", rid))
    }

    pub fn type_def_full_name(&self, rid: u32) -> Result<String> {
        let (name, namespace) = self.type_def_name(rid)?;
        Ok(join_name(namespace.as_deref(), name))
    }

    /// Full name of a `TypeDef` or `TypeRef` reference.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for other tables or invalid rows.
    pub fn full_name(&self, index: CodedIndex) -> Result<String> {
        match index.tag {
            TableId::TypeDef => self.type_def_full_name(index.row),
            TableId::TypeRef => {
                let (name, namespace) = self.type_ref_name(index.row)?;
                Ok(join_name(namespace.as_deref(), name))
            }
            other => Err(malformed_error!(
                "{:?} reference has no simple name - row {}",
                other,
                index.row
            )),
        }
    }
}

fn non_empty(namespace: &str) -> Option<String> {
    if namespace.is_empty() {
        None
    } else {
        Some(namespace.to_string())
    }
}

fn join_name(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(namespace) => format!("{namespace}.{name}"),
        None => name.to_string(),
    }
}
