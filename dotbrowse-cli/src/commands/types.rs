use std::path::Path;

use dotbrowse::{
    declaration::type_declaration,
    model::{MetadataMember, MetadataType},
};
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::{in_namespace, load_types},
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize, PartialEq)]
struct TypeEntry {
    namespace: String,
    declaration: String,
    fields: usize,
    properties: usize,
    methods: usize,
}

#[derive(Debug, Serialize)]
struct TypesOutput {
    types: Vec<TypeEntry>,
    count: usize,
}

impl From<&MetadataType> for TypeEntry {
    fn from(ty: &MetadataType) -> Self {
        let count = |matches: fn(&MetadataMember) -> bool| {
            ty.members.iter().filter(|member| matches(member)).count()
        };

        TypeEntry {
            namespace: ty.namespace.clone().unwrap_or_default(),
            declaration: type_declaration(ty).trim_end().to_string(),
            fields: count(|member| matches!(member, MetadataMember::Field(_))),
            properties: count(|member| matches!(member, MetadataMember::Property(_))),
            methods: count(|member| matches!(member, MetadataMember::Method(_))),
        }
    }
}

pub fn run(path: &Path, namespace: Option<&str>, opts: &GlobalOptions) -> anyhow::Result<()> {
    let types = load_types(path)?;

    let entries: Vec<TypeEntry> = types
        .iter()
        .filter(|ty| namespace.map_or(true, |namespace| in_namespace(ty, namespace)))
        .map(TypeEntry::from)
        .collect();

    let count = entries.len();
    let output = TypesOutput {
        types: entries,
        count,
    };

    print_output(&output, opts, |out| {
        let mut tw = TabWriter::new(vec![
            ("Namespace", Align::Left),
            ("Declaration", Align::Left),
            ("Fields", Align::Right),
            ("Props", Align::Right),
            ("Methods", Align::Right),
        ]);
        for e in &out.types {
            tw.row(vec![
                e.namespace.clone(),
                e.declaration.clone(),
                e.fields.to_string(),
                e.properties.to_string(),
                e.methods.to_string(),
            ]);
        }
        tw.print();
        println!("\n{} type(s) listed.", out.count);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotbrowse::model::{
        FieldMember, MemberAccess, TypeId, TypeKind, TypeRef, TypeVisibility,
    };

    #[test]
    fn entry_counts_members() {
        let mut ty = MetadataType::new(
            TypeId(1),
            "Widget",
            Some("Demo"),
            TypeVisibility::Public,
            TypeKind::Class,
        );
        ty.interfaces.push(TypeRef::class("IDisposable", Some("System")));
        ty.members.push(MetadataMember::Field(FieldMember {
            name: "size".to_string(),
            access: MemberAccess::Private,
            is_static: false,
            field_type: TypeRef::primitive("Int32"),
            is_literal: false,
            is_init_only: false,
            is_enum_value: false,
        }));

        assert_eq!(
            TypeEntry::from(&ty),
            TypeEntry {
                namespace: "Demo".to_string(),
                declaration: "public class Widget: IDisposable".to_string(),
                fields: 1,
                properties: 0,
                methods: 0,
            }
        );
    }
}
