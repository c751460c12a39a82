//! Benchmarks for building declaration trees.
//!
//! Measures the phases of turning descriptors into a tree:
//! - Declaration formatting of types and methods
//! - Grouping and rendering without extension methods
//! - Relocation of extension methods into existing and synthesized nodes
//! - Method signature decoding feeding the descriptors

extern crate dotbrowse;

use criterion::{criterion_group, criterion_main, Criterion};
use dotbrowse::{
    declaration::{method_signature, type_declaration},
    metadata::signatures::parse_method_signature,
    model::{
        FieldMember, GenericParameter, MemberAccess, MetadataMember, MetadataType, MethodMember,
        Parameter, TypeId, TypeKind, TypeRef, TypeVisibility,
    },
    TreeBuilder,
};
use std::hint::black_box;

fn method(name: &str, parameters: Vec<Parameter>, is_extension: bool) -> MethodMember {
    MethodMember {
        name: name.to_string(),
        access: MemberAccess::Public,
        is_static: is_extension,
        return_type: TypeRef::primitive("Int32"),
        generic_parameters: Vec::new(),
        parameters,
        is_abstract: false,
        is_virtual: false,
        is_extension,
    }
}

/// `namespaces` namespaces of `types` types, each with a field, a method and, on every
/// fourth type, an extension method on `System.String`.
fn library(namespaces: u32, types: u32) -> Vec<MetadataType> {
    let mut library = Vec::new();

    for namespace in 0..namespaces {
        for index in 0..types {
            let id = namespace * types + index + 1;
            let mut ty = MetadataType::new(
                TypeId(id),
                &format!("Type{index}`1"),
                Some(&format!("Bench.Namespace{namespace}")),
                TypeVisibility::Public,
                TypeKind::Class,
            );

            let mut parameter = GenericParameter::new("T");
            parameter.reference_type = true;
            parameter
                .constraints
                .push(TypeRef::class("IDisposable", Some("System")));
            ty.generic_parameters.push(parameter);
            ty.interfaces
                .push(TypeRef::class("IEnumerable`1", Some("System.Collections.Generic"))
                    .with_args(vec![TypeRef::generic_parameter("T")]));

            ty.members.push(MetadataMember::Field(FieldMember {
                name: "count".to_string(),
                access: MemberAccess::Private,
                is_static: false,
                field_type: TypeRef::primitive("Int32"),
                is_literal: false,
                is_init_only: true,
                is_enum_value: false,
            }));
            ty.members.push(MetadataMember::Method(method(
                "Measure",
                vec![Parameter::new("item", TypeRef::generic_parameter("T"))],
                false,
            )));

            if index % 4 == 0 {
                ty.members.push(MetadataMember::Method(method(
                    &format!("Extend{id}"),
                    vec![Parameter::new(
                        "text",
                        TypeRef::class("String", Some("System")),
                    )],
                    true,
                )));
            }

            library.push(ty);
        }
    }

    library
}

/// Benchmark rendering the declaration of a generic type with parents and constraints.
fn bench_type_declaration(c: &mut Criterion) {
    let types = library(1, 1);

    c.bench_function("declaration_type", |b| {
        b.iter(|| black_box(type_declaration(black_box(&types[0]))));
    });
}

/// Benchmark rendering a method signature.
fn bench_method_signature(c: &mut Criterion) {
    let method = method(
        "Measure",
        vec![
            Parameter::new("item", TypeRef::generic_parameter("T")),
            Parameter::new("text", TypeRef::class("String", Some("System"))),
        ],
        false,
    );

    c.bench_function("declaration_method", |b| {
        b.iter(|| black_box(method_signature(black_box(&method)).unwrap()));
    });
}

/// Benchmark grouping and rendering 50 x 40 types.
fn bench_namespaces(c: &mut Criterion) {
    let types = library(50, 40);

    c.bench_function("tree_namespaces", |b| {
        b.iter(|| {
            let namespaces = TreeBuilder::new(black_box(&types)).namespaces().unwrap();
            black_box(namespaces.nodes.len())
        });
    });
}

/// Benchmark the complete build, relocating 500 extension methods.
fn bench_build(c: &mut Criterion) {
    let types = library(50, 40);

    c.bench_function("tree_build", |b| {
        b.iter(|| black_box(TreeBuilder::new(black_box(&types)).build().unwrap()));
    });
}

/// Benchmark decoding an instance method signature with a generic instance parameter.
/// Signature: int Method(List<int> a, string b)
fn bench_signature(c: &mut Criterion) {
    // HASTHIS, 2 params, I4 return, GENERICINST CLASS TypeRef(5) 1 I4, STRING
    let signature = [0x20, 0x02, 0x08, 0x15, 0x12, 0x15, 0x01, 0x08, 0x0E];

    c.bench_function("signature_method", |b| {
        b.iter(|| black_box(parse_method_signature(black_box(&signature)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_type_declaration,
    bench_method_signature,
    bench_namespaces,
    bench_build,
    bench_signature
);
criterion_main!(benches);
