//! Shared fixtures for unit tests.
//!
//! Descriptor builders for the formatter and tree tests, and [`image`] for tests that
//! need a complete .NET PE file in memory.


use crate::model::{
    Accessor, FieldMember, GenericParameter, MemberAccess, MetadataMember, MetadataType,
    MethodMember, Parameter, PropertyMember, TypeId, TypeKind, TypeRef, TypeVisibility,
};

pub fn int32() -> TypeRef {
    TypeRef::primitive("Int32")
}

pub fn single() -> TypeRef {
    TypeRef::primitive("Single")
}

pub fn string() -> TypeRef {
    TypeRef::class("String", Some("System"))
}

pub fn void() -> TypeRef {
    TypeRef::value_type("Void", Some("System"))
}

// Helper function to create a public type without members
pub fn create_type(id: u32, name: &str, namespace: Option<&str>, kind: TypeKind) -> MetadataType {
    MetadataType::new(TypeId(id), name, namespace, TypeVisibility::Public, kind)
}

// Helper function to create an instance field
pub fn create_field(name: &str, access: MemberAccess, field_type: TypeRef) -> FieldMember {
    FieldMember {
        name: name.to_string(),
        access,
        is_static: false,
        field_type,
        is_literal: false,
        is_init_only: false,
        is_enum_value: false,
    }
}

// Helper function to create a property with plain instance accessors
pub fn create_property(
    name: &str,
    property_type: TypeRef,
    getter: Option<MemberAccess>,
    setter: Option<MemberAccess>,
) -> PropertyMember {
    PropertyMember {
        name: name.to_string(),
        property_type,
        getter: getter.map(Accessor::new),
        setter: setter.map(Accessor::new),
    }
}

// Helper function to create a non-generic instance method
pub fn create_method(
    name: &str,
    access: MemberAccess,
    return_type: TypeRef,
    parameters: Vec<Parameter>,
) -> MethodMember {
    MethodMember {
        name: name.to_string(),
        access,
        is_static: false,
        return_type,
        generic_parameters: Vec::new(),
        parameters,
        is_abstract: false,
        is_virtual: false,
        is_extension: false,
    }
}

// Helper function to create `public static Void <name>(this <extended> <parameter>)`
pub fn create_extension(name: &str, extended: TypeRef, parameter: &str) -> MethodMember {
    let mut method = create_method(
        name,
        MemberAccess::Public,
        void(),
        vec![Parameter::new(parameter, extended)],
    );
    method.is_static = true;
    method.is_extension = true;
    method
}

fn enum_value(name: &str, owner: TypeId) -> MetadataMember {
    let mut field = create_field(
        name,
        MemberAccess::Public,
        TypeRef::value_type("TestEnum", Some("TestNamespace")).with_definition(owner),
    );
    field.is_static = true;
    field.is_literal = true;
    field.is_enum_value = true;
    MetadataMember::Field(field)
}

/// The `TestNamespace` sample library as a provider would describe it.
pub fn test_types() -> Vec<MetadataType> {
    let mut class1 = create_type(2, "TestClass1", Some("TestNamespace"), TypeKind::Class);
    let mut return_any = create_method(
        "ReturnAny",
        MemberAccess::Private,
        TypeRef::generic_parameter("T"),
        Vec::new(),
    );
    return_any.generic_parameters.push(GenericParameter::new("T"));
    class1.members = vec![
        MetadataMember::Method(create_method(
            "ReturnInt",
            MemberAccess::FamOrAssem,
            int32(),
            vec![
                Parameter::new("param1", TypeRef::primitive("Boolean")),
                Parameter::new("param2", TypeRef::primitive("Byte")),
                Parameter::new("param3", TypeRef::primitive("Char")),
            ],
        )),
        MetadataMember::Method(return_any),
    ];

    let mut class2 = create_type(3, "TestClass2", Some("TestNamespace"), TypeKind::Class);
    class2.is_abstract = true;
    class2.is_sealed = true;
    class2.members = vec![MetadataMember::Method(create_extension(
        "DoNothing",
        string(),
        "str",
    ))];

    let mut class3 = MetadataType::new(
        TypeId(4),
        "TestClass3`1",
        Some("TestNamespace"),
        TypeVisibility::NotPublic,
        TypeKind::Class,
    );
    class3.generic_parameters.push(GenericParameter::new("T"));
    class3.members = vec![
        MetadataMember::Property(create_property(
            "Prop1",
            TypeRef::generic_parameter("T"),
            Some(MemberAccess::Public),
            Some(MemberAccess::Public),
        )),
        MetadataMember::Property(create_property(
            "Prop2",
            int32(),
            Some(MemberAccess::Public),
            Some(MemberAccess::Private),
        )),
        MetadataMember::Property(create_property(
            "Prop3",
            single(),
            Some(MemberAccess::Private),
            None,
        )),
        MetadataMember::Method(create_method(
            "ReturnT",
            MemberAccess::Family,
            TypeRef::generic_parameter("T"),
            Vec::new(),
        )),
    ];

    let mut interface = create_type(5, "ITestInterface", Some("TestNamespace"), TypeKind::Interface);
    interface.is_abstract = true;
    let mut hello = create_method("HelloWorld", MemberAccess::Public, void(), Vec::new());
    hello.is_abstract = true;
    hello.is_virtual = true;
    interface.members = vec![MetadataMember::Method(hello)];

    let mut test_struct = create_type(6, "TestStruct", Some("TestNamespace"), TypeKind::Struct);
    test_struct.is_sealed = true;
    test_struct
        .interfaces
        .push(TypeRef::class("ITestInterface", Some("TestNamespace")).with_definition(TypeId(5)));
    let mut hello = create_method("HelloWorld", MemberAccess::Public, void(), Vec::new());
    hello.is_virtual = true;
    test_struct.members = vec![MetadataMember::Method(hello)];

    let mut test_enum = create_type(7, "TestEnum", Some("TestNamespace"), TypeKind::Enum);
    test_enum.is_sealed = true;
    test_enum.members = vec![
        enum_value("Value1", TypeId(7)),
        enum_value("Value2", TypeId(7)),
        enum_value("Value3", TypeId(7)),
    ];

    vec![class1, class2, class3, interface, test_struct, test_enum]
}
