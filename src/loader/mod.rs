//! Metadata provider reading ECMA-335 metadata from .NET PE files.
//!
//! [`CilProvider`] maps the file, locates the `#~`, `#Strings` and `#Blob` streams
//! ([`AssemblyView`]), decodes the table rows it needs and turns every `TypeDef` except
//! `<Module>` into a [`crate::model::MetadataType`]:
//!
//! - nested types carry the namespace of their outermost enclosing type
//! - `System.Object`, `System.ValueType` and `System.Enum` bases are implied, not listed
//! - property and event accessors as well as constructors are not listed as methods
//! - a method carrying `System.Runtime.CompilerServices.ExtensionAttribute` is an
//!   extension method
//!
//! A signature that cannot be decoded does not fail the load: the affected type renders
//! as `?` and a warning is logged.
//!
//! # Examples
//!
//! ```rust,no_run
//! use dotbrowse::{CilProvider, MetadataProvider};
//! use std::path::Path;
//!
//! let types = CilProvider.load_types(Path::new("MyAssembly.dll"))?;
//! for ty in &types {
//!     println!("{} ({} members)", ty.full_name(), ty.members.len());
//! }
//! # Ok::<(), dotbrowse::Error>(())
//! ```

mod context;
mod members;
mod resolve;
mod types;
mod view;

pub use view::{AssemblyView, AssemblyViewData};

use std::path::Path;

use crate::{loader::context::LoaderContext, model::MetadataType, MetadataProvider, Result};

/// Reads type descriptors from the metadata tables of a .NET binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct CilProvider;

impl CilProvider {
    /// Describe the types of a loaded assembly.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotSupported`] for metadata using indirection tables and
    /// [`crate::Error::Malformed`] for unreadable names.
    pub fn describe(&self, view: &AssemblyView) -> Result<Vec<MetadataType>> {
        view.with_metadata(|data| LoaderContext::new(data)?.load_types())
    }

    /// Describe the types of an assembly held in memory.
    ///
    /// # Errors
    /// Returns the load error of the image or of its metadata.
    pub fn load_mem(&self, data: Vec<u8>) -> Result<Vec<MetadataType>> {
        let view = AssemblyView::from_mem(data)?;
        self.describe(&view)
    }
}

impl MetadataProvider for CilProvider {
    fn load_types(&self, path: &Path) -> Result<Vec<MetadataType>> {
        log::debug!("Loading {}", path.display());

        let view = AssemblyView::from_file(path)?;
        log::debug!("Runtime version {}", view.runtime_version());

        self.describe(&view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{MemberAccess, MetadataMember, TypeKind, TypeUsageKind, TypeVisibility},
        test::image::{sample_library, table, Cell, ImageBuilder},
        Error, TreeBuilder,
    };

    fn sample_types() -> Vec<MetadataType> {
        CilProvider.load_mem(sample_library()).unwrap()
    }

    fn find<'a>(types: &'a [MetadataType], name: &str) -> &'a MetadataType {
        types.iter().find(|ty| ty.name == name).unwrap()
    }

    fn member_names(ty: &MetadataType) -> Vec<&str> {
        ty.members.iter().map(MetadataMember::name).collect()
    }

    #[test]
    fn types_in_table_order() {
        let types = sample_types();
        let names: Vec<&str> = types.iter().map(|ty| ty.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "TestClass1",
                "TestClass2",
                "TestClass3`1",
                "ITestInterface",
                "TestStruct",
                "TestEnum",
                "Inner",
                "TestList"
            ]
        );
        assert!(types
            .iter()
            .all(|ty| ty.namespace.as_deref() == Some("TestNamespace")));
    }

    #[test]
    fn kinds_and_flags() {
        let types = sample_types();

        assert_eq!(find(&types, "TestClass1").kind, TypeKind::Class);
        assert!(find(&types, "TestClass1").base_type.is_none());
        assert!(find(&types, "TestClass2").is_static());
        assert_eq!(
            find(&types, "TestClass3`1").visibility,
            TypeVisibility::NotPublic
        );
        assert_eq!(find(&types, "ITestInterface").kind, TypeKind::Interface);
        assert_eq!(find(&types, "TestStruct").kind, TypeKind::Struct);
        assert_eq!(find(&types, "TestEnum").kind, TypeKind::Enum);
        assert_eq!(
            find(&types, "Inner").visibility,
            TypeVisibility::NestedPublic
        );

        let test_struct = find(&types, "TestStruct");
        assert!(test_struct.base_type.is_none());
        assert_eq!(test_struct.interfaces.len(), 1);
        assert_eq!(test_struct.interfaces[0].name, "ITestInterface");
        assert_eq!(
            test_struct.interfaces[0].definition,
            Some(find(&types, "ITestInterface").id)
        );

        let base = find(&types, "TestList").base_type.clone().unwrap();
        assert_eq!(base.name, "List`1");
        assert_eq!(base.namespace.as_deref(), Some("System.Collections.Generic"));
        assert_eq!(base.generic_args[0].name, "Int32");
    }

    #[test]
    fn members_skip_accessors_and_constructors() {
        let types = sample_types();

        assert_eq!(
            member_names(find(&types, "TestClass1")),
            vec!["ReturnInt", "ReturnAny"]
        );
        assert_eq!(
            member_names(find(&types, "TestClass3`1")),
            vec!["Prop1", "Prop2", "Prop3", "ReturnT"]
        );
        assert_eq!(
            member_names(find(&types, "TestEnum")),
            vec!["Value1", "Value2", "Value3"]
        );

        let MetadataMember::Property(prop2) = &find(&types, "TestClass3`1").members[1] else {
            panic!("Prop2 is not a property");
        };
        assert_eq!(prop2.getter.unwrap().access, MemberAccess::Public);
        assert_eq!(prop2.setter.unwrap().access, MemberAccess::Private);

        let MetadataMember::Property(prop3) = &find(&types, "TestClass3`1").members[2] else {
            panic!("Prop3 is not a property");
        };
        assert!(prop3.setter.is_none());
    }

    #[test]
    fn methods_and_generics() {
        let types = sample_types();

        let MetadataMember::Method(return_int) = &find(&types, "TestClass1").members[0] else {
            panic!("ReturnInt is not a method");
        };
        assert_eq!(return_int.access, MemberAccess::FamOrAssem);
        let params: Vec<(&str, &str)> = return_int
            .parameters
            .iter()
            .map(|param| (param.name.as_str(), param.parameter_type.name.as_str()))
            .collect();
        assert_eq!(
            params,
            vec![("param1", "Boolean"), ("param2", "Byte"), ("param3", "Char")]
        );

        let MetadataMember::Method(return_any) = &find(&types, "TestClass1").members[1] else {
            panic!("ReturnAny is not a method");
        };
        assert_eq!(return_any.generic_parameters[0].name, "T");
        assert_eq!(return_any.return_type.kind, TypeUsageKind::GenericParameter);
        assert_eq!(return_any.return_type.name, "T");

        let class3 = find(&types, "TestClass3`1");
        let parameter = &class3.generic_parameters[0];
        assert_eq!(parameter.name, "T");
        assert!(parameter.reference_type);
        assert_eq!(parameter.constraints[0].name, "IDisposable");
    }

    #[test]
    fn extension_methods() {
        let types = sample_types();
        let class2 = find(&types, "TestClass2");

        assert!(class2.members.iter().all(MetadataMember::is_extension));
        assert!(find(&types, "TestClass1")
            .members
            .iter()
            .all(|member| !member.is_extension()));

        let MetadataMember::Method(count) = &class2.members[1] else {
            panic!("Count is not a method");
        };
        assert!(count.parameters[0].parameter_type.is_generic_instance());
    }

    #[test]
    fn declaration_tree() {
        let types = sample_types();
        let tree = TreeBuilder::new(&types).build().unwrap();

        let namespaces: Vec<&str> = tree.children().iter().map(|node| node.label()).collect();
        assert_eq!(
            namespaces,
            vec![
                "namespace TestNamespace",
                "namespace System",
                "namespace System.Collections.Generic"
            ]
        );

        let test_namespace = &tree.children()[0];
        let labels: Vec<&str> = test_namespace
            .children()
            .iter()
            .map(|node| node.label())
            .collect();
        assert_eq!(
            labels,
            vec![
                "public class TestClass1",
                "public static class TestClass2",
                "internal class TestClass3`1<T> where T: IDisposable, class",
                "public interface ITestInterface",
                "public struct TestStruct: ITestInterface ",
                "public enum TestEnum",
                "public class Inner",
                "public class TestList: List`1<Int32> ",
            ]
        );

        let class1 = &test_namespace.children()[0];
        assert_eq!(
            class1.children()[0].label(),
            "protected internal Int32 ReturnInt(Boolean param1, Byte param2, Char param3)"
        );
        assert_eq!(class1.children()[1].label(), "private T ReturnAny<T>()");
        assert!(test_namespace.children()[1].children().is_empty());

        let class3 = &test_namespace.children()[2];
        assert_eq!(
            class3.children()[1].label(),
            "public Int32 Prop2 { public get; private set; }"
        );
        assert_eq!(class3.children()[3].label(), "protected T ReturnT()");

        assert_eq!(
            test_namespace.children()[3].children()[0].label(),
            "public abstract Void HelloWorld()"
        );
        assert_eq!(
            test_namespace.children()[6].children()[0].label(),
            "public readonly static String Name"
        );

        let string = &tree.children()[1].children()[0];
        assert_eq!(string.label(), "public class String");
        assert_eq!(
            string.children()[0].label(),
            "public static Void DoNothing(this String str)"
        );

        let list = &tree.children()[2].children()[0];
        assert_eq!(list.label(), "public class List`1<Int32>");
        assert_eq!(
            list.children()[0].label(),
            "public static Int32 Count(this List`1<Int32>)"
        );
    }

    #[test]
    fn indirection_tables_unsupported() {
        let mut image = ImageBuilder::new();
        image.type_def(0, "<Module>", "", 0, 1, 1);
        image.row(table::METHOD_PTR, &[Cell::Short(1)]);

        assert!(matches!(
            CilProvider.load_mem(image.build()),
            Err(Error::NotSupported)
        ));
    }

    #[test]
    fn unresolvable_signature_renders_placeholder() {
        let mut image = ImageBuilder::new();
        image.type_def(0, "<Module>", "", 0, 1, 1);
        image.type_def(0x0010_0001, "Broken", "Demo", 0, 1, 1);
        // Truncated FIELD signature
        image.field(0x0006, "Value", &[0x06]);

        let types = CilProvider.load_mem(image.build()).unwrap();
        assert_eq!(types.len(), 1);

        let MetadataMember::Field(field) = &types[0].members[0] else {
            panic!("Value is not a field");
        };
        assert_eq!(field.field_type.name, "?");
    }

    #[test]
    fn load_errors() {
        assert!(matches!(CilProvider.load_mem(Vec::new()), Err(Error::Empty)));
        assert!(CilProvider.load_mem(vec![0x4D, 0x5A, 0x00, 0x00]).is_err());
        assert!(matches!(
            CilProvider.load_types(Path::new("/nonexistent/assembly.dll")),
            Err(Error::FileError(_))
        ));
    }
}
