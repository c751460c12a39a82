use std::collections::HashMap;

use crate::{
    declaration::{member_declaration, method_signature, type_declaration, type_usage},
    model::{
        GenericParameter, MetadataMember, MetadataType, TypeId, TypeKind, TypeRef, TypeUsageKind,
        TypeVisibility,
    },
    tree::{ExtensionMethodRecord, TreeNode},
    Result,
};

/// Label of the tree root.
pub const ROOT_LABEL: &str = "Root";

/// Output of the first phase: namespace nodes and the extension methods they left out.
pub struct Namespaces {
    /// Namespace nodes in first-seen order
    pub nodes: Vec<TreeNode>,
    /// Extension methods in collection order
    pub pending: Vec<ExtensionMethodRecord>,
}

/// Assembles the declaration tree of a set of types.
///
/// Building runs in two phases. [`TreeBuilder::namespaces`] groups the types by
/// namespace, renders every type and member and sets extension methods aside.
/// [`TreeBuilder::relocate`] then places each extension method under the type it
/// extends, adding namespace and type nodes where none exist yet.
///
/// # Examples
///
/// ```rust
/// use dotbrowse::model::{MetadataType, TypeId, TypeKind, TypeVisibility};
/// use dotbrowse::TreeBuilder;
///
/// let types = vec![
///     MetadataType::new(TypeId(1), "Widget", Some("Demo"), TypeVisibility::Public, TypeKind::Class),
///     MetadataType::new(TypeId(2), "Helper", Some("Demo"), TypeVisibility::NotPublic, TypeKind::Class),
/// ];
///
/// let tree = TreeBuilder::new(&types).build()?;
/// let namespace = &tree.children()[0];
/// assert_eq!(namespace.label(), "namespace Demo");
/// assert_eq!(namespace.children()[1].label(), "internal class Helper");
/// # Ok::<(), dotbrowse::Error>(())
/// ```
pub struct TreeBuilder<'a> {
    types: &'a [MetadataType],
    definitions: HashMap<TypeId, &'a MetadataType>,
}

impl<'a> TreeBuilder<'a> {
    /// Create a builder over `types`, in the order the provider produced them.
    #[must_use]
    pub fn new(types: &'a [MetadataType]) -> Self {
        TreeBuilder {
            types,
            definitions: types.iter().map(|ty| (ty.id, ty)).collect(),
        }
    }

    /// Build the complete tree.
    ///
    /// # Errors
    /// Returns [`crate::Error::MetadataShape`] if a member cannot be rendered.
    pub fn build(&self) -> Result<TreeNode> {
        let namespaces = self.namespaces()?;
        Ok(self.relocate(namespaces))
    }

    /// Group the types by namespace and render them, deferring extension methods.
    ///
    /// A missing namespace and an empty one form separate groups, both labelled
    /// `namespace `.
    ///
    /// # Errors
    /// Returns [`crate::Error::MetadataShape`] if a member cannot be rendered.
    pub fn namespaces(&self) -> Result<Namespaces> {
        let mut nodes: Vec<TreeNode> = Vec::new();
        let mut index: HashMap<Option<&str>, usize> = HashMap::new();
        let mut pending = Vec::new();

        for ty in self.types {
            let namespace = ty.namespace.as_deref();
            let slot = *index.entry(namespace).or_insert_with(|| {
                nodes.push(TreeNode::new(format!(
                    "namespace {}",
                    namespace.unwrap_or_default()
                )));
                nodes.len() - 1
            });

            let node = self.type_node(ty, &mut pending)?;
            nodes[slot].push(node);
        }

        log::debug!(
            "Grouped {} types into {} namespaces, {} extension methods pending",
            self.types.len(),
            nodes.len(),
            pending.len()
        );

        Ok(Namespaces { nodes, pending })
    }

    fn type_node(
        &self,
        ty: &MetadataType,
        pending: &mut Vec<ExtensionMethodRecord>,
    ) -> Result<TreeNode> {
        let mut node = TreeNode::new(type_declaration(ty));

        for member in &ty.members {
            match member {
                MetadataMember::Method(method) if method.is_extension => {
                    let signature = method_signature(method)?;
                    let Some(first) = method.parameters.first() else {
                        return Err(shape_error!(
                            "Extension method {} has no parameters",
                            method.name
                        ));
                    };

                    log::trace!("Deferring extension method {}.{}", ty.full_name(), method.name);
                    pending.push(ExtensionMethodRecord {
                        signature,
                        extended: first.parameter_type.clone(),
                        generic_parameters: method.generic_parameters.clone(),
                    });
                }
                _ => {
                    node.push(TreeNode::new(member_declaration(member)?));
                }
            }
        }

        Ok(node)
    }

    /// Place every pending extension method under the type it extends and return the root.
    ///
    /// The namespace node is the first one whose label ends with the extended type's
    /// namespace, so `Other.Bar` also matches an extension on a type in `Bar`. Inside it
    /// the type node is matched by its exact declaration. Missing nodes are appended.
    #[must_use]
    pub fn relocate(&self, namespaces: Namespaces) -> TreeNode {
        let mut root = TreeNode::new(ROOT_LABEL);
        for node in namespaces.nodes {
            root.push(node);
        }

        for record in namespaces.pending {
            let declaration =
                self.extended_declaration(&record.extended, &record.generic_parameters);
            let method = TreeNode::new(record.signature);

            let namespace_node = match record.extended.namespace.as_deref() {
                Some(namespace) => root.find_mut(|node| node.label().ends_with(namespace)),
                None => None,
            };

            match namespace_node {
                Some(namespace_node) => {
                    match namespace_node.find_mut(|node| node.label() == declaration) {
                        Some(type_node) => {
                            log::trace!("Relocating {} into {}", method.label(), declaration);
                            type_node.push(method);
                        }
                        None => {
                            log::trace!(
                                "Relocating {} into new type {} under {}",
                                method.label(),
                                declaration,
                                namespace_node.label()
                            );
                            namespace_node.push(TreeNode::new(declaration)).push(method);
                        }
                    }
                }
                None => {
                    let label = format!(
                        "namespace {}",
                        record.extended.namespace.as_deref().unwrap_or_default()
                    );
                    log::trace!("Relocating {} into new {}", method.label(), label);

                    root.push(TreeNode::new(label))
                        .push(TreeNode::new(declaration))
                        .push(method);
                }
            }
        }

        root
    }

    /// Declaration of the type an extension method extends.
    ///
    /// A type of the inspected set renders from its definition, with its generic
    /// parameters replaced by the usage's arguments. Any other type renders as a public
    /// class, struct or primitive shaped after the usage. Arguments that are generic
    /// parameters of the method carry the method's constraints.
    fn extended_declaration(
        &self,
        usage: &TypeRef,
        method_params: &[GenericParameter],
    ) -> String {
        match usage.definition.and_then(|id| self.definitions.get(&id)) {
            Some(definition) => {
                if usage.is_generic_instance() {
                    let instance = instantiate(definition, &usage.generic_args, method_params);
                    type_declaration(&instance)
                } else {
                    type_declaration(definition)
                }
            }
            None => type_declaration(&usage_shape(usage, method_params)),
        }
    }
}

/// The parameter a generic argument stands in for when the instantiation is declared.
fn argument_parameter(arg: &TypeRef, method_params: &[GenericParameter]) -> GenericParameter {
    if arg.is_generic_parameter() {
        if let Some(parameter) = method_params.iter().find(|param| param.name == arg.name) {
            return parameter.clone();
        }
    }

    GenericParameter::new(&type_usage(arg))
}

/// `usage` with every generic parameter of `parameters` replaced by the matching `args`.
fn substitute(usage: &TypeRef, parameters: &[GenericParameter], args: &[TypeRef]) -> TypeRef {
    if usage.is_generic_parameter() {
        let position = parameters.iter().position(|param| param.name == usage.name);
        if let Some(arg) = position.and_then(|position| args.get(position)) {
            return arg.clone();
        }
    }

    let mut substituted = usage.clone();
    substituted.generic_args = usage
        .generic_args
        .iter()
        .map(|arg| substitute(arg, parameters, args))
        .collect();
    substituted
}

/// `definition` instantiated with `args`, parents included.
fn instantiate(
    definition: &MetadataType,
    args: &[TypeRef],
    method_params: &[GenericParameter],
) -> MetadataType {
    let parameters = &definition.generic_parameters;

    let mut instance = definition.clone();
    instance.base_type = definition
        .base_type
        .as_ref()
        .map(|base| substitute(base, parameters, args));
    instance.interfaces = definition
        .interfaces
        .iter()
        .map(|interface| substitute(interface, parameters, args))
        .collect();
    instance.generic_parameters = args
        .iter()
        .map(|arg| argument_parameter(arg, method_params))
        .collect();
    instance
}

fn usage_shape(usage: &TypeRef, method_params: &[GenericParameter]) -> MetadataType {
    let kind = match usage.kind {
        TypeUsageKind::Primitive => TypeKind::Primitive,
        TypeUsageKind::ValueType => TypeKind::Struct,
        TypeUsageKind::Class | TypeUsageKind::GenericParameter => TypeKind::Class,
    };

    let mut shape = MetadataType::new(
        TypeId(0),
        &usage.name,
        usage.namespace.as_deref(),
        TypeVisibility::Public,
        kind,
    );
    shape.generic_parameters = usage
        .generic_args
        .iter()
        .map(|arg| argument_parameter(arg, method_params))
        .collect();
    shape
}
