use crate::model::{GenericParameter, TypeRef};

/// An extension method waiting for the relocation pass.
///
/// Collected while the namespace nodes are built and consumed once all of them exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionMethodRecord {
    /// Rendered method signature
    pub signature: String,
    /// Type of the first parameter, the type being extended
    pub extended: TypeRef,
    /// Generic parameters of the method, which may appear in `extended`
    pub generic_parameters: Vec<GenericParameter>,
}
