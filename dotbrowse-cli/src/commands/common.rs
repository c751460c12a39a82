use std::path::Path;

use anyhow::Context;
use dotbrowse::{model::MetadataType, AssemblyBrowser, CilProvider, MetadataProvider, TreeNode};

/// Load the declaration tree of a .NET assembly.
pub fn load_tree(path: &Path) -> anyhow::Result<TreeNode> {
    AssemblyBrowser::default()
        .parse(path)
        .with_context(|| format!("failed to load assembly: {}", path.display()))
}

/// Load the type descriptors of a .NET assembly.
pub fn load_types(path: &Path) -> anyhow::Result<Vec<MetadataType>> {
    CilProvider
        .load_types(path)
        .with_context(|| format!("failed to load assembly: {}", path.display()))
}

/// Returns true if `ty` belongs to `namespace`; `""` selects types without one.
pub fn in_namespace(ty: &MetadataType, namespace: &str) -> bool {
    ty.namespace.as_deref().unwrap_or_default() == namespace
}
