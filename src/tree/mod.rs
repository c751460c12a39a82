//! Assembly of the declaration tree.
//!
//! [`TreeBuilder`] turns the flat list of [`crate::model::MetadataType`]s a provider
//! returns into a [`TreeNode`] hierarchy of namespaces, types and members, and moves
//! extension methods under the types they extend.

mod builder;
mod extension;
mod node;

pub use builder::{Namespaces, TreeBuilder, ROOT_LABEL};
pub use extension::ExtensionMethodRecord;
pub use node::TreeNode;
