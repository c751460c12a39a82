// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(clippy::too_many_arguments)]
//#![deny(unsafe_code)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # dotbrowse
//!
//! Browse the declarations of a .NET assembly as a tree.
//!
//! `dotbrowse` reads the ECMA-335 metadata of a .NET PE file and renders what it
//! declares: one node per namespace, one node per type below it, one node per field,
//! property and method below that. Every node is labelled with a source-like
//! declaration (`public static class Helpers`, `protected internal Int32 Count(String text)`).
//! Extension methods are moved under the type they extend, so a `this String`
//! extension declared in `MyLib.Helpers` shows up under `namespace System` /
//! `public class String`.
//!
//! ## Layers
//!
//! - [`file`](File) and [`metadata`] - PE container access and the ECMA-335 tables,
//!   heaps and signatures needed to enumerate types
//! - [`loader`] - [`CilProvider`], the [`MetadataProvider`] turning a binary into
//!   [`model::MetadataType`] descriptors
//! - [`declaration`] - the declaration formatter for types and members
//! - [`tree`] - [`TreeBuilder`], which groups, renders and relocates into a [`TreeNode`]
//! - [`AssemblyBrowser`] - the entry point wiring a provider to the tree builder
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dotbrowse::AssemblyBrowser;
//! use std::path::Path;
//!
//! let tree = AssemblyBrowser::default().parse(Path::new("MyAssembly.dll"))?;
//! for namespace in tree.children() {
//!     println!("{}", namespace.label());
//!     for ty in namespace.children() {
//!         println!("  {} ({} members)", ty.label(), ty.children().len());
//!     }
//! }
//! # Ok::<(), dotbrowse::Error>(())
//! ```
//!
//! Descriptors do not have to come from a binary. Anything implementing
//! [`MetadataProvider`] can feed the browser, and [`TreeBuilder`] works on any slice of
//! [`model::MetadataType`]:
//!
//! ```rust
//! use dotbrowse::model::{MetadataType, TypeId, TypeKind, TypeVisibility};
//! use dotbrowse::TreeBuilder;
//!
//! let types = vec![MetadataType::new(
//!     TypeId(1),
//!     "Color",
//!     Some("Paint"),
//!     TypeVisibility::Public,
//!     TypeKind::Enum,
//! )];
//!
//! let tree = TreeBuilder::new(&types).build()?;
//! assert_eq!(tree.to_string(), "Root\n  namespace Paint\n    public enum Color\n");
//! # Ok::<(), dotbrowse::Error>(())
//! ```
//!
//! ## Errors
//!
//! Everything returns [`Result`]. Failures to read a binary surface unchanged from the
//! provider; [`Error::MetadataShape`] reports descriptors the formatter cannot render.

#[macro_use]
pub(crate) mod error;
pub(crate) mod file;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// ECMA-335 metadata structures: CLI header, metadata root, streams, tables and signatures
pub mod metadata;

/// Descriptors of types and members
pub mod model;

/// Source-like declaration text for types and members
pub mod declaration;

/// The declaration tree and its builder
pub mod tree;

/// Metadata provider reading .NET PE files
pub mod loader;

mod browser;
mod provider;

/// `dotbrowse` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

pub use error::Error;

/// Entry point: parse a binary into its declaration tree.
pub use browser::AssemblyBrowser;

/// Source of type descriptors.
pub use provider::MetadataProvider;

/// The provider for .NET PE files.
pub use loader::CilProvider;

/// Tree types.
pub use tree::{TreeBuilder, TreeNode};

/// Raw access to a loaded PE image.
///
/// # Example
///
/// ```rust,no_run
/// use dotbrowse::File;
/// let file = File::from_file(std::path::Path::new("MyAssembly.dll"))?;
/// println!("Loaded {} bytes", file.len());
/// # Ok::<(), dotbrowse::Error>(())
/// ```
pub use file::File;

/// Reader for blobs and signatures.
pub use file::parser::Parser;
