//! The seam between binary loading and tree building.

use std::path::Path;

use crate::{model::MetadataType, Result};

/// Source of type descriptors for one binary.
///
/// Implementations read the file at a path and describe every type it defines, in a
/// stable order, with each type's declared members. Failures are load errors and are
/// returned to the caller untouched.
///
/// # Examples
///
/// ```rust
/// use dotbrowse::model::{MetadataType, TypeId, TypeKind, TypeVisibility};
/// use dotbrowse::{AssemblyBrowser, MetadataProvider, Result};
/// use std::path::Path;
///
/// struct Fixed;
///
/// impl MetadataProvider for Fixed {
///     fn load_types(&self, _path: &Path) -> Result<Vec<MetadataType>> {
///         Ok(vec![MetadataType::new(TypeId(1), "Widget", Some("Demo"), TypeVisibility::Public, TypeKind::Class)])
///     }
/// }
///
/// let tree = AssemblyBrowser::new(Fixed).parse(Path::new("unused.dll"))?;
/// assert_eq!(tree.children()[0].children()[0].label(), "public class Widget");
/// # Ok::<(), dotbrowse::Error>(())
/// ```
pub trait MetadataProvider {
    /// Describe the types defined in the binary at `path`.
    ///
    /// # Errors
    /// Returns a load error if the file is missing, unreadable or not a supported binary.
    fn load_types(&self, path: &Path) -> Result<Vec<MetadataType>>;
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for &P {
    fn load_types(&self, path: &Path) -> Result<Vec<MetadataType>> {
        (**self).load_types(path)
    }
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for Box<P> {
    fn load_types(&self, path: &Path) -> Result<Vec<MetadataType>> {
        (**self).load_types(path)
    }
}
