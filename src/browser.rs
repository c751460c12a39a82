//! The top-level entry point.

use std::path::Path;

use crate::{
    loader::CilProvider,
    provider::MetadataProvider,
    tree::{TreeBuilder, TreeNode},
    Result,
};

/// Turns a binary into its declaration tree.
///
/// The browser owns a [`MetadataProvider`] and runs it once per [`AssemblyBrowser::parse`]
/// call; nothing is cached between calls.
///
/// # Examples
///
/// ```rust,no_run
/// use dotbrowse::AssemblyBrowser;
/// use std::path::Path;
///
/// let tree = AssemblyBrowser::default().parse(Path::new("MyLibrary.dll"))?;
/// print!("{}", tree);
/// # Ok::<(), dotbrowse::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct AssemblyBrowser<P = CilProvider> {
    provider: P,
}

impl Default for AssemblyBrowser {
    fn default() -> Self {
        AssemblyBrowser {
            provider: CilProvider,
        }
    }
}

impl<P: MetadataProvider> AssemblyBrowser<P> {
    /// Create a browser reading binaries through `provider`.
    pub fn new(provider: P) -> Self {
        AssemblyBrowser { provider }
    }

    /// The provider this browser reads through.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Load the binary at `path` and build its declaration tree.
    ///
    /// # Errors
    /// Returns the provider's load error unchanged, or [`crate::Error::MetadataShape`]
    /// if a descriptor cannot be rendered.
    pub fn parse(&self, path: &Path) -> Result<TreeNode> {
        let types = self.provider.load_types(path)?;
        log::debug!("Loaded {} types from {}", types.len(), path.display());

        TreeBuilder::new(&types).build()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::{model::MetadataType, test::test_types, Error};

    struct FixtureProvider {
        calls: Cell<usize>,
    }

    impl MetadataProvider for FixtureProvider {
        fn load_types(&self, _path: &Path) -> Result<Vec<MetadataType>> {
            self.calls.set(self.calls.get() + 1);
            Ok(test_types())
        }
    }

    struct FailingProvider;

    impl MetadataProvider for FailingProvider {
        fn load_types(&self, _path: &Path) -> Result<Vec<MetadataType>> {
            Err(Error::NotSupported)
        }
    }

    #[test]
    fn parse_runs_provider_once() {
        let browser = AssemblyBrowser::new(FixtureProvider {
            calls: Cell::new(0),
        });

        let first = browser.parse(Path::new("fixture.dll")).unwrap();
        assert_eq!(browser.provider().calls.get(), 1);

        let second = browser.parse(Path::new("fixture.dll")).unwrap();
        assert_eq!(browser.provider().calls.get(), 2);
        assert_eq!(first, second);

        assert!(first.find("namespace TestNamespace").is_some());
        assert!(first.find("namespace System").is_some());
    }

    #[test]
    fn load_errors_pass_through() {
        let browser = AssemblyBrowser::new(FailingProvider);
        assert!(matches!(
            browser.parse(Path::new("broken.dll")),
            Err(Error::NotSupported)
        ));
    }

    #[test]
    fn default_provider_reports_missing_files() {
        let result = AssemblyBrowser::default().parse(Path::new("/nonexistent/library.dll"));
        assert!(matches!(result, Err(Error::FileError(_))));
    }
}
