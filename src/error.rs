use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! shape_error {
    ($msg:expr) => {
        crate::Error::MetadataShape {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::MetadataShape {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which covers every failure this library can return.
///
/// Two families exist. Load errors are raised by the metadata provider while it
/// reads a binary (missing file, invalid PE, damaged metadata) and are handed to the
/// caller unmodified. [`Error::MetadataShape`] is raised by the declaration formatter
/// and the tree builder when a descriptor violates an invariant they rely on, such as a
/// property without accessors or an extension method without parameters.
///
/// # Examples
///
/// ```rust,no_run
/// use dotbrowse::{AssemblyBrowser, Error};
/// use std::path::Path;
///
/// match AssemblyBrowser::default().parse(Path::new("assembly.dll")) {
///     Ok(tree) => println!("{} namespaces", tree.children().len()),
///     Err(Error::FileError(io_err)) => eprintln!("I/O error: {}", io_err),
///     Err(error) if error.is_load_error() => eprintln!("Could not load: {}", error),
///     Err(error) => eprintln!("Internal error: {}", error),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The file is damaged and could not be parsed.
    ///
    /// Carries the source location where the malformation was detected.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while parsing the file.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// This file type is not supported.
    ///
    /// Raised for PE files without a CLR header and for metadata layouts this
    /// reader does not handle (uncompressed `#-` tables, portable PDB tables).
    #[error("This file type is not supported")]
    NotSupported,

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Error from the goblin crate during PE parsing.
    #[error("{0}")]
    GoblinErr(#[from] goblin::error::Error),

    /// Recursion limit reached while decoding a signature.
    ///
    /// The associated value shows the recursion limit that was reached.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    /// A metadata descriptor violates an invariant the formatter relies on.
    ///
    /// This is an internal error: a provider handed over a descriptor that cannot be
    /// rendered without emitting malformed text.
    #[error("Invalid metadata shape - {file}:{line}: {message}")]
    MetadataShape {
        /// Description of the violated invariant
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },
}

impl Error {
    /// Returns `true` if this error was raised while loading a binary, as opposed to
    /// an internal [`Error::MetadataShape`] violation.
    #[must_use]
    pub fn is_load_error(&self) -> bool {
        !matches!(self, Error::MetadataShape { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(Error::OutOfBounds.is_load_error());
        assert!(Error::Empty.is_load_error());
        assert!(malformed_error!("bad header").is_load_error());
        assert!(!shape_error!("property {} has no accessor", "Foo").is_load_error());
    }

    #[test]
    fn messages_carry_location() {
        let error = shape_error!("extension method {} has no parameters", "Bar");
        let text = error.to_string();
        assert!(text.starts_with("Invalid metadata shape - "));
        assert!(text.contains("src/error.rs"));
        assert!(text.ends_with("extension method Bar has no parameters"));
    }
}
