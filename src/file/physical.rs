//! Memory-mapped files.
//!
//! [`Physical`] maps an assembly with `memmap2`, so large framework assemblies are
//! paged in on demand instead of read up front.

use std::{fs, path::Path};

use memmap2::Mmap;

use super::Backend;
use crate::{Error::FileError, Result};

/// Read-only mapping of a file on disk.
#[derive(Debug)]
pub struct Physical {
    map: Mmap,
}

impl Physical {
    /// Open and map the file at `path`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or mapped.
    pub fn new(path: &Path) -> Result<Physical> {
        let file = fs::File::open(path).map_err(FileError)?;
        log::trace!("Mapping {}", path.display());

        // Read-only mapping; the map keeps its own handle to the file.
        let map = unsafe { Mmap::map(&file) }.map_err(FileError)?;

        Ok(Physical { map })
    }
}

impl Backend for Physical {
    fn data(&self) -> &[u8] {
        &self.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_file() {
        let path = std::env::temp_dir().join(format!("dotbrowse-physical-{}.bin", std::process::id()));
        std::fs::write(&path, [0x4D, 0x5A, 0x90, 0x00, 0x03, 0x00]).unwrap();

        let physical = Physical::new(&path).unwrap();
        assert_eq!(physical.len(), 6);
        assert_eq!(physical.data_slice(0, 2).unwrap(), b"MZ");
        assert_eq!(physical.data_slice(2, 3).unwrap(), &[0x90, 0x00, 0x03]);
        assert!(physical.data_slice(4, 3).is_err());

        drop(physical);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file() {
        match Physical::new(Path::new("/nonexistent/path/to/file.dll")) {
            Err(FileError(error)) => assert_eq!(error.kind(), std::io::ErrorKind::NotFound),
            _ => panic!("expected a FileError"),
        }
    }
}
