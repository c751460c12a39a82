//! PE container access for .NET assemblies.
//!
//! [`File`] owns the raw bytes of an assembly (memory-mapped from disk or held in a
//! buffer) together with the `goblin` PE view borrowed from them. It validates that a
//! CLR runtime header is present and offers the address translation the metadata
//! reader needs to locate the CLI header and the metadata root.
//!
//! # Examples
//!
//! ```rust,no_run
//! use dotbrowse::File;
//! use std::path::Path;
//!
//! let file = File::from_file(Path::new("MyAssembly.dll"))?;
//! let (clr_rva, clr_size) = file.clr()?;
//! let clr_offset = file.rva_to_offset(clr_rva)?;
//! let clr_header = file.data_slice(clr_offset, clr_size)?;
//! # Ok::<(), dotbrowse::Error>(())
//! ```

/// Little-endian reads of primitive values
pub mod io;
/// Cursor over metadata blobs
pub mod parser;

mod memory;
mod physical;

use std::path::Path;

use crate::{
    Error::{Empty, GoblinErr, NotSupported, OutOfBounds},
    Result,
};
use goblin::pe::PE;
use memory::Memory;
use ouroboros::self_referencing;
use physical::Physical;

/// Storage abstraction for the bytes of an assembly.
///
/// Backends only hand out their complete data; bounds-checked access is shared.
pub trait Backend: Send + Sync {
    /// Returns the complete data.
    fn data(&self) -> &[u8];

    /// Returns the total size in bytes.
    fn len(&self) -> usize {
        self.data().len()
    }

    /// Returns `len` bytes starting at `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range exceeds the data.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        offset
            .checked_add(len)
            .and_then(|end| self.data().get(offset..end))
            .ok_or(OutOfBounds)
    }
}

/// A loaded PE image with a CLR runtime header.
#[self_referencing]
pub struct File {
    data: Box<dyn Backend>,
    #[borrows(data)]
    #[not_covariant]
    pe: PE<'this>,
}

impl File {
    /// Memory-map and parse the file at `file`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be read,
    /// [`crate::Error::GoblinErr`] if it is not a PE image, and
    /// [`crate::Error::NotSupported`] if the image has no CLR runtime header.
    pub fn from_file(file: &Path) -> Result<File> {
        let input = Physical::new(file)?;

        Self::load(input)
    }

    /// Parse an image already held in memory.
    ///
    /// # Errors
    /// Same as [`File::from_file`], minus the I/O failures.
    pub fn from_mem(data: Vec<u8>) -> Result<File> {
        let input = Memory::new(data);

        Self::load(input)
    }

    fn load<T: Backend + 'static>(data: T) -> Result<File> {
        if data.len() == 0 {
            return Err(Empty);
        }

        let data: Box<dyn Backend> = Box::new(data);

        File::try_new(data, |data| match PE::parse(data.data()) {
            Ok(pe) => match pe.header.optional_header {
                Some(optional_header) => {
                    if optional_header
                        .data_directories
                        .get_clr_runtime_header()
                        .is_none()
                    {
                        log::debug!("PE image has no CLR runtime header directory");
                        Err(NotSupported)
                    } else {
                        Ok(pe)
                    }
                }
                None => Err(malformed_error!("File does not have an OptionalHeader")),
            },
            Err(error) => Err(GoblinErr(error)),
        })
    }

    /// Size of the image in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data().len()
    }

    /// Returns `true` if the image holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The complete image.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.with_data(|data| data.data())
    }

    /// Returns `len` bytes starting at file offset `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range exceeds the image.
    pub fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.with_data(|data| data.data_slice(offset, len))
    }

    /// RVA and size of the CLR runtime header (COR20) directory.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotSupported`] if the directory is missing.
    pub fn clr(&self) -> Result<(usize, usize)> {
        self.with_pe(|pe| {
            pe.header
                .optional_header
                .and_then(|optional_header| {
                    optional_header
                        .data_directories
                        .get_clr_runtime_header()
                        .map(|clr_dir| (clr_dir.virtual_address as usize, clr_dir.size as usize))
                })
                .ok_or(NotSupported)
        })
    }

    /// Translate a relative virtual address into a file offset.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if no section contains `rva`.
    pub fn rva_to_offset(&self, rva: usize) -> Result<usize> {
        self.with_pe(|pe| {
            for section in &pe.sections {
                let extent = section.virtual_size.max(section.size_of_raw_data);
                let Some(section_max) = section.virtual_address.checked_add(extent) else {
                    return Err(malformed_error!(
                        "Section malformed, causing integer overflow - {} + {}",
                        section.virtual_address,
                        extent
                    ));
                };

                let rva_u32 = u32::try_from(rva)
                    .map_err(|_| malformed_error!("RVA too large to fit in u32: {}", rva))?;
                if section.virtual_address <= rva_u32 && section_max > rva_u32 {
                    return Ok((rva - section.virtual_address as usize)
                        + section.pointer_to_raw_data as usize);
                }
            }

            Err(malformed_error!(
                "RVA could not be converted to offset - {}",
                rva
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert!(matches!(File::from_mem(Vec::new()), Err(Empty)));
    }

    #[test]
    fn not_a_pe() {
        let result = File::from_mem(vec![0x00; 256]);
        assert!(matches!(result, Err(GoblinErr(_))));
    }

    #[test]
    fn missing_file() {
        let result = File::from_file(Path::new("/nonexistent/path/assembly.dll"));
        assert!(matches!(result, Err(crate::Error::FileError(_))));
    }
}
