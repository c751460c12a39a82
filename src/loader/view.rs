use std::path::Path;

use ouroboros::self_referencing;

use crate::{
    metadata::{
        cor20header::Cor20Header,
        root::Root,
        streams::{Blob, Strings, TablesHeader},
    },
    Error::{NotSupported, OutOfBounds},
    File, Result,
};

/// The metadata structures of one assembly, borrowed from its file data.
pub struct AssemblyViewData<'a> {
    /// CLI header
    pub cor20header: Cor20Header,
    /// Metadata root and stream directory
    pub root: Root,
    /// The `#~` stream
    pub tables: TablesHeader<'a>,
    /// The `#Strings` heap
    pub strings: Strings<'a>,
    /// The `#Blob` heap, absent in assemblies without signatures
    pub blobs: Option<Blob<'a>>,
}

impl<'a> AssemblyViewData<'a> {
    /// Locate the CLI header, the metadata root and the streams of `file`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the `#~` or `#Strings` stream is missing,
    /// [`crate::Error::NotSupported`] for uncompressed `#-` metadata and
    /// [`crate::Error::OutOfBounds`] for streams outside the metadata.
    pub fn from_file(file: &'a File) -> Result<Self> {
        let (clr_rva, clr_size) = file.clr()?;
        let clr_offset = file.rva_to_offset(clr_rva)?;
        let cor20header = Cor20Header::read(file.data_slice(clr_offset, clr_size)?)?;

        let metadata_offset = file.rva_to_offset(cor20header.meta_data_rva as usize)?;
        let metadata = file.data_slice(metadata_offset, cor20header.meta_data_size as usize)?;
        let root = Root::read(metadata)?;
        log::debug!(
            "Metadata root {} with {} streams",
            root.version,
            root.stream_headers.len()
        );

        let mut tables = None;
        let mut strings = None;
        let mut blobs = None;

        for stream in &root.stream_headers {
            let start = stream.offset as usize;
            let Some(stream_data) = start
                .checked_add(stream.size as usize)
                .and_then(|end| metadata.get(start..end))
            else {
                return Err(OutOfBounds);
            };

            match stream.name.as_str() {
                "#~" => tables = Some(TablesHeader::from(stream_data)?),
                "#-" => {
                    log::warn!("Uncompressed #- metadata tables are not supported");
                    return Err(NotSupported);
                }
                "#Strings" => strings = Some(Strings::from(stream_data)?),
                "#Blob" => blobs = Some(Blob::from(stream_data)?),
                name => log::trace!("Skipping stream {} ({} bytes)", name, stream.size),
            }
        }

        let Some(tables) = tables else {
            return Err(malformed_error!("Metadata has no #~ stream"));
        };
        let Some(strings) = strings else {
            return Err(malformed_error!("Metadata has no #Strings stream"));
        };

        Ok(AssemblyViewData {
            cor20header,
            root,
            tables,
            strings,
            blobs,
        })
    }
}

/// A loaded assembly together with the metadata views into its bytes.
#[self_referencing]
pub struct AssemblyView {
    file: File,
    #[borrows(file)]
    #[not_covariant]
    data: AssemblyViewData<'this>,
}

impl AssemblyView {
    /// Load and index the assembly at `path`.
    ///
    /// # Errors
    /// Returns the load error of the file or of its metadata.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::load(File::from_file(path)?)
    }

    /// Index an assembly held in memory.
    ///
    /// # Errors
    /// Returns the load error of the image or of its metadata.
    pub fn from_mem(data: Vec<u8>) -> Result<Self> {
        Self::load(File::from_mem(data)?)
    }

    fn load(file: File) -> Result<Self> {
        AssemblyView::try_new(file, |file| AssemblyViewData::from_file(file))
    }

    /// Runtime version string of the metadata root.
    #[must_use]
    pub fn runtime_version(&self) -> String {
        self.with_data(|data| data.root.version.clone())
    }

    /// Run `f` with the metadata views.
    pub fn with_metadata<R>(&self, f: impl FnOnce(&AssemblyViewData<'_>) -> R) -> R {
        self.with_data(|data| f(data))
    }
}
