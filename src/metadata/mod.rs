//! ECMA-335 metadata reader.
//!
//! The pieces here decode just enough of a .NET image to enumerate its types and
//! members: the CLI header ([`cor20header`]), the metadata root and its stream
//! directory ([`root`]), the `#Strings`, `#Blob` and `#~` streams ([`streams`]), the
//! table rows ([`tables`]) and the signature blobs ([`signatures`]).
//!
//! # Examples
//!
//! ```rust,no_run
//! use dotbrowse::metadata::{cor20header::Cor20Header, root::Root};
//! use dotbrowse::File;
//! use std::path::Path;
//!
//! let file = File::from_file(Path::new("MyAssembly.dll"))?;
//! let (clr_rva, clr_size) = file.clr()?;
//! let header = Cor20Header::read(file.data_slice(file.rva_to_offset(clr_rva)?, clr_size)?)?;
//!
//! let root_offset = file.rva_to_offset(header.meta_data_rva as usize)?;
//! let root = Root::read(file.data_slice(root_offset, header.meta_data_size as usize)?)?;
//! for stream in &root.stream_headers {
//!     println!("{} - {} bytes", stream.name, stream.size);
//! }
//! # Ok::<(), dotbrowse::Error>(())
//! ```

/// The CLI header
pub mod cor20header;
/// The metadata root and stream directory
pub mod root;
/// Signature blob decoding
pub mod signatures;
/// Heaps and the table stream
pub mod streams;
/// Metadata table rows
pub mod tables;
/// Metadata tokens
pub mod token;
