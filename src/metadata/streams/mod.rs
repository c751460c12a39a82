//! Metadata streams (ECMA-335 II.24.2).
//!
//! - `#Strings` holds the UTF-8 identifiers referenced by the tables ([`Strings`]).
//! - `#Blob` holds signatures and other length-prefixed data ([`Blob`]).
//! - `#~` holds the compressed metadata tables ([`TablesHeader`]).
//!
//! The `#US` and `#GUID` heaps are located but never read.

mod blob;
mod streamheader;
mod strings;
mod tablesheader;

pub use blob::Blob;
pub use streamheader::StreamHeader;
pub use strings::Strings;
pub use tablesheader::TablesHeader;
