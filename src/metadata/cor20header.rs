//! CLR 2.0 (Cor20) header parsing for .NET assemblies.
//!
//! The header lives in the IMAGE_DIRECTORY_ENTRY_COM_DESCRIPTOR data directory and
//! points at the metadata root.
//!
//! # Reference
//! - [ECMA-335 II.25.3.3](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

use crate::{file::parser::Parser, Error::OutOfBounds, Result};

/// The fields of the CLI header this reader consumes.
pub struct Cor20Header {
    /// Size of the header in bytes, always 72
    pub cb: u32,
    /// Major runtime version required
    pub major_runtime_version: u16,
    /// Minor runtime version required
    pub minor_runtime_version: u16,
    /// RVA of the metadata root
    pub meta_data_rva: u32,
    /// Size of the metadata in bytes
    pub meta_data_size: u32,
    /// Runtime flags (`COMIMAGE_FLAGS_*`)
    pub flags: u32,
    /// Entry point token or RVA
    pub entry_point_token: u32,
}

impl Cor20Header {
    /// Parse the header from the start of `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for short input and
    /// [`crate::Error::Malformed`] for an invalid size or metadata location.
    pub fn read(data: &[u8]) -> Result<Cor20Header> {
        if data.len() < 72 {
            return Err(OutOfBounds);
        }

        let mut parser = Parser::new(data);

        let cb = parser.read_le::<u32>()?;
        if cb != 72 {
            return Err(malformed_error!(
                "Invalid CLR header size: expected 72, got {}",
                cb
            ));
        }

        let major_runtime_version = parser.read_le::<u16>()?;
        let minor_runtime_version = parser.read_le::<u16>()?;

        let meta_data_rva = parser.read_le::<u32>()?;
        if meta_data_rva == 0 {
            return Err(malformed_error!("Metadata RVA cannot be zero"));
        }

        let meta_data_size = parser.read_le::<u32>()?;
        if meta_data_size == 0 {
            return Err(malformed_error!("Metadata size cannot be zero"));
        } else if meta_data_size > 0x1000_0000 {
            return Err(malformed_error!(
                "Metadata size {} exceeds reasonable limit (256MB)",
                meta_data_size
            ));
        }

        let flags = parser.read_le::<u32>()?;
        let entry_point_token = parser.read_le::<u32>()?;

        Ok(Cor20Header {
            cb,
            major_runtime_version,
            minor_runtime_version,
            meta_data_rva,
            meta_data_size,
            flags,
            entry_point_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    const HEADER_BYTES: [u8; 72] = [
        0x48, 0x00, 0x00, 0x00, // cb = 72 (0x48)
        0x02, 0x00,             // major_runtime_version = 2
        0x05, 0x00,             // minor_runtime_version = 5
        0x70, 0x20, 0x00, 0x00, // meta_data_rva = 0x2070
        0x34, 0x12, 0x00, 0x00, // meta_data_size = 0x1234
        0x01, 0x00, 0x02, 0x00, // flags = ILONLY | 32BITPREFERRED
        0x01, 0x00, 0x00, 0x06, // entry_point_token = 0x06000001
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn crafted() {
        let parsed_header = Cor20Header::read(&HEADER_BYTES).unwrap();

        assert_eq!(parsed_header.cb, 72);
        assert_eq!(parsed_header.major_runtime_version, 2);
        assert_eq!(parsed_header.minor_runtime_version, 5);
        assert_eq!(parsed_header.meta_data_rva, 0x2070);
        assert_eq!(parsed_header.meta_data_size, 0x1234);
        assert_eq!(parsed_header.flags, 0x0002_0001);
        assert_eq!(parsed_header.entry_point_token, 0x0600_0001);
    }

    #[test]
    fn invalid() {
        assert!(matches!(
            Cor20Header::read(&HEADER_BYTES[..40]),
            Err(OutOfBounds)
        ));

        let mut bad_size = HEADER_BYTES;
        bad_size[0] = 0x40;
        assert!(Cor20Header::read(&bad_size).is_err());

        let mut no_metadata = HEADER_BYTES;
        no_metadata[8..12].copy_from_slice(&[0, 0, 0, 0]);
        assert!(Cor20Header::read(&no_metadata).is_err());
    }
}
