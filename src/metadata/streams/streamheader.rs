use crate::{file::io::read_le, Error::OutOfBounds, Result};

/// Longest stream name accepted, including the terminator.
const MAX_NAME_LEN: usize = 32;

/// One entry of the stream directory in the metadata root (ECMA-335 II.24.2.2).
pub struct StreamHeader {
    /// Offset of the stream relative to the metadata root
    pub offset: u32,
    /// Size of the stream in bytes
    pub size: u32,
    /// Stream name, e.g. `#~` or `#Strings`
    pub name: String,
}

impl StreamHeader {
    /// Parse a header from the start of `data`.
    ///
    /// Returns the header and the number of bytes it occupies, including the name
    /// padding to a 4-byte boundary.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for truncated input and
    /// [`crate::Error::Malformed`] for an unterminated or non-ASCII name.
    pub fn from(data: &[u8]) -> Result<(StreamHeader, usize)> {
        if data.len() < 9 {
            return Err(OutOfBounds);
        }

        let name_area = &data[8..data.len().min(8 + MAX_NAME_LEN)];
        let Some(name_len) = name_area.iter().position(|byte| *byte == 0) else {
            return Err(malformed_error!("Stream header name is not terminated"));
        };

        let name_bytes = &name_area[..name_len];
        if !name_bytes.is_ascii() {
            return Err(malformed_error!("Stream header name is not ASCII"));
        }

        let name_aligned = (name_len + 1 + 3) & !3;
        let header = StreamHeader {
            offset: read_le::<u32>(data)?,
            size: read_le::<u32>(&data[4..])?,
            name: name_bytes.iter().map(|byte| char::from(*byte)).collect(),
        };

        Ok((header, 8 + name_aligned))
    }
}
