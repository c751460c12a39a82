//! Metadata root header and stream directory for .NET assemblies.
//!
//! The metadata root (ECMA-335 II.24.2.1) starts with the `BSJB` signature, carries
//! the runtime version string and lists the streams (`#~`, `#Strings`, `#Blob`, ...)
//! by offset and size relative to the root itself.
//!
//! # Example
//!
//! ```rust
//! use dotbrowse::metadata::root::Root;
//! let root = Root::read(&[
//!            0x42, 0x53, 0x4A, 0x42,
//!            0x01, 0x00,
//!            0x01, 0x00,
//!            0x00, 0x00, 0x00, 0x00,
//!            0x04, 0x00, 0x00, 0x00,
//!            b'v', b'4', 0x00, 0x00,
//!            0x00, 0x00,
//!            0x01, 0x00,
//!            0x24, 0x00, 0x00, 0x00, // StreamHeader
//!            0x04, 0x00, 0x00, 0x00,
//!            0x23, 0x7E, 0x00, 0x00,
//!            0x00, 0x00, 0x00, 0x00,
//!        ])?;
//! assert_eq!(root.version, "v4");
//! for stream in &root.stream_headers {
//!     println!("Stream: {} (offset: {}, size: {})", stream.name, stream.offset, stream.size);
//! }
//! # Ok::<(), dotbrowse::Error>(())
//! ```

use crate::{
    file::io::{read_le, read_le_at},
    metadata::streams::StreamHeader,
    Error::OutOfBounds,
    Result,
};

/// Magic signature of the metadata root, `BSJB` in little-endian.
pub const CIL_HEADER_MAGIC: u32 = 0x424A_5342;

/// Upper bound on the number of streams accepted in one root.
const MAX_STREAMS: u16 = 16;

/// The metadata root header.
pub struct Root {
    /// Magic signature, [`CIL_HEADER_MAGIC`]
    pub signature: u32,
    /// Major version, 1
    pub major_version: u16,
    /// Minor version, 1
    pub minor_version: u16,
    /// Runtime version string with the padding stripped, e.g. `v4.0.30319`
    pub version: String,
    /// Reserved flags
    pub flags: u16,
    /// The stream directory in file order
    pub stream_headers: Vec<StreamHeader>,
}

impl Root {
    /// Parse the root and its stream directory.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for a bad signature, version length or
    /// stream count and [`crate::Error::OutOfBounds`] if a stream lies outside `data`.
    pub fn read(data: &[u8]) -> Result<Root> {
        if data.len() < 20 {
            return Err(OutOfBounds);
        }

        let signature = read_le::<u32>(data)?;
        if signature != CIL_HEADER_MAGIC {
            return Err(malformed_error!(
                "CIL_HEADER_MAGIC does not match - {}",
                signature
            ));
        }

        let version_length = read_le_at::<u32>(data, &mut 12)? as usize;
        let Some(version_end) = version_length.checked_add(16) else {
            return Err(malformed_error!(
                "Version string length causing integer overflow - {}",
                version_length
            ));
        };
        if version_end + 4 > data.len() {
            return Err(OutOfBounds);
        }

        let version_bytes = &data[16..version_end];
        let version_str_len = version_bytes
            .iter()
            .position(|byte| *byte == 0)
            .unwrap_or(version_bytes.len());
        let version = String::from_utf8_lossy(&version_bytes[..version_str_len]).into_owned();

        let flags = read_le_at::<u16>(data, &mut version_end.clone())?;
        let stream_count = read_le_at::<u16>(data, &mut (version_end + 2))?;
        if stream_count == 0 || stream_count > MAX_STREAMS {
            return Err(malformed_error!("Invalid stream count - {}", stream_count));
        }

        let mut stream_headers = Vec::with_capacity(stream_count as usize);
        let mut stream_offset = version_end + 4;
        for _ in 0..stream_count {
            if stream_offset > data.len() {
                return Err(OutOfBounds);
            }

            let (new_stream, header_len) = StreamHeader::from(&data[stream_offset..])?;
            match new_stream.offset.checked_add(new_stream.size) {
                Some(range) => {
                    if range as usize > data.len() {
                        return Err(OutOfBounds);
                    }
                }
                None => {
                    return Err(malformed_error!(
                        "Stream offset and size cause integer overflow - {} + {}",
                        new_stream.offset,
                        new_stream.size
                    ))
                }
            }

            stream_offset += header_len;
            stream_headers.push(new_stream);
        }

        Ok(Root {
            signature,
            major_version: read_le::<u16>(&data[4..])?,
            minor_version: read_le::<u16>(&data[6..])?,
            version,
            flags,
            stream_headers,
        })
    }

    /// Find a stream header by name.
    #[must_use]
    pub fn stream(&self, name: &str) -> Option<&StreamHeader> {
        self.stream_headers.iter().find(|stream| stream.name == name)
    }
}
