//! Cursor-based reader for metadata blobs and signatures.
//!
//! [`Parser`] wraps a byte slice with a position and knows the ECMA-335 compressed
//! integer encodings (II.23.2) used throughout the `#Blob` heap.

use crate::{
    file::io::{read_le_at, CilIO},
    metadata::token::Token,
    Error::OutOfBounds,
    Result,
};

/// A forward-only reader over a byte slice.
///
/// # Examples
///
/// ```rust
/// use dotbrowse::Parser;
///
/// let data = [0x81, 0x00, 0x05];
/// let mut parser = Parser::new(&data);
/// assert_eq!(parser.read_compressed_uint().unwrap(), 0x100);
/// assert_eq!(parser.read_compressed_uint().unwrap(), 5);
/// assert!(!parser.has_more_data());
/// ```
pub struct Parser<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new [`Parser`] positioned at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Returns `true` while unread bytes remain.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Current position within the buffer.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Skip a single byte.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] at the end of the buffer.
    pub fn advance(&mut self) -> Result<()> {
        if self.position >= self.data.len() {
            return Err(OutOfBounds);
        }

        self.position += 1;
        Ok(())
    }

    /// Look at the next byte without consuming it.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] at the end of the buffer.
    pub fn peek_byte(&self) -> Result<u8> {
        self.data.get(self.position).copied().ok_or(OutOfBounds)
    }

    /// Read a little-endian value and advance past it.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if not enough bytes remain.
    pub fn read_le<T: CilIO>(&mut self) -> Result<T> {
        read_le_at::<T>(self.data, &mut self.position)
    }

    /// Read a compressed unsigned integer (1, 2 or 4 bytes).
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for an invalid lead byte and
    /// [`crate::Error::OutOfBounds`] for a truncated value.
    pub fn read_compressed_uint(&mut self) -> Result<u32> {
        let first_byte = self.read_le::<u8>()?;

        // 1-byte encoding: 0xxxxxxx
        if (first_byte & 0x80) == 0 {
            return Ok(u32::from(first_byte));
        }

        // 2-byte encoding: 10xxxxxx xxxxxxxx
        if (first_byte & 0xC0) == 0x80 {
            let second_byte = self.read_le::<u8>()?;
            let value = ((u32::from(first_byte) & 0x3F) << 8) | u32::from(second_byte);
            return Ok(value);
        }

        // 4-byte encoding: 110xxxxx xxxxxxxx xxxxxxxx xxxxxxxx
        if (first_byte & 0xE0) == 0xC0 {
            let b1 = u32::from(self.read_le::<u8>()?);
            let b2 = u32::from(self.read_le::<u8>()?);
            let b3 = u32::from(self.read_le::<u8>()?);
            let value = ((u32::from(first_byte) & 0x1F) << 24) | (b1 << 16) | (b2 << 8) | b3;
            return Ok(value);
        }

        Err(malformed_error!("Invalid compressed uint - {}", first_byte))
    }

    /// Read a `TypeDefOrRefOrSpecEncoded` token (II.23.2.8).
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the table tag is invalid.
    pub fn read_compressed_token(&mut self) -> Result<Token> {
        let compressed_token = self.read_compressed_uint()?;

        let table: u32 = match compressed_token & 0x3 {
            0x0 => 0x0200_0000, // TypeDef
            0x1 => 0x0100_0000, // TypeRef
            0x2 => 0x1B00_0000, // TypeSpec
            _ => {
                return Err(malformed_error!(
                    "Invalid compressed token - {}",
                    compressed_token
                ))
            }
        };

        Ok(Token::new(table + (compressed_token >> 2)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compressed_uint() {
        let test_cases = [
            (vec![0x03], 0x03),
            (vec![0x7F], 0x7F),
            (vec![0x80, 0x80], 0x80),
            (vec![0xAE, 0x57], 0x2E57),
            (vec![0xBF, 0xFF], 0x3FFF),
            (vec![0xC0, 0x00, 0x40, 0x00], 0x4000),
            (vec![0xDF, 0xFF, 0xFF, 0xFF], 0x1FFF_FFFF),
        ];

        for (bytes, expected) in test_cases {
            let mut parser = Parser::new(&bytes);
            assert_eq!(parser.read_compressed_uint().unwrap(), expected);
            assert!(!parser.has_more_data());
        }
    }

    #[test]
    fn compressed_uint_invalid() {
        let mut parser = Parser::new(&[0xFF, 0x00, 0x00, 0x00]);
        assert!(parser.read_compressed_uint().is_err());

        let mut parser = Parser::new(&[0x80]);
        assert!(matches!(parser.read_compressed_uint(), Err(OutOfBounds)));
    }

    #[test]
    fn compressed_token() {
        let mut parser = Parser::new(&[0x49, 0x42, 0x0A]);
        assert_eq!(parser.read_compressed_token().unwrap(), Token::new(0x0100_0012));
        assert_eq!(parser.read_compressed_token().unwrap(), Token::new(0x1B00_0010));
        assert_eq!(parser.read_compressed_token().unwrap(), Token::new(0x1B00_0002));

        let mut parser = Parser::new(&[0x03]);
        assert!(parser.read_compressed_token().is_err());
    }

    #[test]
    fn peek_and_advance() {
        let mut parser = Parser::new(&[0x10, 0x20]);
        assert_eq!(parser.peek_byte().unwrap(), 0x10);
        parser.advance().unwrap();
        assert_eq!(parser.pos(), 1);
        assert_eq!(parser.read_le::<u8>().unwrap(), 0x20);
        assert!(parser.peek_byte().is_err());
        assert!(parser.advance().is_err());
    }
}
