use crate::{file::parser::Parser, Error::OutOfBounds, Result};

/// The `#Blob` heap: length-prefixed binary data such as signatures (ECMA-335 II.24.2.4).
pub struct Blob<'a> {
    data: &'a [u8],
}

impl<'a> Blob<'a> {
    /// Wrap the heap bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the heap is empty or does not start with
    /// the mandatory empty blob.
    pub fn from(data: &'a [u8]) -> Result<Blob<'a>> {
        if data.is_empty() || data[0] != 0 {
            return Err(malformed_error!("Invalid memory for #Blob heap"));
        }

        Ok(Blob { data })
    }

    /// Read the blob starting at `index`, without its length prefix.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the blob exceeds the heap.
    pub fn get(&self, index: usize) -> Result<&'a [u8]> {
        let entry = match self.data.get(index..) {
            Some(entry) if !entry.is_empty() => entry,
            _ => return Err(OutOfBounds),
        };

        let mut parser = Parser::new(entry);
        let len = parser.read_compressed_uint()? as usize;
        let start = parser.pos();

        start
            .checked_add(len)
            .and_then(|end| entry.get(start..end))
            .ok_or(OutOfBounds)
    }
}
