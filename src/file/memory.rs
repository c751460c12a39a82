//! Backend for images that were never on disk (tests, fuzzing, embedded payloads).

use super::Backend;

/// Owned byte buffer.
#[derive(Debug)]
pub struct Memory(Vec<u8>);

impl Memory {
    /// Take ownership of `data`.
    pub fn new(data: Vec<u8>) -> Memory {
        Memory(data)
    }
}

impl Backend for Memory {
    fn data(&self) -> &[u8] {
        &self.0
    }
}
