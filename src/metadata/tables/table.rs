use std::marker::PhantomData;

use crate::{
    metadata::tables::{TableId, TableInfoRef},
    Error::OutOfBounds,
    Result,
};

/// A row type that can be decoded from the `#~` stream.
pub trait RowReadable: Sized {
    /// The table this row type belongs to.
    const TABLE_ID: TableId;

    /// Decode the row `rid` at `offset`, advancing `offset` past it.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the row is truncated.
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self>;
}

/// Typed view over the rows of one metadata table.
///
/// Rows are decoded on access; the view itself only borrows the table bytes.
pub struct MetadataTable<'a, T> {
    data: &'a [u8],
    row_count: u32,
    row_size: usize,
    sizes: TableInfoRef,
    _row: PhantomData<T>,
}

impl<'a, T: RowReadable> MetadataTable<'a, T> {
    /// View `row_count` rows at the start of `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `data` cannot hold every row.
    pub fn new(data: &'a [u8], row_count: u32, sizes: TableInfoRef) -> Result<Self> {
        let row_size = sizes.row_size(T::TABLE_ID) as usize;
        match row_size.checked_mul(row_count as usize) {
            Some(needed) if needed <= data.len() => Ok(MetadataTable {
                data,
                row_count,
                row_size,
                sizes,
                _row: PhantomData,
            }),
            _ => Err(OutOfBounds),
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Decode the row `rid` (1-based).
    #[must_use]
    pub fn get(&self, rid: u32) -> Option<T> {
        if rid == 0 || rid > self.row_count {
            return None;
        }

        let mut offset = (rid as usize - 1) * self.row_size;
        T::row_read(self.data, &mut offset, rid, &self.sizes).ok()
    }

    /// Rows in table order, stopping at the first undecodable one.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (1..=self.row_count).map_while(|rid| self.get(rid))
    }
}
