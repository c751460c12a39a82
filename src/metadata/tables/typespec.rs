use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `TypeSpec` table (II.22.39).
#[derive(Clone, Debug)]
pub struct TypeSpecRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// `TypeSpec` token of this row
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// `#Blob` index of the type signature
    pub signature: u32,
}

impl RowReadable for TypeSpecRaw {
    const TABLE_ID: TableId = TableId::TypeSpec;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(TypeSpecRaw {
            rid,
            token: Token::new(0x1B00_0000 + rid),
            offset: *offset,
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
        })
    }
}
