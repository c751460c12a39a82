use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `Property` table (II.22.34).
#[derive(Clone, Debug)]
pub struct PropertyRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// `Property` token of this row
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// Property attributes
    pub flags: u32,
    /// `#Strings` index of the name
    pub name: u32,
    /// `#Blob` index of the property signature
    pub signature: u32,
}

impl RowReadable for PropertyRaw {
    const TABLE_ID: TableId = TableId::Property;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(PropertyRaw {
            rid,
            token: Token::new(0x1700_0000 + rid),
            offset: *offset,
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
        })
    }
}
