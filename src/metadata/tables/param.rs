use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `Param` table (II.22.33).
#[derive(Clone, Debug)]
pub struct ParamRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// `Param` token of this row
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// Parameter attributes
    pub flags: u32,
    /// Position in the signature; 0 is the return value
    pub sequence: u32,
    /// `#Strings` index of the name
    pub name: u32,
}

impl RowReadable for ParamRaw {
    const TABLE_ID: TableId = TableId::Param;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(ParamRaw {
            rid,
            token: Token::new(0x0800_0000 + rid),
            offset: *offset,
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            sequence: u32::from(read_le_at::<u16>(data, offset)?),
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
        })
    }
}
