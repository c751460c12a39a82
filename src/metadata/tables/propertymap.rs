use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `PropertyMap` table (II.22.35).
#[derive(Clone, Debug)]
pub struct PropertyMapRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// `PropertyMap` token of this row
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// `TypeDef` row owning the properties
    pub parent: u32,
    /// First row of the owner's run in the `Property` table
    pub property_list: u32,
}

impl RowReadable for PropertyMapRaw {
    const TABLE_ID: TableId = TableId::PropertyMap;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(PropertyMapRaw {
            rid,
            token: Token::new(0x1500_0000 + rid),
            offset: *offset,
            parent: read_le_at_dyn(data, offset, sizes.is_large(TableId::TypeDef))?,
            property_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::Property))?,
        })
    }
}
