use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `InterfaceImpl` table (II.22.23).
#[derive(Clone, Debug)]
pub struct InterfaceImplRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// `InterfaceImpl` token of this row
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// `TypeDef` row of the implementing type
    pub class: u32,
    /// The implemented interface
    pub interface: CodedIndex,
}

impl RowReadable for InterfaceImplRaw {
    const TABLE_ID: TableId = TableId::InterfaceImpl;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(InterfaceImplRaw {
            rid,
            token: Token::new(0x0900_0000 + rid),
            offset: *offset,
            class: read_le_at_dyn(data, offset, sizes.is_large(TableId::TypeDef))?,
            interface: CodedIndex::read(data, offset, sizes, CodedIndexType::TypeDefOrRef)?,
        })
    }
}
