use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `CustomAttribute` table (II.22.10).
#[derive(Clone, Debug)]
pub struct CustomAttributeRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// `CustomAttribute` token of this row
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// The entity the attribute is attached to
    pub parent: CodedIndex,
    /// Constructor of the attribute, a `MethodDef` or `MemberRef`
    pub constructor: CodedIndex,
    /// `#Blob` index of the encoded arguments
    pub value: u32,
}

impl RowReadable for CustomAttributeRaw {
    const TABLE_ID: TableId = TableId::CustomAttribute;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(CustomAttributeRaw {
            rid,
            token: Token::new(0x0C00_0000 + rid),
            offset: *offset,
            parent: CodedIndex::read(data, offset, sizes, CodedIndexType::HasCustomAttribute)?,
            constructor: CodedIndex::read(
                data,
                offset,
                sizes,
                CodedIndexType::CustomAttributeType,
            )?,
            value: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
        })
    }
}
