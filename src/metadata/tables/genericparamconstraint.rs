use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `GenericParamConstraint` table (II.22.21).
#[derive(Clone, Debug)]
pub struct GenericParamConstraintRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// `GenericParamConstraint` token of this row
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// `GenericParam` row being constrained
    pub owner: u32,
    /// The type the parameter is constrained to
    pub constraint: CodedIndex,
}

impl RowReadable for GenericParamConstraintRaw {
    const TABLE_ID: TableId = TableId::GenericParamConstraint;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(GenericParamConstraintRaw {
            rid,
            token: Token::new(0x2C00_0000 + rid),
            offset: *offset,
            owner: read_le_at_dyn(data, offset, sizes.is_large(TableId::GenericParam))?,
            constraint: CodedIndex::read(data, offset, sizes, CodedIndexType::TypeDefOrRef)?,
        })
    }
}
