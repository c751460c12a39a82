use bitflags::bitflags;

use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

bitflags! {
    #[derive(PartialEq, Eq, Debug, Clone, Copy)]
    /// Variance and special constraints of a generic parameter (II.23.1.7).
    pub struct GenericParamAttributes: u32 {
        /// Parameter is covariant
        const COVARIANT = 0x0001;
        /// Parameter is contravariant
        const CONTRAVARIANT = 0x0002;
        /// `class` constraint
        const REFERENCE_TYPE_CONSTRAINT = 0x0004;
        /// `struct` constraint
        const NOT_NULLABLE_VALUE_TYPE_CONSTRAINT = 0x0008;
        /// `new()` constraint
        const DEFAULT_CONSTRUCTOR_CONSTRAINT = 0x0010;
    }
}

/// A row of the `GenericParam` table (II.22.20).
#[derive(Clone, Debug)]
pub struct GenericParamRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// `GenericParam` token of this row
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// 0-based position in the owner's parameter list
    pub number: u32,
    /// Variance and constraint flags
    pub flags: u32,
    /// The owning `TypeDef` or `MethodDef`
    pub owner: CodedIndex,
    /// `#Strings` index of the name
    pub name: u32,
}

impl GenericParamRaw {
    /// The bits of `flags` as [`GenericParamAttributes`].
    #[must_use]
    pub fn attributes(&self) -> GenericParamAttributes {
        GenericParamAttributes::from_bits_truncate(self.flags)
    }
}

impl RowReadable for GenericParamRaw {
    const TABLE_ID: TableId = TableId::GenericParam;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(GenericParamRaw {
            rid,
            token: Token::new(0x2A00_0000 + rid),
            offset: *offset,
            number: u32::from(read_le_at::<u16>(data, offset)?),
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            owner: CodedIndex::read(data, offset, sizes, CodedIndexType::TypeOrMethodDef)?,
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
        })
    }
}
