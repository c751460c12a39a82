use bitflags::bitflags;

use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// Mask selecting the access bits of [`FieldRaw::flags`].
pub const FIELD_ACCESS_MASK: u32 = 0x0007;

bitflags! {
    #[derive(PartialEq, Eq, Debug, Clone, Copy)]
    /// Field attributes outside the access mask (II.23.1.5).
    pub struct FieldAttributes: u32 {
        /// Field belongs to the type, not to instances
        const STATIC = 0x0010;
        /// Field can only be set during initialization
        const INIT_ONLY = 0x0020;
        /// Value is a compile-time constant
        const LITERAL = 0x0040;
        /// Field is not serialized
        const NOT_SERIALIZED = 0x0080;
        /// Field has an RVA
        const HAS_FIELD_RVA = 0x0100;
        /// Name is special
        const SPECIAL_NAME = 0x0200;
        /// Runtime should check name encoding
        const RT_SPECIAL_NAME = 0x0400;
        /// Field has marshalling information
        const HAS_FIELD_MARSHAL = 0x1000;
        /// Implementation is forwarded through `PInvoke`
        const PINVOKE_IMPL = 0x2000;
        /// Field has a default value
        const HAS_DEFAULT = 0x8000;
    }
}

/// A row of the `Field` table (II.22.15).
#[derive(Clone, Debug)]
pub struct FieldRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// `Field` token of this row
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// Access and attribute flags
    pub flags: u32,
    /// `#Strings` index of the name
    pub name: u32,
    /// `#Blob` index of the field signature
    pub signature: u32,
}

impl FieldRaw {
    /// The access bits of `flags`.
    #[must_use]
    pub fn access(&self) -> u32 {
        self.flags & FIELD_ACCESS_MASK
    }

    /// The non-access attribute bits of `flags`.
    #[must_use]
    pub fn attributes(&self) -> FieldAttributes {
        FieldAttributes::from_bits_truncate(self.flags)
    }
}

impl RowReadable for FieldRaw {
    const TABLE_ID: TableId = TableId::Field;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(FieldRaw {
            rid,
            token: Token::new(0x0400_0000 + rid),
            offset: *offset,
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
        })
    }
}
