use bitflags::bitflags;

use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// Mask selecting the access bits of [`MethodDefRaw::flags`].
pub const METHOD_ACCESS_MASK: u32 = 0x0007;

bitflags! {
    #[derive(PartialEq, Eq, Debug, Clone, Copy)]
    /// Method attributes outside the access mask (II.23.1.10).
    pub struct MethodAttributes: u32 {
        /// Defined on the type rather than per instance
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name and signature
        const HIDE_BY_SIG = 0x0080;
        /// Method always gets a new vtable slot
        const NEW_SLOT = 0x0100;
        /// Overridable only if also accessible
        const STRICT = 0x0200;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Name is special
        const SPECIAL_NAME = 0x0800;
        /// Runtime should check name encoding
        const RT_SPECIAL_NAME = 0x1000;
        /// Implementation is forwarded through `PInvoke`
        const PINVOKE_IMPL = 0x2000;
        /// Method has security associated with it
        const HAS_SECURITY = 0x4000;
        /// Method calls another method containing security code
        const REQUIRE_SEC_OBJECT = 0x8000;
    }
}

/// A row of the `MethodDef` table (II.22.26).
#[derive(Clone, Debug)]
pub struct MethodDefRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// `MethodDef` token of this row
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// RVA of the method body, 0 if there is none
    pub rva: u32,
    /// Implementation flags
    pub impl_flags: u32,
    /// Access and attribute flags
    pub flags: u32,
    /// `#Strings` index of the name
    pub name: u32,
    /// `#Blob` index of the method signature
    pub signature: u32,
    /// First row of this method's run in the `Param` table
    pub param_list: u32,
}

impl MethodDefRaw {
    /// The access bits of `flags`.
    #[must_use]
    pub fn access(&self) -> u32 {
        self.flags & METHOD_ACCESS_MASK
    }

    /// The non-access attribute bits of `flags`.
    #[must_use]
    pub fn attributes(&self) -> MethodAttributes {
        MethodAttributes::from_bits_truncate(self.flags)
    }
}

impl RowReadable for MethodDefRaw {
    const TABLE_ID: TableId = TableId::MethodDef;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(MethodDefRaw {
            rid,
            token: Token::new(0x0600_0000 + rid),
            offset: *offset,
            rva: read_le_at::<u32>(data, offset)?,
            impl_flags: u32::from(read_le_at::<u16>(data, offset)?),
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
            param_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::Param))?,
        })
    }
}
