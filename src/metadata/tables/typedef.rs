use bitflags::bitflags;

use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// Mask selecting the visibility bits of [`TypeDefRaw::flags`].
pub const TYPE_VISIBILITY_MASK: u32 = 0x0000_0007;

bitflags! {
    #[derive(PartialEq, Eq, Debug, Clone, Copy)]
    /// Type attributes outside the visibility and layout masks (II.23.1.15).
    pub struct TypeAttributes: u32 {
        /// Type is an interface
        const INTERFACE = 0x0000_0020;
        /// Type is abstract
        const ABSTRACT = 0x0000_0080;
        /// Type cannot be derived from
        const SEALED = 0x0000_0100;
        /// Name is special
        const SPECIAL_NAME = 0x0000_0400;
        /// Type is imported
        const IMPORT = 0x0000_1000;
        /// Type is serializable
        const SERIALIZABLE = 0x0000_2000;
        /// Static initializer may run before first static field access
        const BEFORE_FIELD_INIT = 0x0010_0000;
        /// Runtime should check name encoding
        const RT_SPECIAL_NAME = 0x0000_0800;
    }
}

/// A row of the `TypeDef` table (II.22.37).
#[derive(Clone, Debug)]
pub struct TypeDefRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// `TypeDef` token of this row
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// Visibility, layout and semantics flags
    pub flags: u32,
    /// `#Strings` index of the name
    pub type_name: u32,
    /// `#Strings` index of the namespace
    pub type_namespace: u32,
    /// Base type, may be null
    pub extends: CodedIndex,
    /// First row of this type's run in the `Field` table
    pub field_list: u32,
    /// First row of this type's run in the `MethodDef` table
    pub method_list: u32,
}

impl TypeDefRaw {
    /// The visibility bits of `flags`.
    #[must_use]
    pub fn visibility(&self) -> u32 {
        self.flags & TYPE_VISIBILITY_MASK
    }

    /// The non-visibility attribute bits of `flags`.
    #[must_use]
    pub fn attributes(&self) -> TypeAttributes {
        TypeAttributes::from_bits_truncate(self.flags)
    }
}

impl RowReadable for TypeDefRaw {
    const TABLE_ID: TableId = TableId::TypeDef;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(TypeDefRaw {
            rid,
            token: Token::new(0x0200_0000 + rid),
            offset: *offset,
            flags: read_le_at::<u32>(data, offset)?,
            type_name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            type_namespace: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            extends: CodedIndex::read(data, offset, sizes, CodedIndexType::TypeDefOrRef)?,
            field_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::Field))?,
            method_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::MethodDef))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::metadata::tables::{MetadataTable, TableInfo};

    use super::*;

    #[test]
    fn crafted_short() {
        #[rustfmt::skip]
        let data = vec![
            0x81, 0x01, 0x10, 0x00, // flags
            0x42, 0x00,             // type_name
            0x43, 0x00,             // type_namespace
            0x05, 0x00,             // extends
            0x03, 0x00,             // field_list
            0x04, 0x00,             // method_list
        ];

        let sizes = Arc::new(TableInfo::from_rows(
            &[(TableId::TypeDef, 1), (TableId::Field, 3), (TableId::MethodDef, 4)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<TypeDefRaw>::new(&data, 1, sizes).unwrap();

        let eval = |row: TypeDefRaw| {
            assert_eq!(row.rid, 1);
            assert_eq!(row.token.value(), 0x0200_0001);
            assert_eq!(row.flags, 0x0010_0181);
            assert_eq!(row.visibility(), 1);
            assert!(row.attributes().contains(TypeAttributes::ABSTRACT));
            assert!(row.attributes().contains(TypeAttributes::SEALED));
            assert!(!row.attributes().contains(TypeAttributes::INTERFACE));
            assert_eq!(row.type_name, 0x42);
            assert_eq!(row.type_namespace, 0x43);
            assert_eq!(row.extends, CodedIndex::new(TableId::TypeRef, 1));
            assert_eq!(row.field_list, 3);
            assert_eq!(row.method_list, 4);
        };

        for row in table.iter() {
            eval(row);
        }

        eval(table.get(1).unwrap());
        assert!(table.get(0).is_none());
        assert!(table.get(2).is_none());
    }

    #[test]
    fn crafted_long() {
        #[rustfmt::skip]
        let data = vec![
            0x20, 0x00, 0x00, 0x00, // flags
            0x00, 0x00, 0x00, 0x02, // type_name
            0x00, 0x00, 0x00, 0x03, // type_namespace
            0x00, 0x00, 0x00, 0x04, // extends
            0x00, 0x00, 0x00, 0x05, // field_list
            0x00, 0x00, 0x00, 0x06, // method_list
        ];

        let sizes = Arc::new(TableInfo::from_rows(
            &[
                (TableId::Field, u32::from(u16::MAX) + 2),
                (TableId::MethodDef, u32::from(u16::MAX) + 2),
                (TableId::TypeRef, u32::from(u16::MAX) + 2),
            ],
            true,
            true,
            true,
        ));
        let table = MetadataTable::<TypeDefRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert!(row.attributes().contains(TypeAttributes::INTERFACE));
        assert_eq!(row.visibility(), 0);
        assert_eq!(row.type_name, 0x0200_0000);
        assert_eq!(row.type_namespace, 0x0300_0000);
        assert_eq!(row.extends, CodedIndex::new(TableId::TypeDef, 0x0100_0000));
        assert_eq!(row.field_list, 0x0500_0000);
        assert_eq!(row.method_list, 0x0600_0000);
    }

    #[test]
    fn truncated_table() {
        let sizes = Arc::new(TableInfo::from_rows(&[], false, false, false));
        assert!(MetadataTable::<TypeDefRaw>::new(&[0x00; 13], 1, sizes).is_err());
    }
}
