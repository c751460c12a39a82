use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `MemberRef` table (II.22.25).
#[derive(Clone, Debug)]
pub struct MemberRefRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// `MemberRef` token of this row
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// Type or module declaring the member
    pub class: CodedIndex,
    /// `#Strings` index of the name
    pub name: u32,
    /// `#Blob` index of the member signature
    pub signature: u32,
}

impl RowReadable for MemberRefRaw {
    const TABLE_ID: TableId = TableId::MemberRef;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(MemberRefRaw {
            rid,
            token: Token::new(0x0A00_0000 + rid),
            offset: *offset,
            class: CodedIndex::read(data, offset, sizes, CodedIndexType::MemberRefParent)?,
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
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
            0x21, 0x00, // class
            0x5A, 0x01, // name
            0x07, 0x00, // signature
        ];

        let sizes = Arc::new(TableInfo::from_rows(
            &[(TableId::TypeRef, 4), (TableId::MemberRef, 1)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<MemberRefRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.token.value(), 0x0A00_0001);
        assert_eq!(row.class, CodedIndex::new(TableId::TypeRef, 4));
        assert_eq!(row.name, 0x015A);
        assert_eq!(row.signature, 0x07);
    }

    #[test]
    fn crafted_long() {
        #[rustfmt::skip]
        let data = vec![
            0x0C, 0x00, 0x00, 0x00, // class
            0x01, 0x00, 0x00, 0x01, // name
            0x02, 0x00, 0x00, 0x02, // signature
        ];

        let sizes = Arc::new(TableInfo::from_rows(
            &[(TableId::TypeSpec, 0x2000)],
            true,
            true,
            false,
        ));
        let table = MetadataTable::<MemberRefRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.class, CodedIndex::new(TableId::TypeSpec, 1));
        assert_eq!(row.name, 0x0100_0001);
        assert_eq!(row.signature, 0x0200_0002);
    }
}
