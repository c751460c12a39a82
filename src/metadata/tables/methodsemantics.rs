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
    /// Role of a method for a property or event (II.23.1.12).
    pub struct MethodSemanticsAttributes: u32 {
        /// Property setter
        const SETTER = 0x0001;
        /// Property getter
        const GETTER = 0x0002;
        /// Other method of a property or event
        const OTHER = 0x0004;
        /// Event add accessor
        const ADD_ON = 0x0008;
        /// Event remove accessor
        const REMOVE_ON = 0x0010;
        /// Event raise method
        const FIRE = 0x0020;
    }
}

/// A row of the `MethodSemantics` table (II.22.28).
#[derive(Clone, Debug)]
pub struct MethodSemanticsRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// `MethodSemantics` token of this row
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// Role of the method
    pub semantics: u32,
    /// `MethodDef` row of the accessor
    pub method: u32,
    /// The owning `Event` or `Property`
    pub association: CodedIndex,
}

impl MethodSemanticsRaw {
    /// The role bits of `semantics`.
    #[must_use]
    pub fn attributes(&self) -> MethodSemanticsAttributes {
        MethodSemanticsAttributes::from_bits_truncate(self.semantics)
    }
}

impl RowReadable for MethodSemanticsRaw {
    const TABLE_ID: TableId = TableId::MethodSemantics;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(MethodSemanticsRaw {
            rid,
            token: Token::new(0x1800_0000 + rid),
            offset: *offset,
            semantics: u32::from(read_le_at::<u16>(data, offset)?),
            method: read_le_at_dyn(data, offset, sizes.is_large(TableId::MethodDef))?,
            association: CodedIndex::read(data, offset, sizes, CodedIndexType::HasSemantics)?,
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
            0x02, 0x00, // semantics
            0x03, 0x00, // method
            0x03, 0x00, // association
            0x01, 0x00, // semantics
            0x04, 0x00, // method
            0x02, 0x00, // association
        ];

        let sizes = Arc::new(TableInfo::from_rows(
            &[(TableId::MethodDef, 4), (TableId::Property, 1), (TableId::Event, 1)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<MethodSemanticsRaw>::new(&data, 2, sizes).unwrap();

        let getter = table.get(1).unwrap();
        assert_eq!(getter.token.value(), 0x1800_0001);
        assert_eq!(getter.attributes(), MethodSemanticsAttributes::GETTER);
        assert_eq!(getter.method, 3);
        assert_eq!(getter.association, CodedIndex::new(TableId::Property, 1));

        let setter = table.get(2).unwrap();
        assert_eq!(setter.attributes(), MethodSemanticsAttributes::SETTER);
        assert_eq!(setter.method, 4);
        assert_eq!(setter.association, CodedIndex::new(TableId::Event, 1));
    }

    #[test]
    fn crafted_long() {
        #[rustfmt::skip]
        let data = vec![
            0x08, 0x00,             // semantics
            0x01, 0x00, 0x01, 0x00, // method
            0x02, 0x00, 0x00, 0x00, // association
        ];

        let sizes = Arc::new(TableInfo::from_rows(
            &[
                (TableId::MethodDef, u32::from(u16::MAX) + 2),
                (TableId::Event, u32::from(u16::MAX) + 2),
            ],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<MethodSemanticsRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.attributes(), MethodSemanticsAttributes::ADD_ON);
        assert_eq!(row.method, 0x0001_0001);
        assert_eq!(row.association, CodedIndex::new(TableId::Event, 1));
    }
}
