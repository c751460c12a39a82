use std::sync::Arc;
use strum::IntoEnumIterator;

use crate::{
    file::io::read_le,
    metadata::tables::{MetadataTable, RowReadable, TableId, TableInfo, TableInfoRef},
    Error::{NotSupported, OutOfBounds},
    Result,
};

/// Heap size flag announcing 4 bytes of extra data after the row counts.
const HEAP_EXTRA_DATA: u8 = 0x40;

/// The header of the compressed `#~` stream (ECMA-335 II.24.2.6) and the location of
/// every table that follows it.
///
/// Tables without a typed row reader are still sized and skipped, so that the tables
/// after them can be located.
pub struct TablesHeader<'a> {
    /// Major version of the table schema
    pub major_version: u8,
    /// Minor version of the table schema
    pub minor_version: u8,
    /// Bit vector of present tables
    pub valid: u64,
    /// Bit vector of sorted tables
    pub sorted: u64,
    /// Row counts and index widths
    pub info: TableInfoRef,
    data: &'a [u8],
    table_offsets: Vec<usize>,
}

impl<'a> TablesHeader<'a> {
    /// Parse the `#~` stream.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the stream is truncated,
    /// [`crate::Error::Malformed`] if no table is present and
    /// [`crate::Error::NotSupported`] for tables beyond the ECMA-335 schema, such as the
    /// portable PDB tables.
    pub fn from(data: &'a [u8]) -> Result<TablesHeader<'a>> {
        if data.len() < 24 {
            return Err(OutOfBounds);
        }

        let heap_sizes = read_le::<u8>(&data[6..])?;
        let valid_bitvec = read_le::<u64>(&data[8..])?;
        if valid_bitvec == 0 {
            return Err(malformed_error!("No valid rows in any of the tables"));
        }

        if valid_bitvec >> TableId::SLOTS != 0 {
            log::warn!(
                "Table stream references unknown tables - valid mask {:#018x}",
                valid_bitvec
            );
            return Err(NotSupported);
        }

        let info = TableInfo::new(data, valid_bitvec, heap_sizes, 24)?;

        let mut current_offset = 24 + valid_bitvec.count_ones() as usize * 4;
        if heap_sizes & HEAP_EXTRA_DATA != 0 {
            current_offset += 4;
        }

        let mut table_offsets = vec![0; TableId::SLOTS];
        for table_id in TableId::iter() {
            table_offsets[table_id as usize] = current_offset;

            let table_size = u64::from(info.get(table_id).rows) * u64::from(info.row_size(table_id));
            let Ok(table_size) = usize::try_from(table_size) else {
                return Err(OutOfBounds);
            };

            current_offset = current_offset
                .checked_add(table_size)
                .ok_or(OutOfBounds)?;
            if current_offset > data.len() {
                return Err(OutOfBounds);
            }
        }

        log::trace!(
            "Table stream v{}.{} - {} tables, {} bytes of rows",
            data[4],
            data[5],
            valid_bitvec.count_ones(),
            current_offset
        );

        Ok(TablesHeader {
            major_version: data[4],
            minor_version: data[5],
            valid: valid_bitvec,
            sorted: read_le::<u64>(&data[16..])?,
            info: Arc::new(info),
            data,
            table_offsets,
        })
    }

    /// Number of tables present in the stream.
    #[must_use]
    pub fn table_count(&self) -> u32 {
        self.valid.count_ones()
    }

    /// Returns `true` if `table_id` is present with at least one row.
    #[must_use]
    pub fn has_table(&self, table_id: TableId) -> bool {
        self.info.get(table_id).rows > 0
    }

    /// Number of rows in `table_id`, 0 if absent.
    #[must_use]
    pub fn row_count(&self, table_id: TableId) -> u32 {
        self.info.get(table_id).rows
    }

    /// Typed view over the rows of `T`'s table, `None` if the table is absent.
    #[must_use]
    pub fn table<T: RowReadable>(&self) -> Option<MetadataTable<'a, T>> {
        let rows = self.info.get(T::TABLE_ID).rows;
        if rows == 0 {
            return None;
        }

        let offset = self.table_offsets[T::TABLE_ID as usize];
        MetadataTable::new(&self.data[offset..], rows, self.info.clone()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::tables::{NestedClassRaw, TypeDefRaw, TypeRefRaw};

    #[rustfmt::skip]
    fn header(valid: u64, heap_sizes: u8, rows: &[u32]) -> Vec<u8> {
        let mut data = vec![
            0x00, 0x00, 0x00, 0x00, // reserved
            0x02,                   // major_version
            0x00,                   // minor_version
            heap_sizes,             // heap_sizes
            0x01,                   // reserved
        ];
        data.extend_from_slice(&valid.to_le_bytes());
        data.extend_from_slice(&0_u64.to_le_bytes());
        for row in rows {
            data.extend_from_slice(&row.to_le_bytes());
        }
        data
    }

    #[test]
    fn locate_tables() {
        // Module, TypeRef, TypeDef, NestedClass
        let valid = 1 << 0x00 | 1 << 0x01 | 1 << 0x02 | 1 << 0x29;
        let mut data = header(valid, 0, &[1, 1, 2, 1]);

        // Module: generation, name, mvid, encid, encbaseid
        data.extend_from_slice(&[0x00, 0x00, 0x0A, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00]);
        // TypeRef: resolution_scope, name, namespace
        data.extend_from_slice(&[0x06, 0x00, 0x20, 0x00, 0x30, 0x00]);
        // TypeDef x2
        data.extend_from_slice(&[
            0x00, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00,
            0x01, 0x00, 0x10, 0x00, 0x50, 0x00, 0x60, 0x00, 0x05, 0x00, 0x01, 0x00, 0x01, 0x00,
        ]);
        // NestedClass
        data.extend_from_slice(&[0x02, 0x00, 0x01, 0x00]);

        let tables = TablesHeader::from(&data).unwrap();
        assert_eq!(tables.major_version, 2);
        assert_eq!(tables.table_count(), 4);
        assert!(tables.has_table(TableId::TypeDef));
        assert!(!tables.has_table(TableId::Field));
        assert_eq!(tables.row_count(TableId::TypeDef), 2);

        let typeref = tables.table::<TypeRefRaw>().unwrap();
        assert_eq!(typeref.get(1).unwrap().type_name, 0x20);

        let typedef = tables.table::<TypeDefRaw>().unwrap();
        let names: Vec<u32> = typedef.iter().map(|row| row.type_name).collect();
        assert_eq!(names, vec![0x40, 0x50]);
        assert_eq!(typedef.get(2).unwrap().flags, 0x0010_0001);

        let nested = tables.table::<NestedClassRaw>().unwrap();
        assert_eq!(nested.get(1).unwrap().nested_class, 2);
        assert_eq!(nested.get(1).unwrap().enclosing_class, 1);

        assert!(tables.table::<crate::metadata::tables::FieldRaw>().is_none());
    }

    #[test]
    fn extra_data() {
        let mut data = header(1 << 0x1B, HEAP_EXTRA_DATA, &[1]);
        data.extend_from_slice(&[0xAA, 0xBB, 0xCC, 0xDD]);
        data.extend_from_slice(&[0x07, 0x00]);

        let tables = TablesHeader::from(&data).unwrap();
        let typespec = tables
            .table::<crate::metadata::tables::TypeSpecRaw>()
            .unwrap();
        assert_eq!(typespec.get(1).unwrap().signature, 7);
    }

    #[test]
    fn invalid() {
        assert!(matches!(TablesHeader::from(&[0x00; 16]), Err(OutOfBounds)));
        assert!(TablesHeader::from(&header(0, 0, &[])).is_err());

        let portable_pdb = header(1 << 0x30, 0, &[1]);
        assert!(matches!(
            TablesHeader::from(&portable_pdb),
            Err(NotSupported)
        ));

        // TypeDef claims 10 rows but no row data follows
        let truncated = header(1 << 0x02, 0, &[10]);
        assert!(matches!(TablesHeader::from(&truncated), Err(OutOfBounds)));
    }
}
