use std::sync::Arc;
use strum::{EnumCount, IntoEnumIterator};

use crate::{
    file::io::read_le_at,
    metadata::tables::{CodedIndexType, TableId},
    Error::OutOfBounds,
    Result,
};

/// Row count of one table plus the derived index width.
#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct TableRowInfo {
    /// Number of rows
    pub rows: u32,
    /// Number of bits needed to address every row
    pub bits: u8,
    /// `true` if indexes into this table are 4 bytes wide
    pub is_large: bool,
}

impl TableRowInfo {
    /// Compute the addressing information for a table with `rows` rows.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(rows: u32) -> Self {
        let bits = if rows == 0 {
            1
        } else {
            (32 - rows.leading_zeros()) as u8
        };

        Self {
            rows,
            bits,
            is_large: rows > u32::from(u16::MAX),
        }
    }
}

/// Row counts and index widths of every table in a `#~` stream.
///
/// This is everything needed to compute row layouts: simple table indexes, coded
/// indexes and heap indexes are either 2 or 4 bytes wide depending on it.
#[derive(Clone, Default, Debug)]
pub struct TableInfo {
    rows: Vec<TableRowInfo>,
    coded_indexes: Vec<u8>,
    is_large_index_str: bool,
    is_large_index_guid: bool,
    is_large_index_blob: bool,
}

/// Shared handle to a [`TableInfo`].
pub type TableInfoRef = Arc<TableInfo>;

impl TableInfo {
    /// Read row counts from a `#~` stream header.
    ///
    /// `data` starts at the stream; `row_counts_offset` points at the first row
    /// count, which follows the fixed header and the optional extra-data word.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the row counts are truncated.
    pub fn new(
        data: &[u8],
        valid_bitvec: u64,
        heap_size_flags: u8,
        row_counts_offset: usize,
    ) -> Result<Self> {
        let mut table_info = vec![TableRowInfo::default(); TableId::SLOTS];
        let mut next_row_offset = row_counts_offset;

        for table_id in TableId::iter() {
            if data.len() < next_row_offset {
                return Err(OutOfBounds);
            }

            if (valid_bitvec & (1 << table_id as usize)) == 0 {
                continue;
            }

            let row_count = read_le_at::<u32>(data, &mut next_row_offset)?;
            table_info[table_id as usize] = TableRowInfo::new(row_count);
        }

        let mut table_info = TableInfo {
            rows: table_info,
            coded_indexes: vec![0; CodedIndexType::COUNT],
            is_large_index_str: heap_size_flags & 1 == 1,
            is_large_index_guid: heap_size_flags & 2 == 2,
            is_large_index_blob: heap_size_flags & 4 == 4,
        };

        table_info.calculate_coded_index_bits();

        Ok(table_info)
    }

    /// Build table information from explicit row counts.
    #[must_use]
    pub fn from_rows(
        valid_tables: &[(TableId, u32)],
        large_str: bool,
        large_blob: bool,
        large_guid: bool,
    ) -> Self {
        let mut table_info = TableInfo {
            rows: vec![TableRowInfo::default(); TableId::SLOTS],
            coded_indexes: vec![0; CodedIndexType::COUNT],
            is_large_index_str: large_str,
            is_large_index_guid: large_guid,
            is_large_index_blob: large_blob,
        };

        for valid_table in valid_tables {
            table_info.rows[valid_table.0 as usize] = TableRowInfo::new(valid_table.1);
        }

        table_info.calculate_coded_index_bits();
        table_info
    }

    /// Split a coded index value into its table and row.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for a tag outside the coded index' table list.
    pub fn decode_coded_index(
        &self,
        value: u32,
        coded_index_type: CodedIndexType,
    ) -> Result<(TableId, u32)> {
        let tables = coded_index_type.tables();
        let tag_bits = coded_index_type.tag_bits();
        let tag_mask = (1 << tag_bits) - 1;

        let tag = value & tag_mask;
        let index = value >> tag_bits;

        if tag as usize >= tables.len() {
            return Err(OutOfBounds);
        }

        Ok((tables[tag as usize], index))
    }

    /// Returns `true` if simple indexes into `id` are 4 bytes wide.
    #[must_use]
    pub fn is_large(&self, id: TableId) -> bool {
        self.rows[id as usize].is_large
    }

    /// Returns `true` if `#Strings` indexes are 4 bytes wide.
    #[must_use]
    pub fn is_large_str(&self) -> bool {
        self.is_large_index_str
    }

    /// Returns `true` if `#GUID` indexes are 4 bytes wide.
    #[must_use]
    pub fn is_large_guid(&self) -> bool {
        self.is_large_index_guid
    }

    /// Returns `true` if `#Blob` indexes are 4 bytes wide.
    #[must_use]
    pub fn is_large_blob(&self) -> bool {
        self.is_large_index_blob
    }

    /// Width of a `#Strings` index.
    #[must_use]
    pub fn str_bytes(&self) -> u8 {
        if self.is_large_index_str {
            4
        } else {
            2
        }
    }

    /// Width of a `#GUID` index.
    #[must_use]
    pub fn guid_bytes(&self) -> u8 {
        if self.is_large_index_guid {
            4
        } else {
            2
        }
    }

    /// Width of a `#Blob` index.
    #[must_use]
    pub fn blob_bytes(&self) -> u8 {
        if self.is_large_index_blob {
            4
        } else {
            2
        }
    }

    /// Row information of `table`.
    #[must_use]
    pub fn get(&self, table: TableId) -> &TableRowInfo {
        &self.rows[table as usize]
    }

    /// Width of a simple index into `table_id`.
    #[must_use]
    pub fn table_index_bytes(&self, table_id: TableId) -> u8 {
        if self.rows[table_id as usize].bits > 16 {
            4
        } else {
            2
        }
    }

    /// Returns `true` if coded indexes of this kind are 4 bytes wide.
    #[must_use]
    pub fn is_large_coded(&self, coded_index_type: CodedIndexType) -> bool {
        self.coded_indexes[coded_index_type as usize] > 16
    }

    /// Width of a coded index of this kind.
    #[must_use]
    pub fn coded_index_bytes(&self, coded_index_type: CodedIndexType) -> u8 {
        if self.is_large_coded(coded_index_type) {
            4
        } else {
            2
        }
    }

    /// Size in bytes of one row of `table`, for every table of the `#~` stream.
    #[must_use]
    #[rustfmt::skip]
    pub fn row_size(&self, table: TableId) -> u32 {
        let str_ = self.str_bytes();
        let guid = self.guid_bytes();
        let blob = self.blob_bytes();
        let idx = |id: TableId| self.table_index_bytes(id);
        let coded = |ci: CodedIndexType| self.coded_index_bytes(ci);

        let size = match table {
            TableId::Module => 2 + str_ + guid * 3,
            TableId::TypeRef => coded(CodedIndexType::ResolutionScope) + str_ * 2,
            TableId::TypeDef => {
                4 + str_ * 2
                    + coded(CodedIndexType::TypeDefOrRef)
                    + idx(TableId::Field)
                    + idx(TableId::MethodDef)
            }
            TableId::FieldPtr => idx(TableId::Field),
            TableId::Field => 2 + str_ + blob,
            TableId::MethodPtr => idx(TableId::MethodDef),
            TableId::MethodDef => 4 + 2 + 2 + str_ + blob + idx(TableId::Param),
            TableId::ParamPtr => idx(TableId::Param),
            TableId::Param => 2 + 2 + str_,
            TableId::InterfaceImpl => idx(TableId::TypeDef) + coded(CodedIndexType::TypeDefOrRef),
            TableId::MemberRef => coded(CodedIndexType::MemberRefParent) + str_ + blob,
            TableId::Constant => 1 + 1 + coded(CodedIndexType::HasConstant) + blob,
            TableId::CustomAttribute => {
                coded(CodedIndexType::HasCustomAttribute)
                    + coded(CodedIndexType::CustomAttributeType)
                    + blob
            }
            TableId::FieldMarshal => coded(CodedIndexType::HasFieldMarshal) + blob,
            TableId::DeclSecurity => 2 + coded(CodedIndexType::HasDeclSecurity) + blob,
            TableId::ClassLayout => 2 + 4 + idx(TableId::TypeDef),
            TableId::FieldLayout => 4 + idx(TableId::Field),
            TableId::StandAloneSig => blob,
            TableId::EventMap => idx(TableId::TypeDef) + idx(TableId::Event),
            TableId::EventPtr => idx(TableId::Event),
            TableId::Event => 2 + str_ + coded(CodedIndexType::TypeDefOrRef),
            TableId::PropertyMap => idx(TableId::TypeDef) + idx(TableId::Property),
            TableId::PropertyPtr => idx(TableId::Property),
            TableId::Property => 2 + str_ + blob,
            TableId::MethodSemantics => {
                2 + idx(TableId::MethodDef) + coded(CodedIndexType::HasSemantics)
            }
            TableId::MethodImpl => idx(TableId::TypeDef) + coded(CodedIndexType::MethodDefOrRef) * 2,
            TableId::ModuleRef => str_,
            TableId::TypeSpec => blob,
            TableId::ImplMap => {
                2 + coded(CodedIndexType::MemberForwarded) + str_ + idx(TableId::ModuleRef)
            }
            TableId::FieldRVA => 4 + idx(TableId::Field),
            TableId::EncLog => 4 + 4,
            TableId::EncMap => 4,
            TableId::Assembly => 4 + 2 * 4 + 4 + blob + str_ * 2,
            TableId::AssemblyProcessor => 4,
            TableId::AssemblyOS => 4 * 3,
            TableId::AssemblyRef => 2 * 4 + 4 + blob + str_ * 2 + blob,
            TableId::AssemblyRefProcessor => 4 + idx(TableId::AssemblyRef),
            TableId::AssemblyRefOS => 4 * 3 + idx(TableId::AssemblyRef),
            TableId::File => 4 + str_ + blob,
            TableId::ExportedType => 4 + 4 + str_ * 2 + coded(CodedIndexType::Implementation),
            TableId::ManifestResource => 4 + 4 + str_ + coded(CodedIndexType::Implementation),
            TableId::NestedClass => idx(TableId::TypeDef) * 2,
            TableId::GenericParam => 2 + 2 + coded(CodedIndexType::TypeOrMethodDef) + str_,
            TableId::MethodSpec => coded(CodedIndexType::MethodDefOrRef) + blob,
            TableId::GenericParamConstraint => {
                idx(TableId::GenericParam) + coded(CodedIndexType::TypeDefOrRef)
            }
        };

        u32::from(size)
    }

    fn calculate_coded_index_size(&self, coded_index_type: CodedIndexType) -> u8 {
        let max_bits = coded_index_type
            .tables()
            .iter()
            .map(|table| self.rows[*table as usize].bits)
            .max()
            .unwrap_or(1);

        max_bits + coded_index_type.tag_bits()
    }

    fn calculate_coded_index_bits(&mut self) {
        for coded_index in CodedIndexType::iter() {
            let size = self.calculate_coded_index_size(coded_index);
            self.coded_indexes[coded_index as usize] = size;
        }
    }
}
