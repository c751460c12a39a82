//! Metadata tables of the `#~` stream (ECMA-335 II.22).
//!
//! [`TableId`] enumerates every table a compressed metadata stream may contain,
//! [`TableInfo`] records the row counts and heap index widths that determine row
//! layouts, and [`MetadataTable`] is a typed, zero-copy view over the rows of one
//! table. Only the tables the declaration loader consumes have typed row readers;
//! every other table is skipped using its computed row size.

mod codedindex;
mod table;
mod tableinfo;

mod customattribute;
mod field;
mod genericparam;
mod genericparamconstraint;
mod interfaceimpl;
mod memberref;
mod methoddef;
mod methodsemantics;
mod nestedclass;
mod param;
mod property;
mod propertymap;
mod typedef;
mod typeref;
mod typespec;

pub use codedindex::{CodedIndex, CodedIndexType};
pub use table::{MetadataTable, RowReadable};
pub use tableinfo::{TableInfo, TableInfoRef, TableRowInfo};

pub use customattribute::CustomAttributeRaw;
pub use field::{FieldAttributes, FieldRaw, FIELD_ACCESS_MASK};
pub use genericparam::{GenericParamAttributes, GenericParamRaw};
pub use genericparamconstraint::GenericParamConstraintRaw;
pub use interfaceimpl::InterfaceImplRaw;
pub use memberref::MemberRefRaw;
pub use methoddef::{MethodAttributes, MethodDefRaw, METHOD_ACCESS_MASK};
pub use methodsemantics::{MethodSemanticsAttributes, MethodSemanticsRaw};
pub use nestedclass::NestedClassRaw;
pub use param::ParamRaw;
pub use property::PropertyRaw;
pub use propertymap::PropertyMapRaw;
pub use typedef::{TypeAttributes, TypeDefRaw, TYPE_VISIBILITY_MASK};
pub use typeref::TypeRefRaw;
pub use typespec::TypeSpecRaw;

use strum::{EnumCount, EnumIter};

/// Identifiers of the ECMA-335 metadata tables, valued by their table number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
#[repr(u8)]
pub enum TableId {
    /// `Module` (0x00)
    Module = 0x00,
    /// `TypeRef` (0x01)
    TypeRef = 0x01,
    /// `TypeDef` (0x02)
    TypeDef = 0x02,
    /// `FieldPtr` (0x03)
    FieldPtr = 0x03,
    /// `Field` (0x04)
    Field = 0x04,
    /// `MethodPtr` (0x05)
    MethodPtr = 0x05,
    /// `MethodDef` (0x06)
    MethodDef = 0x06,
    /// `ParamPtr` (0x07)
    ParamPtr = 0x07,
    /// `Param` (0x08)
    Param = 0x08,
    /// `InterfaceImpl` (0x09)
    InterfaceImpl = 0x09,
    /// `MemberRef` (0x0A)
    MemberRef = 0x0A,
    /// `Constant` (0x0B)
    Constant = 0x0B,
    /// `CustomAttribute` (0x0C)
    CustomAttribute = 0x0C,
    /// `FieldMarshal` (0x0D)
    FieldMarshal = 0x0D,
    /// `DeclSecurity` (0x0E)
    DeclSecurity = 0x0E,
    /// `ClassLayout` (0x0F)
    ClassLayout = 0x0F,
    /// `FieldLayout` (0x10)
    FieldLayout = 0x10,
    /// `StandAloneSig` (0x11)
    StandAloneSig = 0x11,
    /// `EventMap` (0x12)
    EventMap = 0x12,
    /// `EventPtr` (0x13)
    EventPtr = 0x13,
    /// `Event` (0x14)
    Event = 0x14,
    /// `PropertyMap` (0x15)
    PropertyMap = 0x15,
    /// `PropertyPtr` (0x16)
    PropertyPtr = 0x16,
    /// `Property` (0x17)
    Property = 0x17,
    /// `MethodSemantics` (0x18)
    MethodSemantics = 0x18,
    /// `MethodImpl` (0x19)
    MethodImpl = 0x19,
    /// `ModuleRef` (0x1A)
    ModuleRef = 0x1A,
    /// `TypeSpec` (0x1B)
    TypeSpec = 0x1B,
    /// `ImplMap` (0x1C)
    ImplMap = 0x1C,
    /// `FieldRVA` (0x1D)
    FieldRVA = 0x1D,
    /// `EncLog` (0x1E)
    EncLog = 0x1E,
    /// `EncMap` (0x1F)
    EncMap = 0x1F,
    /// `Assembly` (0x20)
    Assembly = 0x20,
    /// `AssemblyProcessor` (0x21)
    AssemblyProcessor = 0x21,
    /// `AssemblyOS` (0x22)
    AssemblyOS = 0x22,
    /// `AssemblyRef` (0x23)
    AssemblyRef = 0x23,
    /// `AssemblyRefProcessor` (0x24)
    AssemblyRefProcessor = 0x24,
    /// `AssemblyRefOS` (0x25)
    AssemblyRefOS = 0x25,
    /// `File` (0x26)
    File = 0x26,
    /// `ExportedType` (0x27)
    ExportedType = 0x27,
    /// `ManifestResource` (0x28)
    ManifestResource = 0x28,
    /// `NestedClass` (0x29)
    NestedClass = 0x29,
    /// `GenericParam` (0x2A)
    GenericParam = 0x2A,
    /// `MethodSpec` (0x2B)
    MethodSpec = 0x2B,
    /// `GenericParamConstraint` (0x2C)
    GenericParamConstraint = 0x2C,
}

impl TableId {
    /// Number of table slots covered by [`TableId`].
    pub const SLOTS: usize = TableId::COUNT;

    /// The high byte used in tokens referencing this table.
    #[must_use]
    pub fn token_base(self) -> u32 {
        u32::from(self as u8) << 24
    }
}
