use crate::metadata::token::Token;

/// Element type constants of signature blobs (II.23.1.16).
#[allow(non_snake_case, missing_docs)]
pub mod ELEMENT_TYPE {
    pub const END: u8 = 0x00;
    pub const VOID: u8 = 0x01;
    pub const BOOLEAN: u8 = 0x02;
    pub const CHAR: u8 = 0x03;
    pub const I1: u8 = 0x04;
    pub const U1: u8 = 0x05;
    pub const I2: u8 = 0x06;
    pub const U2: u8 = 0x07;
    pub const I4: u8 = 0x08;
    pub const U4: u8 = 0x09;
    pub const I8: u8 = 0x0A;
    pub const U8: u8 = 0x0B;
    pub const R4: u8 = 0x0C;
    pub const R8: u8 = 0x0D;
    pub const STRING: u8 = 0x0E;
    pub const PTR: u8 = 0x0F;
    pub const BYREF: u8 = 0x10;
    pub const VALUETYPE: u8 = 0x11;
    pub const CLASS: u8 = 0x12;
    pub const VAR: u8 = 0x13;
    pub const ARRAY: u8 = 0x14;
    pub const GENERICINST: u8 = 0x15;
    pub const TYPEDBYREF: u8 = 0x16;
    pub const I: u8 = 0x18;
    pub const U: u8 = 0x19;
    pub const FNPTR: u8 = 0x1B;
    pub const OBJECT: u8 = 0x1C;
    pub const SZARRAY: u8 = 0x1D;
    pub const MVAR: u8 = 0x1E;
    pub const CMOD_REQD: u8 = 0x1F;
    pub const CMOD_OPT: u8 = 0x20;
    pub const INTERNAL: u8 = 0x21;
    pub const SENTINEL: u8 = 0x41;
    pub const PINNED: u8 = 0x45;
}

/// A decoded `Type` production of a signature blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSignature {
    /// `void`
    Void,
    /// `System.Boolean`
    Boolean,
    /// `System.Char`
    Char,
    /// `System.SByte`
    I1,
    /// `System.Byte`
    U1,
    /// `System.Int16`
    I2,
    /// `System.UInt16`
    U2,
    /// `System.Int32`
    I4,
    /// `System.UInt32`
    U4,
    /// `System.Int64`
    I8,
    /// `System.UInt64`
    U8,
    /// `System.Single`
    R4,
    /// `System.Double`
    R8,
    /// `System.String`
    String,
    /// `System.IntPtr`
    I,
    /// `System.UIntPtr`
    U,
    /// `System.Object`
    Object,
    /// `System.TypedReference`
    TypedByRef,
    /// Unmanaged pointer
    Ptr(Box<TypeSignature>),
    /// Managed reference
    ByRef(Box<TypeSignature>),
    /// Value type, a `TypeDef`, `TypeRef` or `TypeSpec` token
    ValueType(Token),
    /// Reference type, a `TypeDef`, `TypeRef` or `TypeSpec` token
    Class(Token),
    /// Generic parameter of the enclosing type, by position
    GenericParamType(u32),
    /// Generic parameter of the enclosing method, by position
    GenericParamMethod(u32),
    /// Single-dimensional, zero-based array
    SzArray(Box<TypeSignature>),
    /// General array with `rank` dimensions
    Array(SignatureArray),
    /// Instantiation of a generic type
    GenericInst(Box<TypeSignature>, Vec<TypeSignature>),
    /// Function pointer
    FnPtr(Box<SignatureMethod>),
    /// Pinned local
    Pinned(Box<TypeSignature>),
}

/// A general array type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureArray {
    /// Element type
    pub base: Box<TypeSignature>,
    /// Number of dimensions
    pub rank: u32,
}

/// A parameter or return type of a method signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureParameter {
    /// Custom modifiers preceding the type
    pub modifiers: Vec<Token>,
    /// Parameter is passed by reference
    pub by_ref: bool,
    /// Parameter type
    pub base: TypeSignature,
}

/// A `MethodDefSig` or `MethodRefSig` (II.23.2.1).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignatureMethod {
    /// Instance method
    pub has_this: bool,
    /// `this` is passed explicitly as first parameter
    pub explicit_this: bool,
    /// Variable argument calling convention
    pub vararg: bool,
    /// Number of generic parameters
    pub param_count_generic: u32,
    /// Return type
    pub return_type: SignatureParameter,
    /// Fixed parameters
    pub params: Vec<SignatureParameter>,
}

impl Default for SignatureParameter {
    fn default() -> Self {
        SignatureParameter {
            modifiers: Vec::new(),
            by_ref: false,
            base: TypeSignature::Void,
        }
    }
}

/// A `FieldSig` (II.23.2.4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureField {
    /// Custom modifiers preceding the type
    pub modifiers: Vec<Token>,
    /// Field type
    pub base: TypeSignature,
}

/// A `PropertySig` (II.23.2.5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureProperty {
    /// Instance property
    pub has_this: bool,
    /// Custom modifiers preceding the type
    pub modifiers: Vec<Token>,
    /// Property type
    pub base: TypeSignature,
    /// Indexer parameters
    pub params: Vec<SignatureParameter>,
}
