//! Signature blobs (ECMA-335 II.23.2).
//!
//! Fields, methods, properties and type specifications describe their types through
//! blobs in the `#Blob` heap. [`SignatureParser`] decodes them into [`TypeSignature`]
//! trees whose class and value type leaves are still metadata tokens; resolving those
//! tokens into names is left to the loader.

mod parser;
mod types;

pub use parser::SignatureParser;
pub use types::*;

use crate::Result;

/// Parse a method signature blob.
///
/// # Errors
/// See [`SignatureParser::parse_method_signature`].
pub fn parse_method_signature(data: &[u8]) -> Result<SignatureMethod> {
    let mut parser = SignatureParser::new(data);
    parser.parse_method_signature()
}

/// Parse a field signature blob.
///
/// # Errors
/// See [`SignatureParser::parse_field_signature`].
pub fn parse_field_signature(data: &[u8]) -> Result<SignatureField> {
    let mut parser = SignatureParser::new(data);
    parser.parse_field_signature()
}

/// Parse a property signature blob.
///
/// # Errors
/// See [`SignatureParser::parse_property_signature`].
pub fn parse_property_signature(data: &[u8]) -> Result<SignatureProperty> {
    let mut parser = SignatureParser::new(data);
    parser.parse_property_signature()
}

/// Parse a `TypeSpec` blob.
///
/// # Errors
/// See [`SignatureParser::parse_type_spec_signature`].
pub fn parse_type_spec_signature(data: &[u8]) -> Result<TypeSignature> {
    let mut parser = SignatureParser::new(data);
    parser.parse_type_spec_signature()
}
