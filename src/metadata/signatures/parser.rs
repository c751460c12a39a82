use crate::{
    file::parser::Parser,
    metadata::{
        signatures::{
            SignatureArray, SignatureField, SignatureMethod, SignatureParameter,
            SignatureProperty, TypeSignature, ELEMENT_TYPE,
        },
        token::Token,
    },
    Error::RecursionLimit,
    Result,
};

/// Deepest nesting of types accepted within one signature.
const MAX_RECURSION_DEPTH: usize = 50;

/// Decoder for the signature blobs of the `#Blob` heap (II.23.2).
///
/// Custom modifiers are read and kept on fields, parameters and properties; inside
/// nested types they are skipped.
pub struct SignatureParser<'a> {
    parser: Parser<'a>,
    depth: usize,
}

impl<'a> SignatureParser<'a> {
    /// Create a parser over one signature blob.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        SignatureParser {
            parser: Parser::new(data),
            depth: 0,
        }
    }

    fn parse_type(&mut self) -> Result<TypeSignature> {
        self.depth += 1;
        if self.depth >= MAX_RECURSION_DEPTH {
            return Err(RecursionLimit(MAX_RECURSION_DEPTH));
        }

        let result = self.parse_type_element();
        self.depth -= 1;
        result
    }

    fn parse_type_element(&mut self) -> Result<TypeSignature> {
        let current_byte = self.parser.read_le::<u8>()?;
        match current_byte {
            ELEMENT_TYPE::VOID => Ok(TypeSignature::Void),
            ELEMENT_TYPE::BOOLEAN => Ok(TypeSignature::Boolean),
            ELEMENT_TYPE::CHAR => Ok(TypeSignature::Char),
            ELEMENT_TYPE::I1 => Ok(TypeSignature::I1),
            ELEMENT_TYPE::U1 => Ok(TypeSignature::U1),
            ELEMENT_TYPE::I2 => Ok(TypeSignature::I2),
            ELEMENT_TYPE::U2 => Ok(TypeSignature::U2),
            ELEMENT_TYPE::I4 => Ok(TypeSignature::I4),
            ELEMENT_TYPE::U4 => Ok(TypeSignature::U4),
            ELEMENT_TYPE::I8 => Ok(TypeSignature::I8),
            ELEMENT_TYPE::U8 => Ok(TypeSignature::U8),
            ELEMENT_TYPE::R4 => Ok(TypeSignature::R4),
            ELEMENT_TYPE::R8 => Ok(TypeSignature::R8),
            ELEMENT_TYPE::STRING => Ok(TypeSignature::String),
            ELEMENT_TYPE::PTR => {
                self.parse_custom_mods()?;
                Ok(TypeSignature::Ptr(Box::new(self.parse_type()?)))
            }
            ELEMENT_TYPE::BYREF => Ok(TypeSignature::ByRef(Box::new(self.parse_type()?))),
            ELEMENT_TYPE::VALUETYPE => Ok(TypeSignature::ValueType(
                self.parser.read_compressed_token()?,
            )),
            ELEMENT_TYPE::CLASS => Ok(TypeSignature::Class(self.parser.read_compressed_token()?)),
            ELEMENT_TYPE::VAR => Ok(TypeSignature::GenericParamType(
                self.parser.read_compressed_uint()?,
            )),
            ELEMENT_TYPE::ARRAY => {
                let elem_type = self.parse_type()?;
                let rank = self.parser.read_compressed_uint()?;

                let num_sizes = self.parser.read_compressed_uint()?;
                for _ in 0..num_sizes {
                    self.parser.read_compressed_uint()?;
                }

                let num_lo_bounds = self.parser.read_compressed_uint()?;
                for _ in 0..num_lo_bounds {
                    self.parser.read_compressed_uint()?;
                }

                Ok(TypeSignature::Array(SignatureArray {
                    base: Box::new(elem_type),
                    rank,
                }))
            }
            ELEMENT_TYPE::GENERICINST => {
                let peek_byte = self.parser.peek_byte()?;
                if peek_byte != ELEMENT_TYPE::CLASS && peek_byte != ELEMENT_TYPE::VALUETYPE {
                    return Err(malformed_error!(
                        "GENERICINST - Next byte is not TYPE_CLASS or TYPE_VALUE - {}",
                        peek_byte
                    ));
                }

                let base_type = self.parse_type()?;
                let arg_count = self.parser.read_compressed_uint()?;

                let mut type_args = Vec::with_capacity(arg_count.min(64) as usize);
                for _ in 0..arg_count {
                    type_args.push(self.parse_type()?);
                }

                Ok(TypeSignature::GenericInst(Box::new(base_type), type_args))
            }
            ELEMENT_TYPE::TYPEDBYREF => Ok(TypeSignature::TypedByRef),
            ELEMENT_TYPE::I => Ok(TypeSignature::I),
            ELEMENT_TYPE::U => Ok(TypeSignature::U),
            ELEMENT_TYPE::FNPTR => Ok(TypeSignature::FnPtr(Box::new(
                self.parse_method_signature()?,
            ))),
            ELEMENT_TYPE::OBJECT => Ok(TypeSignature::Object),
            ELEMENT_TYPE::SZARRAY => {
                self.parse_custom_mods()?;
                Ok(TypeSignature::SzArray(Box::new(self.parse_type()?)))
            }
            ELEMENT_TYPE::MVAR => Ok(TypeSignature::GenericParamMethod(
                self.parser.read_compressed_uint()?,
            )),
            ELEMENT_TYPE::CMOD_REQD | ELEMENT_TYPE::CMOD_OPT => {
                self.parser.read_compressed_token()?;
                self.parse_type()
            }
            ELEMENT_TYPE::PINNED => Ok(TypeSignature::Pinned(Box::new(self.parse_type()?))),
            _ => Err(malformed_error!(
                "Unsupported ELEMENT_TYPE - {}",
                current_byte
            )),
        }
    }

    fn parse_custom_mods(&mut self) -> Result<Vec<Token>> {
        let mut mods = Vec::new();

        while self.parser.has_more_data() {
            let next_byte = self.parser.peek_byte()?;
            if next_byte != ELEMENT_TYPE::CMOD_OPT && next_byte != ELEMENT_TYPE::CMOD_REQD {
                break;
            }

            self.parser.advance()?;

            mods.push(self.parser.read_compressed_token()?);
        }

        Ok(mods)
    }

    fn parse_param(&mut self) -> Result<SignatureParameter> {
        let custom_mods = self.parse_custom_mods()?;

        let mut by_ref = false;
        if self.parser.peek_byte()? == ELEMENT_TYPE::BYREF {
            self.parser.advance()?;
            by_ref = true;
        }

        Ok(SignatureParameter {
            modifiers: custom_mods,
            by_ref,
            base: self.parse_type()?,
        })
    }

    /// Parse a `MethodDefSig` or `MethodRefSig`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for truncated blobs and
    /// [`crate::Error::Malformed`] for invalid element types.
    pub fn parse_method_signature(&mut self) -> Result<SignatureMethod> {
        let convention_byte = self.parser.read_le::<u8>()?;

        let param_count_generic = if convention_byte & 0x10 != 0 {
            self.parser.read_compressed_uint()?
        } else {
            0
        };
        let param_count = self.parser.read_compressed_uint()?;

        let mut method = SignatureMethod {
            has_this: convention_byte & 0x20 != 0,
            explicit_this: convention_byte & 0x40 != 0,
            vararg: convention_byte & 0x0F == 0x05,
            param_count_generic,
            return_type: self.parse_param()?,
            params: Vec::with_capacity(param_count.min(64) as usize),
        };

        for _ in 0..param_count {
            if self.parser.peek_byte()? == ELEMENT_TYPE::SENTINEL {
                // Remaining parameters belong to the vararg call site
                break;
            }

            method.params.push(self.parse_param()?);
        }

        Ok(method)
    }

    /// Parse a `FieldSig`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the blob does not start with `FIELD`.
    pub fn parse_field_signature(&mut self) -> Result<SignatureField> {
        let head_byte = self.parser.read_le::<u8>()?;
        if head_byte != 0x06 {
            return Err(malformed_error!(
                "SignatureField - invalid start - {}",
                head_byte
            ));
        }

        let custom_mods = self.parse_custom_mods()?;
        let type_sig = self.parse_type()?;

        Ok(SignatureField {
            modifiers: custom_mods,
            base: type_sig,
        })
    }

    /// Parse a `PropertySig`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the blob does not start with `PROPERTY`.
    pub fn parse_property_signature(&mut self) -> Result<SignatureProperty> {
        let head_byte = self.parser.read_le::<u8>()?;
        if (head_byte & 0x08) == 0 {
            return Err(malformed_error!(
                "SignatureProperty - invalid start - {}",
                head_byte
            ));
        }

        let has_this = (head_byte & 0x20) != 0;

        let param_count = self.parser.read_compressed_uint()?;
        let custom_mods = self.parse_custom_mods()?;
        let type_sig = self.parse_type()?;

        let mut params = Vec::with_capacity(param_count.min(64) as usize);
        for _ in 0..param_count {
            params.push(self.parse_param()?);
        }

        Ok(SignatureProperty {
            has_this,
            modifiers: custom_mods,
            base: type_sig,
            params,
        })
    }

    /// Parse a `TypeSpec` blob.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for invalid element types.
    pub fn parse_type_spec_signature(&mut self) -> Result<TypeSignature> {
        self.parse_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_types() {
        let test_cases = [
            (vec![0x01], TypeSignature::Void),
            (vec![0x02], TypeSignature::Boolean),
            (vec![0x03], TypeSignature::Char),
            (vec![0x08], TypeSignature::I4),
            (vec![0x0B], TypeSignature::U8),
            (vec![0x0D], TypeSignature::R8),
            (vec![0x0E], TypeSignature::String),
            (vec![0x1C], TypeSignature::Object),
            (vec![0x18], TypeSignature::I),
        ];

        for (bytes, expected_type) in test_cases {
            let mut parser = SignatureParser::new(&bytes);
            assert_eq!(parser.parse_type().unwrap(), expected_type);
        }
    }

    #[test]
    fn class_and_valuetype() {
        let mut parser = SignatureParser::new(&[0x12, 0x42]);
        assert_eq!(
            parser.parse_type().unwrap(),
            TypeSignature::Class(Token::new(0x1B00_0010))
        );

        let mut parser = SignatureParser::new(&[0x11, 0x35]);
        assert_eq!(
            parser.parse_type().unwrap(),
            TypeSignature::ValueType(Token::new(0x0100_000D))
        );

        let mut parser = SignatureParser::new(&[0x13, 0x03]);
        assert_eq!(
            parser.parse_type().unwrap(),
            TypeSignature::GenericParamType(3)
        );
    }

    #[test]
    fn arrays_and_pointers() {
        let mut parser = SignatureParser::new(&[0x1D, 0x08]);
        assert_eq!(
            parser.parse_type().unwrap(),
            TypeSignature::SzArray(Box::new(TypeSignature::I4))
        );

        let mut parser = SignatureParser::new(&[0x14, 0x08, 0x02, 0x02, 0x02, 0x03, 0x00]);
        assert_eq!(
            parser.parse_type().unwrap(),
            TypeSignature::Array(SignatureArray {
                base: Box::new(TypeSignature::I4),
                rank: 2,
            })
        );
        assert!(!parser.parser.has_more_data());

        let mut parser = SignatureParser::new(&[0x0F, 0x08]);
        assert_eq!(
            parser.parse_type().unwrap(),
            TypeSignature::Ptr(Box::new(TypeSignature::I4))
        );
    }

    #[test]
    fn generic_instance() {
        // Dictionary<string, List<T>>
        let mut parser =
            SignatureParser::new(&[0x15, 0x12, 0x09, 0x02, 0x0E, 0x15, 0x12, 0x0D, 0x01, 0x13, 0x00]);

        let list = TypeSignature::GenericInst(
            Box::new(TypeSignature::Class(Token::new(0x0100_0003))),
            vec![TypeSignature::GenericParamType(0)],
        );
        assert_eq!(
            parser.parse_type().unwrap(),
            TypeSignature::GenericInst(
                Box::new(TypeSignature::Class(Token::new(0x0100_0002))),
                vec![TypeSignature::String, list],
            )
        );

        let mut parser = SignatureParser::new(&[0x15, 0x08, 0x01, 0x08]);
        assert!(parser.parse_type().is_err());
    }

    #[test]
    fn depth_is_released() {
        // Many siblings at shallow depth must not trip the recursion limit
        let mut blob = vec![0x15, 0x12, 0x09, 0x3C];
        blob.extend(std::iter::repeat(0x08).take(60));

        let mut parser = SignatureParser::new(&blob);
        match parser.parse_type().unwrap() {
            TypeSignature::GenericInst(_, args) => assert_eq!(args.len(), 60),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn recursion_limit() {
        let blob = vec![0x1D; 100];
        let mut parser = SignatureParser::new(&blob);
        assert!(matches!(parser.parse_type(), Err(RecursionLimit(_))));
    }

    #[test]
    fn method_signature() {
        // instance int32 M(string, ref int32[])
        let mut parser = SignatureParser::new(&[0x20, 0x02, 0x08, 0x0E, 0x10, 0x1D, 0x08]);
        let method = parser.parse_method_signature().unwrap();
        assert!(method.has_this);
        assert_eq!(method.return_type.base, TypeSignature::I4);
        assert_eq!(method.params.len(), 2);
        assert_eq!(method.params[0].base, TypeSignature::String);
        assert!(method.params[1].by_ref);
        assert_eq!(
            method.params[1].base,
            TypeSignature::SzArray(Box::new(TypeSignature::I4))
        );

        // !!0 M<T>(!!0)
        let mut parser = SignatureParser::new(&[0x10, 0x01, 0x01, 0x1E, 0x00, 0x1E, 0x00]);
        let method = parser.parse_method_signature().unwrap();
        assert!(!method.has_this);
        assert_eq!(method.param_count_generic, 1);
        assert_eq!(method.return_type.base, TypeSignature::GenericParamMethod(0));
        assert_eq!(method.params[0].base, TypeSignature::GenericParamMethod(0));

        // vararg void M(int32, ...)
        let mut parser = SignatureParser::new(&[0x05, 0x02, 0x01, 0x08, 0x41, 0x0E]);
        let method = parser.parse_method_signature().unwrap();
        assert!(method.vararg);
        assert_eq!(method.params.len(), 1);
    }

    #[test]
    fn field_signature() {
        let mut parser = SignatureParser::new(&[0x06, 0x1F, 0x42, 0x08]);
        let field = parser.parse_field_signature().unwrap();
        assert_eq!(field.base, TypeSignature::I4);
        assert_eq!(field.modifiers, vec![Token::new(0x1B00_0010)]);

        let mut parser = SignatureParser::new(&[0x07, 0x08]);
        assert!(parser.parse_field_signature().is_err());
    }

    #[test]
    fn property_signature() {
        let mut parser = SignatureParser::new(&[0x28, 0x01, 0x0E, 0x08]);
        let property = parser.parse_property_signature().unwrap();
        assert!(property.has_this);
        assert_eq!(property.base, TypeSignature::String);
        assert_eq!(property.params.len(), 1);
        assert_eq!(property.params[0].base, TypeSignature::I4);

        let mut parser = SignatureParser::new(&[0x20, 0x00, 0x08]);
        assert!(parser.parse_property_signature().is_err());
    }
}
