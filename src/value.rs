//! Dynamic values produced and consumed by the struct codec
//!
//! The schema walker does not know the concrete record types; it reads a
//! buffer into a [`Value`] tree shaped by the schema, and the typed layer
//! converts that tree into a domain record (and back). Struct fields are
//! kept positionally, in declared wire order; names live in the schema.

use crate::{error::CodecError, pubkey::Pubkey};

/// One decoded wire value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// One byte
    U8(u8),
    /// Little-endian u16
    U16(u16),
    /// Little-endian u64
    U64(u64),
    /// Bool stored as one byte
    Bool(bool),
    /// Length-prefixed UTF-8 string
    String(String),
    /// 32-byte pubkey
    Pubkey(Pubkey),
    /// Fixed-size raw byte array
    Bytes(Vec<u8>),
    /// Optional value behind a presence flag
    Option(Option<Box<Value>>),
    /// Count-prefixed list
    List(Vec<Value>),
    /// Struct field values in declared order
    Struct(Vec<Value>),
}

impl Value {
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U64(_) => "u64",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Pubkey(_) => "pubkey",
            Value::Bytes(_) => "bytes",
            Value::Option(_) => "option",
            Value::List(_) => "list",
            Value::Struct(_) => "struct",
        }
    }

    fn mismatch(&self, expected: &'static str) -> CodecError {
        CodecError::DataTypeMismatch {
            expected,
            found: self.kind_name(),
        }
    }

    /// Unwrap a `U8`.
    pub fn into_u8(self) -> Result<u8, CodecError> {
        match self {
            Value::U8(v) => Ok(v),
            other => Err(other.mismatch("u8")),
        }
    }

    /// Unwrap a `U16`.
    pub fn into_u16(self) -> Result<u16, CodecError> {
        match self {
            Value::U16(v) => Ok(v),
            other => Err(other.mismatch("u16")),
        }
    }

    /// Unwrap a `U64`.
    pub fn into_u64(self) -> Result<u64, CodecError> {
        match self {
            Value::U64(v) => Ok(v),
            other => Err(other.mismatch("u64")),
        }
    }

    /// Unwrap a `Bool`.
    pub fn into_bool(self) -> Result<bool, CodecError> {
        match self {
            Value::Bool(v) => Ok(v),
            other => Err(other.mismatch("bool")),
        }
    }

    /// Unwrap a `String`.
    pub fn into_string(self) -> Result<String, CodecError> {
        match self {
            Value::String(v) => Ok(v),
            other => Err(other.mismatch("string")),
        }
    }

    /// Unwrap a `Pubkey`.
    pub fn into_pubkey(self) -> Result<Pubkey, CodecError> {
        match self {
            Value::Pubkey(v) => Ok(v),
            other => Err(other.mismatch("pubkey")),
        }
    }

    /// Unwrap fixed-array `Bytes`.
    pub fn into_bytes(self) -> Result<Vec<u8>, CodecError> {
        match self {
            Value::Bytes(v) => Ok(v),
            other => Err(other.mismatch("bytes")),
        }
    }

    /// Unwrap an `Option`, keeping the payload boxed value.
    pub fn into_option(self) -> Result<Option<Value>, CodecError> {
        match self {
            Value::Option(v) => Ok(v.map(|boxed| *boxed)),
            other => Err(other.mismatch("option")),
        }
    }

    /// Unwrap a `List`.
    pub fn into_list(self) -> Result<Vec<Value>, CodecError> {
        match self {
            Value::List(v) => Ok(v),
            other => Err(other.mismatch("list")),
        }
    }

    /// Unwrap a `Struct` into an ordered field cursor.
    pub fn into_fields(self) -> Result<FieldValues, CodecError> {
        match self {
            Value::Struct(v) => Ok(FieldValues(v.into_iter())),
            other => Err(other.mismatch("struct")),
        }
    }
}

/// Cursor over a struct's field values in declared order.
#[derive(Debug)]
pub struct FieldValues(std::vec::IntoIter<Value>);

impl FieldValues {
    /// Take the next field value; fails if the struct ran out of fields.
    pub fn next(&mut self) -> Result<Value, CodecError> {
        self.0.next().ok_or(CodecError::DataTypeMismatch {
            expected: "struct field",
            found: "end of struct",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessor_mismatch_names_both_shapes() {
        let err = Value::U16(3).into_u64().unwrap_err();
        assert_eq!(
            err,
            CodecError::DataTypeMismatch {
                expected: "u64",
                found: "u16"
            }
        );
    }

    #[test]
    fn field_cursor_yields_in_order() {
        let mut fields = Value::Struct(vec![Value::U8(1), Value::Bool(true)])
            .into_fields()
            .unwrap();
        assert_eq!(fields.next().unwrap(), Value::U8(1));
        assert_eq!(fields.next().unwrap(), Value::Bool(true));
        assert!(fields.next().is_err());
    }
}
