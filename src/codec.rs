//! Struct codec
//!
//! Drives the primitive codec over a [`StructSchema`] field list: decode
//! reads a buffer field by field in declared order into a [`Value`] tree,
//! encode walks a [`Value`] tree back out to bytes. Nested struct fields
//! recurse through the registry.
//!
//! Decoding is deliberately unchecked in two ways, both properties of the
//! on-chain format rather than bugs: the buffer's total length is never
//! compared against the schema (accounts are usually allocated larger
//! than the logical record, trailing bytes are ignored), and the leading
//! discriminant byte is read and stored but never used to pick the
//! schema. Callers supply the type they expect; a buffer read under the
//! wrong schema misdecodes rather than failing fast.

use {
    crate::{
        error::CodecError,
        pubkey::{read_pubkey, write_pubkey},
        reader::BinaryReader,
        schema::{SchemaRegistry, TypeTag, WireType},
        value::Value,
        writer::BinaryWriter,
    },
    tracing::debug,
};

/// Decode `data` under the schema registered for `tag`.
pub fn decode_value(
    registry: &SchemaRegistry,
    tag: TypeTag,
    data: &[u8],
) -> Result<Value, CodecError> {
    let mut reader = BinaryReader::new(data);
    read_struct(registry, tag, &mut reader)
}

/// Encode `value` under the schema registered for `tag`.
pub fn encode_value(
    registry: &SchemaRegistry,
    tag: TypeTag,
    value: &Value,
) -> Result<Vec<u8>, CodecError> {
    let mut writer = BinaryWriter::new();
    write_struct(registry, tag, value, &mut writer)?;
    Ok(writer.into_inner())
}

fn read_struct(
    registry: &SchemaRegistry,
    tag: TypeTag,
    reader: &mut BinaryReader<'_>,
) -> Result<Value, CodecError> {
    let schema = registry.schema(tag)?;
    let mut fields = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        fields.push(read_wire(registry, &field.ty, reader)?);
    }
    Ok(Value::Struct(fields))
}

fn read_wire(
    registry: &SchemaRegistry,
    ty: &WireType,
    reader: &mut BinaryReader<'_>,
) -> Result<Value, CodecError> {
    match ty {
        WireType::U8 => Ok(Value::U8(reader.read_u8()?)),
        WireType::U16 => Ok(Value::U16(reader.read_u16()?)),
        WireType::U64 => Ok(Value::U64(reader.read_u64()?)),
        WireType::Bool => Ok(Value::Bool(reader.read_bool()?)),
        WireType::String => Ok(Value::String(reader.read_string()?)),
        WireType::Pubkey => Ok(Value::Pubkey(read_pubkey(reader)?)),
        WireType::FixedArray(len) => Ok(Value::Bytes(reader.read_fixed_array(*len)?)),
        WireType::Option(inner) => {
            if reader.read_bool()? {
                let payload = read_wire(registry, inner, reader)?;
                Ok(Value::Option(Some(Box::new(payload))))
            } else {
                Ok(Value::Option(None))
            }
        }
        WireType::List(element) => {
            let count = reader.read_u32()? as usize;
            let mut items = Vec::with_capacity(count.min(4096));
            for _ in 0..count {
                items.push(read_wire(registry, element, reader)?);
            }
            Ok(Value::List(items))
        }
        WireType::Struct(tag) => read_struct(registry, *tag, reader),
    }
}

fn write_struct(
    registry: &SchemaRegistry,
    tag: TypeTag,
    value: &Value,
    writer: &mut BinaryWriter,
) -> Result<(), CodecError> {
    let schema = registry.schema(tag)?;
    let fields = match value {
        Value::Struct(fields) => fields,
        other => {
            return Err(CodecError::DataTypeMismatch {
                expected: "struct",
                found: other.kind_name(),
            })
        }
    };
    if fields.len() != schema.fields.len() {
        return Err(CodecError::DataTypeMismatch {
            expected: tag.name(),
            found: "struct of different arity",
        });
    }
    for (field, value) in schema.fields.iter().zip(fields) {
        write_wire(registry, &field.ty, value, writer)?;
    }
    Ok(())
}

fn write_wire(
    registry: &SchemaRegistry,
    ty: &WireType,
    value: &Value,
    writer: &mut BinaryWriter,
) -> Result<(), CodecError> {
    match (ty, value) {
        (WireType::U8, Value::U8(v)) => writer.write_u8(*v),
        (WireType::U16, Value::U16(v)) => writer.write_u16(*v),
        (WireType::U64, Value::U64(v)) => writer.write_u64(*v),
        (WireType::Bool, Value::Bool(v)) => writer.write_bool(*v),
        (WireType::String, Value::String(v)) => writer.write_string(v)?,
        (WireType::Pubkey, Value::Pubkey(v)) => write_pubkey(writer, v),
        (WireType::FixedArray(len), Value::Bytes(bytes)) => {
            if bytes.len() != *len {
                return Err(CodecError::DataTypeMismatch {
                    expected: "fixed array",
                    found: "bytes of different length",
                });
            }
            writer.write_fixed_array(bytes);
        }
        (WireType::Option(inner), Value::Option(payload)) => match payload {
            Some(payload) => {
                writer.write_bool(true);
                write_wire(registry, inner, payload, writer)?;
            }
            None => writer.write_bool(false),
        },
        (WireType::List(element), Value::List(items)) => {
            let count = u32::try_from(items.len()).map_err(|_| CodecError::StringTooLong)?;
            writer.write_u32(count);
            for item in items {
                write_wire(registry, element, item, writer)?;
            }
        }
        (WireType::Struct(tag), value) => write_struct(registry, *tag, value, writer)?,
        (_, value) => {
            return Err(CodecError::DataTypeMismatch {
                expected: wire_type_name(ty),
                found: value.kind_name(),
            })
        }
    }
    Ok(())
}

fn wire_type_name(ty: &WireType) -> &'static str {
    match ty {
        WireType::U8 => "u8",
        WireType::U16 => "u16",
        WireType::U64 => "u64",
        WireType::Bool => "bool",
        WireType::String => "string",
        WireType::Pubkey => "pubkey",
        WireType::FixedArray(_) => "fixed array",
        WireType::Option(_) => "option",
        WireType::List(_) => "list",
        WireType::Struct(_) => "struct",
    }
}

/// A record type with a registered schema and a [`Value`] conversion.
///
/// Implemented by every account record in [`state`](crate::state) and
/// every instruction-args record in [`instruction`](crate::instruction).
pub trait WireRecord: Sized {
    /// The schema this record encodes and decodes under.
    const TAG: TypeTag;

    /// Build the record from a decoded value tree. This is the decode
    /// path only, so post-decode normalization (NUL stripping on
    /// metadata strings) happens here.
    fn from_value(value: Value) -> Result<Self, CodecError>;

    /// Render the record as a value tree for encoding. No normalization
    /// and no max-length enforcement; the caller supplies clean text.
    fn to_value(&self) -> Value;
}

/// Decode a typed record from `data` using the global registry.
pub fn decode<T: WireRecord>(data: &[u8]) -> Result<T, CodecError> {
    let value = decode_value(SchemaRegistry::global(), T::TAG, data)?;
    T::from_value(value)
}

/// Encode a typed record to bytes using the global registry.
pub fn encode<T: WireRecord>(record: &T) -> Result<Vec<u8>, CodecError> {
    encode_value(SchemaRegistry::global(), T::TAG, &record.to_value())
}

/// Outcome of decoding one account out of a batch fetch.
///
/// The account-fetch layer hands back `address -> maybe bytes`; a missing
/// account and an undecodable account are different facts, and neither
/// aborts the rest of the batch. The caller decides whether to skip, log,
/// or fail.
#[derive(Clone, Debug, PartialEq)]
pub enum AccountDecode<T> {
    /// The account existed and decoded cleanly
    Record(T),
    /// The fetch layer reported no account at this address
    Missing,
    /// The account existed but did not decode under the schema
    Invalid(CodecError),
}

impl<T> AccountDecode<T> {
    /// The decoded record, if this item produced one.
    pub fn record(self) -> Option<T> {
        match self {
            AccountDecode::Record(record) => Some(record),
            _ => None,
        }
    }
}

/// Decode a batch of fetched accounts, one outcome per input, in order.
pub fn decode_batch<'a, T, I>(accounts: I) -> Vec<AccountDecode<T>>
where
    T: WireRecord,
    I: IntoIterator<Item = Option<&'a [u8]>>,
{
    accounts
        .into_iter()
        .map(|account| match account {
            None => AccountDecode::Missing,
            Some(data) => match decode::<T>(data) {
                Ok(record) => AccountDecode::Record(record),
                Err(err) => {
                    debug!(%err, "skipping account that does not decode as {}", T::TAG);
                    AccountDecode::Invalid(err)
                }
            },
        })
        .collect()
}
