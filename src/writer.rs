//! Binary writer half of the primitive codec
//!
//! [`BinaryWriter`] appends to a growable byte buffer. Writes are the
//! exact inverses of the [`BinaryReader`](crate::reader::BinaryReader)
//! reads: little-endian integers, one-byte bools, 4-byte length-prefixed
//! UTF-8 strings, raw fixed arrays.

use crate::error::CodecError;

/// Append-only output buffer.
#[derive(Debug, Default)]
pub struct BinaryWriter {
    buf: Vec<u8>,
}

impl BinaryWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the writer and return the encoded bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    /// Write one byte.
    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Write a little-endian u16.
    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Write a little-endian u32.
    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Write a little-endian u64.
    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Write a bool as a single 0/1 byte.
    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(value as u8);
    }

    /// Write a string: 4-byte little-endian byte length, then the UTF-8
    /// bytes. Fails with [`CodecError::StringTooLong`] if the byte length
    /// does not fit the u32 prefix.
    pub fn write_string(&mut self, value: &str) -> Result<(), CodecError> {
        let len = u32::try_from(value.len()).map_err(|_| CodecError::StringTooLong)?;
        self.write_u32(len);
        self.buf.extend_from_slice(value.as_bytes());
        Ok(())
    }

    /// Write raw bytes with no length prefix.
    pub fn write_fixed_array(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }
}
