//! Error types

use thiserror::Error;

/// Errors that may be returned by the metadata codec.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CodecError {
    /// No schema is registered for the requested type
    #[error("no schema registered for `{0}`")]
    SchemaNotFound(&'static str),

    /// The input buffer ended before the schema was fully read
    #[error("unexpected end of input at offset {offset}, needed {needed} more byte(s)")]
    UnexpectedEof {
        /// Cursor position when the read was attempted
        offset: usize,
        /// Number of bytes the read required
        needed: usize,
    },

    /// A length-prefixed string did not contain valid UTF-8
    #[error("string field is not valid UTF-8")]
    InvalidUtf8,

    /// A pubkey's base58 text form could not be decoded to 32 bytes
    #[error("invalid base58 pubkey: {0}")]
    InvalidBase58(String),

    /// A string's byte length (or a list's element count) does not fit
    /// in the u32 wire prefix
    #[error("string too long for wire encoding")]
    StringTooLong,

    /// A value's shape does not match the schema it was encoded or
    /// converted under
    #[error("data type mismatch: expected {expected}, found {found}")]
    DataTypeMismatch {
        /// Shape the schema or record conversion required
        expected: &'static str,
        /// Shape actually present
        found: &'static str,
    },

    /// Edition-marker byte index fell outside the 31-byte ledger
    #[error("bad index {0} for edition ledger")]
    EditionIndexOutOfRange(usize),
}
