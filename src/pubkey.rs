//! 32-byte account addresses and their base58 text form
//!
//! On the wire a pubkey is 32 raw bytes with no prefix; everywhere a
//! human or a cache file sees one it is the base58 encoding of those
//! bytes. The two forms are exact inverses. `read_pubkey` /
//! `write_pubkey` extend the primitive codec with the pubkey leaf type
//! as free functions.

use {
    crate::{error::CodecError, reader::BinaryReader, writer::BinaryWriter},
    serde::{de, Deserialize, Deserializer, Serialize, Serializer},
    std::{fmt, str::FromStr},
};

/// Number of bytes in a pubkey.
pub const PUBKEY_BYTES: usize = 32;

/// A 32-byte account address on the external ledger.
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Pubkey([u8; PUBKEY_BYTES]);

impl Pubkey {
    /// Wrap raw bytes as a pubkey.
    pub const fn new_from_array(bytes: [u8; PUBKEY_BYTES]) -> Self {
        Self(bytes)
    }

    /// The raw 32 bytes.
    pub const fn to_bytes(self) -> [u8; PUBKEY_BYTES] {
        self.0
    }

    /// Parse the base58 text form. Fails with
    /// [`CodecError::InvalidBase58`] on malformed text or a decoded
    /// length other than 32.
    pub fn from_base58(s: &str) -> Result<Self, CodecError> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|_| CodecError::InvalidBase58(s.to_string()))?;
        let bytes: [u8; PUBKEY_BYTES] = bytes
            .try_into()
            .map_err(|_| CodecError::InvalidBase58(s.to_string()))?;
        Ok(Self(bytes))
    }

    /// The base58 text form.
    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }
}

impl AsRef<[u8]> for Pubkey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; PUBKEY_BYTES]> for Pubkey {
    fn from(bytes: [u8; PUBKEY_BYTES]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl FromStr for Pubkey {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base58(s)
    }
}

impl Serialize for Pubkey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for Pubkey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_base58(&s).map_err(de::Error::custom)
    }
}

/// Read a pubkey as a 32-byte fixed array.
pub fn read_pubkey(reader: &mut BinaryReader<'_>) -> Result<Pubkey, CodecError> {
    let bytes = reader.read_fixed_array(PUBKEY_BYTES)?;
    let mut out = [0u8; PUBKEY_BYTES];
    out.copy_from_slice(&bytes);
    Ok(Pubkey(out))
}

/// Write a pubkey as a 32-byte fixed array.
pub fn write_pubkey(writer: &mut BinaryWriter, pubkey: &Pubkey) {
    writer.write_fixed_array(pubkey.as_ref());
}
