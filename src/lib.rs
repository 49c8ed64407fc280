#![deny(missing_docs)]
#![forbid(unsafe_code)]

//! Schema-driven codec for token metadata accounts
//!
//! This crate decodes and encodes the metadata program's account records
//! (metadata, editions, master editions, edition markers) and its
//! instruction payloads, using the same little-endian, length-prefixed
//! binary layout the on-chain program reads and writes. It also provides
//! the edition-marker bitset test used to check whether a limited-edition
//! print number has already been minted.
//!
//! Everything here is a pure, synchronous transformation over in-memory
//! buffers. Fetching account bytes, deriving program addresses, and
//! building or submitting transactions belong to the surrounding layers;
//! their seams are [`codec::decode_batch`], the [`AddressDeriver`] trait,
//! and the `pack` methods on the [`instruction`] types.

pub mod codec;
pub mod error;
pub mod instruction;
pub mod pubkey;
pub mod reader;
pub mod schema;
pub mod state;
pub mod value;
pub mod writer;

pub use {
    codec::{decode, decode_batch, encode, AccountDecode, WireRecord},
    error::CodecError,
    pubkey::Pubkey,
    schema::{SchemaRegistry, TypeTag},
    state::{Account, Key},
};

/// The metadata program id, `metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s`.
pub fn id() -> Pubkey {
    Pubkey::new_from_array([
        11, 112, 101, 177, 227, 209, 124, 69, 56, 157, 82, 127, 107, 4, 195, 205, 88, 184, 108,
        115, 26, 160, 253, 181, 73, 182, 209, 188, 3, 248, 41, 70,
    ])
}

/// Maximum byte length the program allots for a metadata name.
pub const MAX_NAME_LENGTH: usize = 32;

/// Maximum byte length the program allots for a metadata symbol.
pub const MAX_SYMBOL_LENGTH: usize = 10;

/// Maximum byte length the program allots for a metadata URI.
pub const MAX_URI_LENGTH: usize = 200;

/// Maximum number of creators the program accepts per metadata account.
///
/// A convention of the consuming program; the codec itself encodes any
/// creator count.
pub const MAX_CREATOR_LIMIT: usize = 5;

/// Wire size of one creator entry.
pub const MAX_CREATOR_LEN: usize = 32 + 1 + 1;

/// Allocation size of a metadata account, padding included.
pub const MAX_METADATA_LEN: usize = 1
    + 32
    + 32
    + MAX_NAME_LENGTH
    + MAX_SYMBOL_LENGTH
    + MAX_URI_LENGTH
    + MAX_CREATOR_LIMIT * MAX_CREATOR_LEN
    + 2
    + 1
    + 1
    + 198;

/// Number of edition slots covered by one edition-marker account.
pub const EDITION_MARKER_BIT_SIZE: u64 = 248;

/// Byte length of the edition-marker ledger (248 slots / 8).
pub const EDITION_MARKER_LEDGER_LEN: usize = 31;

/// PDA seed prefix for metadata accounts.
pub const METADATA_SEED: &[u8] = b"metadata";

/// PDA seed suffix for edition accounts.
pub const EDITION_SEED: &[u8] = b"edition";

/// Derives program-owned addresses from seed byte sequences.
///
/// Program-address derivation is hashing owned by the ledger's runtime,
/// so the network layer implements this; the codec only prepares seeds.
pub trait AddressDeriver {
    /// Derive the program address for `seeds` under `program_id`.
    fn find_program_address(&self, seeds: &[&[u8]], program_id: &Pubkey) -> Pubkey;
}

/// Seeds locating the metadata account for `mint`.
pub fn metadata_seeds<'a>(program_id: &'a Pubkey, mint: &'a Pubkey) -> [&'a [u8]; 3] {
    [METADATA_SEED, program_id.as_ref(), mint.as_ref()]
}

/// Seeds locating the edition (and master edition) account for `mint`.
pub fn edition_seeds<'a>(program_id: &'a Pubkey, mint: &'a Pubkey) -> [&'a [u8]; 4] {
    [
        METADATA_SEED,
        program_id.as_ref(),
        mint.as_ref(),
        EDITION_SEED,
    ]
}

/// Derive the metadata account address for `mint` under the metadata
/// program.
pub fn find_metadata_address(deriver: &impl AddressDeriver, mint: &Pubkey) -> Pubkey {
    let program_id = id();
    deriver.find_program_address(&metadata_seeds(&program_id, mint), &program_id)
}

/// Derive the edition account address for `mint` under the metadata
/// program. Master and print editions share this address; the record
/// kind tells them apart.
pub fn find_edition_address(deriver: &impl AddressDeriver, mint: &Pubkey) -> Pubkey {
    let program_id = id();
    deriver.find_program_address(&edition_seeds(&program_id, mint), &program_id)
}
