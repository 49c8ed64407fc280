//! Account domain model
//!
//! In-memory shapes for the metadata program's account types, plus their
//! [`WireRecord`] conversions. Each decode produces a freshly owned
//! record; nothing here aliases the input buffer or any other record.

use {
    crate::{
        codec::WireRecord,
        error::CodecError,
        pubkey::Pubkey,
        schema::TypeTag,
        value::Value,
        EDITION_MARKER_BIT_SIZE, EDITION_MARKER_LEDGER_LEN,
    },
    num_derive::FromPrimitive,
    num_traits::FromPrimitive as _,
    serde::{Deserialize, Serialize},
};

/// Account type discriminant, the first byte of every account buffer.
#[derive(Clone, Copy, Debug, Deserialize, Eq, FromPrimitive, PartialEq, Serialize)]
#[repr(u8)]
pub enum Key {
    /// Account exists but holds no record yet
    Uninitialized = 0,
    /// Numbered print of a master edition
    EditionV1 = 1,
    /// Deprecated master edition with printing mints
    MasterEditionV1 = 2,
    /// Metadata account
    MetadataV1 = 4,
    /// Current master edition
    MasterEditionV2 = 6,
    /// Packed bitset of minted edition numbers
    EditionMarker = 7,
}

impl Key {
    /// Parse a discriminant byte. Returns `None` for values the program
    /// never writes.
    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::from_u8(byte)
    }
}

/// One creator entry in a metadata account.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Creator {
    /// The creator's account address
    pub address: Pubkey,
    /// Whether the creator has signed to verify the attribution
    pub verified: bool,
    /// In percentages, not basis points
    pub share: u8,
}

impl WireRecord for Creator {
    const TAG: TypeTag = TypeTag::Creator;

    fn from_value(value: Value) -> Result<Self, CodecError> {
        let mut fields = value.into_fields()?;
        Ok(Self {
            address: fields.next()?.into_pubkey()?,
            verified: fields.next()?.into_bool()?,
            share: fields.next()?.into_u8()?,
        })
    }

    fn to_value(&self) -> Value {
        Value::Struct(vec![
            Value::Pubkey(self.address),
            Value::Bool(self.verified),
            Value::U8(self.share),
        ])
    }
}

/// The metadata fields shared between accounts and instruction payloads.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Data {
    /// The name of the asset
    pub name: String,
    /// The symbol for the asset
    pub symbol: String,
    /// URI pointing to JSON representing the asset
    pub uri: String,
    /// Royalty basis points for secondary sales (0-10000)
    pub seller_fee_basis_points: u16,
    /// Array of creators, optional. Absent and empty are distinct states
    /// and both round-trip as themselves.
    pub creators: Option<Vec<Creator>>,
}

/// On-chain text fields are padded to capacity with NUL bytes; the
/// domain model never keeps them.
fn strip_nuls(s: String) -> String {
    if s.contains('\0') {
        s.replace('\0', "")
    } else {
        s
    }
}

impl WireRecord for Data {
    const TAG: TypeTag = TypeTag::Data;

    fn from_value(value: Value) -> Result<Self, CodecError> {
        let mut fields = value.into_fields()?;
        let name = strip_nuls(fields.next()?.into_string()?);
        let symbol = strip_nuls(fields.next()?.into_string()?);
        let uri = strip_nuls(fields.next()?.into_string()?);
        let seller_fee_basis_points = fields.next()?.into_u16()?;
        let creators = match fields.next()?.into_option()? {
            Some(list) => Some(
                list.into_list()?
                    .into_iter()
                    .map(Creator::from_value)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };
        Ok(Self {
            name,
            symbol,
            uri,
            seller_fee_basis_points,
            creators,
        })
    }

    fn to_value(&self) -> Value {
        let creators = self
            .creators
            .as_ref()
            .map(|creators| Box::new(Value::List(creators.iter().map(Creator::to_value).collect())));
        Value::Struct(vec![
            Value::String(self.name.clone()),
            Value::String(self.symbol.clone()),
            Value::String(self.uri.clone()),
            Value::U16(self.seller_fee_basis_points),
            Value::Option(creators),
        ])
    }
}

/// A metadata account.
///
/// The edition and master-edition addresses for the mint are not stored
/// here or anywhere on the wire; derive them with
/// [`find_edition_address`](crate::find_edition_address) and keep the
/// result alongside the record.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Metadata {
    /// Always [`Key::MetadataV1`]
    pub key: Key,
    /// Authority allowed to update this metadata
    pub update_authority: Pubkey,
    /// The mint this metadata describes
    pub mint: Pubkey,
    /// Name, symbol, URI, royalties, creators
    pub data: Data,
    /// Whether the primary sale has happened
    pub primary_sale_happened: bool,
    /// Whether the update authority may still change the metadata
    pub is_mutable: bool,
}

impl WireRecord for Metadata {
    const TAG: TypeTag = TypeTag::Metadata;

    fn from_value(value: Value) -> Result<Self, CodecError> {
        let mut fields = value.into_fields()?;
        // The discriminant byte is consumed but never trusted; the
        // caller already committed to this schema.
        let _key = fields.next()?.into_u8()?;
        Ok(Self {
            key: Key::MetadataV1,
            update_authority: fields.next()?.into_pubkey()?,
            mint: fields.next()?.into_pubkey()?,
            data: Data::from_value(fields.next()?)?,
            primary_sale_happened: fields.next()?.into_bool()?,
            is_mutable: fields.next()?.into_bool()?,
        })
    }

    fn to_value(&self) -> Value {
        Value::Struct(vec![
            Value::U8(self.key as u8),
            Value::Pubkey(self.update_authority),
            Value::Pubkey(self.mint),
            self.data.to_value(),
            Value::Bool(self.primary_sale_happened),
            Value::Bool(self.is_mutable),
        ])
    }
}

/// Deprecated master edition. Still found on chain; carries the printing
/// mints the V2 layout dropped.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MasterEditionV1 {
    /// Always [`Key::MasterEditionV1`]
    pub key: Key,
    /// Number of prints minted so far
    pub supply: u64,
    /// Cap on prints, unlimited when absent
    pub max_supply: Option<u64>,
    /// Mint of tokens granting one print each
    pub printing_mint: Pubkey,
    /// Mint of tokens granting a one-time bulk printing authorization
    pub one_time_printing_authorization_mint: Pubkey,
}

impl WireRecord for MasterEditionV1 {
    const TAG: TypeTag = TypeTag::MasterEditionV1;

    fn from_value(value: Value) -> Result<Self, CodecError> {
        let mut fields = value.into_fields()?;
        let _key = fields.next()?.into_u8()?;
        Ok(Self {
            key: Key::MasterEditionV1,
            supply: fields.next()?.into_u64()?,
            max_supply: fields.next()?.into_option()?.map(Value::into_u64).transpose()?,
            printing_mint: fields.next()?.into_pubkey()?,
            one_time_printing_authorization_mint: fields.next()?.into_pubkey()?,
        })
    }

    fn to_value(&self) -> Value {
        Value::Struct(vec![
            Value::U8(self.key as u8),
            Value::U64(self.supply),
            Value::Option(self.max_supply.map(|v| Box::new(Value::U64(v)))),
            Value::Pubkey(self.printing_mint),
            Value::Pubkey(self.one_time_printing_authorization_mint),
        ])
    }
}

/// A master edition account: the original record prints are issued from.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MasterEditionV2 {
    /// Always [`Key::MasterEditionV2`]
    pub key: Key,
    /// Number of prints minted so far
    pub supply: u64,
    /// Cap on prints, unlimited when absent
    pub max_supply: Option<u64>,
}

impl WireRecord for MasterEditionV2 {
    const TAG: TypeTag = TypeTag::MasterEditionV2;

    fn from_value(value: Value) -> Result<Self, CodecError> {
        let mut fields = value.into_fields()?;
        let _key = fields.next()?.into_u8()?;
        Ok(Self {
            key: Key::MasterEditionV2,
            supply: fields.next()?.into_u64()?,
            max_supply: fields.next()?.into_option()?.map(Value::into_u64).transpose()?,
        })
    }

    fn to_value(&self) -> Value {
        Value::Struct(vec![
            Value::U8(self.key as u8),
            Value::U64(self.supply),
            Value::Option(self.max_supply.map(|v| Box::new(Value::U64(v)))),
        ])
    }
}

/// A numbered print of a master edition.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Edition {
    /// Always [`Key::EditionV1`]
    pub key: Key,
    /// Points at the MasterEdition account
    pub parent: Pubkey,
    /// Starting at 0 for the master record, incremented per print
    pub edition: u64,
}

impl Default for Edition {
    fn default() -> Self {
        Self {
            key: Key::EditionV1,
            parent: Pubkey::default(),
            edition: 0,
        }
    }
}

impl WireRecord for Edition {
    const TAG: TypeTag = TypeTag::Edition;

    fn from_value(value: Value) -> Result<Self, CodecError> {
        let mut fields = value.into_fields()?;
        let _key = fields.next()?.into_u8()?;
        Ok(Self {
            key: Key::EditionV1,
            parent: fields.next()?.into_pubkey()?,
            edition: fields.next()?.into_u64()?,
        })
    }

    fn to_value(&self) -> Value {
        Value::Struct(vec![
            Value::U8(self.key as u8),
            Value::Pubkey(self.parent),
            Value::U64(self.edition),
        ])
    }
}

/// A read-only snapshot of one edition-marker account: 248 edition
/// slots packed left-to-right into 31 bytes. Minting happens on chain;
/// a stale snapshot is refreshed by fetching again, never mutated here.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EditionMarker {
    /// Always [`Key::EditionMarker`]
    pub key: Key,
    /// The packed bitset
    pub ledger: [u8; EDITION_MARKER_LEDGER_LEN],
}

impl EditionMarker {
    /// Whether `edition` has already been minted according to this
    /// marker. The edition number wraps at
    /// [`EDITION_MARKER_BIT_SIZE`] slots; within a byte, bit 7 is the
    /// lowest-numbered slot.
    pub fn edition_taken(&self, edition: u64) -> Result<bool, CodecError> {
        let offset = edition % EDITION_MARKER_BIT_SIZE;
        let index = (offset / 8) as usize;
        // Always in 0..=30 for any edition number (248 / 8 == 31); kept
        // as a bounds guard on the ledger.
        if index > EDITION_MARKER_LEDGER_LEN - 1 {
            return Err(CodecError::EditionIndexOutOfRange(index));
        }
        let mask = 1u8 << (7 - (offset % 8) as u8);
        Ok(self.ledger[index] & mask != 0)
    }
}

impl WireRecord for EditionMarker {
    const TAG: TypeTag = TypeTag::EditionMarker;

    fn from_value(value: Value) -> Result<Self, CodecError> {
        let mut fields = value.into_fields()?;
        let _key = fields.next()?.into_u8()?;
        let bytes = fields.next()?.into_bytes()?;
        let ledger: [u8; EDITION_MARKER_LEDGER_LEN] =
            bytes.try_into().map_err(|_| CodecError::DataTypeMismatch {
                expected: "31-byte ledger",
                found: "bytes of different length",
            })?;
        Ok(Self {
            key: Key::EditionMarker,
            ledger,
        })
    }

    fn to_value(&self) -> Value {
        Value::Struct(vec![
            Value::U8(self.key as u8),
            Value::Bytes(self.ledger.to_vec()),
        ])
    }
}

/// Closed set of account records, tagged by [`Key`].
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Account {
    /// A metadata account
    Metadata(Metadata),
    /// A deprecated master edition account
    MasterEditionV1(MasterEditionV1),
    /// A master edition account
    MasterEditionV2(MasterEditionV2),
    /// A print edition account
    Edition(Edition),
    /// An edition marker account
    EditionMarker(EditionMarker),
}

impl Account {
    /// Decode `data` as the account type the caller expects. The
    /// caller-supplied `key` selects the schema; byte 0 of the buffer
    /// is not consulted (use [`Key::from_byte`] first to inspect it).
    pub fn decode(key: Key, data: &[u8]) -> Result<Self, CodecError> {
        match key {
            Key::Uninitialized => Err(CodecError::SchemaNotFound("Uninitialized")),
            Key::MetadataV1 => crate::codec::decode(data).map(Account::Metadata),
            Key::MasterEditionV1 => crate::codec::decode(data).map(Account::MasterEditionV1),
            Key::MasterEditionV2 => crate::codec::decode(data).map(Account::MasterEditionV2),
            Key::EditionV1 => crate::codec::decode(data).map(Account::Edition),
            Key::EditionMarker => crate::codec::decode(data).map(Account::EditionMarker),
        }
    }

    /// Encode the account back to its wire form.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        match self {
            Account::Metadata(record) => crate::codec::encode(record),
            Account::MasterEditionV1(record) => crate::codec::encode(record),
            Account::MasterEditionV2(record) => crate::codec::encode(record),
            Account::Edition(record) => crate::codec::encode(record),
            Account::EditionMarker(record) => crate::codec::encode(record),
        }
    }

    /// The discriminant of the contained record.
    pub fn key(&self) -> Key {
        match self {
            Account::Metadata(record) => record.key,
            Account::MasterEditionV1(record) => record.key,
            Account::MasterEditionV2(record) => record.key,
            Account::Edition(record) => record.key,
            Account::EditionMarker(record) => record.key,
        }
    }
}
