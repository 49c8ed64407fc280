//! Instruction types
//!
//! Argument records for the metadata program's instructions. These are
//! constructed fresh per request, encoded, and handed to the external
//! transaction-construction layer as raw payload bytes; they are never
//! stored in accounts. The leading `instruction` byte is fixed per type.

use {
    crate::{
        codec::{encode, WireRecord},
        error::CodecError,
        pubkey::Pubkey,
        schema::TypeTag,
        state::Data,
        value::Value,
    },
    serde::{Deserialize, Serialize},
};

/// Payload for the CreateMetadata instruction (discriminant 0).
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CreateMetadataArgs {
    /// The metadata to store
    pub data: Data,
    /// Whether the update authority may change it later
    pub is_mutable: bool,
}

impl CreateMetadataArgs {
    const INSTRUCTION: u8 = 0;

    /// Pack the args into an instruction payload.
    pub fn pack(&self) -> Result<Vec<u8>, CodecError> {
        encode(self)
    }
}

impl WireRecord for CreateMetadataArgs {
    const TAG: TypeTag = TypeTag::CreateMetadataArgs;

    fn from_value(value: Value) -> Result<Self, CodecError> {
        let mut fields = value.into_fields()?;
        let _instruction = fields.next()?.into_u8()?;
        Ok(Self {
            data: Data::from_value(fields.next()?)?,
            is_mutable: fields.next()?.into_bool()?,
        })
    }

    fn to_value(&self) -> Value {
        Value::Struct(vec![
            Value::U8(Self::INSTRUCTION),
            self.data.to_value(),
            Value::Bool(self.is_mutable),
        ])
    }
}

/// Payload for the UpdateMetadata instruction (discriminant 1).
///
/// Every field is optional; an absent field leaves the on-chain value
/// unchanged.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct UpdateMetadataArgs {
    /// Replacement metadata, if any
    pub data: Option<Data>,
    /// New update authority, if any
    pub update_authority: Option<Pubkey>,
    /// New primary-sale flag, if any
    pub primary_sale_happened: Option<bool>,
}

impl UpdateMetadataArgs {
    const INSTRUCTION: u8 = 1;

    /// Pack the args into an instruction payload.
    pub fn pack(&self) -> Result<Vec<u8>, CodecError> {
        encode(self)
    }
}

impl WireRecord for UpdateMetadataArgs {
    const TAG: TypeTag = TypeTag::UpdateMetadataArgs;

    fn from_value(value: Value) -> Result<Self, CodecError> {
        let mut fields = value.into_fields()?;
        let _instruction = fields.next()?.into_u8()?;
        let data = match fields.next()?.into_option()? {
            Some(data) => Some(Data::from_value(data)?),
            None => None,
        };
        Ok(Self {
            data,
            update_authority: fields
                .next()?
                .into_option()?
                .map(Value::into_pubkey)
                .transpose()?,
            primary_sale_happened: fields
                .next()?
                .into_option()?
                .map(Value::into_bool)
                .transpose()?,
        })
    }

    fn to_value(&self) -> Value {
        Value::Struct(vec![
            Value::U8(Self::INSTRUCTION),
            Value::Option(self.data.as_ref().map(|data| Box::new(data.to_value()))),
            Value::Option(self.update_authority.map(|pk| Box::new(Value::Pubkey(pk)))),
            Value::Option(
                self.primary_sale_happened
                    .map(|flag| Box::new(Value::Bool(flag))),
            ),
        ])
    }
}

/// Payload for the CreateMasterEdition instruction (discriminant 10).
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct CreateMasterEditionArgs {
    /// Cap on prints, unlimited when absent
    pub max_supply: Option<u64>,
}

impl CreateMasterEditionArgs {
    const INSTRUCTION: u8 = 10;

    /// Pack the args into an instruction payload.
    pub fn pack(&self) -> Result<Vec<u8>, CodecError> {
        encode(self)
    }
}

impl WireRecord for CreateMasterEditionArgs {
    const TAG: TypeTag = TypeTag::CreateMasterEditionArgs;

    fn from_value(value: Value) -> Result<Self, CodecError> {
        let mut fields = value.into_fields()?;
        let _instruction = fields.next()?.into_u8()?;
        Ok(Self {
            max_supply: fields.next()?.into_option()?.map(Value::into_u64).transpose()?,
        })
    }

    fn to_value(&self) -> Value {
        Value::Struct(vec![
            Value::U8(Self::INSTRUCTION),
            Value::Option(self.max_supply.map(|v| Box::new(Value::U64(v)))),
        ])
    }
}

/// Payload for the MintPrintingTokens instruction (discriminant 9).
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MintPrintingTokensArgs {
    /// Number of printing tokens to mint
    pub supply: u64,
}

impl MintPrintingTokensArgs {
    const INSTRUCTION: u8 = 9;

    /// Pack the args into an instruction payload.
    pub fn pack(&self) -> Result<Vec<u8>, CodecError> {
        encode(self)
    }
}

impl WireRecord for MintPrintingTokensArgs {
    const TAG: TypeTag = TypeTag::MintPrintingTokensArgs;

    fn from_value(value: Value) -> Result<Self, CodecError> {
        let mut fields = value.into_fields()?;
        let _instruction = fields.next()?.into_u8()?;
        Ok(Self {
            supply: fields.next()?.into_u64()?,
        })
    }

    fn to_value(&self) -> Value {
        Value::Struct(vec![Value::U8(Self::INSTRUCTION), Value::U64(self.supply)])
    }
}
