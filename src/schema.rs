//! Schema registry
//!
//! Every record and instruction-argument type this crate understands is
//! described by an ordered field list. The registry is built once, is
//! immutable afterwards, and may be shared freely across threads; lookup
//! is a hash-map probe keyed by an explicit [`TypeTag`] rather than by
//! runtime type identity.
//!
//! The field lists reproduce the on-chain program's account layout
//! exactly. Nothing here validates buffer lengths or discriminants;
//! the schema only says what to read next.

use {
    crate::{error::CodecError, state::Key},
    std::{collections::HashMap, fmt, sync::OnceLock},
};

/// Identifies a schema in the registry.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TypeTag {
    /// Metadata account
    Metadata,
    /// Shared metadata fields (name/symbol/uri/fees/creators)
    Data,
    /// One creator entry inside `Data`
    Creator,
    /// Deprecated master edition with printing mints
    MasterEditionV1,
    /// Current master edition
    MasterEditionV2,
    /// Numbered print of a master edition
    Edition,
    /// Packed bitset of minted edition numbers
    EditionMarker,
    /// CreateMetadata instruction payload
    CreateMetadataArgs,
    /// UpdateMetadata instruction payload
    UpdateMetadataArgs,
    /// CreateMasterEdition instruction payload
    CreateMasterEditionArgs,
    /// MintPrintingTokens instruction payload
    MintPrintingTokensArgs,
}

impl TypeTag {
    /// Stable name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Metadata => "Metadata",
            TypeTag::Data => "Data",
            TypeTag::Creator => "Creator",
            TypeTag::MasterEditionV1 => "MasterEditionV1",
            TypeTag::MasterEditionV2 => "MasterEditionV2",
            TypeTag::Edition => "Edition",
            TypeTag::EditionMarker => "EditionMarker",
            TypeTag::CreateMetadataArgs => "CreateMetadataArgs",
            TypeTag::UpdateMetadataArgs => "UpdateMetadataArgs",
            TypeTag::CreateMasterEditionArgs => "CreateMasterEditionArgs",
            TypeTag::MintPrintingTokensArgs => "MintPrintingTokensArgs",
        }
    }

    /// Map an account key to the schema used to decode that account.
    ///
    /// `Uninitialized` has no layout and fails with
    /// [`CodecError::SchemaNotFound`].
    pub fn for_key(key: Key) -> Result<Self, CodecError> {
        match key {
            Key::Uninitialized => Err(CodecError::SchemaNotFound("Uninitialized")),
            Key::EditionV1 => Ok(TypeTag::Edition),
            Key::MasterEditionV1 => Ok(TypeTag::MasterEditionV1),
            Key::MetadataV1 => Ok(TypeTag::Metadata),
            Key::MasterEditionV2 => Ok(TypeTag::MasterEditionV2),
            Key::EditionMarker => Ok(TypeTag::EditionMarker),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wire type of a single field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WireType {
    /// One byte
    U8,
    /// Little-endian u16
    U16,
    /// Little-endian u64
    U64,
    /// One byte, any nonzero value reads as true
    Bool,
    /// 4-byte LE byte-length prefix + UTF-8 bytes
    String,
    /// 32 raw bytes, base58 text at the domain boundary
    Pubkey,
    /// Exactly this many raw bytes, no prefix
    FixedArray(usize),
    /// 1-byte presence flag, payload if nonzero
    Option(Box<WireType>),
    /// 4-byte LE count prefix + packed elements
    List(Box<WireType>),
    /// Nested struct, resolved through the registry
    Struct(TypeTag),
}

/// One named field in a struct schema.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Field {
    /// Field name, matching the domain model
    pub name: &'static str,
    /// Wire type of the field
    pub ty: WireType,
}

impl Field {
    fn new(name: &'static str, ty: WireType) -> Self {
        Self { name, ty }
    }
}

/// Ordered field list for one record type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StructSchema {
    /// Fields in wire order
    pub fields: Vec<Field>,
}

/// Process-wide, immutable mapping from [`TypeTag`] to field layout.
#[derive(Debug)]
pub struct SchemaRegistry {
    schemas: HashMap<TypeTag, StructSchema>,
}

impl SchemaRegistry {
    /// The shared registry, built on first use.
    pub fn global() -> &'static SchemaRegistry {
        static REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();
        REGISTRY.get_or_init(SchemaRegistry::build)
    }

    /// Look up the schema for `tag`.
    pub fn schema(&self, tag: TypeTag) -> Result<&StructSchema, CodecError> {
        self.schemas
            .get(&tag)
            .ok_or(CodecError::SchemaNotFound(tag.name()))
    }

    fn build() -> Self {
        use WireType::*;

        let mut schemas = HashMap::new();
        let mut insert = |tag: TypeTag, fields: Vec<Field>| {
            schemas.insert(tag, StructSchema { fields });
        };

        insert(
            TypeTag::Creator,
            vec![
                Field::new("address", Pubkey),
                Field::new("verified", Bool),
                Field::new("share", U8),
            ],
        );
        insert(
            TypeTag::Data,
            vec![
                Field::new("name", String),
                Field::new("symbol", String),
                Field::new("uri", String),
                Field::new("seller_fee_basis_points", U16),
                Field::new(
                    "creators",
                    Option(Box::new(List(Box::new(Struct(TypeTag::Creator))))),
                ),
            ],
        );
        insert(
            TypeTag::Metadata,
            vec![
                Field::new("key", U8),
                Field::new("update_authority", Pubkey),
                Field::new("mint", Pubkey),
                Field::new("data", Struct(TypeTag::Data)),
                Field::new("primary_sale_happened", Bool),
                Field::new("is_mutable", Bool),
            ],
        );
        insert(
            TypeTag::MasterEditionV1,
            vec![
                Field::new("key", U8),
                Field::new("supply", U64),
                Field::new("max_supply", Option(Box::new(U64))),
                Field::new("printing_mint", Pubkey),
                Field::new("one_time_printing_authorization_mint", Pubkey),
            ],
        );
        insert(
            TypeTag::MasterEditionV2,
            vec![
                Field::new("key", U8),
                Field::new("supply", U64),
                Field::new("max_supply", Option(Box::new(U64))),
            ],
        );
        insert(
            TypeTag::Edition,
            vec![
                Field::new("key", U8),
                Field::new("parent", Pubkey),
                Field::new("edition", U64),
            ],
        );
        insert(
            TypeTag::EditionMarker,
            vec![
                Field::new("key", U8),
                Field::new("ledger", FixedArray(crate::EDITION_MARKER_LEDGER_LEN)),
            ],
        );
        insert(
            TypeTag::CreateMetadataArgs,
            vec![
                Field::new("instruction", U8),
                Field::new("data", Struct(TypeTag::Data)),
                Field::new("is_mutable", Bool),
            ],
        );
        insert(
            TypeTag::UpdateMetadataArgs,
            vec![
                Field::new("instruction", U8),
                Field::new("data", Option(Box::new(Struct(TypeTag::Data)))),
                Field::new("update_authority", Option(Box::new(Pubkey))),
                Field::new("primary_sale_happened", Option(Box::new(Bool))),
            ],
        );
        insert(
            TypeTag::CreateMasterEditionArgs,
            vec![
                Field::new("instruction", U8),
                Field::new("max_supply", Option(Box::new(U64))),
            ],
        );
        insert(
            TypeTag::MintPrintingTokensArgs,
            vec![
                Field::new("instruction", U8),
                Field::new("supply", U64),
            ],
        );

        Self { schemas }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_is_registered() {
        let registry = SchemaRegistry::global();
        for tag in [
            TypeTag::Metadata,
            TypeTag::Data,
            TypeTag::Creator,
            TypeTag::MasterEditionV1,
            TypeTag::MasterEditionV2,
            TypeTag::Edition,
            TypeTag::EditionMarker,
            TypeTag::CreateMetadataArgs,
            TypeTag::UpdateMetadataArgs,
            TypeTag::CreateMasterEditionArgs,
            TypeTag::MintPrintingTokensArgs,
        ] {
            assert!(registry.schema(tag).is_ok(), "missing schema for {tag}");
        }
    }

    #[test]
    fn uninitialized_key_has_no_schema() {
        assert_eq!(
            TypeTag::for_key(Key::Uninitialized).unwrap_err(),
            CodecError::SchemaNotFound("Uninitialized")
        );
    }

    #[test]
    fn metadata_fields_are_in_wire_order() {
        let schema = SchemaRegistry::global().schema(TypeTag::Metadata).unwrap();
        let names: Vec<_> = schema.fields.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            [
                "key",
                "update_authority",
                "mint",
                "data",
                "primary_sale_happened",
                "is_mutable"
            ]
        );
    }

    #[test]
    fn account_keys_map_to_their_schemas() {
        assert_eq!(TypeTag::for_key(Key::MetadataV1).unwrap(), TypeTag::Metadata);
        assert_eq!(TypeTag::for_key(Key::EditionV1).unwrap(), TypeTag::Edition);
        assert_eq!(
            TypeTag::for_key(Key::EditionMarker).unwrap(),
            TypeTag::EditionMarker
        );
    }
}
