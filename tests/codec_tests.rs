//! End-to-end codec tests over the account and instruction schemas.

use token_metadata_codec::{
    codec::{decode, decode_batch, encode, AccountDecode},
    error::CodecError,
    instruction::{
        CreateMasterEditionArgs, CreateMetadataArgs, MintPrintingTokensArgs, UpdateMetadataArgs,
    },
    pubkey::Pubkey,
    state::{Account, Creator, Data, Edition, EditionMarker, Key, MasterEditionV1, MasterEditionV2, Metadata},
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().try_init();
}

fn pk(byte: u8) -> Pubkey {
    Pubkey::new_from_array([byte; 32])
}

fn sample_metadata() -> Metadata {
    Metadata {
        key: Key::MetadataV1,
        update_authority: pk(0xAB),
        mint: pk(0xCD),
        data: Data {
            name: "Soldier #1".to_string(),
            symbol: "SLDR".to_string(),
            uri: "https://arweave.net/3d-soldier-1".to_string(),
            seller_fee_basis_points: 500,
            creators: Some(vec![
                Creator {
                    address: pk(0x01),
                    verified: true,
                    share: 0,
                },
                Creator {
                    address: pk(0x02),
                    verified: false,
                    share: 60,
                },
                Creator {
                    address: pk(0x03),
                    verified: false,
                    share: 40,
                },
            ]),
        },
        primary_sale_happened: true,
        is_mutable: true,
    }
}

#[test]
fn metadata_round_trips_with_creator_order_preserved() -> anyhow::Result<()> {
    let metadata = sample_metadata();
    let decoded: Metadata = decode(&encode(&metadata)?)?;
    assert_eq!(decoded, metadata);

    let creators = decoded.data.creators.unwrap();
    assert_eq!(creators.len(), 3);
    assert_eq!(creators[0].address, pk(0x01));
    assert_eq!(creators[1].share, 60);
    assert_eq!(creators[2].share, 40);
    Ok(())
}

#[test]
fn decode_encode_decode_is_idempotent() -> anyhow::Result<()> {
    let first = encode(&sample_metadata())?;
    let decoded: Metadata = decode(&first)?;
    let second = encode(&decoded)?;
    assert_eq!(first, second);
    let again: Metadata = decode(&second)?;
    assert_eq!(again, decoded);
    assert_eq!(again.key, Key::MetadataV1);
    Ok(())
}

#[test]
fn absent_creators_and_empty_creators_stay_distinct() -> anyhow::Result<()> {
    let absent = Data {
        creators: None,
        ..Data::default()
    };
    let empty = Data {
        creators: Some(vec![]),
        ..Data::default()
    };

    let absent_bytes = encode(&absent)?;
    let empty_bytes = encode(&empty)?;
    assert_ne!(absent_bytes, empty_bytes);

    let absent_back: Data = decode(&absent_bytes)?;
    assert_eq!(absent_back.creators, None);
    let empty_back: Data = decode(&empty_bytes)?;
    assert_eq!(empty_back.creators, Some(vec![]));
    Ok(())
}

#[test]
fn trailing_bytes_are_ignored() -> anyhow::Result<()> {
    // accounts are allocated larger than the logical record
    let mut buf = encode(&sample_metadata())?;
    let logical_len = buf.len();
    buf.resize(logical_len + 300, 0);
    let decoded: Metadata = decode(&buf)?;
    assert_eq!(decoded, sample_metadata());
    Ok(())
}

#[test]
fn short_buffer_fails_with_unexpected_eof() -> anyhow::Result<()> {
    let buf = encode(&sample_metadata())?;
    let err = decode::<Metadata>(&buf[..buf.len() - 1]).unwrap_err();
    assert!(matches!(err, CodecError::UnexpectedEof { .. }));

    let err = decode::<Metadata>(&[]).unwrap_err();
    assert!(matches!(err, CodecError::UnexpectedEof { .. }));
    Ok(())
}

#[test]
fn mismatched_schema_misdecodes_without_crashing() -> anyhow::Result<()> {
    // The codec never checks the discriminant against the requested
    // schema. Reading a metadata buffer as a master edition yields a
    // well-defined wrong answer, not a failure.
    let buf = encode(&sample_metadata())?;
    let misread: MasterEditionV2 = decode(&buf)?;

    // supply comes from the first 8 bytes of update_authority,
    // max_supply's flag and payload from the bytes after them
    assert_eq!(misread.supply, u64::from_le_bytes([0xAB; 8]));
    assert_eq!(misread.max_supply, Some(u64::from_le_bytes([0xAB; 8])));
    assert_eq!(misread.key, Key::MasterEditionV2);
    Ok(())
}

#[test]
fn master_editions_round_trip() -> anyhow::Result<()> {
    let v2 = MasterEditionV2 {
        key: Key::MasterEditionV2,
        supply: 17,
        max_supply: Some(1000),
    };
    assert_eq!(decode::<MasterEditionV2>(&encode(&v2)?)?, v2);

    let open_supply = MasterEditionV2 {
        max_supply: None,
        ..v2
    };
    assert_eq!(decode::<MasterEditionV2>(&encode(&open_supply)?)?, open_supply);

    let v1 = MasterEditionV1 {
        key: Key::MasterEditionV1,
        supply: 3,
        max_supply: Some(10),
        printing_mint: pk(0x44),
        one_time_printing_authorization_mint: pk(0x55),
    };
    assert_eq!(decode::<MasterEditionV1>(&encode(&v1)?)?, v1);
    Ok(())
}

#[test]
fn edition_decodes_from_raw_account_bytes() -> anyhow::Result<()> {
    // key = EditionV1, parent = 32 x 0x11, edition = 5
    let mut fixture = String::from("01");
    fixture.push_str(&"11".repeat(32));
    fixture.push_str("0500000000000000");
    let buf = hex::decode(fixture)?;

    let edition: Edition = decode(&buf)?;
    assert_eq!(edition.key, Key::EditionV1);
    assert_eq!(edition.parent, pk(0x11));
    assert_eq!(edition.edition, 5);
    assert_eq!(encode(&edition)?, buf);
    Ok(())
}

#[test]
fn edition_marker_round_trips() -> anyhow::Result<()> {
    let mut ledger = [0u8; 31];
    ledger[0] = 0x80;
    ledger[30] = 0x01;
    let marker = EditionMarker {
        key: Key::EditionMarker,
        ledger,
    };
    let buf = encode(&marker)?;
    assert_eq!(buf.len(), 1 + 31);
    let decoded: EditionMarker = decode(&buf)?;
    assert_eq!(decoded, marker);
    assert!(decoded.edition_taken(0)?);
    assert!(decoded.edition_taken(247)?);
    assert!(!decoded.edition_taken(100)?);
    Ok(())
}

#[test]
fn update_args_payload_matches_on_chain_layout() -> anyhow::Result<()> {
    let authority = pk(0x2A);
    let args = UpdateMetadataArgs {
        data: None,
        update_authority: Some(authority),
        primary_sale_happened: None,
    };

    let mut expected = vec![1u8]; // instruction
    expected.push(0); // data absent
    expected.push(1); // update_authority present
    expected.extend_from_slice(authority.as_ref());
    expected.push(0); // primary_sale_happened absent

    assert_eq!(args.pack()?, expected);
    assert_eq!(decode::<UpdateMetadataArgs>(&expected)?, args);
    Ok(())
}

#[test]
fn instruction_args_round_trip() -> anyhow::Result<()> {
    let create = CreateMetadataArgs {
        data: sample_metadata().data,
        is_mutable: true,
    };
    assert_eq!(decode::<CreateMetadataArgs>(&create.pack()?)?, create);
    assert_eq!(create.pack()?[0], 0);

    let master = CreateMasterEditionArgs {
        max_supply: Some(111),
    };
    assert_eq!(decode::<CreateMasterEditionArgs>(&master.pack()?)?, master);
    assert_eq!(master.pack()?[0], 10);

    let printing = MintPrintingTokensArgs { supply: 7 };
    assert_eq!(decode::<MintPrintingTokensArgs>(&printing.pack()?)?, printing);
    assert_eq!(printing.pack()?[0], 9);

    let update = UpdateMetadataArgs {
        data: Some(sample_metadata().data),
        update_authority: None,
        primary_sale_happened: Some(true),
    };
    assert_eq!(decode::<UpdateMetadataArgs>(&update.pack()?)?, update);
    Ok(())
}

#[test]
fn batch_decode_isolates_per_account_failures() -> anyhow::Result<()> {
    init_tracing();

    let good = encode(&sample_metadata())?;
    let malformed = vec![4u8, 1, 2, 3]; // right discriminant, truncated body
    let accounts = vec![Some(good.as_slice()), None, Some(malformed.as_slice())];

    let outcomes = decode_batch::<Metadata, _>(accounts);
    assert_eq!(outcomes.len(), 3);
    assert!(matches!(outcomes[0], AccountDecode::Record(_)));
    assert!(matches!(outcomes[1], AccountDecode::Missing));
    assert!(matches!(
        outcomes[2],
        AccountDecode::Invalid(CodecError::UnexpectedEof { .. })
    ));

    let records: Vec<Metadata> = outcomes.into_iter().filter_map(AccountDecode::record).collect();
    assert_eq!(records, vec![sample_metadata()]);
    Ok(())
}

#[test]
fn account_sum_type_dispatches_by_caller_key() -> anyhow::Result<()> {
    let buf = encode(&sample_metadata())?;
    let key = Key::from_byte(buf[0]).unwrap();
    let account = Account::decode(key, &buf)?;
    assert_eq!(account.key(), Key::MetadataV1);
    assert_eq!(account.encode()?, buf);
    match account {
        Account::Metadata(metadata) => assert_eq!(metadata, sample_metadata()),
        other => panic!("expected metadata, got {other:?}"),
    }

    assert_eq!(
        Account::decode(Key::Uninitialized, &buf).unwrap_err(),
        CodecError::SchemaNotFound("Uninitialized")
    );
    Ok(())
}

/// Stand-in for the network layer's PDA hashing: digests the seeds and
/// program id into a deterministic fake address.
struct FakeDeriver;

impl token_metadata_codec::AddressDeriver for FakeDeriver {
    fn find_program_address(&self, seeds: &[&[u8]], program_id: &Pubkey) -> Pubkey {
        let mut bytes = [0u8; 32];
        let mut cursor = 0usize;
        for seed in seeds.iter().copied().chain([program_id.as_ref()]) {
            for &b in seed {
                bytes[cursor % 32] ^= b.rotate_left((cursor % 7) as u32);
                cursor += 1;
            }
        }
        Pubkey::new_from_array(bytes)
    }
}

#[test]
fn derived_addresses_are_deterministic_per_mint() {
    let mint = pk(0xCD);
    let other_mint = pk(0xCE);

    let metadata = token_metadata_codec::find_metadata_address(&FakeDeriver, &mint);
    assert_eq!(
        metadata,
        token_metadata_codec::find_metadata_address(&FakeDeriver, &mint)
    );
    assert_ne!(
        metadata,
        token_metadata_codec::find_metadata_address(&FakeDeriver, &other_mint)
    );
}

#[test]
fn pda_seeds_follow_the_program_convention() {
    let program_id = token_metadata_codec::id();
    let mint = pk(0xCD);

    let seeds = token_metadata_codec::metadata_seeds(&program_id, &mint);
    assert_eq!(seeds[0], b"metadata");
    assert_eq!(seeds[1], program_id.as_ref());
    assert_eq!(seeds[2], mint.as_ref());

    let seeds = token_metadata_codec::edition_seeds(&program_id, &mint);
    assert_eq!(seeds[..3], token_metadata_codec::metadata_seeds(&program_id, &mint));
    assert_eq!(seeds[3], b"edition");
}

#[test]
fn records_serialize_for_the_metadata_cache() -> anyhow::Result<()> {
    let metadata = sample_metadata();
    let json = serde_json::to_value(&metadata)?;

    // addresses appear as base58 text, never raw bytes
    assert_eq!(
        json["update_authority"],
        serde_json::Value::String(pk(0xAB).to_base58())
    );
    assert_eq!(json["data"]["name"], "Soldier #1");
    assert_eq!(
        json["data"]["creators"][0]["address"],
        serde_json::Value::String(pk(0x01).to_base58())
    );

    let back: Metadata = serde_json::from_value(json)?;
    assert_eq!(back, metadata);
    Ok(())
}
