//! Validates configuration fixtures against the frozen JSON schema.

use jsonschema::JSONSchema;
use mosaic_canvas_mosaic::{MosaicConfig, Rounding};
use serde_json::Value;

const SCHEMA_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../contracts/mosaic-config.schema.json"
);
const VALID_FIXTURE_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../contracts/fixtures/mosaic-config.valid.json"
);
const INVALID_FIXTURE_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../contracts/fixtures/mosaic-config.invalid.json"
);

fn load_json(path: &str) -> Value {
    let raw = std::fs::read_to_string(path).expect("json file should be readable");
    serde_json::from_str(&raw).expect("json file should be valid")
}

fn compile_validator(schema_path: &str) -> JSONSchema {
    let schema = load_json(schema_path);
    JSONSchema::compile(&schema).expect("schema should compile")
}

#[test]
fn config_fixture_matches_schema() {
    let validator = compile_validator(SCHEMA_PATH);
    let fixture = load_json(VALID_FIXTURE_PATH);
    assert!(
        validator.is_valid(&fixture),
        "config fixture should validate against schema"
    );
}

#[test]
fn invalid_config_fixture_fails_schema_and_decoder() {
    let validator = compile_validator(SCHEMA_PATH);
    let fixture = load_json(INVALID_FIXTURE_PATH);
    assert!(!validator.is_valid(&fixture));

    let raw = serde_json::to_vec(&fixture).expect("fixture should encode");
    assert!(MosaicConfig::from_json_bytes(&raw).is_err());
}

#[test]
fn valid_fixture_decodes_into_config() {
    let raw = std::fs::read(VALID_FIXTURE_PATH).expect("fixture should be readable");
    let config = MosaicConfig::from_json_bytes(&raw).expect("fixture should decode");
    assert_eq!(config.block_size.get(), 16);
    assert_eq!(config.rounding, Rounding::Nearest);
}

#[test]
fn encoded_default_config_matches_schema() {
    let validator = compile_validator(SCHEMA_PATH);
    let encoded = MosaicConfig::default()
        .to_json_bytes()
        .expect("default config should encode");
    let value: Value = serde_json::from_slice(&encoded).expect("encoded config is json");
    assert!(validator.is_valid(&value));
    assert_eq!(value["block_size"], 24);
    assert_eq!(value["rounding"], "truncate");
}
