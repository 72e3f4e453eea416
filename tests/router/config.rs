//! Routers built from `contract.toml`.

use contractapi::{ConfigError, RegistrationError, Router, RouterConfig, CONFIG_FILE_NAME};
use contractapi_samples::multi;
use tempfile::TempDir;

use crate::common::TestChaincode;

fn load(content: &str) -> Result<RouterConfig, ConfigError> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, content).unwrap();
    RouterConfig::from_file(&path)
}

#[test]
fn configured_default_contract() {
    let config = load("default_contract = \"complexasset\"\n").unwrap();
    let router = Router::builder()
        .with_config(config)
        .register(multi::simple_contract())
        .register(multi::complex_contract())
        .build()
        .unwrap();
    let cc = TestChaincode::new(router);

    cc.submit(&["Create", "COMPLEX_ASSET_1"]);
    cc.query(&["ReadColours", "COMPLEX_ASSET_1"], "[]");
    assert_eq!(cc.router.metadata().default_contract, "complexasset");
}

#[test]
fn unknown_default_contract_fails_build() {
    let config = load("default_contract = \"nosuch\"\n").unwrap();
    let err = Router::builder()
        .with_config(config)
        .register(multi::simple_contract())
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        RegistrationError::UnknownDefaultContract {
            name: "nosuch".into()
        }
    );
}

#[test]
fn metadata_info_and_system_contract_switch() {
    let config = load(
        r#"
system_contract = false

[metadata]
title = "asset-transfer"
version = "1.0.0"
"#,
    )
    .unwrap();
    let router = Router::builder()
        .with_config(config)
        .register(multi::simple_contract())
        .build()
        .unwrap();
    let cc = TestChaincode::new(router);

    assert_eq!(cc.router.metadata().info.title, "asset-transfer");
    cc.query_err(
        &["org.hyperledger.fabric:GetMetadata"],
        "Contract not found with name org.hyperledger.fabric",
    );
}

#[test]
fn default_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    RouterConfig::write_default_if_missing(&path).unwrap();
    assert_eq!(RouterConfig::from_file(&path).unwrap(), RouterConfig::default());
}

#[test]
fn invalid_file_is_reported() {
    let err = load("default_contract = 7\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains(CONFIG_FILE_NAME));
}
