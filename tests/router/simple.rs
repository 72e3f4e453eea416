//! The simple asset chaincode: one unnamed contract.

use contractapi_samples::{simple, INITIALISED};

use crate::common::TestChaincode;

fn deploy() -> TestChaincode {
    let cc = TestChaincode::new(simple::router().unwrap());
    cc.submit(&["SimpleAsset:Create", "ASSET_1"]);
    cc
}

#[test]
fn create_stores_sentinel() {
    let cc = deploy();
    assert_eq!(cc.state.get_string("ASSET_1").as_deref(), Some(INITIALISED));
    cc.query(&["SimpleAsset:Read", "ASSET_1"], "Initialised");
}

#[test]
fn bare_name_uses_default_contract() {
    let cc = deploy();
    cc.query(&["Read", "ASSET_1"], "Initialised");
}

#[test]
fn update_then_read() {
    let cc = deploy();
    cc.submit(&["SimpleAsset:Update", "ASSET_1", "Updated"]);
    cc.query(&["SimpleAsset:Read", "ASSET_1"], "Updated");
}

#[test]
fn duplicate_create_fails() {
    let cc = deploy();
    cc.query_err(
        &["SimpleAsset:Create", "ASSET_1"],
        "Cannot create asset. Asset with id ASSET_1 already exists",
    );
    assert_eq!(cc.state.get_string("ASSET_1").as_deref(), Some(INITIALISED));
}

#[test]
fn missing_asset_errors() {
    let cc = deploy();
    cc.query_err(
        &["SimpleAsset:Read", "ASSET_2"],
        "Cannot read asset. Asset with id ASSET_2 does not exist",
    );
    cc.submit_err(&["SimpleAsset:Update", "ASSET_2", "Update"]);
    assert!(cc.state.get("ASSET_2").is_none());
}

#[test]
fn unknown_function_and_contract() {
    let cc = deploy();
    cc.query_err(
        &["SimpleAsset:BadFunction", "ASSET_1"],
        "Function BadFunction not found in contract SimpleAsset",
    );
    cc.query_err(
        &["badname:Read", "ASSET_1"],
        "Contract not found with name badname",
    );
}

#[test]
fn wrong_argument_count() {
    let cc = deploy();
    cc.query_err(
        &["SimpleAsset:Update", "ASSET_1"],
        "Incorrect number of params. Expected 2, received 1",
    );
}

#[test]
fn storage_outage_is_distinct_from_absence() {
    let cc = deploy();
    cc.state.set_available(false);
    cc.query_err(
        &["SimpleAsset:Read", "ASSET_1"],
        "Unable to interact with world state",
    );
    cc.state.set_available(true);
    cc.query(&["SimpleAsset:Read", "ASSET_1"], "Initialised");
}
