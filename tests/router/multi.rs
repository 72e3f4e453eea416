//! Two contracts in one chaincode.

use contractapi_samples::multi::{self, ComplexAsset};

use crate::common::TestChaincode;

fn deploy() -> TestChaincode {
    let cc = TestChaincode::new(multi::router().unwrap());
    cc.submit(&["simpleasset:Create", "SIMPLE_ASSET_1"]);
    cc.submit(&["complexasset:Create", "COMPLEX_ASSET_1"]);
    cc
}

#[test]
fn simple_contract_by_name() {
    let cc = deploy();
    cc.query(&["simpleasset:Read", "SIMPLE_ASSET_1"], "Initialised");
    cc.submit(&["simpleasset:Update", "SIMPLE_ASSET_1", "Updated"]);
    cc.query(&["simpleasset:Read", "SIMPLE_ASSET_1"], "Updated");
    cc.query_err(
        &["simpleasset:Read", "SIMPLE_ASSET_2"],
        "Cannot read asset. Asset with id SIMPLE_ASSET_2 does not exist",
    );
    cc.submit_err(&["simpleasset:Update", "SIMPLE_ASSET_2", "Update"]);
}

#[test]
fn complex_asset_round_trip() {
    let cc = deploy();
    cc.submit(&["complexasset:UpdateValue", "COMPLEX_ASSET_1", "101.23"]);
    cc.submit(&[
        "complexasset:AddColours",
        "COMPLEX_ASSET_1",
        r#"["red", "white", "blue"]"#,
    ]);

    cc.query(
        &["complexasset:Read", "COMPLEX_ASSET_1"],
        "Regulator - 101.23 - [red white blue]",
    );
    cc.query(&["complexasset:ReadValue", "COMPLEX_ASSET_1"], "101.23");
    cc.query(
        &["complexasset:ReadColours", "COMPLEX_ASSET_1"],
        r#"["red","white","blue"]"#,
    );

    let stored: ComplexAsset =
        serde_json::from_slice(&cc.state.get("COMPLEX_ASSET_1").unwrap()).unwrap();
    assert_eq!(stored.colours, ["red", "white", "blue"]);
}

#[test]
fn fresh_complex_asset() {
    let cc = deploy();
    cc.query(&["complexasset:Read", "COMPLEX_ASSET_1"], "Regulator - 0 - []");
    cc.query(&["complexasset:ReadColours", "COMPLEX_ASSET_1"], "[]");
}

#[test]
fn complex_contract_rejects_simple_asset() {
    let cc = deploy();
    cc.query_err(
        &["complexasset:Read", "SIMPLE_ASSET_1"],
        "Asset with id SIMPLE_ASSET_1 is not a ComplexAsset",
    );
    cc.submit_err(&["complexasset:UpdateOwner", "SIMPLE_ASSET_1", "Andy"]);
    cc.query(&["simpleasset:Read", "SIMPLE_ASSET_1"], "Initialised");
}

#[test]
fn bad_value_is_conversion_error() {
    let cc = deploy();
    let response = cc.invoke(&["complexasset:UpdateValue", "COMPLEX_ASSET_1", "lots"]);
    let message = response.message().unwrap();
    assert!(message.contains("parameter 1"), "{}", message);
    cc.query(&["complexasset:ReadValue", "COMPLEX_ASSET_1"], "0");
}

#[test]
fn per_contract_unknown_handlers() {
    let cc = deploy();
    cc.query_err(
        &["simpleasset:BadFunction", "SIMPLE_ASSET_1"],
        "Unknown function name simpleasset:BadFunction passed to simple asset with args [SIMPLE_ASSET_1]",
    );
    cc.query_err(
        &["complexasset:BadFunction", "COMPLEX_ASSET_1"],
        "Unknown function name complexasset:BadFunction passed to complex asset with args [COMPLEX_ASSET_1]",
    );
    cc.query_err(
        &["complexasset:Update", "SIMPLE_ASSET_1"],
        "Unknown function name complexasset:Update passed to complex asset with args [SIMPLE_ASSET_1]",
    );
}

#[test]
fn bare_name_never_reaches_other_contract() {
    let cc = deploy();
    cc.query_err(
        &["ReadColours", "COMPLEX_ASSET_1"],
        "Unknown function name ReadColours passed to simple asset with args [COMPLEX_ASSET_1]",
    );
    cc.query(&["Read", "SIMPLE_ASSET_1"], "Initialised");
}
