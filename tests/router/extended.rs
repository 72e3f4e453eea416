//! The extended chaincode: custom context, before-hook, unknown handler.

use contractapi::Router;
use contractapi_samples::{counter, extended};

use crate::common::TestChaincode;

fn deploy(name: &str) -> TestChaincode {
    let router = Router::builder()
        .register(extended::contract(name))
        .build()
        .unwrap();
    TestChaincode::new(router)
}

#[test]
fn before_hook_feeds_functions() {
    let cc = deploy("");
    cc.submit(&["SimpleAsset:Create", "ASSET_1"]);
    cc.query(&["SimpleAsset:Read", "ASSET_1"], "Initialised");
    cc.submit(&["SimpleAsset:Update", "ASSET_1", "Updated"]);
    cc.query(&["SimpleAsset:Read", "ASSET_1"], "Updated");
    cc.query_err(
        &["SimpleAsset:Create", "ASSET_1"],
        "Cannot create asset. Asset with id ASSET_1 already exists",
    );
}

#[test]
fn missing_asset_errors() {
    let cc = deploy("");
    cc.query_err(
        &["SimpleAsset:Read", "ASSET_2"],
        "Cannot read asset. Asset with id ASSET_2 does not exist",
    );
    cc.query_err(
        &["SimpleAsset:Update", "ASSET_2", "Update"],
        "Cannot update asset. Asset with id ASSET_2 does not exist",
    );
}

#[test]
fn unknown_handler_echoes_call() {
    let cc = deploy("");
    cc.query_err(
        &["SimpleAsset:BadFunction", "ASSET_1"],
        "Unknown function name SimpleAsset:BadFunction passed with args [ASSET_1]",
    );
    assert_eq!(cc.state.len(), 0);
}

#[test]
fn custom_dotted_name() {
    let cc = deploy("org.asset.simple");
    cc.submit(&["org.asset.simple:Create", "SIMPLE_ASSET_1"]);
    cc.query(&["org.asset.simple:Read", "SIMPLE_ASSET_1"], "Initialised");
    cc.query_err(
        &["org.asset.simple:BadFunction", "SIMPLE_ASSET_1"],
        "Unknown function name org.asset.simple:BadFunction passed with args [SIMPLE_ASSET_1]",
    );
    cc.query_err(
        &["SimpleAsset:Read", "SIMPLE_ASSET_1"],
        "Contract not found with name SimpleAsset",
    );
}

#[test]
fn before_hook_storage_failure_stops_call() {
    let cc = deploy("");
    cc.state.set_available(false);
    cc.query_err(
        &["SimpleAsset:Create", "ASSET_1"],
        "Unable to interact with world state",
    );
    cc.state.set_available(true);
    assert_eq!(cc.state.write_count(), 0);
}

#[test]
fn integer_valued_assets() {
    let cc = TestChaincode::new(counter::router().unwrap());
    cc.submit(&["CounterAsset:Create", "SIMPLE_ASSET_1"]);
    cc.submit(&["CounterAsset:Update", "SIMPLE_ASSET_1", "10"]);
    cc.submit(&["Update", "SIMPLE_ASSET_1", "5"]);
    cc.query(&["CounterAsset:Read", "SIMPLE_ASSET_1"], "15");
    cc.query_err(
        &["CounterAsset:Read", "SIMPLE_ASSET_2"],
        "Cannot read asset. Asset with id SIMPLE_ASSET_2 does not exist",
    );
}
