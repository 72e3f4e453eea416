//! Metadata served by the system contract.

use contractapi::{ChaincodeMetadata, SYSTEM_CONTRACT_NAME};
use contractapi_samples::multi;

use crate::common::TestChaincode;

fn fetch(cc: &TestChaincode) -> ChaincodeMetadata {
    let response = cc.invoke(&["org.hyperledger.fabric:GetMetadata"]);
    let payload = response.payload().expect("GetMetadata failed");
    serde_json::from_str(payload).unwrap()
}

#[test]
fn served_metadata_matches_router() {
    let cc = TestChaincode::new(multi::router().unwrap());
    let served = fetch(&cc);
    assert_eq!(&served, cc.router.metadata());
    assert_eq!(served.default_contract, "simpleasset");
    assert_eq!(served.info.title, "undefined");
    assert_eq!(served.info.version, "latest");
}

#[test]
fn every_described_function_is_callable() {
    let cc = TestChaincode::new(multi::router().unwrap());
    let served = fetch(&cc);

    let mut names: Vec<_> = served.contracts.keys().cloned().collect();
    names.sort();
    assert_eq!(names, ["complexasset", SYSTEM_CONTRACT_NAME, "simpleasset"]);

    for (contract, described) in &served.contracts {
        let registered = cc.router.registry().get(contract).unwrap();
        assert_eq!(described.transactions.len(), registered.functions().len());
        for transaction in &described.transactions {
            assert!(
                registered.function(&transaction.name).is_some(),
                "{}:{} described but not registered",
                contract,
                transaction.name
            );
        }
    }
}

#[test]
fn complex_asset_schemas() {
    let cc = TestChaincode::new(multi::router().unwrap());
    let served = fetch(&cc);

    let add = served.transaction("complexasset", "AddColours").unwrap();
    assert_eq!(add.parameters[0].name, "param0");
    assert_eq!(
        add.parameters[1].schema,
        serde_json::json!({"type": "array", "items": {"type": "string"}})
    );
    assert!(add.returns.is_none());

    let value = served.transaction("complexasset", "ReadValue").unwrap();
    assert_eq!(
        value.returns,
        Some(serde_json::json!({"type": "number", "format": "double"}))
    );

    // hooks are not callable functions
    assert!(served.transaction("complexasset", "get_asset").is_none());
}
