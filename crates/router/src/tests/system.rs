//! System contract and metadata tests.

use contractapi_storage::MemoryState;

use crate::{
    BasicContext, ContractBuilder, HandlerError, MetadataConfig, RegistrationError, Router,
    RouterConfig, SignatureViolation, SYSTEM_CONTRACT_NAME,
};

struct Shelf;

impl Shelf {
    fn put(&self, _ctx: &mut BasicContext, _key: String, _count: u32) -> Result<(), HandlerError> {
        Ok(())
    }

    fn list(&self) -> Vec<String> {
        Vec::new()
    }
}

fn shelf() -> ContractBuilder<Shelf> {
    ContractBuilder::new(Shelf)
        .name("shelf")
        .function("Put", Shelf::put)
        .function_without_context("List", Shelf::list)
}

#[test]
fn test_get_metadata_served_by_system_contract() {
    let router = Router::builder().register(shelf()).build().unwrap();

    let payload = router
        .execute(MemoryState::new().stub("org.hyperledger.fabric:GetMetadata", Vec::<String>::new()))
        .unwrap();
    assert_eq!(payload, router.metadata_json());

    let json: serde_json::Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(json["defaultContract"], "shelf");
    assert_eq!(json["info"]["title"], "undefined");
    assert_eq!(json["contracts"]["shelf"]["transactions"][0]["name"], "Put");
    assert_eq!(
        json["contracts"]["shelf"]["transactions"][0]["parameters"][1]["schema"],
        serde_json::json!({"type": "integer", "format": "uint32"})
    );
    assert!(json["contracts"]["shelf"]["transactions"][0]
        .get("returns")
        .is_none());
    assert_eq!(
        json["contracts"]["shelf"]["transactions"][1]["returns"],
        serde_json::json!({"type": "array", "items": {"type": "string"}})
    );
    assert!(json["contracts"][SYSTEM_CONTRACT_NAME].is_object());
}

#[test]
fn test_metadata_lists_exactly_dispatchable_functions() {
    let router = Router::builder().register(shelf()).build().unwrap();
    let metadata = router.metadata();

    for contract in router.registry().contracts() {
        let described: Vec<_> = metadata.contracts[contract.name()]
            .transactions
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        let callable: Vec<_> = contract.functions().iter().map(|f| f.name()).collect();
        assert_eq!(described, callable);
    }
    assert!(metadata.transaction("shelf", "Put").is_some());
    assert!(metadata.transaction("shelf", "Take").is_none());
}

#[test]
fn test_system_contract_can_be_disabled() {
    let config = RouterConfig {
        system_contract: false,
        metadata: MetadataConfig {
            title: "shelves".into(),
            version: "2.0".into(),
        },
        ..RouterConfig::default()
    };
    let router = Router::builder()
        .with_config(config)
        .register(shelf())
        .build()
        .unwrap();

    assert!(router.registry().get(SYSTEM_CONTRACT_NAME).is_none());
    assert_eq!(router.metadata().info.title, "shelves");
    let response =
        router.invoke(MemoryState::new().stub("org.hyperledger.fabric:GetMetadata", Vec::<String>::new()));
    assert_eq!(
        response.message(),
        Some("Contract not found with name org.hyperledger.fabric")
    );
}

#[test]
fn test_contract_may_not_take_system_name() {
    let err = Router::builder()
        .register(ContractBuilder::new(Shelf).name(SYSTEM_CONTRACT_NAME))
        .build()
        .unwrap_err();
    assert!(matches!(err, RegistrationError::DuplicateContract { .. }));
}

#[test]
fn test_configured_default_contract() {
    struct Other;

    let config = RouterConfig {
        default_contract: Some("shelf".into()),
        ..RouterConfig::default()
    };
    let router = Router::builder()
        .with_config(config)
        .register(ContractBuilder::new(Other))
        .register(shelf())
        .build()
        .unwrap();
    assert_eq!(router.registry().default_contract().name(), "shelf");
    assert_eq!(router.metadata().default_contract, "shelf");
}

#[test]
fn test_invalid_signature_prevents_router() {
    struct Bad;

    let err = Router::builder()
        .register(shelf())
        .register(ContractBuilder::new(Bad).raw_function(
            "Bad",
            crate::Signature::new(
                vec![crate::TypeSpec::STRING, crate::TypeSpec::Context],
                vec![],
            ),
            |_: &Bad, _: &mut BasicContext, _| Ok(None),
        ))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        RegistrationError::Signature {
            contract: "Bad".into(),
            function: "Bad".into(),
            violation: SignatureViolation::ContextNotFirst { position: 1 },
        }
    );
}

#[test]
fn test_no_contracts() {
    assert_eq!(
        Router::builder().build().unwrap_err(),
        RegistrationError::NoContracts
    );
}
